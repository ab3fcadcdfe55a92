//! Configuration system
//!
//! [`PlayerOptions`] is the file/host form where every field is optional;
//! [`PlayerConfig`] is the resolved, immutable form the player holds for its
//! whole lifetime.

pub use serde::{Serialize, Deserialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Player options as supplied by a host or a config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerOptions {
    /// Base URL for resource resolution
    pub server: Option<String>,

    /// Enable the diagnostic throw-ball physics interaction
    pub enable_throw_ball: Option<bool>,

    /// Mount the performance statistics overlay
    pub show_stats: Option<bool>,
}

impl Config for PlayerOptions {}

impl PlayerOptions {
    /// Set the resource server
    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }

    /// Enable or disable the throw-ball feature
    pub fn with_throw_ball(mut self, enabled: bool) -> Self {
        self.enable_throw_ball = Some(enabled);
        self
    }

    /// Enable or disable the stats overlay
    pub fn with_stats(mut self, enabled: bool) -> Self {
        self.show_stats = Some(enabled);
        self
    }
}

/// Resolved player configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    server: String,
    enable_throw_ball: bool,
    show_stats: bool,
}

impl PlayerConfig {
    /// Apply defaults: `server` falls back to `origin`, flags to `false`
    pub fn resolve(options: PlayerOptions, origin: &str) -> Self {
        let server = options
            .server
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| origin.to_string());
        Self {
            server,
            enable_throw_ball: options.enable_throw_ball.unwrap_or(false),
            show_stats: options.show_stats.unwrap_or(false),
        }
    }

    /// Base URL for resource resolution
    pub fn server(&self) -> &str {
        &self.server
    }

    /// Whether the throw-ball feature is enabled
    pub fn enable_throw_ball(&self) -> bool {
        self.enable_throw_ball
    }

    /// Whether the stats overlay is mounted
    pub fn show_stats(&self) -> bool {
        self.show_stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fall_back_to_origin() {
        let config = PlayerConfig::resolve(PlayerOptions::default(), "http://localhost:2000");
        assert_eq!(config.server(), "http://localhost:2000");
        assert!(!config.enable_throw_ball());
        assert!(!config.show_stats());
    }

    #[test]
    fn test_explicit_options_win() {
        let options = PlayerOptions::default()
            .with_server("https://assets.example.com")
            .with_throw_ball(true)
            .with_stats(true);
        let config = PlayerConfig::resolve(options, "http://localhost");
        assert_eq!(config.server(), "https://assets.example.com");
        assert!(config.enable_throw_ball());
        assert!(config.show_stats());
    }

    #[test]
    fn test_blank_server_uses_origin() {
        let options = PlayerOptions::default().with_server("  ");
        let config = PlayerConfig::resolve(options, "http://origin");
        assert_eq!(config.server(), "http://origin");
    }

    #[test]
    fn test_options_parse_from_toml() {
        let options: PlayerOptions = toml::from_str("showStats = true\nserver = \"http://cdn\"")
            .expect("valid toml");
        assert_eq!(options.show_stats, Some(true));
        assert_eq!(options.server.as_deref(), Some("http://cdn"));
        assert_eq!(options.enable_throw_ball, None);
    }

    #[test]
    fn test_options_parse_from_ron() {
        let options: PlayerOptions = ron::from_str("(enableThrowBall: Some(true))")
            .expect("valid ron");
        assert_eq!(options.enable_throw_ball, Some(true));
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let path = std::env::temp_dir().join(format!("scene_player_options_{}.yaml", std::process::id()));
        std::fs::write(&path, "showStats: true\n").expect("write temp config");
        let path = path.to_string_lossy().into_owned();

        let result = PlayerOptions::load_from_file(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(p)) if p == path));
    }

    #[test]
    fn test_toml_file_round_trip() {
        let path = std::env::temp_dir().join(format!("scene_player_options_{}.toml", std::process::id()));
        let path = path.to_string_lossy().into_owned();
        let options = PlayerOptions::default().with_throw_ball(true);

        options.save_to_file(&path).expect("save");
        let loaded = PlayerOptions::load_from_file(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.expect("load"), options);
    }
}
