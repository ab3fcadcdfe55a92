//! JSON scene loader

use async_trait::async_trait;
use std::collections::HashSet;

use crate::foundation::math::utils::vec3;
use crate::render::Camera;
use crate::scene::description::{CameraSection, ClipSection, SceneDescription};
use crate::scene::{
    AnimationClip, Keyframe, LoadError, LoadedScene, RenderTargetSettings, Scene, SceneLoader,
    SceneObject, ScriptBinding,
};

/// Loads [`SceneDescription`] documents
#[derive(Debug, Default)]
pub struct JsonSceneLoader {
    loads: u64,
    server: Option<String>,
}

impl JsonSceneLoader {
    /// Create a loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Documents loaded over the loader's lifetime
    pub fn loads(&self) -> u64 {
        self.loads
    }
}

#[async_trait(?Send)]
impl SceneLoader for JsonSceneLoader {
    async fn load(&mut self, document: serde_json::Value, server: &str) -> Result<LoadedScene, LoadError> {
        let description: SceneDescription = serde_json::from_value(document)?;
        self.server = Some(server.to_string());
        self.loads += 1;

        let scene = description
            .scene
            .map(|section| {
                let mut scene = Scene::empty();
                if let Some(name) = section.name {
                    scene.name = name;
                }
                let mut names = HashSet::new();
                for object in section.objects {
                    if !names.insert(object.name.clone()) {
                        return Err(LoadError::Invalid(format!("duplicate object name '{}'", object.name)));
                    }
                    scene.add(SceneObject {
                        name: object.name,
                        position: vec3(object.position),
                        velocity: vec3(object.velocity),
                        mass: object.mass.max(0.0),
                        url: object.url.map(|url| resolve_url(server, &url)),
                        visible: object.visible,
                    });
                }
                Ok(scene)
            })
            .transpose()?;

        let camera = description.camera.map(build_camera);

        let render_target = description.renderer.map(|renderer| RenderTargetSettings {
            width: renderer.width,
            height: renderer.height,
            clear_color: renderer.clear_color.unwrap_or([0.0, 0.0, 0.0, 1.0]),
        });

        let clips = description
            .animations
            .into_iter()
            .map(build_clip)
            .collect::<Result<Vec<_>, _>>()?;

        let scripts = description
            .scripts
            .into_iter()
            .map(|script| ScriptBinding {
                name: script.name,
                source: script.source,
                events: script.events,
            })
            .collect();

        log::debug!(
            "Loaded scene document: {} object(s), {} clip(s), camera: {}, renderer: {}",
            scene.as_ref().map_or(0, |s| s.objects.len()),
            clips.len(),
            camera.is_some(),
            render_target.is_some()
        );

        Ok(LoadedScene { scene, camera, render_target, clips, scripts })
    }

    fn dispose(&mut self) {
        self.server = None;
    }
}

fn build_camera(section: CameraSection) -> Camera {
    // Aspect is fixed up by the player once the render target size is known.
    let mut camera = Camera::perspective(vec3(section.position), section.fov, 1.0, section.near, section.far);
    camera.target = vec3(section.target);
    camera
}

fn build_clip(section: ClipSection) -> Result<AnimationClip, LoadError> {
    if section.keyframes.is_empty() {
        return Err(LoadError::Invalid(format!("clip '{}' has no keyframes", section.name)));
    }
    let mut keyframes: Vec<Keyframe> = section
        .keyframes
        .into_iter()
        .map(|k| Keyframe { time: k.time.max(0.0), position: vec3(k.position) })
        .collect();
    keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));

    let last = keyframes.last().map_or(0.0, |k| k.time);
    let duration = section.duration.unwrap_or(last);

    Ok(AnimationClip {
        name: section.name,
        target: section.target,
        duration,
        keyframes,
    })
}

/// Resolve `url` against the resource server unless it is already absolute
pub fn resolve_url(server: &str, url: &str) -> String {
    if url.contains("://") || url.starts_with("data:") {
        return url.to_string();
    }
    let base = server.trim_end_matches('/');
    let path = url.trim_start_matches("./").trim_start_matches('/');
    format!("{base}/{path}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_empty_document_loads_nothing() {
        let mut loader = JsonSceneLoader::new();
        let loaded = block_on(loader.load(json!({}), "http://localhost")).expect("empty scene loads");
        assert!(loaded.scene.is_none());
        assert!(loaded.camera.is_none());
        assert!(loaded.render_target.is_none());
        assert!(loaded.clips.is_empty());
        assert_eq!(loader.loads(), 1);
    }

    #[test]
    fn test_full_document() {
        let document = json!({
            "scene": {
                "name": "Demo",
                "objects": [
                    { "name": "box", "position": [1.0, 2.0, 3.0], "url": "models/box.json" },
                    { "name": "ball", "mass": 1.5, "visible": false }
                ]
            },
            "camera": { "position": [0.0, 1.0, 4.0], "fov": 60.0 },
            "renderer": { "width": 320, "clear_color": [0.1, 0.2, 0.3, 1.0] },
            "animations": [
                { "name": "bob", "target": "box", "keyframes": [
                    { "time": 1.0, "position": [0.0, 1.0, 0.0] },
                    { "time": 0.0, "position": [0.0, 0.0, 0.0] }
                ]}
            ],
            "scripts": [ { "name": "clicker", "events": ["click"] } ]
        });

        let mut loader = JsonSceneLoader::new();
        let loaded = block_on(loader.load(document, "https://cdn.example.com/")).expect("valid scene");

        let scene = loaded.scene.expect("scene section");
        assert_eq!(scene.name, "Demo");
        assert_eq!(
            scene.find("box").and_then(|o| o.url.clone()).as_deref(),
            Some("https://cdn.example.com/models/box.json")
        );
        let ball = scene.find("ball").expect("ball");
        assert!(ball.is_dynamic());
        assert!(!ball.visible);

        assert!(loaded.camera.is_some());
        let target = loaded.render_target.expect("renderer section");
        assert_eq!(target.width, Some(320));
        assert_eq!(target.height, None);

        let clip = &loaded.clips[0];
        assert_eq!(clip.keyframes[0].time, 0.0);
        assert_eq!(clip.duration, 1.0);
        assert_eq!(loaded.scripts[0].events, vec!["click".to_string()]);
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let document = json!({ "scene": { "objects": [ { "name": "a" }, { "name": "a" } ] } });
        let mut loader = JsonSceneLoader::new();
        let result = block_on(loader.load(document, "http://localhost"));
        assert!(matches!(result, Err(LoadError::Invalid(_))));
    }

    #[test]
    fn test_schema_mismatch() {
        let mut loader = JsonSceneLoader::new();
        let result = block_on(loader.load(json!({ "animations": "nope" }), "http://localhost"));
        assert!(matches!(result, Err(LoadError::Schema(_))));
    }

    #[test]
    fn test_resolve_url() {
        assert_eq!(resolve_url("http://a/", "./x.png"), "http://a/x.png");
        assert_eq!(resolve_url("http://a", "/x.png"), "http://a/x.png");
        assert_eq!(resolve_url("http://a", "https://b/x.png"), "https://b/x.png");
    }
}
