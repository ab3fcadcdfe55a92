//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// Respects `RUST_LOG`; defaults to `info` when the variable is unset.
pub fn init() {
    let env = env_logger::Env::default().default_filter_or("info");
    // A host may already have installed a logger; that is not an error here.
    let _ = env_logger::Builder::from_env(env).try_init();
}
