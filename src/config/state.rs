// Application state module
// Immutable per-process state shared across connection tasks

use crate::render::Templates;

use super::types::Config;

/// Application state
///
/// Everything here is read-only after startup; requests share it behind an
/// `Arc` without any locking.
pub struct AppState {
    pub config: Config,
    pub templates: Templates,
    pub access_log: bool,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let templates = Templates::new(&config.resources.template_dir);
        let access_log = config.logging.access_log;
        Self {
            config,
            templates,
            access_log,
        }
    }
}
