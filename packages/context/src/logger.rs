//! The logging collaborator used when settings fall back to defaults.

use blockkit_core::Settings;

/// Receives resolution errors.
pub trait Logger: Send + Sync {
    fn error(&self, message: &str, context: &Settings);
}

/// Forwards to the `log` facade under the `blockkit::context` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogLogger;

impl Logger for LogLogger {
    fn error(&self, message: &str, context: &Settings) {
        log::error!(target: "blockkit::context", "{} {:?}", message, context);
    }
}
