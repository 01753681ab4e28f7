use std::path::PathBuf;

use blockkit_settings::ValidationError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("no block service registered for type \"{block_type}\"")]
    ServiceNotFound { block_type: String },

    #[error("no block loader supports type \"{block_type}\"")]
    LoaderNotFound { block_type: String },

    #[error("invalid block settings: {0}")]
    Validation(#[from] ValidationError),

    #[error("could not read configuration {}: {source}", .path.display())]
    ConfigIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
