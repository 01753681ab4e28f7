use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("unknown exception filter \"{name}\"")]
    UnknownFilter { name: String },

    #[error("unknown exception renderer \"{name}\"")]
    UnknownRenderer { name: String },

    #[error("could not read configuration {}: {source}", .path.display())]
    ConfigIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
