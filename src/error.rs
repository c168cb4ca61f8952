use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Curl2pyError>;

#[derive(Error, Debug)]
pub enum Curl2pyError {
    #[error("curl command is empty")]
    EmptyInput,

    #[error("Missing curl command, either specify input file or copy the curl command to clipboard.")]
    MissingCommand,

    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
