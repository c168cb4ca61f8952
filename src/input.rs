use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    curl::curl_parsers::is_curl,
    error::{Curl2pyError, Result},
};

/// Where the curl command comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Clipboard,
}

impl From<Option<PathBuf>> for InputSource {
    fn from(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => InputSource::File(path),
            None => InputSource::Clipboard,
        }
    }
}

impl InputSource {
    /// Reads the command text. Fails with [`Curl2pyError::MissingCommand`]
    /// when the source holds nothing usable.
    pub fn read(&self) -> Result<String> {
        let text = match self {
            InputSource::File(path) => Some(read_file(path)?),
            InputSource::Clipboard => read_clipboard().filter(|text| is_curl(text)),
        };

        text.filter(|text| !text.is_empty())
            .ok_or(Curl2pyError::MissingCommand)
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Curl2pyError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(feature = "clipboard")]
fn clipboard_text() -> Result<String> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| Curl2pyError::Clipboard(e.to_string()))?;
    clipboard
        .get_text()
        .map_err(|e| Curl2pyError::Clipboard(e.to_string()))
}

/// Clipboard problems are not fatal, there just is no command then.
#[cfg(feature = "clipboard")]
fn read_clipboard() -> Option<String> {
    debug!("clipboard init");
    clipboard_text()
        .inspect_err(|e| debug!(error = %e, "clipboard unavailable"))
        .ok()
}

#[cfg(not(feature = "clipboard"))]
fn read_clipboard() -> Option<String> {
    debug!("built without clipboard support");
    None
}
