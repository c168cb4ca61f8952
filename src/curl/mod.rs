pub mod curl_parsers;
pub mod header;
pub mod tokenizer;

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_METHOD: &str = "GET";

/// One interpreted piece of a curl command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Curl {
    Method(String),
    URL(String),
    Header(String, String),
    /// The raw data token, quotes included.
    Data(String),
}

impl Curl {
    /// Builds the item for a value-taking flag. `None` for flags that take no
    /// value or that aren't recognized.
    pub fn new(identifier: &str, param: &str) -> Option<Self> {
        match identifier {
            "-X" | "--request" => Some(Curl::Method(curl_parsers::unquote(param).into())),
            "-H" | "--header" => {
                header::split_header(curl_parsers::unquote(param))
                    .map(|(name, value)| Curl::Header(name, value))
            }
            "-d" | "--data" | "--data-raw" | "--data-binary" | "--data-ascii" => {
                Some(Curl::Data(param.into()))
            }
            _ => None,
        }
    }

    pub fn new_as_url(url: &str) -> Self {
        Curl::URL(curl_parsers::unquote(url).into())
    }
}

/// The request a curl command describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instruction {
    pub url: String,
    pub method: String,
    pub headers: IndexMap<String, String>,
    pub body: String,
}

impl Default for Instruction {
    fn default() -> Self {
        Self {
            url: String::new(),
            method: DEFAULT_METHOD.into(),
            headers: IndexMap::new(),
            body: String::new(),
        }
    }
}

impl Instruction {
    pub fn apply(&mut self, curl: &Curl) {
        match curl {
            Curl::Method(method) => self.method = method.clone(),
            Curl::URL(url) => self.url = url.clone(),
            Curl::Header(name, value) => {
                self.headers.insert(name.clone(), value.clone());
            }
            Curl::Data(body) => self.body = body.clone(),
        }
    }

    /// A payload implies POST unless the method was set to something else.
    pub fn finish(&mut self) {
        if self.method == DEFAULT_METHOD && !self.body.is_empty() {
            self.method = "POST".into();
        }
    }

    pub fn from_commands<'a>(commands: impl IntoIterator<Item = &'a Curl>) -> Self {
        let mut instruction = Self::default();
        for curl in commands {
            instruction.apply(curl);
        }
        instruction.finish();
        instruction
    }
}

/// Something odd in the command that did not stop the parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    #[error("header `{header}` at offset {offset} has no `:` separator, dropped")]
    MalformedHeader { header: String, offset: usize },

    #[error("quote opened at offset {offset} is never closed")]
    UnterminatedQuote { offset: usize },

    #[error("`{flag}` at offset {offset} has no value")]
    MissingValue { flag: String, offset: usize },

    #[error("unknown flag `{flag}` at offset {offset} taken as the url")]
    FlagAsUrl { flag: String, offset: usize },
}

/// Result of parsing one curl command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCurl {
    pub instruction: Instruction,
    pub commands: Vec<Curl>,
    pub warnings: Vec<ParseWarning>,
}
