pub mod codegen;
pub mod curl;
pub mod error;
pub mod input;

#[cfg(test)]
mod test_util;

pub use curl::{Curl, Instruction, ParseWarning, ParsedCurl, curl_parsers::curl_cmd_parse};
pub use error::{Curl2pyError, Result};
