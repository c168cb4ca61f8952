use tracing::debug;

use crate::{
    curl::{
        Curl, Instruction, ParseWarning, ParsedCurl,
        tokenizer::{Token, TokenKind, Tokenizer},
    },
    error::{Curl2pyError, Result},
};

const CURL_CMD: &str = "curl";

/// Flags that consume the token after them.
const VALUE_FLAGS: &[&str] = &[
    "-H",
    "--header",
    "-X",
    "--request",
    "-d",
    "--data",
    "--data-raw",
    "--data-binary",
    "--data-ascii",
];

/// True when `input` mentions curl anywhere, case-insensitively.
pub fn is_curl(input: &str) -> bool {
    input.to_lowercase().contains(CURL_CMD)
}

/// Strips one pair of enclosing quotes plus surrounding whitespace.
///
/// Only the first character is checked: `'abc"` still loses both ends.
pub fn unquote(token: &str) -> &str {
    let token = token.trim();
    let mut chars = token.chars();
    match (chars.next(), chars.next_back()) {
        (Some('\'' | '"'), Some(last)) => token[1..token.len() - last.len_utf8()].trim(),
        _ => token,
    }
}

fn is_value_flag(token: &str) -> bool {
    VALUE_FLAGS.contains(&token)
}

fn check_closed(token: &Token<'_>, warnings: &mut Vec<ParseWarning>) {
    if token.is_unterminated() {
        warnings.push(ParseWarning::UnterminatedQuote {
            offset: token.offset,
        });
    }
}

/// Walks the token stream and interprets every recognized flag.
pub fn commands_parse(tokenizer: &mut Tokenizer<'_>) -> (Vec<Curl>, Vec<ParseWarning>) {
    let mut commands = Vec::new();
    let mut warnings = Vec::new();

    while tokenizer.has_next() {
        let token = tokenizer.next_token();
        check_closed(&token, &mut warnings);
        debug!(token = token.text, "next token");

        match token.text {
            CURL_CMD | "" => {}
            flag if is_value_flag(flag) => {
                let param = tokenizer.next_token();
                check_closed(&param, &mut warnings);
                if param.is_empty() {
                    warnings.push(ParseWarning::MissingValue {
                        flag: flag.into(),
                        offset: token.offset,
                    });
                    // the empty value still applies, a header just has nothing to split
                    commands.extend(Curl::new(flag, param.text));
                    continue;
                }

                match Curl::new(flag, param.text) {
                    Some(curl) => commands.push(curl),
                    None => warnings.push(ParseWarning::MalformedHeader {
                        header: param.text.into(),
                        offset: param.offset,
                    }),
                }
            }
            other => {
                if token.kind == TokenKind::Flag {
                    warnings.push(ParseWarning::FlagAsUrl {
                        flag: other.into(),
                        offset: token.offset,
                    });
                }
                commands.push(Curl::new_as_url(other));
            }
        }
    }

    (commands, warnings)
}

/// Parses a whole curl command. Only blank input is an error; anything else
/// produces a best-effort instruction.
pub fn curl_cmd_parse(input: &str) -> Result<ParsedCurl> {
    if input.trim().is_empty() {
        return Err(Curl2pyError::EmptyInput);
    }

    let mut tokenizer = Tokenizer::new(input);
    let (commands, warnings) = commands_parse(&mut tokenizer);
    let instruction = Instruction::from_commands(&commands);
    debug!(?instruction, warnings = warnings.len(), "parsed curl command");

    Ok(ParsedCurl {
        instruction,
        commands,
        warnings,
    })
}
