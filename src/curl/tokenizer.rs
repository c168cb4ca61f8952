use tracing::trace;
use winnow::{
    LocatingSlice, ModalResult, Parser,
    combinator::{dispatch, peek},
    stream::Stream,
    token::{any, take_till, take_while},
};

type Input<'a> = LocatingSlice<&'a str>;

/// Characters skipped between tokens. A lone `\` is a line continuation.
const SEPARATORS: [char; 5] = [' ', '\t', '\n', '\r', '\\'];

/// Flag names never contain a backslash, so only whitespace ends a flag.
const FLAG_TERMINATORS: [char; 4] = [' ', '\t', '\n', '\r'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `-H`, `-X`, `--data-raw`, ...
    Flag,
    /// A quoted string, quote characters included.
    Quoted { closed: bool },
    Word,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub kind: TokenKind,
    /// Byte offset of the token in the command text.
    pub offset: usize,
}

impl<'a> Token<'a> {
    fn empty(offset: usize) -> Self {
        Self {
            text: "",
            kind: TokenKind::Word,
            offset,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_unterminated(&self) -> bool {
        matches!(self.kind, TokenKind::Quoted { closed: false })
    }
}

fn skip_separators(s: &mut Input<'_>) -> ModalResult<()> {
    take_while(0.., SEPARATORS).void().parse_next(s)
}

fn flag<'a>(s: &mut Input<'a>) -> ModalResult<&'a str> {
    take_till(0.., FLAG_TERMINATORS).parse_next(s)
}

fn word<'a>(s: &mut Input<'a>) -> ModalResult<&'a str> {
    take_till(0.., SEPARATORS).parse_next(s)
}

/// Returns the byte length of the quoted string at the start of `text` and
/// whether its opening quote was ever closed.
///
/// Quotes of the other kind open a nested level, so browser exports such as
/// `'sec-ch-ua: "Chromium";v="128"'` stay in one piece. A backslash escapes
/// the next quote character.
fn scan_quoted(text: &str) -> (usize, bool) {
    let mut chars = text.char_indices();
    let Some((_, open)) = chars.next() else {
        return (0, false);
    };

    let mut stack = vec![open];
    let mut escaped = false;
    for (idx, c) in chars {
        match c {
            '\'' | '"' if escaped => escaped = false,
            '\'' | '"' => {
                if stack.last() == Some(&c) {
                    stack.pop();
                    if stack.is_empty() {
                        return (idx + c.len_utf8(), true);
                    }
                } else {
                    stack.push(c);
                }
            }
            '\\' => escaped = !escaped,
            _ => {}
        }
    }

    trace!(depth = stack.len(), "quoted string runs to end of input");
    (text.len(), false)
}

fn quoted<'a>(s: &mut Input<'a>) -> ModalResult<(&'a str, bool)> {
    let (len, closed) = scan_quoted(s.peek_finish());
    Ok((s.next_slice(len), closed))
}

fn token<'a>(s: &mut Input<'a>) -> ModalResult<Token<'a>> {
    dispatch! {peek(any);
        '-' => flag.map(|text| (text, TokenKind::Flag)),
        '\'' | '"' => quoted.map(|(text, closed)| (text, TokenKind::Quoted { closed })),
        _ => word.map(|text| (text, TokenKind::Word)),
    }
    .with_span()
    .map(|((text, kind), span)| Token {
        text,
        kind,
        offset: span.start,
    })
    .parse_next(s)
}

/// Pull-based tokenizer over a curl command.
pub struct Tokenizer<'a> {
    input: Input<'a>,
    len: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(curl: &'a str) -> Self {
        Self {
            input: LocatingSlice::new(curl),
            len: curl.len(),
        }
    }

    pub fn has_next(&self) -> bool {
        self.input.eof_offset() > 0
    }

    fn offset(&self) -> usize {
        self.len - self.input.eof_offset()
    }

    /// Reads the next token. Returns an empty token once the input is used up,
    /// so a flag at the very end of the command simply gets an empty value.
    pub fn next_token(&mut self) -> Token<'a> {
        // take_while(0..) cannot fail on complete input
        let _ = skip_separators(&mut self.input);
        if !self.has_next() {
            return Token::empty(self.offset());
        }

        let token = match token.parse_next(&mut self.input) {
            Ok(token) => token,
            Err(_) => {
                let offset = self.offset();
                Token {
                    text: self.input.finish(),
                    kind: TokenKind::Word,
                    offset,
                }
            }
        };
        trace!(offset = token.offset, kind = ?token.kind, text = token.text, "token");
        token
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let _ = skip_separators(&mut self.input);
        self.has_next().then(|| self.next_token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn texts(curl: &str) -> Vec<&str> {
        Tokenizer::new(curl).map(|t| t.text).collect()
    }

    #[rstest]
    #[case("curl 'http://x'", vec!["curl", "'http://x'"])]
    #[case("curl 'http://x' \\\n  -H 'A: b'", vec!["curl", "'http://x'", "-H", "'A: b'"])]
    #[case("curl\t-X   POST\nhttp://x", vec!["curl", "-X", "POST", "http://x"])]
    #[case("curl 'http://x' \\\r\n  --compressed", vec!["curl", "'http://x'", "--compressed"])]
    #[case(r#"-d "{\"a\": 1}""#, vec!["-d", r#""{\"a\": 1}""#])]
    #[case("  \\\n  ", vec![])]
    fn test_tokens(#[case] input: &str, #[case] expected: Vec<&str>) {
        assert_eq!(expected, texts(input));
    }

    #[test]
    fn test_nested_quotes_stay_in_one_token() {
        let input = r#"-H 'sec-ch-ua: "Chromium";v="128", "Not;A=Brand";v="24"' -H 'x: y'"#;
        assert_eq!(
            vec![
                "-H",
                r#"'sec-ch-ua: "Chromium";v="128", "Not;A=Brand";v="24"'"#,
                "-H",
                "'x: y'"
            ],
            texts(input)
        );
    }

    #[test]
    fn test_escaped_quote_does_not_close() {
        let input = r#""say \"hi\"" rest"#;
        assert_eq!(vec![r#""say \"hi\"""#, "rest"], texts(input));
    }

    #[test]
    fn test_unterminated_quote_consumes_rest() {
        let mut tokenizer = Tokenizer::new("curl 'http://x -H A");
        assert_eq!("curl", tokenizer.next_token().text);

        let token = tokenizer.next_token();
        assert_eq!("'http://x -H A", token.text);
        assert!(token.is_unterminated());
        assert!(!tokenizer.has_next());
    }

    #[test]
    fn test_stray_quote_closes_early() {
        // the quote before `A` closes the string that opened at `'http`
        assert_eq!(
            vec!["curl", "'http://x -H '", "A:", "b"],
            texts("curl 'http://x -H 'A: b")
        );
    }

    #[test]
    fn test_unterminated_nested_quote_is_reported() {
        let mut tokenizer = Tokenizer::new(r#"-d '{"a": 1}"#);
        assert_eq!("-d", tokenizer.next_token().text);
        let token = tokenizer.next_token();
        assert_eq!(r#"'{"a": 1}"#, token.text);
        assert!(token.is_unterminated());
        assert!(!tokenizer.has_next());
    }

    #[test]
    fn test_flag_at_end_of_input() {
        let mut tokenizer = Tokenizer::new("curl -X");
        assert_eq!("curl", tokenizer.next_token().text);
        let flag = tokenizer.next_token();
        assert_eq!("-X", flag.text);
        assert_eq!(TokenKind::Flag, flag.kind);
        assert!(!tokenizer.has_next());
        assert!(tokenizer.next_token().is_empty());
    }

    #[test]
    fn test_trailing_whitespace_yields_empty_token() {
        let mut tokenizer = Tokenizer::new("curl  \\\n ");
        assert_eq!("curl", tokenizer.next_token().text);
        assert!(tokenizer.has_next());
        let token = tokenizer.next_token();
        assert!(token.is_empty());
        assert_eq!(9, token.offset);
        assert!(!tokenizer.has_next());
    }

    #[test]
    fn test_token_offsets() {
        let offsets: Vec<usize> = Tokenizer::new("curl  -H 'a: b'")
            .map(|t| t.offset)
            .collect();
        assert_eq!(vec![0, 6, 9], offsets);
    }

    #[rstest]
    #[case("'abc' tail", (5, true))]
    #[case(r#""a 'b' c""#, (9, true))]
    #[case(r#"'a "b' c"#, (8, false))]
    #[case(r#"'it\'s'"#, (7, true))]
    #[case("'héllo'", (8, true))]
    fn test_scan_quoted(#[case] input: &str, #[case] expected: (usize, bool)) {
        assert_eq!(expected, scan_quoted(input));
    }
}
