use crate::curl::{Instruction, ParsedCurl, curl_parsers::curl_cmd_parse};

pub fn parse_ok(input: &str) -> ParsedCurl {
    let result = curl_cmd_parse(input);
    assert!(result.is_ok(), "The result:\r\n{:#?}", result);
    result.unwrap()
}

pub fn instruction(url: &str, method: &str, headers: &[(&str, &str)], body: &str) -> Instruction {
    Instruction {
        url: url.into(),
        method: method.into(),
        headers: headers
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect(),
        body: body.into(),
    }
}
