use nom::{
    IResult,
    bytes::complete::take_until,
    character::complete::char,
    combinator::rest,
    error::context,
    sequence::separated_pair,
};

/// `Name: Value`, split on the first colon.
fn header_parse(input: &str) -> IResult<&str, (&str, &str)> {
    context(
        "header parse",
        separated_pair(take_until(":"), char(':'), rest),
    )(input)
}

/// Splits a header line into a trimmed `(name, value)` pair.
/// Returns `None` when there is no colon to split on.
pub fn split_header(line: &str) -> Option<(String, String)> {
    let (_rest, (name, value)) = header_parse(line).ok()?;
    Some((name.trim().into(), value.trim().into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("Accept: text/html", Some(("Accept", "text/html")))]
    #[case("  Cache-Control :  no-cache  ", Some(("Cache-Control", "no-cache")))]
    #[case("Referer: http://www.sse.com.cn/", Some(("Referer", "http://www.sse.com.cn/")))]
    #[case("X-Empty:", Some(("X-Empty", "")))]
    #[case(
        r#"sec-ch-ua: "Chromium";v="128""#,
        Some(("sec-ch-ua", r#""Chromium";v="128""#))
    )]
    #[case("JustAWord", None)]
    #[case("", None)]
    fn test_split_header(#[case] input: &str, #[case] expected: Option<(&str, &str)>) {
        let expected = expected.map(|(name, value)| (name.to_string(), value.to_string()));
        assert_eq!(expected, split_header(input));
    }
}
