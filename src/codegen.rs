//! Renders an [`Instruction`] as a runnable Python `requests` script, or as
//! JSON for other tooling.

use crate::{curl::Instruction, error::Result};

/// Escapes a value for a single-quoted Python string literal.
fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

/// The header mapping as a JSON object, `{}` when there are none.
fn headers_literal(instruction: &Instruction) -> Result<String> {
    if instruction.headers.is_empty() {
        return Ok("{}".into());
    }
    Ok(serde_json::to_string(&instruction.headers)?)
}

/// Generate Python code (using requests library)
///
/// The body is spliced in verbatim. Data tokens keep their shell quotes, so
/// `-d '{}'` lands in the script as the literal `'{}'`.
pub fn generate_python(instruction: &Instruction) -> Result<String> {
    let headers = headers_literal(instruction)?;
    let data = match instruction.body.as_str() {
        "" => "None",
        body => body,
    };

    let mut code = String::from("import requests\n\n");
    code.push_str(&format!("data = {}\n", data));
    code.push_str(&format!("headers = {}\n", headers));
    code.push_str(&format!(
        "res = requests.{}(url='{}', data=data, headers=headers)\n",
        instruction.method.to_lowercase(),
        escape_string(&instruction.url)
    ));
    code.push_str("print(res.status_code)\n");
    code.push_str("print(res.text)\n");
    Ok(code)
}

pub fn generate_json(instruction: &Instruction) -> Result<String> {
    Ok(serde_json::to_string_pretty(instruction)?)
}
