use curl2py::{codegen::generate_python, curl_cmd_parse};

fn main() {
    let curl_command = "curl 'http://example.com' -H 'Accept: application/json' -d '{\"name\": \"abc\"}'";
    let result = curl_cmd_parse(curl_command).and_then(|parsed| generate_python(&parsed.instruction));
    match result {
        Ok(code) => println!("{}", code),
        Err(e) => eprintln!("{}", e),
    }
}
