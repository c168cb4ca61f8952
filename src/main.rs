use std::{path::PathBuf, process::ExitCode};

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use curl2py::{
    Curl, Result,
    codegen::{generate_json, generate_python},
    curl_cmd_parse,
    input::InputSource,
};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CurlPart {
    Method,
    Header,
    Data,
    Url,
}

impl CurlPart {
    fn matches(self, curl: &Curl) -> bool {
        matches!(
            (self, curl),
            (CurlPart::Method, Curl::Method(_))
                | (CurlPart::Header, Curl::Header(..))
                | (CurlPart::Data, Curl::Data(_))
                | (CurlPart::Url, Curl::URL(_))
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Python,
    Json,
}

fn cli() -> Command {
    Command::new("curl2py")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Turns a curl command into a Python requests script")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .help("File holding the curl command; the clipboard is read when omitted")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Print debug diagnostics to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("part")
                .short('p')
                .long("part")
                .value_name("PART")
                .help("Only print one part of the parsed command (method, header, data, url)")
                .value_parser(value_parser!(CurlPart)),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Output format")
                .default_value("python")
                .value_parser(value_parser!(OutputFormat)),
        )
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(matches: &ArgMatches) -> Result<()> {
    let source = InputSource::from(matches.get_one::<PathBuf>("input").cloned());
    let command = source.read()?;

    let parsed = curl_cmd_parse(&command)?;
    for warning in &parsed.warnings {
        warn!("{}", warning);
    }
    debug!("{:#?}", parsed.instruction);

    if let Some(part) = matches.get_one::<CurlPart>("part") {
        for curl in parsed.commands.iter().filter(|c| part.matches(c)) {
            println!("{:?}", curl);
        }
        return Ok(());
    }

    let output = match matches.get_one::<OutputFormat>("format") {
        Some(OutputFormat::Json) => generate_json(&parsed.instruction)?,
        Some(OutputFormat::Python) | None => generate_python(&parsed.instruction)?,
    };
    println!("{}", output);
    Ok(())
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    init_logging(matches.get_flag("debug"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
