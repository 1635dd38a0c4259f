use std::env;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use argparse_lite::{
    Argument, BOOLEAN_PATTERN, ErrorKind, ParseOutcome, Parser, ParserSchema, rules,
};
use tracing_subscriber::{EnvFilter, fmt};

/// Path to a JSON parser schema that replaces the built-in declarations.
const SCHEMA_ENV: &str = "ARGDEMO_SCHEMA";
/// When set, `--help` output goes to this file instead of stdout.
const HELP_FILE_ENV: &str = "ARGDEMO_HELP_FILE";

const EXIT_USAGE: u8 = 2;

fn main() -> Result<ExitCode> {
    init_tracing();
    let parser = build_parser()?;

    match parser.parse_env() {
        Ok(ParseOutcome::Help(_)) => {
            let help_file = env::var_os(HELP_FILE_ENV).map(PathBuf::from);
            parser
                .write_help(help_file.as_deref())
                .context("failed to write help")?;
            if let Some(path) = help_file {
                eprintln!("Help written: {}", path.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        Ok(ParseOutcome::Matches(m)) => {
            let mut stdout = std::io::stdout().lock();
            for arg in parser.registry().iter() {
                writeln!(stdout, "{}={}", arg.name(), m.get(arg.name())?)?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) if err.kind() == ErrorKind::NoArguments => {
            eprint!("{}", parser.help());
            eprintln!("\nerror: {err}");
            Ok(ExitCode::from(EXIT_USAGE))
        }
        Err(err) if err.is_usage_error() => {
            eprintln!("error: {err}");
            eprintln!("Run with --help for usage.");
            Ok(ExitCode::from(EXIT_USAGE))
        }
        Err(err) => Err(err.into()),
    }
}

fn build_parser() -> Result<Parser> {
    if let Some(path) = env::var_os(SCHEMA_ENV).map(PathBuf::from) {
        tracing::debug!(path = %path.display(), "loading parser schema");
        let schema = ParserSchema::from_file(&path)
            .with_context(|| format!("failed to load schema: {}", path.display()))?;
        return schema
            .build()
            .with_context(|| format!("invalid schema: {}", path.display()));
    }

    let mut parser = Parser::new("Copy an input file to an output file.").program("argdemo");
    parser
        .add_argument(
            Argument::new("input")
                .help("Input file (.txt or .csv)")
                .pattern(r"^.+\.(txt|csv)$")
                .short('i'),
        )?
        .add_argument(Argument::new("output").help("Output file").short('o'))?
        .add_argument(
            Argument::new("verbose")
                .help("Verbose output")
                .default_value("false")
                .pattern(BOOLEAN_PATTERN)
                .short('v'),
        )?;
    parser.add_rules(rules::example_rules());
    Ok(parser)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
