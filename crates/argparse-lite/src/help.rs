use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::argument::Argument;
use crate::error::ParseResult;
use crate::parser::Parser;

fn format_arg_left(arg: &Argument, short: Option<char>) -> String {
    match short {
        Some(c) => format!("-{c}, --{}", arg.name()),
        None => format!("    --{}", arg.name()),
    }
}

fn format_arg_help(arg: &Argument) -> String {
    let mut out = arg.help_text().trim().to_string();
    if arg.is_required() {
        if out.is_empty() {
            out.push_str("required");
        } else {
            out.push_str(" (required)");
        }
    }
    if !arg.default_str().is_empty() {
        if out.is_empty() {
            out.push_str(&format!("[default: {}]", arg.default_str()));
        } else {
            out.push_str(&format!(" [default: {}]", arg.default_str()));
        }
    }
    out
}

/// Render the help message for `parser`.
pub(crate) fn render(parser: &Parser) -> String {
    let mut out = String::new();
    if !parser.description().trim().is_empty() {
        out.push_str(parser.description().trim_end());
        out.push('\n');
        out.push('\n');
    }

    match parser.program_name() {
        Some(program) => out.push_str(&format!("Usage: {program} [OPTIONS]\n")),
        None => out.push_str("Usage: [OPTIONS]\n"),
    }

    let registry = parser.registry();
    let mut rows: Vec<(String, String)> = registry
        .iter()
        .map(|a| {
            (
                format_arg_left(a, registry.short_for(a.name())),
                format_arg_help(a),
            )
        })
        .collect();
    rows.push((
        "    --help".to_string(),
        "Show help information".to_string(),
    ));

    out.push_str("\nOptions:\n");
    let width = rows
        .iter()
        .map(|(l, _)| l.chars().count())
        .max()
        .unwrap_or(0);
    for (left, help) in rows {
        if help.is_empty() {
            out.push_str(&format!("  {}\n", left));
        } else {
            out.push_str(&format!("  {:width$}  {}\n", left, help, width = width));
        }
    }

    out
}

/// Write `text` to the file at `path`, or to stdout.
pub(crate) fn write(text: &str, path: Option<&Path>) -> ParseResult<()> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "writing help to file");
            let mut file = File::create(path)?;
            file.write_all(text.as_bytes())?;
            file.flush()?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
