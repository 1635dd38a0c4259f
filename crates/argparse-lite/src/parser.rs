use std::ffi::OsString;
use std::path::Path;

use crate::argument::Argument;
use crate::error::{ParseError, ParseResult};
use crate::help;
use crate::matches::Matches;
use crate::registry::Registry;
use crate::rules::DependencyRule;
use crate::schema::ParserConfig;

const HELP_TOKEN: &str = "--help";
const PRESENCE_VALUE: &str = "true";

/// Result of a successful parse.
#[derive(Debug, Clone)]
pub enum ParseOutcome<'p> {
    Matches(Matches<'p>),
    /// `--help` was seen. Carries the rendered help text; nothing after it was
    /// parsed or validated.
    Help(String),
}

/// Argument declarations, dependency rules, and the parse entry points.
///
/// ```
/// use argparse_lite::{Argument, ParseOutcome, Parser};
///
/// let mut parser = Parser::new("Copy a file");
/// parser.add_argument(Argument::new("input").required(true).short('i')).unwrap();
/// parser.add_argument(Argument::new("force").default_value("false").short('f')).unwrap();
///
/// let argv = ["-i", "a.txt", "-f"];
/// let ParseOutcome::Matches(m) = parser.parse(&argv).unwrap() else {
///     panic!("expected matches");
/// };
/// assert_eq!(m.get("input").unwrap(), "a.txt");
/// assert_eq!(m.get("force").unwrap(), "true");
/// ```
#[derive(Debug, Default)]
pub struct Parser {
    description: String,
    program: Option<String>,
    config: ParserConfig,
    registry: Registry,
    rules: Vec<DependencyRule>,
}

impl Parser {
    pub fn new(description: impl Into<String>) -> Self {
        Self::with_config(description, ParserConfig::default())
    }

    pub fn with_config(description: impl Into<String>, config: ParserConfig) -> Self {
        Self {
            description: description.into(),
            config,
            ..Default::default()
        }
    }

    /// Program name shown in the usage line of the help text.
    pub fn program(mut self, name: impl Into<String>) -> Self {
        self.program = Some(name.into());
        self
    }

    pub fn add_argument(&mut self, argument: Argument) -> ParseResult<&mut Self> {
        tracing::debug!(argument = %argument.name(), "registering argument");
        self.registry.insert(argument, self.config.on_duplicate)?;
        Ok(self)
    }

    /// Register a dependency rule. Rules run in registration order.
    pub fn add_rule(&mut self, rule: DependencyRule) -> &mut Self {
        self.rules.push(rule);
        self
    }

    pub fn add_rules(&mut self, rules: impl IntoIterator<Item = DependencyRule>) -> &mut Self {
        self.rules.extend(rules);
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn program_name(&self) -> Option<&str> {
        self.program.as_deref()
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn rules(&self) -> &[DependencyRule] {
        &self.rules
    }

    /// Render the help text.
    pub fn help(&self) -> String {
        help::render(self)
    }

    /// Write the help text to `path`, or to stdout when `path` is `None`.
    pub fn write_help(&self, path: Option<&Path>) -> ParseResult<()> {
        help::write(&self.help(), path)
    }

    /// Parse the current process arguments, skipping the program path.
    ///
    /// An argument that is not valid UTF-8 fails with `InvalidArgumentSyntax`.
    pub fn parse_env(&self) -> ParseResult<ParseOutcome<'_>> {
        let argv = utf8_args(std::env::args_os().skip(1))?;
        self.parse(&argv)
    }

    /// Parse `argv` (without the program path).
    ///
    /// - `--help` => `ParseOutcome::Help`
    /// - `--name [value]` long flags, `-x [value]` and clustered `-xyz` short flags
    /// - required argument checks, then dependency rules
    ///
    /// The first failure aborts the parse.
    pub fn parse<S: AsRef<str>>(&self, argv: &[S]) -> ParseResult<ParseOutcome<'_>> {
        if argv.is_empty() {
            return Err(ParseError::NoArguments);
        }
        tracing::debug!(tokens = argv.len(), "parsing arguments");

        let mut m = Matches::new(&self.registry);
        let mut i = 0usize;
        while i < argv.len() {
            let arg: &str = argv[i].as_ref();
            let next: Option<&str> = argv.get(i + 1).map(|s| s.as_ref());
            tracing::trace!(index = i, token = arg, "classifying token");

            if arg == HELP_TOKEN {
                tracing::debug!("help requested");
                return Ok(ParseOutcome::Help(self.help()));
            }

            let consumed_next = if let Some(name) = arg.strip_prefix("--") {
                self.resolve_long(name, next, &mut m)?
            } else if let Some(cluster) = arg.strip_prefix('-') {
                self.resolve_short(cluster, next, &mut m)?
            } else {
                return Err(ParseError::UnexpectedToken(arg.to_string()));
            };

            i += if consumed_next { 2 } else { 1 };
        }

        self.validate(&m)?;
        tracing::debug!("arguments parsed");
        Ok(ParseOutcome::Matches(m))
    }

    /// `--name [value]`. Returns whether the next token was consumed.
    fn resolve_long(&self, name: &str, next: Option<&str>, m: &mut Matches<'_>) -> ParseResult<bool> {
        if name.is_empty() {
            return Err(ParseError::InvalidArgumentSyntax("--".to_string()));
        }
        let decl = self
            .registry
            .declared(name)
            .ok_or_else(|| ParseError::UnknownArgument(name.to_string()))?;

        match value_token(next) {
            Some(value) => {
                decl.check(value)?;
                m.set_value(name, value.to_string());
                Ok(true)
            }
            None if decl.arg.is_required() => {
                Err(ParseError::MissingRequiredValue(name.to_string()))
            }
            None => {
                // Optional flag without a value: presence only, the default applies.
                m.mark_present(name);
                Ok(false)
            }
        }
    }

    /// `-x [value]` or `-xyz`. Returns whether the next token was consumed.
    fn resolve_short(&self, cluster: &str, next: Option<&str>, m: &mut Matches<'_>) -> ParseResult<bool> {
        if cluster.is_empty() {
            return Err(ParseError::InvalidArgumentSyntax("-".to_string()));
        }
        let single = cluster.chars().count() == 1;

        for c in cluster.chars() {
            let name = self
                .registry
                .resolve_short(c)
                .ok_or(ParseError::UnknownFlag(c))?;

            if m.has_value(name) {
                tracing::trace!(flag = %c, argument = name, "already set, skipping");
                continue;
            }

            if single {
                if let Some(value) = value_token(next) {
                    if self.config.validate_short_values {
                        if let Some(decl) = self.registry.declared(name) {
                            decl.check(value)?;
                        }
                    }
                    m.set_value(name, value.to_string());
                    return Ok(true);
                }
            }

            m.set_value(name, PRESENCE_VALUE.to_string());
        }

        Ok(false)
    }

    fn validate(&self, m: &Matches<'_>) -> ParseResult<()> {
        for decl in self.registry.declared_iter() {
            let name = decl.arg.name();
            if decl.arg.is_required() && !m.has_value(name) {
                return Err(ParseError::MissingRequiredArgument(name.to_string()));
            }
        }

        for rule in &self.rules {
            if !rule.is_satisfied(m) {
                return Err(ParseError::DependencyViolation(rule.message().to_string()));
            }
        }
        Ok(())
    }
}

/// The next token, if it can serve as a value (it must not look like a flag).
fn value_token(next: Option<&str>) -> Option<&str> {
    next.filter(|t| !t.starts_with('-'))
}

fn utf8_args(args: impl IntoIterator<Item = OsString>) -> ParseResult<Vec<String>> {
    args.into_iter()
        .map(|raw| {
            raw.into_string().map_err(|raw| {
                ParseError::InvalidArgumentSyntax(format!(
                    "argument is not valid UTF-8: {}",
                    raw.to_string_lossy()
                ))
            })
        })
        .collect()
}
