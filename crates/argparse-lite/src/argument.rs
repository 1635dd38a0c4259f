use regex::Regex;

use crate::error::{ParseError, ParseResult};

/// Pattern recognised as "this argument is a boolean".
///
/// Arguments registered with it get a possible-values hint appended to their help.
pub const BOOLEAN_PATTERN: &str = "^(true|false)$";

const BOOLEAN_HINT: &str = "[possible values: true, false]";

/// Long name the parser handles itself; it always short-circuits to help.
pub(crate) const HELP_NAME: &str = "help";

/// Declaration of a single named argument.
///
/// ```
/// use argparse_lite::Argument;
///
/// let verbose = Argument::new("verbose")
///     .help("Print progress")
///     .default_value("false")
///     .pattern(argparse_lite::BOOLEAN_PATTERN)
///     .short('v');
/// assert_eq!(verbose.name(), "verbose");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Argument {
    name: String,
    help: String,
    required: bool,
    default_value: String,
    pattern: Option<String>,
    short: Option<char>,
}

impl Argument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    /// Regex every explicitly supplied value must match in full.
    ///
    /// An empty pattern means "no validation".
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        self.pattern = if pattern.is_empty() { None } else { Some(pattern) };
        self
    }

    pub fn short(mut self, flag: char) -> Self {
        self.short = Some(flag);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help_text(&self) -> &str {
        &self.help
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_str(&self) -> &str {
        &self.default_value
    }

    pub fn validation_pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    pub fn short_flag(&self) -> Option<char> {
        self.short
    }
}

/// A registered argument: the declaration plus its compiled pattern.
#[derive(Debug, Clone)]
pub(crate) struct Declared {
    pub(crate) arg: Argument,
    matcher: Option<Regex>,
}

impl Declared {
    pub(crate) fn compile(mut arg: Argument) -> ParseResult<Self> {
        if arg.name.is_empty() || arg.name.starts_with('-') {
            return Err(ParseError::InvalidArgumentSyntax(format!(
                "argument name must be non-empty and not start with '-': '{}'",
                arg.name
            )));
        }
        if arg.name == HELP_NAME {
            return Err(ParseError::InvalidArgumentSyntax(
                "'--help' is reserved for the built-in help".to_string(),
            ));
        }
        if let Some(c) = arg.short {
            if c == '-' || c.is_whitespace() {
                return Err(ParseError::InvalidArgumentSyntax(format!(
                    "invalid short flag '{c}' for argument '{}'",
                    arg.name
                )));
            }
        }

        let matcher = match arg.pattern.as_deref() {
            Some(pattern) => {
                // Anchor the whole pattern so a partial match never passes.
                let anchored = format!("^(?:{pattern})$");
                let re = Regex::new(&anchored).map_err(|source| ParseError::InvalidPattern {
                    name: arg.name.clone(),
                    source,
                })?;
                Some(re)
            }
            None => None,
        };

        if arg.pattern.as_deref() == Some(BOOLEAN_PATTERN) && !arg.help.contains(BOOLEAN_HINT) {
            if arg.help.is_empty() {
                arg.help.push_str(BOOLEAN_HINT);
            } else {
                arg.help.push(' ');
                arg.help.push_str(BOOLEAN_HINT);
            }
        }

        Ok(Self { arg, matcher })
    }

    pub(crate) fn accepts(&self, value: &str) -> bool {
        self.matcher.as_ref().is_none_or(|re| re.is_match(value))
    }

    pub(crate) fn check(&self, value: &str) -> ParseResult<()> {
        if self.accepts(value) {
            Ok(())
        } else {
            Err(ParseError::InvalidValue {
                name: self.arg.name.clone(),
                value: value.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn pattern_is_a_full_string_match() {
        let d = Declared::compile(Argument::new("input").pattern(r"^.+\.(txt|csv)$")).unwrap();
        assert!(d.accepts("notes.txt"));
        assert!(d.accepts("data.csv"));
        assert!(!d.accepts("notes.doc"));

        // Unanchored patterns are still matched against the whole value.
        let d = Declared::compile(Argument::new("n").pattern(r"\d+")).unwrap();
        assert!(d.accepts("42"));
        assert!(!d.accepts("42abc"));
    }

    #[test]
    fn no_pattern_accepts_anything() {
        let d = Declared::compile(Argument::new("output").pattern("")).unwrap();
        assert!(d.arg.validation_pattern().is_none());
        assert!(d.accepts(""));
        assert!(d.accepts("whatever"));
    }

    #[test]
    fn boolean_pattern_extends_help_once() {
        let d = Declared::compile(
            Argument::new("verbose")
                .help("Verbose output")
                .pattern(BOOLEAN_PATTERN),
        )
        .unwrap();
        assert_eq!(
            d.arg.help_text(),
            "Verbose output [possible values: true, false]"
        );

        let again = Declared::compile(d.arg.clone()).unwrap();
        assert_eq!(again.arg.help_text(), d.arg.help_text());

        let bare = Declared::compile(Argument::new("debug").pattern(BOOLEAN_PATTERN)).unwrap();
        assert_eq!(bare.arg.help_text(), "[possible values: true, false]");
    }

    #[test]
    fn rejects_bad_declarations() {
        let err = Declared::compile(Argument::new("")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgumentSyntax);

        let err = Declared::compile(Argument::new("--input")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgumentSyntax);

        let err = Declared::compile(Argument::new("help").short('h')).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgumentSyntax);

        let err = Declared::compile(Argument::new("x").short('-')).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgumentSyntax);

        let err = Declared::compile(Argument::new("x").pattern("(unclosed")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPattern);
    }
}
