//! Serializable parser configuration and argument declarations.
//!
//! A parser can be described in JSON instead of code:
//!
//! ```json
//! {
//!   "description": "Convert a file",
//!   "config": { "on-duplicate": "reject" },
//!   "args": [
//!     { "name": "input", "short": "i", "required": true, "validation-pattern": "^.+\\.txt$" },
//!     { "name": "verbose", "short": "v", "default-value": "false" }
//!   ],
//!   "rules": [
//!     { "kind": "requires", "argument": "output", "prerequisite": "input" }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::argument::Argument;
use crate::error::{ParseError, ParseResult};
use crate::parser::Parser;
use crate::registry::DuplicatePolicy;
use crate::rules::DependencyRule;

/// Behavior switches for a [`Parser`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ParserConfig {
    /// How registering an existing name is handled.
    pub on_duplicate: DuplicatePolicy,
    /// Check values consumed by a single short flag (`-x value`) against the
    /// argument's validation pattern, as is always done for long flags.
    pub validate_short_values: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            on_duplicate: DuplicatePolicy::Replace,
            validate_short_values: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ArgSchema {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub help: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub default_value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
}

impl ArgSchema {
    pub fn to_argument(&self) -> Argument {
        let mut arg = Argument::new(self.name.clone())
            .help(self.help.clone())
            .required(self.required)
            .default_value(self.default_value.clone());
        if let Some(pattern) = &self.validation_pattern {
            arg = arg.pattern(pattern.clone());
        }
        if let Some(c) = self.short {
            arg = arg.short(c);
        }
        arg
    }
}

impl From<&Argument> for ArgSchema {
    fn from(arg: &Argument) -> Self {
        Self {
            name: arg.name().to_string(),
            help: arg.help_text().to_string(),
            required: arg.is_required(),
            default_value: arg.default_str().to_string(),
            validation_pattern: arg.validation_pattern().map(|s| s.to_string()),
            short: arg.short_flag(),
        }
    }
}

/// Declarative form of the built-in dependency rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RuleSchema {
    /// `prerequisite` must be set whenever `argument` is set.
    Requires {
        argument: String,
        prerequisite: String,
    },
    /// `prerequisite` must be set whenever `argument` resolved to `"true"`.
    RequiresWhenEnabled {
        argument: String,
        prerequisite: String,
    },
}

impl RuleSchema {
    pub fn to_rule(&self) -> DependencyRule {
        match self {
            Self::Requires {
                argument,
                prerequisite,
            } => DependencyRule::requires(argument.clone(), prerequisite.clone()),
            Self::RequiresWhenEnabled {
                argument,
                prerequisite,
            } => DependencyRule::requires_when_enabled(argument.clone(), prerequisite.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ParserSchema {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    #[serde(default)]
    pub config: ParserConfig,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<ArgSchema>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<RuleSchema>,
}

impl ParserSchema {
    pub fn from_json_str(json: &str) -> ParseResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> ParseResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json(&self) -> ParseResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build a parser, registering `args` and then `rules` in order.
    pub fn build(&self) -> ParseResult<Parser> {
        let mut parser = Parser::with_config(self.description.clone(), self.config.clone());
        if let Some(program) = &self.program {
            parser = parser.program(program.clone());
        }
        for arg in &self.args {
            parser.add_argument(arg.to_argument())?;
        }
        parser.add_rules(self.rules.iter().map(RuleSchema::to_rule));
        Ok(parser)
    }
}

impl TryFrom<&ParserSchema> for Parser {
    type Error = ParseError;

    fn try_from(schema: &ParserSchema) -> ParseResult<Self> {
        schema.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::parser::ParseOutcome;

    const SCHEMA: &str = r#"{
        "description": "Convert a file",
        "program": "convert",
        "config": { "on-duplicate": "reject" },
        "args": [
            { "name": "input", "short": "i", "validation-pattern": "^.+\\.txt$" },
            { "name": "output", "short": "o" },
            { "name": "verbose", "short": "v", "default-value": "false" }
        ],
        "rules": [
            { "kind": "requires", "argument": "output", "prerequisite": "input" },
            { "kind": "requires-when-enabled", "argument": "verbose", "prerequisite": "output" }
        ]
    }"#;

    #[test]
    fn config_defaults_apply_to_missing_keys() {
        let config: ParserConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ParserConfig::default());
        assert!(config.validate_short_values);
        assert_eq!(config.on_duplicate, DuplicatePolicy::Replace);
    }

    #[test]
    fn builds_a_working_parser_from_json() {
        let schema = ParserSchema::from_json_str(SCHEMA).unwrap();
        assert_eq!(schema.config.on_duplicate, DuplicatePolicy::Reject);
        assert_eq!(schema.rules.len(), 2);

        let parser = schema.build().unwrap();
        assert_eq!(parser.program_name(), Some("convert"));

        let ParseOutcome::Matches(m) = parser.parse(&["-i", "a.txt", "-o", "b.txt"]).unwrap() else {
            panic!("expected Matches");
        };
        assert_eq!(m.get("input").unwrap(), "a.txt");
        assert_eq!(m.get("verbose").unwrap(), "false");

        let err = parser.parse(&["-o", "b.txt"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DependencyViolation);
    }

    #[test]
    fn duplicate_names_in_a_rejecting_schema_fail() {
        let mut schema = ParserSchema::from_json_str(SCHEMA).unwrap();
        schema.args.push(ArgSchema {
            name: "input".to_string(),
            ..Default::default()
        });
        let err = Parser::try_from(&schema).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateArgument);
    }

    #[test]
    fn malformed_json_is_a_schema_error() {
        let err = ParserSchema::from_json_str("{ \"args\": 3 }").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
    }

    #[test]
    fn missing_schema_file_is_a_plain_io_error() {
        let path = std::env::temp_dir()
            .join("argparse-lite-missing-dir")
            .join("schema.json");
        let err = ParserSchema::from_file(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        let msg = err.to_string();
        assert!(msg.starts_with("I/O error: "), "{msg}");
        assert!(!msg.contains("help"), "{msg}");
    }

    #[test]
    fn arguments_survive_a_json_trip() {
        let arg = Argument::new("level")
            .help("Level")
            .default_value("1")
            .pattern(r"\d")
            .short('l');
        let schema = ParserSchema {
            args: vec![ArgSchema::from(&arg)],
            ..Default::default()
        };
        let json = schema.to_json().unwrap();
        let back = ParserSchema::from_json_str(&json).unwrap();
        assert_eq!(back.args[0].to_argument(), arg);
    }
}
