use thiserror::Error;

/// Errors raised while declaring arguments, parsing an argument vector, or
/// reading resolved values.
///
/// Every parse failure aborts the whole parse; there is no partial result.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("no arguments provided")]
    NoArguments,

    #[error("invalid argument: {0}")]
    InvalidArgumentSyntax(String),

    #[error("unknown argument: --{0}")]
    UnknownArgument(String),

    #[error("unknown flag: -{0}")]
    UnknownFlag(char),

    #[error("invalid value '{value}' for argument: {name}")]
    InvalidValue { name: String, value: String },

    #[error("missing value for required argument: {0}")]
    MissingRequiredValue(String),

    #[error("missing required argument: {0}")]
    MissingRequiredArgument(String),

    #[error("{0}")]
    DependencyViolation(String),

    #[error("unexpected argument: {0}")]
    UnexpectedToken(String),

    #[error("argument not found: {0}")]
    NotFound(String),

    #[error("argument already registered: {0}")]
    DuplicateArgument(String),

    #[error("invalid validation pattern for '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid parser schema: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fieldless discriminant of [`ParseError`], handy for matching in callers
/// and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NoArguments,
    InvalidArgumentSyntax,
    UnknownArgument,
    UnknownFlag,
    InvalidValue,
    MissingRequiredValue,
    MissingRequiredArgument,
    DependencyViolation,
    UnexpectedToken,
    NotFound,
    DuplicateArgument,
    InvalidPattern,
    Schema,
    Io,
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoArguments => ErrorKind::NoArguments,
            Self::InvalidArgumentSyntax(_) => ErrorKind::InvalidArgumentSyntax,
            Self::UnknownArgument(_) => ErrorKind::UnknownArgument,
            Self::UnknownFlag(_) => ErrorKind::UnknownFlag,
            Self::InvalidValue { .. } => ErrorKind::InvalidValue,
            Self::MissingRequiredValue(_) => ErrorKind::MissingRequiredValue,
            Self::MissingRequiredArgument(_) => ErrorKind::MissingRequiredArgument,
            Self::DependencyViolation(_) => ErrorKind::DependencyViolation,
            Self::UnexpectedToken(_) => ErrorKind::UnexpectedToken,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::DuplicateArgument(_) => ErrorKind::DuplicateArgument,
            Self::InvalidPattern { .. } => ErrorKind::InvalidPattern,
            Self::Schema(_) => ErrorKind::Schema,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    /// Whether the failure came from the user's command line rather than from
    /// how the parser was declared or from I/O.
    pub fn is_usage_error(&self) -> bool {
        !matches!(
            self.kind(),
            ErrorKind::DuplicateArgument
                | ErrorKind::InvalidPattern
                | ErrorKind::Schema
                | ErrorKind::Io
                | ErrorKind::NotFound
        )
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_argument() {
        let err = ParseError::MissingRequiredArgument("input".to_string());
        assert_eq!(err.to_string(), "missing required argument: input");

        let err = ParseError::UnknownFlag('x');
        assert_eq!(err.to_string(), "unknown flag: -x");

        let err = ParseError::InvalidValue {
            name: "input".to_string(),
            value: "notes.doc".to_string(),
        };
        assert!(err.to_string().contains("notes.doc"));
    }

    #[test]
    fn usage_errors_exclude_declaration_and_io_failures() {
        assert!(ParseError::NoArguments.is_usage_error());
        assert!(ParseError::UnexpectedToken("x".to_string()).is_usage_error());
        assert!(!ParseError::DuplicateArgument("x".to_string()).is_usage_error());
        let io = std::io::Error::other("disk full");
        assert!(!ParseError::from(io).is_usage_error());
    }
}
