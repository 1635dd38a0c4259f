//! Declare named command-line arguments, then parse and validate an argument
//! vector against them.
//!
//! - long flags `--name [value]`, short flags `-x [value]`, clustered `-xyz`
//! - default values, required arguments, full-string regex validation
//! - caller-registered dependency rules checked after the whole vector is read
//! - `--help` is always recognised and returned as [`ParseOutcome::Help`]
//!
//! ```
//! use argparse_lite::{rules, Argument, ParseOutcome, Parser, BOOLEAN_PATTERN};
//!
//! let mut parser = Parser::new("Convert a file");
//! parser
//!     .add_argument(Argument::new("input").pattern(r"^.+\.(txt|csv)$").short('i'))?
//!     .add_argument(Argument::new("output").short('o'))?
//!     .add_argument(
//!         Argument::new("verbose")
//!             .default_value("false")
//!             .pattern(BOOLEAN_PATTERN)
//!             .short('v'),
//!     )?;
//! parser.add_rules(rules::example_rules());
//!
//! match parser.parse(&["-i", "a.txt", "-o", "b.txt", "-v"])? {
//!     ParseOutcome::Matches(m) => {
//!         assert_eq!(m.get("input")?, "a.txt");
//!         assert_eq!(m.get("verbose")?, "true");
//!     }
//!     ParseOutcome::Help(text) => print!("{text}"),
//! }
//! # Ok::<(), argparse_lite::ParseError>(())
//! ```

pub mod argument;
pub mod error;
mod help;
pub mod matches;
pub mod parser;
pub mod registry;
pub mod rules;
pub mod schema;

pub use argument::{Argument, BOOLEAN_PATTERN};
pub use error::{ErrorKind, ParseError, ParseResult};
pub use matches::Matches;
pub use parser::{ParseOutcome, Parser};
pub use registry::{DuplicatePolicy, Registry};
pub use rules::DependencyRule;
pub use schema::{ArgSchema, ParserConfig, ParserSchema, RuleSchema};
