//! Cross-argument dependency rules, checked once after the whole command line
//! has been consumed.

use std::fmt;

use crate::matches::Matches;

type Predicate = dyn Fn(&Matches<'_>) -> bool + Send + Sync;

/// A constraint over the resolved arguments.
///
/// The predicate returns `true` when the rule is satisfied. A violated rule
/// fails the parse with `DependencyViolation` carrying `message`.
pub struct DependencyRule {
    message: String,
    check: Box<Predicate>,
}

impl DependencyRule {
    pub fn new<F>(message: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Matches<'_>) -> bool + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            check: Box::new(check),
        }
    }

    /// `prerequisite` must have a value whenever `dependent` has one.
    ///
    /// Only evaluated when both arguments are registered.
    pub fn requires(dependent: impl Into<String>, prerequisite: impl Into<String>) -> Self {
        let dependent = dependent.into();
        let prerequisite = prerequisite.into();
        let message = format!("'{prerequisite}' is required when '{dependent}' is provided");
        Self::new(message, move |m| {
            if !m.is_registered(&dependent) || !m.is_registered(&prerequisite) {
                return true;
            }
            m.value_of(&dependent).is_none() || m.value_of(&prerequisite).is_some()
        })
    }

    /// `prerequisite` must have a value whenever `flag` resolved to `"true"`.
    ///
    /// Only evaluated when both arguments are registered.
    pub fn requires_when_enabled(flag: impl Into<String>, prerequisite: impl Into<String>) -> Self {
        let flag = flag.into();
        let prerequisite = prerequisite.into();
        let message = format!("'{prerequisite}' is required when '{flag}' is enabled");
        Self::new(message, move |m| {
            if !m.is_registered(&flag) || !m.is_registered(&prerequisite) {
                return true;
            }
            m.value_of(&flag) != Some("true") || m.value_of(&prerequisite).is_some()
        })
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_satisfied(&self, matches: &Matches<'_>) -> bool {
        (self.check)(matches)
    }
}

impl fmt::Debug for DependencyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencyRule")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// The `input`/`output`/`verbose` pair used by the demo program:
/// `input` is required when `output` is provided, and `output` is required
/// when `verbose` is enabled.
pub fn example_rules() -> Vec<DependencyRule> {
    vec![
        DependencyRule::requires("output", "input"),
        DependencyRule::requires_when_enabled("verbose", "output"),
    ]
}
