use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::argument::{Argument, Declared};
use crate::error::{ParseError, ParseResult};

/// What to do when an argument name is registered twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// The later registration silently replaces the earlier one.
    #[default]
    Replace,
    /// Registering an existing name fails with `DuplicateArgument`.
    Reject,
}

/// Declared arguments keyed by long name, plus the short-flag alias map.
///
/// Declaration order is kept so help output is stable.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    args: IndexMap<String, Declared>,
    shorts: HashMap<char, String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, arg: Argument, policy: DuplicatePolicy) -> ParseResult<()> {
        let declared = Declared::compile(arg)?;
        let name = declared.arg.name().to_string();

        if let Some(previous) = self.args.get(&name) {
            if policy == DuplicatePolicy::Reject {
                return Err(ParseError::DuplicateArgument(name));
            }
            tracing::debug!(argument = %name, "replacing existing argument declaration");
            if let Some(c) = previous.arg.short_flag() {
                if self.shorts.get(&c) == Some(&name) {
                    self.shorts.remove(&c);
                }
            }
        }

        if let Some(c) = declared.arg.short_flag() {
            if let Some(prev) = self.shorts.insert(c, name.clone()) {
                if prev != name {
                    tracing::debug!(flag = %c, from = %prev, to = %name, "short flag reassigned");
                }
            }
        }

        self.args.insert(name, declared);
        Ok(())
    }

    pub(crate) fn declared(&self, name: &str) -> Option<&Declared> {
        self.args.get(name)
    }

    pub(crate) fn declared_iter(&self) -> impl Iterator<Item = &Declared> {
        self.args.values()
    }

    /// Long name the short flag `c` currently resolves to.
    pub fn resolve_short(&self, c: char) -> Option<&str> {
        self.shorts.get(&c).map(|s| s.as_str())
    }

    /// Short flag that still resolves to `name`, if any.
    ///
    /// A flag taken over by a later registration no longer belongs to `name`.
    pub fn short_for(&self, name: &str) -> Option<char> {
        let arg = &self.args.get(name)?.arg;
        arg.short_flag()
            .filter(|c| self.resolve_short(*c) == Some(name))
    }

    pub fn get(&self, name: &str) -> Option<&Argument> {
        self.args.get(name).map(|d| &d.arg)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.args.contains_key(name)
    }

    /// Arguments in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Argument> {
        self.args.values().map(|d| &d.arg)
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}
