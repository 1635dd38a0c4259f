use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use crate::error::{ParseError, ParseResult};
use crate::registry::Registry;

/// Values resolved by one parse pass over the declarations in a [`Registry`].
///
/// The state lives here, not in the registry, so the same declarations can be
/// parsed any number of times.
#[derive(Debug, Clone)]
pub struct Matches<'r> {
    registry: &'r Registry,
    values: HashMap<String, String>,
    present: HashSet<String>,
}

impl<'r> Matches<'r> {
    pub(crate) fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            values: HashMap::new(),
            present: HashSet::new(),
        }
    }

    /// Resolved value for `name`, falling back to its default value.
    ///
    /// Fails only if `name` was never registered; the default may be empty.
    pub fn get(&self, name: &str) -> ParseResult<&str> {
        let arg = self
            .registry
            .get(name)
            .ok_or_else(|| ParseError::NotFound(name.to_string()))?;
        Ok(self.value_of(name).unwrap_or(arg.default_str()))
    }

    /// Like [`get`](Self::get), converted with `FromStr`.
    pub fn get_as<T: FromStr>(&self, name: &str) -> ParseResult<T> {
        let raw = self.get(name)?;
        raw.parse().map_err(|_| ParseError::InvalidValue {
            name: name.to_string(),
            value: raw.to_string(),
        })
    }

    /// Value supplied on the command line, ignoring defaults.
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .map(|s| s.as_str())
            .filter(|s| !s.is_empty())
    }

    /// Whether the argument was mentioned on the command line, with or without a value.
    pub fn is_present(&self, name: &str) -> bool {
        self.present.contains(name)
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }
}

impl Matches<'_> {
    pub(crate) fn set_value(&mut self, name: &str, value: String) {
        self.present.insert(name.to_string());
        self.values.insert(name.to_string(), value);
    }

    pub(crate) fn mark_present(&mut self, name: &str) {
        self.present.insert(name.to_string());
    }

    pub(crate) fn has_value(&self, name: &str) -> bool {
        self.value_of(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argument::Argument;
    use crate::error::ErrorKind;
    use crate::registry::DuplicatePolicy;

    fn registry() -> Registry {
        let mut reg = Registry::new();
        reg.insert(
            Argument::new("level").default_value("3"),
            DuplicatePolicy::Replace,
        )
        .unwrap();
        reg.insert(Argument::new("name"), DuplicatePolicy::Replace)
            .unwrap();
        reg
    }

    #[test]
    fn get_falls_back_to_default() {
        let reg = registry();
        let mut m = Matches::new(&reg);
        assert_eq!(m.get("level").unwrap(), "3");
        assert_eq!(m.get("name").unwrap(), "");

        m.set_value("level", "7".to_string());
        assert_eq!(m.get("level").unwrap(), "7");
        assert_eq!(m.get_as::<u32>("level").unwrap(), 7);
    }

    #[test]
    fn empty_value_counts_as_unset() {
        let reg = registry();
        let mut m = Matches::new(&reg);
        m.set_value("level", String::new());
        assert!(!m.has_value("level"));
        assert_eq!(m.get("level").unwrap(), "3");
        assert!(m.is_present("level"));
    }

    #[test]
    fn unknown_names_are_not_found() {
        let reg = registry();
        let m = Matches::new(&reg);
        assert_eq!(m.get("missing").unwrap_err().kind(), ErrorKind::NotFound);
        assert!(!m.is_registered("missing"));
    }

    #[test]
    fn get_as_reports_unparsable_values() {
        let reg = registry();
        let mut m = Matches::new(&reg);
        m.set_value("level", "high".to_string());
        let err = m.get_as::<u32>("level").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }
}
