//! Named address registry.
//!
//! Maps symbolic names (`"feiDAOTimelock"`, `"tribalCouncilSafe"`, ...) to
//! concrete addresses. A resolver populates it once before any phase runs;
//! scripts and the harness only read from it.

use indexmap::IndexMap;

use crate::address::Address;
use crate::error::LedgerError;

/// Symbolic name → address mapping for one validation run.
#[derive(Debug, Clone, Default)]
pub struct NamedAddresses {
    entries: IndexMap<String, Address>,
}

impl NamedAddresses {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `address`, replacing any previous binding.
    pub fn insert(&mut self, name: impl Into<String>, address: Address) {
        self.entries.insert(name.into(), address);
    }

    /// Resolve a symbolic name.
    ///
    /// # Errors
    /// `LedgerError::UnknownName` when the name was never bound.
    pub fn get(&self, name: &str) -> Result<Address, LedgerError> {
        self.entries
            .get(name)
            .copied()
            .ok_or_else(|| LedgerError::UnknownName(name.to_string()))
    }

    /// Whether `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Address)> for NamedAddresses {
    fn from_iter<T: IntoIterator<Item = (String, Address)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_resolves_bound_name() {
        let mut registry = NamedAddresses::new();
        registry.insert("feiDAOTimelock", Address::from_tag(1));
        assert_eq!(registry.get("feiDAOTimelock").unwrap(), Address::from_tag(1));
    }

    #[test]
    fn get_rejects_unbound_name() {
        let registry = NamedAddresses::new();
        let err = registry.get("nope").unwrap_err();
        assert!(matches!(err, LedgerError::UnknownName(n) if n == "nope"));
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut registry = NamedAddresses::new();
        registry.insert("b", Address::from_tag(2));
        registry.insert("a", Address::from_tag(1));
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
