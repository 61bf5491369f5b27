//! Ordered membership tables.
//!
//! Both protocol-configuration tables share one shape: a mapping from a
//! string key (role identifier, asset symbol) to an ordered, duplicate-free
//! set of symbolic names. The shape is nominally tagged with a
//! [`TableKind`] so downstream tooling can tell the tables apart without
//! runtime inspection.
//!
//! Invariants:
//! - keys are unique per table
//! - membership sets contain no duplicates
//! - an empty set is a declared key, distinct from a missing key
//! - every member resolves in the named address registry
//!   (checked by [`MembershipTable::validate_against`] at load time)

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use fip_ledger::NamedAddresses;

use crate::error::ConfigError;

/// Which protocol table a `MembershipTable` represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    /// Role identifier → contracts/accounts expected to hold that role.
    Roles,
    /// Asset symbol → depositors counted toward aggregate collateral.
    CollateralTracking,
}

impl TableKind {
    /// Stable table name used in errors and serialized files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TableKind::Roles => "roles",
            TableKind::CollateralTracking => "collateral_tracking",
        }
    }
}

/// Key → ordered set of symbolic names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipTable {
    kind: TableKind,
    entries: IndexMap<String, IndexSet<String>>,
}

impl MembershipTable {
    /// Empty table of the given kind.
    #[must_use]
    pub fn new(kind: TableKind) -> Self {
        Self {
            kind,
            entries: IndexMap::new(),
        }
    }

    /// Table identity.
    #[must_use]
    pub fn kind(&self) -> TableKind {
        self.kind
    }

    /// Declare `key` with the given members, preserving member order.
    ///
    /// # Errors
    /// - `ConfigError::DuplicateKey` when `key` was already declared
    /// - `ConfigError::DuplicateName` when a member repeats under `key`
    pub fn declare<'a>(
        &mut self,
        key: &str,
        members: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), ConfigError> {
        if self.entries.contains_key(key) {
            return Err(ConfigError::DuplicateKey {
                table: self.kind.as_str(),
                key: key.to_string(),
            });
        }
        let mut set = IndexSet::new();
        for member in members {
            if !set.insert(member.to_string()) {
                return Err(ConfigError::DuplicateName {
                    table: self.kind.as_str(),
                    key: key.to_string(),
                    name: member.to_string(),
                });
            }
        }
        self.entries.insert(key.to_string(), set);
        Ok(())
    }

    /// Members declared for `key`, in declaration order.
    ///
    /// # Errors
    /// `ConfigError::UnknownKey` when `key` was never declared; an empty
    /// membership set is a successful lookup.
    pub fn lookup(&self, key: &str) -> Result<&IndexSet<String>, ConfigError> {
        self.entries.get(key).ok_or_else(|| ConfigError::UnknownKey {
            table: self.kind.as_str(),
            key: key.to_string(),
        })
    }

    /// Whether `key` is declared (possibly with an empty set).
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Declared keys, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Key/members pairs, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexSet<String>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of declared keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no keys are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every distinct name referenced by any key, in first-seen order.
    /// Resolvers use this to know what the registry must bind.
    #[must_use]
    pub fn referenced_names(&self) -> IndexSet<&str> {
        self.entries
            .values()
            .flat_map(|members| members.iter().map(String::as_str))
            .collect()
    }

    /// Check that every referenced name resolves in `registry`.
    ///
    /// Run at load time so a bad table fails before any ledger query,
    /// rather than deep inside `validate`.
    ///
    /// # Errors
    /// `ConfigError::UnresolvedName` naming the first offending entry.
    pub fn validate_against(&self, registry: &NamedAddresses) -> Result<(), ConfigError> {
        for (key, members) in &self.entries {
            for name in members {
                if !registry.contains(name) {
                    return Err(ConfigError::UnresolvedName {
                        table: self.kind.as_str(),
                        key: key.clone(),
                        name: name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Per-key set difference against `newer`.
    ///
    /// Scripts that change the configuration itself use this to reason
    /// about before/after tables. Keys present in either table appear in
    /// the diff when their membership changed; `added` holds members only
    /// in `newer`, `removed` members only in `self`. A key missing from
    /// one side diffs as an empty set.
    #[must_use]
    pub fn diff(&self, newer: &MembershipTable) -> TableDiff {
        let mut changes = IndexMap::new();
        let empty = IndexSet::new();

        let keys: IndexSet<&String> =
            self.entries.keys().chain(newer.entries.keys()).collect();
        for key in keys {
            let before = self.entries.get(key).unwrap_or(&empty);
            let after = newer.entries.get(key).unwrap_or(&empty);

            let added: IndexSet<String> = after.difference(before).cloned().collect();
            let removed: IndexSet<String> = before.difference(after).cloned().collect();
            if !added.is_empty() || !removed.is_empty() {
                changes.insert(key.clone(), KeyDiff { added, removed });
            }
        }
        TableDiff { changes }
    }
}

/// Membership change for one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDiff {
    /// Members present only in the newer table.
    pub added: IndexSet<String>,
    /// Members present only in the older table.
    pub removed: IndexSet<String>,
}

/// Per-key membership changes between two tables of the same kind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableDiff {
    changes: IndexMap<String, KeyDiff>,
}

impl TableDiff {
    /// Whether the two tables were identical.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Change recorded for `key`, if its membership differed.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&KeyDiff> {
        self.changes.get(key)
    }

    /// Changed keys with their diffs, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &KeyDiff)> {
        self.changes.iter().map(|(k, v)| (k.as_str(), v))
    }
}
