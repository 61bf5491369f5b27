//! Error types for configuration tables.

/// Errors raised while building, loading, or querying a table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Lookup for a key the table never declared. An empty membership set
    /// is a declared key; this error means the key itself is missing.
    #[error("{table} table has no key '{key}'")]
    UnknownKey { table: &'static str, key: String },

    /// Same key declared twice while building a table.
    #[error("{table} table declares key '{key}' twice")]
    DuplicateKey { table: &'static str, key: String },

    /// Same member listed twice under one key.
    #[error("{table} table lists '{name}' twice under '{key}'")]
    DuplicateName {
        table: &'static str,
        key: String,
        name: String,
    },

    /// Member that does not resolve in the named address registry.
    #[error("{table} table references '{name}' under '{key}', not in the address registry")]
    UnresolvedName {
        table: &'static str,
        key: String,
        name: String,
    },
}
