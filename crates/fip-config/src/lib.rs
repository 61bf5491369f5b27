//! Declarative protocol-configuration tables.
//!
//! Two tables define the expected target state the validation harness
//! checks proposals against:
//! - **role assignments** ([`permissions::role_assignments`]): role
//!   identifier → contracts/accounts expected to hold it
//! - **collateral tracking** ([`collateral::tracked_assets`]): token
//!   symbol → deposits counted toward aggregate collateralization
//!
//! Both are [`MembershipTable`]s: ordered keys, ordered duplicate-free
//! membership sets, validated against the named address registry at load
//! time. Scripts that change the configuration diff a before table against
//! an after table with [`MembershipTable::diff`].

pub mod collateral;
pub mod error;
pub mod permissions;
pub mod table;

// Re-exports
pub use collateral::tracked_assets;
pub use error::ConfigError;
pub use permissions::role_assignments;
pub use table::{KeyDiff, MembershipTable, TableDiff, TableKind};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
