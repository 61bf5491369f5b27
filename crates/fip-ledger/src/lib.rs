//! Ledger-environment abstraction for proposal validation.
//!
//! The upgrade harness treats the contract platform as a black box. This
//! crate defines that boundary:
//! - **[`Ledger`]**: async query/mutation surface of the environment
//! - **[`NamedAddresses`]**: symbolic name → address registry for one run
//! - **[`ContractHandle`] / [`HandleSet`]**: live handles a script reads
//! - **[`MemoryLedger`]**: deterministic in-memory simulator for tests and
//!   dry runs
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use fip_ledger::{Address, HandleSet, Ledger, MemoryLedger, NamedAddresses};
//!
//! # async fn example() -> Result<(), fip_ledger::LedgerError> {
//! let ledger: Arc<dyn Ledger> = Arc::new(MemoryLedger::new());
//!
//! let mut registry = NamedAddresses::new();
//! registry.insert("fei", Address::from_tag(1));
//!
//! let handles = HandleSet::resolve(&["fei"], &registry, &ledger)?;
//! let _supply = handles.get("fei")?;
//! # Ok(())
//! # }
//! ```

pub mod address;
pub mod error;
pub mod handle;
pub mod ledger;
pub mod memory;
pub mod registry;

// Re-exports
pub use address::{Address, Amount};
pub use error::LedgerError;
pub use handle::{ContractHandle, HandleSet};
pub use ledger::Ledger;
pub use memory::MemoryLedger;
pub use registry::NamedAddresses;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
