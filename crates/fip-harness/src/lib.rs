//! Staged upgrade-and-validation lifecycle for governance proposals.
//!
//! One proposal, one script, four phases:
//! 1. **deploy** — create any new contracts
//! 2. **setup** — capture baselines, stage test conditions
//! 3. *(the proposal's own actions, applied externally)*
//! 4. **teardown** — undo staging
//! 5. **validate** — read-only checks against declared expectations
//!
//! The [`ProposalRunner`] drives the phases in a fixed order against a
//! resolved [`RunEnv`], accumulating every failed check into a
//! [`ValidationReport`] rather than stopping at the first.
//!
//! # Example
//!
//! ```rust,ignore
//! use fip_harness::{NoActions, ProposalRunner, RunEnv};
//!
//! let runner = ProposalRunner::new(true);
//! let report = runner.run(&script, env, &NoActions).await?;
//! println!("{report}");
//! ```

pub mod checks;
pub mod conformance;
pub mod error;
pub mod runner;
pub mod script;

// Re-exports
pub use checks::{AssertionFailure, CheckSet, ValidationReport};
pub use conformance::{verify_role_assignments, verify_tracked_assets};
pub use error::{HarnessError, ScriptError};
pub use runner::{next_phase, validate_transition, Phase, ProposalRunner, RunEnv};
pub use script::{NoActions, ProposalActions, ScriptContext, UpgradeRecord, UpgradeScript};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
