//! Error types for the upgrade lifecycle.
//!
//! Proposal validation is a one-shot gate: no error here is retried, every
//! one surfaces to the invoking caller with the failing phase attached.

use fip_config::ConfigError;
use fip_ledger::LedgerError;

use crate::checks::ValidationReport;
use crate::runner::Phase;

/// Failure inside one phase of a script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Ledger query or call failed.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Configuration table error.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// `validate` asked for a baseline `setup` never recorded.
    #[error("no baseline recorded under '{0}'")]
    MissingBaseline(String),

    /// Script-specific failure.
    #[error("script failed: {0}")]
    Failed(String),
}

/// Failure of a whole run, tagged with the phase that raised it.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// `deploy` failed. Fatal; nothing is rolled back since any contracts
    /// created so far are newly deployed and orphaning them is acceptable.
    #[error("deploy phase failed: {0}")]
    FatalDeployment(#[source] ScriptError),

    /// `setup` failed before any proposal action was applied. Whether to
    /// still run `teardown` is the caller's decision.
    #[error("setup staging failed: {0}")]
    SetupStaging(#[source] ScriptError),

    /// The externally applied proposal actions failed.
    #[error("proposal actions failed: {0}")]
    ProposalActions(#[source] ScriptError),

    /// `teardown` failed.
    #[error("teardown failed: {0}")]
    Teardown(#[source] ScriptError),

    /// `validate` aborted on a derived-value computation before its checks
    /// could complete.
    #[error("validate phase aborted: {0}")]
    ValidateAborted(#[source] ScriptError),

    /// `validate` ran to completion and one or more checks failed. The
    /// report carries every failure from the invocation, not just the
    /// first.
    #[error("{0}")]
    Validation(ValidationReport),

    /// The driver attempted a phase out of order. Scripts never check
    /// sequencing themselves; the runner owns it.
    #[error("illegal phase transition: {from:?} -> {to:?}")]
    IllegalPhase { from: Phase, to: Phase },
}
