//! The upgrade-script contract.
//!
//! One implementation per governance proposal. The four phases run in a
//! fixed order driven by [`crate::runner::ProposalRunner`]; a script never
//! re-checks sequencing itself.

use fip_ledger::{Address, Amount, HandleSet, NamedAddresses};

use crate::checks::CheckSet;
use crate::error::ScriptError;

/// Everything a phase can see: the address registry, the pre- and
/// post-upgrade handle sets (same symbolic names in both), and the
/// logging flag.
///
/// The logging flag gates progress lines only. It must never affect
/// control flow: the validation outcome is identical with logging on or
/// off.
#[derive(Debug, Clone)]
pub struct ScriptContext {
    /// Symbolic name → address, resolved before any phase ran.
    pub addresses: NamedAddresses,
    /// Handles to the pre-upgrade contracts.
    pub old_handles: HandleSet,
    /// Handles to the post-upgrade contracts, including anything `deploy`
    /// created.
    pub new_handles: HandleSet,
    /// Emit human-readable progress lines.
    pub logging: bool,
}

/// Baselines captured during `setup` for comparison during `validate`.
///
/// The record is owned by one run and threaded explicitly through the
/// phases, so the cross-phase data dependency is visible and testable;
/// scripts never stash baselines in shared mutable state. Anything
/// `validate` will need must be recorded here, since `setup` cannot
/// assume it shares process state with `validate`.
#[derive(Debug, Default)]
pub struct UpgradeRecord {
    baselines: indexmap::IndexMap<String, Amount>,
}

impl UpgradeRecord {
    /// Empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `amount` under `key`, replacing any earlier measurement.
    pub fn record_amount(&mut self, key: impl Into<String>, amount: Amount) {
        self.baselines.insert(key.into(), amount);
    }

    /// Baseline recorded under `key`.
    ///
    /// # Errors
    /// `ScriptError::MissingBaseline` when `setup` never recorded it.
    pub fn baseline(&self, key: &str) -> Result<Amount, ScriptError> {
        self.baselines
            .get(key)
            .copied()
            .ok_or_else(|| ScriptError::MissingBaseline(key.to_string()))
    }

    /// Whether a baseline exists for `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.baselines.contains_key(key)
    }

    /// Number of recorded baselines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.baselines.len()
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.baselines.is_empty()
    }
}

/// A single proposal's upgrade script.
///
/// Phase contract, in execution order:
/// 1. `deploy` — create any new contracts; empty set when there are none
/// 2. `setup` — capture baselines, stage test conditions
/// 3. *(externally applied proposal actions)*
/// 4. `teardown` — undo staging; safe no-op when nothing was staged
/// 5. `validate` — read-only checks against constants, the record, and
///    the configuration tables
#[async_trait::async_trait]
pub trait UpgradeScript: Send + Sync {
    /// Unique proposal identifier, used for logging and correlation.
    fn proposal_id(&self) -> &str;

    /// Create any contracts the proposal introduces.
    ///
    /// Failure is fatal for the run; no rollback is attempted.
    async fn deploy(
        &self,
        deployer: Address,
        ctx: &ScriptContext,
    ) -> Result<HandleSet, ScriptError>;

    /// Capture baseline measurements and stage test conditions.
    async fn setup(
        &self,
        ctx: &ScriptContext,
        record: &mut UpgradeRecord,
    ) -> Result<(), ScriptError>;

    /// Undo staging performed in `setup` that would corrupt validation.
    async fn teardown(&self, ctx: &ScriptContext) -> Result<(), ScriptError>;

    /// Compare observed ledger state against expectations. Read-only:
    /// by protocol convention no mutating call is made here.
    async fn validate(
        &self,
        ctx: &ScriptContext,
        record: &UpgradeRecord,
        checks: &mut CheckSet,
    ) -> Result<(), ScriptError>;
}

/// The state-changing actions of the proposal itself, applied between
/// `setup` and `teardown` by an external collaborator (a simulated
/// governance execution in tests, a live one in production).
#[async_trait::async_trait]
pub trait ProposalActions: Send + Sync {
    /// Apply the proposal's state changes.
    async fn apply(&self, ctx: &ScriptContext) -> Result<(), ScriptError>;
}

/// No proposal actions; useful for dry runs of the lifecycle itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoActions;

#[async_trait::async_trait]
impl ProposalActions for NoActions {
    async fn apply(&self, _ctx: &ScriptContext) -> Result<(), ScriptError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_baseline_is_an_error() {
        let record = UpgradeRecord::new();
        let err = record.baseline("fei.totalSupply").unwrap_err();
        assert!(matches!(err, ScriptError::MissingBaseline(k) if k == "fei.totalSupply"));
    }

    #[test]
    fn record_amount_replaces_earlier_measurement() {
        let mut record = UpgradeRecord::new();
        record.record_amount("fei.totalSupply", 100);
        record.record_amount("fei.totalSupply", 250);
        assert_eq!(record.baseline("fei.totalSupply").unwrap(), 250);
        assert_eq!(record.len(), 1);
    }
}
