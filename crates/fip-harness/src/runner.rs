//! The lifecycle driver.
//!
//! `ProposalRunner` executes one script's phases in a fixed order:
//! `Created → Deployed → SetUp → ProposalApplied → TornDown → Validated`,
//! once each, synchronously — every phase's I/O fully completes before the
//! next begins. Sequencing is enforced here, never inside scripts.

use fip_ledger::{Address, HandleSet, NamedAddresses};

use crate::checks::{CheckSet, ValidationReport};
use crate::error::{HarnessError, ScriptError};
use crate::script::{ProposalActions, ScriptContext, UpgradeRecord, UpgradeScript};

/// Lifecycle state of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing has run yet.
    Created,
    /// `deploy` completed.
    Deployed,
    /// `setup` completed.
    SetUp,
    /// The proposal's own actions were applied.
    ProposalApplied,
    /// `teardown` completed.
    TornDown,
    /// `validate` completed.
    Validated,
}

/// The single phase that may legally follow `from`. The lifecycle is
/// strictly sequential: no branching, no retry, no re-entry.
#[must_use]
pub fn next_phase(from: Phase) -> Option<Phase> {
    use Phase::*;
    match from {
        Created => Some(Deployed),
        Deployed => Some(SetUp),
        SetUp => Some(ProposalApplied),
        ProposalApplied => Some(TornDown),
        TornDown => Some(Validated),
        Validated => None,
    }
}

/// Validate a phase transition.
pub fn validate_transition(from: Phase, to: Phase) -> Result<(), HarnessError> {
    if next_phase(from) == Some(to) {
        Ok(())
    } else {
        Err(HarnessError::IllegalPhase { from, to })
    }
}

/// Resolved inputs for one run.
#[derive(Debug, Clone)]
pub struct RunEnv {
    /// Identity performing any deployments.
    pub deployer: Address,
    /// Symbolic name → address registry, populated by the resolver.
    pub addresses: NamedAddresses,
    /// Pre-upgrade contract handles.
    pub old_handles: HandleSet,
    /// Post-upgrade contract handles (before any fresh deployments).
    pub new_handles: HandleSet,
}

/// Drives one proposal through the four-phase lifecycle.
#[derive(Debug, Clone, Copy)]
pub struct ProposalRunner {
    logging: bool,
}

impl ProposalRunner {
    /// Runner with the given logging flag. The flag is threaded into every
    /// phase and gates progress lines only.
    #[must_use]
    pub fn new(logging: bool) -> Self {
        Self { logging }
    }

    /// Execute all phases of `script` against `env`, applying `actions`
    /// between `setup` and `teardown`.
    ///
    /// # Errors
    /// The first failing phase aborts the run with the matching
    /// `HarnessError` variant; a completed `validate` with failed checks
    /// yields `HarnessError::Validation` carrying every failure.
    pub async fn run(
        &self,
        script: &dyn UpgradeScript,
        env: RunEnv,
        actions: &dyn ProposalActions,
    ) -> Result<ValidationReport, HarnessError> {
        let proposal_id = script.proposal_id().to_string();
        let mut phase = Phase::Created;

        let mut ctx = ScriptContext {
            addresses: env.addresses,
            old_handles: env.old_handles,
            new_handles: env.new_handles,
            logging: self.logging,
        };

        let deployed = script
            .deploy(env.deployer, &ctx)
            .await
            .map_err(HarnessError::FatalDeployment)?;
        self.log_phase(&proposal_id, "deploy", deployed.len());
        ctx.new_handles.merge(deployed);
        advance(&mut phase, Phase::Deployed)?;

        let mut record = UpgradeRecord::new();
        script
            .setup(&ctx, &mut record)
            .await
            .map_err(HarnessError::SetupStaging)?;
        self.log_phase(&proposal_id, "setup", record.len());
        advance(&mut phase, Phase::SetUp)?;

        actions
            .apply(&ctx)
            .await
            .map_err(HarnessError::ProposalActions)?;
        self.log_phase(&proposal_id, "apply", 0);
        advance(&mut phase, Phase::ProposalApplied)?;

        script
            .teardown(&ctx)
            .await
            .map_err(HarnessError::Teardown)?;
        self.log_phase(&proposal_id, "teardown", 0);
        advance(&mut phase, Phase::TornDown)?;

        let mut checks = CheckSet::new(&proposal_id);
        script
            .validate(&ctx, &record, &mut checks)
            .await
            .map_err(HarnessError::ValidateAborted)?;
        advance(&mut phase, Phase::Validated)?;

        let report = checks.into_report();
        if self.logging {
            tracing::info!(proposal = %proposal_id, passed = report.passed, failed = report.failures.len(), "validate phase complete");
        }
        if report.is_clean() {
            Ok(report)
        } else {
            Err(HarnessError::Validation(report))
        }
    }

    fn log_phase(&self, proposal_id: &str, name: &str, items: usize) {
        if self.logging {
            tracing::info!(proposal = %proposal_id, phase = name, items, "phase complete");
        }
    }
}

fn advance(phase: &mut Phase, to: Phase) -> Result<(), HarnessError> {
    validate_transition(*phase, to)?;
    *phase = to;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::NoActions;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    /// Records phase invocations; optionally fails a chosen phase.
    struct SpyScript {
        calls: Arc<Mutex<Vec<&'static str>>>,
        fail_in: Option<&'static str>,
    }

    impl SpyScript {
        fn new(calls: Arc<Mutex<Vec<&'static str>>>) -> Self {
            Self {
                calls,
                fail_in: None,
            }
        }

        fn failing_in(calls: Arc<Mutex<Vec<&'static str>>>, phase: &'static str) -> Self {
            Self {
                calls,
                fail_in: Some(phase),
            }
        }

        fn mark(&self, phase: &'static str) -> Result<(), ScriptError> {
            self.calls.lock().push(phase);
            if self.fail_in == Some(phase) {
                Err(ScriptError::Failed(format!("{phase} rigged to fail")))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait::async_trait]
    impl UpgradeScript for SpyScript {
        fn proposal_id(&self) -> &str {
            "TC-SPY"
        }

        async fn deploy(
            &self,
            _deployer: Address,
            _ctx: &ScriptContext,
        ) -> Result<HandleSet, ScriptError> {
            self.mark("deploy")?;
            Ok(HandleSet::new())
        }

        async fn setup(
            &self,
            _ctx: &ScriptContext,
            record: &mut UpgradeRecord,
        ) -> Result<(), ScriptError> {
            self.mark("setup")?;
            record.record_amount("spy.baseline", 1);
            Ok(())
        }

        async fn teardown(&self, _ctx: &ScriptContext) -> Result<(), ScriptError> {
            self.mark("teardown")
        }

        async fn validate(
            &self,
            _ctx: &ScriptContext,
            record: &UpgradeRecord,
            checks: &mut CheckSet,
        ) -> Result<(), ScriptError> {
            self.mark("validate")?;
            checks.expect_eq("baseline visible in validate", 1, record.baseline("spy.baseline")?);
            Ok(())
        }
    }

    fn env() -> RunEnv {
        RunEnv {
            deployer: Address::from_tag(1),
            addresses: NamedAddresses::new(),
            old_handles: HandleSet::new(),
            new_handles: HandleSet::new(),
        }
    }

    #[tokio::test]
    async fn phases_run_once_in_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let script = SpyScript::new(Arc::clone(&calls));

        let report = ProposalRunner::new(false)
            .run(&script, env(), &NoActions)
            .await
            .unwrap();

        assert_eq!(*calls.lock(), vec!["deploy", "setup", "teardown", "validate"]);
        assert!(report.is_clean());
        assert_eq!(report.passed, 1);
    }

    #[tokio::test]
    async fn setup_failure_stops_the_run_before_validate() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let script = SpyScript::failing_in(Arc::clone(&calls), "setup");

        let err = ProposalRunner::new(false)
            .run(&script, env(), &NoActions)
            .await
            .unwrap_err();

        assert!(matches!(err, HarnessError::SetupStaging(_)));
        assert_eq!(*calls.lock(), vec!["deploy", "setup"]);
    }

    #[tokio::test]
    async fn deploy_failure_is_fatal() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let script = SpyScript::failing_in(Arc::clone(&calls), "deploy");

        let err = ProposalRunner::new(false)
            .run(&script, env(), &NoActions)
            .await
            .unwrap_err();

        assert!(matches!(err, HarnessError::FatalDeployment(_)));
        assert_eq!(*calls.lock(), vec!["deploy"]);
    }

    #[tokio::test]
    async fn failed_checks_surface_as_a_validation_error() {
        struct FailingChecks;

        #[async_trait::async_trait]
        impl UpgradeScript for FailingChecks {
            fn proposal_id(&self) -> &str {
                "TC-BAD"
            }

            async fn deploy(
                &self,
                _deployer: Address,
                _ctx: &ScriptContext,
            ) -> Result<HandleSet, ScriptError> {
                Ok(HandleSet::new())
            }

            async fn setup(
                &self,
                _ctx: &ScriptContext,
                _record: &mut UpgradeRecord,
            ) -> Result<(), ScriptError> {
                Ok(())
            }

            async fn teardown(&self, _ctx: &ScriptContext) -> Result<(), ScriptError> {
                Ok(())
            }

            async fn validate(
                &self,
                _ctx: &ScriptContext,
                _record: &UpgradeRecord,
                checks: &mut CheckSet,
            ) -> Result<(), ScriptError> {
                checks.expect_eq("first", 1, 2);
                checks.expect_eq("second", 3, 4);
                Ok(())
            }
        }

        let err = ProposalRunner::new(false)
            .run(&FailingChecks, env(), &NoActions)
            .await
            .unwrap_err();

        match err {
            HarnessError::Validation(report) => {
                assert_eq!(report.failures.len(), 2, "all failures reported");
            }
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn logging_flag_does_not_change_outcomes() {
        for logging in [false, true] {
            let calls = Arc::new(Mutex::new(Vec::new()));
            let script = SpyScript::new(Arc::clone(&calls));
            let report = ProposalRunner::new(logging)
                .run(&script, env(), &NoActions)
                .await
                .unwrap();
            assert!(report.is_clean());
            assert_eq!(report.passed, 1);
        }
    }

    #[test]
    fn transitions_are_strictly_sequential() {
        use Phase::*;
        validate_transition(Created, Deployed).unwrap();
        validate_transition(Deployed, SetUp).unwrap();
        validate_transition(SetUp, ProposalApplied).unwrap();
        validate_transition(ProposalApplied, TornDown).unwrap();
        validate_transition(TornDown, Validated).unwrap();

        assert!(validate_transition(Created, Validated).is_err());
        assert!(validate_transition(SetUp, Deployed).is_err());
        assert!(validate_transition(Validated, Created).is_err());
        assert!(next_phase(Validated).is_none());
    }
}
