//! TIP-122: Tribal Council consolidation.
//!
//! 1. End vesting of the Rari Infrastructure team timelocks
//! 2. Burn all FEI held by the Tribal Council
//! 3. Send INDEX to the Tribal Council safe
//! 4. Send all remaining assets to the DAO timelock

use fip_harness::{CheckSet, ScriptContext, ScriptError, UpgradeRecord, UpgradeScript};
use fip_ledger::{Address, Amount, HandleSet};

/// Existing balance of FEI on the Tribal Council to burn.
pub const TC_FEI_TO_BURN: Amount = 42_905_768_215_167_745_773_610_059;

/// Clawed-back FEI upper bound. The exact clawed-back amount is not known
/// at authoring time, so validation treats this as a cap.
pub const CLAWED_BACK_FEI_UPPER_BOUND: Amount = 2_897_332_829_955_035_696_312_531;

/// Clawed-back TRIBE upper bound.
pub const CLAWED_BACK_TRIBE_UPPER_BOUND: Amount = 3_068_505_367_127_310_595_321_005;

/// Record key for the pre-proposal FEI total supply.
const FEI_SUPPLY_BASELINE: &str = "fei.totalSupply";

/// The TIP-122 upgrade script.
#[derive(Debug, Clone, Copy, Default)]
pub struct TribalCouncilConsolidation;

#[async_trait::async_trait]
impl UpgradeScript for TribalCouncilConsolidation {
    fn proposal_id(&self) -> &str {
        "TC-122"
    }

    async fn deploy(
        &self,
        _deployer: Address,
        ctx: &ScriptContext,
    ) -> Result<HandleSet, ScriptError> {
        if ctx.logging {
            tracing::info!(proposal = self.proposal_id(), "no deploy actions");
        }
        Ok(HandleSet::new())
    }

    async fn setup(
        &self,
        ctx: &ScriptContext,
        record: &mut UpgradeRecord,
    ) -> Result<(), ScriptError> {
        // The absolute FEI supply drifts between authoring and execution;
        // snapshot it now and validate the burn as a delta.
        let fei = ctx.new_handles.get("fei")?;
        record.record_amount(FEI_SUPPLY_BASELINE, fei.total_supply().await?);
        Ok(())
    }

    async fn teardown(&self, ctx: &ScriptContext) -> Result<(), ScriptError> {
        if ctx.logging {
            tracing::info!(proposal = self.proposal_id(), "no teardown actions");
        }
        Ok(())
    }

    async fn validate(
        &self,
        ctx: &ScriptContext,
        record: &UpgradeRecord,
        checks: &mut CheckSet,
    ) -> Result<(), ScriptError> {
        let fei = ctx.new_handles.get("fei")?;
        let tribe = ctx.new_handles.get("tribe")?;

        // 1. Rari Infra timelocks no longer hold funds
        let rari_fei_timelock = ctx.addresses.get("newRariInfraFeiTimelock")?;
        let rari_tribe_timelock = ctx.addresses.get("newRariInfraTribeTimelock")?;
        checks.expect_eq(
            "newRariInfraFeiTimelock FEI balance",
            0,
            fei.balance_of(rari_fei_timelock).await?,
        );
        checks.expect_eq(
            "newRariInfraTribeTimelock TRIBE balance",
            0,
            tribe.balance_of(rari_tribe_timelock).await?,
        );

        // 2. Tribal Council burned its existing FEI. Later checks do not
        // depend on the delta, but a supply that grew means the measurement
        // itself is meaningless, so bail rather than report a bogus number.
        let baseline = record.baseline(FEI_SUPPLY_BASELINE)?;
        let current = fei.total_supply().await?;
        let burned = baseline.checked_sub(current).ok_or_else(|| {
            ScriptError::Failed(format!("FEI supply grew from {baseline} to {current}"))
        })?;
        checks.expect_eq("FEI supply burn delta", TC_FEI_TO_BURN, burned);

        // 3. Clawed-back FEI and TRIBE approved to the DAO timelock
        let council = ctx.addresses.get("tribalCouncilTimelock")?;
        let dao = ctx.addresses.get("feiDAOTimelock")?;
        checks.expect_at_most(
            "clawed-back FEI allowance to DAO timelock",
            CLAWED_BACK_FEI_UPPER_BOUND,
            fei.allowance(council, dao).await?,
        );
        checks.expect_at_most(
            "clawed-back TRIBE allowance to DAO timelock",
            CLAWED_BACK_TRIBE_UPPER_BOUND,
            tribe.allowance(council, dao).await?,
        );

        Ok(())
    }
}
