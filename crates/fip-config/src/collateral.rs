//! Collateral-tracking table.
//!
//! Keys are token symbols; values are the deposits whose holdings of that
//! token must be counted when computing aggregate collateralization.

use crate::table::{MembershipTable, TableKind};

/// The declared asset → depositor table.
#[must_use]
pub fn tracked_assets() -> MembershipTable {
    let mut table = MembershipTable::new(TableKind::CollateralTracking);

    let mut declare = |key: &str, members: &[&str]| {
        table
            .declare(key, members.iter().copied())
            .unwrap_or_else(|e| panic!("invalid collateral-tracking table: {e}"));
    };

    declare(
        "bal",
        &["balancerDepositBalWeth", "balancerLensVeBalBal", "balancerGaugeStaker"],
    );
    declare("fei", &["rariTimelockFeiOldLens"]);
    declare("dai", &["simpleFeiDaiPSM", "ethToDaiLensDai", "daiHoldingPCVDeposit"]);
    declare("lusd", &["lusdHoldingPCVDeposit"]);
    declare(
        "weth",
        &[
            "ethLidoPCVDeposit",
            "balancerLensVeBalWeth",
            "ethToDaiLensEth",
            "wethHoldingPCVDeposit",
        ],
    );

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declares_every_tracked_asset() {
        let table = tracked_assets();
        let keys: Vec<_> = table.keys().collect();
        assert_eq!(keys, vec!["bal", "fei", "dai", "lusd", "weth"]);
        assert_eq!(table.kind(), TableKind::CollateralTracking);
    }

    #[test]
    fn weth_depositors_in_order() {
        let table = tracked_assets();
        let deposits: Vec<_> = table.lookup("weth").unwrap().iter().collect();
        assert_eq!(
            deposits,
            vec![
                "ethLidoPCVDeposit",
                "balancerLensVeBalWeth",
                "ethToDaiLensEth",
                "wethHoldingPCVDeposit"
            ]
        );
    }
}
