//! Role assignment table.
//!
//! Lists every contract/account that should hold each protocol role after
//! upgrades land. Roles with an empty set exist but are deliberately
//! unassigned.

use crate::table::{MembershipTable, TableKind};

/// The declared role → holders table.
#[must_use]
pub fn role_assignments() -> MembershipTable {
    let mut table = MembershipTable::new(TableKind::Roles);

    // Building from literals; duplicate keys/members are authoring bugs.
    let mut declare = |key: &str, members: &[&str]| {
        table
            .declare(key, members.iter().copied())
            .unwrap_or_else(|e| panic!("invalid role assignment table: {e}"));
    };

    declare("MINTER_ROLE", &["simpleFeiDaiPSM"]);
    declare("GOVERN_ROLE", &["core", "feiDAOTimelock"]);
    declare(
        "PCV_CONTROLLER_ROLE",
        &["feiDAOTimelock", "ratioPCVControllerV2", "pcvGuardian"],
    );
    declare(
        "GUARDIAN_ROLE",
        &["guardianMultisig", "pcvGuardian", "pcvSentinel"],
    );
    declare("METAGOVERNANCE_VOTE_ADMIN", &["feiDAOTimelock"]);
    declare("METAGOVERNANCE_TOKEN_STAKING", &["feiDAOTimelock"]);
    declare("METAGOVERNANCE_GAUGE_ADMIN", &["feiDAOTimelock"]);
    declare("ROLE_ADMIN", &["feiDAOTimelock"]);
    declare("POD_VETO_ADMIN", &["nopeDAO"]);
    declare("PCV_MINOR_PARAM_ROLE", &["feiDAOTimelock"]);
    declare("TRIBE_MINTER_ROLE", &[]);
    declare("BURNER_ROLE", &[]);
    declare("ORACLE_ADMIN_ROLE", &[]);
    declare("SWAP_ADMIN_ROLE", &[]);
    declare("BALANCER_MANAGER_ADMIN_ROLE", &[]);
    declare("RATE_LIMITED_MINTER_ADMIN", &[]);
    declare("PARAMETER_ADMIN", &[]);
    declare("PSM_ADMIN_ROLE", &[]);
    declare("TRIBAL_CHIEF_ADMIN_ROLE", &[]);
    declare("FUSE_ADMIN", &[]);
    declare("VOTIUM_ADMIN_ROLE", &[]);
    declare("PCV_GUARDIAN_ADMIN_ROLE", &[]);
    declare("PCV_SAFE_MOVER_ROLE", &[]);
    declare("POD_METADATA_REGISTER_ROLE", &[]);
    declare("FEI_MINT_ADMIN", &[]);
    declare("POD_ADMIN", &[]);
    declare("TOKEMAK_DEPOSIT_ADMIN_ROLE", &[]);

    table
}
