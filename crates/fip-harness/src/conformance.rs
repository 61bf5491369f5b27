//! Declared-vs-observed configuration conformance.
//!
//! The tables in `fip-config` declare the target state; these helpers turn
//! each declared entry into checks against the live ledger, so the harness
//! can verify that actual role membership equals the declared table after
//! a proposal lands.

use fip_ledger::{ContractHandle, NamedAddresses};

use crate::checks::CheckSet;
use crate::error::ScriptError;
use fip_config::MembershipTable;

/// Check every declared role holder against the role registry on `core`.
///
/// Two checks per role: each declared holder actually holds the role, and
/// the on-ledger member count matches the declared set, so undeclared
/// holders show up as a count mismatch.
///
/// # Errors
/// Ledger failures and unresolvable names abort the walk; individual
/// mismatches are accumulated into `checks` instead.
pub async fn verify_role_assignments(
    core: &ContractHandle,
    table: &MembershipTable,
    registry: &NamedAddresses,
    checks: &mut CheckSet,
) -> Result<(), ScriptError> {
    for (role, members) in table.iter() {
        for name in members {
            let address = registry.get(name)?;
            let held = core.has_role(role, address).await?;
            checks.expect_true(format!("role {role} held by {name}"), held);
        }
        let actual = core.role_members(role).await?;
        checks.expect_eq(format!("role {role} member count"), members.len(), actual.len());
    }
    Ok(())
}

/// Check that every depositor named by the collateral-tracking table
/// resolves in the registry. The oracle itself is outside the harness;
/// unresolvable names are what break collateral accounting downstream.
pub fn verify_tracked_assets(
    table: &MembershipTable,
    registry: &NamedAddresses,
    checks: &mut CheckSet,
) {
    for (asset, deposits) in table.iter() {
        for name in deposits {
            checks.expect_true(
                format!("tracked {asset} deposit {name} resolves"),
                registry.contains(name),
            );
        }
    }
}
