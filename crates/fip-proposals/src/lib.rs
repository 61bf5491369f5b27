//! Governance proposal upgrade scripts.
//!
//! One module per proposal; each implements
//! [`fip_harness::UpgradeScript`] and is driven by the harness's
//! `ProposalRunner`.

use std::sync::Arc;

use fip_harness::UpgradeScript;

pub mod tip_122;

pub use tip_122::TribalCouncilConsolidation;

/// Every shipped proposal script, in proposal order.
#[must_use]
pub fn proposals() -> Vec<Arc<dyn UpgradeScript>> {
    vec![Arc::new(TribalCouncilConsolidation)]
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proposal_ids_are_unique() {
        let scripts = proposals();
        let mut ids: Vec<_> = scripts.iter().map(|s| s.proposal_id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), scripts.len());
    }
}
