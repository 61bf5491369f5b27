//! The ledger-environment trait.
//!
//! The harness treats the underlying contract platform as a black box: a
//! `Ledger` answers balance, supply, allowance, and role-membership queries
//! and accepts the mutating calls that `deploy`/`setup`/`teardown` (and the
//! externally applied proposal actions) perform. Implementations may be a
//! live node or the in-memory simulator in [`crate::memory`].
//!
//! # Discipline
//!
//! There is exactly one logical writer at any time: `validate` must only
//! call the read-side methods. This is a protocol convention, not a
//! mechanical guarantee; the simulator exposes a mutation counter so tests
//! can verify it.

use crate::address::{Address, Amount};
use crate::error::LedgerError;

/// A black-boxed ledger environment.
#[async_trait::async_trait]
pub trait Ledger: Send + Sync {
    /// Total supply of a token contract.
    async fn total_supply(&self, token: Address) -> Result<Amount, LedgerError>;

    /// Balance of `holder` in `token`.
    async fn balance_of(&self, token: Address, holder: Address) -> Result<Amount, LedgerError>;

    /// Remaining allowance from `owner` to `spender` in `token`.
    async fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<Amount, LedgerError>;

    /// Whether `account` holds `role`.
    async fn has_role(&self, role: &str, account: Address) -> Result<bool, LedgerError>;

    /// Every account holding `role`, in grant order.
    async fn role_members(&self, role: &str) -> Result<Vec<Address>, LedgerError>;

    /// Create a new contract and return its address.
    async fn deploy_contract(&self, name: &str) -> Result<Address, LedgerError>;

    /// Mint `amount` of `token` to `to`.
    async fn mint(&self, token: Address, to: Address, amount: Amount) -> Result<(), LedgerError>;

    /// Burn `amount` of `token` held by `from`, reducing total supply.
    async fn burn(&self, token: Address, from: Address, amount: Amount)
        -> Result<(), LedgerError>;

    /// Move `amount` of `token` from `from` to `to`.
    async fn transfer(
        &self,
        token: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Set the allowance from `owner` to `spender` in `token`.
    async fn approve(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Grant `role` to `account`.
    async fn grant_role(&self, role: &str, account: Address) -> Result<(), LedgerError>;

    /// Revoke `role` from `account`.
    async fn revoke_role(&self, role: &str, account: Address) -> Result<(), LedgerError>;

    /// Begin acting as `account` for staging purposes.
    async fn impersonate(&self, account: Address) -> Result<(), LedgerError>;

    /// Stop acting as `account`. Safe to call when no impersonation is
    /// active for it.
    async fn stop_impersonating(&self, account: Address) -> Result<(), LedgerError>;
}
