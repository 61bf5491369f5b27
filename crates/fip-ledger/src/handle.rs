//! Live contract handles.
//!
//! A [`ContractHandle`] binds a symbolic contract name to its address and a
//! shared ledger backend, giving scripts the query surface they use inside
//! `setup`/`validate`. Handles are grouped into [`HandleSet`]s; during a run
//! the harness holds two sets addressable by the same symbolic names, one
//! for the pre-upgrade contracts and one for the post-upgrade contracts.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::address::{Address, Amount};
use crate::error::LedgerError;
use crate::ledger::Ledger;
use crate::registry::NamedAddresses;

/// One contract bound to a ledger backend.
#[derive(Clone)]
pub struct ContractHandle {
    name: String,
    address: Address,
    ledger: Arc<dyn Ledger>,
}

impl ContractHandle {
    /// Bind `name`/`address` to a backend.
    #[must_use]
    pub fn new(name: impl Into<String>, address: Address, ledger: Arc<dyn Ledger>) -> Self {
        Self {
            name: name.into(),
            address,
            ledger,
        }
    }

    /// Symbolic name of the contract.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// On-ledger address of the contract.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Total supply, treating this contract as a token.
    pub async fn total_supply(&self) -> Result<Amount, LedgerError> {
        self.ledger.total_supply(self.address).await
    }

    /// Balance of `holder` in this token.
    pub async fn balance_of(&self, holder: Address) -> Result<Amount, LedgerError> {
        self.ledger.balance_of(self.address, holder).await
    }

    /// Allowance from `owner` to `spender` in this token.
    pub async fn allowance(&self, owner: Address, spender: Address) -> Result<Amount, LedgerError> {
        self.ledger.allowance(self.address, owner, spender).await
    }

    /// Whether `account` holds `role` (role registries live on the core
    /// contract in the original protocol).
    pub async fn has_role(&self, role: &str, account: Address) -> Result<bool, LedgerError> {
        self.ledger.has_role(role, account).await
    }

    /// Every account holding `role`, in grant order.
    pub async fn role_members(&self, role: &str) -> Result<Vec<Address>, LedgerError> {
        self.ledger.role_members(role).await
    }
}

impl fmt::Debug for ContractHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractHandle")
            .field("name", &self.name)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Symbolic contract name → live handle.
#[derive(Debug, Clone, Default)]
pub struct HandleSet {
    handles: IndexMap<String, ContractHandle>,
}

impl HandleSet {
    /// Empty set. `deploy` returns this when a proposal creates nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the given symbolic names against `registry`, producing a handle
    /// per name on the shared `ledger` backend.
    ///
    /// # Errors
    /// `LedgerError::UnknownName` when a name is not in the registry.
    pub fn resolve(
        names: &[&str],
        registry: &NamedAddresses,
        ledger: &Arc<dyn Ledger>,
    ) -> Result<Self, LedgerError> {
        let mut set = Self::new();
        for name in names {
            let address = registry.get(name)?;
            set.insert(ContractHandle::new(*name, address, Arc::clone(ledger)));
        }
        Ok(set)
    }

    /// Add a handle under its own name.
    pub fn insert(&mut self, handle: ContractHandle) {
        self.handles.insert(handle.name().to_string(), handle);
    }

    /// Look up a handle by symbolic name.
    ///
    /// # Errors
    /// `LedgerError::UnknownContract` when the name is absent.
    pub fn get(&self, name: &str) -> Result<&ContractHandle, LedgerError> {
        self.handles
            .get(name)
            .ok_or_else(|| LedgerError::UnknownContract(name.to_string()))
    }

    /// Merge another set into this one, newer handles winning on name
    /// collisions. Used by the runner to fold freshly deployed contracts
    /// into the post-upgrade set.
    pub fn merge(&mut self, other: HandleSet) {
        for (name, handle) in other.handles {
            self.handles.insert(name, handle);
        }
    }

    /// Number of handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether the set holds no handles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Handle names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handles.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryLedger;

    fn backend() -> Arc<dyn Ledger> {
        Arc::new(MemoryLedger::new())
    }

    #[test]
    fn resolve_binds_each_name() {
        let mut registry = NamedAddresses::new();
        registry.insert("fei", Address::from_tag(1));
        registry.insert("tribe", Address::from_tag(2));

        let set = HandleSet::resolve(&["fei", "tribe"], &registry, &backend()).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("fei").unwrap().address(), Address::from_tag(1));
    }

    #[test]
    fn resolve_fails_on_unregistered_name() {
        let registry = NamedAddresses::new();
        let err = HandleSet::resolve(&["fei"], &registry, &backend()).unwrap_err();
        assert!(matches!(err, LedgerError::UnknownName(_)));
    }

    #[test]
    fn merge_prefers_incoming_handles() {
        let ledger = backend();
        let mut base = HandleSet::new();
        base.insert(ContractHandle::new("fei", Address::from_tag(1), Arc::clone(&ledger)));

        let mut incoming = HandleSet::new();
        incoming.insert(ContractHandle::new("fei", Address::from_tag(9), Arc::clone(&ledger)));

        base.merge(incoming);
        assert_eq!(base.get("fei").unwrap().address(), Address::from_tag(9));
    }

    #[test]
    fn get_unknown_contract_errors() {
        let set = HandleSet::new();
        assert!(matches!(
            set.get("fei").unwrap_err(),
            LedgerError::UnknownContract(_)
        ));
    }
}
