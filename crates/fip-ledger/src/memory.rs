//! In-memory simulated ledger.
//!
//! `MemoryLedger` is the simulation backend the harness runs proposals
//! against in tests and dry runs. State lives behind a `parking_lot` lock;
//! every mutating call bumps a counter so test suites can verify the
//! single-writer discipline (in particular that `validate` never mutates).

use indexmap::{IndexMap, IndexSet};
use parking_lot::RwLock;

use crate::address::{Address, Amount};
use crate::error::LedgerError;
use crate::ledger::Ledger;

#[derive(Debug, Default)]
struct TokenState {
    total_supply: Amount,
    balances: IndexMap<Address, Amount>,
    allowances: IndexMap<(Address, Address), Amount>,
}

#[derive(Debug, Default)]
struct LedgerState {
    tokens: IndexMap<Address, TokenState>,
    roles: IndexMap<String, IndexSet<Address>>,
    impersonating: IndexSet<Address>,
    next_contract_tag: u64,
    mutations: u64,
}

/// Simulated ledger environment.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    state: RwLock<LedgerState>,
}

impl MemoryLedger {
    /// Fresh, empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(LedgerState {
                // leave room below for fixture-assigned tags
                next_contract_tag: 0x1000,
                ..LedgerState::default()
            }),
        }
    }

    /// Register a token contract at `address` (idempotent).
    pub fn seed_token(&self, address: Address) {
        self.state.write().tokens.entry(address).or_default();
    }

    /// Set the recorded total supply of `token`.
    pub fn seed_total_supply(&self, token: Address, supply: Amount) {
        self.state.write().tokens.entry(token).or_default().total_supply = supply;
    }

    /// Set `holder`'s balance in `token`.
    pub fn seed_balance(&self, token: Address, holder: Address, amount: Amount) {
        self.state
            .write()
            .tokens
            .entry(token)
            .or_default()
            .balances
            .insert(holder, amount);
    }

    /// Grant `role` to `account` without counting it as a run mutation.
    pub fn seed_role(&self, role: &str, account: Address) {
        self.state
            .write()
            .roles
            .entry(role.to_string())
            .or_default()
            .insert(account);
    }

    /// Mutating calls issued since construction. Seeding does not count.
    #[must_use]
    pub fn mutation_count(&self) -> u64 {
        self.state.read().mutations
    }

    /// Whether impersonation is currently staged for `account`.
    #[must_use]
    pub fn is_impersonating(&self, account: Address) -> bool {
        self.state.read().impersonating.contains(&account)
    }

    fn with_token<R>(
        &self,
        token: Address,
        f: impl FnOnce(&TokenState) -> R,
    ) -> Result<R, LedgerError> {
        let state = self.state.read();
        state
            .tokens
            .get(&token)
            .map(f)
            .ok_or_else(|| LedgerError::UnknownToken(token.to_string()))
    }

    fn with_token_mut<R>(
        &self,
        token: Address,
        f: impl FnOnce(&mut TokenState) -> Result<R, LedgerError>,
    ) -> Result<R, LedgerError> {
        let mut state = self.state.write();
        state.mutations += 1;
        let token_state = state
            .tokens
            .get_mut(&token)
            .ok_or_else(|| LedgerError::UnknownToken(token.to_string()))?;
        f(token_state)
    }
}

fn debit(token: &mut TokenState, from: Address, amount: Amount) -> Result<(), LedgerError> {
    let held = token.balances.get(&from).copied().unwrap_or(0);
    if held < amount {
        return Err(LedgerError::InsufficientBalance {
            holder: from.to_string(),
            held,
            needed: amount,
        });
    }
    token.balances.insert(from, held - amount);
    Ok(())
}

fn credit(token: &mut TokenState, to: Address, amount: Amount) {
    let held = token.balances.get(&to).copied().unwrap_or(0);
    token.balances.insert(to, held + amount);
}

#[async_trait::async_trait]
impl Ledger for MemoryLedger {
    async fn total_supply(&self, token: Address) -> Result<Amount, LedgerError> {
        self.with_token(token, |t| t.total_supply)
    }

    async fn balance_of(&self, token: Address, holder: Address) -> Result<Amount, LedgerError> {
        self.with_token(token, |t| t.balances.get(&holder).copied().unwrap_or(0))
    }

    async fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<Amount, LedgerError> {
        self.with_token(token, |t| {
            t.allowances.get(&(owner, spender)).copied().unwrap_or(0)
        })
    }

    async fn has_role(&self, role: &str, account: Address) -> Result<bool, LedgerError> {
        Ok(self
            .state
            .read()
            .roles
            .get(role)
            .is_some_and(|members| members.contains(&account)))
    }

    async fn role_members(&self, role: &str) -> Result<Vec<Address>, LedgerError> {
        Ok(self
            .state
            .read()
            .roles
            .get(role)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default())
    }

    async fn deploy_contract(&self, name: &str) -> Result<Address, LedgerError> {
        let mut state = self.state.write();
        state.mutations += 1;
        let address = Address::from_tag(state.next_contract_tag);
        state.next_contract_tag += 1;
        state.tokens.entry(address).or_default();
        tracing::debug!(contract = name, %address, "deployed simulated contract");
        Ok(address)
    }

    async fn mint(&self, token: Address, to: Address, amount: Amount) -> Result<(), LedgerError> {
        self.with_token_mut(token, |t| {
            credit(t, to, amount);
            t.total_supply = t.total_supply.saturating_add(amount);
            Ok(())
        })
    }

    async fn burn(
        &self,
        token: Address,
        from: Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.with_token_mut(token, |t| {
            debit(t, from, amount)?;
            t.total_supply = t.total_supply.checked_sub(amount).ok_or_else(|| {
                LedgerError::Call(format!("burn of {amount} exceeds total supply"))
            })?;
            Ok(())
        })
    }

    async fn transfer(
        &self,
        token: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.with_token_mut(token, |t| {
            debit(t, from, amount)?;
            credit(t, to, amount);
            Ok(())
        })
    }

    async fn approve(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.with_token_mut(token, |t| {
            t.allowances.insert((owner, spender), amount);
            Ok(())
        })
    }

    async fn grant_role(&self, role: &str, account: Address) -> Result<(), LedgerError> {
        let mut state = self.state.write();
        state.mutations += 1;
        state.roles.entry(role.to_string()).or_default().insert(account);
        Ok(())
    }

    async fn revoke_role(&self, role: &str, account: Address) -> Result<(), LedgerError> {
        let mut state = self.state.write();
        state.mutations += 1;
        if let Some(members) = state.roles.get_mut(role) {
            members.shift_remove(&account);
        }
        Ok(())
    }

    async fn impersonate(&self, account: Address) -> Result<(), LedgerError> {
        let mut state = self.state.write();
        state.mutations += 1;
        state.impersonating.insert(account);
        Ok(())
    }

    async fn stop_impersonating(&self, account: Address) -> Result<(), LedgerError> {
        let mut state = self.state.write();
        state.mutations += 1;
        state.impersonating.shift_remove(&account);
        Ok(())
    }
}
