//! Mock token ledger for testing.

use super::traits::{LedgerError, TokenLedger};
use crate::account::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A call made against the mock ledger, recorded whether or not it succeeded
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerCall {
    TransferFrom {
        from: Address,
        to: Address,
        amount: u64,
    },
    Transfer {
        to: Address,
        amount: u64,
    },
}

#[derive(Default)]
struct MockLedgerState {
    balances: HashMap<Address, u64>,
    calls: Vec<LedgerCall>,
    /// Number of upcoming transfer calls to reject
    fail_next: usize,
    /// Reject every transfer call while set
    fail_all: bool,
}

impl MockLedgerState {
    fn should_fail(&mut self) -> bool {
        if self.fail_all {
            return true;
        }
        if self.fail_next > 0 {
            self.fail_next -= 1;
            return true;
        }
        false
    }

    fn move_tokens(&mut self, from: &Address, to: &Address, amount: u64) -> Result<(), LedgerError> {
        let available = self.balances.get(from).copied().unwrap_or(0);
        if available < amount {
            return Err(LedgerError::InsufficientFunds {
                account: *from,
                available,
                requested: amount,
            });
        }
        self.balances.insert(*from, available - amount);
        *self.balances.entry(*to).or_insert(0) += amount;
        Ok(())
    }
}

/// In-memory token ledger for testing
///
/// Allowances are not modelled: `transfer_from` succeeds whenever the
/// source holds enough tokens and no failure has been injected.
#[derive(Clone)]
pub struct MockTokenLedger {
    owner: Address,
    state: Arc<Mutex<MockLedgerState>>,
}

impl MockTokenLedger {
    /// Create a new mock ledger acting as `owner`
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            state: Arc::new(Mutex::new(MockLedgerState::default())),
        }
    }

    /// Mint tokens to an account (test setup only)
    pub fn mint(&self, account: Address, amount: u64) {
        let mut state = self.state.lock().unwrap();
        *state.balances.entry(account).or_insert(0) += amount;
    }

    /// Current token balance of an account
    pub fn tokens_of(&self, account: &Address) -> u64 {
        self.state
            .lock()
            .unwrap()
            .balances
            .get(account)
            .copied()
            .unwrap_or(0)
    }

    /// Every transfer call made so far, in order
    pub fn calls(&self) -> Vec<LedgerCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Forget recorded calls
    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    /// Reject the next `n` transfer calls
    pub fn fail_next(&self, n: usize) {
        self.state.lock().unwrap().fail_next = n;
    }

    /// Reject every transfer call until switched off
    pub fn set_failing(&self, failing: bool) {
        self.state.lock().unwrap().fail_all = failing;
    }
}

impl TokenLedger for MockTokenLedger {
    fn owner(&self) -> Address {
        self.owner
    }

    fn transfer_from(&self, from: &Address, to: &Address, amount: u64) -> Result<(), LedgerError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(LedgerCall::TransferFrom {
            from: *from,
            to: *to,
            amount,
        });

        if state.should_fail() {
            tracing::debug!(%from, amount, "mock ledger rejecting transfer_from");
            return Err(LedgerError::Rejected("injected failure".to_string()));
        }

        state.move_tokens(from, to, amount)
    }

    fn transfer(&self, to: &Address, amount: u64) -> Result<(), LedgerError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(LedgerCall::Transfer { to: *to, amount });

        if state.should_fail() {
            tracing::debug!(%to, amount, "mock ledger rejecting transfer");
            return Err(LedgerError::Rejected("injected failure".to_string()));
        }

        let owner = self.owner;
        state.move_tokens(&owner, to, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (MockTokenLedger, Address, Address) {
        let custody = Address::from_low_u8(0xEE);
        let alice = Address::from_low_u8(1);
        let ledger = MockTokenLedger::new(custody);
        ledger.mint(alice, 1_000);
        (ledger, custody, alice)
    }

    #[test]
    fn test_transfer_from_moves_tokens() {
        let (ledger, custody, alice) = setup();

        ledger.transfer_from(&alice, &custody, 400).unwrap();

        assert_eq!(ledger.tokens_of(&alice), 600);
        assert_eq!(ledger.tokens_of(&custody), 400);
        assert_eq!(
            ledger.calls(),
            vec![LedgerCall::TransferFrom {
                from: alice,
                to: custody,
                amount: 400
            }]
        );
    }

    #[test]
    fn test_transfer_pays_out_of_owner() {
        let (ledger, custody, alice) = setup();
        ledger.mint(custody, 50);

        ledger.transfer(&alice, 50).unwrap();

        assert_eq!(ledger.tokens_of(&custody), 0);
        assert_eq!(ledger.tokens_of(&alice), 1_050);
    }

    #[test]
    fn test_insufficient_funds() {
        let (ledger, custody, alice) = setup();

        let result = ledger.transfer_from(&alice, &custody, 5_000);
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientFunds {
                available: 1_000,
                requested: 5_000,
                ..
            })
        ));
        assert_eq!(ledger.tokens_of(&alice), 1_000);
    }

    #[test]
    fn test_fail_next_rejects_then_recovers() {
        let (ledger, custody, alice) = setup();
        ledger.fail_next(1);

        assert!(matches!(
            ledger.transfer_from(&alice, &custody, 10),
            Err(LedgerError::Rejected(_))
        ));
        assert_eq!(ledger.tokens_of(&alice), 1_000);

        ledger.transfer_from(&alice, &custody, 10).unwrap();
        assert_eq!(ledger.tokens_of(&alice), 990);
        // Both attempts are recorded
        assert_eq!(ledger.calls().len(), 2);
    }

    #[test]
    fn test_set_failing() {
        let (ledger, custody, alice) = setup();
        ledger.mint(custody, 100);
        ledger.set_failing(true);

        assert!(ledger.transfer(&alice, 10).is_err());
        assert!(ledger.transfer(&alice, 10).is_err());

        ledger.set_failing(false);
        assert!(ledger.transfer(&alice, 10).is_ok());
    }

    #[test]
    fn test_clones_share_state() {
        let (ledger, custody, alice) = setup();
        let other = ledger.clone();

        other.transfer_from(&alice, &custody, 1).unwrap();
        assert_eq!(ledger.tokens_of(&custody), 1);
    }
}
