//! Internal balances that net wagers against the external token ledger.

use crate::error::GameError;
use ledger_core::{Address, TokenLedger};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Per-account internal credit, backed by tokens held in custody
pub struct EscrowLedger {
    balances: HashMap<Address, u64>,
    token: Arc<dyn TokenLedger>,
}

impl EscrowLedger {
    pub fn new(token: Arc<dyn TokenLedger>) -> Self {
        Self {
            balances: HashMap::new(),
            token,
        }
    }

    /// Account on the token ledger that holds escrowed tokens
    pub fn custody(&self) -> Address {
        self.token.owner()
    }

    /// Available internal credit for an account
    pub fn balance_of(&self, account: &Address) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// All accounts with non-zero credit
    pub fn balances(&self) -> impl Iterator<Item = (&Address, &u64)> {
        self.balances.iter().filter(|(_, amount)| **amount > 0)
    }

    /// Cover a wager from internal credit first, pulling any shortfall
    /// from the caller's tokens
    ///
    /// On a failed pull the caller's credit is left as it was.
    pub(crate) fn debit_for_wager(&mut self, caller: &Address, amount: u64) -> Result<(), GameError> {
        if amount == 0 {
            return Ok(());
        }

        let available = self.balance_of(caller);
        if available >= amount {
            debug!(%caller, amount, available, "wager covered from internal balance");
            self.balances.insert(*caller, available - amount);
            return Ok(());
        }

        let shortfall = amount - available;
        let custody = self.custody();
        debug!(%caller, amount, available, shortfall, "pulling wager shortfall");
        self.token
            .transfer_from(caller, &custody, shortfall)
            .map_err(|e| {
                warn!(%caller, shortfall, error = %e, "wager transfer failed");
                GameError::TransferFailed(e)
            })?;

        self.balances.remove(caller);
        Ok(())
    }

    pub(crate) fn credit(&mut self, account: &Address, amount: u64) {
        if amount == 0 {
            return;
        }
        // Credits never exceed the tokens in custody, which fit in a u64
        *self.balances.entry(*account).or_insert(0) += amount;
    }

    /// Pay out the caller's whole balance
    ///
    /// The balance is zeroed before the transfer is attempted and stays
    /// zero if the transfer fails.
    pub fn withdraw(&mut self, caller: &Address) -> Result<u64, GameError> {
        let amount = self.balance_of(caller);
        if amount == 0 {
            return Err(GameError::ZeroBalance);
        }

        self.balances.remove(caller);
        if let Err(e) = self.token.transfer(caller, amount) {
            warn!(%caller, amount, error = %e, "withdrawal transfer failed; balance forfeited");
            return Err(GameError::TransferFailed(e));
        }

        debug!(%caller, amount, "withdrawal sent");
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_core::{LedgerCall, LedgerError, MockTokenLedger};

    fn setup() -> (EscrowLedger, MockTokenLedger, Address) {
        let custody = Address::from_low_u8(0xEE);
        let alice = Address::from_low_u8(1);
        let token = MockTokenLedger::new(custody);
        token.mint(alice, 100);
        (EscrowLedger::new(Arc::new(token.clone())), token, alice)
    }

    #[test]
    fn test_zero_debit_is_noop() {
        let (mut escrow, token, alice) = setup();

        escrow.debit_for_wager(&alice, 0).unwrap();

        assert!(token.calls().is_empty());
    }

    #[test]
    fn test_debit_from_internal_balance() {
        let (mut escrow, token, alice) = setup();
        escrow.credit(&alice, 5);

        escrow.debit_for_wager(&alice, 3).unwrap();

        assert_eq!(escrow.balance_of(&alice), 2);
        assert!(token.calls().is_empty());
    }

    #[test]
    fn test_debit_pulls_only_shortfall() {
        let (mut escrow, token, alice) = setup();
        escrow.credit(&alice, 4);

        escrow.debit_for_wager(&alice, 10).unwrap();

        assert_eq!(escrow.balance_of(&alice), 0);
        assert_eq!(
            token.calls(),
            vec![LedgerCall::TransferFrom {
                from: alice,
                to: escrow.custody(),
                amount: 6
            }]
        );
        assert_eq!(token.tokens_of(&alice), 94);
    }

    #[test]
    fn test_failed_pull_keeps_balance() {
        let (mut escrow, token, alice) = setup();
        escrow.credit(&alice, 4);
        token.fail_next(1);

        let result = escrow.debit_for_wager(&alice, 10);

        assert!(matches!(
            result,
            Err(GameError::TransferFailed(LedgerError::Rejected(_)))
        ));
        assert_eq!(escrow.balance_of(&alice), 4);
        assert_eq!(token.tokens_of(&alice), 100);
    }

    #[test]
    fn test_insufficient_tokens_is_transfer_failure() {
        let (mut escrow, _token, alice) = setup();

        let result = escrow.debit_for_wager(&alice, 1_000);

        assert!(matches!(
            result,
            Err(GameError::TransferFailed(LedgerError::InsufficientFunds { .. }))
        ));
    }

    #[test]
    fn test_withdraw_pays_out_and_zeroes() {
        let (mut escrow, token, alice) = setup();
        escrow.debit_for_wager(&alice, 10).unwrap();
        escrow.credit(&alice, 10);

        assert_eq!(escrow.withdraw(&alice).unwrap(), 10);

        assert_eq!(escrow.balance_of(&alice), 0);
        assert_eq!(token.tokens_of(&alice), 100);
        assert_eq!(token.tokens_of(&escrow.custody()), 0);
    }

    #[test]
    fn test_withdraw_zero_balance() {
        let (mut escrow, token, alice) = setup();

        assert_eq!(escrow.withdraw(&alice), Err(GameError::ZeroBalance));
        assert!(token.calls().is_empty());
    }

    #[test]
    fn test_failed_withdraw_forfeits_balance() {
        let (mut escrow, token, alice) = setup();
        escrow.debit_for_wager(&alice, 10).unwrap();
        escrow.credit(&alice, 10);
        token.set_failing(true);

        let result = escrow.withdraw(&alice);

        assert!(matches!(result, Err(GameError::TransferFailed(_))));
        assert_eq!(escrow.balance_of(&alice), 0);
        assert_eq!(token.tokens_of(&escrow.custody()), 10);
    }

    /// Ledger that only knows how to move tokens and counts the moves
    struct TransferOnlyLedger {
        owner: Address,
        moved: std::sync::Mutex<Vec<(Address, Address, u64)>>,
    }

    impl TokenLedger for TransferOnlyLedger {
        fn owner(&self) -> Address {
            self.owner
        }

        fn transfer_from(&self, from: &Address, to: &Address, amount: u64) -> Result<(), LedgerError> {
            self.moved.lock().unwrap().push((*from, *to, amount));
            Ok(())
        }

        fn transfer(&self, to: &Address, amount: u64) -> Result<(), LedgerError> {
            self.moved.lock().unwrap().push((self.owner, *to, amount));
            Ok(())
        }
    }

    #[test]
    fn test_escrow_needs_only_transfers() {
        let custody = Address::from_low_u8(0xEE);
        let alice = Address::from_low_u8(1);
        let token = Arc::new(TransferOnlyLedger {
            owner: custody,
            moved: std::sync::Mutex::new(Vec::new()),
        });
        let mut escrow = EscrowLedger::new(token.clone());

        escrow.debit_for_wager(&alice, 7).unwrap();
        escrow.credit(&alice, 14);
        assert_eq!(escrow.withdraw(&alice).unwrap(), 14);

        assert_eq!(
            *token.moved.lock().unwrap(),
            vec![(alice, custody, 7), (custody, alice, 14)]
        );
    }

    #[test]
    fn test_balances_skips_empty_accounts() {
        let (mut escrow, _token, alice) = setup();
        let bob = Address::from_low_u8(2);
        escrow.credit(&alice, 3);
        escrow.credit(&bob, 0);

        let listed: Vec<_> = escrow.balances().collect();
        assert_eq!(listed, vec![(&alice, &3)]);
    }
}
