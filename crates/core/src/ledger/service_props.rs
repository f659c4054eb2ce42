//! Property-based tests for mutation planning.
//!
//! - Balances stay non-negative across arbitrary operation sequences
//! - Rejected mutations leave every account untouched
//! - Transfers conserve the total balance
//! - Histories are append-only

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use clubdesk_shared::types::AccountId;

use super::entry::LedgerEntry;
use super::service::LedgerService;
use super::types::AccountSnapshot;

/// In-memory stand-in for the store: snapshots plus per-account history.
#[derive(Debug, Clone)]
struct Bank {
    accounts: BTreeMap<AccountId, (AccountSnapshot, Vec<LedgerEntry>)>,
}

impl Bank {
    fn new(balances: &[Decimal]) -> (Self, Vec<AccountId>) {
        let mut accounts = BTreeMap::new();
        let mut ids = Vec::with_capacity(balances.len());
        for (i, balance) in balances.iter().enumerate() {
            let snapshot = AccountSnapshot {
                id: AccountId::new(),
                name: format!("account-{i}"),
                balance: *balance,
            };
            ids.push(snapshot.id);
            accounts.insert(snapshot.id, (snapshot, Vec::new()));
        }
        (Self { accounts }, ids)
    }

    fn snapshot(&self, id: AccountId) -> AccountSnapshot {
        self.accounts[&id].0.clone()
    }

    fn balance(&self, id: AccountId) -> Decimal {
        self.accounts[&id].0.balance
    }

    fn history(&self, id: AccountId) -> &[LedgerEntry] {
        &self.accounts[&id].1
    }

    /// Applies a committed plan the way the repository would: balance
    /// write plus entry append, per change.
    fn apply(&mut self, plan: &super::types::MutationPlan) {
        for change in &plan.changes {
            let (snapshot, history) = self
                .accounts
                .get_mut(&change.account_id)
                .expect("plan references a known account");
            snapshot.balance = change.new_balance;
            history.push(change.entry.clone());
        }
    }

    fn total_balance(&self) -> Decimal {
        self.accounts.values().map(|(s, _)| s.balance).sum()
    }
}

/// One randomly-generated operation over a fixed set of accounts.
#[derive(Debug, Clone)]
enum Op {
    Credit { target: usize, amount: Decimal },
    Debit { target: usize, amount: Decimal },
    Transfer { from: usize, to: usize, amount: Decimal },
}

/// Strategy for positive amounts (0.01 to 1,000.00).
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for initial balances (0.00 to 5,000.00).
fn balance_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..500_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn op_strategy(accounts: usize) -> impl Strategy<Value = Op> {
    let credit = (0..accounts, amount_strategy())
        .prop_map(|(target, amount)| Op::Credit { target, amount });
    let debit = (0..accounts, amount_strategy())
        .prop_map(|(target, amount)| Op::Debit { target, amount });
    let transfer = (0..accounts, 0..accounts, amount_strategy())
        .prop_map(|(from, to, amount)| Op::Transfer { from, to, amount });

    prop_oneof![credit, debit, transfer]
}

fn ops_strategy(accounts: usize, max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(accounts), 1..=max_len)
}

/// Runs one operation against the bank, applying the plan only when
/// planning succeeds (the repository commits all-or-nothing).
fn run_op(bank: &mut Bank, ids: &[AccountId], op: &Op) -> bool {
    let now = Utc::now();
    let plan = match op {
        Op::Credit { target, amount } => {
            LedgerService::plan_credit(&bank.snapshot(ids[*target]), *amount, String::new(), now)
        }
        Op::Debit { target, amount } => {
            LedgerService::plan_debit(&bank.snapshot(ids[*target]), *amount, String::new(), now)
        }
        Op::Transfer { from, to, amount } => LedgerService::plan_transfer(
            &bank.snapshot(ids[*from]),
            &bank.snapshot(ids[*to]),
            *amount,
            "",
            now,
        ),
    };

    match plan {
        Ok(plan) => {
            bank.apply(&plan);
            true
        }
        Err(_) => false,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// For any operation sequence starting from non-negative balances,
    /// every account balance stays non-negative after every committed
    /// operation.
    #[test]
    fn prop_balances_never_negative(
        balances in prop::collection::vec(balance_strategy(), 3),
        ops in ops_strategy(3, 30),
    ) {
        let (mut bank, ids) = Bank::new(&balances);

        for op in &ops {
            run_op(&mut bank, &ids, op);
            for id in &ids {
                prop_assert!(
                    bank.balance(*id) >= Decimal::ZERO,
                    "balance went negative for {id}"
                );
            }
        }
    }

    /// A rejected operation leaves every balance and every history
    /// exactly as it was.
    #[test]
    fn prop_rejection_leaves_state_unchanged(
        balances in prop::collection::vec(balance_strategy(), 3),
        ops in ops_strategy(3, 30),
    ) {
        let (mut bank, ids) = Bank::new(&balances);

        for op in &ops {
            let before = bank.clone();
            let committed = run_op(&mut bank, &ids, op);

            if !committed {
                for id in &ids {
                    prop_assert_eq!(bank.balance(*id), before.balance(*id));
                    prop_assert_eq!(
                        bank.history(*id).len(),
                        before.history(*id).len()
                    );
                }
            }
        }
    }

    /// A transfer moves value without creating or destroying it: the sum
    /// of all balances is invariant under transfers.
    #[test]
    fn prop_transfer_conserves_total(
        balances in prop::collection::vec(balance_strategy(), 3),
        transfers in prop::collection::vec(
            (0usize..3, 0usize..3, amount_strategy()),
            1..20,
        ),
    ) {
        let (mut bank, ids) = Bank::new(&balances);
        let total = bank.total_balance();

        for (from, to, amount) in transfers {
            run_op(&mut bank, &ids, &Op::Transfer { from, to, amount });
            prop_assert_eq!(bank.total_balance(), total);
        }
    }

    /// A committed transfer appends exactly one entry per side, with
    /// equal amounts and a shared correlation token.
    #[test]
    fn prop_transfer_entries_correlate(
        from_balance in balance_strategy(),
        to_balance in balance_strategy(),
        amount in amount_strategy(),
    ) {
        let (mut bank, ids) = Bank::new(&[from_balance, to_balance]);
        let committed = run_op(&mut bank, &ids, &Op::Transfer { from: 0, to: 1, amount });

        prop_assume!(committed);

        let from_history = bank.history(ids[0]);
        let to_history = bank.history(ids[1]);
        prop_assert_eq!(from_history.len(), 1);
        prop_assert_eq!(to_history.len(), 1);

        let debit = &from_history[0];
        let credit = &to_history[0];
        prop_assert_eq!(debit.amount, credit.amount);
        prop_assert_eq!(debit.transfer_to_account, Some(ids[1]));
        prop_assert_eq!(credit.transfer_from_account, Some(ids[0]));

        let token = debit.id.strip_suffix("-from").expect("source entry id ends in -from");
        prop_assert_eq!(credit.id.strip_suffix("-to"), Some(token));
    }

    /// After any operation, each prior history is a strict prefix of the
    /// new one: nothing is removed or edited.
    #[test]
    fn prop_history_is_append_only(
        balances in prop::collection::vec(balance_strategy(), 3),
        ops in ops_strategy(3, 30),
    ) {
        let (mut bank, ids) = Bank::new(&balances);

        for op in &ops {
            let before = bank.clone();
            run_op(&mut bank, &ids, op);

            for id in &ids {
                let old = before.history(*id);
                let new = bank.history(*id);
                prop_assert!(new.len() >= old.len());
                for (a, b) in old.iter().zip(new.iter()) {
                    prop_assert_eq!(&a.id, &b.id);
                    prop_assert_eq!(a.amount, b.amount);
                    prop_assert_eq!(a.entry_type, b.entry_type);
                }
            }
        }
    }
}
