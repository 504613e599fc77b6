//! # Debt Optimizer
//!
//! Greedy minimum-cash-flow matching: turns balances into a short list of
//! peer-to-peer payments that settle everyone.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Partition                                                           │
//! │     creditors: balance >  tolerance      debtors: balance < -tolerance  │
//! │                                                                         │
//! │  2. Sort (stable; ties keep input order)                                │
//! │     creditors: largest first             debtors: most negative first   │
//! │                                                                         │
//! │  3. Sweep with two cursors                                              │
//! │     amount = min(creditor.remaining, |debtor.remaining|)                │
//! │     emit   debtor → creditor, round(amount)                             │
//! │     move both remainders toward zero, advance whichever hit zero        │
//! │                                                                         │
//! │  Every step settles at least one party, so the output has at most       │
//! │  |creditors| + |debtors| - 1 payments.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This is a heuristic. Finding the true minimum number of payments is
//! NP-hard (it reduces to partitioning balances into zero-sum subsets); the
//! greedy sweep is usually optimal or one payment off for event-sized groups.
//!
//! The sweep works on its own copies of the remaining amounts; the caller's
//! balances are only read.

use tracing::debug;

use crate::money::Money;
use crate::policy::SettlementPolicy;
use crate::types::{Balance, Member, Settlement};

/// A creditor or debtor during the sweep.
#[derive(Debug)]
struct Party<'a> {
    person: &'a Member,
    remaining: Money,
}

/// Builds settlements with the default [`SettlementPolicy`].
///
/// ## Example
/// ```rust
/// use settleup_core::{optimize_debts, Balance, Member, Money};
///
/// let balance = |name: &str, units: i64| Balance {
///     person: Member::from(name),
///     total_paid: Money::zero(),
///     total_owed: Money::zero(),
///     balance: Money::from_units(units),
/// };
///
/// let settlements = optimize_debts(&[
///     balance("A", 200_000),
///     balance("B", -100_000),
///     balance("C", -100_000),
/// ]);
///
/// assert_eq!(settlements.len(), 2);
/// assert_eq!(settlements[0].from.as_str(), "B");
/// assert_eq!(settlements[0].to.as_str(), "A");
/// assert_eq!(settlements[0].amount, Money::from_units(100_000));
/// ```
pub fn optimize_debts(balances: &[Balance]) -> Vec<Settlement> {
    optimize_debts_with(balances, &SettlementPolicy::default())
}

/// Builds settlements, treating any balance within `policy.tolerance` of
/// zero as settled.
///
/// Amounts are rounded to whole currency units only when a payment is
/// emitted; the remainders carry full precision. A transfer that rounds to
/// zero (a sub-unit leftover above the tolerance) still settles the working
/// copies but is not emitted, so every emitted amount is positive.
pub fn optimize_debts_with(balances: &[Balance], policy: &SettlementPolicy) -> Vec<Settlement> {
    let tolerance = policy.tolerance;

    let mut creditors: Vec<Party<'_>> = balances
        .iter()
        .filter(|b| b.balance > tolerance)
        .map(|b| Party {
            person: &b.person,
            remaining: b.balance,
        })
        .collect();
    let mut debtors: Vec<Party<'_>> = balances
        .iter()
        .filter(|b| b.balance < -tolerance)
        .map(|b| Party {
            person: &b.person,
            remaining: b.balance,
        })
        .collect();

    // sort_by is stable: equal balances keep their input order
    creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
    debtors.sort_by(|a, b| a.remaining.cmp(&b.remaining));

    debug!(
        creditors = creditors.len(),
        debtors = debtors.len(),
        tolerance = %tolerance,
        "Optimizing debts"
    );

    let mut settlements = Vec::with_capacity((creditors.len() + debtors.len()).saturating_sub(1));
    let mut ci = 0;
    let mut di = 0;

    while ci < creditors.len() && di < debtors.len() {
        let creditor = &mut creditors[ci];
        let debtor = &mut debtors[di];

        let amount = creditor.remaining.min(debtor.remaining.abs());
        if !amount.is_positive() {
            break;
        }

        let rounded = amount.round_to_unit();
        if rounded.is_positive() {
            settlements.push(Settlement {
                from: debtor.person.clone(),
                to: creditor.person.clone(),
                amount: rounded,
            });
        } else {
            debug!(
                from = %debtor.person,
                to = %creditor.person,
                amount = %amount,
                "Dropping sub-unit transfer"
            );
        }

        creditor.remaining -= amount;
        debtor.remaining += amount;

        if creditor.remaining.approx_zero(tolerance) {
            ci += 1;
        }
        if debtor.remaining.approx_zero(tolerance) {
            di += 1;
        }
    }

    debug!(settlements = settlements.len(), "Optimized debts");
    settlements
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn balance(name: &str, micros: i64) -> Balance {
        Balance {
            person: Member::new(name),
            total_paid: Money::zero(),
            total_owed: Money::zero(),
            balance: Money::from_micros(micros),
        }
    }

    fn units(name: &str, units: i64) -> Balance {
        balance(name, Money::from_units(units).micros())
    }

    fn pairs(settlements: &[Settlement]) -> Vec<(&str, &str, i64)> {
        settlements
            .iter()
            .map(|s| (s.from.as_str(), s.to.as_str(), s.amount.units()))
            .collect()
    }

    /// Outstanding balance per member after every settlement is paid.
    fn apply(balances: &[Balance], settlements: &[Settlement]) -> HashMap<Member, Money> {
        let mut outstanding: HashMap<Member, Money> = balances
            .iter()
            .map(|b| (b.person.clone(), b.balance))
            .collect();
        for s in settlements {
            *outstanding.entry(s.from.clone()).or_default() += s.amount;
            *outstanding.entry(s.to.clone()).or_default() -= s.amount;
        }
        outstanding
    }

    #[test]
    fn test_single_creditor_two_debtors() {
        let balances = vec![units("A", 200_000), units("B", -100_000), units("C", -100_000)];
        let settlements = optimize_debts(&balances);

        assert_eq!(
            pairs(&settlements),
            vec![("B", "A", 100_000), ("C", "A", 100_000)]
        );
        let received: Money = settlements.iter().map(|s| s.amount).sum();
        assert_eq!(received, Money::from_units(200_000));
    }

    #[test]
    fn test_largest_amounts_matched_first() {
        let balances = vec![
            units("A", 50),
            units("B", 150),
            units("C", -120),
            units("D", -80),
        ];
        let settlements = optimize_debts(&balances);

        assert_eq!(
            pairs(&settlements),
            vec![("C", "B", 120), ("D", "B", 30), ("D", "A", 50)]
        );
        for (_, left) in apply(&balances, &settlements) {
            assert!(left.is_zero());
        }
    }

    #[test]
    fn test_ties_keep_input_order() {
        let balances = vec![
            units("B", -100),
            units("A", 100),
            units("D", -100),
            units("C", 100),
        ];
        let settlements = optimize_debts(&balances);

        assert_eq!(
            pairs(&settlements),
            vec![("B", "A", 100), ("D", "C", 100)]
        );
    }

    #[test]
    fn test_all_settled_yields_nothing() {
        let balances = vec![units("A", 0), units("B", 0)];
        assert!(optimize_debts(&balances).is_empty());
        assert!(optimize_debts(&[]).is_empty());
    }

    #[test]
    fn test_residue_within_tolerance_is_ignored() {
        // Rounding leftovers from a three-way split.
        let balances = vec![balance("A", 2), balance("B", -1), balance("C", -1)];
        assert!(optimize_debts(&balances).is_empty());
    }

    #[test]
    fn test_fractional_balances_round_only_on_emit() {
        // 100,000 split three ways, paid by A.
        let balances = vec![
            balance("A", 66_666_666_666),
            balance("B", -33_333_333_333),
            balance("C", -33_333_333_333),
        ];
        let settlements = optimize_debts(&balances);

        assert_eq!(
            pairs(&settlements),
            vec![("B", "A", 33_333), ("C", "A", 33_333)]
        );
    }

    #[test]
    fn test_sub_unit_transfer_is_not_emitted() {
        let balances = vec![balance("A", 400_000), balance("B", -400_000)];
        assert!(optimize_debts(&balances).is_empty());
    }

    #[test]
    fn test_custom_tolerance() {
        let balances = vec![balance("A", 400_000), balance("B", -400_000)];
        let policy = SettlementPolicy::with_tolerance(Money::from_micros(500_000)).unwrap();
        assert!(optimize_debts_with(&balances, &policy).is_empty());

        let balances = vec![units("A", 3), units("B", -3)];
        assert_eq!(pairs(&optimize_debts_with(&balances, &policy)), vec![("B", "A", 3)]);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let balances = vec![units("A", 10), units("B", -10)];
        let before = balances.clone();
        let _ = optimize_debts(&balances);
        assert_eq!(balances, before);
    }

    #[test]
    fn test_deterministic_output() {
        let balances = vec![
            units("A", 70),
            units("B", -20),
            units("C", 30),
            units("D", -50),
            units("E", -30),
        ];
        assert_eq!(optimize_debts(&balances), optimize_debts(&balances));
    }

    #[test]
    fn test_transaction_bound() {
        let balances = vec![
            units("A", 70),
            units("B", -20),
            units("C", 30),
            units("D", -50),
            units("E", -30),
        ];
        let settlements = optimize_debts(&balances);
        assert!(settlements.len() <= 2 + 3 - 1);
        for (_, left) in apply(&balances, &settlements) {
            assert!(left.is_zero());
        }
    }
}
