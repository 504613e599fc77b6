//! # Balance Calculator
//!
//! Turns members + expenses into one [`Balance`] per member.
//!
//! ## Accumulation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Expense "Dinner" 300,000 paid by An, split An/Binh/Chi                 │
//! │                                                                         │
//! │  share = 300,000 / 3 = 100,000                                          │
//! │                                                                         │
//! │            total_paid   total_owed   balance                            │
//! │  An         300,000      100,000     +200,000                           │
//! │  Binh             0      100,000     -100,000                           │
//! │  Chi              0      100,000     -100,000                           │
//! │                                                     Σ = 0               │
//! │                                                                         │
//! │  Paid by the common fund instead: nobody's total_paid moves, every      │
//! │  split member still owes their share.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Balance, Expense, Member, Payer};
use crate::validation::{ensure_unique_members, validate_expense};
use crate::MAX_LEDGER_TOTAL;

/// Computes every member's balance from scratch.
///
/// Output order follows `members`. Every expense is validated before any
/// balance is touched, so an invalid expense fails the whole call instead of
/// producing partial balances.
///
/// ## Errors
/// - [`CoreError::Validation`](crate::CoreError::Validation) if `members`
///   contains duplicates
/// - [`CoreError::InvalidExpense`](crate::CoreError::InvalidExpense) for a
///   non-positive amount or duplicate split entry
/// - [`CoreError::EmptySplit`](crate::CoreError::EmptySplit) for an expense
///   split between nobody
/// - [`CoreError::UnknownMember`](crate::CoreError::UnknownMember) for a
///   payer or split entry outside `members`
/// - [`CoreError::AmountOverflow`](crate::CoreError::AmountOverflow) when
///   all expenses together exceed [`MAX_LEDGER_TOTAL`]
///
/// ## Example
/// ```rust
/// use settleup_core::{calculate_balances, Expense, Member, Money};
///
/// let members: Vec<Member> = ["An", "Binh", "Chi"].into_iter().map(Member::from).collect();
/// let dinner = Expense::new("Dinner", Member::from("An"), Money::from_units(300_000), members.clone());
///
/// let balances = calculate_balances(&members, &[dinner]).unwrap();
/// assert_eq!(balances[0].balance, Money::from_units(200_000));
/// assert_eq!(balances[1].balance, Money::from_units(-100_000));
/// ```
pub fn calculate_balances(members: &[Member], expenses: &[Expense]) -> CoreResult<Vec<Balance>> {
    ensure_unique_members(members)?;

    for expense in expenses {
        if let Err(err) = validate_expense(expense, members) {
            warn!(expense_id = %expense.id, error = %err, "Rejecting expense");
            return Err(err);
        }
    }
    ensure_within_limit(expenses.iter().map(|e| e.amount), "expenses")?;

    let index: HashMap<&Member, usize> = members
        .iter()
        .enumerate()
        .map(|(i, member)| (member, i))
        .collect();
    let mut balances: Vec<Balance> = members.iter().cloned().map(Balance::new).collect();

    for expense in expenses {
        // validate_expense guarantees a non-empty split
        let share = expense
            .amount
            .split(expense.split_between.len())
            .unwrap_or_default();

        if let Payer::Individual(payer) = &expense.payer {
            if let Some(&i) = index.get(payer) {
                balances[i].total_paid += expense.amount;
            }
        }

        for member in &expense.split_between {
            if let Some(&i) = index.get(member) {
                balances[i].total_owed += share;
            }
        }

        debug!(
            expense_id = %expense.id,
            payer = %expense.payer,
            amount = %expense.amount,
            share = %share,
            "Applied expense"
        );
    }

    for balance in &mut balances {
        balance.balance = balance.total_paid - balance.total_owed;
    }

    debug!(
        members = balances.len(),
        expenses = expenses.len(),
        residue = %net_total(&balances),
        "Calculated balances"
    );

    Ok(balances)
}

/// Checks that `amounts` add up to at most [`MAX_LEDGER_TOTAL`] and returns
/// the total. Every amount is expected to be non-negative.
pub(crate) fn ensure_within_limit<I>(amounts: I, context: &str) -> CoreResult<Money>
where
    I: IntoIterator<Item = Money>,
{
    Money::checked_sum(amounts)
        .filter(|total| *total <= MAX_LEDGER_TOTAL)
        .ok_or_else(|| {
            warn!(context, max = %MAX_LEDGER_TOTAL, "Ledger total out of range");
            CoreError::AmountOverflow {
                context: context.to_string(),
                max: MAX_LEDGER_TOTAL.to_string(),
            }
        })
}

/// Sum of every member's balance.
///
/// Zero for a consistent ledger, up to share rounding (one micro-unit per
/// split member per expense at most).
pub fn net_total(balances: &[Balance]) -> Money {
    balances.iter().map(|b| b.balance).sum()
}

// =============================================================================
// Unit Tests
// =============================================================================
