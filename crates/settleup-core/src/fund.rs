//! # Fund Refund Calculator
//!
//! For events that pool money into a common fund: how much is left in the
//! pool and how much each contributor gets back.
//!
//! ## Formula
//! ```text
//! remaining_fund = Σ contributions - Σ amount of common-fund expenses
//! refund(m)      = contribution(m) - total_owed(m)      (kept only if > tolerance)
//! ```
//!
//! `total_owed` is the member's share of *every* expense, including the ones
//! they or someone else paid out of pocket, not just the fund-paid ones. A
//! member who contributed 500,000, owes 200,000 of fund expenses and another
//! 100,000 of a dinner paid by a friend is refunded 200,000, not 300,000.
//! That behavior is kept as-is and pinned by
//! `test_refund_uses_total_owed_not_fund_share` below.
//!
//! Shares are rounded to the micro-unit, so a contributor whose fund exactly
//! covered their shares can be left with a micro-unit or two. Anything at or
//! below the [`SettlementPolicy`] tolerance is not a refund.

use std::collections::BTreeMap;

use tracing::debug;

use crate::balance::ensure_within_limit;
use crate::error::CoreResult;
use crate::policy::SettlementPolicy;
use crate::types::{Balance, Expense, FundContributions, FundRefunds, Member};
use crate::validation::validate_contributions;

/// Computes the remaining fund and refunds with the default
/// [`SettlementPolicy`]. See [`calculate_fund_refunds_with`].
///
/// An empty contribution map is the "no fund" state: zero remaining and no
/// refunds, not an error.
///
/// ## Errors
/// - [`CoreError::UnknownMember`](crate::CoreError::UnknownMember) when a
///   contributor has no balance
/// - [`CoreError::InvalidContribution`](crate::CoreError::InvalidContribution)
///   for a negative contribution
/// - [`CoreError::AmountOverflow`](crate::CoreError::AmountOverflow) when the
///   contributions or the fund-paid expenses add up beyond
///   [`MAX_LEDGER_TOTAL`](crate::MAX_LEDGER_TOTAL)
///
/// ## Example
/// ```rust
/// use settleup_core::{calculate_balances, calculate_fund_refunds};
/// use settleup_core::{Expense, FundContributions, Member, Money, Payer};
///
/// let members = vec![Member::from("A"), Member::from("B")];
/// let mut contributions = FundContributions::new();
/// contributions.insert(Member::from("A"), Money::from_units(500_000));
/// contributions.insert(Member::from("B"), Money::from_units(500_000));
///
/// let hotel = Expense::new("Hotel", Payer::CommonFund, Money::from_units(400_000), members.clone());
/// let expenses = vec![hotel];
/// let balances = calculate_balances(&members, &expenses).unwrap();
///
/// let fund = calculate_fund_refunds(&contributions, &expenses, &balances).unwrap();
/// assert_eq!(fund.remaining_fund, Money::from_units(600_000));
/// assert_eq!(fund.refunds[&Member::from("A")], Money::from_units(300_000));
/// ```
pub fn calculate_fund_refunds(
    contributions: &FundContributions,
    expenses: &[Expense],
    balances: &[Balance],
) -> CoreResult<FundRefunds> {
    calculate_fund_refunds_with(contributions, expenses, balances, &SettlementPolicy::default())
}

/// Computes the remaining fund and per-member refunds, dropping refunds
/// within `policy.tolerance` of zero.
pub fn calculate_fund_refunds_with(
    contributions: &FundContributions,
    expenses: &[Expense],
    balances: &[Balance],
    policy: &SettlementPolicy,
) -> CoreResult<FundRefunds> {
    if contributions.is_empty() {
        debug!("No fund contributions; skipping refunds");
        return Ok(FundRefunds::default());
    }

    let members: Vec<Member> = balances.iter().map(|b| b.person.clone()).collect();
    validate_contributions(contributions, &members)?;

    let total_fund = ensure_within_limit(contributions.values().copied(), "fund contributions")?;
    let total_spent = ensure_within_limit(
        expenses
            .iter()
            .filter(|e| e.payer.is_common_fund())
            .map(|e| e.amount),
        "common-fund expenses",
    )?;
    let remaining_fund = total_fund - total_spent;

    let mut refunds = BTreeMap::new();
    for balance in balances {
        let contributed = contributions
            .get(&balance.person)
            .copied()
            .unwrap_or_default();
        let refund = contributed - balance.total_owed;

        if refund > policy.tolerance {
            refunds.insert(balance.person.clone(), refund);
        }
    }

    debug!(
        total_fund = %total_fund,
        total_spent = %total_spent,
        remaining = %remaining_fund,
        refunds = refunds.len(),
        "Calculated fund refunds"
    );

    Ok(FundRefunds {
        remaining_fund,
        refunds,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
