//! # Event Summary
//!
//! One call that produces everything the summary screen shows.
//!
//! ```text
//! Event + expenses
//!      │
//!      ├──► calculate_balances ──► optimize_debts ──► settlements
//!      │
//!      ├──► Σ amount ──► total_expenses
//!      │
//!      └──► (has_fund only) calculate_fund_refunds ──► fund
//! ```

use tracing::{debug, instrument};

use crate::balance::calculate_balances;
use crate::error::CoreResult;
use crate::fund::calculate_fund_refunds_with;
use crate::money::Money;
use crate::optimizer::optimize_debts_with;
use crate::policy::SettlementPolicy;
use crate::types::{Event, Expense, FundContributions, Summary};

/// Summarizes an event with the default [`SettlementPolicy`].
pub fn summarize(event: &Event, expenses: &[Expense]) -> CoreResult<Summary> {
    summarize_with(event, expenses, &SettlementPolicy::default())
}

/// Summarizes an event.
///
/// The fund section is only computed when `event.has_fund` is set; a fund
/// event with no contribution map is treated as having empty contributions.
///
/// ## Errors
/// Any error from the balance or fund calculators, or an invalid `policy`.
/// Nothing is returned alongside an error.
#[instrument(skip_all, fields(event_id = %event.id, expenses = expenses.len()))]
pub fn summarize_with(
    event: &Event,
    expenses: &[Expense],
    policy: &SettlementPolicy,
) -> CoreResult<Summary> {
    policy.validate()?;

    let balances = calculate_balances(&event.members, expenses)?;
    let settlements = optimize_debts_with(&balances, policy);
    // calculate_balances already bounded this sum by MAX_LEDGER_TOTAL
    let total_expenses: Money = expenses.iter().map(|e| e.amount).sum();

    let fund = if event.has_fund {
        let empty = FundContributions::new();
        let contributions = event.fund_contributions.as_ref().unwrap_or(&empty);
        Some(calculate_fund_refunds_with(
            contributions,
            expenses,
            &balances,
            policy,
        )?)
    } else {
        None
    };

    debug!(
        total_expenses = %total_expenses,
        settlements = settlements.len(),
        has_fund = event.has_fund,
        "Summarized event"
    );

    Ok(Summary {
        balances,
        settlements,
        total_expenses,
        fund,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
