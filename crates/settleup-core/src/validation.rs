//! # Validation Module
//!
//! Input validation utilities for SettleUp.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end forms                                              │
//! │  ├── Basic format checks (empty names, amount > 0)                     │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Field rules (validate_member_name, validate_amount, ...)          │
//! │  └── Ledger rules (validate_expense, validate_event)                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Calculators                                                  │
//! │  └── Re-check every expense before touching a balance                  │
//! │                                                                         │
//! │  Defense in depth: a bad expense is refused, never skipped silently    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use settleup_core::validation::{validate_amount, validate_member_name};
//! use settleup_core::Money;
//!
//! assert!(validate_member_name("An").is_ok());
//! assert!(validate_amount(Money::from_units(0)).is_err());
//! ```

use std::collections::HashSet;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Event, Expense, FundContributions, Member, Payer};
use crate::{MAX_MEMBER_NAME_LEN, MAX_TITLE_LEN, MIN_EVENT_MEMBERS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a member name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 50 characters
pub fn validate_member_name(name: &str) -> ValidationResult<()> {
    validate_text("member name", name, MAX_MEMBER_NAME_LEN)
}

/// Validates an event name (non-empty, at most 200 characters).
pub fn validate_event_name(name: &str) -> ValidationResult<()> {
    validate_text("event name", name, MAX_TITLE_LEN)
}

/// Validates an expense name (non-empty, at most 200 characters).
pub fn validate_expense_name(name: &str) -> ValidationResult<()> {
    validate_text("expense name", name, MAX_TITLE_LEN)
}

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an expense amount.
///
/// ## Example
/// ```rust
/// use settleup_core::validation::validate_amount;
/// use settleup_core::Money;
///
/// assert!(validate_amount(Money::from_units(150_000)).is_ok());
/// assert!(validate_amount(Money::zero()).is_err());
/// assert!(validate_amount(Money::from_units(-1)).is_err());
/// ```
pub fn validate_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a fund contribution. Zero is allowed (member joined the fund
/// but has not paid in yet).
pub fn validate_contribution(amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "fund contribution".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Checks that no member name appears twice.
pub fn ensure_unique_members(members: &[Member]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(members.len());
    for member in members {
        if !seen.insert(member) {
            return Err(ValidationError::Duplicate {
                field: "member".to_string(),
                value: member.to_string(),
            });
        }
    }

    Ok(())
}

/// Validates an event's member list.
///
/// ## Rules
/// - Every name passes [`validate_member_name`]
/// - At least 2 members (settling up alone is meaningless)
/// - No duplicates
pub fn validate_members(members: &[Member]) -> ValidationResult<()> {
    for member in members {
        validate_member_name(member.as_str())?;
    }

    if members.len() < MIN_EVENT_MEMBERS {
        return Err(ValidationError::TooFew {
            field: "members".to_string(),
            min: MIN_EVENT_MEMBERS,
        });
    }

    ensure_unique_members(members)
}

// =============================================================================
// Ledger Validators
// =============================================================================

/// Validates one expense against the event's member list.
///
/// ## Checks (in order)
/// ```text
/// amount > 0                  → InvalidExpense
/// split_between not empty     → EmptySplit
/// split_between unique        → InvalidExpense
/// payer is a member           → UnknownMember (common fund always passes)
/// split entries are members   → UnknownMember
/// ```
pub fn validate_expense(expense: &Expense, members: &[Member]) -> CoreResult<()> {
    if let Err(err) = validate_amount(expense.amount) {
        return Err(CoreError::InvalidExpense {
            expense: expense.label(),
            reason: err.to_string(),
        });
    }

    if expense.split_between.is_empty() {
        return Err(CoreError::EmptySplit {
            expense: expense.label(),
        });
    }

    if let Err(ValidationError::Duplicate { value, .. }) =
        ensure_unique_members(&expense.split_between)
    {
        return Err(CoreError::InvalidExpense {
            expense: expense.label(),
            reason: format!("'{}' appears more than once in the split", value),
        });
    }

    if let Payer::Individual(payer) = &expense.payer {
        if !members.contains(payer) {
            return Err(CoreError::UnknownMember {
                member: payer.to_string(),
                context: format!("payer of '{}'", expense.label()),
            });
        }
    }

    if let Some(stranger) = expense
        .split_between
        .iter()
        .find(|member| !members.contains(*member))
    {
        return Err(CoreError::UnknownMember {
            member: stranger.to_string(),
            context: format!("split of '{}'", expense.label()),
        });
    }

    Ok(())
}

/// Validates shared-fund contributions against a member list.
pub fn validate_contributions(
    contributions: &FundContributions,
    members: &[Member],
) -> CoreResult<()> {
    for (member, amount) in contributions {
        if !members.contains(member) {
            return Err(CoreError::UnknownMember {
                member: member.to_string(),
                context: "fund contributions".to_string(),
            });
        }

        if let Err(err) = validate_contribution(*amount) {
            return Err(CoreError::InvalidContribution {
                member: member.to_string(),
                reason: err.to_string(),
            });
        }
    }

    Ok(())
}

/// Validates an event as the calling application would before saving it.
pub fn validate_event(event: &Event) -> CoreResult<()> {
    validate_event_name(&event.name)?;
    validate_members(&event.members)?;

    if let Some(contributions) = &event.fund_contributions {
        validate_contributions(contributions, &event.members)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
