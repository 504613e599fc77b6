//! # Error Types
//!
//! Domain-specific error types for settleup-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  settleup-core errors (this file)                                      │
//! │  ├── CoreError        - Ledger invariant violations                    │
//! │  └── ValidationError  - Field-level input failures                     │
//! │                                                                         │
//! │  settleup-cli errors (separate crate)                                  │
//! │  └── CliError         - File, parse and config failures                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → stderr                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (expense, member, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each variant is one human-readable reason; no partial results alongside

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Settlement engine errors.
///
/// Every variant means the whole computation was refused. A caller never
/// receives balances or settlements computed from a partially valid ledger.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// An expense breaks one of its own invariants.
    ///
    /// ## When This Occurs
    /// - Amount is zero or negative
    /// - The same member appears twice in the split
    #[error("Invalid expense '{expense}': {reason}")]
    InvalidExpense { expense: String, reason: String },

    /// An expense is split between nobody.
    ///
    /// Dividing by the split size would be a division by zero, so the
    /// expense is refused instead of leaking NaN-like shares into balances.
    #[error("Expense '{expense}' is not split between any members")]
    EmptySplit { expense: String },

    /// A payer, split entry or fund contributor is not an event member.
    ///
    /// ## User Workflow
    /// ```text
    /// Member "Binh" removed from event
    ///      │
    ///      ▼
    /// Old expense still lists "Binh" in its split
    ///      │
    ///      ▼
    /// UnknownMember { member: "Binh", context: "split of 'Taxi'" }
    /// ```
    #[error("Unknown member '{member}' in {context}")]
    UnknownMember { member: String, context: String },

    /// A shared-fund contribution is unusable.
    #[error("Invalid fund contribution from '{member}': {reason}")]
    InvalidContribution { member: String, reason: String },

    /// A sum of amounts is beyond what the engine can add up exactly.
    ///
    /// ## When This Occurs
    /// - All expenses together exceed [`MAX_LEDGER_TOTAL`](crate::MAX_LEDGER_TOTAL)
    /// - Fund contributions together exceed the same limit
    #[error("Total of {context} exceeds the supported maximum of {max}")]
    AmountOverflow { context: String, max: String },

    /// Settlement policy values are out of range.
    #[error("Invalid settlement policy: {0}")]
    InvalidPolicy(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before the calculators run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// A collection has fewer entries than required.
    #[error("{field} needs at least {min} entries")]
    TooFew { field: String, min: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or positive.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Duplicate value (e.g., two members with the same name).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
