//! # settleup-core: Settlement Engine for SettleUp
//!
//! This crate is the **heart** of SettleUp. It turns an event's members,
//! expenses and optional shared-fund contributions into balances, a short
//! list of payments, and fund refunds. Everything here is a pure function
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SettleUp Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Calling application (web UI, settleup-cli)         │   │
//! │  │    Events ──► Expenses ──► Fund contributions ──► Summary view  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ validated input                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ settleup-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  balance  │  │   fund    │  │ optimizer │  │ validation│  │   │
//! │  │   │  paid vs  │  │ remaining │  │  greedy   │  │   rules   │  │   │
//! │  │   │   owed    │  │  refunds  │  │ min-flow  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Ledger model (Member, Payer, Expense, Balance, Settlement, ...)
//! - [`money`] - Fixed-point Money (integer micro-units, no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input rule validation
//! - [`balance`] - Balance calculator
//! - [`fund`] - Shared-fund refund calculator
//! - [`optimizer`] - Greedy minimum-cash-flow debt optimizer
//! - [`summary`] - One-call event summary
//! - [`policy`] - Settlement tolerance
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = bit-identical output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: amounts are i64 micro-units, rounded to whole units
//!    only when a payment is emitted
//! 4. **Explicit Errors**: invalid input is refused, never skipped silently
//!
//! ## Example Usage
//!
//! ```rust
//! use settleup_core::{calculate_balances, optimize_debts, Expense, Member, Money};
//!
//! let members: Vec<Member> = ["A", "B", "C"].into_iter().map(Member::from).collect();
//! let dinner = Expense::new("Dinner", Member::from("A"), Money::from_units(300_000), members.clone());
//!
//! let balances = calculate_balances(&members, &[dinner]).unwrap();
//! let settlements = optimize_debts(&balances);
//!
//! // B and C each pay A 100,000
//! assert_eq!(settlements.len(), 2);
//! assert!(settlements.iter().all(|s| s.to.as_str() == "A"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod balance;
pub mod error;
pub mod fund;
pub mod money;
pub mod optimizer;
pub mod policy;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use settleup_core::Money` instead of
// `use settleup_core::money::Money`

pub use balance::{calculate_balances, net_total};
pub use error::{CoreError, CoreResult, ValidationError};
pub use fund::{calculate_fund_refunds, calculate_fund_refunds_with};
pub use money::Money;
pub use optimizer::{optimize_debts, optimize_debts_with};
pub use policy::SettlementPolicy;
pub use summary::{summarize, summarize_with};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum members for an event.
///
/// ## Business Reason
/// Splitting costs needs at least two people.
pub const MIN_EVENT_MEMBERS: usize = 2;

/// Largest total of all expenses (or of all fund contributions) in one
/// ledger: one trillion currency units.
///
/// ## Business Reason
/// Every per-member total, balance and refund is bounded by this sum, and
/// at 10^18 micro-units it leaves ample headroom below `i64::MAX`, so no
/// later step in the engine can overflow.
pub const MAX_LEDGER_TOTAL: Money = Money::from_units(1_000_000_000_000);

/// Maximum length of a member name, in characters.
pub const MAX_MEMBER_NAME_LEN: usize = 50;

/// Maximum length of an event or expense name, in characters.
pub const MAX_TITLE_LEN: usize = 200;
