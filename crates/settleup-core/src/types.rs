//! # Ledger Model
//!
//! Core domain types used throughout SettleUp.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Ledger Types                                    │
//! │                                                                         │
//! │  INPUTS (supplied by the calling application)                          │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Event       │   │    Expense      │   │     Payer       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  members        │   │  payer          │   │  Individual(M)  │       │
//! │  │  has_fund       │   │  amount         │   │  CommonFund     │       │
//! │  │  contributions  │   │  split_between  │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  OUTPUTS (derived, never persisted)                                    │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Balance      │   │   Settlement    │   │  FundRefunds    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  total_paid     │   │  from (debtor)  │   │  remaining_fund │       │
//! │  │  total_owed     │   │  to (creditor)  │   │  refunds        │       │
//! │  │  balance        │   │  amount         │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The model carries no behavior beyond small accessors; the calculators
//! live in [`crate::balance`], [`crate::fund`] and [`crate::optimizer`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Member
// =============================================================================

/// A named participant in an event's expense pool.
///
/// Opaque identifier, unique within one event. Serialized as a bare string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Member(String);

impl Member {
    pub fn new(name: impl Into<String>) -> Self {
        Member(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Member {
    fn from(name: &str) -> Self {
        Member::new(name)
    }
}

impl From<String> for Member {
    fn from(name: String) -> Self {
        Member(name)
    }
}

// =============================================================================
// Payer
// =============================================================================

/// Who paid for an expense.
///
/// `CommonFund` is its own variant, so a member who happens to be called
/// "Common Fund" is still an ordinary individual.
///
/// ## JSON Shape
/// ```text
/// { "individual": "An" }     ← a member paid
/// "common_fund"              ← paid out of the pooled contributions
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Payer {
    /// A specific member paid out of pocket.
    Individual(Member),
    /// Money drawn from the shared pool.
    CommonFund,
}

impl Payer {
    /// Returns the paying member, or `None` for the common fund.
    pub fn member(&self) -> Option<&Member> {
        match self {
            Payer::Individual(member) => Some(member),
            Payer::CommonFund => None,
        }
    }

    #[inline]
    pub fn is_common_fund(&self) -> bool {
        matches!(self, Payer::CommonFund)
    }
}

impl From<Member> for Payer {
    fn from(member: Member) -> Self {
        Payer::Individual(member)
    }
}

impl fmt::Display for Payer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payer::Individual(member) => write!(f, "{}", member),
            Payer::CommonFund => f.write_str("common fund"),
        }
    }
}

// =============================================================================
// Expense
// =============================================================================

/// A single recorded cost with one payer and the members who share it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Expense {
    /// Unique identifier assigned by the calling application.
    #[ts(as = "String")]
    pub id: Uuid,

    /// What the money was spent on ("Dinner", "Taxi").
    pub name: String,

    /// Who paid.
    pub payer: Payer,

    /// Total amount, strictly positive.
    pub amount: Money,

    /// Members sharing the cost equally. Non-empty, no duplicates.
    pub split_between: Vec<Member>,

    /// Display/ordering only; never used in the math.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Creates an expense with a fresh id and the current timestamp.
    pub fn new(
        name: impl Into<String>,
        payer: impl Into<Payer>,
        amount: Money,
        split_between: Vec<Member>,
    ) -> Self {
        Expense {
            id: Uuid::new_v4(),
            name: name.into(),
            payer: payer.into(),
            amount,
            split_between,
            created_at: Utc::now(),
        }
    }

    /// Human-readable label for error messages and logs.
    pub fn label(&self) -> String {
        let name = self.name.trim();
        if name.is_empty() {
            self.id.to_string()
        } else {
            name.to_string()
        }
    }
}

// =============================================================================
// Event
// =============================================================================

/// Total contribution per member into the shared pool.
pub type FundContributions = BTreeMap<Member, Money>;

/// An event whose expenses are being settled.
///
/// Only the fields the engine reads are modelled; access codes, QR codes and
/// the like stay in the calling application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Event {
    #[ts(as = "String")]
    pub id: Uuid,

    pub name: String,

    /// Ordered, unique member list. Balance output follows this order.
    pub members: Vec<Member>,

    /// Whether the event pools money into a common fund.
    #[serde(default)]
    pub has_fund: bool,

    /// Contributions into the common fund, when `has_fund` is set.
    #[serde(default)]
    pub fund_contributions: Option<FundContributions>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Creates an event without a shared fund.
    pub fn new(name: impl Into<String>, members: Vec<Member>) -> Self {
        Event {
            id: Uuid::new_v4(),
            name: name.into(),
            members,
            has_fund: false,
            fund_contributions: None,
            created_at: Utc::now(),
        }
    }

    /// Declares a shared fund with the given contributions.
    pub fn with_fund(mut self, contributions: FundContributions) -> Self {
        self.has_fund = true;
        self.fund_contributions = Some(contributions);
        self
    }

    /// Returns true if `member` belongs to this event.
    pub fn has_member(&self, member: &Member) -> bool {
        self.members.contains(member)
    }
}

// =============================================================================
// Balance
// =============================================================================

/// A member's net financial position.
///
/// ## Fields
/// ```text
/// total_paid  = Σ amount   where member is the (individual) payer
/// total_owed  = Σ share    over every expense the member is split into,
///                          common-fund expenses included
/// balance     = total_paid - total_owed
///               > 0 → the group owes this member
///               < 0 → this member owes the group
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Balance {
    pub person: Member,
    pub total_paid: Money,
    pub total_owed: Money,
    pub balance: Money,
}

impl Balance {
    /// A zeroed balance for `person`.
    pub fn new(person: Member) -> Self {
        Balance {
            person,
            total_paid: Money::zero(),
            total_owed: Money::zero(),
            balance: Money::zero(),
        }
    }
}

// =============================================================================
// Settlement
// =============================================================================

/// One suggested peer-to-peer payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Settlement {
    /// Debtor who pays.
    pub from: Member,
    /// Creditor who receives.
    pub to: Member,
    /// Whole currency units, always positive.
    pub amount: Money,
}

// =============================================================================
// Fund Refunds
// =============================================================================

/// Shared-fund outcome for an event with a common fund.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FundRefunds {
    /// Contributions minus everything spent from the fund. Negative when the
    /// fund was overdrawn.
    pub remaining_fund: Money,

    /// Refunds above the settlement tolerance only, keyed by member.
    pub refunds: BTreeMap<Member, Money>,
}

// =============================================================================
// Summary
// =============================================================================

/// Everything the summary screen shows for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Summary {
    pub balances: Vec<Balance>,
    pub settlements: Vec<Settlement>,

    /// Sum of every expense amount, common-fund ones included.
    pub total_expenses: Money,

    /// Present only when the event declares a shared fund.
    pub fund: Option<FundRefunds>,
}

// =============================================================================
// Unit Tests
// =============================================================================
