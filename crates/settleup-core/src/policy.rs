//! # Settlement Policy
//!
//! Tunables for the debt optimizer and summary.
//!
//! The core never reads files or the environment; callers build a
//! [`SettlementPolicy`] (usually from their own config layer) and pass it in.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::{Money, MICROS_PER_UNIT};

/// Default tolerance: 0.01 currency unit.
pub const DEFAULT_TOLERANCE: Money = Money::from_micros(10_000);

/// How the optimizer decides that a balance is settled.
///
/// ## Tolerance
/// ```text
/// |balance| <= tolerance   → settled (neither creditor nor debtor)
/// balance  >  tolerance    → creditor
/// balance  < -tolerance    → debtor
/// ```
/// Shares are rounded to the nearest micro-unit, so a ledger of `m` expenses
/// carries at most a few `m` micros of residue. The default of 0.01 unit sits
/// far above that and far below anything a person would actually transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SettlementPolicy {
    #[serde(default = "default_tolerance")]
    pub tolerance: Money,
}

fn default_tolerance() -> Money {
    DEFAULT_TOLERANCE
}

impl Default for SettlementPolicy {
    fn default() -> Self {
        SettlementPolicy {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SettlementPolicy {
    /// Creates a policy with the given tolerance, validating it.
    pub fn with_tolerance(tolerance: Money) -> CoreResult<Self> {
        let policy = SettlementPolicy { tolerance };
        policy.validate()?;
        Ok(policy)
    }

    /// Tolerance must be non-negative and below one whole currency unit.
    pub fn validate(&self) -> CoreResult<()> {
        if self.tolerance.is_negative() {
            return Err(CoreError::InvalidPolicy(format!(
                "tolerance must not be negative, got {}",
                self.tolerance
            )));
        }

        if self.tolerance.micros() >= MICROS_PER_UNIT {
            return Err(CoreError::InvalidPolicy(format!(
                "tolerance must be below one currency unit, got {}",
                self.tolerance
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_valid() {
        let policy = SettlementPolicy::default();
        assert_eq!(policy.tolerance.micros(), 10_000);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_policy_bounds() {
        assert!(SettlementPolicy::with_tolerance(Money::zero()).is_ok());
        assert!(SettlementPolicy::with_tolerance(Money::from_micros(-1)).is_err());
        assert!(SettlementPolicy::with_tolerance(Money::from_units(1)).is_err());
    }

    #[test]
    fn test_policy_deserializes_with_defaults() {
        let policy: SettlementPolicy = serde_json::from_str("{}").unwrap();
        assert_eq!(policy, SettlementPolicy::default());

        let policy: SettlementPolicy = serde_json::from_str(r#"{"tolerance": 0.5}"#).unwrap();
        assert_eq!(policy.tolerance.micros(), 500_000);
    }
}
