//! Text rendering of an event summary.
//!
//! ```text
//! Da Lat
//! Total expenses: 460,000
//!
//! Balances
//!   An      paid 60,000    owes 230,000    balance -170,000
//!   Binh    paid 0         owes 230,000    balance -230,000
//!
//! Settlements
//!   Nothing to settle
//!
//! Common fund
//!   Remaining: 600,000
//!   Refund to An: 270,000
//!   Refund to Binh: 270,000
//! ```

use std::fmt;

use settleup_core::{Event, Summary};

/// Borrowed view that renders as the text report.
pub struct Report<'a> {
    event: &'a Event,
    summary: &'a Summary,
}

impl<'a> Report<'a> {
    pub fn new(event: &'a Event, summary: &'a Summary) -> Self {
        Report { event, summary }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.summary;
        let width = summary
            .balances
            .iter()
            .map(|b| b.person.as_str().chars().count())
            .max()
            .unwrap_or(0);

        writeln!(f, "{}", self.event.name)?;
        writeln!(f, "Total expenses: {}", summary.total_expenses)?;

        writeln!(f)?;
        writeln!(f, "Balances")?;
        for b in &summary.balances {
            writeln!(
                f,
                "  {:<width$}  paid {:<12}  owes {:<12}  balance {}",
                b.person.as_str(),
                b.total_paid.to_string(),
                b.total_owed.to_string(),
                b.balance,
                width = width
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Settlements")?;
        if summary.settlements.is_empty() {
            writeln!(f, "  Nothing to settle")?;
        }
        for s in &summary.settlements {
            writeln!(f, "  {} -> {}: {}", s.from, s.to, s.amount)?;
        }

        if let Some(fund) = &summary.fund {
            writeln!(f)?;
            writeln!(f, "Common fund")?;
            writeln!(f, "  Remaining: {}", fund.remaining_fund)?;
            for (member, refund) in &fund.refunds {
                writeln!(f, "  Refund to {}: {}", member, refund)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use settleup_core::{summarize, Expense, FundContributions, Member, Money, Payer};

    fn roster() -> Vec<Member> {
        vec![Member::new("An"), Member::new("Binh"), Member::new("Chi")]
    }

    #[test]
    fn test_report_lists_settlements() {
        let event = Event::new("Dinner club", roster());
        let expenses = vec![Expense::new(
            "Dinner",
            Member::new("An"),
            Money::from_units(300_000),
            roster(),
        )];
        let summary = summarize(&event, &expenses).unwrap();

        let text = Report::new(&event, &summary).to_string();
        assert!(text.starts_with("Dinner club\n"));
        assert!(text.contains("Total expenses: 300,000"));
        assert!(text.contains("  Binh -> An: 100,000"));
        assert!(text.contains("  Chi -> An: 100,000"));
        assert!(!text.contains("Common fund"));
    }

    #[test]
    fn test_report_with_fund_section() {
        let members = vec![Member::new("An"), Member::new("Binh")];
        let contributions: FundContributions = members
            .iter()
            .map(|m| (m.clone(), Money::from_units(500_000)))
            .collect();
        let event = Event::new("Da Lat", members.clone()).with_fund(contributions);
        let expenses = vec![Expense::new(
            "Hotel",
            Payer::CommonFund,
            Money::from_units(400_000),
            members,
        )];
        let summary = summarize(&event, &expenses).unwrap();

        let text = Report::new(&event, &summary).to_string();
        assert!(text.contains("Nothing to settle"));
        assert!(text.contains("Remaining: 600,000"));
        assert!(text.contains("Refund to An: 300,000"));
        assert!(text.contains("Refund to Binh: 300,000"));
    }
}
