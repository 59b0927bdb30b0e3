//! Schedule output structures for a simulation

use serde::{Deserialize, Serialize};

/// Amortization system identity for one schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AmortizationSystem {
    /// Constant-amortization system: level amortization, shrinking payment.
    Sac,
    /// French system: level payment, growing amortization share.
    Price,
}

impl AmortizationSystem {
    /// Get the string representation used in reports and exports
    pub fn as_str(&self) -> &'static str {
        match self {
            AmortizationSystem::Sac => "SAC",
            AmortizationSystem::Price => "PRICE",
        }
    }
}

/// A single row of an amortization schedule, one per month.
///
/// The opening balance is the balance before this month's own monetary
/// correction; the correction, interest, and amortization columns on the
/// same row already reflect it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodEntry {
    /// Month index, 1-based up to the loan term.
    pub month: u32,
    /// Outstanding balance before this month's correction.
    pub opening_balance: f64,
    /// Monetary correction added to the balance this month.
    pub correction: f64,
    /// Interest charged on the corrected balance.
    pub interest: f64,
    /// Principal repaid this month.
    pub amortization: f64,
    /// Fixed fees charged this month.
    pub fees: f64,
    /// Total paid this month (amortization + interest + fees).
    pub total_payment: f64,
    /// Outstanding balance after amortization, floored at zero.
    pub closing_balance: f64,
}

/// Aggregate figures for one system's full schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSummary {
    /// Amount financed.
    pub loan_amount: f64,
    /// Total payment of the first month.
    pub first_payment: f64,
    /// Total payment of the last month.
    pub last_payment: f64,
    /// Interest paid over the full term.
    pub total_interest: f64,
    /// Principal repaid over the full term (includes absorbed correction).
    pub total_amortization: f64,
    /// Monetary correction accrued over the full term.
    pub total_correction: f64,
    /// Fees paid over the full term.
    pub total_fees: f64,
    /// Everything paid over the full term.
    pub total_paid: f64,
    /// Effective total cost, percent per month.
    pub cet_monthly_pct: f64,
    /// Effective total cost, percent per year.
    pub cet_annual_pct: f64,
    /// Whether the CET solve converged within its iteration cap.
    pub cet_converged: bool,
}

/// One system's schedule plus its summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemResult {
    /// Which amortization system produced this schedule.
    pub system: AmortizationSystem,
    /// Month-by-month schedule, `term_months` entries.
    pub entries: Vec<PeriodEntry>,
    /// Aggregates over the schedule.
    pub summary: ScheduleSummary,
}

/// Complete comparison returned to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Constant-amortization schedule.
    pub sac: SystemResult,
    /// French-system schedule.
    pub price: SystemResult,
}

impl SimulationResult {
    /// Both system results, SAC first.
    pub fn systems(&self) -> [&SystemResult; 2] {
        [&self.sac, &self.price]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_as_str() {
        assert_eq!(AmortizationSystem::Sac.as_str(), "SAC");
        assert_eq!(AmortizationSystem::Price.as_str(), "PRICE");
    }

    #[test]
    fn test_system_serializes_uppercase() {
        let json = serde_json::to_string(&AmortizationSystem::Price).unwrap();
        assert_eq!(json, "\"PRICE\"");
    }
}
