//! Running balance and totals carried month to month

use crate::schedule::entries::PeriodEntry;

/// Mutable state threaded through the schedule loop.
///
/// The balance here is the live balance used for the next month's
/// correction and interest, which already includes every correction
/// applied so far.
#[derive(Debug, Clone)]
pub struct ScheduleState {
    /// Outstanding balance carried into the next month.
    pub balance: f64,
    /// Interest accrued so far.
    pub total_interest: f64,
    /// Monetary correction accrued so far.
    pub total_correction: f64,
    /// Principal repaid so far.
    pub total_amortization: f64,
    /// Payments made so far, fees included.
    pub total_paid: f64,
}

impl ScheduleState {
    /// Initialize state at origination with the full principal outstanding
    pub fn new(principal: f64) -> Self {
        ScheduleState {
            balance: principal,
            total_interest: 0.0,
            total_correction: 0.0,
            total_amortization: 0.0,
            total_paid: 0.0,
        }
    }

    /// Fold a finished row into the totals and advance the balance
    pub fn record(&mut self, entry: &PeriodEntry) {
        self.balance = entry.closing_balance;
        self.total_interest += entry.interest;
        self.total_correction += entry.correction;
        self.total_amortization += entry.amortization;
        self.total_paid += entry.total_payment;
    }
}
