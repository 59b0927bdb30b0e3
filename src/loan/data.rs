//! Loan parameter definitions for a simulation run

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// Input parameters for one financing simulation.
///
/// All rates are entered as percentages, matching the way they are quoted:
/// the interest rate is a nominal annual rate and the monetary correction
/// is a flat monthly rate (TR, inflation index, or similar). Fees are a
/// fixed currency amount charged every month (insurance + administration).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Amount disbursed at month zero.
    pub principal: f64,

    /// Term of the loan in months.
    pub term_months: u32,

    /// Nominal annual interest rate, in percent (e.g. 9.5).
    pub annual_interest_rate: f64,

    /// Monthly monetary correction rate, in percent. May be negative.
    pub monthly_correction_rate: f64,

    /// Fixed monthly fees in currency units (e.g. MIP + DFI + admin).
    pub monthly_fees: f64,
}

impl LoanParameters {
    /// Create parameters for a simulation run.
    pub fn new(
        principal: f64,
        term_months: u32,
        annual_interest_rate: f64,
        monthly_correction_rate: f64,
        monthly_fees: f64,
    ) -> Self {
        Self {
            principal,
            term_months,
            annual_interest_rate,
            monthly_correction_rate,
            monthly_fees,
        }
    }

    /// Monthly interest rate as a fraction.
    ///
    /// The nominal annual rate is divided by 12, the convention these
    /// loans are quoted under, not converted to a compounded equivalent.
    pub fn monthly_interest_rate(&self) -> f64 {
        self.annual_interest_rate / 12.0 / 100.0
    }

    /// Monthly correction rate as a fraction.
    pub fn monthly_correction_fraction(&self) -> f64 {
        self.monthly_correction_rate / 100.0
    }

    /// Check the preconditions the schedule generator relies on.
    ///
    /// The engine itself cannot fail on validated input, so this is the
    /// only gate: positive finite principal, at least one month of term,
    /// non-negative finite interest rate and fees, finite correction rate
    /// (any sign).
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.principal.is_finite() || self.principal <= 0.0 {
            return Err(SimulationError::invalid_parameter(
                "principal",
                format!("must be a positive amount, got {}", self.principal),
            ));
        }
        if self.term_months == 0 {
            return Err(SimulationError::invalid_parameter(
                "term_months",
                "must be at least 1",
            ));
        }
        if !self.annual_interest_rate.is_finite() || self.annual_interest_rate < 0.0 {
            return Err(SimulationError::invalid_parameter(
                "annual_interest_rate",
                format!("must be non-negative, got {}", self.annual_interest_rate),
            ));
        }
        if !self.monthly_correction_rate.is_finite() {
            return Err(SimulationError::invalid_parameter(
                "monthly_correction_rate",
                "must be finite",
            ));
        }
        if !self.monthly_fees.is_finite() || self.monthly_fees < 0.0 {
            return Err(SimulationError::invalid_parameter(
                "monthly_fees",
                format!("must be non-negative, got {}", self.monthly_fees),
            ));
        }
        Ok(())
    }
}

impl Default for LoanParameters {
    /// Reference financing: R$ 300.000,00 over 30 years at 9.5% a.a.
    /// with R$ 150,00 of monthly fees and no monetary correction.
    fn default() -> Self {
        Self {
            principal: 300_000.0,
            term_months: 360,
            annual_interest_rate: 9.5,
            monthly_correction_rate: 0.0,
            monthly_fees: 150.0,
        }
    }
}
