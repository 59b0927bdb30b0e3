//! Loan Simulator - Amortization comparison engine for SAC and PRICE schedules
//!
//! This library provides:
//! - Month-by-month amortization schedules under SAC and PRICE
//! - Monetary correction applied to the live balance before interest
//! - Effective total cost (CET) estimation via Newton-Raphson
//! - Rate and correction sensitivity sweeps
//! - CSV scenario loading for batch comparisons

pub mod error;
pub mod loan;
pub mod schedule;
pub mod scenario;

// Re-export commonly used types
pub use error::SimulationError;
pub use loan::{LoanParameters, LoanScenario};
pub use schedule::{
    simulate, simulate_system, AmortizationSystem, PeriodEntry, ScheduleSummary,
    SimulationResult, SystemResult,
};
pub use scenario::ScenarioRunner;
