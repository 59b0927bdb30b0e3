//! Amortization schedule construction and effective cost estimation

pub mod cet;
mod engine;
mod entries;
mod state;

pub use cet::{solve_effective_rate, EffectiveRate};
pub use engine::{simulate, simulate_system};
pub use entries::{
    AmortizationSystem, PeriodEntry, ScheduleSummary, SimulationResult, SystemResult,
};
