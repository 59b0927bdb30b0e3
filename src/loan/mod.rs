//! Loan parameters, rate conversions, and scenario input

mod data;
pub mod loader;
pub mod rates;

pub use data::LoanParameters;
pub use loader::{load_scenarios, load_scenarios_from_reader, LoanScenario};
