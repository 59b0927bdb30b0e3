//! Scenario runner for sensitivity sweeps
//!
//! Holds one base set of loan parameters, then runs many simulations
//! with single-parameter overrides for rate and correction sweeps.

use crate::loan::LoanParameters;
use crate::schedule::{simulate, SimulationResult};
use crate::SimulationError;

/// Base-plus-overrides runner for comparative simulations
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(params);
///
/// // Run the same loan across a band of contract rates
/// for (rate, result) in runner.run_rate_scenarios(&[8.0, 9.5, 11.0])? {
///     println!("{rate}% -> {}", result.price.summary.total_paid);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    /// Base parameters every scenario starts from
    base: LoanParameters,
}

impl ScenarioRunner {
    /// Create runner around a base set of parameters
    pub fn new(base: LoanParameters) -> Self {
        Self { base }
    }

    /// Run the base parameters unchanged
    pub fn run(&self) -> Result<SimulationResult, SimulationError> {
        simulate(&self.base)
    }

    /// Run the base loan at a different annual contract rate
    pub fn run_with_annual_rate(
        &self,
        annual_rate: f64,
    ) -> Result<SimulationResult, SimulationError> {
        let mut params = self.base.clone();
        params.annual_interest_rate = annual_rate;
        simulate(&params)
    }

    /// Run the base loan across a band of annual contract rates
    pub fn run_rate_scenarios(
        &self,
        annual_rates: &[f64],
    ) -> Result<Vec<(f64, SimulationResult)>, SimulationError> {
        annual_rates
            .iter()
            .map(|&rate| Ok((rate, self.run_with_annual_rate(rate)?)))
            .collect()
    }

    /// Run the base loan across a band of monthly correction rates
    pub fn run_correction_scenarios(
        &self,
        correction_rates: &[f64],
    ) -> Result<Vec<(f64, SimulationResult)>, SimulationError> {
        correction_rates
            .iter()
            .map(|&rate| {
                let mut params = self.base.clone();
                params.monthly_correction_rate = rate;
                Ok((rate, simulate(&params)?))
            })
            .collect()
    }

    /// Get reference to the base parameters for inspection
    pub fn params(&self) -> &LoanParameters {
        &self.base
    }

    /// Get mutable reference to the base parameters for customization
    pub fn params_mut(&mut self) -> &mut LoanParameters {
        &mut self.base
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new(LoanParameters::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_runner() -> ScenarioRunner {
        ScenarioRunner::new(LoanParameters::new(200_000.0, 240, 10.0, 0.0, 100.0))
    }

    #[test]
    fn test_rate_scenarios_order_total_cost() {
        let runner = test_runner();
        let results = runner.run_rate_scenarios(&[8.0, 10.0, 12.0]).unwrap();

        assert_eq!(results.len(), 3);

        // A higher contract rate must cost more under both systems
        assert!(results[2].1.sac.summary.total_paid > results[0].1.sac.summary.total_paid);
        assert!(results[2].1.price.summary.total_paid > results[0].1.price.summary.total_paid);
    }

    #[test]
    fn test_correction_scenarios_accrue_more_correction() {
        let runner = test_runner();
        let results = runner.run_correction_scenarios(&[0.0, 0.4, 0.8]).unwrap();

        assert_eq!(results[0].1.sac.summary.total_correction, 0.0);
        assert!(
            results[2].1.sac.summary.total_correction
                > results[1].1.sac.summary.total_correction
        );
    }

    #[test]
    fn test_overrides_leave_base_untouched() {
        let runner = test_runner();
        runner.run_with_annual_rate(15.0).unwrap();

        assert_eq!(runner.params().annual_interest_rate, 10.0);
    }
}
