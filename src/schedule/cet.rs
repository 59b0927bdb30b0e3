//! Effective total cost solver
//!
//! The CET is the internal rate of return of the borrower's cash flows:
//! the principal received at month zero against every payment made over
//! the term, fees included. The solve uses Newton-Raphson on the net
//! present value with an analytic derivative.

use crate::error::SimulationError;

/// Solved effective rate for one schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveRate {
    /// Effective rate in percent per month.
    pub monthly_pct: f64,
    /// Effective rate in percent per year, compounded monthly.
    pub annual_pct: f64,
    /// False when the iteration cap was hit before the step shrank
    /// below tolerance. The last iterate is still reported.
    pub converged: bool,
}

/// Solve the effective monthly rate that prices the payment stream
/// back to the principal.
///
/// Returns `SolverDivergence` when an iteration produces a flat or
/// non-finite derivative, which leaves Newton with no usable step.
pub fn solve_effective_rate(
    principal: f64,
    payments: &[f64],
) -> Result<EffectiveRate, SimulationError> {
    if payments.is_empty() {
        return Err(SimulationError::invalid_parameter(
            "payments",
            "schedule has no payments to discount",
        ));
    }

    let mut cash_flows = Vec::with_capacity(payments.len() + 1);
    cash_flows.push(-principal);
    cash_flows.extend_from_slice(payments);

    let tolerance = 1e-7;
    let max_iterations: u32 = 20;

    let mut rate: f64 = 0.01;
    let mut converged = false;

    for iteration in 0..max_iterations {
        let (npv, derivative) = npv_and_derivative(&cash_flows, rate);
        if derivative == 0.0 || !derivative.is_finite() {
            return Err(SimulationError::SolverDivergence {
                iterations: iteration,
            });
        }

        let next = rate - npv / derivative;
        if !next.is_finite() {
            return Err(SimulationError::SolverDivergence {
                iterations: iteration,
            });
        }

        let step = (next - rate).abs();
        rate = next;
        if step < tolerance {
            converged = true;
            break;
        }
    }

    Ok(EffectiveRate {
        monthly_pct: rate * 100.0,
        annual_pct: ((1.0 + rate).powi(12) - 1.0) * 100.0,
        converged,
    })
}

/// Net present value of the cash flows at the given monthly rate,
/// together with its derivative with respect to the rate.
fn npv_and_derivative(cash_flows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut derivative = 0.0;

    for (t, cash_flow) in cash_flows.iter().enumerate() {
        let discount = (1.0 + rate).powi(t as i32);
        npv += cash_flow / discount;
        if t > 0 {
            derivative -= t as f64 * cash_flow / (discount * (1.0 + rate));
        }
    }

    (npv, derivative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn level_payments(principal: f64, monthly_rate: f64, months: u32) -> Vec<f64> {
        let factor = (1.0 + monthly_rate).powi(months as i32);
        let payment = principal * (monthly_rate * factor) / (factor - 1.0);
        vec![payment; months as usize]
    }

    #[test]
    fn test_recovers_annuity_rate() {
        let payments = level_payments(1000.0, 0.01, 12);
        let rate = solve_effective_rate(1000.0, &payments).unwrap();

        assert!(rate.converged);
        assert_relative_eq!(rate.monthly_pct, 1.0, epsilon = 1e-4);
        assert_relative_eq!(rate.annual_pct, 12.682503013196972, epsilon = 1e-3);
    }

    #[test]
    fn test_recovers_rate_far_from_initial_guess() {
        let payments = level_payments(50_000.0, 0.02, 24);
        let rate = solve_effective_rate(50_000.0, &payments).unwrap();

        assert!(rate.converged);
        assert_relative_eq!(rate.monthly_pct, 2.0, epsilon = 1e-4);
    }

    #[test]
    fn test_fees_raise_effective_rate_above_nominal() {
        let mut payments = level_payments(10_000.0, 0.015, 36);
        for payment in payments.iter_mut() {
            *payment += 25.0;
        }
        let rate = solve_effective_rate(10_000.0, &payments).unwrap();

        assert!(rate.converged);
        assert!(rate.monthly_pct > 1.5);
    }

    #[test]
    fn test_iteration_cap_reports_unconverged_estimate() {
        // A lone payment of a million times the principal puts the root
        // near +1e6 per month. Each Newton step only doubles the iterate,
        // so the cap lands first and the last estimate stands.
        let rate = solve_effective_rate(1.0, &[1_000_000.0]).unwrap();

        assert!(!rate.converged);
        assert!(rate.monthly_pct.is_finite());
        assert!(rate.annual_pct.is_finite());
        assert!(rate.monthly_pct > 0.0);
    }

    #[test]
    fn test_zero_payments_report_divergence() {
        let err = solve_effective_rate(1000.0, &[0.0, 0.0, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::SolverDivergence { iterations: 0 }
        ));
    }

    #[test]
    fn test_unrecoverable_stream_reports_divergence() {
        // A single payment of half the principal puts the root at -50%
        // per month, outside Newton's basin from the standard guess.
        let err = solve_effective_rate(1000.0, &[500.0]).unwrap_err();
        assert!(matches!(err, SimulationError::SolverDivergence { .. }));
    }

    #[test]
    fn test_empty_payments_rejected() {
        let err = solve_effective_rate(1000.0, &[]).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::InvalidParameter { name: "payments", .. }
        ));
    }
}
