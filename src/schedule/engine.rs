//! Schedule generation engine
//!
//! Builds the month-by-month amortization schedule for a loan under
//! either system. Each month applies monetary correction to the live
//! balance first, accrues interest on the corrected balance, then
//! derives the amortization from the system's rule. Deriving from the
//! live balance every month keeps both systems exact under correction
//! instead of drifting from a precomputed table.

use crate::error::SimulationError;
use crate::loan::LoanParameters;
use crate::schedule::cet::solve_effective_rate;
use crate::schedule::entries::{
    AmortizationSystem, PeriodEntry, ScheduleSummary, SimulationResult, SystemResult,
};
use crate::schedule::state::ScheduleState;

/// Run both amortization systems for one set of loan parameters
pub fn simulate(params: &LoanParameters) -> Result<SimulationResult, SimulationError> {
    let sac = simulate_system(params, AmortizationSystem::Sac)?;
    let price = simulate_system(params, AmortizationSystem::Price)?;
    Ok(SimulationResult { sac, price })
}

/// Run a single amortization system for one set of loan parameters
pub fn simulate_system(
    params: &LoanParameters,
    system: AmortizationSystem,
) -> Result<SystemResult, SimulationError> {
    params.validate()?;

    let (entries, state) = build_entries(params, system);

    let payments: Vec<f64> = entries.iter().map(|entry| entry.total_payment).collect();
    let effective = solve_effective_rate(params.principal, &payments)?;

    let summary = ScheduleSummary {
        loan_amount: params.principal,
        first_payment: entries.first().map(|e| e.total_payment).unwrap_or(0.0),
        last_payment: entries.last().map(|e| e.total_payment).unwrap_or(0.0),
        total_interest: state.total_interest,
        total_amortization: state.total_amortization,
        total_correction: state.total_correction,
        total_fees: params.monthly_fees * params.term_months as f64,
        total_paid: state.total_paid,
        cet_monthly_pct: effective.monthly_pct,
        cet_annual_pct: effective.annual_pct,
        cet_converged: effective.converged,
    };

    Ok(SystemResult {
        system,
        entries,
        summary,
    })
}

/// Build the full schedule and the accumulated totals for one system
fn build_entries(
    params: &LoanParameters,
    system: AmortizationSystem,
) -> (Vec<PeriodEntry>, ScheduleState) {
    let monthly_rate = params.monthly_interest_rate();
    let correction_rate = params.monthly_correction_fraction();
    let term = params.term_months;

    let mut state = ScheduleState::new(params.principal);
    let mut entries = Vec::with_capacity(term as usize);

    for month in 1..=term {
        let opening_balance = state.balance;
        let correction = opening_balance * correction_rate;
        let corrected = opening_balance + correction;
        let interest = corrected * monthly_rate;
        let remaining = term - month + 1;

        let amortization = match system {
            AmortizationSystem::Sac => {
                if month == term {
                    corrected
                } else {
                    corrected / remaining as f64
                }
            }
            AmortizationSystem::Price => {
                let payment = annuity_payment(corrected, monthly_rate, remaining);
                let amortization = payment - interest;
                // The final month, or any month where the annuity share
                // would overshoot, settles the whole remaining balance.
                if month == term || amortization >= corrected {
                    corrected
                } else {
                    amortization
                }
            }
        };

        let total_payment = amortization + interest + params.monthly_fees;
        let closing_balance = (corrected - amortization).max(0.0);

        let entry = PeriodEntry {
            month,
            opening_balance,
            correction,
            interest,
            amortization,
            fees: params.monthly_fees,
            total_payment,
            closing_balance,
        };
        state.record(&entry);
        entries.push(entry);
    }

    (entries, state)
}

/// Level payment that settles the balance over the remaining months.
/// At a zero rate the annuity formula degenerates and the level payment
/// is the straight division of the balance.
fn annuity_payment(balance: f64, monthly_rate: f64, remaining_months: u32) -> f64 {
    if remaining_months == 0 {
        return 0.0;
    }
    if monthly_rate == 0.0 {
        return balance / remaining_months as f64;
    }
    let factor = (1.0 + monthly_rate).powi(remaining_months as i32);
    balance * (monthly_rate * factor) / (factor - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn base_params() -> LoanParameters {
        LoanParameters::new(300_000.0, 360, 9.5, 0.0, 150.0)
    }

    #[test]
    fn test_schedules_cover_full_term_and_retire_balance() {
        let result = simulate(&base_params()).unwrap();

        for system in result.systems() {
            assert_eq!(system.entries.len(), 360);
            assert_eq!(system.entries.first().unwrap().month, 1);
            assert_eq!(system.entries.last().unwrap().month, 360);
            assert_eq!(system.entries.last().unwrap().closing_balance, 0.0);
        }
    }

    #[test]
    fn test_balances_chain_and_decrease_without_correction() {
        let result = simulate(&base_params()).unwrap();

        for system in result.systems() {
            assert_relative_eq!(system.entries[0].opening_balance, 300_000.0);
            for pair in system.entries.windows(2) {
                assert_eq!(pair[1].opening_balance, pair[0].closing_balance);
            }
            for entry in &system.entries {
                assert!(entry.closing_balance < entry.opening_balance);
            }
        }
    }

    #[test]
    fn test_amortization_returns_principal_plus_correction() {
        let mut params = base_params();
        params.monthly_correction_rate = 0.5;
        let result = simulate(&params).unwrap();

        for system in result.systems() {
            let amortized: f64 = system.entries.iter().map(|e| e.amortization).sum();
            let corrected: f64 = system.entries.iter().map(|e| e.correction).sum();
            assert_relative_eq!(amortized, 300_000.0 + corrected, epsilon = 1e-5);
            assert!(corrected > 0.0);
            assert_eq!(system.entries.last().unwrap().closing_balance, 0.0);
        }
    }

    #[test]
    fn test_sac_payments_never_increase() {
        let result = simulate_system(&base_params(), AmortizationSystem::Sac).unwrap();

        for pair in result.entries.windows(2) {
            assert!(pair[1].total_payment <= pair[0].total_payment + 1e-9);
        }
        assert!(result.summary.first_payment > result.summary.last_payment);
    }

    #[test]
    fn test_price_payments_stay_level() {
        let result = simulate_system(&base_params(), AmortizationSystem::Price).unwrap();

        let first = result.entries[0].total_payment;
        for entry in &result.entries {
            assert_relative_eq!(entry.total_payment, first, epsilon = 1e-6);
        }
        assert_relative_eq!(
            result.summary.first_payment,
            result.summary.last_payment,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_default_scenario_summary_figures() {
        let result = simulate(&base_params()).unwrap();

        // SAC: level amortization of 833.33 plus first-month interest of
        // 2375.00 plus fees. Total interest has the closed form
        // r * P * (n + 1) / 2 when there is no correction.
        assert_relative_eq!(result.sac.summary.first_payment, 3358.3333333333, epsilon = 1e-6);
        assert_relative_eq!(result.sac.summary.total_interest, 428_687.5, epsilon = 1e-3);
        assert_relative_eq!(result.sac.summary.total_paid, 782_687.5, epsilon = 1e-3);
        assert_relative_eq!(result.sac.summary.total_fees, 54_000.0);

        assert!(result.sac.summary.first_payment > result.price.summary.first_payment);
        assert!(result.sac.summary.last_payment < result.price.summary.last_payment);
        assert!(result.sac.summary.total_interest < result.price.summary.total_interest);
        assert!(result.sac.summary.total_paid < result.price.summary.total_paid);
    }

    #[test]
    fn test_effective_rate_matches_nominal_without_fees() {
        let params = LoanParameters::new(300_000.0, 360, 9.5, 0.0, 0.0);
        let result = simulate(&params).unwrap();

        let nominal_monthly_pct = 9.5 / 12.0;
        for system in result.systems() {
            assert!(system.summary.cet_converged);
            assert_relative_eq!(
                system.summary.cet_monthly_pct,
                nominal_monthly_pct,
                epsilon = 1e-4
            );
        }
        assert!(result.sac.summary.cet_annual_pct > 9.5);
    }

    #[test]
    fn test_fees_push_effective_rate_above_nominal() {
        let result = simulate(&base_params()).unwrap();

        let nominal_monthly_pct = 9.5 / 12.0;
        for system in result.systems() {
            assert!(system.summary.cet_converged);
            assert!(system.summary.cet_monthly_pct > nominal_monthly_pct);
        }
    }

    #[test]
    fn test_single_month_term_settles_in_one_payment() {
        let params = LoanParameters::new(10_000.0, 1, 12.0, 0.0, 50.0);
        let result = simulate(&params).unwrap();

        for system in result.systems() {
            assert_eq!(system.entries.len(), 1);
            let entry = &system.entries[0];
            assert_relative_eq!(entry.amortization, 10_000.0);
            assert_relative_eq!(entry.interest, 100.0);
            assert_relative_eq!(entry.total_payment, 10_150.0);
            assert_eq!(entry.closing_balance, 0.0);
        }
    }

    #[test]
    fn test_zero_interest_rate_splits_principal_evenly() {
        let params = LoanParameters::new(1200.0, 12, 0.0, 0.0, 0.0);
        let result = simulate(&params).unwrap();

        for system in result.systems() {
            for entry in &system.entries {
                assert_relative_eq!(entry.amortization, 100.0, epsilon = 1e-9);
                assert_relative_eq!(entry.interest, 0.0);
            }
            assert_relative_eq!(system.summary.cet_monthly_pct, 0.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_correction_raises_price_payments_over_time() {
        let mut params = base_params();
        params.monthly_correction_rate = 0.5;
        let result = simulate_system(&params, AmortizationSystem::Price).unwrap();

        assert!(result.summary.last_payment > result.summary.first_payment);
        assert!(result.summary.total_correction > 0.0);
        assert_eq!(result.entries.last().unwrap().closing_balance, 0.0);
    }

    #[test]
    fn test_negative_correction_still_retires_balance() {
        let mut params = base_params();
        params.monthly_correction_rate = -0.2;
        let result = simulate(&params).unwrap();

        for system in result.systems() {
            let amortized: f64 = system.entries.iter().map(|e| e.amortization).sum();
            let corrected: f64 = system.entries.iter().map(|e| e.correction).sum();
            assert!(corrected < 0.0);
            assert_relative_eq!(amortized, 300_000.0 + corrected, epsilon = 1e-5);
            assert_eq!(system.entries.last().unwrap().closing_balance, 0.0);
        }
    }

    #[test]
    fn test_invalid_parameters_are_rejected() {
        let mut params = base_params();
        params.principal = 0.0;
        assert!(matches!(
            simulate(&params),
            Err(SimulationError::InvalidParameter { name: "principal", .. })
        ));

        let mut params = base_params();
        params.term_months = 0;
        assert!(simulate(&params).is_err());
    }
}
