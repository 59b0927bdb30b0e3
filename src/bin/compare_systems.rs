//! Compare SAC and PRICE outcomes for one loan
//!
//! This binary runs both amortization systems and reports summaries plus
//! chart-ready balance series
//! Supports JSON output for API integration via --json flag
//! Accepts config via environment variables:
//!   PRINCIPAL, TERM_MONTHS, ANNUAL_RATE, MONTHLY_RATE, CORRECTION_RATE,
//!   MONTHLY_FEES, RATE_SWEEP, MAX_SERIES_POINTS
//! MONTHLY_RATE is an effective monthly percent and takes precedence over
//! ANNUAL_RATE when set

use loan_simulator::loan::rates;
use loan_simulator::{
    AmortizationSystem, LoanParameters, PeriodEntry, ScenarioRunner, ScheduleSummary,
    SystemResult,
};
use rayon::prelude::*;
use serde::Serialize;
use std::env;
use std::time::Instant;

#[derive(Serialize)]
struct ComparisonResponse {
    params: LoanParameters,
    generated_at: String,
    sac: SystemReport,
    price: SystemReport,
    savings_with_sac: f64,
    rate_sweep: Option<Vec<SweepPoint>>,
    execution_time_ms: u64,
}

#[derive(Serialize)]
struct SystemReport {
    system: AmortizationSystem,
    summary: ScheduleSummary,
    balance_series: Vec<SeriesPoint>,
}

#[derive(Serialize)]
struct SeriesPoint {
    month: u32,
    balance: f64,
    payment: f64,
}

#[derive(Serialize)]
struct SweepPoint {
    annual_rate_pct: f64,
    sac_total_paid: f64,
    price_total_paid: f64,
    sac_cet_annual_pct: f64,
    price_cet_annual_pct: f64,
}

/// Thin the schedule to roughly max_points rows for charting, always
/// keeping the final settlement row. Short schedules pass through whole
/// and a zero budget is treated as one point.
fn downsample_series(entries: &[PeriodEntry], max_points: usize) -> Vec<SeriesPoint> {
    let max_points = max_points.max(1);
    let sample_rate = if entries.len() > 60 {
        (entries.len() + max_points - 1) / max_points
    } else {
        1
    };

    entries
        .iter()
        .enumerate()
        .filter(|(i, _)| i % sample_rate == 0 || *i == entries.len() - 1)
        .map(|(_, entry)| SeriesPoint {
            month: entry.month,
            balance: entry.closing_balance,
            payment: entry.total_payment,
        })
        .collect()
}

fn system_report(result: &SystemResult, max_points: usize) -> SystemReport {
    SystemReport {
        system: result.system,
        summary: result.summary.clone(),
        balance_series: downsample_series(&result.entries, max_points),
    }
}

fn main() {
    env_logger::init();

    let json_output = env::args().any(|arg| arg == "--json");
    let start = Instant::now();

    // Read config from environment or use defaults
    let principal: f64 = env::var("PRINCIPAL")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(300_000.0);

    let term_months: u32 = env::var("TERM_MONTHS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(360);

    // MONTHLY_RATE wins over ANNUAL_RATE, converted through compounding
    let annual_rate: f64 = match env::var("MONTHLY_RATE").ok().and_then(|s| s.parse().ok()) {
        Some(monthly) => rates::monthly_to_annual_rate(monthly),
        None => env::var("ANNUAL_RATE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(9.5),
    };

    let correction_rate: f64 = env::var("CORRECTION_RATE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0.0);

    let monthly_fees: f64 = env::var("MONTHLY_FEES")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(150.0);

    let max_series_points: usize = env::var("MAX_SERIES_POINTS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(40);

    // Comma-separated annual rates to sweep in addition to the base run
    let rate_sweep: Option<Vec<f64>> = env::var("RATE_SWEEP")
        .ok()
        .map(|s| s.split(',').filter_map(|r| r.trim().parse().ok()).collect());

    let params = LoanParameters::new(
        principal,
        term_months,
        annual_rate,
        correction_rate,
        monthly_fees,
    );
    let runner = ScenarioRunner::new(params.clone());

    if !json_output {
        println!(
            "Simulating ${:.2} over {} months at {:.2}% per year...",
            principal, term_months, annual_rate
        );
    }

    let result = runner.run().expect("simulation failed");

    // Sweep alternative contract rates in parallel
    let sweep_points = rate_sweep.as_ref().map(|sweep_rates| {
        let sweep_start = Instant::now();
        let points: Vec<SweepPoint> = sweep_rates
            .par_iter()
            .map(|&rate| {
                let swept = runner
                    .run_with_annual_rate(rate)
                    .expect("rate scenario failed");
                SweepPoint {
                    annual_rate_pct: rate,
                    sac_total_paid: swept.sac.summary.total_paid,
                    price_total_paid: swept.price.summary.total_paid,
                    sac_cet_annual_pct: swept.sac.summary.cet_annual_pct,
                    price_cet_annual_pct: swept.price.summary.cet_annual_pct,
                }
            })
            .collect();

        if !json_output {
            println!("Swept {} rates in {:?}", points.len(), sweep_start.elapsed());
        }
        points
    });

    let savings_with_sac = result.price.summary.total_paid - result.sac.summary.total_paid;
    let execution_time_ms = start.elapsed().as_millis() as u64;

    if json_output {
        let response = ComparisonResponse {
            params,
            generated_at: chrono::Utc::now().to_rfc3339(),
            sac: system_report(&result.sac, max_series_points),
            price: system_report(&result.price, max_series_points),
            savings_with_sac,
            rate_sweep: sweep_points,
            execution_time_ms,
        };
        println!("{}", serde_json::to_string(&response).unwrap());
    } else {
        println!("\nPayment Summary:");
        for system in result.systems() {
            let summary = &system.summary;
            println!(
                "  {:<5} first ${:>12.2}  last ${:>12.2}  interest ${:>14.2}  total ${:>14.2}",
                system.system.as_str(),
                summary.first_payment,
                summary.last_payment,
                summary.total_interest,
                summary.total_paid,
            );
            println!(
                "        CET {:.4}% per month / {:.2}% per year{}",
                summary.cet_monthly_pct,
                summary.cet_annual_pct,
                if summary.cet_converged { "" } else { " (did not converge)" },
            );
        }

        println!("\n========================================");
        if savings_with_sac >= 0.0 {
            println!("  SAC SAVES: ${:.2}", savings_with_sac);
        } else {
            println!("  PRICE SAVES: ${:.2}", -savings_with_sac);
        }
        println!("========================================");

        if let Some(points) = &sweep_points {
            println!("\nRate sweep:");
            println!(
                "  {:>8} {:>16} {:>16} {:>10} {:>10}",
                "Rate", "SAC Total", "PRICE Total", "SAC CET", "PRICE CET"
            );
            for point in points {
                println!(
                    "  {:>7.2}% {:>16.2} {:>16.2} {:>9.2}% {:>9.2}%",
                    point.annual_rate_pct,
                    point.sac_total_paid,
                    point.price_total_paid,
                    point.sac_cet_annual_pct,
                    point.price_cet_annual_pct,
                );
            }
        }

        println!("\nTotal time: {:?}", start.elapsed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_simulator::simulate;

    fn long_schedule() -> Vec<PeriodEntry> {
        let params = LoanParameters::new(300_000.0, 360, 9.5, 0.0, 150.0);
        simulate(&params).unwrap().sac.entries
    }

    #[test]
    fn test_downsample_keeps_first_and_final_rows() {
        let entries = long_schedule();
        let series = downsample_series(&entries, 40);

        assert!(series.len() <= 41);
        assert_eq!(series.first().unwrap().month, 1);
        assert_eq!(series.last().unwrap().month, 360);
    }

    #[test]
    fn test_downsample_short_schedule_passes_through() {
        let params = LoanParameters::new(50_000.0, 48, 10.0, 0.0, 0.0);
        let entries = simulate(&params).unwrap().price.entries;
        let series = downsample_series(&entries, 40);

        assert_eq!(series.len(), 48);
    }

    #[test]
    fn test_downsample_treats_zero_budget_as_one_point() {
        let entries = long_schedule();
        let series = downsample_series(&entries, 0);

        assert!(!series.is_empty());
        assert_eq!(series.last().unwrap().month, 360);
    }
}
