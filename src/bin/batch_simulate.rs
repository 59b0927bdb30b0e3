//! Run simulations for every scenario in a loan CSV
//!
//! Outputs one summary row per scenario and system for side-by-side
//! comparison in a spreadsheet. The input path defaults to
//! loan_scenarios.csv and can be overridden by the first argument.

use loan_simulator::loan::load_scenarios;
use loan_simulator::{simulate, SimulationResult};
use rayon::prelude::*;
use std::env;
use std::fs::File;
use std::io::Write;
use std::time::Instant;

fn main() {
    env_logger::init();

    let start = Instant::now();
    let input_path = env::args()
        .nth(1)
        .unwrap_or_else(|| "loan_scenarios.csv".to_string());

    println!("Loading scenarios from {}...", input_path);
    let scenarios = load_scenarios(&input_path).expect("Failed to load scenarios");
    println!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    println!("Running simulations...");
    let sim_start = Instant::now();

    // Run scenarios in parallel, keeping input order
    let results: Vec<(String, SimulationResult)> = scenarios
        .par_iter()
        .map(|scenario| {
            let result = simulate(&scenario.params).expect("simulation failed");
            (scenario.label.clone(), result)
        })
        .collect();

    println!("Simulations complete in {:?}", sim_start.elapsed());

    // Write output
    let output_path = "loan_comparison_output.csv";
    let mut file = File::create(output_path).expect("Failed to create output file");

    writeln!(file, "Label,System,Principal,TermMonths,AnnualRate,FirstPayment,LastPayment,TotalInterest,TotalCorrection,TotalFees,TotalPaid,CetMonthlyPct,CetAnnualPct").unwrap();

    for ((label, result), scenario) in results.iter().zip(&scenarios) {
        for system in result.systems() {
            let summary = &system.summary;
            writeln!(
                file,
                "{},{},{:.2},{},{:.4},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.6},{:.6}",
                label,
                system.system.as_str(),
                scenario.params.principal,
                scenario.params.term_months,
                scenario.params.annual_interest_rate,
                summary.first_payment,
                summary.last_payment,
                summary.total_interest,
                summary.total_correction,
                summary.total_fees,
                summary.total_paid,
                summary.cet_monthly_pct,
                summary.cet_annual_pct,
            )
            .unwrap();
        }
    }

    println!("Output written to {}", output_path);

    // Print comparison stats
    println!("\nBatch Summary:");
    for (label, result) in &results {
        let savings = result.price.summary.total_paid - result.sac.summary.total_paid;
        let cheaper = if savings >= 0.0 { "SAC" } else { "PRICE" };
        println!(
            "  {:<24} SAC ${:>14.2}  PRICE ${:>14.2}  cheaper: {} by ${:.2}",
            label,
            result.sac.summary.total_paid,
            result.price.summary.total_paid,
            cheaper,
            savings.abs(),
        );
    }

    println!("\nTotal time: {:?}", start.elapsed());
}
