//! Loan Simulator CLI
//!
//! Command-line interface for comparing SAC and PRICE schedules

use anyhow::Context;
use clap::Parser;
use loan_simulator::{simulate, LoanParameters, PeriodEntry, SimulationResult, SystemResult};
use std::fs::File;
use std::io::Write;

/// Compare SAC and PRICE amortization schedules for one loan
#[derive(Parser, Debug)]
#[command(
    name = "loan_simulator",
    version,
    about = "Compare SAC and PRICE amortization schedules with CET estimation"
)]
struct Cli {
    /// Amount financed
    #[arg(long, default_value_t = 300_000.0)]
    principal: f64,

    /// Term in months
    #[arg(long, default_value_t = 360)]
    term_months: u32,

    /// Annual contract rate, percent
    #[arg(long, default_value_t = 9.5)]
    annual_rate: f64,

    /// Monthly monetary correction rate, percent
    #[arg(long, default_value_t = 0.0)]
    correction_rate: f64,

    /// Fixed monthly fees, currency units
    #[arg(long, default_value_t = 150.0)]
    monthly_fees: f64,

    /// Schedule rows to print per system
    #[arg(long, default_value_t = 12)]
    rows: usize,

    /// Path for the full schedule CSV export
    #[arg(long, default_value = "loan_schedules.csv")]
    csv_out: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let params = LoanParameters::new(
        cli.principal,
        cli.term_months,
        cli.annual_rate,
        cli.correction_rate,
        cli.monthly_fees,
    );

    println!("Loan Simulator v0.1.0");
    println!("=====================\n");

    println!("Loan: ${:.2} over {} months", params.principal, params.term_months);
    println!(
        "  Annual rate: {:.2}% ({:.4}% per month)",
        params.annual_interest_rate,
        params.monthly_interest_rate() * 100.0
    );
    println!(
        "  Correction: {:.2}% per month, Fees: ${:.2} per month\n",
        params.monthly_correction_rate, params.monthly_fees
    );

    let result = simulate(&params)?;

    for system in result.systems() {
        print_system(system, cli.rows);
    }

    let difference = result.price.summary.total_paid - result.sac.summary.total_paid;
    if difference >= 0.0 {
        println!("SAC costs ${:.2} less than PRICE over the full term", difference);
    } else {
        println!("PRICE costs ${:.2} less than SAC over the full term", -difference);
    }

    // Print some key milestone months for side-by-side comparison
    println!("\nKey Milestones:");
    let milestones = [12, 60, 120, 180, 240, 300, 360];
    for &m in &milestones {
        if let (Some(sac_row), Some(price_row)) = (
            result.sac.entries.get(m - 1),
            result.price.entries.get(m - 1),
        ) {
            println!(
                "  Month {:>3}: SAC balance ${:>13.2} payment ${:>10.2} | PRICE balance ${:>13.2} payment ${:>10.2}",
                m,
                sac_row.closing_balance,
                sac_row.total_payment,
                price_row.closing_balance,
                price_row.total_payment,
            );
        }
    }

    write_schedules_csv(&cli.csv_out, &result)?;
    println!("\nFull schedules written to: {}", cli.csv_out);

    Ok(())
}

/// Print the head of one system's schedule, its settlement row, and totals
fn print_system(result: &SystemResult, rows: usize) {
    println!("{} schedule", result.system.as_str());
    println!("{}", "-".repeat(104));
    println!(
        "{:>5} {:>14} {:>12} {:>12} {:>14} {:>10} {:>14} {:>14}",
        "Month", "Opening", "Correction", "Interest", "Amortization", "Fees", "Payment", "Closing"
    );

    for entry in result.entries.iter().take(rows) {
        print_entry(entry);
    }
    if result.entries.len() > rows + 1 {
        println!("  ... ({} more months)", result.entries.len() - rows - 1);
    }
    if result.entries.len() > rows {
        if let Some(last) = result.entries.last() {
            print_entry(last);
        }
    }

    let summary = &result.summary;
    println!("\n  First payment:    ${:>14.2}", summary.first_payment);
    println!("  Last payment:     ${:>14.2}", summary.last_payment);
    println!("  Total interest:   ${:>14.2}", summary.total_interest);
    println!("  Total correction: ${:>14.2}", summary.total_correction);
    println!("  Total fees:       ${:>14.2}", summary.total_fees);
    println!("  Total paid:       ${:>14.2}", summary.total_paid);
    println!(
        "  CET: {:.4}% monthly / {:.2}% annual{}",
        summary.cet_monthly_pct,
        summary.cet_annual_pct,
        if summary.cet_converged { "" } else { " (did not converge)" }
    );
    println!();
}

fn print_entry(entry: &PeriodEntry) {
    println!(
        "{:>5} {:>14.2} {:>12.2} {:>12.2} {:>14.2} {:>10.2} {:>14.2} {:>14.2}",
        entry.month,
        entry.opening_balance,
        entry.correction,
        entry.interest,
        entry.amortization,
        entry.fees,
        entry.total_payment,
        entry.closing_balance,
    );
}

/// Write both full schedules to a single CSV keyed by system
fn write_schedules_csv(path: &str, result: &SimulationResult) -> anyhow::Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("unable to create CSV file {path}"))?;

    writeln!(
        file,
        "System,Month,OpeningBalance,Correction,Interest,Amortization,Fees,TotalPayment,ClosingBalance"
    )?;

    for system in result.systems() {
        for entry in &system.entries {
            writeln!(
                file,
                "{},{},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}",
                system.system.as_str(),
                entry.month,
                entry.opening_balance,
                entry.correction,
                entry.interest,
                entry.amortization,
                entry.fees,
                entry.total_payment,
                entry.closing_balance,
            )?;
        }
    }

    Ok(())
}
