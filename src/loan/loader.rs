//! Load labeled loan scenarios from CSV for batch comparisons

use super::LoanParameters;
use csv::Reader;
use std::error::Error;
use std::path::Path;

/// A labeled parameter set, one row of a scenario CSV.
#[derive(Debug, Clone)]
pub struct LoanScenario {
    /// Human-readable scenario name carried through to batch output.
    pub label: String,
    /// Parameters simulated for this scenario.
    pub params: LoanParameters,
}

/// Raw CSV row matching the scenario file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Label")]
    label: String,
    #[serde(rename = "Principal")]
    principal: f64,
    #[serde(rename = "TermMonths")]
    term_months: u32,
    #[serde(rename = "AnnualInterestRate")]
    annual_interest_rate: f64,
    #[serde(rename = "MonthlyCorrectionRate")]
    monthly_correction_rate: f64,
    #[serde(rename = "MonthlyFees")]
    monthly_fees: f64,
}

impl CsvRow {
    fn to_scenario(&self) -> Result<LoanScenario, Box<dyn Error>> {
        let params = LoanParameters::new(
            self.principal,
            self.term_months,
            self.annual_interest_rate,
            self.monthly_correction_rate,
            self.monthly_fees,
        );
        params.validate()?;

        Ok(LoanScenario {
            label: self.label.clone(),
            params,
        })
    }
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<LoanScenario>, Box<dyn Error>> {
    let path = path.as_ref();
    let mut reader = Reader::from_path(path)?;
    let mut scenarios = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(row.to_scenario()?);
    }

    log::debug!("loaded {} scenarios from {}", scenarios.len(), path.display());
    Ok(scenarios)
}

/// Load scenarios from any reader (e.g., string buffer, network stream)
pub fn load_scenarios_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<LoanScenario>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut scenarios = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(row.to_scenario()?);
    }

    Ok(scenarios)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Label,Principal,TermMonths,AnnualInterestRate,MonthlyCorrectionRate,MonthlyFees
baseline,300000,360,9.5,0,150
short-term,120000,120,10.25,0,80
with-tr,250000,300,8.9,0.15,120
";

    #[test]
    fn test_load_scenarios_from_reader() {
        let scenarios = load_scenarios_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(scenarios.len(), 3);

        assert_eq!(scenarios[0].label, "baseline");
        assert_eq!(scenarios[0].params.principal, 300_000.0);
        assert_eq!(scenarios[0].params.term_months, 360);

        assert_eq!(scenarios[2].params.monthly_correction_rate, 0.15);
    }

    #[test]
    fn test_invalid_row_is_rejected() {
        let csv = "\
Label,Principal,TermMonths,AnnualInterestRate,MonthlyCorrectionRate,MonthlyFees
broken,300000,0,9.5,0,150
";
        assert!(load_scenarios_from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_malformed_field_is_rejected() {
        let csv = "\
Label,Principal,TermMonths,AnnualInterestRate,MonthlyCorrectionRate,MonthlyFees
broken,not-a-number,360,9.5,0,150
";
        assert!(load_scenarios_from_reader(csv.as_bytes()).is_err());
    }
}
