//! Effective rate conversions between annual and monthly quotes
//!
//! These are the compounding conversions offered by the rate converter in
//! the front end. They are distinct from [`crate::LoanParameters::monthly_interest_rate`],
//! which follows the simple-division convention the schedules are quoted in.

/// Convert an effective annual rate to the equivalent effective monthly
/// rate, both in percent: `(1 + a)^(1/12) - 1`.
pub fn annual_to_monthly_rate(annual_pct: f64) -> f64 {
    ((1.0 + annual_pct / 100.0).powf(1.0 / 12.0) - 1.0) * 100.0
}

/// Convert an effective monthly rate to the equivalent effective annual
/// rate, both in percent: `(1 + m)^12 - 1`.
pub fn monthly_to_annual_rate(monthly_pct: f64) -> f64 {
    ((1.0 + monthly_pct / 100.0).powi(12) - 1.0) * 100.0
}
