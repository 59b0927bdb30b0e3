//! AWS Lambda handler for running loan simulations
//!
//! This Lambda function accepts loan parameters via JSON and returns both
//! amortization schedules with their summaries and CET figures.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use loan_simulator::loan::rates;
use loan_simulator::{simulate, LoanParameters, SimulationError, SystemResult};
use serde::{Deserialize, Serialize};

/// Input parameters for the simulation
#[derive(Debug, Deserialize)]
pub struct SimulationRequest {
    /// Amount financed (default: 300000)
    #[serde(default = "default_principal")]
    pub principal: f64,

    /// Term in months (default: 360)
    #[serde(default = "default_term_months")]
    pub term_months: u32,

    /// Annual contract rate in percent (default: 9.5)
    #[serde(default = "default_annual_rate")]
    pub annual_rate: f64,

    /// Effective monthly rate in percent, overrides annual_rate when set
    #[serde(default)]
    pub monthly_rate: Option<f64>,

    /// Monthly monetary correction rate in percent (default: 0)
    #[serde(default)]
    pub correction_rate: f64,

    /// Fixed monthly fees (default: 150)
    #[serde(default = "default_monthly_fees")]
    pub monthly_fees: f64,
}

fn default_principal() -> f64 { 300_000.0 }
fn default_term_months() -> u32 { 360 }
fn default_annual_rate() -> f64 { 9.5 }
fn default_monthly_fees() -> f64 { 150.0 }

/// Output from the simulation
#[derive(Debug, Serialize)]
pub struct SimulationResponse {
    pub params: LoanParameters,
    pub generated_at: String,
    pub sac: SystemResult,
    pub price: SystemResult,
    pub savings_with_sac: f64,
    pub execution_time_ms: u64,
}

fn error_response(status: u16, message: &str) -> Response<Body> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::Text(format!(r#"{{"error":"{}"}}"#, message)))
        .unwrap()
}

fn json_response(body: &SimulationResponse) -> Response<Body> {
    Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Body::Text(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(Response::builder()
            .status(200)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(Body::Empty)
            .unwrap());
    }

    // Parse request body
    let body = event.body();
    let body_str = match body {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: SimulationRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => {
            return Ok(error_response(400, &format!("Invalid JSON: {}", e)));
        }
    };

    // An effective monthly rate wins over the annual rate when both arrive
    let annual_rate = match request.monthly_rate {
        Some(monthly) => rates::monthly_to_annual_rate(monthly),
        None => request.annual_rate,
    };

    let params = LoanParameters::new(
        request.principal,
        request.term_months,
        annual_rate,
        request.correction_rate,
        request.monthly_fees,
    );

    let result = match simulate(&params) {
        Ok(r) => r,
        Err(e @ SimulationError::InvalidParameter { .. }) => {
            return Ok(error_response(422, &e.to_string()));
        }
        Err(e) => {
            return Ok(error_response(500, &e.to_string()));
        }
    };

    let savings_with_sac = result.price.summary.total_paid - result.sac.summary.total_paid;
    let execution_time_ms = start.elapsed().as_millis() as u64;

    let response = SimulationResponse {
        params,
        generated_at: chrono::Utc::now().to_rfc3339(),
        sac: result.sac,
        price: result.price,
        savings_with_sac,
        execution_time_ms,
    };

    Ok(json_response(&response))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
