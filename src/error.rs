//! Error types for simulation requests
//!
//! The engine assumes pre-validated input, so the taxonomy is narrow:
//! parameters that make a schedule impossible to build, and a CET solve
//! that produced a non-finite rate.

use thiserror::Error;

/// Errors returned by the simulation entry points.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// A loan parameter fails the engine's own preconditions.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Field name as it appears on [`crate::LoanParameters`].
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The effective-rate solve hit a zero derivative or a non-finite
    /// iterate. Plain non-convergence is NOT an error; the solver returns
    /// its best estimate with a cleared convergence flag instead.
    #[error("effective rate solve diverged after {iterations} iterations")]
    SolverDivergence {
        /// Iterations completed before the divergent update.
        iterations: u32,
    },
}

impl SimulationError {
    /// Creates an invalid-parameter error.
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display() {
        let err = SimulationError::invalid_parameter("term_months", "must be at least 1");
        assert_eq!(
            err.to_string(),
            "invalid parameter `term_months`: must be at least 1"
        );
    }

    #[test]
    fn test_divergence_display() {
        let err = SimulationError::SolverDivergence { iterations: 3 };
        assert!(err.to_string().contains("3 iterations"));
    }
}
