// ─────────────────────────────────────────────────────────────────────
// CPG Kernel — Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all CPG kernel failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CpgError {
    /// Invalid configuration value (time step, gains, table entries).
    #[error("config error: {0}")]
    Config(String),

    /// A per-joint vector or matrix does not match the oscillator count.
    #[error("shape error: {field} has length {actual}, expected {expected}")]
    Shape {
        field: String,
        expected: usize,
        actual: usize,
    },

    /// Joint index outside `[0, N)`.
    #[error("invalid joint: index {index} out of range for {count} oscillators")]
    InvalidJoint { index: usize, count: usize },

    /// Numerical error (NaN/Inf in network state).
    #[error("numerical error: {0}")]
    Numerical(String),
}

pub type CpgResult<T> = Result<T, CpgError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_message() {
        let err = CpgError::Shape {
            field: "coupling_weights[11]".into(),
            expected: 16,
            actual: 17,
        };
        assert_eq!(
            err.to_string(),
            "shape error: coupling_weights[11] has length 17, expected 16"
        );
    }

    #[test]
    fn test_invalid_joint_message() {
        let err = CpgError::InvalidJoint { index: 16, count: 16 };
        assert!(err.to_string().contains("index 16"));
    }
}
