// ─────────────────────────────────────────────────────────────────────
// CPG Kernel — Network State Snapshot
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{CpgError, CpgResult};

/// Copy of the observable network state after a completed step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkState {
    /// Number of completed steps.
    pub step_count: u64,
    /// Simulated time (s).
    pub t: f64,
    /// Oscillator phases φ (rad, unwrapped).
    pub phase: Vec<f64>,
    /// Stance/swing-blended amplitudes r_out (rad).
    pub amplitude: Vec<f64>,
    /// Integrated joint offsets (rad).
    pub offset: Vec<f64>,
    /// Joint setpoints θ (rad).
    pub setpoint: Vec<f64>,
}

impl NetworkState {
    pub fn len(&self) -> usize {
        self.setpoint.len()
    }

    pub fn is_empty(&self) -> bool {
        self.setpoint.is_empty()
    }

    /// First non-finite value, if any, as an error naming its location.
    pub fn check_finite(&self) -> CpgResult<()> {
        for (label, values) in [
            ("phase", &self.phase),
            ("amplitude", &self.amplitude),
            ("offset", &self.offset),
            ("setpoint", &self.setpoint),
        ] {
            if let Some(i) = values.iter().position(|v| !v.is_finite()) {
                log::warn!(
                    "non-finite {label}[{i}] = {} at step {}",
                    values[i],
                    self.step_count
                );
                return Err(CpgError::Numerical(format!(
                    "{label}[{i}] = {} at step {}",
                    values[i], self.step_count
                )));
            }
        }
        Ok(())
    }

    pub fn is_finite(&self) -> bool {
        [&self.phase, &self.amplitude, &self.offset, &self.setpoint]
            .iter()
            .all(|values| values.iter().all(|v| v.is_finite()))
    }
}
