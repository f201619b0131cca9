// ─────────────────────────────────────────────────────────────────────
// CPG Kernel — Joint Oscillator
// ─────────────────────────────────────────────────────────────────────
//! Per-joint amplitude and offset dynamics: two amplitude integrators
//! (stance, swing) sharing gain a_r, and one offset integrator with
//! gain a_x.

use serde::{Deserialize, Serialize};

use cpg_types::AmplitudeScheme;

use crate::integrator::AmplitudeIntegrator;

/// Amplitude and offset state of one joint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointOscillator {
    pub amp_stance: AmplitudeIntegrator,
    pub amp_swing: AmplitudeIntegrator,
    pub offset: AmplitudeIntegrator,
    /// Offset value reported by the last `step_offset`; 0 before the first.
    offset_out: f64,
}

impl JointOscillator {
    /// Both amplitude integrators start at `r0`, the offset at `x0`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        dt: f64,
        a_r: f64,
        a_x: f64,
        r_stance: f64,
        r_swing: f64,
        x_target: f64,
        r0: f64,
        x0: f64,
    ) -> Self {
        Self::with_scheme(
            dt,
            a_r,
            a_x,
            r_stance,
            r_swing,
            x_target,
            r0,
            x0,
            AmplitudeScheme::Exponential,
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn with_scheme(
        dt: f64,
        a_r: f64,
        a_x: f64,
        r_stance: f64,
        r_swing: f64,
        x_target: f64,
        r0: f64,
        x0: f64,
        scheme: AmplitudeScheme,
    ) -> Self {
        Self {
            amp_stance: AmplitudeIntegrator::with_scheme(a_r, r_stance, dt, r0, scheme),
            amp_swing: AmplitudeIntegrator::with_scheme(a_r, r_swing, dt, r0, scheme),
            offset: AmplitudeIntegrator::with_scheme(a_x, x_target, dt, x0, scheme),
            offset_out: 0.0,
        }
    }

    /// Advance both amplitude integrators; returns `(r_stance, r_swing)`.
    pub fn step_r(&mut self) -> (f64, f64) {
        let st = self.amp_stance.step();
        let sw = self.amp_swing.step();
        (st, sw)
    }

    /// Advance the offset integrator and latch its output.
    pub fn step_offset(&mut self) -> f64 {
        self.offset_out = self.offset.step();
        self.offset_out
    }

    #[inline]
    pub fn offset_out(&self) -> f64 {
        self.offset_out
    }

    /// Current `(stance, swing)` amplitudes without stepping.
    #[inline]
    pub fn amplitudes(&self) -> (f64, f64) {
        (self.amp_stance.pos(), self.amp_swing.pos())
    }
}
