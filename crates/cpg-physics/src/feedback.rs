// ─────────────────────────────────────────────────────────────────────
// CPG Kernel — Gait Phase Modulator
// ─────────────────────────────────────────────────────────────────────
//! Hip-phase feedback: per-leg stance/swing weight derived from the phase
//! of the leg's hip oscillator.
//!
//! With d1 = −sin φ and d2 = −cos φ:
//!
//!   d1 = 0:  w = 1 if d2 ≤ 0 else 0
//!   d1 ≠ 0:  w = (1 − sign d1) / 2
//!
//! so w = 1 (stance) on the half-cycle where sin φ > 0 and w = 0 (swing)
//! otherwise. The weight is a hard 0/1 gate even though it is consumed as
//! an interpolation factor.

use crate::topology::{reference_joints, N_LEGS};

/// Stance weight for a single (already offset) phase.
#[inline]
pub fn stance_weight(phi: f64) -> f64 {
    let d1 = -phi.sin();
    let d2 = -phi.cos();
    if d1 == 0.0 {
        if d2 <= 0.0 {
            1.0
        } else {
            0.0
        }
    } else {
        (-d1.signum() + 1.0) / 2.0
    }
}

/// Per-leg weights for an `n`-joint network.
#[derive(Debug, Clone, PartialEq)]
pub struct GaitPhaseModulator {
    references: [Option<usize>; N_LEGS],
}

impl GaitPhaseModulator {
    pub fn new(n: usize) -> Self {
        Self {
            references: reference_joints(n),
        }
    }

    /// Joint index feeding each leg's weight.
    pub fn references(&self) -> &[Option<usize>; N_LEGS] {
        &self.references
    }

    /// Stance/swing weight of each leg for the phase vector `phase`.
    ///
    /// A leg without a reference joint reads phase 0.
    pub fn weights(&self, phase: &[f64], phase_offset: f64) -> [f64; N_LEGS] {
        let mut w = [0.0; N_LEGS];
        self.weights_into(phase, phase_offset, &mut w);
        w
    }

    pub fn weights_into(&self, phase: &[f64], phase_offset: f64, out: &mut [f64; N_LEGS]) {
        for (w, reference) in out.iter_mut().zip(self.references.iter()) {
            let phi = reference.and_then(|j| phase.get(j).copied()).unwrap_or(0.0);
            *w = stance_weight(phi + phase_offset);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use super::*;

    #[test]
    fn test_zero_phase_is_stance() {
        // d1 = 0, d2 = −1
        assert_eq!(stance_weight(0.0), 1.0);
        assert_eq!(stance_weight(-0.0), 1.0);
    }

    #[test]
    fn test_half_cycles() {
        assert_eq!(stance_weight(FRAC_PI_2), 1.0);
        assert_eq!(stance_weight(0.1), 1.0);
        assert_eq!(stance_weight(PI - 0.1), 1.0);
        assert_eq!(stance_weight(PI + 0.1), 0.0);
        assert_eq!(stance_weight(3.0 * FRAC_PI_2), 0.0);
        assert_eq!(stance_weight(-0.1), 0.0);
    }

    #[test]
    fn test_unwrapped_phase() {
        let tau = std::f64::consts::TAU;
        assert_eq!(stance_weight(5.0 * tau + FRAC_PI_2), 1.0);
        assert_eq!(stance_weight(-3.0 * tau - FRAC_PI_2), 0.0);
    }

    #[test]
    fn test_binary_output() {
        for k in 0..1000 {
            let w = stance_weight(k as f64 * 0.0137 - 7.0);
            assert!(w == 0.0 || w == 1.0, "w={w}");
        }
    }

    #[test]
    fn test_all_zero_hips_give_stance() {
        let m = GaitPhaseModulator::new(16);
        assert_eq!(m.weights(&[0.0; 16], 0.0), [1.0; 4]);
    }

    #[test]
    fn test_reads_hip_indices_only() {
        let m = GaitPhaseModulator::new(16);
        let mut phase = vec![-FRAC_PI_2; 16];
        phase[8] = FRAC_PI_2;
        phase[9] = -FRAC_PI_2;
        phase[10] = FRAC_PI_2;
        phase[11] = -FRAC_PI_2;
        assert_eq!(m.weights(&phase, 0.0), [1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_phase_offset_shifts() {
        let m = GaitPhaseModulator::new(16);
        let phase = vec![FRAC_PI_2; 16];
        assert_eq!(m.weights(&phase, 0.0), [1.0; 4]);
        assert_eq!(m.weights(&phase, PI), [0.0; 4]);
    }

    #[test]
    fn test_missing_leg_reads_zero_phase() {
        let m = GaitPhaseModulator::new(2);
        assert_eq!(m.references(), &[None, None, Some(0), Some(1)]);
        let w = m.weights(&[-1.0, 1.0], 0.0);
        assert_eq!(w, [1.0, 1.0, 0.0, 1.0]);
    }
}
