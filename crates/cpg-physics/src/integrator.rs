// ─────────────────────────────────────────────────────────────────────
// CPG Kernel — Amplitude Integrator
// ─────────────────────────────────────────────────────────────────────
//! Fixed-step explicit integrator for a single scalar state driven
//! towards a target value:
//!
//!   exponential:       ẋ = a (R − x)
//!   critically damped: ẍ = 4 (R − x) − 3 ẋ
//!   second order:      ẍ = a (a/4 (R − x) − ẋ)
//!   hopf:              ẋ = a (R − x²) x
//!   cubic:             ẋ = a (R − x)³
//!
//! Second-order forms integrate ẋ before x (semi-implicit Euler).

use serde::{Deserialize, Serialize};

use cpg_types::AmplitudeScheme;

/// Single-state ODE with gain `a`, target `R`, and step `dt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmplitudeIntegrator {
    pub gain: f64,
    pub target: f64,
    pub dt: f64,
    pub scheme: AmplitudeScheme,
    pos: f64,
    /// First derivative ẋ from the last step.
    dy_1: f64,
    /// Second derivative ẍ from the last step (second-order forms only).
    dy_2: f64,
}

impl AmplitudeIntegrator {
    /// Exponential-approach integrator starting at `pos`.
    pub fn new(gain: f64, target: f64, dt: f64, pos: f64) -> Self {
        Self::with_scheme(gain, target, dt, pos, AmplitudeScheme::Exponential)
    }

    pub fn with_scheme(
        gain: f64,
        target: f64,
        dt: f64,
        pos: f64,
        scheme: AmplitudeScheme,
    ) -> Self {
        Self {
            gain,
            target,
            dt,
            scheme,
            pos,
            dy_1: 0.0,
            dy_2: 0.0,
        }
    }

    /// Advance one step and return the new value.
    pub fn step(&mut self) -> f64 {
        let a = self.gain;
        let err = self.target - self.pos;
        match self.scheme {
            AmplitudeScheme::Exponential => {
                self.dy_1 = a * err;
            }
            AmplitudeScheme::CriticallyDamped => {
                self.dy_2 = 4.0 * err - 3.0 * self.dy_1;
                self.dy_1 += self.dy_2 * self.dt;
            }
            AmplitudeScheme::SecondOrder => {
                self.dy_2 = a * (a / 4.0 * err - self.dy_1);
                self.dy_1 += self.dy_2 * self.dt;
            }
            AmplitudeScheme::Hopf => {
                self.dy_1 = a * (self.target - self.pos * self.pos) * self.pos;
            }
            AmplitudeScheme::Cubic => {
                self.dy_1 = a * err.powi(3);
            }
        }
        self.pos += self.dy_1 * self.dt;
        self.pos
    }

    /// Run `n` steps, returning the final value.
    pub fn run(&mut self, n: usize) -> f64 {
        for _ in 0..n {
            self.step();
        }
        self.pos
    }

    #[inline]
    pub fn pos(&self) -> f64 {
        self.pos
    }

    #[inline]
    pub fn derivative(&self) -> f64 {
        self.dy_1
    }

    #[inline]
    pub fn second_derivative(&self) -> f64 {
        self.dy_2
    }

    /// Overwrite the state, e.g. to inject a disturbance.
    /// Derivatives are cleared.
    pub fn set_pos(&mut self, pos: f64) {
        self.pos = pos;
        self.dy_1 = 0.0;
        self.dy_2 = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1.0 / 60.0;

    #[test]
    fn test_exponential_single_step() {
        let mut amp = AmplitudeIntegrator::new(20.0, 1.0, DT, 0.0);
        let x = amp.step();
        // ẋ = 20·(1 − 0) = 20, x = 20/60
        assert!((amp.derivative() - 20.0).abs() < 1e-12);
        assert!((x - 1.0 / 3.0).abs() < 1e-12, "x={x}");
    }

    #[test]
    fn test_exponential_geometric_error() {
        // Error shrinks by (1 − a·dt) each step.
        let mut amp = AmplitudeIntegrator::new(10.0, 2.0, DT, 0.0);
        let ratio = 1.0 - 10.0 * DT;
        for k in 1..=20 {
            let x = amp.step();
            let expected = 2.0 - 2.0 * ratio.powi(k);
            assert!((x - expected).abs() < 1e-9, "step {k}: {x} vs {expected}");
        }
    }

    #[test]
    fn test_exponential_converges() {
        let mut amp = AmplitudeIntegrator::new(20.0, 0.175, DT, 0.0);
        let x = amp.run(300);
        assert!((x - 0.175).abs() < 1e-9, "x={x}");
    }

    #[test]
    fn test_zero_gain_holds() {
        let mut amp = AmplitudeIntegrator::new(0.0, 5.0, DT, 0.3);
        assert_eq!(amp.run(50), 0.3);
    }

    #[test]
    fn test_disturbance_recovery() {
        let mut amp = AmplitudeIntegrator::new(10.0, 2.0, DT, 0.0);
        amp.run(500);
        amp.set_pos(1.0);
        assert_eq!(amp.derivative(), 0.0);
        let x = amp.run(300);
        assert!((x - 2.0).abs() < 1e-6, "x={x}");
    }

    #[test]
    fn test_critically_damped_converges() {
        let mut amp =
            AmplitudeIntegrator::with_scheme(20.0, 1.0, DT, 0.0, AmplitudeScheme::CriticallyDamped);
        let first = amp.step();
        // ẍ = 4, ẋ = 4/60, x = 4/3600
        assert!((first - 4.0 / 3600.0).abs() < 1e-12, "x={first}");
        let x = amp.run(3000);
        assert!((x - 1.0).abs() < 1e-3, "x={x}");
    }

    #[test]
    fn test_second_order_converges() {
        let mut amp =
            AmplitudeIntegrator::with_scheme(20.0, 0.5, DT, 0.0, AmplitudeScheme::SecondOrder);
        let x = amp.run(600);
        assert!((x - 0.5).abs() < 1e-4, "x={x}");
    }

    #[test]
    fn test_hopf_converges_to_sqrt_target() {
        let mut amp = AmplitudeIntegrator::with_scheme(5.0, 0.25, DT, 0.1, AmplitudeScheme::Hopf);
        let x = amp.run(1000);
        assert!((x - 0.5).abs() < 1e-6, "x={x}");
    }

    #[test]
    fn test_hopf_zero_is_fixed_point() {
        let mut amp = AmplitudeIntegrator::with_scheme(5.0, 0.25, DT, 0.0, AmplitudeScheme::Hopf);
        assert_eq!(amp.run(100), 0.0);
    }

    #[test]
    fn test_cubic_monotone_approach() {
        let mut amp = AmplitudeIntegrator::with_scheme(20.0, 1.0, DT, 0.0, AmplitudeScheme::Cubic);
        let mut prev = 0.0;
        for _ in 0..400 {
            let x = amp.step();
            assert!(x >= prev && x <= 1.0, "x={x} prev={prev}");
            prev = x;
        }
        assert!(prev > 0.8, "x={prev}");
    }
}
