// ─────────────────────────────────────────────────────────────────────
// CPG Kernel — Trajectory Recorder
// ─────────────────────────────────────────────────────────────────────
//! Per-joint time series of setpoints, amplitudes and phases over a run.

use serde::{Deserialize, Serialize};

use cpg_types::{CpgError, CpgResult};

use crate::network::OscillatorNetwork;

/// Recorded run, stored joint-major: `setpoints[j][k]` is joint `j` after
/// step `k + 1`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trajectory {
    pub time_step: f64,
    pub setpoints: Vec<Vec<f64>>,
    pub amplitudes: Vec<Vec<f64>>,
    pub phases: Vec<Vec<f64>>,
}

impl Trajectory {
    /// Step `network` `steps` times, recording after every step.
    pub fn record(network: &mut OscillatorNetwork, steps: usize) -> Self {
        let n = network.oscillator_count();
        let mut traj = Self {
            time_step: network.time_step(),
            setpoints: vec![Vec::with_capacity(steps); n],
            amplitudes: vec![Vec::with_capacity(steps); n],
            phases: vec![Vec::with_capacity(steps); n],
        };
        for _ in 0..steps {
            network.step();
            traj.push(network);
        }
        traj
    }

    fn push(&mut self, network: &OscillatorNetwork) {
        let series = [
            (&mut self.setpoints, network.setpoints()),
            (&mut self.amplitudes, network.amplitudes()),
            (&mut self.phases, network.phases()),
        ];
        for (dst, src) in series {
            for (d, &v) in dst.iter_mut().zip(src) {
                d.push(v);
            }
        }
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.setpoints.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn joint_setpoints(&self, joint: usize) -> CpgResult<&[f64]> {
        self.setpoints
            .get(joint)
            .map(Vec::as_slice)
            .ok_or(CpgError::InvalidJoint {
                index: joint,
                count: self.setpoints.len(),
            })
    }

    /// Time stamps (s) of the recorded samples.
    pub fn times(&self) -> Vec<f64> {
        (1..=self.len()).map(|k| k as f64 * self.time_step).collect()
    }

    /// Mean period, in steps, of joint `joint`'s setpoint from `from_step`
    /// on, measured between upward crossings of the series mean.
    ///
    /// Crossings are linearly interpolated. `None` when fewer than two
    /// crossings are found (flat or too short a series).
    pub fn estimate_period(&self, joint: usize, from_step: usize) -> CpgResult<Option<f64>> {
        let series = self.joint_setpoints(joint)?;
        if from_step >= series.len() {
            return Ok(None);
        }
        let s = &series[from_step..];
        let mean = s.iter().sum::<f64>() / s.len() as f64;

        let mut crossings = Vec::new();
        for k in 1..s.len() {
            let (a, b) = (s[k - 1] - mean, s[k] - mean);
            if a < 0.0 && b >= 0.0 {
                crossings.push((k - 1) as f64 + a / (a - b));
            }
        }
        if crossings.len() < 2 {
            return Ok(None);
        }
        let span = crossings[crossings.len() - 1] - crossings[0];
        Ok(Some(span / (crossings.len() - 1) as f64))
    }
}

#[cfg(test)]
mod tests {
    use cpg_types::GaitConfig;

    use super::*;
    use crate::params::GaitPreset;

    fn decoupled_legs(dt: f64, v: f64, stance: f64, swing: f64) -> OscillatorNetwork {
        let mut cfg = GaitConfig::decoupled("legs", 4, dt);
        cfg.speed_stance = vec![v; 4];
        cfg.speed_swing = vec![v; 4];
        cfg.stance_amplitude = vec![stance; 4];
        cfg.swing_amplitude = vec![swing; 4];
        cfg.desired_offset = vec![0.0, 0.05, -0.1, 0.2];
        cfg.initial_phase = vec![0.0, 0.7, 1.4, 2.1];
        OscillatorNetwork::new(cfg).unwrap()
    }

    #[test]
    fn test_record_shapes() {
        let mut net = OscillatorNetwork::new(GaitPreset::Trot.config()).unwrap();
        let traj = Trajectory::record(&mut net, 120);
        assert_eq!(traj.len(), 120);
        assert_eq!(traj.setpoints.len(), 16);
        assert!(traj.phases.iter().all(|p| p.len() == 120));
        assert_eq!(net.step_count(), 120);
        assert_eq!(traj.setpoints[5][119], net.setpoints()[5]);
        let t = traj.times();
        assert!((t[59] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_period_matches_frequency() {
        let mut net = decoupled_legs(1.0 / 60.0, 1.0, 0.2, 0.2);
        let traj = Trajectory::record(&mut net, 800);
        for j in 0..4 {
            let p = traj.estimate_period(j, 400).unwrap().unwrap();
            assert!((p - 60.0).abs() < 1e-6, "joint {j}: period {p}");
        }
    }

    #[test]
    fn test_period_with_stance_swing_amplitudes() {
        // v = 1.25 Hz, dt = 0.01 → 80 steps per cycle
        let mut net = decoupled_legs(0.01, 1.25, 0.3, 0.1);
        let traj = Trajectory::record(&mut net, 800);
        for j in 0..4 {
            let p = traj.estimate_period(j, 300).unwrap().unwrap();
            assert!((p - 80.0).abs() < 0.5, "joint {j}: period {p}");
        }
    }

    #[test]
    fn test_flat_series_has_no_period() {
        let mut net = decoupled_legs(1.0 / 60.0, 1.0, 0.0, 0.0);
        let traj = Trajectory::record(&mut net, 200);
        assert_eq!(traj.estimate_period(0, 100).unwrap(), None);
        assert_eq!(traj.estimate_period(0, 500).unwrap(), None);
    }

    #[test]
    fn test_invalid_joint() {
        let traj = Trajectory::default();
        assert!(traj.is_empty());
        assert!(traj.joint_setpoints(0).is_err());
        assert!(traj.estimate_period(3, 0).is_err());
    }

    #[test]
    fn test_serialises() {
        let mut net = decoupled_legs(1.0 / 60.0, 1.0, 0.2, 0.1);
        let traj = Trajectory::record(&mut net, 10);
        let json = serde_json::to_string(&traj).unwrap();
        let back: Trajectory = serde_json::from_str(&json).unwrap();
        assert_eq!(back.setpoints, traj.setpoints);
    }
}
