// ─────────────────────────────────────────────────────────────────────
// CPG Kernel — Oscillator Network
// ─────────────────────────────────────────────────────────────────────
//! Coupled phase-oscillator network with stance/swing modulation:
//!
//!   dφ_i/dt = 2π v_i + Σ_j W_ij sin(φ_j − φ_i − Φ_ij)
//!   v_i     = w_leg(i) (v_st,i − v_sw,i) + v_sw,i
//!   r_i     = w_leg(i) (r_st,i − r_sw,i) + r_sw,i
//!   θ_i     = x_i + r_i cos φ_i
//!
//! One `step()` runs, in order:
//!   1. offsets     x_i ← offset integrator
//!   2. amplitudes  weights from pre-step φ, r_st/r_sw integrators, blend r_i
//!   3. phase       weights from the same φ, Jacobi Euler update of φ
//!   4. setpoints   θ_i from new φ and the r_i, x_i of steps 1–2
//!
//! Phases are never wrapped. Scratch buffers are allocated once at
//! construction; stepping does not allocate.

use std::f64::consts::TAU;

use cpg_types::{CpgError, CpgResult, GaitConfig, NetworkState};

use crate::feedback::GaitPhaseModulator;
use crate::oscillator::JointOscillator;
use crate::topology::{leg_map, N_LEGS};

/// CPG network built from one immutable `GaitConfig`.
#[derive(Debug, Clone)]
pub struct OscillatorNetwork {
    config: GaitConfig,
    n: usize,
    dt: f64,
    /// Coupling weights W, n×n row-major.
    coupling: Vec<f64>,
    /// Phase-lag matrix Φ, n×n row-major.
    phase_lag: Vec<f64>,
    legs: Vec<usize>,
    modulator: GaitPhaseModulator,
    oscillators: Vec<JointOscillator>,
    phi: Vec<f64>,
    amp_out: Vec<f64>,
    theta: Vec<f64>,
    weights: [f64; N_LEGS],
    step_count: u64,
    t: f64,
    // Pre-allocated scratch
    phi_snapshot: Vec<f64>,
    dphi: Vec<f64>,
}

impl OscillatorNetwork {
    /// Validate `config` and build the network at its initial conditions.
    pub fn new(config: GaitConfig) -> CpgResult<Self> {
        config.validate()?;
        let n = config.oscillator_count;

        let coupling: Vec<f64> = config.coupling_weights.iter().flatten().copied().collect();
        let phase_lag: Vec<f64> = config.phase_lag_matrix().into_iter().flatten().collect();

        log::debug!(
            "building CPG network '{}': n={}, dt={:.5}, scheme={:?}",
            config.name,
            n,
            config.time_step,
            config.amplitude_scheme
        );

        let mut net = Self {
            n,
            dt: config.time_step,
            coupling,
            phase_lag,
            legs: leg_map(n),
            modulator: GaitPhaseModulator::new(n),
            oscillators: Vec::with_capacity(n),
            phi: vec![0.0; n],
            amp_out: vec![0.0; n],
            theta: vec![0.0; n],
            weights: [0.0; N_LEGS],
            step_count: 0,
            t: 0.0,
            phi_snapshot: vec![0.0; n],
            dphi: vec![0.0; n],
            config,
        };
        net.load_initial_conditions();
        Ok(net)
    }

    fn load_initial_conditions(&mut self) {
        let c = &self.config;
        self.oscillators = (0..self.n)
            .map(|i| {
                JointOscillator::with_scheme(
                    c.time_step,
                    c.gain_amplitude,
                    c.gain_offset,
                    c.stance_amplitude[i],
                    c.swing_amplitude[i],
                    c.desired_offset[i],
                    c.initial_amplitude[i],
                    c.initial_offset[i],
                    c.amplitude_scheme,
                )
            })
            .collect();
        self.phi.copy_from_slice(&c.initial_phase);
        self.amp_out.fill(0.0);
        self.theta.fill(0.0);
        self.weights = [0.0; N_LEGS];
        self.step_count = 0;
        self.t = 0.0;
    }

    /// Return to the configured initial conditions.
    pub fn reset(&mut self) {
        self.load_initial_conditions();
        log::info!("CPG network '{}' reset", self.config.name);
    }

    /// Advance one time step using the configured feedback phase offset.
    pub fn step(&mut self) -> &[f64] {
        self.step_with_offset(self.config.feedback_phase_offset)
    }

    /// Advance one time step with an explicit feedback phase offset.
    ///
    /// `phase_offset` must be finite; a NaN offset would poison every
    /// leg weight. Returns the new setpoints θ.
    pub fn step_with_offset(&mut self, phase_offset: f64) -> &[f64] {
        debug_assert!(phase_offset.is_finite(), "phase offset {phase_offset}");
        self.update_offsets();
        self.update_amplitudes(phase_offset);
        self.update_phase(phase_offset);
        self.compute_setpoints();
        self.step_count += 1;
        self.t += self.dt;
        &self.theta
    }

    /// Run `n_steps` steps and return the final setpoints.
    pub fn run(&mut self, n_steps: u64) -> &[f64] {
        for _ in 0..n_steps {
            self.step();
        }
        &self.theta
    }

    /// Step 1: advance every joint's offset integrator.
    pub fn update_offsets(&mut self) {
        for osc in self.oscillators.iter_mut() {
            osc.step_offset();
        }
    }

    /// Step 2: advance stance/swing amplitudes and blend them by the
    /// weight of each joint's leg. Must run before `update_phase`.
    pub fn update_amplitudes(&mut self, phase_offset: f64) -> &[f64] {
        self.modulator
            .weights_into(&self.phi, phase_offset, &mut self.weights);
        for (i, osc) in self.oscillators.iter_mut().enumerate() {
            let (r_st, r_sw) = osc.step_r();
            let w = self.weights[self.legs[i]];
            self.amp_out[i] = w * (r_st - r_sw) + r_sw;
        }
        &self.amp_out
    }

    /// Step 3: Euler update of all phases from one snapshot.
    pub fn update_phase(&mut self, phase_offset: f64) -> &[f64] {
        let n = self.n;
        self.phi_snapshot.copy_from_slice(&self.phi);
        let phi = &self.phi_snapshot;
        self.modulator
            .weights_into(phi, phase_offset, &mut self.weights);

        let c = &self.config;
        for i in 0..n {
            let row = i * n;
            let mut coupling = 0.0;
            for j in 0..n {
                coupling +=
                    self.coupling[row + j] * (phi[j] - phi[i] - self.phase_lag[row + j]).sin();
            }
            let w = self.weights[self.legs[i]];
            let v = w * (c.speed_stance[i] - c.speed_swing[i]) + c.speed_swing[i];
            self.dphi[i] = TAU * v + coupling;
        }

        for (p, d) in self.phi.iter_mut().zip(self.dphi.iter()) {
            *p += d * self.dt;
        }
        &self.phi
    }

    /// Step 4: θ_i = x_i + r_i cos φ_i.
    pub fn compute_setpoints(&mut self) -> &[f64] {
        for (i, osc) in self.oscillators.iter().enumerate() {
            self.theta[i] = osc.offset_out() + self.amp_out[i] * self.phi[i].cos();
        }
        &self.theta
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn config(&self) -> &GaitConfig {
        &self.config
    }

    pub fn oscillator_count(&self) -> usize {
        self.n
    }

    pub fn time_step(&self) -> f64 {
        self.dt
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Simulated time (s).
    pub fn time(&self) -> f64 {
        self.t
    }

    /// Joint setpoints θ (rad).
    pub fn setpoints(&self) -> &[f64] {
        &self.theta
    }

    /// Blended amplitudes r_out (rad).
    pub fn amplitudes(&self) -> &[f64] {
        &self.amp_out
    }

    /// Unwrapped phases φ (rad).
    pub fn phases(&self) -> &[f64] {
        &self.phi
    }

    /// Latched offsets x (rad).
    pub fn offsets(&self) -> Vec<f64> {
        self.oscillators.iter().map(|o| o.offset_out()).collect()
    }

    /// Leg weights computed by the most recent amplitude or phase update.
    pub fn weights(&self) -> [f64; N_LEGS] {
        self.weights
    }

    /// Leg of each joint.
    pub fn legs(&self) -> &[usize] {
        &self.legs
    }

    pub fn phase_lag(&self, i: usize, j: usize) -> CpgResult<f64> {
        self.check_joint(i)?;
        self.check_joint(j)?;
        Ok(self.phase_lag[i * self.n + j])
    }

    pub fn setpoint(&self, joint: usize) -> CpgResult<f64> {
        self.check_joint(joint)?;
        Ok(self.theta[joint])
    }

    /// Current `(stance, swing)` amplitudes of one joint.
    pub fn current_amplitude(&self, joint: usize) -> CpgResult<(f64, f64)> {
        self.check_joint(joint)?;
        Ok(self.oscillators[joint].amplitudes())
    }

    pub fn joint(&self, joint: usize) -> CpgResult<&JointOscillator> {
        self.check_joint(joint)?;
        Ok(&self.oscillators[joint])
    }

    pub fn state(&self) -> NetworkState {
        NetworkState {
            step_count: self.step_count,
            t: self.t,
            phase: self.phi.clone(),
            amplitude: self.amp_out.clone(),
            offset: self.offsets(),
            setpoint: self.theta.clone(),
        }
    }

    /// Check the network state for NaN/Inf. Not run by `step()`.
    pub fn check_finite(&self) -> CpgResult<()> {
        self.state().check_finite()
    }

    fn check_joint(&self, joint: usize) -> CpgResult<()> {
        if joint >= self.n {
            return Err(CpgError::InvalidJoint {
                index: joint,
                count: self.n,
            });
        }
        Ok(())
    }
}
