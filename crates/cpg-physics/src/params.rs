// ─────────────────────────────────────────────────────────────────────
// CPG Kernel — Reference Gait Tables
// ─────────────────────────────────────────────────────────────────────
//! Reference parameters for a 16-joint quadruped: one reference
//! oscillator, three spine joints (roll, pitch, yaw), then shoulders,
//! hips and knees for the right-front, right-rear, left-front and
//! left-rear legs.
//!
//! Gaits differ only in their phase-lag vector; amplitudes, offsets,
//! frequencies and coupling topology are shared.

use std::f64::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

use cpg_types::{AmplitudeScheme, CpgError, CpgResult, GaitConfig};

pub const N_JOINTS: usize = 16;

pub const TIME_STEP: f64 = 1.0 / 60.0;
pub const GAIN_AMPLITUDE: f64 = 20.0;
pub const GAIN_OFFSET: f64 = 20.0;
/// Base coupling weight; shoulders weigh spine input four times higher.
pub const COUPLING_WEIGHT: f64 = 4.0;

pub const JOINT_NAMES: [&str; N_JOINTS] = [
    "reference",
    "spine roll",
    "spine pitch",
    "spine yaw",
    "RF shoulder",
    "RR shoulder",
    "LF shoulder",
    "LR shoulder",
    "RF hip",
    "RR hip",
    "LF hip",
    "LR hip",
    "RF knee",
    "RR knee",
    "LF knee",
    "LR knee",
];

pub const LEG_NAMES: [&str; 4] = ["right front", "right rear", "left front", "left rear"];

const P3_2: f64 = 3.0 * FRAC_PI_2;

pub const TROT_PHASE: [f64; N_JOINTS] = [
    0.0, 0.0, 0.0, P3_2, PI, 0.0, 0.0, PI, FRAC_PI_2, P3_2, P3_2, FRAC_PI_2, PI, 0.0, 0.0, PI,
];

pub const WALK_PHASE: [f64; N_JOINTS] = [
    0.0, 0.0, 0.0, 0.0, -FRAC_PI_2, 0.0, FRAC_PI_2, PI, -PI, -FRAC_PI_2, 0.0, FRAC_PI_2,
    -FRAC_PI_2, 0.0, FRAC_PI_2, PI,
];

pub const PACE_PHASE: [f64; N_JOINTS] = [
    0.0, 0.0, 0.0, 0.0, -FRAC_PI_2, -FRAC_PI_2, FRAC_PI_2, FRAC_PI_2, -PI, -PI, 0.0, 0.0,
    -FRAC_PI_2, -FRAC_PI_2, FRAC_PI_2, FRAC_PI_2,
];

pub const BOUND_PHASE: [f64; N_JOINTS] = [
    0.0, 0.0, 0.0, 0.0, FRAC_PI_2, -FRAC_PI_2, FRAC_PI_2, -FRAC_PI_2, 0.0, PI, 0.0, PI,
    FRAC_PI_2, -FRAC_PI_2, FRAC_PI_2, -FRAC_PI_2,
];

/// Swing amplitudes (rad).
pub const SWING_AMPLITUDE: [f64; N_JOINTS] = [
    0.0, 0.0, 0.1746, 0.1746, 0.025, 0.025, 0.025, 0.025, 0.175, 0.175, 0.175, 0.175, 0.16,
    0.16, 0.16, 0.16,
];

/// Stance amplitudes (rad). Shoulders and knees hold still in stance.
pub const STANCE_AMPLITUDE: [f64; N_JOINTS] = [
    0.0, 0.0, 0.1746, 0.1746, 0.0, 0.0, 0.0, 0.0, 0.175, 0.175, 0.175, 0.175, 0.0, 0.0, 0.0,
    0.0,
];

/// Joint offsets (rad).
pub const DESIRED_OFFSET: [f64; N_JOINTS] = [
    0.0, 0.0, 0.0, 0.0, 0.05, 0.05, 0.05, 0.05, -0.1745, -0.1745, -0.1745, -0.1745, 0.0, 0.0,
    0.0, 0.0,
];

/// Hip/knee ring between legs: RF–RR, RF–LF, RR–LR, LF–LR.
const LEG_RING: [(usize, usize); 4] = [(0, 1), (0, 2), (1, 3), (2, 3)];

const SPINE: [usize; 3] = [1, 2, 3];

#[inline]
fn shoulder(leg: usize) -> usize {
    4 + leg
}

#[inline]
fn hip(leg: usize) -> usize {
    8 + leg
}

#[inline]
fn knee(leg: usize) -> usize {
    12 + leg
}

/// Build the 16×16 coupling matrix W.
///
/// Construction:
///   1. Reference ↔ spine roll
///   2. Spine joints fully coupled to each other and to all shoulders
///   3. Shoulders receive spine input at 4× weight
///   4. Each leg chains shoulder ↔ hip ↔ knee
///   5. Hips and knees each form a ring across legs
///
pub fn build_coupling_matrix() -> Vec<Vec<f64>> {
    let cw = COUPLING_WEIGHT;
    let mut k = vec![vec![0.0f64; N_JOINTS]; N_JOINTS];

    // Step 1: reference oscillator
    k[0][1] = cw;
    k[1][0] = cw;

    // Step 2 + 3: spine block and spine → shoulder drive
    for &s in &SPINE {
        for &t in &SPINE {
            if s != t {
                k[s][t] = cw;
            }
        }
        for leg in 0..4 {
            k[s][shoulder(leg)] = cw;
            k[shoulder(leg)][s] = 4.0 * cw;
        }
    }

    // Step 4: leg chains
    for leg in 0..4 {
        k[shoulder(leg)][hip(leg)] = cw;
        k[hip(leg)][shoulder(leg)] = cw;
        k[hip(leg)][knee(leg)] = cw;
        k[knee(leg)][hip(leg)] = cw;
    }

    // Step 5: hip and knee rings
    for &(a, b) in &LEG_RING {
        k[hip(a)][hip(b)] = cw;
        k[hip(b)][hip(a)] = cw;
        k[knee(a)][knee(b)] = cw;
        k[knee(b)][knee(a)] = cw;
    }

    k
}

/// Built-in gait tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GaitPreset {
    Trot,
    Walk,
    Pace,
    Bound,
}

impl GaitPreset {
    pub const ALL: [GaitPreset; 4] = [Self::Trot, Self::Walk, Self::Pace, Self::Bound];

    pub fn name(self) -> &'static str {
        match self {
            Self::Trot => "trot",
            Self::Walk => "walk",
            Self::Pace => "pace",
            Self::Bound => "bound",
        }
    }

    pub fn from_name(name: &str) -> CpgResult<Self> {
        Self::ALL
            .into_iter()
            .find(|g| g.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| CpgError::Config(format!("unknown gait preset '{name}'")))
    }

    pub fn phase_vector(self) -> [f64; N_JOINTS] {
        match self {
            Self::Trot => TROT_PHASE,
            Self::Walk => WALK_PHASE,
            Self::Pace => PACE_PHASE,
            Self::Bound => BOUND_PHASE,
        }
    }

    /// Full configuration, starting from zero phase, amplitude and offset.
    pub fn config(self) -> GaitConfig {
        GaitConfig {
            name: self.name().to_string(),
            oscillator_count: N_JOINTS,
            time_step: TIME_STEP,
            gain_amplitude: GAIN_AMPLITUDE,
            gain_offset: GAIN_OFFSET,
            coupling_weights: build_coupling_matrix(),
            phase_lag_vector: self.phase_vector().to_vec(),
            speed_stance: vec![1.0; N_JOINTS],
            speed_swing: vec![1.0; N_JOINTS],
            stance_amplitude: STANCE_AMPLITUDE.to_vec(),
            swing_amplitude: SWING_AMPLITUDE.to_vec(),
            desired_offset: DESIRED_OFFSET.to_vec(),
            initial_amplitude: vec![0.0; N_JOINTS],
            initial_offset: vec![0.0; N_JOINTS],
            initial_phase: vec![0.0; N_JOINTS],
            amplitude_scheme: AmplitudeScheme::Exponential,
            feedback_phase_offset: 0.0,
        }
    }
}
