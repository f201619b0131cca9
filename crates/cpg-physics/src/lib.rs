// ─────────────────────────────────────────────────────────────────────
// CPG Kernel — Oscillator Physics
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Central pattern generator for legged locomotion: coupled phase
//! oscillators with hip-phase stance/swing feedback and per-joint
//! amplitude/offset integrators, producing joint-angle setpoints at a
//! fixed time step.
//!
//! Architecture:
//!   - AmplitudeIntegrator: scalar target-tracking ODE (5 forms)
//!   - JointOscillator: stance amplitude + swing amplitude + offset
//!   - topology: joint → leg mapping, hip reference joints
//!   - GaitPhaseModulator: hip phase → 0/1 stance weight per leg
//!   - OscillatorNetwork: 4-phase step orchestrator
//!   - SharedNetwork: lock-guarded handle for threaded embedders
//!   - Trajectory: recorded runs for plotting and period analysis
//!   - params: reference quadruped gait tables

pub mod feedback;
pub mod integrator;
pub mod network;
pub mod oscillator;
pub mod params;
pub mod shared;
pub mod topology;
pub mod trajectory;

pub use feedback::{stance_weight, GaitPhaseModulator};
pub use integrator::AmplitudeIntegrator;
pub use network::OscillatorNetwork;
pub use oscillator::JointOscillator;
pub use params::{build_coupling_matrix, GaitPreset, JOINT_NAMES, LEG_NAMES, N_JOINTS};
pub use shared::SharedNetwork;
pub use topology::{leg_of, reference_joint, N_LEGS};
pub use trajectory::Trajectory;
