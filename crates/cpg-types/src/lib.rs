// ─────────────────────────────────────────────────────────────────────
// CPG Kernel — Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Gait configuration, network state snapshots, and the error hierarchy
//! shared by the CPG kernel crates.

pub mod config;
pub mod error;
pub mod state;

pub use config::{AmplitudeScheme, GaitConfig};
pub use error::{CpgError, CpgResult};
pub use state::NetworkState;
