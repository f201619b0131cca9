// ─────────────────────────────────────────────────────────────────────
// CPG Kernel — Leg Topology
// ─────────────────────────────────────────────────────────────────────
//! Joint → leg mapping for a quadruped layout.
//!
//! The last 12 joints are 4 legs × 3 rows (shoulder, hip, knee), leg-major
//! within each row. Any joints before them are spine/reference joints and
//! share leg 0's stance/swing weight.
//!
//! ```text
//!   index:  0 .. base-1 | base .. base+3 | base+4 .. base+7 | base+8 .. base+11
//!   role:   spine       | shoulders      | hips             | knees
//!   base = N − 12
//! ```
//!
//! Networks with fewer than 12 joints keep the tail of that layout:
//! leading rows are dropped first, so N = 8 has hips and knees and
//! N = 4 has knees only.

use cpg_types::{CpgError, CpgResult};

/// Legs in the layout.
pub const N_LEGS: usize = 4;
/// Joints per leg.
pub const JOINTS_PER_LEG: usize = 3;
/// Joints belonging to legs.
pub const LEG_JOINTS: usize = N_LEGS * JOINTS_PER_LEG;

/// Leg of joint `joint` in an `n`-joint network.
pub fn leg_of(joint: usize, n: usize) -> CpgResult<usize> {
    if joint >= n {
        return Err(CpgError::InvalidJoint { index: joint, count: n });
    }
    let base = n as i64 - LEG_JOINTS as i64;
    let i = joint as i64;
    if i < base {
        return Ok(0);
    }
    Ok(((i - base) % N_LEGS as i64) as usize)
}

/// Leg assignment for every joint of an `n`-joint network.
pub fn leg_map(n: usize) -> Vec<usize> {
    (0..n)
        .map(|i| leg_of(i, n).unwrap_or_default())
        .collect()
}

/// Hip joint of `leg` (`N − 8 + leg`), if the hip row exists.
pub fn hip_joint(leg: usize, n: usize) -> Option<usize> {
    row_joint(1, leg, n)
}

/// Joint whose phase drives `leg`'s stance/swing weight.
///
/// The hip when present, else the knee for reduced layouts. `None` when
/// the leg has no joints at all.
pub fn reference_joint(leg: usize, n: usize) -> Option<usize> {
    hip_joint(leg, n).or_else(|| row_joint(2, leg, n))
}

/// Reference joints of all four legs.
pub fn reference_joints(n: usize) -> [Option<usize>; N_LEGS] {
    std::array::from_fn(|leg| reference_joint(leg, n))
}

fn row_joint(row: usize, leg: usize, n: usize) -> Option<usize> {
    if leg >= N_LEGS {
        return None;
    }
    let idx = n as i64 - LEG_JOINTS as i64 + (row * N_LEGS + leg) as i64;
    (idx >= 0 && idx < n as i64).then_some(idx as usize)
}
