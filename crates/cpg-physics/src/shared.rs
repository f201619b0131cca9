// ─────────────────────────────────────────────────────────────────────
// CPG Kernel — Shared Network Handle
// ─────────────────────────────────────────────────────────────────────
//! Thread-safe handle for embedding one network in a multi-threaded
//! controller. Each `step()` holds the lock for the full four-phase
//! update, so readers only ever observe whole steps.

use std::sync::Arc;

use parking_lot::Mutex;

use cpg_types::{CpgResult, GaitConfig, NetworkState};

use crate::network::OscillatorNetwork;

/// Cloneable, lock-guarded reference to an `OscillatorNetwork`.
#[derive(Debug, Clone)]
pub struct SharedNetwork {
    inner: Arc<Mutex<OscillatorNetwork>>,
}

impl SharedNetwork {
    pub fn new(network: OscillatorNetwork) -> Self {
        Self {
            inner: Arc::new(Mutex::new(network)),
        }
    }

    pub fn from_config(config: GaitConfig) -> CpgResult<Self> {
        OscillatorNetwork::new(config).map(Self::new)
    }

    /// Advance one step and return a copy of the new setpoints.
    pub fn step(&self) -> Vec<f64> {
        self.inner.lock().step().to_vec()
    }

    /// Advance one step and return the full state.
    pub fn step_state(&self) -> NetworkState {
        let mut net = self.inner.lock();
        net.step();
        net.state()
    }

    pub fn setpoints(&self) -> Vec<f64> {
        self.inner.lock().setpoints().to_vec()
    }

    pub fn setpoint(&self, joint: usize) -> CpgResult<f64> {
        self.inner.lock().setpoint(joint)
    }

    pub fn state(&self) -> NetworkState {
        self.inner.lock().state()
    }

    pub fn reset(&self) {
        self.inner.lock().reset();
    }

    /// Run `f` with exclusive access to the network.
    pub fn with<R>(&self, f: impl FnOnce(&mut OscillatorNetwork) -> R) -> R {
        let mut net = self.inner.lock();
        f(&mut *net)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::params::GaitPreset;

    #[test]
    fn test_concurrent_steps_are_whole() {
        let shared = SharedNetwork::from_config(GaitPreset::Trot.config()).unwrap();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let s = shared.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        s.step();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let mut reference = OscillatorNetwork::new(GaitPreset::Trot.config()).unwrap();
        reference.run(200);
        let state = shared.state();
        assert_eq!(state.step_count, 200);
        assert_eq!(state, reference.state());
    }

    #[test]
    fn test_step_state_matches_setpoints() {
        let shared = SharedNetwork::from_config(GaitPreset::Walk.config()).unwrap();
        let state = shared.step_state();
        assert_eq!(state.step_count, 1);
        assert_eq!(state.setpoint, shared.setpoints());
        assert_eq!(shared.setpoint(3).unwrap(), state.setpoint[3]);
        assert!(shared.setpoint(16).is_err());
    }

    #[test]
    fn test_with_and_reset() {
        let shared = SharedNetwork::from_config(GaitPreset::Pace.config()).unwrap();
        shared.with(|net| {
            net.run(10);
        });
        assert_eq!(shared.with(|net| net.step_count()), 10);
        shared.reset();
        assert_eq!(shared.state().step_count, 0);
    }

    #[test]
    fn test_invalid_config() {
        let mut cfg = GaitPreset::Bound.config();
        cfg.initial_phase.truncate(3);
        assert!(SharedNetwork::from_config(cfg).is_err());
    }
}
