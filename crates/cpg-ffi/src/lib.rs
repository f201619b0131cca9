// ─────────────────────────────────────────────────────────────────────
// CPG Kernel — PyO3 FFI Bindings
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
// Note: #[deny(unsafe_code)] not applied — PyO3 proc macros generate
// unsafe blocks internally. All hand-written code in this crate is safe.
//! Python-callable wrappers around the CPG network.
//!
//! Exposes `GaitConfig` and `RustCpgNetwork` so that Python-side gait
//! tables, plotting and robot drivers can run the integrator natively.
//!
//! # FFI Safety
//!
//! - Configs are validated before a network is built; every
//!   `CpgError` becomes a Python `ValueError`.
//! - Results are copied into Python lists/dicts; no Rust references
//!   escape to Python.
//!
//! Install: `cd cpg-kernel && pip install -e crates/cpg-ffi`
//! (requires maturin).
//!
//! Usage from Python:
//! ```python
//! from cpg_kernel import GaitConfig, RustCpgNetwork
//!
//! net = RustCpgNetwork(GaitConfig.preset("trot"))
//! traj = net.record(800)
//! hips = traj["setpoints"][8:12]
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use cpg_physics::{GaitPreset, OscillatorNetwork, Trajectory};
use cpg_types::{CpgError, GaitConfig, NetworkState};

fn to_py_err(e: CpgError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn state_dict(py: Python<'_>, state: &NetworkState) -> PyResult<PyObject> {
    let dict = PyDict::new(py);
    dict.set_item("step_count", state.step_count)?;
    dict.set_item("t", state.t)?;
    dict.set_item("phase", state.phase.clone())?;
    dict.set_item("amplitude", state.amplitude.clone())?;
    dict.set_item("offset", state.offset.clone())?;
    dict.set_item("setpoint", state.setpoint.clone())?;
    Ok(dict.into())
}

// ─── PyGaitConfig ───────────────────────────────────────────────────

/// Python-visible gait configuration.
#[pyclass(name = "GaitConfig")]
#[derive(Clone)]
struct PyGaitConfig {
    inner: GaitConfig,
}

#[pymethods]
impl PyGaitConfig {
    /// Construct from JSON string.
    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let config = GaitConfig::from_json(json).map_err(to_py_err)?;
        config.validate().map_err(to_py_err)?;
        Ok(Self { inner: config })
    }

    /// Built-in 16-joint quadruped table: "trot", "walk", "pace" or "bound".
    #[staticmethod]
    fn preset(name: &str) -> PyResult<Self> {
        let preset = GaitPreset::from_name(name).map_err(to_py_err)?;
        Ok(Self {
            inner: preset.config(),
        })
    }

    fn to_json(&self) -> PyResult<String> {
        self.inner.to_json().map_err(to_py_err)
    }

    #[getter]
    fn name(&self) -> &str {
        &self.inner.name
    }

    #[getter]
    fn oscillator_count(&self) -> usize {
        self.inner.oscillator_count
    }

    #[getter]
    fn time_step(&self) -> f64 {
        self.inner.time_step
    }

    /// Phase-lag matrix Φ derived from the phase-lag vector.
    fn phase_lag_matrix(&self) -> Vec<Vec<f64>> {
        self.inner.phase_lag_matrix()
    }

    fn __repr__(&self) -> String {
        format!(
            "GaitConfig(name={:?}, n={}, dt={:.5}, scheme={:?})",
            self.inner.name,
            self.inner.oscillator_count,
            self.inner.time_step,
            self.inner.amplitude_scheme
        )
    }
}

// ─── RustCpgNetwork ─────────────────────────────────────────────────

/// Coupled-oscillator CPG network.
#[pyclass(name = "RustCpgNetwork")]
struct PyCpgNetwork {
    inner: OscillatorNetwork,
}

#[pymethods]
impl PyCpgNetwork {
    #[new]
    fn new(config: PyGaitConfig) -> PyResult<Self> {
        let inner = OscillatorNetwork::new(config.inner).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Advance one step; returns the new setpoints.
    #[pyo3(signature = (phase_offset = None))]
    fn step(&mut self, phase_offset: Option<f64>) -> PyResult<Vec<f64>> {
        match phase_offset {
            Some(offset) if !offset.is_finite() => Err(PyValueError::new_err(format!(
                "phase_offset must be finite, got {offset}"
            ))),
            Some(offset) => Ok(self.inner.step_with_offset(offset).to_vec()),
            None => Ok(self.inner.step().to_vec()),
        }
    }

    /// Run `n_steps` steps; returns the final setpoints.
    fn run(&mut self, n_steps: u64) -> Vec<f64> {
        self.inner.run(n_steps).to_vec()
    }

    /// Run `steps` steps and return joint-major series as a dict.
    fn record(&mut self, py: Python<'_>, steps: usize) -> PyResult<PyObject> {
        let traj = Trajectory::record(&mut self.inner, steps);
        let dict = PyDict::new(py);
        dict.set_item("time_step", traj.time_step)?;
        dict.set_item("times", traj.times())?;
        dict.set_item("setpoints", traj.setpoints)?;
        dict.set_item("amplitudes", traj.amplitudes)?;
        dict.set_item("phases", traj.phases)?;
        Ok(dict.into())
    }

    fn reset(&mut self) {
        self.inner.reset();
    }

    #[getter]
    fn setpoints(&self) -> Vec<f64> {
        self.inner.setpoints().to_vec()
    }

    #[getter]
    fn amplitudes(&self) -> Vec<f64> {
        self.inner.amplitudes().to_vec()
    }

    #[getter]
    fn phases(&self) -> Vec<f64> {
        self.inner.phases().to_vec()
    }

    #[getter]
    fn offsets(&self) -> Vec<f64> {
        self.inner.offsets()
    }

    #[getter]
    fn weights(&self) -> Vec<f64> {
        self.inner.weights().to_vec()
    }

    #[getter]
    fn step_count(&self) -> u64 {
        self.inner.step_count()
    }

    #[getter]
    fn time(&self) -> f64 {
        self.inner.time()
    }

    fn setpoint(&self, joint: usize) -> PyResult<f64> {
        self.inner.setpoint(joint).map_err(to_py_err)
    }

    /// Current (stance, swing) amplitudes of one joint.
    fn current_amplitude(&self, joint: usize) -> PyResult<(f64, f64)> {
        self.inner.current_amplitude(joint).map_err(to_py_err)
    }

    fn leg_of(&self, joint: usize) -> PyResult<usize> {
        cpg_physics::leg_of(joint, self.inner.oscillator_count()).map_err(to_py_err)
    }

    fn state(&self, py: Python<'_>) -> PyResult<PyObject> {
        state_dict(py, &self.inner.state())
    }

    /// Raise `ValueError` if any state value is NaN/Inf.
    fn check_finite(&self) -> PyResult<()> {
        self.inner.check_finite().map_err(to_py_err)
    }

    fn __repr__(&self) -> String {
        format!(
            "RustCpgNetwork(name={:?}, n={}, step={})",
            self.inner.config().name,
            self.inner.oscillator_count(),
            self.inner.step_count()
        )
    }
}

// ─── Module Registration ────────────────────────────────────────────

/// CPG Kernel — Rust-accelerated central pattern generator.
///
/// - `GaitConfig` — gait table (JSON or built-in preset)
/// - `RustCpgNetwork` — oscillator network producing joint setpoints
#[pymodule]
fn cpg_kernel(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyGaitConfig>()?;
    m.add_class::<PyCpgNetwork>()?;
    Ok(())
}
