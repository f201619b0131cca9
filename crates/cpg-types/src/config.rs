// ─────────────────────────────────────────────────────────────────────
// CPG Kernel — Gait Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{CpgError, CpgResult};

/// Integration form used by every amplitude and offset integrator.
///
/// All forms are explicit fixed-step Euler updates of a single scalar
/// state `x` towards a target `R` with gain `a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmplitudeScheme {
    /// ẋ = a (R − x)
    #[default]
    Exponential,
    /// ẍ = 4 (R − x) − 3 ẋ  (fixed gains, ignores `a`)
    CriticallyDamped,
    /// ẍ = a (a/4 (R − x) − ẋ)
    SecondOrder,
    /// ẋ = a (R − x²) x  (Hopf radial form, converges to √R)
    Hopf,
    /// ẋ = a (R − x)³
    Cubic,
}

/// Complete gait specification for one oscillator network.
///
/// Built by an external gait-table collaborator and consumed immutably by
/// the network. Every per-joint vector has length `oscillator_count`; the
/// coupling matrix is exactly `oscillator_count × oscillator_count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaitConfig {
    /// Gait label (e.g. "trot").
    pub name: String,

    /// Number of oscillators N, one per joint.
    pub oscillator_count: usize,

    /// Fixed integration step Δt in seconds.
    pub time_step: f64,

    /// Gain a_r of the stance/swing amplitude integrators.
    pub gain_amplitude: f64,

    /// Gain a_x of the offset integrators.
    pub gain_offset: f64,

    /// Coupling weights W, N rows of N entries. W[i][j] is the influence
    /// of oscillator j on oscillator i.
    pub coupling_weights: Vec<Vec<f64>>,

    /// Phase-lag vector (rad) from which the phase-lag matrix Φ is derived.
    /// Entry 0 belongs to the reference oscillator and must be 0.
    pub phase_lag_vector: Vec<f64>,

    /// Target frequency (Hz) during stance.
    pub speed_stance: Vec<f64>,

    /// Target frequency (Hz) during swing.
    pub speed_swing: Vec<f64>,

    /// Target amplitude (rad) during stance.
    pub stance_amplitude: Vec<f64>,

    /// Target amplitude (rad) during swing.
    pub swing_amplitude: Vec<f64>,

    /// Target joint offset (rad).
    pub desired_offset: Vec<f64>,

    pub initial_amplitude: Vec<f64>,
    pub initial_offset: Vec<f64>,
    pub initial_phase: Vec<f64>,

    /// Integration form for amplitudes and offsets.
    /// Default: exponential approach.
    #[serde(default)]
    pub amplitude_scheme: AmplitudeScheme,

    /// Phase offset (rad) added to the hip phase before stance/swing
    /// classification. Default: 0.
    #[serde(default)]
    pub feedback_phase_offset: f64,
}

impl GaitConfig {
    /// Uncoupled network with unit frequencies, zero amplitudes and offsets.
    ///
    /// Starting point for hand-built tables; fields are public for editing.
    pub fn decoupled(name: &str, oscillator_count: usize, time_step: f64) -> Self {
        let n = oscillator_count;
        Self {
            name: name.to_string(),
            oscillator_count: n,
            time_step,
            gain_amplitude: 20.0,
            gain_offset: 20.0,
            coupling_weights: vec![vec![0.0; n]; n],
            phase_lag_vector: vec![0.0; n],
            speed_stance: vec![1.0; n],
            speed_swing: vec![1.0; n],
            stance_amplitude: vec![0.0; n],
            swing_amplitude: vec![0.0; n],
            desired_offset: vec![0.0; n],
            initial_amplitude: vec![0.0; n],
            initial_offset: vec![0.0; n],
            initial_phase: vec![0.0; n],
            amplitude_scheme: AmplitudeScheme::default(),
            feedback_phase_offset: 0.0,
        }
    }

    /// Validate shapes and values.
    ///
    /// Nothing is truncated or padded: any vector or matrix row whose
    /// length differs from N is rejected.
    pub fn validate(&self) -> CpgResult<()> {
        let n = self.oscillator_count;
        if n == 0 {
            return Err(CpgError::Config(
                "oscillator_count must be >= 1".to_string(),
            ));
        }
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(CpgError::Config(format!(
                "time_step must be finite and > 0, got {}",
                self.time_step
            )));
        }
        for (label, value) in [
            ("gain_amplitude", self.gain_amplitude),
            ("gain_offset", self.gain_offset),
            ("feedback_phase_offset", self.feedback_phase_offset),
        ] {
            if !value.is_finite() {
                return Err(CpgError::Config(format!(
                    "{label} must be finite, got {value}"
                )));
            }
        }

        for (label, values) in self.joint_vectors() {
            check_vector(label, values, n)?;
        }

        if self.coupling_weights.len() != n {
            return Err(CpgError::Shape {
                field: "coupling_weights".to_string(),
                expected: n,
                actual: self.coupling_weights.len(),
            });
        }
        for (i, row) in self.coupling_weights.iter().enumerate() {
            check_vector(&format!("coupling_weights[{i}]"), row, n)?;
        }

        if self.phase_lag_vector[0] != 0.0 {
            return Err(CpgError::Config(format!(
                "phase_lag_vector[0] belongs to the reference oscillator and must be 0, got {}",
                self.phase_lag_vector[0]
            )));
        }
        Ok(())
    }

    /// Expand the phase-lag vector into the N×N phase-lag matrix Φ.
    ///
    ///   Φ[0]    = vec
    ///   Φ[i][j] = vec[j] − vec[i]   (0 < i < j)
    ///   Φ[i][j] = −Φ[j][i]          (j < i)
    ///
    /// Antisymmetric with zero diagonal for any validated config.
    pub fn phase_lag_matrix(&self) -> Vec<Vec<f64>> {
        let v = &self.phase_lag_vector;
        let n = v.len();
        let mut m = vec![vec![0.0f64; n]; n];
        if n == 0 {
            return m;
        }
        m[0].copy_from_slice(v);
        for i in 1..n {
            for j in (i + 1)..n {
                m[i][j] = v[j] - v[i];
            }
        }
        for i in 1..n {
            for j in 0..i {
                m[i][j] = -m[j][i];
            }
        }
        m
    }

    /// Load from JSON string. Call `validate()` before use.
    pub fn from_json(json: &str) -> CpgResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| CpgError::Config(format!("JSON parse error: {e}")))
    }

    pub fn to_json(&self) -> CpgResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CpgError::Config(format!("JSON encode error: {e}")))
    }

    fn joint_vectors(&self) -> [(&'static str, &[f64]); 9] {
        [
            ("phase_lag_vector", self.phase_lag_vector.as_slice()),
            ("speed_stance", self.speed_stance.as_slice()),
            ("speed_swing", self.speed_swing.as_slice()),
            ("stance_amplitude", self.stance_amplitude.as_slice()),
            ("swing_amplitude", self.swing_amplitude.as_slice()),
            ("desired_offset", self.desired_offset.as_slice()),
            ("initial_amplitude", self.initial_amplitude.as_slice()),
            ("initial_offset", self.initial_offset.as_slice()),
            ("initial_phase", self.initial_phase.as_slice()),
        ]
    }
}

fn check_vector(field: &str, values: &[f64], n: usize) -> CpgResult<()> {
    if values.len() != n {
        return Err(CpgError::Shape {
            field: field.to_string(),
            expected: n,
            actual: values.len(),
        });
    }
    if let Some((j, v)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(CpgError::Config(format!(
            "{field}[{j}] must be finite, got {v}"
        )));
    }
    Ok(())
}
