//! A single Hodgkin-Huxley neuron: membrane parameters, gating variables
//! and the per-step voltage update.
//!
//! Voltages follow the original 1952 convention and are measured relative
//! to the resting potential, so the neuron rests at 0 mV and an action
//! potential peaks around +100 mV.
use serde::{Deserialize, Serialize};

/// The membrane parameters of a Hodgkin-Huxley neuron.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct HHParameters {
    /// The resting potential, in mV.
    pub rest_voltage: f64,
    /// The capacitance of the lipid bilayer, in µF/cm².
    pub membrane_capacitance: f64,
    /// The maximum sodium conductance, in mS/cm².
    pub sodium_max_conductance: f64,
    /// The maximum potassium conductance, in mS/cm².
    pub potassium_max_conductance: f64,
    /// The leak conductance, in mS/cm².
    pub leak_conductance: f64,
    /// The sodium reversal potential, in mV.
    pub sodium_reversal: f64,
    /// The potassium reversal potential, in mV.
    pub potassium_reversal: f64,
    /// The leak reversal potential, in mV.
    pub leak_reversal: f64,
}

impl Default for HHParameters {
    /// The squid-axon values of Hodgkin and Huxley (1952).
    fn default() -> Self {
        HHParameters {
            rest_voltage: 0.0,
            membrane_capacitance: 1.0,
            sodium_max_conductance: 120.0,
            potassium_max_conductance: 36.0,
            leak_conductance: 0.3,
            sodium_reversal: 115.0,
            potassium_reversal: -12.0,
            leak_reversal: 10.613,
        }
    }
}

/// First potassium activation rate constant.
/// The expression is singular at v = 10 mV, where its limit is 0.1.
fn alpha_n(v: f64) -> f64 {
    if v == 10.0 {
        0.1
    } else {
        0.01 * (10.0 - v) / (((10.0 - v) / 10.0).exp() - 1.0)
    }
}

/// Second potassium activation rate constant.
fn beta_n(v: f64) -> f64 {
    0.125 * (-v / 80.0).exp()
}

/// First sodium activation rate constant.
/// The expression is singular at v = 25 mV, where its limit is 1.
fn alpha_m(v: f64) -> f64 {
    if v == 25.0 {
        1.0
    } else {
        0.1 * (25.0 - v) / (((25.0 - v) / 10.0).exp() - 1.0)
    }
}

/// Second sodium activation rate constant.
fn beta_m(v: f64) -> f64 {
    4.0 * (-v / 18.0).exp()
}

/// First sodium inactivation rate constant.
fn alpha_h(v: f64) -> f64 {
    0.07 * (-v / 20.0).exp()
}

/// Second sodium inactivation rate constant.
fn beta_h(v: f64) -> f64 {
    1.0 / (((30.0 - v) / 10.0).exp() + 1.0)
}

/// Steady-state sodium activation.
fn m_infinity(v: f64) -> f64 {
    alpha_m(v) / (alpha_m(v) + beta_m(v))
}

/// Steady-state potassium activation.
fn n_infinity(v: f64) -> f64 {
    alpha_n(v) / (alpha_n(v) + beta_n(v))
}

/// Steady-state sodium inactivation.
fn h_infinity(v: f64) -> f64 {
    alpha_h(v) / (alpha_h(v) + beta_h(v))
}

/// A Hodgkin-Huxley neuron: membrane potential plus the three gating
/// variables m (sodium activation), n (potassium activation) and
/// h (sodium inactivation).
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct HHNeuron {
    params: HHParameters,
    potential: f64,
    sodium_activation: f64,
    potassium_activation: f64,
    sodium_inactivation: f64,
}

impl HHNeuron {
    /// Create a neuron at rest, with the gating variables at their
    /// steady-state values for the resting potential.
    pub fn new(params: HHParameters) -> Self {
        let v = params.rest_voltage;
        HHNeuron {
            params,
            potential: v,
            sodium_activation: m_infinity(v),
            potassium_activation: n_infinity(v),
            sodium_inactivation: h_infinity(v),
        }
    }

    /// Returns the membrane parameters of the neuron.
    pub fn params(&self) -> &HHParameters {
        &self.params
    }

    /// Returns the membrane potential, in mV.
    pub fn potential(&self) -> f64 {
        self.potential
    }

    /// Returns the gating variables (m, n, h).
    pub fn gating(&self) -> (f64, f64, f64) {
        (
            self.sodium_activation,
            self.potassium_activation,
            self.sodium_inactivation,
        )
    }

    /// Advance the neuron by one Euler step of length `dt` milliseconds,
    /// given the stimulation current of the previous step.
    ///
    /// The ionic conductances are computed from the incoming gating
    /// variables, then the gating variables and the potential are advanced
    /// from the incoming potential.
    pub fn step(&mut self, stimulation: f64, dt: f64) {
        let p = &self.params;
        let v = self.potential;

        let sodium_conductance =
            p.sodium_max_conductance * self.sodium_inactivation * self.sodium_activation.powi(3);
        let potassium_conductance =
            p.potassium_max_conductance * self.potassium_activation.powi(4);

        self.sodium_activation +=
            (alpha_m(v) * (1.0 - self.sodium_activation) - beta_m(v) * self.sodium_activation) * dt;
        self.sodium_inactivation += (alpha_h(v) * (1.0 - self.sodium_inactivation)
            - beta_h(v) * self.sodium_inactivation)
            * dt;
        self.potassium_activation += (alpha_n(v) * (1.0 - self.potassium_activation)
            - beta_n(v) * self.potassium_activation)
            * dt;

        self.potential += (stimulation
            - sodium_conductance * (v - p.sodium_reversal)
            - potassium_conductance * (v - p.potassium_reversal)
            - p.leak_conductance * (v - p.leak_reversal))
            / p.membrane_capacitance
            * dt;
    }
}
