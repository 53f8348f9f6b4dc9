//! Fixed-step simulation of a small group of Hodgkin-Huxley neurons.
use itertools::Itertools;
use nalgebra::DMatrix;
use std::io::Write;

use crate::error::SNNError;
use crate::hh::neuron::{HHNeuron, HHParameters};

/// A Hodgkin-Huxley simulation: a few neurons advanced together with a
/// fixed sub-millisecond Euler step, under an explicit per-step stimulation
/// protocol, optionally coupled by voltage weights.
///
/// Unlike the spiking-network simulator, the output is the full membrane
/// voltage trace of every neuron, suitable for plotting.
#[derive(Debug, PartialEq, Clone)]
pub struct HHSimulation {
    dt: f64,
    times: Vec<f64>,
    neurons: Vec<HHNeuron>,
    // weights[(i, j)] scales the contribution of neuron j's voltage to
    // neuron i's stimulation, one step later
    weights: DMatrix<f64>,
    stimulation: Vec<Vec<f64>>,
    traces: Vec<Vec<f64>>,
}

impl HHSimulation {
    /// Create a simulation of `num_neurons` identical neurons over
    /// [0, total_time] milliseconds with an Euler step of `dt` milliseconds.
    /// All stimulations and coupling weights start at zero.
    /// The function returns an error for an empty group or a degenerate step.
    pub fn build(
        num_neurons: usize,
        total_time: f64,
        dt: f64,
        params: HHParameters,
    ) -> Result<Self, SNNError> {
        if num_neurons == 0 {
            return Err(SNNError::InvalidConfiguration(
                "The number of neurons must be positive".to_string(),
            ));
        }
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(SNNError::InvalidConfiguration(
                "The time step must be positive and finite".to_string(),
            ));
        }
        if !(total_time >= 0.0 && total_time.is_finite()) {
            return Err(SNNError::InvalidConfiguration(
                "The total simulation time must be non-negative and finite".to_string(),
            ));
        }

        let num_steps = (total_time / dt).round() as usize + 1;
        let times = (0..num_steps).map(|step| step as f64 * dt).collect();
        let rest_voltage = params.rest_voltage;
        let neurons = vec![HHNeuron::new(params); num_neurons];

        Ok(HHSimulation {
            dt,
            times,
            neurons,
            weights: DMatrix::zeros(num_neurons, num_neurons),
            stimulation: vec![vec![0.0; num_steps]; num_neurons],
            traces: vec![vec![rest_voltage; num_steps]; num_neurons],
        })
    }

    /// Returns the number of neurons in the simulation.
    pub fn num_neurons(&self) -> usize {
        self.neurons.len()
    }

    /// Returns the simulated time points, in milliseconds.
    pub fn times(&self) -> &[f64] {
        &self.times[..]
    }

    /// Returns the voltage trace of the neuron with the given ID.
    pub fn trace(&self, neuron_id: usize) -> &[f64] {
        &self.traces[neuron_id][..]
    }

    /// Stimulate a neuron with a constant current over [start, end]
    /// milliseconds. The function returns an error for an unknown neuron.
    pub fn stimulate(
        &mut self,
        neuron_id: usize,
        start: f64,
        end: f64,
        amplitude: f64,
    ) -> Result<(), SNNError> {
        if neuron_id >= self.neurons.len() {
            return Err(SNNError::InvalidParameters(format!(
                "No neuron with ID {} in a group of {}",
                neuron_id,
                self.neurons.len()
            )));
        }
        for (step, &time) in self.times.iter().enumerate() {
            if time >= start && time <= end {
                self.stimulation[neuron_id][step] = amplitude;
            }
        }
        Ok(())
    }

    /// Set the coupling weight from a source neuron to a target neuron.
    /// The function returns an error for unknown neurons.
    pub fn set_weight(
        &mut self,
        source_id: usize,
        target_id: usize,
        weight: f64,
    ) -> Result<(), SNNError> {
        if source_id >= self.neurons.len() || target_id >= self.neurons.len() {
            return Err(SNNError::InvalidParameters(format!(
                "No connection {} -> {} in a group of {}",
                source_id,
                target_id,
                self.neurons.len()
            )));
        }
        self.weights[(target_id, source_id)] = weight;
        Ok(())
    }

    /// Run the simulation over the whole time range, filling the voltage
    /// traces. Each step adds the weighted voltages of the previous step to
    /// the stimulation of coupled neurons, then advances every neuron.
    pub fn run(&mut self) {
        let num_neurons = self.neurons.len();
        log::info!(
            "Starting Hodgkin-Huxley simulation of {} neurons over {} steps...",
            num_neurons,
            self.times.len()
        );

        for step in 1..self.times.len() {
            for target_id in 0..num_neurons {
                let mut coupled = 0.0;
                for source_id in 0..num_neurons {
                    if source_id != target_id {
                        coupled +=
                            self.traces[source_id][step - 1] * self.weights[(target_id, source_id)];
                    }
                }
                self.stimulation[target_id][step] += coupled;
            }

            for (neuron_id, neuron) in self.neurons.iter_mut().enumerate() {
                neuron.step(self.stimulation[neuron_id][step - 1], self.dt);
                self.traces[neuron_id][step] = neuron.potential();
            }
        }

        log::info!("Hodgkin-Huxley simulation completed!");
    }

    /// Write the traces as CSV: one row per time point, holding the time
    /// followed by the membrane voltage of every neuron.
    pub fn write_csv<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for (step, time) in self.times.iter().enumerate() {
            let voltages = self
                .traces
                .iter()
                .map(|trace| trace[step].to_string())
                .join(",");
            writeln!(writer, "{},{}", time, voltages)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_simulation(num_neurons: usize) -> HHSimulation {
        let mut sim =
            HHSimulation::build(num_neurons, 220.0, 0.025, HHParameters::default()).unwrap();
        sim.stimulate(0, 5.0, 30.0, 10.0).unwrap();
        sim
    }

    #[test]
    fn test_invalid_build() {
        assert!(matches!(
            HHSimulation::build(0, 220.0, 0.025, HHParameters::default()),
            Err(SNNError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            HHSimulation::build(3, 220.0, 0.0, HHParameters::default()),
            Err(SNNError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            HHSimulation::build(3, -1.0, 0.025, HHParameters::default()),
            Err(SNNError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_unknown_neuron() {
        let mut sim = sample_simulation(2);
        assert!(matches!(
            sim.stimulate(2, 0.0, 1.0, 10.0),
            Err(SNNError::InvalidParameters(_))
        ));
        assert!(matches!(
            sim.set_weight(0, 2, 0.5),
            Err(SNNError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_time_range() {
        let sim = sample_simulation(1);
        assert_eq!(sim.times().len(), 8801);
        assert_eq!(sim.times()[0], 0.0);
        assert!((sim.times()[8800] - 220.0).abs() < 1e-9);
    }

    #[test]
    fn test_stimulated_neuron_fires_and_recovers() {
        let mut sim = sample_simulation(1);
        sim.run();

        let trace = sim.trace(0);
        assert_eq!(trace[0], 0.0);
        let peak = trace.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!(peak > 50.0, "no action potential, peak {}", peak);
        assert!(trace.iter().all(|v| v.is_finite()));
        // Long after the stimulation window, the neuron is back near rest.
        assert!(trace.last().unwrap().abs() < 20.0);
    }

    #[test]
    fn test_unstimulated_neuron_stays_at_rest() {
        let mut sim = HHSimulation::build(1, 50.0, 0.025, HHParameters::default()).unwrap();
        sim.run();
        assert!(sim.trace(0).iter().all(|v| v.abs() < 5.0));
    }

    #[test]
    fn test_coupling_drives_the_target() {
        let mut coupled = sample_simulation(2);
        coupled.set_weight(0, 1, 0.8).unwrap();
        coupled.run();

        let mut uncoupled = sample_simulation(2);
        uncoupled.run();

        // Without coupling the second neuron never leaves rest; with it,
        // the first neuron's action potentials drive it.
        assert!(uncoupled.trace(1).iter().all(|v| v.abs() < 5.0));
        let peak = coupled
            .trace(1)
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max);
        assert!(peak > 10.0, "coupling had no effect, peak {}", peak);
        // The source neuron is unaffected by its own output.
        assert_eq!(coupled.trace(0), uncoupled.trace(0));
    }

    #[test]
    fn test_csv_shape() {
        let mut sim = HHSimulation::build(3, 1.0, 0.25, HHParameters::default()).unwrap();
        sim.run();
        let mut buffer = Vec::new();
        sim.write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), sim.times().len());
        for line in lines {
            assert_eq!(line.split(',').count(), 4);
        }
        assert!(text.starts_with("0,0,0,0"));
    }
}
