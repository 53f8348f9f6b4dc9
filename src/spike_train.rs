//! Spike events and the firing log of a run.
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// A spike, i.e., a threshold crossing of one neuron at one millisecond.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Serialize, Deserialize)]
pub struct Spike {
    /// The time at which the spike occurs, in milliseconds.
    pub time: u64,
    /// The ID of the neuron producing the spike.
    pub neuron_id: usize,
}

impl Spike {
    pub fn new(time: u64, neuron_id: usize) -> Self {
        Spike { time, neuron_id }
    }
}

/// The append-only chronological record of every spike of a run.
///
/// Events are ordered by time, and by neuron ID within a millisecond.
/// The log is the sole externally consumed output of a simulation; the
/// core never reads it back.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct FiringLog {
    spikes: Vec<Spike>,
}

impl FiringLog {
    /// Creates a new empty firing log.
    pub fn new_empty() -> Self {
        FiringLog { spikes: vec![] }
    }

    /// Append a spike to the log.
    pub fn push(&mut self, spike: Spike) {
        self.spikes.push(spike);
    }

    /// Returns the number of recorded spikes.
    pub fn len(&self) -> usize {
        self.spikes.len()
    }

    /// Returns true if no spike has been recorded.
    pub fn is_empty(&self) -> bool {
        self.spikes.is_empty()
    }

    /// Returns a slice of the recorded spikes.
    pub fn spikes(&self) -> &[Spike] {
        &self.spikes[..]
    }

    /// An iterator over the recorded spikes.
    pub fn iter(&self) -> impl Iterator<Item = &Spike> {
        self.spikes.iter()
    }

    /// Returns true if the spikes are strictly ordered by (time, neuron ID).
    pub fn is_chronological(&self) -> bool {
        self.spikes
            .iter()
            .tuple_windows()
            .all(|(spike_1, spike_2)| spike_1 < spike_2)
    }

    /// Write the log in its reference textual form: one spike per line,
    /// as two whitespace-separated integers (time, neuron ID).
    pub fn write_text<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for spike in &self.spikes {
            writeln!(writer, "{} {}", spike.time, spike.neuron_id)?;
        }
        Ok(())
    }

    /// Save the log as JSON to the specified path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Load a log from a JSON file at the specified path.
    pub fn load_from<P: AsRef<Path>>(path: P) -> std::io::Result<FiringLog> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_log() -> FiringLog {
        let mut log = FiringLog::new_empty();
        log.push(Spike::new(0, 3));
        log.push(Spike::new(0, 17));
        log.push(Spike::new(2, 5));
        log.push(Spike::new(7, 5));
        log
    }

    #[test]
    fn test_spike_ordering() {
        assert!(Spike::new(0, 17) < Spike::new(1, 3));
        assert!(Spike::new(1, 3) < Spike::new(1, 4));
        assert!(Spike::new(2, 4) > Spike::new(1, 4));
    }

    #[test]
    fn test_is_chronological() {
        assert!(sample_log().is_chronological());

        let mut log = sample_log();
        log.push(Spike::new(2, 9));
        assert!(!log.is_chronological());

        // a neuron cannot fire twice within the same millisecond
        let mut log = FiringLog::new_empty();
        log.push(Spike::new(1, 4));
        log.push(Spike::new(1, 4));
        assert!(!log.is_chronological());
    }

    #[test]
    fn test_write_text() {
        let mut buffer = Vec::new();
        sample_log().write_text(&mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "0 3\n0 17\n2 5\n7 5\n"
        );
    }

    #[test]
    fn test_save_load() {
        let log = sample_log();
        let file = tempfile::NamedTempFile::new().unwrap();
        log.save_to(file.path()).unwrap();
        let loaded = FiringLog::load_from(file.path()).unwrap();
        assert_eq!(loaded, log);
    }
}
