use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use izhinet::config::SimulationConfig;
use izhinet::error::SNNError;
use izhinet::hh::neuron::HHParameters;
use izhinet::hh::simulation::HHSimulation;
use izhinet::simulator::Simulator;

#[derive(Parser, Debug)]
#[command(about = "Simulate networks of spiking neurons")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate a dense network of Izhikevich neurons and write its firing log
    Network(NetworkArgs),
    /// Simulate a few Hodgkin-Huxley neurons and write their voltage traces as CSV
    Hh(HHArgs),
}

#[derive(Parser, Debug)]
struct NetworkArgs {
    /// The seed of the random number source (required, for reproducibility)
    #[arg(long)]
    seed: u64,
    /// The number of excitatory neurons
    #[arg(short = 'E', long, default_value = "800")]
    num_excitatory: usize,
    /// The number of inhibitory neurons
    #[arg(short = 'I', long, default_value = "200")]
    num_inhibitory: usize,
    /// The simulation duration in milliseconds
    #[arg(short = 'T', long, default_value = "1000")]
    duration: u64,
    /// Write the firing log to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Write the firing log as JSON instead of plain text
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct HHArgs {
    /// The number of neurons
    #[arg(short = 'N', long, default_value = "1")]
    num_neurons: usize,
    /// The simulation duration in milliseconds
    #[arg(short = 'T', long, default_value = "220")]
    duration: f64,
    /// The Euler integration step in milliseconds
    #[arg(long, default_value = "0.025")]
    dt: f64,
    /// The amplitude of the stimulation applied to neuron 0
    #[arg(long, default_value = "10")]
    stim_amplitude: f64,
    /// The start of the stimulation window in milliseconds
    #[arg(long, default_value = "5")]
    stim_start: f64,
    /// The end of the stimulation window in milliseconds
    #[arg(long, default_value = "30")]
    stim_end: f64,
    /// Write the voltage traces to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn make_writer(output: &Option<PathBuf>) -> io::Result<Box<dyn Write>> {
    match output {
        Some(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

fn run_network(args: &NetworkArgs) -> Result<(), SNNError> {
    let config = SimulationConfig::build(
        args.num_excitatory,
        args.num_inhibitory,
        args.duration,
        args.seed,
    )?;

    let mut sim = Simulator::new(&config);
    sim.run()?;
    let log = sim.into_firing_log();

    let mut writer = make_writer(&args.output)?;
    if args.json {
        serde_json::to_writer_pretty(&mut writer, &log)
            .map_err(|e| SNNError::IOError(e.to_string()))?;
        writeln!(writer)?;
    } else {
        log.write_text(&mut writer)?;
    }
    writer.flush()?;
    Ok(())
}

fn run_hh(args: &HHArgs) -> Result<(), SNNError> {
    let mut sim = HHSimulation::build(
        args.num_neurons,
        args.duration,
        args.dt,
        HHParameters::default(),
    )?;
    sim.stimulate(0, args.stim_start, args.stim_end, args.stim_amplitude)?;
    sim.run();

    let mut writer = make_writer(&args.output)?;
    sim.write_csv(&mut writer)?;
    writer.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    let result = match &cli.command {
        Command::Network(args) => run_network(args),
        Command::Hh(args) => run_hh(args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
