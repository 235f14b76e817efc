//! NFU page-replacement simulator CLI.
//!
//! This binary provides a single entry point for all simulation modes. It performs:
//! 1. **Interactive run:** With no arguments, prompts for |VM|, |RM|, and the clock count on stdin.
//! 2. **Direct run:** `nfusim run` takes the geometry from flags or a JSON config file.
//! 3. **Analysis:** `nfusim analyze` runs many independent simulations and tabulates their totals.
//!
//! The trace channel goes to stdout, the per-tick summary to a CSV file, and
//! diagnostics (controlled by `RUST_LOG`) to stderr.

use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use nfusim_core::common::error::ConfigError;
use nfusim_core::config::{AccessModel, Config};
use nfusim_core::report::{CsvReporter, TraceReporter, csv};
use nfusim_core::sim::analysis;
use nfusim_core::Simulator;

#[derive(Parser, Debug)]
#[command(
    name = "nfusim",
    author,
    version,
    about = "Not Frequently Used (NFU) page-replacement simulator",
    long_about = "Simulate NFU page replacement over a set of virtual pages and a smaller real memory.\n\nWith no subcommand the simulator asks for the sizes interactively.\n\nExamples:\n  nfusim\n  nfusim run --vm-size 16 --rm-size 4 --clocks 50 --seed 7\n  nfusim run --config run.json --quiet\n  nfusim analyze --vm-size 16 --rm-size 4 --clocks 50 --runs 20"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single simulation with a full trace and a per-tick CSV summary.
    Run(RunArgs),

    /// Run many independent simulations and write one CSV row per run.
    Analyze {
        #[command(flatten)]
        geometry: GeometryArgs,

        /// Number of independent runs.
        #[arg(long, default_value_t = 20)]
        runs: usize,

        /// Output CSV file for the per-run totals.
        #[arg(long, default_value = "analysis.csv")]
        csv: PathBuf,
    },
}

/// Geometry and randomness flags shared by every mode.
#[derive(Args, Debug, Default)]
struct GeometryArgs {
    /// JSON configuration file; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of virtual pages (|VM|).
    #[arg(long)]
    vm_size: Option<usize>,

    /// Number of real-memory frames (|RM|); must be smaller than |VM|.
    #[arg(long)]
    rm_size: Option<usize>,

    /// Number of clock ticks to run.
    #[arg(long)]
    clocks: Option<u64>,

    /// Seed for the access generator (random if omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Access model deciding which pages are used each tick.
    #[arg(long, value_enum)]
    access_model: Option<ModelArg>,
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    geometry: GeometryArgs,

    /// Output CSV file for the per-tick summary.
    #[arg(long, default_value = "output.csv")]
    csv: PathBuf,

    /// Suppress the trace channel.
    #[arg(short, long)]
    quiet: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            geometry: GeometryArgs::default(),
            csv: PathBuf::from("output.csv"),
            quiet: false,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ModelArg {
    /// Usage-weighted access probability.
    Biased,
    /// Fair coin per page.
    Uniform,
}

impl From<ModelArg> for AccessModel {
    fn from(model: ModelArg) -> Self {
        match model {
            ModelArg::Biased => Self::Biased,
            ModelArg::Uniform => Self::Uniform,
        }
    }
}

const BANNER: &str = "To initialize the simulation of the Not Frequently Used Algorithm, please enter:
- Size of the Virtual Memory (VM);
- The size of the Real Memory (RM);
- The amount of clocks you want the algorithm to run for.
Please note that, in order for the algorithm to run properly, the following must be true:
 |VM| > |RM|.";

fn main() {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run(args)) => cmd_run(&args),
        Some(Commands::Analyze {
            geometry,
            runs,
            csv,
        }) => cmd_analyze(&geometry, runs, &csv),
        None => cmd_run(&RunArgs::default()),
    }
}

/// Installs the stderr diagnostics subscriber; `RUST_LOG` overrides the `warn` default.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Runs one simulation, tracing to stdout and summarizing to the CSV file.
fn cmd_run(args: &RunArgs) {
    let mut config = resolve_config(&args.geometry);
    if args.quiet {
        config.trace = false;
    }

    let mut sim = Simulator::new(config).unwrap_or_else(|e| fail_config(&e));

    let csv_out = CsvReporter::create(&args.csv).unwrap_or_else(|e| {
        eprintln!("Error creating {}: {}", args.csv.display(), e);
        process::exit(1);
    });
    let trace_out = sim
        .config()
        .trace
        .then(|| TraceReporter::new(BufWriter::new(io::stdout().lock())));
    let mut reporter = (trace_out, csv_out);

    let stats = match sim.run(&mut reporter) {
        Ok(stats) => stats,
        Err(e) => {
            error!(error = %e, "simulation aborted");
            eprintln!("\n[!] FATAL: {e}");
            process::exit(1);
        }
    };
    drop(reporter);

    println!("\n[*] Summary written to {}", args.csv.display());
    stats.print();
}

/// Runs a batch of simulations and writes one row per run.
fn cmd_analyze(geometry: &GeometryArgs, runs: usize, csv_path: &Path) {
    let config = resolve_config(geometry);
    if let Err(e) = config.validate() {
        fail_config(&e);
    }
    if runs == 0 {
        warn!("analysis requested with zero runs");
    }

    let outcomes = analysis::run_batch(&config, runs).unwrap_or_else(|e| {
        eprintln!("\n[!] FATAL: {e}");
        process::exit(1);
    });

    let written = File::create(csv_path)
        .and_then(|file| csv::write_batch(BufWriter::new(file), &outcomes));
    if let Err(e) = written {
        eprintln!("Error writing {}: {}", csv_path.display(), e);
        process::exit(1);
    }

    println!("[*] {} runs written to {}", outcomes.len(), csv_path.display());
    if let Some(summary) = analysis::summarize(&outcomes) {
        println!("  mean hits              {:.2}", summary.mean_hits);
        println!("  mean misses            {:.2}", summary.mean_misses);
        println!(
            "  hit rate               {:.2}% (min {:.2}%, max {:.2}%)",
            summary.mean_hit_rate * 100.0,
            summary.min_hit_rate * 100.0,
            summary.max_hit_rate * 100.0
        );
    }
}

/// Builds the configuration from the file, flags, and (if no geometry was given) the prompt.
fn resolve_config(args: &GeometryArgs) -> Config {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path).unwrap_or_else(|e| {
            eprintln!("Error loading {}: {}", path.display(), e);
            process::exit(1);
        }),
        None => Config::default(),
    };

    let no_geometry = args.config.is_none()
        && args.vm_size.is_none()
        && args.rm_size.is_none()
        && args.clocks.is_none();
    if no_geometry {
        println!("{BANNER}");
        let stdin = io::stdin();
        let (vm, rm, clocks) = read_geometry(stdin.lock()).unwrap_or_else(|e| fail_config(&e));
        config.virtual_memory_size = vm;
        config.real_memory_size = rm;
        config.clock_count = clocks;
    }

    apply_overrides(&mut config, args);
    config
}

/// Applies every flag that was given on top of `config`.
fn apply_overrides(config: &mut Config, args: &GeometryArgs) {
    if let Some(vm) = args.vm_size {
        config.virtual_memory_size = vm;
    }
    if let Some(rm) = args.rm_size {
        config.real_memory_size = rm;
    }
    if let Some(clocks) = args.clocks {
        config.clock_count = clocks;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(model) = args.access_model {
        config.access_model = model.into();
    }
}

/// Reads lines until three integers have been collected.
fn read_geometry<R: BufRead>(reader: R) -> Result<(usize, usize, u64), ConfigError> {
    let mut input = String::new();
    for line in reader.lines() {
        let line = line?;
        input.push_str(&line);
        input.push(' ');
        if input.split_whitespace().count() >= 3 {
            break;
        }
    }
    parse_geometry(&input)
}

/// Parses `|VM| |RM| clocks` from whitespace-separated text.
fn parse_geometry(input: &str) -> Result<(usize, usize, u64), ConfigError> {
    let mut fields = input.split_whitespace();
    let mut next = |name: &str| {
        fields
            .next()
            .ok_or_else(|| ConfigError::Parse(format!("missing {name}")))
    };
    let vm = next("virtual memory size")?;
    let rm = next("real memory size")?;
    let clocks = next("clock count")?;

    let not_integer = |name: &str, value: &str| {
        ConfigError::Parse(format!("{name} '{value}' is not a non-negative integer"))
    };
    let vm = vm.parse().map_err(|_| not_integer("virtual memory size", vm))?;
    let rm = rm.parse().map_err(|_| not_integer("real memory size", rm))?;
    let clocks = clocks.parse().map_err(|_| not_integer("clock count", clocks))?;
    Ok((vm, rm, clocks))
}

/// Reports a rejected configuration and exits before any simulation state exists.
fn fail_config(e: &ConfigError) -> ! {
    if let Some(notice) = rejection_notice(e) {
        println!("{notice}");
    }
    eprintln!("Error: {e}");
    let _ = io::stdout().flush();
    process::exit(1);
}

/// Prompt-style message for a rejected geometry; `None` for input errors.
const fn rejection_notice(e: &ConfigError) -> Option<&'static str> {
    match e {
        ConfigError::RealMemoryNotSmaller { .. } => {
            Some("Virtual Memory must be bigger than real memory. Please try again.")
        }
        ConfigError::NoRealMemory => {
            Some("Real memory must hold at least one frame. Please try again.")
        }
        ConfigError::Parse(_) | ConfigError::Io(_) => None,
    }
}
