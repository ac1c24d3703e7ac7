//! csynth command line
//!
//! # Usage
//!
//! ```bash
//! csynth --db functions.json --num-mutants 8 --probability 40 seeds/*.c
//! RUST_LOG=csynth_core=debug csynth --db functions.json --config csynth.yaml seed.c
//! ```

use anyhow::Context;
use clap::Parser;
use csynth_core::{CompcertValidator, FunctionDb, ProcessBackend, SynthConfig};
use csynth_orchestration::{init_thread_pool, BatchDriver, SeedSynthesizer};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "csynth")]
#[command(about = "Semantics-preserving mutation of C seed programs", long_about = None)]
struct Cli {
    /// Function database (JSON)
    #[arg(long)]
    db: PathBuf,

    /// Configuration file (YAML, `version: 1`)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Mutants per seed
    #[arg(short, long)]
    num_mutants: Option<usize>,

    /// Per-tag inclusion probability in percent
    #[arg(short, long)]
    probability: Option<u32>,

    /// RNG seed for reproducible passes
    #[arg(long)]
    seed: Option<u64>,

    /// Remove unused tag residue from mutants
    #[arg(long)]
    strip_unused_tags: bool,

    /// Build mutants one at a time
    #[arg(long)]
    sequential: bool,

    /// Worker threads (default: 75% of cores)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Directory for mutants (default: next to each seed)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Write a JSON batch summary here
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Seed programs
    #[arg(required = true)]
    seeds: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SynthConfig::from_yaml(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => SynthConfig::default(),
    };
    if let Some(num_mutants) = cli.num_mutants {
        config.synthesis.num_mutants = num_mutants;
    }
    if let Some(probability) = cli.probability {
        config.synthesis.probability = probability;
    }
    if let Some(seed) = cli.seed {
        config.synthesis.seed = Some(seed);
    }
    if cli.strip_unused_tags {
        config.synthesis.strip_unused_tags = true;
    }
    if cli.sequential {
        config.synthesis.parallel = false;
    }
    config.validate().context("invalid configuration")?;

    init_thread_pool(cli.jobs);

    let db = FunctionDb::load(&cli.db)
        .with_context(|| format!("loading function database {}", cli.db.display()))?;

    let backend = Arc::new(ProcessBackend::new(config.toolchain.clone()));
    let mut synthesizer = SeedSynthesizer::new(backend, Arc::new(db), config.synthesis.clone());
    if let Some(validator) = CompcertValidator::from_config(&config.toolchain) {
        synthesizer = synthesizer.with_validator(Arc::new(validator));
    }
    if let Some(dir) = &cli.out_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;
        synthesizer = synthesizer.with_output_dir(dir);
    }

    let summary = BatchDriver::new(synthesizer).run(&cli.seeds);
    if let Some(path) = &cli.summary {
        std::fs::write(path, summary.to_json()?)
            .with_context(|| format!("writing summary {}", path.display()))?;
    }

    for report in &summary.reports {
        println!("{}: {}", report.seed.display(), report.status_line());
    }
    println!(
        "{} seed(s), {} failed, {} mutant(s) written",
        summary.seeds, summary.failed_seeds, summary.mutants_written
    );
    Ok(())
}
