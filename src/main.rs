use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;
use symcat_modules::{GeneratorConfig, RunPaths, run};

#[derive(Parser, Debug)]
#[command(name = "symcat-modules")]
#[command(about = "Generate simulator modules from Symcat symptom and condition data")]
struct Args {
    /// JSON file with the parsed symptom catalog
    #[arg(short, long)]
    symptoms: PathBuf,

    /// JSON file with the parsed condition catalog
    #[arg(short, long)]
    conditions: PathBuf,

    /// INI file with population priors (defaults are used when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory the module files are written to
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Prefix for every generated file name
    #[arg(long, default_value = "")]
    prefix: String,

    /// Symptoms a patient must present before seeing a doctor (0 disables the gate)
    #[arg(long, default_value = "1")]
    min_symptoms: usize,

    /// Years of simulated history before the conditions start
    #[arg(long, default_value = "1")]
    history_years: u32,

    /// Build condition modules on a single thread
    #[arg(long)]
    sequential: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = GeneratorConfig::builder()
        .min_symptoms(args.min_symptoms)
        .num_history_years(args.history_years)
        .prefix(args.prefix)
        .parallel(!args.sequential)
        .build();
    let paths = RunPaths {
        symptoms: args.symptoms,
        conditions: args.conditions,
        priors: args.config,
        output: args.output,
    };

    let written = run(&paths, &config).with_context(|| {
        format!(
            "Failed to generate modules into {}",
            paths.output.display()
        )
    })?;
    info!("Generated {written} module files");
    Ok(())
}
