//! tally - grouped statistics for height/weight samples
//!
//! `tally generate` writes a synthetic sample file, `tally run` classifies
//! both variables, prints their statistics and compares sequential against
//! concurrent execution time.

mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tally", version, about = "Grouped-frequency statistics for height/weight samples")]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify the samples and report statistics and timings
    Run(RunArgs),

    /// Write a synthetic sample file
    Generate(GenerateArgs),

    /// Print the effective configuration as TOML
    Config {
        /// Configuration file (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
struct RunArgs {
    /// Configuration file (.toml or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sample file; defaults to dados.txt
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Worker threads (0 = one per core)
    #[arg(short = 't', long)]
    threads: Option<usize>,

    /// Class width for height
    #[arg(long)]
    height_width: Option<f64>,

    /// Class width for weight
    #[arg(long)]
    weight_width: Option<f64>,

    /// Number of classes listed per variable
    #[arg(long)]
    preview: Option<usize>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Default)]
struct GenerateArgs {
    /// Configuration file (.toml or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file; defaults to the configured input path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of records
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Run(args) => commands::run(args),
        Commands::Generate(args) => commands::generate(args),
        Commands::Config { config } => commands::show_config(config),
    };

    if let Err(err) = result {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "tally",
            "run",
            "--input",
            "people.txt",
            "--threads",
            "2",
            "--height-width",
            "5",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.input, Some(PathBuf::from("people.txt")));
                assert_eq!(args.threads, Some(2));
                assert_eq!(args.height_width, Some(5.0));
                assert_eq!(args.weight_width, None);
                assert!(args.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from(["tally", "-v", "generate", "-n", "500", "--seed", "9"]).unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.count, Some(500));
                assert_eq!(args.seed, Some(9));
                assert!(args.output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["tally"]).is_err());
    }
}
