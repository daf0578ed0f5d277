//! Subcommand implementations

use std::error::Error;
use std::path::{Path, PathBuf};

use tally_core::{report, ConfigError, Executor, Pipeline, TallyConfig};

use crate::{GenerateArgs, RunArgs};

type CmdResult = Result<(), Box<dyn Error>>;

/// Configuration file if given, defaults otherwise
fn load_config(path: Option<&Path>) -> Result<TallyConfig, ConfigError> {
    match path {
        Some(path) => TallyConfig::load(path),
        None => Ok(TallyConfig::default()),
    }
}

fn apply_run_overrides(config: &mut TallyConfig, args: &RunArgs) {
    if let Some(input) = &args.input {
        config.input.path = input.clone();
    }
    if let Some(threads) = args.threads {
        config.execution.threads = threads;
    }
    if let Some(width) = args.height_width {
        config.variables.height.width = width;
    }
    if let Some(width) = args.weight_width {
        config.variables.weight.width = width;
    }
    if let Some(preview) = args.preview {
        config.report.preview_bins = preview;
    }
}

fn apply_generate_overrides(config: &mut TallyConfig, args: &GenerateArgs) -> PathBuf {
    if let Some(count) = args.count {
        config.generator.count = count;
    }
    if let Some(seed) = args.seed {
        config.generator.seed = seed;
    }
    args.output
        .clone()
        .unwrap_or_else(|| config.input.path.clone())
}

pub fn run(args: RunArgs) -> CmdResult {
    let mut config = load_config(args.config.as_deref())?;
    apply_run_overrides(&mut config, &args);
    config.validate()?;

    let samples = tally_core::load_input(&config)?;
    let executor = Executor::new(config.execution.threads)?;
    tracing::info!(
        workers = executor.workers(),
        "running sequential and concurrent passes"
    );

    let bench = Pipeline::from_config(&config).benchmark(&executor, &samples)?;

    let preview = config.report.preview_bins;
    if args.json {
        println!("{}", report::benchmark_json(&bench, preview)?);
    } else {
        print!("{}", report::render_benchmark(&bench, preview));
    }
    Ok(())
}

pub fn generate(args: GenerateArgs) -> CmdResult {
    let mut config = load_config(args.config.as_deref())?;
    let output = apply_generate_overrides(&mut config, &args);
    config.validate()?;

    let samples = tally_io::generate_samples(&config.generator);
    tally_io::save_samples(&output, &samples)?;

    println!(
        "Wrote {} records to {}",
        samples.len(),
        output.display()
    );
    Ok(())
}

pub fn show_config(path: Option<PathBuf>) -> CmdResult {
    let config = load_config(path.as_deref())?;
    print!("{}", config.to_toml()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_run_overrides() {
        let mut config = TallyConfig::default();
        let args = RunArgs {
            input: Some(PathBuf::from("other.txt")),
            threads: Some(3),
            weight_width: Some(2.5),
            ..Default::default()
        };
        apply_run_overrides(&mut config, &args);

        assert_eq!(config.input.path, PathBuf::from("other.txt"));
        assert_eq!(config.execution.threads, 3);
        assert_eq!(config.variables.height.width, 8.0);
        assert_eq!(config.variables.weight.width, 2.5);
    }

    #[test]
    fn test_generate_output_defaults_to_input_path() {
        let mut config = TallyConfig::default();
        let output = apply_generate_overrides(&mut config, &GenerateArgs::default());

        assert_eq!(output, PathBuf::from("dados.txt"));
    }

    #[test]
    fn test_generate_then_run() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dados.txt");

        generate(GenerateArgs {
            output: Some(path.clone()),
            count: Some(200),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(tally_io::load_samples(&path).unwrap().len(), 200);

        run(RunArgs {
            input: Some(path),
            threads: Some(2),
            json: true,
            ..Default::default()
        })
        .unwrap();
    }

    #[test]
    fn test_run_rejects_bad_width() {
        let result = run(RunArgs {
            height_width: Some(-1.0),
            ..Default::default()
        });
        assert!(result.is_err());
    }
}
