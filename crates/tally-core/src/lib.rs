//! tally-core - Grouped statistics runs for height/weight samples
//!
//! Ties the pieces together:
//!
//! - **config**: TOML/JSON configuration with defaults
//! - **pipeline**: classify → count → moments per variable, sequential or
//!   concurrent
//! - **executor**: the worker pool and join-all task groups
//! - **timing**: wall-clock measurement, speedup and efficiency
//! - **report**: text and JSON output
//!
//! # Example
//!
//! ```no_run
//! use tally_core::{Executor, Pipeline, TallyConfig};
//!
//! let config = TallyConfig::default();
//! let samples = tally_core::load_input(&config)?;
//! let executor = Executor::new(config.execution.threads)?;
//! let bench = Pipeline::from_config(&config).benchmark(&executor, &samples)?;
//! println!("{}", tally_core::report::render_benchmark(&bench, 5));
//! # Ok::<(), tally_core::TallyError>(())
//! ```

pub mod config;
pub mod error;
pub mod executor;
pub mod pipeline;
pub mod report;
pub mod timing;

pub use config::*;
pub use error::*;
pub use executor::*;
pub use pipeline::*;
pub use timing::*;

use tally_io::SampleSet;

/// Load the configured input file, rejecting one without any records
pub fn load_input(config: &TallyConfig) -> Result<SampleSet> {
    let path = &config.input.path;
    tracing::info!(path = %path.display(), "reading samples");

    let samples = tally_io::load_samples(path)?;
    if samples.is_empty() {
        return Err(TallyError::NoSamples {
            path: path.display().to_string(),
        });
    }

    tracing::info!(records = samples.len(), "samples loaded");
    Ok(samples)
}
