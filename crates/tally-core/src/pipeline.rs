//! Per-variable pipeline and the two execution modes
//!
//! One variable goes through classify → count → moments. A run applies that
//! pipeline to every configured variable, either one after another
//! ([`ExecutionMode::Sequential`]) or as independent concurrent tasks
//! ([`ExecutionMode::Concurrent`]). Both modes call the same functions on the
//! same data and produce identical numbers.

use serde::{Deserialize, Serialize};
use tally_io::SampleSet;
use tally_stats::{value_range, validate_width, Classification, VariableStats};

use crate::config::{TallyConfig, VariableSpec};
use crate::error::{Result, Stage, TallyError};
use crate::executor::{Executor, Task};
use crate::timing::{timed, Benchmark};

/// How the variables of a run are scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    Sequential,
    Concurrent,
}

/// Everything computed for one variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableReport {
    pub name: String,
    pub unit: String,
    /// Number of observations
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub stats: VariableStats,
    pub classification: Classification,
}

/// Run the full pipeline for one variable
pub fn analyze_variable(spec: &VariableSpec, values: &[f64]) -> Result<VariableReport> {
    let classify_err = |e| TallyError::variable(&spec.name, Stage::Classify, e);
    validate_width(spec.width).map_err(classify_err)?;
    let (min, max) = value_range(values).map_err(classify_err)?;

    let mut classification =
        Classification::from_range(min, max, spec.width).map_err(classify_err)?;
    tracing::info!(
        variable = %spec.name,
        min,
        max,
        classes = classification.len(),
        "classified"
    );

    let counted = classification.count(values);
    if counted != values.len() {
        tracing::warn!(
            variable = %spec.name,
            counted,
            total = values.len(),
            "values outside every class"
        );
    }

    let stats = VariableStats::from_classification(&classification, values.len())
        .map_err(|e| TallyError::variable(&spec.name, Stage::Moments, e))?;
    tracing::debug!(
        variable = %spec.name,
        mean = stats.mean,
        std_dev = stats.std_dev,
        cv = stats.coefficient_of_variation,
        "moments computed"
    );

    Ok(VariableReport {
        name: spec.name.clone(),
        unit: spec.unit.clone(),
        count: values.len(),
        min,
        max,
        stats,
        classification,
    })
}

/// Results of one run, in variable order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub mode: ExecutionMode,
    pub variables: Vec<VariableReport>,
}

impl RunReport {
    /// Check that two runs produced the same statistics within `rel_tol`
    pub fn agrees_with(&self, other: &RunReport, rel_tol: f64) -> bool {
        let close = |a: f64, b: f64| a == b || (a - b).abs() <= rel_tol * a.abs().max(b.abs());

        self.variables.len() == other.variables.len()
            && self.variables.iter().zip(&other.variables).all(|(a, b)| {
                a.name == b.name
                    && close(a.stats.mean, b.stats.mean)
                    && close(a.stats.std_dev, b.stats.std_dev)
                    && close(
                        a.stats.coefficient_of_variation,
                        b.stats.coefficient_of_variation,
                    )
            })
    }
}

/// The configured variables, ready to run against a sample set
#[derive(Debug, Clone)]
pub struct Pipeline {
    specs: Vec<VariableSpec>,
}

impl Pipeline {
    pub fn new(specs: Vec<VariableSpec>) -> Self {
        Self { specs }
    }

    /// Height and weight as configured
    pub fn from_config(config: &TallyConfig) -> Self {
        Self::new(config.variables.specs())
    }

    pub fn specs(&self) -> &[VariableSpec] {
        &self.specs
    }

    /// Split the samples into one value sequence per variable
    pub fn columns(&self, samples: &SampleSet) -> Vec<Vec<f64>> {
        self.specs.iter().map(|s| samples.column(s.column)).collect()
    }

    /// Analyse every variable in `columns` (as returned by [`Pipeline::columns`])
    ///
    /// Fails with the first failing variable, in variable order.
    pub fn run(
        &self,
        executor: &Executor,
        columns: &[Vec<f64>],
        mode: ExecutionMode,
    ) -> Result<RunReport> {
        let jobs = self.specs.iter().zip(columns);

        let results: Vec<Result<VariableReport>> = match mode {
            ExecutionMode::Sequential => executor.install(|| {
                jobs.map(|(spec, values)| analyze_variable(spec, values))
                    .collect()
            }),
            ExecutionMode::Concurrent => {
                let tasks: Vec<Task<Result<VariableReport>>> = jobs
                    .map(|(spec, values)| {
                        Box::new(move || analyze_variable(spec, values)) as Task<_>
                    })
                    .collect();
                executor.join_all(tasks)
            }
        };

        let variables = results.into_iter().collect::<Result<Vec<_>>>()?;
        Ok(RunReport { mode, variables })
    }

    /// Run sequentially, then concurrently, timing both
    pub fn benchmark(&self, executor: &Executor, samples: &SampleSet) -> Result<Benchmark> {
        let columns = self.columns(samples);

        let sequential = timed(|| self.run(executor, &columns, ExecutionMode::Sequential));
        let sequential_elapsed = sequential.elapsed;
        let sequential = sequential.value?;

        let concurrent = timed(|| self.run(executor, &columns, ExecutionMode::Concurrent));
        let concurrent_elapsed = concurrent.elapsed;
        let concurrent = concurrent.value?;

        if !sequential.agrees_with(&concurrent, 1e-9) {
            tracing::warn!("sequential and concurrent runs disagree");
        }

        Ok(Benchmark {
            sequential,
            concurrent,
            sequential_elapsed,
            concurrent_elapsed,
            workers: executor.workers(),
        })
    }
}
