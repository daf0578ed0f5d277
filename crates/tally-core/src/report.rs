//! Human-readable and JSON reports

use serde::Serialize;
use tally_stats::{Bin, VariableStats};

use crate::pipeline::{RunReport, VariableReport};
use crate::timing::{Benchmark, Performance};

/// Class table and range of one variable
pub fn render_variable(report: &VariableReport, preview: usize) -> String {
    let classes = &report.classification;
    let mut out = String::new();

    out.push_str(&format!("=== {} ===\n", report.name));
    out.push_str(&format!("Records: {}\n", report.count));
    out.push_str(&format!("Minimum: {}, Maximum: {}\n", report.min, report.max));
    out.push_str(&format!(
        "Classes: {} (width {})\n\n",
        classes.len(),
        classes.width()
    ));
    out.push_str("Class summary:\n");
    for (i, bin) in classes.preview(preview).iter().enumerate() {
        out.push_str(&format!(
            "Class {}: [{}, {}) - Frequency: {}\n",
            i + 1,
            bin.lower,
            bin.upper,
            bin.frequency
        ));
    }
    let remaining = classes.remaining_after(preview);
    if remaining > 0 {
        out.push_str(&format!("... ({} remaining classes)\n", remaining));
    }

    out
}

/// Mean, standard deviation and CV of one variable
pub fn render_stats(report: &VariableReport) -> String {
    let VariableStats {
        mean,
        std_dev,
        coefficient_of_variation,
    } = report.stats;
    let unit = if report.unit.is_empty() {
        String::new()
    } else {
        format!(" {}", report.unit)
    };

    let mut out = format!("--- {} ---\n", report.name);
    out.push_str(&format!("Mean: {:.4}{}\n", mean, unit));
    out.push_str(&format!("Standard deviation: {:.4}{}\n", std_dev, unit));
    out.push_str(&format!(
        "Coefficient of variation: {:.4}%\n",
        coefficient_of_variation
    ));
    out
}

/// Class tables followed by the results of one run
pub fn render_run(run: &RunReport, preview: usize) -> String {
    let mut out = String::new();

    for variable in &run.variables {
        out.push_str(&render_variable(variable, preview));
        out.push('\n');
    }

    out.push_str("=== RESULTS ===\n");
    for variable in &run.variables {
        out.push('\n');
        out.push_str(&render_stats(variable));
    }

    out
}

/// Timing section
pub fn render_performance(perf: &Performance) -> String {
    let fmt_opt = |v: Option<f64>, suffix: &str| match v {
        Some(v) => format!("{:.2}{}", v, suffix),
        None => "n/a".to_string(),
    };

    let mut out = String::from("=== PERFORMANCE ===\n");
    out.push_str(&format!("Sequential time: {:.3} ms\n", perf.sequential_ms));
    out.push_str(&format!("Concurrent time: {:.3} ms\n", perf.concurrent_ms));
    out.push_str(&format!("Speedup: {}\n", fmt_opt(perf.speedup, "")));
    out.push_str(&format!(
        "Efficiency: {} ({} workers)\n",
        fmt_opt(perf.efficiency_percent, "%"),
        perf.workers
    ));
    out
}

/// Full text report of a benchmark
///
/// The statistics shown are from the concurrent run; both runs agree.
pub fn render_benchmark(bench: &Benchmark, preview: usize) -> String {
    let mut out = render_run(&bench.concurrent, preview);
    out.push('\n');
    out.push_str(&render_performance(&bench.performance()));
    out
}

/// JSON shape of one variable
#[derive(Debug, Clone, Serialize)]
pub struct VariableSummary<'a> {
    pub name: &'a str,
    pub unit: &'a str,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub width: f64,
    pub classes: usize,
    pub stats: VariableStats,
    pub preview: &'a [Bin],
    pub remaining_classes: usize,
}

impl<'a> VariableSummary<'a> {
    pub fn new(report: &'a VariableReport, preview: usize) -> Self {
        let classes = &report.classification;
        Self {
            name: &report.name,
            unit: &report.unit,
            count: report.count,
            min: report.min,
            max: report.max,
            width: classes.width(),
            classes: classes.len(),
            stats: report.stats,
            preview: classes.preview(preview),
            remaining_classes: classes.remaining_after(preview),
        }
    }
}

/// JSON shape of a benchmark
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkSummary<'a> {
    pub variables: Vec<VariableSummary<'a>>,
    pub performance: Performance,
}

/// Pretty-printed JSON report of a benchmark
pub fn benchmark_json(bench: &Benchmark, preview: usize) -> serde_json::Result<String> {
    let summary = BenchmarkSummary {
        variables: bench
            .concurrent
            .variables
            .iter()
            .map(|v| VariableSummary::new(v, preview))
            .collect(),
        performance: bench.performance(),
    };
    serde_json::to_string_pretty(&summary)
}
