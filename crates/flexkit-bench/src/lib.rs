//! # FlexKit Bench
//!
//! Performance benchmarking library for the FlexKit layout engine.
//!
//! ## Features
//!
//! - Generators for representative layout trees
//! - In-flow, deeply nested and absolutely positioned workloads
//! - LTR and RTL passes over the same tree
//! - JSON reports
//!
//! ## Usage
//!
//! ```rust,ignore
//! use flexkit_bench::Benchmark;
//!
//! let suite = Benchmark::new().run_all()?;
//! suite.print_summary();
//! ```

use flexkit_layout::{
    Direction, Edge, FlexDirection, JustifyContent, LayoutError, LayoutTree, NodeId, PositionType,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

/// Benchmark errors.
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Benchmark failed: {0}")]
    Failed(String),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single benchmark result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub name: String,
    pub iterations: u64,
    /// Total time in nanoseconds.
    pub total_ns: u64,
    pub mean_ns: u64,
    pub std_dev_ns: u64,
    pub min_ns: u64,
    pub max_ns: u64,
    /// Layout passes per second.
    pub ops_per_sec: f64,
}

impl BenchmarkResult {
    /// Summarize sample times. An empty sample set yields zeros.
    pub fn from_samples(name: impl Into<String>, samples: &[Duration]) -> Self {
        let iterations = samples.len() as u64;
        let times_ns: Vec<u64> = samples.iter().map(|d| d.as_nanos() as u64).collect();
        let total_ns: u64 = times_ns.iter().sum();
        let mean_ns = total_ns.checked_div(iterations).unwrap_or(0);
        let min_ns = times_ns.iter().copied().min().unwrap_or(0);
        let max_ns = times_ns.iter().copied().max().unwrap_or(0);

        let variance = if iterations == 0 {
            0.0
        } else {
            times_ns
                .iter()
                .map(|&t| {
                    let diff = t as f64 - mean_ns as f64;
                    diff * diff
                })
                .sum::<f64>()
                / iterations as f64
        };

        let ops_per_sec = if mean_ns > 0 {
            1_000_000_000.0 / mean_ns as f64
        } else {
            0.0
        };

        Self {
            name: name.into(),
            iterations,
            total_ns,
            mean_ns,
            std_dev_ns: variance.sqrt() as u64,
            min_ns,
            max_ns,
            ops_per_sec,
        }
    }

    pub fn format_mean(&self) -> String {
        format_duration(self.mean_ns)
    }

    pub fn print_line(&self) {
        println!(
            "{:40} {:>12} {:>12} {:>12}/s",
            self.name,
            self.format_mean(),
            format!("±{}", format_duration(self.std_dev_ns)),
            format_ops(self.ops_per_sec),
        );
    }
}

fn format_duration(ns: u64) -> String {
    if ns >= 1_000_000_000 {
        format!("{:.2} s", ns as f64 / 1_000_000_000.0)
    } else if ns >= 1_000_000 {
        format!("{:.2} ms", ns as f64 / 1_000_000.0)
    } else if ns >= 1_000 {
        format!("{:.2} µs", ns as f64 / 1_000.0)
    } else {
        format!("{} ns", ns)
    }
}

fn format_ops(ops: f64) -> String {
    if ops >= 1_000_000.0 {
        format!("{:.2}M", ops / 1_000_000.0)
    } else if ops >= 1_000.0 {
        format!("{:.2}K", ops / 1_000.0)
    } else {
        format!("{:.2}", ops)
    }
}

/// Collection of benchmark results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkSuite {
    pub name: String,
    pub results: Vec<BenchmarkResult>,
    pub total_time: Duration,
}

impl BenchmarkSuite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            results: Vec::new(),
            total_time: Duration::ZERO,
        }
    }

    pub fn add(&mut self, result: BenchmarkResult) {
        self.results.push(result);
    }

    pub fn print_summary(&self) {
        println!("\n{}", "=".repeat(80));
        println!("Benchmark Suite: {}", self.name);
        println!("{}", "=".repeat(80));
        println!(
            "{:40} {:>12} {:>12} {:>12}",
            "Name", "Mean", "StdDev", "Throughput"
        );
        println!("{}", "-".repeat(80));
        for result in &self.results {
            result.print_line();
        }
        println!("{}", "-".repeat(80));
        println!("Total time: {:?}", self.total_time);
        println!();
    }

    /// Save results as pretty-printed JSON.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), BenchError> {
        let json =
            serde_json::to_string_pretty(self).map_err(|e| BenchError::Failed(e.to_string()))?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// A row of `count` fixed-size items spread with space-between.
pub fn flat_row(count: usize) -> Result<(LayoutTree, NodeId), LayoutError> {
    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.set_flex_direction(root, FlexDirection::Row)?;
    tree.set_justify_content(root, JustifyContent::SpaceBetween)?;
    tree.set_width(root, 800.0)?;
    tree.set_height(root, 600.0)?;

    for _ in 0..count {
        let item = tree.new_node();
        tree.set_width(item, 20.0)?;
        tree.set_margin(item, Edge::All, 2.0)?;
        tree.add_child(root, item)?;
    }
    Ok((tree, root))
}

/// A chain of `depth` static boxes below a positioned root, ending in an
/// absolute leaf whose containing block is the root.
pub fn nested_static(depth: usize) -> Result<(LayoutTree, NodeId), LayoutError> {
    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.set_width(root, 800.0)?;
    tree.set_height(root, 600.0)?;
    tree.set_padding(root, Edge::All, 8.0)?;

    let mut parent = root;
    for _ in 0..depth {
        let level = tree.new_node();
        tree.set_position_type(level, PositionType::Static)?;
        tree.set_padding(level, Edge::Start, 1.0)?;
        tree.set_margin(level, Edge::Top, 1.0)?;
        tree.add_child(parent, level)?;
        parent = level;
    }

    let leaf = tree.new_node();
    tree.set_position_type(leaf, PositionType::Absolute)?;
    tree.set_position(leaf, Edge::Start, "10%")?;
    tree.set_position(leaf, Edge::Bottom, 4.0)?;
    tree.set_width(leaf, "25%")?;
    tree.set_height(leaf, 40.0)?;
    tree.add_child(parent, leaf)?;
    Ok((tree, root))
}

/// `count` absolute boxes with percentage insets, each inside its own
/// static wrapper.
pub fn absolute_grid(count: usize) -> Result<(LayoutTree, NodeId), LayoutError> {
    let mut tree = LayoutTree::new();
    let root = tree.new_node();
    tree.set_width(root, 800.0)?;
    tree.set_height(root, 600.0)?;
    tree.set_border(root, Edge::All, 2.0)?;
    tree.set_padding(root, Edge::All, 10.0)?;

    for i in 0..count {
        let wrapper = tree.new_node();
        tree.set_position_type(wrapper, PositionType::Static)?;
        tree.set_height(wrapper, 4.0)?;
        tree.add_child(root, wrapper)?;

        let node = tree.new_node();
        tree.set_position_type(node, PositionType::Absolute)?;
        let step = (i % 10) as f32 * 10.0;
        tree.set_position(node, Edge::Left, format!("{}%", step))?;
        tree.set_position(node, Edge::Top, format!("{}%", step / 2.0))?;
        tree.set_position(node, Edge::Right, "5%")?;
        tree.set_height(node, "10%")?;
        tree.add_child(wrapper, node)?;
    }
    Ok((tree, root))
}

/// Benchmark runner.
pub struct Benchmark {
    pub warmup: u64,
    pub iterations: u64,
}

impl Benchmark {
    pub fn new() -> Self {
        Self {
            warmup: 10,
            iterations: 100,
        }
    }

    pub fn with_iterations(mut self, iterations: u64) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_warmup(mut self, warmup: u64) -> Self {
        self.warmup = warmup;
        self
    }

    /// Time `f`, stopping at the first error.
    pub fn run<F>(&self, name: &str, mut f: F) -> Result<BenchmarkResult, BenchError>
    where
        F: FnMut() -> Result<(), LayoutError>,
    {
        debug!(
            name,
            warmup = self.warmup,
            iterations = self.iterations,
            "Running benchmark"
        );

        for _ in 0..self.warmup {
            f()?;
        }

        let mut samples = Vec::with_capacity(self.iterations as usize);
        for _ in 0..self.iterations {
            let start = Instant::now();
            f()?;
            samples.push(start.elapsed());
        }
        Ok(BenchmarkResult::from_samples(name, &samples))
    }

    /// Lay out a generated tree repeatedly in `direction`.
    fn bench_tree(
        &self,
        name: &str,
        (mut tree, root): (LayoutTree, NodeId),
        direction: Direction,
    ) -> Result<BenchmarkResult, BenchError> {
        let nodes = tree.node_count();
        self.run(&format!("{} ({} nodes)", name, nodes), || {
            tree.calculate_layout(root, None, None, direction)
        })
    }

    /// Run all standard benchmarks.
    pub fn run_all(&self) -> Result<BenchmarkSuite, BenchError> {
        let start = Instant::now();
        let mut suite = BenchmarkSuite::new("FlexKit Layout");

        suite.add(self.bench_tree("flow/row/small", flat_row(10)?, Direction::Ltr)?);
        suite.add(self.bench_tree("flow/row/large", flat_row(1000)?, Direction::Ltr)?);
        suite.add(self.bench_tree("flow/row/rtl", flat_row(1000)?, Direction::Rtl)?);
        suite.add(self.bench_tree("static/nested/10", nested_static(10)?, Direction::Ltr)?);
        suite.add(self.bench_tree("static/nested/100", nested_static(100)?, Direction::Rtl)?);
        suite.add(self.bench_tree("absolute/grid/100", absolute_grid(100)?, Direction::Ltr)?);

        suite.total_time = start.elapsed();
        Ok(suite)
    }
}

impl Default for Benchmark {
    fn default() -> Self {
        Self::new()
    }
}
