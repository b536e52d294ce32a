//! Runs fixtures in both directions and compares the computed boxes.

use crate::fixture::{BoxSpec, Fixture};
use flexkit_common::{FlexkitError, Result};
use flexkit_layout::{Direction, LayoutTree, NodeId};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Each fixture runs LTR first, then RTL on the same tree.
const DIRECTIONS: [Direction; 2] = [Direction::Ltr, Direction::Rtl];

/// One box that did not match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mismatch {
    pub path: String,
    pub direction: String,
    pub expected: BoxSpec,
    pub actual: BoxSpec,
}

/// Outcome of one fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureResult {
    pub name: String,
    pub passed: bool,
    pub checked: usize,
    pub mismatches: Vec<Mismatch>,
    pub error: Option<String>,
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub fixtures: Vec<FixtureResult>,
}

impl RunReport {
    fn from_results(fixtures: Vec<FixtureResult>) -> Self {
        let passed = fixtures.iter().filter(|r| r.passed).count();
        Self {
            total: fixtures.len(),
            passed,
            failed: fixtures.len() - passed,
            fixtures,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| FlexkitError::fixture_with_source("cannot encode report", e))?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

fn direction_name(direction: Direction) -> &'static str {
    match direction {
        Direction::Rtl => "rtl",
        Direction::Ltr | Direction::Inherit => "ltr",
    }
}

/// Border box of `node` as `[left, top, width, height]`.
pub fn box_of(tree: &LayoutTree, node: NodeId) -> Result<BoxSpec> {
    let layout = tree
        .computed_layout(node)
        .map_err(|e| FlexkitError::layout_with_source("missing node", e))?;
    Ok([layout.left, layout.top, layout.width, layout.height])
}

fn within_tolerance(expected: &BoxSpec, actual: &BoxSpec, tolerance: f32) -> bool {
    expected
        .iter()
        .zip(actual)
        .all(|(e, a)| (e - a).abs() <= tolerance)
}

/// Run one fixture in LTR then RTL.
pub fn run_fixture(fixture: &Fixture, tolerance: f32) -> Result<FixtureResult> {
    let mut built = fixture.build()?;
    let mut mismatches = Vec::new();

    for direction in DIRECTIONS {
        built
            .tree
            .calculate_layout(
                built.root,
                fixture.available_width,
                fixture.available_height,
                direction,
            )
            .map_err(|e| FlexkitError::layout_with_source(format!("{} failed", fixture.name), e))?;

        for checkpoint in &built.checkpoints {
            let expected = match direction {
                Direction::Rtl => checkpoint.expected.rtl,
                Direction::Ltr | Direction::Inherit => checkpoint.expected.ltr,
            };
            let actual = box_of(&built.tree, checkpoint.node)?;
            if !within_tolerance(&expected, &actual, tolerance) {
                mismatches.push(Mismatch {
                    path: checkpoint.path.clone(),
                    direction: direction_name(direction).to_string(),
                    expected,
                    actual,
                });
            }
        }
    }

    debug!(
        fixture = %fixture.name,
        checked = built.checkpoints.len(),
        mismatches = mismatches.len(),
        "ran fixture"
    );
    Ok(FixtureResult {
        name: fixture.name.clone(),
        passed: mismatches.is_empty(),
        checked: built.checkpoints.len() * DIRECTIONS.len(),
        mismatches,
        error: None,
    })
}

/// Collect fixture files: `path` itself, or the `.json` files directly
/// inside it, sorted by name.
pub fn collect_fixtures(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(FlexkitError::NotFound(path.display().to_string()));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let file = entry?.path();
        if file.extension().map(|e| e == "json").unwrap_or(false) {
            files.push(file);
        }
    }
    files.sort();
    Ok(files)
}

/// Run every fixture under `path`. A fixture that cannot be loaded or built
/// counts as failed instead of aborting the run.
pub fn run_path(path: &Path, tolerance: f32) -> Result<RunReport> {
    let files = collect_fixtures(path)?;
    info!(count = files.len(), path = %path.display(), "running fixtures");

    let mut results = Vec::with_capacity(files.len());
    for file in files {
        let name = file
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let result = Fixture::load(&file).and_then(|fixture| run_fixture(&fixture, tolerance));
        match result {
            Ok(result) => {
                if !result.passed {
                    warn!(fixture = %result.name, mismatches = result.mismatches.len(), "fixture failed");
                }
                results.push(result);
            }
            Err(e) => {
                warn!(fixture = %name, error = %e, "fixture errored");
                results.push(FixtureResult {
                    name,
                    passed: false,
                    checked: 0,
                    mismatches: Vec::new(),
                    error: Some(e.to_string()),
                });
            }
        }
    }
    Ok(RunReport::from_results(results))
}

/// A computed box tree, for `dump`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpNode {
    pub path: String,
    #[serde(rename = "box")]
    pub border_box: BoxSpec,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<DumpNode>,
}

/// Lay out a fixture in one direction and return its box tree.
pub fn dump_fixture(fixture: &Fixture, direction: Direction) -> Result<DumpNode> {
    let mut built = fixture.build()?;
    built
        .tree
        .calculate_layout(
            built.root,
            fixture.available_width,
            fixture.available_height,
            direction,
        )
        .map_err(|e| FlexkitError::layout_with_source(format!("{} failed", fixture.name), e))?;
    dump_node(&built.tree, built.root, "root".to_string())
}

fn dump_node(tree: &LayoutTree, node: NodeId, path: String) -> Result<DumpNode> {
    let children = tree
        .children(node)
        .map_err(|e| FlexkitError::layout_with_source("missing node", e))?
        .iter()
        .enumerate()
        .map(|(index, &child)| dump_node(tree, child, format!("{}/{}", path, index)))
        .collect::<Result<Vec<_>>>()?;
    Ok(DumpNode {
        border_box: box_of(tree, node)?,
        path,
        children,
    })
}
