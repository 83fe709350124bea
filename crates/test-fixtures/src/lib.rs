//! Hypothesis-space generators and golden scenarios for coteach tests.
//!
//! The generators stand in for the external hypothesis-space collaborators:
//! boundary and line concepts over binary features, and 3-node causal graphs
//! with noisy-OR transmission.

pub mod spaces;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root directory of the fixture data shipped with this crate.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// List all JSON files in a fixture subdirectory, sorted by name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut paths: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Some(path)
            } else {
                None
            }
        })
        .collect();
    paths.sort();
    paths
}

/// Which generator a golden scenario uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceKind {
    Boundary,
    Line,
}

/// A session scenario with a known outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoldenScenario {
    pub name: String,
    pub space: SpaceKind,
    pub n_features: usize,
    /// TOML overrides applied on top of the default config.
    pub config: String,
    pub max_observations: usize,
    pub expected_final_posterior: Vec<f64>,
}

impl GoldenScenario {
    /// Build the scenario's hypothesis space.
    pub fn build_space(&self) -> coteach_core::models::ConceptSpace {
        match self.space {
            SpaceKind::Boundary => spaces::boundary_space(self.n_features),
            SpaceKind::Line => spaces::line_space(self.n_features),
        }
    }
}

/// Load every golden session scenario.
pub fn golden_sessions() -> Vec<GoldenScenario> {
    list_fixtures("golden/sessions")
        .into_iter()
        .map(|path| {
            let relative = path
                .strip_prefix(fixtures_root())
                .unwrap_or(&path)
                .to_string_lossy()
                .into_owned();
            load_fixture(&relative)
        })
        .collect()
}
