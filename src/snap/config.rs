//! Configuration for the snap engine

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a snap configuration file
#[derive(Error, Debug)]
pub enum SnapConfigError {
    #[error("Failed to read snap config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse snap config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Snap options, read fresh on every evaluation
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Master switch; `false` disables every kind of snapping
    pub enabled: bool,

    /// Edge-to-edge alignment (left/right, top/bottom)
    #[serde(alias = "edges")]
    pub edges_enabled: bool,

    /// Center-to-center alignment
    #[serde(alias = "centers")]
    pub centers_enabled: bool,

    /// Maximum anchor distance treated as coincident
    #[serde(alias = "tolerance_units")]
    pub tolerance: f64,

    /// Grid step for rounding candidate positions, if any
    pub grid: Option<f64>,

    /// Minimum widget width after a resize
    pub min_width: f64,

    /// Minimum widget height after a resize
    pub min_height: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            edges_enabled: true,
            centers_enabled: true,
            tolerance: 3.0,
            grid: None,
            min_width: 40.0,
            min_height: 30.0,
        }
    }
}

/// TOML structure: options live under a `[snap]` table
#[derive(Deserialize)]
struct TomlSnapFile {
    #[serde(default)]
    snap: SnapConfig,
}

impl SnapConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SnapConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, SnapConfigError> {
        let parsed: TomlSnapFile = toml::from_str(content)?;
        Ok(parsed.snap)
    }

    /// Turn snapping on or off
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Gate edge-to-edge alignment
    pub fn with_edges(mut self, enabled: bool) -> Self {
        self.edges_enabled = enabled;
        self
    }

    /// Gate center-to-center alignment
    pub fn with_centers(mut self, enabled: bool) -> Self {
        self.centers_enabled = enabled;
        self
    }

    /// Set the snap tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set or clear the grid step
    pub fn with_grid(mut self, grid: Option<f64>) -> Self {
        self.grid = grid;
        self
    }

    /// Set the minimum size enforced after resizing
    pub fn with_min_size(mut self, width: f64, height: f64) -> Self {
        self.min_width = width;
        self.min_height = height;
        self
    }

    /// Whether alignment snapping runs for this evaluation
    pub fn active(&self, bypass: bool) -> bool {
        self.enabled && !bypass
    }

    /// Whether two coordinates are close enough to snap
    pub fn within(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.tolerance
    }
}
