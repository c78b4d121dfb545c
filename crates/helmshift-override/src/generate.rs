//! Override composition on top of the value engine
//!
//! Callers hand in already-parsed image references and the chart-values
//! paths where the analyzer found them; this module assembles the override
//! tree that redirects those images.

use std::collections::HashMap;

use tracing::debug;

use helmshift_values::{Path, Values};

use crate::error::{OverrideError, Result};
use crate::image::ImageRef;

/// Location of an image reference inside decoded chart values.
#[derive(Debug, Clone)]
pub struct ImageLocation {
    /// Where the analyzer found the reference.
    pub path: Path,

    /// The rewritten reference.
    pub image_ref: String,

    /// The reference string as it appeared in the chart.
    pub original_reference: String,
}

/// A Helm chart dependency with an optional alias.
#[derive(Debug, Clone)]
pub struct ChartDependency {
    pub name: String,
    pub alias: Option<String>,
}

/// A values structure the generator could not rewrite.
#[derive(Debug, Clone)]
pub struct UnsupportedStructure {
    pub path: Path,
    pub kind: String,
}

/// Generated overrides for a single Helm chart.
#[derive(Debug, Clone, Default)]
pub struct OverrideFile {
    /// Original path to the chart.
    pub chart_path: String,

    /// Base name of the chart directory.
    pub chart_name: String,

    /// The composed override tree.
    pub values: Values,

    /// Structures that could not be processed.
    pub unsupported: Vec<UnsupportedStructure>,

    /// Number of images successfully processed.
    pub processed_count: usize,

    /// Total number of images detected.
    pub total_count: usize,
}

impl OverrideFile {
    pub fn new(chart_path: impl Into<String>, chart_name: impl Into<String>) -> Self {
        Self {
            chart_path: chart_path.into(),
            chart_name: chart_name.into(),
            ..Self::default()
        }
    }

    /// Percentage of detected images that were processed.
    pub fn success_rate(&self) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }
        self.processed_count as f64 / self.total_count as f64 * 100.0
    }

    /// Serialize the override tree to a YAML document.
    pub fn to_yaml(&self) -> Result<String> {
        debug!(chart = %self.chart_name, "marshaling override file to YAML");
        Ok(serde_yaml::to_string(self.values.inner())?)
    }
}

/// Generate the override tree for a single image.
///
/// The reference is normalized, turned into its
/// `{registry, repository[, tag][, digest]}` map, and written at `path` in a
/// fresh tree. The result can be merged with other overrides via
/// [`Values::merge`].
pub fn generate_overrides(reference: &ImageRef, path: &Path) -> Result<Values> {
    if reference.registry.is_empty() || reference.repository.is_empty() {
        return Err(OverrideError::NilImageReference);
    }

    let normalized = reference.normalized();
    debug!(image = %normalized, %path, "generating image override");

    let mut overrides = Values::new();
    overrides.set_at(path, normalized.override_value())?;
    Ok(overrides)
}

/// Rewrite a dotted values path so chart names appear under their aliases.
///
/// Components that match a dependency name with a declared alias are
/// replaced; everything else passes through untouched.
pub fn construct_subchart_path(deps: &[ChartDependency], path: &str) -> String {
    let aliases: HashMap<&str, &str> = deps
        .iter()
        .filter_map(|dep| dep.alias.as_deref().map(|alias| (dep.name.as_str(), alias)))
        .collect();

    path.split('.')
        .map(|part| aliases.get(part).copied().unwrap_or(part))
        .collect::<Vec<_>>()
        .join(".")
}

/// Sanity-check a generated subchart path against declared dependencies.
///
/// An empty path is an error. A leading component that matches no dependency
/// name or alias is only logged: charts regularly carry values outside any
/// subchart scope.
pub fn verify_subchart_path(path: &str, deps: &[ChartDependency]) -> Result<()> {
    if path.is_empty() {
        return Err(OverrideError::EmptySubchartPath);
    }

    let first = path.split('.').next().unwrap_or_default();
    let known = deps
        .iter()
        .any(|dep| dep.name == first || dep.alias.as_deref() == Some(first));
    if !deps.is_empty() && !known {
        debug!(path, first, "generated path starts with unknown chart name or alias");
    }

    Ok(())
}
