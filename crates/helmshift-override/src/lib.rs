//! Helmshift Override - Image registry override composition for Helm charts
//!
//! This crate sits between the chart analyzer (which finds image references
//! in decoded values) and the value engine in `helmshift-values`. It turns
//! parsed image references into override trees, scopes paths through
//! subchart aliases, and renders finished trees as YAML, JSON, or `--set`
//! argument lists.

pub mod error;
pub mod generate;
pub mod image;
pub mod output;

pub use error::{OverrideError, Result};
pub use generate::{
    ChartDependency, ImageLocation, OverrideFile, UnsupportedStructure, construct_subchart_path,
    generate_overrides, verify_subchart_path,
};
pub use image::ImageRef;
pub use output::{OutputFormat, render};
