//! Run configuration for the documentation builder.
//!
//! The flags only change how hrefs are computed and how files are scheduled;
//! they never change the metadata that ends up in the tree.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::markup::Severity;

/// Configuration for a transcription run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScribeConfig {
    /// Give every class its own href segment instead of grouping them under `classes/`
    pub separate_classes: bool,
    /// Give every function its own href segment instead of grouping them under `routines/`
    pub separate_functions: bool,
    /// Load and extract the files of a directory on the rayon pool
    pub parallel: bool,
    /// Extra ignore patterns, same syntax as `.transcribeignore`
    pub exclude: Vec<String>,
    /// Lowest renderer diagnostic severity that is kept (and logged)
    pub report_level: Severity,
}

impl Default for ScribeConfig {
    fn default() -> Self {
        Self {
            separate_classes: true,
            separate_functions: true,
            parallel: true,
            exclude: Vec::new(),
            report_level: Severity::Silent,
        }
    }
}

impl ScribeConfig {
    /// Load a configuration from a JSON file; missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file '{}'", path.display()))
    }
}
