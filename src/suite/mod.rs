//! Test specification documents.
//!
//! A suite is a YAML mapping from workflow id to the workflow's graph file and
//! its tests. Every map keeps the order of the document, which is also the
//! order tests and commands run in.

pub mod definition;

pub use definition::*;

use crate::error::ConfigError;
use std::fs;
use std::path::Path;

impl TestSuite {
    /// Parses a suite from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::SuiteParse(e.to_string()))
    }

    /// Loads a suite from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::SuiteRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(&content)
    }

    /// Total number of tests across all workflows.
    pub fn test_count(&self) -> usize {
        self.workflows.values().map(|w| w.tests.len()).sum()
    }
}
