//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the
//! flowprobe crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use flowprobe::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let suite = TestSuite::from_file(Path::new("tests.utn8n"))?;
//! let runner = TestRunner::from_config(&RunnerConfig::default())?;
//! let tally = runner.run_suite(&suite, &mut SilentReporter);
//! println!("{}/{} passed", tally.passed, tally.total);
//! # Ok(())
//! # }
//! ```

// Orchestration
pub use crate::runner::{RunnerConfig, Tally, TestRunner, Verdict};

// Test suite model
pub use crate::suite::{Assertions, NodeExpectation, Role, TestCase, TestSuite, WorkflowSuite};

// Workflow graphs and patching
pub use crate::workflow::{WorkflowGraph, patch};

// Engine access
pub use crate::driver::{CliEngine, Engine, HttpWebhookClient, WebhookClient, WebhookResponse};

// Traces and comparison
pub use crate::comparator::evaluate;
pub use crate::trace::{ExecutionTrace, extract_first_json_object};

// Reporting
pub use crate::report::{ConsoleReporter, Reporter, SilentReporter, VerdictFormatter};

// Error types
pub use crate::error::{
    AssertionFailure, CommandError, ConfigError, ExecutionError, ExtractionError, TestError,
};

// Standard library re-exports commonly used with this crate
pub use std::path::Path;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
