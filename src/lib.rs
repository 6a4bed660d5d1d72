//! # flowprobe - Conformance Testing for Workflow Graphs
//!
//! **flowprobe** drives n8n-style workflow graphs through an external execution
//! engine and checks the resulting execution trace against the expectations of
//! a declarative test suite.
//!
//! ## Core Workflow
//!
//! Each test follows the same path:
//!
//! 1.  **Load the Suite**: Parse a YAML test specification into a [`suite::TestSuite`].
//!     Every test names exactly one entry node, either a `trigger` (input is
//!     injected into the graph) or a `webhook` (input is sent over HTTP).
//! 2.  **Patch**: For trigger tests, [`workflow::patch`] adds a manual start
//!     node and a static output node carrying the test input, wired to the same
//!     downstream nodes as the real trigger.
//! 3.  **Execute**: A [`driver::Engine`] imports and runs the patched graph; the
//!     execution trace is pulled out of the engine's noisy output with
//!     [`trace::extract_first_json_object`].
//! 4.  **Compare**: [`comparator::evaluate`] checks every expected node against
//!     its last run in the trace and reports all mismatches at once.
//!
//! [`runner::TestRunner`] sequences these steps, runs pre/post shell commands
//! and folds verdicts into pass/total tallies.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flowprobe::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let suite = TestSuite::from_file(Path::new("tests.utn8n"))?;
//!
//!     let config = RunnerConfig::default().with_engine_prefix("docker exec n8n n8n");
//!     let runner = TestRunner::from_config(&config)?;
//!
//!     let tally = runner.run_suite(&suite, &mut ConsoleReporter);
//!     std::process::exit(if tally.is_success() { 0 } else { 1 });
//! }
//! ```

pub mod comparator;
pub mod driver;
pub mod error;
pub mod prelude;
pub mod report;
pub mod runner;
pub mod suite;
pub mod trace;
pub mod workflow;
