//! Progress and result reporting.

mod formatter;

pub use formatter::VerdictFormatter;

use crate::runner::{Tally, Verdict};

/// Receives progress events while a suite runs.
///
/// All methods default to doing nothing, so implementors only override the
/// events they care about.
pub trait Reporter {
    fn workflow_started(&mut self, _workflow_id: &str) {}
    fn test_finished(&mut self, _workflow_id: &str, _verdict: &Verdict) {}
    fn workflow_finished(&mut self, _workflow_id: &str, _tally: Tally) {}
    fn suite_finished(&mut self, _tally: Tally) {}
}

/// Prints the report to standard output as the suite runs.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn workflow_started(&mut self, workflow_id: &str) {
        println!("\n{}", VerdictFormatter::workflow_header(workflow_id));
    }

    fn test_finished(&mut self, workflow_id: &str, verdict: &Verdict) {
        println!();
        for line in VerdictFormatter::format_verdict(workflow_id, verdict) {
            println!("{}", line);
        }
    }

    fn workflow_finished(&mut self, workflow_id: &str, tally: Tally) {
        println!("{}", VerdictFormatter::workflow_summary(workflow_id, tally));
    }

    fn suite_finished(&mut self, tally: Tally) {
        println!("\n{}", VerdictFormatter::suite_summary(tally));
    }
}

/// Discards every event.
#[derive(Debug, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {}
