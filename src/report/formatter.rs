use crate::runner::{Tally, Verdict};

/// Formats verdicts and tallies into the lines of the human-readable report.
pub struct VerdictFormatter;

impl VerdictFormatter {
    pub fn workflow_header(workflow_id: &str) -> String {
        format!("=== Running tests for workflow: {} ===", workflow_id)
    }

    /// The status line of a test followed by its detail lines.
    ///
    /// The first detail is always the test's name; a passing test then shows
    /// `PASS`, a failing one each failure message in order.
    pub fn format_verdict(workflow_id: &str, verdict: &Verdict) -> Vec<String> {
        let status = if verdict.passed() {
            "✅ PASS"
        } else {
            "❌ FAIL"
        };
        let mut lines = vec![format!(
            "[{} :: {}] {}",
            workflow_id, verdict.test_id, status
        )];
        lines.push(Self::detail(&verdict.name));
        if verdict.passed() {
            lines.push(Self::detail("PASS"));
        } else {
            lines.extend(verdict.failures.iter().map(|f| Self::detail(f)));
        }
        lines
    }

    pub fn workflow_summary(workflow_id: &str, tally: Tally) -> String {
        format!("==> {}: {}/{} passed", workflow_id, tally.passed, tally.total)
    }

    pub fn suite_summary(tally: Tally) -> String {
        format!(
            "💡 All done: {}/{} tests passed.",
            tally.passed, tally.total
        )
    }

    fn detail(message: &str) -> String {
        format!("  - {}", message)
    }
}
