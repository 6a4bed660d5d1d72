use std::iter::Sum;
use std::ops::Add;

/// The outcome of a single test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub test_id: String,
    /// The test's display name.
    pub name: String,
    /// Failure messages in the order they were found. Empty means the test passed.
    pub failures: Vec<String>,
}

impl Verdict {
    pub fn new(test_id: impl Into<String>, name: impl Into<String>, failures: Vec<String>) -> Self {
        Self {
            test_id: test_id.into(),
            name: name.into(),
            failures,
        }
    }

    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Pass/total counters, folded per workflow and across the whole suite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub passed: usize,
    pub total: usize,
}

impl Tally {
    pub fn new(passed: usize, total: usize) -> Self {
        Self { passed, total }
    }

    /// The tally of a single verdict.
    pub fn of(verdict: &Verdict) -> Self {
        Self {
            passed: usize::from(verdict.passed()),
            total: 1,
        }
    }

    pub fn failed(&self) -> usize {
        self.total - self.passed
    }

    /// Whether every counted test passed. An empty tally counts as success.
    pub fn is_success(&self) -> bool {
        self.passed == self.total
    }
}

impl Add for Tally {
    type Output = Tally;

    fn add(self, rhs: Tally) -> Tally {
        Tally {
            passed: self.passed + rhs.passed,
            total: self.total + rhs.total,
        }
    }
}

impl Sum for Tally {
    fn sum<I: Iterator<Item = Tally>>(iter: I) -> Tally {
        iter.fold(Tally::default(), Add::add)
    }
}
