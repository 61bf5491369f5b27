//! Assertion accumulation for the validate phase.
//!
//! Each check a script performs is independent: failures are collected
//! into a [`CheckSet`] rather than short-circuiting, so one run reports
//! every violated expectation. A script may still bail out early on a
//! derived-value computation that later checks depend on by returning a
//! `ScriptError` from `validate`.

use std::fmt;

/// One observed-vs-expected mismatch from `validate`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{check}: expected {expected}, actual {actual}")]
pub struct AssertionFailure {
    /// Human-readable label of the check.
    pub check: String,
    /// Rendered expected value (or bound).
    pub expected: String,
    /// Rendered observed value.
    pub actual: String,
}

/// Accumulator for one `validate` invocation.
#[derive(Debug)]
pub struct CheckSet {
    proposal_id: String,
    passed: usize,
    failures: Vec<AssertionFailure>,
}

impl CheckSet {
    /// Empty set for one proposal.
    #[must_use]
    pub fn new(proposal_id: impl Into<String>) -> Self {
        Self {
            proposal_id: proposal_id.into(),
            passed: 0,
            failures: Vec::new(),
        }
    }

    /// Require exact equality.
    pub fn expect_eq<T>(&mut self, check: impl Into<String>, expected: T, actual: T)
    where
        T: PartialEq + fmt::Display,
    {
        if expected == actual {
            self.passed += 1;
        } else {
            self.failures.push(AssertionFailure {
                check: check.into(),
                expected: expected.to_string(),
                actual: actual.to_string(),
            });
        }
    }

    /// Require `actual <= bound`.
    ///
    /// Used where the script declares an upper bound rather than an exact
    /// value, e.g. clawback allowances whose true amount is not known at
    /// authoring time.
    pub fn expect_at_most(&mut self, check: impl Into<String>, bound: u128, actual: u128) {
        if actual <= bound {
            self.passed += 1;
        } else {
            self.failures.push(AssertionFailure {
                check: check.into(),
                expected: format!("<= {bound}"),
                actual: actual.to_string(),
            });
        }
    }

    /// Require a condition to hold.
    pub fn expect_true(&mut self, check: impl Into<String>, condition: bool) {
        self.expect_eq(check, true, condition);
    }

    /// Checks that have passed so far.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.passed
    }

    /// Failures recorded so far.
    #[must_use]
    pub fn failures(&self) -> &[AssertionFailure] {
        &self.failures
    }

    /// Fold into the final report.
    #[must_use]
    pub fn into_report(self) -> ValidationReport {
        ValidationReport {
            proposal_id: self.proposal_id,
            passed: self.passed,
            failures: self.failures,
        }
    }
}

/// Outcome of the validate phase for one proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Proposal the report belongs to.
    pub proposal_id: String,
    /// Number of checks that held.
    pub passed: usize,
    /// Every check that did not hold.
    pub failures: Vec<AssertionFailure>,
}

impl ValidationReport {
    /// Whether every check held.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return write!(
                f,
                "proposal {}: {} checks passed",
                self.proposal_id, self.passed
            );
        }
        writeln!(
            f,
            "proposal {}: {} of {} checks failed",
            self.proposal_id,
            self.failures.len(),
            self.passed + self.failures.len()
        )?;
        for failure in &self.failures {
            writeln!(f, "  - {failure}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn failures_accumulate_instead_of_short_circuiting() {
        let mut checks = CheckSet::new("TC-000");
        checks.expect_eq("supply delta", 100u128, 99u128);
        checks.expect_eq("timelock balance", 0u128, 5u128);
        checks.expect_eq("safe balance", 7u128, 7u128);

        assert_eq!(checks.passed(), 1);
        assert_eq!(checks.failures().len(), 2);

        let report = checks.into_report();
        assert!(!report.is_clean());
        assert_eq!(report.failures[0].check, "supply delta");
        assert_eq!(report.failures[1].check, "timelock balance");
    }

    #[test]
    fn at_most_accepts_the_bound_itself() {
        let mut checks = CheckSet::new("TC-000");
        checks.expect_at_most("clawback allowance", 100, 100);
        checks.expect_at_most("clawback allowance", 100, 99);
        checks.expect_at_most("clawback allowance", 100, 101);

        assert_eq!(checks.passed(), 2);
        assert_eq!(checks.failures().len(), 1);
        assert_eq!(checks.failures()[0].expected, "<= 100");
    }

    #[test]
    fn report_renders_every_failure() {
        let mut checks = CheckSet::new("TC-122");
        checks.expect_eq("a", 1, 2);
        checks.expect_eq("b", 3, 4);
        let rendered = checks.into_report().to_string();
        assert!(rendered.contains("a: expected 1, actual 2"));
        assert!(rendered.contains("b: expected 3, actual 4"));
    }
}
