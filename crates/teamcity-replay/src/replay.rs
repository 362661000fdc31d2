// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Replaying finished test records through a [`FrameworkAdapter`]
//!
//! Records are grouped into suites in first-appearance order, then each suite
//! and test is entered on the adapter with a body that reproduces the
//! recorded outcome.

use std::collections::HashMap;
use std::fmt;
use std::io::Write;

use serde::{Deserialize, Serialize};
use teamcity_adapter::{Failure, FrameworkAdapter, TeamCityReporter};
use tracing::{debug, info};

use crate::error::ReplayError;
use crate::libtest::{TestOutcome, TestRecord, parse_run_output};

/// The tests of one suite, in input order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteRecords {
    /// Suite name
    pub name: String,
    /// Tests in the suite
    pub tests: Vec<TestRecord>,
}

/// Counts of replayed tests by outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaySummary {
    /// Suites replayed
    pub suites: usize,
    /// Tests passed
    pub passed: usize,
    /// Tests failed or timed out
    pub failed: usize,
    /// Tests ignored
    pub ignored: usize,
}

impl ReplaySummary {
    /// Total tests replayed
    #[must_use]
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.ignored
    }

    /// Check if all tests passed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// A recorded failure, replayed as the error of a test body
///
/// `Display` yields the failure message and `Debug` the captured output, which
/// is how the reporter reads an error's message and trace.
struct RecordedFailure(Failure);

impl fmt::Display for RecordedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.message_or_empty())
    }
}

impl fmt::Debug for RecordedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.details)
    }
}

/// Group records by suite, keeping first-appearance order of suites and input
/// order of tests
#[must_use]
pub fn group_by_suite(records: Vec<TestRecord>) -> Vec<SuiteRecords> {
    let mut suites: Vec<SuiteRecords> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let slot = *index.entry(record.suite.clone()).or_insert_with(|| {
            suites.push(SuiteRecords {
                name: record.suite.clone(),
                tests: Vec::new(),
            });
            suites.len() - 1
        });
        suites[slot].tests.push(record);
    }

    suites
}

/// Replay grouped suites through an adapter
pub fn replay<A: FrameworkAdapter>(adapter: &A, suites: &[SuiteRecords]) -> ReplaySummary {
    let mut summary = ReplaySummary::default();

    for suite in suites {
        debug!(suite = %suite.name, tests = suite.tests.len(), "Replaying suite");
        summary.suites += 1;

        adapter.enter_suite(&suite.name, false, || {
            for test in &suite.tests {
                match test.outcome {
                    TestOutcome::Passed => summary.passed += 1,
                    TestOutcome::Ignored => summary.ignored += 1,
                    TestOutcome::Failed | TestOutcome::TimedOut => summary.failed += 1,
                }

                let ignored = test.outcome == TestOutcome::Ignored;
                adapter.enter_test(&test.name, ignored, || {
                    if test.outcome.is_failure() {
                        Err(RecordedFailure(test.failure()))
                    } else {
                        Ok(())
                    }
                });
            }
            Ok::<_, RecordedFailure>(())
        });
    }

    summary
}

/// Parse libtest JSON output and replay it as service messages on `sink`
///
/// Returns the summary together with the sink.
///
/// # Errors
///
/// Returns `ReplayError::Json` if the output is not valid libtest JSON. Nothing
/// is written to the sink in that case.
pub fn replay_output<W: Write>(
    output: &str,
    default_suite: &str,
    sink: W,
) -> Result<(ReplaySummary, W), ReplayError> {
    let suites = group_by_suite(parse_run_output(output, default_suite)?);
    let reporter = TeamCityReporter::new(sink);
    let summary = replay(&reporter, &suites);

    info!(
        suites = summary.suites,
        passed = summary.passed,
        failed = summary.failed,
        ignored = summary.ignored,
        "Replay complete"
    );
    Ok((summary, reporter.into_inner()))
}
