// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! libtest JSON event parsing
//!
//! This module parses the newline-delimited JSON event stream written by
//! `cargo test -- -Z unstable-options --format json` and by
//! `cargo nextest run --message-format libtest-json`, keeping one
//! [`TestRecord`] per finished test.
//!
//! # Example
//!
//! ```
//! use teamcity_replay::libtest::{TestOutcome, parse_run_output};
//!
//! let output = r#"{"type":"suite","event":"started","test_count":1}
//! {"type":"test","event":"started","name":"my-crate::my_crate$tests::it_works"}
//! {"type":"test","event":"ok","name":"my-crate::my_crate$tests::it_works"}"#;
//!
//! let records = parse_run_output(output, "tests").unwrap();
//! assert_eq!(records[0].suite, "my-crate");
//! assert_eq!(records[0].name, "tests::it_works");
//! assert_eq!(records[0].outcome, TestOutcome::Passed);
//! ```

use serde::{Deserialize, Serialize};
use teamcity_adapter::Failure;
use tracing::{debug, warn};

use crate::error::ReplayError;

// ============================================================================
// Event Types
// ============================================================================

/// A single event from libtest JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LibtestEvent {
    /// Suite started or finished
    Suite(SuiteEvent),
    /// Test event (started, ok, failed, ignored, timeout)
    Test(TestEvent),
    /// Any other event type, such as benchmark results
    #[serde(other)]
    Other,
}

/// Suite-level event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteEvent {
    /// Event type: "started" or "ok"/"failed"
    pub event: String,
    /// Number of tests (only in "started" event)
    pub test_count: Option<usize>,
}

/// Test-level event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestEvent {
    /// Event type: "started", "ok", "failed", "ignored", "timeout"
    pub event: String,
    /// Test name, prefixed with the binary ID when written by nextest
    pub name: String,
    /// Execution time in seconds (only in finished events)
    pub exec_time: Option<f64>,
    /// Captured output (only in failed events)
    pub stdout: Option<String>,
}

// ============================================================================
// Test Records
// ============================================================================

/// Possible test outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestOutcome {
    /// Test passed
    Passed,
    /// Test failed
    Failed,
    /// Test was ignored/skipped
    Ignored,
    /// Test timed out
    TimedOut,
}

impl TestOutcome {
    /// Map a libtest event name to an outcome
    ///
    /// Unknown event names count as failures so they are never hidden.
    #[must_use]
    pub fn from_event(event: &str) -> Self {
        match event {
            "ok" => TestOutcome::Passed,
            "ignored" => TestOutcome::Ignored,
            "timeout" => TestOutcome::TimedOut,
            "failed" => TestOutcome::Failed,
            other => {
                warn!(event = other, "Unknown test event, treating as failed");
                TestOutcome::Failed
            }
        }
    }

    /// Whether this outcome is reported as a test failure
    #[must_use]
    pub fn is_failure(self) -> bool {
        matches!(self, TestOutcome::Failed | TestOutcome::TimedOut)
    }
}

/// A finished test, ready to be replayed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRecord {
    /// Suite the test belongs to
    pub suite: String,
    /// Test name within the suite
    pub name: String,
    /// Test outcome
    pub outcome: TestOutcome,
    /// Captured output, if any
    pub stdout: Option<String>,
}

impl TestRecord {
    /// Build the failure reported for this test
    ///
    /// The message is picked from the captured output (see `failure_message`)
    /// and the full output becomes the details.
    #[must_use]
    pub fn failure(&self) -> Failure {
        let output = self.stdout.as_deref().unwrap_or_default();
        let message = failure_message(output).or_else(|| {
            (self.outcome == TestOutcome::TimedOut).then(|| "test timed out".to_string())
        });
        Failure::new(message, output)
    }
}

/// Find the most useful one-line message in captured test output
///
/// A panic message wins, then an `Error:` line from a test returning `Err`,
/// then the first line that is not harness chatter.
fn failure_message(output: &str) -> Option<String> {
    let lines: Vec<&str> = output
        .lines()
        .map(str::trim)
        .filter(|line| !is_harness_line(line))
        .collect();

    if let Some(at) = lines.iter().position(|line| line.contains("panicked at")) {
        if let Some(message) = legacy_panic_message(lines[at]) {
            return Some(message.to_string());
        }
        if let Some(next) = lines.get(at + 1) {
            return Some((*next).to_string());
        }
    }

    lines
        .iter()
        .find(|line| line.starts_with("Error:"))
        .or_else(|| lines.first())
        .map(|line| (*line).to_string())
}

/// Check if a trimmed output line was written by the test harness
fn is_harness_line(line: &str) -> bool {
    line.is_empty()
        || line.starts_with("note:")
        || line.starts_with("test result:")
        || line == "failures:"
        || (line.starts_with("---- ") && line.ends_with(" ----"))
        || is_running_header(line)
}

/// Match `running 1 test` and `running 12 tests`
fn is_running_header(line: &str) -> bool {
    line.strip_prefix("running ")
        .and_then(|rest| rest.strip_suffix(" tests").or_else(|| rest.strip_suffix(" test")))
        .is_some_and(|count| !count.is_empty() && count.bytes().all(|b| b.is_ascii_digit()))
}

/// Message of a panic line written by toolchains before 1.73
///
/// Input: "thread 'tests::t' panicked at 'attempt to divide by zero', src/lib.rs:4:5"
/// Output: "attempt to divide by zero"
///
/// A message spanning several lines yields its first line.
fn legacy_panic_message(line: &str) -> Option<&str> {
    let (_, rest) = line.split_once("panicked at '")?;
    let message = rest.rfind("', ").map_or(rest, |end| &rest[..end]);
    (!message.is_empty()).then_some(message)
}

/// Split a test name into its suite and its name within the suite
///
/// Input: "hindsight-tests::hindsight_tests$result::tests::test_name"
/// Output: ("hindsight-tests", "result::tests::test_name")
///
/// Names without nextest's `$` separator belong to `default_suite`.
#[must_use]
pub fn split_test_name(name: &str, default_suite: &str) -> (String, String) {
    match name.split_once('$') {
        Some((binary, test)) => {
            let suite = binary
                .rsplit_once("::")
                .map_or(binary, |(binary_id, _)| binary_id);
            (suite.to_string(), test.to_string())
        }
        None => (default_suite.to_string(), name.to_string()),
    }
}

// ============================================================================
// Parsing Functions
// ============================================================================

/// Parse a single libtest JSON event
///
/// # Errors
///
/// Returns `ReplayError::Json` if the JSON is invalid.
pub fn parse_event(json: &str) -> Result<LibtestEvent, ReplayError> {
    serde_json::from_str(json).map_err(|source| ReplayError::Json { line: 1, source })
}

/// Parse libtest JSON output into one record per finished test
///
/// The output is newline-delimited JSON. Blank lines are skipped and
/// `started` events are dropped.
///
/// # Errors
///
/// Returns `ReplayError::Json` with the 1-based line number if any line is
/// invalid JSON.
pub fn parse_run_output(output: &str, default_suite: &str) -> Result<Vec<TestRecord>, ReplayError> {
    let mut records = Vec::new();

    for (index, line) in output.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let event: LibtestEvent = serde_json::from_str(line).map_err(|source| ReplayError::Json {
            line: index + 1,
            source,
        })?;

        match event {
            LibtestEvent::Suite(suite) => {
                if let Some(count) = suite.test_count {
                    debug!(test_count = count, "Suite started");
                }
            }
            LibtestEvent::Test(test) if test.event == "started" => {}
            LibtestEvent::Test(test) => {
                let (suite, name) = split_test_name(&test.name, default_suite);
                records.push(TestRecord {
                    suite,
                    name,
                    outcome: TestOutcome::from_event(&test.event),
                    stdout: test.stdout,
                });
            }
            LibtestEvent::Other => {}
        }
    }

    Ok(records)
}
