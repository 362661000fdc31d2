// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Suite and test lifecycle reporting
//!
//! A test engine hands each suite or test body to the reporter, which brackets
//! it with start and finish messages. Errors returned by a body and panics
//! raised inside it are turned into failure messages at the boundary of the
//! call that ran it, so one failing body never stops its siblings or
//! ancestors from being reported. A panic's details name the file and line it
//! was raised at, followed by a backtrace when `RUST_BACKTRACE` enables one.
//!
//! # Example
//!
//! ```
//! use teamcity_adapter::{FrameworkAdapter, TeamCityReporter};
//!
//! let reporter = TeamCityReporter::new(Vec::new());
//! reporter.enter_suite("math", false, || {
//!     reporter.enter_test("adds", false, || Ok::<_, String>(2 + 2));
//!     reporter.enter_test("divides", false, || Err::<(), _>("division by zero".to_string()));
//!     Ok::<_, String>(())
//! });
//!
//! let output = String::from_utf8(reporter.into_inner()).unwrap();
//! assert_eq!(output.lines().count(), 6);
//! ```

use std::cell::RefCell;
use std::fmt::{Debug, Display};
use std::io::{self, Write};

use tracing::{debug, error, trace};

use crate::failure::Failure;
use crate::message::{MessageType, ServiceMessage};
use crate::panic_capture::catch_panic;

/// Interface through which a test engine reports suites and tests
///
/// Neither method returns an error: every failure of a body is reported as a
/// service message and then swallowed.
pub trait FrameworkAdapter {
    /// Report a suite, running `suite_fn` unless the suite is ignored
    ///
    /// A suite start is always reported. An ignored suite reports nothing
    /// further and its body is never run.
    fn enter_suite<F, E>(&self, name: &str, ignored: bool, suite_fn: F)
    where
        F: FnOnce() -> Result<(), E>,
        E: Display + Debug;

    /// Report a test, running `test_fn` unless the test is ignored
    ///
    /// The value produced by a passing test is discarded.
    fn enter_test<F, T, E>(&self, name: &str, ignored: bool, test_fn: F)
    where
        F: FnOnce() -> Result<T, E>,
        E: Display + Debug;
}

/// Reports suites and tests as TeamCity service messages on a writer
///
/// The sink is held in a `RefCell` so bodies can call back into the same
/// reporter for nested suites and tests. The reporter is not `Sync`; engines
/// running tests in parallel need one reporter per worker.
pub struct TeamCityReporter<W: Write> {
    sink: RefCell<W>,
}

impl TeamCityReporter<io::Stdout> {
    /// Create a reporter writing to the process's standard output
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TeamCityReporter<W> {
    /// Create a reporter writing to `sink`
    #[must_use]
    pub fn new(sink: W) -> Self {
        Self {
            sink: RefCell::new(sink),
        }
    }

    /// Consume the reporter and return its sink
    #[must_use]
    pub fn into_inner(self) -> W {
        self.sink.into_inner()
    }

    /// Write one message followed by a line break, then flush
    ///
    /// Write failures are logged and dropped; reporting calls never fail.
    fn emit(&self, message: ServiceMessage<'_>) {
        trace!(kind = %message.kind(), entry = message.name(), "Emitting service message");

        let mut sink = self.sink.borrow_mut();
        let written = writeln!(sink, "{message}").and_then(|()| sink.flush());
        if let Err(e) = written {
            error!(
                kind = %message.kind(),
                entry = message.name(),
                error = %e,
                "Failed to write service message"
            );
        }
    }
}

impl<W: Write> FrameworkAdapter for TeamCityReporter<W> {
    fn enter_suite<F, E>(&self, name: &str, ignored: bool, suite_fn: F)
    where
        F: FnOnce() -> Result<(), E>,
        E: Display + Debug,
    {
        self.emit(ServiceMessage::new(MessageType::SuiteStarted, name));

        if ignored {
            // No matching finish message is sent for an ignored suite
            debug!(suite = name, "Suite ignored, body not run");
            return;
        }

        match run_body(suite_fn) {
            Ok(()) => self.emit(ServiceMessage::new(MessageType::SuiteFinished, name)),
            Err(failure) => {
                debug!(suite = name, reason = failure.message_or_empty(), "Suite failed");
                self.emit(ServiceMessage::failed(
                    MessageType::SuiteFinished,
                    name,
                    &failure,
                ));
            }
        }
    }

    fn enter_test<F, T, E>(&self, name: &str, ignored: bool, test_fn: F)
    where
        F: FnOnce() -> Result<T, E>,
        E: Display + Debug,
    {
        if ignored {
            self.emit(ServiceMessage::new(MessageType::TestIgnored, name));
            return;
        }

        self.emit(ServiceMessage::new(MessageType::TestStarted, name));

        match run_body(test_fn) {
            Ok(()) => self.emit(ServiceMessage::new(MessageType::TestFinished, name)),
            Err(failure) => {
                debug!(test = name, reason = failure.message_or_empty(), "Test failed");
                self.emit(ServiceMessage::failed(MessageType::TestFailed, name, &failure));
            }
        }
    }
}

/// Run a body, capturing either its error or its panic as a [`Failure`]
fn run_body<F, T, E>(body: F) -> Result<(), Failure>
where
    F: FnOnce() -> Result<T, E>,
    E: Display + Debug,
{
    match catch_panic(body) {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(e)) => Err(Failure::from_error(&e)),
        Err(failure) => Err(failure),
    }
}
