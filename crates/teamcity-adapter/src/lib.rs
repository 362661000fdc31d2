// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! teamcity-adapter: TeamCity service message reporting for test runs
//!
//! This library crate lets a test engine report a tree of suites and tests to
//! TeamCity. Each lifecycle event becomes one escaped service message line:
//!
//! ```text
//! ##teamcity[testSuiteStarted name='parser']
//! ##teamcity[testStarted name='parses empty input']
//! ##teamcity[testFinished name='parses empty input']
//! ##teamcity[testSuiteFinished name='parser']
//! ```
//!
//! # Example
//!
//! ```no_run
//! use teamcity_adapter::{FrameworkAdapter, TeamCityReporter};
//!
//! let reporter = TeamCityReporter::stdout();
//! reporter.enter_suite("parser", false, || {
//!     reporter.enter_test("parses empty input", false, || Ok::<_, String>(()));
//!     reporter.enter_test("slow case", true, || Ok::<_, String>(()));
//!     Ok::<_, String>(())
//! });
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod escape;
pub mod failure;
pub mod message;
mod panic_capture;
pub mod reporter;

pub use error::MessageError;
pub use escape::{escape, escape_opt, needs_escaping, unescape};
pub use failure::{Failure, PanicContext};
pub use message::{MESSAGE_PREFIX, MessageType, ServiceMessage};
pub use reporter::{FrameworkAdapter, TeamCityReporter};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::MessageError;
    pub use crate::failure::Failure;
    pub use crate::reporter::{FrameworkAdapter, TeamCityReporter};
}
