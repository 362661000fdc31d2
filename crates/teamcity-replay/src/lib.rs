// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! teamcity-replay: libtest results as TeamCity service messages
//!
//! This crate reads the JSON event stream of a finished `cargo test` or
//! `cargo nextest` run and replays it through
//! [`teamcity_adapter::TeamCityReporter`], so TeamCity sees each suite and test
//! as if it had been reported live.
//!
//! # Example
//!
//! ```
//! use teamcity_replay::replay_output;
//!
//! let output = r#"{"type":"test","event":"ok","name":"my-crate::my_crate$tests::it_works"}"#;
//! let (summary, sink) = replay_output(output, "tests", Vec::new()).unwrap();
//!
//! assert_eq!(summary.passed, 1);
//! assert!(String::from_utf8(sink).unwrap().contains("testFinished name='tests::it_works'"));
//! ```

pub mod config;
pub mod error;
pub mod libtest;
pub mod replay;

pub use error::ReplayError;
pub use libtest::{LibtestEvent, TestOutcome, TestRecord, parse_event, parse_run_output};
pub use replay::{ReplaySummary, SuiteRecords, group_by_suite, replay, replay_output};
