// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for the reporter
//!
//! Arbitrary names and failure messages must always produce exactly one line
//! per reported event.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use teamcity_adapter::{FrameworkAdapter, TeamCityReporter};

#[derive(Debug, Arbitrary)]
struct Input {
    suite: String,
    test: String,
    ignored: bool,
    error: Option<String>,
}

fuzz_target!(|input: Input| {
    let reporter = TeamCityReporter::new(Vec::new());
    reporter.enter_suite(&input.suite, false, || {
        reporter.enter_test(&input.test, input.ignored, || match &input.error {
            Some(message) => Err(message.clone()),
            None => Ok(()),
        });
        Ok::<_, String>(())
    });

    let out = String::from_utf8(reporter.into_inner()).expect("reporter writes UTF-8");
    let expected = if input.ignored { 3 } else { 4 };
    assert_eq!(out.matches('\n').count(), expected);
});
