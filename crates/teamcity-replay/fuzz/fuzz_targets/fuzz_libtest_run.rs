// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for libtest run output replay
//!
//! This fuzzes `parse_run_output` on line-delimited JSON from
//! `cargo nextest run --message-format libtest-json`, then replays whatever
//! parsed into service messages.

#![no_main]

use libfuzzer_sys::fuzz_target;

use teamcity_replay::{parse_run_output, replay_output};

fuzz_target!(|data: &[u8]| {
    // Invalid UTF-8 is rejected before parsing
    if let Ok(input) = std::str::from_utf8(data) {
        let parsed = parse_run_output(input, "tests");
        let replayed = replay_output(input, "tests", Vec::new());
        assert_eq!(parsed.is_ok(), replayed.is_ok());

        if let (Ok(records), Ok((summary, sink))) = (parsed, replayed) {
            assert_eq!(summary.total(), records.len());
            let out = String::from_utf8(sink).expect("reporter writes UTF-8");
            assert!(out.lines().all(|line| line.starts_with("##teamcity[")));
        }
    }
});
