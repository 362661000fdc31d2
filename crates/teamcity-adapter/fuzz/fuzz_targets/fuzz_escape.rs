// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for escaping
//!
//! Escaped text must never contain a line break and must always unescape back
//! to the original input.

#![no_main]

use libfuzzer_sys::fuzz_target;

use teamcity_adapter::{escape, unescape};

fuzz_target!(|input: &str| {
    let escaped = escape(input);
    assert!(!escaped.contains(['\n', '\r', '\u{0085}', '\u{2028}', '\u{2029}']));
    assert_eq!(unescape(&escaped).as_deref(), Ok(input));
});
