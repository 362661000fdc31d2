// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for unescaping
//!
//! This fuzzes `unescape` with arbitrary, mostly malformed, input.

#![no_main]

use libfuzzer_sys::fuzz_target;

use teamcity_adapter::{escape, unescape};

fuzz_target!(|input: &str| {
    // Whatever decodes cleanly must encode back to the same text
    if let Ok(decoded) = unescape(input) {
        assert_eq!(escape(&decoded), input);
    }
});
