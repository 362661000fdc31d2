// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Property-based tests for teamcity-adapter
//!
//! These tests use proptest to check that escaping holds its framing
//! guarantees for arbitrary text, and that reporting never splits a message
//! across lines or lets a body's failure escape.

use proptest::prelude::*;
use teamcity_adapter::{
    Failure, FrameworkAdapter, MessageType, ServiceMessage, TeamCityReporter, escape,
    needs_escaping, unescape,
};

// ============================================================================
// Strategies
// ============================================================================

/// Generate strings weighted towards characters that need escaping
fn hostile_string() -> impl Strategy<Value = String> {
    let restricted = prop_oneof![
        Just('|'),
        Just('\''),
        Just('\n'),
        Just('\r'),
        Just('\u{0085}'),
        Just('\u{2028}'),
        Just('\u{2029}'),
        Just('['),
        Just(']'),
    ];
    let any_char = any::<char>();
    prop_oneof![
        Just(String::new()),
        Just("##teamcity[testFinished name='x']".to_string()),
        Just("日本語テスト 🔥".to_string()),
        prop::collection::vec(prop_oneof![restricted, any_char], 0..64)
            .prop_map(|chars| chars.into_iter().collect::<String>()),
        ".*{0,100}".prop_map(|s| s),
    ]
}

/// Check that every quote and bracket in escaped text is itself escaped
fn delimiters_are_escaped(escaped: &str) -> bool {
    let mut pipes = 0usize;
    for c in escaped.chars() {
        match c {
            '\'' | '[' | ']' if pipes % 2 == 0 => return false,
            '|' => {
                pipes += 1;
                continue;
            }
            _ => {}
        }
        pipes = 0;
    }
    pipes % 2 == 0
}

proptest! {
    #[test]
    fn prop_unescape_reverses_escape(s in hostile_string()) {
        let escaped = escape(&s);
        prop_assert_eq!(unescape(&escaped), Ok(s));
    }

    #[test]
    fn prop_escaped_text_has_no_line_breaks(s in hostile_string()) {
        let escaped = escape(&s);
        let line_breaks = ['\n', '\r', '\u{0085}', '\u{2028}', '\u{2029}'];
        prop_assert!(!escaped.contains(line_breaks));
    }

    #[test]
    fn prop_escaped_text_has_no_bare_delimiters(s in hostile_string()) {
        prop_assert!(delimiters_are_escaped(&escape(&s)));
    }

    #[test]
    fn prop_escape_is_identity_only_without_restricted_chars(s in hostile_string()) {
        let escaped = escape(&s);
        prop_assert_eq!(escaped == s, !needs_escaping(&s));
    }

    #[test]
    fn prop_second_escape_changes_text_when_first_did(s in hostile_string()) {
        let once = escape(&s);
        let twice = escape(&once);
        prop_assert_eq!(twice == once, !needs_escaping(&s));
    }

    #[test]
    fn prop_message_renders_on_one_line(
        name in hostile_string(),
        text in hostile_string(),
        details in hostile_string(),
    ) {
        let failure = Failure::new(Some(text), details);
        for kind in [MessageType::TestFailed, MessageType::SuiteFinished] {
            let rendered = ServiceMessage::failed(kind, &name, &failure).to_string();
            prop_assert!(!rendered.contains(['\n', '\r']));
            prop_assert!(rendered.starts_with("##teamcity["));
            prop_assert!(rendered.ends_with(" status='ERROR']"));
        }
    }

    #[test]
    fn prop_reporter_emits_one_line_per_event(
        name in hostile_string(),
        ignored in any::<bool>(),
        fails in any::<bool>(),
    ) {
        let reporter = TeamCityReporter::new(Vec::new());
        reporter.enter_test(&name, ignored, || if fails { Err("failed") } else { Ok(()) });

        let out = String::from_utf8(reporter.into_inner()).expect("Output should be UTF-8");
        let expected = if ignored { 1 } else { 2 };
        prop_assert_eq!(out.matches('\n').count(), expected);
        prop_assert!(out.ends_with('\n'));
    }
}
