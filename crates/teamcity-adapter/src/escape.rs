// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Escaping of values embedded in service messages
//!
//! TeamCity service message values are single-quoted and the whole message is
//! bracket-delimited, so quotes, brackets and every kind of line break must be
//! escaped with the `|` escape character.
//!
//! - `|` becomes `||`
//! - `'` becomes `|'`
//! - `\n` and `\r` become `|n` and `|r`
//! - U+0085 (next line) becomes `|x`
//! - U+2028 (line separator) becomes `|l`
//! - U+2029 (paragraph separator) becomes `|p`
//! - `[` and `]` become `|[` and `|]`
//!
//! Escaping is done in a single left-to-right pass, which gives the same
//! result as applying the replacements one after another with `|` first: no
//! output of one rule is ever seen by another.

use crate::error::MessageError;

/// The escape character
const ESCAPE: char = '|';

/// Map a restricted character to its escape code, if it has one
fn escape_code(c: char) -> Option<char> {
    match c {
        '|' => Some('|'),
        '\'' => Some('\''),
        '\n' => Some('n'),
        '\r' => Some('r'),
        '\u{0085}' => Some('x'),
        '\u{2028}' => Some('l'),
        '\u{2029}' => Some('p'),
        '[' => Some('['),
        ']' => Some(']'),
        _ => None,
    }
}

/// Map an escape code back to the character it stands for
fn unescape_code(code: char) -> Option<char> {
    match code {
        '|' => Some('|'),
        '\'' => Some('\''),
        'n' => Some('\n'),
        'r' => Some('\r'),
        'x' => Some('\u{0085}'),
        'l' => Some('\u{2028}'),
        'p' => Some('\u{2029}'),
        '[' => Some('['),
        ']' => Some(']'),
        _ => None,
    }
}

/// Escape a value for use inside a service message attribute
///
/// # Example
///
/// ```
/// use teamcity_adapter::escape;
///
/// assert_eq!(escape("a|b'c\nd[e]f"), "a||b|'c|nd|[e|]f");
/// ```
#[must_use]
pub fn escape(text: &str) -> String {
    // Most names need no escaping at all
    if !needs_escaping(text) {
        return text.to_string();
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match escape_code(c) {
            Some(code) => {
                escaped.push(ESCAPE);
                escaped.push(code);
            }
            None => escaped.push(c),
        }
    }
    escaped
}

/// Escape an optional value, treating an absent value as the empty string
#[must_use]
pub fn escape_opt(text: Option<&str>) -> String {
    text.map(escape).unwrap_or_default()
}

/// Check whether a value contains any character that escaping would rewrite
///
/// When this returns `false`, [`escape`] is the identity on `text`. Escaping
/// is not idempotent otherwise, so already-escaped values must not be escaped
/// a second time.
#[must_use]
pub fn needs_escaping(text: &str) -> bool {
    text.chars().any(|c| escape_code(c).is_some())
}

/// Reverse [`escape`], turning every two-character escape back into the
/// character it stands for
///
/// # Errors
///
/// Returns `MessageError::DanglingEscape` if the input ends with a lone `|`,
/// or `MessageError::UnknownEscape` if a `|` is followed by a character that
/// is not an escape code.
pub fn unescape(text: &str) -> Result<String, MessageError> {
    let mut unescaped = String::with_capacity(text.len());
    let mut chars = text.char_indices();

    while let Some((offset, c)) = chars.next() {
        if c != ESCAPE {
            unescaped.push(c);
            continue;
        }

        let Some((_, code)) = chars.next() else {
            return Err(MessageError::DanglingEscape { offset });
        };
        match unescape_code(code) {
            Some(original) => unescaped.push(original),
            None => return Err(MessageError::UnknownEscape { found: code, offset }),
        }
    }

    Ok(unescaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_escape_plain_text_unchanged() {
        assert_eq!(escape("my_crate::tests::it_works"), "my_crate::tests::it_works");
        assert_eq!(escape(""), "");
    }

    #[test]
    fn test_escape_mixed_restricted_characters() {
        assert_eq!(escape("a|b'c\nd[e]f"), "a||b|'c|nd|[e|]f");
    }

    #[test]
    fn test_escape_each_character() {
        assert_eq!(escape("|"), "||");
        assert_eq!(escape("'"), "|'");
        assert_eq!(escape("\n"), "|n");
        assert_eq!(escape("\r"), "|r");
        assert_eq!(escape("\u{0085}"), "|x");
        assert_eq!(escape("\u{2028}"), "|l");
        assert_eq!(escape("\u{2029}"), "|p");
        assert_eq!(escape("["), "|[");
        assert_eq!(escape("]"), "|]");
    }

    #[test]
    fn test_escape_pipe_is_not_double_escaped() {
        // "|n" is a literal pipe followed by 'n', not a newline escape
        assert_eq!(escape("|n"), "||n");
        assert_eq!(escape("||"), "||||");
    }

    #[test]
    fn test_escape_keeps_other_unicode() {
        assert_eq!(escape("日本語 🔥 Ñoño"), "日本語 🔥 Ñoño");
        assert_eq!(escape("tab\there"), "tab\there");
    }

    #[test]
    fn test_escape_opt_absent_is_empty() {
        assert_eq!(escape_opt(None), "");
        assert_eq!(escape_opt(Some("it's")), "it|'s");
    }

    #[test]
    fn test_escape_is_not_idempotent() {
        let once = escape("[x]");
        let twice = escape(&once);
        assert_eq!(once, "|[x|]");
        assert_eq!(twice, "|||[x|||]");
        assert!(needs_escaping(&once));
    }

    #[test]
    fn test_escape_idempotent_without_restricted_characters() {
        let text = "plain name with spaces";
        assert!(!needs_escaping(text));
        assert_eq!(escape(&escape(text)), escape(text));
    }

    #[test]
    fn test_unescape_round_trip() {
        let original = "line1\nline2\r\n'quoted' [x] a|b \u{0085}\u{2028}\u{2029}";
        assert_eq!(unescape(&escape(original)).expect("Should unescape"), original);
    }

    #[test]
    fn test_unescape_dangling_escape() {
        assert_eq!(
            unescape("abc|"),
            Err(MessageError::DanglingEscape { offset: 3 })
        );
    }

    #[test]
    fn test_unescape_unknown_escape() {
        assert_eq!(
            unescape("a|zb"),
            Err(MessageError::UnknownEscape {
                found: 'z',
                offset: 1
            })
        );
    }
}
