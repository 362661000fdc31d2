// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Service message rendering
//!
//! Each lifecycle event becomes one line of the form
//!
//! ```text
//! ##teamcity[testStarted name='my_test']
//! ##teamcity[testFailed name='my_test' text='boom' errorDetails='...' status='ERROR']
//! ```
//!
//! Key names and their order are fixed by the TeamCity log parser.

use std::fmt;

use crate::escape::{escape, escape_opt};
use crate::failure::Failure;

/// Prefix shared by every service message
pub const MESSAGE_PREFIX: &str = "##teamcity[";

/// Kind of lifecycle event reported to TeamCity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    /// A suite has started
    SuiteStarted,
    /// A suite has finished, successfully or not
    SuiteFinished,
    /// A test has started
    TestStarted,
    /// A test has passed
    TestFinished,
    /// A test has failed
    TestFailed,
    /// A test was skipped
    TestIgnored,
}

impl MessageType {
    /// All message types
    pub const ALL: [MessageType; 6] = [
        MessageType::SuiteStarted,
        MessageType::SuiteFinished,
        MessageType::TestStarted,
        MessageType::TestFinished,
        MessageType::TestFailed,
        MessageType::TestIgnored,
    ];

    /// The protocol tag for this message type
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            MessageType::SuiteStarted => "testSuiteStarted",
            MessageType::SuiteFinished => "testSuiteFinished",
            MessageType::TestStarted => "testStarted",
            MessageType::TestFinished => "testFinished",
            MessageType::TestFailed => "testFailed",
            MessageType::TestIgnored => "testIgnored",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A single service message, borrowed from the values it reports
#[derive(Debug, Clone, Copy)]
pub struct ServiceMessage<'a> {
    kind: MessageType,
    name: &'a str,
    failure: Option<&'a Failure>,
}

impl<'a> ServiceMessage<'a> {
    /// A message carrying only a name
    #[must_use]
    pub fn new(kind: MessageType, name: &'a str) -> Self {
        Self {
            kind,
            name,
            failure: None,
        }
    }

    /// A message carrying a name plus failure text and details
    #[must_use]
    pub fn failed(kind: MessageType, name: &'a str, failure: &'a Failure) -> Self {
        Self {
            kind,
            name,
            failure: Some(failure),
        }
    }

    /// The message type
    #[must_use]
    pub fn kind(&self) -> MessageType {
        self.kind
    }

    /// The unescaped name
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// The failure, if this is a failure message
    #[must_use]
    pub fn failure(&self) -> Option<&'a Failure> {
        self.failure
    }
}

impl fmt::Display for ServiceMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{MESSAGE_PREFIX}{} name='{}'", self.kind, escape(self.name))?;
        if let Some(failure) = self.failure {
            write!(
                f,
                " text='{}' errorDetails='{}' status='ERROR'",
                escape_opt(failure.message.as_deref()),
                escape(&failure.details)
            )?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_tags() {
        let tags: Vec<&str> = MessageType::ALL.iter().map(|t| t.tag()).collect();
        assert_eq!(
            tags,
            vec![
                "testSuiteStarted",
                "testSuiteFinished",
                "testStarted",
                "testFinished",
                "testFailed",
                "testIgnored",
            ]
        );
    }

    #[test]
    fn test_plain_message() {
        let msg = ServiceMessage::new(MessageType::TestStarted, "t1");
        assert_eq!(msg.to_string(), "##teamcity[testStarted name='t1']");
    }

    #[test]
    fn test_plain_message_escapes_name() {
        let msg = ServiceMessage::new(MessageType::SuiteStarted, "it's [a] suite");
        assert_eq!(
            msg.to_string(),
            "##teamcity[testSuiteStarted name='it|'s |[a|] suite']"
        );
    }

    #[test]
    fn test_failure_message() {
        let failure = Failure::new(Some("boom".to_string()), "trace\n  at line 1");
        let msg = ServiceMessage::failed(MessageType::TestFailed, "t1", &failure);
        assert_eq!(
            msg.to_string(),
            "##teamcity[testFailed name='t1' text='boom' errorDetails='trace|n  at line 1' status='ERROR']"
        );
    }

    #[test]
    fn test_failure_message_without_text() {
        let failure = Failure::new(None, "details");
        let msg = ServiceMessage::failed(MessageType::SuiteFinished, "s1", &failure);
        assert_eq!(
            msg.to_string(),
            "##teamcity[testSuiteFinished name='s1' text='' errorDetails='details' status='ERROR']"
        );
    }

    #[test]
    fn test_rendered_message_is_single_line() {
        let failure = Failure::new(Some("a\r\nb".to_string()), "c\u{2028}d\u{0085}e\u{2029}");
        let msg = ServiceMessage::failed(MessageType::TestFailed, "line1\nline2", &failure);
        let rendered = msg.to_string();
        assert_eq!(rendered.lines().count(), 1);
        assert!(rendered.contains("name='line1|nline2'"));
    }
}
