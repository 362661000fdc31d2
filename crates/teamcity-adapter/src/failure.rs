// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Failure details attached to failed tests and suites

use std::any::Any;
use std::fmt::{Debug, Display};

/// Message and trace of a failed test or suite body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Human-readable message; emitted as an empty string when absent
    pub message: Option<String>,
    /// Full trace of the failure
    pub details: String,
}

impl Failure {
    /// Create a failure from an already-known message and trace
    #[must_use]
    pub fn new(message: Option<String>, details: impl Into<String>) -> Self {
        Self {
            message,
            details: details.into(),
        }
    }

    /// Capture an error returned by a body
    ///
    /// The message is the error's `Display` output and the trace its `Debug`
    /// output. For `anyhow::Error` the latter carries the cause chain and any
    /// captured backtrace.
    #[must_use]
    pub fn from_error<E: Display + Debug + ?Sized>(error: &E) -> Self {
        Self {
            message: Some(error.to_string()),
            details: format!("{error:?}"),
        }
    }

    /// Capture the payload of a caught panic
    ///
    /// Payloads from `panic!` with a literal or formatted message become the
    /// failure message; any other payload type leaves the message absent. The
    /// details name the panic location and include the backtrace when the
    /// context carries them.
    #[must_use]
    pub fn from_panic(payload: &(dyn Any + Send), context: Option<&PanicContext>) -> Self {
        let message = panic_message(payload);
        let what = message.as_deref().unwrap_or("non-string panic payload");

        let mut details = match context.and_then(|c| c.location.as_deref()) {
            Some(location) => format!("panicked at {location}:\n{what}"),
            None => format!("panicked:\n{what}"),
        };
        if let Some(backtrace) = context.and_then(|c| c.backtrace.as_deref()) {
            details.push_str("\n\nStack backtrace:\n");
            details.push_str(backtrace);
        }

        Self { message, details }
    }

    /// The message, or an empty string when absent
    #[must_use]
    pub fn message_or_empty(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }
}

/// Where a panic happened, as recorded by the panic hook
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanicContext {
    /// Source location as `file:line:column`
    pub location: Option<String>,
    /// Rendered backtrace, present only when one was captured
    pub backtrace: Option<String>,
}

/// Extract a human-readable message from a panic payload
fn panic_message(payload: &(dyn Any + Send)) -> Option<String> {
    if let Some(s) = payload.downcast_ref::<&str>() {
        Some((*s).to_string())
    } else {
        payload.downcast_ref::<String>().cloned()
    }
}
