// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for teamcity-replay

use thiserror::Error;

/// Errors that can occur while replaying a test run
#[derive(Debug, Error)]
pub enum ReplayError {
    /// A line of the event stream is not a valid libtest JSON event
    #[error("JSON parse error on line {line}: {source}")]
    Json {
        /// 1-based line number in the input
        line: usize,
        /// The underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// Error reading the event stream
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
