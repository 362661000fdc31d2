// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for teamcity-adapter

use thiserror::Error;

/// Errors that can occur while decoding escaped service message values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// A `|` at the very end of the input with nothing to escape
    #[error("Dangling escape character at byte offset {offset}")]
    DanglingEscape {
        /// Byte offset of the trailing `|`
        offset: usize,
    },

    /// A `|` followed by a character that is not an escape code
    #[error("Unknown escape sequence '|{found}' at byte offset {offset}")]
    UnknownEscape {
        /// The character following the `|`
        found: char,
        /// Byte offset of the `|`
        offset: usize,
    },
}
