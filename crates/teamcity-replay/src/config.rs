// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Configuration for the teamcity-replay binary
//!
//! This module provides the command-line configuration, including the input
//! source, suite naming, exit behaviour and logging options.

use std::path::PathBuf;

use clap::Parser;

use crate::replay::ReplaySummary;

/// Default suite for tests whose names carry no binary ID
pub const DEFAULT_SUITE: &str = "tests";

/// Replay libtest / nextest JSON results as TeamCity service messages
#[derive(Parser, Debug, Clone)]
#[command(name = "teamcity-replay")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Path to a libtest JSON event file
    ///
    /// Events are read from stdin when no file is given.
    ///
    /// Example:
    ///   cargo nextest run --message-format libtest-json | teamcity-replay
    #[arg(short, long, env = "TEAMCITY_REPLAY_INPUT")]
    pub input: Option<PathBuf>,

    /// Suite for tests whose names carry no nextest binary ID
    #[arg(short, long, env = "TEAMCITY_REPLAY_SUITE", default_value = DEFAULT_SUITE)]
    pub suite_name: String,

    /// Exit with status 1 if any replayed test failed
    #[arg(long, default_value = "false")]
    pub fail_on_test_failure: bool,

    /// Print a JSON summary of the replay to stderr
    #[arg(long, default_value = "false")]
    pub summary: bool,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so they never mix with the service
    /// messages on stdout.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            suite_name: DEFAULT_SUITE.to_string(),
            fail_on_test_failure: false,
            summary: false,
            verbose: false,
            quiet: false,
        }
    }
}

impl Config {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input path is specified but doesn't exist
    /// - The input path is not a regular file
    /// - The suite name is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref input) = self.input {
            if !input.exists() {
                return Err(ConfigError::InputNotFound(input.clone()));
            }
            if !input.is_file() {
                return Err(ConfigError::InputNotFile(input.clone()));
            }
        }

        if self.suite_name.trim().is_empty() {
            return Err(ConfigError::EmptySuiteName);
        }

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }

    /// Process exit status for a finished replay
    ///
    /// Failed tests only change the status when `--fail-on-test-failure` is
    /// set; the run itself is reported either way.
    #[must_use]
    pub fn exit_code(&self, summary: &ReplaySummary) -> u8 {
        if self.fail_on_test_failure && !summary.all_passed() {
            1
        } else {
            0
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Input path not found
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    /// Input path is not a regular file
    #[error("Input path is not a file: {0}")]
    InputNotFile(PathBuf),

    /// Suite name is empty
    #[error("Suite name must not be empty")]
    EmptySuiteName,
}
