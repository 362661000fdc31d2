// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! teamcity-replay: report a finished test run to TeamCity
//!
//! Reads libtest JSON events from a file or stdin and writes TeamCity service
//! messages to stdout. Logs go to stderr.

use std::io::{self, Read};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use teamcity_replay::config::Config;
use teamcity_replay::replay_output;

fn main() -> anyhow::Result<ExitCode> {
    let config = Config::parse();

    // Initialize tracing subscriber on stderr; stdout carries the service messages
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    config.validate()?;

    let output = read_input(&config)?;
    let (summary, _) = replay_output(&output, &config.suite_name, io::stdout().lock())?;

    if config.summary {
        eprintln!("{}", serde_json::to_string_pretty(&summary)?);
    }

    if summary.total() == 0 {
        warn!("No finished tests found in input");
    }

    let code = config.exit_code(&summary);
    if code != 0 {
        info!(failed = summary.failed, "Exiting with failure status");
    }

    Ok(ExitCode::from(code))
}

/// Read the whole event stream from the configured file or stdin
fn read_input(config: &Config) -> anyhow::Result<String> {
    match &config.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut output = String::new();
            io::stdin()
                .read_to_string(&mut output)
                .context("Failed to read stdin")?;
            Ok(output)
        }
    }
}
