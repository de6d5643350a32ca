// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! File logging in the agent's line layout:
//!
//! ```text
//! 2024-01-01 10:00:00 UTC | INSTANCE-BROWSER | ERROR | (src/browser.rs:151 in instance_browser::browser) | message
//! ```

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use env_logger::{Builder, Target};
use log::{LevelFilter, Record};
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const LOGGER_NAME: &str = "INSTANCE-BROWSER";
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second] UTC");

/// Install the global logger, appending to `path`.
pub fn init(path: &Path, level: LevelFilter) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    Builder::new()
        .filter_level(level)
        .target(Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(buf, "{}", format_line(OffsetDateTime::now_utc(), record))
        })
        .try_init()
        .context("Failed to install logger")
}

fn format_line(now: OffsetDateTime, record: &Record<'_>) -> String {
    let timestamp = now
        .format(TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| now.unix_timestamp().to_string());
    format!(
        "{timestamp} | {LOGGER_NAME} | {} | ({}:{} in {}) | {}",
        record.level(),
        record.file().unwrap_or("<unknown>"),
        record.line().unwrap_or(0),
        record.target(),
        record.args()
    )
}
