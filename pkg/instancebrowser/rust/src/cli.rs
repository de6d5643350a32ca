// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::path::PathBuf;

use clap::Parser;

/// Browse compute instances and their metric graphs.
#[derive(Debug, Default, Parser)]
#[command(name = "instance-browser", version)]
pub struct Args {
    /// YAML config file
    #[arg(long, short, env = "INSTANCE_BROWSER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the instances API
    #[arg(long, env = "INSTANCE_BROWSER_API_URL")]
    pub api_url: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, env = "INSTANCE_BROWSER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log file; the terminal is taken by the UI
    #[arg(long, env = "INSTANCE_BROWSER_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Per-request timeout in seconds; unset waits indefinitely
    #[arg(long, env = "INSTANCE_BROWSER_REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,
}
