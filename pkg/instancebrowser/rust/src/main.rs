// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use instance_browser::cli::Args;
use instance_browser::config::Config;
use instance_browser::{HttpInstanceApi, app, logging};
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(&args)?;
    logging::init(&config.log_file, config.log_level)?;
    info!(
        "instance-browser starting (version {}), API at {}",
        env!("CARGO_PKG_VERSION"),
        config.api_url
    );

    let api = HttpInstanceApi::new(config.api_url, config.request_timeout)?;
    app::run(Arc::new(api)).await
}
