// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use log::LevelFilter;
use reqwest::Url;
use serde::Deserialize;

use crate::cli::Args;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_LOG_FILE_NAME: &str = "instance-browser.log";

/// Keys accepted in the YAML config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    api_url: Option<String>,
    log_level: Option<String>,
    log_file: Option<PathBuf>,
    request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Url,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    pub request_timeout: Option<Duration>,
}

impl Config {
    /// Resolve the configuration: command line and environment first, then
    /// the config file, then built-in defaults.
    pub fn load(args: &Args) -> Result<Config> {
        let file = match &args.config {
            Some(path) => load_file(path)?,
            None => FileConfig::default(),
        };
        resolve(args, file)
    }
}

fn load_file(path: &Path) -> Result<FileConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    // An empty file is a valid, empty config.
    if contents.trim().is_empty() {
        return Ok(FileConfig::default());
    }
    serde_yaml::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
}

fn resolve(args: &Args, file: FileConfig) -> Result<Config> {
    let api_url = args
        .api_url
        .clone()
        .or(file.api_url)
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let api_url = Url::parse(&api_url).with_context(|| format!("invalid API URL {api_url:?}"))?;
    if api_url.cannot_be_a_base() {
        bail!("API URL cannot be used as a base: {api_url}");
    }

    let log_level = match args.log_level.clone().or(file.log_level) {
        Some(level) => {
            LevelFilter::from_str(&level).with_context(|| format!("invalid log level {level:?}"))?
        }
        None => LevelFilter::Info,
    };

    let log_file = args
        .log_file
        .clone()
        .or(file.log_file)
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_FILE_NAME));

    let request_timeout = args
        .request_timeout_secs
        .or(file.request_timeout_secs)
        .map(Duration::from_secs);

    Ok(Config {
        api_url,
        log_level,
        log_file,
        request_timeout,
    })
}
