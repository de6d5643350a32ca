// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

// Correctness
#![deny(clippy::indexing_slicing)]
#![deny(clippy::string_slice)]
#![deny(clippy::cast_possible_wrap)]
// Panicking code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::unimplemented)]
#![deny(clippy::todo)]
// Debug code that shouldn't be in production
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]

pub mod api;
pub mod app;
pub mod browser;
pub mod chart;
pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod model;
pub mod series;
pub mod ui;

pub use api::{HttpInstanceApi, InstanceApi};
pub use browser::{Fetched, InstanceBrowser, Request, ViewState};
pub use errors::FetchError;
pub use model::{GraphData, InstanceDetail, InstanceSummary, SeriesPoint};
pub use series::{FormattedSeriesPoint, format_series};
