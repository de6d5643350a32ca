// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Display formatting for chart series.

use log::debug;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

use crate::model::SeriesPoint;

const LABEL_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");

#[derive(Debug, Clone, PartialEq)]
pub struct FormattedSeriesPoint {
    /// Wall-clock `HH:mm` label.
    pub label: String,
    pub value: f64,
}

/// Map every point to its display form. `None` stays `None` so the chart can
/// show its placeholder; otherwise the output has exactly one entry per input
/// point, in the same order.
pub fn format_series(points: Option<&[SeriesPoint]>) -> Option<Vec<FormattedSeriesPoint>> {
    let points = points?;
    Some(
        points
            .iter()
            .map(|point| FormattedSeriesPoint {
                label: format_timestamp(&point.timestamp),
                value: point.value,
            })
            .collect(),
    )
}

/// Format an RFC 3339 timestamp as 24-hour `HH:mm` in the offset it was
/// written with. Anything unparseable is returned as-is.
pub fn format_timestamp(timestamp: &str) -> String {
    let formatted = OffsetDateTime::parse(timestamp, &Rfc3339)
        .ok()
        .and_then(|dt| dt.format(LABEL_FORMAT).ok());

    match formatted {
        Some(label) => label,
        None => {
            debug!("leaving unparseable timestamp as-is: {timestamp:?}");
            timestamp.to_string()
        }
    }
}
