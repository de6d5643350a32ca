// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Line chart of a formatted series.
//!
//! The x axis is categorical: point `i` sits at `x = i` and carries its own
//! label, so ticks follow the points rather than elapsed time.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Chart, Dataset, GraphType, LegendPosition, Paragraph, Widget};

use crate::series::FormattedSeriesPoint;

pub const NO_DATA: &str = "No data available";
const TITLE: &str = " Line Chart ";
const SERIES_NAME: &str = "value";

const LINE_COLOR: Color = Color::Rgb(0x88, 0x84, 0xd8);
const GRID_COLOR: Color = Color::DarkGray;
const HIGHLIGHT_COLOR: Color = Color::Yellow;

pub struct SeriesChart<'a> {
    points: Option<&'a [FormattedSeriesPoint]>,
    highlight: Option<usize>,
}

impl<'a> SeriesChart<'a> {
    pub fn new(points: Option<&'a [FormattedSeriesPoint]>) -> Self {
        Self {
            points,
            highlight: None,
        }
    }

    /// Point described by the tooltip line.
    pub fn highlight(mut self, index: Option<usize>) -> Self {
        self.highlight = index;
        self
    }
}

impl Widget for SeriesChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(points) = self.points else {
            Paragraph::new(NO_DATA)
                .style(Style::default().fg(Color::Gray))
                .block(Block::bordered())
                .render(area, buf);
            return;
        };

        let [frame_area, tooltip_area] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);
        let block = Block::bordered().title(TITLE);
        let inner = block.inner(frame_area);
        block.render(frame_area, buf);
        let [plot_area, label_row] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

        let data: Vec<(f64, f64)> = points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.value))
            .collect();
        let x_max = points.len().saturating_sub(1).max(1) as f64;

        let (y_min, y_max) = value_bounds(points);
        let y_ticks = [y_min, (y_min + y_max) / 2.0, y_max];
        let y_labels: Vec<String> = y_ticks.iter().map(|&y| format_value(y)).collect();

        let grid: Vec<[(f64, f64); 2]> = y_ticks.iter().map(|&y| [(0.0, y), (x_max, y)]).collect();
        let highlighted: Vec<(f64, f64)> = self
            .highlight
            .and_then(|i| data.get(i).copied())
            .into_iter()
            .collect();

        let mut datasets: Vec<Dataset> = grid
            .iter()
            .map(|line| {
                Dataset::default()
                    .marker(Marker::Dot)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(GRID_COLOR))
                    .data(line)
            })
            .collect();
        datasets.push(
            Dataset::default()
                .name(SERIES_NAME)
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(LINE_COLOR))
                .data(&data),
        );
        datasets.push(
            Dataset::default()
                .marker(Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(HIGHLIGHT_COLOR))
                .data(&highlighted),
        );

        let graph = graph_area(plot_area, &y_labels);

        // X labels go in `label_row`, each under its own point.
        Chart::new(datasets)
            .x_axis(Axis::default().bounds([0.0, x_max]))
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(Color::Gray))
                    .bounds([y_min, y_max])
                    .labels(y_labels),
            )
            .legend_position(Some(LegendPosition::TopRight))
            .hidden_legend_constraints((Constraint::Ratio(1, 1), Constraint::Ratio(1, 1)))
            .render(plot_area, buf);

        render_x_labels(points, graph, label_row, buf);

        if let Some(point) = self.highlight.and_then(|i| points.get(i)) {
            Paragraph::new(Line::from(vec![
                Span::styled(
                    format!(" {} ", point.label),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" {SERIES_NAME}: {}", format_value(point.value))),
                Span::styled("  [←/→]", Style::default().fg(Color::DarkGray)),
            ]))
            .render(tooltip_area, buf);
        }
    }
}

/// Plotting area the chart leaves once the y labels and axis line are laid
/// out to the left of it.
fn graph_area(plot_area: Rect, y_labels: &[String]) -> Rect {
    let label_width = y_labels
        .iter()
        .map(|label| Span::raw(label.as_str()).width())
        .max()
        .unwrap_or(0);
    let label_width = u16::try_from(label_width)
        .unwrap_or(u16::MAX)
        .min(plot_area.width / 3);
    let mut left = plot_area.left().saturating_add(label_width);
    if left.saturating_add(1) < plot_area.right() {
        left += 1;
    }
    Rect::new(
        left,
        plot_area.top(),
        plot_area.right().saturating_sub(left),
        plot_area.height,
    )
}

/// Column of point `index` out of `count` spread over `graph_area`.
fn point_column(index: usize, count: usize, graph_area: Rect) -> u16 {
    let span = f64::from(graph_area.width.saturating_sub(1));
    let offset = if count > 1 {
        (span * index as f64 / (count - 1) as f64).round()
    } else {
        0.0
    };
    graph_area.left().saturating_add(offset as u16)
}

/// One label per point, centred under it. A label that would run into the
/// previous one is left out.
fn render_x_labels(points: &[FormattedSeriesPoint], graph_area: Rect, row: Rect, buf: &mut Buffer) {
    if row.height == 0 {
        return;
    }
    let style = Style::default().fg(Color::Gray);
    let mut next_free = row.left();
    for (i, point) in points.iter().enumerate() {
        let width = u16::try_from(Span::raw(point.label.as_str()).width()).unwrap_or(u16::MAX);
        let Some(last_start) = row.right().checked_sub(width) else {
            continue;
        };
        let start = point_column(i, points.len(), graph_area)
            .saturating_sub(width / 2)
            .clamp(row.left(), last_start.max(row.left()));
        if start < next_free || start > last_start {
            continue;
        }
        buf.set_string(start, row.top(), &point.label, style);
        next_free = start.saturating_add(width).saturating_add(1);
    }
}

/// Value range with some headroom; a flat series gets a unit band around it.
fn value_bounds(points: &[FormattedSeriesPoint]) -> (f64, f64) {
    let (min, max) = points
        .iter()
        .map(|p| p.value)
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !min.is_finite() {
        return (0.0, 1.0);
    }
    if min == max {
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * 0.1;
    (min - pad, max + pad)
}

/// Whole numbers print without decimals, everything else with two.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
