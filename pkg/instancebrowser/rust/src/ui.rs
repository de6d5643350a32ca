// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Row, Table, TableState};

use crate::browser::{InstanceBrowser, ViewState};
use crate::chart::{SeriesChart, format_value};
use crate::model::{InstanceDetail, SeriesPoint};
use crate::series::format_series;

const LIST_HINT: &str = "↑/↓ select  Enter open  r refresh  q quit";
const DETAIL_HINT: &str = "h/Esc home  ←/→ inspect point  q quit";

pub fn draw(frame: &mut Frame, browser: &InstanceBrowser) {
    let [body, footer] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    match browser.view() {
        ViewState::List => {
            draw_list(frame, body, browser);
            draw_hint(frame, footer, LIST_HINT);
        }
        ViewState::Detail { instance, series } => {
            draw_detail(frame, body, instance, series.as_deref(), browser);
            draw_hint(frame, footer, DETAIL_HINT);
        }
    }
}

fn draw_list(frame: &mut Frame, area: Rect, browser: &InstanceBrowser) {
    let [heading, table_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
    frame.render_widget(heading_line("Instances List"), heading);

    let header = Row::new(["InstanceID", "Type", "Region"]).style(
        Style::default()
            .fg(Color::White)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );
    let rows = browser.instances().iter().map(|instance| {
        Row::new([
            instance.id.clone(),
            instance.instance_type.clone(),
            instance.region.clone(),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ],
    )
    .header(header)
    .block(Block::bordered())
    .row_highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::REVERSED));

    let mut state = TableState::default().with_selected(
        (!browser.instances().is_empty()).then_some(browser.cursor()),
    );
    frame.render_stateful_widget(table, table_area, &mut state);
}

fn draw_detail(
    frame: &mut Frame,
    area: Rect,
    instance: &InstanceDetail,
    series: Option<&[SeriesPoint]>,
    browser: &InstanceBrowser,
) {
    let [heading, id_line, cpu_line, chart_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);

    frame.render_widget(heading_line("Selected Instance Details"), heading);
    frame.render_widget(Paragraph::new(format!("ID: {}", instance.id)), id_line);
    if let Some(cpu) = instance.cpu {
        frame.render_widget(Paragraph::new(format!("CPU: {}", format_value(cpu))), cpu_line);
    }

    let formatted = format_series(series);
    frame.render_widget(
        SeriesChart::new(formatted.as_deref()).highlight(browser.highlighted_point()),
        chart_area,
    );
}

fn heading_line(text: &str) -> Paragraph<'_> {
    Paragraph::new(Line::styled(text, Style::default().add_modifier(Modifier::BOLD)))
}

fn draw_hint(frame: &mut Frame, area: Rect, hint: &'static str) {
    frame.render_widget(
        Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
