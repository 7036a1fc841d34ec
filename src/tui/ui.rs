//! UI rendering

use super::app::{App, Focus, Selector};
use crate::session::result_label;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

pub(crate) const HEADER_HEIGHT: u16 = 3;
pub(crate) const CAPTURE_HEIGHT: u16 = 3;
pub(crate) const RESULTS_MIN_HEIGHT: u16 = 5;
pub(crate) const STATUS_BAR_HEIGHT: u16 = 1;
const SHORTCUT_COLUMN_WIDTH: u16 = 24;
const ICON_COLUMN_WIDTH: u16 = 3;

pub(crate) fn split_main_chunks(area: Rect) -> [Rect; 4] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(CAPTURE_HEIGHT),
            Constraint::Min(RESULTS_MIN_HEIGHT),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2], chunks[3]]
}

pub fn draw(f: &mut Frame, app: &App) {
    let [header_area, capture_area, results_area, status_area] = split_main_chunks(f.area());
    draw_header(f, app, header_area);
    draw_capture(f, app, capture_area);
    draw_results(f, app, results_area);
    draw_status_bar(f, app, status_area);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let selecting = app.focus == Focus::Select;
    let selector_style = |selector: Selector| {
        if selecting && app.selector == selector {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        }
    };

    let line = Line::from(vec![
        Span::raw(" From: "),
        Span::styled(
            format!(" {} ", app.source_name()),
            selector_style(Selector::Source),
        ),
        Span::raw("   To: "),
        Span::styled(
            format!(" {} ", app.target_name()),
            selector_style(Selector::Target),
        ),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Shortcut Translator ");
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_capture(f: &mut Frame, app: &App, area: Rect) {
    let (text, style) = match app.captured_text() {
        Some(text) => (text, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        None => (
            "Press a shortcut".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    };
    let border_style = if app.focus == Focus::Capture {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Keystroke ");
    f.render_widget(Paragraph::new(Span::styled(text, style)).block(block), area);
}

fn draw_results(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Results ");

    if app.results.is_empty() {
        let message = if app.captured.is_some() {
            "No shortcut found"
        } else {
            ""
        };
        let paragraph =
            Paragraph::new(Span::styled(message, Style::default().fg(Color::DarkGray))).block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let rows: Vec<Row> = app
        .results
        .iter()
        .map(|result| {
            Row::new(vec![
                Cell::from(result.shortcut_text.clone())
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                Cell::from(result.icon.clone().unwrap_or_default()),
                Cell::from(result_label(result).to_string()),
            ])
        })
        .collect();
    let header = Row::new(vec!["Shortcut", "", "Action"])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    let widths = [
        Constraint::Length(SHORTCUT_COLUMN_WIDTH),
        Constraint::Length(ICON_COLUMN_WIDTH),
        Constraint::Min(10),
    ];
    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let mode = match app.focus {
        Focus::Capture => " CAPTURE ",
        Focus::Select => " SELECT ",
    };
    let line = Line::from(vec![
        Span::styled(
            mode,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" {}", app.status_message)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
