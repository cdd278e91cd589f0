//! Full-screen layout: clock panels on top, quote table, status line.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::app::{App, Status, trend_rgb};
use crate::text::{HEADERS, row_cells};

const ACCENT: Color = Color::Rgb(0x00, 0xb4, 0xd8);
const TEXT: Color = Color::Rgb(0xe0, 0xe0, 0xe0);
const BORDER: Color = Color::Rgb(0x3a, 0x3a, 0x3a);

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_clocks(f, app, chunks[0]);
    draw_table(f, app, chunks[1]);
    draw_status(f, app, chunks[2]);
}

fn draw_clocks(f: &mut Frame, app: &App, area: Rect) {
    let Some(clocks) = &app.clocks else {
        return;
    };
    if clocks.panels.is_empty() {
        return;
    }

    let count = clocks.panels.len() as u32;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(clocks.panels.iter().map(|_| Constraint::Ratio(1, count)))
        .split(area);

    for (panel, column) in clocks.panels.iter().zip(columns.iter()) {
        let mut lines = Vec::with_capacity(2);
        if !panel.caption.is_empty() {
            lines.push(Line::from(panel.caption.as_str()));
        }
        lines.push(Line::from(Span::styled(
            panel.time.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BORDER))
            .title(Span::styled(
                panel.title.as_str(),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ));
        let paragraph = Paragraph::new(lines)
            .block(block)
            .style(Style::default().fg(TEXT))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, *column);
    }
}

fn draw_table(f: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(HEADERS.iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
    }));

    let rows = app.rows.iter().map(|row| {
        let (r, g, b) = trend_rgb(row.trend());
        let cells = row_cells(row, &app.rows_updated_at);
        let aligned = cells.into_iter().enumerate().map(|(i, text)| {
            let line = if i < 2 {
                Line::from(text)
            } else {
                Line::from(text).alignment(Alignment::Right)
            };
            Cell::from(line)
        });
        Row::new(aligned).style(Style::default().fg(Color::Rgb(r, g, b)))
    });

    let widths = [
        Constraint::Length(20),
        Constraint::Min(14),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(16),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BORDER))
            .title(Span::styled(
                " Market Monitor ",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(table, area);
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let color = match app.status {
        Status::Failed(_) => Color::Rgb(0xff, 0x4d, 0x4d),
        _ => TEXT,
    };
    let line = Line::from(vec![
        Span::styled(" [r] refresh  [q] quit ", Style::default().fg(ACCENT)),
        Span::raw(" "),
        Span::styled(app.status_text(), Style::default().fg(color)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
