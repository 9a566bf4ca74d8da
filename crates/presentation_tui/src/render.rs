//! Widget rendering.
//!
//! Draws the launcher affordance, the open chat panel or the minimized
//! bar into the anchor rect for the configured position. Rendering is
//! a pure function of [`WidgetApp`], so every transcript change shows
//! up on the next draw.

use chrono::Local;
use domain::{TranscriptEntry, WidgetState};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{app::WidgetApp, layout, markdown};

/// Braille spinner shown while a reply is pending.
const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Render the whole widget for the current state.
pub fn render(f: &mut Frame, app: &WidgetApp) {
    let area = f.area();
    match app.session().state() {
        WidgetState::Closed => render_launcher(f, app, area),
        WidgetState::Minimized => render_minimized(f, app, area),
        WidgetState::Open => render_panel(f, app, area),
    }
}

fn render_launcher(f: &mut Frame, app: &WidgetApp, area: Rect) {
    let rect = layout::launcher_rect(area, app.position());
    f.render_widget(Clear, rect);

    let button = Paragraph::new("💬")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(button, rect);
}

fn render_minimized(f: &mut Frame, app: &WidgetApp, area: Rect) {
    let rect = layout::minimized_rect(area, app.position());
    f.render_widget(Clear, rect);

    let mut spans = vec![
        Span::styled(
            format!(" {} ", app.session().config().title()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled("· Tab restore · Esc close", Style::default().fg(Color::DarkGray)),
    ];
    if app.session().is_busy() {
        let frame = SPINNER_FRAMES[app.animation_frame() % SPINNER_FRAMES.len()];
        spans.push(Span::styled(
            format!(" {frame}"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let bar = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(bar, rect);
}

fn render_panel(f: &mut Frame, app: &WidgetApp, area: Rect) {
    let rect = layout::panel_rect(area, app.position());
    f.render_widget(Clear, rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", app.session().config().title()))
        .title_bottom(
            Line::from(" Enter send · Tab min · Esc close ")
                .style(Style::default().fg(Color::DarkGray)),
        );
    let inner = block.inner(rect);
    f.render_widget(block, rect);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Transcript
            Constraint::Length(1), // Pending-reply indicator
            Constraint::Length(3), // Input box
        ])
        .split(inner);

    render_transcript(f, app, chunks[0]);
    if app.session().is_busy() {
        render_pending_indicator(f, app, chunks[1]);
    }
    render_input(f, app, chunks[2]);
}

fn render_transcript(f: &mut Frame, app: &WidgetApp, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let lines = transcript_lines(app, usize::from(area.width));
    // Pin the newest entry to the bottom once the transcript outgrows
    // the panel.
    let offset = lines.len().saturating_sub(usize::from(area.height));
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);

    f.render_widget(Paragraph::new(lines).scroll((offset, 0)), area);
}

fn transcript_lines(app: &WidgetApp, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for entry in app.session().transcript().entries() {
        if !lines.is_empty() {
            lines.push(Line::raw(String::new()));
        }
        lines.push(header_line(entry));

        let content = if entry.is_user() {
            markdown::plain_lines(&entry.text)
        } else {
            markdown::bot_lines(&entry.text)
        };
        for content_line in content {
            lines.extend(wrap_spans(&content_line, width));
        }
    }
    lines
}

fn header_line(entry: &TranscriptEntry) -> Line<'static> {
    let (label, color) = if entry.is_user() {
        ("You", Color::Cyan)
    } else {
        ("Assistant", Color::Green)
    };
    let stamp = entry.timestamp.with_timezone(&Local).format("%H:%M");

    Line::from(vec![
        Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(format!(" · {stamp}"), Style::default().fg(Color::DarkGray)),
    ])
}

fn render_pending_indicator(f: &mut Frame, app: &WidgetApp, area: Rect) {
    let frame = SPINNER_FRAMES[app.animation_frame() % SPINNER_FRAMES.len()];
    let line = Line::from(vec![
        Span::styled(
            format!(" {frame} "),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("Assistant is typing...", Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_input(f: &mut Frame, app: &WidgetApp, area: Rect) {
    let busy = app.session().is_busy();
    let title = if busy { " sending " } else { " message " };
    let style = if busy {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    let inner_width = usize::from(area.width.saturating_sub(2));
    let input_width = app.input().width();
    // Keep the cursor column visible when the input outgrows the box.
    let scroll = input_width.saturating_sub(inner_width.saturating_sub(1));

    let input = Paragraph::new(app.input())
        .style(style)
        .scroll((0, u16::try_from(scroll).unwrap_or(u16::MAX)))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(input, area);

    if !busy && area.width > 2 && area.height > 2 {
        let cursor_col = u16::try_from(input_width - scroll).unwrap_or(0);
        f.set_cursor_position((area.x + 1 + cursor_col, area.y + 1));
    }
}

/// Greedy character wrap that keeps span styles across row breaks.
fn wrap_spans(line: &Line<'static>, width: usize) -> Vec<Line<'static>> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0usize;

    for span in &line.spans {
        let style = span.style;
        let mut buf = String::new();
        for ch in span.content.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if used + ch_width > width && used > 0 {
                if !buf.is_empty() {
                    current.push(Span::styled(std::mem::take(&mut buf), style));
                }
                rows.push(Line::from(std::mem::take(&mut current)));
                used = 0;
            }
            buf.push(ch);
            used += ch_width;
        }
        if !buf.is_empty() {
            current.push(Span::styled(buf, style));
        }
    }

    if !current.is_empty() || rows.is_empty() {
        rows.push(Line::from(current));
    }
    rows
}
