//! Transcript text styling.
//!
//! Assistant replies may carry markdown; with the `markdown` feature
//! enabled they are rendered with inline styling. Visitor messages are
//! always rendered verbatim.

use ratatui::text::Line;

/// Render visitor text verbatim, one `Line` per newline.
#[must_use]
pub fn plain_lines(text: &str) -> Vec<Line<'static>> {
    if text.is_empty() {
        return vec![Line::raw(String::new())];
    }
    text.lines().map(|line| Line::raw(line.to_string())).collect()
}

/// Render assistant text, interpreting markdown.
///
/// Supports bold, italics, inline code, headings, bullet lists, code
/// blocks and rules. Anything else falls back to its plain text.
#[cfg(feature = "markdown")]
#[must_use]
pub fn bot_lines(text: &str) -> Vec<Line<'static>> {
    use pulldown_cmark::{Event, Parser, Tag, TagEnd};
    use ratatui::style::{Color, Modifier, Style};
    use ratatui::text::Span;

    fn flush(spans: &mut Vec<Span<'static>>, lines: &mut Vec<Line<'static>>) {
        if !spans.is_empty() {
            lines.push(Line::from(std::mem::take(spans)));
        }
    }

    fn inline_style(bold: u32, italic: u32, heading: bool) -> Style {
        let mut style = Style::default();
        if bold > 0 || heading {
            style = style.add_modifier(Modifier::BOLD);
        }
        if italic > 0 {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if heading {
            style = style.fg(Color::Cyan);
        }
        style
    }

    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut bold = 0u32;
    let mut italic = 0u32;
    let mut heading = false;
    let mut in_code_block = false;
    let mut list_depth = 0usize;

    for event in Parser::new(text) {
        match event {
            Event::Start(Tag::Paragraph) => {
                if !lines.is_empty() {
                    lines.push(Line::raw(String::new()));
                }
            }
            Event::End(TagEnd::Paragraph) => flush(&mut spans, &mut lines),
            Event::Start(Tag::Heading { .. }) => {
                if !lines.is_empty() {
                    lines.push(Line::raw(String::new()));
                }
                heading = true;
            }
            Event::End(TagEnd::Heading(_)) => {
                flush(&mut spans, &mut lines);
                heading = false;
            }
            Event::Start(Tag::Strong) => bold += 1,
            Event::End(TagEnd::Strong) => bold = bold.saturating_sub(1),
            Event::Start(Tag::Emphasis) => italic += 1,
            Event::End(TagEnd::Emphasis) => italic = italic.saturating_sub(1),
            Event::Start(Tag::List(_)) => list_depth += 1,
            Event::End(TagEnd::List(_)) => list_depth = list_depth.saturating_sub(1),
            Event::Start(Tag::Item) => {
                flush(&mut spans, &mut lines);
                let indent = "  ".repeat(list_depth.saturating_sub(1));
                spans.push(Span::raw(format!("{indent}• ")));
            }
            Event::End(TagEnd::Item) => flush(&mut spans, &mut lines),
            Event::Start(Tag::CodeBlock(_)) => {
                flush(&mut spans, &mut lines);
                in_code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => {
                flush(&mut spans, &mut lines);
                in_code_block = false;
            }
            Event::Text(content) => {
                if in_code_block {
                    for code_line in content.lines() {
                        lines.push(Line::from(Span::styled(
                            format!("  {code_line}"),
                            Style::default().fg(Color::Yellow),
                        )));
                    }
                } else {
                    spans.push(Span::styled(
                        content.to_string(),
                        inline_style(bold, italic, heading),
                    ));
                }
            }
            Event::Code(code) => {
                spans.push(Span::styled(
                    code.to_string(),
                    Style::default().fg(Color::Yellow),
                ));
            }
            Event::SoftBreak | Event::HardBreak => flush(&mut spans, &mut lines),
            Event::Rule => {
                flush(&mut spans, &mut lines);
                lines.push(Line::from(Span::styled(
                    "────────".to_string(),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            _ => {}
        }
    }

    flush(&mut spans, &mut lines);

    if lines.is_empty() {
        lines.push(Line::raw(String::new()));
    }

    lines
}

/// Without the `markdown` feature assistant text renders verbatim too.
#[cfg(not(feature = "markdown"))]
#[must_use]
pub fn bot_lines(text: &str) -> Vec<Line<'static>> {
    plain_lines(text)
}
