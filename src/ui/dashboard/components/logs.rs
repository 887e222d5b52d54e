//! Activity log panel
//!
//! Newest entries first. Each line carries an icon, the time, the part of
//! the dashboard it came from and the message.

use super::super::state::DashboardState;
use super::super::utils::{format_compact_timestamp, get_source_color};
use crate::events::{Event, EventType};
use crate::logging::LogLevel;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

fn icon(event: &Event) -> &'static str {
    match (event.event_type, event.log_level) {
        (EventType::Success, _) => "✅",
        (EventType::Error, LogLevel::Warn) => "⚠️",
        (EventType::Error, _) => "❌",
        (EventType::Waiting, _) => "⏳",
        (EventType::Refresh, _) | (EventType::StateChange, _) => "·",
    }
}

fn log_line(event: &Event) -> Line<'static> {
    let source_style = Style::default().fg(get_source_color(&event.source));
    Line::from(vec![
        Span::raw(format!("{} ", icon(event))),
        Span::styled(
            format!("{} ", format_compact_timestamp(&event.timestamp)),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(format!("{:<9} ", event.source), source_style),
        Span::raw(event.msg.clone()),
    ])
}

pub fn render_logs_panel(f: &mut Frame, area: Rect, state: &DashboardState) {
    let visible: Vec<&Event> = state
        .activity_logs
        .iter()
        .filter(|event| event.should_display())
        .collect();

    // Border and padding rows
    let room = usize::from(area.height.saturating_sub(3)).max(1);
    let lines: Vec<Line> = if visible.is_empty() {
        vec![Line::styled("No activity yet", Style::default().fg(Color::DarkGray))]
    } else {
        visible.iter().rev().take(room).map(|e| log_line(e)).collect()
    };

    let block = Block::default()
        .title(format!("ACTIVITY LOG ({})", visible.len()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
