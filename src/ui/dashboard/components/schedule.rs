//! Weekly schedule page

use super::super::utils::session_type_color;
use crate::pages::schedule::ScheduleController;
use chrono::NaiveDate;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

pub fn render_schedule(f: &mut Frame, area: Rect, page: &ScheduleController, today: NaiveDate) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Fill(1)])
        .split(area);

    let (heading, week) = match (page.heading(today), page.week(today)) {
        (Ok(heading), Ok(week)) => (heading, week),
        (Err(e), _) | (_, Err(e)) => {
            let error = Paragraph::new(e.to_string())
                .style(Style::default().fg(Color::Red))
                .block(Block::default().title("CLASS SCHEDULE").borders(Borders::ALL));
            f.render_widget(error, area);
            return;
        }
    };

    let summary = page.summary();
    let summary_lines = vec![
        Line::from(Span::styled(
            heading,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "Total classes: {} | Total students: {} | Rooms: {}",
            summary.total_sessions, summary.total_students, summary.distinct_rooms
        )),
    ];
    let summary_panel = Paragraph::new(summary_lines).block(
        Block::default()
            .title("CLASS SCHEDULE")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    f.render_widget(summary_panel, chunks[0]);

    let day_constraints = vec![Constraint::Ratio(1, week.len().max(1) as u32); week.len()];
    let day_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(day_constraints)
        .split(chunks[1]);

    for (day, day_area) in week.iter().zip(day_chunks.iter()) {
        let mut lines: Vec<Line> = Vec::new();
        if day.sessions.is_empty() {
            lines.push(Line::from(Span::styled(
                "No classes scheduled",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for session in &day.sessions {
            lines.push(Line::from(Span::styled(
                session.time_range(),
                Style::default().fg(Color::Gray),
            )));
            lines.push(Line::from(Span::styled(
                session.subject.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(format!("{} | {}", session.class_label, session.room)));
            lines.push(Line::from(vec![
                Span::styled(
                    session.session_type.to_string(),
                    Style::default().fg(session_type_color(session.session_type)),
                ),
                Span::raw(format!(" | {} students", session.students)),
            ]));
            lines.push(Line::from(""));
        }
        let title = format!("{} {}", day.day, day.date.format("%b %-d"));
        let day_panel = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(day_panel, *day_area);
    }
}
