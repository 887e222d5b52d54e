//! Attendance alerts page

use super::super::utils::{selector_style, severity_color};
use crate::consts::cli_consts::filters::{ALL_DEPARTMENTS, ALL_LEVELS};
use crate::models::Severity;
use crate::pages::alerts::AlertsController;

use chrono::NaiveDate;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

pub fn render_alerts(f: &mut Frame, area: Rect, page: &AlertsController, today: NaiveDate) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Fill(1)])
        .split(area);

    let counts = page.severity_counts();
    let filter = page.filter();
    let summary = vec![
        Line::from(vec![
            Span::styled(
                format!("Critical {}", counts.critical),
                Style::default().fg(severity_color(Severity::Critical)),
            ),
            Span::raw(" | "),
            Span::styled(
                format!("Warning {}", counts.warning),
                Style::default().fg(severity_color(Severity::Warning)),
            ),
            Span::raw(" | "),
            Span::styled(
                format!("Moderate {}", counts.moderate),
                Style::default().fg(severity_color(Severity::Moderate)),
            ),
        ]),
        Line::from(Span::styled(
            format!(
                "{} | {}",
                filter.severity.label(ALL_LEVELS),
                filter.department.label(ALL_DEPARTMENTS)
            ),
            selector_style(filter.severity.is_all() && filter.department.is_all()),
        )),
    ];
    let summary_panel = Paragraph::new(summary).block(
        Block::default()
            .title(format!("ATTENDANCE ALERTS ({})", counts.total()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    f.render_widget(summary_panel, chunks[0]);

    let list_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
        .padding(Padding::horizontal(1));

    if page.visible_len() == 0 {
        let empty = Paragraph::new("No attendance alerts")
            .style(Style::default().fg(Color::DarkGray))
            .block(list_block);
        f.render_widget(empty, chunks[1]);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for (index, alert) in page.visible().enumerate() {
        let selected = index == page.selected_index();
        lines.push(Line::from(vec![
            Span::raw(if selected { "> " } else { "  " }),
            Span::styled(
                alert.student_name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}  {}, {}  ", alert.roll_no, alert.department, alert.year),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                alert.severity.label(),
                Style::default()
                    .fg(severity_color(alert.severity))
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(format!(
            "    {}% of {}% required | {}/{} classes | Last attended {} ({} days ago)",
            alert.current_attendance,
            alert.required_attendance,
            alert.classes_attended,
            alert.total_classes,
            alert.last_attended.format("%b %-d, %Y"),
            alert.days_since_last_attended(today)
        )));
        if let Some(needed) = alert.classes_needed_display() {
            lines.push(Line::from(Span::styled(
                format!("    Need to attend: {} more", needed),
                Style::default().fg(Color::Yellow),
            )));
        }
        let actions = if alert.parent_contact.is_some() {
            format!("    {} | {} | [E] Email student | [P] Call parent", alert.email, alert.phone)
        } else {
            format!("    {} | {} | [E] Email student", alert.email, alert.phone)
        };
        lines.push(Line::from(Span::styled(actions, Style::default().fg(Color::Gray))));
        lines.push(Line::from(""));
    }

    f.render_widget(
        Paragraph::new(lines)
            .block(list_block)
            .wrap(Wrap { trim: false }),
        chunks[1],
    );
}
