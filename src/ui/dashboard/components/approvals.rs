//! Pending approvals page

use super::super::utils::approval_status_color;
use crate::pages::approvals::ApprovalsController;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

fn panel(title: String) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1))
}

pub fn render_approvals(f: &mut Frame, area: Rect, page: &ApprovalsController) {
    if page.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(Span::styled(
                "No pending approvals",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from("All student requests have been processed."),
        ])
        .alignment(Alignment::Center)
        .block(panel("PENDING APPROVALS".to_string()));
        f.render_widget(empty, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let pending = page.pending();
    let mut lines: Vec<Line> = Vec::new();
    if let Some(failure) = page.last_failure() {
        lines.push(Line::from(Span::styled(
            format!(
                "Could not {} request {}: {} ([R] to retry)",
                failure.outcome.verb(),
                failure.request_id,
                failure.error
            ),
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::from(""));
    }
    if pending.is_empty() {
        lines.push(Line::from("All student requests have been processed."));
    }
    for (index, request) in pending.iter().enumerate() {
        let selected = index == page.selected_index();
        let marker = if selected { "> " } else { "  " };
        let name_style = if selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let mut header = vec![
            Span::raw(marker),
            Span::styled(request.name.clone(), name_style),
            Span::styled(
                format!("  {}", request.roll_no),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        if page.is_processing(&request.id) {
            header.push(Span::styled(
                "  processing...",
                Style::default().fg(Color::Yellow),
            ));
        }
        lines.push(Line::from(header));
        lines.push(Line::from(Span::styled(
            format!(
                "    {} | {} | Requested {}",
                request.department,
                request.year,
                request.request_date.format("%b %-d, %Y")
            ),
            Style::default().fg(Color::Gray),
        )));
    }
    let pending_panel = Paragraph::new(lines)
        .block(panel(format!("PENDING REQUESTS ({})", pending.len())))
        .wrap(Wrap { trim: false });
    f.render_widget(pending_panel, chunks[0]);

    let recent: Vec<Line> = page
        .recently_processed()
        .into_iter()
        .map(|request| {
            Line::from(vec![
                Span::raw(format!("{} ", request.name)),
                Span::styled(
                    request.status.to_string(),
                    Style::default().fg(approval_status_color(request.status)),
                ),
            ])
        })
        .collect();
    let recent_panel = Paragraph::new(recent)
        .block(panel(format!("RECENTLY PROCESSED ({})", page.processed().len())))
        .wrap(Wrap { trim: true });
    f.render_widget(recent_panel, chunks[1]);
}
