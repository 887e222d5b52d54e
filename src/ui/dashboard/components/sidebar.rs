//! Navigation sidebar

use super::super::state::DashboardState;
use crate::pages::Section;

use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};

pub fn render_sidebar(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let active = state.active_section();
    let lines: Vec<Line> = Section::ALL
        .iter()
        .map(|section| {
            let label = format!("{}  {}", section.index() + 1, section.title());
            if *section == active {
                Line::from(Span::styled(
                    format!("> {}", label),
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(
                    format!("  {}", label),
                    Style::default().fg(Color::Gray),
                ))
            }
        })
        .collect();

    let block = Block::default()
        .title("NAVIGATION")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    f.render_widget(Paragraph::new(lines).block(block), area);
}
