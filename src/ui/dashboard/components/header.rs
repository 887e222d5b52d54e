//! Dashboard navbar component
//!
//! Renders the product title and the menu hint

use super::super::state::DashboardState;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(12), Constraint::Fill(1), Constraint::Length(20)])
        .split(area);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_type(BorderType::Thick);

    let menu_hint = if state.sidebar_open { "[M] Close" } else { "[M] Menu" };
    let menu = Paragraph::new(menu_hint)
        .style(Style::default().fg(Color::DarkGray))
        .block(block.clone());
    f.render_widget(menu, chunks[0]);

    let version = env!("CARGO_PKG_VERSION");
    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            "UPASTHITI",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  Teacher Dashboard v{}", version),
            Style::default().fg(Color::Gray),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(block.clone());
    f.render_widget(title, chunks[1]);

    let section = Paragraph::new(state.active_section().title())
        .alignment(Alignment::Right)
        .style(Style::default().fg(Color::LightBlue))
        .block(block);
    f.render_widget(section, chunks[2]);
}
