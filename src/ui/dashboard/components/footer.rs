//! Dashboard footer component
//!
//! Renders the key hints for the mounted page

use super::super::state::{ActivePage, DashboardState};
use crate::pages::Section;

use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Key hints for the page on screen.
pub fn page_hints(state: &DashboardState) -> &'static str {
    if state.search_active {
        return "Type to search | [Enter/Esc] Done";
    }
    if let ActivePage::Approvals(page) = &state.page {
        if page.has_processing() {
            return "Submitting decision... | [Up/Down] Select";
        }
    }
    match state.active_section() {
        Section::Approvals => "[Up/Down] Select | [A] Approve | [D] Decline | [R] Retry",
        Section::Schedule => "[Left/P] Previous week | [Right/N] Next week | [C] Current week",
        Section::Students => {
            "[/] Search | [D] Department | [Y] Year | [S] Status | [V] View | [X] Clear"
        }
        Section::Alerts => {
            "[Up/Down] Select | [L] Level | [D] Department | [E] Email student | [P] Call parent"
        }
    }
}

pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let footer_text = format!("{} | [1-4/Tab] Section | [Q] Quit", page_hints(state));

    let footer = Paragraph::new(footer_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}
