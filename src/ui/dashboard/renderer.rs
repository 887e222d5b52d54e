//! Dashboard main renderer

use super::components::{alerts, approvals, footer, header, logs, schedule, sidebar, students};
use super::state::{ActivePage, DashboardState};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Fill(1),
            Constraint::Percentage(25),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state);

    let page_area = if state.sidebar_open {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(30), Constraint::Fill(1)])
            .split(main_chunks[1]);
        sidebar::render_sidebar(f, content_chunks[0], state);
        content_chunks[1]
    } else {
        main_chunks[1]
    };

    let today = state.today();
    match &state.page {
        ActivePage::Approvals(page) => approvals::render_approvals(f, page_area, page),
        ActivePage::Schedule(page) => schedule::render_schedule(f, page_area, page, today),
        ActivePage::Students(page) => {
            students::render_students(f, page_area, page, state.search_active)
        }
        ActivePage::Alerts(page) => alerts::render_alerts(f, page_area, page, today),
    }

    logs::render_logs_panel(f, main_chunks[2], state);
    footer::render_footer(f, main_chunks[3], state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::Dataset;
    use crate::pages::{Section, local_today};
    use chrono::NaiveDate;
    use crate::services::Services;
    use crate::ui::app::UIConfig;
    use crate::workers::core::EventSender;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;
    use tokio::sync::mpsc;
    use tokio_util::sync::CancellationToken;

    static JANUARY_DAY: AtomicU32 = AtomicU32::new(17);

    fn january_clock() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, JANUARY_DAY.load(Ordering::SeqCst)).unwrap()
    }

    fn dashboard(section: Section) -> DashboardState {
        dashboard_with_clock(section, local_today)
    }

    fn dashboard_with_clock(section: Section, clock: fn() -> NaiveDate) -> DashboardState {
        let (sender, _receiver) = mpsc::channel(4);
        let config = UIConfig {
            with_background_color: true,
            default_section: section,
            splash_duration: Duration::ZERO,
            clock,
        };
        DashboardState::new(
            Arc::new(Dataset::builtin().unwrap()),
            Services::simulated(Duration::from_secs(1)),
            EventSender::new(sender),
            CancellationToken::new(),
            &config,
        )
    }

    fn screen_text(state: &DashboardState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 50)).unwrap();
        terminal.draw(|f| render_dashboard(f, state)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn approvals_page_lists_pending_requests() {
        let text = screen_text(&dashboard(Section::Approvals));
        assert!(text.contains("UPASTHITI"));
        assert!(text.contains("PENDING REQUESTS (5)"));
        assert!(text.contains("RECENTLY PROCESSED (0)"));
        assert!(text.contains("Arjun Sharma"));
        assert!(!text.contains("NAVIGATION"));
    }

    #[test]
    fn sidebar_lists_sections() {
        let mut state = dashboard(Section::Schedule);
        state.toggle_sidebar();
        let text = screen_text(&state);
        assert!(text.contains("NAVIGATION"));
        assert!(text.contains("> 2  Class Schedule"));
        assert!(text.contains("Attendance Alerts"));
        assert!(text.contains("Week of"));
    }

    #[test]
    fn alerts_page_shows_classes_needed() {
        let text = screen_text(&dashboard(Section::Alerts));
        assert!(text.contains("Critical 2 | Warning 2 | Moderate 1"));
        assert!(text.contains("Need to attend: 12 more"));
    }

    #[test]
    fn students_empty_state() {
        let mut state = dashboard(Section::Students);
        state.handle_key(KeyEvent::new(KeyCode::Char('/'), KeyModifiers::NONE));
        for c in "zzz".chars() {
            state.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
        let text = screen_text(&state);
        assert!(text.contains("No students found"));
        assert!(text.contains("Showing 0 of 8 students"));
        assert!(text.contains("Type to search"));
    }

    #[test]
    fn dates_are_read_from_the_clock_on_every_frame() {
        JANUARY_DAY.store(20, Ordering::SeqCst);
        let alerts = dashboard_with_clock(Section::Alerts, january_clock);
        assert!(screen_text(&alerts).contains("Last attended Jan 10, 2024 (10 days ago)"));

        JANUARY_DAY.store(22, Ordering::SeqCst);
        assert!(screen_text(&alerts).contains("Last attended Jan 10, 2024 (12 days ago)"));

        let schedule = dashboard_with_clock(Section::Schedule, january_clock);
        assert!(screen_text(&schedule).contains("Week of January 22, 2024"));
        JANUARY_DAY.store(21, Ordering::SeqCst);
        assert!(screen_text(&schedule).contains("Week of January 15, 2024"));
    }
}
