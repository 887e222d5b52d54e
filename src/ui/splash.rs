//! Splash screen rendering module.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub const LOGO_NAME: &str = r#"
  ██╗   ██╗  ██████╗    █████╗   ███████╗  ████████╗  ██╗  ██╗  ██╗  ████████╗  ██╗
  ██║   ██║  ██╔══██╗  ██╔══██╗  ██╔════╝  ╚══██╔══╝  ██║  ██║  ██║  ╚══██╔══╝  ██║
  ██║   ██║  ██████╔╝  ███████║  ███████╗     ██║     ███████║  ██║     ██║     ██║
  ██║   ██║  ██╔═══╝   ██╔══██║  ╚════██║     ██║     ██╔══██║  ██║     ██║     ██║
  ╚██████╔╝  ██║       ██║  ██║  ███████║     ██║     ██║  ██║  ██║     ██║     ██║
   ╚═════╝   ╚═╝       ╚═╝  ╚═╝  ╚══════╝     ╚═╝     ╚═╝  ╚═╝  ╚═╝     ╚═╝     ╚═╝
"#;

pub fn render_splash(f: &mut Frame) {
    let logo_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line> = LOGO_NAME
        .trim_matches('\n')
        .lines()
        .map(|line| Line::from(Span::styled(line, logo_style)))
        .collect();

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        format!("Teacher Dashboard v{}", env!("CARGO_PKG_VERSION")),
        Style::default()
            .fg(Color::LightBlue)
            .add_modifier(Modifier::ITALIC),
    )));
    lines.push(Line::from(Span::styled(
        "Press any key to continue",
        Style::default().fg(Color::DarkGray),
    )));

    let height = lines.len() as u16;
    let [_, centered_area, _] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .areas(f.area());

    let logo = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::NONE));

    f.render_widget(logo, centered_area);
}
