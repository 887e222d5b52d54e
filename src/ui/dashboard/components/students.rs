//! Student roster page

use super::super::utils::{selector_style, student_status_color, tier_color};
use crate::consts::cli_consts::filters::{ALL_DEPARTMENTS, ALL_STATUS, ALL_YEARS};
use crate::pages::students::{StudentsController, ViewMode};

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Padding, Paragraph, Row, Table, Wrap};

pub fn render_students(f: &mut Frame, area: Rect, page: &StudentsController, search_active: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Fill(1)])
        .split(area);

    let filter = page.filter();
    let cursor = if search_active { "_" } else { "" };
    let search_style = if search_active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let controls = vec![
        Line::from(vec![
            Span::raw("Search: "),
            Span::styled(format!("{}{}", filter.search, cursor), search_style),
        ]),
        Line::from(Span::styled(
            format!(
                "{} | {} | {} | {} view | {}",
                filter.department.label(ALL_DEPARTMENTS),
                filter.year.label(ALL_YEARS),
                filter.status.label(ALL_STATUS),
                page.view_mode(),
                page.summary_line()
            ),
            selector_style(filter.department.is_all() && filter.year.is_all() && filter.status.is_all()),
        )),
    ];
    let controls_panel = Paragraph::new(controls).block(
        Block::default()
            .title("STUDENTS")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    f.render_widget(controls_panel, chunks[0]);

    let list_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));

    if page.visible_len() == 0 {
        let empty = Paragraph::new("No students found")
            .style(Style::default().fg(Color::DarkGray))
            .block(list_block);
        f.render_widget(empty, chunks[1]);
        return;
    }

    match page.view_mode() {
        ViewMode::Table => {
            let header = Row::new([
                "Student",
                "Roll No",
                "Department",
                "Year",
                "Attendance",
                "Status",
                "Contact",
            ])
            .style(Style::default().add_modifier(Modifier::BOLD));
            let rows: Vec<Row> = page
                .visible()
                .map(|student| {
                    Row::new(vec![
                        Cell::from(student.name.clone()),
                        Cell::from(student.roll_no.clone()),
                        Cell::from(student.department.clone()),
                        Cell::from(student.year.clone()),
                        Cell::from(format!("{}%", student.attendance))
                            .style(Style::default().fg(tier_color(student.attendance_tier()))),
                        Cell::from(student.status.to_string())
                            .style(Style::default().fg(student_status_color(student.status))),
                        Cell::from(student.email.clone()),
                    ])
                })
                .collect();
            let table = Table::new(
                rows,
                [
                    Constraint::Length(16),
                    Constraint::Length(10),
                    Constraint::Length(17),
                    Constraint::Length(9),
                    Constraint::Length(10),
                    Constraint::Length(10),
                    Constraint::Fill(1),
                ],
            )
            .header(header)
            .block(list_block);
            f.render_widget(table, chunks[1]);
        }
        ViewMode::Grid => {
            let mut lines: Vec<Line> = Vec::new();
            for student in page.visible() {
                lines.push(Line::from(vec![
                    Span::styled(
                        student.name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {}", student.roll_no),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]));
                lines.push(Line::from(vec![
                    Span::styled(
                        student.status.to_string(),
                        Style::default().fg(student_status_color(student.status)),
                    ),
                    Span::raw(" | Attendance "),
                    Span::styled(
                        format!("{}%", student.attendance),
                        Style::default().fg(tier_color(student.attendance_tier())),
                    ),
                ]));
                lines.push(Line::from(Span::styled(
                    format!("{} | {}", student.email, student.phone),
                    Style::default().fg(Color::Gray),
                )));
                lines.push(Line::from(""));
            }
            let grid = Paragraph::new(lines)
                .block(list_block)
                .wrap(Wrap { trim: true });
            f.render_widget(grid, chunks[1]);
        }
    }
}
