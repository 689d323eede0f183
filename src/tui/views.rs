//! Widget rendering for every frame.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use super::app::{Mode, TuiApp};
use crate::models::Filter;

pub fn render(app: &mut TuiApp, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Input
            Constraint::Min(0),    // Task list
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(app, frame, chunks[0]);
    render_input(app, frame, chunks[1]);
    render_list(app, frame, chunks[2]);
    render_footer(app, frame, chunks[3]);

    // Overlays go last so their Clear wins.
    app.modal_area = None;
    match &app.mode {
        Mode::Edit(buffer) => {
            let area = render_edit_modal(buffer, frame);
            app.modal_area = Some(area);
        }
        Mode::Help => render_help_overlay(frame, chunks[2]),
        _ => {}
    }
}

fn render_header(app: &TuiApp, frame: &mut Frame, area: Rect) {
    let mut spans = vec![
        Span::styled(
            "Taskpad ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
    ];
    for (i, filter) in Filter::ALL.iter().enumerate() {
        let style = if *filter == app.controller.filter() {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("[{}] {}  ", i + 1, filter.label()), style));
    }
    spans.push(Span::raw("│ "));
    spans.push(Span::styled(
        format!("{} left", app.controller.active_count()),
        Style::default().fg(Color::Green),
    ));

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Taskpad "));

    frame.render_widget(header, area);
}

fn render_input(app: &TuiApp, frame: &mut Frame, area: Rect) {
    // The rejected-add indicator stays up across mode changes until a
    // corrected submission.
    let (title, border_style) = if app.controller.add_error() {
        (" Task cannot be empty ", Style::default().fg(Color::Red))
    } else if matches!(app.mode, Mode::Add(_)) {
        (" New task ", Style::default().fg(Color::Yellow))
    } else {
        (" New task ", Style::default())
    };

    let content = match &app.mode {
        Mode::Add(buffer) => Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Yellow)),
            Span::raw(buffer.as_str()),
        ]),
        _ => Line::from(Span::styled(
            "Press a to add a task",
            Style::default().fg(Color::DarkGray),
        )),
    };

    let input = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border_style),
    );

    frame.render_widget(input, area);
}

fn render_list(app: &TuiApp, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", app.controller.filter().label()));

    let visible = app.controller.visible_tasks();
    if visible.is_empty() {
        let placeholder = Paragraph::new(app.controller.empty_message())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let marker = if task.completed { "[x] " } else { "[ ] " };
            let text_style = if task.completed {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default()
            };
            let content = Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Cyan)),
                Span::styled(task.text.clone(), text_style),
            ]);

            if i == app.selected {
                ListItem::new(content).style(Style::default().bg(Color::DarkGray).fg(Color::White))
            } else {
                ListItem::new(content)
            }
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

fn render_footer(app: &TuiApp, frame: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let spans = match app.mode {
        Mode::Browse => vec![
            Span::styled(" a", key),
            Span::raw(" Add "),
            Span::styled(" Space", key),
            Span::raw(" Toggle "),
            Span::styled(" e", key),
            Span::raw(" Edit "),
            Span::styled(" d", key),
            Span::raw(" Delete "),
            Span::styled(" 1-3", key),
            Span::raw(" Filter "),
            Span::styled(" ?", key),
            Span::raw(" Help "),
            Span::styled(" q", key),
            Span::raw(" Quit "),
        ],
        Mode::Add(_) | Mode::Edit(_) => vec![
            Span::styled(" Enter", key),
            Span::raw(" Save "),
            Span::styled(" Esc", key),
            Span::raw(" Cancel "),
        ],
        Mode::Help => vec![Span::styled(" any key", key), Span::raw(" Close ")],
    };

    let footer =
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}

/// Draws the edit modal and reports the area it occupies so clicks can be
/// hit-tested against it.
fn render_edit_modal(buffer: &str, frame: &mut Frame) -> Rect {
    let popup_area = centered_rect(60, 20, frame.area());

    frame.render_widget(Clear, popup_area);

    let input = Paragraph::new(Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::Yellow)),
        Span::raw(buffer),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Edit task ")
            .border_style(Style::default().fg(Color::Yellow)),
    );

    frame.render_widget(input, popup_area);
    popup_area
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )]),
        Line::from(""),
        Line::from(vec![
            Span::styled("a, i       ", Style::default().fg(Color::Cyan)),
            Span::raw("Add a task"),
        ]),
        Line::from(vec![
            Span::styled("↑/↓, k/j   ", Style::default().fg(Color::Cyan)),
            Span::raw("Move the selection"),
        ]),
        Line::from(vec![
            Span::styled("Space, x   ", Style::default().fg(Color::Cyan)),
            Span::raw("Toggle completion"),
        ]),
        Line::from(vec![
            Span::styled("Enter, e   ", Style::default().fg(Color::Cyan)),
            Span::raw("Edit the selected task"),
        ]),
        Line::from(vec![
            Span::styled("d          ", Style::default().fg(Color::Cyan)),
            Span::raw("Delete the selected task"),
        ]),
        Line::from(vec![
            Span::styled("1 / 2 / 3  ", Style::default().fg(Color::Cyan)),
            Span::raw("All / Active / Completed"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Esc        ", Style::default().fg(Color::Cyan)),
            Span::raw("Cancel the current input"),
        ]),
        Line::from(vec![
            Span::styled("q, Ctrl+c  ", Style::default().fg(Color::Cyan)),
            Span::raw("Quit"),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .style(Style::default().bg(Color::DarkGray)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
