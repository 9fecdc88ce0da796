// tui.rs

use crate::app::{App, InputMode};
use crossterm::event::{self, Event as CEvent, KeyCode, KeyEventKind};
use ratatui::{
    Terminal,
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};
use std::{io, time::Duration};

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()>
where
    std::io::Error: From<<B as Backend>::Error>,
{
    loop {
        // pick up writer failures and snapshot answers before drawing
        app.drain_events();
        terminal.draw(|f| ui(f, app))?;

        if crossterm::event::poll(Duration::from_millis(100))? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match app.input_mode {
                    InputMode::Normal => match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Char('a') => {
                            app.input_mode = InputMode::Adding;
                            app.input_text.clear();
                            app.error_message = None;
                        }
                        KeyCode::Char('e') => {
                            app.begin_edit_selected();
                        }
                        KeyCode::Char('d') | KeyCode::Char(' ') => app.toggle_todo(),
                        KeyCode::Char('D') => {
                            if !app.todos.is_empty() {
                                app.input_mode = InputMode::ConfirmingDelete;
                            }
                        }
                        KeyCode::Char('r') => app.request_refresh(),
                        KeyCode::Down => {
                            if app.selected + 1 < app.todos.len() {
                                app.selected += 1;
                            }
                        }
                        KeyCode::Up => {
                            if app.selected > 0 {
                                app.selected -= 1;
                            }
                        }
                        _ => {}
                    },
                    InputMode::Adding => match key.code {
                        KeyCode::Enter => match app.create_todo() {
                            Ok(_) => app.input_mode = InputMode::Normal,
                            Err(e) => app.error_message = Some(e),
                        },
                        KeyCode::Esc => {
                            app.input_mode = InputMode::Normal;
                            app.input_text.clear();
                        }
                        KeyCode::Char(c) => {
                            app.input_text.push(c);
                        }
                        KeyCode::Backspace => {
                            app.input_text.pop();
                        }
                        _ => {}
                    },
                    InputMode::Editing => match key.code {
                        KeyCode::Enter => match app.change_todo_text() {
                            Ok(_) => app.input_mode = InputMode::Normal,
                            Err(e) => app.error_message = Some(e),
                        },
                        KeyCode::Esc => {
                            app.cancel_edit();
                        }
                        KeyCode::Char(c) => {
                            app.input_text.push(c);
                        }
                        KeyCode::Backspace => {
                            app.input_text.pop();
                        }
                        _ => {}
                    },
                    InputMode::ConfirmingDelete => match key.code {
                        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                            app.delete_todo();
                            app.input_mode = InputMode::Normal;
                        }
                        _ => {
                            app.input_mode = InputMode::Normal;
                        }
                    },
                }
            }
        }
    }
}

fn ui(f: &mut ratatui::Frame<'_>, app: &App) {
    let size = f.area();

    let needs_input = matches!(app.input_mode, InputMode::Adding | InputMode::Editing);

    let mut constraints = vec![
        Constraint::Length(3), // header with progress
        Constraint::Min(3),    // todo list
        Constraint::Length(1), // help footer
    ];
    if needs_input {
        constraints.push(Constraint::Length(3));
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(size);

    let done = app.done_count();
    let total = app.todos.len();
    if total > 0 {
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title("Ticklist"))
            .gauge_style(Style::default().fg(Color::Green))
            .ratio(done as f64 / total as f64)
            .label(format!("{} of {} tasks completed", done, total));
        f.render_widget(gauge, chunks[0]);
    } else {
        let header = Paragraph::new("Stay organized and productive")
            .block(Block::default().borders(Borders::ALL).title("Ticklist"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(header, chunks[0]);
    }

    if app.todos.is_empty() {
        let empty = Paragraph::new("No tasks yet. Press 'a' to add your first task.")
            .block(Block::default().borders(Borders::ALL).title("Todos"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(empty, chunks[1]);
    } else {
        let todos: Vec<ListItem> = app
            .todos
            .iter()
            .map(|t| {
                let status = if t.done { "[x]" } else { "[ ]" };
                let style = if t.done {
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default().fg(Color::Yellow)
                };
                ListItem::new(Line::from(Span::styled(
                    format!("{} {}", status, t.text),
                    style,
                )))
            })
            .collect();

        let mut list_state = ratatui::widgets::ListState::default();
        list_state.select(Some(app.selected.min(app.todos.len() - 1)));

        let todos_list = List::new(todos)
            .block(Block::default().borders(Borders::ALL).title("Todos"))
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");
        f.render_stateful_widget(todos_list, chunks[1], &mut list_state);
    }

    let help = match app.input_mode {
        InputMode::Normal => "a: add  e: edit  d/space: toggle done  D: delete  r: reload  q: quit",
        InputMode::Adding | InputMode::Editing => "Enter: save  Esc: cancel",
        InputMode::ConfirmingDelete => "Delete selected todo? y: yes  any other key: no",
    };
    let help = Paragraph::new(help).style(Style::default().fg(Color::Gray));
    f.render_widget(help, chunks[2]);

    // Single-line input at the bottom (only while adding or editing)
    if needs_input {
        let caret = "|";
        let text = if app.input_text.is_empty() {
            caret.to_string()
        } else {
            format!("{}{}", app.input_text, caret)
        };
        let title = match app.input_mode {
            InputMode::Adding => "New Todo",
            _ => "Edit Todo",
        };
        let widget = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title(title))
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .wrap(Wrap { trim: true });
        f.render_widget(widget, chunks[3]);
    }

    // Show error message if any
    if let Some(ref msg) = app.error_message {
        let error = Paragraph::new(msg.as_str())
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        let area = Rect {
            x: size.x,
            y: size.height.saturating_sub(2),
            width: size.width,
            height: 1,
        };
        f.render_widget(error, area);
    }
}
