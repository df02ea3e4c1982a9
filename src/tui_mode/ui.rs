use super::app::App;
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use scicalc::buffer::EditOp;
use scicalc::keymap::{action_for_char, Action, KEYPAD};
use std::time::Duration;
use super::helpers::{highlight_expression, tail_to_width};
use crate::render_help::render_help;

const MIN_TERMINAL_WIDTH: u16 = 50;
const MIN_TERMINAL_HEIGHT: u16 = 12;

pub fn run_ui_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            if app.show_help {
                render_help(f, app);
            } else {
                ui(f, app);
            }
        })?;

        if app.should_quit {
            break;
        }

        if crossterm::event::poll(Duration::from_millis(50))? {
            match crossterm::event::read()? {
                Event::Key(KeyEvent { code, modifiers, kind, .. }) if kind == KeyEventKind::Press => {
                    handle_key_event(app, code, modifiers);
                }
                Event::Mouse(event) => {
                    handle_mouse_event(app, event);
                }
                _ => {}
            }
        }
    }
    Ok(())
}

fn handle_key_event(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    if app.show_help {
        match code {
            KeyCode::Down => app.help_scroll = app.help_scroll.saturating_add(1),
            KeyCode::Up => app.help_scroll = app.help_scroll.saturating_sub(1),
            KeyCode::PageDown => app.help_scroll = app.help_scroll.saturating_add(10),
            KeyCode::PageUp => app.help_scroll = app.help_scroll.saturating_sub(10),
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') => app.handle_action(Action::Help),
            _ => {}
        }
        return;
    }

    let action = match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => action_for_char(c),
        KeyCode::Enter => Some(Action::Evaluate),
        KeyCode::Backspace => Some(Action::Edit(EditOp::Backspace)),
        KeyCode::Delete | KeyCode::Esc => Some(Action::Edit(EditOp::Clear)),
        KeyCode::F(1) => Some(Action::Help),
        KeyCode::F(2) => Some(Action::ToggleAngle),
        KeyCode::PageUp => {
            app.scroll_history(-1);
            None
        }
        KeyCode::PageDown => {
            app.scroll_history(1);
            None
        }
        _ => None,
    };

    if let Some(action) = action {
        app.handle_action(action);
    }
}

fn handle_mouse_event(app: &mut App, event: crossterm::event::MouseEvent) {
    if app.show_help {
        match event.kind {
            MouseEventKind::ScrollDown => app.help_scroll = app.help_scroll.saturating_add(3),
            MouseEventKind::ScrollUp => app.help_scroll = app.help_scroll.saturating_sub(3),
            _ => {}
        }
    } else {
        match event.kind {
            MouseEventKind::ScrollDown => {
                app.history_scroll = app.history_scroll.saturating_add(3);
                app.scroll_to_bottom = false;
            }
            MouseEventKind::ScrollUp => {
                app.history_scroll = app.history_scroll.saturating_sub(3);
                app.scroll_to_bottom = false;
            }
            _ => {}
        }
    }
}

fn ui(frame: &mut Frame, app: &mut App) {
    let terminal_size = frame.size();

    app.terminal_too_small = terminal_size.width < MIN_TERMINAL_WIDTH ||
                             terminal_size.height < MIN_TERMINAL_HEIGHT;

    if app.terminal_too_small {
        render_resize_message(frame, terminal_size);
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(3),
        ])
        .split(terminal_size);

    render_display(frame, app, layout[0]);
    render_keypad(frame, layout[1]);
    render_history(frame, app, layout[2]);
    app.list_height = layout[2].height as usize;
}

fn render_resize_message(frame: &mut Frame, area: Rect) {
    let message = format!(
        "Terminal too small! Min size: {}x{}. Current: {}x{}",
        MIN_TERMINAL_WIDTH,
        MIN_TERMINAL_HEIGHT,
        area.width,
        area.height
    );

    let text = vec![
        Line::from(Span::styled(
            message,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Please resize your terminal window",
            Style::default().fg(Color::Yellow)
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Resize Required ")
        .title_alignment(Alignment::Center);

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn render_display(frame: &mut Frame, app: &mut App, area: Rect) {
    let open = app.session.buffer.paren_balance();
    let title = if open > 0 {
        format!(" {} | open ( {} ", app.session.angle_mode, open)
    } else {
        format!(" {} ", app.session.angle_mode)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title)
        .title_alignment(Alignment::Left);

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    // One column stays free for the cursor.
    let visible_width = inner_area.width.saturating_sub(1) as usize;
    let visible = tail_to_width(&app.session.display, visible_width);

    let line = if app.session.display == scicalc::format::ERROR_TEXT {
        Line::from(Span::styled(
            visible.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(highlight_expression(visible, Style::default().fg(Color::White)))
    };
    let text_area = Rect { width: visible_width as u16, ..inner_area };
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Right), text_area);

    frame.set_cursor(inner_area.x + inner_area.width.saturating_sub(1), inner_area.y);
}

fn render_keypad(frame: &mut Frame, area: Rect) {
    let spans: Vec<Span> = KEYPAD
        .iter()
        .flat_map(|(key, desc)| {
            vec![
                Span::styled(
                    *key,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" {}  ", desc),
                    Style::default().fg(Color::DarkGray),
                ),
            ]
        })
        .collect();

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Keys ");

    let paragraph = Paragraph::new(Line::from(spans))
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn render_history(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" History ")
        .title_alignment(Alignment::Center);

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    if app.session.history.is_empty() {
        let empty_msg = Paragraph::new("No calculations yet. Press Enter or = to evaluate.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty_msg, inner_area);
        return;
    }

    let base_style = Style::default().fg(Color::Cyan);
    let items: Vec<ListItem> = app
        .session
        .history
        .iter()
        .map(|entry| {
            let mut spans = vec![Span::styled("> ", Style::default().fg(Color::Green))];
            spans.extend(highlight_expression(&entry.expression, base_style));
            spans.push(Span::styled(" = ", Style::default().fg(Color::Gray)));

            let result_style = if entry.result.is_error() {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::LightMagenta).add_modifier(Modifier::BOLD)
            };
            spans.push(Span::styled(entry.display.clone(), result_style));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let max_scroll = items.len().saturating_sub(inner_area.height as usize);
    if app.scroll_to_bottom {
        app.history_scroll = max_scroll;
        app.scroll_to_bottom = false;
    }
    app.history_scroll = app.history_scroll.min(max_scroll);

    let list = List::new(items).block(Block::default());
    let mut state = ListState::default().with_offset(app.history_scroll);

    frame.render_stateful_widget(list, inner_area, &mut state);
}
