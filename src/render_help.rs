use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use scicalc::keymap::KEYPAD;

use crate::tui_mode::app::App;

pub fn render_help(frame: &mut Frame, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" SciCalc Help ")
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black));

    let heading = Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED);

    let mut help_text = vec![
        Line::from(Span::styled("SciCalc - Scientific Keypad Calculator", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled("Keys:", heading)),
    ];
    help_text.extend(KEYPAD.iter().map(|(key, button)| Line::from(format!("  {:<10} : {}", key, button))));

    help_text.extend([
        Line::from("  F2         : toggle angle mode"),
        Line::from("  PgUp/PgDn  : page through history"),
        Line::from(""),
        Line::from(Span::styled("Functions:", heading)),
        Line::from("  sin(x) cos(x) tan(x) : x in degrees or radians, per the angle mode"),
        Line::from("  log(x)   : Base-10 logarithm"),
        Line::from("  ln(x)    : Natural logarithm"),
        Line::from("  √(x)     : Square root"),
        Line::from("  e^(x)    : Exponential function"),
        Line::from(""),
        Line::from(Span::styled("Constants:", heading)),
        Line::from("  π : 3.14159..."),
        Line::from("  e : Euler's number (2.71828...)"),
        Line::from(""),
        Line::from(Span::styled("Editing:", heading)),
        Line::from("  A second '.' in one number is ignored; '.' alone starts with 0."),
        Line::from("  An operator after another operator replaces it; '(' then '-' starts a negative group."),
        Line::from("  ')' only closes an open group that has something in it."),
        Line::from("  Backspace removes a whole function opener such as sin( at once."),
        Line::from("  2π, 3(4) and (1)(2) multiply implicitly."),
        Line::from(""),
        Line::from(Span::styled("Examples:", heading)),
        Line::from("  s30)        -> sin(30) = 0.5"),
        Line::from("  2p          -> 2π = 6.2831853072"),
        Line::from("  r25)+c180)  -> √(25)+cos(180) = 4"),
        Line::from("  x1)         -> e^(1) = 2.7182818285"),
    ]);

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true })
        .scroll((app.help_scroll as u16, 0));

    frame.render_widget(Clear, frame.size());
    frame.render_widget(paragraph, frame.size());
}
