#[cfg(feature = "line")]
use anyhow::Result;
#[cfg(feature = "line")]
use scicalc::{
    buffer::EditOp,
    calc_engine::AngleMode,
    keymap::{action_for_char, Action, KEYPAD},
    session::Session,
};
#[cfg(feature = "line")]
use std::io::{Write, stdin, stdout};
#[cfg(feature = "line")]
use termion::{
    event::Key,
    input::TermRead,
    raw::IntoRawMode,
    clear::CurrentLine as ClearLine,
};

#[cfg(feature = "line")]
fn action_for_key(key: Key) -> Option<Action> {
    match key {
        Key::Char(c) => action_for_char(c),
        Key::Backspace => Some(Action::Edit(EditOp::Backspace)),
        Key::Delete | Key::Esc => Some(Action::Edit(EditOp::Clear)),
        Key::F(1) => Some(Action::Help),
        Key::F(2) => Some(Action::ToggleAngle),
        Key::Ctrl('c') | Key::Ctrl('d') => Some(Action::Quit),
        _ => None,
    }
}

#[cfg(feature = "line")]
fn print_keys(stdout: &mut impl Write) -> Result<()> {
    for (key, button) in KEYPAD {
        write!(stdout, "\r  {:<10} {}\r\n", key, button)?;
    }
    Ok(())
}

#[cfg(feature = "line")]
pub fn run_line(angle_mode: AngleMode) -> Result<()> {
    println!("Rust Scientific Calculator");
    println!("Keys map to calculator buttons; press ? for the list, q to quit.\n");

    let mut stdout = stdout().into_raw_mode()?;
    let mut session = Session::new(angle_mode);
    let mut keys = stdin().keys();

    loop {
        write!(
            stdout,
            "\r{}[{}] {}",
            ClearLine,
            session.angle_mode,
            session.display
        )?;
        stdout.flush()?;

        let Some(key) = keys.next() else {
            break;
        };
        let Some(action) = action_for_key(key?) else {
            continue;
        };

        match action {
            Action::Evaluate => {
                session.apply(action);
                if let Some(entry) = session.history.last() {
                    write!(stdout, "\r\n  {} = {}\r\n", entry.expression, entry.display)?;
                }
            }
            Action::Help => {
                write!(stdout, "\r\n")?;
                print_keys(&mut stdout)?;
            }
            Action::Quit => {
                write!(stdout, "\r\nGoodbye!\r\n")?;
                break;
            }
            _ => session.apply(action),
        }
    }
    Ok(())
}
