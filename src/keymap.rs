use crate::buffer::{BinaryOp, Constant, EditOp, Function};
use crate::calc_engine::AngleMode;

/// Everything a button on the keypad can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Edit(EditOp),
    Evaluate,
    SetAngle(AngleMode),
    ToggleAngle,
    ClearHistory,
    Help,
    Quit,
}

/// Keypad legend shown by the front-ends: (key, button).
pub const KEYPAD: &[(&str, &str)] = &[
    ("0-9 .", "digits"),
    ("+ - * / ^", "operators"),
    ("( )", "parens"),
    ("s c t", "sin cos tan"),
    ("l n", "log ln"),
    ("r", "√"),
    ("x", "e^"),
    ("p e", "π e"),
    ("Enter =", "evaluate"),
    ("Bksp", "CE"),
    ("Del Esc", "C"),
    ("d / R", "deg / rad"),
    ("m", "toggle angle"),
    ("h", "clear history"),
    ("F1 ?", "help"),
    ("q", "quit"),
];

/// Maps a printable key to its button.
pub fn action_for_char(c: char) -> Option<Action> {
    let action = match c {
        '0'..='9' => Action::Edit(EditOp::Digit(c)),
        '.' | ',' => Action::Edit(EditOp::Decimal),
        '(' => Action::Edit(EditOp::LeftParen),
        ')' => Action::Edit(EditOp::RightParen),
        's' => Action::Edit(EditOp::Function(Function::Sin)),
        'c' => Action::Edit(EditOp::Function(Function::Cos)),
        't' => Action::Edit(EditOp::Function(Function::Tan)),
        'l' => Action::Edit(EditOp::Function(Function::Log)),
        'n' => Action::Edit(EditOp::Function(Function::Ln)),
        'r' => Action::Edit(EditOp::Function(Function::Sqrt)),
        'x' => Action::Edit(EditOp::Function(Function::Exp)),
        'p' | 'π' => Action::Edit(EditOp::Constant(Constant::Pi)),
        'e' => Action::Edit(EditOp::Constant(Constant::E)),
        '=' | '\n' | '\r' => Action::Evaluate,
        'd' => Action::SetAngle(AngleMode::Degrees),
        'R' => Action::SetAngle(AngleMode::Radians),
        'm' => Action::ToggleAngle,
        'h' => Action::ClearHistory,
        '?' => Action::Help,
        'q' | 'Q' => Action::Quit,
        _ => return BinaryOp::from_char(c).map(|op| Action::Edit(EditOp::Operator(op))),
    };
    Some(action)
}
