//! A calculator session: the state a front-end keeps between key presses.

use tracing::{debug, info};

use crate::buffer::ExpressionBuffer;
use crate::calc_engine::{evaluate, AngleMode, EvaluationResult};
use crate::format::format;
use crate::keymap::Action;
use crate::normalize::normalize;

pub struct HistoryEntry {
    /// The normalized expression that was evaluated.
    pub expression: String,
    pub result: EvaluationResult,
    /// `result` as it was displayed.
    pub display: String,
}

pub struct Session {
    pub buffer: ExpressionBuffer,
    pub angle_mode: AngleMode,
    pub history: Vec<HistoryEntry>,
    /// What the display line shows: the buffer, or the last result right after "=".
    pub display: String,
}

impl Session {
    pub fn new(angle_mode: AngleMode) -> Self {
        info!(%angle_mode, "session started");
        Session {
            buffer: ExpressionBuffer::new(),
            angle_mode,
            history: Vec::new(),
            display: String::new(),
        }
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Edit(op) => {
                self.buffer.apply(op);
                self.display = self.buffer.text().to_string();
            }
            Action::Evaluate => self.submit(),
            Action::SetAngle(mode) => self.set_angle(mode),
            Action::ToggleAngle => self.set_angle(self.angle_mode.toggled()),
            Action::ClearHistory => self.history.clear(),
            // Screen state; the front-end handles these.
            Action::Help | Action::Quit => {}
        }
    }

    fn set_angle(&mut self, mode: AngleMode) {
        if mode != self.angle_mode {
            info!(from = %self.angle_mode, to = %mode, "angle mode changed");
            self.angle_mode = mode;
        }
    }

    /// "=": evaluate the buffer, record it, and seed the next expression
    /// with the result. An empty buffer evaluates to Error like any other
    /// incomplete expression.
    pub fn submit(&mut self) {
        let expression = normalize(self.buffer.text());
        let result = evaluate(&expression, self.angle_mode);
        let shown = format(&result);
        debug!(%expression, %shown, "evaluated");

        self.buffer = if result.is_error() {
            ExpressionBuffer::new()
        } else {
            ExpressionBuffer::from_text(shown.clone())
        };
        self.display = shown.clone();
        self.history.push(HistoryEntry {
            expression,
            result,
            display: shown,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::EditOp;
    use crate::keymap::action_for_char;

    fn press(session: &mut Session, keys: &str) {
        for c in keys.chars() {
            if let Some(action) = action_for_char(c) {
                session.apply(action);
            }
        }
    }

    #[test]
    fn result_seeds_next_expression() {
        let mut s = Session::new(AngleMode::Degrees);
        press(&mut s, "2(3)=");
        assert_eq!(s.display, "6");
        assert_eq!(s.buffer.text(), "6");
        assert_eq!(s.history.len(), 1);
        assert_eq!(s.history[0].expression, "2*(3)");

        press(&mut s, "+1=");
        assert_eq!(s.display, "7");
    }

    #[test]
    fn error_clears_buffer() {
        let mut s = Session::new(AngleMode::Degrees);
        press(&mut s, "1/0=");
        assert_eq!(s.display, "Error");
        assert!(s.buffer.is_empty());
        assert!(s.history[0].result.is_error());
    }

    #[test]
    fn angle_mode_applies_to_evaluation() {
        let mut s = Session::new(AngleMode::Degrees);
        press(&mut s, "c180)=");
        assert_eq!(s.display, "-1");

        s.apply(Action::Edit(EditOp::Clear));
        press(&mut s, "Rc0)=");
        assert_eq!(s.angle_mode, AngleMode::Radians);
        assert_eq!(s.display, "1");
    }

    #[test]
    fn empty_submit_records_error() {
        let mut s = Session::new(AngleMode::Degrees);
        press(&mut s, "=");
        assert_eq!(s.display, "Error");
        assert_eq!(s.history.len(), 1);
        assert_eq!(s.history[0].expression, "");
        assert_eq!(s.history[0].display, "Error");
        assert!(s.buffer.is_empty());
    }

    #[test]
    fn history_clear() {
        let mut s = Session::new(AngleMode::Radians);
        press(&mut s, "1+1=h");
        assert!(s.history.is_empty());
        assert_eq!(s.display, "2");
    }
}
