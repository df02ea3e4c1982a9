use scicalc::calc_engine::AngleMode;
use scicalc::keymap::Action;
use scicalc::session::Session;

pub struct App {
    pub session: Session,
    pub should_quit: bool,
    pub show_help: bool,
    pub help_scroll: usize,
    pub list_height: usize,
    pub history_scroll: usize,
    pub scroll_to_bottom: bool,
    pub terminal_too_small: bool,
}

impl App {
    pub fn new(angle_mode: AngleMode) -> Self {
        App {
            session: Session::new(angle_mode),
            should_quit: false,
            show_help: false,
            help_scroll: 0,
            list_height: 5,
            history_scroll: 0,
            scroll_to_bottom: false,
            terminal_too_small: false,
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        let before = self.session.history.len();

        match action {
            Action::Help => {
                self.show_help = !self.show_help;
                self.help_scroll = 0;
            }
            Action::Quit => self.should_quit = true,
            Action::ClearHistory => {
                self.session.apply(action);
                self.history_scroll = 0;
            }
            _ => self.session.apply(action),
        }
        if self.session.history.len() > before {
            self.scroll_to_bottom = true;
        }
    }

    pub fn scroll_history(&mut self, direction: i32) {
        let step = self.list_height.saturating_sub(1).max(1);
        if direction < 0 {
            self.history_scroll = self.history_scroll.saturating_sub(step);
        } else {
            self.history_scroll = self.history_scroll.saturating_add(step);
        }
        self.scroll_to_bottom = false;
    }
}
