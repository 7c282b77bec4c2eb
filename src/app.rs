use std::path::Path;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::{Config, MAX_QUESTION_COUNT, MIN_QUESTION_COUNT};
use crate::session::controller::{Session, SessionConfig, SessionPhase};
use crate::store::bank::{LoadError, QuestionBank};
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Setup,
    Quiz,
    Summary,
}

pub struct App {
    pub screen: AppScreen,
    pub config: Config,
    pub theme: &'static Theme,
    pub bank: Option<QuestionBank>,
    /// Blocking feed failure; the setup screen shows it and start is refused.
    pub load_error: Option<String>,
    /// Per-domain selected flags, parallel to `bank.domains()`.
    pub selected: Vec<bool>,
    /// Setup cursor: domain rows first, then the question-count row.
    pub setup_cursor: usize,
    /// Non-fatal inline message (empty domain filter).
    pub setup_error: Option<String>,
    pub session: Option<Session>,
    pub option_cursor: usize,
    pub should_quit: bool,
    rng: SmallRng,
}

impl App {
    pub fn new(config: Config) -> Self {
        let bank = match &config.bank_path {
            Some(path) => QuestionBank::load(Path::new(path)),
            None => QuestionBank::load_bundled(),
        };
        Self::from_load_result(config, bank)
    }

    fn from_load_result(config: Config, bank: Result<QuestionBank, LoadError>) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));

        let (bank, load_error) = match bank {
            Ok(bank) => (Some(bank), None),
            Err(err) => (None, Some(err.to_string())),
        };
        let selected = bank
            .as_ref()
            .map(|b| vec![true; b.domains().len()])
            .unwrap_or_default();

        Self {
            screen: AppScreen::Setup,
            config,
            theme,
            bank,
            load_error,
            selected,
            setup_cursor: 0,
            setup_error: None,
            session: None,
            option_cursor: 0,
            should_quit: false,
            rng: SmallRng::from_entropy(),
        }
    }

    fn domain_count(&self) -> usize {
        self.bank.as_ref().map(|b| b.domains().len()).unwrap_or(0)
    }

    /// Domain rows plus the count row.
    fn setup_rows(&self) -> usize {
        self.domain_count() + 1
    }

    pub fn setup_down(&mut self) {
        self.setup_cursor = (self.setup_cursor + 1) % self.setup_rows();
    }

    pub fn setup_up(&mut self) {
        if self.setup_cursor > 0 {
            self.setup_cursor -= 1;
        } else {
            self.setup_cursor = self.setup_rows() - 1;
        }
    }

    pub fn toggle_domain(&mut self) {
        if self.setup_cursor < self.selected.len() {
            self.selected[self.setup_cursor] = !self.selected[self.setup_cursor];
            self.setup_error = None;
        }
    }

    pub fn adjust_count(&mut self, delta: i64) {
        let count = self.config.question_count as i64 + delta;
        self.config.question_count =
            count.clamp(MIN_QUESTION_COUNT as i64, MAX_QUESTION_COUNT as i64) as usize;
    }

    /// Start (or restart) a session from the current selection. An emptied
    /// selection is written back as all-selected by the controller.
    pub fn start_session(&mut self) {
        let Some(bank) = &self.bank else {
            return;
        };

        let selected_domains: Vec<String> = bank
            .domains()
            .iter()
            .zip(&self.selected)
            .filter(|&(_, &on)| on)
            .map(|(d, _)| d.clone())
            .collect();
        let mut session_config = SessionConfig {
            selected_domains,
            target_count: self.config.question_count,
        };

        match Session::start(
            bank,
            &mut session_config,
            self.config.auto_advance(),
            &mut self.rng,
        ) {
            Ok(session) => {
                // Reflect the controller's fallback in the checklist
                for (flag, domain) in self.selected.iter_mut().zip(bank.domains()) {
                    *flag = session_config.selected_domains.contains(domain);
                }
                self.session = Some(session);
                self.option_cursor = 0;
                self.setup_error = None;
                self.screen = AppScreen::Quiz;
            }
            Err(err) => {
                self.setup_error = Some(err.to_string());
                self.screen = AppScreen::Setup;
            }
        }
    }

    pub fn option_down(&mut self) {
        if let Some(session) = &self.session
            && !session.options().is_empty()
        {
            self.option_cursor = (self.option_cursor + 1) % session.options().len();
        }
    }

    pub fn option_up(&mut self) {
        if let Some(session) = &self.session
            && !session.options().is_empty()
        {
            let len = session.options().len();
            self.option_cursor = (self.option_cursor + len - 1) % len;
        }
    }

    pub fn answer(&mut self, choice: usize) {
        if let Some(session) = &mut self.session {
            session.answer(choice);
        }
    }

    /// Manual advance; moves to the summary screen when the session ends.
    pub fn advance(&mut self) {
        if let (Some(session), Some(bank)) = (&mut self.session, &self.bank) {
            session.advance(bank, &mut self.rng);
            self.option_cursor = 0;
            if session.phase() == SessionPhase::Ended {
                self.screen = AppScreen::Summary;
            }
        }
    }

    /// Tick hook: fires a due auto-advance exactly like a manual one.
    pub fn on_tick(&mut self, now: Instant) {
        if let (Some(session), Some(bank)) = (&mut self.session, &self.bank)
            && session.tick(now, bank, &mut self.rng)
        {
            self.option_cursor = 0;
            if session.phase() == SessionPhase::Ended {
                self.screen = AppScreen::Summary;
            }
        }
    }

    /// Esc from the quiz: drop the session (canceling any pending timer)
    /// and return to setup.
    pub fn abandon_session(&mut self) {
        if let Some(session) = &mut self.session {
            session.abandon();
        }
        self.session = None;
        self.screen = AppScreen::Setup;
    }

    pub fn go_to_setup(&mut self) {
        self.session = None;
        self.screen = AppScreen::Setup;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_app(auto_advance_ms: u64) -> App {
        let bank = QuestionBank::from_json(
            r#"[
                {"domain": "Net", "question": "q0", "correctAnswer": "a0"},
                {"domain": "Net", "question": "q1", "correctAnswer": "a1"},
                {"domain": "Unix", "question": "q2", "correctAnswer": "a2"}
            ]"#,
        );
        let config = Config {
            auto_advance_ms,
            ..Config::default()
        };
        App::from_load_result(config, bank)
    }

    fn answer_correct(app: &mut App) {
        let idx = app
            .session
            .as_ref()
            .unwrap()
            .options()
            .iter()
            .position(|o| o.is_correct)
            .unwrap();
        app.answer(idx);
    }

    #[test]
    fn test_all_domains_selected_initially() {
        let app = test_app(1200);
        assert_eq!(app.selected, vec![true, true]);
        assert_eq!(app.screen, AppScreen::Setup);
        assert!(app.load_error.is_none());
    }

    #[test]
    fn test_load_error_blocks_start() {
        let config = Config::default();
        let mut app = App::from_load_result(config, QuestionBank::from_json("not json"));
        assert!(app.load_error.is_some());

        app.start_session();
        assert!(app.session.is_none());
        assert_eq!(app.screen, AppScreen::Setup);
    }

    #[test]
    fn test_start_with_emptied_selection_restores_checklist() {
        let mut app = test_app(1200);
        app.selected = vec![false, false];
        app.start_session();

        assert_eq!(app.screen, AppScreen::Quiz);
        assert_eq!(app.selected, vec![true, true]);
        assert_eq!(app.session.as_ref().unwrap().queue_len(), 3);
    }

    #[test]
    fn test_setup_cursor_wraps_over_domains_and_count_row() {
        let mut app = test_app(1200);
        assert_eq!(app.setup_rows(), 3);
        app.setup_up();
        assert_eq!(app.setup_cursor, 2);
        app.setup_down();
        assert_eq!(app.setup_cursor, 0);
    }

    #[test]
    fn test_adjust_count_clamps() {
        let mut app = test_app(1200);
        app.adjust_count(-1000);
        assert_eq!(app.config.question_count, MIN_QUESTION_COUNT);
        app.adjust_count(1000);
        assert_eq!(app.config.question_count, MAX_QUESTION_COUNT);
    }

    #[test]
    fn test_session_end_reaches_summary() {
        let mut app = test_app(1200);
        app.start_session();

        for _ in 0..3 {
            answer_correct(&mut app);
            app.advance();
        }
        assert_eq!(app.screen, AppScreen::Summary);
        assert_eq!(app.session.as_ref().unwrap().tally(), (3, 3));
    }

    #[test]
    fn test_tick_auto_advances_after_correct_answer() {
        let mut app = test_app(0);
        app.start_session();

        answer_correct(&mut app);
        app.on_tick(Instant::now() + Duration::from_millis(1));
        assert_eq!(app.session.as_ref().unwrap().position(), 1);
    }

    #[test]
    fn test_abandon_returns_to_setup_and_drops_session() {
        let mut app = test_app(1200);
        app.start_session();
        answer_correct(&mut app);

        app.abandon_session();
        assert!(app.session.is_none());
        assert_eq!(app.screen, AppScreen::Setup);

        // A stale tick after teardown is harmless
        app.on_tick(Instant::now());
        assert_eq!(app.screen, AppScreen::Setup);
    }
}
