use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::Config;
use crate::engine::queue::TABLE_MAX;
use crate::session::answer::{self, AnswerError};
use crate::session::practice::{Outcome, Phase, PracticeSession};
use crate::session::summary::SessionSummary;
use crate::store::json_store::JsonStore;
use crate::store::schema::ProfileData;
use crate::ui::theme::Theme;

// Largest product is 3 digits; a little slack for typos the learner
// wants to see before fixing.
const MAX_ANSWER_LEN: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    TableSelect,
    Practice,
    Summary,
}

/// What the last submission produced: a scored outcome, or an input
/// problem the learner can fix in place.
pub type Feedback = Result<Outcome, AnswerError>;

pub struct App {
    pub screen: AppScreen,
    pub config: Config,
    pub theme: &'static Theme,
    pub store: Option<JsonStore>,
    pub profile: ProfileData,
    pub selected: [bool; TABLE_MAX as usize],
    pub cursor: usize,
    pub select_error: Option<String>,
    pub session: Option<PracticeSession>,
    pub answer: String,
    pub feedback: Option<Feedback>,
    pub summary: Option<SessionSummary>,
    pub should_quit: bool,
    seed: Option<u64>,
}

impl App {
    pub fn new(seed: Option<u64>) -> Self {
        let mut config = Config::load().unwrap_or_default();
        config.validate();
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));

        let store = JsonStore::new().ok();
        let profile = store
            .as_ref()
            .map(|s| s.load_profile())
            .unwrap_or_default();

        Self {
            screen: AppScreen::TableSelect,
            config,
            theme,
            store,
            profile,
            selected: [false; TABLE_MAX as usize],
            cursor: 0,
            select_error: None,
            session: None,
            answer: String::new(),
            feedback: None,
            summary: None,
            should_quit: false,
            seed,
        }
    }

    pub fn preselect_tables(&mut self, tables: &[u8]) {
        for &table in tables {
            if (1..=TABLE_MAX).contains(&table) {
                self.selected[usize::from(table) - 1] = true;
            }
        }
    }

    pub fn cursor_up(&mut self) {
        let len = self.selected.len();
        self.cursor = (self.cursor + len - 1) % len;
    }

    pub fn cursor_down(&mut self) {
        self.cursor = (self.cursor + 1) % self.selected.len();
    }

    pub fn toggle_cursor(&mut self) {
        self.selected[self.cursor] = !self.selected[self.cursor];
        self.select_error = None;
    }

    pub fn toggle_table(&mut self, table: u8) {
        if (1..=TABLE_MAX).contains(&table) {
            let idx = usize::from(table) - 1;
            self.selected[idx] = !self.selected[idx];
            self.cursor = idx;
            self.select_error = None;
        }
    }

    fn chosen_tables(&self) -> Vec<u8> {
        self.selected
            .iter()
            .enumerate()
            .filter(|&(_, &on)| on)
            .map(|(idx, _)| idx as u8 + 1)
            .collect()
    }

    fn session_rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        }
    }

    pub fn start_session(&mut self) {
        let tables = self.chosen_tables();
        let lifetime = (self.profile.lifetime_correct, self.profile.lifetime_incorrect);
        match PracticeSession::new(
            &tables,
            self.config.problems_per_table,
            lifetime,
            self.session_rng(),
        ) {
            Ok(mut session) => {
                session.advance();
                self.session = Some(session);
                self.answer.clear();
                self.feedback = None;
                self.summary = None;
                self.select_error = None;
                self.screen = AppScreen::Practice;
            }
            Err(err) => {
                self.select_error = Some(err.to_string());
            }
        }
    }

    pub fn push_answer_char(&mut self, ch: char) {
        if matches!(self.feedback, Some(Ok(_))) {
            return; // waiting for the learner to advance
        }
        if ch.is_ascii_digit() && self.answer.len() < MAX_ANSWER_LEN {
            self.answer.push(ch);
            self.feedback = None;
        }
    }

    pub fn backspace_answer(&mut self) {
        if matches!(self.feedback, Some(Ok(_))) {
            return;
        }
        self.answer.pop();
        self.feedback = None;
    }

    /// Score the typed answer against the current problem. An unparseable
    /// answer becomes retry feedback and mutates nothing else.
    pub fn submit_answer(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(fact) = session.current() else {
            return;
        };
        match answer::parse_answer(&self.answer) {
            Err(err) => {
                self.feedback = Some(Err(err));
            }
            Ok(value) => {
                let outcome = session.evaluate(fact, value);
                self.feedback = Some(Ok(outcome));
                self.persist_totals();
            }
        }
    }

    /// Clear feedback and draw the next problem; flips to the summary
    /// screen once everything is mastered.
    pub fn next_problem(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        self.answer.clear();
        self.feedback = None;
        if session.advance() == Phase::Mastered {
            self.finish_session();
        }
    }

    pub fn stop_session(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.stop();
        }
        self.finish_session();
    }

    fn finish_session(&mut self) {
        if let Some(session) = self.session.as_ref() {
            self.summary = Some(SessionSummary::from_session(session));
        }
        self.answer.clear();
        self.feedback = None;
        self.screen = AppScreen::Summary;
    }

    /// Fresh session over the same table selection.
    pub fn restart_session(&mut self) {
        self.start_session();
    }

    pub fn back_to_select(&mut self) {
        self.session = None;
        self.summary = None;
        self.screen = AppScreen::TableSelect;
    }

    /// Lifetime totals are written after every answered problem. A failed
    /// write is ignored: the in-memory totals stay authoritative and the
    /// next answer will try again.
    fn persist_totals(&mut self) {
        if let Some(session) = self.session.as_ref() {
            let stats = session.stats();
            self.profile.lifetime_correct = stats.lifetime_correct;
            self.profile.lifetime_incorrect = stats.lifetime_incorrect;
            self.profile.last_practiced = Some(Utc::now());
        }
        if let Some(store) = self.store.as_ref() {
            let _ = store.save_profile(&self.profile);
        }
    }
}
