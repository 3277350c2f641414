//! Validator UI - screens and app state
//!
//! Three screens:
//!
//! ```text
//! Welcome (form) ──submit──▶ Validating ──response──▶ Results
//!     ▲                                                  │
//!     └────────────── n (new validation) ◀───────────────┘
//! ```
//!
//! Once a result exists the user can move freely between Welcome and
//! Results; Validating also covers a pending follow-up inside Results.
//! All state mutation happens on the main thread between frames.

pub mod markdown;
pub mod render;
pub mod theme;

use crate::config::Config;
use crate::model::FollowUpExchange;
use crate::render::DisplayModel;
use crate::request::{IdeaForm, ValidationRequest, AVAILABLE_CRITICS};
use crate::session::Session;
use std::time::Instant;
use theme::Theme;

/// How long a toast stays on screen.
const TOAST_SECS: u64 = 5;

/// Top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Welcome,
    Validating,
    Results,
}

/// Which network call is outstanding. While not `None`, submit and
/// follow-up dispatch are disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pending {
    #[default]
    None,
    Validation,
    FollowUp,
}

impl Pending {
    pub fn is_busy(&self) -> bool {
        !matches!(self, Pending::None)
    }
}

/// Focusable form elements, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormFocus {
    #[default]
    IdeaName,
    Description,
    TargetMarket,
    ProblemSolving,
    UniqueValue,
    Critics,
    Submit,
}

impl FormFocus {
    pub fn next(self) -> Self {
        match self {
            FormFocus::IdeaName => FormFocus::Description,
            FormFocus::Description => FormFocus::TargetMarket,
            FormFocus::TargetMarket => FormFocus::ProblemSolving,
            FormFocus::ProblemSolving => FormFocus::UniqueValue,
            FormFocus::UniqueValue => FormFocus::Critics,
            FormFocus::Critics => FormFocus::Submit,
            FormFocus::Submit => FormFocus::IdeaName,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormFocus::IdeaName => FormFocus::Submit,
            FormFocus::Description => FormFocus::IdeaName,
            FormFocus::TargetMarket => FormFocus::Description,
            FormFocus::ProblemSolving => FormFocus::TargetMarket,
            FormFocus::UniqueValue => FormFocus::ProblemSolving,
            FormFocus::Critics => FormFocus::UniqueValue,
            FormFocus::Submit => FormFocus::Critics,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormFocus::IdeaName => "Idea name",
            FormFocus::Description => "Description",
            FormFocus::TargetMarket => "Target market",
            FormFocus::ProblemSolving => "Problem it solves",
            FormFocus::UniqueValue => "Unique value (optional)",
            FormFocus::Critics => "Critics",
            FormFocus::Submit => "Submit",
        }
    }

    /// Fields that accept multi-line input.
    pub fn is_multiline(&self) -> bool {
        matches!(self, FormFocus::Description | FormFocus::ProblemSolving)
    }
}

/// Auto-dismissing notification.
#[derive(Debug)]
pub struct Toast {
    pub message: String,
    created: Instant,
}

/// The whole UI state.
pub struct App {
    pub screen: Screen,
    pub form: IdeaForm,
    pub focus: FormFocus,
    /// Cursor within the critic row.
    pub critic_cursor: usize,
    /// Selection flags parallel to `AVAILABLE_CRITICS`.
    pub critic_selected: [bool; 5],
    pub pending: Pending,
    pub spinner_frame: usize,
    pub toast: Option<Toast>,
    pub session: Session,
    pub display: Option<DisplayModel>,
    pub results_scroll: usize,
    /// Follow-up input line; `Some` while the prompt is open.
    pub follow_up_input: Option<String>,
    /// Health probe outcome, `None` until the first probe lands.
    pub backend_healthy: Option<bool>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let mut critic_selected = [true; 5];
        if !config.default_critics.is_empty() {
            for (i, critic) in AVAILABLE_CRITICS.iter().enumerate() {
                critic_selected[i] = config.default_critics.iter().any(|c| c == critic);
            }
        }
        Self {
            screen: Screen::Welcome,
            form: IdeaForm::default(),
            focus: FormFocus::default(),
            critic_cursor: 0,
            critic_selected,
            pending: Pending::None,
            spinner_frame: 0,
            toast: None,
            session: Session::default(),
            display: None,
            results_scroll: 0,
            follow_up_input: None,
            backend_healthy: None,
            should_quit: false,
        }
    }

    /// Advance animation state and expire old toasts. Called every frame.
    pub fn tick(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % Theme::SPINNER_BRAILLE.len();
        if let Some(toast) = &self.toast {
            if toast.created.elapsed().as_secs() >= TOAST_SECS {
                self.toast = None;
            }
        }
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            created: Instant::now(),
        });
    }

    pub fn spinner(&self) -> char {
        Theme::SPINNER_BRAILLE[self.spinner_frame]
    }

    /// The mutable string behind the focused field, if it is a text field.
    pub fn focused_field(&mut self) -> Option<&mut String> {
        match self.focus {
            FormFocus::IdeaName => Some(&mut self.form.idea_name),
            FormFocus::Description => Some(&mut self.form.description),
            FormFocus::TargetMarket => Some(&mut self.form.target_market),
            FormFocus::ProblemSolving => Some(&mut self.form.problem_solving),
            FormFocus::UniqueValue => Some(&mut self.form.unique_value),
            FormFocus::Critics | FormFocus::Submit => None,
        }
    }

    pub fn toggle_critic(&mut self) {
        if self.critic_cursor < self.critic_selected.len() {
            self.critic_selected[self.critic_cursor] = !self.critic_selected[self.critic_cursor];
        }
    }

    fn selected_critics(&self) -> Vec<String> {
        AVAILABLE_CRITICS
            .iter()
            .zip(self.critic_selected.iter())
            .filter(|(_, selected)| **selected)
            .map(|(critic, _)| critic.to_string())
            .collect()
    }

    /// Validate the form and, when it passes, hand back the request to
    /// dispatch. Build failures become toasts and nothing is sent.
    pub fn try_submit(&mut self) -> Option<ValidationRequest> {
        if self.pending.is_busy() {
            return None;
        }
        self.form.selected_critics = self.selected_critics();
        match self.form.build() {
            Ok(request) => {
                self.pending = Pending::Validation;
                self.screen = Screen::Validating;
                Some(request)
            }
            Err(error) => {
                self.show_toast(error.to_string());
                None
            }
        }
    }

    /// Record a successful validation and move to the results screen.
    pub fn apply_validation(
        &mut self,
        request: ValidationRequest,
        result: crate::model::ValidationResult,
    ) {
        self.display = Some(crate::render::render(&result));
        self.session.record_result(request, result);
        self.pending = Pending::None;
        self.screen = Screen::Results;
        self.results_scroll = 0;
        self.follow_up_input = None;
    }

    pub fn apply_validation_error(&mut self, message: String) {
        self.pending = Pending::None;
        self.screen = Screen::Welcome;
        self.show_toast(message);
    }

    /// Open the follow-up prompt; refuses without an active session.
    pub fn open_follow_up(&mut self) {
        if self.session.thread_id().is_none() {
            self.show_toast("No active session - validate an idea first.");
            return;
        }
        if !self.pending.is_busy() {
            self.follow_up_input = Some(String::new());
        }
    }

    /// Take the follow-up question for dispatch, if there is one and a
    /// thread to send it to.
    pub fn take_follow_up(&mut self) -> Option<(String, String)> {
        if self.pending.is_busy() {
            return None;
        }
        let question = self.follow_up_input.as_ref()?.trim().to_string();
        if question.is_empty() {
            return None;
        }
        let thread_id = match self.session.thread_id() {
            Some(id) => id.to_string(),
            None => {
                self.show_toast("No active session - validate an idea first.");
                self.follow_up_input = None;
                return None;
            }
        };
        self.pending = Pending::FollowUp;
        self.follow_up_input = None;
        Some((thread_id, question))
    }

    pub fn apply_follow_up(&mut self, exchange: FollowUpExchange) {
        self.pending = Pending::None;
        self.session.record_follow_up(exchange);
    }

    pub fn apply_follow_up_error(&mut self, message: String) {
        self.pending = Pending::None;
        self.show_toast(message);
    }

    /// Start over with a blank form. The previous result stays reachable
    /// until the next successful validation supersedes it.
    pub fn new_validation(&mut self) {
        if self.pending.is_busy() {
            return;
        }
        self.form = IdeaForm::default();
        self.focus = FormFocus::default();
        self.screen = Screen::Welcome;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Outcome, ValidationResult};

    fn app() -> App {
        App::new(&Config::default())
    }

    fn filled_form() -> IdeaForm {
        IdeaForm {
            idea_name: "PlantPal".to_string(),
            description: "An app that reminds people to water their plants".to_string(),
            target_market: "urban plant owners".to_string(),
            problem_solving: "People forget to water plants and they die".to_string(),
            unique_value: String::new(),
            selected_critics: Vec::new(),
        }
    }

    fn result(thread_id: &str) -> ValidationResult {
        ValidationResult {
            thread_id: thread_id.to_string(),
            outcome: Outcome::Legacy {
                summary: "s".to_string(),
                strengths: vec![],
                concerns: vec![],
                next_steps: vec![],
                analysis: None,
            },
        }
    }

    #[test]
    fn invalid_form_toasts_and_stays_on_welcome() {
        let mut app = app();
        assert!(app.try_submit().is_none());
        assert_eq!(app.screen, Screen::Welcome);
        assert!(app.toast.is_some());
        assert!(!app.pending.is_busy());
    }

    #[test]
    fn valid_form_moves_to_validating_and_blocks_resubmit() {
        let mut app = app();
        app.form = filled_form();
        let request = app.try_submit().expect("should build");
        assert_eq!(app.screen, Screen::Validating);
        assert!(app.pending.is_busy());
        // A second submission while one is outstanding is refused.
        assert!(app.try_submit().is_none());
        assert_eq!(request.idea_name, "PlantPal");
    }

    #[test]
    fn all_critics_selected_by_default() {
        let mut app = app();
        app.form = filled_form();
        let request = app.try_submit().unwrap();
        assert_eq!(request.selected_critics.len(), AVAILABLE_CRITICS.len());
    }

    #[test]
    fn critic_defaults_follow_config() {
        let config = Config {
            default_critics: vec!["vc".to_string(), "engineer".to_string()],
            ..Config::default()
        };
        let app = App::new(&config);
        assert_eq!(app.critic_selected, [true, true, false, false, false]);
    }

    #[test]
    fn validation_response_lands_on_results() {
        let mut app = app();
        app.form = filled_form();
        let request = app.try_submit().unwrap();
        app.apply_validation(request, result("t-1"));
        assert_eq!(app.screen, Screen::Results);
        assert!(!app.pending.is_busy());
        assert!(app.display.is_some());
        assert_eq!(app.session.thread_id(), Some("t-1"));
    }

    #[test]
    fn validation_error_returns_to_welcome_with_toast() {
        let mut app = app();
        app.form = filled_form();
        app.try_submit().unwrap();
        app.apply_validation_error("boom".to_string());
        assert_eq!(app.screen, Screen::Welcome);
        assert_eq!(app.toast.as_ref().unwrap().message, "boom");
    }

    #[test]
    fn follow_up_without_session_is_refused_locally() {
        let mut app = app();
        app.open_follow_up();
        assert!(app.follow_up_input.is_none());
        assert!(app.toast.as_ref().unwrap().message.contains("No active session"));

        // Even a directly-typed question cannot be taken without a thread.
        app.follow_up_input = Some("what about pricing?".to_string());
        assert!(app.take_follow_up().is_none());
        assert!(!app.pending.is_busy());
    }

    #[test]
    fn follow_up_flows_through_the_active_thread() {
        let mut app = app();
        app.form = filled_form();
        let request = app.try_submit().unwrap();
        app.apply_validation(request, result("t-9"));

        app.open_follow_up();
        *app.follow_up_input.as_mut().unwrap() = "  what about pricing?  ".to_string();
        let (thread_id, question) = app.take_follow_up().unwrap();
        assert_eq!(thread_id, "t-9");
        assert_eq!(question, "what about pricing?");
        assert!(app.pending.is_busy());
    }

    #[test]
    fn blank_follow_up_is_not_dispatched() {
        let mut app = app();
        app.form = filled_form();
        let request = app.try_submit().unwrap();
        app.apply_validation(request, result("t-2"));
        app.open_follow_up();
        assert!(app.take_follow_up().is_none());
    }

    #[test]
    fn new_result_clears_previous_follow_ups() {
        let mut app = app();
        app.form = filled_form();
        let request = app.try_submit().unwrap();
        app.apply_validation(request.clone(), result("t-1"));
        app.apply_follow_up(FollowUpExchange {
            thread_id: "t-1".to_string(),
            question: "q".to_string(),
            answer: "a".to_string(),
        });
        assert_eq!(app.session.follow_ups.len(), 1);

        app.new_validation();
        app.form = filled_form();
        let request2 = app.try_submit().unwrap();
        app.apply_validation(request2, result("t-2"));
        assert!(app.session.follow_ups.is_empty());
        assert_eq!(app.session.thread_id(), Some("t-2"));
    }

    #[test]
    fn focus_order_cycles() {
        let mut focus = FormFocus::default();
        for _ in 0..7 {
            focus = focus.next();
        }
        assert_eq!(focus, FormFocus::IdeaName);
        assert_eq!(FormFocus::IdeaName.prev(), FormFocus::Submit);
    }
}
