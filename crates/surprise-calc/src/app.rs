//! Calculator widget
//!
//! [`CalculatorApp`] routes input events to the expression engine, the popup
//! coordinator and the easter-egg detector, and dispatches the tasks they
//! queue on the shared [`Scheduler`].

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info};

use crate::config::CalculatorConfig;
use crate::core::history::HistoryStore;
use crate::core::{Display, ExpressionEngine};
use crate::egg::{EasterEggDetector, EggTrigger, GameReply, GameSession, GREETING_MESSAGES};
use crate::keypad::{Button, ButtonAction};
use crate::popup::{InputGate, Overlay, PopupCoordinator};
use crate::schedule::{ScheduledTask, Scheduler};
use crate::storage::Storage;

/// The calculator widget
#[derive(Debug)]
pub struct CalculatorApp<R: Rng = StdRng> {
    config: CalculatorConfig,
    engine: ExpressionEngine,
    popups: PopupCoordinator,
    detector: EasterEggDetector,
    scheduler: Scheduler,
    /// Active round, kept until the game overlay is hidden
    game: Option<GameSession>,
    game_message: String,
    game_input: String,
    rng: R,
}

#[cfg(not(target_arch = "wasm32"))]
impl CalculatorApp<StdRng> {
    /// Create a widget with default configuration, loading history from
    /// `storage`
    #[must_use]
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self::with_config(storage, CalculatorConfig::default())
    }

    /// Create a widget with the given configuration
    #[must_use]
    pub fn with_config(storage: impl Storage + 'static, config: CalculatorConfig) -> Self {
        use rand::SeedableRng;
        Self::with_rng(storage, config, StdRng::from_entropy())
    }
}

impl<R: Rng> CalculatorApp<R> {
    /// Create a widget drawing game numbers from `rng`
    pub fn with_rng(storage: impl Storage + 'static, config: CalculatorConfig, rng: R) -> Self {
        let history = HistoryStore::load(
            Box::new(storage),
            config.storage_key.clone(),
            config.history_capacity,
        );
        let gate = InputGate::new();
        let popups = PopupCoordinator::new(
            gate.clone(),
            config.popup_enter_delay_ms,
            config.game_close_delay_ms,
        );
        let detector = EasterEggDetector::new(gate, config.keystroke_buffer_len);

        Self {
            engine: ExpressionEngine::new(history),
            popups,
            detector,
            scheduler: Scheduler::new(),
            game: None,
            game_message: String::new(),
            game_input: String::new(),
            rng,
            config,
        }
    }

    // ===== Calculator input (gated) =====

    /// Keypad press; ignored while a popup is active
    pub fn press_button(&mut self, button: Button) {
        if self.popups.gate().is_engaged() {
            debug!(?button, "Button ignored while popup is active");
            return;
        }

        match button {
            Button::Digit(ch) => self.engine.append(&ch.to_string()),
            Button::Action(action) => self.handle_action(action),
        }
    }

    fn handle_action(&mut self, action: ButtonAction) {
        if let Some(token) = action.token() {
            self.engine.append(&token);
            return;
        }
        match action {
            ButtonAction::Clear => self.engine.clear(),
            ButtonAction::ToggleSign => self.engine.toggle_sign(),
            ButtonAction::Percentage => {
                // The display already shows the failure
                let _ = self.engine.percentage();
            }
            ButtonAction::Calculate => {
                let _ = self.engine.calculate();
            }
            _ => {}
        }
    }

    /// Document-level key press.
    ///
    /// The calculator's key handler runs first, then the easter-egg detector.
    /// Both check the gate on entry, so a key that opens a popup is not seen
    /// by the detector.
    pub fn press_key(&mut self, key: &str) {
        self.handle_calculator_key(key);

        if let Some(trigger) = self.detector.feed(key) {
            self.start_easter_egg(trigger);
        }
    }

    /// Only single-character digit and `.` keys append; named keys such as
    /// `F5` never reach the buffer even though they contain a digit.
    fn handle_calculator_key(&mut self, key: &str) {
        if self.popups.gate().is_engaged() {
            return;
        }

        match key {
            "0" | "1" | "2" | "3" | "4" | "5" | "6" | "7" | "8" | "9" | "." => {
                self.engine.append(key);
            }
            "Enter" => {
                let _ = self.engine.calculate();
            }
            "Backspace" => self.engine.backspace(),
            "h" | "H" => self.toggle_history(),
            _ => {}
        }
    }

    // ===== Popup input (accepted while gated) =====

    /// Show or hide the history panel
    pub fn toggle_history(&mut self) {
        self.popups.toggle_history(&mut self.scheduler);
    }

    /// Close the history panel
    pub fn close_history(&mut self) {
        if self.popups.is_visible(Overlay::History) {
            self.popups.close(Overlay::History, &mut self.scheduler);
        }
    }

    /// Empty the history and delete its storage key
    pub fn clear_history(&mut self) {
        self.engine.history_mut().clear();
        info!("History cleared");
    }

    /// Replace the game answer field's text
    pub fn set_game_input(&mut self, text: &str) {
        self.game_input = text.to_string();
    }

    /// Check the game answer field; returns the reply if the round took it
    pub fn submit_game_input(&mut self) -> Option<GameReply> {
        let reply = self.game.as_mut()?.submit(&self.game_input)?;
        debug!(input = %self.game_input, %reply, "Game answer checked");
        self.game_message = reply.to_string();
        Some(reply)
    }

    /// Type `answer` into the game field and submit it
    pub fn submit_answer(&mut self, answer: &str) -> Option<GameReply> {
        self.set_game_input(answer);
        self.submit_game_input()
    }

    /// Start closing the game overlay
    pub fn close_game(&mut self) {
        self.popups.close(Overlay::Game, &mut self.scheduler);
    }

    // ===== Easter eggs =====

    fn start_easter_egg(&mut self, trigger: EggTrigger) {
        info!(?trigger, "Easter egg triggered");
        match trigger {
            EggTrigger::NumberGame => {
                let session = GameSession::number_guess(&mut self.rng);
                self.start_game(session);
            }
            EggTrigger::MathGame => {
                let session = GameSession::multiplication(&mut self.rng);
                self.start_game(session);
            }
            EggTrigger::Greeting => self.start_greeting(),
        }
    }

    fn start_game(&mut self, session: GameSession) {
        self.popups.open(Overlay::Game, &mut self.scheduler);
        self.game_input.clear();
        self.game_message = session.prompt();
        self.game = Some(session);
    }

    /// Shows the first greeting now and queues the rest as one linear chain
    fn start_greeting(&mut self) {
        let [first, rest @ ..] = GREETING_MESSAGES;
        self.engine.show_message(first);

        let step = self.config.easter_egg_step_ms;
        let mut delay = 0;
        for message in rest {
            delay += step;
            self.scheduler
                .schedule(delay, ScheduledTask::ShowMessage(message));
        }
        self.scheduler.schedule(
            delay + self.config.easter_egg_reset_ms,
            ScheduledTask::ResetCalculator,
        );
    }

    // ===== Time =====

    /// Advance virtual time, running every task that falls due
    pub fn advance(&mut self, ms: u64) {
        let until = self.scheduler.now_ms().saturating_add(ms);
        while let Some(task) = self.scheduler.pop_due(until) {
            self.run_task(task);
        }
        self.scheduler.advance_to(until);
    }

    /// Run the earliest queued task whatever its due time; false if idle
    pub fn run_next_task(&mut self) -> bool {
        match self.scheduler.pop_next() {
            Some(task) => {
                self.run_task(task);
                true
            }
            None => false,
        }
    }

    fn run_task(&mut self, task: ScheduledTask) {
        debug!(?task, now_ms = self.scheduler.now_ms(), "Running scheduled task");
        match task {
            ScheduledTask::EnterActive(overlay) => self.popups.activate_enter(overlay),
            ScheduledTask::FinishGameClose => {
                self.popups.finish_game_close();
                self.game = None;
            }
            ScheduledTask::ShowMessage(message) => self.engine.show_message(message),
            ScheduledTask::ResetCalculator => self.engine.clear(),
        }
    }

    // ===== Accessors =====

    /// Display regions
    #[must_use]
    pub fn display(&self) -> &Display {
        self.engine.display()
    }

    /// The expression engine
    #[must_use]
    pub fn engine(&self) -> &ExpressionEngine {
        &self.engine
    }

    /// The history log
    #[must_use]
    pub fn history(&self) -> &HistoryStore {
        self.engine.history()
    }

    /// Popup state
    #[must_use]
    pub fn popups(&self) -> &PopupCoordinator {
        &self.popups
    }

    /// True while a popup blocks calculator input
    #[must_use]
    pub fn is_popup_active(&self) -> bool {
        self.popups.gate().is_engaged()
    }

    /// Active game round
    #[must_use]
    pub fn game(&self) -> Option<&GameSession> {
        self.game.as_ref()
    }

    /// Game message area text
    #[must_use]
    pub fn game_message(&self) -> &str {
        &self.game_message
    }

    /// Game answer field text
    #[must_use]
    pub fn game_input(&self) -> &str {
        &self.game_input
    }

    /// The scheduler
    #[must_use]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }
}
