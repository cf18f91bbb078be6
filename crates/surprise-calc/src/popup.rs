//! Overlay visibility and the shared input gate
//!
//! Two overlays exist: the history panel and the game panel. While either is
//! visible the [`InputGate`] is engaged and calculator input is dropped.

use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;

use crate::schedule::{ScheduledTask, Scheduler};

/// Shared "a popup is active" flag.
///
/// Clones observe the same flag. The coordinator writes it; the app and the
/// easter-egg detector read it at the top of every input event.
#[derive(Debug, Clone, Default)]
pub struct InputGate(Rc<Cell<bool>>);

impl InputGate {
    /// Create a released gate
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a popup holds the gate
    #[must_use]
    pub fn is_engaged(&self) -> bool {
        self.0.get()
    }

    /// Block calculator input
    pub fn engage(&self) {
        self.0.set(true);
    }

    /// Let calculator input through again
    pub fn release(&self) {
        self.0.set(false);
    }
}

/// The two popups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overlay {
    /// Calculation history panel
    History,
    /// Mini-game panel
    Game,
}

/// Visibility of one overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverlayState {
    /// Container shown (no `hidden` class)
    pub visible: bool,
    /// Enter transition applied (`popup-enter-active` class)
    pub enter_active: bool,
}

/// Owns both overlays and the gate
#[derive(Debug)]
pub struct PopupCoordinator {
    history: OverlayState,
    game: OverlayState,
    gate: InputGate,
    enter_delay_ms: u64,
    game_close_delay_ms: u64,
}

impl PopupCoordinator {
    /// Create a coordinator with both overlays hidden
    #[must_use]
    pub fn new(gate: InputGate, enter_delay_ms: u64, game_close_delay_ms: u64) -> Self {
        Self {
            history: OverlayState::default(),
            game: OverlayState::default(),
            gate,
            enter_delay_ms,
            game_close_delay_ms,
        }
    }

    /// Show an overlay, engage the gate and queue its enter transition
    pub fn open(&mut self, overlay: Overlay, scheduler: &mut Scheduler) {
        self.state_mut(overlay).visible = true;
        self.gate.engage();
        scheduler.schedule(self.enter_delay_ms, ScheduledTask::EnterActive(overlay));
        debug!(?overlay, "Opened popup");
    }

    /// Close an overlay.
    ///
    /// History hides at once. The game drops its enter transition now and
    /// hides after the close delay, keeping the gate engaged until then.
    pub fn close(&mut self, overlay: Overlay, scheduler: &mut Scheduler) {
        match overlay {
            Overlay::History => {
                self.history = OverlayState::default();
                self.gate.release();
            }
            Overlay::Game => {
                self.game.enter_active = false;
                scheduler.schedule(self.game_close_delay_ms, ScheduledTask::FinishGameClose);
            }
        }
        debug!(?overlay, "Closing popup");
    }

    /// Flip the history panel; returns true if it is now visible
    pub fn toggle_history(&mut self, scheduler: &mut Scheduler) -> bool {
        if self.history.visible {
            self.close(Overlay::History, scheduler);
            false
        } else {
            self.open(Overlay::History, scheduler);
            true
        }
    }

    /// Apply a queued enter transition; ignored if the overlay was hidden
    /// in the meantime
    pub fn activate_enter(&mut self, overlay: Overlay) {
        let state = self.state_mut(overlay);
        if state.visible {
            state.enter_active = true;
        }
    }

    /// Hide the game overlay and release the gate
    pub fn finish_game_close(&mut self) {
        self.game = OverlayState::default();
        self.gate.release();
        debug!("Game popup hidden");
    }

    /// State of one overlay
    #[must_use]
    pub fn state(&self, overlay: Overlay) -> OverlayState {
        match overlay {
            Overlay::History => self.history,
            Overlay::Game => self.game,
        }
    }

    /// True if the overlay is shown
    #[must_use]
    pub fn is_visible(&self, overlay: Overlay) -> bool {
        self.state(overlay).visible
    }

    /// True if the overlay's enter transition has been applied
    #[must_use]
    pub fn is_enter_active(&self, overlay: Overlay) -> bool {
        self.state(overlay).enter_active
    }

    /// The shared gate
    #[must_use]
    pub fn gate(&self) -> &InputGate {
        &self.gate
    }

    fn state_mut(&mut self, overlay: Overlay) -> &mut OverlayState {
        match overlay {
            Overlay::History => &mut self.history,
            Overlay::Game => &mut self.game,
        }
    }
}
