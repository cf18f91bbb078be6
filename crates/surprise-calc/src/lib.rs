//! Surprise Calculator
//!
//! Core of an in-page calculator widget: a free-form expression buffer with
//! a safe evaluator, a persisted ten-entry history, popup overlays that gate
//! calculator input, and keystroke easter eggs that open mini-games or play
//! a short message sequence.
//!
//! Everything runs single-threaded on virtual time. Delayed effects (popup
//! transitions, the game close, the message sequence) are queued on a
//! [`Scheduler`](schedule::Scheduler) that the host advances.
//!
//! # Example
//!
//! ```rust
//! use surprise_calc::prelude::*;
//!
//! let storage = MemoryStorage::new();
//! let mut app = CalculatorApp::new(storage.clone());
//!
//! for key in ["1", "2"] {
//!     app.press_key(key);
//! }
//! app.press_button(Button::Action(ButtonAction::Operator(Operation::Add)));
//! app.press_key("3");
//! app.press_key("Enter");
//!
//! assert_eq!(app.display().primary, "15");
//! assert_eq!(app.history().entries(), vec!["12+3 = 15"]);
//!
//! // History survives a reload
//! let reloaded = CalculatorApp::new(storage);
//! assert_eq!(reloaded.history().len(), 1);
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod app;
pub mod config;
pub mod core;
pub mod egg;
pub mod keypad;
pub mod popup;
pub mod schedule;
pub mod storage;

/// Page integration - the mock DOM is always available for testing
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::app::CalculatorApp;
    pub use crate::config::CalculatorConfig;
    pub use crate::core::evaluator::Evaluator;
    pub use crate::core::format::format_result;
    pub use crate::core::history::HistoryStore;
    pub use crate::core::parser::{AstNode, Parser, Token, Tokenizer};
    pub use crate::core::{CalcError, CalcResult, Display, ExpressionEngine, Function, Operation};
    pub use crate::egg::{EasterEggDetector, EggTrigger, GameReply, GameSession};
    pub use crate::keypad::{Button, ButtonAction, Keypad};
    pub use crate::popup::{InputGate, Overlay, PopupCoordinator};
    pub use crate::schedule::{ScheduledTask, Scheduler};
    pub use crate::storage::{MemoryStorage, Storage, StorageError};
    pub use crate::wasm::{DomElement, DomEvent, MockDom, WasmDriver};
}
