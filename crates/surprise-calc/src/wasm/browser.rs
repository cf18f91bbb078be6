//! Browser bindings
//!
//! [`BrowserCalculator`] exposes the widget to the page script through
//! wasm-bindgen. History persists in `window.localStorage`; the host page
//! calls [`BrowserCalculator::advance`] from its own timer.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::warn;
use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::app::CalculatorApp;
use crate::config::CalculatorConfig;
use crate::keypad::Button;
use crate::popup::Overlay;
use crate::storage::{MemoryStorage, Storage, StorageError};

/// [`Storage`] over `window.localStorage`
#[derive(Debug)]
pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    /// The window's local storage, if the browser grants it
    pub fn from_window() -> Result<Self, StorageError> {
        let window =
            web_sys::window().ok_or_else(|| StorageError::Backend("no window".to_string()))?;
        let inner = window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| StorageError::Backend("localStorage unavailable".to_string()))?;
        Ok(Self { inner })
    }
}

fn js_error(value: JsValue) -> StorageError {
    StorageError::Backend(format!("{value:?}"))
}

impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key).map_err(js_error)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set_item(key, value).map_err(js_error)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.inner.remove_item(key).map_err(js_error)
    }
}

/// Maps `Math.random()` output onto a 64-bit seed
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn seed_from_unit(unit: f64) -> u64 {
    const SCALE: f64 = 9_007_199_254_740_992.0; // 2^53
    (unit.clamp(0.0, 1.0) * SCALE) as u64
}

fn overlay_from_name(name: &str) -> Option<Overlay> {
    match name {
        "history" => Some(Overlay::History),
        "game" => Some(Overlay::Game),
        _ => None,
    }
}

/// Calculator widget for the page script
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    app: CalculatorApp<StdRng>,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Create the widget, loading history from `localStorage`.
    ///
    /// Falls back to in-memory history when `localStorage` is unavailable.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook::set_once();

        let config = CalculatorConfig::default();
        let rng = StdRng::seed_from_u64(seed_from_unit(js_sys::Math::random()));
        let app = match LocalStorage::from_window() {
            Ok(storage) => CalculatorApp::with_rng(storage, config, rng),
            Err(e) => {
                warn!(error = %e, "localStorage unavailable, history will not persist");
                CalculatorApp::with_rng(MemoryStorage::new(), config, rng)
            }
        };
        Self { app }
    }

    /// Keypad click, given the button's `data-digit` / `data-action` values
    pub fn press_button(&mut self, digit: Option<String>, action: Option<String>) {
        if let Some(button) = Button::from_data(digit.as_deref(), action.as_deref()) {
            self.app.press_button(button);
        }
    }

    /// Document keydown, given `event.key`
    pub fn press_key(&mut self, key: &str) {
        self.app.press_key(key);
    }

    /// History close button
    pub fn close_history(&mut self) {
        self.app.close_history();
    }

    /// History clear button
    pub fn clear_history(&mut self) {
        self.app.clear_history();
    }

    /// Game answer field changed
    pub fn set_game_input(&mut self, text: &str) {
        self.app.set_game_input(text);
    }

    /// Game submit button; returns the reply text if the round took it
    pub fn submit_game_input(&mut self) -> Option<String> {
        self.app.submit_game_input().map(|reply| reply.to_string())
    }

    /// Game close button
    pub fn close_game(&mut self) {
        self.app.close_game();
    }

    /// Let `ms` milliseconds pass
    pub fn advance(&mut self, ms: u32) {
        self.app.advance(u64::from(ms));
    }

    /// Milliseconds until the next queued task, if any
    #[wasm_bindgen(js_name = nextDueInMs)]
    pub fn next_due_in_ms(&self) -> Option<u32> {
        let scheduler = self.app.scheduler();
        scheduler.next_due().map(|due| {
            u32::try_from(due.saturating_sub(scheduler.now_ms())).unwrap_or(u32::MAX)
        })
    }

    /// Primary display text
    #[wasm_bindgen(getter)]
    pub fn display(&self) -> String {
        self.app.display().primary.clone()
    }

    /// Expression readout text
    #[wasm_bindgen(getter)]
    pub fn expression(&self) -> String {
        self.app.display().expression.clone()
    }

    /// History entries as a JSON array, oldest first
    #[wasm_bindgen(js_name = historyJson)]
    pub fn history_json(&self) -> String {
        self.app
            .history()
            .to_json()
            .unwrap_or_else(|_| "[]".to_string())
    }

    /// Game message text
    #[wasm_bindgen(getter, js_name = gameMessage)]
    pub fn game_message(&self) -> String {
        self.app.game_message().to_string()
    }

    /// Game answer field text
    #[wasm_bindgen(getter, js_name = gameInput)]
    pub fn game_input(&self) -> String {
        self.app.game_input().to_string()
    }

    /// Whether `"history"` or `"game"` is shown
    #[wasm_bindgen(js_name = isVisible)]
    pub fn is_visible(&self, overlay: &str) -> bool {
        overlay_from_name(overlay).is_some_and(|o| self.app.popups().is_visible(o))
    }

    /// Whether `"history"` or `"game"` has its enter transition
    #[wasm_bindgen(js_name = isEnterActive)]
    pub fn is_enter_active(&self, overlay: &str) -> bool {
        overlay_from_name(overlay).is_some_and(|o| self.app.popups().is_enter_active(o))
    }
}

impl Default for BrowserCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Module start hook
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::log_1(&"surprise-calc initialized".into());
}
