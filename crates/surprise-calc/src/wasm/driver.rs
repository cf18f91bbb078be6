//! Page driver
//!
//! [`WasmDriver`] plays the part of the page script: it turns DOM events
//! into [`CalculatorApp`] calls and writes the app state back into the
//! [`MockDom`] after every event.

use rand::rngs::StdRng;
use rand::Rng;

use super::dom::{ids, DomElement, DomEvent, MockDom};
use crate::app::CalculatorApp;
use crate::keypad::Button;
use crate::popup::Overlay;

/// Calculator app wired to a mock page
#[derive(Debug)]
pub struct WasmDriver<R: Rng = StdRng> {
    app: CalculatorApp<R>,
    dom: MockDom,
}

#[cfg(not(target_arch = "wasm32"))]
impl WasmDriver<StdRng> {
    /// Creates a driver over a fresh app backed by `storage`
    #[must_use]
    pub fn new(storage: impl crate::storage::Storage + 'static) -> Self {
        Self::with_app(CalculatorApp::new(storage))
    }
}

impl<R: Rng> WasmDriver<R> {
    /// Creates a driver over an existing app
    #[must_use]
    pub fn with_app(app: CalculatorApp<R>) -> Self {
        let mut driver = Self {
            app,
            dom: MockDom::calculator(),
        };
        driver.sync_dom();
        driver
    }

    /// The app
    #[must_use]
    pub fn app(&self) -> &CalculatorApp<R> {
        &self.app
    }

    /// The page
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// Clicks an element by id
    pub fn click(&mut self, element_id: &str) {
        self.dom.dispatch_event(DomEvent::click(element_id));

        match element_id {
            ids::CLEAR_HISTORY => self.app.clear_history(),
            ids::CLOSE_HISTORY => self.app.close_history(),
            ids::GAME_BUTTON => {
                self.app.submit_game_input();
            }
            ids::CLOSE_GAME => self.app.close_game(),
            _ => {
                let button = self.dom.get_element(element_id).and_then(|e| {
                    Button::from_data(e.get_attr("data-digit"), e.get_attr("data-action"))
                });
                if let Some(button) = button {
                    self.app.press_button(button);
                }
            }
        }

        self.sync_dom();
    }

    /// Presses a key at document level
    pub fn press_key(&mut self, key: &str) {
        self.dom.dispatch_event(DomEvent::key_press(key));
        self.app.press_key(key);
        self.sync_dom();
    }

    /// Presses each character of `keys` in turn
    pub fn type_keys(&mut self, keys: &str) {
        for ch in keys.chars() {
            self.press_key(&ch.to_string());
        }
    }

    /// Types into the game answer field.
    ///
    /// Field input never reaches the document key handlers.
    pub fn type_game_input(&mut self, text: &str) {
        self.dom.dispatch_event(DomEvent::input(ids::GAME_INPUT, text));
        self.app.set_game_input(text);
        self.sync_dom();
    }

    /// Lets virtual time pass
    pub fn advance(&mut self, ms: u64) {
        self.app.advance(ms);
        self.sync_dom();
    }

    fn sync_dom(&mut self) {
        let display = self.app.display();
        self.dom.set_element_text(ids::DISPLAY, &display.primary);
        self.dom.set_element_text(ids::EXPRESSION, &display.expression);

        self.dom.clear_children(ids::HISTORY_LIST);
        let items: Vec<DomElement> = self
            .app
            .history()
            .iter()
            .map(|entry| DomElement::new("li").with_text(entry))
            .collect();
        for item in items {
            self.dom.append_child(ids::HISTORY_LIST, item);
        }

        for (overlay, container, popup) in [
            (Overlay::History, ids::HISTORY_CONTAINER, ids::HISTORY_POPUP),
            (Overlay::Game, ids::GAME_CONTAINER, ids::GAME_POPUP),
        ] {
            let state = self.app.popups().state(overlay);
            self.dom.set_class(container, ids::HIDDEN, !state.visible);
            self.dom.set_class(popup, ids::ENTER_ACTIVE, state.enter_active);
        }

        self.dom
            .set_element_text(ids::GAME_MESSAGE, self.app.game_message());
        self.dom.set_value(ids::GAME_INPUT, self.app.game_input());
    }

    /// Primary display text
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.dom.get_element_text(ids::DISPLAY).unwrap_or_default()
    }

    /// Expression readout text
    #[must_use]
    pub fn expression_text(&self) -> &str {
        self.dom.get_element_text(ids::EXPRESSION).unwrap_or_default()
    }

    /// Rendered history list, oldest first
    #[must_use]
    pub fn history_items(&self) -> Vec<String> {
        self.dom.child_texts(ids::HISTORY_LIST)
    }

    /// Game message text
    #[must_use]
    pub fn game_message(&self) -> &str {
        self.dom.get_element_text(ids::GAME_MESSAGE).unwrap_or_default()
    }

    /// True if the overlay's container is hidden
    #[must_use]
    pub fn is_overlay_hidden(&self, overlay: Overlay) -> bool {
        match overlay {
            Overlay::History => self.dom.is_hidden(ids::HISTORY_CONTAINER),
            Overlay::Game => self.dom.is_hidden(ids::GAME_CONTAINER),
        }
    }
}
