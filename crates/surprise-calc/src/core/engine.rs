//! Expression buffer and evaluation pipeline
//!
//! [`ExpressionEngine`] owns the free-form expression text, the last result
//! and the two display regions. It never validates input as it is typed; the
//! parser is the only gate, and it runs on `calculate` and `percentage`.

use tracing::debug;

use crate::core::evaluator::Evaluator;
use crate::core::format::{format_result, number_to_string};
use crate::core::history::{entry_text, HistoryStore};
use crate::core::{CalcError, CalcResult};

/// Rendered text of the two display regions
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Display {
    /// Primary display: expression, else last result, else an error or message
    pub primary: String,
    /// Secondary readout mirroring the raw expression buffer
    pub expression: String,
}

/// Expression buffer, last result and history
#[derive(Debug)]
pub struct ExpressionEngine {
    /// Current input expression
    expression: String,
    /// Most recent result, `"0"` when nothing has been computed
    last_result: String,
    /// What the display currently shows
    display: Display,
    /// Expression evaluator
    evaluator: Evaluator,
    /// Calculation history
    history: HistoryStore,
}

impl ExpressionEngine {
    /// Initial and post-clear value of the last result
    pub const INITIAL_RESULT: &'static str = "0";

    /// Creates an engine around a loaded history
    #[must_use]
    pub fn new(history: HistoryStore) -> Self {
        let mut engine = Self {
            expression: String::new(),
            last_result: Self::INITIAL_RESULT.to_string(),
            display: Display::default(),
            evaluator: Evaluator::new(),
            history,
        };
        engine.render();
        engine
    }

    /// Appends a token verbatim
    pub fn append(&mut self, token: &str) {
        self.expression.push_str(token);
        self.render();
    }

    /// Flips the sign of the whole buffer by adding or removing a leading `-`
    pub fn toggle_sign(&mut self) {
        if let Some(rest) = self.expression.strip_prefix('-') {
            self.expression = rest.to_string();
        } else {
            self.expression.insert(0, '-');
        }
        self.render();
    }

    /// Replaces the buffer with its value divided by 100.
    ///
    /// On failure the display shows `"Error"` and the buffer is kept.
    pub fn percentage(&mut self) -> CalcResult<()> {
        match self.evaluator.evaluate_str(&self.expression) {
            Ok(value) => {
                self.expression = number_to_string(value / 100.0);
                debug!(expression = %self.expression, "Applied percentage");
                self.render();
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Evaluates the buffer.
    ///
    /// On success the formatted result replaces the buffer, becomes the last
    /// result and is recorded as `"<expression> = <result>"`. On failure the
    /// display shows `"Error"` and buffer, last result and history are kept.
    pub fn calculate(&mut self) -> CalcResult<String> {
        match self.evaluator.evaluate_str(&self.expression) {
            Ok(value) => {
                let result = format_result(value);
                self.history.record(entry_text(&self.expression, &result));
                debug!(expression = %self.expression, %result, "Calculated");
                self.expression.clone_from(&result);
                self.last_result.clone_from(&result);
                self.render();
                Ok(result)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Removes one trailing character; no-op on an empty buffer
    pub fn backspace(&mut self) {
        self.expression.pop();
        self.render();
    }

    /// Empties the buffer and resets the last result
    pub fn clear(&mut self) {
        self.expression.clear();
        self.last_result = Self::INITIAL_RESULT.to_string();
        self.render();
    }

    /// Overwrites the primary display without touching any state
    pub fn show_message(&mut self, text: &str) {
        self.display.primary = text.to_string();
    }

    /// Redraws both display regions from the buffer
    pub fn render(&mut self) {
        self.display.primary = if self.expression.is_empty() {
            self.last_result.clone()
        } else {
            self.expression.clone()
        };
        self.display.expression.clone_from(&self.expression);
    }

    fn fail(&mut self, error: CalcError) -> CalcError {
        debug!(expression = %self.expression, %error, "Evaluation failed");
        self.show_message(CalcError::DISPLAY_TEXT);
        error
    }

    /// Gets the current expression buffer
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Gets the last result
    #[must_use]
    pub fn last_result(&self) -> &str {
        &self.last_result
    }

    /// Gets the display state
    #[must_use]
    pub fn display(&self) -> &Display {
        &self.display
    }

    /// Gets the history
    #[must_use]
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Gets the history mutably
    pub fn history_mut(&mut self) -> &mut HistoryStore {
        &mut self.history
    }
}
