//! On-screen keypad
//!
//! Buttons carry either a `data-digit` glyph or a `data-action` name, the
//! same contract the page markup uses.
//!
//! Layout:
//! ```text
//! [  C  ] [  ±  ] [  %  ] [  /  ]
//! [ sin ] [ cos ] [ tan ] [ log ]
//! [  7  ] [  8  ] [  9  ] [  *  ]
//! [  4  ] [  5  ] [  6  ] [  -  ]
//! [  1  ] [  2  ] [  3  ] [  +  ]
//! [  (  ] [  0  ] [  .  ] [  )  ]
//! [           =           ]
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::core::{Function, Operation};
use crate::wasm::DomElement;

/// A `data-action` value that names no action
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown button action: '{0}'")]
pub struct UnknownAction(pub String);

/// Named button actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    /// Empty the buffer and reset the last result
    Clear,
    /// Flip the sign of the whole buffer
    ToggleSign,
    /// Divide the buffer's value by 100
    Percentage,
    /// Evaluate
    Calculate,
    /// Append `(`
    LeftParenthesis,
    /// Append `)`
    RightParenthesis,
    /// Append `name(`
    Function(Function),
    /// Append an operator symbol
    Operator(Operation),
}

impl ButtonAction {
    /// The `data-action` name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::ToggleSign => "toggle-sign",
            Self::Percentage => "percentage",
            Self::Calculate => "calculate",
            Self::LeftParenthesis => "left-parenthesis",
            Self::RightParenthesis => "right-parenthesis",
            Self::Function(f) => f.name(),
            Self::Operator(Operation::Add) => "add",
            Self::Operator(Operation::Subtract) => "subtract",
            Self::Operator(Operation::Multiply) => "multiply",
            Self::Operator(Operation::Divide) => "divide",
        }
    }

    /// Text appended to the buffer, if this action appends
    #[must_use]
    pub fn token(&self) -> Option<String> {
        match self {
            Self::LeftParenthesis => Some("(".to_string()),
            Self::RightParenthesis => Some(")".to_string()),
            Self::Function(f) => Some(format!("{}(", f.name())),
            Self::Operator(op) => Some(op.symbol().to_string()),
            Self::Clear | Self::ToggleSign | Self::Percentage | Self::Calculate => None,
        }
    }

    /// Button caption
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Clear => "C",
            Self::ToggleSign => "\u{b1}",
            Self::Percentage => "%",
            Self::Calculate => "=",
            Self::LeftParenthesis => "(",
            Self::RightParenthesis => ")",
            Self::Function(f) => f.name(),
            Self::Operator(op) => op.symbol(),
        }
    }
}

impl FromStr for ButtonAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let action = match s {
            "clear" => Self::Clear,
            "toggle-sign" => Self::ToggleSign,
            "percentage" => Self::Percentage,
            "calculate" => Self::Calculate,
            "left-parenthesis" => Self::LeftParenthesis,
            "right-parenthesis" => Self::RightParenthesis,
            "add" => Self::Operator(Operation::Add),
            "subtract" => Self::Operator(Operation::Subtract),
            "multiply" => Self::Operator(Operation::Multiply),
            "divide" => Self::Operator(Operation::Divide),
            other => Function::from_name(other)
                .map(Self::Function)
                .ok_or_else(|| UnknownAction(other.to_string()))?,
        };
        Ok(action)
    }
}

impl fmt::Display for ButtonAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A keypad press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Digit or decimal point, appended verbatim
    Digit(char),
    /// Named action
    Action(ButtonAction),
}

impl Button {
    /// Builds a press from a button's `data-digit` / `data-action` attributes;
    /// `data-digit` wins when both are present
    pub fn from_data(digit: Option<&str>, action: Option<&str>) -> Option<Self> {
        if let Some(ch) = digit.and_then(|d| d.chars().next()) {
            return Some(Self::Digit(ch));
        }
        action.and_then(|a| a.parse().ok()).map(Self::Action)
    }

    /// Button caption
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(ch) => ch.to_string(),
            Self::Action(action) => action.label().to_string(),
        }
    }

    /// Element id used for this button in the page
    #[must_use]
    pub fn element_id(&self) -> String {
        match self {
            Self::Digit('.') => "btn-decimal".to_string(),
            Self::Digit(ch) => format!("btn-{ch}"),
            Self::Action(action) => format!("btn-{}", action.as_str()),
        }
    }
}

/// A button placed on the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButtonDef {
    /// What pressing it does
    pub button: Button,
    /// The DOM element ID for this button
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
}

impl KeypadButtonDef {
    /// Creates a new button definition
    #[must_use]
    pub fn new(button: Button, row: usize, col: usize) -> Self {
        Self {
            id: button.element_id(),
            button,
            row,
            col,
        }
    }

    /// Creates the `<button>` element with its data attribute
    #[must_use]
    pub fn to_element(&self) -> DomElement {
        let element = DomElement::new("button")
            .with_id(&self.id)
            .with_text(&self.button.label())
            .with_class("btn");
        match self.button {
            Button::Digit(ch) => element.with_attr("data-digit", &ch.to_string()),
            Button::Action(action) => element.with_attr("data-action", action.as_str()),
        }
    }
}

/// Keypad layout
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButtonDef>,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        use Button::{Action, Digit};
        use ButtonAction as A;

        let grid: [&[Button]; 7] = [
            &[
                Action(A::Clear),
                Action(A::ToggleSign),
                Action(A::Percentage),
                Action(A::Operator(Operation::Divide)),
            ],
            &[
                Action(A::Function(Function::Sin)),
                Action(A::Function(Function::Cos)),
                Action(A::Function(Function::Tan)),
                Action(A::Function(Function::Log)),
            ],
            &[
                Digit('7'),
                Digit('8'),
                Digit('9'),
                Action(A::Operator(Operation::Multiply)),
            ],
            &[
                Digit('4'),
                Digit('5'),
                Digit('6'),
                Action(A::Operator(Operation::Subtract)),
            ],
            &[
                Digit('1'),
                Digit('2'),
                Digit('3'),
                Action(A::Operator(Operation::Add)),
            ],
            &[
                Action(A::LeftParenthesis),
                Digit('0'),
                Digit('.'),
                Action(A::RightParenthesis),
            ],
            &[Action(A::Calculate)],
        ];

        let buttons = grid
            .iter()
            .enumerate()
            .flat_map(|(row, buttons)| {
                buttons
                    .iter()
                    .enumerate()
                    .map(move |(col, &button)| KeypadButtonDef::new(button, row, col))
            })
            .collect();

        Self { buttons }
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButtonDef] {
        &self.buttons
    }

    /// Creates the keypad container with every button as a child
    #[must_use]
    pub fn create_keypad_element(&self) -> DomElement {
        self.buttons
            .iter()
            .fold(DomElement::new("div").with_id("keypad").with_class("buttons"), |keypad, b| {
                keypad.with_child(b.to_element())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACTION_NAMES: [&str; 14] = [
        "clear",
        "toggle-sign",
        "percentage",
        "calculate",
        "left-parenthesis",
        "right-parenthesis",
        "sin",
        "cos",
        "tan",
        "log",
        "add",
        "subtract",
        "multiply",
        "divide",
    ];

    #[test]
    fn test_action_names_parse_and_print() {
        for name in ACTION_NAMES {
            let action: ButtonAction = name.parse().unwrap();
            assert_eq!(action.as_str(), name);
            assert_eq!(action.to_string(), name);
        }
    }

    #[test]
    fn test_unknown_action() {
        let err = "power".parse::<ButtonAction>().unwrap_err();
        assert_eq!(err, UnknownAction("power".into()));
        assert_eq!(err.to_string(), "Unknown button action: 'power'");
    }

    #[test]
    fn test_action_tokens() {
        assert_eq!(
            ButtonAction::Function(Function::Sin).token().as_deref(),
            Some("sin(")
        );
        assert_eq!(ButtonAction::LeftParenthesis.token().as_deref(), Some("("));
        assert_eq!(ButtonAction::RightParenthesis.token().as_deref(), Some(")"));
        assert_eq!(
            ButtonAction::Operator(Operation::Multiply).token().as_deref(),
            Some("*")
        );
        assert_eq!(ButtonAction::Calculate.token(), None);
        assert_eq!(ButtonAction::Clear.token(), None);
    }

    #[test]
    fn test_button_from_data() {
        assert_eq!(Button::from_data(Some("7"), None), Some(Button::Digit('7')));
        assert_eq!(
            Button::from_data(None, Some("percentage")),
            Some(Button::Action(ButtonAction::Percentage))
        );
        assert_eq!(Button::from_data(None, Some("nope")), None);
        assert_eq!(Button::from_data(Some(""), None), None);
        assert_eq!(Button::from_data(None, None), None);
    }

    #[test]
    fn test_button_element_ids() {
        assert_eq!(Button::Digit('5').element_id(), "btn-5");
        assert_eq!(Button::Digit('.').element_id(), "btn-decimal");
        assert_eq!(
            Button::Action(ButtonAction::ToggleSign).element_id(),
            "btn-toggle-sign"
        );
    }

    fn at(keypad: &Keypad, row: usize, col: usize) -> Option<Button> {
        keypad
            .buttons()
            .iter()
            .find(|b| b.row == row && b.col == col)
            .map(|b| b.button)
    }

    #[test]
    fn test_keypad_layout() {
        let keypad = Keypad::new();
        assert_eq!(keypad.buttons().len(), 25);
        assert_eq!(at(&keypad, 0, 0), Some(Button::Action(ButtonAction::Clear)));
        assert_eq!(
            at(&keypad, 1, 3),
            Some(Button::Action(ButtonAction::Function(Function::Log)))
        );
        assert_eq!(at(&keypad, 5, 1), Some(Button::Digit('0')));
        assert_eq!(at(&keypad, 6, 0), Some(Button::Action(ButtonAction::Calculate)));
        assert_eq!(at(&keypad, 6, 1), None);
        assert_eq!(at(&keypad, 7, 0), None);
        assert!(keypad.buttons().iter().all(|b| b.col < 4));
    }

    #[test]
    fn test_keypad_covers_every_action_and_digit() {
        let keypad = Keypad::new();
        let has = |button: Button| keypad.buttons().iter().any(|b| b.button == button);
        for name in ACTION_NAMES {
            let action: ButtonAction = name.parse().unwrap();
            assert!(has(Button::Action(action)), "{name}");
        }
        for ch in "0123456789.".chars() {
            assert!(has(Button::Digit(ch)), "{ch}");
        }
    }

    #[test]
    fn test_button_ids_are_unique() {
        let keypad = Keypad::new();
        let mut ids: Vec<&str> = keypad.buttons().iter().map(|b| b.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 25);
    }

    #[test]
    fn test_button_elements_carry_data_attributes() {
        let keypad = Keypad::new();
        let container = keypad.create_keypad_element();
        assert_eq!(container.children.len(), 25);

        let seven = container.children.iter().find(|c| c.id == "btn-7").unwrap();
        assert_eq!(seven.get_attr("data-digit"), Some("7"));
        assert_eq!(seven.text_content, "7");

        let sign = container
            .children
            .iter()
            .find(|c| c.id == "btn-toggle-sign")
            .unwrap();
        assert_eq!(sign.get_attr("data-action"), Some("toggle-sign"));
        assert_eq!(sign.text_content, "\u{b1}");
        assert!(sign.has_class("btn"));
    }
}
