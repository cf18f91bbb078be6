//! Mock DOM
//!
//! An observable model of the calculator page: element registry keyed by id,
//! classes, text and attributes, plus a log of dispatched events. Lets the
//! widget be driven end to end without a browser.

use std::collections::HashMap;

use crate::keypad::Keypad;

/// Element ids and class names used by the page
pub mod ids {
    /// Primary display
    pub const DISPLAY: &str = "display";
    /// Secondary expression readout
    pub const EXPRESSION: &str = "expression";
    /// History overlay container
    pub const HISTORY_CONTAINER: &str = "historyContainer";
    /// History popup panel inside its container
    pub const HISTORY_POPUP: &str = "historyPopup";
    /// History list
    pub const HISTORY_LIST: &str = "historyList";
    /// Clear-history button
    pub const CLEAR_HISTORY: &str = "clearHistory";
    /// Close-history button
    pub const CLOSE_HISTORY: &str = "closeHistory";
    /// Game overlay container
    pub const GAME_CONTAINER: &str = "gameContainer";
    /// Game popup panel inside its container
    pub const GAME_POPUP: &str = "gamePopup";
    /// Game message area
    pub const GAME_MESSAGE: &str = "gameMessage";
    /// Game answer field
    pub const GAME_INPUT: &str = "gameInput";
    /// Game submit button
    pub const GAME_BUTTON: &str = "gameButton";
    /// Close-game button
    pub const CLOSE_GAME: &str = "closeGame";

    /// Class of a hidden overlay container
    pub const HIDDEN: &str = "hidden";
    /// Class of a popup whose enter transition has run
    pub const ENTER_ACTIVE: &str = "popup-enter-active";
}

/// Represents a DOM element for testing
#[derive(Debug, Clone, PartialEq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Element attributes
    pub attributes: HashMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
    /// Child elements
    pub children: Vec<DomElement>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: HashMap::new(),
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates an element with an ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Adds a child element
    #[must_use]
    pub fn with_child(mut self, child: DomElement) -> Self {
        self.children.push(child);
        self
    }

    /// Sets text content
    pub fn set_text(&mut self, text: &str) {
        self.text_content = text.to_string();
    }

    /// Adds a class
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Removes a class
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Adds or removes a class
    pub fn set_class(&mut self, class: &str, present: bool) {
        if present {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// DOM events that can be dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Click event on an element
    Click {
        /// The ID of the clicked element
        element_id: String,
    },
    /// Input event with new value
    Input {
        /// The ID of the input element
        element_id: String,
        /// The new value entered
        value: String,
    },
    /// Document-level keydown
    KeyPress {
        /// The key name (`"7"`, `"Enter"`, `"h"`)
        key: String,
    },
}

impl DomEvent {
    /// Creates a click event
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Creates an input event
    #[must_use]
    pub fn input(element_id: &str, value: &str) -> Self {
        Self::Input {
            element_id: element_id.to_string(),
            value: value.to_string(),
        }
    }

    /// Creates a key press event
    #[must_use]
    pub fn key_press(key: &str) -> Self {
        Self::KeyPress {
            key: key.to_string(),
        }
    }
}

/// Mock DOM for driving the widget without a browser
#[derive(Debug, Default)]
pub struct MockDom {
    /// Elements by ID
    elements: HashMap<String, DomElement>,
    /// Event history for verification
    event_history: Vec<DomEvent>,
}

impl MockDom {
    /// Creates an empty mock DOM
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the calculator page: displays, keypad and both overlays
    /// (hidden)
    #[must_use]
    pub fn calculator() -> Self {
        let mut dom = Self::new();

        dom.register_element(
            DomElement::new("div")
                .with_id(ids::DISPLAY)
                .with_text("0"),
        );
        dom.register_element(DomElement::new("div").with_id(ids::EXPRESSION));

        let keypad = Keypad::new();
        for button in keypad.buttons() {
            dom.register_element(button.to_element());
        }
        dom.register_element(keypad.create_keypad_element());

        for (container, popup) in [
            (ids::HISTORY_CONTAINER, ids::HISTORY_POPUP),
            (ids::GAME_CONTAINER, ids::GAME_POPUP),
        ] {
            dom.register_element(
                DomElement::new("div")
                    .with_id(container)
                    .with_class("popup-container")
                    .with_class(ids::HIDDEN),
            );
            dom.register_element(DomElement::new("div").with_id(popup).with_class("popup"));
        }

        dom.register_element(DomElement::new("ul").with_id(ids::HISTORY_LIST));
        dom.register_element(
            DomElement::new("button")
                .with_id(ids::CLEAR_HISTORY)
                .with_text("Clear"),
        );
        dom.register_element(
            DomElement::new("button")
                .with_id(ids::CLOSE_HISTORY)
                .with_text("Close"),
        );
        dom.register_element(DomElement::new("p").with_id(ids::GAME_MESSAGE));
        dom.register_element(
            DomElement::new("input")
                .with_id(ids::GAME_INPUT)
                .with_attr("type", "number")
                .with_attr("value", ""),
        );
        dom.register_element(
            DomElement::new("button")
                .with_id(ids::GAME_BUTTON)
                .with_text("Check"),
        );
        dom.register_element(
            DomElement::new("button")
                .with_id(ids::CLOSE_GAME)
                .with_text("Close"),
        );

        dom
    }

    /// Registers an element for ID lookup
    pub fn register_element(&mut self, element: DomElement) {
        if !element.id.is_empty() {
            self.elements.insert(element.id.clone(), element);
        }
    }

    /// Gets an element by ID
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// Gets a mutable element by ID
    pub fn get_element_mut(&mut self, id: &str) -> Option<&mut DomElement> {
        self.elements.get_mut(id)
    }

    /// Records an event; input events also update the field's value
    pub fn dispatch_event(&mut self, event: DomEvent) {
        if let DomEvent::Input { element_id, value } = &event {
            self.set_value(element_id, value);
        }
        self.event_history.push(event);
    }

    /// Gets the event history
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Clears event history
    pub fn clear_event_history(&mut self) {
        self.event_history.clear();
    }

    /// Updates element text by ID
    pub fn set_element_text(&mut self, id: &str, text: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.set_text(text);
        }
    }

    /// Gets element text by ID
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text_content.as_str())
    }

    /// Sets a form field's `value`
    pub fn set_value(&mut self, id: &str, value: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.attributes.insert("value".to_string(), value.to_string());
        }
    }

    /// Gets a form field's `value`
    #[must_use]
    pub fn get_value(&self, id: &str) -> Option<&str> {
        self.elements.get(id).and_then(|e| e.get_attr("value"))
    }

    /// Adds or removes a class by element ID
    pub fn set_class(&mut self, id: &str, class: &str, present: bool) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.set_class(class, present);
        }
    }

    /// Checks a class by element ID
    #[must_use]
    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.elements.get(id).is_some_and(|e| e.has_class(class))
    }

    /// True if the element exists and carries the `hidden` class
    #[must_use]
    pub fn is_hidden(&self, id: &str) -> bool {
        self.has_class(id, ids::HIDDEN)
    }

    /// Adds a child element to a parent
    pub fn append_child(&mut self, parent_id: &str, child: DomElement) {
        let child_id = child.id.clone();
        if let Some(parent) = self.elements.get_mut(parent_id) {
            parent.children.push(child.clone());
        }
        if !child_id.is_empty() {
            self.elements.insert(child_id, child);
        }
    }

    /// Clears children of an element
    pub fn clear_children(&mut self, id: &str) {
        let child_ids: Vec<String> = self
            .elements
            .get(id)
            .map(|elem| {
                elem.children
                    .iter()
                    .filter(|c| !c.id.is_empty())
                    .map(|c| c.id.clone())
                    .collect()
            })
            .unwrap_or_default();

        for child_id in child_ids {
            self.elements.remove(&child_id);
        }

        if let Some(elem) = self.elements.get_mut(id) {
            elem.children.clear();
        }
    }

    /// Text of every child of an element, in order
    #[must_use]
    pub fn child_texts(&self, id: &str) -> Vec<String> {
        self.elements
            .get(id)
            .map(|e| e.children.iter().map(|c| c.text_content.clone()).collect())
            .unwrap_or_default()
    }
}
