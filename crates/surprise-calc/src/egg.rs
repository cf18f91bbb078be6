//! Keystroke easter eggs and the mini-games they open

use std::fmt;

use rand::Rng;

use crate::popup::InputGate;

/// Keystroke sequences and what they trigger, checked in this order
pub const SECRET_CODES: [(&str, EggTrigger); 3] = [
    ("1234", EggTrigger::NumberGame),
    ("4321", EggTrigger::MathGame),
    ("0000", EggTrigger::Greeting),
];

/// Messages shown one after another by the greeting sequence
pub const GREETING_MESSAGES: [&str; 3] = ["Hello!", "I'm a calculator", "with surprises :)"];

/// What a secret code starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EggTrigger {
    /// Number-guessing game
    NumberGame,
    /// Multiplication quiz
    MathGame,
    /// Timed message sequence on the display
    Greeting,
}

/// Rolling buffer of raw key names matched against [`SECRET_CODES`]
#[derive(Debug)]
pub struct EasterEggDetector {
    buffer: String,
    capacity: usize,
    gate: InputGate,
}

impl EasterEggDetector {
    /// Create a detector remembering the last `capacity` characters
    #[must_use]
    pub fn new(gate: InputGate, capacity: usize) -> Self {
        Self {
            buffer: String::new(),
            capacity,
            gate,
        }
    }

    /// Feed one key name. Ignored entirely while the gate is engaged.
    pub fn feed(&mut self, key: &str) -> Option<EggTrigger> {
        if self.gate.is_engaged() {
            return None;
        }

        self.buffer.push_str(key);
        let trigger = SECRET_CODES
            .iter()
            .find(|(code, _)| self.buffer.ends_with(code))
            .map(|&(_, trigger)| trigger);

        let excess = self.buffer.chars().count().saturating_sub(self.capacity);
        if excess > 0 {
            let cut = self
                .buffer
                .char_indices()
                .nth(excess)
                .map_or(self.buffer.len(), |(i, _)| i);
            self.buffer.drain(..cut);
        }

        trigger
    }

    /// Remembered keystrokes
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }
}

/// Reply shown in the game message area after a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameReply {
    /// Input did not start with an integer
    NotANumber,
    /// Guess below the secret
    TooLow,
    /// Guess above the secret
    TooHigh,
    /// Guess matched
    Guessed,
    /// Product answered correctly
    Right,
    /// Product answered wrongly; carries the correct product
    Wrong(i64),
}

impl fmt::Display for GameReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber => write!(f, "Please enter a number."),
            Self::TooLow => write!(f, "Too little. Try again!"),
            Self::TooHigh => write!(f, "Too much. Try again!"),
            Self::Guessed => write!(f, "Congratulations! You guessed the number!"),
            Self::Right => write!(f, "Right! Good job!"),
            Self::Wrong(answer) => write!(f, "Wrong. Right answer: {answer}"),
        }
    }
}

/// One round of a mini-game
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameSession {
    /// Guess a secret in 1..=100
    NumberGuess {
        /// The secret
        secret: i64,
    },
    /// Multiply two operands in 1..=10
    Multiplication {
        /// Left operand
        left: i64,
        /// Right operand
        right: i64,
        /// Set once an answer has been checked
        answered: bool,
    },
}

impl GameSession {
    /// Start a number-guessing round
    pub fn number_guess<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::NumberGuess {
            secret: rng.gen_range(1..=100),
        }
    }

    /// Start a multiplication round
    pub fn multiplication<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::Multiplication {
            left: rng.gen_range(1..=10),
            right: rng.gen_range(1..=10),
            answered: false,
        }
    }

    /// Text shown when the round opens
    #[must_use]
    pub fn prompt(&self) -> String {
        match self {
            Self::NumberGuess { .. } => "I made a number from 1 to 100. Try to guess!".to_string(),
            Self::Multiplication { left, right, .. } => format!("How will {left} \u{d7} {right}?"),
        }
    }

    /// Check a submission.
    ///
    /// Returns `None` when the round no longer accepts answers (a
    /// multiplication round that was already answered).
    pub fn submit(&mut self, input: &str) -> Option<GameReply> {
        if let Self::Multiplication { answered: true, .. } = self {
            return None;
        }

        let Some(value) = parse_int(input) else {
            return Some(GameReply::NotANumber);
        };

        let reply = match self {
            Self::NumberGuess { secret } => match value.cmp(secret) {
                std::cmp::Ordering::Less => GameReply::TooLow,
                std::cmp::Ordering::Greater => GameReply::TooHigh,
                std::cmp::Ordering::Equal => GameReply::Guessed,
            },
            Self::Multiplication {
                left,
                right,
                answered,
            } => {
                *answered = true;
                let product = *left * *right;
                if value == product {
                    GameReply::Right
                } else {
                    GameReply::Wrong(product)
                }
            }
        };
        Some(reply)
    }
}

/// Leading-integer parse in the manner of a browser `parseInt`: optional
/// whitespace and sign, then as many decimal digits as follow. Trailing text
/// is ignored; out-of-range values saturate.
#[must_use]
pub fn parse_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for d in digits.chars().map_while(|c| c.to_digit(10)) {
        seen = true;
        value = value.saturating_mul(10).saturating_add(i64::from(d));
    }

    seen.then_some(if negative { -value } else { value })
}
