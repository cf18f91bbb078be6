//! Binary operators and named functions
//!
//! Type-safe operator and function enums; the evaluator never dispatches on
//! raw characters or names.

/// Binary arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
}

impl Operation {
    /// Returns the operator symbol for display
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }

    /// Maps an operator character to its operation
    #[must_use]
    pub const fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Applies the operator with IEEE semantics.
    ///
    /// Division by zero yields an infinity or NaN rather than an error; the
    /// evaluator rejects non-finite values.
    #[must_use]
    pub fn apply(&self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => a / b,
        }
    }
}

/// Single-argument function callable as `name(expr)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    /// Sine, radians
    Sin,
    /// Cosine, radians
    Cos,
    /// Tangent, radians
    Tan,
    /// Base-10 logarithm
    Log,
}

impl Function {
    /// All supported functions
    pub const ALL: [Self; 4] = [Self::Sin, Self::Cos, Self::Tan, Self::Log];

    /// Function name as typed into the expression
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Log => "log",
        }
    }

    /// Looks up a function by name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Applies the function
    #[must_use]
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
            Self::Log => x.log10(),
        }
    }
}
