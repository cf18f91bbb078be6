//! Tokenizer and recursive-descent parser
//!
//! Only numeric literals, the four binary operators, parentheses, unary minus
//! and the named functions are accepted. Anything else is a parse error, so a
//! user-composed buffer can never reach anything but arithmetic.

use crate::core::{CalcError, CalcResult, Function, Operation};

/// Token types from lexical analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Binary operator (also unary minus, decided by the parser)
    Operator(Operation),
    /// Function name; must be followed by a parenthesised argument
    Function(Function),
    /// Left parenthesis
    LeftParen,
    /// Right parenthesis
    RightParen,
}

/// Abstract Syntax Tree node
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Numeric literal
    Number(f64),
    /// Binary operation
    BinaryOp {
        /// Left operand
        left: Box<AstNode>,
        /// Operator
        op: Operation,
        /// Right operand
        right: Box<AstNode>,
    },
    /// Unary negation
    Negate(Box<AstNode>),
    /// Function applied to a single argument
    Call {
        /// Function being applied
        function: Function,
        /// Argument expression
        argument: Box<AstNode>,
    },
}

impl AstNode {
    /// Creates a new number node
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates a new binary operation node
    #[must_use]
    pub fn binary(left: AstNode, op: Operation, right: AstNode) -> Self {
        Self::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a new negation node
    #[must_use]
    pub fn negate(inner: AstNode) -> Self {
        Self::Negate(Box::new(inner))
    }

    /// Creates a new function call node
    #[must_use]
    pub fn call(function: Function, argument: AstNode) -> Self {
        Self::Call {
            function,
            argument: Box::new(argument),
        }
    }
}

/// Tokenizer for converting expression strings to tokens
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer for the given input
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Tokenizes the entire input
    pub fn tokenize(&mut self) -> CalcResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or None if at end of input
    pub fn next_token(&mut self) -> CalcResult<Option<Token>> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        let token = match ch {
            '0'..='9' | '.' => self.read_number()?,
            'a'..='z' | 'A'..='Z' => self.read_function()?,
            '(' => {
                self.advance();
                Token::LeftParen
            }
            ')' => {
                self.advance();
                Token::RightParen
            }
            _ => {
                let op = Operation::from_symbol(ch).ok_or_else(|| {
                    CalcError::Parse(format!("Unexpected character: '{ch}'"))
                })?;
                self.advance();
                Token::Operator(op)
            }
        };

        Ok(Some(token))
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.current_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn consume_digits(&mut self) {
        while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn read_number(&mut self) -> CalcResult<Token> {
        let start = self.pos;

        self.consume_digits();
        if self.current_char() == Some('.') {
            self.advance();
            self.consume_digits();
        }

        // Exponent suffix, only when digits follow: "1.5e+16" but not "2e"
        if matches!(self.current_char(), Some('e' | 'E')) {
            let digit_at = match self.peek_char(1) {
                Some('+' | '-') => 2,
                _ => 1,
            };
            if self.peek_char(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..digit_at {
                    self.advance();
                }
                self.consume_digits();
            }
        }

        let num_str = &self.input[start..self.pos];
        let value: f64 = num_str
            .parse()
            .map_err(|_| CalcError::Parse(format!("Invalid number: '{num_str}'")))?;

        Ok(Token::Number(value))
    }

    fn read_function(&mut self) -> CalcResult<Token> {
        let start = self.pos;
        while self.current_char().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.advance();
        }

        let name = &self.input[start..self.pos];
        Function::from_name(name)
            .map(Token::Function)
            .ok_or_else(|| CalcError::UnknownFunction(name.to_string()))
    }
}

/// Recursive descent parser for expressions
///
/// Grammar:
/// ```text
/// expression ::= term (('+' | '-') term)*
/// term       ::= unary (('*' | '/') unary)*
/// unary      ::= '-' unary | primary
/// primary    ::= NUMBER | FUNCTION '(' expression ')' | '(' expression ')'
/// ```
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Creates a new parser from tokens
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parses a string expression into an AST
    pub fn parse_str(input: &str) -> CalcResult<AstNode> {
        let mut tokenizer = Tokenizer::new(input);
        let tokens = tokenizer.tokenize()?;
        Self::new(tokens).parse()
    }

    /// Parses all tokens into an AST
    pub fn parse(&mut self) -> CalcResult<AstNode> {
        if self.tokens.is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        let ast = self.parse_expression()?;

        if let Some(token) = self.current() {
            return Err(CalcError::Parse(format!(
                "Unexpected token {token:?} at position {}",
                self.pos
            )));
        }

        Ok(ast)
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_expression(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_term()?;

        while let Some(Token::Operator(op @ (Operation::Add | Operation::Subtract))) =
            self.current()
        {
            let op = *op;
            self.advance();
            let right = self.parse_term()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_unary()?;

        while let Some(Token::Operator(op @ (Operation::Multiply | Operation::Divide))) =
            self.current()
        {
            let op = *op;
            self.advance();
            let right = self.parse_unary()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> CalcResult<AstNode> {
        if matches!(self.current(), Some(Token::Operator(Operation::Subtract))) {
            self.advance();
            let inner = self.parse_unary()?;
            return Ok(AstNode::negate(inner));
        }

        self.parse_primary()
    }

    fn parse_primary(&mut self) -> CalcResult<AstNode> {
        let token = self
            .advance()
            .ok_or_else(|| CalcError::Parse("Unexpected end of expression".into()))?;

        match token {
            Token::Number(n) => Ok(AstNode::number(n)),
            Token::LeftParen => self.parse_group(),
            Token::Function(function) => match self.advance() {
                Some(Token::LeftParen) => {
                    let argument = self.parse_group()?;
                    Ok(AstNode::call(function, argument))
                }
                _ => Err(CalcError::Parse(format!(
                    "Expected '(' after '{}'",
                    function.name()
                ))),
            },
            other => Err(CalcError::Parse(format!("Unexpected token: {other:?}"))),
        }
    }

    /// Parses `expression ')'` after an opening parenthesis was consumed
    fn parse_group(&mut self) -> CalcResult<AstNode> {
        let expr = self.parse_expression()?;
        match self.advance() {
            Some(Token::RightParen) => Ok(expr),
            Some(t) => Err(CalcError::Parse(format!("Expected ')' but found {t:?}"))),
            None => Err(CalcError::Parse("Unclosed parenthesis".into())),
        }
    }
}
