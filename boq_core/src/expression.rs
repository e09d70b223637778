//! # Length Expressions
//!
//! Text fields in the estimator accept small arithmetic expressions so a user
//! can type `5+4+5` instead of pre-adding wall runs. This module provides the
//! evaluator behind those fields.
//!
//! ## Grammar
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-')* primary
//! primary := number | '(' expr ')'
//! number  := digits ['.' digits] | '.' digits
//! ```
//!
//! Before parsing, every character other than digits, `+ - * / ( ) .` and
//! spaces is stripped. Anything that still fails to parse, and any
//! non-finite result, evaluates to `0.0`. So does parenthesis nesting deeper
//! than 256 levels. The evaluator never panics.

use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Evaluate a length expression, degrading to `0.0` on any invalid input.
///
/// ```rust
/// use boq_core::expression::evaluate;
///
/// assert_eq!(evaluate("5+3"), 8.0);
/// assert_eq!(evaluate("2*(3+4)"), 14.0);
/// assert_eq!(evaluate("12.5 m"), 12.5);
/// assert_eq!(evaluate("abc"), 0.0);
/// assert_eq!(evaluate(""), 0.0);
/// ```
pub fn evaluate(input: &str) -> f64 {
    let cleaned = sanitize(input);
    if cleaned.trim().is_empty() {
        return 0.0;
    }

    match Parser::new(&cleaned).parse() {
        Some(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Strip every character the grammar does not know about.
pub fn sanitize(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.' | ' '))
        .collect()
}

// ============================================================================
// Tokenizer + recursive-descent parser
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Option<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        match c {
            ' ' => {
                chars.next();
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            _ => {
                // digits and dots form one literal; "1.2.3" fails the f64 parse
                let mut end = start;
                while let Some(&(idx, ch)) = chars.peek() {
                    if ch.is_ascii_digit() || ch == '.' {
                        end = idx + ch.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let literal = &input[start..end];
                tokens.push(Token::Number(literal.parse().ok()?));
            }
        }
    }

    Some(tokens)
}

/// Deepest parenthesis nesting accepted before the input counts as invalid.
const MAX_DEPTH: usize = 256;

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    valid: bool,
}

impl Parser {
    fn new(input: &str) -> Self {
        match tokenize(input) {
            Some(tokens) => Parser { tokens, pos: 0, depth: 0, valid: true },
            None => Parser { tokens: Vec::new(), pos: 0, depth: 0, valid: false },
        }
    }

    /// Parse the whole token stream. Trailing tokens are an error.
    fn parse(mut self) -> Option<f64> {
        if !self.valid || self.tokens.is_empty() {
            return None;
        }
        let value = self.expr()?;
        if self.pos != self.tokens.len() {
            return None;
        }
        Some(value)
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        self.pos += 1;
        token
    }

    fn expr(&mut self) -> Option<f64> {
        let mut value = self.term()?;
        while let Some(token) = self.peek() {
            match token {
                Token::Plus => {
                    self.advance();
                    value += self.term()?;
                }
                Token::Minus => {
                    self.advance();
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Some(value)
    }

    fn term(&mut self) -> Option<f64> {
        let mut value = self.unary()?;
        while let Some(token) = self.peek() {
            match token {
                Token::Star => {
                    self.advance();
                    value *= self.unary()?;
                }
                Token::Slash => {
                    self.advance();
                    value /= self.unary()?;
                }
                _ => break,
            }
        }
        Some(value)
    }

    /// Sign runs are folded in a loop so long chains cannot exhaust the stack.
    fn unary(&mut self) -> Option<f64> {
        let mut negative = false;
        loop {
            match self.peek()? {
                Token::Minus => negative = !negative,
                Token::Plus => {}
                _ => break,
            }
            self.advance();
        }
        let value = self.primary()?;
        Some(if negative { -value } else { value })
    }

    fn primary(&mut self) -> Option<f64> {
        match self.advance()? {
            Token::Number(n) => Some(n),
            Token::LParen => {
                if self.depth >= MAX_DEPTH {
                    return None;
                }
                self.depth += 1;
                let value = self.expr()?;
                self.depth -= 1;
                match self.advance()? {
                    Token::RParen => Some(value),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

// ============================================================================
// Expression field type
// ============================================================================

/// A user-entered numeric field kept as text and evaluated on demand.
///
/// Deserializes from a JSON string, a number, or `null`. Any other JSON
/// value is accepted and treated as empty, so a malformed field never
/// rejects an otherwise valid project.
///
/// ```rust
/// use boq_core::expression::Expression;
///
/// let len: Expression = serde_json::from_str("\"10+5\"").unwrap();
/// assert_eq!(len.value(), 15.0);
///
/// let num: Expression = serde_json::from_str("3.5").unwrap();
/// assert_eq!(num.value(), 3.5);
///
/// let missing: Expression = serde_json::from_str("null").unwrap();
/// assert_eq!(missing.value(), 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Expression(String);

impl Expression {
    /// Create from raw text.
    pub fn new(text: impl Into<String>) -> Self {
        Expression(text.into())
    }

    /// Create from a plain number.
    pub fn number(value: f64) -> Self {
        if value.is_finite() {
            Expression(value.to_string())
        } else {
            Expression::default()
        }
    }

    /// The text as entered.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when nothing has been entered.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Evaluated value (0.0 when empty or invalid).
    pub fn value(&self) -> f64 {
        evaluate(&self.0)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Expression {
    fn from(text: &str) -> Self {
        Expression::new(text)
    }
}

impl From<String> for Expression {
    fn from(text: String) -> Self {
        Expression(text)
    }
}

impl From<f64> for Expression {
    fn from(value: f64) -> Self {
        Expression::number(value)
    }
}

impl Serialize for Expression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Expression {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ExpressionVisitor)
    }
}

struct ExpressionVisitor;

impl<'de> Visitor<'de> for ExpressionVisitor {
    type Value = Expression;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or an arithmetic expression string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Expression, E> {
        Ok(Expression::new(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Expression, E> {
        Ok(Expression(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Expression, E> {
        Ok(Expression::number(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Expression, E> {
        Ok(Expression(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Expression, E> {
        Ok(Expression(v.to_string()))
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Expression, E> {
        Ok(Expression::default())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Expression, E> {
        Ok(Expression::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Expression, E> {
        Ok(Expression::default())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Expression, D::Error> {
        deserializer.deserialize_any(ExpressionVisitor)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Expression, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Expression::default())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Expression, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Expression::default())
    }
}
