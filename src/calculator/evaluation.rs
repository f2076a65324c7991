//! Arithmetic expression evaluation.
//!
//! A small recursive-descent evaluator over `+ - * /`, unary signs,
//! parentheses and decimal literals. Standard precedence applies: `*` and
//! `/` bind tighter than `+` and `-`, and operators of equal precedence
//! associate to the left.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := number | '(' expr ')'
//! ```

use thiserror::Error;

/// Maximum nesting of parentheses and unary signs.
const MAX_DEPTH: usize = 256;

/// Reasons an expression could not be evaluated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("unexpected character {ch:?} at position {position}")]
    UnexpectedChar { ch: char, position: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("malformed number {0:?}")]
    InvalidNumber(String),

    #[error("unclosed parenthesis opened at position {0}")]
    UnclosedParen(usize),

    #[error("expression nested deeper than {} levels", MAX_DEPTH)]
    TooDeep,

    #[error("result is not a finite number ({0})")]
    NonFinite(f64),
}

/// Evaluate an arithmetic expression to a finite number.
///
/// Division by zero and overflow yield [`EvalError::NonFinite`].
pub fn evaluate(expression: &str) -> Result<f64, EvalError> {
    let mut parser = Parser {
        input: expression.as_bytes(),
        pos: 0,
        depth: 0,
    };

    let value = parser.expr()?;
    if let Some(ch) = parser.peek() {
        return Err(parser.unexpected(ch));
    }

    tracing::trace!(expression, value, "evaluated");

    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::NonFinite(value))
    }
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn unexpected(&self, ch: u8) -> EvalError {
        EvalError::UnexpectedChar {
            ch: char::from(ch),
            position: self.pos,
        }
    }

    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        while let Some(op @ (b'+' | b'-')) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            if op == b'+' {
                value += rhs;
            } else {
                value -= rhs;
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.unary()?;
        while let Some(op @ (b'*' | b'/')) = self.peek() {
            self.pos += 1;
            let rhs = self.unary()?;
            if op == b'*' {
                value *= rhs;
            } else {
                value /= rhs;
            }
        }
        Ok(value)
    }

    fn unary(&mut self) -> Result<f64, EvalError> {
        match self.peek() {
            Some(sign @ (b'+' | b'-')) => {
                self.pos += 1;
                let operand = self.nested(Self::unary)?;
                Ok(if sign == b'-' { -operand } else { operand })
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<f64, EvalError> {
        match self.peek() {
            Some(b'(') => {
                let open = self.pos;
                self.pos += 1;
                let value = self.nested(Self::expr)?;
                match self.peek() {
                    Some(b')') => {
                        self.pos += 1;
                        Ok(value)
                    }
                    Some(ch) => Err(self.unexpected(ch)),
                    None => Err(EvalError::UnclosedParen(open)),
                }
            }
            Some(b'0'..=b'9' | b'.') => self.number(),
            Some(ch) => Err(self.unexpected(ch)),
            None => Err(EvalError::UnexpectedEnd),
        }
    }

    /// A literal with at most one decimal point and at least one digit.
    /// `5.` and `.5` are both accepted.
    fn number(&mut self) -> Result<f64, EvalError> {
        let start = self.pos;
        let mut seen_point = false;
        while let Some(ch) = self.peek() {
            match ch {
                b'0'..=b'9' => {}
                b'.' if !seen_point => seen_point = true,
                _ => break,
            }
            self.pos += 1;
        }

        let literal = String::from_utf8_lossy(&self.input[start..self.pos]);
        match literal.parse::<f64>() {
            Ok(value) if literal != "." => Ok(value),
            _ => Err(EvalError::InvalidNumber(literal.into_owned())),
        }
    }

    fn nested(
        &mut self,
        rule: fn(&mut Self) -> Result<f64, EvalError>,
    ) -> Result<f64, EvalError> {
        if self.depth >= MAX_DEPTH {
            return Err(EvalError::TooDeep);
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }
}
