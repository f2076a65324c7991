//! Safety gate applied to a formula before it reaches the evaluator.
//!
//! Only arithmetic characters may pass. Anything else is rejected before
//! evaluation is attempted.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Matches strings made only of digits, decimal points, the four
    /// operators and parentheses.
    static ref ARITHMETIC_CHARS: Regex = Regex::new(r"^[0-9.+\-*/()]+$").unwrap();

    /// Matches a run of operator characters at the end of the input.
    static ref TRAILING_OPERATORS: Regex = Regex::new(r"[+\-*/]+$").unwrap();
}

/// Check that an expression contains only characters the evaluator accepts.
///
/// The empty string is not a valid expression.
pub fn is_arithmetic(expression: &str) -> bool {
    ARITHMETIC_CHARS.is_match(expression)
}

/// Remove any trailing run of operator characters, e.g. `"5*-"` -> `"5"`.
pub fn strip_trailing_operators(formula: &str) -> Cow<'_, str> {
    TRAILING_OPERATORS.replace(formula, "")
}
