//! Keypad calculator core.
//!
//! This module provides:
//! - Typed key events and a character-to-key parser
//! - The input state machine that builds a formula from key presses
//! - A safety gate and a recursive-descent evaluator for the formula
//! - Result formatting and clipboard copy

mod clipboard;
mod evaluation;
mod format;
mod keys;
mod state;
mod validation;

pub use clipboard::copy_result;
pub use evaluation::{EvalError, evaluate};
pub use format::{ERROR_DISPLAY, format_result};
pub use keys::{Digit, Key, KeyError, Operator, parse_keys};
pub use state::{Calculator, LastInput};
pub use validation::{is_arithmetic, strip_trailing_operators};
