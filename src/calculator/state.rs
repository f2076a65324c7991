//! Keypad input state machine.
//!
//! [`Calculator`] holds the text on the display, the raw formula that will be
//! evaluated, and the kind of the last accepted key. Each key press maps the
//! old state to a new one. No operation returns an error: evaluation failures
//! surface as the `Error` display.

use serde::Serialize;

use super::evaluation::evaluate;
use super::format::{ERROR_DISPLAY, format_result};
use super::keys::{Digit, Key, Operator};
use super::validation::{is_arithmetic, strip_trailing_operators};

/// Classification of the most recently accepted key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LastInput {
    /// Nothing accepted since the last clear.
    #[default]
    None,
    Number,
    Decimal,
    Operator,
    /// An evaluation happened, successful or not.
    Equals,
}

/// Calculator session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Calculator {
    display: String,
    formula: String,
    last_input: LastInput,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// Create a calculator in the cleared state.
    pub fn new() -> Self {
        Self {
            display: "0".to_string(),
            formula: String::new(),
            last_input: LastInput::None,
        }
    }

    /// Text currently shown to the user. Never empty.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// The accumulated expression text.
    pub fn formula(&self) -> &str {
        &self.formula
    }

    pub fn last_input(&self) -> LastInput {
        self.last_input
    }

    /// Whether the display is showing the error token.
    pub fn is_error(&self) -> bool {
        self.display == ERROR_DISPLAY
    }

    /// Consume the state and return the state after `key`.
    pub fn apply(mut self, key: Key) -> Self {
        self.press(key);
        self
    }

    /// Apply a single key press.
    pub fn press(&mut self, key: Key) {
        match key {
            Key::Clear => self.clear(),
            Key::Digit(d) => self.digit(d),
            Key::Decimal => self.decimal(),
            Key::Operator(op) => self.operator(op),
            Key::Equals => self.equals(),
        }

        tracing::debug!(
            ?key,
            display = %self.display,
            formula = %self.formula,
            last_input = ?self.last_input,
            "key applied"
        );
    }

    /// Apply a sequence of key presses in order.
    pub fn press_all(&mut self, keys: impl IntoIterator<Item = Key>) {
        for key in keys {
            self.press(key);
        }
    }

    fn clear(&mut self) {
        *self = Self::new();
    }

    fn digit(&mut self, d: Digit) {
        if self.last_input == LastInput::Equals {
            // A digit after a result starts a fresh expression.
            self.formula = if d.is_zero() {
                String::new()
            } else {
                d.to_string()
            };
            self.display = d.to_string();
            self.last_input = LastInput::Number;
            return;
        }

        if self.display == "0" && d.is_zero() {
            return;
        }

        let starts_operand = (self.display == "0" && self.last_input != LastInput::Decimal)
            || self.last_input == LastInput::Operator;
        if starts_operand {
            self.display = d.to_string();
        } else {
            self.display.push(d.as_char());
        }
        self.formula.push(d.as_char());
        self.last_input = LastInput::Number;
    }

    fn decimal(&mut self) {
        if self.last_input == LastInput::Equals {
            self.display = "0.".to_string();
            self.formula = "0.".to_string();
            self.last_input = LastInput::Decimal;
            return;
        }

        // At most one point per operand.
        if self.display.contains('.') {
            return;
        }

        if matches!(self.last_input, LastInput::Operator | LastInput::None) {
            self.display = "0.".to_string();
            self.formula.push_str("0.");
        } else {
            self.display.push('.');
            self.formula.push('.');
        }
        self.last_input = LastInput::Decimal;
    }

    fn operator(&mut self, op: Operator) {
        let symbol = op.symbol();

        if self.last_input == LastInput::Equals {
            // Continue from the previous result.
            self.formula.push(symbol);
        } else if self.formula.is_empty() && op == Operator::Subtract {
            // Leading negative sign.
            self.formula = symbol.to_string();
        } else if self.last_input == LastInput::Operator && op != Operator::Subtract {
            let kept = strip_trailing_operators(&self.formula).len();
            self.formula.truncate(kept);
            self.formula.push(symbol);
        } else {
            // Includes `-` after another operator, which reads as unary minus.
            self.formula.push(symbol);
        }

        self.display = symbol.to_string();
        self.last_input = LastInput::Operator;
    }

    fn equals(&mut self) {
        if self.formula.is_empty() {
            return;
        }

        let expression = strip_trailing_operators(&self.formula).into_owned();
        if expression.is_empty() {
            return;
        }

        if !is_arithmetic(&expression) {
            tracing::warn!(%expression, "rejected non-arithmetic expression");
            self.fail();
            return;
        }

        match evaluate(&expression) {
            Ok(value) => {
                let out = format_result(value);
                self.formula = out.clone();
                self.display = out;
                self.last_input = LastInput::Equals;
            }
            Err(err) => {
                tracing::warn!(%expression, error = %err, "evaluation failed");
                self.fail();
            }
        }
    }

    fn fail(&mut self) {
        self.display = ERROR_DISPLAY.to_string();
        self.formula.clear();
        self.last_input = LastInput::Equals;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::keys::parse_keys;

    fn run(input: &str) -> Calculator {
        let mut calc = Calculator::new();
        calc.press_all(parse_keys(input).unwrap());
        calc
    }

    #[test]
    fn test_initial_state() {
        let calc = Calculator::new();
        assert_eq!(calc.display(), "0");
        assert_eq!(calc.formula(), "");
        assert_eq!(calc.last_input(), LastInput::None);
    }

    #[test]
    fn test_digits_accumulate() {
        let calc = run("123");
        assert_eq!(calc.display(), "123");
        assert_eq!(calc.formula(), "123");
        assert_eq!(calc.last_input(), LastInput::Number);
    }

    #[test]
    fn test_leading_zeros_suppressed() {
        let calc = run("0007");
        assert_eq!(calc.display(), "7");
        assert_eq!(calc.formula(), "7");

        let calc = run("00");
        assert_eq!(calc.display(), "0");
        assert_eq!(calc.formula(), "");
        assert_eq!(calc.last_input(), LastInput::None);
    }

    #[test]
    fn test_zero_operand_after_operator() {
        let calc = run("5+00");
        assert_eq!(calc.display(), "0");
        assert_eq!(calc.formula(), "5+0");
    }

    #[test]
    fn test_operator_starts_new_operand() {
        let calc = run("12+3");
        assert_eq!(calc.display(), "3");
        assert_eq!(calc.formula(), "12+3");
    }

    #[test]
    fn test_decimal_entry() {
        let calc = run(".5");
        assert_eq!(calc.display(), "0.5");
        assert_eq!(calc.formula(), "0.5");

        let calc = run("3+.");
        assert_eq!(calc.display(), "0.");
        assert_eq!(calc.formula(), "3+0.");

        let calc = run("0.05");
        assert_eq!(calc.display(), "0.05");
        assert_eq!(calc.formula(), "0.05");
    }

    #[test]
    fn test_second_decimal_ignored() {
        let calc = run("5..2");
        assert_eq!(calc.display(), "5.2");
        assert_eq!(calc.formula(), "5.2");
    }

    #[test]
    fn test_operator_replaces_operator() {
        let calc = run("5+*");
        assert_eq!(calc.display(), "*");
        assert_eq!(calc.formula(), "5*");

        let calc = run("5*-+");
        assert_eq!(calc.formula(), "5+");
    }

    #[test]
    fn test_minus_after_operator_is_unary() {
        let calc = run("5*-3=");
        assert_eq!(calc.display(), "-15");

        let calc = run("5*-");
        assert_eq!(calc.display(), "-");
        assert_eq!(calc.formula(), "5*-");
    }

    #[test]
    fn test_leading_negative() {
        let calc = run("-5=");
        assert_eq!(calc.display(), "-5");
        assert_eq!(calc.formula(), "-5");
    }

    #[test]
    fn test_precedence() {
        assert_eq!(run("2+3*4=").display(), "14");
    }

    #[test]
    fn test_floating_point_noise() {
        assert_eq!(run("0.1+0.2=").display(), "0.3");
    }

    #[test]
    fn test_negative_ties_round_towards_positive() {
        assert_eq!(run("-3.00000000005=").display(), "-3");
        assert_eq!(run("0-2.00000000025=").display(), "-2.0000000002");
    }

    #[test]
    fn test_leading_zero_operand_is_decimal() {
        assert_eq!(run("5+05=").display(), "10");
    }

    #[test]
    fn test_division_by_zero() {
        let calc = run("5/0=");
        assert_eq!(calc.display(), ERROR_DISPLAY);
        assert!(calc.is_error());
        assert_eq!(calc.formula(), "");
        assert_eq!(calc.last_input(), LastInput::Equals);
    }

    #[test]
    fn test_recovers_after_error() {
        let calc = run("5/0=7+1=");
        assert_eq!(calc.display(), "8");
    }

    #[test]
    fn test_malformed_expression_is_error() {
        let calc = run("*5=");
        assert_eq!(calc.display(), ERROR_DISPLAY);
        assert_eq!(calc.formula(), "");
    }

    #[test]
    fn test_equals_ignores_trailing_operators() {
        let calc = run("9-4*=");
        assert_eq!(calc.display(), "5");
    }

    #[test]
    fn test_equals_noop_cases() {
        assert_eq!(run("="), Calculator::new());

        let calc = run("-=");
        assert_eq!(calc.display(), "-");
        assert_eq!(calc.formula(), "-");
        assert_eq!(calc.last_input(), LastInput::Operator);
    }

    #[test]
    fn test_equals_is_idempotent() {
        let once = run("7*6=");
        let twice = once.clone().apply(Key::Equals);
        assert_eq!(once, twice);
        assert_eq!(twice.display(), "42");
    }

    #[test]
    fn test_result_chains_into_next_expression() {
        let calc = run("2*3=+4=");
        assert_eq!(calc.display(), "10");

        let calc = run("2*3=+");
        assert_eq!(calc.display(), "+");
        assert_eq!(calc.formula(), "6+");
    }

    #[test]
    fn test_digit_after_result_starts_fresh() {
        let calc = run("2*3=4");
        assert_eq!(calc.display(), "4");
        assert_eq!(calc.formula(), "4");

        let calc = run("2*3=0");
        assert_eq!(calc.display(), "0");
        assert_eq!(calc.formula(), "");
    }

    #[test]
    fn test_decimal_after_result_starts_fresh() {
        let calc = run("1/4=.5");
        assert_eq!(calc.display(), "0.5");
        assert_eq!(calc.formula(), "0.5");
    }

    #[test]
    fn test_clear_resets() {
        let calc = run("12+3c");
        assert_eq!(calc, Calculator::new());
    }

    #[test]
    fn test_non_arithmetic_formula_rejected() {
        let mut calc = Calculator::new();
        calc.formula = "2^8".to_string();
        calc.last_input = LastInput::Number;
        calc.press(Key::Equals);
        assert!(calc.is_error());
        assert_eq!(calc.formula(), "");
    }
}
