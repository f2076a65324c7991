//! Copying results to the system clipboard.

use anyhow::{Context, Result};
use arboard::Clipboard;

use super::state::Calculator;

/// Copy the calculator's current result to the system clipboard.
///
/// Returns `Ok(false)` without touching the clipboard when there is nothing
/// worth copying (the display shows the error token or an operator).
pub fn copy_result(calc: &Calculator) -> Result<bool> {
    if !has_copyable_result(calc) {
        return Ok(false);
    }

    let mut clipboard = Clipboard::new().context("failed to access clipboard")?;
    clipboard
        .set_text(calc.display().to_string())
        .context("failed to copy result to clipboard")?;

    tracing::debug!(result = calc.display(), "copied result to clipboard");
    Ok(true)
}

fn has_copyable_result(calc: &Calculator) -> bool {
    !calc.is_error()
        && calc
            .display()
            .parse::<f64>()
            .is_ok_and(f64::is_finite)
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
    fn test_numbers_are_copyable() {
        assert!(has_copyable_result(&Calculator::new()));
        assert!(has_copyable_result(&run("1/4=")));
        assert!(has_copyable_result(&run("3.")));
    }

    #[test]
    fn test_error_and_operators_not_copyable() {
        assert!(!has_copyable_result(&run("5/0=")));
        assert!(!has_copyable_result(&run("5*")));
        assert!(!has_copyable_result(&run("-")));
    }
}
