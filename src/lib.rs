//! A keypad calculator core.
//!
//! Key presses (digits, decimal point, operators, clear, equals) drive a small
//! state machine that builds an arithmetic formula and shows either the
//! current operand, the last operator, or a formatted result.

pub mod calculator;
pub mod config;
