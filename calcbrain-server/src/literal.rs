//! Keypad text validation
//!
//! The engine only ever sees numbers; this is where typed text becomes one.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LiteralError {
    #[error("'{0}' is not allowed in a number")]
    InvalidCharacter(char),

    #[error("A number can only have one decimal point")]
    MultipleDecimalPoints,

    #[error("A number needs at least one digit")]
    NoDigits,
}

/// Parse keypad text: an optional leading minus sign, digits and at most
/// one decimal point. Exponents are not accepted.
pub fn parse_literal(text: &str) -> Result<f64, LiteralError> {
    let text = text.trim();
    let mut has_dot = false;
    let mut has_digit = false;

    for (i, ch) in text.chars().enumerate() {
        match ch {
            '-' if i == 0 => {}
            '.' if has_dot => return Err(LiteralError::MultipleDecimalPoints),
            '.' => has_dot = true,
            '0'..='9' => has_digit = true,
            other => return Err(LiteralError::InvalidCharacter(other)),
        }
    }

    if !has_digit {
        return Err(LiteralError::NoDigits);
    }

    // only digits, one dot and a leading sign remain, which f64 always accepts
    text.parse().map_err(|_| LiteralError::NoDigits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_numbers() {
        assert_eq!(parse_literal("42"), Ok(42.0));
        assert_eq!(parse_literal("-3.5"), Ok(-3.5));
        assert_eq!(parse_literal(" 0.25 "), Ok(0.25));
        assert_eq!(parse_literal("5."), Ok(5.0));
        assert_eq!(parse_literal(".5"), Ok(0.5));
    }

    #[test]
    fn test_invalid_numbers() {
        assert_eq!(parse_literal("1.2.3"), Err(LiteralError::MultipleDecimalPoints));
        assert_eq!(parse_literal("1-2"), Err(LiteralError::InvalidCharacter('-')));
        assert_eq!(parse_literal("--1"), Err(LiteralError::InvalidCharacter('-')));
        assert_eq!(parse_literal("1e5"), Err(LiteralError::InvalidCharacter('e')));
        assert_eq!(parse_literal("π"), Err(LiteralError::InvalidCharacter('π')));
    }

    #[test]
    fn test_no_digits() {
        assert_eq!(parse_literal(""), Err(LiteralError::NoDigits));
        assert_eq!(parse_literal("-"), Err(LiteralError::NoDigits));
        assert_eq!(parse_literal("."), Err(LiteralError::NoDigits));
        assert_eq!(parse_literal("-."), Err(LiteralError::NoDigits));
    }
}
