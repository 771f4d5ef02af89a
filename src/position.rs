//! Starting position for generated structures

use regex::Regex;
use sdf_core::Origin;
use std::sync::LazyLock;

use crate::error::AppError;

static POSITION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(-?\d+) (-?\d+) (-?\d+)\s*$").unwrap());

/// Parse `"<x> <y> <z>"` into an origin
pub fn parse_position(input: &str) -> Result<Origin, AppError> {
    let caps = POSITION_REGEX
        .captures(input)
        .ok_or_else(|| AppError::BadPosition(input.to_string()))?;

    let coord = |i: usize| -> Result<i64, AppError> {
        caps[i]
            .parse::<i64>()
            .map_err(|_| AppError::BadPosition(input.to_string()))
    };

    Ok(Origin::new(coord(1)?, coord(2)?, coord(3)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("10 64 -3").unwrap(), Origin::new(10, 64, -3));
        assert_eq!(parse_position(" 0 0 0 ").unwrap(), Origin::default());
    }

    #[test]
    fn test_bad_position() {
        for input in ["", "1 2", "1,2,3", "a b c", "1 2 3 4", "1  2 3"] {
            assert_eq!(
                parse_position(input),
                Err(AppError::BadPosition(input.to_string())),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_overflowing_position() {
        assert!(parse_position("99999999999999999999 0 0").is_err());
    }
}
