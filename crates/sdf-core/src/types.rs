//! Closed enumerations: placement operation and facing

use serde::Serialize;
use std::fmt;

use crate::error::{Result, SdfError};

/// What happens to the block already occupying a placement's position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum BlockOperation {
    Destroy,
    Keep,
    #[default]
    Replace,
}

impl BlockOperation {
    /// Resolve an operation by its exact name
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "Destroy" => Ok(BlockOperation::Destroy),
            "Keep" => Ok(BlockOperation::Keep),
            "Replace" => Ok(BlockOperation::Replace),
            other => Err(SdfError::UnknownOperation {
                name: other.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BlockOperation::Destroy => "Destroy",
            BlockOperation::Keep => "Keep",
            BlockOperation::Replace => "Replace",
        }
    }
}

impl fmt::Display for BlockOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Cardinal directions plus up, down and other.
///
/// "No facing" is `Option::None`, which is distinct from `Facing::Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Facing {
    Other,
    North,
    East,
    South,
    West,
    Up,
    Down,
}

impl Facing {
    /// Resolve a single-letter shorthand (`N E S W U D`) or an exact name
    pub fn resolve(value: &str) -> Result<Self> {
        let facing = match value {
            "N" | "North" => Facing::North,
            "E" | "East" => Facing::East,
            "S" | "South" => Facing::South,
            "W" | "West" => Facing::West,
            "U" | "Up" => Facing::Up,
            "D" | "Down" => Facing::Down,
            "Other" => Facing::Other,
            other => {
                return Err(SdfError::UnknownFacing {
                    name: other.to_string(),
                })
            }
        };
        Ok(facing)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Facing::Other => "Other",
            Facing::North => "North",
            Facing::East => "East",
            Facing::South => "South",
            Facing::West => "West",
            Facing::Up => "Up",
            Facing::Down => "Down",
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_by_exact_name() {
        assert_eq!(
            BlockOperation::from_name("Keep").unwrap(),
            BlockOperation::Keep
        );
        assert_eq!(BlockOperation::default(), BlockOperation::Replace);
        assert!(matches!(
            BlockOperation::from_name("replace"),
            Err(SdfError::UnknownOperation { .. })
        ));
    }

    #[test]
    fn test_facing_shorthand() {
        let cases = [
            ("N", Facing::North),
            ("E", Facing::East),
            ("S", Facing::South),
            ("W", Facing::West),
            ("U", Facing::Up),
            ("D", Facing::Down),
        ];
        for (short, expected) in cases {
            assert_eq!(Facing::resolve(short).unwrap(), expected);
        }
    }

    #[test]
    fn test_facing_full_names() {
        assert_eq!(Facing::resolve("West").unwrap(), Facing::West);
        assert_eq!(Facing::resolve("Other").unwrap(), Facing::Other);
    }

    #[test]
    fn test_facing_unknown() {
        assert_eq!(
            Facing::resolve("O"),
            Err(SdfError::UnknownFacing {
                name: "O".to_string()
            })
        );
        assert!(Facing::resolve("north").is_err());
    }
}
