//! Compact item records: `"x,y,z[,suffix]"`
//!
//! The optional suffix carries per-item overrides whose order is declared
//! on the owning context via `item_suffix`, e.g.
//!
//! ```text
//! item_suffix: [facing, material]
//! items:
//!   - 1,2,3,N,wool.red
//! ```

use serde::Serialize;
use serde_yaml::Value;

use crate::error::{Result, SdfError};
use crate::types::Facing;
use crate::value::expect_sequence;

/// Attribute names an item suffix may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SuffixField {
    Facing,
    Material,
}

impl SuffixField {
    pub const ALL: [SuffixField; 2] = [SuffixField::Facing, SuffixField::Material];

    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "facing" => Ok(SuffixField::Facing),
            "material" => Ok(SuffixField::Material),
            other => Err(SdfError::InvalidSuffixField {
                field: other.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SuffixField::Facing => "facing",
            SuffixField::Material => "material",
        }
    }

    /// Comma-separated list of the accepted field names
    pub(crate) fn expected_names() -> String {
        Self::ALL.map(|field| field.name()).join(", ")
    }

    fn resolve(&self, raw: &str) -> Result<SuffixValue> {
        match self {
            SuffixField::Facing => Facing::resolve(raw).map(SuffixValue::Facing),
            SuffixField::Material => Ok(SuffixValue::Material(raw.to_string())),
        }
    }
}

/// A parsed suffix value, already bound to the field it overrides
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SuffixValue {
    Facing(Facing),
    Material(String),
}

/// Declaration-ordered list of suffix fields for a context's items
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ItemSuffix {
    fields: Vec<SuffixField>,
}

impl ItemSuffix {
    pub fn new(fields: Vec<SuffixField>) -> Self {
        Self { fields }
    }

    /// Build from the context's `item_suffix` value (absent or null means none)
    pub fn from_value(value: Option<&Value>) -> Result<Self> {
        let Some(value) = value.filter(|v| !v.is_null()) else {
            return Ok(Self::default());
        };

        let mut fields = Vec::new();
        for entry in expect_sequence(value, "item_suffix")? {
            let name = entry.as_str().ok_or_else(|| SdfError::InvalidSuffixField {
                field: crate::value::canonical_string(entry),
            })?;
            fields.push(SuffixField::from_name(name)?);
        }
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[SuffixField] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parse a suffix payload against the declared fields.
    ///
    /// One comma-separated piece is consumed per declared field, in order.
    /// Missing or empty pieces produce no value for that field. Text left
    /// over after every field has been filled is an error.
    pub fn parse(&self, payload: &str) -> Result<Vec<SuffixValue>> {
        if self.fields.is_empty() {
            return Err(SdfError::UnexpectedSuffix {
                reason: format!("not expecting any suffix values but got \"{}\"", payload),
            });
        }

        let mut values = Vec::with_capacity(self.fields.len());
        let mut rest = payload;

        for field in &self.fields {
            let (piece, tail) = rest.split_once(',').unwrap_or((rest, ""));
            rest = tail;

            let piece = piece.trim();
            if !piece.is_empty() {
                values.push(field.resolve(piece)?);
            }
        }

        if !rest.is_empty() {
            return Err(SdfError::UnexpectedSuffix {
                reason: format!("received additional unexpected data \"{}\"", rest),
            });
        }

        Ok(values)
    }
}

/// A leaf placement relative to its context
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub x: i64,
    pub y: i64,
    pub z: i64,
    /// Per-item overrides, in declaration order
    pub suffix: Vec<SuffixValue>,
}

impl Item {
    pub fn new(x: i64, y: i64, z: i64) -> Self {
        Self {
            x,
            y,
            z,
            suffix: Vec::new(),
        }
    }

    /// Parse a compact record using the owning context's suffix declaration
    pub fn parse(record: &str, suffix: &ItemSuffix) -> Result<Self> {
        let mut parts = record.splitn(4, ',');

        let mut coord = |axis: &str| -> Result<i64> {
            let raw = parts.next().ok_or_else(|| SdfError::InvalidCoordinate {
                record: record.to_string(),
                component: format!("{} (missing)", axis),
            })?;
            raw.trim()
                .parse::<i64>()
                .map_err(|_| SdfError::InvalidCoordinate {
                    record: record.to_string(),
                    component: format!("{} ({:?})", axis, raw),
                })
        };

        let x = coord("x")?;
        let y = coord("y")?;
        let z = coord("z")?;

        let suffix = match parts.next() {
            Some(payload) => suffix.parse(payload.trim())?,
            None => Vec::new(),
        };

        Ok(Self { x, y, z, suffix })
    }

    pub fn has_suffix(&self) -> bool {
        !self.suffix.is_empty()
    }
}
