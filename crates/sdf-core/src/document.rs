//! Document validation: namespace, version, metadata and cells
//!
//! A document looks like:
//!
//! ```text
//! mc-sdf-1:
//!   version: 1.0
//!   meta:
//!     author: smilechaser
//!   cells:
//!     - piston_row:
//!         structure:
//!           - context:
//!               material: piston
//!               items: [...]
//! ```

use serde::Serialize;
use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::context::{unwrap_context, Context};
use crate::error::{Result, SdfError};
use crate::generator::Extent;
use crate::value::{canonical_string, expect_mapping, expect_sequence, key_str};

/// Fixed top-level namespace key
pub const BASE_NAME: &str = "mc-sdf-1";
pub const VERSION_NAME: &str = "version";
/// The only supported document version
pub const VERSION: &str = "1.0";

// =============================================================================
// META
// =============================================================================

/// Named metadata fields plus everything else that was supplied.
///
/// Every supplied key, including the named ones, also lands in `other`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Meta {
    pub author: Option<Value>,
    pub name: Option<Value>,
    pub description: Option<Value>,
    pub other: Mapping,
}

impl Meta {
    pub const FIELDS: [&'static str; 3] = ["author", "name", "description"];

    /// Build from an optional mapping; absent or null yields an empty `Meta`
    pub fn parse(value: Option<&Value>) -> Result<Self> {
        let mut meta = Meta::default();

        let data = match value {
            None | Some(Value::Null) => return Ok(meta),
            Some(v) => expect_mapping(v, "meta")?,
        };

        for (key, value) in data {
            let field = key_str(key, "meta")?;

            // checked before anything else, known field or not
            if field.starts_with('_') {
                return Err(SdfError::UnsecureKey {
                    key: field.to_string(),
                });
            }

            match field {
                "author" => meta.author = Some(value.clone()),
                "name" => meta.name = Some(value.clone()),
                "description" => meta.description = Some(value.clone()),
                _ => {}
            }

            meta.other.insert(key.clone(), value.clone());
        }

        Ok(meta)
    }

    /// True when no metadata keys were supplied
    pub fn is_empty(&self) -> bool {
        self.other.is_empty()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_ref().and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_ref().and_then(Value::as_str)
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_ref().and_then(Value::as_str)
    }

    /// Named fields (null when absent) followed by the overflow entries.
    /// Named fields win on collision.
    pub fn merged(&self) -> Mapping {
        let known = [&self.author, &self.name, &self.description];

        let mut merged = Mapping::new();
        for (field, value) in Self::FIELDS.iter().zip(known) {
            merged.insert(
                Value::from(*field),
                value.clone().unwrap_or(Value::Null),
            );
        }
        for (key, value) in &self.other {
            if !merged.contains_key(key) {
                merged.insert(key.clone(), value.clone());
            }
        }
        merged
    }
}

// =============================================================================
// CELL
// =============================================================================

/// A named structural unit: notes, metadata, materials and placement trees
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// The key wrapping the cell body
    pub name: String,
    pub notes: Option<Value>,
    pub meta: Option<Value>,
    pub materials: Option<Value>,
    /// Root contexts, in document order
    pub structure: Vec<Context>,
}

impl Cell {
    /// Parse a cell body. Only `structure` is interpreted; the other
    /// recognized fields are carried through untouched.
    pub fn parse(name: impl Into<String>, body: &Value) -> Result<Self> {
        let data = expect_mapping(body, "cell")?;

        let mut cell = Cell {
            name: name.into(),
            notes: None,
            meta: None,
            materials: None,
            structure: Vec::new(),
        };

        for (key, value) in data {
            match key_str(key, "cell")? {
                "notes" => cell.notes = Some(value.clone()),
                "meta" => cell.meta = Some(value.clone()),
                "materials" => cell.materials = Some(value.clone()),
                "structure" => cell.structure = parse_structure(value)?,
                other => {
                    return Err(SdfError::InvalidKey {
                        scope: "cell",
                        key: other.to_string(),
                    })
                }
            }
        }

        debug!(
            "Parsed cell '{}' with {} root context(s)",
            cell.name,
            cell.structure.len()
        );

        Ok(cell)
    }

    /// The cell's `meta` field, validated like document metadata
    pub fn parsed_meta(&self) -> Result<Meta> {
        Meta::parse(self.meta.as_ref())
    }

    pub fn item_count(&self) -> usize {
        self.structure.iter().map(Context::item_count).sum()
    }

    pub fn context_count(&self) -> usize {
        self.structure.iter().map(Context::context_count).sum()
    }
}

fn parse_structure(value: &Value) -> Result<Vec<Context>> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    expect_sequence(value, "structure")?
        .iter()
        .map(|entry| unwrap_context(entry).and_then(Context::parse))
        .collect()
}

// =============================================================================
// DOCUMENT
// =============================================================================

/// A validated document: metadata plus its cells, read-only once built
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    meta: Meta,
    cells: Vec<Cell>,
    extent: Extent,
}

impl Document {
    /// Validate a decoded document and parse it completely
    pub fn parse(data: &Value) -> Result<Self> {
        let base = data.get(BASE_NAME).ok_or_else(|| SdfError::BadDocument {
            reason: format!("missing base name (expecting \"{}\")", BASE_NAME),
        })?;

        let version = base.get(VERSION_NAME).ok_or_else(|| SdfError::BadDocument {
            reason: "missing version field".to_string(),
        })?;

        let version = canonical_string(version);
        if version != VERSION {
            return Err(SdfError::BadVersion {
                expected: VERSION.to_string(),
                found: version,
            });
        }

        let meta = Meta::parse(base.get("meta"))?;

        let cells = match base.get("cells") {
            None | Some(Value::Null) => Vec::new(),
            Some(cells) => expect_sequence(cells, "cells")?
                .iter()
                .map(parse_wrapped_cell)
                .collect::<Result<Vec<_>>>()?,
        };

        let extent = Extent::of(&cells)?;

        debug!("Accepted {} document v{} with {} cell(s)", BASE_NAME, version, cells.len());

        Ok(Self {
            meta,
            cells,
            extent,
        })
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Range of positions generation reaches from a `0 0 0` origin
    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn item_count(&self) -> usize {
        self.cells.iter().map(Cell::item_count).sum()
    }

    pub fn context_count(&self) -> usize {
        self.cells.iter().map(Cell::context_count).sum()
    }
}

/// Each `cells` entry is `{<name>: <body>}`
fn parse_wrapped_cell(entry: &Value) -> Result<Cell> {
    let wrapper = entry
        .as_mapping()
        .filter(|m| m.len() == 1)
        .ok_or_else(|| SdfError::malformed("each cell must be a single-key {name: body} mapping"))?;

    let (name, body) = wrapper
        .iter()
        .next()
        .ok_or_else(|| SdfError::malformed("empty cell wrapper"))?;

    Cell::parse(canonical_string(name), body)
}
