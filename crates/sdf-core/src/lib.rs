//! sdf-core: mc-sdf-1 document validator and placement generator
//!
//! This crate contains the pure compilation logic with NO I/O:
//! - Document validation (namespace key, version, metadata security filter)
//! - Cell and context tree parsing, including compact item records
//! - Overflow checks on every position a document can reach
//! - Enumerations for block operation and facing
//! - The lazy generator that composes nested relative frames into
//!   absolute placements
//!
//! Input is a document already decoded into a `serde_yaml::Value`.
//! Loading files, material lookup and command rendering live in the
//! `mc-sdf` application crate.
//!
//! # Usage
//!
//! ```
//! use sdf_core::Document;
//!
//! let value: serde_yaml::Value = serde_yaml::from_str(r#"
//! mc-sdf-1:
//!   version: 1.0
//!   cells:
//!     - base:
//!         structure:
//!           - context:
//!               material: dirt
//!               items:
//!                 - 0,0,0
//!                 - 1,0,0
//! "#).unwrap();
//!
//! let doc = Document::parse(&value).unwrap();
//! let placements: Vec<_> = doc.placements().collect();
//! assert_eq!(placements.len(), 2);
//! assert_eq!(placements[1].1.x, 1);
//! ```

pub mod context;
pub mod document;
pub mod error;
pub mod generator;
pub mod item;
pub mod types;
pub mod value;

// Re-export commonly used types
pub use context::{Child, Context};
pub use document::{Cell, Document, Meta, BASE_NAME, VERSION};
pub use error::{Result, SdfError};
pub use generator::{Extent, Generator, GeneratorContext, GeneratorItem, Origin, Placement};
pub use item::{Item, ItemSuffix, SuffixField, SuffixValue};
pub use types::{BlockOperation, Facing};
