//! Application-level errors
//!
//! Document errors come from `sdf_core::SdfError` and pass through as
//! `AppError::Document`; the rest covers origin parsing and material lookup.

use sdf_core::{Facing, SdfError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Could not parse \"{0}\" into a position (expected \"<x> <y> <z>\")")]
    BadPosition(String),

    #[error("Placement has no material")]
    MissingMaterial,

    #[error("Unknown material \"{0}\"")]
    UnknownMaterial(String),

    #[error("Material \"{material}\" cannot face {facing}")]
    UnsupportedFacing { material: String, facing: Facing },

    #[error(transparent)]
    Document(#[from] SdfError),

    #[error("Block values cannot be written as a data tag: {0}")]
    BadDataTag(String),
}
