//! mc-sdf: compile mc-sdf-1 structure documents into block commands
//!
//! The document model, validation and placement generation live in
//! `sdf-core`. This crate adds the application layer:
//! - `loader` - YAML text and files into a `Document`
//! - `position` - `"<x> <y> <z>"` origins
//! - `materials` - material name and facing to protocol block data
//! - `commands` - `setblock` rendering of resolved placements

pub mod commands;
pub mod error;
pub mod loader;
pub mod materials;
pub mod position;

pub use commands::{render_command, render_document, RenderedCommand};
pub use error::AppError;
pub use loader::{load_file, load_str};
pub use materials::{material_data, MaterialData};
pub use position::parse_position;

pub use sdf_core;
