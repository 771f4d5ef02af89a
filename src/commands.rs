//! Command rendering
//!
//! Turns resolved placements into `setblock` command lines:
//!
//! ```text
//! setblock <x> <y> <z> <material> <dataValue> <oldBlockHandling> [dataTag]
//! ```

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use sdf_core::{Document, GeneratorContext, GeneratorItem, Origin};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::materials::material_data;

/// A placement together with its rendered command line
#[derive(Debug, Clone)]
pub struct RenderedCommand {
    pub frame: Arc<GeneratorContext>,
    pub item: GeneratorItem,
    pub command: String,
}

impl Serialize for RenderedCommand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RenderedCommand", 3)?;
        state.serialize_field("frame", &*self.frame)?;
        state.serialize_field("item", &self.item)?;
        state.serialize_field("command", &self.command)?;
        state.end()
    }
}

/// Render one placement as a `setblock` line
pub fn render_command(frame: &GeneratorContext, item: &GeneratorItem) -> Result<String, AppError> {
    let data = material_data(frame.material.as_deref(), frame.facing)?;

    let mut command = format!(
        "setblock {} {} {} {} {} {}",
        item.x,
        item.y,
        item.z,
        data.material,
        data.data_value.unwrap_or(0),
        frame.operation.name().to_lowercase()
    );

    if !frame.values.is_empty() {
        let tag = serde_json::to_string(&frame.values)
            .map_err(|e| AppError::BadDataTag(e.to_string()))?;
        command.push(' ');
        command.push_str(&tag);
    }

    debug!("Rendered: {}", command);
    Ok(command)
}

/// Render every placement of a document in order.
///
/// With `lenient`, placements whose material cannot be resolved are logged
/// and skipped; otherwise the first failure is returned. An origin that
/// would push any position out of range fails before rendering starts.
pub fn render_document(
    document: &Document,
    origin: Origin,
    lenient: bool,
) -> Result<Vec<RenderedCommand>, AppError> {
    let mut rendered = Vec::new();

    for (frame, item) in document.placements_from(origin)? {
        match render_command(&frame, &item) {
            Ok(command) => rendered.push(RenderedCommand {
                frame,
                item,
                command,
            }),
            Err(e) if lenient => {
                warn!(
                    "Skipping placement at ({}, {}, {}): {}",
                    item.x, item.y, item.z, e
                );
            }
            Err(e) => return Err(e),
        }
    }

    Ok(rendered)
}
