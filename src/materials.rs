//! Material lookup
//!
//! Maps a frame's `(material, facing)` to the protocol block id and its
//! auxiliary data value. Dotted names select a variant of a base block
//! (`wool.red` → `wool` with data value 14).

use sdf_core::Facing;

use crate::error::AppError;

const WOOL_COLOURS: [&str; 16] = [
    "white",
    "orange",
    "magenta",
    "light_blue",
    "yellow",
    "lime",
    "pink",
    "gray",
    "light_gray",
    "cyan",
    "purple",
    "blue",
    "brown",
    "green",
    "red",
    "black",
];

const PISTONS: [&str; 2] = ["piston", "sticky_piston"];

/// Protocol material plus optional data value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialData {
    pub material: String,
    pub data_value: Option<u8>,
}

/// Resolve a material name and facing into protocol values
pub fn material_data(
    material: Option<&str>,
    facing: Option<Facing>,
) -> Result<MaterialData, AppError> {
    let material = material.ok_or(AppError::MissingMaterial)?;

    if let Some(colour) = material.strip_prefix("wool.") {
        let index = WOOL_COLOURS
            .iter()
            .position(|c| *c == colour)
            .ok_or_else(|| AppError::UnknownMaterial(material.to_string()))?;
        return Ok(MaterialData {
            material: "wool".to_string(),
            data_value: Some(index as u8),
        });
    }

    let data_value = match facing {
        Some(facing) if PISTONS.contains(&material) => Some(piston_facing(material, facing)?),
        _ => None,
    };

    Ok(MaterialData {
        material: material.to_string(),
        data_value,
    })
}

fn piston_facing(material: &str, facing: Facing) -> Result<u8, AppError> {
    match facing {
        Facing::Down => Ok(0),
        Facing::Up => Ok(1),
        Facing::North => Ok(2),
        Facing::South => Ok(3),
        Facing::West => Ok(4),
        Facing::East => Ok(5),
        Facing::Other => Err(AppError::UnsupportedFacing {
            material: material.to_string(),
            facing,
        }),
    }
}
