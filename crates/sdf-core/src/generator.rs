//! Placement generation
//!
//! Walks cells → root contexts → children in document order, keeping a
//! stack of composed absolute frames, and yields one
//! `(frame, absolute item)` pair per item.
//!
//! ## Composition
//!
//! ```text
//! parent frame (x,y,z, material, ...)  +  child context (dx,dy,dz, material', ...)
//!        → frame (x+dx, y+dy, z+dz, material', ...)
//! ```
//!
//! Position accumulates. Every other attribute comes from the child, even
//! when the child left it at its default; nothing else is inherited.
//!
//! Nested contexts inside `items` are descended into at their position
//! among their siblings, and their frame is popped before the next sibling.

use serde::Serialize;
use serde_yaml::Mapping;
use std::iter::FusedIterator;
use std::sync::Arc;
use tracing::trace;

use crate::context::{Child, Context};
use crate::document::{Cell, Document};
use crate::error::{Result, SdfError};
use crate::item::{Item, ItemSuffix, SuffixValue};
use crate::types::{BlockOperation, Facing};

/// Global offset applied to the root frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Origin {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl Origin {
    pub fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }
}

const AXES: [&str; 3] = ["x", "y", "z"];

fn offset(base: [i64; 3], delta: [i64; 3]) -> Result<[i64; 3]> {
    let mut out = [0; 3];
    for axis in 0..3 {
        out[axis] = base[axis]
            .checked_add(delta[axis])
            .ok_or(SdfError::CoordinateOverflow { axis: AXES[axis] })?;
    }
    Ok(out)
}

/// Bounding range of every offset generation reaches, relative to the origin.
///
/// Covers the root frame, each composed frame and each item position, so an
/// origin that stays in range at both ends keeps every sum in range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Extent {
    pub min: [i64; 3],
    pub max: [i64; 3],
}

impl Extent {
    /// Walk every cell with checked sums; fails if any position overflows
    pub(crate) fn of(cells: &[Cell]) -> Result<Self> {
        let mut extent = Extent::default();
        for cell in cells {
            for context in &cell.structure {
                extent.walk([0; 3], context)?;
            }
        }
        Ok(extent)
    }

    fn walk(&mut self, base: [i64; 3], context: &Context) -> Result<()> {
        let frame = offset(base, [context.x, context.y, context.z])?;
        self.include(frame);

        for child in &context.children {
            match child {
                Child::Item(item) => self.include(offset(frame, [item.x, item.y, item.z])?),
                Child::Context(nested) => self.walk(frame, nested)?,
            }
        }
        Ok(())
    }

    fn include(&mut self, point: [i64; 3]) {
        for axis in 0..3 {
            self.min[axis] = self.min[axis].min(point[axis]);
            self.max[axis] = self.max[axis].max(point[axis]);
        }
    }

    /// Fails if shifting this extent by `origin` leaves the `i64` range
    pub fn check_origin(&self, origin: Origin) -> Result<()> {
        let origin = [origin.x, origin.y, origin.z];
        offset(origin, self.min)?;
        offset(origin, self.max)?;
        Ok(())
    }
}

/// A fully composed, absolute attribute set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratorContext {
    pub x: i64,
    pub y: i64,
    pub z: i64,
    pub material: Option<String>,
    pub operation: BlockOperation,
    pub facing: Option<Facing>,
    pub values: Mapping,
    #[serde(skip)]
    pub item_suffix: ItemSuffix,
}

impl GeneratorContext {
    /// The frame every root context composes onto
    pub fn root(origin: Origin) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            z: origin.z,
            material: None,
            operation: BlockOperation::Replace,
            facing: None,
            values: Mapping::new(),
            item_suffix: ItemSuffix::default(),
        }
    }

    /// Child frame: positions add up, all other attributes are the child's.
    ///
    /// Only called on frames inside a checked `Extent`.
    pub(crate) fn compose(&self, context: &Context) -> Self {
        Self {
            x: self.x + context.x,
            y: self.y + context.y,
            z: self.z + context.z,
            material: context.material.clone(),
            operation: context.operation,
            facing: context.facing,
            values: context.values.clone(),
            item_suffix: context.item_suffix.clone(),
        }
    }

    /// Copy of this frame with an item's suffix values written over it
    pub fn with_overrides(&self, suffix: &[SuffixValue]) -> Self {
        let mut frame = self.clone();
        for value in suffix {
            match value {
                SuffixValue::Facing(facing) => frame.facing = Some(*facing),
                SuffixValue::Material(material) => frame.material = Some(material.clone()),
            }
        }
        frame
    }
}

/// A final absolute placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GeneratorItem {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl GeneratorItem {
    /// Resolve an item against a frame.
    ///
    /// Items without suffix values share the frame; items with them get
    /// their own overridden copy, which is never pushed.
    pub(crate) fn construct(
        frame: &Arc<GeneratorContext>,
        item: &Item,
    ) -> (Arc<GeneratorContext>, GeneratorItem) {
        let resolved = GeneratorItem {
            x: frame.x + item.x,
            y: frame.y + item.y,
            z: frame.z + item.z,
        };

        let frame = if item.has_suffix() {
            Arc::new(frame.with_overrides(&item.suffix))
        } else {
            Arc::clone(frame)
        };

        (frame, resolved)
    }
}

/// One resolved placement instruction
pub type Placement = (Arc<GeneratorContext>, GeneratorItem);

struct Level<'a> {
    frame: Arc<GeneratorContext>,
    children: std::slice::Iter<'a, Child>,
}

/// Lazy, order-preserving placement iterator over a parsed document.
///
/// Not restartable: create a new generator to iterate again.
pub struct Generator<'a> {
    root: Arc<GeneratorContext>,
    cells: std::slice::Iter<'a, Cell>,
    roots: std::slice::Iter<'a, Context>,
    stack: Vec<Level<'a>>,
}

impl<'a> Generator<'a> {
    /// Generator rooted at `0 0 0`; the document's extent was checked at parse
    pub fn new(document: &'a Document) -> Self {
        Self::unchecked(document, Origin::default())
    }

    /// Generator rooted at `origin`, rejected if any position would overflow
    pub fn with_origin(document: &'a Document, origin: Origin) -> Result<Self> {
        document.extent().check_origin(origin)?;
        Ok(Self::unchecked(document, origin))
    }

    fn unchecked(document: &'a Document, origin: Origin) -> Self {
        Self {
            root: Arc::new(GeneratorContext::root(origin)),
            cells: document.cells().iter(),
            roots: Default::default(),
            stack: Vec::new(),
        }
    }

    /// Number of composed frames currently pushed
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn push(&mut self, context: &'a Context) {
        let parent = self.stack.last().map_or(&self.root, |level| &level.frame);
        let frame = Arc::new(parent.compose(context));
        trace!(
            "Push frame at ({}, {}, {}) depth {}",
            frame.x,
            frame.y,
            frame.z,
            self.stack.len() + 1
        );
        self.stack.push(Level {
            frame,
            children: context.children.iter(),
        });
    }

    fn pop(&mut self) {
        if let Some(level) = self.stack.pop() {
            trace!(
                "Pop frame at ({}, {}, {})",
                level.frame.x,
                level.frame.y,
                level.frame.z
            );
        }
    }

    /// Next root context across all cells, in document order
    fn next_root(&mut self) -> Option<&'a Context> {
        loop {
            if let Some(context) = self.roots.next() {
                return Some(context);
            }
            self.roots = self.cells.next()?.structure.iter();
        }
    }
}

impl Iterator for Generator<'_> {
    type Item = Placement;

    fn next(&mut self) -> Option<Placement> {
        loop {
            let Some(level) = self.stack.last_mut() else {
                let context = self.next_root()?;
                self.push(context);
                continue;
            };

            match level.children.next() {
                Some(Child::Item(item)) => {
                    return Some(GeneratorItem::construct(&level.frame, item));
                }
                Some(Child::Context(context)) => self.push(context),
                None => self.pop(),
            }
        }
    }
}

impl FusedIterator for Generator<'_> {}

impl Document {
    /// Placements for this document, rooted at the origin
    pub fn placements(&self) -> Generator<'_> {
        Generator::new(self)
    }

    /// Placements for this document, rooted at `origin`
    pub fn placements_from(&self, origin: Origin) -> Result<Generator<'_>> {
        Generator::with_origin(self, origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_yaml::Value;

    fn document(cells_yaml: &str) -> Document {
        let src = format!("mc-sdf-1:\n  version: 1.0\n  cells:\n{}", cells_yaml);
        let value: Value = serde_yaml::from_str(&src).unwrap();
        Document::parse(&value).unwrap()
    }

    fn positions(generator: Generator<'_>) -> Vec<(i64, i64, i64)> {
        generator.map(|(_, item)| (item.x, item.y, item.z)).collect()
    }

    #[test]
    fn test_single_context_two_items() {
        let doc = document(
            r#"
    - base:
        structure:
          - context:
              material: dirt
              items:
                - 0,0,0
                - 1,0,0
"#,
        );

        let placements: Vec<Placement> = doc.placements().collect();
        assert_eq!(placements.len(), 2);
        assert_eq!(placements[0].1, GeneratorItem { x: 0, y: 0, z: 0 });
        assert_eq!(placements[1].1, GeneratorItem { x: 1, y: 0, z: 0 });
        for (frame, _) in &placements {
            assert_eq!(frame.material.as_deref(), Some("dirt"));
        }
        // no suffix: both items share one frame
        assert!(Arc::ptr_eq(&placements[0].0, &placements[1].0));
    }

    #[test]
    fn test_positions_accumulate_through_nesting() {
        let doc = document(
            r#"
    - nest:
        structure:
          - context:
              x: 1
              items:
                - context:
                    y: 2
                    items:
                      - 0,0,0
"#,
        );

        let placements: Vec<Placement> = doc.placements().collect();
        assert_eq!(placements.len(), 1);
        let (frame, item) = &placements[0];
        assert_eq!((frame.x, frame.y, frame.z), (1, 2, 0));
        assert_eq!(*item, GeneratorItem { x: 1, y: 2, z: 0 });
    }

    #[test]
    fn test_non_position_attributes_are_replaced() {
        let doc = document(
            r#"
    - nest:
        structure:
          - context:
              material: stone
              operation: Keep
              facing: U
              values: {lit: true}
              items:
                - context:
                    items:
                      - 0,0,0
"#,
        );

        let (frame, _) = doc.placements().next().unwrap();
        assert_eq!(frame.material, None);
        assert_eq!(frame.operation, BlockOperation::Replace);
        assert_eq!(frame.facing, None);
        assert!(frame.values.is_empty());
    }

    #[test]
    fn test_document_order_with_mixed_children() {
        let doc = document(
            r#"
    - first:
        structure:
          - context:
              items:
                - 0,0,0
                - context:
                    x: 10
                    items:
                      - 0,0,0
                      - 1,0,0
                - 2,0,0
          - context:
              z: 5
              items:
                - 0,0,0
    - second:
        structure:
          - context:
              y: 7
              items:
                - 0,0,0
"#,
        );

        assert_eq!(
            positions(doc.placements()),
            vec![
                (0, 0, 0),
                (10, 0, 0),
                (11, 0, 0),
                (2, 0, 0),
                (0, 0, 5),
                (0, 7, 0),
            ]
        );
    }

    #[test]
    fn test_frames_restore_after_nested_context() {
        let doc = document(
            r#"
    - c:
        structure:
          - context:
              material: glass
              items:
                - context:
                    material: stone
                    items:
                      - 0,0,0
                - 0,0,0
"#,
        );

        let materials: Vec<Option<String>> = doc
            .placements()
            .map(|(frame, _)| frame.material.clone())
            .collect();
        assert_eq!(
            materials,
            vec![Some("stone".to_string()), Some("glass".to_string())]
        );
    }

    #[test]
    fn test_suffix_overrides_clone_the_frame() {
        let doc = document(
            r#"
    - pistons:
        structure:
          - context:
              material: piston
              facing: U
              item_suffix: [facing, material]
              items:
                - 1,2,3,N,wool.red
                - 0,0,0
                - 0,0,1,W
"#,
        );

        let placements: Vec<Placement> = doc.placements().collect();

        let (frame, item) = &placements[0];
        assert_eq!(*item, GeneratorItem { x: 1, y: 2, z: 3 });
        assert_eq!(frame.facing, Some(Facing::North));
        assert_eq!(frame.material.as_deref(), Some("wool.red"));

        // the override did not leak into the shared frame
        let (frame, _) = &placements[1];
        assert_eq!(frame.facing, Some(Facing::Up));
        assert_eq!(frame.material.as_deref(), Some("piston"));

        // underflow keeps the composed material
        let (frame, _) = &placements[2];
        assert_eq!(frame.facing, Some(Facing::West));
        assert_eq!(frame.material.as_deref(), Some("piston"));
    }

    #[test]
    fn test_origin_offsets_everything() {
        let doc = document(
            r#"
    - c:
        structure:
          - context:
              x: 1
              items:
                - 0,0,0
"#,
        );

        assert_eq!(
            positions(doc.placements_from(Origin::new(100, 64, -20)).unwrap()),
            vec![(101, 64, -20)]
        );
    }

    #[test]
    fn test_overflowing_offsets_rejected_at_parse() {
        let src = r#"
mc-sdf-1:
  version: 1.0
  cells:
    - far:
        structure:
          - context:
              x: 9223372036854775807
              items:
                - 1,0,0
"#;
        let value: Value = serde_yaml::from_str(src).unwrap();
        assert_eq!(
            Document::parse(&value),
            Err(SdfError::CoordinateOverflow { axis: "x" })
        );

        let nested = src.replace(
            "                - 1,0,0\n",
            "                - context:\n                    x: 1\n",
        );
        let value: Value = serde_yaml::from_str(&nested).unwrap();
        assert_eq!(
            Document::parse(&value),
            Err(SdfError::CoordinateOverflow { axis: "x" })
        );
    }

    #[test]
    fn test_extent_bounds_every_position() {
        let doc = document(
            r#"
    - c:
        structure:
          - context:
              x: -3
              items:
                - 0,5,0
                - context:
                    z: 2
                    items:
                      - 0,0,-9
"#,
        );
        assert_eq!(
            doc.extent(),
            Extent {
                min: [-3, 0, -7],
                max: [0, 5, 2],
            }
        );
    }

    #[test]
    fn test_origin_checked_against_extent() {
        let doc = document(
            r#"
    - c:
        structure:
          - context:
              items:
                - 1,0,0
"#,
        );

        assert!(matches!(
            doc.placements_from(Origin::new(i64::MAX, 0, 0)),
            Err(SdfError::CoordinateOverflow { axis: "x" })
        ));
        assert!(doc.placements_from(Origin::new(i64::MAX - 1, 0, 0)).is_ok());
        // an empty extent accepts any origin
        let empty = document("    - c: {}\n");
        assert!(empty.placements_from(Origin::new(i64::MIN, i64::MAX, 0)).is_ok());
    }

    #[test]
    fn test_stack_unwinds_when_exhausted() {
        let doc = document(
            r#"
    - c:
        structure:
          - context:
              items:
                - context:
                    items:
                      - 0,0,0
"#,
        );

        let mut generator = doc.placements();
        assert_eq!(generator.depth(), 0);
        assert!(generator.next().is_some());
        assert_eq!(generator.depth(), 2);
        assert!(generator.next().is_none());
        assert_eq!(generator.depth(), 0);
        assert!(generator.next().is_none());
    }

    #[test]
    fn test_empty_contexts_yield_nothing() {
        let doc = document(
            r#"
    - c:
        structure:
          - context: {}
          - context:
              items:
                - context: {}
"#,
        );
        assert_eq!(doc.placements().count(), 0);
    }

    #[test]
    fn test_unconsumed_generator_is_harmless() {
        let doc = document("    - c: {}\n");
        let generator = doc.placements();
        drop(generator);
    }
}
