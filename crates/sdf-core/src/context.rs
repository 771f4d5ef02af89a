//! Context trees
//!
//! A context is a local coordinate frame: a relative offset, placement
//! attributes, and an ordered list of children. Children are either item
//! records or nested contexts, kept in document order.

use serde_yaml::{Mapping, Value};

use crate::error::{Result, SdfError};
use crate::item::{Item, ItemSuffix};
use crate::types::{BlockOperation, Facing};
use crate::value::{
    canonical_string, expect_mapping, expect_sequence, key_str, mapping_or_empty, optional_i64,
    optional_str,
};

/// Keys a context body may carry
pub const CONTEXT_FIELDS: &[&str] = &[
    "values",
    "meta",
    "operation",
    "material",
    "x",
    "y",
    "z",
    "facing",
    "item_suffix",
    "items",
];

/// Key wrapping every context in `structure` and `items`
pub const CONTEXT_KEY: &str = "context";

/// One entry in a context's children
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Item(Item),
    Context(Context),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    pub x: i64,
    pub y: i64,
    pub z: i64,
    /// e.g. gravel, dirt, wool.red, wood.oak
    pub material: Option<String>,
    pub operation: BlockOperation,
    pub facing: Option<Facing>,
    /// Block entity data
    pub values: Mapping,
    /// User-supplied key/value pairs
    pub meta: Mapping,
    pub item_suffix: ItemSuffix,
    pub children: Vec<Child>,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            z: 0,
            material: None,
            operation: BlockOperation::Replace,
            facing: None,
            values: Mapping::new(),
            meta: Mapping::new(),
            item_suffix: ItemSuffix::default(),
            children: Vec::new(),
        }
    }
}

impl Context {
    /// Parse a context body, recursing into nested contexts under `items`
    pub fn parse(value: &Value) -> Result<Self> {
        let data = expect_mapping(value, CONTEXT_KEY)?;

        for key in data.keys() {
            let key = key_str(key, "context")?;
            if !CONTEXT_FIELDS.contains(&key) {
                return Err(SdfError::InvalidKey {
                    scope: "context",
                    key: key.to_string(),
                });
            }
        }

        // absent means Replace; present must name an operation, null included
        let operation = match data.get("operation") {
            None => BlockOperation::Replace,
            Some(Value::String(name)) => BlockOperation::from_name(name)?,
            Some(other) => {
                return Err(SdfError::UnknownOperation {
                    name: canonical_string(other),
                })
            }
        };

        let facing = optional_str(data.get("facing"), "facing")?
            .map(Facing::resolve)
            .transpose()?;

        let item_suffix = ItemSuffix::from_value(data.get("item_suffix"))?;

        let mut context = Context {
            x: optional_i64(data.get("x"), "x")?,
            y: optional_i64(data.get("y"), "y")?,
            z: optional_i64(data.get("z"), "z")?,
            material: optional_str(data.get("material"), "material")?.map(str::to_string),
            operation,
            facing,
            values: mapping_or_empty(data.get("values"), "values")?,
            meta: mapping_or_empty(data.get("meta"), "meta")?,
            item_suffix,
            children: Vec::new(),
        };

        if let Some(items) = data.get("items").filter(|v| !v.is_null()) {
            for entry in expect_sequence(items, "items")? {
                let child = context.parse_child(entry)?;
                context.children.push(child);
            }
        }

        Ok(context)
    }

    fn parse_child(&self, entry: &Value) -> Result<Child> {
        match entry {
            Value::String(record) => Item::parse(record, &self.item_suffix).map(Child::Item),
            Value::Mapping(_) => unwrap_context(entry).and_then(Context::parse).map(Child::Context),
            other => Err(SdfError::wrong_type(
                "items[]",
                "an item string or a context mapping",
                other,
            )),
        }
    }

    /// Item children of this context only (nested contexts are skipped)
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.children.iter().filter_map(|child| match child {
            Child::Item(item) => Some(item),
            Child::Context(_) => None,
        })
    }

    /// Nested contexts directly under this one
    pub fn contexts(&self) -> impl Iterator<Item = &Context> {
        self.children.iter().filter_map(|child| match child {
            Child::Context(context) => Some(context),
            Child::Item(_) => None,
        })
    }

    /// Number of items in this subtree, at any depth
    pub fn item_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| match child {
                Child::Item(_) => 1,
                Child::Context(context) => context.item_count(),
            })
            .sum()
    }

    /// Number of contexts in this subtree, including this one
    pub fn context_count(&self) -> usize {
        1 + self.contexts().map(Context::context_count).sum::<usize>()
    }
}

/// Unwrap a `{context: {...}}` wrapper
pub(crate) fn unwrap_context(entry: &Value) -> Result<&Value> {
    let wrapper = entry
        .as_mapping()
        .ok_or_else(|| SdfError::malformed("expected a {context: ...} mapping"))?;

    if wrapper.len() != 1 {
        return Err(SdfError::malformed(format!(
            "expected exactly one \"{}\" key, found {} keys",
            CONTEXT_KEY,
            wrapper.len()
        )));
    }

    wrapper.get(CONTEXT_KEY).ok_or_else(|| {
        let key = wrapper
            .keys()
            .next()
            .map(canonical_string)
            .unwrap_or_default();
        SdfError::malformed(format!("expected \"{}\" but got \"{}\"", CONTEXT_KEY, key))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{SuffixField, SuffixValue};
    use pretty_assertions::assert_eq;

    fn parse(src: &str) -> Result<Context> {
        let value: Value = serde_yaml::from_str(src).unwrap();
        Context::parse(&value)
    }

    #[test]
    fn test_defaults() {
        let context = parse("{}").unwrap();
        assert_eq!(context, Context::default());
        assert_eq!(context.operation, BlockOperation::Replace);
        assert!(context.material.is_none());
        assert!(context.facing.is_none());
    }

    #[test]
    fn test_full_context() {
        let context = parse(
            r#"
x: 1
y: 2
z: -3
material: wool.red
operation: Keep
facing: N
values: {power: 15}
meta: {label: base}
item_suffix: [facing]
items:
  - 0,0,0
  - 1,0,0,S
"#,
        )
        .unwrap();

        assert_eq!((context.x, context.y, context.z), (1, 2, -3));
        assert_eq!(context.material.as_deref(), Some("wool.red"));
        assert_eq!(context.operation, BlockOperation::Keep);
        assert_eq!(context.facing, Some(Facing::North));
        assert_eq!(context.values.len(), 1);
        assert_eq!(context.item_suffix.fields(), &[SuffixField::Facing]);
        assert_eq!(context.children.len(), 2);

        let items: Vec<&Item> = context.items().collect();
        assert_eq!(items[1].suffix, vec![SuffixValue::Facing(Facing::South)]);
    }

    #[test]
    fn test_nested_contexts_keep_order() {
        let context = parse(
            r#"
items:
  - 0,0,0
  - context:
      x: 5
      items:
        - 1,1,1
        - context:
            y: 1
            items: ["0,0,0"]
  - 2,0,0
"#,
        )
        .unwrap();

        assert!(matches!(context.children[0], Child::Item(_)));
        assert!(matches!(context.children[1], Child::Context(_)));
        assert!(matches!(context.children[2], Child::Item(_)));
        assert_eq!(context.item_count(), 4);
        assert_eq!(context.context_count(), 3);
    }

    #[test]
    fn test_nested_context_uses_own_suffix() {
        let err = parse(
            r#"
item_suffix: [material]
items:
  - context:
      items: ["0,0,0,stone"]
"#,
        )
        .unwrap_err();
        assert!(matches!(err, SdfError::UnexpectedSuffix { .. }));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert_eq!(
            parse("{colour: red}").unwrap_err(),
            SdfError::InvalidKey {
                scope: "context",
                key: "colour".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_operation() {
        assert_eq!(
            parse("{operation: Smash}").unwrap_err(),
            SdfError::UnknownOperation {
                name: "Smash".to_string()
            }
        );
    }

    #[test]
    fn test_operation_present_but_not_a_name() {
        assert_eq!(
            parse("{operation: ~, items: ['0,0,0']}").unwrap_err(),
            SdfError::UnknownOperation {
                name: "null".to_string()
            }
        );
        assert_eq!(
            parse("{operation: 3}").unwrap_err(),
            SdfError::UnknownOperation {
                name: "3".to_string()
            }
        );
        // a null facing still means no facing
        assert_eq!(parse("{facing: ~}").unwrap().facing, None);
    }

    #[test]
    fn test_bad_suffix_field() {
        assert!(matches!(
            parse("{item_suffix: [facing, colour]}").unwrap_err(),
            SdfError::InvalidSuffixField { .. }
        ));
    }

    #[test]
    fn test_bad_nested_wrapper() {
        assert!(matches!(
            parse("{items: [{ctx: {}}]}").unwrap_err(),
            SdfError::MalformedStructure { .. }
        ));
        assert!(matches!(
            parse("{items: [{context: {}, extra: 1}]}").unwrap_err(),
            SdfError::MalformedStructure { .. }
        ));
    }

    #[test]
    fn test_wrong_types() {
        assert!(matches!(
            parse("{x: left}").unwrap_err(),
            SdfError::WrongType { .. }
        ));
        assert!(matches!(
            parse("{items: [7]}").unwrap_err(),
            SdfError::WrongType { .. }
        ));
        assert!(matches!(
            parse("{values: [1, 2]}").unwrap_err(),
            SdfError::WrongType { .. }
        ));
    }
}
