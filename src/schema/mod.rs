//! Structural validation of option objects before they touch the registry.
//!
//! Candidate data is viewed as a [`serde_json::Value`] and checked against one
//! of the fixed schemas (`element`, `style`, `shadow`, `outline`). Checking is
//! existence-gated: only keys present in the candidate are examined, keys the
//! schema declares but the candidate omits are never required, and keys the
//! schema does not know are ignored. An empty object therefore validates as
//! any schema, which is what makes every style field optional.

pub mod predicates;

use serde_json::Value;
use thiserror::Error;

/// Primitive type tags a schema field can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    /// Non-negative integer
    Nat,
    /// Non-empty string
    Str,
    /// Accepted without inspection
    Bool,
    /// `#RGB` or `#RRGGBB`
    Color,
    /// Finite number no greater than the surface width
    PosX,
    /// Finite number no greater than the surface height
    PosY,
    /// `left`, `center` or `right`
    Align,
    /// Non-negative integer naming a live element
    Id,
    /// `shape`, `image` or `text`
    Element,
    /// Anything
    Any,
}

impl TypeTag {
    pub fn name(self) -> &'static str {
        match self {
            TypeTag::Nat => "Nat",
            TypeTag::Str => "Str",
            TypeTag::Bool => "Bool",
            TypeTag::Color => "Color",
            TypeTag::PosX => "PosX",
            TypeTag::PosY => "PosY",
            TypeTag::Align => "Align",
            TypeTag::Id => "Id",
            TypeTag::Element => "Element",
            TypeTag::Any => "Any",
        }
    }
}

/// The process-wide schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaName {
    Element,
    Style,
    Shadow,
    Outline,
}

/// How a single schema field is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSpec {
    Primitive(TypeTag),
    Nested(SchemaName),
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub spec: FieldSpec,
}

const fn field(name: &'static str, tag: TypeTag) -> Field {
    Field {
        name,
        spec: FieldSpec::Primitive(tag),
    }
}

const fn nested(name: &'static str, schema: SchemaName) -> Field {
    Field {
        name,
        spec: FieldSpec::Nested(schema),
    }
}

const ELEMENT_FIELDS: &[Field] = &[
    field("id", TypeTag::Id),
    field("zindex", TypeTag::Nat),
    field("resource", TypeTag::Any),
    field("width", TypeTag::Nat),
    field("height", TypeTag::Nat),
    field("x", TypeTag::PosX),
    field("y", TypeTag::PosY),
    nested("style", SchemaName::Style),
    field("type", TypeTag::Element),
    field("fixed", TypeTag::Bool),
];

const STYLE_FIELDS: &[Field] = &[
    field("font", TypeTag::Str),
    field("color", TypeTag::Color),
    field("fontSize", TypeTag::Nat),
    field("fontType", TypeTag::Str),
    field("lineHeight", TypeTag::Nat),
    field("textAlign", TypeTag::Align),
    nested("shadow", SchemaName::Shadow),
    nested("outline", SchemaName::Outline),
];

const SHADOW_FIELDS: &[Field] = &[
    field("x", TypeTag::PosX),
    field("y", TypeTag::PosY),
    field("color", TypeTag::Color),
    field("blur", TypeTag::Nat),
];

const OUTLINE_FIELDS: &[Field] = &[
    field("color", TypeTag::Color),
    field("thickness", TypeTag::Nat),
];

impl SchemaName {
    pub fn name(self) -> &'static str {
        match self {
            SchemaName::Element => "element",
            SchemaName::Style => "style",
            SchemaName::Shadow => "shadow",
            SchemaName::Outline => "outline",
        }
    }

    pub fn fields(self) -> &'static [Field] {
        match self {
            SchemaName::Element => ELEMENT_FIELDS,
            SchemaName::Style => STYLE_FIELDS,
            SchemaName::Shadow => SHADOW_FIELDS,
            SchemaName::Outline => OUTLINE_FIELDS,
        }
    }

    pub fn field(self, name: &str) -> Option<&'static Field> {
        self.fields().iter().find(|f| f.name == name)
    }
}

/// What the surface-dependent tags need to know.
pub trait ValidationContext {
    fn surface_width(&self) -> f64;
    fn surface_height(&self) -> f64;
    /// Whether `id` currently names an element in the registry.
    fn is_live(&self, id: u64) -> bool;
}

/// Why a candidate failed validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("field `{path}` is not a valid {expected}")]
    InvalidField { path: String, expected: &'static str },

    #[error("expected a keyed structure for schema `{schema}`")]
    NotAnObject { schema: &'static str },
}

/// Checks `value` against `schema`, stopping at the first present key that fails.
pub fn check(
    value: &Value,
    schema: SchemaName,
    ctx: &dyn ValidationContext,
) -> Result<(), SchemaError> {
    let Some(object) = value.as_object() else {
        return Err(SchemaError::NotAnObject {
            schema: schema.name(),
        });
    };
    check_object(object, schema, ctx, "")
}

/// Boolean form of [`check`].
pub fn validates(value: &Value, schema: SchemaName, ctx: &dyn ValidationContext) -> bool {
    check(value, schema, ctx).is_ok()
}

fn check_object(
    object: &serde_json::Map<String, Value>,
    schema: SchemaName,
    ctx: &dyn ValidationContext,
    prefix: &str,
) -> Result<(), SchemaError> {
    for (key, value) in object {
        let Some(field) = schema.field(key) else {
            continue;
        };
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        match field.spec {
            FieldSpec::Nested(inner) => match value.as_object() {
                Some(inner_object) => check_object(inner_object, inner, ctx, &path)?,
                None => {
                    return Err(SchemaError::InvalidField {
                        path,
                        expected: inner.name(),
                    });
                }
            },
            FieldSpec::Primitive(tag) => {
                if !is_of_type(tag, value, ctx) {
                    return Err(SchemaError::InvalidField {
                        path,
                        expected: tag.name(),
                    });
                }
            }
        }
    }
    Ok(())
}

/// Checks a single value against a primitive tag.
pub fn is_of_type(tag: TypeTag, value: &Value, ctx: &dyn ValidationContext) -> bool {
    match tag {
        TypeTag::Nat => predicates::is_nat(value),
        TypeTag::Str => predicates::is_str(value),
        TypeTag::Bool | TypeTag::Any => true,
        TypeTag::Color => predicates::is_color(value),
        TypeTag::PosX => predicates::is_position(value, ctx.surface_width()),
        TypeTag::PosY => predicates::is_position(value, ctx.surface_height()),
        TypeTag::Align => predicates::is_align(value),
        TypeTag::Id => predicates::as_nat(value).is_some_and(|id| ctx.is_live(id)),
        TypeTag::Element => predicates::is_element_kind(value),
    }
}
