//! Schema nodes describing request and response data shapes.
//!
//! Only the handful of keywords the generator understands are modeled:
//! `type`, `properties`, and `items`. Everything else in a schema object
//! (`$ref`, `format`, `required`, ...) is ignored when deserializing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The `type` tag of a schema node.
///
/// Unrecognized tags deserialize to [`SchemaKind::Other`] instead of failing,
/// so any document that parses at all can be mapped.
///
/// ## Examples
///
/// ```
/// use std::str::FromStr;
/// use clientgen_define::SchemaKind;
///
/// assert_eq!(SchemaKind::from_str("integer").unwrap(), SchemaKind::Integer);
/// assert_eq!(SchemaKind::Boolean.to_string(), "boolean");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SchemaKind {
    /// A JSON object with named properties.
    Object,
    /// A JSON array with a single element schema.
    Array,
    /// A JSON string.
    String,
    /// A JSON integer.
    Integer,
    /// A JSON boolean.
    Boolean,
    /// A JSON number (floating point). Not mapped to a primitive.
    Number,
    /// Any other tag (`null`, vendor extensions, ...).
    #[serde(other)]
    #[strum(disabled)]
    Other,
}

/// A schema node from the document's `components.schemas` section.
///
/// `properties` is a `BTreeMap`, so property iteration order is sorted and
/// therefore identical across runs.
///
/// ## Examples
///
/// ```
/// use clientgen_define::{Schema, SchemaKind};
///
/// let person = Schema::object()
///     .with_property("name", Schema::string())
///     .with_property("age", Schema::integer());
///
/// assert_eq!(person.kind, Some(SchemaKind::Object));
/// let names: Vec<_> = person.properties.keys().collect();
/// assert_eq!(names, ["age", "name"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// The `type` tag; `None` when the document leaves it unset.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SchemaKind>,
    /// Child schemas for `object` kinds.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    /// Element schema for `array` kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
}

impl Schema {
    /// Creates a schema with the given kind and no children.
    pub fn of_kind(kind: SchemaKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Creates a schema with no `type` tag.
    pub fn untyped() -> Self {
        Self::default()
    }

    /// Creates an `object` schema with no properties.
    pub fn object() -> Self {
        Self::of_kind(SchemaKind::Object)
    }

    /// Creates an `array` schema with the given element schema.
    ///
    /// ## Examples
    ///
    /// ```
    /// use clientgen_define::{Schema, SchemaKind};
    ///
    /// let tags = Schema::array(Schema::string());
    /// assert_eq!(tags.items.unwrap().kind, Some(SchemaKind::String));
    /// ```
    pub fn array(items: Schema) -> Self {
        Self {
            kind: Some(SchemaKind::Array),
            properties: BTreeMap::new(),
            items: Some(Box::new(items)),
        }
    }

    /// Creates a `string` schema.
    pub fn string() -> Self {
        Self::of_kind(SchemaKind::String)
    }

    /// Creates an `integer` schema.
    pub fn integer() -> Self {
        Self::of_kind(SchemaKind::Integer)
    }

    /// Creates a `boolean` schema.
    pub fn boolean() -> Self {
        Self::of_kind(SchemaKind::Boolean)
    }

    /// Adds (or replaces) a property.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    /// Returns `true` if the schema's kind tag equals `kind`.
    pub fn is(&self, kind: SchemaKind) -> bool {
        self.kind == Some(kind)
    }
}
