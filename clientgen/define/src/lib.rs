//! clientgen Document Model
//!
//! This crate provides the in-memory model of an OpenAPI-style API
//! description consumed by the `clientgen-gen` code generator. It covers the
//! simple schema/path/operation subset the generator understands; anything
//! else in a document is ignored while loading.
//!
//! ## Core Types
//!
//! - [`Document`] - Named schemas plus path items keyed by URL path
//! - [`Schema`] / [`SchemaKind`] - Data shapes (`object`, `array`, primitives)
//! - [`PathItem`] - Operations bound to one URL path, one per [`HttpMethod`]
//! - [`Operation`] - Ordered [`Parameter`]s and an optional summary
//! - [`ParameterLocation`] - `query`, `path`, `header`, `cookie`
//!
//! ## Examples
//!
//! ```
//! use clientgen_define::{Document, HttpMethod, Operation, PathItem, Schema};
//!
//! let doc = Document::new()
//!     .with_schema("Item", Schema::object().with_property("id", Schema::integer()))
//!     .with_path(
//!         "/items",
//!         PathItem::new().with_operation(HttpMethod::Get, Operation::new()),
//!     );
//!
//! assert_eq!(doc.schemas().len(), 1);
//! ```
//!
//! Documents can also be read from JSON or YAML with [`Document::load`].

pub mod error;
pub mod load;
pub mod schema;
pub mod types;

pub use error::DefineError;
pub use schema::{Schema, SchemaKind};
pub use types::{
    Components, Document, HttpMethod, Info, Operation, Parameter, ParameterLocation, PathItem,
    Server,
};
