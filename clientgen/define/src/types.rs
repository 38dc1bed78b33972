//! Core types for API documents.
//!
//! - [`Document`] - The root of a parsed API description
//! - [`PathItem`] - The operations available on one URL path
//! - [`Operation`] - One HTTP-method-bound action with its parameters
//! - [`Parameter`] - A named parameter and where it is carried
//! - [`HttpMethod`] - HTTP method enumeration

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::schema::Schema;

/// HTTP methods an operation can be bound to.
///
/// ## Examples
///
/// ```
/// use std::str::FromStr;
/// use clientgen_define::HttpMethod;
///
/// assert_eq!(HttpMethod::from_str("DELETE").unwrap(), HttpMethod::Delete);
/// assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET - Retrieve a resource
    Get,
    /// HTTP POST - Create a new resource
    Post,
    /// HTTP PUT - Replace a resource entirely
    Put,
    /// HTTP PATCH - Partially update a resource
    Patch,
    /// HTTP DELETE - Remove a resource
    Delete,
    /// HTTP HEAD - Get headers only (no body)
    Head,
    /// HTTP OPTIONS - Get allowed methods for a resource
    Options,
}

impl HttpMethod {
    /// Returns `true` for methods whose generated callables send a JSON body.
    ///
    /// ```
    /// use clientgen_define::HttpMethod;
    ///
    /// assert!(HttpMethod::Post.sends_body());
    /// assert!(!HttpMethod::Get.sends_body());
    /// ```
    pub fn sends_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

/// Where a parameter is carried in the HTTP request (the `in` field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ParameterLocation {
    /// Query string entry.
    Query,
    /// Templated path segment.
    Path,
    /// Request header.
    Header,
    /// Cookie value.
    Cookie,
    /// Any other location.
    #[serde(other)]
    Other,
}

/// A declared operation parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name, matched case-sensitively.
    pub name: String,
    /// Where the parameter is carried.
    #[serde(rename = "in")]
    pub location: ParameterLocation,
}

impl Parameter {
    /// Creates a parameter at an arbitrary location.
    pub fn new(name: impl Into<String>, location: ParameterLocation) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }

    /// Creates a query parameter.
    pub fn query(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Query)
    }

    /// Creates a path parameter.
    pub fn path(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Path)
    }

    /// Creates a header parameter.
    pub fn header(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Header)
    }
}

/// One HTTP-method-bound action on a path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Short human-readable summary, used for generated doc comments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Optional identifier from the document. Not used for naming.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Declared parameters, in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
}

impl Operation {
    /// Creates an operation with no parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter.
    #[must_use]
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Sets the summary.
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Iterates over the parameters carried in the query string.
    pub fn query_parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters
            .iter()
            .filter(|p| p.location == ParameterLocation::Query)
    }
}

/// The operations declared for a single URL path.
///
/// Each method has its own slot, mirroring the document layout
/// (`get:`, `post:`, ...). Keys like `summary` or path-level `parameters`
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
}

impl PathItem {
    /// Creates a path item with no operations.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, method: HttpMethod) -> &Option<Operation> {
        match method {
            HttpMethod::Get => &self.get,
            HttpMethod::Post => &self.post,
            HttpMethod::Put => &self.put,
            HttpMethod::Patch => &self.patch,
            HttpMethod::Delete => &self.delete,
            HttpMethod::Head => &self.head,
            HttpMethod::Options => &self.options,
        }
    }

    fn slot_mut(&mut self, method: HttpMethod) -> &mut Option<Operation> {
        match method {
            HttpMethod::Get => &mut self.get,
            HttpMethod::Post => &mut self.post,
            HttpMethod::Put => &mut self.put,
            HttpMethod::Patch => &mut self.patch,
            HttpMethod::Delete => &mut self.delete,
            HttpMethod::Head => &mut self.head,
            HttpMethod::Options => &mut self.options,
        }
    }

    /// Sets the operation for `method`, replacing any previous one.
    #[must_use]
    pub fn with_operation(mut self, method: HttpMethod, operation: Operation) -> Self {
        *self.slot_mut(method) = Some(operation);
        self
    }

    /// Returns the operation bound to `method`, if any.
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        self.slot(method).as_ref()
    }

    /// Iterates over declared operations in [`HttpMethod`] declaration order.
    ///
    /// ## Examples
    ///
    /// ```
    /// use clientgen_define::{HttpMethod, Operation, PathItem};
    ///
    /// let item = PathItem::new()
    ///     .with_operation(HttpMethod::Delete, Operation::new())
    ///     .with_operation(HttpMethod::Get, Operation::new());
    ///
    /// let methods: Vec<_> = item.operations().map(|(m, _)| m).collect();
    /// assert_eq!(methods, [HttpMethod::Get, HttpMethod::Delete]);
    /// ```
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> {
        HttpMethod::iter().filter_map(|method| self.operation(method).map(|op| (method, op)))
    }
}

/// Document metadata (`info`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub version: String,
}

/// A server entry (`servers[]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    pub url: String,
}

/// Reusable document components. Only named schemas are read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub schemas: BTreeMap<String, Schema>,
}

/// A parsed API description.
///
/// ## Examples
///
/// ```
/// use clientgen_define::{Document, HttpMethod, Operation, Parameter, PathItem, Schema};
///
/// let doc = Document::new()
///     .with_schema(
///         "Person",
///         Schema::object()
///             .with_property("name", Schema::string())
///             .with_property("age", Schema::integer()),
///     )
///     .with_path(
///         "/people",
///         PathItem::new().with_operation(
///             HttpMethod::Get,
///             Operation::new().with_parameter(Parameter::query("limit")),
///         ),
///     );
///
/// assert_eq!(doc.schemas().len(), 1);
/// assert_eq!(doc.operations().count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub info: Info,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
    #[serde(default)]
    pub components: Components,
    #[serde(default)]
    pub paths: BTreeMap<String, PathItem>,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the document title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.info.title = title.into();
        self
    }

    /// Appends a server URL.
    #[must_use]
    pub fn with_server(mut self, url: impl Into<String>) -> Self {
        self.servers.push(Server { url: url.into() });
        self
    }

    /// Adds (or replaces) a named schema.
    #[must_use]
    pub fn with_schema(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.components.schemas.insert(name.into(), schema);
        self
    }

    /// Adds (or replaces) a path item.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>, item: PathItem) -> Self {
        self.paths.insert(path.into(), item);
        self
    }

    /// The named schemas, sorted by name.
    pub fn schemas(&self) -> &BTreeMap<String, Schema> {
        &self.components.schemas
    }

    /// Every `(path, method, operation)` triple, sorted by path and then by
    /// method declaration order.
    pub fn operations(&self) -> impl Iterator<Item = (&str, HttpMethod, &Operation)> {
        self.paths.iter().flat_map(|(path, item)| {
            item.operations()
                .map(move |(method, op)| (path.as_str(), method, op))
        })
    }

    /// The first server URL, if the document declares one.
    pub fn base_url(&self) -> Option<&str> {
        self.servers.first().map(|s| s.url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn http_method_display_uppercase() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Options.to_string(), "OPTIONS");
    }

    #[test]
    fn http_method_from_str_is_case_sensitive() {
        assert_eq!(HttpMethod::from_str("PUT").unwrap(), HttpMethod::Put);
        assert!(HttpMethod::from_str("put").is_err());
        assert!(HttpMethod::from_str("").is_err());
    }

    #[test]
    fn http_method_iter_all_variants() {
        assert_eq!(HttpMethod::iter().count(), 7);
    }

    #[test]
    fn only_post_put_patch_send_body() {
        let with_body: Vec<_> = HttpMethod::iter().filter(|m| m.sends_body()).collect();
        assert_eq!(
            with_body,
            [HttpMethod::Post, HttpMethod::Put, HttpMethod::Patch]
        );
    }

    #[test]
    fn parameter_location_unknown_is_other() {
        let param: Parameter =
            serde_json::from_str(r#"{"name": "x", "in": "matrix"}"#).unwrap();
        assert_eq!(param.location, ParameterLocation::Other);
    }

    #[test]
    fn query_parameters_keep_document_order() {
        let op = Operation::new()
            .with_parameter(Parameter::query("b"))
            .with_parameter(Parameter::header("x-trace"))
            .with_parameter(Parameter::query("a"));

        let names: Vec<_> = op.query_parameters().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn path_item_ignores_unknown_keys() {
        let item: PathItem = serde_json::from_str(
            r#"{"summary": "items", "parameters": [], "get": {}, "trace": {}}"#,
        )
        .unwrap();
        let methods: Vec<_> = item.operations().map(|(m, _)| m).collect();
        assert_eq!(methods, [HttpMethod::Get]);
    }

    #[test]
    fn document_operations_sorted_by_path() {
        let doc = Document::new()
            .with_path(
                "/b",
                PathItem::new().with_operation(HttpMethod::Get, Operation::new()),
            )
            .with_path(
                "/a",
                PathItem::new()
                    .with_operation(HttpMethod::Post, Operation::new())
                    .with_operation(HttpMethod::Get, Operation::new()),
            );

        let seen: Vec<_> = doc.operations().map(|(p, m, _)| (p, m)).collect();
        assert_eq!(
            seen,
            [
                ("/a", HttpMethod::Get),
                ("/a", HttpMethod::Post),
                ("/b", HttpMethod::Get)
            ]
        );
    }

    #[test]
    fn base_url_from_first_server() {
        let doc = Document::new()
            .with_server("https://api.example.com")
            .with_server("https://backup.example.com");
        assert_eq!(doc.base_url(), Some("https://api.example.com"));
        assert_eq!(Document::new().base_url(), None);
    }
}
