//! Per-operation method generation.
//!
//! Every `(path, method)` pair in the document becomes one async method on
//! the generated client. Two shapes exist:
//!
//! - **plain**: `fn(&self, ctx, body) -> Result<R, ClientError>`. Query
//!   parameters are read from same-named fields of the serialized body.
//! - **paginated**: adds explicit `limit`/`offset` arguments and returns a
//!   `PaginatedResponse<T>`. Only `limit` and `offset` go in the query.
//! - **head**: `HEAD` responses have no body, so the method returns the
//!   status code instead of decoding.
//!
//! Both shapes send the request through `execute_with_retries` with the
//! client's retry policy and decode the response body as JSON.

use clientgen_define::{HttpMethod, Operation};
use proc_macro2::{Ident, Span, TokenStream};
use quote::{format_ident, quote};
use tracing::{debug, warn};

use super::pagination::PaginationClassifier;
use crate::naming::extract_path_params;

/// Generates the method for one operation, choosing the shape with
/// `classifier`.
pub fn generate_endpoint(
    name: &str,
    path: &str,
    method: HttpMethod,
    operation: &Operation,
    classifier: &dyn PaginationClassifier,
) -> TokenStream {
    let params = extract_path_params(path);
    if !params.is_empty() {
        warn!(
            %method,
            path,
            params = ?params,
            "path parameters are sent literally; substitute them in the base URL or path"
        );
    }

    if method == HttpMethod::Head {
        debug!(%method, path, function = name, "generating status-only endpoint");
        generate_head_endpoint(name, path, operation)
    } else if classifier.is_paginated(operation) {
        debug!(%method, path, function = name, "generating paginated endpoint");
        generate_paginated_endpoint(name, path, method, operation)
    } else {
        debug!(%method, path, function = name, "generating endpoint");
        generate_plain_endpoint(name, path, method, operation)
    }
}

/// Generates the plain method shape.
///
/// ## Examples
///
/// ```ignore
/// // GET /items with query parameter "q" generates:
/// pub async fn get_items<B, R>(&self, ctx: &RequestContext, body: &B) -> Result<R, ClientError>
/// where
///     B: serde::Serialize + ?Sized,
///     R: serde::de::DeserializeOwned,
/// {
///     let payload = serde_json::to_value(body).map_err(ClientError::Serialize)?;
///     let builder = self.request_builder(reqwest::Method::GET, "/items");
///     let builder = match query_value(&payload, "q") {
///         Some(value) => builder.query(&[("q", value)]),
///         None => builder,
///     };
///     self.send(builder, ctx).await
/// }
/// ```
pub fn generate_plain_endpoint(
    name: &str,
    path: &str,
    method: HttpMethod,
    operation: &Operation,
) -> TokenStream {
    let fn_name = Ident::new(name, Span::call_site());
    let docs = endpoint_docs(path, method, operation);
    let method_ident = method_ident(method);

    let query = QueryFromBody::new(operation);
    let uses_body = method.sends_body() || query.is_used();
    let body_arg = body_ident(uses_body);
    let payload = query.payload();
    let attach_body = attach_body(method);
    let attach_query = query.attachments();

    quote! {
        #docs
        pub async fn #fn_name<B, R>(
            &self,
            ctx: &RequestContext,
            #body_arg: &B,
        ) -> Result<R, ClientError>
        where
            B: serde::Serialize + ?Sized,
            R: serde::de::DeserializeOwned,
        {
            #payload
            let builder = self.request_builder(reqwest::Method::#method_ident, #path);
            #attach_body
            #attach_query
            self.send(builder, ctx).await
        }
    }
}

/// Generates the paginated method shape.
///
/// ## Examples
///
/// ```ignore
/// // GET /items with a "limit" parameter generates:
/// pub async fn get_items<B, T>(
///     &self,
///     ctx: &RequestContext,
///     _body: &B,
///     limit: u64,
///     offset: u64,
/// ) -> Result<PaginatedResponse<T>, ClientError>
/// where
///     B: serde::Serialize + ?Sized,
///     T: serde::de::DeserializeOwned,
/// {
///     let builder = self.request_builder(reqwest::Method::GET, "/items");
///     let builder = builder.query(&[("limit", limit), ("offset", offset)]);
///     self.send(builder, ctx).await
/// }
/// ```
pub fn generate_paginated_endpoint(
    name: &str,
    path: &str,
    method: HttpMethod,
    operation: &Operation,
) -> TokenStream {
    let fn_name = Ident::new(name, Span::call_site());
    let docs = endpoint_docs(path, method, operation);
    let method_ident = method_ident(method);
    let body_arg = body_ident(method.sends_body());
    let attach_body = attach_body(method);

    quote! {
        #docs
        pub async fn #fn_name<B, T>(
            &self,
            ctx: &RequestContext,
            #body_arg: &B,
            limit: u64,
            offset: u64,
        ) -> Result<PaginatedResponse<T>, ClientError>
        where
            B: serde::Serialize + ?Sized,
            T: serde::de::DeserializeOwned,
        {
            let builder = self.request_builder(reqwest::Method::#method_ident, #path);
            #attach_body
            let builder = builder.query(&[("limit", limit), ("offset", offset)]);
            self.send(builder, ctx).await
        }
    }
}

/// Generates the `HEAD` method shape.
///
/// Query parameters are read from the body as in the plain shape, but the
/// body itself is never sent and the response is not decoded.
///
/// ## Examples
///
/// ```ignore
/// pub async fn head_items<B>(&self, ctx: &RequestContext, _body: &B) -> Result<u16, ClientError>
/// where
///     B: serde::Serialize + ?Sized,
/// {
///     let builder = self.request_builder(reqwest::Method::HEAD, "/items");
///     self.send_for_status(builder, ctx).await
/// }
/// ```
pub fn generate_head_endpoint(name: &str, path: &str, operation: &Operation) -> TokenStream {
    let fn_name = Ident::new(name, Span::call_site());
    let docs = endpoint_docs(path, HttpMethod::Head, operation);
    let query = QueryFromBody::new(operation);
    let body_arg = body_ident(query.is_used());
    let payload = query.payload();
    let attach_query = query.attachments();

    quote! {
        #docs
        pub async fn #fn_name<B>(
            &self,
            ctx: &RequestContext,
            #body_arg: &B,
        ) -> Result<u16, ClientError>
        where
            B: serde::Serialize + ?Sized,
        {
            #payload
            let builder = self.request_builder(reqwest::Method::HEAD, #path);
            #attach_query
            self.send_for_status(builder, ctx).await
        }
    }
}

/// Query parameters whose values come from same-named body fields.
struct QueryFromBody<'a> {
    names: Vec<&'a str>,
}

impl<'a> QueryFromBody<'a> {
    fn new(operation: &'a Operation) -> Self {
        Self {
            names: operation
                .query_parameters()
                .map(|p| p.name.as_str())
                .collect(),
        }
    }

    fn is_used(&self) -> bool {
        !self.names.is_empty()
    }

    fn payload(&self) -> TokenStream {
        if self.is_used() {
            quote! {
                let payload = serde_json::to_value(body).map_err(ClientError::Serialize)?;
            }
        } else {
            quote! {}
        }
    }

    fn attachments(&self) -> TokenStream {
        let attach = self.names.iter().map(|param| {
            quote! {
                let builder = match query_value(&payload, #param) {
                    Some(value) => builder.query(&[(#param, value)]),
                    None => builder,
                };
            }
        });
        quote! { #(#attach)* }
    }
}

fn method_ident(method: HttpMethod) -> Ident {
    format_ident!("{}", method.to_string())
}

fn body_ident(used: bool) -> Ident {
    if used {
        format_ident!("body")
    } else {
        format_ident!("_body")
    }
}

fn attach_body(method: HttpMethod) -> TokenStream {
    if method.sends_body() {
        quote! {
            let builder =
                builder.body(serde_json::to_vec(body).map_err(ClientError::Serialize)?);
        }
    } else {
        quote! {}
    }
}

fn endpoint_docs(path: &str, method: HttpMethod, operation: &Operation) -> TokenStream {
    let signature = format!(" `{method} {path}`");
    match &operation.summary {
        Some(summary) => {
            let summary = format!(" {summary}");
            quote! {
                #[doc = #signature]
                #[doc = ""]
                #[doc = #summary]
            }
        }
        None => quote! { #[doc = #signature] },
    }
}

#[cfg(test)]
mod tests {
    use clientgen_define::Parameter;

    use super::*;
    use crate::codegen::pagination::LimitOffsetClassifier;

    /// Wraps a generated method in an impl block so it can be formatted.
    fn format(method: TokenStream) -> String {
        let tokens = quote! {
            impl ApiClient {
                #method
            }
        };
        crate::codegen::format_generated_code(&tokens)
            .expect("generated endpoint should be valid Rust")
    }

    #[test]
    fn get_without_query_ignores_body() {
        let code = format(generate_plain_endpoint(
            "get_items",
            "/items",
            HttpMethod::Get,
            &Operation::new(),
        ));

        assert!(code.contains("pub async fn get_items<B, R>"));
        assert!(code.contains("_body: &B"));
        assert!(code.contains("reqwest::Method::GET"));
        assert!(code.contains("\"/items\""));
        assert!(!code.contains("query"));
        assert!(!code.contains(".body("));
    }

    #[test]
    fn post_attaches_json_body() {
        let code = format(generate_plain_endpoint(
            "post_items",
            "/items",
            HttpMethod::Post,
            &Operation::new(),
        ));

        assert!(code.contains("body: &B"));
        assert!(!code.contains("_body"));
        assert!(code.contains("reqwest::Method::POST"));
        assert!(code.contains("serde_json::to_vec(body)"));
    }

    #[test]
    fn put_and_patch_send_body_but_delete_does_not() {
        for (method, sends) in [
            (HttpMethod::Put, true),
            (HttpMethod::Patch, true),
            (HttpMethod::Delete, false),
            (HttpMethod::Options, false),
        ] {
            let code = format(generate_plain_endpoint("op", "/x", method, &Operation::new()));
            assert_eq!(code.contains("serde_json::to_vec(body)"), sends, "{method}");
        }
    }

    #[test]
    fn query_parameters_read_from_body() {
        let op = Operation::new()
            .with_parameter(Parameter::query("q"))
            .with_parameter(Parameter::path("id"))
            .with_parameter(Parameter::query("sort"));

        let code = format(generate_plain_endpoint("get_search", "/search", HttpMethod::Get, &op));

        assert!(code.contains("serde_json::to_value(body)"));
        assert!(code.contains("query_value(&payload, \"q\")"));
        assert!(code.contains("query_value(&payload, \"sort\")"));
        assert!(!code.contains("\"id\""));
        assert!(code.find("\"q\"").unwrap() < code.find("\"sort\"").unwrap());
    }

    #[test]
    fn paginated_shape_takes_limit_and_offset() {
        let op = Operation::new()
            .with_parameter(Parameter::query("limit"))
            .with_parameter(Parameter::query("offset"))
            .with_parameter(Parameter::query("q"));

        let code = format(generate_paginated_endpoint("get_items", "/items", HttpMethod::Get, &op));

        assert!(code.contains("pub async fn get_items<B, T>"));
        assert!(code.contains("limit: u64"));
        assert!(code.contains("offset: u64"));
        assert!(code.contains("Result<PaginatedResponse<T>, ClientError>"));
        assert!(code.contains("(\"limit\", limit)"));
        assert!(code.contains("(\"offset\", offset)"));
        assert!(!code.contains("query_value"));
    }

    #[test]
    fn dispatch_uses_classifier() {
        let paged = Operation::new().with_parameter(Parameter::query("offset"));
        let plain = Operation::new().with_parameter(Parameter::query("page"));

        let paged_code = format(generate_endpoint(
            "get_a",
            "/a",
            HttpMethod::Get,
            &paged,
            &LimitOffsetClassifier,
        ));
        let plain_code = format(generate_endpoint(
            "get_b",
            "/b",
            HttpMethod::Get,
            &plain,
            &LimitOffsetClassifier,
        ));

        assert!(paged_code.contains("PaginatedResponse<T>"));
        assert!(!plain_code.contains("PaginatedResponse"));
        assert!(plain_code.contains("query_value(&payload, \"page\")"));
    }

    #[test]
    fn head_returns_status_without_decoding() {
        let op = Operation::new()
            .with_parameter(Parameter::query("limit"))
            .with_parameter(Parameter::query("offset"));

        let code = format(generate_endpoint(
            "head_items",
            "/items",
            HttpMethod::Head,
            &op,
            &LimitOffsetClassifier,
        ));

        assert!(code.contains("pub async fn head_items<B>"));
        assert!(code.contains("Result<u16, ClientError>"));
        assert!(code.contains("reqwest::Method::HEAD"));
        assert!(code.contains("self.send_for_status(builder, ctx).await"));
        assert!(code.contains("query_value(&payload, \"limit\")"));
        assert!(!code.contains("PaginatedResponse"));
        assert!(!code.contains("serde_json::to_vec(body)"));
        assert!(!code.contains("self.send(builder"));
    }

    #[test]
    fn head_without_query_ignores_body() {
        let code = format(generate_head_endpoint("head_items", "/items", &Operation::new()));

        assert!(code.contains("_body: &B"));
        assert!(!code.contains("serde_json::to_value"));
    }

    #[test]
    fn summary_becomes_doc_comment() {
        let op = Operation::new().with_summary("List all items");
        let code = format(generate_plain_endpoint("get_items", "/items", HttpMethod::Get, &op));

        assert!(code.contains("/// `GET /items`"));
        assert!(code.contains("/// List all items"));
    }

    #[tracing_test::traced_test]
    #[test]
    fn path_placeholders_are_warned_about() {
        let _ = generate_endpoint(
            "delete_users_by_id",
            "/users/{id}",
            HttpMethod::Delete,
            &Operation::new(),
            &LimitOffsetClassifier,
        );
        assert!(logs_contain("path parameters are sent literally"));
    }
}
