//! Error and response wrapper generation.
//!
//! Generates the `ClientError` enum returned by every generated method and
//! the `PaginatedResponse<T>` envelope used by paginated methods.

use proc_macro2::TokenStream;
use quote::quote;

/// Generates the `ClientError` enum.
///
/// Variants:
///
/// - `Serialize`: the request body could not be serialized. Raised before
///   any network I/O.
/// - `Transport`: wraps the embedded transport's `TransportError`.
/// - `Status`: the final response had a 4xx or 5xx status. 4xx responses
///   are never retried; 5xx responses land here once retries run out.
/// - `Decode`: the response body was not the expected JSON. Carries the
///   response status.
///
/// ## Examples
///
/// ```ignore
/// let error_tokens = generate_error_type();
/// // Produces:
/// // #[derive(Debug, thiserror::Error)]
/// // pub enum ClientError {
/// //     #[error("Failed to serialize request body: {0}")]
/// //     Serialize(#[source] serde_json::Error),
/// //     ...
/// // }
/// ```
pub fn generate_error_type() -> TokenStream {
    quote! {
        /// Errors returned by generated API methods.
        #[derive(Debug, thiserror::Error)]
        pub enum ClientError {
            /// Failed to serialize the request body to JSON.
            #[error("Failed to serialize request body: {0}")]
            Serialize(#[source] serde_json::Error),

            /// The request could not be completed.
            #[error(transparent)]
            Transport(#[from] TransportError),

            /// The server answered with a 4xx or 5xx status.
            #[error("Server returned status {status}: {body}")]
            Status {
                /// HTTP status code of the response.
                status: u16,
                /// The response body as text.
                body: String,
            },

            /// The response body could not be decoded.
            #[error("Failed to decode response (status {status}): {source}")]
            Decode {
                /// HTTP status code of the response.
                status: u16,
                /// The JSON decoding error.
                #[source]
                source: serde_json::Error,
            },
        }
    }
}

/// Generates the `PaginatedResponse<T>` envelope.
///
/// Only `items` is expected; the metadata fields default to `None` when the
/// server omits them.
pub fn generate_paginated_response_type() -> TokenStream {
    quote! {
        /// One page of results from a paginated endpoint.
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        pub struct PaginatedResponse<T> {
            /// Items on this page.
            #[serde(default = "Vec::new")]
            pub items: Vec<T>,
            /// Total number of items, if the server reports it.
            #[serde(default)]
            pub total: Option<u64>,
            /// Page size echoed by the server.
            #[serde(default)]
            pub limit: Option<u64>,
            /// Page offset echoed by the server.
            #[serde(default)]
            pub offset: Option<u64>,
        }
    }
}
