//! Client struct generation.
//!
//! Generates the client struct every endpoint method hangs off, with its
//! constructors, retry policy, bearer credential, and the request helpers
//! (`request_builder`, `send`, `send_for_status`) that generated methods
//! call.

use std::time::Duration;

use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};

use crate::config::GeneratorConfig;

/// Generates the client struct and its inherent helpers.
///
/// `base_url` is baked into the `BASE_URL` constant; the retry budget and
/// backoff unit come from `config`.
///
/// ## Examples
///
/// ```ignore
/// // Generated code (abridged):
/// #[derive(Debug, Clone)]
/// pub struct ApiClient {
///     client: reqwest::Client,
///     base_url: String,
///     retry_policy: RetryPolicy,
///     auth_token: Option<String>,
/// }
///
/// impl ApiClient {
///     pub const BASE_URL: &'static str = "https://api.example.com";
///     pub fn new() -> Self { ... }
///     pub fn with_base_url(base_url: impl Into<String>) -> Self { ... }
///     pub fn set_auth_token(&mut self, token: impl Into<String>) { ... }
///     pub async fn send<R>(&self, builder: reqwest::RequestBuilder, ctx: &RequestContext)
///         -> Result<R, ClientError> { ... }
/// }
/// ```
pub fn generate_client_struct(config: &GeneratorConfig, base_url: &str) -> TokenStream {
    let struct_name = format_ident!("{}", config.client_name);
    let max_attempts = Literal::u32_unsuffixed(config.max_attempts);
    let backoff = duration_tokens(config.backoff_unit);

    quote! {
        /// HTTP client for the API.
        ///
        /// Every request goes through `execute_with_retries` with this
        /// client's retry policy. A bearer credential set with
        /// `set_auth_token` is sent on every request.
        #[derive(Debug, Clone)]
        pub struct #struct_name {
            client: reqwest::Client,
            base_url: String,
            retry_policy: RetryPolicy,
            auth_token: Option<String>,
        }

        impl #struct_name {
            /// Base URL for the API.
            pub const BASE_URL: &'static str = #base_url;

            /// Creates a client with the default base URL.
            pub fn new() -> Self {
                Self::with_base_url(Self::BASE_URL)
            }

            /// Creates a client with a custom base URL.
            ///
            /// ## Examples
            ///
            /// ```ignore
            /// let client = ApiClient::with_base_url("http://localhost:8080");
            /// ```
            pub fn with_base_url(base_url: impl Into<String>) -> Self {
                Self {
                    client: reqwest::Client::new(),
                    base_url: base_url.into(),
                    retry_policy: Self::default_retry_policy(),
                    auth_token: None,
                }
            }

            /// Uses a preconfigured `reqwest::Client` (timeouts, proxies, ...).
            #[must_use]
            pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
                self.client = client;
                self
            }

            /// Overrides the retry policy.
            #[must_use]
            pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
                self.retry_policy = policy;
                self
            }

            /// The retry policy this client was generated with.
            pub fn default_retry_policy() -> RetryPolicy {
                RetryPolicy::new(#max_attempts, #backoff)
            }

            /// The base URL requests are sent to.
            pub fn base_url(&self) -> &str {
                &self.base_url
            }

            /// Sets the bearer credential sent with every request.
            pub fn set_auth_token(&mut self, token: impl Into<String>) {
                self.auth_token = Some(token.into());
            }

            /// Removes the bearer credential.
            pub fn clear_auth_token(&mut self) {
                self.auth_token = None;
            }

            fn apply_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
                match &self.auth_token {
                    Some(token) => builder.bearer_auth(token),
                    None => builder,
                }
            }

            /// Starts a JSON request to `path`, relative to the base URL.
            pub fn request_builder(
                &self,
                method: reqwest::Method,
                path: &str,
            ) -> reqwest::RequestBuilder {
                let url = format!("{}{}", self.base_url, path);
                let builder = self
                    .client
                    .request(method, url)
                    .header(reqwest::header::CONTENT_TYPE, "application/json");
                self.apply_auth(builder)
            }

            /// Sends a request with retries and decodes the JSON response.
            ///
            /// ## Errors
            ///
            /// Returns `ClientError::Transport` if the request could not be
            /// completed, `ClientError::Status` if the final response has a
            /// 4xx or 5xx status, or `ClientError::Decode` if the body is not
            /// valid JSON for `R`.
            pub async fn send<R>(
                &self,
                builder: reqwest::RequestBuilder,
                ctx: &RequestContext,
            ) -> Result<R, ClientError>
            where
                R: serde::de::DeserializeOwned,
            {
                let response = self.execute(builder, ctx).await?;
                Self::decode(response).await
            }

            /// Sends a request with retries and returns only the status.
            ///
            /// Used for responses that carry no body, such as `HEAD`.
            ///
            /// ## Errors
            ///
            /// Returns `ClientError::Transport` if the request could not be
            /// completed, or `ClientError::Status` if the final response has
            /// a 4xx or 5xx status.
            pub async fn send_for_status(
                &self,
                builder: reqwest::RequestBuilder,
                ctx: &RequestContext,
            ) -> Result<u16, ClientError> {
                let response = self.execute(builder, ctx).await?;
                Ok(response.status().as_u16())
            }

            async fn execute(
                &self,
                builder: reqwest::RequestBuilder,
                ctx: &RequestContext,
            ) -> Result<reqwest::Response, ClientError> {
                let request = builder.build().map_err(TransportError::from)?;
                let response =
                    execute_with_retries(&self.client, request, &self.retry_policy, ctx).await?;
                Self::check_status(response).await
            }

            async fn check_status(
                response: reqwest::Response,
            ) -> Result<reqwest::Response, ClientError> {
                let status = response.status();
                if status.is_client_error() || status.is_server_error() {
                    let body = response.text().await.map_err(TransportError::from)?;
                    return Err(ClientError::Status {
                        status: status.as_u16(),
                        body,
                    });
                }
                Ok(response)
            }

            async fn decode<R>(response: reqwest::Response) -> Result<R, ClientError>
            where
                R: serde::de::DeserializeOwned,
            {
                let status = response.status().as_u16();
                let bytes = response.bytes().await.map_err(TransportError::from)?;
                serde_json::from_slice(&bytes).map_err(|source| ClientError::Decode { status, source })
            }
        }

        impl Default for #struct_name {
            fn default() -> Self {
                Self::new()
            }
        }
    }
}

/// Emits `std::time::Duration::new(secs, nanos)` for an exact duration.
fn duration_tokens(duration: Duration) -> TokenStream {
    let secs = Literal::u64_unsuffixed(duration.as_secs());
    let nanos = Literal::u32_unsuffixed(duration.subsec_nanos());
    quote! { std::time::Duration::new(#secs, #nanos) }
}
