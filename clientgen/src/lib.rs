//! clientgen Runtime
//!
//! The retry transport shared by every client `clientgen-gen` produces.
//! The transport module is compiled here so it can be tested against a real
//! HTTP server, and its source text is exported as [`TRANSPORT_SOURCE`] so
//! the generator can embed it into generated clients.
//!
//! ## Examples
//!
//! ```no_run
//! use clientgen::{RequestContext, RetryPolicy, execute_with_retries};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = reqwest::Client::new();
//! let request = client.get("http://localhost:8080/items").build()?;
//! let response =
//!     execute_with_retries(&client, request, &RetryPolicy::default(), &RequestContext::new())
//!         .await?;
//! println!("{}", response.status());
//! # Ok(())
//! # }
//! ```

pub mod transport;

pub use transport::{
    DEFAULT_BACKOFF_UNIT, DEFAULT_MAX_ATTEMPTS, RequestContext, RetryPolicy, TransportError,
    execute_with_retries, query_value,
};

/// Source text of the [`transport`] module, embedded into generated clients.
pub const TRANSPORT_SOURCE: &str = include_str!("transport.rs");
