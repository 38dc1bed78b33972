//! clientgen code generator library.
//!
//! This crate generates typed async Rust HTTP clients from API documents
//! loaded with `clientgen-define`. The generated code includes:
//!
//! - The retry transport (`execute_with_retries`, `RetryPolicy`, `RequestContext`)
//! - A `ClientError` type and a `PaginatedResponse<T>` envelope
//! - A client struct with constructors and a bearer credential setter
//! - One struct per named schema
//! - One async method per operation, paginated where the operation takes
//!   `limit`/`offset`
//!
//! ## Modules
//!
//! - [`codegen`] - Code generation for individual components
//! - [`output`] - Final assembly, validation, and file writing
//! - [`cargo_gen`] - Cargo.toml generation for a standalone client crate
//! - [`config`] - Generation settings
//! - [`naming`] - Identifier derivation
//! - [`validation`] - Pre-generation checks
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use clientgen_define::Document;
//! use clientgen_gen::config::GeneratorConfig;
//! use clientgen_gen::output::generate_and_write;
//!
//! let doc = Document::load(Path::new("petstore.yaml")).unwrap();
//! let config = GeneratorConfig::default().with_client_name("PetStore");
//!
//! // dry_run=true prints instead of writing
//! let code = generate_and_write(&doc, &config, Path::new("src/client.rs"), true).unwrap();
//! println!("{}", code);
//! ```
//!
//! ## Generated Code Structure
//!
//! For a document with schema `Item` and operations `GET /items` and
//! `GET /items/page?limit&offset`:
//!
//! ```text
//! pub struct RetryPolicy { ... }
//! pub async fn execute_with_retries(...) -> Result<reqwest::Response, TransportError>;
//!
//! pub enum ClientError { Serialize(..), Transport(..), Status { .. }, Decode { .. } }
//! pub struct PaginatedResponse<T> { pub items: Vec<T>, ... }
//!
//! pub struct ApiClient { ... }
//!
//! pub struct Item { ... }
//!
//! impl ApiClient {
//!     pub async fn get_items<B, R>(&self, ctx: &RequestContext, body: &B) -> Result<R, ClientError>;
//!     pub async fn get_items_page<B, T>(&self, ctx: &RequestContext, body: &B, limit: u64, offset: u64)
//!         -> Result<PaginatedResponse<T>, ClientError>;
//! }
//! ```

pub mod cargo_gen;
pub mod codegen;
pub mod config;
pub mod errors;
pub mod naming;
pub mod output;
pub mod validation;
