//! Module documentation for generated clients.
//!
//! [`ModuleDocBuilder`] produces the `//!` header of a generated file: an
//! introduction naming the API, a summary of what was generated, the retry
//! behavior baked into the client, and a short usage example.

use clientgen_define::{Document, HttpMethod, Operation};
use proc_macro2::TokenStream;
use quote::quote;

use super::pagination::PaginationClassifier;
use crate::config::GeneratorConfig;

/// Builds the module-level documentation of a generated client.
///
/// ## Examples
///
/// ```ignore
/// let builder = ModuleDocBuilder::new(&doc, &config, &LimitOffsetClassifier);
/// let doc_tokens = builder.build();
/// ```
pub struct ModuleDocBuilder<'a> {
    doc: &'a Document,
    config: &'a GeneratorConfig,
    classifier: &'a dyn PaginationClassifier,
}

impl<'a> ModuleDocBuilder<'a> {
    /// Creates a builder for the given document and settings.
    pub fn new(
        doc: &'a Document,
        config: &'a GeneratorConfig,
        classifier: &'a dyn PaginationClassifier,
    ) -> Self {
        Self {
            doc,
            config,
            classifier,
        }
    }

    /// Builds the documentation as `#![doc = "..."]` attributes, one per line.
    pub fn build(&self) -> TokenStream {
        let mut lines = self.intro_section();
        lines.push(String::new());
        lines.extend(self.contents_section());
        lines.push(String::new());
        lines.extend(self.retry_section());
        lines.push(String::new());
        lines.extend(self.example_section());

        let lines = lines.into_iter().map(|line| {
            if line.is_empty() {
                line
            } else {
                format!(" {line}")
            }
        });

        quote! {
            #(#![doc = #lines])*
        }
    }

    fn is_paginated(&self, method: HttpMethod, op: &Operation) -> bool {
        method != HttpMethod::Head && self.classifier.is_paginated(op)
    }

    fn intro_section(&self) -> Vec<String> {
        let info = &self.doc.info;
        let name = match (info.title.is_empty(), info.version.is_empty()) {
            (true, _) => "the API".to_string(),
            (false, true) => info.title.clone(),
            (false, false) => format!("{} (version {})", info.title, info.version),
        };
        vec![format!("HTTP client for {name}.")]
    }

    fn contents_section(&self) -> Vec<String> {
        let types = self.doc.schemas().len();
        let (paginated, plain) = self
            .doc
            .operations()
            .fold((0usize, 0usize), |(paged, plain), (_, method, op)| {
                if self.is_paginated(method, op) {
                    (paged + 1, plain)
                } else {
                    (paged, plain + 1)
                }
            });

        vec![
            "## Contents".to_string(),
            String::new(),
            format!("- {types} data types"),
            format!("- {plain} endpoint methods"),
            format!("- {paginated} paginated endpoint methods"),
        ]
    }

    fn retry_section(&self) -> Vec<String> {
        let attempts = self.config.max_attempts;
        let unit = self.config.backoff_unit.as_millis();
        vec![
            "## Retries".to_string(),
            String::new(),
            format!(
                "Connection failures and 5xx responses are retried up to {attempts} attempts in total,"
            ),
            format!("waiting {unit}ms times the attempt number between attempts."),
            "A 4xx response, or a 5xx response on the last attempt, is returned as".to_string(),
            "`ClientError::Status` with its status code and body.".to_string(),
        ]
    }

    fn example_section(&self) -> Vec<String> {
        let client = &self.config.client_name;
        let first_call = self
            .doc
            .operations()
            .find(|(_, method, op)| *method != HttpMethod::Head && !self.is_paginated(*method, op))
            .map(|(path, method, _)| crate::naming::function_name(method, path));

        let mut lines = vec![
            "## Example".to_string(),
            String::new(),
            "```ignore".to_string(),
            format!("let mut client = {client}::new();"),
            "client.set_auth_token(\"token\");".to_string(),
            "let ctx = RequestContext::new();".to_string(),
        ];
        if let Some(call) = first_call {
            lines.push(format!(
                "let response: serde_json::Value = client.{call}(&ctx, &serde_json::json!({{}})).await?;"
            ));
        }
        lines.push("```".to_string());
        lines
    }
}
