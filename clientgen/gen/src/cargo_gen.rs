//! Cargo.toml generation for a standalone client crate.
//!
//! A generated client file only depends on crates.io packages, so it can be
//! dropped into any crate that has them. This module writes a manifest with
//! exactly that dependency set, for users who want the client as its own
//! package.

use std::path::Path;

use tracing::info;

use crate::errors::GeneratorError;
use crate::output::write_atomic;

/// Dependencies the generated source refers to.
const DEPENDENCIES: &str = r#"[dependencies]
reqwest = { version = "0.12", default-features = false, features = ["json", "rustls-tls"] }
serde = { version = "1.0", features = ["derive"] }
serde_json = "1.0"
thiserror = "2.0"
tokio = { version = "1.43", features = ["macros", "time"] }
tokio-util = "0.7"
tracing = "0.1"
"#;

/// Returns the manifest for a generated client crate named `crate_name`.
///
/// The manifest declares an empty `[workspace]` table so the crate builds on
/// its own even when placed inside another workspace's directory tree.
///
/// ## Examples
///
/// ```
/// use clientgen_gen::cargo_gen::generate_cargo_toml;
///
/// let manifest = generate_cargo_toml("petstore-client");
/// assert!(manifest.contains("name = \"petstore-client\""));
/// assert!(manifest.contains("reqwest"));
/// ```
pub fn generate_cargo_toml(crate_name: &str) -> String {
    format!(
        r#"# This file was automatically generated by clientgen-gen. Do not edit manually.

[package]
name = "{crate_name}"
version = "0.1.0"
edition = "2024"

[lib]
path = "src/lib.rs"

{DEPENDENCIES}
[workspace]
"#
    )
}

/// Writes `Cargo.toml` into `crate_dir`.
///
/// In dry-run mode the manifest is printed instead.
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` if the file cannot be written.
pub fn write_cargo_toml(
    crate_dir: &Path,
    crate_name: &str,
    dry_run: bool,
) -> Result<(), GeneratorError> {
    let manifest = generate_cargo_toml(crate_name);
    let path = crate_dir.join("Cargo.toml");

    if dry_run {
        println!("=== {} ===\n{}", path.display(), manifest);
    } else {
        write_atomic(&path, &manifest)?;
        info!(path = %path.display(), "wrote client manifest");
    }

    Ok(())
}
