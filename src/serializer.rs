//! Serialization of assembled Swagger documents to YAML or JSON.
//!
//! Block fragments are carried as parsed YAML values, so constructs JSON
//! cannot express directly (integer response codes such as `200`) are
//! stringified on the way out, which is what the Swagger tooling expects.

use anyhow::{Context, Result};
use clap::ValueEnum;
use log::debug;
use std::fs;
use std::path::Path;

use crate::assembler::SwaggerDocument;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// JSON format, pretty-printed
    #[default]
    Json,
    /// YAML format
    Yaml,
}

/// Renders a document in the requested format.
pub fn render(doc: &SwaggerDocument, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => serialize_json(doc),
        OutputFormat::Yaml => serialize_yaml(doc),
    }
}

/// Serializes a Swagger document to YAML.
///
/// # Errors
///
/// Returns an error if serialization fails.
///
/// # Example
///
/// ```
/// use swagger_from_comments::assembler::DocumentAssembler;
/// use swagger_from_comments::serializer::serialize_yaml;
///
/// let doc = DocumentAssembler::new().build();
/// let yaml = serialize_yaml(&doc).unwrap();
/// assert!(yaml.contains("swagger:"));
/// ```
pub fn serialize_yaml(doc: &SwaggerDocument) -> Result<String> {
    debug!("Serializing Swagger document to YAML");
    serde_yaml::to_string(doc).context("Failed to serialize Swagger document to YAML")
}

/// Serializes a Swagger document to JSON with pretty printing.
///
/// The output is formatted with indentation for readability, making it
/// suitable for human review and version control.
///
/// # Errors
///
/// Returns an error if serialization fails.
///
/// # Example
///
/// ```
/// use swagger_from_comments::assembler::DocumentAssembler;
/// use swagger_from_comments::serializer::serialize_json;
///
/// let doc = DocumentAssembler::new().build();
/// let json = serialize_json(&doc).unwrap();
/// assert!(json.contains("\"swagger\": \"2.0\""));
/// ```
pub fn serialize_json(doc: &SwaggerDocument) -> Result<String> {
    debug!("Serializing Swagger document to JSON");
    serde_json::to_string_pretty(doc).context("Failed to serialize Swagger document to JSON")
}

/// Writes string content to a file.
///
/// Creates the file if it doesn't exist, or overwrites it if it does.
/// Missing parent directories are created.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
