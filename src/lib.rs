//! Assemble a Swagger 2.0 document from documentation blocks scattered
//! across source comments.
//!
//! API authors keep fragments of their Swagger documentation next to the
//! code it describes, between `@swg_begin` and `@swg_end` markers inside
//! any comment syntax. This library finds every fragment under the
//! registered folders and merges them into one document.
//!
//! # Block format
//!
//! The text between the markers must be a YAML mapping. Two keys are
//! structural and are stripped on the way into the document; everything
//! else passes through verbatim:
//!
//! - `path` + `method` mark an operation block. The rest of the mapping
//!   becomes the operation object under `paths.<path>.<method>`.
//! - `definition` marks a schema block. The rest of the mapping becomes
//!   the schema under `definitions.<name>`.
//!
//! The fragment is handed to the YAML parser exactly as written, so it
//! must be plain YAML: docstrings and block comments work, per-line
//! comment prefixes do not.
//!
//! ```python
//! def list_snippets(request):
//!     """
//!     @swg_begin
//!     path: /snippets
//!     method: get
//!     summary: List all snippets
//!     responses:
//!       200:
//!         description: OK
//!     @swg_end
//!     """
//! ```
//!
//! # Architecture
//!
//! The pipeline runs in stages, each in its own module:
//!
//! 1. [`scanner`] - Recursively walks the registered folders in
//!    deterministic order
//! 2. [`extractor`] - Finds the marker-delimited fragments in each file
//! 3. [`classifier`] - Parses each fragment and types it as an operation
//!    or a definition
//! 4. [`assembler`] - Folds classified entries into a Swagger document,
//!    reporting conflicts
//! 5. [`serializer`] - Serializes the document to JSON or YAML
//!
//! The [`compiler`] module ties the stages together behind [`SwgCompiler`],
//! and [`diagnostics`] carries the non-fatal findings of a run.
//!
//! # Example Usage
//!
//! ```no_run
//! use swagger_from_comments::compiler::{CompileOptions, SwgCompiler};
//! use swagger_from_comments::assembler::Info;
//! use swagger_from_comments::serializer::serialize_json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut compiler = SwgCompiler::new().with_options(CompileOptions {
//!     info: Info {
//!         title: "Snippets API".to_string(),
//!         version: "1.0.0".to_string(),
//!         description: None,
//!     },
//!     ..CompileOptions::default()
//! });
//! compiler.add_folder("./api");
//!
//! let compilation = compiler.compile()?;
//! for diagnostic in &compilation.diagnostics {
//!     eprintln!("{}", diagnostic);
//! }
//! println!("{}", serialize_json(&compilation.document)?);
//! # Ok(())
//! # }
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module which provides a complete CLI application.
//!
//! [`SwgCompiler`]: compiler::SwgCompiler

pub mod assembler;
pub mod classifier;
pub mod cli;
pub mod compiler;
pub mod diagnostics;
pub mod error;
pub mod extractor;
pub mod scanner;
pub mod serializer;
