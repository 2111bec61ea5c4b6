use anyhow::Result;
use clap::Parser;
use log::{debug, info};
use std::path::PathBuf;

use crate::assembler::{ConflictPolicy, Info};
use crate::compiler::{CompileOptions, SwgCompiler};
use crate::serializer::OutputFormat;

/// Assemble a Swagger document from documentation blocks in source comments
#[derive(Parser, Debug)]
#[command(name = "swagger-from-comments")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Source folders to scan for documentation blocks
    #[arg(value_name = "FOLDER", required = true)]
    pub folders: Vec<PathBuf>,

    /// Output format (json or yaml)
    #[arg(short = 'f', long = "format", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// API title for the info section
    #[arg(long = "title", default_value = "Generated API")]
    pub title: String,

    /// API version for the info section
    #[arg(long = "api-version", default_value = "1.0.0", value_name = "VERSION")]
    pub api_version: String,

    /// API description for the info section
    #[arg(long = "description")]
    pub description: Option<String>,

    /// Host to record in the document, e.g. api.example.com
    #[arg(long = "host")]
    pub host: Option<String>,

    /// Base path to record in the document, e.g. /v1
    #[arg(long = "base-path", value_name = "PATH")]
    pub base_path: Option<String>,

    /// Only scan files with this extension (repeatable; default: all files)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Directory name to skip, in addition to the defaults (repeatable)
    #[arg(long = "exclude", value_name = "NAME")]
    pub excluded: Vec<String>,

    /// What to do when two blocks declare the same operation or definition
    #[arg(long = "on-conflict", value_enum, default_value = "overwrite")]
    pub on_conflict: ConflictPolicy,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl CliArgs {
    /// Translate the flags into library options.
    pub fn compile_options(&self) -> CompileOptions {
        let mut options = CompileOptions {
            info: Info {
                title: self.title.clone(),
                version: self.api_version.clone(),
                description: self.description.clone(),
            },
            host: self.host.clone(),
            base_path: self.base_path.clone(),
            conflict_policy: self.on_conflict,
            ..CompileOptions::default()
        };
        if !self.extensions.is_empty() {
            options.scan.extensions = Some(
                self.extensions
                    .iter()
                    .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
                    .collect(),
            );
        }
        options
            .scan
            .excluded
            .extend(self.excluded.iter().cloned());
        options
    }
}

/// Parse command line arguments
pub fn parse_args() -> Result<CliArgs> {
    let args = CliArgs::parse();
    parse_args_from_parsed(args)
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    for folder in &args.folders {
        if !folder.exists() {
            anyhow::bail!("Folder does not exist: {}", folder.display());
        }
        if !folder.is_dir() {
            anyhow::bail!("Not a directory: {}", folder.display());
        }
        info!("Source folder: {}", folder.display());
    }

    info!("Output format: {:?}", args.output_format);
    if let Some(ref output) = args.output_path {
        info!("Output file: {}", output.display());
    } else {
        info!("Output: stdout");
    }

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    use crate::serializer::{render, write_to_file};

    info!("Starting Swagger document generation...");

    // Step 1: Configure the compiler
    let mut compiler = SwgCompiler::new().with_options(args.compile_options());
    for folder in &args.folders {
        compiler.add_folder(folder);
    }

    // Step 2: Compile the registered folders into a document
    let compilation = compiler.compile()?;
    info!("Swagger document assembled");

    // Step 3: Serialize to requested format
    info!("Serializing to {:?} format...", args.output_format);
    let content = render(&compilation.document, args.output_format)?;

    // Step 4: Output to file or stdout
    if let Some(output_path) = &args.output_path {
        info!("Writing output to: {}", output_path.display());
        write_to_file(&content, output_path)?;
        info!(
            "Successfully wrote Swagger document to {}",
            output_path.display()
        );
    } else {
        println!("{}", content);
    }

    // Step 5: Display summary
    info!("Generation complete!");
    info!("Summary:");
    info!("  - Paths: {}", compilation.document.paths.len());
    info!("  - Definitions: {}", compilation.document.definitions.len());
    info!("  - Diagnostics: {}", compilation.diagnostics.len());

    Ok(())
}
