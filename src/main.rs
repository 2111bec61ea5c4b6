//! Command-line front end for assembling Swagger documents from source
//! comments.
//!
//! # Usage
//!
//! ```bash
//! swagger-from-comments [OPTIONS] <FOLDER>...
//! ```
//!
//! # Examples
//!
//! Print the document for one source tree as JSON:
//! ```bash
//! swagger-from-comments ./src
//! ```
//!
//! Write YAML for two trees, with custom metadata:
//! ```bash
//! swagger-from-comments ./api ./models -f yaml -o swagger.yaml \
//!     --title "Snippets API" --api-version 2.0.0
//! ```
//!
//! Enable verbose logging:
//! ```bash
//! swagger-from-comments ./src -v
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;

use swagger_from_comments::cli;

fn main() -> Result<()> {
    // Parse before logger init so the verbose flag can pick the level;
    // validation happens afterwards, once logging is up.
    let parsed = cli::CliArgs::parse();

    let log_level = if parsed.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    let args = cli::parse_args_from_parsed(parsed)?;

    cli::run(args)?;

    info!("Swagger document generation completed successfully");

    Ok(())
}
