//! The compile pipeline behind both the library API and the CLI.
//!
//! A [`SwgCompiler`] is a plain value: register folders, set options,
//! call [`compile`](SwgCompiler::compile) as often as needed. Two compiles
//! of an unchanged tree produce identical documents. All state lives in
//! the compiler instance; nothing is global.

use std::fs;
use std::io;
use std::path::PathBuf;

use log::{debug, warn};

use crate::assembler::{ConflictPolicy, DocumentAssembler, Info, SwaggerDocument};
use crate::classifier::classify;
use crate::diagnostics::{Diagnostic, Severity};
use crate::error::{Error, Result};
use crate::extractor::BlockExtractor;
use crate::scanner::{FileScanner, ScanOptions};

/// Everything configurable about a compile.
///
/// Document metadata is supplied here, never read from blocks, so the
/// emitted `info` section is always present and always the caller's.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    pub info: Info,
    pub host: Option<String>,
    pub base_path: Option<String>,
    pub conflict_policy: ConflictPolicy,
    pub scan: ScanOptions,
}

/// The outcome of one compile: the document plus everything that went
/// wrong along the way.
#[derive(Debug)]
pub struct Compilation {
    pub document: SwaggerDocument,
    pub diagnostics: Vec<Diagnostic>,
}

/// Collects documentation blocks from source folders into one Swagger
/// document.
///
/// # Example
///
/// ```no_run
/// use swagger_from_comments::compiler::SwgCompiler;
///
/// # fn main() -> anyhow::Result<()> {
/// let mut compiler = SwgCompiler::new();
/// compiler.add_folder("./api");
/// compiler.add_folder("./models");
/// let compilation = compiler.compile()?;
/// println!("{} paths", compilation.document.paths.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct SwgCompiler {
    folders: Vec<PathBuf>,
    options: CompileOptions,
}

fn report(diagnostic: &Diagnostic) {
    match diagnostic.severity() {
        Severity::Warning => warn!("{}", diagnostic),
        Severity::Note => debug!("{}", diagnostic),
    }
}

impl SwgCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the default options.
    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    /// Registers a folder to scan. Registering the same path again is a
    /// no-op; folders are visited in registration order.
    pub fn add_folder(&mut self, folder: impl Into<PathBuf>) {
        let folder = folder.into();
        if self.folders.contains(&folder) {
            debug!("Folder already registered: {}", folder.display());
            return;
        }
        debug!("Registered folder: {}", folder.display());
        self.folders.push(folder);
    }

    /// The registered folders, in registration order.
    pub fn folders(&self) -> &[PathBuf] {
        &self.folders
    }

    /// Runs the full pipeline: scan, extract, classify, assemble.
    ///
    /// Bad input never fails a compile; it surfaces in
    /// [`Compilation::diagnostics`] and the affected block or file is
    /// skipped. The only errors are configuration mistakes: no folders
    /// registered, or none of them readable.
    pub fn compile(&self) -> Result<Compilation> {
        if self.folders.is_empty() {
            return Err(Error::NoFolders);
        }
        if !self.folders.iter().any(|folder| folder.is_dir()) {
            return Err(Error::NoReadableFolders);
        }

        debug!("Compiling {} folders", self.folders.len());
        let scanner = FileScanner::new(self.folders.clone(), self.options.scan.clone());
        let scan = scanner.scan();
        debug!("Found {} files", scan.files.len());

        let mut diagnostics = scan.diagnostics;
        for diagnostic in &diagnostics {
            report(diagnostic);
        }

        let mut assembler = DocumentAssembler::new()
            .with_info(self.options.info.clone())
            .with_host(self.options.host.clone())
            .with_base_path(self.options.base_path.clone())
            .with_conflict_policy(self.options.conflict_policy);

        for file in &scan.files {
            let text = match fs::read_to_string(file) {
                Ok(text) => text,
                // read_to_string reports non-UTF-8 content as InvalidData.
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    debug!("Skipping non-UTF-8 file: {}", file.display());
                    continue;
                }
                Err(e) => {
                    let diagnostic = Diagnostic::UnreadableFile {
                        source: file.clone(),
                        reason: e.to_string(),
                    };
                    report(&diagnostic);
                    diagnostics.push(diagnostic);
                    continue;
                }
            };

            debug!("Extracting blocks from: {}", file.display());
            for item in BlockExtractor::new(file, &text) {
                let block = match item {
                    Ok(block) => block,
                    Err(malformed) => {
                        let diagnostic = Diagnostic::from(malformed);
                        report(&diagnostic);
                        diagnostics.push(diagnostic);
                        continue;
                    }
                };
                match classify(&block) {
                    Ok(entry) => {
                        if let Some(diagnostic) = assembler.insert(entry) {
                            report(&diagnostic);
                            diagnostics.push(diagnostic);
                        }
                    }
                    Err(malformed) => {
                        let diagnostic = Diagnostic::from(malformed);
                        report(&diagnostic);
                        diagnostics.push(diagnostic);
                    }
                }
            }
        }

        Ok(Compilation {
            document: assembler.build(),
            diagnostics,
        })
    }
}
