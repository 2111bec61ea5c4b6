use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;

use walkdir::{DirEntry, WalkDir};

use crate::diagnostics::Diagnostic;

/// Ignore policy for the directory walk.
///
/// Hidden entries (names starting with `.`) are always skipped. Entries
/// whose name is in `excluded` are skipped wherever they appear. When
/// `extensions` is set, only files with a matching extension
/// (case-insensitive, without the dot) are collected; `None` collects
/// every file, since markers can live in any comment syntax.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub extensions: Option<BTreeSet<String>>,
    pub excluded: BTreeSet<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            extensions: None,
            excluded: ["target", "node_modules", "__pycache__"]
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

impl ScanOptions {
    fn keep(&self, entry: &DirEntry) -> bool {
        // Never filter a registered root itself.
        if entry.depth() == 0 {
            return true;
        }
        let name = entry.file_name().to_string_lossy();
        !name.starts_with('.') && !self.excluded.contains(name.as_ref())
    }

    fn matches_extension(&self, path: &std::path::Path) -> bool {
        let Some(allowed) = &self.extensions else {
            return true;
        };
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| allowed.contains(&ext.to_ascii_lowercase()))
            .unwrap_or(false)
    }
}

/// Recursive walker over the registered source folders.
///
/// Visits each folder in registration order and, within a folder, entries
/// in lexical file-name order, so the collected file list is identical
/// from run to run. A file reachable from two overlapping folders is
/// collected once.
///
/// # Example
///
/// ```no_run
/// use swagger_from_comments::scanner::{FileScanner, ScanOptions};
/// use std::path::PathBuf;
///
/// let scanner = FileScanner::new(
///     vec![PathBuf::from("./api"), PathBuf::from("./models")],
///     ScanOptions::default(),
/// );
/// let result = scanner.scan();
/// println!("Found {} files", result.files.len());
/// ```
pub struct FileScanner {
    folders: Vec<PathBuf>,
    options: ScanOptions,
}

/// Result of a directory scan.
pub struct ScanResult {
    /// Every collected file, in deterministic visit order.
    pub files: Vec<PathBuf>,
    /// One entry per path that could not be traversed.
    pub diagnostics: Vec<Diagnostic>,
}

impl FileScanner {
    pub fn new(folders: Vec<PathBuf>, options: ScanOptions) -> Self {
        Self { folders, options }
    }

    /// Walks every registered folder and collects the files to inspect.
    ///
    /// Traversal failures (an unreadable subdirectory, a vanished entry)
    /// are recorded as diagnostics and the walk continues; they never
    /// abort the scan.
    pub fn scan(&self) -> ScanResult {
        let mut files = Vec::new();
        let mut diagnostics = Vec::new();
        let mut seen = HashSet::new();

        for folder in &self.folders {
            for entry in WalkDir::new(folder)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|e| self.options.keep(e))
            {
                match entry {
                    Ok(entry) => {
                        if !entry.file_type().is_file() {
                            continue;
                        }
                        let path = entry.path();
                        if !self.options.matches_extension(path) {
                            continue;
                        }
                        if seen.insert(path.to_path_buf()) {
                            files.push(path.to_path_buf());
                        }
                    }
                    Err(e) => {
                        diagnostics.push(Diagnostic::UnreadableFile {
                            source: e
                                .path()
                                .map(|p| p.to_path_buf())
                                .unwrap_or_else(|| folder.clone()),
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        ScanResult { files, diagnostics }
    }
}
