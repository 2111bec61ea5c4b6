/// Result type alias for compile operations
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal configuration errors.
///
/// Everything recoverable during a compile (malformed blocks, merge
/// conflicts, unreadable files) is reported as a
/// [`Diagnostic`](crate::diagnostics::Diagnostic) instead and never
/// aborts the run.
#[derive(Debug)]
pub enum Error {
    /// `compile` was called before any folder was registered.
    NoFolders,
    /// None of the registered folders is a readable directory.
    NoReadableFolders,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::NoFolders => {
                write!(f, "no folders registered; call add_folder before compile")
            }
            Error::NoReadableFolders => {
                write!(f, "none of the registered folders is a readable directory")
            }
        }
    }
}

impl std::error::Error for Error {}
