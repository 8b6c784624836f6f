use std::fmt;
use std::path::PathBuf;

/// Result type for orgpop-scan operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while discovering or scanning outline files
#[derive(Debug)]
pub enum Error {
    /// Enumerating a root directory or probing its manifest failed
    Discover { root: PathBuf, source: std::io::Error },

    /// Opening or reading a discovered file failed
    Read { path: PathBuf, source: std::io::Error },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Discover { root, source } => {
                write!(f, "failed to discover files under {}: {}", root.display(), source)
            }
            Error::Read { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Discover { source, .. } => Some(source),
            Error::Read { source, .. } => Some(source),
        }
    }
}
