// Error types for the cleaner
// Every variant carries the path involved so an aborted run says where it stopped

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Main error type for cleaning operations
#[derive(Debug)]
pub enum CleanError {
    /// File system errors with context
    DirectoryNotFound { path: PathBuf },
    FileNotFound { path: PathBuf },
    NotADirectory { path: PathBuf },
    PermissionDenied { path: PathBuf, operation: String },
    InvalidEncoding { path: PathBuf },
    IoError { path: Option<PathBuf>, operation: String, source: io::Error },

    /// Configuration errors
    InvalidConfig { path: PathBuf, reason: String },
}

impl fmt::Display for CleanError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CleanError::DirectoryNotFound { path } => {
                writeln!(f, "Directory not found: {}", path.display())?;
                write!(f, "Suggestion: Check that the project path is correct and the directory exists")
            }
            CleanError::FileNotFound { path } => {
                writeln!(f, "File not found: {}", path.display())?;
                write!(f, "Suggestion: The file may have been removed while cleaning; run again")
            }
            CleanError::NotADirectory { path } => {
                writeln!(f, "Not a directory: {}", path.display())?;
                write!(f, "Suggestion: Pass the project root directory, not a single file")
            }
            CleanError::PermissionDenied { path, operation } => {
                writeln!(f, "Permission denied while {} {}", operation, path.display())?;
                write!(f, "Suggestion: Check file permissions or exclude the directory with --exclude")
            }
            CleanError::InvalidEncoding { path } => {
                writeln!(f, "File is not valid UTF-8: {}", path.display())?;
                write!(f, "Suggestion: Convert the file to UTF-8 or exclude its directory")
            }
            CleanError::IoError { path, operation, source } => {
                if let Some(p) = path {
                    writeln!(f, "I/O error while {} {}: {}", operation, p.display(), source)?;
                } else {
                    writeln!(f, "I/O error while {}: {}", operation, source)?;
                }
                write!(f, "Suggestion: Check file permissions and disk space")
            }
            CleanError::InvalidConfig { path, reason } => {
                writeln!(f, "Invalid configuration file {}: {}", path.display(), reason)?;
                write!(f, "Suggestion: Fix the TOML syntax or pass a different file with --config")
            }
        }
    }
}

impl std::error::Error for CleanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CleanError::IoError { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl CleanError {
    /// Create an error from an io::Error, keeping the operation and path as context
    pub fn from_io_error(err: io::Error, operation: &str, path: Option<PathBuf>) -> Self {
        let Some(p) = path else {
            return CleanError::IoError {
                path: None,
                operation: operation.to_string(),
                source: err,
            };
        };

        match err.kind() {
            io::ErrorKind::NotFound => {
                if operation.contains("directory") {
                    CleanError::DirectoryNotFound { path: p }
                } else {
                    CleanError::FileNotFound { path: p }
                }
            }
            io::ErrorKind::PermissionDenied => CleanError::PermissionDenied {
                path: p,
                operation: operation.to_string(),
            },
            io::ErrorKind::InvalidData => CleanError::InvalidEncoding { path: p },
            _ => CleanError::IoError {
                path: Some(p),
                operation: operation.to_string(),
                source: err,
            },
        }
    }

    /// Path the error refers to, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            CleanError::DirectoryNotFound { path }
            | CleanError::FileNotFound { path }
            | CleanError::NotADirectory { path }
            | CleanError::PermissionDenied { path, .. }
            | CleanError::InvalidEncoding { path }
            | CleanError::InvalidConfig { path, .. } => Some(path),
            CleanError::IoError { path, .. } => path.as_ref(),
        }
    }
}

impl From<io::Error> for CleanError {
    fn from(err: io::Error) -> Self {
        CleanError::from_io_error(err, "unknown operation", None)
    }
}
