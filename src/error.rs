use std::path::PathBuf;

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for loading a document and locating an endpoint
#[derive(Debug)]
pub enum Error {
    IoError(std::io::Error),
    FileNotFound(PathBuf),
    NotAFile(PathBuf),
    FileTooLarge { file: PathBuf, size: u64, limit: u64 },
    UnsupportedExtension(String),
    ParseError { file: PathBuf, message: String },
    NoPaths,
    EndpointNotFound(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::IoError(e) => write!(f, "IO error: {}", e),
            Error::FileNotFound(file) => write!(f, "file does not exist: {}", file.display()),
            Error::NotAFile(file) => {
                write!(f, "path is a directory, not a file: {}", file.display())
            }
            Error::FileTooLarge { file, size, limit } => write!(
                f,
                "file too large: {} is {} bytes (max {})",
                file.display(),
                size,
                limit
            ),
            Error::UnsupportedExtension(ext) => write!(
                f,
                "unsupported file extension: {} (expected .yaml, .yml, or .json)",
                ext
            ),
            Error::ParseError { file, message } => {
                write!(f, "failed to load OpenAPI file {}: {}", file.display(), message)
            }
            Error::NoPaths => write!(f, "OpenAPI document has no paths defined"),
            Error::EndpointNotFound(path) => write!(f, "endpoint not found: {}", path),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ParseError {
            file: PathBuf::from("<unknown>"),
            message: format!("JSON error: {}", err),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::ParseError {
            file: PathBuf::from("<unknown>"),
            message: format!("YAML error: {}", err),
        }
    }
}

impl Error {
    /// Attaches the offending file to a parse error
    pub fn in_file(self, file: impl Into<PathBuf>) -> Self {
        match self {
            Error::ParseError { message, .. } => Error::ParseError {
                file: file.into(),
                message,
            },
            other => other,
        }
    }
}
