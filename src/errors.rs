use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Custom error type for the flow script runner
#[derive(Debug)]
pub enum Error {
    /// The script passed on the command line does not exist
    ScriptNotFound { path: PathBuf },
    /// The input directory does not exist
    InputDirNotFound { path: PathBuf },
    /// The input path exists but is not a directory
    InputNotADirectory { path: PathBuf },
    /// The attribute properties file does not exist
    AttributeFileNotFound { path: PathBuf },
    /// The attribute properties file could not be read
    AttributeFileUnreadable { source: io::Error, path: PathBuf },
    /// Malformed command-line invocation
    Usage { message: String },
    /// Error related to file operations
    FileOperation {
        source: io::Error,
        path: PathBuf,
        operation: String,
    },
    /// Generic error with a message
    Generic { message: String },
}

impl Error {
    /// Process exit code for this error
    ///
    /// Each fatal configuration error terminates the process with its own
    /// distinct code so callers can tell the cases apart.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage { .. } => 1,
            Error::ScriptNotFound { .. } => 2,
            Error::InputDirNotFound { .. } => 3,
            Error::InputNotADirectory { .. } => 4,
            Error::AttributeFileNotFound { .. } => 5,
            Error::AttributeFileUnreadable { .. } => 5,
            _ => 1,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ScriptNotFound { path } => {
                write!(f, "Script file not found: {}", path.display())
            }
            Error::InputDirNotFound { path } => {
                write!(f, "Input file directory does not exist: {}", path.display())
            }
            Error::InputNotADirectory { path } => {
                write!(
                    f,
                    "Input file location is not a directory: {}",
                    path.display()
                )
            }
            Error::AttributeFileNotFound { path } => {
                write!(f, "Attribute file does not exist: {}", path.display())
            }
            Error::AttributeFileUnreadable { source, path } => {
                write!(
                    f,
                    "Could not read properties file: {}, reason: {}",
                    path.display(),
                    source
                )
            }
            Error::Usage { message } => {
                write!(f, "{message}")
            }
            Error::FileOperation {
                path, operation, ..
            } => {
                write!(f, "Failed to {} file: {}", operation, path.display())
            }
            Error::Generic { message } => {
                write!(f, "{message}")
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::AttributeFileUnreadable { source, .. } => Some(source),
            Error::FileOperation { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::FileOperation {
            source: err,
            path: PathBuf::new(),
            operation: "perform operation on".to_string(),
        }
    }
}

/// Custom Result type for the flow script runner
pub type Result<T> = std::result::Result<T, Error>;

/// Helper function to create a script-not-found error
pub fn script_not_found_error(path: PathBuf) -> Error {
    Error::ScriptNotFound { path }
}

/// Helper function to create an input-directory-not-found error
pub fn input_dir_not_found_error(path: PathBuf) -> Error {
    Error::InputDirNotFound { path }
}

/// Helper function to create an input-not-a-directory error
pub fn input_not_a_directory_error(path: PathBuf) -> Error {
    Error::InputNotADirectory { path }
}

/// Helper function to create an attribute-file-not-found error
pub fn attribute_file_not_found_error(path: PathBuf) -> Error {
    Error::AttributeFileNotFound { path }
}

/// Helper function to create an attribute-file-unreadable error
pub fn attribute_file_unreadable_error(err: io::Error, path: PathBuf) -> Error {
    Error::AttributeFileUnreadable { source: err, path }
}

/// Helper function to create a usage error
pub fn usage_error(message: &str) -> Error {
    Error::Usage {
        message: message.to_string(),
    }
}

/// Helper function to create a file operation error
pub fn file_operation_error(err: io::Error, path: PathBuf, operation: &str) -> Error {
    Error::FileOperation {
        source: err,
        path,
        operation: operation.to_string(),
    }
}

/// Helper function to create a generic error
pub fn generic_error(message: &str) -> Error {
    Error::Generic {
        message: message.to_string(),
    }
}
