//! Error types and definitions for modgraph
//!
//! Every failure in the scan, render and configuration stages surfaces as a
//! [`ModgraphError`]. Nothing in the core recovers locally: the error travels to
//! the binary, which logs a single line and exits non-zero.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Warning level errors - operation can continue
    Warning,
    /// Error level - the run fails
    Error,
    /// Critical level - the run could not even be configured
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Main error type for modgraph operations
#[derive(Debug, Error)]
pub enum ModgraphError {
    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// A source file could not be opened or read
    #[error("Error reading {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed source syntax in the package clause or import block
    #[error("Parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// The tree-sitter grammar could not be loaded
    #[error("Parser setup error: {message}")]
    ParserSetup { message: String },

    /// Invalid path errors
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// Directory traversal errors
    #[error("Directory traversal error for {path}: {message}")]
    DirectoryTraversal { path: PathBuf, message: String },

    /// Permission denied errors
    #[error("Permission denied accessing {path}")]
    PermissionDenied { path: PathBuf },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Configuration file not found
    #[error("Configuration file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file read errors
    #[error("Error reading configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file parse errors
    #[error("Error parsing configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Glob pattern errors
    #[error("Glob pattern error: {source}")]
    GlobPattern {
        #[source]
        source: glob::PatternError,
    },

    /// Invalid output format
    #[error("Invalid output format: {format}")]
    InvalidOutputFormat { format: String },

    /// Output directory not found
    #[error("Output directory not found: {path}")]
    OutputDirectoryNotFound { path: PathBuf },

    /// Output file write errors
    #[error("Error writing to output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stdout write errors
    #[error("Error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
    },

    /// Temporary file creation errors
    #[error("Error creating temporary file: {source}")]
    TempFile {
        #[source]
        source: std::io::Error,
    },

    /// The graph layout program is not installed or not on PATH
    #[error("Graph layout program '{program}' not found")]
    RendererNotFound { program: String },

    /// The graph layout program exited unsuccessfully
    #[error("Graph layout program '{program}' failed ({status}): {stderr}")]
    RenderFailed {
        program: String,
        status: String,
        stderr: String,
    },

    /// The image viewer could not be launched
    #[error("Could not open {path} in a viewer: {source}")]
    ViewerLaunch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },

    /// CSV handling errors
    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    /// CSV serialization error
    #[error("CSV serialization error: {source}")]
    CsvSerialize {
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl ModgraphError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ModgraphError::ViewerLaunch { .. } => ErrorSeverity::Warning,

            ModgraphError::Config { .. } => ErrorSeverity::Critical,
            ModgraphError::ConfigNotFound { .. } => ErrorSeverity::Critical,
            ModgraphError::ConfigRead { .. } => ErrorSeverity::Critical,
            ModgraphError::ConfigParse { .. } => ErrorSeverity::Critical,
            ModgraphError::GlobPattern { .. } => ErrorSeverity::Critical,
            ModgraphError::InvalidOutputFormat { .. } => ErrorSeverity::Critical,
            ModgraphError::OutputDirectoryNotFound { .. } => ErrorSeverity::Critical,
            ModgraphError::ParserSetup { .. } => ErrorSeverity::Critical,

            _ => ErrorSeverity::Error,
        }
    }

    /// Check if this is a critical error
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Warning => 0,
            ErrorSeverity::Error => 1,
            ErrorSeverity::Critical => 2,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ModgraphError::InvalidPath { path } => {
                format!("Invalid path: '{}'. Please provide an existing directory to scan.", path.display())
            }
            ModgraphError::PermissionDenied { path } => {
                format!("Cannot access '{}' due to permission denied. Check file permissions.", path.display())
            }
            ModgraphError::ReadFile { path, source } => {
                format!("Cannot read '{}': {}", path.display(), source)
            }
            ModgraphError::Parse { path, message } => {
                format!("Cannot parse '{}': {}", path.display(), message)
            }
            ModgraphError::ConfigNotFound { path } => {
                format!("Configuration file not found at '{}'. Run with --init to create one.", path.display())
            }
            ModgraphError::OutputDirectoryNotFound { path } => {
                format!("Output directory '{}' does not exist. Create it or choose another target.", path.display())
            }
            ModgraphError::RendererNotFound { program } => {
                format!("Graph layout program '{}' was not found. Install Graphviz or pass --engine with its path.", program)
            }
            ModgraphError::RenderFailed { program, status, stderr } => {
                let stderr = stderr.trim();
                if stderr.is_empty() {
                    format!("'{}' failed to render the graph ({})", program, status)
                } else {
                    format!("'{}' failed to render the graph ({}): {}", program, status, stderr)
                }
            }
            _ => self.to_string(),
        }
    }

    /// Create an IO error
    pub fn io_error(source: std::io::Error) -> Self {
        ModgraphError::Io { source }
    }

    /// Create a file read error, mapping permission failures to `PermissionDenied`
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::PermissionDenied {
            ModgraphError::PermissionDenied { path }
        } else {
            ModgraphError::ReadFile { path, source }
        }
    }

    /// Create a parse error for a source file
    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ModgraphError::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        ModgraphError::Config {
            message: message.into(),
        }
    }

    /// Create a directory traversal error
    pub fn directory_traversal_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ModgraphError::DirectoryTraversal {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for ModgraphError {
    fn from(err: std::io::Error) -> Self {
        ModgraphError::io_error(err)
    }
}

impl From<csv::Error> for ModgraphError {
    fn from(err: csv::Error) -> Self {
        ModgraphError::Csv { source: err }
    }
}

impl From<glob::PatternError> for ModgraphError {
    fn from(err: glob::PatternError) -> Self {
        ModgraphError::GlobPattern { source: err }
    }
}

impl From<serde_json::Error> for ModgraphError {
    fn from(err: serde_json::Error) -> Self {
        ModgraphError::JsonSerialize { source: err }
    }
}

impl From<walkdir::Error> for ModgraphError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(|p| p.to_path_buf()).unwrap_or_default();
        match err.io_error().map(|e| e.kind()) {
            Some(std::io::ErrorKind::NotFound) => ModgraphError::InvalidPath { path },
            Some(std::io::ErrorKind::PermissionDenied) => ModgraphError::PermissionDenied { path },
            _ => ModgraphError::DirectoryTraversal {
                path,
                message: err.to_string(),
            },
        }
    }
}

/// Result type alias for modgraph operations
pub type Result<T> = std::result::Result<T, ModgraphError>;
