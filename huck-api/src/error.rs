//! API error types
//!
//! Unified error type aggregating the core error taxonomy, plus a
//! structured error report for callers that want more than a message
//! string.

use thiserror::Error;

use huck_config::Phase;

pub use huck_core::{CompileError, FormatError, RuntimeError};

/// Huck error type
#[derive(Error, Debug)]
pub enum HuckError {
    /// Compilation error (carries source line/column)
    #[error("{0}")]
    Compile(#[from] CompileError),

    /// Container decoding error
    #[error("{0}")]
    Format(#[from] FormatError),

    /// Execution error
    #[error("{0}")]
    Runtime(#[from] RuntimeError),

    /// Filesystem error while loading or caching a program
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl HuckError {
    /// Source line of the error, for compile errors
    pub fn line(&self) -> Option<usize> {
        match self {
            HuckError::Compile(e) => Some(e.line()),
            _ => None,
        }
    }

    /// Source column of the error, for compile errors
    pub fn column(&self) -> Option<usize> {
        match self {
            HuckError::Compile(e) => Some(e.column()),
            _ => None,
        }
    }

    /// Pipeline phase the error belongs to
    pub fn phase(&self) -> Phase {
        match self {
            HuckError::Compile(_) => Phase::Compiler,
            HuckError::Format(_) | HuckError::Io(_) => Phase::Loader,
            HuckError::Runtime(_) => Phase::Vm,
        }
    }

    /// Convert into a structured error report
    ///
    /// The CLI prints the report; upper layers can serialize it.
    pub fn to_report(&self) -> ErrorReport {
        let error_kind = match self {
            HuckError::Compile(CompileError::UnmatchedLoopEnd { .. }) => "UnmatchedLoopEnd",
            HuckError::Compile(CompileError::UnclosedLoop { .. }) => "UnclosedLoop",
            HuckError::Compile(CompileError::InfiniteIoLoop { .. }) => "InfiniteIoLoop",
            HuckError::Compile(CompileError::UnknownLoopBody { .. }) => "UnknownLoopBody",
            HuckError::Format(FormatError::BadMagic) => "BadMagic",
            HuckError::Format(FormatError::TruncatedVersion) => "TruncatedVersion",
            HuckError::Runtime(RuntimeError::IncompatibleVersion { .. }) => "IncompatibleVersion",
            HuckError::Runtime(RuntimeError::UnknownOpcode { .. }) => "UnknownOpcode",
            HuckError::Runtime(RuntimeError::TruncatedOperand { .. }) => "TruncatedOperand",
            HuckError::Runtime(RuntimeError::Io(_)) | HuckError::Io(_) => "Io",
        };

        ErrorReport {
            phase: self.phase().as_str(),
            line: self.line(),
            column: self.column(),
            error_kind: error_kind.to_string(),
            message: self.to_string(),
        }
    }
}

/// Structured error report
///
/// Upper layers (CLI, web, editors) format it to their own needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    /// Pipeline phase: compiler, loader, vm
    pub phase: &'static str,
    /// Source line (1-based, if known)
    pub line: Option<usize>,
    /// Source column (1-based, if known)
    pub column: Option<usize>,
    /// Error kind name, for programmatic handling
    pub error_kind: String,
    /// Human-readable message
    pub message: String,
}

impl std::fmt::Display for ErrorReport {
    /// Default CLI-friendly format
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(col)) => {
                write!(f, "[{}:{}] {} error: {}", line, col, self.phase, self.message)
            }
            _ => write!(f, "[{}] {} error: {}", self.phase, self.phase, self.message),
        }
    }
}

impl ErrorReport {
    /// Convert to JSON without pulling serde into this crate
    pub fn to_json(&self) -> String {
        let line = self
            .line
            .map(|l| l.to_string())
            .unwrap_or_else(|| "null".to_string());
        let col = self
            .column
            .map(|c| c.to_string())
            .unwrap_or_else(|| "null".to_string());

        format!(
            r#"{{"phase":"{}","line":{},"column":{},"error_kind":"{}","message":"{}"}}"#,
            self.phase,
            line,
            col,
            escape_json(&self.error_kind),
            escape_json(&self.message)
        )
    }

    /// Compact format for terminals
    pub fn to_short(&self) -> String {
        format!("{}: {}", self.phase, self.message)
    }
}

/// Minimal JSON string escaping
fn escape_json(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
