//! Compile error types
//!
//! Every variant carries the 1-based source line and column of the
//! offending construct. Compilation has no recovery path; a partial
//! stream left behind by a failed compile is never valid output.

use thiserror::Error;

/// Fatal compilation error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A `]` with no open loop to close
    #[error("unexpected loop end at column {column} on line {line}")]
    UnmatchedLoopEnd { line: usize, column: usize },

    /// A `[` left open at end of input; position is the innermost open `[`
    #[error("unclosed loop started at column {column} on line {line}")]
    UnclosedLoop { line: usize, column: usize },

    /// A loop whose sole body is `,` or `.` never terminates
    #[error("infinite I/O loop at column {column} on line {line}")]
    InfiniteIoLoop { line: usize, column: usize },

    /// Single-instruction loop around an opcode the shortcut table does not
    /// know; indicates a compiler defect rather than bad source
    #[error(
        "infinite loop containing unknown instruction 0x{opcode:02X} at column {column} on line {line}"
    )]
    UnknownLoopBody {
        opcode: u8,
        line: usize,
        column: usize,
    },
}

impl CompileError {
    /// Source line of the error (1-based)
    pub fn line(&self) -> usize {
        match self {
            CompileError::UnmatchedLoopEnd { line, .. }
            | CompileError::UnclosedLoop { line, .. }
            | CompileError::InfiniteIoLoop { line, .. }
            | CompileError::UnknownLoopBody { line, .. } => *line,
        }
    }

    /// Source column of the error (1-based)
    pub fn column(&self) -> usize {
        match self {
            CompileError::UnmatchedLoopEnd { column, .. }
            | CompileError::UnclosedLoop { column, .. }
            | CompileError::InfiniteIoLoop { column, .. }
            | CompileError::UnknownLoopBody { column, .. } => *column,
        }
    }
}
