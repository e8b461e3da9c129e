//! Runtime error types
//!
//! Out-of-bounds tape access is deliberately not an error variant: the
//! source language leaves pointer overrun undefined, and the interpreter
//! preserves that contract by panicking instead of reporting. See
//! [`Interpreter::run`](super::vm::Interpreter::run).

use thiserror::Error;

use crate::core::version::Version;

/// Fatal execution error
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The stream was produced by a compiler this interpreter is too old for
    #[error("bytecode requires compiler version {stream} but interpreter is version {interpreter}")]
    IncompatibleVersion {
        stream: Version,
        interpreter: Version,
    },

    /// A byte outside the opcode table: a corrupted stream or a
    /// compiler/interpreter opcode-table mismatch
    #[error("unknown op in bytecode stream; op=0x{opcode:02X}; pos=0x{offset:X}; instruction={instruction}")]
    UnknownOpcode {
        opcode: u8,
        offset: usize,
        /// 1-based index of the instruction that failed to decode
        instruction: u64,
    },

    /// An argument-bearing opcode with fewer than four bytes after it
    #[error("truncated operand in bytecode stream; pos=0x{offset:X}; instruction={instruction}")]
    TruncatedOperand { offset: usize, instruction: u64 },

    /// The input source or output sink failed
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::version::COMPILER_VERSION;

    #[test]
    fn test_unknown_opcode_display() {
        let err = RuntimeError::UnknownOpcode {
            opcode: 0xAB,
            offset: 0x10,
            instruction: 3,
        };
        assert_eq!(
            err.to_string(),
            "unknown op in bytecode stream; op=0xAB; pos=0x10; instruction=3"
        );
    }

    #[test]
    fn test_incompatible_version_display() {
        let err = RuntimeError::IncompatibleVersion {
            stream: Version {
                major: 2,
                ..COMPILER_VERSION
            },
            interpreter: COMPILER_VERSION,
        };
        assert!(err.to_string().contains("2.0.0-dev"));
        assert!(err.to_string().contains("1.0.0-dev"));
    }
}
