//! API type definitions
//!
//! Input and output types for compilation and execution.

use huck_core::{BytecodeStream, Version};

/// Compilation output
#[derive(Debug)]
pub struct CompileOutput {
    /// Compiled bytecode stream
    pub stream: BytecodeStream,
    /// Compiler version to record alongside the stream
    pub version: Version,
}

/// Execution output
#[derive(Debug)]
pub struct ExecuteOutput {
    /// Number of instructions executed
    pub ops: u64,
}
