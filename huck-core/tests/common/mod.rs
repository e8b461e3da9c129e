//! Test helpers
//!
//! End-to-end helpers: compile source text and execute it against an
//! in-memory input/output pair.
#![allow(dead_code)]

use std::io::Cursor;

use huck_core::{
    BytecodeStream, CompileError, Compiler, Interpreter, Optimizations, RuntimeError, Version,
    VmOptions, COMPILER_VERSION,
};

/// Result of running a compiled program
pub struct RunResult {
    pub output: Vec<u8>,
    pub ops: u64,
}

/// Compile with explicit flags
pub fn compile_with(source: &str, flags: Optimizations) -> Result<BytecodeStream, CompileError> {
    Compiler::new(flags).compile(source)
}

/// Compile with every optimization enabled, panicking on errors
pub fn compile(source: &str) -> BytecodeStream {
    compile_with(source, Optimizations::all()).expect("source should compile")
}

/// Execute an already-compiled stream with the given input bytes
pub fn run_stream(stream: BytecodeStream, input: &[u8]) -> Result<RunResult, RuntimeError> {
    let mut vm = Interpreter::new(
        Cursor::new(input.to_vec()),
        Vec::new(),
        &VmOptions::default(),
    );
    let ops = vm.run(stream, COMPILER_VERSION)?;
    let (_, output) = vm.into_io();
    Ok(RunResult { output, ops })
}

/// Execute a stream that carries an explicit compiler version
pub fn run_versioned(stream: BytecodeStream, version: Version) -> Result<RunResult, RuntimeError> {
    let mut vm = Interpreter::new(Cursor::new(Vec::new()), Vec::new(), &VmOptions::default());
    let ops = vm.run(stream, version)?;
    let (_, output) = vm.into_io();
    Ok(RunResult { output, ops })
}

/// Compile with explicit flags and execute with the given input bytes
pub fn run_with(source: &str, flags: Optimizations, input: &[u8]) -> RunResult {
    let stream = compile_with(source, flags).expect("source should compile");
    run_stream(stream, input).expect("program should run")
}
