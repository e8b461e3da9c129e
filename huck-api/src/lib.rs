//! Huck API - Execution orchestration layer
//!
//! Provides unified execution interface, including:
//! - Execution flow orchestration (compile, load, execute)
//! - Configuration abstraction (RunConfig)
//! - Unified error handling (HuckError)
//!
//! For CLI convenience, this crate provides a global singleton API.
//! For library use, prefer the explicit `run(source, &config)` API.

use std::io::{self, Cursor, Write};

use tracing::info;

use huck_core::{disassemble, Interpreter, Version};

// Re-export config
pub mod config;
pub use config::{config as get_config, init as init_config, is_initialized, RunConfig};

// Re-export config types from huck_config
pub use huck_config::{Optimizations, Phase, VmOptions, DEFAULT_TAPE_SIZE};

// Re-export error and types
pub mod error;
pub mod loader;
pub mod types;
pub use error::{ErrorReport, HuckError};
pub use loader::{load_program, LoadedProgram};
pub use types::{CompileOutput, ExecuteOutput};

// Re-export core types
pub use huck_config;
pub use huck_core::{BytecodeStream, Compiler, COMPILER_VERSION};

/// Execute with explicit configuration
///
/// This is the recommended API for library users. Input and output are the
/// process's stdin and stdout.
pub fn run(source: &str, config: &RunConfig) -> Result<ExecuteOutput, HuckError> {
    info!("Starting execution");

    let compiled = compile_with_config(source, config)?;

    if config.dump_bytecode {
        dump_bytecode(&compiled.stream);
    }

    let result = execute_with_config(compiled.stream, compiled.version, config)?;

    info!("Execution completed");
    Ok(result)
}

/// Compile with explicit configuration
pub fn compile_with_config(source: &str, config: &RunConfig) -> Result<CompileOutput, HuckError> {
    let stream = Compiler::new(config.optimizations).compile(source)?;
    Ok(CompileOutput {
        stream,
        version: COMPILER_VERSION,
    })
}

/// Execute with explicit configuration, wired to stdin and stdout
pub fn execute_with_config(
    stream: BytecodeStream,
    version: Version,
    config: &RunConfig,
) -> Result<ExecuteOutput, HuckError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut vm = Interpreter::new(stdin.lock(), stdout.lock(), &config.vm);
    let ops = vm.run(stream, version)?;

    let (_, mut out) = vm.into_io();
    out.flush().map_err(HuckError::Io)?;

    Ok(ExecuteOutput { ops })
}

/// Execute with in-memory input, capturing the output
///
/// For embedders and tests that do not want to touch the process's
/// standard streams.
pub fn run_captured(
    source: &str,
    input: &[u8],
    config: &RunConfig,
) -> Result<(ExecuteOutput, Vec<u8>), HuckError> {
    let compiled = compile_with_config(source, config)?;
    let mut vm = Interpreter::new(Cursor::new(input.to_vec()), Vec::new(), &config.vm);
    let ops = vm.run(compiled.stream, compiled.version)?;
    let (_, output) = vm.into_io();
    Ok((ExecuteOutput { ops }, output))
}

/// Print a plain-text disassembly of a compiled stream to stderr
fn dump_bytecode(stream: &BytecodeStream) {
    match disassemble(stream) {
        Ok(instructions) => {
            for ins in instructions {
                match ins.operand {
                    Some(arg) => eprintln!("{:04X}  {:<16} {}", ins.offset, ins.opcode.name(), arg),
                    None => eprintln!("{:04X}  {}", ins.offset, ins.opcode.name()),
                }
            }
        }
        // a stream we just compiled always disassembles; a loaded one
        // surfaces its defects at execution time instead
        Err(err) => tracing::warn!(%err, "bytecode dump failed"),
    }
}

// ==================== Legacy API (using global config) ====================

/// Compile source code (uses global config)
///
/// # Panics
/// If global config is not initialized
pub fn compile(source: &str) -> Result<CompileOutput, HuckError> {
    compile_with_config(source, get_config())
}

/// Execute bytecode (uses global config)
///
/// # Panics
/// If global config is not initialized
pub fn execute(stream: BytecodeStream, version: Version) -> Result<ExecuteOutput, HuckError> {
    execute_with_config(stream, version, get_config())
}

/// Compile and run (uses global config)
///
/// # Panics
/// If global config is not initialized
pub fn compile_and_run(source: &str) -> Result<ExecuteOutput, HuckError> {
    run(source, get_config())
}

/// Quick run with default config (auto-initializes if needed)
pub fn quick_run(source: &str) -> Result<ExecuteOutput, HuckError> {
    if !is_initialized() {
        init_config(RunConfig::default());
    }
    compile_and_run(source)
}
