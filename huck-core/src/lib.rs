//! Huck Core - Core compiler and VM (pure logic, no file IO)
//!
//! Contains the bytecode instruction set, the single-pass optimizing
//! compiler, the CBF container codec, and the virtual machine. Only
//! operates on in-memory data structures; the VM's input source and
//! output sink are handed in by the caller.
//!
//! Configuration is passed explicitly via parameters, not via global state.

pub mod binary;
pub mod compiler;
pub mod core;
pub mod runtime;

// Re-export common types
pub use binary::{read_container, write_container, FormatError, MAGIC};
pub use crate::core::disasm::{disassemble, DisasmError, Instruction};
pub use crate::core::opcode::OpCode;
pub use crate::core::stream::BytecodeStream;
pub use crate::core::version::{ReleaseStage, Version, COMPILER_VERSION};
pub use compiler::{CompileError, Compiler};
pub use runtime::{Interpreter, RuntimeError};

// Re-export config types from huck-config
pub use huck_config::{Optimizations, Phase, VmOptions, DEFAULT_TAPE_SIZE};
