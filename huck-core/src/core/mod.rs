//! Core module - shared type definitions
//!
//! This module contains the vocabulary shared by the compiler, the
//! container codec, and the VM: the opcode table, the bytecode stream
//! buffer, and the compiler version tuple. No execution logic lives here.

/// Opcode table
pub mod opcode;
pub use opcode::OpCode;

/// Bytecode stream buffer
pub mod stream;
pub use stream::BytecodeStream;

/// Compiler version and release stages
pub mod version;
pub use version::{ReleaseStage, Version, COMPILER_VERSION};

/// Bytecode disassembler
pub mod disasm;
pub use disasm::{disassemble, DisasmError, Instruction};
