//! Runtime module - bytecode execution
//!
//! The VM executes a compiled stream against a fixed-size byte tape. One
//! interpreter instance serves exactly one `run` invocation; tape and
//! pointer state are not reused across programs.

pub mod error;
pub use error::RuntimeError;

pub mod vm;
pub use vm::Interpreter;
