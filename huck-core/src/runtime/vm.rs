//! Virtual machine
//!
//! Flat dispatch over the 15 opcodes against a fixed-size byte tape. The
//! stream is read-only from the VM's point of view; jumps reposition its
//! cursor via `seek` and never rewrite it.

use std::io::{Read, Write};

use huck_config::VmOptions;
use tracing::debug;

use super::error::RuntimeError;
use crate::core::opcode::OpCode;
use crate::core::stream::BytecodeStream;
use crate::core::version::{Version, COMPILER_VERSION};

/// The bytecode interpreter
///
/// Holds the tape, the data pointer, and the I/O handles. Construct a
/// fresh instance per program; `run` consumes the tape state.
pub struct Interpreter<R: Read, W: Write> {
    tape: Vec<u8>,
    ptr: isize,
    input: R,
    output: W,
}

impl<R: Read, W: Write> Interpreter<R, W> {
    /// The interpreter's own version, used for the compatibility pre-check
    pub const VERSION: Version = COMPILER_VERSION;

    /// Create an interpreter with an explicit tape size
    pub fn new(input: R, output: W, options: &VmOptions) -> Self {
        Self {
            tape: vec![0; options.tape_size],
            ptr: 0,
            input,
            output,
        }
    }

    /// Execute a compiled stream, returning the number of instructions run
    ///
    /// `version` is the compiler version recorded with the stream; a stream
    /// from a newer compiler (by major, or by minor within the same major)
    /// is rejected before any instruction executes.
    ///
    /// # Panics
    ///
    /// Moving the pointer outside the tape panics on the next cell access.
    /// The source language leaves pointer overrun undefined; the
    /// interpreter fails fast instead of masking the defect in the
    /// compiled program.
    pub fn run(&mut self, mut stream: BytecodeStream, version: Version) -> Result<u64, RuntimeError> {
        if !version.runs_on(&Self::VERSION) {
            return Err(RuntimeError::IncompatibleVersion {
                stream: version,
                interpreter: Self::VERSION,
            });
        }

        debug!(
            target: "huck::vm",
            bytes = stream.len(),
            tape = self.tape.len(),
            %version,
            "starting execution"
        );

        stream.rewind();
        let mut op_count: u64 = 0;

        while let Some(byte) = stream.read_byte() {
            let Some(op) = OpCode::from_byte(byte) else {
                return Err(RuntimeError::UnknownOpcode {
                    opcode: byte,
                    offset: stream.tell(),
                    instruction: op_count + 1,
                });
            };

            let arg = if op.has_operand() {
                stream
                    .read_operand()
                    .ok_or(RuntimeError::TruncatedOperand {
                        offset: stream.tell(),
                        instruction: op_count + 1,
                    })?
            } else {
                0
            };

            #[cfg(feature = "trace_execution")]
            tracing::trace!(
                target: "huck::vm",
                op = op.name(),
                arg,
                ptr = self.ptr,
                "executing"
            );

            match op {
                OpCode::PtrInc => self.ptr += 1,
                OpCode::PtrDec => self.ptr -= 1,
                OpCode::DataInc => {
                    let value = self.cell_value();
                    *self.cell() = value.wrapping_add(1);
                }
                OpCode::DataDec => {
                    let value = self.cell_value();
                    *self.cell() = value.wrapping_sub(1);
                }
                OpCode::Output => {
                    let byte = self.cell_value();
                    self.output.write_all(&[byte])?;
                }
                OpCode::Input => {
                    *self.cell() = self.read_input_byte()?;
                }
                OpCode::JumpIfZero => {
                    if self.cell_value() == 0 {
                        stream.seek(arg as usize);
                    }
                }
                OpCode::JumpIfNotZero => {
                    if self.cell_value() != 0 {
                        stream.seek(arg as usize);
                    }
                }
                OpCode::AssignZero => *self.cell() = 0,
                OpCode::FindZeroLeft => loop {
                    self.ptr -= 1;
                    if self.cell_value() == 0 {
                        break;
                    }
                },
                OpCode::FindZeroRight => loop {
                    self.ptr += 1;
                    if self.cell_value() == 0 {
                        break;
                    }
                },
                OpCode::DataMulInc => {
                    let value = self.cell_value();
                    *self.cell() = value.wrapping_add(arg as u8);
                }
                OpCode::DataMulDec => {
                    let value = self.cell_value();
                    *self.cell() = value.wrapping_sub(arg as u8);
                }
                OpCode::PtrMulInc => self.ptr += arg as isize,
                OpCode::PtrMulDec => self.ptr -= arg as isize,
            }

            op_count += 1;
        }

        debug!(target: "huck::vm", ops = op_count, "execution completed");

        Ok(op_count)
    }

    /// Current cell, mutable. A pointer outside the tape panics here.
    #[inline]
    fn cell(&mut self) -> &mut u8 {
        &mut self.tape[self.ptr as usize]
    }

    #[inline]
    fn cell_value(&self) -> u8 {
        self.tape[self.ptr as usize]
    }

    /// Read exactly one byte from the input source; end-of-input reads as 0
    fn read_input_byte(&mut self) -> Result<u8, RuntimeError> {
        let mut buf = [0u8; 1];
        match self.input.read(&mut buf)? {
            0 => Ok(0),
            _ => Ok(buf[0]),
        }
    }

    /// Tape snapshot, used by tests and debugging tools
    pub fn tape(&self) -> &[u8] {
        &self.tape
    }

    /// Consume the interpreter, handing back its I/O handles
    pub fn into_io(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Current data pointer
    pub fn pointer(&self) -> isize {
        self.ptr
    }
}
