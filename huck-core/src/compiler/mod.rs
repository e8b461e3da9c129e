//! Single-pass optimizing compiler
//!
//! Translates the eight source commands into bytecode in one pass over the
//! character stream. Loop targets are backpatched through a pending-loop
//! stack; repeated commands are run-length compressed through a pending-run
//! accumulator that retroactively rewrites the emitted bytes. Which
//! rewrites are applied is controlled by [`Optimizations`] flags.

pub mod error;
pub use error::CompileError;

use huck_config::Optimizations;
use tracing::debug;

use crate::core::opcode::OpCode;
use crate::core::stream::BytecodeStream;

/// Map a source command character to its single-byte opcode
///
/// Loop brackets are handled separately; every unmapped character is a
/// comment.
fn command_opcode(command: char) -> Option<OpCode> {
    match command {
        '>' => Some(OpCode::PtrInc),
        '<' => Some(OpCode::PtrDec),
        '+' => Some(OpCode::DataInc),
        '-' => Some(OpCode::DataDec),
        '.' => Some(OpCode::Output),
        ',' => Some(OpCode::Input),
        _ => None,
    }
}

/// Counted-run opcode for a compressible single-byte opcode
fn compressed_opcode(opcode: OpCode) -> Option<OpCode> {
    match opcode {
        OpCode::DataInc => Some(OpCode::DataMulInc),
        OpCode::DataDec => Some(OpCode::DataMulDec),
        OpCode::PtrInc => Some(OpCode::PtrMulInc),
        OpCode::PtrDec => Some(OpCode::PtrMulDec),
        _ => None,
    }
}

/// An open loop awaiting its `]`
///
/// `start` is the offset just past the JUMP_IF_ZERO placeholder; line and
/// column locate the `[` for error reporting.
struct LoopFrame {
    start: usize,
    column: usize,
    line: usize,
}

/// Run of identical non-loop commands being accumulated
struct PendingRun {
    opcode: Option<OpCode>,
    count: u32,
}

impl PendingRun {
    fn clear(&mut self) {
        self.opcode = None;
        self.count = 0;
    }

    /// Retroactively replace the run's already-emitted single-byte ops with
    /// one counted instruction. Runs of 1-2 stay as they are; compressing
    /// them would not shrink the stream.
    fn flush(&mut self, out: &mut BytecodeStream) {
        if self.count > 2 {
            if let Some(mul) = self.opcode.and_then(compressed_opcode) {
                out.truncate_to(out.len() - self.count as usize);
                out.append(&[mul as u8]);
                out.append(&self.count.to_be_bytes());
            }
        }
    }
}

/// The bytecode compiler
#[derive(Debug, Clone)]
pub struct Compiler {
    flags: Optimizations,
}

impl Compiler {
    /// Create a compiler with explicit optimization flags
    pub fn new(flags: Optimizations) -> Self {
        Self { flags }
    }

    /// Compile source text into a bytecode stream
    ///
    /// Fails on unbalanced loop brackets and on single-command loops whose
    /// body is an I/O command (those never terminate). All other
    /// unrecognized characters are comments.
    pub fn compile(&self, source: &str) -> Result<BytecodeStream, CompileError> {
        let mut out = BytecodeStream::new();
        let mut loops: Vec<LoopFrame> = Vec::new();
        let mut run = PendingRun {
            opcode: None,
            count: 0,
        };
        let mut line = 1usize;
        let mut column = 1usize;

        for command in source.chars() {
            if self.flags.contains(Optimizations::COMPRESS_REPEATED_CMDS) {
                let mapped = command_opcode(command);
                if mapped.is_some() && mapped == run.opcode {
                    run.count += 1;
                } else {
                    run.flush(&mut out);
                    match mapped {
                        Some(opcode) => {
                            run.opcode = Some(opcode);
                            run.count = 1;
                        }
                        None => run.clear(),
                    }
                }
            }

            match command {
                '[' => {
                    out.append(&[OpCode::JumpIfZero as u8, 0, 0, 0, 0]);
                    loops.push(LoopFrame {
                        start: out.tell(),
                        column,
                        line,
                    });
                }
                ']' => {
                    let frame = loops
                        .pop()
                        .ok_or(CompileError::UnmatchedLoopEnd { line, column })?;
                    self.close_loop(&mut out, frame)?;
                }
                '\n' => {
                    line += 1;
                    column = 0;
                }
                other => {
                    if let Some(opcode) = command_opcode(other) {
                        out.append(&[opcode as u8]);
                    }
                }
            }

            column += 1;
        }

        if self.flags.contains(Optimizations::COMPRESS_REPEATED_CMDS) {
            run.flush(&mut out);
        }

        if let Some(frame) = loops.pop() {
            return Err(CompileError::UnclosedLoop {
                line: frame.line,
                column: frame.column,
            });
        }

        debug!(
            target: "huck::compiler",
            bytes = out.len(),
            flags = self.flags.0,
            "compilation completed"
        );

        Ok(out)
    }

    /// Close the loop opened by `frame`: eliminate it, shortcut it, or emit
    /// the back jump and patch the forward placeholder.
    fn close_loop(&self, out: &mut BytecodeStream, frame: LoopFrame) -> Result<(), CompileError> {
        let end = out.tell();

        if frame.start == end && self.flags.contains(Optimizations::ELIMINATE_EMPTY_LOOPS) {
            // loop contains no instructions, drop the placeholder
            out.truncate_to(end - 5);
        } else if frame.start == end - 1
            && self.flags.contains(Optimizations::SHORTCUT_SINGLE_CMD_LOOPS)
        {
            // loop contains a single instruction, rewrite to one specialized op
            let body = out.byte_at(frame.start);
            out.truncate_to(end - 6);

            let shortcut = match OpCode::from_byte(body) {
                Some(OpCode::PtrInc) => OpCode::FindZeroRight,
                Some(OpCode::PtrDec) => OpCode::FindZeroLeft,
                Some(OpCode::DataInc) | Some(OpCode::DataDec) => OpCode::AssignZero,
                Some(OpCode::Input) | Some(OpCode::Output) => {
                    return Err(CompileError::InfiniteIoLoop {
                        line: frame.line,
                        column: frame.column,
                    });
                }
                _ => {
                    return Err(CompileError::UnknownLoopBody {
                        opcode: body,
                        line: frame.line,
                        column: frame.column,
                    });
                }
            };
            out.append(&[shortcut as u8]);
        } else {
            // general loop: back jump to the loop start, then patch the
            // forward placeholder with the position just past it
            out.append(&[OpCode::JumpIfNotZero as u8]);
            out.append(&(frame.start as u32).to_be_bytes());
            let after = out.tell() as u32;
            out.write_at(frame.start - 4, &after.to_be_bytes());
        }

        Ok(())
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(Optimizations::all())
    }
}
