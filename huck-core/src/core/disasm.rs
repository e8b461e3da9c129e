//! Bytecode disassembler
//!
//! Walks a bytecode stream and yields decoded instructions. Used by the
//! CLI's bytecode dump and by tests asserting on compiler output.

use thiserror::Error;

use super::opcode::OpCode;
use super::stream::BytecodeStream;

/// A decoded instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// Byte offset of the opcode within the stream
    pub offset: usize,
    pub opcode: OpCode,
    /// `Some` exactly when the opcode carries an operand
    pub operand: Option<u32>,
}

/// Disassembly error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DisasmError {
    #[error("unknown opcode 0x{opcode:02X} at offset 0x{offset:X}")]
    UnknownOpcode { opcode: u8, offset: usize },
    #[error("truncated operand at offset 0x{offset:X}")]
    TruncatedOperand { offset: usize },
}

/// Decode a whole stream into instructions
///
/// Does not disturb the stream's cursor.
pub fn disassemble(stream: &BytecodeStream) -> Result<Vec<Instruction>, DisasmError> {
    let mut walker = stream.clone();
    walker.rewind();

    let mut instructions = Vec::new();
    loop {
        let offset = walker.tell();
        let Some(byte) = walker.read_byte() else {
            break;
        };
        let opcode = OpCode::from_byte(byte)
            .ok_or(DisasmError::UnknownOpcode { opcode: byte, offset })?;
        let operand = if opcode.has_operand() {
            Some(
                walker
                    .read_operand()
                    .ok_or(DisasmError::TruncatedOperand { offset })?,
            )
        } else {
            None
        };
        instructions.push(Instruction {
            offset,
            opcode,
            operand,
        });
    }
    Ok(instructions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disassemble_mixed() {
        let mut stream = BytecodeStream::new();
        stream.append(&[OpCode::DataInc as u8]);
        stream.append(&[OpCode::DataMulInc as u8]);
        stream.append(&5u32.to_be_bytes());
        stream.append(&[OpCode::Output as u8]);

        let instructions = disassemble(&stream).unwrap();
        assert_eq!(instructions.len(), 3);
        assert_eq!(instructions[0].opcode, OpCode::DataInc);
        assert_eq!(instructions[0].operand, None);
        assert_eq!(instructions[1].offset, 1);
        assert_eq!(instructions[1].operand, Some(5));
        assert_eq!(instructions[2].offset, 6);
    }

    #[test]
    fn test_disassemble_unknown_opcode() {
        let stream = BytecodeStream::from_bytes(vec![OpCode::PtrInc as u8, 0x7F]);
        let err = disassemble(&stream).unwrap_err();
        assert_eq!(
            err,
            DisasmError::UnknownOpcode {
                opcode: 0x7F,
                offset: 1
            }
        );
    }

    #[test]
    fn test_disassemble_truncated_operand() {
        let stream = BytecodeStream::from_bytes(vec![OpCode::JumpIfZero as u8, 0x00]);
        let err = disassemble(&stream).unwrap_err();
        assert_eq!(err, DisasmError::TruncatedOperand { offset: 0 });
    }
}
