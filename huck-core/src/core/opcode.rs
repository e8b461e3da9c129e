//! Opcode definitions
//!
//! The instruction vocabulary shared by the compiler and the VM. An
//! instruction is either a bare opcode byte or an opcode byte followed by
//! exactly four big-endian argument bytes; the stream is not
//! self-describing beyond this table.

/// Operation codes
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCode {
    // ===== pointer / cell primitives (0x00-0x05) =====
    PtrInc = 0x00,
    PtrDec = 0x01,
    DataInc = 0x02,
    DataDec = 0x03,
    Output = 0x04,
    Input = 0x05,

    // ===== control flow (0x06-0x07), u32 absolute target =====
    JumpIfZero = 0x06,
    JumpIfNotZero = 0x07,

    // ===== single-command loop shortcuts (0x08-0x0A) =====
    AssignZero = 0x08,
    FindZeroLeft = 0x09,
    FindZeroRight = 0x0A,

    // ===== compressed runs (0x0B-0x0E), u32 count =====
    DataMulInc = 0x0B,
    DataMulDec = 0x0C,
    PtrMulInc = 0x0D,
    PtrMulDec = 0x0E,
}

/// Size of an instruction operand in bytes
pub const OPERAND_SIZE: usize = 4;

impl OpCode {
    /// Decode an opcode byte, `None` for bytes outside the table
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(OpCode::PtrInc),
            0x01 => Some(OpCode::PtrDec),
            0x02 => Some(OpCode::DataInc),
            0x03 => Some(OpCode::DataDec),
            0x04 => Some(OpCode::Output),
            0x05 => Some(OpCode::Input),
            0x06 => Some(OpCode::JumpIfZero),
            0x07 => Some(OpCode::JumpIfNotZero),
            0x08 => Some(OpCode::AssignZero),
            0x09 => Some(OpCode::FindZeroLeft),
            0x0A => Some(OpCode::FindZeroRight),
            0x0B => Some(OpCode::DataMulInc),
            0x0C => Some(OpCode::DataMulDec),
            0x0D => Some(OpCode::PtrMulInc),
            0x0E => Some(OpCode::PtrMulDec),
            _ => None,
        }
    }

    /// Get the opcode name
    pub fn name(&self) -> &'static str {
        match self {
            OpCode::PtrInc => "PTR_INC",
            OpCode::PtrDec => "PTR_DEC",
            OpCode::DataInc => "DATA_INC",
            OpCode::DataDec => "DATA_DEC",
            OpCode::Output => "OUTPUT",
            OpCode::Input => "INPUT",
            OpCode::JumpIfZero => "JUMP_IF_ZERO",
            OpCode::JumpIfNotZero => "JUMP_IF_NOT_ZERO",
            OpCode::AssignZero => "ASSIGN_ZERO",
            OpCode::FindZeroLeft => "FIND_ZERO_LEFT",
            OpCode::FindZeroRight => "FIND_ZERO_RIGHT",
            OpCode::DataMulInc => "DATA_MUL_INC",
            OpCode::DataMulDec => "DATA_MUL_DEC",
            OpCode::PtrMulInc => "PTR_MUL_INC",
            OpCode::PtrMulDec => "PTR_MUL_DEC",
        }
    }

    /// Whether the opcode byte is followed by a 4-byte argument
    pub fn has_operand(&self) -> bool {
        matches!(
            self,
            OpCode::JumpIfZero
                | OpCode::JumpIfNotZero
                | OpCode::DataMulInc
                | OpCode::DataMulDec
                | OpCode::PtrMulInc
                | OpCode::PtrMulDec
        )
    }

    /// Encoded instruction size in bytes (opcode plus operand)
    pub fn size(&self) -> usize {
        if self.has_operand() {
            1 + OPERAND_SIZE
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_name() {
        assert_eq!(OpCode::PtrInc.name(), "PTR_INC");
        assert_eq!(OpCode::JumpIfZero.name(), "JUMP_IF_ZERO");
        assert_eq!(OpCode::DataMulDec.name(), "DATA_MUL_DEC");
    }

    #[test]
    fn test_operand_table() {
        assert!(!OpCode::PtrInc.has_operand());
        assert!(!OpCode::AssignZero.has_operand());
        assert!(OpCode::JumpIfZero.has_operand());
        assert!(OpCode::PtrMulDec.has_operand());
        assert_eq!(OpCode::Output.size(), 1);
        assert_eq!(OpCode::JumpIfNotZero.size(), 5);
    }

    #[test]
    fn test_from_byte() {
        for byte in 0x00..=0x0E {
            let op = OpCode::from_byte(byte).unwrap();
            assert_eq!(op as u8, byte);
        }
        assert_eq!(OpCode::from_byte(0x0F), None);
        assert_eq!(OpCode::from_byte(0xFF), None);
    }
}
