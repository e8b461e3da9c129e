//! CBF container format support
//!
//! Provides reading and writing of compiled bytecode files (`.cbf`).
//!
//! # File format
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  Magic (4 bytes ASCII): "CBFv"                        │
//! ├──────────────────────────────────────────────────────┤
//! │  Compiler version (4 bytes): major minor patch stage  │
//! ├──────────────────────────────────────────────────────┤
//! │  Bytecode (remaining bytes)                           │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! A reader must validate the magic and consume exactly four version bytes
//! before treating the remainder as bytecode. A magic mismatch means "not a
//! compiled file" and lets callers fall back to treating the bytes as raw
//! source.

use thiserror::Error;

use crate::core::stream::BytecodeStream;
use crate::core::version::Version;

/// Container magic number: "CBFv"
pub const MAGIC: [u8; 4] = *b"CBFv";

/// File extension constants
pub mod ext {
    /// Source files
    pub const SOURCE: &str = "bf";
    /// Compiled containers
    pub const COMPILED: &str = "cbf";
}

/// Container decoding error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("not a valid CBF file (invalid magic number)")]
    BadMagic,
    #[error("not a valid CBF file (incomplete compiler version identifier)")]
    TruncatedVersion,
}

/// Serialize a bytecode stream into container bytes
///
/// The stream's cursor is left untouched.
pub fn write_container(stream: &BytecodeStream, version: Version) -> Vec<u8> {
    let mut out = Vec::with_capacity(MAGIC.len() + 4 + stream.len());
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&version.to_bytes());
    out.extend_from_slice(stream.as_bytes());
    out
}

/// Parse container bytes into a bytecode stream and the recorded version
///
/// The returned stream is positioned at its start.
pub fn read_container(bytes: &[u8]) -> Result<(BytecodeStream, Version), FormatError> {
    let rest = match bytes.split_at_checked(MAGIC.len()) {
        Some((magic, rest)) if magic == MAGIC => rest,
        _ => return Err(FormatError::BadMagic),
    };

    let (version_bytes, bytecode) = rest
        .split_at_checked(4)
        .ok_or(FormatError::TruncatedVersion)?;
    let version = Version::from_bytes([
        version_bytes[0],
        version_bytes[1],
        version_bytes[2],
        version_bytes[3],
    ]);

    Ok((BytecodeStream::from_bytes(bytecode.to_vec()), version))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::version::{ReleaseStage, COMPILER_VERSION};

    #[test]
    fn test_roundtrip() {
        let stream = BytecodeStream::from_bytes(vec![0x02, 0x02, 0x04]);
        let version = Version {
            major: 1,
            minor: 2,
            patch: 3,
            stage: ReleaseStage::Rc(1),
        };

        let bytes = write_container(&stream, version);
        assert_eq!(&bytes[..4], b"CBFv");
        assert_eq!(&bytes[4..8], &[1, 2, 3, 4]);

        let (parsed, parsed_version) = read_container(&bytes).unwrap();
        assert_eq!(parsed.as_bytes(), stream.as_bytes());
        assert_eq!(parsed.tell(), 0);
        assert_eq!(parsed_version, version);
    }

    #[test]
    fn test_write_preserves_cursor() {
        let mut stream = BytecodeStream::from_bytes(vec![0x00, 0x01]);
        stream.seek(1);
        write_container(&stream, COMPILER_VERSION);
        assert_eq!(stream.tell(), 1);
    }

    #[test]
    fn test_bad_magic() {
        assert_eq!(read_container(b"XXXX\x01\x00\x00\x00"), Err(FormatError::BadMagic));
        // shorter than the magic itself is also a magic failure
        assert_eq!(read_container(b"CB"), Err(FormatError::BadMagic));
    }

    #[test]
    fn test_truncated_version() {
        assert_eq!(read_container(b"CBFv\x01\x00"), Err(FormatError::TruncatedVersion));
        assert_eq!(read_container(b"CBFv"), Err(FormatError::TruncatedVersion));
    }

    #[test]
    fn test_empty_bytecode_is_valid() {
        let (stream, version) = read_container(b"CBFv\x01\x00\x00\xFF").unwrap();
        assert!(stream.is_empty());
        assert_eq!(version.stage, ReleaseStage::Stable);
    }
}
