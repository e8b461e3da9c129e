//! Compiler version and release stages
//!
//! A compiled stream records the version of the compiler that produced it
//! as four bytes: major, minor, patch, stage. The stage byte keeps the
//! original ad-hoc encoding so existing `.cbf` files stay bit-compatible:
//! 0 = dev, 1 = alpha, 2 = beta, 3+N = rcN, 255 = stable.

use std::fmt;

/// Release stage of a compiler version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseStage {
    Dev,
    Alpha,
    Beta,
    /// Release candidate with its revision number (`Rc(2)` displays as `rc2`)
    Rc(u8),
    Stable,
}

impl ReleaseStage {
    /// Decode the stage byte
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0 => ReleaseStage::Dev,
            1 => ReleaseStage::Alpha,
            2 => ReleaseStage::Beta,
            255 => ReleaseStage::Stable,
            n => ReleaseStage::Rc(n - 3),
        }
    }

    /// Encode the stage byte
    pub fn to_byte(self) -> u8 {
        match self {
            ReleaseStage::Dev => 0,
            ReleaseStage::Alpha => 1,
            ReleaseStage::Beta => 2,
            ReleaseStage::Rc(n) => 3 + n,
            ReleaseStage::Stable => 255,
        }
    }
}

impl fmt::Display for ReleaseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseStage::Dev => write!(f, "dev"),
            ReleaseStage::Alpha => write!(f, "alpha"),
            ReleaseStage::Beta => write!(f, "beta"),
            ReleaseStage::Rc(n) => write!(f, "rc{n}"),
            ReleaseStage::Stable => write!(f, "stable"),
        }
    }
}

/// A four-byte compiler version tuple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
    pub stage: ReleaseStage,
}

/// The version recorded by this compiler and claimed by this interpreter
pub const COMPILER_VERSION: Version = Version {
    major: 1,
    minor: 0,
    patch: 0,
    stage: ReleaseStage::Dev,
};

impl Version {
    /// Encode as the four wire bytes (major, minor, patch, stage)
    pub fn to_bytes(self) -> [u8; 4] {
        [self.major, self.minor, self.patch, self.stage.to_byte()]
    }

    /// Decode from the four wire bytes
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self {
            major: bytes[0],
            minor: bytes[1],
            patch: bytes[2],
            stage: ReleaseStage::from_byte(bytes[3]),
        }
    }

    /// Forward-compatibility check: can a stream compiled with `self` run
    /// on an interpreter of version `runtime`?
    ///
    /// Only major and minor take part; patch and stage are ignored.
    pub fn runs_on(&self, runtime: &Version) -> bool {
        if self.major != runtime.major {
            return self.major < runtime.major;
        }
        self.minor <= runtime.minor
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}-{}", self.major, self.minor, self.patch, self.stage)
    }
}
