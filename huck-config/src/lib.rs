//! Huck Config - Pure configuration data structures
//!
//! This crate contains only data structures, no logic or global state.
//! It serves as the shared configuration vocabulary across all Huck crates.

/// Compiler optimization flags
///
/// Three independent bits, combinable by bitwise OR. The default enables all
/// three; `Optimizations::empty()` disables every optimization and yields a
/// pure one-command-per-instruction translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Optimizations(pub u8);

impl Optimizations {
    /// Drop `[]` loops entirely instead of emitting a jump pair
    pub const ELIMINATE_EMPTY_LOOPS: u8 = 0b0001;
    /// Rewrite single-command loops (`[-]`, `[>]`, ...) into one specialized op
    pub const SHORTCUT_SINGLE_CMD_LOOPS: u8 = 0b0010;
    /// Collapse runs of more than two identical commands into one counted op
    pub const COMPRESS_REPEATED_CMDS: u8 = 0b0100;

    /// Create an empty flag set (no optimizations)
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Create a flag set with every optimization enabled
    pub const fn all() -> Self {
        Self(
            Self::ELIMINATE_EMPTY_LOOPS
                | Self::SHORTCUT_SINGLE_CMD_LOOPS
                | Self::COMPRESS_REPEATED_CMDS,
        )
    }

    /// Check whether a flag is set
    pub fn contains(&self, flag: u8) -> bool {
        (self.0 & flag) != 0
    }

    /// Add a flag
    pub fn insert(&mut self, flag: u8) {
        self.0 |= flag;
    }

    /// Remove a flag
    pub fn remove(&mut self, flag: u8) {
        self.0 &= !flag;
    }
}

impl Default for Optimizations {
    fn default() -> Self {
        Self::all()
    }
}

/// Configuration for the virtual machine
#[derive(Debug, Clone)]
pub struct VmOptions {
    /// Number of byte cells on the tape
    pub tape_size: usize,
}

/// Default tape size, inherited from the reference interpreter
pub const DEFAULT_TAPE_SIZE: usize = 30000;

impl Default for VmOptions {
    fn default() -> Self {
        Self {
            tape_size: DEFAULT_TAPE_SIZE,
        }
    }
}

/// Execution phase enum for phase-specific configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Compiler,
    Loader,
    Vm,
}

impl Phase {
    /// Get the string name of the phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Compiler => "compiler",
            Phase::Loader => "loader",
            Phase::Vm => "vm",
        }
    }

    /// Get the log target name for this phase
    pub fn target(&self) -> String {
        format!("huck::{}", self.as_str())
    }
}
