//! API layer configuration
//!
//! Holds the execution configuration `RunConfig` and the global singleton
//! used by the CLI.

use huck_config::{Optimizations, VmOptions};
use once_cell::sync::OnceCell;

/// Execution configuration
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Optimization flags handed to the compiler
    pub optimizations: Optimizations,
    /// VM options (tape size)
    pub vm: VmOptions,
    /// Whether to dump the compiled stream before execution
    pub dump_bytecode: bool,
    /// Whether the loader may read and write sibling compile caches
    pub use_cache: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            optimizations: Optimizations::all(),
            vm: VmOptions::default(),
            dump_bytecode: false,
            use_cache: true,
        }
    }
}

// Global config singleton for CLI convenience
static GLOBAL_CONFIG: OnceCell<RunConfig> = OnceCell::new();

/// Initialize global configuration (must be called once before any operation)
///
/// # Panics
/// If config is already initialized
pub fn init(config: RunConfig) {
    GLOBAL_CONFIG
        .set(config)
        .expect("Config already initialized");
}

/// Get global config reference
///
/// # Panics
/// If config is not initialized
pub fn config() -> &'static RunConfig {
    GLOBAL_CONFIG.get().expect("Config not initialized")
}

/// Check if config is initialized
pub fn is_initialized() -> bool {
    GLOBAL_CONFIG.get().is_some()
}
