//! CLI configuration
//!
//! Log level configuration, per pipeline phase.

use tracing::Level;

/// CLI log configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub global: Level,
    pub compiler: Option<Level>,
    pub loader: Option<Level>,
    pub vm: Option<Level>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            global: Level::WARN,
            compiler: None,
            loader: None,
            vm: None,
        }
    }
}

impl LogConfig {
    /// Get log level for a specific target
    pub fn level_for(&self, target: &str) -> Level {
        match target {
            "huck::compiler" => self.compiler.unwrap_or(self.global),
            "huck::loader" => self.loader.unwrap_or(self.global),
            "huck::vm" => self.vm.unwrap_or(self.global),
            _ => self.global,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_falls_back_to_global() {
        let cfg = LogConfig::default();
        assert_eq!(cfg.level_for("huck::vm"), Level::WARN);
        assert_eq!(cfg.level_for("somewhere::else"), Level::WARN);
    }

    #[test]
    fn test_level_for_phase_override() {
        let cfg = LogConfig {
            vm: Some(Level::TRACE),
            ..LogConfig::default()
        };
        assert_eq!(cfg.level_for("huck::vm"), Level::TRACE);
        assert_eq!(cfg.level_for("huck::compiler"), Level::WARN);
    }
}
