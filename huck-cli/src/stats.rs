//! Execution statistics
//!
//! The post-run report: where the program came from, how long each phase
//! took, and the executed instruction count.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

/// Statistics for one compile-and-run cycle
#[derive(Debug, Serialize)]
pub struct RunStats {
    /// Program source: a path or a command-line marker
    pub source: String,
    /// Sibling compile cache, when one was involved
    pub compiled: Option<String>,
    /// Whether execution used pre-compiled bytecode
    pub pre_compiled: bool,
    pub compile_time_ms: f64,
    pub execution_time_ms: f64,
    pub total_time_ms: f64,
    pub ops_total: u64,
    pub ops_per_sec: u64,
}

impl RunStats {
    pub fn new(
        source: String,
        compiled: Option<PathBuf>,
        pre_compiled: bool,
        compile_time: Duration,
        execution_time: Duration,
        total_time: Duration,
        ops_total: u64,
    ) -> Self {
        let exec_secs = execution_time.as_secs_f64();
        let ops_per_sec = if exec_secs > 0.0 {
            (ops_total as f64 / exec_secs) as u64
        } else {
            0
        };

        Self {
            source,
            compiled: compiled.map(|p| p.display().to_string()),
            pre_compiled,
            compile_time_ms: compile_time.as_secs_f64() * 1000.0,
            execution_time_ms: execution_time.as_secs_f64() * 1000.0,
            total_time_ms: total_time.as_secs_f64() * 1000.0,
            ops_total,
            ops_per_sec,
        }
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[Stats]")?;
        writeln!(f, "Source:           {}", self.source)?;
        writeln!(
            f,
            "Compiled Source:  {}",
            self.compiled.as_deref().unwrap_or("-")
        )?;
        writeln!(
            f,
            "Pre-Compiled?:    {}",
            if self.pre_compiled { "Yes" } else { "No" }
        )?;
        writeln!(f, "Compilation Time: {:.3} ms", self.compile_time_ms)?;
        writeln!(f, "Execution Time:   {:.3} ms", self.execution_time_ms)?;
        writeln!(f, "Total Time:       {:.3} ms", self.total_time_ms)?;
        writeln!(f, "Ops Total:        {}", self.ops_total)?;
        writeln!(f, "Ops/Sec:          {}", self.ops_per_sec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ops_per_sec() {
        let stats = RunStats::new(
            "prog.bf".to_string(),
            None,
            false,
            Duration::from_millis(1),
            Duration::from_secs(2),
            Duration::from_secs(2),
            1_000_000,
        );
        assert_eq!(stats.ops_per_sec, 500_000);
    }

    #[test]
    fn test_zero_duration_does_not_divide() {
        let stats = RunStats::new(
            "prog.bf".to_string(),
            None,
            false,
            Duration::ZERO,
            Duration::ZERO,
            Duration::ZERO,
            42,
        );
        assert_eq!(stats.ops_per_sec, 0);
    }

    #[test]
    fn test_display_block() {
        let stats = RunStats::new(
            "prog.bf".to_string(),
            Some(PathBuf::from("prog.cbf")),
            true,
            Duration::from_millis(1),
            Duration::from_millis(10),
            Duration::from_millis(12),
            1234,
        );
        let text = stats.to_string();
        assert!(text.contains("Source:           prog.bf"));
        assert!(text.contains("Compiled Source:  prog.cbf"));
        assert!(text.contains("Pre-Compiled?:    Yes"));
        assert!(text.contains("Ops Total:        1234"));
    }
}
