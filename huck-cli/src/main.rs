//! Huck CLI - Command line interface
//!
//! Runs a program from a file (source or compiled container) or from
//! source text on the command line, with optimization toggles, a compile
//! cache, a JSON bytecode dump, and a post-run statistics block.

use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::{ArgGroup, Parser};
use tracing::Level;

mod config;
mod logging;
mod platform;
mod stats;

use crate::config::LogConfig;
use crate::logging::LogFormat;
use crate::platform::print_error_with_source;
use crate::stats::RunStats;

use huck_api::{
    compile_with_config, execute_with_config, init_config, load_program, LoadedProgram, RunConfig,
};
use huck_config::{Optimizations, VmOptions, DEFAULT_TAPE_SIZE};
use huck_core::{disassemble, BytecodeStream, Version};

#[derive(Parser)]
#[command(
    name = "huck",
    about = "Huck - optimizing bytecode compiler and VM for the classic eight-command tape language",
    version,
    group = ArgGroup::new("input").required(true).args(["file", "code"])
)]
struct Cli {
    /// Program file: source text or a compiled .cbf container
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Execute source text passed on the command line
    #[arg(short = 'c', long = "code", value_name = "CODE")]
    code: Option<String>,

    /// Optimization level: 0 disables every optimization
    #[arg(
        short = 'O',
        long = "opt-level",
        default_value_t = 1,
        value_name = "LEVEL"
    )]
    opt_level: u8,

    /// Keep empty loops instead of eliminating them
    #[arg(long)]
    no_empty_loop_elim: bool,

    /// Keep single-command loops instead of rewriting them to one op
    #[arg(long)]
    no_loop_shortcut: bool,

    /// Keep repeated commands instead of run-length compressing them
    #[arg(long)]
    no_compress: bool,

    /// Tape size in cells
    #[arg(long, default_value_t = DEFAULT_TAPE_SIZE, value_name = "CELLS")]
    tape_size: usize,

    /// Compile (and cache) without executing
    #[arg(long)]
    compile_only: bool,

    /// Print the compiled bytecode to stdout as JSON
    #[arg(long)]
    dump_bytecode: bool,

    /// Skip reading and writing the sibling .cbf compile cache
    #[arg(long)]
    no_cache: bool,

    /// Print a statistics block after execution
    #[arg(long)]
    stats: bool,

    /// Log level: silent, error, warn, info, debug, trace
    #[arg(long, default_value = "warn", value_name = "LEVEL")]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value = "compact")]
    log_format: LogFormat,

    /// Also append logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Fold the optimization toggles into the compiler's flag bitmask
    fn optimizations(&self) -> Optimizations {
        if self.opt_level == 0 {
            return Optimizations::empty();
        }

        let mut flags = Optimizations::all();
        if self.no_empty_loop_elim {
            flags.remove(Optimizations::ELIMINATE_EMPTY_LOOPS);
        }
        if self.no_loop_shortcut {
            flags.remove(Optimizations::SHORTCUT_SINGLE_CMD_LOOPS);
        }
        if self.no_compress {
            flags.remove(Optimizations::COMPRESS_REPEATED_CMDS);
        }
        flags
    }
}

fn main() {
    let cli = Cli::parse();

    let Some(level) = parse_log_level(&cli.log_level) else {
        eprintln!("Error: unknown log level '{}'", cli.log_level);
        process::exit(2);
    };
    let log_config = LogConfig {
        global: level,
        ..LogConfig::default()
    };
    logging::init_with_file(&log_config, cli.log_format, cli.log_file.as_ref());

    let run_config = RunConfig {
        optimizations: cli.optimizations(),
        vm: VmOptions {
            tape_size: cli.tape_size,
        },
        dump_bytecode: false,
        use_cache: !cli.no_cache,
    };
    init_config(run_config.clone());

    let total_start = Instant::now();

    // Load or compile the program
    let compile_start = Instant::now();
    let (program, label) = if let Some(code) = cli.code.as_deref() {
        match compile_with_config(code, &run_config) {
            Ok(output) => {
                let program = LoadedProgram {
                    stream: output.stream,
                    version: output.version,
                    pre_compiled: false,
                    cache_path: None,
                };
                (program, "<command line>".to_string())
            }
            Err(e) => {
                print_error_with_source(&e, code);
                process::exit(1);
            }
        }
    } else if let Some(file) = cli.file.as_deref() {
        match load_program(file, &run_config) {
            Ok(program) => (program, file.display().to_string()),
            Err(e) => {
                let source = std::fs::read_to_string(file).unwrap_or_default();
                print_error_with_source(&e, &source);
                process::exit(1);
            }
        }
    } else {
        unreachable!("clap requires FILE or --code");
    };
    let compile_time = compile_start.elapsed();

    let LoadedProgram {
        stream,
        version,
        pre_compiled,
        cache_path,
    } = program;

    if cli.dump_bytecode {
        dump_bytecode_to_stdout(&stream, version);
    }

    if cli.compile_only {
        if let Some(cache) = &cache_path {
            eprintln!("Compiled: {}", cache.display());
        }
        return;
    }

    // Execute
    let exec_start = Instant::now();
    let ops = match execute_with_config(stream, version, &run_config) {
        Ok(output) => output.ops,
        Err(e) => {
            print_error_with_source(&e, "");
            process::exit(1);
        }
    };
    let execution_time = exec_start.elapsed();

    if cli.stats {
        let report = RunStats::new(
            label,
            cache_path,
            pre_compiled,
            compile_time,
            execution_time,
            total_start.elapsed(),
            ops,
        );
        if cli.log_format == LogFormat::Json {
            eprintln!("{}", serde_json::to_string_pretty(&report).unwrap());
        } else {
            eprint!("{}", report);
        }
    }
}

/// Parse log level string
fn parse_log_level(s: &str) -> Option<Level> {
    match s.to_lowercase().as_str() {
        "silent" | "error" => Some(Level::ERROR),
        "warn" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}

/// Print the compiled stream to stdout as JSON
fn dump_bytecode_to_stdout(stream: &BytecodeStream, version: Version) {
    use serde_json::json;

    match disassemble(stream) {
        Ok(instructions) => {
            let bytecode: Vec<serde_json::Value> = instructions
                .iter()
                .map(|ins| match ins.operand {
                    Some(arg) => json!({
                        "offset": ins.offset,
                        "opcode": ins.opcode.name(),
                        "operand": arg,
                    }),
                    None => json!({
                        "offset": ins.offset,
                        "opcode": ins.opcode.name(),
                    }),
                })
                .collect();

            let output = json!({
                "version": version.to_string(),
                "bytecode": bytecode,
            });
            println!("{}", serde_json::to_string_pretty(&output).unwrap());
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_default_flags_enable_everything() {
        let cli = parse(&["huck", "prog.bf"]);
        assert_eq!(cli.optimizations(), Optimizations::all());
        assert_eq!(cli.tape_size, DEFAULT_TAPE_SIZE);
    }

    #[test]
    fn test_opt_level_zero() {
        let cli = parse(&["huck", "-O0", "prog.bf"]);
        assert_eq!(cli.optimizations(), Optimizations::empty());
    }

    #[test]
    fn test_individual_toggles() {
        let cli = parse(&["huck", "--no-compress", "prog.bf"]);
        let flags = cli.optimizations();
        assert!(!flags.contains(Optimizations::COMPRESS_REPEATED_CMDS));
        assert!(flags.contains(Optimizations::ELIMINATE_EMPTY_LOOPS));
        assert!(flags.contains(Optimizations::SHORTCUT_SINGLE_CMD_LOOPS));
    }

    #[test]
    fn test_code_and_file_are_exclusive() {
        assert!(Cli::try_parse_from(["huck", "-c", "+++", "prog.bf"]).is_err());
    }

    #[test]
    fn test_input_is_required() {
        assert!(Cli::try_parse_from(["huck"]).is_err());
    }

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("silent"), Some(Level::ERROR));
        assert_eq!(parse_log_level("TRACE"), Some(Level::TRACE));
        assert_eq!(parse_log_level("noisy"), None);
    }
}
