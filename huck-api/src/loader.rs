//! Program loader with the sibling compile cache
//!
//! A path can hold either source text or a compiled container; the loader
//! decides by looking at the first four bytes. Source files with the
//! standard extension get a sibling `.cbf` cache: a cache at least as new
//! as the source is loaded instead of recompiling, and a fresh compile is
//! written back. Cache trouble is never fatal; the loader recompiles and
//! moves on.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use huck_core::binary::{ext, MAGIC};
use huck_core::{
    read_container, write_container, BytecodeStream, Compiler, Version, COMPILER_VERSION,
};

use crate::config::RunConfig;
use crate::error::HuckError;

/// A program ready for execution
#[derive(Debug)]
pub struct LoadedProgram {
    /// Compiled bytecode
    pub stream: BytecodeStream,
    /// Compiler version recorded with the bytecode
    pub version: Version,
    /// Whether the bytecode was loaded instead of compiled
    pub pre_compiled: bool,
    /// The cache file this program was read from or written to
    pub cache_path: Option<PathBuf>,
}

/// Load a program from a path, compiling it if it is source text
pub fn load_program(path: &Path, config: &RunConfig) -> Result<LoadedProgram, HuckError> {
    let bytes = fs::read(path)?;

    if bytes.starts_with(&MAGIC) {
        let (stream, version) = read_container(&bytes)?;
        debug!(
            target: "huck::loader",
            path = %path.display(),
            %version,
            "loaded compiled container"
        );
        return Ok(LoadedProgram {
            stream,
            version,
            pre_compiled: true,
            cache_path: None,
        });
    }

    let cache_path = cache_path_for(path);
    if config.use_cache {
        if let Some(cache) = cache_path.as_deref() {
            if let Some(program) = load_cache(path, cache) {
                return Ok(program);
            }
        }
    }

    // unmapped bytes are comments, so lossy decoding is harmless
    let source = String::from_utf8_lossy(&bytes);
    let stream = Compiler::new(config.optimizations).compile(&source)?;
    let version = COMPILER_VERSION;

    if config.use_cache {
        if let Some(cache) = cache_path.as_deref() {
            write_cache(cache, &stream, version);
        }
    }

    Ok(LoadedProgram {
        stream,
        version,
        pre_compiled: false,
        cache_path,
    })
}

/// Sibling cache path for a source file; only standard-extension sources
/// get one
fn cache_path_for(path: &Path) -> Option<PathBuf> {
    match path.extension() {
        Some(e) if e == ext::SOURCE => Some(path.with_extension(ext::COMPILED)),
        _ => None,
    }
}

/// Try the sibling cache; any failure falls through to a fresh compile
fn load_cache(source: &Path, cache: &Path) -> Option<LoadedProgram> {
    let source_mtime = fs::metadata(source).and_then(|m| m.modified()).ok()?;
    let cache_mtime = fs::metadata(cache).and_then(|m| m.modified()).ok()?;
    if cache_mtime < source_mtime {
        debug!(target: "huck::loader", cache = %cache.display(), "cache is stale");
        return None;
    }

    let bytes = match fs::read(cache) {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(target: "huck::loader", cache = %cache.display(), %err, "cache read failed");
            return None;
        }
    };

    match read_container(&bytes) {
        Ok((stream, version)) => {
            debug!(
                target: "huck::loader",
                cache = %cache.display(),
                %version,
                "loaded from cache"
            );
            Some(LoadedProgram {
                stream,
                version,
                pre_compiled: true,
                cache_path: Some(cache.to_path_buf()),
            })
        }
        Err(err) => {
            warn!(target: "huck::loader", cache = %cache.display(), %err, "cache is corrupt");
            None
        }
    }
}

/// Write the compile cache; failures are logged and swallowed
fn write_cache(cache: &Path, stream: &BytecodeStream, version: Version) {
    let bytes = write_container(stream, version);
    match fs::write(cache, bytes) {
        Ok(()) => debug!(target: "huck::loader", cache = %cache.display(), "cache written"),
        Err(err) => {
            warn!(target: "huck::loader", cache = %cache.display(), %err, "cache write failed")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huck_core::COMPILER_VERSION;
    use std::fs;
    use std::path::PathBuf;

    struct TempDir(PathBuf);

    impl TempDir {
        fn new(label: &str) -> Self {
            let dir = std::env::temp_dir().join(format!(
                "huck-loader-{}-{}",
                label,
                std::process::id()
            ));
            fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        fn path(&self, name: &str) -> PathBuf {
            self.0.join(name)
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn test_cache_path_for() {
        assert_eq!(
            cache_path_for(Path::new("demo/hello.bf")),
            Some(PathBuf::from("demo/hello.cbf"))
        );
        assert_eq!(cache_path_for(Path::new("hello.txt")), None);
        assert_eq!(cache_path_for(Path::new("hello")), None);
    }

    #[test]
    fn test_load_source_writes_cache() {
        let dir = TempDir::new("write");
        let source = dir.path("prog.bf");
        fs::write(&source, "+++").unwrap();

        let program = load_program(&source, &RunConfig::default()).unwrap();
        assert!(!program.pre_compiled);
        assert_eq!(program.version, COMPILER_VERSION);
        assert!(dir.path("prog.cbf").exists());
    }

    #[test]
    fn test_fresh_cache_is_loaded() {
        let dir = TempDir::new("fresh");
        let source = dir.path("prog.bf");
        fs::write(&source, "+++").unwrap();

        // first load compiles and writes the cache, second load reads it
        let first = load_program(&source, &RunConfig::default()).unwrap();
        let second = load_program(&source, &RunConfig::default()).unwrap();
        assert!(!first.pre_compiled);
        assert!(second.pre_compiled);
        assert_eq!(second.stream.as_bytes(), first.stream.as_bytes());
    }

    #[test]
    fn test_corrupt_cache_falls_back_to_source() {
        let dir = TempDir::new("corrupt");
        let source = dir.path("prog.bf");
        fs::write(&source, "+++").unwrap();
        fs::write(dir.path("prog.cbf"), b"garbage").unwrap();

        let program = load_program(&source, &RunConfig::default()).unwrap();
        assert!(!program.pre_compiled);
    }

    #[test]
    fn test_cache_disabled() {
        let dir = TempDir::new("disabled");
        let source = dir.path("prog.bf");
        fs::write(&source, "+++").unwrap();

        let config = RunConfig {
            use_cache: false,
            ..RunConfig::default()
        };
        let program = load_program(&source, &config).unwrap();
        assert!(!program.pre_compiled);
        assert!(!dir.path("prog.cbf").exists());
    }

    #[test]
    fn test_container_file_loads_directly() {
        let dir = TempDir::new("container");
        let stream = Compiler::default().compile("+++").unwrap();
        let path = dir.path("prog.cbf");
        fs::write(&path, write_container(&stream, COMPILER_VERSION)).unwrap();

        let program = load_program(&path, &RunConfig::default()).unwrap();
        assert!(program.pre_compiled);
        assert_eq!(program.stream.as_bytes(), stream.as_bytes());
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = load_program(Path::new("/nonexistent/prog.bf"), &RunConfig::default())
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(err, HuckError::Io(_)));
    }
}
