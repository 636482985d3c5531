use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::io::recovery::{atomic_write, log_salvage};

/// Durable key-value storage contract. Values are whole serialized
/// documents; a write replaces the previous value entirely.
pub trait KvBackend {
    /// Missing key → None
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
    /// Preserve a payload that failed to parse. Default: stderr only.
    fn salvage(&self, key: &str, reason: &str, payload: &str) {
        eprintln!("warning: {}: {} ({} bytes dropped)", key, reason, payload.len());
    }
}

/// One file per key inside the data directory (`<dir>/<key>.json`)
pub struct FileKv {
    dir: PathBuf,
}

impl FileKv {
    pub fn new(dir: &Path) -> io::Result<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(FileKv {
            dir: dir.to_path_buf(),
        })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KvBackend for FileKv {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        atomic_write(&self.key_path(key), value.as_bytes())
    }

    fn salvage(&self, key: &str, reason: &str, payload: &str) {
        eprintln!("warning: {}: {}, saved to recovery.log", key, reason);
        log_salvage(&self.dir, key, reason, payload);
    }
}

/// In-memory backend for tests
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: HashMap<String, String>,
}

impl KvBackend for MemoryKv {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
