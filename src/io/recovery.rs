use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Write a file atomically: write to a temp file in the same directory,
/// then rename over the target.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Append a salvaged payload to recovery.log in the data directory.
///
/// Called when a stored value fails to parse. The raw payload is kept under
/// a timestamped header so nothing is lost when the store falls back to an
/// empty list. Best-effort: a failed append is reported on stderr only.
pub fn log_salvage(data_dir: &Path, key: &str, reason: &str, payload: &str) {
    let mut entry = String::new();
    entry.push_str(&format!(
        "## {} — {}: {}\n\n",
        chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        key,
        reason,
    ));
    entry.push_str(payload);
    if !payload.ends_with('\n') {
        entry.push('\n');
    }
    entry.push('\n');

    if let Err(e) = append_entry(data_dir, &entry) {
        eprintln!("warning: could not write recovery.log: {}", e);
    }
}

fn append_entry(data_dir: &Path, entry: &str) -> io::Result<()> {
    std::fs::create_dir_all(data_dir)?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join("recovery.log"))?;
    file.write_all(entry.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("test.txt");

        atomic_write(&path, b"hello world").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello world");

        // Overwrite
        atomic_write(&path, b"goodbye").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "goodbye");
    }

    #[test]
    fn salvage_appends_payload_under_header() {
        let tmp = TempDir::new().unwrap();
        log_salvage(tmp.path(), "tasks", "malformed payload", "not json {{{");
        log_salvage(tmp.path(), "tasks", "malformed payload", "second");

        let log = std::fs::read_to_string(tmp.path().join("recovery.log")).unwrap();
        assert!(log.contains("tasks: malformed payload"));
        assert!(log.contains("not json {{{"));
        assert!(log.contains("second"));
        assert_eq!(log.matches("## ").count(), 2);
    }

    #[test]
    fn salvage_creates_missing_data_dir() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("nested");
        log_salvage(&dir, "tasks", "malformed payload", "x");
        assert!(dir.join("recovery.log").exists());
    }
}
