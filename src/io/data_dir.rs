use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Error type for data-directory and config I/O
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("could not determine a data directory (no home directory?)")]
    NoDataDir,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Resolve the data directory: explicit override, then $PETAL_DIR,
/// then the per-user default.
pub fn resolve_data_dir(override_dir: Option<&Path>) -> Result<PathBuf, DataError> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }
    if let Ok(dir) = std::env::var("PETAL_DIR")
        && !dir.is_empty()
    {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("", "", "petal")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(DataError::NoDataDir)
}
