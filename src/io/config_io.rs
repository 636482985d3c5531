use std::fs;
use std::path::Path;

use crate::io::data_dir::DataError;
use crate::model::config::Config;

/// Read config.toml from the data directory. A missing file yields the
/// default config; a malformed file is an error (config is user-authored,
/// unlike stored task data, so silently dropping it would hide mistakes).
pub fn read_config(data_dir: &Path) -> Result<Config, DataError> {
    let path = data_dir.join("config.toml");
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = fs::read_to_string(&path).map_err(|e| DataError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::{Category, Priority};
    use tempfile::TempDir;

    #[test]
    fn missing_config_is_default() {
        let tmp = TempDir::new().unwrap();
        let config = read_config(tmp.path()).unwrap();
        assert_eq!(config.defaults.category, Category::Personal);
        assert_eq!(config.defaults.priority, Priority::Medium);
    }

    #[test]
    fn reads_config_from_data_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[defaults]\npriority = \"High\"\n",
        )
        .unwrap();
        let config = read_config(tmp.path()).unwrap();
        assert_eq!(config.defaults.priority, Priority::High);
        assert_eq!(config.defaults.category, Category::Personal);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "defaults = [broken").unwrap();
        assert!(read_config(tmp.path()).is_err());
    }
}
