use std::collections::HashMap;

use serde::Deserialize;

use crate::model::task::{Category, Priority};

/// Configuration from config.toml (all sections optional)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: TaskDefaults,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Field values applied to new tasks when the user gives none
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskDefaults {
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub priority: Priority,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UiConfig {
    /// Color overrides, e.g. `highlight = "#FB4196"` under [ui.colors]
    #[serde(default)]
    pub colors: HashMap<String, String>,
}
