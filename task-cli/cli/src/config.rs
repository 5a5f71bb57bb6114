use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "task-cli";
pub const ENV_PREFIX: &str = "TASK_CLI";

fn default_data_file() -> PathBuf {
    PathBuf::from("tasks.json")
}

fn default_separator() -> String {
    "_".repeat(60)
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Settings {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    #[serde(default = "default_separator")]
    pub separator: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            separator: default_separator(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Loads settings from an optional TOML file and `TASK_CLI_*` environment variables.
    ///
    /// Without an explicit path, `task-cli.toml` in the working directory is used if present.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };
        let settings = config::Config::builder()
            .add_source(file)
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn log_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::WARN)
    }
}
