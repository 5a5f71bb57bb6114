use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use task_cli_core::Task;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to access task file")]
    Io(#[from] std::io::Error),
    #[error("Failed to read tasks as JSON")]
    Json(#[from] serde_json::Error),
}

/// Somewhere the session's tasks are kept between runs.
pub trait TaskStorage {
    fn load_all(&self) -> Result<Vec<Task>, StorageError>;
    fn save_all(&self, tasks: &[Task]) -> Result<(), StorageError>;
}

/// Stores every task as one JSON array in a single file.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file that a save is written to before being moved into place.
    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl TaskStorage for JsonFileStorage {
    /// Returns no tasks when the file does not exist yet.
    fn load_all(&self) -> Result<Vec<Task>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no task file yet");
                return Ok(vec![]);
            }
            Err(error) => return Err(error.into()),
        };
        let tasks: Vec<Task> = serde_json::from_str(&contents)?;
        debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    fn save_all(&self, tasks: &[Task]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(tasks)?;
        let staging = self.staging_path();
        fs::write(&staging, json)?;
        fs::rename(&staging, &self.path)?;
        debug!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }
}
