use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::Task;

const TASKS_FILE: &str = "tasks.json";

#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(err) => write!(f, "io error: {err}"),
            StorageError::Json(err) => write!(f, "json error: {err}"),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        StorageError::Io(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        StorageError::Json(value)
    }
}

/// File-backed persistence for the task collection: a single JSON array
/// under a fixed name in the data directory.
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn ensure_dirs(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.root.join(TASKS_FILE)
    }

    /// A missing record is an empty collection; a present but malformed one
    /// is a hard error so a bad file is never silently overwritten.
    pub fn load_tasks(&self) -> Result<Vec<Task>, StorageError> {
        let path = self.tasks_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        self.load_json(path)
    }

    pub fn save_tasks(&self, tasks: &[Task]) -> Result<(), StorageError> {
        self.write_atomic(self.tasks_path(), &tasks)
    }

    fn load_json<T: DeserializeOwned>(&self, path: PathBuf) -> Result<T, StorageError> {
        let mut file = File::open(path)?;
        let mut buf = String::new();
        file.read_to_string(&mut buf)?;
        Ok(serde_json::from_str(&buf)?)
    }

    fn write_atomic<T: Serialize>(&self, path: PathBuf, data: &T) -> Result<(), StorageError> {
        let temp_path = path.with_extension("tmp");
        let json = serde_json::to_vec_pretty(data)?;
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&json)?;
            file.sync_all()?;
        }
        fs::rename(temp_path, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_task(id: &str, text: &str, completed: bool) -> Task {
        Task {
            id: id.to_string(),
            text: text.to_string(),
            completed,
        }
    }

    fn storage_in(dir: &tempfile::TempDir) -> Storage {
        Storage::new(dir.path().to_path_buf())
    }

    #[test]
    fn load_tasks_returns_empty_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(&dir);
        assert!(storage.load_tasks().unwrap().is_empty());
    }

    #[test]
    fn save_and_load_round_trip_preserves_order_and_fields() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(&dir);
        storage.ensure_dirs().unwrap();

        let tasks = vec![
            make_task("2000", "second", true),
            make_task("1000", "first", false),
        ];
        storage.save_tasks(&tasks).unwrap();
        assert_eq!(storage.load_tasks().unwrap(), tasks);
    }

    #[test]
    fn save_tasks_writes_a_plain_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(&dir);
        storage.ensure_dirs().unwrap();

        storage
            .save_tasks(&[make_task("1000", "only", false)])
            .unwrap();

        let raw = fs::read_to_string(storage.tasks_path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
              { "id": "1000", "text": "only", "completed": false }
            ])
        );
    }

    #[test]
    fn load_tasks_propagates_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(&dir);
        storage.ensure_dirs().unwrap();
        fs::write(storage.tasks_path(), "not json at all").unwrap();

        let err = storage.load_tasks().expect_err("corrupt file should fail");
        assert!(matches!(err, StorageError::Json(_)));
    }

    #[test]
    fn load_tasks_rejects_unexpected_shapes() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(&dir);
        storage.ensure_dirs().unwrap();
        fs::write(storage.tasks_path(), r#"{ "tasks": [] }"#).unwrap();

        assert!(matches!(
            storage.load_tasks(),
            Err(StorageError::Json(_))
        ));
    }

    #[test]
    fn write_atomic_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(&dir);
        storage.ensure_dirs().unwrap();

        storage.save_tasks(&[make_task("1000", "x", false)]).unwrap();
        assert!(storage.tasks_path().exists());
        assert!(!storage.tasks_path().with_extension("tmp").exists());
    }
}
