use chrono::Utc;

use crate::models::{Filter, Task};
use crate::storage::{Storage, StorageError};

#[derive(Debug)]
pub enum StoreError {
    EmptyText,
    Storage(StorageError),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::EmptyText => write!(f, "task text is empty"),
            StoreError::Storage(err) => write!(f, "storage error: {err}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        StoreError::Storage(value)
    }
}

/// Authoritative task collection. Insertion order is preserved and every
/// mutation persists the full collection before returning.
///
/// Lookup misses are tolerated: toggling, editing, or deleting an id that is
/// no longer present leaves the collection unchanged (the write still
/// happens, matching the save-after-every-operation contract).
pub struct TaskStore {
    storage: Storage,
    tasks: Vec<Task>,
    last_id_ms: i64,
}

impl TaskStore {
    /// Hydrates from storage. A missing record starts an empty collection;
    /// a malformed one fails here so startup can report it.
    pub fn load(storage: Storage) -> Result<Self, StorageError> {
        let tasks = storage.load_tasks()?;
        // Seed the id generator past every stored id so restored
        // collections keep the uniqueness guarantee even under clock skew.
        let last_id_ms = tasks
            .iter()
            .filter_map(|task| task.id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);
        Ok(Self {
            storage,
            tasks,
            last_id_ms,
        })
    }

    pub fn add(&mut self, text: &str) -> Result<Task, StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StoreError::EmptyText);
        }
        let task = Task {
            id: self.next_id(),
            text: text.to_string(),
            completed: false,
        };
        self.tasks.push(task.clone());
        self.save()?;
        Ok(task)
    }

    pub fn toggle_completion(&mut self, id: &str) -> Result<(), StorageError> {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.completed = !task.completed;
        }
        self.save()
    }

    /// Replaces the text of the matching task, keeping id and completion
    /// state. Empty trimmed text is rejected before anything is touched.
    pub fn edit(&mut self, id: &str, text: &str) -> Result<(), StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StoreError::EmptyText);
        }
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.text = text.to_string();
        }
        self.save()?;
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> Result<(), StorageError> {
        self.tasks.retain(|task| task.id != id);
        self.save()
    }

    /// Ordered subsequence of the collection for the given filter. Pure
    /// read; insertion order is preserved within the result.
    pub fn filtered_view(&self, filter: Filter) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect()
    }

    pub fn active_count(&self) -> usize {
        self.tasks.iter().filter(|task| !task.completed).count()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn save(&self) -> Result<(), StorageError> {
        self.storage.save_tasks(&self.tasks)
    }

    // Millisecond-timestamp ids, bumped forward by one when two creations
    // land on the same millisecond.
    fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        let id_ms = if now > self.last_id_ms {
            now
        } else {
            self.last_id_ms + 1
        };
        self.last_id_ms = id_ms;
        id_ms.to_string()
    }
}
