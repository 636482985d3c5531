use chrono::{NaiveDate, Utc};
use serde::Serialize;

use crate::io::kv::KvBackend;
use crate::model::task::{Category, Priority, Task};

/// Fixed key the task list is stored under
pub const TASKS_KEY: &str = "tasks";

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("task not found: {0}")]
    NotFound(i64),
    #[error("could not serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("could not write tasks: {0}")]
    Write(#[from] std::io::Error),
}

/// Task counters for the header line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub total: usize,
    pub done: usize,
    pub remaining: usize,
}

/// Owns the authoritative ordered task list and its durable backend.
///
/// Every mutation rewrites the whole list to the backend before returning,
/// so the stored state never lags the in-memory state. Mutations address
/// tasks by id, never by display position — callers looking at a filtered
/// or re-sorted view can't corrupt the wrong task.
pub struct TaskStore {
    tasks: Vec<Task>,
    backend: Box<dyn KvBackend>,
}

impl TaskStore {
    /// Load the task list from the backend. A missing key yields an empty
    /// list; a malformed payload is salvaged through the backend and the
    /// store starts empty. Never an error for the caller.
    pub fn load(backend: Box<dyn KvBackend>) -> Self {
        let tasks = match backend.get(TASKS_KEY) {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str::<Vec<Task>>(&raw) {
                // Stored order is authoritative (it may be manually
                // reordered), so no re-partition on load.
                Ok(tasks) => tasks,
                Err(e) => {
                    backend.salvage(TASKS_KEY, &format!("malformed payload: {}", e), &raw);
                    Vec::new()
                }
            },
        };
        TaskStore { tasks, backend }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn counts(&self) -> Counts {
        let done = self.tasks.iter().filter(|t| t.done).count();
        Counts {
            total: self.tasks.len(),
            done,
            remaining: self.tasks.len() - done,
        }
    }

    /// Add a task. Whitespace-only text is a silent no-op (returns None,
    /// no id consumed). Returns the assigned id otherwise.
    pub fn add(
        &mut self,
        text: &str,
        category: Category,
        priority: Priority,
        due_date: Option<NaiveDate>,
    ) -> Result<Option<i64>, StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let id = self.next_id();
        self.tasks
            .push(Task::new(id, text.to_string(), category, priority, due_date));
        partition_undone_first(&mut self.tasks);
        self.persist()?;
        Ok(Some(id))
    }

    /// Flip a task's done flag and re-apply the default partition
    pub fn toggle(&mut self, id: i64) -> Result<(), StoreError> {
        let task = self.find_mut(id)?;
        task.done = !task.done;
        partition_undone_first(&mut self.tasks);
        self.persist()
    }

    /// Overwrite the mutable fields of a task, keeping id, done flag, and
    /// position. Whitespace-only text is a silent no-op.
    pub fn edit(
        &mut self,
        id: i64,
        text: &str,
        category: Category,
        priority: Priority,
        due_date: Option<NaiveDate>,
    ) -> Result<(), StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }
        let task = self.find_mut(id)?;
        task.text = text.to_string();
        task.category = category;
        task.priority = priority;
        task.due_date = due_date;
        self.persist()
    }

    pub fn delete(&mut self, id: i64) -> Result<(), StoreError> {
        let idx = self.position(id)?;
        self.tasks.remove(idx);
        self.persist()
    }

    /// Move a task to `index` in the authoritative list (clamped to the
    /// list length). The manual order persists until the next add/toggle
    /// re-applies the default partition.
    pub fn move_to(&mut self, id: i64, index: usize) -> Result<(), StoreError> {
        let from = self.position(id)?;
        let task = self.tasks.remove(from);
        let to = index.min(self.tasks.len());
        self.tasks.insert(to, task);
        self.persist()
    }

    /// Discard all tasks. One-way, no confirmation step.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.tasks.clear();
        self.persist()
    }

    fn find_mut(&mut self, id: i64) -> Result<&mut Task, StoreError> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    fn position(&self, id: i64) -> Result<usize, StoreError> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    /// Fresh id: creation time in milliseconds, bumped past every existing
    /// id so rapid adds within one millisecond stay distinct.
    fn next_id(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let max = self.tasks.iter().map(|t| t.id).max().unwrap_or(0);
        now.max(max + 1)
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let payload = serde_json::to_string_pretty(&self.tasks)?;
        self.backend.set(TASKS_KEY, &payload)?;
        Ok(())
    }
}

/// Stable partition: undone tasks before done tasks, each group keeping
/// its prior relative order.
fn partition_undone_first(tasks: &mut [Task]) {
    tasks.sort_by_key(|t| t.done);
}
