use anyhow::Result;
use tick_core::{
    storage::{KeyValueStore, StoreError},
    tasks::{Task, TaskList},
};
use tracing::instrument;

const TASKS_KEY: &str = "tasks";

/// Task repository backed by a `KeyValueStore`. The whole collection is
/// serialized as one JSON array under a single fixed key; every save is a
/// full overwrite.
pub struct StoreTaskRepo<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> StoreTaskRepo<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the collection. An absent key yields an empty collection; a
    /// present value that fails to parse is an error, never silently
    /// replaced (the stored file stays untouched for inspection).
    #[instrument(skip(self))]
    pub fn load(&self) -> Result<TaskList> {
        match self.store.get(TASKS_KEY) {
            Ok(bytes) => {
                let tasks: Vec<Task> = serde_json::from_slice(&bytes)?;
                Ok(TaskList::from_tasks(tasks))
            }
            Err(StoreError::NotFound { .. }) => Ok(TaskList::new()),
            Err(err) => Err(err.into()),
        }
    }

    /// Overwrite the stored collection.
    #[instrument(skip_all)]
    pub fn save(&self, list: &TaskList) -> Result<()> {
        let bytes = serde_json::to_vec(list.tasks())?;
        self.store.put(TASKS_KEY, &bytes)?;
        Ok(())
    }

    /// Append a new task. Whitespace-only text is a no-op returning
    /// `None`, with nothing written to the store.
    #[instrument(skip(self, text))]
    pub fn create(&self, text: &str) -> Result<Option<Task>> {
        let mut list = self.load()?;
        match list.add(text) {
            Some(id) => {
                self.save(&list)?;
                Ok(list.get(id).cloned())
            }
            None => Ok(None),
        }
    }

    /// Set a task's completion flag. Unknown ids return `None` without
    /// touching the store; setting the current value skips the write.
    #[instrument(skip(self))]
    pub fn set_completed(&self, id: u64, completed: bool) -> Result<Option<Task>> {
        let mut list = self.load()?;
        match list.get(id).map(|t| t.completed) {
            Some(current) => {
                if current != completed {
                    list.toggle(id);
                    self.save(&list)?;
                }
                Ok(list.get(id).cloned())
            }
            None => Ok(None),
        }
    }

    /// Replace a task's text (trimmed). Unknown ids return `None`.
    #[instrument(skip(self, text))]
    pub fn rename(&self, id: u64, text: &str) -> Result<Option<Task>> {
        let mut list = self.load()?;
        if !list.set_text(id, text) {
            return Ok(None);
        }
        self.save(&list)?;
        Ok(list.get(id).cloned())
    }

    /// Remove a task. Returns whether anything was deleted; unknown ids
    /// leave the store untouched.
    #[instrument(skip(self))]
    pub fn delete(&self, id: u64) -> Result<bool> {
        let mut list = self.load()?;
        if !list.remove(id) {
            return Ok(false);
        }
        self.save(&list)?;
        Ok(true)
    }
}
