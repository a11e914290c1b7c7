use serde::{Deserialize, Serialize};

/// A unit of to-do work. The only persisted entity; the on-disk layout is
/// a bare JSON array of these objects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: u64,
    pub text: String,
    pub completed: bool,
}

/// Ordered task collection plus the counter that mints ids.
///
/// Insertion order is display order. Toggling completion mutates in place
/// and never reorders; the pending/completed views are derived by
/// filtering on demand, not cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
    next_id: u64,
}

impl Default for TaskList {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted tasks. The counter resumes past the largest
    /// id seen, so a reload never reissues one.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter().map(|t| t.id).max().map_or(1, |m| m + 1);
        Self { tasks, next_id }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Append a new pending task and return its id. Whitespace-only text
    /// is rejected silently and the collection is left unchanged.
    pub fn add(&mut self, text: &str) -> Option<u64> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            text: text.to_string(),
            completed: false,
        });
        Some(id)
    }

    /// Remove the task with this id. Returns false (and changes nothing)
    /// for unknown ids.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Flip completion in place, preserving the task's position. Returns
    /// false for unknown ids.
    pub fn toggle(&mut self, id: u64) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    /// Replace a task's text with the trimmed input. Unlike `add`, an
    /// empty result is written as-is: only creation enforces non-empty.
    pub fn set_text(&mut self, id: u64, text: &str) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.text = text.trim().to_string();
                true
            }
            None => false,
        }
    }

    /// Tasks still to do, in insertion order.
    pub fn pending(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.completed)
    }

    /// Finished tasks, in insertion order.
    pub fn completed(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| t.completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_appends_pending_task_with_trimmed_text() {
        let mut list = TaskList::new();
        let id = list.add("  Buy milk  ").expect("add");

        assert_eq!(list.len(), 1);
        let task = list.get(id).expect("task");
        assert_eq!(task.text, "Buy milk");
        assert!(!task.completed);
    }

    #[test]
    fn add_rejects_whitespace_only_text() {
        let mut list = TaskList::new();
        assert_eq!(list.add(""), None);
        assert_eq!(list.add("   "), None);
        assert!(list.is_empty());
    }

    #[test]
    fn ids_are_unique_and_increase() {
        let mut list = TaskList::new();
        let a = list.add("a").expect("add");
        let b = list.add("b").expect("add");
        let c = list.add("c").expect("add");
        assert!(a < b && b < c);
    }

    #[test]
    fn counter_resumes_past_largest_loaded_id() {
        let mut list = TaskList::from_tasks(vec![
            Task {
                id: 3,
                text: "old".into(),
                completed: false,
            },
            Task {
                id: 7,
                text: "older".into(),
                completed: true,
            },
        ]);
        let id = list.add("fresh").expect("add");
        assert_eq!(id, 8);
    }

    #[test]
    fn toggle_twice_restores_original_state() {
        let mut list = TaskList::new();
        list.add("first").expect("add");
        let id = list.add("second").expect("add");
        list.add("third").expect("add");

        let original = list.get(id).expect("task").clone();
        assert!(list.toggle(id));
        assert!(list.get(id).expect("task").completed);
        assert!(list.toggle(id));

        assert_eq!(list.get(id), Some(&original));
        // Position in the underlying collection is preserved.
        assert_eq!(list.tasks()[1].id, id);
    }

    #[test]
    fn toggle_unknown_id_changes_nothing() {
        let mut list = TaskList::new();
        list.add("only").expect("add");
        let snapshot = list.clone();
        assert!(!list.toggle(999));
        assert_eq!(list, snapshot);
    }

    #[test]
    fn remove_deletes_exactly_that_id() {
        let mut list = TaskList::new();
        let a = list.add("a").expect("add");
        let b = list.add("b").expect("add");

        assert!(list.remove(a));
        assert_eq!(list.len(), 1);
        assert!(list.get(a).is_none());
        assert!(list.get(b).is_some());
    }

    #[test]
    fn remove_unknown_id_changes_nothing() {
        let mut list = TaskList::new();
        list.add("a").expect("add");
        let snapshot = list.clone();
        assert!(!list.remove(999));
        assert_eq!(list, snapshot);
    }

    #[test]
    fn set_text_trims_replacement() {
        let mut list = TaskList::new();
        let id = list.add("draft").expect("add");
        assert!(list.set_text(id, "  final  "));
        assert_eq!(list.get(id).expect("task").text, "final");
    }

    #[test]
    fn set_text_does_not_enforce_non_empty() {
        // Only creation rejects empty text; an edit may save it.
        let mut list = TaskList::new();
        let id = list.add("draft").expect("add");
        assert!(list.set_text(id, "   "));
        assert_eq!(list.get(id).expect("task").text, "");
    }

    #[test]
    fn partitions_cover_the_collection_and_are_disjoint() {
        let mut list = TaskList::new();
        let a = list.add("a").expect("add");
        let b = list.add("b").expect("add");
        let c = list.add("c").expect("add");
        list.toggle(b);

        let pending: Vec<u64> = list.pending().map(|t| t.id).collect();
        let completed: Vec<u64> = list.completed().map(|t| t.id).collect();

        assert_eq!(pending, vec![a, c]);
        assert_eq!(completed, vec![b]);
        assert_eq!(pending.len() + completed.len(), list.len());
        assert!(pending.iter().all(|id| !completed.contains(id)));
    }

    #[test]
    fn partitions_preserve_relative_order() {
        let mut list = TaskList::new();
        let ids: Vec<u64> = ["a", "b", "c", "d"]
            .iter()
            .map(|t| list.add(t).expect("add"))
            .collect();
        list.toggle(ids[0]);
        list.toggle(ids[2]);

        let completed: Vec<u64> = list.completed().map(|t| t.id).collect();
        assert_eq!(completed, vec![ids[0], ids[2]]);
    }
}
