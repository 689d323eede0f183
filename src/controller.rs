use crate::models::{Filter, Task};
use crate::storage::StorageError;
use crate::store::{StoreError, TaskStore};

/// The finite set of user-originated events the front-end can emit. Each
/// variant maps to exactly one store/controller operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    SubmitNew(String),
    Toggle(String),
    RequestEdit(String),
    SubmitEdit(String),
    CancelEdit,
    Delete(String),
    SetFilter(Filter),
}

/// Edit workflow states. `Editing` holds the id of the task under edit; it
/// is cleared on save or cancel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Idle,
    Editing { id: String },
}

/// Bridge between user interaction events and the task store. Owns the
/// transient UI state: the current filter, the edit workflow, and the
/// add-error indicator. The view re-derives everything it shows from here
/// after every action.
pub struct ViewController {
    store: TaskStore,
    filter: Filter,
    edit: EditState,
    add_error: bool,
}

impl ViewController {
    pub fn new(store: TaskStore) -> Self {
        Self {
            store,
            filter: Filter::default(),
            edit: EditState::Idle,
            add_error: false,
        }
    }

    /// Applies one user action. Validation failures and lookup misses are
    /// absorbed here and reflected by the next render; storage failures
    /// propagate to the caller.
    pub fn apply(&mut self, action: UserAction) -> Result<(), StorageError> {
        match action {
            UserAction::SubmitNew(text) => match self.store.add(&text) {
                Ok(_) => self.add_error = false,
                Err(StoreError::EmptyText) => self.add_error = true,
                Err(StoreError::Storage(err)) => return Err(err),
            },
            UserAction::Toggle(id) => self.store.toggle_completion(&id)?,
            UserAction::RequestEdit(id) => {
                // Stays Idle when the task no longer exists.
                if self.store.get(&id).is_some() {
                    self.edit = EditState::Editing { id };
                }
            }
            UserAction::SubmitEdit(text) => {
                let id = match &self.edit {
                    EditState::Editing { id } => id.clone(),
                    EditState::Idle => return Ok(()),
                };
                match self.store.edit(&id, &text) {
                    // A save on a deleted id is a lookup-miss inside the
                    // store; the workflow still closes.
                    Ok(()) => self.edit = EditState::Idle,
                    // Empty text keeps the workflow open.
                    Err(StoreError::EmptyText) => {}
                    Err(StoreError::Storage(err)) => return Err(err),
                }
            }
            UserAction::CancelEdit => self.edit = EditState::Idle,
            UserAction::Delete(id) => self.store.delete(&id)?,
            UserAction::SetFilter(filter) => self.filter = filter,
        }
        Ok(())
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// The rows to present, in insertion order, under the current filter.
    pub fn visible_tasks(&self) -> Vec<Task> {
        self.store.filtered_view(self.filter)
    }

    /// Placeholder row message for an empty filtered view.
    pub fn empty_message(&self) -> &'static str {
        match self.filter {
            Filter::All => "No tasks yet!",
            Filter::Active => "No active tasks!",
            Filter::Completed => "No completed tasks!",
        }
    }

    pub fn active_count(&self) -> usize {
        self.store.active_count()
    }

    /// True between a rejected add and the next successful one.
    pub fn add_error(&self) -> bool {
        self.add_error
    }

    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.edit, EditState::Editing { .. })
    }

    /// Current text of the task under edit, for pre-filling the modal input.
    pub fn edit_prefill(&self) -> Option<String> {
        match &self.edit {
            EditState::Editing { id } => self.store.get(id).map(|task| task.text.clone()),
            EditState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;

    fn controller_in(dir: &tempfile::TempDir) -> ViewController {
        let store = TaskStore::load(Storage::new(dir.path().to_path_buf())).unwrap();
        ViewController::new(store)
    }

    fn add(controller: &mut ViewController, text: &str) -> String {
        controller
            .apply(UserAction::SubmitNew(text.to_string()))
            .unwrap();
        controller
            .visible_tasks()
            .last()
            .map(|task| task.id.clone())
            .unwrap()
    }

    #[test]
    fn rejected_add_raises_indicator_until_corrected() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller_in(&dir);

        controller
            .apply(UserAction::SubmitNew("   ".to_string()))
            .unwrap();
        assert!(controller.add_error());
        assert!(controller.visible_tasks().is_empty());

        controller
            .apply(UserAction::SubmitNew("Buy milk".to_string()))
            .unwrap();
        assert!(!controller.add_error());
        assert_eq!(controller.visible_tasks().len(), 1);
    }

    #[test]
    fn request_edit_opens_only_for_existing_tasks() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller_in(&dir);

        controller
            .apply(UserAction::RequestEdit("missing".to_string()))
            .unwrap();
        assert_eq!(controller.edit_state(), &EditState::Idle);

        let id = add(&mut controller, "Walk dog");
        controller
            .apply(UserAction::RequestEdit(id.clone()))
            .unwrap();
        assert_eq!(controller.edit_state(), &EditState::Editing { id });
        assert_eq!(controller.edit_prefill(), Some("Walk dog".to_string()));
    }

    #[test]
    fn cancel_returns_the_workflow_to_idle() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller_in(&dir);
        let id = add(&mut controller, "task");

        controller.apply(UserAction::RequestEdit(id)).unwrap();
        assert!(controller.is_editing());
        controller.apply(UserAction::CancelEdit).unwrap();
        assert!(!controller.is_editing());
    }

    #[test]
    fn successful_save_updates_text_and_closes() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller_in(&dir);
        let id = add(&mut controller, "old text");

        controller
            .apply(UserAction::RequestEdit(id.clone()))
            .unwrap();
        controller
            .apply(UserAction::SubmitEdit("new text".to_string()))
            .unwrap();

        assert!(!controller.is_editing());
        assert_eq!(controller.visible_tasks()[0].text, "new text");
        assert_eq!(controller.visible_tasks()[0].id, id);
    }

    #[test]
    fn empty_save_keeps_the_workflow_editing() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller_in(&dir);
        let id = add(&mut controller, "unchanged");

        controller.apply(UserAction::RequestEdit(id)).unwrap();
        controller
            .apply(UserAction::SubmitEdit("   ".to_string()))
            .unwrap();

        assert!(controller.is_editing());
        assert_eq!(controller.visible_tasks()[0].text, "unchanged");
    }

    #[test]
    fn save_on_a_deleted_task_closes_without_changes() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller_in(&dir);
        let id = add(&mut controller, "stale");

        controller
            .apply(UserAction::RequestEdit(id.clone()))
            .unwrap();
        controller.apply(UserAction::Delete(id)).unwrap();
        controller
            .apply(UserAction::SubmitEdit("anything".to_string()))
            .unwrap();

        assert!(!controller.is_editing());
        assert!(controller.visible_tasks().is_empty());
    }

    #[test]
    fn submit_edit_while_idle_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller_in(&dir);
        add(&mut controller, "task");

        controller
            .apply(UserAction::SubmitEdit("ignored".to_string()))
            .unwrap();
        assert_eq!(controller.visible_tasks()[0].text, "task");
    }

    #[test]
    fn set_filter_changes_visible_rows_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller_in(&dir);
        let first = add(&mut controller, "done one");
        add(&mut controller, "open one");
        controller.apply(UserAction::Toggle(first)).unwrap();

        controller
            .apply(UserAction::SetFilter(Filter::Active))
            .unwrap();
        assert_eq!(controller.visible_tasks().len(), 1);
        assert_eq!(controller.visible_tasks()[0].text, "open one");

        // Re-selecting the active filter is a no-op.
        controller
            .apply(UserAction::SetFilter(Filter::Active))
            .unwrap();
        assert_eq!(controller.filter(), Filter::Active);
        assert_eq!(controller.visible_tasks().len(), 1);

        controller
            .apply(UserAction::SetFilter(Filter::Completed))
            .unwrap();
        assert_eq!(controller.visible_tasks()[0].text, "done one");
    }

    #[test]
    fn empty_message_depends_on_the_filter() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller_in(&dir);

        assert_eq!(controller.empty_message(), "No tasks yet!");
        controller
            .apply(UserAction::SetFilter(Filter::Active))
            .unwrap();
        assert_eq!(controller.empty_message(), "No active tasks!");
        controller
            .apply(UserAction::SetFilter(Filter::Completed))
            .unwrap();
        assert_eq!(controller.empty_message(), "No completed tasks!");
    }

    #[test]
    fn active_count_follows_toggles_and_deletes() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller_in(&dir);
        let a = add(&mut controller, "a");
        let b = add(&mut controller, "b");
        assert_eq!(controller.active_count(), 2);

        controller.apply(UserAction::Toggle(a)).unwrap();
        assert_eq!(controller.active_count(), 1);

        controller.apply(UserAction::Delete(b)).unwrap();
        assert_eq!(controller.active_count(), 0);
    }
}
