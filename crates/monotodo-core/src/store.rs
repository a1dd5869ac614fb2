use std::collections::HashSet;

use crate::edit::EditSession;
use crate::error::TodoError;
use crate::filter::{filter_tasks, TaskFilter};
use crate::intent::{Applied, Intent};
use crate::task::{parse_tags, Task, TaskDraft};

/// Session state: the ordered task list, the active filter and the edit session.
///
/// Every mutation goes through a named method so the task list can be checked
/// without any rendering surface attached.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    filter: TaskFilter,
    editing: EditSession,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from persisted tasks. Later records reusing an earlier id are dropped.
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let mut seen = HashSet::new();
        let tasks = tasks
            .into_iter()
            .filter(|t| seen.insert(t.id.clone()))
            .collect();
        Self {
            tasks,
            ..Self::default()
        }
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

    pub fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.filter = filter;
    }

    pub fn visible(&self) -> Vec<&Task> {
        filter_tasks(&self.tasks, &self.filter)
    }

    pub fn editing(&self) -> &EditSession {
        &self.editing
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing.editing_id()
    }

    // -- Primitives --

    pub fn find(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn insert_front(&mut self, task: Task) -> Result<(), TodoError> {
        if self.find(&task.id).is_some() {
            return Err(TodoError::InvalidInput(format!("duplicate id {}", task.id)));
        }
        self.tasks.insert(0, task);
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(idx))
    }

    /// Write staged fields onto a task. A blank title keeps the current one.
    pub fn replace_fields(&mut self, id: &str, draft: &TaskDraft) -> Result<&Task, TodoError> {
        let task = self
            .find_mut(id)
            .ok_or_else(|| TodoError::NotFound(id.to_string()))?;
        if let Some(title) = draft.trimmed_title() {
            task.title = title.to_string();
        }
        task.category = draft.category;
        task.priority = draft.priority;
        task.due_date = draft.due_date;
        task.tags = parse_tags(&draft.tags);
        Ok(&*task)
    }

    // -- CRUD --

    /// Prepend a new task built from composer fields. Blank titles are rejected
    /// without touching the list.
    pub fn create(&mut self, draft: &TaskDraft) -> Result<&Task, TodoError> {
        let title = draft
            .trimmed_title()
            .ok_or_else(|| TodoError::InvalidInput("title is required".into()))?;
        let task = Task::new(title.to_string(), draft);
        self.insert_front(task)?;
        Ok(&self.tasks[0])
    }

    /// Returns false when no task has this id.
    pub fn delete(&mut self, id: &str) -> bool {
        self.remove(id).is_some()
    }

    /// Remove every completed task, keeping the rest in order. Returns how many went.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        before - self.tasks.len()
    }

    pub fn toggle_complete(&mut self, id: &str) -> bool {
        match self.find_mut(id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    pub fn set_completed(&mut self, id: &str, completed: bool) -> bool {
        match self.find_mut(id) {
            Some(task) => {
                task.completed = completed;
                true
            }
            None => false,
        }
    }

    // -- Edit session --

    /// Stage the task's current fields. Unknown ids leave the session idle.
    pub fn begin_edit(&mut self, id: &str) -> Option<&TaskDraft> {
        let draft = TaskDraft::from_task(self.find(id)?);
        self.editing = EditSession::Editing {
            id: id.to_string(),
            draft,
        };
        self.editing.draft()
    }

    pub fn draft_mut(&mut self) -> Option<&mut TaskDraft> {
        self.editing.draft_mut()
    }

    /// Commit staged fields and go idle. Returns false if nothing was written.
    pub fn save_edit(&mut self) -> bool {
        match self.editing.take() {
            Some((id, draft)) => self.replace_fields(&id, &draft).is_ok(),
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = EditSession::Idle;
    }

    /// Single entry point for typed intents.
    pub fn apply(&mut self, intent: Intent) -> Result<Applied, TodoError> {
        let changed = match intent {
            Intent::Create(draft) => {
                self.create(&draft)?;
                true
            }
            Intent::ToggleComplete(id) => self.toggle_complete(&id),
            Intent::Delete(id) => self.delete(&id),
            Intent::ClearCompleted => self.clear_completed() > 0,
            Intent::BeginEdit(id) => {
                self.begin_edit(&id);
                false
            }
            Intent::SaveEdit => self.save_edit(),
            Intent::CancelEdit => {
                self.cancel_edit();
                false
            }
            Intent::SetFilter(filter) => {
                self.set_filter(filter);
                false
            }
            Intent::ToggleTheme => false,
        };
        Ok(Applied::from_changed(changed))
    }
}
