use crate::filter::TaskFilter;
use crate::task::TaskDraft;

/// A typed request emitted by an interactive control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Create(TaskDraft),
    ToggleComplete(String),
    Delete(String),
    ClearCompleted,
    BeginEdit(String),
    SaveEdit,
    CancelEdit,
    SetFilter(TaskFilter),
    /// Presentation only; the store leaves it to the UI layer.
    ToggleTheme,
}

/// What applying an intent did to the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Changed,
    Unchanged,
}

impl Applied {
    pub fn from_changed(changed: bool) -> Self {
        if changed {
            Applied::Changed
        } else {
            Applied::Unchanged
        }
    }

    pub fn changed(self) -> bool {
        self == Applied::Changed
    }
}
