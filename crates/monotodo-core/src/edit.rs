use crate::task::TaskDraft;

/// Staged, uncommitted edits for at most one task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Idle,
    Editing { id: String, draft: TaskDraft },
}

impl EditSession {
    pub fn is_editing(&self) -> bool {
        matches!(self, EditSession::Editing { .. })
    }

    pub fn editing_id(&self) -> Option<&str> {
        match self {
            EditSession::Idle => None,
            EditSession::Editing { id, .. } => Some(id),
        }
    }

    pub fn draft(&self) -> Option<&TaskDraft> {
        match self {
            EditSession::Idle => None,
            EditSession::Editing { draft, .. } => Some(draft),
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut TaskDraft> {
        match self {
            EditSession::Idle => None,
            EditSession::Editing { draft, .. } => Some(draft),
        }
    }

    /// Leave the session, handing back whatever was staged.
    pub fn take(&mut self) -> Option<(String, TaskDraft)> {
        match std::mem::take(self) {
            EditSession::Idle => None,
            EditSession::Editing { id, draft } => Some((id, draft)),
        }
    }
}
