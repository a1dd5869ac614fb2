//! UI-independent half of a render pass: what each visible card shows.

use chrono::NaiveDate;

use crate::progress::Progress;
use crate::store::TaskStore;
use crate::task::Task;

pub const NO_DUE_DATE: &str = "No due date";

/// Display fields for one visible task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCard {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub category: String,
    pub due: String,
    pub priority: String,
    /// `#tag` labels; empty when the task has no tags.
    pub tags: Vec<String>,
}

impl TaskCard {
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            completed: task.completed,
            category: task.category.display_name().to_string(),
            due: format!("Due {}", format_due(task.due_date)),
            priority: format!("{} priority", task.priority),
            tags: task.tags.iter().map(|t| format!("#{t}")).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardView {
    pub cards: Vec<TaskCard>,
    /// Show the empty-state placeholder.
    pub empty: bool,
    pub progress: Progress,
}

impl BoardView {
    pub fn build(store: &TaskStore) -> Self {
        let cards: Vec<TaskCard> = store
            .visible()
            .into_iter()
            .map(TaskCard::from_task)
            .collect();
        Self {
            empty: cards.is_empty(),
            cards,
            // Progress covers every task, not just the filtered ones.
            progress: Progress::of(store.tasks()),
        }
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }
}

/// Short month/day, e.g. `Mar 5`.
pub fn format_due(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%b %-d").to_string(),
        None => NO_DUE_DATE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{StatusFilter, TaskFilter};
    use crate::task::{Category, Priority, TaskDraft};

    #[test]
    fn format_due_handles_absent_and_present() {
        assert_eq!(format_due(None), "No due date");
        assert_eq!(format_due(NaiveDate::from_ymd_opt(2024, 3, 5)), "Mar 5");
        assert_eq!(format_due(NaiveDate::from_ymd_opt(2024, 12, 31)), "Dec 31");
    }

    #[test]
    fn card_labels() {
        let draft = TaskDraft {
            category: Category::Shopping,
            priority: Priority::High,
            due_date: NaiveDate::from_ymd_opt(2024, 10, 9),
            tags: "food, #Urgent".into(),
            ..Default::default()
        };
        let task = Task::new("Buy milk".into(), &draft);
        let card = TaskCard::from_task(&task);
        assert_eq!(card.category, "Shopping");
        assert_eq!(card.due, "Due Oct 9");
        assert_eq!(card.priority, "High priority");
        assert_eq!(card.tags, vec!["#food", "#urgent"]);
        assert!(!card.completed);
    }

    #[test]
    fn card_without_tags_has_no_tag_labels() {
        let task = Task::new("Plain".into(), &TaskDraft::default());
        let card = TaskCard::from_task(&task);
        assert!(card.tags.is_empty());
        assert_eq!(card.due, "Due No due date");
    }

    #[test]
    fn board_view_tracks_filter_and_empty_state() {
        let mut store = TaskStore::new();
        store
            .create(&TaskDraft {
                title: "A".into(),
                ..Default::default()
            })
            .unwrap();
        let id = store.tasks()[0].id.clone();
        store.toggle_complete(&id);
        store
            .create(&TaskDraft {
                title: "B".into(),
                ..Default::default()
            })
            .unwrap();

        let view = BoardView::build(&store);
        assert!(!view.empty);
        assert_eq!(view.cards.len(), 2);
        assert_eq!(view.progress.percent, 50);
        assert_eq!(view.position(&id), Some(1));

        store.set_filter(TaskFilter {
            status: StatusFilter::Completed,
            search: "b".into(),
            ..Default::default()
        });
        let view = BoardView::build(&store);
        assert!(view.empty);
        assert_eq!(view.progress.percent, 50);
    }

    #[test]
    fn empty_store_renders_empty_state() {
        let view = BoardView::build(&TaskStore::new());
        assert!(view.empty);
        assert_eq!(view.progress.label(), "0%");
    }
}
