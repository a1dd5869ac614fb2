use std::fmt;

use crate::task::{Category, Priority, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub const ALL: &[StatusFilter] = &[
        StatusFilter::All,
        StatusFilter::Active,
        StatusFilter::Completed,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Active => "Active",
            StatusFilter::Completed => "Completed",
        }
    }

    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Active,
            StatusFilter::Active => StatusFilter::Completed,
            StatusFilter::Completed => StatusFilter::All,
        }
    }

    fn admits(self, completed: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => !completed,
            StatusFilter::Completed => completed,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Criteria limiting the visible tasks. `None` on priority/category means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: StatusFilter,
    pub priority: Option<Priority>,
    pub category: Option<Category>,
    pub search: String,
}

impl TaskFilter {
    /// All four criteria must hold.
    pub fn matches(&self, task: &Task) -> bool {
        if !self.status.admits(task.completed) {
            return false;
        }
        if self.priority.is_some_and(|p| p != task.priority) {
            return false;
        }
        if self.category.is_some_and(|c| c != task.category) {
            return false;
        }
        let query = self.search.trim().to_lowercase();
        query.is_empty() || task.search_text().contains(&query)
    }

    pub fn is_default(&self) -> bool {
        self.status == StatusFilter::All
            && self.priority.is_none()
            && self.category.is_none()
            && self.search.trim().is_empty()
    }

    /// all -> Low -> Medium -> High -> all
    pub fn cycle_priority(&mut self) {
        self.priority = match self.priority {
            None => Priority::ALL.first().copied(),
            Some(p) if Some(&p) == Priority::ALL.last() => None,
            Some(p) => Some(p.next()),
        };
    }

    /// all -> each category in order -> all
    pub fn cycle_category(&mut self) {
        self.category = match self.category {
            None => Category::ALL.first().copied(),
            Some(c) if Some(&c) == Category::ALL.last() => None,
            Some(c) => Some(c.next()),
        };
    }

    /// Short summary for the filter bar, e.g. `status: Active | priority: all`.
    pub fn summary(&self) -> String {
        let priority = self.priority.map_or("all", |p| p.display_name());
        let category = self.category.map_or("all", |c| c.display_name());
        let mut out = format!(
            "status: {} | priority: {} | category: {}",
            self.status, priority, category
        );
        if !self.search.trim().is_empty() {
            out.push_str(&format!(" | search: {}", self.search.trim()));
        }
        out
    }
}

/// Order-preserving subsequence of `tasks` admitted by `filter`.
pub fn filter_tasks<'a>(tasks: &'a [Task], filter: &TaskFilter) -> Vec<&'a Task> {
    tasks.iter().filter(|t| filter.matches(t)).collect()
}
