use std::fmt;

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TodoError;

/// Wire format of a due date, also accepted by the date inputs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Work,
    Personal,
    Shopping,
    Health,
    Other,
}

impl Category {
    pub const ALL: &[Category] = &[
        Category::Work,
        Category::Personal,
        Category::Shopping,
        Category::Health,
        Category::Other,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Work => "Work",
            Category::Personal => "Personal",
            Category::Shopping => "Shopping",
            Category::Health => "Health",
            Category::Other => "Other",
        }
    }

    /// Next value in `ALL`, wrapping around.
    pub fn next(self) -> Self {
        cycle(Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(Self::ALL, self, Self::ALL.len() - 1)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: &[Priority] = &[Priority::Low, Priority::Medium, Priority::High];

    pub fn display_name(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    pub fn next(self) -> Self {
        cycle(Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(Self::ALL, self, Self::ALL.len() - 1)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, step: usize) -> T {
    let idx = all.iter().position(|v| *v == current).unwrap_or(0);
    all[(idx + step) % all.len()]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub category: Category,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub completed: bool,
    /// Recorded for the data model only; never used for ordering.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

/// Older records may carry `"tags": null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Task {
    /// Build a fresh, incomplete task from validated composer fields.
    pub fn new(title: String, draft: &TaskDraft) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            category: draft.category,
            due_date: draft.due_date,
            priority: draft.priority,
            tags: parse_tags(&draft.tags),
            completed: false,
            // Stored with millisecond precision, keep the in-memory value identical.
            created_at: Utc::now().trunc_subsecs(3),
        }
    }

    /// Haystack used by the free-text search: title and tags, space joined, lowercased.
    pub fn search_text(&self) -> String {
        let mut text = self.title.clone();
        text.push(' ');
        text.push_str(&self.tags.join(" "));
        text.to_lowercase()
    }
}

/// Staged field values shared by the composer and the edit dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub category: Category,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    /// Raw comma-separated tag text, parsed on commit.
    pub tags: String,
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            category: Category::Work,
            priority: Priority::Medium,
            due_date: None,
            tags: String::new(),
        }
    }
}

impl TaskDraft {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            category: task.category,
            priority: task.priority,
            due_date: task.due_date,
            tags: task.tags.join(", "),
        }
    }

    /// Reset after a successful create. The category selection is kept.
    pub fn clear(&mut self) {
        self.title.clear();
        self.due_date = None;
        self.priority = Priority::Medium;
        self.tags.clear();
    }

    /// The trimmed title, or `None` when it is blank.
    pub fn trimmed_title(&self) -> Option<&str> {
        let title = self.title.trim();
        (!title.is_empty()).then_some(title)
    }
}

/// Parse comma-separated tag input. Duplicates are kept.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|segment| {
            let segment = segment.trim();
            segment
                .strip_prefix('#')
                .unwrap_or(segment)
                .trim()
                .to_lowercase()
        })
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Parse date input text. Blank input means "no due date".
pub fn parse_due_date(input: &str) -> Result<Option<NaiveDate>, TodoError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map(Some)
        .map_err(|_| TodoError::InvalidInput(format!("expected YYYY-MM-DD, got {input:?}")))
}

pub fn format_date_input(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}
