use std::fmt;

use monotodo_core::Task;
use tracing::{debug, info, warn};

use crate::{KeyValueStore, StoreError};

/// Key holding the JSON array of tasks.
pub const TASKS_KEY: &str = "monochrome_todo_v1";
/// Key holding the theme marker.
pub const THEME_KEY: &str = "monochrome_theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Only the exact `"light"` marker selects the light theme.
    pub fn from_marker(marker: &str) -> Self {
        if marker == "light" {
            Theme::Light
        } else {
            Theme::Dark
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads and writes the task list and theme preference under fixed keys.
pub struct TaskPersistence {
    store: Box<dyn KeyValueStore>,
}

impl TaskPersistence {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Never fails: unreadable or malformed data yields an empty list and the
    /// dark theme, with a warning logged.
    pub fn load(&self) -> (Vec<Task>, Theme) {
        let tasks = self.load_tasks().unwrap_or_else(|e| {
            warn!("discarding stored tasks: {e}");
            Vec::new()
        });
        let theme = match self.store.get_opt(THEME_KEY) {
            Ok(Some(marker)) => Theme::from_marker(&marker),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!("reading theme: {e}");
                Theme::default()
            }
        };
        info!(tasks = tasks.len(), theme = %theme, "loaded session");
        (tasks, theme)
    }

    fn load_tasks(&self) -> Result<Vec<Task>, StoreError> {
        match self.store.get_opt(TASKS_KEY)? {
            Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(&raw)?),
            _ => Ok(Vec::new()),
        }
    }

    /// Overwrite the stored list with the full sequence.
    pub fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(tasks)?;
        self.store.put(TASKS_KEY, &raw)?;
        debug!(tasks = tasks.len(), "saved tasks");
        Ok(())
    }

    pub fn save_theme(&self, theme: Theme) -> Result<(), StoreError> {
        self.store.put(THEME_KEY, theme.as_str())?;
        debug!(theme = %theme, "saved theme");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use chrono::NaiveDate;
    use monotodo_core::{Category, Priority, TaskDraft, TaskStore};

    fn persistence() -> (TaskPersistence, MemoryStore) {
        let mem = MemoryStore::new();
        (TaskPersistence::new(Box::new(mem.clone())), mem)
    }

    fn sample_tasks() -> Vec<Task> {
        let mut store = TaskStore::new();
        store
            .create(&TaskDraft {
                title: "Buy milk".into(),
                category: Category::Personal,
                priority: Priority::High,
                due_date: None,
                tags: "Food, urgent".into(),
            })
            .unwrap();
        store
            .create(&TaskDraft {
                title: "Report".into(),
                category: Category::Work,
                priority: Priority::Low,
                due_date: NaiveDate::from_ymd_opt(2025, 1, 31),
                tags: String::new(),
            })
            .unwrap();
        let id = store.tasks()[1].id.clone();
        store.toggle_complete(&id);
        store.tasks().to_vec()
    }

    #[test]
    fn save_then_load_roundtrip() {
        let (persist, _) = persistence();
        let tasks = sample_tasks();
        persist.save(&tasks).unwrap();
        let (loaded, theme) = persist.load();
        assert_eq!(loaded, tasks);
        assert_eq!(theme, Theme::Dark);
    }

    #[test]
    fn missing_record_loads_empty() {
        let (persist, _) = persistence();
        let (tasks, theme) = persist.load();
        assert!(tasks.is_empty());
        assert_eq!(theme, Theme::Dark);
    }

    #[test]
    fn malformed_record_loads_empty() {
        let (persist, mem) = persistence();
        for raw in ["{not json", "null", "{}", "[{\"id\":1}]", "   "] {
            mem.put(TASKS_KEY, raw).unwrap();
            let (tasks, _) = persist.load();
            assert!(tasks.is_empty(), "input {raw:?}");
        }
    }

    #[test]
    fn save_overwrites_whole_list() {
        let (persist, mem) = persistence();
        let tasks = sample_tasks();
        persist.save(&tasks).unwrap();
        persist.save(&tasks[1..]).unwrap();
        let raw = mem.get(TASKS_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["title"], "Buy milk");
        assert_eq!(value[0]["tags"], serde_json::json!(["food", "urgent"]));
        assert!(value[0]["dueDate"].is_null());
    }

    #[test]
    fn reads_records_written_by_other_clients() {
        let (persist, mem) = persistence();
        mem.put(
            TASKS_KEY,
            r#"[{"id":"k3j9x0a","title":"Water plants","category":"Personal",
                "dueDate":"2024-06-01","priority":"Medium","tags":["home"],
                "completed":true,"createdAt":1717200000000}]"#,
        )
        .unwrap();
        let (tasks, _) = persist.load();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, "k3j9x0a");
        assert!(tasks[0].completed);
        assert_eq!(tasks[0].due_date, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(tasks[0].created_at.timestamp_millis(), 1717200000000);
    }

    #[test]
    fn null_tags_keep_the_rest_of_the_list() {
        let (persist, mem) = persistence();
        mem.put(
            TASKS_KEY,
            r#"[{"id":"a1","title":"Tagged","category":"Work","dueDate":null,
                "priority":"High","tags":["x"],"completed":false,"createdAt":1700000000000},
               {"id":"b2","title":"Untagged","category":"Other","dueDate":null,
                "priority":"Low","tags":null,"completed":true,"createdAt":1700000000001}]"#,
        )
        .unwrap();
        let (tasks, _) = persist.load();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].tags, vec!["x".to_string()]);
        assert_eq!(tasks[1].title, "Untagged");
        assert!(tasks[1].tags.is_empty());
    }

    #[test]
    fn theme_marker_roundtrip() {
        let (persist, mem) = persistence();
        persist.save_theme(Theme::Light).unwrap();
        assert_eq!(mem.get(THEME_KEY).unwrap(), "light");
        assert_eq!(persist.load().1, Theme::Light);

        persist.save_theme(Theme::Dark).unwrap();
        assert_eq!(mem.get(THEME_KEY).unwrap(), "dark");
        assert_eq!(persist.load().1, Theme::Dark);

        mem.put(THEME_KEY, "Light").unwrap();
        assert_eq!(persist.load().1, Theme::Dark);
    }

    #[test]
    fn theme_toggle() {
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::Light.toggle().toggle(), Theme::Light);
    }
}
