pub mod edit;
pub mod error;
pub mod filter;
pub mod intent;
pub mod progress;
pub mod store;
pub mod task;
pub mod view;

pub use edit::EditSession;
pub use error::TodoError;
pub use filter::{filter_tasks, StatusFilter, TaskFilter};
pub use intent::{Applied, Intent};
pub use progress::Progress;
pub use store::TaskStore;
pub use task::{parse_tags, Category, Priority, Task, TaskDraft};
pub use view::{BoardView, TaskCard};
