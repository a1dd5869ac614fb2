pub mod task_board;
pub mod task_form;
