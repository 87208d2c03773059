//! UI Components
//!
//! Leptos components for the todo page.

mod contact_dialog;
mod new_todo_form;
mod todo_list;
mod notice_bar;

pub use contact_dialog::ContactDialog;
pub use new_todo_form::NewTodoForm;
pub use todo_list::TodoList;
pub use notice_bar::NoticeBar;
