//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::Todo;
use crate::todos;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Todos loaded from the backend, in display order
    pub todos: Vec<Todo>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace the whole list
pub fn store_set_todos(store: &AppStore, loaded: Vec<Todo>) {
    *store.todos().write() = loaded;
}

/// Append a freshly saved todo
pub fn store_add_todo(store: &AppStore, todo: Todo) {
    store.todos().write().push(todo);
}

/// Swap the entry `original` refers to for the backend's version
pub fn store_replace_todo(store: &AppStore, original: &Todo, saved: Todo) {
    let replaced = todos::replace_todo(&mut store.todos().write(), original, saved);
    if !replaced {
        log::debug!("[TodoList] Todo {:?} no longer listed, update ignored", original.id);
    }
}
