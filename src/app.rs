//! Todo Frontend App
//!
//! The todo page: new-todo form above the list of todos.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::commands;
use crate::components::{NewTodoForm, NoticeBar, TodoList};
use crate::config::ClientConfig;
use crate::context::AppContext;
use crate::store::{store_set_todos, AppState};

#[component]
pub fn App() -> impl IntoView {
    let config = ClientConfig::from_document();
    log::debug!("[App] Endpoint prefix {:?}, page size {}", config.endpoint_prefix, config.page_size);

    // Provide context to all children
    let ctx = AppContext::new(config, signal(None));
    provide_context(ctx);
    let store = Store::new(AppState::default());
    provide_context(store);

    // Load all todos once on mount
    Effect::new(move |_| {
        let config = ctx.config();
        spawn_local(async move {
            match commands::find_all_todos(&config).await {
                Ok(loaded) => {
                    log::info!("[App] Loaded {} todos", loaded.len());
                    store_set_todos(&store, loaded);
                }
                Err(e) => ctx.notify(format!("Could not load todos: {}", e)),
            }
        });
    });

    view! {
        <main class="todo-page">
            <NoticeBar />

            <section class="panel">
                <NewTodoForm />
            </section>

            <section class="panel">
                <TodoList />
            </section>
        </main>
    }
}
