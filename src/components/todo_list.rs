//! Todo List Component
//!
//! Cards for the loaded todos, each with a "Done" checkbox, and the bulk
//! remove button for completed ones.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::commands;
use crate::context::AppContext;
use crate::models::Todo;
use crate::store::{store_replace_todo, store_set_todos, use_app_store, AppStateStoreFields};
use crate::todos::{nothing_to_remove, render_key, with_done, RemovePlan};

/// A single todo card
#[component]
fn TodoItem(todo: Todo) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let done = todo.done;
    let title = todo.task.clone();
    let subtitle = todo.subtitle();
    let status = todo.priority.map(|p| p.to_string());

    let on_change = move |ev: web_sys::Event| {
        let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
            return;
        };
        let original = todo.clone();
        let updated = with_done(&original, input.checked());
        let config = ctx.config();

        spawn_local(async move {
            match commands::save_todo(&config, &updated).await {
                Ok(saved) => store_replace_todo(&store, &original, saved.unwrap_or(updated)),
                Err(e) => {
                    input.set_checked(original.done);
                    ctx.notify(format!("Could not update \"{}\": {}", original.task, e));
                }
            }
        });
    };

    view! {
        <div class="todo-card" class:done=done>
            <div class="todo-card-header">
                <div class="todo-card-titles">
                    <span class="todo-title">{title}</span>
                    <span class="todo-subtitle">{subtitle}</span>
                </div>
                {status.map(|s| view! { <span class="todo-status">{s}</span> })}
            </div>
            <label class="todo-done" title="Done">
                <input type="checkbox" prop:checked=done on:change=on_change />
                "Done"
            </label>
        </div>
    }
}

/// Loaded todos plus the "Remove" button
#[component]
pub fn TodoList() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();
    let (removing, set_removing) = signal(false);

    let remove = move |_| {
        let plan = RemovePlan::new(&store.todos().read_untracked());
        if plan.done.is_empty() {
            return;
        }
        set_removing.set(true);
        let config = ctx.config();

        spawn_local(async move {
            match commands::remove_todos(&config, &plan.done).await {
                Ok(()) => {
                    log::info!("[TodoList] Removed {} done todos", plan.done.len());
                    store_set_todos(&store, plan.keep);
                }
                Err(e) => ctx.notify(format!("Could not remove todos: {}", e)),
            }
            set_removing.set(false);
        });
    };

    view! {
        <div class="todo-list">
            <div class="todo-cards">
                <For
                    each=move || store.todos().get().into_iter().enumerate()
                    key=|(index, todo)| render_key(*index, todo)
                    children=move |(_, todo)| view! { <TodoItem todo=todo /> }
                />
            </div>
            <button
                id="delete-btn"
                class="attention"
                title="Remove todos that are done"
                disabled=move || removing.get() || nothing_to_remove(&store.todos().read())
                on:click=remove
            >
                "Remove"
            </button>
        </div>
    }
}
