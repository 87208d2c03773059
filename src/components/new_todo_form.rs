//! New Todo Form Component
//!
//! Form for creating todos, with the contact dialog for assignment.

use leptos::portal::Portal;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::ContactDialog;
use crate::context::AppContext;
use crate::form::{SubmitOutcome, TodoField, TodoForm, TASK_PRESETS};
use crate::models::Contact;
use crate::store::{store_add_todo, use_app_store};

/// Error message under a field, when it has one
#[component]
fn FieldError(form: RwSignal<TodoForm>, field: TodoField) -> impl IntoView {
    move || {
        form.with(|f| f.error(field).map(str::to_string)).map(|message| {
            view! { <div class="field-error">{message}</div> }
        })
    }
}

/// Form for creating new todos
#[component]
pub fn NewTodoForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let form = RwSignal::new(TodoForm::new());
    let (dialog_opened, set_dialog_opened) = signal(false);

    let has_error = move |field: TodoField| form.with(|f| f.error(field).is_some());

    let on_assign_contact = move |contact: Option<Contact>| {
        if let Some(contact) = contact {
            form.update(|f| f.assign(contact));
        }
        set_dialog_opened.set(false);
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(submitted) = form.try_update(|f| f.begin_submit()).flatten() else {
            return;
        };
        let config = ctx.config();

        spawn_local(async move {
            let result = commands::save_todo(&config, &submitted).await;
            match form.try_update(|f| f.finish_submit(submitted, result)) {
                Some(SubmitOutcome::Saved(todo)) => {
                    log::info!("[TodoForm] Saved todo {:?}", todo.id);
                    store_add_todo(&store, todo);
                }
                Some(SubmitOutcome::Rejected) => {
                    log::info!("[TodoForm] Save rejected by backend validation");
                }
                Some(SubmitOutcome::Failed(e)) => {
                    ctx.notify(format!("Could not save todo: {}", e));
                }
                None => {}
            }
        });
    };

    view! {
        <form class="todo-form" on:submit=submit>
            <h2 class="form-title">"New Todo"</h2>

            <div class="form-grid">
                <label class="form-item">
                    <span class="form-label">"Task"</span>
                    <input
                        id="task"
                        type="text"
                        list="task-presets"
                        placeholder="Task"
                        autocomplete="off"
                        class:error=move || has_error(TodoField::Task)
                        prop:value=move || form.with(|f| f.draft().task.clone())
                        on:input=move |ev| form.update(|f| f.set_task(&event_target_value(&ev)))
                    />
                    <datalist id="task-presets">
                        {TASK_PRESETS.iter().map(|preset| view! { <option value=*preset></option> }).collect_view()}
                    </datalist>
                    <FieldError form=form field=TodoField::Task />
                </label>

                <label class="form-item">
                    <span class="form-label">"Description"</span>
                    <input
                        name="description"
                        type="text"
                        placeholder="Description"
                        class:error=move || has_error(TodoField::Description)
                        prop:value=move || form.with(|f| f.draft().description.clone().unwrap_or_default())
                        on:input=move |ev| form.update(|f| f.set_description(&event_target_value(&ev)))
                    />
                    <FieldError form=form field=TodoField::Description />
                </label>

                <label class="form-item">
                    <span class="form-label">"Priority"</span>
                    <input
                        name="priority"
                        type="number"
                        step="1"
                        placeholder="Priority"
                        class:error=move || has_error(TodoField::Priority)
                        prop:value=move || form.with(|f| f.draft().priority.map(|p| p.to_string()).unwrap_or_default())
                        on:change=move |ev| form.update(|f| f.set_priority(&event_target_value(&ev)))
                    />
                    <FieldError form=form field=TodoField::Priority />
                </label>

                <label class="form-item">
                    <span class="form-label">"Due date"</span>
                    <input
                        name="deadline"
                        type="date"
                        class:error=move || has_error(TodoField::Deadline)
                        prop:value=move || {
                            form.with(|f| f.draft().deadline.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default())
                        }
                        on:change=move |ev| form.update(|f| f.set_deadline(&event_target_value(&ev)))
                    />
                    <FieldError form=form field=TodoField::Deadline />
                </label>

                <div class="form-item form-actions">
                    <Portal>
                        <ContactDialog opened=dialog_opened on_assign_contact=on_assign_contact />
                    </Portal>
                    <button
                        type="button"
                        class:error=move || has_error(TodoField::Assigned)
                        on:click=move |_| set_dialog_opened.update(|opened| *opened = !*opened)
                    >
                        {move || form.with(|f| f.assign_label())}
                    </button>
                    <button type="submit" class="emphasized" disabled=move || form.with(|f| f.is_submitting())>
                        "Add"
                    </button>
                    <FieldError form=form field=TodoField::Assigned />
                </div>
            </div>
        </form>
    }
}
