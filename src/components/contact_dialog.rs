//! Contact Dialog Component
//!
//! Modal list of contacts for assigning a todo. Pages are loaded as the list
//! is scrolled; the filter restarts paging from the first page.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::AppContext;
use crate::models::Contact;
use crate::picker::{near_end, ContactPicker, PageRequest};

fn row_id(contact_id: i64) -> String {
    format!("contact-row-{}", contact_id)
}

/// Scroll a contact row into view once it has been rendered
fn reveal_row(contact_id: i64, delay_ms: u32) {
    Timeout::new(delay_ms, move || {
        let row = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(&row_id(contact_id)));
        if let Some(row) = row {
            row.scroll_into_view();
        }
    })
    .forget();
}

type ListRef = NodeRef<leptos::html::Div>;

/// Fetch one page and fold it into the picker
fn fetch_page(ctx: AppContext, picker: RwSignal<ContactPicker>, list: ListRef, request: PageRequest) {
    let config = ctx.config();
    spawn_local(async move {
        log::debug!("[ContactDialog] Requesting page {} (filter {:?})", request.page, request.filter);
        match commands::get_contact_page(&config, request.page, request.page_size, &request.filter).await {
            Ok(page) => {
                let count = page.content.len();
                let applied = picker.try_update(|p| p.apply_page(&request, page)).unwrap_or(false);
                if applied {
                    log::info!("[ContactDialog] Appended {} contacts from page {}", count, request.page);
                    let target = picker.try_with_untracked(|p| p.reveal_target()).flatten();
                    if let Some(id) = target {
                        reveal_row(id, config.reveal_delay_ms);
                    }
                    // measure once the new rows are in the DOM
                    Timeout::new(0, move || load_more_if_near_end(ctx, picker, list)).forget();
                }
            }
            Err(e) => {
                log::error!("[ContactDialog] Page {} failed: {}", request.page, e);
                picker.update(|p| p.fail_page(&request, format!("Could not load contacts: {}", e)));
            }
        }
    });
}

/// Request the next page when the list end is in view, including when the
/// rows do not fill the container yet
fn load_more_if_near_end(ctx: AppContext, picker: RwSignal<ContactPicker>, list: ListRef) {
    let Some(element) = list.get_untracked() else {
        return;
    };
    if !near_end(element.scroll_top(), element.client_height(), element.scroll_height()) {
        return;
    }
    let mut request = None;
    picker.maybe_update(|p| {
        request = p.load_more();
        request.is_some()
    });
    if let Some(request) = request {
        fetch_page(ctx, picker, list, request);
    }
}

/// Contact picker dialog
///
/// Props:
/// - opened: whether the dialog is shown; every false -> true transition starts a fresh session
/// - on_assign_contact: called with the chosen contact on "Assign", or `None` on "Cancel"
#[component]
pub fn ContactDialog(
    #[prop(into)] opened: Signal<bool>,
    #[prop(into)] on_assign_contact: Callback<Option<Contact>>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let page_size = ctx.config.with_value(|c| c.page_size);
    let picker = RwSignal::new(ContactPicker::new(page_size));

    let list = ListRef::new();
    let fetch = move |request: PageRequest| fetch_page(ctx, picker, list, request);

    // Reset and load the first page whenever the dialog opens
    Effect::new(move |was_open: Option<bool>| {
        let is_open = opened.get();
        if is_open && was_open != Some(true) {
            if let Some(request) = picker.try_update(|p| p.open()) {
                fetch(request);
            }
        }
        is_open
    });

    let on_scroll = move |_| load_more_if_near_end(ctx, picker, list);

    let on_retry = move |_| {
        let mut request = None;
        picker.maybe_update(|p| {
            request = p.retry();
            request.is_some()
        });
        if let Some(request) = request {
            fetch(request);
        }
    };

    let on_filter = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        let mut request = None;
        picker.maybe_update(|p| {
            request = p.set_filter(&value);
            request.is_some()
        });
        if let Some(request) = request {
            fetch(request);
        }
    };

    let on_assign = move |_| {
        if let Some(contact) = picker.with_untracked(|p| p.assignment()) {
            on_assign_contact.run(Some(contact));
        }
    };

    view! {
        <Show when=move || opened.get()>
            <div class="dialog-backdrop">
                <div class="dialog" role="dialog" aria-modal="true">
                    <header class="dialog-header">
                        <h3>"Assign Todo"</h3>
                    </header>

                    <div class="contact-table-scroll" node_ref=list on:scroll=on_scroll>
                        <table class="contact-table">
                            <thead>
                                <tr>
                                    <th></th>
                                    <th>"Name"</th>
                                    <th>"Email"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || picker.with(|p| p.rows().to_vec())
                                    key=|contact| contact.id
                                    children=move |contact| {
                                        let id = contact.id;
                                        let checked = move || picker.with(|p| p.is_highlighted(id));
                                        let name = contact.display_name();
                                        let email = contact.email.clone();
                                        let select = move || picker.update(|p| p.highlight(contact.clone()));
                                        let select_row = select.clone();

                                        view! {
                                            <tr
                                                id=row_id(id)
                                                class="contact-row"
                                                class:selected=checked
                                                on:click=move |_| select_row()
                                            >
                                                <td>
                                                    <input
                                                        type="radio"
                                                        prop:checked=checked
                                                        on:change=move |_| select()
                                                    />
                                                </td>
                                                <td>{name}</td>
                                                <td>{email}</td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                        <Show when=move || picker.with(|p| p.is_loading())>
                            <div class="loading">"Loading..."</div>
                        </Show>
                        {move || picker.with(|p| p.error().map(str::to_string)).map(|message| view! {
                            <div class="dialog-error" role="alert">
                                <span>{message}</span>
                                <button type="button" on:click=on_retry>"Retry"</button>
                            </div>
                        })}
                    </div>

                    <footer class="dialog-footer">
                        <input
                            class="filter-input"
                            type="text"
                            placeholder="Filter"
                            prop:value=move || picker.with(|p| p.filter().to_string())
                            on:change=on_filter
                        />
                        <button type="button" on:click=move |_| on_assign_contact.run(None)>
                            "Cancel"
                        </button>
                        <button
                            type="button"
                            class="emphasized"
                            disabled=move || !picker.with(|p| p.can_assign())
                            on:click=on_assign
                        >
                            "Assign"
                        </button>
                    </footer>
                </div>
            </div>
        </Show>
    }
}
