//! Notice Bar Component
//!
//! Dismissible banner for failed backend calls.

use leptos::prelude::*;

use crate::context::AppContext;

#[component]
pub fn NoticeBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    move || {
        ctx.notice.get().map(|message| {
            view! {
                <div class="notice-bar" role="alert">
                    <span class="notice-text">{message}</span>
                    <button class="notice-dismiss" on:click=move |_| ctx.dismiss()>"×"</button>
                </div>
            }
        })
    }
}
