use examdesk_types::Notice;
use leptos::prelude::*;

/// Inline success/error line under a form.
#[component]
pub fn Banner(#[prop(into)] notice: Signal<Option<Notice>>) -> impl IntoView {
    move || {
        notice.get().map(|n| {
            let class = if n.is_error() { "banner banner-error" } else { "banner banner-success" };
            view! { <div class=class role="status">{n.message().to_string()}</div> }
        })
    }
}
