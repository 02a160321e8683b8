use leptos::prelude::*;

/// Single count with a label, used for the user statistics row.
#[component]
pub fn StatCard(label: &'static str, value: Signal<usize>, accent: &'static str) -> impl IntoView {
    view! {
        <div class=format!("card stat-card {accent}")>
            <div class="stat-label">{label}</div>
            <div class="stat-value">{move || value.get()}</div>
        </div>
    }
}
