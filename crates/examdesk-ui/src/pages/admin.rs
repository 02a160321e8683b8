use leptos::prelude::*;

use crate::components::nav::{DashboardTab, Nav};
use crate::pages::exams::ExamsTab;
use crate::pages::users::UsersTab;

/// Drop both session cookies and go back to the login page.
#[server]
pub async fn logout() -> Result<(), ServerFnError> {
    use examdesk_types::TokenStore;

    use crate::server::{app_state, write_cookies};

    let state = app_state()?;
    let mut cookies = state.session_cookies();
    cookies.clear();
    write_cookies(cookies)?;
    tracing::info!("session cleared");
    leptos_axum::redirect("/login");
    Ok(())
}

#[component]
pub fn AdminPage() -> impl IntoView {
    let (activeTab, setActiveTab) = signal(DashboardTab::Users);

    view! {
        <div class="app-layout">
            <Nav active=activeTab set_active=setActiveTab />
            <main class="main-content">
                <div class="dashboard-header">
                    <h1>{move || activeTab.get().title()}</h1>
                    <p class="subtitle">{move || activeTab.get().subtitle()}</p>
                </div>
                {move || match activeTab.get() {
                    DashboardTab::Users => view! { <UsersTab /> }.into_any(),
                    DashboardTab::Exams => view! { <ExamsTab /> }.into_any(),
                }}
            </main>
        </div>
    }
}
