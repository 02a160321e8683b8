use leptos::prelude::*;

use crate::pages::admin::Logout;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DashboardTab {
    Users,
    Exams,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 2] = [DashboardTab::Users, DashboardTab::Exams];

    pub fn title(&self) -> &'static str {
        match self {
            DashboardTab::Users => "User Management",
            DashboardTab::Exams => "Exam Management",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            DashboardTab::Users => "Manage user accounts, roles, and permissions",
            DashboardTab::Exams => "View and manage all exam records",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            DashboardTab::Users => "Users",
            DashboardTab::Exams => "Exams",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            DashboardTab::Users => "\u{263A}",
            DashboardTab::Exams => "\u{2630}",
        }
    }
}

#[component]
pub fn Nav(active: ReadSignal<DashboardTab>, set_active: WriteSignal<DashboardTab>) -> impl IntoView {
    let logoutAction = ServerAction::<Logout>::new();

    view! {
        <nav class="nav-sidebar">
            <div class="nav-brand">
                <div class="brand-icon">"E"</div>
                <span class="brand-text">"Examdesk Admin"</span>
            </div>
            <ul class="nav-links">
                {DashboardTab::ALL
                    .into_iter()
                    .map(|tab| {
                        view! {
                            <li class=move || {
                                if active.get() == tab { "nav-item active" } else { "nav-item" }
                            }>
                                <button type="button" on:click=move |_| set_active.set(tab)>
                                    <span class="nav-icon">{tab.icon()}</span>
                                    <span>{tab.label()}</span>
                                </button>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
            <div class="nav-logout">
                <ActionForm action=logoutAction>
                    <button type="submit" class="btn btn-ghost">
                        "Logout"
                    </button>
                </ActionForm>
            </div>
        </nav>
    }
}
