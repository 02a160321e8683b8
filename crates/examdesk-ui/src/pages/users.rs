use examdesk_types::{ApiFailure, EditOutcome, Notice, Role, User, UserDirectory, UserPatch};
use leptos::prelude::*;

use crate::components::banner::Banner;
use crate::components::stat_card::StatCard;
use crate::components::toast::use_toasts;

const NO_CHANGES: &str = "No changes to save.";

#[server]
async fn list_users() -> Result<Result<Vec<User>, ApiFailure>, ServerFnError> {
    use crate::server::{app_state, require_credentials};

    let state = app_state()?;
    let credentials = require_credentials().await?;
    Ok(examdesk_client::users::fetch_users(&state.client, &credentials).await)
}

#[server]
async fn update_user(id: i64, patch: UserPatch) -> Result<Result<EditOutcome, ApiFailure>, ServerFnError> {
    use crate::server::{app_state, require_credentials};

    let state = app_state()?;
    let credentials = require_credentials().await?;
    Ok(examdesk_client::users::submit_edit(&state.client, &credentials, id, &patch).await)
}

#[server]
async fn resend_user_code(email: String) -> Result<Notice, ServerFnError> {
    let state = crate::server::app_state()?;
    Ok(examdesk_client::users::resend_activation_for(&state.client, email.trim()).await)
}

fn status_badge(ok: bool, yes: &'static str, no: &'static str) -> impl IntoView {
    let class = if ok { "badge badge-ok" } else { "badge badge-muted" };
    view! { <span class=class>{if ok { yes } else { no }}</span> }
}

#[component]
pub fn UsersTab() -> impl IntoView {
    let directory = RwSignal::new(UserDirectory {
        loading: true,
        ..Default::default()
    });
    #[allow(unused_variables)]
    let (resending, setResending) = signal(Option::<i64>::None);

    #[cfg(feature = "hydrate")]
    {
        use examdesk_types::{FailureKind, USERS_FETCH_FAILED};
        use wasm_bindgen_futures::spawn_local;

        spawn_local(async move {
            let result = list_users()
                .await
                .unwrap_or_else(|_| Err(ApiFailure::new(FailureKind::Network, USERS_FETCH_FAILED)));
            directory.update(|d| d.loaded(result));
        });
    }

    let stats = Memo::new(move |_| directory.with(|d| d.stats()));
    let total = Signal::derive(move || stats.get().total);
    let active = Signal::derive(move || stats.get().active);
    let verified = Signal::derive(move || stats.get().verified);
    let pending = Signal::derive(move || stats.get().pending);

    let toasts = use_toasts();

    let handleResend = move |user: User| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen_futures::spawn_local;
            setResending.set(Some(user.id));
            spawn_local(async move {
                let notice = resend_user_code(user.email)
                    .await
                    .unwrap_or_else(|e| Notice::Error(e.to_string()));
                setResending.set(None);
                if let Some(t) = toasts {
                    t.notify(&notice);
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (user, toasts);
        }
    };

    view! {
        <div class="stats-grid">
            <StatCard label="Total Users" value=total accent="accent-blue" />
            <StatCard label="Active" value=active accent="accent-green" />
            <StatCard label="Verified" value=verified accent="accent-purple" />
            <StatCard label="Pending" value=pending accent="accent-amber" />
        </div>
        {move || {
            let (loading, error) = directory.with(|d| (d.loading, d.error.clone()));
            if loading {
                view! {
                    <div class="loading">
                        <div class="spinner"></div>
                        "Loading users..."
                    </div>
                }
                    .into_any()
            } else if let Some(message) = error {
                view! {
                    <div class="card">
                        <p class="login-error">{message}</p>
                    </div>
                }
                    .into_any()
            } else {
                view! {
                    <div class="card">
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>"User"</th>
                                    <th>"Role"</th>
                                    <th>"Status"</th>
                                    <th>"Verification"</th>
                                    <th>"Actions"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || directory.with(|d| d.users.clone())
                                    key=|user| (user.id, user.role, user.is_active, user.is_verified, user.first_name.clone(), user.last_name.clone())
                                    let:user
                                >
                                    {
                                        let id = user.id;
                                        let unverified = !user.is_verified;
                                        let resendTarget = user.clone();
                                        view! {
                                            <tr>
                                                <td>
                                                    <div class="user-cell">
                                                        <span class="avatar">{user.initial()}</span>
                                                        <div>
                                                            <div class="user-name">{user.display_name()}</div>
                                                            <div class="user-email">{user.email.clone()}</div>
                                                        </div>
                                                    </div>
                                                </td>
                                                <td>
                                                    <span class="badge badge-role">{user.role.label()}</span>
                                                </td>
                                                <td>{status_badge(user.is_active, "Active", "Inactive")}</td>
                                                <td>{status_badge(user.is_verified, "Verified", "Pending")}</td>
                                                <td class="row-actions">
                                                    <button
                                                        type="button"
                                                        class="btn btn-sm btn-secondary"
                                                        on:click=move |_| {
                                                            directory.update(|d| {
                                                                d.select(id);
                                                            });
                                                        }
                                                    >
                                                        "Edit"
                                                    </button>
                                                    <Show when=move || unverified>
                                                        {
                                                            let target = resendTarget.clone();
                                                            view! {
                                                                <button
                                                                    type="button"
                                                                    class="btn btn-sm btn-ghost"
                                                                    disabled=move || resending.get() == Some(id)
                                                                    on:click=move |_| handleResend(target.clone())
                                                                >
                                                                    {move || {
                                                                        if resending.get() == Some(id) {
                                                                            "Sending..."
                                                                        } else {
                                                                            "Resend Code"
                                                                        }
                                                                    }}
                                                                </button>
                                                            }
                                                        }
                                                    </Show>
                                                </td>
                                            </tr>
                                        }
                                    }
                                </For>
                            </tbody>
                        </table>
                    </div>
                }
                    .into_any()
            }
        }}
        <Show when=move || directory.with(|d| d.draft.is_some())>
            <EditPanel directory=directory />
        </Show>
    }
}

#[component]
fn EditPanel(directory: RwSignal<UserDirectory>) -> impl IntoView {
    #[allow(unused_variables)]
    let (saving, setSaving) = signal(false);
    let toasts = use_toasts();

    let editDraft = move |f: &dyn Fn(&mut User)| {
        directory.update(|d| {
            if let Some(draft) = d.draft.as_mut() {
                f(draft);
            }
        });
    };
    let field = move |f: fn(&User) -> String| {
        move || directory.with(|d| d.draft.as_ref().map(f).unwrap_or_default())
    };

    let handleSave = move |_| {
        let Some((id, patch)) = directory.with_untracked(|d| d.pending_patch()) else {
            return;
        };
        if patch.is_empty() {
            if let Some(t) = toasts {
                t.warn(NO_CHANGES);
            }
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen_futures::spawn_local;
            setSaving.set(true);
            spawn_local(async move {
                let result = update_user(id, patch).await;
                setSaving.set(false);
                match result {
                    Ok(Ok(outcome)) => {
                        directory.update(|d| d.edit_applied(outcome));
                        set_timeout(
                            move || directory.update(|d| d.dismiss()),
                            std::time::Duration::from_millis(1500),
                        );
                    }
                    Ok(Err(_)) | Err(_) => directory.update(|d| d.edit_failed()),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (id, patch);
        }
    };

    let notice = Signal::derive(move || directory.with(|d| d.edit_notice.clone()));

    view! {
        <div class="modal-backdrop">
            <div class="card edit-panel">
                <div class="card-title">
                    "Edit User"
                    <span class="user-email">{field(|u| u.email.clone())}</span>
                </div>
                <Banner notice=notice />
                <div class="form-group">
                    <label>"First name"</label>
                    <input
                        type="text"
                        prop:value=field(|u| u.first_name.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            editDraft(&|u| u.first_name = value.clone());
                        }
                    />
                </div>
                <div class="form-group">
                    <label>"Last name"</label>
                    <input
                        type="text"
                        prop:value=field(|u| u.last_name.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            editDraft(&|u| u.last_name = value.clone());
                        }
                    />
                </div>
                <div class="form-group">
                    <label>"Role"</label>
                    <select
                        prop:value=field(|u| u.role.as_str().to_string())
                        on:change=move |ev| {
                            if let Some(role) = Role::parse(&event_target_value(&ev)) {
                                editDraft(&|u| u.role = role);
                            }
                        }
                    >
                        {Role::ALL
                            .into_iter()
                            .map(|role| view! { <option value=role.as_str()>{role.label()}</option> })
                            .collect_view()}
                    </select>
                </div>
                <div class="form-group">
                    <label>"Account status"</label>
                    <select
                        prop:value=field(|u| u.is_active.to_string())
                        on:change=move |ev| {
                            let active = event_target_value(&ev) == "true";
                            editDraft(&|u| u.is_active = active);
                        }
                    >
                        <option value="true">"Active"</option>
                        <option value="false">"Inactive"</option>
                    </select>
                </div>
                <div class="form-group">
                    <label>"Verification"</label>
                    <select
                        prop:value=field(|u| u.is_verified.to_string())
                        on:change=move |ev| {
                            let verified = event_target_value(&ev) == "true";
                            editDraft(&|u| u.is_verified = verified);
                        }
                    >
                        <option value="true">"Verified"</option>
                        <option value="false">"Pending"</option>
                    </select>
                </div>
                <div class="form-actions">
                    <button
                        type="button"
                        class="btn btn-ghost"
                        on:click=move |_| directory.update(|d| d.dismiss())
                    >
                        "Cancel"
                    </button>
                    <button
                        type="button"
                        class="btn btn-primary"
                        disabled=move || saving.get()
                        on:click=handleSave
                    >
                        {move || if saving.get() { "Saving..." } else { "Save Changes" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
