use examdesk_types::{ApiFailure, Exam, ExamToggle};
use leptos::prelude::*;

use crate::components::toast::use_toasts;

#[server]
async fn list_exams() -> Result<Result<Vec<Exam>, ApiFailure>, ServerFnError> {
    use crate::server::{app_state, require_credentials};

    let state = app_state()?;
    let credentials = require_credentials().await?;
    Ok(examdesk_client::exams::fetch_exams(&state.client, &credentials).await)
}

#[server]
async fn toggle_exam(id: i64, active: bool) -> Result<Result<ExamToggle, ApiFailure>, ServerFnError> {
    use crate::server::{app_state, require_credentials};

    let state = app_state()?;
    let credentials = require_credentials().await?;
    Ok(examdesk_client::exams::set_exam_active(&state.client, &credentials, id, active).await)
}

fn format_duration(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m} min"),
        (h, 0) => format!("{h} h"),
        (h, m) => format!("{h} h {m} min"),
    }
}

#[component]
pub fn ExamsTab() -> impl IntoView {
    #[allow(unused_variables)]
    let (exams, setExams) = signal(Option::<Result<Vec<Exam>, String>>::None);
    #[allow(unused_variables)]
    let (toggling, setToggling) = signal(Option::<i64>::None);
    let toasts = use_toasts();

    #[cfg(feature = "hydrate")]
    {
        use examdesk_types::EXAMS_FETCH_FAILED;
        use wasm_bindgen_futures::spawn_local;

        spawn_local(async move {
            let result = match list_exams().await {
                Ok(inner) => inner.map_err(|f| f.message),
                Err(_) => Err(EXAMS_FETCH_FAILED.to_string()),
            };
            setExams.set(Some(result));
        });
    }

    let handleToggle = move |id: i64, active: bool| {
        #[cfg(feature = "hydrate")]
        {
            use examdesk_types::{Notice, EXAM_UPDATE_FAILED};
            use wasm_bindgen_futures::spawn_local;

            setToggling.set(Some(id));
            spawn_local(async move {
                let result = toggle_exam(id, active).await;
                setToggling.set(None);
                match result {
                    Ok(Ok(toggle)) => setExams.update(|exams| {
                        let current = match exams.take() {
                            Some(Ok(list)) => list,
                            _ => Vec::new(),
                        };
                        *exams = Some(Ok(toggle.merge_into(current)));
                    }),
                    Ok(Err(failure)) => {
                        if let Some(t) = toasts {
                            t.notify(&Notice::from(failure));
                        }
                    }
                    Err(_) => {
                        if let Some(t) = toasts {
                            t.notify(&Notice::Error(EXAM_UPDATE_FAILED.into()));
                        }
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (id, active, toasts);
        }
    };

    move || match exams.get() {
        None => view! {
            <div class="loading">
                <div class="spinner"></div>
                "Loading exams..."
            </div>
        }
        .into_any(),
        Some(Err(message)) => view! {
            <div class="card">
                <p class="login-error">{message}</p>
            </div>
        }
        .into_any(),
        Some(Ok(list)) if list.is_empty() => view! {
            <div class="card">
                <p class="empty-state">"No exams yet."</p>
            </div>
        }
        .into_any(),
        Some(Ok(list)) => view! {
            <div class="card">
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Title"</th>
                            <th>"Duration"</th>
                            <th>"Status"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {list
                            .into_iter()
                            .map(|exam| {
                                let id = exam.id;
                                let active = exam.is_active;
                                view! {
                                    <tr>
                                        <td>
                                            <div class="user-name">{exam.title}</div>
                                            <div class="user-email">{exam.slug}</div>
                                        </td>
                                        <td>{format_duration(exam.duration_minutes)}</td>
                                        <td>
                                            <span class=if active { "badge badge-ok" } else { "badge badge-muted" }>
                                                {if active { "Active" } else { "Inactive" }}
                                            </span>
                                        </td>
                                        <td class="row-actions">
                                            <button
                                                type="button"
                                                class="btn btn-sm btn-secondary"
                                                disabled=move || toggling.get() == Some(id)
                                                on:click=move |_| handleToggle(id, !active)
                                            >
                                                {if active { "Deactivate" } else { "Activate" }}
                                            </button>
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()}
                    </tbody>
                </table>
            </div>
        }
        .into_any(),
    }
}
