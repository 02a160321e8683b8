use examdesk_types::{ApiFailure, RegistrationDetails, RegistrationStep, RegistrationWizard, CODE_LENGTH};
use leptos::prelude::*;

use crate::components::banner::Banner;

#[server]
async fn register_account(details: RegistrationDetails) -> Result<Result<String, ApiFailure>, ServerFnError> {
    let state = crate::server::app_state()?;
    let details = RegistrationDetails {
        email: details.email.trim().to_string(),
        first_name: details.first_name.trim().to_string(),
        last_name: details.last_name.trim().to_string(),
        ..details
    };
    Ok(examdesk_client::registration::submit_details(&state.client, &details).await)
}

#[server]
async fn verify_registration(email: String, code: String) -> Result<Result<(), ApiFailure>, ServerFnError> {
    let state = crate::server::app_state()?;
    Ok(examdesk_client::registration::submit_code(&state.client, email.trim(), &code).await)
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let wizard = RwSignal::new(RegistrationWizard::default());
    #[allow(unused_variables)]
    let (submitting, setSubmitting) = signal(false);

    #[cfg(feature = "hydrate")]
    {
        let navigate = leptos_router::hooks::use_navigate();
        Effect::new(move |_| {
            if wizard.with(|w| w.completed) {
                let navigate = navigate.clone();
                set_timeout(
                    move || navigate("/login?verified=1", Default::default()),
                    std::time::Duration::from_millis(1500),
                );
            }
        });
    }

    let submitDetails = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        #[cfg(feature = "hydrate")]
        {
            use examdesk_types::{FailureKind, REGISTRATION_FAILED};
            use wasm_bindgen_futures::spawn_local;

            let details = wizard.with_untracked(|w| w.draft.details());
            setSubmitting.set(true);
            spawn_local(async move {
                let result = register_account(details)
                    .await
                    .unwrap_or_else(|_| Err(ApiFailure::new(FailureKind::Network, REGISTRATION_FAILED)));
                setSubmitting.set(false);
                wizard.update(|w| w.details_submitted(result));
            });
        }
    };

    let submitCode = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        #[cfg(feature = "hydrate")]
        {
            use examdesk_types::FailureKind;
            use wasm_bindgen_futures::spawn_local;

            let (email, code) = wizard.with_untracked(|w| (w.draft.email.clone(), w.draft.code.clone()));
            setSubmitting.set(true);
            spawn_local(async move {
                let result = verify_registration(email, code)
                    .await
                    .unwrap_or_else(|e| Err(ApiFailure::new(FailureKind::Network, e.to_string())));
                setSubmitting.set(false);
                wizard.update(|w| w.verification_submitted(result));
            });
        }
    };

    let notice = Signal::derive(move || wizard.with(|w| w.notice.clone()));
    let step = Memo::new(move |_| wizard.with(|w| w.step));

    let draftField = move |f: fn(&RegistrationWizard) -> String| move || wizard.with(|w| f(w));

    view! {
        <div class="login-page">
            <div class="login-card">
                <div class="login-header">
                    <div class="login-icon">"E"</div>
                    <h1>"Create Account"</h1>
                    <p>
                        {move || match step.get() {
                            RegistrationStep::Details => "Step 1 of 2: your details".to_string(),
                            RegistrationStep::Verification => {
                                format!("Step 2 of 2: enter the code sent to {}", wizard.with(|w| w.draft.email.clone()))
                            }
                        }}
                    </p>
                </div>

                <Banner notice=notice />

                <Show
                    when=move || step.get() == RegistrationStep::Details
                    fallback=move || {
                        view! {
                            <form on:submit=submitCode>
                                <div class="form-group">
                                    <label for="code">"Verification code"</label>
                                    <input
                                        type="text"
                                        id="code"
                                        inputmode="numeric"
                                        placeholder="000000"
                                        maxlength=CODE_LENGTH.to_string()
                                        prop:value=draftField(|w| w.draft.code.clone())
                                        on:input=move |ev| {
                                            let value = event_target_value(&ev);
                                            wizard.update(|w| w.draft.code = value);
                                        }
                                    />
                                </div>
                                <button
                                    type="submit"
                                    class="btn btn-primary"
                                    disabled=move || {
                                        submitting.get() || !wizard.with(|w| w.code_is_complete())
                                            || wizard.with(|w| w.completed)
                                    }
                                >
                                    {move || if submitting.get() { "Verifying..." } else { "Verify" }}
                                </button>
                                <button
                                    type="button"
                                    class="btn btn-ghost"
                                    disabled=move || submitting.get()
                                    on:click=move |_| wizard.update(|w| w.back())
                                >
                                    "Back"
                                </button>
                            </form>
                        }
                    }
                >
                    <form on:submit=submitDetails>
                        <div class="form-row">
                            <div class="form-group">
                                <label for="first_name">"First name"</label>
                                <input
                                    type="text"
                                    id="first_name"
                                    required
                                    prop:value=draftField(|w| w.draft.first_name.clone())
                                    on:input=move |ev| {
                                        let value = event_target_value(&ev);
                                        wizard.update(|w| w.draft.first_name = value);
                                    }
                                />
                            </div>
                            <div class="form-group">
                                <label for="last_name">"Last name"</label>
                                <input
                                    type="text"
                                    id="last_name"
                                    required
                                    prop:value=draftField(|w| w.draft.last_name.clone())
                                    on:input=move |ev| {
                                        let value = event_target_value(&ev);
                                        wizard.update(|w| w.draft.last_name = value);
                                    }
                                />
                            </div>
                        </div>
                        <div class="form-group">
                            <label for="reg_email">"Email"</label>
                            <input
                                type="email"
                                id="reg_email"
                                required
                                placeholder="you@example.com"
                                prop:value=draftField(|w| w.draft.email.clone())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    wizard.update(|w| w.draft.email = value);
                                }
                            />
                        </div>
                        <div class="form-group">
                            <label for="reg_password">"Password"</label>
                            <input
                                type="password"
                                id="reg_password"
                                required
                                prop:value=draftField(|w| w.draft.password.clone())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    wizard.update(|w| w.draft.password = value);
                                }
                            />
                        </div>
                        <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                            {move || if submitting.get() { "Creating account..." } else { "Continue" }}
                        </button>
                    </form>
                </Show>

                <p class="login-footer">
                    "Already registered? " <a href="/login">"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
