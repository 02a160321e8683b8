use examdesk_types::{ActivationPrompt, LoginOutcome, Notice, ACCOUNT_ACTIVATED, CODE_LENGTH};
use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::banner::Banner;

#[server]
async fn login(email: String, password: String) -> Result<LoginOutcome, ServerFnError> {
    use crate::server::{app_state, write_cookies};

    let state = app_state()?;
    let mut cookies = state.session_cookies();
    let outcome = examdesk_client::login::login(
        &state.client,
        &mut cookies,
        state.probe_policy,
        email.trim(),
        &password,
    )
    .await;
    write_cookies(cookies)?;

    if outcome.redirects() {
        leptos_axum::redirect("/admin");
    }
    Ok(outcome)
}

#[server]
async fn activate_account(email: String, code: String) -> Result<Notice, ServerFnError> {
    let state = crate::server::app_state()?;
    Ok(examdesk_client::login::activate(&state.client, &email, &code).await)
}

#[server]
async fn resend_code(email: String) -> Result<Notice, ServerFnError> {
    let state = crate::server::app_state()?;
    Ok(examdesk_client::login::resend_activation(&state.client, &email).await)
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let loginAction = ServerAction::<Login>::new();
    let activateAction = ServerAction::<ActivateAccount>::new();
    let resendAction = ServerAction::<ResendCode>::new();

    let loginValue = loginAction.value();
    let activateValue = activateAction.value();
    let resendValue = resendAction.value();

    // Arriving from a completed registration.
    let query = use_query_map();
    let initialNotice = query
        .with_untracked(|q| q.get("verified").is_some())
        .then(|| Notice::Success(ACCOUNT_ACTIVATED.into()));
    let (banner, setBanner) = signal(initialNotice);
    let prompt = RwSignal::new(ActivationPrompt::default());

    Effect::new(move |_| {
        if let Some(result) = loginValue.get() {
            let notice = match result {
                Ok(outcome) => {
                    prompt.update(|p| p.login_finished(&outcome));
                    outcome.notice()
                }
                Err(e) => Notice::Error(e.to_string()),
            };
            setBanner.set(Some(notice));
        }
    });
    Effect::new(move |_| {
        if let Some(result) = activateValue.get() {
            let notice = result.unwrap_or_else(|e| Notice::Error(e.to_string()));
            prompt.update(|p| p.activation_finished(&notice));
            setBanner.set(Some(notice));
        }
    });
    Effect::new(move |_| {
        if let Some(result) = resendValue.get() {
            setBanner.set(Some(result.unwrap_or_else(|e| Notice::Error(e.to_string()))));
        }
    });

    let pendingEmail = move || prompt.with(|p| p.email().map(str::to_string));

    let loginPending = loginAction.pending();
    let activationBusy = move || activateAction.pending().get() || resendAction.pending().get();

    view! {
        <div class="login-page">
            <div class="login-card">
                <div class="login-header">
                    <div class="login-icon">"E"</div>
                    <h1>"Admin Login"</h1>
                    <p>"Sign in with an admin account to continue"</p>
                </div>

                <Banner notice=banner />

                <ActionForm action=loginAction>
                    <div class="form-group">
                        <label for="email">"Email"</label>
                        <input
                            type="email"
                            id="email"
                            name="email"
                            placeholder="you@example.com"
                            required
                        />
                    </div>
                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            name="password"
                            placeholder="Your password"
                            required
                        />
                    </div>
                    <button type="submit" class="btn btn-primary" disabled=move || loginPending.get()>
                        {move || if loginPending.get() { "Logging in..." } else { "Sign In" }}
                    </button>
                </ActionForm>

                <p class="login-footer">
                    "No account yet? " <a href="/register">"Register"</a>
                </p>

                {move || {
                    pendingEmail()
                        .map(|email| {
                            let activateEmail = email.clone();
                            view! {
                                <div class="activation-panel">
                                    <h2>"Activate your account"</h2>
                                    <ActionForm action=activateAction>
                                        <input type="hidden" name="email" value=activateEmail />
                                        <div class="form-group">
                                            <label for="code">"Activation code"</label>
                                            <input
                                                type="text"
                                                id="code"
                                                name="code"
                                                placeholder="000000"
                                                maxlength=CODE_LENGTH.to_string()
                                                required
                                            />
                                        </div>
                                        <button
                                            type="submit"
                                            class="btn btn-primary"
                                            disabled=activationBusy
                                        >
                                            {move || {
                                                if activateAction.pending().get() {
                                                    "Activating..."
                                                } else {
                                                    "Activate Account"
                                                }
                                            }}
                                        </button>
                                    </ActionForm>
                                    <ActionForm action=resendAction>
                                        <input type="hidden" name="email" value=email />
                                        <button
                                            type="submit"
                                            class="btn btn-ghost"
                                            disabled=activationBusy
                                        >
                                            {move || {
                                                if resendAction.pending().get() {
                                                    "Resending..."
                                                } else {
                                                    "Resend Activation Code"
                                                }
                                            }}
                                        </button>
                                    </ActionForm>
                                </div>
                            }
                        })
                }}
            </div>
        </div>
    }
}
