use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{
    components::{Redirect, Route, Router, Routes},
    StaticSegment,
};

use crate::components::toast::ToastProvider;
use crate::pages::admin::AdminPage;
use crate::pages::login::LoginPage;
use crate::pages::register::RegisterPage;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <link rel="icon" href="/favicon.svg" type="image/svg+xml" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/examdesk-console.css" />
        <Title text="Examdesk Admin" />
        <ToastProvider>
            <Router>
                <Routes fallback=|| view! { <p>"Page not found."</p> }.into_any()>
                    <Route path=StaticSegment("") view=|| view! { <Redirect path="/admin" /> } />
                    <Route path=StaticSegment("login") view=LoginPage />
                    <Route path=StaticSegment("register") view=RegisterPage />
                    <Route path=StaticSegment("admin") view=AdminPage />
                </Routes>
            </Router>
        </ToastProvider>
    }
}
