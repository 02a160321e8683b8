#![allow(non_snake_case)]

#[cfg(feature = "ssr")]
mod config {
    use examdesk_types::ProbePolicy;
    use serde::Deserialize;

    #[derive(Deserialize, Clone, Debug, Default)]
    #[serde(default)]
    pub struct Config {
        pub server: ServerConfig,
        pub backend: BackendConfig,
        pub session: SessionConfig,
    }

    #[derive(Deserialize, Clone, Debug)]
    #[serde(default)]
    pub struct ServerConfig {
        pub bind: String,
        pub port: u16,
    }

    #[derive(Deserialize, Clone, Debug)]
    #[serde(default)]
    pub struct BackendConfig {
        pub base_url: String,
        /// Per-request timeout. Unset means no timeout.
        pub timeout_secs: Option<u64>,
    }

    #[derive(Deserialize, Clone, Debug)]
    #[serde(default)]
    pub struct SessionConfig {
        pub secure_cookies: bool,
        pub probe_policy: ProbePolicy,
    }

    impl Default for ServerConfig {
        fn default() -> Self {
            Self {
                bind: "0.0.0.0".into(),
                port: 3000,
            }
        }
    }

    impl Default for BackendConfig {
        fn default() -> Self {
            Self {
                base_url: examdesk_client::DEFAULT_BASE_URL.into(),
                timeout_secs: None,
            }
        }
    }

    impl Default for SessionConfig {
        fn default() -> Self {
            Self {
                secure_cookies: true,
                probe_policy: ProbePolicy::Advisory,
            }
        }
    }

    impl ServerConfig {
        pub fn addr(&self) -> String {
            format!("{}:{}", self.bind, self.port)
        }
    }

    pub fn parse(contents: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn load(path: &str) -> Config {
        match std::fs::read_to_string(path) {
            Ok(contents) => match parse(&contents) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("failed to parse config {path}: {e}, using defaults");
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("failed to read config {path}: {e}, using defaults");
                Config::default()
            }
        }
    }

}

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::Router;
    use examdesk_api::middleware::auth::AppState;
    use examdesk_client::ApiClient;
    use examdesk_ui::{shell, App};
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use tower_http::trace::TraceLayer;
    use tracing_subscriber::{fmt, EnvFilter};

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let configPath = if let Some(idx) = args.iter().position(|a| a == "--config") {
        args.get(idx + 1)
            .cloned()
            .unwrap_or_else(|| "config.example.toml".into())
    } else {
        "config.example.toml".into()
    };

    let appConfig = config::load(&configPath);
    tracing::info!(
        backend = %appConfig.backend.base_url,
        probe_policy = ?appConfig.session.probe_policy,
        "loaded config from {configPath}: bind={}",
        appConfig.server.addr()
    );

    let timeout = appConfig.backend.timeout_secs.map(std::time::Duration::from_secs);
    let client = ApiClient::with_timeout(&appConfig.backend.base_url, timeout)
        .unwrap_or_else(|e| panic!("invalid backend configuration: {e}"));

    let appState = AppState {
        client,
        probe_policy: appConfig.session.probe_policy,
        secure_cookies: appConfig.session.secure_cookies,
    };

    let conf = get_configuration(None).expect("failed to load Leptos configuration");
    let leptosOptions = conf.leptos_options;
    let addr = appConfig.server.addr();

    let routes = generate_route_list(App);

    let apiRouter = examdesk_api::api_router(appState.clone());

    // /admin and below need a session; everything else passes through.
    let pageAuthLayer = axum::middleware::from_fn(examdesk_api::middleware::auth::require_page_auth);

    let app = Router::new()
        .leptos_routes_with_context(
            &leptosOptions,
            routes,
            {
                let appState = appState.clone();
                move || {
                    leptos::prelude::provide_context(appState.clone());
                }
            },
            {
                let leptosOptions = leptosOptions.clone();
                move || shell(leptosOptions.clone())
            },
        )
        .fallback(leptos_axum::file_and_error_handler(shell))
        .with_state(leptosOptions)
        .merge(apiRouter)
        .layer(pageAuthLayer)
        .layer(TraceLayer::new_for_http());

    tracing::info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    axum::serve(listener, app.into_make_service())
        .await
        .expect("server exited with error");
}

#[cfg(not(feature = "ssr"))]
fn main() {}
