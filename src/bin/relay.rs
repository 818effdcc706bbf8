//! Contact mail relay server.
//!
//! Serves the exported site bundle and accepts form submissions on
//! `/api/contact`, forwarding them to the configured inbox. Runs only on
//! native targets; the wasm entry point is the site binary.

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use std::net::SocketAddr;
    use std::sync::Arc;

    use isa_portfolio::relay::{self, AppState, Mailer, RelayConfig};
    use tokio::net::TcpListener;
    use tracing::info;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{fmt, EnvFilter};

    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(tracing::Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = RelayConfig::from_env();
    info!(
        bind = %config.bind_addr,
        static_dir = %config.static_dir.display(),
        rate_limit = config.rate_limit,
        rate_window_secs = config.rate_window_secs,
        contact_email_set = config.contact_email.is_some(),
        "starting contact relay"
    );

    let mailer = Mailer::from_config(&config)?;
    let state = Arc::new(AppState::new(config, mailer));
    let app = relay::router(Arc::clone(&state))?;

    let listener = TcpListener::bind(&state.config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
