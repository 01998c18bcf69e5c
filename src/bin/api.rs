use anyhow::{Context, Result};
use autofill::{api, app_state::AppState, config::Config, init_tracing};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_format());

    let state = AppState::new(config.files_dir(), config.default_profile());
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr()))?;

    info!(
        addr = config.bind_addr(),
        files_dir = %config.files_dir().display(),
        default_profile = %config.default_profile(),
        "autofill api listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}
