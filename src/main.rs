use anyhow::{Context, Result, bail};
use autofill::{app_state::AppState, config::Config, init_tracing, profile::Profile};

/// `autofill <url> [profile]`: run one autofill and print the outcome as JSON.
#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_format());

    let mut args = std::env::args().skip(1);
    let Some(url) = args.next() else {
        bail!("usage: autofill <url> [media_coverage|announcement]");
    };
    let profile = match args.next() {
        Some(raw) => raw.parse::<Profile>().map_err(anyhow::Error::msg)?,
        None => config.default_profile(),
    };

    let state = AppState::new(config.files_dir(), profile);
    let outcome = state.autofill.run(&url, profile).await;

    let json = serde_json::to_string_pretty(&outcome).context("Failed to serialize outcome")?;
    println!("{json}");
    Ok(())
}
