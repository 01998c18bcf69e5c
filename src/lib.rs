pub mod api;
pub mod app_state;
pub mod autofill;
pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod health;
pub mod media;
pub mod profile;
pub mod response;

use config::LogFormat;

/// Install the global subscriber. Filtering follows `RUST_LOG`.
pub fn init_tracing(format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env());
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}
