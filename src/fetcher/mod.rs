pub mod client;
pub mod errors;
pub mod pipeline;
pub mod types;

pub use client::{fetch, fetch_html, fetch_image};
pub use errors::FetchError;
pub use types::{Charset, PageResponse, RemoteImage};
