use crate::fetcher::{
    errors::FetchError,
    pipeline::{is_generic_binary_mime, is_image_mime, process_image_response, process_response},
    types::{PageResponse, RemoteImage},
};
use once_cell::sync::Lazy;
use reqwest::{
    Client, ClientBuilder,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB
const MAX_IMAGE_SIZE: u64 = 20 * 1024 * 1024; // 20MB
const USER_AGENT: &str = "AutofillBot/0.1 (+https://autofill.example.com)";
const IMAGE_ACCEPT: &str = "image/avif,image/webp,image/png,image/jpeg,image/*;q=0.8,*/*;q=0.5";

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(30))
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .default_headers({
            let mut headers = HeaderMap::new();
            headers.insert(
                ACCEPT,
                HeaderValue::from_static(
                    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
                ),
            );
            headers
        })
        .build()
        .expect("Failed to build HTTP client")
});

#[instrument(skip_all, fields(url = %url))]
pub async fn fetch(url: &str) -> Result<PageResponse, FetchError> {
    let parsed_url = Url::parse(url)?;

    let response = HTTP_CLIENT
        .get(parsed_url)
        .send()
        .await
        .map_err(FetchError::from_reqwest_error)?;

    // Check content length before downloading
    if let Some(content_length) = response.content_length()
        && content_length > MAX_BODY_SIZE
    {
        return Err(FetchError::BodyTooLarge(content_length));
    }

    let final_url = response.url().clone();
    let status = response.status();

    if !status.is_success() {
        return Err(FetchError::Http { status });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or("text/html")
        .to_string();

    if !content_type.contains("text/html") && !content_type.contains("application/xhtml") {
        return Err(FetchError::UnsupportedContentType(content_type));
    }

    let body_bytes = response
        .bytes()
        .await
        .map_err(|e| FetchError::Io(e.to_string()))?;

    // Check body size after download (in case Content-Length was missing)
    if body_bytes.len() as u64 > MAX_BODY_SIZE {
        return Err(FetchError::BodyTooLarge(body_bytes.len() as u64));
    }

    Ok(process_response(final_url, &body_bytes, &content_type))
}

/// Fetch a page and hand back its decoded body with the URL it was finally
/// served from. Any failure yields an empty body and no URL, so extraction
/// runs on nothing and every field reports missing.
pub async fn fetch_html(url: &str) -> (String, Option<Url>) {
    match fetch(url).await {
        Ok(page) => {
            debug!(
                url_final = %page.url_final,
                charset = ?page.charset,
                size = page.body_utf8.len(),
                "fetched page"
            );
            (page.body_utf8, Some(page.url_final))
        }
        Err(err) => {
            warn!(url, error.kind = err.kind(), error = %err, "page fetch failed");
            (String::new(), None)
        }
    }
}

/// Fetch an image. The declared Content-Type is inspected before the body is
/// read, so a non-image response is abandoned without downloading it. Generic
/// binary types are downloaded and settled by sniffing the bytes.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_image(url: &str) -> Result<RemoteImage, FetchError> {
    let parsed_url = Url::parse(url)?;

    let response = HTTP_CLIENT
        .get(parsed_url.clone())
        .header(ACCEPT, IMAGE_ACCEPT)
        .send()
        .await
        .map_err(FetchError::from_reqwest_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http { status });
    }

    let declared = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .map(str::to_string);

    if let Some(content_type) = &declared
        && !is_image_mime(content_type)
        && !is_generic_binary_mime(content_type)
    {
        return Err(FetchError::NotAnImage(content_type.clone()));
    }

    if let Some(content_length) = response.content_length()
        && content_length > MAX_IMAGE_SIZE
    {
        return Err(FetchError::BodyTooLarge(content_length));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| FetchError::Io(e.to_string()))?;

    if bytes.len() as u64 > MAX_IMAGE_SIZE {
        return Err(FetchError::BodyTooLarge(bytes.len() as u64));
    }

    process_image_response(parsed_url, declared.as_deref(), bytes)
}
