use crate::fetcher::{
    errors::FetchError,
    types::{Charset, PageResponse, RemoteImage},
};
use bytes::Bytes;
use chrono::Utc;
use encoding_rs::Encoding;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

static META_HTTP_EQUIV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap()
});

pub fn process_response(url_final: Url, body_bytes: &[u8], content_type: &str) -> PageResponse {
    let charset = detect_charset(content_type, body_bytes);
    let body_utf8 = decode_to_utf8(body_bytes, &charset);

    PageResponse {
        url_final,
        body_utf8,
        charset,
        fetched_at: Utc::now(),
    }
}

/// Settle the MIME type of an image response. A specific declared type wins;
/// bytes are sniffed when the server sent no Content-Type or a generic binary
/// one.
pub fn process_image_response(
    url_requested: Url,
    declared: Option<&str>,
    bytes: Bytes,
) -> Result<RemoteImage, FetchError> {
    let mime = match declared {
        Some(content_type) if !is_generic_binary_mime(content_type) => mime_essence(content_type),
        _ => image::guess_format(&bytes)
            .map(|format| format.to_mime_type().to_string())
            .map_err(|_| {
                FetchError::NotAnImage(
                    declared.map_or_else(|| "undetectable".to_string(), mime_essence),
                )
            })?,
    };

    if !is_image_mime(&mime) {
        return Err(FetchError::NotAnImage(mime));
    }

    Ok(RemoteImage {
        url_requested,
        mime,
        bytes,
        fetched_at: Utc::now(),
    })
}

/// `image/jpeg; charset=binary` -> `image/jpeg`
pub fn mime_essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Types object stores and CDNs send when they do not know what a file is.
pub fn is_generic_binary_mime(content_type: &str) -> bool {
    matches!(
        mime_essence(content_type).as_str(),
        "application/octet-stream" | "binary/octet-stream"
    )
}

/// True when the primary type of a MIME string is `image`.
pub fn is_image_mime(content_type: &str) -> bool {
    mime_essence(content_type)
        .split_once('/')
        .is_some_and(|(primary, subtype)| primary == "image" && !subtype.is_empty())
}

fn detect_charset(content_type: &str, body_bytes: &[u8]) -> Charset {
    // 1. Check Content-Type header for charset
    if let Some(encoding) = label_from(&CHARSET_REGEX, content_type) {
        return Charset::from_encoding(encoding);
    }

    // 2. Check for <meta charset> in first 4KB
    let search_bytes = &body_bytes[..body_bytes.len().min(4096)];
    let search_str = String::from_utf8_lossy(search_bytes);

    if let Some(encoding) = label_from(&META_CHARSET_REGEX, &search_str) {
        return Charset::from_encoding(encoding);
    }

    if let Some(encoding) = label_from(&META_HTTP_EQUIV_REGEX, &search_str) {
        return Charset::from_encoding(encoding);
    }

    // 3. Use chardet for heuristic detection
    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(search_bytes, false);
    Charset::from_encoding(detector.guess(None, true))
}

fn label_from(regex: &Regex, haystack: &str) -> Option<&'static Encoding> {
    let captures = regex.captures(haystack)?;
    let label = captures.get(1)?.as_str().to_lowercase();
    Encoding::for_label(label.as_bytes())
}

fn decode_to_utf8(body_bytes: &[u8], charset: &Charset) -> String {
    let encoding = match charset {
        Charset::Utf8 => encoding_rs::UTF_8,
        Charset::Windows1252 => encoding_rs::WINDOWS_1252,
        Charset::ShiftJis => encoding_rs::SHIFT_JIS,
        Charset::Gb2312 => encoding_rs::GBK,
        Charset::Big5 => encoding_rs::BIG5,
        Charset::Other(name) => Encoding::for_label(name.as_bytes()).unwrap_or(encoding_rs::UTF_8),
    };

    let (decoded, _encoding, had_errors) = encoding.decode(body_bytes);

    if had_errors {
        debug!(
            encoding = encoding.name(),
            "malformed byte sequences replaced while decoding page"
        );
    }

    decoded.into_owned()
}
