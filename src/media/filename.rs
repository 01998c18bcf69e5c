use chrono::{DateTime, Utc};
use percent_encoding::percent_decode_str;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static UNSAFE_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._-]+").unwrap());

const DEFAULT_STEM: &str = "image";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedName {
    pub stem: String,
    pub extension: String,
    pub filename: String,
}

/// Name a downloaded image after its URL.
///
/// The query string never takes part. The extension comes from the path when
/// it has one (anything after a `;` dropped), otherwise from the MIME
/// subtype. A `_YYYYmmddHHMMSS` suffix keeps repeat downloads apart.
pub fn derive_filename(url: &Url, mime: &str, now: DateTime<Utc>) -> DerivedName {
    let last_segment = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .map(|segment| percent_decode_str(segment).decode_utf8_lossy().into_owned())
        .unwrap_or_default();

    let (raw_stem, raw_extension) = match last_segment.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => (stem.to_string(), extension.to_string()),
        _ => (last_segment, String::new()),
    };

    let extension = raw_extension
        .split(';')
        .next()
        .map(sanitize)
        .map(|ext| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| extension_for_mime(mime));

    let stem = Some(sanitize(&raw_stem))
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| DEFAULT_STEM.to_string());

    let filename = format!("{}_{}.{}", stem, now.format("%Y%m%d%H%M%S"), extension);

    DerivedName {
        stem,
        extension,
        filename,
    }
}

/// `image/jpeg` -> `jpeg`, `image/svg+xml` -> `svg`.
pub fn extension_for_mime(mime: &str) -> String {
    let subtype = mime
        .split(';')
        .next()
        .and_then(|essence| essence.split_once('/'))
        .map(|(_, subtype)| subtype.split('+').next().unwrap_or_default())
        .unwrap_or_default();

    let extension = sanitize(subtype).to_ascii_lowercase();
    if extension.is_empty() {
        "bin".to_string()
    } else {
        extension
    }
}

fn sanitize(raw: &str) -> String {
    UNSAFE_CHARS
        .replace_all(raw.trim(), "_")
        .trim_matches(|c| c == '_' || c == '.')
        .to_string()
}
