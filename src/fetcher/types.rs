use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Charset {
    Utf8,
    Windows1252,
    ShiftJis,
    Gb2312,
    Big5,
    Other(String),
}

impl Charset {
    pub fn from_encoding(encoding: &'static encoding_rs::Encoding) -> Self {
        use std::ptr;

        if ptr::eq(encoding, encoding_rs::UTF_8) {
            Self::Utf8
        } else if ptr::eq(encoding, encoding_rs::WINDOWS_1252) {
            Self::Windows1252
        } else if ptr::eq(encoding, encoding_rs::SHIFT_JIS) {
            Self::ShiftJis
        } else if ptr::eq(encoding, encoding_rs::GBK) || ptr::eq(encoding, encoding_rs::GB18030) {
            Self::Gb2312
        } else if ptr::eq(encoding, encoding_rs::BIG5) {
            Self::Big5
        } else {
            Self::Other(encoding.name().to_string())
        }
    }
}

/// A fetched HTML page decoded to UTF-8.
#[derive(Debug)]
pub struct PageResponse {
    pub url_final: Url,
    pub body_utf8: String,
    pub charset: Charset,
    pub fetched_at: DateTime<Utc>,
}

/// A fetched image. `mime` is the essence of the declared Content-Type
/// (`image/jpeg`), or the sniffed type when the server sent none or a generic
/// binary type.
#[derive(Debug, Clone)]
pub struct RemoteImage {
    pub url_requested: Url,
    pub mime: String,
    pub bytes: Bytes,
    pub fetched_at: DateTime<Utc>,
}

impl RemoteImage {
    /// The subtype half of the MIME type, e.g. `jpeg` for `image/jpeg`.
    pub fn mime_subtype(&self) -> &str {
        self.mime
            .split_once('/')
            .map(|(_, subtype)| subtype)
            .unwrap_or_default()
    }
}
