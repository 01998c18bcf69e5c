use chrono::{DateTime, Utc};
use image::ImageReader;
use serde::Serialize;
use std::io::Cursor;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::fetcher::{RemoteImage, fetch_image};
use crate::media::{
    MediaError,
    advisory::{SizeAdvisory, check_image_size},
    filename::derive_filename,
    store::{ExistsPolicy, MediaEntity, MediaStore, NewMedia, StoredFile},
};

pub const REVISION_LOG_PREFIX: &str =
    "Remote file retrieved programmatically by Media coverage. Original address";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// File plus a media record.
    Persistent,
    /// File only, flagged temporary for the upload widget to claim.
    Temporary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportTarget {
    pub dir_key: &'static str,
    pub mode: ImportMode,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RemoteMedia {
    /// Media record id, or the file id when no record was created.
    pub id: Uuid,
    pub filename: String,
    pub extension: String,
    pub mime: String,
    pub width: u32,
    pub height: u32,
    pub alt_text: String,
    pub file: StoredFile,
    pub media: Option<MediaEntity>,
    pub checksum: String,
    pub temporary: bool,
    pub revision_log_message: Option<String>,
    pub size_status: SizeAdvisory,
    pub source_url: String,
}

pub struct ImageImporter {
    store: Arc<dyn MediaStore>,
}

impl ImageImporter {
    pub fn new(store: Arc<dyn MediaStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self, alt), fields(dir = target.dir_key))]
    pub async fn import(
        &self,
        url: &str,
        alt: Option<&str>,
        target: &ImportTarget,
    ) -> Result<RemoteMedia, MediaError> {
        let image = fetch_image(url).await?;
        self.import_fetched(image, alt, target, Utc::now()).await
    }

    /// Store an already downloaded image. Split out from [`Self::import`] so
    /// the clock can be fixed.
    pub async fn import_fetched(
        &self,
        image: RemoteImage,
        alt: Option<&str>,
        target: &ImportTarget,
        now: DateTime<Utc>,
    ) -> Result<RemoteMedia, MediaError> {
        let (width, height) = image_dimensions(&image.bytes);
        let name = derive_filename(&image.url_requested, &image.mime, now);
        let dir = format!("{}/remote-images/{}", target.dir_key, now.format("%Y-%m"));
        let checksum = format!("{:x}", md5::compute(image.bytes.as_ref()));

        let (policy, temporary) = match target.mode {
            ImportMode::Persistent => (ExistsPolicy::Rename, false),
            ImportMode::Temporary => (ExistsPolicy::Replace, true),
        };

        let file = self
            .store
            .write_file(&dir, &name.filename, &image.bytes, policy, temporary)
            .await?;

        let alt_text = alt
            .map(str::trim)
            .filter(|alt| !alt.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| file.filename.clone());

        let source_url = image.url_requested.to_string();

        let (id, media, revision_log_message) = match target.mode {
            ImportMode::Persistent => {
                let message = format!("{REVISION_LOG_PREFIX} {source_url}");
                let entity = self
                    .store
                    .create_media(NewMedia {
                        name: file.filename.clone(),
                        file_id: file.id,
                        alt: alt_text.clone(),
                        title: file.filename.clone(),
                        revision_log_message: message.clone(),
                    })
                    .await?;
                (entity.id, Some(entity), Some(message))
            }
            ImportMode::Temporary => {
                debug!(file_id = %file.id, "stored temporary file without media record");
                (file.id, None, None)
            }
        };

        let size_status = check_image_size(height, width);

        info!(
            id = %id,
            uri = %file.uri,
            width,
            height,
            severity = ?size_status.severity,
            "imported remote image"
        );

        Ok(RemoteMedia {
            id,
            filename: file.filename.clone(),
            extension: name.extension,
            mime: image.mime,
            width,
            height,
            alt_text,
            temporary,
            file,
            media,
            checksum,
            revision_log_message,
            size_status,
            source_url,
        })
    }
}

/// Width and height read from the image header; `(0, 0)` if unreadable.
pub fn image_dimensions(bytes: &[u8]) -> (u32, u32) {
    let dimensions = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()
        .and_then(|reader| reader.into_dimensions().ok());

    match dimensions {
        Some(dimensions) => dimensions,
        None => {
            debug!(len = bytes.len(), "could not decode image dimensions");
            (0, 0)
        }
    }
}
