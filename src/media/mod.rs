pub mod advisory;
pub mod filename;
pub mod importer;
pub mod store;

pub use advisory::{Finding, Severity, SizeAdvisory, check_image_size};
pub use importer::{ImageImporter, ImportMode, ImportTarget, RemoteMedia};
pub use store::{ExistsPolicy, FsMediaStore, MediaEntity, MediaStore, NewMedia, StoredFile};

use crate::fetcher::FetchError;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Failed to download image: {0}")]
    Fetch(#[from] FetchError),
    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Refusing to write outside the files directory: {0}")]
    InvalidPath(String),
    #[error("No stored file with id {0}")]
    UnknownFile(Uuid),
}

impl MediaError {
    pub fn kind(&self) -> &'static str {
        match self {
            MediaError::Fetch(err) => err.kind(),
            MediaError::Io(_) => "io",
            MediaError::InvalidPath(_) => "invalid_path",
            MediaError::UnknownFile(_) => "unknown_file",
        }
    }
}
