use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::media::MediaError;

/// What to do when the target filename is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistsPolicy {
    /// Pick `name_0.ext`, `name_1.ext`, ... instead.
    Rename,
    Replace,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StoredFile {
    pub id: Uuid,
    #[schema(value_type = String)]
    pub path: PathBuf,
    /// Stream-wrapper style address, `public://dir/name.ext`.
    pub uri: String,
    pub filename: String,
    pub size: u64,
    pub temporary: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct NewMedia {
    pub name: String,
    pub file_id: Uuid,
    pub alt: String,
    pub title: String,
    pub revision_log_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MediaEntity {
    pub id: Uuid,
    pub name: String,
    pub file_id: Uuid,
    pub alt: String,
    pub title: String,
    pub revision_log_message: String,
    pub created_at: DateTime<Utc>,
}

/// File storage plus the media registry of the host site.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Write `bytes` to `dir/filename` below the public files area.
    async fn write_file(
        &self,
        dir: &str,
        filename: &str,
        bytes: &[u8],
        policy: ExistsPolicy,
        temporary: bool,
    ) -> Result<StoredFile, MediaError>;

    async fn create_media(&self, media: NewMedia) -> Result<MediaEntity, MediaError>;

    /// Cheap readiness probe for health checks.
    async fn is_writable(&self) -> bool;
}

/// Files on local disk under `root`; file and media records in memory.
pub struct FsMediaStore {
    root: PathBuf,
    files: DashMap<Uuid, StoredFile>,
    media: DashMap<Uuid, MediaEntity>,
}

impl FsMediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: DashMap::new(),
            media: DashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn file(&self, id: Uuid) -> Option<StoredFile> {
        self.files.get(&id).map(|entry| entry.value().clone())
    }

    pub fn media(&self, id: Uuid) -> Option<MediaEntity> {
        self.media.get(&id).map(|entry| entry.value().clone())
    }

    pub fn media_count(&self) -> usize {
        self.media.len()
    }

    async fn free_path(&self, dir: &Path, filename: &str) -> Result<PathBuf, MediaError> {
        let candidate = dir.join(filename);
        if !fs::try_exists(&candidate).await? {
            return Ok(candidate);
        }

        let (stem, extension) = match filename.rsplit_once('.') {
            Some((stem, extension)) => (stem, Some(extension)),
            None => (filename, None),
        };

        for counter in 0.. {
            let renamed = match extension {
                Some(extension) => format!("{stem}_{counter}.{extension}"),
                None => format!("{stem}_{counter}"),
            };
            let candidate = dir.join(renamed);
            if !fs::try_exists(&candidate).await? {
                return Ok(candidate);
            }
        }

        unreachable!("unbounded counter always yields a free name")
    }
}

#[async_trait]
impl MediaStore for FsMediaStore {
    async fn write_file(
        &self,
        dir: &str,
        filename: &str,
        bytes: &[u8],
        policy: ExistsPolicy,
        temporary: bool,
    ) -> Result<StoredFile, MediaError> {
        let relative_dir = dir.trim_matches('/');
        if relative_dir.split('/').any(|part| part == "..") || filename.contains('/') {
            return Err(MediaError::InvalidPath(format!("{relative_dir}/{filename}")));
        }

        let target_dir = self.root.join(relative_dir);
        fs::create_dir_all(&target_dir).await?;

        let path = match policy {
            ExistsPolicy::Replace => target_dir.join(filename),
            ExistsPolicy::Rename => self.free_path(&target_dir, filename).await?,
        };
        fs::write(&path, bytes).await?;

        let stored_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| filename.to_string());

        let file = StoredFile {
            id: Uuid::new_v4(),
            uri: format!("public://{relative_dir}/{stored_name}"),
            path,
            filename: stored_name,
            size: bytes.len() as u64,
            temporary,
            created_at: Utc::now(),
        };

        debug!(file_id = %file.id, path = %file.path.display(), temporary, "stored file");
        self.files.insert(file.id, file.clone());
        Ok(file)
    }

    async fn create_media(&self, media: NewMedia) -> Result<MediaEntity, MediaError> {
        if !self.files.contains_key(&media.file_id) {
            return Err(MediaError::UnknownFile(media.file_id));
        }

        let entity = MediaEntity {
            id: Uuid::new_v4(),
            name: media.name,
            file_id: media.file_id,
            alt: media.alt,
            title: media.title,
            revision_log_message: media.revision_log_message,
            created_at: Utc::now(),
        };

        info!(media_id = %entity.id, name = %entity.name, "created media record");
        self.media.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn is_writable(&self) -> bool {
        if fs::create_dir_all(&self.root).await.is_err() {
            return false;
        }
        fs::metadata(&self.root)
            .await
            .is_ok_and(|meta| meta.is_dir() && !meta.permissions().readonly())
    }
}
