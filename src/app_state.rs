use crate::autofill::Autofill;
use crate::media::{FsMediaStore, MediaStore};
use crate::profile::Profile;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub autofill: Arc<Autofill>,
    pub media_store: Arc<dyn MediaStore>,
    pub default_profile: Profile,
}

impl AppState {
    pub fn new(files_dir: impl Into<PathBuf>, default_profile: Profile) -> Self {
        let media_store: Arc<dyn MediaStore> = Arc::new(FsMediaStore::new(files_dir));
        Self::with_store(media_store, default_profile)
    }

    pub fn with_store(media_store: Arc<dyn MediaStore>, default_profile: Profile) -> Self {
        Self {
            autofill: Arc::new(Autofill::new(media_store.clone())),
            media_store,
            default_profile,
        }
    }
}
