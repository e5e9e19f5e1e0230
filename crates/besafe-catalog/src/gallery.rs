use anyhow::Result;
use tracing::{debug, info};

use besafe_core::model::GalleryStore;

use crate::db::Catalog;

/// "Has the app been launched before" flag.
pub const APP_ENTRIES_KEY: &str = "AppEntries";
/// Serialized [`GalleryStore`].
pub const MAIN_DATA_SOURCE_KEY: &str = "MainDataSource";

impl Catalog {
    /// Load the gallery. Absent or corrupt data yields an empty store.
    pub fn load_gallery(&self) -> GalleryStore {
        match self.get_json::<GalleryStore>(MAIN_DATA_SOURCE_KEY) {
            Some(store) => {
                debug!(
                    folders = store.folders.len(),
                    photos = store.photos.len(),
                    "gallery loaded"
                );
                store
            }
            None => {
                info!("no saved gallery, starting empty");
                GalleryStore::new()
            }
        }
    }

    /// Overwrite the saved gallery with `store`.
    pub fn save_gallery(&self, store: &GalleryStore) -> Result<()> {
        self.set_json(MAIN_DATA_SOURCE_KEY, store)?;
        debug!(
            folders = store.folders.len(),
            photos = store.photos.len(),
            "gallery saved"
        );
        Ok(())
    }

    /// Returns `true` exactly once per database: on first launch the flag is
    /// recorded and an empty gallery is written.
    pub fn check_first_entry(&self) -> Result<bool> {
        if self.get_json::<bool>(APP_ENTRIES_KEY).is_some() {
            return Ok(false);
        }
        info!("first launch, seeding empty gallery");
        self.set_json(APP_ENTRIES_KEY, &false)?;
        self.save_gallery(&GalleryStore::new())?;
        Ok(true)
    }
}
