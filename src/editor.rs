use anyhow::{Result, bail};
use tracing::{debug, info};

use besafe_blobs::generator::encode_for_storage;
use besafe_blobs::store::BlobStore;
use besafe_core::model::PhotoRecord;

/// Result of a successful editor save, for the caller to apply to its scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorOutcome {
    Created(PhotoRecord),
    Updated(PhotoRecord),
}

/// In-progress photo being created, or an existing one being edited. Nothing
/// reaches the gallery until [`PhotoEditor::save`] succeeds; dropping the
/// editor discards the edit.
#[derive(Clone, Debug, Default)]
pub struct PhotoEditor {
    existing: Option<PhotoRecord>,
    image: Option<Vec<u8>>,
    pub name: String,
    pub description: String,
    pub is_favorite: bool,
}

impl PhotoEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_existing(record: PhotoRecord) -> Self {
        Self {
            name: record.display_name.clone(),
            description: record.description.clone(),
            is_favorite: record.is_favorite,
            existing: Some(record),
            image: None,
        }
    }

    pub fn existing(&self) -> Option<&PhotoRecord> {
        self.existing.as_ref()
    }

    pub fn pick_image(&mut self, bytes: Vec<u8>) {
        debug!(size = bytes.len(), "image picked");
        self.image = Some(bytes);
    }

    pub fn has_new_image(&self) -> bool {
        self.image.is_some()
    }

    /// Write the picked image (if any) to `blobs`, then build the record.
    /// A failed blob write returns the error and produces no record.
    pub async fn save(&self, blobs: &dyn BlobStore) -> Result<EditorOutcome> {
        let name = self.name.as_str();
        let storage_key = match (&self.image, &self.existing) {
            (Some(bytes), _) => {
                let jpeg = encode_for_storage(bytes)?;
                blobs.save(&jpeg).await?
            }
            (None, Some(existing)) => existing.storage_key.clone(),
            (None, None) => bail!("no image picked"),
        };

        let outcome = match &self.existing {
            Some(existing) => {
                let display_name = if name.is_empty() {
                    existing.display_name.clone()
                } else {
                    name.to_string()
                };
                EditorOutcome::Updated(PhotoRecord {
                    id: existing.id,
                    storage_key,
                    display_name,
                    description: self.description.clone(),
                    is_favorite: self.is_favorite,
                })
            }
            None => EditorOutcome::Created(PhotoRecord::new(
                storage_key,
                name,
                self.description.clone(),
                self.is_favorite,
            )),
        };
        info!(%name, "photo saved");
        Ok(outcome)
    }
}
