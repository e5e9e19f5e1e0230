use std::cmp::Ordering;

use tracing::debug;
use uuid::Uuid;

use crate::model::{Container, FolderNode, PhotoRecord};

/// Display-only projection of one folder or photo.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellModel {
    /// Id of the backing folder or photo.
    pub id: Uuid,
    pub title: String,
    pub image_storage_key: String,
    pub is_favorite: bool,
    pub is_album: bool,
}

impl CellModel {
    pub fn folder(folder: &FolderNode) -> Self {
        Self {
            id: folder.id,
            title: folder.title.clone(),
            image_storage_key: String::new(),
            is_favorite: false,
            is_album: true,
        }
    }

    pub fn photo(photo: &PhotoRecord) -> Self {
        Self {
            id: photo.id,
            title: photo.display_name.clone(),
            image_storage_key: photo.storage_key.clone(),
            is_favorite: photo.is_favorite,
            is_album: false,
        }
    }
}

/// What the screen must redraw after a projection change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Redisplay {
    Nothing,
    All,
}

/// Flat list of cells derived from one scope. Cell positions are transient:
/// every mutation re-sorts, so an index is only meaningful until the next
/// change.
#[derive(Clone, Debug, Default)]
pub struct GalleryProjection {
    cells: Vec<CellModel>,
}

impl GalleryProjection {
    /// Folders first then photos, each in backing-list order.
    pub fn derive(scope: &dyn Container) -> Self {
        let cells = scope
            .folders()
            .iter()
            .map(CellModel::folder)
            .chain(scope.photos().iter().map(CellModel::photo))
            .collect();
        Self { cells }
    }

    pub fn cells(&self) -> &[CellModel] {
        &self.cells
    }

    pub fn get(&self, position: usize) -> Option<&CellModel> {
        self.cells.get(position)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn insert_folder(&mut self, folder: &FolderNode) -> Redisplay {
        self.insert(CellModel::folder(folder))
    }

    pub fn insert_photo(&mut self, photo: &PhotoRecord) -> Redisplay {
        self.insert(CellModel::photo(photo))
    }

    fn insert(&mut self, cell: CellModel) -> Redisplay {
        debug!(title = %cell.title, album = cell.is_album, "cell inserted");
        self.cells.push(cell);
        self.sort();
        Redisplay::All
    }

    /// Remove the cell at `position` together with its backing folder or
    /// photo in `scope`. Out of range is a no-op.
    pub fn remove_at(&mut self, position: usize, scope: &mut dyn Container) -> Redisplay {
        if position >= self.cells.len() {
            return Redisplay::Nothing;
        }
        let cell = self.cells.remove(position);
        let removed = if cell.is_album {
            scope.remove_folder(cell.id).is_some()
        } else {
            scope.remove_photo(cell.id).is_some()
        };
        if !removed {
            debug!(title = %cell.title, "cell had no backing record");
        }
        Redisplay::All
    }

    /// Replace a cell in place after its backing photo changed.
    pub fn update_photo(&mut self, photo: &PhotoRecord) -> Redisplay {
        match self.cells.iter_mut().find(|c| !c.is_album && c.id == photo.id) {
            Some(cell) => {
                *cell = CellModel::photo(photo);
                self.sort();
                Redisplay::All
            }
            None => Redisplay::Nothing,
        }
    }

    /// Rebuild from the scope after bulk changes such as a viewer hand-back.
    pub fn resync(&mut self, scope: &dyn Container) -> Redisplay {
        *self = Self::derive(scope);
        self.sort();
        Redisplay::All
    }

    fn sort(&mut self) {
        self.cells.sort_by(cell_order);
    }
}

/// Folders before photos, then ascending by title.
fn cell_order(a: &CellModel, b: &CellModel) -> Ordering {
    b.is_album
        .cmp(&a.is_album)
        .then_with(|| a.title.cmp(&b.title))
}
