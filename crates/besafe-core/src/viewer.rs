use crate::model::{PhotoId, PhotoRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Swipe {
    /// Next photo.
    Left,
    /// Previous photo.
    Right,
}

impl Swipe {
    fn delta(self) -> isize {
        match self {
            Swipe::Left => 1,
            Swipe::Right => -1,
        }
    }
}

/// Pages through a copy of one scope's photo list. Favorite and description
/// edits land in the copy, which the caller takes back with
/// [`PhotoViewer::into_photos`].
#[derive(Clone, Debug)]
pub struct PhotoViewer {
    photos: Vec<PhotoRecord>,
    index: usize,
    is_favorite: bool,
}

impl PhotoViewer {
    /// Open on the photo with `id`. `None` when it is not in `photos`.
    pub fn open(photos: Vec<PhotoRecord>, id: PhotoId) -> Option<Self> {
        let index = photos.iter().position(|p| p.id == id)?;
        let is_favorite = photos[index].is_favorite;
        Some(Self {
            photos,
            index,
            is_favorite,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn current(&self) -> &PhotoRecord {
        &self.photos[self.index]
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    /// Move one page with wraparound; there is no out-of-range page.
    pub fn swipe(&mut self, direction: Swipe) -> &PhotoRecord {
        let count = self.photos.len() as isize;
        let next = (self.index as isize + direction.delta() + count) % count;
        self.index = next as usize;
        self.is_favorite = self.photos[self.index].is_favorite;
        self.current()
    }

    pub fn toggle_favorite(&mut self) -> bool {
        self.is_favorite = !self.is_favorite;
        self.photos[self.index].is_favorite = self.is_favorite;
        self.is_favorite
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.photos[self.index].description = description.into();
    }

    /// Swap in an edited copy of a photo already in the list, matched by id.
    pub fn replace(&mut self, record: PhotoRecord) -> bool {
        let Some(slot) = self.photos.iter_mut().find(|p| p.id == record.id) else {
            return false;
        };
        *slot = record;
        self.is_favorite = self.photos[self.index].is_favorite;
        true
    }

    pub fn into_photos(self) -> Vec<PhotoRecord> {
        self.photos
    }
}
