use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type PhotoId = Uuid;
pub type FolderId = Uuid;

/// Metadata for one stored image. The bytes live in the blob store under
/// `storage_key`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub id: PhotoId,
    #[serde(default)]
    pub storage_key: String,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_favorite: bool,
}

impl PhotoRecord {
    pub fn new(
        storage_key: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
        is_favorite: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            storage_key: storage_key.into(),
            display_name: display_name.into(),
            description: description.into(),
            is_favorite,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderNode {
    pub id: FolderId,
    pub title: String,
    #[serde(default)]
    pub photos: Vec<PhotoRecord>,
    #[serde(default)]
    pub subfolders: Vec<FolderNode>,
}

impl FolderNode {
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_content(title, Vec::new(), Vec::new())
    }

    pub fn with_content(
        title: impl Into<String>,
        photos: Vec<PhotoRecord>,
        subfolders: Vec<FolderNode>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            photos,
            subfolders,
        }
    }
}

/// Root aggregate: top-level folders plus photos that sit outside any folder.
/// Always persisted as a whole.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryStore {
    #[serde(default)]
    pub folders: Vec<FolderNode>,
    #[serde(default)]
    pub photos: Vec<PhotoRecord>,
}

impl GalleryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a navigation path of folder ids, one level at a time, to the
    /// scope it names. The empty path is the store itself.
    pub fn scope(&self, path: &[FolderId]) -> Option<&dyn Container> {
        let Some((first, rest)) = path.split_first() else {
            return Some(self);
        };
        let mut node = self.folder(*first)?;
        for id in rest {
            node = node.folder(*id)?;
        }
        Some(node)
    }

    pub fn scope_mut(&mut self, path: &[FolderId]) -> Option<&mut dyn Container> {
        let Some((first, rest)) = path.split_first() else {
            return Some(self);
        };
        let mut node = self.folder_mut(*first)?;
        for id in rest {
            node = node.folder_mut(*id)?;
        }
        Some(node)
    }
}

/// A scope holding folders and photos. Implemented by the root store and by
/// every folder; all operations act on the immediate children only.
///
/// Name-based lookups resolve duplicates to the first match in list order.
pub trait Container {
    fn folders(&self) -> &[FolderNode];
    fn folders_mut(&mut self) -> &mut Vec<FolderNode>;
    fn photos(&self) -> &[PhotoRecord];
    fn photos_mut(&mut self) -> &mut Vec<PhotoRecord>;

    /// Append a new empty folder. Duplicate titles are accepted.
    fn add_folder(&mut self, title: &str) -> &FolderNode {
        let folders = self.folders_mut();
        folders.push(FolderNode::new(title));
        &folders[folders.len() - 1]
    }

    fn add_photo(&mut self, record: PhotoRecord) {
        self.photos_mut().push(record);
    }

    fn folder(&self, id: FolderId) -> Option<&FolderNode> {
        self.folders().iter().find(|f| f.id == id)
    }

    fn folder_mut(&mut self, id: FolderId) -> Option<&mut FolderNode> {
        self.folders_mut().iter_mut().find(|f| f.id == id)
    }

    fn folder_by_title(&self, title: &str) -> Option<&FolderNode> {
        self.folders().iter().find(|f| f.title == title)
    }

    fn photo(&self, id: PhotoId) -> Option<&PhotoRecord> {
        self.photos().iter().find(|p| p.id == id)
    }

    fn photo_mut(&mut self, id: PhotoId) -> Option<&mut PhotoRecord> {
        self.photos_mut().iter_mut().find(|p| p.id == id)
    }

    fn photo_by_name(&self, name: &str) -> Option<&PhotoRecord> {
        self.photos().iter().find(|p| p.display_name == name)
    }

    fn remove_folder(&mut self, id: FolderId) -> Option<FolderNode> {
        let folders = self.folders_mut();
        let pos = folders.iter().position(|f| f.id == id)?;
        Some(folders.remove(pos))
    }

    fn remove_photo(&mut self, id: PhotoId) -> Option<PhotoRecord> {
        let photos = self.photos_mut();
        let pos = photos.iter().position(|p| p.id == id)?;
        Some(photos.remove(pos))
    }

    fn remove_folder_by_title(&mut self, title: &str) -> Option<FolderNode> {
        let folders = self.folders_mut();
        let pos = folders.iter().position(|f| f.title == title)?;
        Some(folders.remove(pos))
    }

    fn remove_photo_by_name(&mut self, name: &str) -> Option<PhotoRecord> {
        let photos = self.photos_mut();
        let pos = photos.iter().position(|p| p.display_name == name)?;
        Some(photos.remove(pos))
    }

    /// Overwrite the photo list, e.g. with the list handed back by the viewer.
    fn replace_photos(&mut self, photos: Vec<PhotoRecord>) {
        *self.photos_mut() = photos;
    }
}

impl Container for GalleryStore {
    fn folders(&self) -> &[FolderNode] {
        &self.folders
    }

    fn folders_mut(&mut self) -> &mut Vec<FolderNode> {
        &mut self.folders
    }

    fn photos(&self) -> &[PhotoRecord] {
        &self.photos
    }

    fn photos_mut(&mut self) -> &mut Vec<PhotoRecord> {
        &mut self.photos
    }
}

impl Container for FolderNode {
    fn folders(&self) -> &[FolderNode] {
        &self.subfolders
    }

    fn folders_mut(&mut self) -> &mut Vec<FolderNode> {
        &mut self.subfolders
    }

    fn photos(&self) -> &[PhotoRecord] {
        &self.photos
    }

    fn photos_mut(&mut self) -> &mut Vec<PhotoRecord> {
        &mut self.photos
    }
}
