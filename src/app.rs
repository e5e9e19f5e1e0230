use std::collections::{HashMap, HashSet};
use std::convert::identity;
use std::sync::Arc;

use iced::widget::image::Handle;
use iced::{Element, Subscription, Task, Theme, window};
use tracing::{error, info, warn};

use besafe_blobs::store::{BlobStore, ImageBlobStore};
use besafe_catalog::db::Catalog;
use besafe_core::auth::{Credentials, LoginForm};
use besafe_core::model::{FolderId, GalleryStore};
use besafe_core::projection::{GalleryProjection, Redisplay};
use besafe_core::viewer::{PhotoViewer, Swipe};

use crate::config::Config;
use crate::editor::{EditorOutcome, PhotoEditor};
use crate::views;

pub const ROOT_TITLE: &str = "Gallery";

/// A folder listing. The empty path is the gallery root.
#[derive(Debug)]
pub struct GalleryScreen {
    pub path: Vec<FolderId>,
    pub title: String,
    pub projection: GalleryProjection,
    /// Draft title for the next folder added here.
    pub folder_title: String,
}

impl GalleryScreen {
    fn new(path: Vec<FolderId>, title: String, projection: GalleryProjection) -> Self {
        Self {
            path,
            title,
            projection,
            folder_title: String::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }
}

#[derive(Debug)]
pub enum Screen {
    Login(LoginForm),
    Gallery(GalleryScreen),
    Viewer(PhotoViewer),
    Editor(PhotoEditor),
}

#[derive(Debug, Clone)]
pub enum Message {
    // Sign-in
    LoginChanged(String),
    PasswordChanged(String),
    SignIn,
    DismissAlert,

    // Gallery
    OpenCell(usize),
    EditCell(usize),
    DeleteCell(usize),
    FolderTitleChanged(String),
    AddFolder,
    AddPhoto,
    ThumbnailsLoaded(Vec<(String, Vec<u8>)>),

    // Editor
    PickImage,
    ImagePicked(Vec<u8>),
    NameChanged(String),
    SavePhoto,
    PhotoSaved(Result<EditorOutcome, String>),

    // Viewer and editor
    DescriptionChanged(String),
    ToggleFavorite,
    EditCurrent,
    Swipe(Swipe),
    ImageLoaded(String, Option<Vec<u8>>),

    // Navigation
    Back,
    Logout,
    CloseRequested,

    Noop,
}

/// Blob and dialog work that runs off the update loop. Each effect reports
/// back with a single message.
#[derive(Debug)]
enum Effect {
    LoadImage(String),
    LoadThumbnails(Vec<String>),
    SavePhoto(PhotoEditor),
    PickImage,
}

impl Effect {
    async fn run(self, blobs: Arc<dyn BlobStore>) -> Message {
        match self {
            Effect::LoadImage(key) => {
                let bytes = blobs.load(&key).await;
                Message::ImageLoaded(key, bytes)
            }
            Effect::LoadThumbnails(keys) => {
                let mut loaded = Vec::with_capacity(keys.len());
                for key in keys {
                    if let Some(bytes) = blobs.load(&key).await {
                        loaded.push((key, bytes));
                    }
                }
                Message::ThumbnailsLoaded(loaded)
            }
            Effect::SavePhoto(editor) => {
                let result = editor
                    .save(blobs.as_ref())
                    .await
                    .map_err(|err| format!("{err:#}"));
                Message::PhotoSaved(result)
            }
            Effect::PickImage => pick_image().await,
        }
    }
}

async fn pick_image() -> Message {
    let Some(handle) = rfd::AsyncFileDialog::new()
        .set_title("Choose a photo")
        .add_filter("Images", &["jpg", "jpeg", "png"])
        .pick_file()
        .await
    else {
        return Message::Noop;
    };
    match tokio::fs::read(handle.path()).await {
        Ok(bytes) => Message::ImagePicked(bytes),
        Err(err) => {
            warn!(path = %handle.path().display(), %err, "failed to read picked image");
            Message::Noop
        }
    }
}

/// Screen stack plus the state every screen shares. Child screens never hold
/// references into the gallery; their results are applied to the screen
/// beneath when they close.
pub struct App {
    stack: Vec<Screen>,
    catalog: Option<Catalog>,
    blobs: Arc<dyn BlobStore>,
    credentials: Credentials,
    store: GalleryStore,

    thumbnails: HashMap<String, Handle>,
    requested_thumbnails: HashSet<String>,
    current_image: Option<Handle>,
    picked_image: Option<Handle>,

    alert: Option<String>,
    status_message: String,
}

impl App {
    pub fn boot(config: &Config) -> (Self, Task<Message>) {
        let path = config.catalog_path();
        let catalog = match Catalog::open(&path) {
            Ok(catalog) => {
                info!(%path, "catalog opened");
                Some(catalog)
            }
            Err(err) => {
                error!(%err, "failed to open catalog");
                None
            }
        };
        let blobs = Arc::new(ImageBlobStore::new(config.images_dir()));

        let mut app = Self::new(catalog, blobs, Credentials::default());
        if app.catalog.is_none() {
            app.status_message = "Gallery database unavailable, changes will not be saved.".into();
        }
        (app, Task::none())
    }

    pub fn new(
        catalog: Option<Catalog>,
        blobs: Arc<dyn BlobStore>,
        credentials: Credentials,
    ) -> Self {
        Self {
            stack: vec![Screen::Login(LoginForm::default())],
            catalog,
            blobs,
            credentials,
            store: GalleryStore::new(),
            thumbnails: HashMap::new(),
            requested_thumbnails: HashSet::new(),
            current_image: None,
            picked_image: None,
            alert: None,
            status_message: "Sign in to open the gallery.".into(),
        }
    }

    pub fn title(&self) -> String {
        match self.screen() {
            Screen::Login(_) => "BeSafe".into(),
            Screen::Gallery(gallery) => format!("BeSafe - {}", gallery.title),
            Screen::Viewer(viewer) => format!("BeSafe - {}", viewer.current().display_name),
            Screen::Editor(editor) => match editor.existing() {
                Some(record) => format!("BeSafe - Edit {}", record.display_name),
                None => "BeSafe - New photo".into(),
            },
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn subscription(&self) -> Subscription<Message> {
        window::close_requests().map(|_| Message::CloseRequested)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        if let Message::CloseRequested = message {
            self.close_all();
            return iced::exit();
        }
        let effects = self.apply(message);
        Task::batch(
            effects
                .into_iter()
                .map(|effect| Task::perform(effect.run(Arc::clone(&self.blobs)), identity)),
        )
    }

    pub fn view(&self) -> Element<'_, Message> {
        views::view(self)
    }

    fn apply(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();
        match message {
            Message::LoginChanged(text) => {
                if let Some(Screen::Login(form)) = self.stack.last_mut() {
                    form.login = text;
                }
            }
            Message::PasswordChanged(text) => {
                if let Some(Screen::Login(form)) = self.stack.last_mut() {
                    form.password = text;
                }
            }
            Message::SignIn => self.sign_in(),
            Message::DismissAlert => self.alert = None,

            Message::OpenCell(position) => effects.extend(self.open_cell(position)),
            Message::EditCell(position) => self.edit_cell(position),
            Message::DeleteCell(position) => self.delete_cell(position),
            Message::FolderTitleChanged(text) => {
                if let Some(Screen::Gallery(gallery)) = self.stack.last_mut() {
                    gallery.folder_title = text;
                }
            }
            Message::AddFolder => self.add_folder(),
            Message::AddPhoto => {
                if matches!(self.stack.last(), Some(Screen::Gallery(_))) {
                    self.picked_image = None;
                    self.stack.push(Screen::Editor(PhotoEditor::new()));
                }
            }
            Message::ThumbnailsLoaded(loaded) => {
                for (key, bytes) in loaded {
                    self.thumbnails.insert(key, Handle::from_bytes(bytes));
                }
            }

            Message::PickImage => {
                if matches!(self.stack.last(), Some(Screen::Editor(_))) {
                    effects.push(Effect::PickImage);
                }
            }
            Message::ImagePicked(bytes) => {
                if let Some(Screen::Editor(editor)) = self.stack.last_mut() {
                    self.picked_image = Some(Handle::from_bytes(bytes.clone()));
                    editor.pick_image(bytes);
                }
            }
            Message::NameChanged(text) => {
                if let Some(Screen::Editor(editor)) = self.stack.last_mut() {
                    editor.name = text;
                }
            }
            Message::SavePhoto => {
                if let Some(Screen::Editor(editor)) = self.stack.last() {
                    self.status_message = "Saving photo...".into();
                    effects.push(Effect::SavePhoto(editor.clone()));
                }
            }
            Message::PhotoSaved(result) => effects.extend(self.photo_saved(result)),

            Message::DescriptionChanged(text) => match self.stack.last_mut() {
                Some(Screen::Editor(editor)) => editor.description = text,
                Some(Screen::Viewer(viewer)) => viewer.set_description(text),
                _ => {}
            },
            Message::ToggleFavorite => match self.stack.last_mut() {
                Some(Screen::Editor(editor)) => editor.is_favorite = !editor.is_favorite,
                Some(Screen::Viewer(viewer)) => {
                    viewer.toggle_favorite();
                }
                _ => {}
            },
            Message::EditCurrent => {
                if let Some(Screen::Viewer(viewer)) = self.stack.last() {
                    let editor = PhotoEditor::for_existing(viewer.current().clone());
                    self.picked_image = None;
                    self.stack.push(Screen::Editor(editor));
                }
            }
            Message::Swipe(direction) => {
                if let Some(Screen::Viewer(viewer)) = self.stack.last_mut() {
                    let key = viewer.swipe(direction).storage_key.clone();
                    self.current_image = None;
                    effects.push(Effect::LoadImage(key));
                }
            }
            Message::ImageLoaded(key, bytes) => {
                if let Some(Screen::Viewer(viewer)) = self.stack.last()
                    && viewer.current().storage_key == key
                {
                    self.current_image = bytes.map(Handle::from_bytes);
                }
            }

            Message::Back => self.back(),
            Message::Logout => {
                if self.is_signed_in() {
                    info!("signed out");
                }
                self.close_all();
                self.stack = vec![Screen::Login(LoginForm::default())];
                self.status_message = "Signed out.".into();
            }
            Message::CloseRequested => self.close_all(),

            Message::Noop => {}
        }
        effects.extend(self.missing_thumbnails());
        effects
    }

    fn sign_in(&mut self) {
        let Some(Screen::Login(form)) = self.stack.last_mut() else {
            return;
        };
        if let Err(err) = form.submit(&self.credentials) {
            self.alert = Some(err.to_string());
            return;
        }
        self.alert = None;

        if let Some(catalog) = &self.catalog {
            if let Err(err) = catalog.check_first_entry() {
                error!(%err, "failed to record first launch");
            }
            self.store = catalog.load_gallery();
        }
        self.stack.push(Screen::Gallery(GalleryScreen::new(
            Vec::new(),
            ROOT_TITLE.into(),
            GalleryProjection::derive(&self.store),
        )));
        self.status_message = format!(
            "{} folders, {} photos",
            self.store.folders.len(),
            self.store.photos.len()
        );
    }

    fn open_cell(&mut self, position: usize) -> Option<Effect> {
        let Some(Screen::Gallery(gallery)) = self.stack.last() else {
            return None;
        };
        let Some(cell) = gallery.projection.get(position).cloned() else {
            self.status_message = format!("Nothing at position {position}.");
            return None;
        };
        let Some(scope) = self.store.scope(&gallery.path) else {
            warn!(path = ?gallery.path, "open folder no longer exists");
            return None;
        };

        if cell.is_album {
            let Some(folder) = scope.folder(cell.id) else {
                self.status_message = format!("Folder \"{}\" not found.", cell.title);
                return None;
            };
            let mut path = gallery.path.clone();
            path.push(folder.id);
            let screen = GalleryScreen::new(
                path,
                folder.title.clone(),
                GalleryProjection::derive(folder),
            );
            info!(title = %screen.title, depth = screen.path.len(), "opened folder");
            self.stack.push(Screen::Gallery(screen));
            None
        } else {
            let Some(viewer) = PhotoViewer::open(scope.photos().to_vec(), cell.id) else {
                self.status_message = format!("Photo \"{}\" not found.", cell.title);
                return None;
            };
            let key = viewer.current().storage_key.clone();
            self.stack.push(Screen::Viewer(viewer));
            self.current_image = None;
            Some(Effect::LoadImage(key))
        }
    }

    fn edit_cell(&mut self, position: usize) {
        let Some(Screen::Gallery(gallery)) = self.stack.last() else {
            return;
        };
        let record = gallery
            .projection
            .get(position)
            .filter(|cell| !cell.is_album)
            .and_then(|cell| self.store.scope(&gallery.path)?.photo(cell.id))
            .cloned();
        match record {
            Some(record) => {
                self.picked_image = None;
                self.stack.push(Screen::Editor(PhotoEditor::for_existing(record)));
            }
            None => self.status_message = format!("No photo at position {position}."),
        }
    }

    fn delete_cell(&mut self, position: usize) {
        let Some(Screen::Gallery(gallery)) = self.stack.last_mut() else {
            return;
        };
        let Some(title) = gallery.projection.get(position).map(|cell| cell.title.clone()) else {
            self.status_message = format!("Nothing at position {position}.");
            return;
        };
        let Some(scope) = self.store.scope_mut(&gallery.path) else {
            return;
        };
        if gallery.projection.remove_at(position, scope) == Redisplay::All {
            info!(%title, "deleted");
            self.status_message = format!("Deleted \"{title}\".");
            self.persist();
        }
    }

    fn add_folder(&mut self) {
        let Some(Screen::Gallery(gallery)) = self.stack.last_mut() else {
            return;
        };
        let Some(scope) = self.store.scope_mut(&gallery.path) else {
            return;
        };
        let title = std::mem::take(&mut gallery.folder_title);
        let folder = scope.add_folder(&title);
        gallery.projection.insert_folder(folder);
        info!(%title, "folder added");
        self.status_message = format!("Added folder \"{title}\".");
        self.persist();
    }

    fn photo_saved(&mut self, result: Result<EditorOutcome, String>) -> Option<Effect> {
        if !matches!(self.stack.last(), Some(Screen::Editor(_))) {
            warn!("editor closed before its photo was saved");
            return None;
        }
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(%err, "photo not saved");
                self.status_message = format!("Photo not saved: {err}");
                return None;
            }
        };

        self.stack.pop();
        self.picked_image = None;
        let (EditorOutcome::Created(record) | EditorOutcome::Updated(record)) = &outcome;
        self.status_message = format!("Saved \"{}\".", record.display_name);

        if let Some(Screen::Viewer(viewer)) = self.stack.last_mut() {
            // Edits made from the viewer reach the folder when the viewer closes.
            if let EditorOutcome::Updated(record) = outcome {
                viewer.replace(record);
            }
            return Some(Effect::LoadImage(viewer.current().storage_key.clone()));
        }
        let Some(Screen::Gallery(gallery)) = self.stack.last_mut() else {
            return None;
        };
        let scope = self.store.scope_mut(&gallery.path)?;
        match outcome {
            EditorOutcome::Created(record) => {
                gallery.projection.insert_photo(&record);
                scope.add_photo(record);
            }
            EditorOutcome::Updated(record) => {
                gallery.projection.update_photo(&record);
                if let Some(slot) = scope.photo_mut(record.id) {
                    *slot = record;
                }
            }
        }
        self.persist();
        None
    }

    fn back(&mut self) {
        match self.stack.last() {
            Some(Screen::Viewer(_)) => self.close_viewer(),
            Some(Screen::Editor(_)) => {
                self.stack.pop();
                self.picked_image = None;
                self.status_message = "Edit discarded.".into();
            }
            Some(Screen::Gallery(gallery)) if !gallery.is_root() => {
                self.stack.pop();
                if let Some(Screen::Gallery(parent)) = self.stack.last_mut()
                    && let Some(scope) = self.store.scope(&parent.path)
                {
                    parent.projection.resync(scope);
                }
                self.persist();
            }
            _ => {}
        }
    }

    /// Hand the viewer's photo list back to the folder it was opened from.
    fn close_viewer(&mut self) {
        let Some(Screen::Viewer(viewer)) = self.stack.pop() else {
            return;
        };
        self.current_image = None;
        let Some(Screen::Gallery(gallery)) = self.stack.last_mut() else {
            return;
        };
        let Some(scope) = self.store.scope_mut(&gallery.path) else {
            return;
        };
        scope.replace_photos(viewer.into_photos());
        gallery.projection.resync(scope);
        self.persist();
    }

    /// Discard an open editor, hand back an open viewer, then persist.
    /// Runs on logout and before the window closes.
    fn close_all(&mut self) {
        if let Some(Screen::Editor(_)) = self.stack.last() {
            self.stack.pop();
            self.picked_image = None;
        }
        if let Some(Screen::Viewer(_)) = self.stack.last() {
            self.close_viewer();
        }
        if self.is_signed_in() {
            self.persist();
        }
    }

    /// Blob keys on the open gallery screen that have not been requested yet.
    fn missing_thumbnails(&mut self) -> Option<Effect> {
        let Some(Screen::Gallery(gallery)) = self.stack.last() else {
            return None;
        };
        let keys: Vec<String> = gallery
            .projection
            .cells()
            .iter()
            .filter(|cell| !cell.is_album)
            .filter(|cell| !self.requested_thumbnails.contains(&cell.image_storage_key))
            .map(|cell| cell.image_storage_key.clone())
            .collect();
        if keys.is_empty() {
            return None;
        }
        self.requested_thumbnails.extend(keys.iter().cloned());
        Some(Effect::LoadThumbnails(keys))
    }

    fn persist(&mut self) {
        let Some(catalog) = &self.catalog else {
            return;
        };
        if let Err(err) = catalog.save_gallery(&self.store) {
            error!(%err, "failed to save gallery");
            self.status_message = format!("Could not save gallery: {err}");
        }
    }

    fn is_signed_in(&self) -> bool {
        self.stack.iter().any(|s| matches!(s, Screen::Gallery(_)))
    }

    pub fn screen(&self) -> &Screen {
        // The stack always starts with the sign-in screen.
        &self.stack[self.stack.len() - 1]
    }

    pub fn current_image(&self) -> Option<&Handle> {
        self.current_image.as_ref()
    }

    pub fn picked_image(&self) -> Option<&Handle> {
        self.picked_image.as_ref()
    }

    pub fn thumbnail(&self, key: &str) -> Option<&Handle> {
        self.thumbnails.get(key)
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Cursor;
    use std::sync::Mutex;

    use anyhow::{Result, anyhow};
    use async_trait::async_trait;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

    use besafe_core::model::{Container, FolderNode, PhotoRecord};

    use super::*;

    #[derive(Default)]
    struct MemoryBlobs {
        blobs: Mutex<HashMap<String, Vec<u8>>>,
    }

    impl MemoryBlobs {
        fn is_empty(&self) -> bool {
            self.blobs.lock().unwrap().is_empty()
        }
    }

    #[async_trait]
    impl BlobStore for MemoryBlobs {
        async fn save(&self, bytes: &[u8]) -> Result<String> {
            let mut blobs = self.blobs.lock().unwrap();
            let key = format!("KEY{}", blobs.len());
            blobs.insert(key.clone(), bytes.to_vec());
            Ok(key)
        }

        async fn load(&self, key: &str) -> Option<Vec<u8>> {
            self.blobs.lock().unwrap().get(key).cloned()
        }
    }

    struct FullDisk;

    #[async_trait]
    impl BlobStore for FullDisk {
        async fn save(&self, _bytes: &[u8]) -> Result<String> {
            Err(anyhow!("no space left on device"))
        }

        async fn load(&self, _key: &str) -> Option<Vec<u8>> {
            None
        }
    }

    fn png() -> Vec<u8> {
        let mut out = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([9, 9, 9])))
            .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
            .unwrap();
        out
    }

    fn photo(name: &str) -> PhotoRecord {
        PhotoRecord::new(format!("KEY-{name}"), name, "", false)
    }

    /// A catalog that has been launched before and holds `store`.
    fn seeded_catalog(store: &GalleryStore) -> Catalog {
        let catalog = Catalog::open_in_memory().unwrap();
        catalog.check_first_entry().unwrap();
        catalog.save_gallery(store).unwrap();
        catalog
    }

    fn fresh_app(blobs: Arc<dyn BlobStore>) -> App {
        App::new(
            Some(Catalog::open_in_memory().unwrap()),
            blobs,
            Credentials::default(),
        )
    }

    /// Apply `message`, then run the blob work it starts until nothing is left.
    async fn send(app: &mut App, message: Message) {
        let mut pending = app.apply(message);
        while let Some(effect) = pending.pop() {
            let reply = effect.run(Arc::clone(&app.blobs)).await;
            pending.extend(app.apply(reply));
        }
    }

    async fn signed_in(catalog: Catalog, blobs: Arc<dyn BlobStore>) -> App {
        let mut app = App::new(Some(catalog), blobs, Credentials::default());
        send(&mut app, Message::LoginChanged("Example@Email.com".into())).await;
        send(&mut app, Message::PasswordChanged("****".into())).await;
        send(&mut app, Message::SignIn).await;
        assert!(matches!(app.screen(), Screen::Gallery(g) if g.is_root()));
        app
    }

    async fn signed_in_empty() -> App {
        signed_in(Catalog::open_in_memory().unwrap(), Arc::new(MemoryBlobs::default())).await
    }

    fn saved(app: &App) -> GalleryStore {
        app.catalog.as_ref().unwrap().load_gallery()
    }

    fn gallery(app: &App) -> &GalleryScreen {
        match app.screen() {
            Screen::Gallery(screen) => screen,
            _ => panic!("expected a gallery screen"),
        }
    }

    fn position_of(app: &App, title: &str) -> usize {
        gallery(app)
            .projection
            .cells()
            .iter()
            .position(|c| c.title == title)
            .unwrap()
    }

    async fn add_folder(app: &mut App, title: &str) {
        send(app, Message::FolderTitleChanged(title.into())).await;
        send(app, Message::AddFolder).await;
    }

    async fn add_photo(app: &mut App, name: &str) {
        send(app, Message::AddPhoto).await;
        send(app, Message::ImagePicked(png())).await;
        send(app, Message::NameChanged(name.into())).await;
        send(app, Message::SavePhoto).await;
    }

    #[tokio::test]
    async fn wrong_credentials_clear_fields_and_alert() {
        let mut app = fresh_app(Arc::new(MemoryBlobs::default()));
        send(&mut app, Message::LoginChanged("example@email.com".into())).await;
        send(&mut app, Message::PasswordChanged("nope".into())).await;
        send(&mut app, Message::SignIn).await;

        let Screen::Login(form) = app.screen() else {
            panic!("should stay on sign-in");
        };
        assert!(form.login.is_empty());
        assert!(form.password.is_empty());
        assert!(app.alert().is_some());

        send(&mut app, Message::DismissAlert).await;
        assert!(app.alert().is_none());
    }

    #[tokio::test]
    async fn sign_in_after_failure_clears_alert() {
        let mut app = fresh_app(Arc::new(MemoryBlobs::default()));
        send(&mut app, Message::SignIn).await;
        assert_eq!(app.alert(), Some("wrong login or password"));

        send(&mut app, Message::LoginChanged("example@email.com".into())).await;
        send(&mut app, Message::PasswordChanged("****".into())).await;
        send(&mut app, Message::SignIn).await;

        assert!(matches!(app.screen(), Screen::Gallery(_)));
        assert!(app.alert().is_none());
    }

    #[tokio::test]
    async fn first_sign_in_starts_empty() {
        let app = signed_in_empty().await;
        assert!(gallery(&app).projection.is_empty());
        assert_eq!(gallery(&app).title, ROOT_TITLE);
        assert_eq!(saved(&app), GalleryStore::new());
    }

    #[tokio::test]
    async fn add_folder_is_persisted() {
        let mut app = signed_in_empty().await;
        add_folder(&mut app, "Trips").await;

        let saved = saved(&app);
        assert_eq!(saved.folders.len(), 1);
        assert_eq!(saved.folders[0].title, "Trips");
        assert!(saved.folders[0].photos.is_empty());
        assert_eq!(gallery(&app).projection.len(), 1);
        assert!(gallery(&app).folder_title.is_empty());
    }

    #[tokio::test]
    async fn add_photo_through_editor() {
        let blobs = Arc::new(MemoryBlobs::default());
        let mut app = signed_in(Catalog::open_in_memory().unwrap(), blobs.clone()).await;
        send(&mut app, Message::AddPhoto).await;
        send(&mut app, Message::ImagePicked(png())).await;
        assert!(app.picked_image().is_some());
        send(&mut app, Message::NameChanged("cat.jpg".into())).await;
        send(&mut app, Message::DescriptionChanged("first one".into())).await;
        send(&mut app, Message::ToggleFavorite).await;
        send(&mut app, Message::SavePhoto).await;

        let cells = gallery(&app).projection.cells();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].title, "cat.jpg");
        assert!(cells[0].is_favorite);
        assert!(app.picked_image().is_none());

        let saved = saved(&app);
        let record = saved.photo_by_name("cat.jpg").unwrap();
        assert_eq!(record.description, "first one");
        assert!(blobs.load(&record.storage_key).await.is_some());
        assert!(app.thumbnail(&record.storage_key).is_some());
    }

    #[tokio::test]
    async fn failed_blob_write_creates_no_record() {
        let mut app = signed_in(Catalog::open_in_memory().unwrap(), Arc::new(FullDisk)).await;
        add_photo(&mut app, "lost.jpg").await;

        assert!(matches!(app.screen(), Screen::Editor(_)));
        assert!(app.status_message().starts_with("Photo not saved"));
        assert!(app.store.photos.is_empty());

        send(&mut app, Message::Back).await;
        assert!(gallery(&app).projection.is_empty());
        assert!(saved(&app).photos.is_empty());
    }

    #[tokio::test]
    async fn successful_save_replaces_error_status() {
        let mut app = signed_in_empty().await;
        send(&mut app, Message::AddPhoto).await;
        send(&mut app, Message::SavePhoto).await;
        assert!(app.status_message().starts_with("Photo not saved"));

        send(&mut app, Message::ImagePicked(png())).await;
        send(&mut app, Message::NameChanged("late.jpg".into())).await;
        send(&mut app, Message::SavePhoto).await;
        assert!(matches!(app.screen(), Screen::Gallery(_)));
        assert_eq!(app.status_message(), "Saved \"late.jpg\".");
    }

    #[tokio::test]
    async fn editor_back_discards() {
        let blobs = Arc::new(MemoryBlobs::default());
        let mut app = signed_in(Catalog::open_in_memory().unwrap(), blobs.clone()).await;
        send(&mut app, Message::AddPhoto).await;
        send(&mut app, Message::ImagePicked(png())).await;
        send(&mut app, Message::Back).await;

        assert!(gallery(&app).projection.is_empty());
        assert!(app.picked_image().is_none());
        assert!(blobs.is_empty());
    }

    #[tokio::test]
    async fn favorite_in_viewer_is_written_back() {
        let mut store = GalleryStore::new();
        store.folders.push(FolderNode::with_content(
            "Beach",
            vec![photo("dawn.jpg"), photo("sunset.jpg"), photo("noon.jpg")],
            Vec::new(),
        ));
        let mut app = signed_in(seeded_catalog(&store), Arc::new(MemoryBlobs::default())).await;

        let position = position_of(&app, "Beach");

        send(&mut app, Message::OpenCell(position)).await;
        assert_eq!(gallery(&app).title, "Beach");

        let position = position_of(&app, "sunset.jpg");

        send(&mut app, Message::OpenCell(position)).await;
        let Screen::Viewer(viewer) = app.screen() else {
            panic!("expected the viewer");
        };
        assert_eq!(viewer.current().display_name, "sunset.jpg");
        assert!(app.current_image().is_none());

        send(&mut app, Message::ToggleFavorite).await;
        send(&mut app, Message::Back).await;

        let saved = saved(&app);
        let beach = saved.folder_by_title("Beach").unwrap();
        assert!(beach.photo_by_name("sunset.jpg").unwrap().is_favorite);
        assert!(!beach.photo_by_name("dawn.jpg").unwrap().is_favorite);
        assert!(!beach.photo_by_name("noon.jpg").unwrap().is_favorite);

        let cell = &gallery(&app).projection.cells()[position_of(&app, "sunset.jpg")];
        assert!(cell.is_favorite);
    }

    #[tokio::test]
    async fn viewer_swipes_wrap_and_load_images() {
        let blobs = Arc::new(MemoryBlobs::default());
        let key = blobs.save(b"pixels").await.unwrap();
        let mut store = GalleryStore::new();
        store.photos.push(PhotoRecord::new(key.clone(), "a.jpg", "", false));
        store.photos.push(photo("b.jpg"));
        let mut app = signed_in(seeded_catalog(&store), blobs).await;
        assert!(app.thumbnail(&key).is_some());
        assert!(app.thumbnail("KEY-b.jpg").is_none());

        send(&mut app, Message::OpenCell(0)).await;
        assert!(app.current_image().is_some());

        send(&mut app, Message::Swipe(Swipe::Left)).await;
        assert!(app.current_image().is_none());
        send(&mut app, Message::Swipe(Swipe::Left)).await;
        let Screen::Viewer(viewer) = app.screen() else {
            panic!("expected the viewer");
        };
        assert_eq!(viewer.index(), 0);
        assert!(app.current_image().is_some());
    }

    #[tokio::test]
    async fn stale_image_is_ignored() {
        let blobs = Arc::new(MemoryBlobs::default());
        let key = blobs.save(b"pixels").await.unwrap();
        let mut store = GalleryStore::new();
        store.photos.push(PhotoRecord::new(key.clone(), "a.jpg", "", false));
        store.photos.push(photo("b.jpg"));
        let mut app = signed_in(seeded_catalog(&store), blobs).await;

        send(&mut app, Message::OpenCell(1)).await;
        send(&mut app, Message::ImageLoaded(key, Some(b"pixels".to_vec()))).await;
        assert!(app.current_image().is_none());
    }

    #[tokio::test]
    async fn edit_from_viewer_reaches_folder_on_close() {
        let mut store = GalleryStore::new();
        store.add_photo(photo("a.jpg"));
        store.add_photo(photo("b.jpg"));
        let mut app = signed_in(seeded_catalog(&store), Arc::new(MemoryBlobs::default())).await;

        send(&mut app, Message::OpenCell(1)).await;
        send(&mut app, Message::EditCurrent).await;
        assert!(matches!(app.screen(), Screen::Editor(_)));
        send(&mut app, Message::DescriptionChanged("edited".into())).await;
        send(&mut app, Message::SavePhoto).await;

        let Screen::Viewer(viewer) = app.screen() else {
            panic!("editor should return to the viewer");
        };
        assert_eq!(viewer.current().description, "edited");

        send(&mut app, Message::Back).await;
        let saved = saved(&app);
        assert_eq!(saved.photo_by_name("b.jpg").unwrap().description, "edited");
        assert_eq!(saved.photo_by_name("a.jpg").unwrap().description, "");
    }

    #[tokio::test]
    async fn delete_removes_cell_and_record() {
        let mut store = GalleryStore::new();
        store.add_folder("Trips");
        store.add_photo(photo("a.jpg"));
        store.add_photo(photo("b.jpg"));
        let mut app = signed_in(seeded_catalog(&store), Arc::new(MemoryBlobs::default())).await;

        let before = gallery(&app).projection.len();
        send(&mut app, Message::DeleteCell(42)).await;
        assert_eq!(app.status_message(), "Nothing at position 42.");
        assert_eq!(gallery(&app).projection.len(), before);

        let position = position_of(&app, "a.jpg");

        send(&mut app, Message::DeleteCell(position)).await;
        assert_eq!(app.status_message(), "Deleted \"a.jpg\".");
        assert_eq!(gallery(&app).projection.len(), before - 1);
        let saved = saved(&app);
        assert!(saved.photo_by_name("a.jpg").is_none());
        assert!(saved.photo_by_name("b.jpg").is_some());
        assert_eq!(saved.folders.len(), 1);
    }

    #[tokio::test]
    async fn nested_folders_navigate_one_level_at_a_time() {
        let mut app = signed_in_empty().await;
        add_folder(&mut app, "Trips").await;
        send(&mut app, Message::OpenCell(0)).await;
        add_folder(&mut app, "Rome").await;
        send(&mut app, Message::OpenCell(0)).await;
        assert_eq!(gallery(&app).title, "Rome");
        assert_eq!(gallery(&app).path.len(), 2);

        add_photo(&mut app, "forum.jpg").await;

        send(&mut app, Message::Back).await;
        send(&mut app, Message::Back).await;
        assert!(gallery(&app).is_root());
        send(&mut app, Message::Back).await;
        assert!(gallery(&app).is_root());

        let saved = saved(&app);
        let rome = saved.folders[0].folder_by_title("Rome").unwrap();
        assert_eq!(rome.photos.len(), 1);
        assert!(saved.photos.is_empty());
    }

    #[tokio::test]
    async fn edit_existing_updates_in_place() {
        let mut store = GalleryStore::new();
        store.add_photo(photo("cat.jpg"));
        let id = store.photos[0].id;
        let mut app = signed_in(seeded_catalog(&store), Arc::new(MemoryBlobs::default())).await;

        send(&mut app, Message::EditCell(0)).await;
        send(&mut app, Message::DescriptionChanged("on the sofa".into())).await;
        send(&mut app, Message::SavePhoto).await;

        let saved = saved(&app);
        assert_eq!(saved.photos.len(), 1);
        assert_eq!(saved.photos[0].id, id);
        assert_eq!(saved.photos[0].display_name, "cat.jpg");
        assert_eq!(saved.photos[0].description, "on the sofa");
        assert_eq!(saved.photos[0].storage_key, "KEY-cat.jpg");
    }

    #[tokio::test]
    async fn logout_returns_to_sign_in() {
        let mut app = signed_in_empty().await;
        add_folder(&mut app, "Trips").await;
        send(&mut app, Message::Logout).await;

        assert!(matches!(app.screen(), Screen::Login(_)));
        assert_eq!(saved(&app).folders.len(), 1);
    }

    #[tokio::test]
    async fn logout_from_viewer_keeps_favorite() {
        let mut store = GalleryStore::new();
        store.add_photo(photo("a.jpg"));
        let mut app = signed_in(seeded_catalog(&store), Arc::new(MemoryBlobs::default())).await;

        send(&mut app, Message::OpenCell(0)).await;
        send(&mut app, Message::ToggleFavorite).await;
        send(&mut app, Message::Logout).await;

        assert!(matches!(app.screen(), Screen::Login(_)));
        assert!(saved(&app).photos[0].is_favorite);
    }

    #[tokio::test]
    async fn gallery_survives_restart_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::resolve(Some(dir.path().to_path_buf())).unwrap();

        let (mut app, _) = App::boot(&config);
        send(&mut app, Message::LoginChanged("example@email.com".into())).await;
        send(&mut app, Message::PasswordChanged("****".into())).await;
        send(&mut app, Message::SignIn).await;
        add_photo(&mut app, "kept.jpg").await;
        send(&mut app, Message::OpenCell(0)).await;
        send(&mut app, Message::ToggleFavorite).await;
        send(&mut app, Message::CloseRequested).await;
        drop(app);

        let catalog = Catalog::open(&config.catalog_path()).unwrap();
        let blobs = Arc::new(ImageBlobStore::new(config.images_dir()));
        let mut app = signed_in(catalog, blobs).await;
        let cell = &gallery(&app).projection.cells()[0];
        assert_eq!(cell.title, "kept.jpg");
        assert!(cell.is_favorite);

        send(&mut app, Message::OpenCell(0)).await;
        assert!(app.current_image().is_some());
    }
}
