use iced::widget::{column, container, horizontal_rule};
use iced::{Element, Length, Subscription, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod error;
mod files;
mod session;
mod state;
mod ui;

use api::models::{
    CarImageRecord, FloorLabel, ImageRecord, LoginResponse, MessageResponse, Section,
};
use api::{ApiClient, ImageApi};
use config::Config;
use error::ApiError;
use files::preview::PreparedFiles;
use files::IMAGE_EXTENSIONS;
use session::{Decision, Route, SessionStore};
use state::auth::{self, LoginForm, RegisterForm};
use state::car_gallery::CarGallery;
use state::car_upload::CarUploadForm;
use state::gallery::{FloorFilter, FloorGallery};
use state::notice::{Notice, Notices};
use state::upload::FloorUploadForm;
use ui::remote::RemoteImages;

/// The view model behind the current route
enum Screen {
    Login(LoginForm),
    Register(RegisterForm),
    Gallery(FloorGallery),
    Upload(FloorUploadForm),
    CarUpload(CarUploadForm),
    CarGallery(CarGallery),
}

/// Main application state
struct SitePhotos {
    config: Config,
    /// Persistent token storage, shared with the API client
    session: Arc<SessionStore>,
    api: Arc<dyn ImageApi>,
    route: Route,
    screen: Screen,
    notices: Notices,
    /// Downloaded server images
    remote: RemoteImages,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    Navigate(Route),
    Logout,
    Tick(Instant),
    DismissNotice(usize),
    RemoteImageLoaded(String, Result<Vec<u8>, ApiError>),

    LoginUsername(String),
    LoginPassword(String),
    LoginSubmit,
    LoginDone(Result<LoginResponse, ApiError>),

    RegisterName(String),
    RegisterDepartment(String),
    RegisterUsername(String),
    RegisterPassword(String),
    RegisterSubmit,
    RegisterDone(Result<(), ApiError>),

    ImagesLoaded(Result<Vec<ImageRecord>, ApiError>),
    FloorFilterSelected(FloorFilter),
    GalleryDate(String),
    GalleryClearFilters,
    ShowMore(String),
    SelectImage(ImageRecord),

    UploadFloorSelected(FloorLabel),
    AddFiles,
    AddFolder,
    FilesPrepared(PreparedFiles),
    Enlarge(usize),
    UploadSubmit,
    UploadDone(Result<MessageResponse, ApiError>),
    UploadCancel,

    CarPlate(String),
    PickSection(Section),
    CarUploadSubmit,
    CarUploadDone(Result<MessageResponse, ApiError>),

    CarImagesLoaded(Result<Vec<CarImageRecord>, ApiError>),
    CarPlateFilter(String),
    CarDate(String),
    CarClearFilters,
    SelectCar(CarImageRecord),
    CloseCarModal,
}

impl SitePhotos {
    /// Create the application and land on the route the stored session allows
    fn new(config: Config, session: Arc<SessionStore>, api: Arc<dyn ImageApi>) -> (Self, Task<Message>) {
        let mut app = SitePhotos {
            config,
            session,
            api,
            route: Route::Login,
            screen: Screen::Login(LoginForm::default()),
            notices: Notices::default(),
            remote: RemoteImages::default(),
        };
        let task = app.navigate(Route::Home);
        (app, task)
    }

    /// Window title
    fn title(&self) -> String {
        format!("Site Photos - {}", self.route.title())
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(route) => self.navigate(route),
            Message::Logout => {
                if let Err(e) = self.session.clear() {
                    error!("Failed to clear session: {}", e);
                }
                self.remote.clear();
                info!("👋 Logged out");
                self.enter(Route::Login)
            }
            Message::Tick(now) => {
                self.notices.expire(now);
                Task::none()
            }
            Message::DismissNotice(index) => {
                self.notices.dismiss(index);
                Task::none()
            }
            Message::RemoteImageLoaded(path, result) => {
                match result {
                    Ok(bytes) => self.remote.insert(path, bytes),
                    Err(e) => warn!("⚠️  Could not load {}: {}", path, e),
                }
                Task::none()
            }

            // Login
            Message::LoginUsername(value) => {
                if let Screen::Login(form) = &mut self.screen {
                    form.username = value;
                }
                Task::none()
            }
            Message::LoginPassword(value) => {
                if let Screen::Login(form) = &mut self.screen {
                    form.password = value;
                }
                Task::none()
            }
            Message::LoginSubmit => {
                let Screen::Login(form) = &self.screen else {
                    return Task::none();
                };
                match form.begin_submit() {
                    Ok(request) => {
                        let api = Arc::clone(&self.api);
                        Task::perform(async move { api.login(request).await }, Message::LoginDone)
                    }
                    Err(notice) => self.notify(notice),
                }
            }
            Message::LoginDone(result) => {
                let Screen::Login(form) = &mut self.screen else {
                    return Task::none();
                };
                match form.finish_submit(result) {
                    Ok(token) => match self.session.set(&token) {
                        Ok(()) => {
                            let task = self.navigate(Route::Home);
                            if self.route == Route::Login {
                                warn!("🚫 Logged in, but the role has no landing page");
                                self.notices.push(Notice::error(auth::NO_ACCESS));
                            } else {
                                self.notices.push(Notice::success(auth::LOGIN_OK));
                            }
                            task
                        }
                        Err(e) => {
                            error!("Failed to store session: {}", e);
                            self.notify(Notice::error("No se pudo guardar la sesión."))
                        }
                    },
                    Err(notice) => self.notify(notice),
                }
            }

            // Registration
            Message::RegisterName(value) => self.edit_register(|form| form.name = value),
            Message::RegisterDepartment(value) => self.edit_register(|form| form.department = value),
            Message::RegisterUsername(value) => self.edit_register(|form| form.username = value),
            Message::RegisterPassword(value) => self.edit_register(|form| form.password = value),
            Message::RegisterSubmit => {
                let Screen::Register(form) = &self.screen else {
                    return Task::none();
                };
                match form.begin_submit() {
                    Ok(request) => {
                        let api = Arc::clone(&self.api);
                        Task::perform(async move { api.register(request).await }, Message::RegisterDone)
                    }
                    Err(notice) => self.notify(notice),
                }
            }
            Message::RegisterDone(result) => {
                let Screen::Register(form) = &mut self.screen else {
                    return Task::none();
                };
                let registered = result.is_ok();
                let notice = form.finish_submit(result);
                self.notices.push(notice);
                if registered {
                    self.enter(Route::Login)
                } else {
                    Task::none()
                }
            }

            // Floor gallery
            Message::ImagesLoaded(result) => {
                let Screen::Gallery(gallery) = &mut self.screen else {
                    return Task::none();
                };
                match result {
                    Ok(records) => {
                        info!("🖼️  Loaded {} floor images", records.len());
                        gallery.set_records(records);
                        self.fetch_visible()
                    }
                    Err(e) if e.is_auth_failure() => self.session_rejected(&e),
                    Err(e) => {
                        error!("Failed to load floor images: {}", e);
                        gallery.load_failed();
                        self.notify(Notice::from_api(&e, "Error al cargar las imágenes."))
                    }
                }
            }
            Message::FloorFilterSelected(filter) => {
                if let Screen::Gallery(gallery) = &mut self.screen {
                    gallery.set_floor_filter(filter);
                }
                self.fetch_visible()
            }
            Message::GalleryDate(text) => {
                if let Screen::Gallery(gallery) = &mut self.screen {
                    gallery.set_date_input(&text);
                }
                self.fetch_visible()
            }
            Message::GalleryClearFilters => {
                if let Screen::Gallery(gallery) = &mut self.screen {
                    gallery.clear_filters();
                }
                self.fetch_visible()
            }
            Message::ShowMore(label) => {
                if let Screen::Gallery(gallery) = &mut self.screen {
                    gallery.show_more(&label);
                }
                self.fetch_visible()
            }
            Message::SelectImage(record) => {
                if let Screen::Gallery(gallery) = &mut self.screen {
                    gallery.select(record);
                }
                self.fetch_visible()
            }

            // Floor upload
            Message::UploadFloorSelected(floor) => {
                if let Screen::Upload(form) = &mut self.screen {
                    form.select_floor(floor);
                }
                Task::none()
            }
            Message::AddFiles => {
                if let Some(task) = self.refuse_files_without_floor() {
                    return task;
                }
                let picked = FileDialog::new()
                    .set_title("Seleccionar imágenes")
                    .add_filter("Imágenes", &IMAGE_EXTENSIONS[..])
                    .pick_files();

                match picked {
                    Some(paths) => self.prepare_files(paths),
                    None => Task::none(),
                }
            }
            Message::AddFolder => {
                if let Some(task) = self.refuse_files_without_floor() {
                    return task;
                }
                let Some(folder) = FileDialog::new()
                    .set_title("Seleccionar carpeta con imágenes")
                    .pick_folder()
                else {
                    return Task::none();
                };

                let paths = files::scan::collect_images(&folder);
                if paths.is_empty() {
                    return self.notify(Notice::info("La carpeta no contiene imágenes."));
                }
                self.prepare_files(paths)
            }
            Message::FilesPrepared(prepared) => {
                if !prepared.failed.is_empty() {
                    self.notices.push(Notice::error(format!(
                        "No se pudieron cargar: {}",
                        prepared.failed.join(", ")
                    )));
                }
                match &mut self.screen {
                    Screen::Upload(form) => {
                        if let Err(notice) = form.add_files(prepared.ready) {
                            self.notices.push(notice);
                        }
                    }
                    // The user left the upload screen while previews were built
                    _ => {
                        for pending in &prepared.ready {
                            pending.preview().release();
                        }
                    }
                }
                Task::none()
            }
            Message::Enlarge(index) => {
                if let Screen::Upload(form) = &mut self.screen {
                    form.enlarge(index);
                }
                Task::none()
            }
            Message::UploadSubmit => {
                let Screen::Upload(form) = &mut self.screen else {
                    return Task::none();
                };
                match form.begin_submit() {
                    Ok(upload) => {
                        info!("📤 Uploading {} images to {}", upload.files.len(), upload.floor.raw());
                        let api = Arc::clone(&self.api);
                        Task::perform(
                            async move { api.upload_floor_images(upload).await },
                            Message::UploadDone,
                        )
                    }
                    Err(notice) => self.notify(notice),
                }
            }
            Message::UploadDone(result) => {
                if let Err(e) = &result {
                    if e.is_auth_failure() {
                        return self.session_rejected(e);
                    }
                }
                let Screen::Upload(form) = &mut self.screen else {
                    return Task::none();
                };
                let notice = form.finish_submit(result);
                self.notify(notice)
            }
            Message::UploadCancel => {
                if let Screen::Upload(form) = &mut self.screen {
                    form.cancel();
                }
                Task::none()
            }

            // Vehicle upload
            Message::CarPlate(plate) => {
                if let Screen::CarUpload(form) = &mut self.screen {
                    form.set_plate(&plate);
                }
                Task::none()
            }
            Message::PickSection(section) => {
                let Some(path) = FileDialog::new()
                    .set_title(format!("Imagen {}", section.label()))
                    .add_filter("Imágenes", &IMAGE_EXTENSIONS[..])
                    .pick_file()
                else {
                    return Task::none();
                };

                match files::local_file(&path) {
                    Ok(file) => {
                        if let Screen::CarUpload(form) = &mut self.screen {
                            form.set_slot(section, file);
                        }
                        Task::none()
                    }
                    Err(e) => {
                        warn!("⚠️  Cannot use {}: {}", path.display(), e);
                        self.notify(Notice::error(format!("No se pudo leer {}", path.display())))
                    }
                }
            }
            Message::CarUploadSubmit => {
                let Screen::CarUpload(form) = &self.screen else {
                    return Task::none();
                };
                match form.begin_submit() {
                    Ok(upload) => {
                        info!("📤 Uploading vehicle images for {}", upload.plate);
                        let api = Arc::clone(&self.api);
                        Task::perform(
                            async move { api.upload_car_images(upload).await },
                            Message::CarUploadDone,
                        )
                    }
                    Err(notice) => self.notify(notice),
                }
            }
            Message::CarUploadDone(result) => {
                if let Err(e) = &result {
                    if e.is_auth_failure() {
                        return self.session_rejected(e);
                    }
                }
                let Screen::CarUpload(form) = &mut self.screen else {
                    return Task::none();
                };
                let notice = form.finish_submit(result);
                self.notify(notice)
            }

            // Vehicle gallery
            Message::CarImagesLoaded(result) => {
                let Screen::CarGallery(gallery) = &mut self.screen else {
                    return Task::none();
                };
                match result {
                    Ok(records) => {
                        info!("🚗 Loaded {} vehicle images", records.len());
                        gallery.set_records(records);
                        self.fetch_visible()
                    }
                    Err(e) if e.is_auth_failure() => self.session_rejected(&e),
                    Err(e) => {
                        error!("Failed to load vehicle images: {}", e);
                        gallery.load_failed();
                        self.notify(Notice::from_api(&e, "Error al cargar las imágenes de vehículos."))
                    }
                }
            }
            Message::CarPlateFilter(text) => {
                if let Screen::CarGallery(gallery) = &mut self.screen {
                    gallery.set_plate_filter(&text);
                }
                Task::none()
            }
            Message::CarDate(text) => {
                let Screen::CarGallery(gallery) = &mut self.screen else {
                    return Task::none();
                };
                if gallery.set_date_input(&text) {
                    self.load_car_images()
                } else {
                    Task::none()
                }
            }
            Message::CarClearFilters => {
                let Screen::CarGallery(gallery) = &mut self.screen else {
                    return Task::none();
                };
                if gallery.clear_filters() {
                    self.load_car_images()
                } else {
                    Task::none()
                }
            }
            Message::SelectCar(record) => {
                if let Screen::CarGallery(gallery) = &mut self.screen {
                    gallery.select(record);
                }
                Task::none()
            }
            Message::CloseCarModal => {
                if let Screen::CarGallery(gallery) = &mut self.screen {
                    gallery.close_modal();
                }
                Task::none()
            }
        }
    }

    /// Guard a navigation and switch to whatever route the session allows
    fn navigate(&mut self, requested: Route) -> Task<Message> {
        let current = self.session.current();
        let decision = session::decide(requested, current.as_ref());
        match decision {
            Decision::Redirect(target) if target != requested && target != Route::Login => {
                debug!("Redirecting {:?} to {:?}", requested, target);
                self.navigate(target)
            }
            Decision::Reject => {
                warn!("⚠️  Stored token is unreadable, clearing session");
                if let Err(e) = self.session.clear() {
                    error!("Failed to clear session: {}", e);
                }
                self.enter(decision.target(requested))
            }
            _ => self.enter(decision.target(requested)),
        }
    }

    /// Build a fresh view model for the route. The old one is dropped here,
    /// which releases any upload previews it still held.
    fn enter(&mut self, route: Route) -> Task<Message> {
        debug!("Entering {:?}", route);
        self.route = route;
        match route {
            Route::Login | Route::Home => {
                self.route = Route::Login;
                self.screen = Screen::Login(LoginForm::default());
                Task::none()
            }
            Route::Register => {
                self.screen = Screen::Register(RegisterForm::default());
                Task::none()
            }
            Route::Gallery => {
                let mut gallery = FloorGallery::new();
                gallery.begin_load();
                self.screen = Screen::Gallery(gallery);
                let api = Arc::clone(&self.api);
                Task::perform(async move { api.list_images().await }, Message::ImagesLoaded)
            }
            Route::Upload => {
                self.screen = Screen::Upload(FloorUploadForm::new());
                Task::none()
            }
            Route::CarUpload => {
                self.screen = Screen::CarUpload(CarUploadForm::new());
                Task::none()
            }
            Route::CarGallery => {
                self.screen = Screen::CarGallery(CarGallery::new());
                self.load_car_images()
            }
        }
    }

    /// The server refused the token: back to login, no notice
    fn session_rejected(&mut self, err: &ApiError) -> Task<Message> {
        warn!("🔒 Server rejected the session: {}", err);
        self.enter(Route::Login)
    }

    fn notify(&mut self, notice: Notice) -> Task<Message> {
        self.notices.push(notice);
        Task::none()
    }

    fn edit_register(&mut self, edit: impl FnOnce(&mut RegisterForm)) -> Task<Message> {
        if let Screen::Register(form) = &mut self.screen {
            edit(form);
        }
        Task::none()
    }

    /// Fetch vehicle images for the gallery's current date filter
    fn load_car_images(&mut self) -> Task<Message> {
        let Screen::CarGallery(gallery) = &mut self.screen else {
            return Task::none();
        };
        gallery.begin_load();
        let date = gallery.date();
        let api = Arc::clone(&self.api);
        Task::perform(async move { api.list_car_images(date).await }, Message::CarImagesLoaded)
    }

    /// Notice and a task to return when files are picked before a floor
    fn refuse_files_without_floor(&mut self) -> Option<Task<Message>> {
        let Screen::Upload(form) = &self.screen else {
            return Some(Task::none());
        };
        match form.can_add_files() {
            Ok(()) => None,
            Err(notice) => Some(self.notify(notice)),
        }
    }

    /// Build previews off the update loop
    fn prepare_files(&self, paths: Vec<PathBuf>) -> Task<Message> {
        info!("🔍 Preparing {} files", paths.len());
        Task::perform(
            files::preview::prepare_uploads(paths, self.config.preview_dir()),
            Message::FilesPrepared,
        )
    }

    /// Download the server images the current screen shows but doesn't have yet
    fn fetch_visible(&mut self) -> Task<Message> {
        let paths: Vec<String> = match &self.screen {
            Screen::Gallery(gallery) => {
                let mut paths: Vec<String> = gallery
                    .groups()
                    .iter()
                    .flat_map(|group| group.visible().iter().map(|record| record.file_path.clone()))
                    .collect();
                let preview = gallery.preview();
                if !preview.is_placeholder() {
                    paths.push(preview.file_path.clone());
                }
                paths
            }
            Screen::CarGallery(gallery) => gallery
                .groups()
                .iter()
                .flat_map(|group| group.records.iter().map(|record| record.file_path.clone()))
                .collect(),
            _ => return Task::none(),
        };

        let fetches: Vec<Task<Message>> = self
            .remote
            .claim(paths)
            .into_iter()
            .map(|path| {
                let api = Arc::clone(&self.api);
                Task::perform(
                    async move {
                        let result = api.fetch_image(path.clone()).await;
                        (path, result)
                    },
                    |(path, result)| Message::RemoteImageLoaded(path, result),
                )
            })
            .collect();
        Task::batch(fetches)
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let screen: Element<'_, Message> = match &self.screen {
            Screen::Login(form) => ui::auth::login(form),
            Screen::Register(form) => ui::auth::register(form),
            Screen::Gallery(gallery) => ui::gallery::view(gallery, &self.remote),
            Screen::Upload(form) => ui::upload::view(form),
            Screen::CarUpload(form) => ui::car_upload::view(form),
            Screen::CarGallery(gallery) => ui::car_gallery::view(gallery, &self.remote),
        };

        let mut content = column![].spacing(8);
        if !matches!(self.screen, Screen::Login(_) | Screen::Register(_)) {
            let role = self.session.current().and_then(|session| session.role().ok());
            content = content
                .push(ui::nav::view(self.route, role.as_ref()))
                .push(horizontal_rule(1));
        }
        if !self.notices.is_empty() {
            content = content.push(ui::notice_bar(&self.notices));
        }

        container(content.push(screen))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Expire notices while any are on screen
    fn subscription(&self) -> Subscription<Message> {
        if self.notices.is_empty() {
            Subscription::none()
        } else {
            iced::time::every(Duration::from_millis(500)).map(Message::Tick)
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();
    info!("🏗️  Site Photos starting against {}", config.api_url);

    let session = Arc::new(SessionStore::open(&config.session_db_path())?);
    let api: Arc<dyn ImageApi> = Arc::new(ApiClient::new(&config.api_url, Arc::clone(&session))?);

    iced::application(SitePhotos::title, SitePhotos::update, SitePhotos::view)
        .theme(SitePhotos::theme)
        .subscription(SitePhotos::subscription)
        .centered()
        .run_with(move || SitePhotos::new(config, session, api))
        .map_err(|e| anyhow::anyhow!("UI error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::session::token::encode_test_token;
    use crate::state::notice::NoticeKind;
    use serde_json::json;

    fn token(role: &str) -> String {
        encode_test_token(&json!({ "sub": "ana", "role": role }))
    }

    fn app_with(stored: Option<&str>, api: FakeApi) -> (SitePhotos, Arc<FakeApi>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            api_url: "http://localhost:5100".into(),
            data_dir: dir.path().join("data"),
            cache_dir: dir.path().join("cache"),
        };
        let session = Arc::new(SessionStore::in_memory().unwrap());
        if let Some(stored) = stored {
            session.set(stored).unwrap();
        }
        let api = Arc::new(api);
        let (app, _) = SitePhotos::new(config, session, Arc::clone(&api) as Arc<dyn ImageApi>);
        (app, api, dir)
    }

    fn messages(app: &SitePhotos) -> Vec<(NoticeKind, String)> {
        app.notices.iter().map(|n| (n.kind, n.message.clone())).collect()
    }

    #[test]
    fn test_starts_on_login_without_session() {
        let (app, _api, _dir) = app_with(None, FakeApi::default());
        assert_eq!(app.route, Route::Login);
        assert!(matches!(app.screen, Screen::Login(_)));
        assert!(app.notices.is_empty());
    }

    #[test]
    fn test_unreadable_token_clears_session() {
        let (mut app, _api, _dir) = app_with(Some("garbage"), FakeApi::default());
        assert_eq!(app.route, Route::Login);
        assert!(app.session.current().is_none());

        app.session.set("garbage").unwrap();
        let _ = app.update(Message::Navigate(Route::Gallery));
        assert_eq!(app.route, Route::Login);
        assert!(app.session.current().is_none());
        assert!(app.notices.is_empty());
    }

    #[test]
    fn test_rejected_fetch_returns_to_login_silently() {
        let admin = token("Admin");
        let (mut app, _api, _dir) = app_with(Some(&admin), FakeApi::default());
        let _ = app.update(Message::Navigate(Route::Gallery));
        assert_eq!(app.route, Route::Gallery);

        let _ = app.update(Message::ImagesLoaded(Err(ApiError::Server { status: 401, message: None })));
        assert_eq!(app.route, Route::Login);
        assert!(app.notices.is_empty());
        assert_eq!(app.session.current().map(|s| s.token().to_string()), Some(admin));
    }

    #[test]
    fn test_other_fetch_errors_keep_the_gallery() {
        let (mut app, _api, _dir) = app_with(Some(&token("Admin")), FakeApi::default());
        let _ = app.update(Message::Navigate(Route::Gallery));

        let _ = app.update(Message::ImagesLoaded(Err(ApiError::Server { status: 500, message: None })));
        assert_eq!(app.route, Route::Gallery);
        assert_eq!(app.notices.iter().count(), 1);
    }

    #[test]
    fn test_floor_login_lands_on_upload() {
        let (mut app, _api, _dir) = app_with(None, FakeApi::default());
        let pisos = token("pisos");

        let _ = app.update(Message::LoginDone(Ok(LoginResponse { access_token: Some(pisos.clone()) })));
        assert_eq!(app.route, Route::Upload);
        assert!(matches!(app.screen, Screen::Upload(_)));
        assert_eq!(app.session.current().map(|s| s.token().to_string()), Some(pisos));
        assert_eq!(messages(&app), [(NoticeKind::Success, auth::LOGIN_OK.to_string())]);

        let _ = app.update(Message::Navigate(Route::Gallery));
        assert_eq!(app.route, Route::Login);
    }

    #[test]
    fn test_car_login_lands_on_car_upload() {
        let (mut app, _api, _dir) = app_with(None, FakeApi::default());
        let _ = app.update(Message::LoginDone(Ok(LoginResponse { access_token: Some(token("coches")) })));
        assert_eq!(app.route, Route::CarUpload);
    }

    #[test]
    fn test_login_without_landing_page_says_so() {
        let (mut app, _api, _dir) = app_with(None, FakeApi::default());
        let _ = app.update(Message::LoginDone(Ok(LoginResponse { access_token: Some(token("User")) })));
        assert_eq!(app.route, Route::Login);
        assert_eq!(messages(&app), [(NoticeKind::Error, auth::NO_ACCESS.to_string())]);
    }

    #[test]
    fn test_login_submit_uses_form_fields() {
        let (mut app, api, _dir) = app_with(None, FakeApi::with_token(token("pisos")));
        let _ = app.update(Message::LoginUsername("ana".into()));
        let _ = app.update(Message::LoginPassword("secret".into()));
        let _ = app.update(Message::LoginSubmit);
        // The request only runs when the returned task is driven
        assert!(api.calls().is_empty());
        assert!(app.notices.is_empty());

        let _ = app.update(Message::LoginUsername(String::new()));
        let _ = app.update(Message::LoginSubmit);
        assert_eq!(app.notices.iter().count(), 1);
        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_logout_clears_session() {
        let (mut app, _api, _dir) = app_with(Some(&token("pisos")), FakeApi::default());
        assert_eq!(app.route, Route::Upload);

        let _ = app.update(Message::Logout);
        assert_eq!(app.route, Route::Login);
        assert!(app.session.current().is_none());
    }
}
