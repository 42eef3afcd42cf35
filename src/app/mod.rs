//! App module - app shell, routing and the two views

mod assets;
mod filters;
mod home;
mod lightbox;
mod load_gate;
mod navigation;
mod preloader;
mod projects;
mod schedule;

pub use assets::ImageCache;
pub use home::HomeView;
pub use projects::ProjectsView;
pub use schedule::{LoadLatch, RuntimeScheduler, Scheduler};

use crate::constants::*;
use crate::db::{read_json, write_json, Database, KeyValueStore};
use crate::settings::Settings;
use crate::theme;
use crate::types::*;
use crate::utils;
use eframe::egui;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use tracing::{debug, warn};

// ============================================================================
// SHARED VIEW PLUMBING
// ============================================================================

/// Everything a view needs from the shell while rendering a frame
pub struct ViewContext<'a> {
    pub ctx: &'a egui::Context,
    pub store: &'a mut dyn KeyValueStore,
    pub images: &'a mut ImageCache,
    pub logo: Option<&'a egui::TextureHandle>,
}

/// Read a stored JSON value; parse and read failures are logged and
/// treated as absent.
pub(crate) fn load_stored<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    match read_json(store, key) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "Failed to parse stored value");
            None
        }
    }
}

pub(crate) fn persist_theme(store: &mut dyn KeyValueStore, theme: Theme) {
    if let Err(e) = write_json(store, KEY_THEME, &theme) {
        warn!(theme = theme.class_name(), error = %e, "Failed to save theme");
    }
}

/// Images the document waits on before it counts as loaded
fn startup_images(store: &dyn KeyValueStore) -> Vec<ImageRef> {
    let profile = load_stored::<Profile>(store, KEY_PROFILE).unwrap_or_else(default_profile);
    std::iter::once(ImageRef::new(profile.avatar_url))
        .chain(project_catalog().into_iter().map(|p| p.image_url))
        .collect()
}

// ============================================================================
// APP STATE
// ============================================================================

pub enum ActiveView {
    Home(HomeView),
    Projects(ProjectsView),
}

impl ActiveView {
    pub fn mount(route: Route, store: &dyn KeyValueStore, scheduler: &dyn Scheduler) -> Self {
        match route {
            Route::Home => ActiveView::Home(HomeView::mount(store, scheduler)),
            Route::Projects => ActiveView::Projects(ProjectsView::mount(store, scheduler)),
        }
    }
}

pub struct App {
    pub(crate) store: Database,
    pub(crate) images: ImageCache,
    pub(crate) scheduler: RuntimeScheduler,
    pub(crate) route: Route,
    pub(crate) view: ActiveView,
    pub(crate) logo_texture: Option<egui::TextureHandle>,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
    // Dropped last: prefetch and timer tasks run on it
    _runtime: tokio::runtime::Runtime,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        store: Database,
        settings: Settings,
        data_dir: PathBuf,
        runtime: tokio::runtime::Runtime,
    ) -> Self {
        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx, Theme::default());

        let logo_texture = utils::rasterize_logo(64).map(|(pixels, w, h)| {
            cc.egui_ctx.load_texture(
                "logo",
                egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &pixels),
                egui::TextureOptions::LINEAR,
            )
        });

        let images = ImageCache::new(&data_dir);
        let latch = LoadLatch::default();
        images.start_prefetch(&runtime, &cc.egui_ctx, startup_images(&store), latch.clone());

        let scheduler =
            RuntimeScheduler::new(runtime.handle().clone(), cc.egui_ctx.clone(), latch);
        let view = ActiveView::mount(Route::Home, &store, &scheduler);

        Self {
            store,
            images,
            scheduler,
            route: Route::Home,
            view,
            logo_texture,
            window_pos: settings.window_pos(),
            window_size: settings.window_size(),
            needs_center: false,
            data_dir,
            _runtime: runtime,
        }
    }

    /// Tear down the current view and mount the one for `route`
    pub fn navigate(&mut self, route: Route) {
        debug!(from = self.route.path(), to = route.path(), "Navigating");
        self.route = route;
        self.view = ActiveView::mount(route, &self.store, &self.scheduler);
    }

    pub fn handle_action(&mut self, action: ViewAction) {
        match action {
            ViewAction::Navigate(route) => self.navigate(route),
            ViewAction::OpenExternal(url) => navigation::open_external(&url),
        }
    }

    /// Render the active view for one frame
    pub fn show_view(&mut self, ctx: &egui::Context) {
        let mut vc = ViewContext {
            ctx,
            store: &mut self.store,
            images: &mut self.images,
            logo: self.logo_texture.as_ref(),
        };
        let action = match &mut self.view {
            ActiveView::Home(view) => view.show(&mut vc),
            ActiveView::Projects(view) => view.show(&mut vc),
        };
        if let Some(action) = action {
            self.handle_action(action);
            ctx.request_repaint();
        }
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
        };
        settings.save(&self.data_dir);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStore;
    use schedule::manual::ManualScheduler;

    #[test]
    fn startup_images_prefer_stored_avatar() {
        let store = MemoryStore::with(&[(
            KEY_PROFILE,
            r#"{"name":"N","bio":"B","avatarUrl":"https://img.example/me.png"}"#,
        )]);
        let images = startup_images(&store);
        assert_eq!(images[0], ImageRef::new("https://img.example/me.png"));
        assert_eq!(images.len(), 1 + project_catalog().len());
    }

    #[test]
    fn startup_images_fall_back_to_default_avatar() {
        let store = MemoryStore::with(&[(KEY_PROFILE, "garbage")]);
        assert_eq!(
            startup_images(&store)[0],
            ImageRef::new(default_profile().avatar_url)
        );
    }

    #[test]
    fn persist_failure_is_swallowed() {
        let mut store = MemoryStore {
            fail_writes: true,
            ..Default::default()
        };
        persist_theme(&mut store, Theme::Light);
        assert!(store.items.is_empty());
    }

    #[test]
    fn mounting_a_route_picks_its_view() {
        let store = MemoryStore::default();
        let scheduler = ManualScheduler::loaded();
        assert!(matches!(
            ActiveView::mount(Route::Home, &store, &scheduler),
            ActiveView::Home(_)
        ));
        assert!(matches!(
            ActiveView::mount(Route::Projects, &store, &scheduler),
            ActiveView::Projects(_)
        ));
    }

    #[test]
    fn replacing_a_view_releases_its_subscriptions() {
        let store = MemoryStore::default();
        let scheduler = ManualScheduler::default();
        let mut view = ActiveView::mount(Route::Home, &store, &scheduler);
        assert_eq!(scheduler.live_subscriptions(), 2);
        view = ActiveView::mount(Route::Projects, &store, &scheduler);
        assert_eq!(scheduler.live_subscriptions(), 2);
        drop(view);
        assert_eq!(scheduler.live_subscriptions(), 0);
    }
}
