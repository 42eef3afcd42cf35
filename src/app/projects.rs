//! Projects view: searchable card grid with an image lightbox

use super::lightbox;
use super::load_gate::LoadGate;
use super::preloader::Preloader;
use super::schedule::Scheduler;
use super::{load_stored, persist_theme, ViewContext};
use crate::constants::*;
use crate::db::KeyValueStore;
use crate::theme::{self, ThemeSurface};
use crate::types::*;
use crate::ui::components;
use eframe::egui;
use egui_phosphor::regular as icons;
use tracing::debug;

pub struct ProjectsView {
    pub(crate) theme: Theme,
    pub(crate) search_query: String,
    pub(crate) filtered_indices: Vec<usize>,
    pub(crate) selected: Option<usize>,
    pub(crate) is_dialog_open: bool,
    pub(crate) projects: Vec<Project>,
    gate: LoadGate,
    preloader: Option<Preloader>,
    applied_theme: Option<Theme>,
    scroll_to_top_requested: bool,
}

impl ProjectsView {
    pub fn mount(store: &dyn KeyValueStore, scheduler: &dyn Scheduler) -> Self {
        Self::mount_with_catalog(store, scheduler, project_catalog())
    }

    pub fn mount_with_catalog(
        store: &dyn KeyValueStore,
        scheduler: &dyn Scheduler,
        projects: Vec<Project>,
    ) -> Self {
        let gate = LoadGate::mount(scheduler);
        let preloader = gate.is_loading().then(|| Preloader::mount(scheduler));
        let theme: Theme = load_stored(store, KEY_THEME).unwrap_or_default();
        debug!(projects = projects.len(), theme = theme.class_name(), "Projects view mounted");
        Self {
            theme,
            search_query: String::new(),
            filtered_indices: (0..projects.len()).collect(),
            selected: None,
            is_dialog_open: false,
            projects,
            gate,
            preloader,
            applied_theme: None,
            scroll_to_top_requested: false,
        }
    }

    /// Apply the theme to the surface if it changed since the last sync
    pub fn sync_theme(&mut self, surface: &dyn ThemeSurface) {
        if self.applied_theme == Some(self.theme) {
            return;
        }
        surface.apply_theme(self.theme);
        self.applied_theme = Some(self.theme);
    }

    /// Flip, persist, apply
    pub fn toggle_theme(&mut self, store: &mut dyn KeyValueStore, surface: &dyn ThemeSurface) {
        self.theme = self.theme.toggled();
        persist_theme(store, self.theme);
        self.sync_theme(surface);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_to_top_requested = true;
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.apply_filters();
    }

    pub fn filtered_projects(&self) -> impl Iterator<Item = &Project> + '_ {
        self.filtered_indices.iter().filter_map(|&i| self.projects.get(i))
    }

    pub fn selected_image(&self) -> Option<&ImageRef> {
        self.selected
            .and_then(|i| self.projects.get(i))
            .map(|p| &p.image_url)
    }

    pub fn open_lightbox(&mut self, index: usize) {
        if index < self.projects.len() {
            self.selected = Some(index);
            self.is_dialog_open = true;
        }
    }

    pub fn set_dialog_open(&mut self, open: bool) {
        if open {
            self.is_dialog_open = self.selected.is_some();
        } else {
            self.close_lightbox();
        }
    }

    pub fn close_lightbox(&mut self) {
        self.is_dialog_open = false;
        self.selected = None;
    }

    pub fn is_loading(&mut self) -> bool {
        let loading = self.gate.poll();
        if !loading {
            self.preloader = None;
        }
        loading
    }

    // ========================================================================
    // RENDERING
    // ========================================================================

    pub fn show(&mut self, vc: &mut ViewContext<'_>) -> Option<ViewAction> {
        self.sync_theme(vc.ctx);

        if self.is_loading() {
            if let Some(preloader) = &mut self.preloader {
                preloader.show(vc.ctx, self.theme);
            }
            return None;
        }

        // Home key jumps back up unless the search box has focus
        if !vc.ctx.wants_keyboard_input() && vc.ctx.input(|i| i.key_pressed(egui::Key::Home)) {
            self.scroll_to_top();
        }

        let p = theme::palette(self.theme);
        let mut action = None;
        let mut toggle = false;

        egui::TopBottomPanel::top("projects_nav")
            .frame(theme::nav_frame(p))
            .show(vc.ctx, |ui| {
                let nav = components::nav_bar(ui, p, self.theme, vc.logo, theme::PROJECTS_MAX_WIDTH);
                if nav.logo_clicked {
                    action = Some(ViewAction::Navigate(Route::Home));
                }
                toggle = nav.toggle_clicked;
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(p.bg_base))
            .show(vc.ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("projects_scroll")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        if std::mem::take(&mut self.scroll_to_top_requested) {
                            ui.scroll_to_cursor(Some(egui::Align::TOP));
                        }
                        components::centered_column(ui, theme::PROJECTS_MAX_WIDTH, |ui| {
                            ui.add_space(theme::SPACING_XL);
                            self.render_header(ui, p);
                            self.render_search(ui, p);
                            ui.add_space(theme::SPACING_XL);
                            if let Some(a) = self.render_grid(ui, p, vc.ctx, vc.images) {
                                action = Some(a);
                            }
                            ui.add_space(theme::SPACING_XL);
                            ui.vertical_centered(|ui| {
                                let back = theme::button_outline(
                                    p,
                                    format!("{}  Go Back", icons::ARROW_LEFT),
                                );
                                if ui.add(back).clicked() {
                                    action = Some(ViewAction::Navigate(Route::Home));
                                }
                            });
                            ui.add_space(theme::SPACING_LG);
                            components::footer(ui, p, &default_profile().name);
                        });
                    });
            });

        if toggle {
            self.toggle_theme(vc.store, vc.ctx);
        }

        if self.is_dialog_open {
            let texture = self
                .selected_image()
                .cloned()
                .and_then(|image| vc.images.texture(vc.ctx, &image));
            let title = self
                .selected
                .and_then(|i| self.projects.get(i))
                .map(|p| p.title.as_str())
                .unwrap_or_default();
            if lightbox::show(vc.ctx, p, title, texture.as_ref()) {
                self.set_dialog_open(false);
            }
        }

        action
    }

    fn render_header(&self, ui: &mut egui::Ui, p: &theme::Palette) {
        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new("My Projects")
                    .size(theme::FONT_DISPLAY)
                    .strong()
                    .color(p.text_primary),
            );
            ui.add_space(theme::SPACING_MD);
            ui.label(
                egui::RichText::new("A collection of my recent work and experiments.")
                    .size(theme::FONT_BODY)
                    .color(p.text_muted),
            );
        });
        ui.add_space(theme::SPACING_XL);
    }

    fn render_search(&mut self, ui: &mut egui::Ui, p: &theme::Palette) {
        let frame = egui::Frame::new()
            .fill(p.bg_input)
            .stroke(egui::Stroke::new(1.0, p.border))
            .corner_radius(theme::RADIUS_DEFAULT)
            .inner_margin(egui::Margin::symmetric(10, 8));

        let frame_resp = frame.show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(icons::MAGNIFYING_GLASS)
                            .size(16.0)
                            .color(p.text_muted),
                    )
                    .selectable(false),
                );
                let resp = ui.add(
                    egui::TextEdit::singleline(&mut self.search_query)
                        .id(ui.make_persistent_id("project_search"))
                        .hint_text("Search projects...")
                        .frame(false)
                        .desired_width(ui.available_width() - 24.0),
                );
                if resp.changed() {
                    self.apply_filters();
                }
            });
        });

        // Clear button overlaid on right side of search frame
        if !self.search_query.is_empty() {
            let frame_rect = frame_resp.response.rect;
            let btn_rect = egui::Rect::from_center_size(
                egui::pos2(frame_rect.right() - 16.0, frame_rect.center().y),
                egui::vec2(18.0, 18.0),
            );
            let clear_resp = ui.interact(btn_rect, ui.id().with("search_clear"), egui::Sense::click());
            let color = if clear_resp.hovered() { p.text_primary } else { p.text_muted };
            ui.painter().text(
                btn_rect.center(),
                egui::Align2::CENTER_CENTER,
                icons::X,
                egui::FontId::proportional(14.0),
                color,
            );
            if clear_resp.clicked() {
                self.set_search_query("");
            }
        }
    }

    fn render_grid(
        &mut self,
        ui: &mut egui::Ui,
        p: &theme::Palette,
        ctx: &egui::Context,
        images: &mut super::ImageCache,
    ) -> Option<ViewAction> {
        if self.filtered_projects().next().is_none() {
            ui.vertical_centered(|ui| {
                ui.add_space(theme::SPACING_XL);
                ui.label(
                    egui::RichText::new(icons::MAGNIFYING_GLASS_MINUS)
                        .size(theme::FONT_ICON)
                        .color(p.text_muted),
                );
                ui.label(
                    egui::RichText::new(format!("No projects match \"{}\"", self.search_query))
                        .size(theme::FONT_BODY)
                        .color(p.text_muted),
                );
            });
            return None;
        }

        let gap = theme::SPACING_XL;
        let width = ui.available_width();
        let columns = if width >= 2.0 * theme::PROJECT_CARD_MIN_WIDTH + gap { 2 } else { 1 };
        let card_width = (width - gap * (columns - 1) as f32) / columns as f32;

        let mut action = None;
        let mut open: Option<usize> = None;
        let indices = self.filtered_indices.clone();
        for row in indices.chunks(columns) {
            ui.horizontal_top(|ui| {
                ui.spacing_mut().item_spacing.x = gap;
                for &index in row {
                    let Some(project) = self.projects.get(index) else {
                        continue;
                    };
                    let texture = images.texture(ctx, &project.image_url);
                    let card = project_card(ui, p, project, texture.as_ref(), card_width);
                    if card.image_clicked {
                        open = Some(index);
                    }
                    if let Some(a) = card.action {
                        action = Some(a);
                    }
                }
            });
            ui.add_space(gap);
        }

        if let Some(index) = open {
            self.open_lightbox(index);
        }
        action
    }
}

struct CardResponse {
    image_clicked: bool,
    action: Option<ViewAction>,
}

fn project_card(
    ui: &mut egui::Ui,
    p: &theme::Palette,
    project: &Project,
    texture: Option<&egui::TextureHandle>,
    width: f32,
) -> CardResponse {
    let mut card = CardResponse {
        image_clicked: false,
        action: None,
    };
    let inner_width = width - 2.0 * theme::SPACING_LG - 2.0;

    theme::card_frame(p).show(ui, |ui| {
        ui.set_width(inner_width);

        let (rect, resp) = ui.allocate_exact_size(
            egui::vec2(inner_width, theme::PROJECT_IMAGE_HEIGHT),
            egui::Sense::click(),
        );
        if ui.is_rect_visible(rect) {
            match texture {
                Some(texture) => components::paint_cover(ui.painter(), rect, texture, theme::RADIUS_DEFAULT),
                None => components::image_placeholder(ui.painter(), rect, p, theme::RADIUS_DEFAULT),
            }
            if resp.hovered() {
                ui.painter().rect_filled(rect, theme::RADIUS_DEFAULT, egui::Color32::from_black_alpha(60));
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    icons::MAGNIFYING_GLASS_PLUS,
                    egui::FontId::proportional(theme::FONT_ICON),
                    egui::Color32::WHITE,
                );
            }
        }
        card.image_clicked = resp.on_hover_text("View full image").clicked();

        ui.add_space(theme::SPACING_LG);
        ui.label(
            egui::RichText::new(&project.title)
                .size(theme::FONT_HEADING)
                .strong()
                .color(p.text_primary),
        );
        ui.add_space(theme::SPACING_SM);
        ui.label(
            egui::RichText::new(&project.description)
                .size(theme::FONT_BODY)
                .color(p.text_muted),
        );
        ui.add_space(theme::SPACING_LG);

        ui.horizontal(|ui| {
            let live = theme::button_outline(p, format!("{}  Live Demo", icons::ARROW_SQUARE_OUT));
            if ui.add(live).clicked() {
                card.action = Some(ViewAction::OpenExternal(project.live_url.clone()));
            }
            let github = theme::button_primary(p, format!("{}  GitHub", icons::GITHUB_LOGO));
            if ui.add(github).clicked() {
                card.action = Some(ViewAction::OpenExternal(project.github_url.clone()));
            }
        });
    });
    card
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::schedule::manual::ManualScheduler;
    use crate::db::memory::MemoryStore;
    use crate::theme::recording::RecordingSurface;

    fn mount_loaded(store: &MemoryStore) -> ProjectsView {
        ProjectsView::mount(store, &ManualScheduler::loaded())
    }

    fn titles(view: &ProjectsView) -> Vec<&str> {
        view.filtered_projects().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn mounts_with_full_catalog_and_stored_theme() {
        let store = MemoryStore::with(&[(KEY_THEME, r#""light""#)]);
        let view = mount_loaded(&store);
        assert_eq!(view.theme, Theme::Light);
        assert_eq!(view.filtered_projects().count(), project_catalog().len());
        assert_eq!(view.search_query, "");
        assert_eq!(view.selected_image(), None);
        assert!(!view.is_dialog_open);
    }

    #[test]
    fn bad_stored_theme_falls_back_to_dark() {
        let store = MemoryStore::with(&[(KEY_THEME, r#""sepia""#)]);
        assert_eq!(mount_loaded(&store).theme, Theme::Dark);
    }

    #[test]
    fn first_sync_applies_without_persisting() {
        let store = MemoryStore::with(&[(KEY_THEME, r#""light""#)]);
        let surface = RecordingSurface::default();
        let mut view = mount_loaded(&store);
        view.sync_theme(&surface);
        view.sync_theme(&surface);
        assert_eq!(surface.count(), 1);
        assert_eq!(surface.current(), Some(Theme::Light));
    }

    #[test]
    fn toggle_from_dark_applies_and_stores_light() {
        let mut store = MemoryStore::default();
        let surface = RecordingSurface::default();
        let mut view = mount_loaded(&store);
        view.toggle_theme(&mut store, &surface);
        assert_eq!(view.theme, Theme::Light);
        assert_eq!(surface.current(), Some(Theme::Light));
        assert_eq!(store.items[KEY_THEME], r#""light""#);

        view.toggle_theme(&mut store, &surface);
        assert_eq!(view.theme, Theme::Dark);
        assert_eq!(store.items[KEY_THEME], r#""dark""#);
    }

    #[test]
    fn toggle_survives_storage_failure() {
        let mut store = MemoryStore {
            fail_writes: true,
            ..Default::default()
        };
        let surface = RecordingSurface::default();
        let mut view = mount_loaded(&store);
        view.toggle_theme(&mut store, &surface);
        assert_eq!(view.theme, Theme::Light);
        assert_eq!(surface.current(), Some(Theme::Light));
        assert!(store.items.is_empty());
    }

    #[test]
    fn search_narrows_and_clearing_restores() {
        let store = MemoryStore::default();
        let mut view = mount_loaded(&store);
        view.set_search_query("shad");
        assert_eq!(titles(&view), vec!["Shad Jatra"]);
        view.set_search_query("vercel");
        assert!(titles(&view).is_empty());
        view.set_search_query("");
        assert_eq!(
            titles(&view),
            vec!["Shortened Link", "Shad Jatra", "classnote Sorter", "Capital Balance"]
        );
    }

    #[test]
    fn lightbox_shows_selected_image_until_closed() {
        let store = MemoryStore::default();
        let mut view = mount_loaded(&store);
        view.open_lightbox(1);
        assert!(view.is_dialog_open);
        assert_eq!(view.selected_image(), Some(&ImageRef::new("projects/shad-jatra.png")));

        view.set_dialog_open(false);
        assert!(!view.is_dialog_open);
        assert_eq!(view.selected_image(), None);

        view.open_lightbox(2);
        view.close_lightbox();
        assert_eq!(view.selected_image(), None);
    }

    #[test]
    fn out_of_range_lightbox_is_ignored() {
        let store = MemoryStore::default();
        let mut view = mount_loaded(&store);
        view.open_lightbox(99);
        assert!(!view.is_dialog_open);
        view.set_dialog_open(true);
        assert!(!view.is_dialog_open);
    }

    #[test]
    fn search_hiding_selection_closes_lightbox() {
        let store = MemoryStore::default();
        let mut view = mount_loaded(&store);
        view.open_lightbox(1);
        view.set_search_query("shad");
        assert!(view.is_dialog_open);
        view.set_search_query("capital");
        assert!(!view.is_dialog_open);
        assert_eq!(view.selected_image(), None);
    }

    #[test]
    fn scroll_to_top_leaves_state_alone() {
        let store = MemoryStore::default();
        let mut view = mount_loaded(&store);
        view.set_search_query("link");
        view.scroll_to_top();
        assert!(view.scroll_to_top_requested);
        assert_eq!(view.search_query, "link");
        assert_eq!(view.theme, Theme::Dark);
    }

    #[test]
    fn escape_in_lightbox_closes_through_the_view() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = MemoryStore::default();
        let mut images = crate::app::ImageCache::new(dir.path());
        let mut view = mount_loaded(&store);
        view.open_lightbox(1);

        let ctx = egui::Context::default();
        let input = egui::RawInput {
            events: vec![egui::Event::Key {
                key: egui::Key::Escape,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: egui::Modifiers::NONE,
            }],
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| {
            let mut vc = ViewContext {
                ctx,
                store: &mut store,
                images: &mut images,
                logo: None,
            };
            view.show(&mut vc);
        });
        assert!(!view.is_dialog_open);
        assert_eq!(view.selected_image(), None);
    }

    #[test]
    fn custom_catalog_is_searched() {
        let store = MemoryStore::default();
        let catalog = vec![Project {
            id: "a".into(),
            title: "Rust CLI".into(),
            description: "Terminal tool".into(),
            image_url: ImageRef::new("projects/cli.png"),
            live_url: "https://cli.example".into(),
            github_url: "https://github.com/x/cli".into(),
        }];
        let mut view = ProjectsView::mount_with_catalog(&store, &ManualScheduler::loaded(), catalog);
        view.set_search_query("TERMINAL");
        assert_eq!(titles(&view), vec!["Rust CLI"]);
    }

    #[test]
    fn gate_and_preloader_follow_scheduler() {
        let store = MemoryStore::default();
        let scheduler = ManualScheduler::default();
        let mut view = ProjectsView::mount(&store, &scheduler);
        assert!(view.is_loading());
        assert_eq!(scheduler.timers_started(), 1);
        scheduler.advance(PRELOADER_DELAY);
        assert!(view.is_loading());
        scheduler.fire_load();
        assert!(!view.is_loading());
        assert_eq!(scheduler.live_subscriptions(), 0);
    }

    #[test]
    fn renders_grid_with_placeholders() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = MemoryStore::default();
        let mut images = crate::app::ImageCache::new(dir.path());
        let mut view = mount_loaded(&store);
        view.open_lightbox(0);
        let ctx = egui::Context::default();

        let mut action = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            let mut vc = ViewContext {
                ctx,
                store: &mut store,
                images: &mut images,
                logo: None,
            };
            action = view.show(&mut vc);
        });
        assert_eq!(action, None);
        assert!(view.is_dialog_open);
        assert!(ctx.style().visuals.dark_mode);
    }
}
