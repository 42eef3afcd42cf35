//! Home view: profile, socials, important links

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
use tracing::{debug, warn};

pub struct HomeView {
    pub(crate) profile: Profile,
    pub(crate) socials: Vec<SocialLink>,
    pub(crate) links: Vec<CustomLink>,
    pub(crate) theme: Theme,
    pub(crate) project_link_loading: bool,
    gate: LoadGate,
    preloader: Option<Preloader>,
    applied_theme: Option<Theme>,
    scroll_to_top_requested: bool,
}

impl HomeView {
    pub fn mount(store: &dyn KeyValueStore, scheduler: &dyn Scheduler) -> Self {
        let gate = LoadGate::mount(scheduler);
        let preloader = gate.is_loading().then(|| Preloader::mount(scheduler));
        let mut view = Self {
            profile: default_profile(),
            socials: default_socials(),
            links: default_links(),
            theme: Theme::default(),
            project_link_loading: false,
            gate,
            preloader,
            applied_theme: None,
            scroll_to_top_requested: false,
        };
        view.load_from_storage(store);
        view
    }

    /// Each key is read on its own; a bad value only costs that key.
    fn load_from_storage(&mut self, store: &dyn KeyValueStore) {
        if let Some(profile) = load_stored(store, KEY_PROFILE) {
            self.profile = profile;
        }
        if let Some(socials) = load_stored(store, KEY_SOCIALS) {
            self.socials = socials;
        }
        if let Some(links) = load_stored(store, KEY_LINKS) {
            self.links = links;
        }
        if let Some(theme) = load_stored(store, KEY_THEME) {
            self.theme = theme;
        }
        debug!(
            socials = self.socials.len(),
            links = self.links.len(),
            theme = self.theme.class_name(),
            "Home view mounted"
        );
    }

    /// Apply and persist the theme if it changed since the last sync
    pub fn sync_theme(&mut self, surface: &dyn ThemeSurface, store: &mut dyn KeyValueStore) {
        if self.applied_theme == Some(self.theme) {
            return;
        }
        surface.apply_theme(self.theme);
        persist_theme(store, self.theme);
        self.applied_theme = Some(self.theme);
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_to_top_requested = true;
    }

    pub fn handle_project_link_click(&mut self) {
        self.project_link_loading = true;
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
        self.sync_theme(vc.ctx, vc.store);

        if self.is_loading() {
            if let Some(preloader) = &mut self.preloader {
                preloader.show(vc.ctx, self.theme);
            }
            return None;
        }

        let p = theme::palette(self.theme);
        let mut action = None;

        egui::TopBottomPanel::top("home_nav")
            .frame(theme::nav_frame(p))
            .show(vc.ctx, |ui| {
                let nav = components::nav_bar(ui, p, self.theme, vc.logo, theme::HOME_MAX_WIDTH);
                if nav.logo_clicked {
                    self.scroll_to_top();
                }
                if nav.toggle_clicked {
                    self.toggle_theme();
                }
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(p.bg_base))
            .show(vc.ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("home_scroll")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        if std::mem::take(&mut self.scroll_to_top_requested) {
                            ui.scroll_to_cursor(Some(egui::Align::TOP));
                        }
                        components::centered_column(ui, theme::HOME_MAX_WIDTH, |ui| {
                            ui.add_space(theme::SPACING_XL);
                            let avatar = vc
                                .images
                                .texture(vc.ctx, &ImageRef::new(self.profile.avatar_url.as_str()));
                            self.render_header(ui, p, avatar.as_ref());
                            self.render_about(ui, p);
                            if let Some(a) = self.render_socials(ui, p) {
                                action = Some(a);
                            }
                            if let Some(a) = self.render_links(ui, p) {
                                action = Some(a);
                            }
                            components::footer(ui, p, &self.profile.name);
                        });
                    });
            });

        // Toggle applies this frame rather than the next
        self.sync_theme(vc.ctx, vc.store);
        action
    }

    fn render_header(&self, ui: &mut egui::Ui, p: &theme::Palette, avatar: Option<&egui::TextureHandle>) {
        ui.vertical_centered(|ui| {
            components::avatar(ui, p, avatar, &self.profile.name);
            ui.add_space(theme::SPACING_LG);
            ui.label(
                egui::RichText::new(&self.profile.name)
                    .size(theme::FONT_DISPLAY)
                    .strong()
                    .color(p.text_primary),
            );
        });
        ui.add_space(theme::SPACING_XL);
    }

    fn render_about(&self, ui: &mut egui::Ui, p: &theme::Palette) {
        components::section_card(ui, p, "About Me", |ui| {
            ui.label(
                egui::RichText::new(&self.profile.bio)
                    .size(theme::FONT_BODY)
                    .color(p.text_muted),
            );
        });
        ui.add_space(theme::SPACING_XL);
    }

    fn render_socials(&self, ui: &mut egui::Ui, p: &theme::Palette) -> Option<ViewAction> {
        let mut action = None;
        components::section_card(ui, p, "Socials", |ui| {
            let icon_width = theme::FONT_ICON + 2.0 * theme::SPACING_LG;
            let row_width = icon_width * self.socials.len() as f32;
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing.x = 0.0;
                ui.add_space(((ui.available_width() - row_width) / 2.0).max(0.0));
                for social in &self.socials {
                    let button = egui::Button::new(
                        egui::RichText::new(social.platform.icon())
                            .size(theme::FONT_ICON)
                            .color(p.text_primary),
                    )
                    .frame(false)
                    .min_size(egui::vec2(icon_width, icon_width));
                    let resp = ui.add(button).on_hover_text(social.platform.label());
                    if resp.clicked() {
                        action = Some(ViewAction::OpenExternal(social.url.clone()));
                    }
                }
            });
        });
        ui.add_space(theme::SPACING_XL);
        action
    }

    fn render_links(&mut self, ui: &mut egui::Ui, p: &theme::Palette) -> Option<ViewAction> {
        let mut clicked: Option<usize> = None;
        let project_link_loading = self.project_link_loading;
        components::section_card(ui, p, "Important Links", |ui| {
            let width = ui.available_width();
            for (i, link) in self.links.iter().enumerate() {
                let label = format!("{}  {}", egui_phosphor::regular::LINK, link.title);
                let resp = ui.add_sized(
                    [width, theme::LINK_BUTTON_HEIGHT],
                    theme::button_primary(p, label),
                );
                let internal = matches!(link.target(), LinkTarget::Internal(_));
                if internal && project_link_loading {
                    let spinner_rect = egui::Rect::from_center_size(
                        resp.rect.right_center() - egui::vec2(28.0, 0.0),
                        egui::vec2(20.0, 20.0),
                    );
                    ui.put(spinner_rect, egui::Spinner::new().size(20.0).color(p.accent_text));
                }
                if resp.clicked() {
                    clicked = Some(i);
                }
                ui.add_space(theme::SPACING_MD);
            }
        });
        ui.add_space(theme::SPACING_XL);

        let link = self.links.get(clicked?)?.clone();
        self.activate_link(&link)
    }

    /// Internal paths go through the router, everything else leaves the app
    pub fn activate_link(&mut self, link: &CustomLink) -> Option<ViewAction> {
        match link.target() {
            LinkTarget::Internal(path) => {
                self.handle_project_link_click();
                match Route::from_path(path) {
                    Some(route) => Some(ViewAction::Navigate(route)),
                    None => {
                        warn!(path, "No view for internal link");
                        None
                    }
                }
            }
            LinkTarget::External(url) => Some(ViewAction::OpenExternal(url.to_string())),
        }
    }
}
