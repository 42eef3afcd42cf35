//! Reusable UI components
//!
//! Pieces shared by the home and projects views: nav bar, footer, centered
//! column layout, avatar and image painting.

use crate::theme::{self, Palette};
use crate::types::Theme;
use crate::utils::initials;
use eframe::egui;

/// What was clicked in the nav bar this frame
#[derive(Default)]
pub struct NavResponse {
    pub logo_clicked: bool,
    pub toggle_clicked: bool,
}

/// Sticky top bar: logo on the left, theme toggle on the right
pub fn nav_bar(
    ui: &mut egui::Ui,
    p: &Palette,
    theme: Theme,
    logo: Option<&egui::TextureHandle>,
    max_width: f32,
) -> NavResponse {
    let mut nav = NavResponse::default();
    centered_column(ui, max_width, |ui| {
        ui.horizontal(|ui| {
            ui.set_min_height(theme::NAV_HEIGHT - 16.0);
            let logo_size = egui::vec2(28.0, 28.0);
            let logo_resp = match logo {
                Some(texture) => ui.add(
                    egui::ImageButton::new(egui::load::SizedTexture::new(texture.id(), logo_size))
                        .frame(false),
                ),
                None => ui.add(
                    egui::Button::new(
                        egui::RichText::new(egui_phosphor::regular::LINK)
                            .size(24.0)
                            .color(p.accent),
                    )
                    .frame(false),
                ),
            };
            nav.logo_clicked = logo_resp.clicked();

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let toggle = theme::button_outline(p, theme::toggle_icon(theme))
                    .min_size(egui::vec2(36.0, 36.0));
                nav.toggle_clicked = ui
                    .add(toggle)
                    .on_hover_text("Toggle theme")
                    .clicked();
            });
        });
    });
    nav
}

pub fn footer(ui: &mut egui::Ui, p: &Palette, author: &str) {
    ui.add_space(theme::SPACING_LG);
    ui.separator();
    ui.add_space(theme::SPACING_MD);
    ui.vertical_centered(|ui| {
        ui.label(
            egui::RichText::new(format!("Designed by {}", author))
                .size(theme::FONT_SMALL)
                .color(p.text_muted),
        );
    });
    ui.add_space(theme::SPACING_LG);
}

/// Lay out `add_contents` in a column of at most `max_width`, centered in
/// the available space.
pub fn centered_column<R>(
    ui: &mut egui::Ui,
    max_width: f32,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    let available = ui.available_width();
    let width = available.min(max_width);
    let margin = ((available - width) / 2.0).max(0.0);
    ui.horizontal_top(|ui| {
        ui.add_space(margin);
        ui.vertical(|ui| {
            ui.set_width(width);
            add_contents(ui)
        })
        .inner
    })
    .inner
}

/// Card section with a large heading
pub fn section_card<R>(
    ui: &mut egui::Ui,
    p: &Palette,
    title: &str,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    theme::card_frame(p)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                egui::RichText::new(title)
                    .size(theme::FONT_TITLE)
                    .strong()
                    .color(p.text_primary),
            );
            ui.add_space(theme::SPACING_LG);
            add_contents(ui)
        })
        .inner
}

/// Round avatar with an accent ring. Falls back to initials without a texture.
pub fn avatar(ui: &mut egui::Ui, p: &Palette, texture: Option<&egui::TextureHandle>, name: &str) {
    let size = theme::AVATAR_SIZE;
    let (rect, _) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
    if !ui.is_rect_visible(rect) {
        return;
    }
    let radius = size / 2.0;
    match texture {
        Some(texture) => {
            egui::Image::new(egui::load::SizedTexture::new(texture.id(), rect.size()))
                .corner_radius(radius)
                .paint_at(ui, rect);
        }
        None => {
            let painter = ui.painter();
            painter.circle_filled(rect.center(), radius, p.bg_input);
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                initials(name),
                egui::FontId::proportional(size * 0.35),
                p.text_muted,
            );
        }
    }
    let painter = ui.painter();
    painter.circle_stroke(rect.center(), radius - 2.0, egui::Stroke::new(4.0, p.bg_card));
    painter.circle_stroke(rect.center(), radius + 1.0, egui::Stroke::new(2.0, p.accent));
}

/// Paint `texture` over `rect` like CSS `object-fit: cover; object-position: top`:
/// fill the full width, crop from the bottom.
pub fn paint_cover(painter: &egui::Painter, rect: egui::Rect, texture: &egui::TextureHandle, radius: f32) {
    let [tw, th] = texture.size();
    let uv = cover_top_uv(egui::vec2(tw as f32, th as f32), rect.size());
    let brush = egui::epaint::Brush {
        fill_texture_id: texture.id(),
        uv,
    };
    let mut shape = egui::epaint::RectShape::filled(
        rect,
        egui::CornerRadius::same(radius as u8),
        egui::Color32::WHITE,
    );
    shape.brush = Some(std::sync::Arc::new(brush));
    painter.add(shape);
}

/// UV window for a top-anchored cover crop of an image into a frame
pub fn cover_top_uv(image: egui::Vec2, frame: egui::Vec2) -> egui::Rect {
    if image.x <= 0.0 || image.y <= 0.0 || frame.x <= 0.0 || frame.y <= 0.0 {
        return egui::Rect::from_min_max(egui::Pos2::ZERO, egui::pos2(1.0, 1.0));
    }
    let image_aspect = image.x / image.y;
    let frame_aspect = frame.x / frame.y;
    if image_aspect > frame_aspect {
        // Wider than the frame: crop the sides evenly
        let visible = frame_aspect / image_aspect;
        let inset = (1.0 - visible) / 2.0;
        egui::Rect::from_min_max(egui::pos2(inset, 0.0), egui::pos2(1.0 - inset, 1.0))
    } else {
        let visible = image_aspect / frame_aspect;
        egui::Rect::from_min_max(egui::Pos2::ZERO, egui::pos2(1.0, visible))
    }
}

/// Placeholder for an image that isn't available
pub fn image_placeholder(painter: &egui::Painter, rect: egui::Rect, p: &Palette, radius: f32) {
    painter.rect_filled(rect, radius, p.bg_input);
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        egui_phosphor::regular::IMAGE,
        egui::FontId::proportional(36.0),
        p.text_muted,
    );
}
