//! Centralized theme palettes for Linkfolio
//! All colors, sizes, and styling should reference these constants

use crate::types::Theme;
use egui::Color32;

// =============================================================================
// PALETTES
// =============================================================================

/// Colors for one theme. Views look these up through `palette()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub bg_base: Color32,
    pub bg_card: Color32,
    pub bg_input: Color32,
    pub bg_nav: Color32,
    pub border: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent: Color32,
    pub accent_text: Color32,
    pub backdrop: Color32,
}

pub const DARK: Palette = Palette {
    bg_base: Color32::from_rgb(0x09, 0x09, 0x0b),     // zinc-950
    bg_card: Color32::from_rgb(0x18, 0x18, 0x1b),     // zinc-900
    bg_input: Color32::from_rgb(0x14, 0x14, 0x18),
    bg_nav: Color32::from_rgb(0x0c, 0x0c, 0x0f),
    border: Color32::from_rgb(0x27, 0x27, 0x2a),      // zinc-800
    text_primary: Color32::from_rgb(0xfa, 0xfa, 0xfa), // zinc-50
    text_muted: Color32::from_rgb(0xa1, 0xa1, 0xaa),  // zinc-400
    accent: Color32::from_rgb(0x2d, 0xd4, 0xbf),      // teal-400
    accent_text: Color32::from_rgb(0x04, 0x2f, 0x2e), // teal-950
    backdrop: Color32::from_black_alpha(200),
};

pub const LIGHT: Palette = Palette {
    bg_base: Color32::from_rgb(0xfa, 0xfa, 0xfa),     // zinc-50
    bg_card: Color32::WHITE,
    bg_input: Color32::from_rgb(0xf4, 0xf4, 0xf5),    // zinc-100
    bg_nav: Color32::from_rgb(0xf4, 0xf4, 0xf5),
    border: Color32::from_rgb(0xe4, 0xe4, 0xe7),      // zinc-200
    text_primary: Color32::from_rgb(0x09, 0x09, 0x0b), // zinc-950
    text_muted: Color32::from_rgb(0x71, 0x71, 0x7a),  // zinc-500
    accent: Color32::from_rgb(0x0d, 0x94, 0x88),      // teal-600
    accent_text: Color32::WHITE,
    backdrop: Color32::from_black_alpha(160),
};

pub fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Dark => &DARK,
        Theme::Light => &LIGHT,
    }
}

// =============================================================================
// TYPOGRAPHY - Font Sizes
// =============================================================================
pub const FONT_DISPLAY: f32 = 34.0;
pub const FONT_TITLE: f32 = 24.0;
pub const FONT_HEADING: f32 = 20.0;
pub const FONT_BODY: f32 = 15.0;
pub const FONT_SMALL: f32 = 13.0;
pub const FONT_ICON: f32 = 30.0;

// =============================================================================
// DIMENSIONS
// =============================================================================
pub const HOME_MAX_WIDTH: f32 = 672.0;
pub const PROJECTS_MAX_WIDTH: f32 = 896.0;
pub const NAV_HEIGHT: f32 = 52.0;
pub const AVATAR_SIZE: f32 = 128.0;
pub const LINK_BUTTON_HEIGHT: f32 = 56.0;
pub const PROJECT_IMAGE_HEIGHT: f32 = 256.0;
pub const PROJECT_CARD_MIN_WIDTH: f32 = 380.0;
pub const SPINNER_SIZE: f32 = 48.0;

// =============================================================================
// CORNER RADIUS & SPACING
// =============================================================================
pub const RADIUS_DEFAULT: f32 = 6.0;
pub const RADIUS_LARGE: f32 = 10.0;
pub const SPACING_SM: f32 = 4.0;
pub const SPACING_MD: f32 = 8.0;
pub const SPACING_LG: f32 = 16.0;
pub const SPACING_XL: f32 = 32.0;

// =============================================================================
// THEME SURFACE
// =============================================================================

/// Whatever the active theme is painted onto. Applying a theme replaces
/// the previous one entirely.
pub trait ThemeSurface {
    fn apply_theme(&self, theme: Theme);
}

impl ThemeSurface for egui::Context {
    fn apply_theme(&self, theme: Theme) {
        apply_visuals(self, theme);
    }
}

// =============================================================================
// HELPER - Apply global visuals
// =============================================================================
pub fn apply_visuals(ctx: &egui::Context, theme: Theme) {
    let p = palette(theme);
    let (egui_theme, base) = match theme {
        Theme::Dark => (egui::Theme::Dark, egui::Visuals::dark()),
        Theme::Light => (egui::Theme::Light, egui::Visuals::light()),
    };
    // egui keeps one style per theme; pin the one written below
    ctx.set_theme(egui_theme);
    let mut visuals = egui::Visuals {
        dark_mode: theme == Theme::Dark,
        panel_fill: p.bg_base,
        window_fill: p.bg_card,
        extreme_bg_color: p.bg_input,
        faint_bg_color: p.bg_card,
        hyperlink_color: p.accent,
        override_text_color: Some(p.text_primary),
        window_stroke: egui::Stroke::new(1.0, p.border),
        window_corner_radius: egui::CornerRadius::same(RADIUS_LARGE as u8),
        interact_cursor: Some(egui::CursorIcon::PointingHand),
        ..base
    };
    visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, p.border);
    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, p.border);
    visuals.widgets.inactive.weak_bg_fill = p.bg_card;
    visuals.widgets.inactive.corner_radius = RADIUS_DEFAULT.into();
    visuals.widgets.hovered.corner_radius = RADIUS_DEFAULT.into();
    visuals.widgets.active.corner_radius = RADIUS_DEFAULT.into();
    ctx.set_visuals(visuals);

    ctx.style_mut(|style| {
        style.interaction.selectable_labels = false;
        style.spacing.item_spacing = egui::vec2(SPACING_MD, 6.0);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);
    });
}

// =============================================================================
// HELPER - Frames
// =============================================================================
pub fn card_frame(p: &Palette) -> egui::Frame {
    egui::Frame::new()
        .fill(p.bg_card)
        .stroke(egui::Stroke::new(1.0, p.border))
        .corner_radius(RADIUS_LARGE)
        .inner_margin(egui::Margin::same(SPACING_LG as i8))
        .shadow(egui::epaint::Shadow {
            offset: [0, 2],
            blur: 8,
            spread: 0,
            color: Color32::from_black_alpha(40),
        })
}

pub fn nav_frame(p: &Palette) -> egui::Frame {
    egui::Frame::new()
        .fill(p.bg_nav)
        .stroke(egui::Stroke::new(1.0, p.border))
        .inner_margin(egui::Margin::symmetric(12, 8))
}

// =============================================================================
// HELPER - Button styles
// =============================================================================

/// Filled accent button (links, GitHub)
pub fn button_primary(p: &Palette, text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(
        egui::RichText::new(text.into())
            .color(p.accent_text)
            .size(FONT_BODY)
            .strong(),
    )
    .fill(p.accent)
    .corner_radius(RADIUS_DEFAULT)
}

/// Bordered transparent button (Live Demo, Go Back, theme toggle)
pub fn button_outline(p: &Palette, text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.into()).color(p.text_primary).size(FONT_BODY))
        .fill(Color32::TRANSPARENT)
        .stroke(egui::Stroke::new(1.0, p.border))
        .corner_radius(RADIUS_DEFAULT)
}

/// Sun in dark mode (click for light), moon in light mode
pub fn toggle_icon(theme: Theme) -> &'static str {
    match theme {
        Theme::Dark => egui_phosphor::regular::SUN,
        Theme::Light => egui_phosphor::regular::MOON,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palettes_differ_per_theme() {
        assert_ne!(palette(Theme::Dark).bg_base, palette(Theme::Light).bg_base);
        assert_eq!(palette(Theme::default()), &DARK);
    }

    #[test]
    fn applying_to_context_switches_dark_mode() {
        let ctx = egui::Context::default();
        ctx.apply_theme(Theme::Light);
        assert!(!ctx.style().visuals.dark_mode);
        ctx.apply_theme(Theme::Dark);
        assert!(ctx.style().visuals.dark_mode);
        assert_eq!(ctx.style().visuals.panel_fill, DARK.bg_base);
    }
}
