//! Full-size image overlay for the projects grid

use crate::theme::{self, Palette};
use eframe::egui;

/// Draw the lightbox over everything else. Returns true when the user asked
/// to close it: close button, backdrop click or Escape.
pub fn show(
    ctx: &egui::Context,
    p: &Palette,
    title: &str,
    texture: Option<&egui::TextureHandle>,
) -> bool {
    let mut close = ctx.input(|i| i.key_pressed(egui::Key::Escape));

    // Dim backdrop - blocks interaction with the grid
    let screen = ctx.screen_rect();
    egui::Area::new(egui::Id::new("lightbox_backdrop"))
        .fixed_pos(screen.min)
        .order(egui::Order::Middle)
        .interactable(true)
        .show(ctx, |ui| {
            let resp = ui.allocate_response(screen.size(), egui::Sense::click());
            ui.painter().rect_filled(screen, 0.0, p.backdrop);
            if resp.clicked() {
                close = true;
            }
        });

    let max_size = screen.size() * 0.85;
    let image_size = match texture {
        Some(texture) => fit_within(texture.size_vec2(), max_size),
        None => egui::vec2(max_size.x.min(640.0), max_size.y.min(360.0)),
    };

    egui::Area::new(egui::Id::new("lightbox_content"))
        .order(egui::Order::Foreground)
        .movable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            let (rect, _) = ui.allocate_exact_size(image_size, egui::Sense::hover());
            match texture {
                Some(texture) => {
                    egui::Image::new(egui::load::SizedTexture::new(texture.id(), image_size))
                        .corner_radius(theme::RADIUS_LARGE)
                        .paint_at(ui, rect);
                }
                None => crate::ui::components::image_placeholder(
                    ui.painter(),
                    rect,
                    p,
                    theme::RADIUS_LARGE,
                ),
            }

            let btn_rect = close_button_rect(rect);
            let btn = ui.interact(btn_rect, ui.id().with("lightbox_close"), egui::Sense::click());
            let fill = if btn.hovered() {
                egui::Color32::from_black_alpha(200)
            } else {
                egui::Color32::from_black_alpha(140)
            };
            ui.painter().circle_filled(btn_rect.center(), 16.0, fill);
            ui.painter().text(
                btn_rect.center(),
                egui::Align2::CENTER_CENTER,
                egui_phosphor::regular::X,
                egui::FontId::proportional(18.0),
                egui::Color32::WHITE,
            );
            if btn.on_hover_text("Close").clicked() {
                close = true;
            }

            if !title.is_empty() {
                ui.add_space(theme::SPACING_MD);
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new(title)
                            .size(theme::FONT_BODY)
                            .color(egui::Color32::WHITE),
                    );
                });
            }
        });

    close
}

/// Close button pinned to the image's top-right corner
fn close_button_rect(image: egui::Rect) -> egui::Rect {
    egui::Rect::from_center_size(image.right_top() + egui::vec2(-22.0, 22.0), egui::vec2(32.0, 32.0))
}

/// Scale `image` down (never up) to fit inside `bounds`, keeping its aspect
fn fit_within(image: egui::Vec2, bounds: egui::Vec2) -> egui::Vec2 {
    if image.x <= 0.0 || image.y <= 0.0 {
        return bounds;
    }
    let scale = (bounds.x / image.x).min(bounds.y / image.y).min(1.0);
    image * scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_images_shrink_to_fit() {
        let size = fit_within(egui::vec2(2000.0, 1000.0), egui::vec2(800.0, 800.0));
        assert_eq!(size, egui::vec2(800.0, 400.0));
    }

    #[test]
    fn small_images_keep_their_size() {
        let size = fit_within(egui::vec2(300.0, 200.0), egui::vec2(800.0, 800.0));
        assert_eq!(size, egui::vec2(300.0, 200.0));
    }

    #[test]
    fn idle_frame_does_not_close() {
        let ctx = egui::Context::default();
        let mut closed = true;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            closed = show(ctx, &theme::DARK, "Shad Jatra", None);
        });
        assert!(!closed);
    }

    #[test]
    fn escape_closes() {
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
        let mut closed = false;
        let _ = ctx.run(input, |ctx| {
            closed = show(ctx, &theme::DARK, "", None);
        });
        assert!(closed);
    }

    const SCREEN: egui::Rect = egui::Rect {
        min: egui::Pos2::ZERO,
        max: egui::pos2(800.0, 600.0),
    };

    /// Run a few frames that move the pointer to `pos` and click it there.
    /// Returns whether any frame asked to close.
    fn click_at(pos: egui::Pos2) -> bool {
        let ctx = egui::Context::default();
        let button = |pressed| egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        };
        let frames = vec![
            vec![],
            vec![],
            vec![egui::Event::PointerMoved(pos)],
            vec![button(true)],
            vec![button(false)],
            vec![],
        ];
        let mut closed = false;
        for events in frames {
            let input = egui::RawInput {
                screen_rect: Some(SCREEN),
                events,
                ..Default::default()
            };
            let _ = ctx.run(input, |ctx| {
                closed |= show(ctx, &theme::DARK, "", None);
            });
        }
        closed
    }

    /// Where the placeholder lands for `SCREEN` with no texture
    fn placeholder_rect() -> egui::Rect {
        egui::Rect::from_center_size(SCREEN.center(), egui::vec2(640.0, 360.0))
    }

    #[test]
    fn backdrop_click_closes() {
        assert!(click_at(egui::pos2(10.0, 10.0)));
    }

    #[test]
    fn close_button_click_closes() {
        assert!(click_at(close_button_rect(placeholder_rect()).center()));
    }

    #[test]
    fn click_on_the_image_keeps_it_open() {
        assert!(!click_at(placeholder_rect().center()));
    }
}
