//! Spinner overlay shown while a view is gated

use super::schedule::{Scheduler, Subscription};
use crate::constants::PRELOADER_DELAY;
use crate::theme;
use crate::types::Theme;
use eframe::egui;

const FADE_SECONDS: f32 = 0.3;

/// Shows a spinner, then dismisses itself once its timer fires.
/// A dismissed preloader never comes back within the same mount.
pub struct Preloader {
    timer: Option<Subscription>,
    visible: bool,
}

impl Preloader {
    pub fn mount(scheduler: &dyn Scheduler) -> Self {
        Self {
            timer: Some(scheduler.timeout(PRELOADER_DELAY)),
            visible: true,
        }
    }

    pub fn poll(&mut self) -> bool {
        if self.timer.as_ref().is_some_and(Subscription::has_fired) {
            self.visible = false;
            self.timer = None;
        }
        self.visible
    }

    pub fn show(&mut self, ctx: &egui::Context, theme: Theme) {
        let visible = self.poll();
        let p = theme::palette(theme);
        let opacity = ctx.animate_bool_with_time(egui::Id::new("preloader_fade"), visible, FADE_SECONDS);

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(p.bg_base))
            .show(ctx, |ui| {
                if opacity <= 0.0 {
                    return;
                }
                ui.set_opacity(opacity);
                let rect = egui::Rect::from_center_size(
                    ui.max_rect().center(),
                    egui::vec2(theme::SPINNER_SIZE, theme::SPINNER_SIZE),
                );
                ui.put(
                    rect,
                    egui::Spinner::new().size(theme::SPINNER_SIZE).color(p.accent),
                );
            });

        if visible {
            ctx.request_repaint();
        }
    }
}
