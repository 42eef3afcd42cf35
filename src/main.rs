#![windows_subsystem = "windows"]
//! Linkfolio - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;
mod constants;
mod db;
mod settings;
mod theme;
mod types;
mod ui;
mod utils;

use app::App;
use constants::*;
use db::Database;
use eframe::egui;
use tracing::{error, info, warn};
use utils::get_data_dir;

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "linkfolio.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,linkfolio=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

/// On-disk store, or a session-only one if the file can't be opened
fn open_store(data_dir: &std::path::Path) -> Result<Database, db::StorageError> {
    let db_path = data_dir.join("linkfolio.db");
    match Database::open(&db_path) {
        Ok(db) => {
            info!(path = %db_path.display(), "Database opened");
            Ok(db)
        }
        Err(e) => {
            error!(error = %e, path = %db_path.display(), "Failed to open database, using in-memory store");
            Database::open_in_memory()
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "Linkfolio starting");

    let mut db = open_store(&data_dir)?;
    if let Err(e) = db.import_content(&data_dir.join("content.json")) {
        warn!(error = %e, "Ignoring unreadable content file");
    }

    // Load saved window position/size
    let settings = settings::Settings::load(&data_dir);
    let win_pos = settings.window_pos();
    let win_size = settings.window_size();

    let runtime = tokio::runtime::Runtime::new()?;

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(900.0, 900.0)))
        .with_min_inner_size([420.0, 600.0])
        .with_title(APP_NAME);

    if let Some((pixels, w, h)) = utils::rasterize_logo(128) {
        let icon = egui::IconData {
            rgba: pixels,
            width: w,
            height: h,
        };
        viewport = viewport.with_icon(std::sync::Arc::new(icon));
    }

    let needs_center = win_pos.is_none();

    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            let mut app = App::new(cc, db, settings, data_dir, runtime);
            app.needs_center = needs_center;
            Ok(Box::new(app))
        }),
    )?;
    Ok(())
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        self.show_view(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!(route = self.route.path(), "Application shutting down");
        self.save_settings();
    }
}
