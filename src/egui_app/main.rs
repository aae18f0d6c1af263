/**
 * Steward Desktop App - Main Entry Point
 *
 * Initialises logging and configuration, then hands control to eframe.
 * Background work runs on the tokio runtime owned by `AppState`; results are
 * applied once per frame in `update`.
 */
use eframe::egui;
use tracing_subscriber::EnvFilter;

use steward::egui_app::{theme, views, AppState, Config};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("steward=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> eframe::Result {
    init_tracing();
    let config = Config::new();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([420.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Steward",
        options,
        Box::new(|cc| {
            theme::apply_global_theme(&cc.egui_ctx);
            let state = AppState::new(config)?;
            let app: Box<dyn eframe::App> = Box::new(StewardApp { state });
            Ok(app)
        }),
    )
}

/// Main application state
struct StewardApp {
    state: AppState,
}

impl eframe::App for StewardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.process_events();

        views::render_top_bar(ctx, &mut self.state);
        views::render_main_panel(ctx, &mut self.state);
        views::render_modals(ctx, &mut self.state);
        views::render_notification(ctx, &mut self.state);

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
