use eframe::egui;

use crate::egui_app::navigation::Route;
use crate::egui_app::settings::LoadStatus;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::shared::format::{currency_symbol, current_month, date_range, format_date};

/// Shell shared by the signed-in pages: breadcrumb, title and the currency
/// the page's amounts are shown in.
pub fn render(ui: &mut egui::Ui, state: &mut AppState, route: Route) {
    if let Some([home, current]) = state.nav.breadcrumbs() {
        ui.horizontal(|ui| {
            if ui.link(home.label()).clicked() {
                state.navigate(home);
            }
            ui.label(egui::RichText::new("›").color(colors::TEXT_SECONDARY));
            ui.label(egui::RichText::new(current.label()).color(colors::TEXT_PRIMARY));
        });
        ui.add_space(8.0);
    }

    ui.heading(
        egui::RichText::new(format!("{} {}", route.icon(), route.label()))
            .size(28.0)
            .color(colors::TEXT_PRIMARY),
    );
    ui.add_space(16.0);

    styles::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        match state.settings.status() {
            LoadStatus::NotLoaded | LoadStatus::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading your settings...");
                });
            }
            LoadStatus::Loaded | LoadStatus::Failed => {
                let currency = state.settings.currency().to_string();
                ui.label(
                    egui::RichText::new(format!(
                        "Amounts are shown in {} ({})",
                        currency,
                        currency_symbol(&currency)
                    ))
                    .color(colors::TEXT_SECONDARY),
                );
                if let Some((start, end)) = date_range(&current_month()) {
                    ui.label(
                        egui::RichText::new(format!(
                            "Current period: {} – {}",
                            format_date(start),
                            format_date(end)
                        ))
                        .color(colors::TEXT_SECONDARY),
                    );
                }
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new(format!("Example: {}", state.settings.format_amount(1234.5)))
                        .color(colors::TEXT_PRIMARY),
                );
            }
        }
    });
}
