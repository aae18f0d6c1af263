use eframe::egui;

use crate::egui_app::modal::ModalId;
use crate::egui_app::navigation::Route;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.vertical_centered(|ui| {
        ui.add_space(80.0);

        ui.label(
            egui::RichText::new("💰 Steward")
                .size(48.0)
                .strong()
                .color(colors::TEXT_PRIMARY),
        );
        ui.add_space(10.0);
        ui.label(
            egui::RichText::new("Budgeting that keeps up with your life.")
                .size(22.0)
                .color(colors::TEXT_SECONDARY),
        );
        ui.add_space(40.0);

        ui.horizontal(|ui| {
            let total_width = 3.0 * 150.0 + 2.0 * 12.0;
            ui.add_space(((ui.available_width() - total_width) / 2.0).max(0.0));

            if ui
                .add(styles::primary_button("Get Started").min_size(egui::vec2(150.0, 44.0)))
                .clicked()
            {
                state.navigate(Route::Onboarding);
            }
            ui.add_space(12.0);
            if ui
                .add(styles::secondary_button("Log In").min_size(egui::vec2(150.0, 44.0)))
                .clicked()
            {
                state.open_login();
            }
            ui.add_space(12.0);
            if ui
                .add(styles::secondary_button("How It Works").min_size(egui::vec2(150.0, 44.0)))
                .clicked()
            {
                state.modals.open(ModalId::HowItWorks);
            }
        });
    });
}

pub fn render_how_it_works(ui: &mut egui::Ui) {
    let steps = [
        ("1", "Create your account", "Tell us a little about yourself and pick a currency."),
        ("2", "Choose your categories", "Start from the spending categories that matter to you."),
        ("3", "Track and adjust", "Log income and transactions, then tune your budgets monthly."),
    ];
    for (number, title, body) in steps {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(number)
                    .size(20.0)
                    .strong()
                    .color(colors::ACCENT),
            );
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(title).strong().color(colors::TEXT_PRIMARY));
                ui.label(egui::RichText::new(body).color(colors::TEXT_SECONDARY));
            });
        });
        ui.add_space(8.0);
    }
}
