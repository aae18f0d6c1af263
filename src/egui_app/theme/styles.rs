//! Theme Styling Functions
//!
//! Helpers for applying the palette consistently across views.

use eframe::egui::{self, Color32, CornerRadius, Stroke};

use super::colors;
use crate::egui_app::notification::NotificationKind;
use crate::shared::validation::PasswordStrength;

/// Apply the global theme to the egui context
pub fn apply_global_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals = egui::Visuals::light();
    style.visuals.window_fill = colors::CARD_BG;
    style.visuals.window_stroke = Stroke::new(1.0, colors::BORDER);
    style.visuals.panel_fill = colors::PAGE_BG;

    style.visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, colors::TEXT_PRIMARY);
    style.visuals.widgets.inactive.bg_fill = colors::BUTTON_SECONDARY;
    style.visuals.widgets.inactive.weak_bg_fill = colors::BUTTON_SECONDARY;
    style.visuals.widgets.hovered.bg_fill = colors::ACCENT_HOVER;
    style.visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, colors::TEXT_LIGHT);
    style.visuals.widgets.active.bg_fill = colors::ACCENT;
    style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, colors::TEXT_LIGHT);

    style.visuals.selection.bg_fill = colors::ACCENT;
    style.visuals.selection.stroke = Stroke::new(1.0, colors::TEXT_LIGHT);

    ctx.set_style(style);
}

/// Create a frame style for the top bar
pub fn top_bar_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::TOP_BAR_BG)
        .inner_margin(egui::Margin::symmetric(16, 10))
}

/// Create a frame style for the main page area
pub fn page_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::PAGE_BG)
        .inner_margin(egui::Margin::same(24))
}

/// Create a frame for content cards
pub fn card_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::CARD_BG)
        .stroke(Stroke::new(1.0, colors::BORDER))
        .corner_radius(CornerRadius::same(12))
        .inner_margin(egui::Margin::same(24))
}

/// Create a frame for modal dialogs
pub fn modal_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::CARD_BG)
        .stroke(Stroke::new(1.0, colors::BORDER))
        .corner_radius(CornerRadius::same(12))
        .inner_margin(egui::Margin::same(24))
        .shadow(egui::epaint::Shadow {
            offset: [0, 4],
            blur: 16,
            spread: 0,
            color: Color32::from_black_alpha(60),
        })
}

/// Create a frame for a toast of the given kind
pub fn toast_frame(kind: NotificationKind) -> egui::Frame {
    egui::Frame::new()
        .fill(notification_color(kind))
        .corner_radius(CornerRadius::same(8))
        .inner_margin(egui::Margin::symmetric(16, 10))
        .shadow(egui::epaint::Shadow {
            offset: [0, 2],
            blur: 8,
            spread: 0,
            color: Color32::from_black_alpha(40),
        })
}

pub fn notification_color(kind: NotificationKind) -> Color32 {
    match kind {
        NotificationKind::Success => colors::SUCCESS,
        NotificationKind::Error => colors::ERROR,
        NotificationKind::Info => colors::INFO,
    }
}

pub fn strength_color(strength: PasswordStrength) -> Color32 {
    match strength {
        PasswordStrength::Weak => colors::STRENGTH_WEAK,
        PasswordStrength::Medium => colors::STRENGTH_MEDIUM,
        PasswordStrength::Strong => colors::STRENGTH_STRONG,
        PasswordStrength::VeryStrong => colors::STRENGTH_VERY_STRONG,
    }
}

/// Filled call-to-action button
pub fn primary_button(text: &str) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.to_string()).color(colors::TEXT_LIGHT))
        .fill(colors::ACCENT)
        .corner_radius(CornerRadius::same(6))
        .min_size(egui::vec2(120.0, 34.0))
}

/// Muted secondary button
pub fn secondary_button(text: &str) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.to_string()).color(colors::TEXT_PRIMARY))
        .fill(colors::BUTTON_SECONDARY)
        .corner_radius(CornerRadius::same(6))
        .min_size(egui::vec2(120.0, 34.0))
}

/// Inline field error below an input
pub fn field_error(ui: &mut egui::Ui, message: &str) {
    ui.label(egui::RichText::new(message).color(colors::ERROR).size(13.0));
}
