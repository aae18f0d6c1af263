//! Theme Module
//!
//! Color scheme and styling helpers for the Steward UI:
//!
//! - Color constants for the green/off-white palette
//! - Frame builders for the top bar, cards, modals and toasts
//! - Button and inline-error helpers
//!
//! # Usage
//!
//! ```rust,no_run
//! use steward::egui_app::theme::{colors, styles};
//!
//! # fn show(ctx: &eframe::egui::Context, ui: &mut eframe::egui::Ui) {
//! styles::apply_global_theme(ctx);
//! styles::card_frame().show(ui, |ui| {
//!     ui.colored_label(colors::TEXT_PRIMARY, "Budget");
//! });
//! # }
//! ```

pub mod colors;
pub mod styles;

pub use colors::*;
pub use styles::*;
