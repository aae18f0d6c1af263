//! Color Constants
//!
//! Steward's palette: deep green chrome, off-white content surfaces and
//! warm accents for calls to action.

use eframe::egui::Color32;

/// Top bar background - Deep green
pub const TOP_BAR_BG: Color32 = Color32::from_rgb(0x1F, 0x3A, 0x2E);

/// Page background behind cards
pub const PAGE_BG: Color32 = Color32::from_rgb(0xF4, 0xF6, 0xF3);

/// Card and modal surface
pub const CARD_BG: Color32 = Color32::from_rgb(0xFF, 0xFF, 0xFF);

/// Card and input border
pub const BORDER: Color32 = Color32::from_rgb(0xD5, 0xDD, 0xD6);

/// Text on dark backgrounds
pub const TEXT_LIGHT: Color32 = Color32::from_rgb(0xF1, 0xF5, 0xF2);

/// Primary text color
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(0x1D, 0x2B, 0x24);

/// Secondary text color (muted)
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0x5E, 0x6E, 0x66);

/// Accent color for primary buttons and the active nav link
pub const ACCENT: Color32 = Color32::from_rgb(0x2F, 0x85, 0x5A);

/// Hovered accent
pub const ACCENT_HOVER: Color32 = Color32::from_rgb(0x27, 0x6F, 0x4B);

/// Secondary button background
pub const BUTTON_SECONDARY: Color32 = Color32::from_rgb(0xE3, 0xEA, 0xE5);

/// Success color - Green
pub const SUCCESS: Color32 = Color32::from_rgb(0x38, 0xA1, 0x69);

/// Error color - Red
pub const ERROR: Color32 = Color32::from_rgb(0xE5, 0x3E, 0x3E);

/// Info color - Blue
pub const INFO: Color32 = Color32::from_rgb(0x31, 0x82, 0xCE);

/// Strength meter: weak
pub const STRENGTH_WEAK: Color32 = Color32::from_rgb(0xE5, 0x3E, 0x3E);

/// Strength meter: medium
pub const STRENGTH_MEDIUM: Color32 = Color32::from_rgb(0xDD, 0x6B, 0x20);

/// Strength meter: strong
pub const STRENGTH_STRONG: Color32 = Color32::from_rgb(0x38, 0xA1, 0x69);

/// Strength meter: very strong
pub const STRENGTH_VERY_STRONG: Color32 = Color32::from_rgb(0x27, 0x6F, 0x4B);
