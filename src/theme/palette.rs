//! Color constants and font size tokens for consistent UI theming.

#![allow(dead_code)] // Constants populated ahead of use across multiple phases.

use bevy::prelude::*;

// === Text Colors ===

/// Header/title text color (white).
pub const HEADER_TEXT: Color = Color::WHITE;

/// Body/subtitle text color (light gray).
pub const BODY_TEXT: Color = Color::srgb(0.7, 0.7, 0.7);

/// Button label text color.
pub const BUTTON_TEXT: Color = Color::srgb(0.925, 0.925, 0.925);

/// Victory title accent (green).
pub const VICTORY_TEXT: Color = Color::srgb(0.3, 0.9, 0.3);

// === UI Backgrounds ===

/// Semi-transparent dark overlay for pause/modal screens.
pub const OVERLAY_BACKGROUND: Color = Color::srgba(0.0, 0.0, 0.0, 0.7);

/// Panel background (dark blue-gray, nearly opaque).
pub const PANEL_BACKGROUND: Color = Color::srgba(0.1, 0.1, 0.15, 0.95);

/// Panel border (light blue-gray, semi-transparent).
pub const PANEL_BORDER: Color = Color::srgba(0.5, 0.5, 0.6, 0.8);

// === Button Colors ===

pub const BUTTON_BACKGROUND: Color = Color::srgb(0.275, 0.4, 0.75);
pub const BUTTON_HOVERED_BACKGROUND: Color = Color::srgb(0.384, 0.6, 0.82);
pub const BUTTON_PRESSED_BACKGROUND: Color = Color::srgb(0.239, 0.286, 0.6);

// === HUD Colors ===

/// Crosshair dot when aiming at nothing grabbable.
pub const CROSSHAIR: Color = Color::srgba(1.0, 1.0, 1.0, 0.8);

/// Crosshair dot when a grabbable prop is under the aim ray.
pub const CROSSHAIR_GRAB: Color = Color::srgb(0.3, 0.9, 1.0);

/// Remaining-target counter text.
pub const TARGET_COUNTER_TEXT: Color = Color::srgb(1.0, 0.85, 0.0);

/// Stamina bar colors.
pub const STAMINA_BAR_BG: Color = Color::srgba(0.1, 0.1, 0.15, 0.8);
pub const STAMINA_BAR_FILL: Color = Color::srgb(0.2, 0.7, 0.9);
/// Fill tint while too exhausted to sprint.
pub const STAMINA_BAR_DEPLETED: Color = Color::srgb(0.8, 0.3, 0.2);

// === World Colors ===

pub const GROUND: Color = Color::srgb(0.35, 0.37, 0.34);
pub const WALL: Color = Color::srgb(0.45, 0.44, 0.42);
pub const CRATE: Color = Color::srgb(0.55, 0.4, 0.22);
pub const BALL: Color = Color::srgb(0.25, 0.5, 0.75);
pub const TARGET: Color = Color::srgb(0.85, 0.2, 0.15);
pub const TARGET_STAND: Color = Color::srgb(0.3, 0.3, 0.33);
pub const DEBRIS: Color = Color::srgb(0.5, 0.12, 0.1);
pub const PROJECTILE: Color = Color::srgb(1.0, 0.9, 0.3);
pub const IMPACT_FLASH: Color = Color::srgb(1.0, 0.8, 0.4);

/// Emissive tint applied to the highlighted (grab-aimable) prop.
pub const HIGHLIGHT_EMISSIVE: LinearRgba = LinearRgba::rgb(0.1, 0.5, 0.8);

// === Font Size Tokens ===

pub const FONT_SIZE_TITLE: f32 = 72.0;
pub const FONT_SIZE_HEADER: f32 = 64.0;
pub const FONT_SIZE_LABEL: f32 = 32.0;
pub const FONT_SIZE_HUD: f32 = 28.0;
pub const FONT_SIZE_PROMPT: f32 = 24.0;
pub const FONT_SIZE_BODY: f32 = 16.0;
