//! UI theme constants

use egui::{Color32, CornerRadius, Stroke, Vec2};
use chat_types::status::HealthStatus;

pub const BG_PRIMARY: Color32 = Color32::from_rgb(24, 24, 27);
pub const BG_SECONDARY: Color32 = Color32::from_rgb(39, 39, 42);
pub const BG_SURFACE: Color32 = Color32::from_rgb(52, 52, 56);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(228, 228, 231);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(161, 161, 170);
pub const ACCENT: Color32 = Color32::from_rgb(236, 112, 153);
pub const SUCCESS: Color32 = Color32::from_rgb(34, 197, 94);
pub const ERROR: Color32 = Color32::from_rgb(239, 68, 68);
pub const USER_BUBBLE: Color32 = Color32::from_rgb(120, 52, 82);
pub const ASSISTANT_BUBBLE: Color32 = BG_SECONDARY;

pub const PANEL_ROUNDING: CornerRadius = CornerRadius::same(6);
pub const BUBBLE_ROUNDING: CornerRadius = CornerRadius::same(10);
pub const PANEL_PADDING: Vec2 = Vec2::new(12.0, 8.0);
pub const AVATAR_SIZE: f32 = 32.0;

pub fn status_color(status: HealthStatus) -> Color32 {
    let (r, g, b) = status.color_rgb();
    Color32::from_rgb(r, g, b)
}

/// Apply the dark theme to an egui context
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals.dark_mode = true;
    style.visuals.panel_fill = BG_PRIMARY;
    style.visuals.window_fill = BG_SECONDARY;

    style.visuals.widgets.inactive.bg_fill = BG_SURFACE;
    style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    style.visuals.widgets.hovered.bg_fill = BG_SURFACE;
    style.visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    style.visuals.widgets.active.bg_fill = ACCENT;
    style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);

    style.visuals.selection.bg_fill = ACCENT.linear_multiply(0.4);
    style.visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    style.spacing.item_spacing = Vec2::new(8.0, 6.0);

    ctx.set_style(style);
}
