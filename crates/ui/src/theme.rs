use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

pub const FONT_HEADING: f32 = 20.0;
pub const FONT_BODY: f32 = 14.0;

pub const TEXT_HEADING: egui::Color32 = egui::Color32::from_rgb(235, 238, 245);
pub const TEXT_MUTED: egui::Color32 = egui::Color32::from_rgb(150, 155, 170);

pub const PANEL_FILL: egui::Color32 = egui::Color32::from_rgb(35, 37, 48);

/// egui colour for a Bevy colour, alpha dropped.
pub fn to_egui_color(color: Color) -> egui::Color32 {
    let [r, g, b, _] = color.to_srgba().to_u8_array();
    egui::Color32::from_rgb(r, g, b)
}

pub fn apply_explorer_theme(mut contexts: EguiContexts) {
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };
    let mut style = (*ctx.style()).clone();

    let inactive = egui::Color32::from_rgb(50, 55, 65);
    let hover = egui::Color32::from_rgb(70, 80, 100);
    let active = egui::Color32::from_rgb(100, 160, 220);

    style.visuals.widgets.noninteractive.bg_fill = PANEL_FILL;
    style.visuals.widgets.inactive.bg_fill = inactive;
    style.visuals.widgets.hovered.bg_fill = hover;
    style.visuals.widgets.active.bg_fill = active;
    style.visuals.widgets.inactive.weak_bg_fill = inactive;
    style.visuals.widgets.hovered.weak_bg_fill = hover;
    style.visuals.widgets.active.weak_bg_fill = active;

    style.visuals.window_fill = PANEL_FILL;
    style.visuals.panel_fill = PANEL_FILL;
    style.visuals.selection.bg_fill = active;
    style.visuals.selection.stroke = egui::Stroke::new(1.0, active);

    let window_rounding = egui::CornerRadius::same(8);
    let widget_rounding = egui::CornerRadius::same(6);
    style.visuals.window_corner_radius = window_rounding;
    style.visuals.widgets.noninteractive.corner_radius = widget_rounding;
    style.visuals.widgets.inactive.corner_radius = widget_rounding;
    style.visuals.widgets.hovered.corner_radius = widget_rounding;
    style.visuals.widgets.active.corner_radius = widget_rounding;

    ctx.set_style(style);
}
