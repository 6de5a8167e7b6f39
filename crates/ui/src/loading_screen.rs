//! Startup splash.
//!
//! Holds fully opaque for [`LoadingScreenConfig::hold_secs`], then fades out
//! over [`LoadingScreenConfig::fade_secs`]. While holding, a full-screen egui
//! area swallows pointer input so no press reaches the scene; the fade is
//! drawn without taking input.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::theme;

// =============================================================================
// Resources
// =============================================================================

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct LoadingScreenConfig {
    pub hold_secs: f32,
    pub fade_secs: f32,
}

impl Default for LoadingScreenConfig {
    fn default() -> Self {
        Self {
            hold_secs: 3.0,
            fade_secs: 1.0,
        }
    }
}

/// Seconds since the splash appeared.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct LoadingScreen {
    pub elapsed: f32,
}

impl LoadingScreen {
    pub fn tick(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
    }

    /// Overlay opacity in `[0, 1]`.
    pub fn alpha(&self, config: &LoadingScreenConfig) -> f32 {
        if self.elapsed < config.hold_secs {
            return 1.0;
        }
        if config.fade_secs <= 0.0 {
            return 0.0;
        }
        let t = (self.elapsed - config.hold_secs) / config.fade_secs;
        (1.0 - t).clamp(0.0, 1.0)
    }

    pub fn blocks_input(&self, config: &LoadingScreenConfig) -> bool {
        self.elapsed < config.hold_secs
    }

    pub fn is_finished(&self, config: &LoadingScreenConfig) -> bool {
        self.elapsed >= config.hold_secs + config.fade_secs.max(0.0)
    }
}

// =============================================================================
// Systems
// =============================================================================

pub fn advance_loading_screen(
    time: Res<Time>,
    config: Res<LoadingScreenConfig>,
    mut screen: ResMut<LoadingScreen>,
) {
    if screen.is_finished(&config) {
        return;
    }
    screen.tick(time.delta_secs());
    if screen.is_finished(&config) {
        debug!("Loading screen dismissed after {:.1}s", screen.elapsed);
    }
}

pub fn loading_screen_ui(
    mut contexts: EguiContexts,
    config: Res<LoadingScreenConfig>,
    screen: Res<LoadingScreen>,
) {
    if screen.is_finished(&config) {
        return;
    }
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };
    let alpha = screen.alpha(&config);
    let blocks_input = screen.blocks_input(&config);
    let screen_rect = ctx.screen_rect();

    egui::Area::new(egui::Id::new("loading_overlay"))
        .fixed_pos(screen_rect.min)
        .order(egui::Order::Foreground)
        .interactable(blocks_input)
        .show(ctx, |ui| {
            let fill = theme::PANEL_FILL.gamma_multiply(alpha);
            ui.painter()
                .rect_filled(screen_rect, egui::CornerRadius::ZERO, fill);
            if blocks_input {
                ui.allocate_rect(screen_rect, egui::Sense::click_and_drag());
            }
            ui.painter().text(
                screen_rect.center(),
                egui::Align2::CENTER_CENTER,
                "Department Explorer",
                egui::FontId::proportional(theme::FONT_HEADING * 1.6),
                theme::TEXT_HEADING.gamma_multiply(alpha),
            );
        });
}
