//! Settings panel: chat and health endpoints, with an explicit Save button.

use egui::{self, RichText, Vec2};
use chat_types::config::ChatConfig;
use crate::state::SaveFeedback;
use crate::theme::*;

/// What the caller should do after rendering the settings panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    /// Nothing changed
    None,
    /// A field was edited; the draft differs from what was saved
    Changed,
    /// The user clicked the explicit Save button
    SaveClicked,
}

/// Render the settings panel over the draft config.
pub fn settings_panel(
    ui: &mut egui::Ui,
    draft: &mut ChatConfig,
    save_feedback: Option<&SaveFeedback>,
) -> SettingsAction {
    let mut changed = false;
    let mut save_clicked = false;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .inner_margin(PANEL_PADDING)
        .corner_radius(PANEL_ROUNDING)
        .show(ui, |ui| {
            ui.heading(RichText::new("Settings").color(TEXT_PRIMARY));
            ui.separator();

            // ── Endpoints ────────────────────────────────────
            ui.label(RichText::new("Endpoints").color(ACCENT).strong());
            ui.add_space(2.0);

            ui.label(RichText::new("Chat URL").color(TEXT_SECONDARY).small());
            if ui
                .add(egui::TextEdit::singleline(&mut draft.endpoints.chat_url).hint_text("/api/chat"))
                .changed()
            {
                changed = true;
            }

            ui.add_space(4.0);

            ui.label(RichText::new("Health URL").color(TEXT_SECONDARY).small());
            if ui
                .add(egui::TextEdit::singleline(&mut draft.endpoints.health_url).hint_text("/api/health"))
                .changed()
            {
                changed = true;
            }

            ui.add_space(4.0);
            ui.label(
                RichText::new("The health check runs once at startup; reload to re-check.")
                    .color(TEXT_SECONDARY)
                    .small()
                    .italics(),
            );

            // ── Save Button ──────────────────────────────────
            ui.add_space(16.0);
            ui.separator();
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                let btn = ui.add(
                    egui::Button::new(
                        RichText::new("Save Settings")
                            .color(TEXT_PRIMARY)
                            .strong(),
                    )
                    .fill(ACCENT)
                    .corner_radius(PANEL_ROUNDING)
                    .min_size(Vec2::new(120.0, 28.0)),
                );
                if btn.clicked() {
                    save_clicked = true;
                }

                if let Some(fb) = save_feedback {
                    let color = if fb.success { SUCCESS } else { ERROR };
                    ui.label(RichText::new(&fb.message).color(color).small());
                }
            });
        });

    if save_clicked {
        SettingsAction::SaveClicked
    } else if changed {
        SettingsAction::Changed
    } else {
        SettingsAction::None
    }
}
