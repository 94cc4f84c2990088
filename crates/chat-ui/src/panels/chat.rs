//! Chat panel: header with status, message rows, input and temperature.

use egui::{self, Align, Align2, FontId, Key, Layout, Modifiers, RichText, ScrollArea, Sense, Vec2};
use chat_core::client::ConversationClient;
use chat_types::config::{AvatarConfig, TEMPERATURE_MAX, TEMPERATURE_MIN};
use crate::render::{self, MessageRow};
use crate::state::UiState;
use crate::theme::*;

/// What the caller should do after rendering the chat panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatAction {
    /// Send button clicked or Enter pressed
    Submit,
    /// Clear button clicked; confirmation is up to the caller
    Clear,
    /// The input just gained focus
    InputFocused,
}

/// Id of the message input, stable across frames and layouts.
pub fn input_id() -> egui::Id {
    egui::Id::new("chat_input")
}

/// Render the chat panel. Rows are drawn straight from the client's
/// message sequence so the two can never drift apart.
pub fn chat_panel(
    ui: &mut egui::Ui,
    state: &mut UiState,
    client: &mut ConversationClient,
    avatars: &AvatarConfig,
) -> Option<ChatAction> {
    let mut action = None;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                // Header
                ui.horizontal(|ui| {
                    let title = ui.heading(
                        RichText::new(&avatars.assistant.label)
                            .color(TEXT_PRIMARY)
                            .strong(),
                    );
                    if let Some(saved_at) = client.saved_at() {
                        title.on_hover_text(format!("Last saved {}", saved_at));
                    }
                    let status = client.status();
                    ui.label(
                        RichText::new(status.label())
                            .color(status_color(status))
                            .small(),
                    );
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.add_enabled(client.is_ready(), egui::Button::new("Clear")).clicked() {
                            action = Some(ChatAction::Clear);
                        }
                    });
                });

                ui.separator();

                // Messages area
                let available_height = ui.available_height() - 110.0;
                state.sync_rows(client.messages().len());
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for row in render::rows(client.messages(), avatars) {
                            render_row(ui, &row);
                            ui.add_space(6.0);
                        }

                        if client.is_loading() {
                            ui.horizontal(|ui| {
                                ui.add(egui::Spinner::new());
                                ui.label(
                                    RichText::new("typing...")
                                        .color(TEXT_SECONDARY)
                                        .italics(),
                                );
                            });
                        }

                        if state.take_scroll() {
                            ui.scroll_to_cursor(Some(Align::BOTTOM));
                        }
                    });

                ui.add_space(8.0);

                // Temperature
                let mut temperature = client.temperature();
                if ui
                    .add(
                        egui::Slider::new(&mut temperature, TEMPERATURE_MIN..=TEMPERATURE_MAX)
                            .step_by(0.1)
                            .text("Temperature"),
                    )
                    .changed()
                {
                    client.set_temperature(temperature);
                }

                // Input area
                ui.horizontal(|ui| {
                    let input_id = input_id();

                    // Enter sends. consume_key ignores Shift, so check it
                    // first and let Shift+Enter reach the TextEdit as a newline.
                    let enter_pressed = ui.memory(|m| m.has_focus(input_id))
                        && ui.input_mut(|i| {
                            !i.modifiers.shift && i.consume_key(Modifiers::NONE, Key::Enter)
                        });

                    let input = egui::TextEdit::multiline(&mut state.input_text)
                        .id(input_id)
                        .hint_text("Type a message...")
                        .desired_rows(2)
                        .desired_width(ui.available_width() - 70.0)
                        .font(FontId::proportional(14.0));
                    let response = ui.add(input);

                    if response.gained_focus() {
                        action = Some(ChatAction::InputFocused);
                    }

                    let can_send = client.is_ready() && !client.is_loading();
                    let send_enabled = can_send && !state.input_text.trim().is_empty();
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(RichText::new("Send").color(TEXT_PRIMARY))
                            .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );

                    if (enter_pressed && can_send) || send_btn.clicked() {
                        action = Some(ChatAction::Submit);
                        response.request_focus();
                    }
                });
            });
        });

    action
}

fn render_row(ui: &mut egui::Ui, row: &MessageRow<'_>) {
    let layout = if row.is_user() {
        Layout::right_to_left(Align::Min)
    } else {
        Layout::left_to_right(Align::Min)
    };
    let bubble = if row.is_user() { USER_BUBBLE } else { ASSISTANT_BUBBLE };

    ui.with_layout(layout, |ui| {
        render_avatar(ui, row);

        egui::Frame::default()
            .fill(bubble)
            .corner_radius(BUBBLE_ROUNDING)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_max_width(ui.available_width() * 0.75);
                ui.vertical(|ui| {
                    for line in &row.lines {
                        ui.label(RichText::new(*line).color(TEXT_PRIMARY));
                    }
                    ui.label(RichText::new(row.timestamp).color(TEXT_SECONDARY).small());
                });
            });
    });
}

fn render_avatar(ui: &mut egui::Ui, row: &MessageRow<'_>) {
    let (rect, response) = ui.allocate_exact_size(Vec2::splat(AVATAR_SIZE), Sense::hover());
    let fill = if row.is_user() { USER_BUBBLE } else { ACCENT };
    let painter = ui.painter();
    painter.circle_filled(rect.center(), AVATAR_SIZE / 2.0, fill);
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        &row.avatar.glyph,
        FontId::proportional(16.0),
        TEXT_PRIMARY,
    );
    response.on_hover_text(row.avatar.label.as_str());
}
