#[cfg(test)]
mod tests {
    use crate::render::*;
    use crate::state::*;
    use crate::theme::*;
    use crate::panels::chat::{chat_panel, input_id, ChatAction};
    use chat_core::client::ConversationClient;
    use chat_types::config::ClientConfig;
    use chat_types::event::ClientEvent;
    use egui::{Event, Key, Modifiers};
    use chat_types::config::{AvatarConfig, ChatConfig};
    use chat_types::message::{Message, Role};
    use chat_types::status::HealthStatus;

    // ─── Row Rendering Tests ─────────────────────────────────

    #[test]
    fn test_newlines_become_line_breaks() {
        let avatars = AvatarConfig::default();
        let msg = Message::new(Role::Assistant, "Hi\nThere", "10:00:00");
        let row = MessageRow::new(&msg, &avatars);

        assert_eq!(row.lines, vec!["Hi", "There"]);
        assert!(row.lines.iter().all(|l| !l.contains('\n')));
    }

    #[test]
    fn test_no_other_transformation() {
        let lines = content_lines("<b>bold</b> & \"quoted\"");
        assert_eq!(lines, vec!["<b>bold</b> & \"quoted\""]);

        // Literal <br> in stored text stays as typed
        assert_eq!(content_lines("a<br>b"), vec!["a<br>b"]);
    }

    #[test]
    fn test_blank_lines_kept() {
        assert_eq!(content_lines("a\n\nb"), vec!["a", "", "b"]);
        assert_eq!(content_lines("trailing\n"), vec!["trailing", ""]);
        assert_eq!(content_lines(""), vec![""]);
    }

    #[test]
    fn test_row_tag_and_avatar_by_role() {
        let avatars = AvatarConfig::default();
        let user = Message::new(Role::User, "q", "t1");
        let bot = Message::new(Role::Assistant, "a", "t2");

        let user_row = MessageRow::new(&user, &avatars);
        assert_eq!(user_row.tag, "user");
        assert!(user_row.is_user());
        assert_eq!(user_row.avatar, &avatars.user);
        assert_eq!(user_row.timestamp, "t1");

        let bot_row = MessageRow::new(&bot, &avatars);
        assert_eq!(bot_row.tag, "assistant");
        assert!(!bot_row.is_user());
        assert_eq!(bot_row.avatar, &avatars.assistant);
    }

    #[test]
    fn test_rows_match_messages_one_to_one() {
        let avatars = AvatarConfig::default();
        let messages = vec![
            Message::new(Role::User, "1", ""),
            Message::new(Role::Assistant, "2", ""),
            Message::new(Role::User, "3", ""),
        ];
        let rows = rows(&messages, &avatars);
        assert_eq!(rows.len(), messages.len());
        for (row, msg) in rows.iter().zip(&messages) {
            assert_eq!(row.role, msg.role);
            assert_eq!(row.lines, vec![msg.content.as_str()]);
        }
    }

    // ─── UiState Tests ───────────────────────────────────────

    #[test]
    fn test_ui_state_initial() {
        let state = UiState::default();
        assert!(state.input_text.is_empty());
        assert!(!state.show_settings);
        assert!(state.save_feedback.is_none());
        assert_eq!(state.settings_draft, ChatConfig::default());
        assert!(!state.take_scroll());
    }

    #[test]
    fn test_append_requests_scroll_once() {
        let mut state = UiState::default();
        state.sync_rows(1);
        assert!(state.take_scroll());
        assert!(!state.take_scroll());

        // Same count next frame: no new request
        state.sync_rows(1);
        assert!(!state.take_scroll());

        state.sync_rows(2);
        assert!(state.take_scroll());
    }

    #[test]
    fn test_clear_requests_scroll() {
        let mut state = UiState::default();
        state.sync_rows(4);
        let _ = state.take_scroll();
        state.sync_rows(1);
        assert!(state.take_scroll());
    }

    #[test]
    fn test_scroll_handle_shared() {
        let state = UiState::default();
        let handle = state.scroll_handle();
        handle.set(true);
        assert!(state.take_scroll());
        assert!(!handle.get());
    }

    // ─── Theme Tests ─────────────────────────────────────────

    #[test]
    fn test_status_colors() {
        assert_eq!(status_color(HealthStatus::Online), egui::Color32::from_rgb(0x4C, 0xAF, 0x50));
        assert_eq!(status_color(HealthStatus::Offline), egui::Color32::from_rgb(0xff, 0x6b, 0x6b));
        assert_ne!(status_color(HealthStatus::Online), status_color(HealthStatus::Unknown));
    }

    // ─── Chat Panel Keyboard Tests ───────────────────────────

    fn ready_client() -> ConversationClient {
        let mut client = ConversationClient::new(ClientConfig::default());
        client.apply(ClientEvent::ConversationLoaded { record: None });
        client
    }

    fn enter(modifiers: Modifiers) -> Event {
        Event::Key {
            key: Key::Enter,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers,
        }
    }

    /// Render one frame of the chat panel on a headless context
    fn frame(
        ctx: &egui::Context,
        state: &mut UiState,
        client: &mut ConversationClient,
        events: Vec<Event>,
        modifiers: Modifiers,
    ) -> Option<ChatAction> {
        let avatars = AvatarConfig::default();
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(800.0, 600.0),
            )),
            modifiers,
            events,
            ..Default::default()
        };
        let mut action = None;
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                action = chat_panel(ui, state, client, &avatars);
            });
        });
        action
    }

    /// Render until the message input holds keyboard focus
    fn focus_input(ctx: &egui::Context, state: &mut UiState, client: &mut ConversationClient) {
        frame(ctx, state, client, Vec::new(), Modifiers::NONE);
        ctx.memory_mut(|m| m.request_focus(input_id()));
        frame(ctx, state, client, Vec::new(), Modifiers::NONE);
        assert!(ctx.memory(|m| m.has_focus(input_id())));
    }

    #[test]
    fn test_enter_submits() {
        let ctx = egui::Context::default();
        let mut state = UiState::default();
        let mut client = ready_client();
        focus_input(&ctx, &mut state, &mut client);

        state.input_text = "hello".to_string();
        let action = frame(
            &ctx,
            &mut state,
            &mut client,
            vec![enter(Modifiers::NONE)],
            Modifiers::NONE,
        );
        assert_eq!(action, Some(ChatAction::Submit));
        assert!(!state.input_text.contains('\n'));
    }

    #[test]
    fn test_shift_enter_inserts_newline() {
        let ctx = egui::Context::default();
        let mut state = UiState::default();
        let mut client = ready_client();
        focus_input(&ctx, &mut state, &mut client);

        state.input_text = "line one".to_string();
        let action = frame(
            &ctx,
            &mut state,
            &mut client,
            vec![enter(Modifiers::SHIFT)],
            Modifiers::SHIFT,
        );
        assert_ne!(action, Some(ChatAction::Submit));
        assert!(state.input_text.starts_with("line one"));
        assert!(state.input_text.contains('\n'));
    }

    #[test]
    fn test_enter_before_history_loaded_does_not_submit() {
        let ctx = egui::Context::default();
        let mut state = UiState::default();
        let mut client = ConversationClient::new(ClientConfig::default());
        focus_input(&ctx, &mut state, &mut client);

        state.input_text = "early".to_string();
        let action = frame(
            &ctx,
            &mut state,
            &mut client,
            vec![enter(Modifiers::NONE)],
            Modifiers::NONE,
        );
        assert_ne!(action, Some(ChatAction::Submit));
    }
}
