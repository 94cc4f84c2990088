//! Main egui application. Owns the conversation and runs its tasks.
//!
//! All conversation state lives in one `ConversationClient` owned here.
//! Network and storage work is spawned with `spawn_local`; tasks report
//! back through the inbox, which is drained at the top of every frame.

use std::future::Future;
use std::rc::Rc;

use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};
use gloo_timers::future::TimeoutFuture;

use chat_core::client::{ConversationClient, StorageEffect};
use chat_core::config::resolve_config;
use chat_core::event_bus::EventBus;
use chat_core::ports::{ChatPort, StoragePort};
use chat_core::tasks;
use chat_platform::confirm::BrowserConfirm;
use chat_platform::http::HttpChatEndpoint;
use chat_platform::storage::auto_detect_storage;
use chat_types::config::{ChatConfig, CONFIG_STORAGE_KEY};
use chat_types::event::ClientEvent;
use chat_ui::panels::chat::{self, ChatAction};
use chat_ui::panels::settings::{self, SettingsAction};
use chat_ui::state::{SaveFeedback, UiState};
use chat_ui::theme;

const CJK_FONT_URL: &str = "NotoSansSC-Regular.otf";
const FOCUS_SCROLL_DELAY_MS: u32 = 300;

pub struct ChatApp {
    ui_state: UiState,
    config: ChatConfig,
    inbox: EventBus,
    client: ConversationClient,
    chat: Rc<dyn ChatPort>,
    storage: Rc<dyn StoragePort>,
    first_frame: bool,
}

impl ChatApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = ChatConfig::default();
        let inbox = EventBus::new();
        let storage = auto_detect_storage();
        let chat: Rc<dyn ChatPort> = Rc::new(HttpChatEndpoint::new(config.endpoints.clone()));

        let app = Self {
            ui_state: UiState::new(config.clone()),
            client: ConversationClient::new(config.client.clone()),
            config,
            inbox,
            chat,
            storage,
            first_frame: true,
        };

        // Conversation load and health check wait for the stored config
        let storage = app.storage.clone();
        let inbox = app.inbox.clone();
        spawn(&cc.egui_ctx, async move {
            tasks::run_load_config(storage.as_ref(), CONFIG_STORAGE_KEY, &inbox).await;
        });

        app
    }

    fn handle_event(&mut self, event: ClientEvent, ctx: &egui::Context) {
        match event {
            ClientEvent::ConfigLoaded { record } => self.apply_config(record, ctx),
            ClientEvent::Persisted { key, success } if key == CONFIG_STORAGE_KEY => {
                self.ui_state.save_feedback = Some(if success {
                    SaveFeedback {
                        message: "Saved".to_string(),
                        success: true,
                    }
                } else {
                    SaveFeedback {
                        message: "Save failed".to_string(),
                        success: false,
                    }
                });
            }
            other => {
                if let Some(effect) = self.client.apply(other) {
                    self.persist(effect, ctx);
                }
            }
        }
    }

    /// Adopt the stored config (or keep defaults), then run the startup
    /// conversation load and health check against it.
    fn apply_config(&mut self, record: Option<String>, ctx: &egui::Context) {
        self.config = resolve_config(record.as_deref(), &self.config);
        self.client.reconfigure(self.config.client.clone());
        self.ui_state.settings_draft = self.config.clone();
        self.rebuild_chat();

        let storage = self.storage.clone();
        let inbox = self.inbox.clone();
        let key = self.config.client.storage_key.clone();
        spawn(ctx, async move {
            tasks::run_load_conversation(storage.as_ref(), &key, &inbox).await;
        });

        let chat = self.chat.clone();
        let inbox = self.inbox.clone();
        spawn(ctx, async move {
            tasks::run_health_check(chat.as_ref(), &inbox).await;
        });
    }

    fn rebuild_chat(&mut self) {
        self.chat = Rc::new(HttpChatEndpoint::new(self.config.endpoints.clone()));
    }

    fn persist(&self, effect: StorageEffect, ctx: &egui::Context) {
        let storage = self.storage.clone();
        let inbox = self.inbox.clone();
        spawn(ctx, async move {
            tasks::run_storage_effect(storage.as_ref(), effect, &inbox).await;
        });
    }

    fn dispatch_submit(&mut self, ctx: &egui::Context) {
        let Some(request) = self.client.begin_submit(&mut self.ui_state.input_text) else {
            return;
        };
        let chat = self.chat.clone();
        let inbox = self.inbox.clone();
        spawn(ctx, async move {
            tasks::run_exchange(chat.as_ref(), request, &inbox).await;
        });
    }

    fn clear_conversation(&mut self, ctx: &egui::Context) {
        if let Some(effect) = self.client.clear_conversation(&BrowserConfirm) {
            log::info!("Conversation cleared");
            self.persist(effect, ctx);
        }
    }

    /// Scroll to the newest row once the on-screen keyboard has settled.
    fn schedule_focus_scroll(&self, ctx: &egui::Context) {
        let scroll = self.ui_state.scroll_handle();
        spawn(ctx, async move {
            TimeoutFuture::new(FOCUS_SCROLL_DELAY_MS).await;
            scroll.set(true);
        });
    }

    fn save_settings(&mut self, ctx: &egui::Context) {
        self.config.endpoints = self.ui_state.settings_draft.endpoints.clone();
        self.rebuild_chat();

        match serde_json::to_string(&self.config) {
            Ok(value) => {
                log::info!("Saving config");
                self.persist(
                    StorageEffect::Save {
                        key: CONFIG_STORAGE_KEY.to_string(),
                        value,
                    },
                    ctx,
                );
            }
            Err(e) => {
                log::error!("Failed to serialize config: {}", e);
                self.ui_state.save_feedback = Some(SaveFeedback {
                    message: format!("Save failed: {}", e),
                    success: false,
                });
            }
        }
    }

    /// Fetch CJK font from server and install into egui
    fn load_cjk_font(ctx: egui::Context) {
        wasm_bindgen_futures::spawn_local(async move {
            let window = match web_sys::window() {
                Some(w) => w,
                None => return,
            };
            let resp = match wasm_bindgen_futures::JsFuture::from(
                window.fetch_with_str(CJK_FONT_URL),
            )
            .await
            {
                Ok(r) => r,
                Err(e) => {
                    log::warn!("Failed to fetch CJK font: {:?}", e);
                    return;
                }
            };
            let resp: web_sys::Response = resp.into();
            if !resp.ok() {
                log::warn!("CJK font unavailable: HTTP {}", resp.status());
                return;
            }
            let buf = match resp.array_buffer() {
                Ok(p) => match wasm_bindgen_futures::JsFuture::from(p).await {
                    Ok(b) => b,
                    Err(_) => return,
                },
                Err(_) => return,
            };
            let bytes = js_sys::Uint8Array::new(&buf).to_vec();

            let mut fonts = egui::FontDefinitions::default();
            fonts.font_data.insert(
                "noto_sans_sc".to_owned(),
                egui::FontData::from_owned(bytes).into(),
            );
            fonts
                .families
                .entry(egui::FontFamily::Proportional)
                .or_default()
                .insert(0, "noto_sans_sc".to_owned());

            ctx.set_fonts(fonts);
            ctx.request_repaint();
            log::info!("CJK font loaded");
        });
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            Self::load_cjk_font(ctx.clone());
            self.first_frame = false;
        }

        // Apply task completions
        for event in self.inbox.take_all() {
            self.handle_event(event, ctx);
        }

        if self.client.is_loading() || self.inbox.has_pending() {
            ctx.request_repaint();
        }

        // ── Top bar ──────────────────────────────────────────
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("Kangkang Chat")
                        .strong()
                        .color(theme::ACCENT)
                        .size(16.0),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .selectable_label(self.ui_state.show_settings, "Settings")
                        .clicked()
                    {
                        self.ui_state.show_settings = !self.ui_state.show_settings;
                    }
                });
            });
        });

        // ── Settings side panel ──────────────────────────────
        if self.ui_state.show_settings {
            let mut action = SettingsAction::None;
            SidePanel::right("settings_panel")
                .min_width(260.0)
                .max_width(340.0)
                .show(ctx, |ui| {
                    action = settings::settings_panel(
                        ui,
                        &mut self.ui_state.settings_draft,
                        self.ui_state.save_feedback.as_ref(),
                    );
                });
            match action {
                SettingsAction::SaveClicked => self.save_settings(ctx),
                SettingsAction::Changed => self.ui_state.save_feedback = None,
                SettingsAction::None => {}
            }
        }

        // ── Chat ─────────────────────────────────────────────
        let mut action = None;
        CentralPanel::default().show(ctx, |ui| {
            action = chat::chat_panel(
                ui,
                &mut self.ui_state,
                &mut self.client,
                &self.config.avatars,
            );
        });

        match action {
            Some(ChatAction::Submit) => self.dispatch_submit(ctx),
            Some(ChatAction::Clear) => self.clear_conversation(ctx),
            Some(ChatAction::InputFocused) => self.schedule_focus_scroll(ctx),
            None => {}
        }
    }
}

/// Spawn a task on the browser event loop and repaint when it finishes,
/// so its inbox events are applied promptly.
fn spawn<F>(ctx: &egui::Context, task: F)
where
    F: Future<Output = ()> + 'static,
{
    let ctx = ctx.clone();
    wasm_bindgen_futures::spawn_local(async move {
        task.await;
        ctx.request_repaint();
    });
}
