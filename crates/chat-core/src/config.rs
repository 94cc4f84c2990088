//! Startup config resolution.

use chat_types::config::ChatConfig;

/// Pick the config to run with: the stored record when it parses,
/// otherwise `current` unchanged. A bad record is logged, never fatal.
pub fn resolve_config(record: Option<&str>, current: &ChatConfig) -> ChatConfig {
    let Some(raw) = record else {
        return current.clone();
    };
    match ChatConfig::from_record(raw) {
        Ok(config) => {
            log::info!("Config restored from storage");
            config
        }
        Err(e) => {
            log::error!("Ignoring malformed stored config: {}", e);
            current.clone()
        }
    }
}
