use serde::{Deserialize, Serialize};

/// Reachability of the chat service as shown in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HealthStatus {
    /// The startup probe has not settled yet
    #[default]
    Unknown,
    Online,
    Offline,
}

impl HealthStatus {
    pub fn from_probe(online: bool) -> Self {
        if online {
            HealthStatus::Online
        } else {
            HealthStatus::Offline
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Unknown => "Connecting...",
            HealthStatus::Online => "Online",
            HealthStatus::Offline => "Offline",
        }
    }

    /// CSS-style hex color for the indicator
    pub fn color_hex(&self) -> &'static str {
        match self {
            HealthStatus::Unknown => "#a1a1aa",
            HealthStatus::Online => "#4CAF50",
            HealthStatus::Offline => "#ff6b6b",
        }
    }

    /// The indicator color as an `(r, g, b)` triple
    pub fn color_rgb(&self) -> (u8, u8, u8) {
        parse_hex(self.color_hex())
    }
}

fn parse_hex(hex: &str) -> (u8, u8, u8) {
    let hex = hex.trim_start_matches('#');
    let channel = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|c| u8::from_str_radix(c, 16).ok())
            .unwrap_or(0)
    };
    (channel(0), channel(2), channel(4))
}
