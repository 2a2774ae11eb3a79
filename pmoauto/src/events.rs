//! Événements remontés vers l'application
//!
//! The head unit never starts playback itself. Every user action is turned
//! into an event and handed to the [`EventSink`] supplied by the application,
//! which decides what to play.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transport button pressed on the head unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    Play,
    Pause,
    Next,
    Previous,
    Stop,
}

impl Button {
    pub fn as_str(&self) -> &'static str {
        match self {
            Button::Play => "play",
            Button::Pause => "pause",
            Button::Next => "next",
            Button::Previous => "previous",
            Button::Stop => "stop",
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Milliseconds since the Unix epoch, UTC.
pub(crate) fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonPressed {
    pub button: Button,
    pub timestamp: i64,
}

impl ButtonPressed {
    pub fn new(button: Button) -> Self {
        Self {
            button,
            timestamp: now_ms(),
        }
    }
}

/// A media id chosen in the browse tree. Shuffle ids are forwarded as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaSelected {
    pub media_id: String,
    pub timestamp: i64,
}

impl MediaSelected {
    pub fn new(media_id: impl Into<String>) -> Self {
        Self {
            media_id: media_id.into(),
            timestamp: now_ms(),
        }
    }
}

/// A voice or keyboard "play from search" request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequested {
    pub query: String,
    pub timestamp: i64,
}

impl SearchRequested {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            timestamp: now_ms(),
        }
    }
}

/// Receiver of head-unit events, implemented by the application.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn on_button_pressed(&self, event: ButtonPressed);

    async fn on_media_selected(&self, event: MediaSelected);

    async fn on_search_requested(&self, event: SearchRequested);
}

/// Told when the children of a browse node may have changed, so connected
/// browsers can reload them.
pub trait BrowseNotifier: Send + Sync {
    fn children_changed(&self, parent_id: &str);
}
