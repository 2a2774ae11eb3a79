//! État du lecteur et publication vers la session média
//!
//! The application owns the real player. It pushes a [`PlayerState`] after
//! every change and the service mirrors it into now-playing metadata and a
//! playback snapshot for the head unit.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Player state pushed by the application.
///
/// Missing JSON fields take their default value. `duration` and `position`
/// are accepted as aliases of the millisecond fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerState {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub artwork_url: String,
    pub is_playing: bool,
    #[serde(alias = "duration")]
    pub duration_ms: u64,
    #[serde(alias = "position")]
    pub position_ms: u64,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            title: "Unknown".to_string(),
            artist: "Unknown".to_string(),
            album: String::new(),
            artwork_url: String::new(),
            is_playing: false,
            duration_ms: 0,
            position_ms: 0,
        }
    }
}

impl PlayerState {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn playback_state(&self) -> PlaybackState {
        if self.is_playing {
            PlaybackState::Playing
        } else {
            PlaybackState::Paused
        }
    }

    /// Artwork url, `None` when empty.
    pub fn artwork(&self) -> Option<&str> {
        Some(self.artwork_url.as_str()).filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    Playing,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PlaybackAction {
    Play,
    Pause,
    PlayPause,
    SkipToNext,
    SkipToPrevious,
    Stop,
}

/// Actions advertised to the head unit with every playback snapshot.
pub const SUPPORTED_ACTIONS: [PlaybackAction; 6] = [
    PlaybackAction::Play,
    PlaybackAction::Pause,
    PlaybackAction::PlayPause,
    PlaybackAction::SkipToNext,
    PlaybackAction::SkipToPrevious,
    PlaybackAction::Stop,
];

/// Now-playing metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub duration_ms: u64,
    pub artwork_url: Option<String>,
    /// Image bytes, once fetched for `artwork_url`.
    pub artwork: Option<Arc<[u8]>>,
}

impl NowPlaying {
    pub fn from_state(state: &PlayerState, artwork: Option<Arc<[u8]>>) -> Self {
        Self {
            title: state.title.clone(),
            artist: state.artist.clone(),
            album: state.album.clone(),
            duration_ms: state.duration_ms,
            artwork_url: state.artwork().map(str::to_string),
            artwork,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackSnapshot {
    pub state: PlaybackState,
    pub position_ms: u64,
    pub speed: f32,
    pub actions: Vec<PlaybackAction>,
}

impl PlaybackSnapshot {
    pub fn from_state(state: &PlayerState) -> Self {
        Self {
            state: state.playback_state(),
            position_ms: state.position_ms,
            speed: 1.0,
            actions: SUPPORTED_ACTIONS.to_vec(),
        }
    }
}

/// Media session seen by the head unit.
///
/// Callbacks run after the session lock is released and may query the
/// service, e.g. [`AutoService::player_state`](crate::AutoService::player_state).
pub trait SessionPublisher: Send + Sync {
    fn publish_metadata(&self, now_playing: &NowPlaying);

    fn publish_playback(&self, playback: &PlaybackSnapshot);
}
