//! # PMOAuto
//!
//! Car media browser session built on [`pmomedialib`].
//!
//! The application pushes its library as JSON and its player state after
//! every change. The head unit browses and searches the library, and every
//! action it takes (button, selection, voice search) comes back to the
//! application as an event. Playback itself always stays in the application.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pmoauto::{AutoService, logs::init_logging};
//! use pmoconfig::get_config;
//!
//! let config = get_config();
//! let _logs = init_logging(&config)?;
//!
//! let service = Arc::new(
//!     AutoService::from_config(&config, sink, notifier, publisher)
//!         .with_artwork_loader(loader),
//! );
//! service.spawn_artwork_listener();
//! service.start();
//!
//! service.set_media_library(&library_json)?;
//! service.update_player_state_json(r#"{"title":"Song A","isPlaying":true}"#)?;
//! ```

pub mod artwork;
pub mod config_ext;
pub mod error;
pub mod events;
pub mod logs;
pub mod player;
pub mod service;

pub use artwork::{ArtworkFetched, ArtworkLoader, ArtworkOptions};
pub use config_ext::AutoConfigExt;
pub use error::{AutoError, Result};
pub use events::{
    BrowseNotifier, Button, ButtonPressed, EventSink, MediaSelected, SearchRequested,
};
pub use player::{
    NowPlaying, PlaybackAction, PlaybackSnapshot, PlaybackState, PlayerState, SessionPublisher,
    SUPPORTED_ACTIONS,
};
pub use service::{AutoService, Transport};

pub use async_trait::async_trait;
