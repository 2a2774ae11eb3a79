//! # pmomedialib - Index de la bibliothèque musicale pour l'affichage embarqué
//!
//! This crate projects the music library pushed by the application (as a
//! single JSON document) into the browse tree a car head unit navigates:
//!
//! - **Root**: four fixed categories, `recent`, `playlists`, `albums`, `artists`
//! - **Entities**: playlists, albums and artists, namespaced as
//!   `playlist_<id>`, `album_<id>` and `artist_<id>` so that raw ids from
//!   different categories never collide
//! - **Shuffle entries**: every entity lists a synthetic playable
//!   `shuffle_<entityId>` node before its tracks
//! - **Search**: case-insensitive substring match on track titles and artists
//!
//! The index is synchronous and performs no I/O. A replace is atomic for
//! concurrent readers; unknown ids resolve to empty listings.
//!
//! # Exemple
//!
//! ```
//! use pmomedialib::LibraryIndex;
//!
//! let index = LibraryIndex::new();
//! index.replace_library(r#"{
//!     "recentTracks": [{"id": "t1", "title": "Bohemian Rhapsody", "artist": "Queen"}]
//! }"#)?;
//!
//! assert_eq!(index.search("queen").len(), 1);
//! assert!(index.list_children("nonexistent").is_empty());
//! # Ok::<(), pmomedialib::LibraryError>(())
//! ```

mod category;
mod error;
mod index;
mod labels;
mod node;
mod parse;
mod search;
mod snapshot;

#[cfg(feature = "pmoconfig")]
mod config_ext;

// Réexports publics
pub use category::{parse_shuffle_id, Category, ROOT_ID, SHUFFLE_PREFIX};
pub use error::{ItemLocation, LibraryError, Result};
pub use index::LibraryIndex;
pub use labels::{LibraryLabels, RootLabel};
pub use node::{ContentStyle, MediaNode, NodeKind, StyleHints, TrackMetadata};
pub use snapshot::{EntityCatalog, LibrarySnapshot, LibraryStats};

#[cfg(feature = "pmoconfig")]
pub use config_ext::MediaLibConfigExt;
