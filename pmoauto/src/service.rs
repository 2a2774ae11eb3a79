//! AutoService : session média exposée à l'unité de tête
//!
//! The service owns nothing global. The library index, the event sink, the
//! browse notifier and the session publisher are all injected, and several
//! services can live side by side (one per test, for instance).

use crate::artwork::{self, ArtworkFetched, ArtworkLoader, ArtworkOptions};
use crate::config_ext::AutoConfigExt;
use crate::error::Result;
use crate::events::{
    BrowseNotifier, Button, ButtonPressed, EventSink, MediaSelected, SearchRequested,
};
use crate::player::{NowPlaying, PlaybackSnapshot, PlayerState, SessionPublisher};
use parking_lot::Mutex;
use pmoconfig::Config;
use pmomedialib::{Category, LibraryIndex, LibraryStats, MediaLibConfigExt, MediaNode, ROOT_ID};
use std::sync::{Arc, Weak};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Default)]
struct Session {
    active: bool,
    player: PlayerState,
    // Image de `player.artwork_url`, une fois chargée
    artwork: Option<Arc<[u8]>>,
}

impl Session {
    fn now_playing(&self) -> NowPlaying {
        NowPlaying::from_state(&self.player, self.artwork.clone())
    }

    /// Ce qu'il faut publier, construit sous le verrou
    fn publication(&self) -> Publication {
        Publication {
            metadata: self.now_playing(),
            playback: PlaybackSnapshot::from_state(&self.player),
        }
    }
}

struct Publication {
    metadata: NowPlaying,
    playback: PlaybackSnapshot,
}

/// Media browser session for the car head unit.
pub struct AutoService {
    index: Arc<LibraryIndex>,
    sink: Arc<dyn EventSink>,
    notifier: Arc<dyn BrowseNotifier>,
    publisher: Arc<dyn SessionPublisher>,
    loader: Option<Arc<dyn ArtworkLoader>>,
    artwork_options: ArtworkOptions,
    artwork_tx: mpsc::UnboundedSender<ArtworkFetched>,
    artwork_rx: Mutex<Option<mpsc::UnboundedReceiver<ArtworkFetched>>>,
    session: Mutex<Session>,
}

impl AutoService {
    pub fn new(
        index: Arc<LibraryIndex>,
        sink: Arc<dyn EventSink>,
        notifier: Arc<dyn BrowseNotifier>,
        publisher: Arc<dyn SessionPublisher>,
    ) -> Self {
        let (artwork_tx, artwork_rx) = mpsc::unbounded_channel();
        Self {
            index,
            sink,
            notifier,
            publisher,
            loader: None,
            artwork_options: ArtworkOptions::default(),
            artwork_tx,
            artwork_rx: Mutex::new(Some(artwork_rx)),
            session: Mutex::new(Session::default()),
        }
    }

    /// Builds a service whose labels and artwork settings come from `config`.
    pub fn from_config(
        config: &Config,
        sink: Arc<dyn EventSink>,
        notifier: Arc<dyn BrowseNotifier>,
        publisher: Arc<dyn SessionPublisher>,
    ) -> Self {
        let index = Arc::new(LibraryIndex::with_labels(config.get_library_labels()));
        Self::new(index, sink, notifier, publisher)
            .with_artwork_options(config.get_artwork_options())
    }

    pub fn with_artwork_loader(mut self, loader: Arc<dyn ArtworkLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    pub fn with_artwork_options(mut self, options: ArtworkOptions) -> Self {
        self.artwork_options = options;
        self
    }

    pub fn index(&self) -> &Arc<LibraryIndex> {
        &self.index
    }

    // ============= Cycle de vie =============

    /// Activates the session and publishes the current player state.
    pub fn start(&self) {
        let publication = {
            let mut session = self.session.lock();
            session.active = true;
            session.publication()
        };
        info!("🚀 Car session started");
        self.publish(publication);
    }

    /// Deactivates the session. Player updates are still recorded but no
    /// longer published.
    pub fn stop(&self) {
        self.session.lock().active = false;
        info!("🛑 Car session stopped");
    }

    pub fn is_active(&self) -> bool {
        self.session.lock().active
    }

    // ============= Bibliothèque =============

    /// Replaces the library and tells connected browsers to reload the root
    /// and the four categories. Nothing is notified when the document is
    /// rejected.
    pub fn set_media_library(&self, json: &str) -> Result<LibraryStats> {
        let stats = self.index.replace_library(json)?;

        self.notifier.children_changed(ROOT_ID);
        for category in Category::ALL {
            self.notifier.children_changed(category.root_id());
        }
        Ok(stats)
    }

    pub fn browse_root(&self) -> &'static str {
        self.index.root_id()
    }

    pub fn load_children(&self, parent_id: &str) -> Vec<MediaNode> {
        self.index.list_children(parent_id)
    }

    pub fn search(&self, query: &str) -> Vec<MediaNode> {
        self.index.search(query)
    }

    // ============= Événements =============

    /// Forwards a selection to the application. Playback is never started
    /// here, shuffle ids included.
    pub async fn play_from_media_id(&self, media_id: &str) {
        match self.index.find_playable(media_id) {
            Some(node) => info!(media_id = %media_id, title = %node.title, "🎵 Play from media id"),
            None => warn!(media_id = %media_id, "⚠️ Play from unknown media id"),
        }
        self.sink.on_media_selected(MediaSelected::new(media_id)).await;
    }

    pub async fn play_from_search(&self, query: &str) {
        info!(query = %query, "🔍 Play from search");
        self.sink
            .on_search_requested(SearchRequested::new(query))
            .await;
    }

    pub async fn press(&self, button: Button) {
        info!(button = %button, "🎯 Button pressed");
        self.sink.on_button_pressed(ButtonPressed::new(button)).await;
    }

    /// Transport controls of the media session.
    pub fn transport(&self) -> Transport<'_> {
        Transport { service: self }
    }

    // ============= Lecteur =============

    pub fn player_state(&self) -> PlayerState {
        self.session.lock().player.clone()
    }

    /// Records the application's player state and publishes it while the
    /// session is active. A new artwork url starts a fetch.
    pub fn update_player_state(&self, state: PlayerState) {
        debug!(
            title = %state.title,
            artist = %state.artist,
            playing = state.is_playing,
            "🔄 Player state update"
        );

        let (publication, fetch_url) = {
            let mut session = self.session.lock();
            let artwork_changed = session.player.artwork_url != state.artwork_url;
            if artwork_changed {
                session.artwork = None;
            }
            session.player = state;

            let publication = session.active.then(|| session.publication());
            let fetch_url = if artwork_changed {
                session.player.artwork().map(str::to_string)
            } else {
                None
            };
            (publication, fetch_url)
        };

        match publication {
            Some(publication) => self.publish(publication),
            None => debug!("⏸️ Session inactive, state not published"),
        }

        if let Some(url) = fetch_url {
            self.spawn_artwork_fetch(url);
        }
    }

    /// Same as [`update_player_state`](Self::update_player_state) from the
    /// application's JSON payload.
    pub fn update_player_state_json(&self, json: &str) -> Result<()> {
        self.update_player_state(PlayerState::from_json(json)?);
        Ok(())
    }

    // ============= Pochettes =============

    /// Applies a completed artwork fetch.
    ///
    /// Returns `false` when the fetch is stale, i.e. the player moved to
    /// another artwork url in the meantime.
    pub fn handle_artwork(&self, event: ArtworkFetched) -> bool {
        let metadata = {
            let mut session = self.session.lock();
            if session.player.artwork() != Some(event.url.as_str()) {
                debug!(url = %event.url, "🗑️ Stale artwork dropped");
                return false;
            }

            session.artwork = Some(event.image);
            session.active.then(|| session.now_playing())
        };

        if let Some(metadata) = metadata {
            self.publisher.publish_metadata(&metadata);
        }
        true
    }

    /// Takes the receiving end of the artwork completion channel, for
    /// callers that drive [`handle_artwork`](Self::handle_artwork) themselves.
    ///
    /// Artwork is only fetched once the channel has been taken, here or by
    /// [`spawn_artwork_listener`](Self::spawn_artwork_listener).
    pub fn take_artwork_events(&self) -> Option<mpsc::UnboundedReceiver<ArtworkFetched>> {
        self.artwork_rx.lock().take()
    }

    /// Spawns the task applying artwork completions. The task ends when the
    /// service is dropped. Returns `None` if the channel was already taken.
    pub fn spawn_artwork_listener(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        let mut events = self.take_artwork_events()?;
        let service: Weak<Self> = Arc::downgrade(self);

        Some(tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let Some(service) = service.upgrade() else {
                    break;
                };
                service.handle_artwork(event);
            }
            debug!("Artwork listener finished");
        }))
    }

    fn spawn_artwork_fetch(&self, url: String) {
        let Some(loader) = self.loader.clone() else {
            return;
        };
        if !self.artwork_options.enabled {
            return;
        }
        // Personne n'écoute encore les résultats
        if self.artwork_rx.lock().is_some() {
            debug!(url = %url, "Artwork listener not started, fetch skipped");
            return;
        }
        let Ok(runtime) = Handle::try_current() else {
            warn!(url = %url, "⚠️ No tokio runtime, artwork not fetched");
            return;
        };

        let timeout = self.artwork_options.timeout;
        let tx = self.artwork_tx.clone();
        runtime.spawn(async move {
            match artwork::fetch(loader.as_ref(), &url, timeout).await {
                Ok(event) => {
                    let _ = tx.send(event);
                }
                Err(err) => warn!(url = %url, error = %err, "❌ Artwork fetch failed"),
            }
        });
    }

    fn publish(&self, publication: Publication) {
        self.publisher.publish_metadata(&publication.metadata);
        self.publisher.publish_playback(&publication.playback);
    }
}

/// Transport callbacks, each forwarded to the application as a button event.
pub struct Transport<'a> {
    service: &'a AutoService,
}

impl Transport<'_> {
    pub async fn play(&self) {
        self.service.press(Button::Play).await
    }

    pub async fn pause(&self) {
        self.service.press(Button::Pause).await
    }

    pub async fn skip_to_next(&self) {
        self.service.press(Button::Next).await
    }

    pub async fn skip_to_previous(&self) {
        self.service.press(Button::Previous).await
    }

    pub async fn stop(&self) {
        self.service.press(Button::Stop).await
    }
}
