//=========================================================================
// Media Session
//=========================================================================
//
// The single shared playback resource and its observable state.
//
// Architecture:
// ```text
//   MediaControl A ─┐                          ┌─► Sender ──► Subscription A
//   MediaControl B ─┼─► SessionHandle ─notify()┼─► Sender ──► Subscription B
//                   │        │                 └─► ...
//                   │        └─► Box<dyn PlaybackBackend>
// ```
//
// State machine: Ready ⇄ Playing. The session fields are the source of
// truth; controls learn about changes through `PlaybackEvent`s instead
// of keeping their own copies. Everything runs on the UI thread, so
// interior mutability is plain `Cell`/`RefCell`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::{Cell, RefCell};
use std::ops::Deref;
use std::rc::Rc;

use crossbeam_channel::{bounded, Receiver, Sender, TryIter, TrySendError};
use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use super::backend::PlaybackBackend;
use crate::core::assets::{BasePath, SOUNDTRACK_ASSET};

//=== MediaSettings =======================================================

/// Default volume of the background track.
pub const DEFAULT_VOLUME: f32 = 0.3;

/// Construction parameters for a session.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaSettings {
    /// Resolved path of the audio resource.
    pub source: String,

    /// Initial volume in `[0, 1]`.
    pub volume: f32,

    pub looping: bool,
}

impl MediaSettings {
    /// Settings for `source` with loop on and volume 0.3.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            volume: DEFAULT_VOLUME,
            looping: true,
        }
    }

    /// Settings for the bundled soundtrack under `base`.
    pub fn soundtrack(base: &BasePath) -> Self {
        Self::new(base.resolve(SOUNDTRACK_ASSET))
    }

    /// # Panics
    ///
    /// Panics if `volume` is outside `[0, 1]`.
    pub fn with_volume(mut self, volume: f32) -> Self {
        assert!(
            (0.0..=1.0).contains(&volume),
            "Volume must be within [0, 1], got {}",
            volume
        );
        self.volume = volume;
        self
    }

    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self::soundtrack(&BasePath::root())
    }
}

/// Notifications queued per subscriber before new ones are dropped.
pub const SUBSCRIPTION_CAPACITY: usize = 16;

//=== SessionState ========================================================

/// Playback state of a live session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Ready,
    Playing,
}

//=== PlaybackEvent =======================================================

/// State-change notification delivered to every subscriber.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackEvent {
    Played,
    Paused,
    VolumeChanged(f32),
    MutedChanged(bool),
}

//=== PlaybackSubscription ================================================

/// Receiving end of a session's notifications.
///
/// Dropping it unsubscribes; the session prunes the dead sender on its
/// next notification.
#[derive(Debug)]
pub struct PlaybackSubscription {
    receiver: Receiver<PlaybackEvent>,
}

impl PlaybackSubscription {
    /// Drains every notification received so far, without blocking.
    pub fn try_iter(&self) -> TryIter<'_, PlaybackEvent> {
        self.receiver.try_iter()
    }

    /// Number of notifications waiting.
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }
}

//=== MediaSession ========================================================

/// Shared playback state wrapped around one backend.
pub struct MediaSession {
    backend: RefCell<Box<dyn PlaybackBackend>>,
    source: String,
    looping: bool,
    state: Cell<SessionState>,
    volume: Cell<f32>,
    muted: Cell<bool>,
    released: Cell<bool>,
    subscribers: RefCell<Vec<Sender<PlaybackEvent>>>,
}

impl MediaSession {
    /// Wraps `backend` and applies `settings` to it.
    pub fn new(settings: &MediaSettings, mut backend: Box<dyn PlaybackBackend>) -> Self {
        backend.set_looping(settings.looping);
        backend.set_volume(settings.volume);
        backend.set_muted(false);

        Self {
            backend: RefCell::new(backend),
            source: settings.source.clone(),
            looping: settings.looping,
            state: Cell::new(SessionState::Ready),
            volume: Cell::new(settings.volume),
            muted: Cell::new(false),
            released: Cell::new(false),
            subscribers: RefCell::new(Vec::new()),
        }
    }

    //--- Playback ---------------------------------------------------------

    /// Requests playback.
    ///
    /// Fire-and-forget: a refusal from the backend (autoplay policy,
    /// missing resource) is logged and leaves the session `Ready`. A
    /// released session never reaches the backend.
    pub fn play(&self) {
        if self.is_playing() {
            return;
        }
        if self.is_released() {
            warn!(target: "media", "Play ignored, session released: {}", self.source);
            return;
        }

        let result = self.backend.borrow_mut().play();
        match result {
            Ok(()) => {
                debug!(target: "media", "Playback started: {}", self.source);
                self.state.set(SessionState::Playing);
                self.notify(PlaybackEvent::Played);
            }
            Err(e) => {
                warn!(target: "media", "Playback start rejected: {}", e);
            }
        }
    }

    pub fn pause(&self) {
        self.backend.borrow_mut().pause();
        if self.state.replace(SessionState::Ready) == SessionState::Playing {
            debug!(target: "media", "Playback paused");
            self.notify(PlaybackEvent::Paused);
        }
    }

    /// Plays when paused, pauses when playing.
    pub fn toggle(&self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    //--- Shared Fields ----------------------------------------------------

    /// Sets the volume, clamped to `[0, 1]`. Last write wins.
    pub fn set_volume(&self, volume: f32) {
        if volume.is_nan() {
            warn!(target: "media", "Ignoring NaN volume");
            return;
        }
        if self.is_released() {
            warn!(target: "media", "Volume change ignored, session released");
            return;
        }
        let volume = volume.clamp(0.0, 1.0);
        self.backend.borrow_mut().set_volume(volume);
        self.volume.set(volume);
        self.notify(PlaybackEvent::VolumeChanged(volume));
    }

    pub fn set_muted(&self, muted: bool) {
        if self.is_released() {
            warn!(target: "media", "Mute change ignored, session released");
            return;
        }
        self.backend.borrow_mut().set_muted(muted);
        if self.muted.replace(muted) != muted {
            self.notify(PlaybackEvent::MutedChanged(muted));
        }
    }

    pub fn toggle_muted(&self) {
        self.set_muted(!self.is_muted());
    }

    //--- Observation ------------------------------------------------------

    /// Registers for state-change notifications.
    ///
    /// At most [`SUBSCRIPTION_CAPACITY`] notifications are queued per
    /// subscriber; later ones are dropped until it drains. Subscribers
    /// that fall behind should resync from the session's queries.
    pub fn subscribe(&self) -> PlaybackSubscription {
        let (sender, receiver) = bounded(SUBSCRIPTION_CAPACITY);
        self.subscribers.borrow_mut().push(sender);
        PlaybackSubscription { receiver }
    }

    /// Number of live subscribers (as of the last notification).
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    fn notify(&self, event: PlaybackEvent) {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|sender| match sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                trace!(target: "media", "Subscriber queue full, dropping {:?}", event);
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        });
        let dropped = before - subscribers.len();
        if dropped > 0 {
            trace!(target: "media", "Pruned {} closed subscriptions", dropped);
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn state(&self) -> SessionState {
        self.state.get()
    }

    pub fn is_playing(&self) -> bool {
        self.state.get() == SessionState::Playing
    }

    pub fn volume(&self) -> f32 {
        self.volume.get()
    }

    pub fn is_muted(&self) -> bool {
        self.muted.get()
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// `true` once the manager has cleaned this session up.
    pub fn is_released(&self) -> bool {
        self.released.get()
    }

    //--- Teardown ---------------------------------------------------------

    /// Stops playback, frees the backend and closes every subscription.
    pub(crate) fn release(&self) {
        if self.released.replace(true) {
            return;
        }
        self.pause();
        self.backend.borrow_mut().release();
        self.subscribers.borrow_mut().clear();
        info!(target: "media", "Media session released: {}", self.source);
    }
}

//=== SessionHandle =======================================================

/// Shared reference to the page's media session.
#[derive(Clone)]
pub struct SessionHandle(Rc<MediaSession>);

impl SessionHandle {
    pub fn new(session: MediaSession) -> Self {
        Self(Rc::new(session))
    }

    /// `true` if both handles refer to the same session.
    pub fn ptr_eq(a: &SessionHandle, b: &SessionHandle) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl Deref for SessionHandle {
    type Target = MediaSession;

    fn deref(&self) -> &MediaSession {
        &self.0
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("source", &self.source)
            .field("state", &self.state())
            .field("volume", &self.volume())
            .field("muted", &self.is_muted())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
