//=========================================================================
// Media Session Manager
//=========================================================================
//
// Owns the lazily-created shared session and its lifecycle.
//
// Lifecycle:
// ```text
//   Unloaded ──get_instance()──► Ready ⇄ Playing
//      ▲                           │
//      └────────── cleanup() ──────┘
// ```
//
// `get_instance` always hands back the same session until `cleanup`
// runs; the next call after that builds a fresh one. The `global`
// submodule exposes one manager per UI thread so every control on the
// page shares a single session.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::backend::{DetachedBackend, PlaybackBackend};
use super::session::{MediaSession, MediaSettings, SessionHandle, SessionState};

//=== MediaLifecycle ======================================================

/// Observable lifecycle of the managed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaLifecycle {
    /// No session exists yet, or it was cleaned up.
    Unloaded,
    Ready,
    Playing,
}

//=== MediaSessionManager =================================================

type BackendFactory = Box<dyn Fn(&MediaSettings) -> Box<dyn PlaybackBackend>>;

/// Lazily creates and tears down the shared media session.
pub struct MediaSessionManager {
    settings: MediaSettings,
    factory: BackendFactory,
    session: Option<SessionHandle>,
    created: u32,
}

impl MediaSessionManager {
    /// Manager that builds backends with `factory` on first access.
    pub fn new<F>(settings: MediaSettings, factory: F) -> Self
    where
        F: Fn(&MediaSettings) -> Box<dyn PlaybackBackend> + 'static,
    {
        Self {
            settings,
            factory: Box::new(factory),
            session: None,
            created: 0,
        }
    }

    /// Manager backed by `DetachedBackend`, for hosts without audio output.
    pub fn detached(settings: MediaSettings) -> Self {
        Self::new(settings, |settings| {
            Box::new(DetachedBackend::new(settings.source.clone()))
        })
    }

    /// Returns the shared session, creating it on first use.
    pub fn get_instance(&mut self) -> SessionHandle {
        if let Some(session) = &self.session {
            return session.clone();
        }

        let backend = (self.factory)(&self.settings);
        let session = SessionHandle::new(MediaSession::new(&self.settings, backend));
        self.created += 1;
        info!(
            target: "media",
            "Media session created: {} (volume {}, loop {})",
            self.settings.source, self.settings.volume, self.settings.looping
        );

        self.session = Some(session.clone());
        session
    }

    /// Pauses and releases the session, returning to `Unloaded`.
    ///
    /// Handles still held elsewhere see a released session that ignores
    /// play, volume and mute requests.
    pub fn cleanup(&mut self) {
        match self.session.take() {
            Some(session) => session.release(),
            None => debug!(target: "media", "Cleanup with no live session"),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    pub fn lifecycle(&self) -> MediaLifecycle {
        match &self.session {
            None => MediaLifecycle::Unloaded,
            Some(session) => match session.state() {
                SessionState::Ready => MediaLifecycle::Ready,
                SessionState::Playing => MediaLifecycle::Playing,
            },
        }
    }

    pub fn settings(&self) -> &MediaSettings {
        &self.settings
    }

    /// Number of sessions built over the manager's lifetime.
    pub fn sessions_created(&self) -> u32 {
        self.created
    }
}

impl Drop for MediaSessionManager {
    fn drop(&mut self) {
        self.cleanup();
    }
}

//=== Global Access =======================================================

/// Per-thread manager shared by every control on the page.
///
/// The default manager plays the bundled soundtrack from the domain root
/// through a `DetachedBackend`; hosts swap in their own with `install`.
pub mod global {
    use std::cell::RefCell;

    use log::info;

    use super::{MediaLifecycle, MediaSessionManager};
    use crate::core::media::session::{MediaSettings, SessionHandle};

    thread_local! {
        static MANAGER: RefCell<MediaSessionManager> =
            RefCell::new(MediaSessionManager::detached(MediaSettings::default()));
    }

    /// Replaces the thread's manager, cleaning up the previous session.
    pub fn install(manager: MediaSessionManager) {
        let previous = MANAGER.with(|cell| cell.replace(manager));
        drop(previous);
        info!(target: "media", "Global media manager installed");
    }

    /// Returns the shared session, creating it on first use.
    pub fn get_instance() -> SessionHandle {
        MANAGER.with(|cell| cell.borrow_mut().get_instance())
    }

    /// Pauses and releases the shared session.
    pub fn cleanup() {
        MANAGER.with(|cell| cell.borrow_mut().cleanup());
    }

    pub fn is_initialized() -> bool {
        MANAGER.with(|cell| cell.borrow().is_initialized())
    }

    pub fn lifecycle() -> MediaLifecycle {
        MANAGER.with(|cell| cell.borrow().lifecycle())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
