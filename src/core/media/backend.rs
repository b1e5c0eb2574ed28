//=========================================================================
// Playback Backend
//=========================================================================
//
// Contract between the media session and the host's audio subsystem.
//
// The session never talks to a concrete player. Hosts plug in their own
// implementation (an HTML audio element, a native mixer); tests plug in
// scripted fakes. `DetachedBackend` is a headless player that only keeps
// state, used when no audio output is wired up.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== PlaybackError =======================================================

/// Reasons a playback request can be refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// Host policy requires a user gesture before audio may start.
    AutoplayBlocked,

    /// The media resource could not be loaded.
    SourceUnavailable(String),

    /// The backend was released and cannot play again.
    Released,
}

impl std::fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AutoplayBlocked => write!(f, "Playback blocked by autoplay policy"),
            Self::SourceUnavailable(src) => write!(f, "Media source unavailable: {}", src),
            Self::Released => write!(f, "Playback backend already released"),
        }
    }
}

impl std::error::Error for PlaybackError {}

//=== PlaybackBackend =====================================================

/// A single playable audio resource.
pub trait PlaybackBackend {
    /// Starts or resumes playback.
    ///
    /// May be refused (autoplay policy, missing resource). Callers treat
    /// refusal as a non-fatal outcome.
    fn play(&mut self) -> Result<(), PlaybackError>;

    fn pause(&mut self);

    /// Seeks back to the start.
    fn rewind(&mut self);

    /// Volume in `[0, 1]`.
    fn set_volume(&mut self, volume: f32);

    fn set_muted(&mut self, muted: bool);

    fn set_looping(&mut self, looping: bool);

    /// Stops playback and frees the underlying resource.
    fn release(&mut self);
}

//=== AutoplayPolicy ======================================================

/// Whether programmatic playback is currently permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoplayPolicy {
    #[default]
    Allowed,
    Blocked,
}

//=== DetachedBackend =====================================================

/// Headless backend that tracks playback state without producing sound.
#[derive(Debug, Clone)]
pub struct DetachedBackend {
    source: String,
    policy: AutoplayPolicy,
    playing: bool,
    volume: f32,
    muted: bool,
    looping: bool,
    released: bool,
}

impl DetachedBackend {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            policy: AutoplayPolicy::Allowed,
            playing: false,
            volume: 1.0,
            muted: false,
            looping: false,
            released: false,
        }
    }

    pub fn with_policy(mut self, policy: AutoplayPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Changes the policy, e.g. once the user has interacted with the page.
    pub fn set_policy(&mut self, policy: AutoplayPolicy) {
        self.policy = policy;
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl PlaybackBackend for DetachedBackend {
    fn play(&mut self) -> Result<(), PlaybackError> {
        if self.released {
            return Err(PlaybackError::Released);
        }
        if self.source.is_empty() {
            return Err(PlaybackError::SourceUnavailable(self.source.clone()));
        }
        if self.policy == AutoplayPolicy::Blocked {
            return Err(PlaybackError::AutoplayBlocked);
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn rewind(&mut self) {}

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn release(&mut self) {
        debug!(target: "media", "Releasing detached backend for {}", self.source);
        self.playing = false;
        self.source.clear();
        self.released = true;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plays_when_allowed() {
        let mut backend = DetachedBackend::new("/assets/a.mp3");
        assert!(backend.play().is_ok());
        assert!(backend.is_playing());

        backend.pause();
        assert!(!backend.is_playing());
    }

    #[test]
    fn blocked_policy_rejects_play() {
        let mut backend = DetachedBackend::new("/assets/a.mp3").with_policy(AutoplayPolicy::Blocked);
        assert_eq!(backend.play(), Err(PlaybackError::AutoplayBlocked));
        assert!(!backend.is_playing());

        backend.set_policy(AutoplayPolicy::Allowed);
        assert!(backend.play().is_ok());
    }

    #[test]
    fn empty_source_is_unavailable() {
        let mut backend = DetachedBackend::new("");
        assert!(matches!(backend.play(), Err(PlaybackError::SourceUnavailable(_))));
    }

    #[test]
    fn released_backend_refuses_play() {
        let mut backend = DetachedBackend::new("/assets/a.mp3");
        backend.play().unwrap();
        backend.release();

        assert!(!backend.is_playing());
        assert!(backend.is_released());
        assert_eq!(backend.source(), "");
        assert_eq!(backend.play(), Err(PlaybackError::Released));
    }

    #[test]
    fn error_display_names_the_cause() {
        assert_eq!(
            PlaybackError::AutoplayBlocked.to_string(),
            "Playback blocked by autoplay policy"
        );
        assert!(PlaybackError::SourceUnavailable("x.mp3".into())
            .to_string()
            .contains("x.mp3"));
    }

    #[test]
    fn playback_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PlaybackError>();
    }
}
