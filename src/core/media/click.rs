//=========================================================================
// Click Sound
//=========================================================================
//
// Short UI feedback sound played on primary-button presses.
//
// Independent of the shared session: it has its own backend, never
// loops, and restarts from the beginning on every press so rapid clicks
// each produce an audible tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::backend::{DetachedBackend, PlaybackBackend};
use crate::core::assets::{BasePath, CLICK_SOUND_ASSET};

//=== ClickSoundSettings ==================================================

/// Default click volume.
pub const DEFAULT_CLICK_VOLUME: f32 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub struct ClickSoundSettings {
    pub source: String,
    pub volume: f32,
}

impl ClickSoundSettings {
    pub fn new(base: &BasePath) -> Self {
        Self {
            source: base.resolve(CLICK_SOUND_ASSET),
            volume: DEFAULT_CLICK_VOLUME,
        }
    }

    /// # Panics
    ///
    /// Panics if `volume` is outside `[0, 1]`.
    pub fn with_volume(mut self, volume: f32) -> Self {
        assert!(
            (0.0..=1.0).contains(&volume),
            "Click volume must be within [0, 1], got {}",
            volume
        );
        self.volume = volume;
        self
    }
}

impl Default for ClickSoundSettings {
    fn default() -> Self {
        Self::new(&BasePath::root())
    }
}

//=== ClickSound ==========================================================

type ClickFactory = Box<dyn Fn(&ClickSoundSettings) -> Box<dyn PlaybackBackend>>;

/// Lazily-loaded click player.
pub struct ClickSound {
    settings: ClickSoundSettings,
    factory: ClickFactory,
    backend: Option<Box<dyn PlaybackBackend>>,
    played: u32,
}

impl ClickSound {
    pub fn new<F>(settings: ClickSoundSettings, factory: F) -> Self
    where
        F: Fn(&ClickSoundSettings) -> Box<dyn PlaybackBackend> + 'static,
    {
        Self {
            settings,
            factory: Box::new(factory),
            backend: None,
            played: 0,
        }
    }

    pub fn detached(settings: ClickSoundSettings) -> Self {
        Self::new(settings, |settings| {
            Box::new(DetachedBackend::new(settings.source.clone()))
        })
    }

    /// Plays the click from the start. Refusals are logged and dropped.
    pub fn play(&mut self) {
        let settings = &self.settings;
        let factory = &self.factory;
        let backend = self.backend.get_or_insert_with(|| {
            let mut backend = factory(settings);
            backend.set_looping(false);
            backend.set_volume(settings.volume);
            trace!(target: "media", "Click sound loaded: {}", settings.source);
            backend
        });

        backend.rewind();
        match backend.play() {
            Ok(()) => self.played += 1,
            Err(e) => debug!(target: "media", "Click sound not played: {}", e),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.backend.is_some()
    }

    /// Number of clicks that actually started playing.
    pub fn played(&self) -> u32 {
        self.played
    }

    pub fn settings(&self) -> &ClickSoundSettings {
        &self.settings
    }
}

impl Drop for ClickSound {
    fn drop(&mut self) {
        if let Some(backend) = &mut self.backend {
            backend.release();
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::media::backend::{AutoplayPolicy, PlaybackError};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Log {
        rewinds: u32,
        volume: f32,
        looping: Option<bool>,
    }

    struct Probe(Rc<RefCell<Log>>);

    impl PlaybackBackend for Probe {
        fn play(&mut self) -> Result<(), PlaybackError> {
            Ok(())
        }
        fn pause(&mut self) {}
        fn rewind(&mut self) {
            self.0.borrow_mut().rewinds += 1;
        }
        fn set_volume(&mut self, volume: f32) {
            self.0.borrow_mut().volume = volume;
        }
        fn set_muted(&mut self, _muted: bool) {}
        fn set_looping(&mut self, looping: bool) {
            self.0.borrow_mut().looping = Some(looping);
        }
        fn release(&mut self) {}
    }

    #[test]
    fn default_settings_resolve_click_asset() {
        let settings = ClickSoundSettings::new(&BasePath::new("/portfolio"));
        assert_eq!(settings.source, "/portfolio/assets/bluearchive-click-sound.mp3");
        assert_eq!(settings.volume, 0.6);
    }

    #[test]
    fn backend_is_loaded_on_first_play() {
        let mut click = ClickSound::detached(ClickSoundSettings::default());
        assert!(!click.is_loaded());

        click.play();

        assert!(click.is_loaded());
        assert_eq!(click.played(), 1);
    }

    #[test]
    fn every_play_rewinds() {
        let log = Rc::new(RefCell::new(Log::default()));
        let shared = Rc::clone(&log);
        let mut click = ClickSound::new(ClickSoundSettings::default(), move |_| {
            Box::new(Probe(Rc::clone(&shared)))
        });

        click.play();
        click.play();
        click.play();

        let log = log.borrow();
        assert_eq!(log.rewinds, 3);
        assert_eq!(log.volume, DEFAULT_CLICK_VOLUME);
        assert_eq!(log.looping, Some(false));
    }

    #[test]
    fn refused_click_is_not_counted() {
        let mut click = ClickSound::new(ClickSoundSettings::default(), |settings| {
            Box::new(DetachedBackend::new(settings.source.clone()).with_policy(AutoplayPolicy::Blocked))
        });

        click.play();

        assert!(click.is_loaded());
        assert_eq!(click.played(), 0);
    }
}
