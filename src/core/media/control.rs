//=========================================================================
// Media Control
//=========================================================================
//
// View model of one music widget bound to the shared session.
//
// Several controls may be mounted at once (navigation bar, landing
// card). Each subscribes to the session on construction and rebuilds its
// icons from notifications, so an action taken through one control shows
// up in all of them after their next `refresh`.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::session::{PlaybackEvent, PlaybackSubscription, SessionHandle};

//=== View Types ==========================================================

/// Icon on the play button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayIcon {
    /// Paused; pressing starts playback.
    Play,
    /// Playing; pressing pauses.
    Pause,
}

/// Icon on the mute button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuteIcon {
    Sound,
    Muted,
}

/// Everything a control needs to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlView {
    pub visible: bool,
    pub play_icon: PlayIcon,
    pub mute_icon: MuteIcon,
    /// Slider position in `[0, 100]`.
    pub volume_percent: u8,
}

//=== MediaControl ========================================================

/// One music widget observing the shared session.
pub struct MediaControl {
    session: SessionHandle,
    subscription: PlaybackSubscription,
    visible: bool,
    playing: bool,
    muted: bool,
}

impl MediaControl {
    pub fn new(session: SessionHandle, visible: bool) -> Self {
        let subscription = session.subscribe();
        let playing = session.is_playing();
        let muted = session.is_muted();
        Self {
            session,
            subscription,
            visible,
            playing,
            muted,
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    //--- Actions ----------------------------------------------------------

    pub fn toggle_play(&mut self) {
        self.session.toggle();
        self.refresh();
    }

    pub fn toggle_mute(&mut self) {
        self.session.toggle_muted();
        self.refresh();
    }

    /// Sets the shared volume from a slider position. Values above 100
    /// are treated as 100.
    pub fn set_volume_percent(&mut self, percent: u8) {
        let percent = percent.min(100);
        self.session.set_volume(f32::from(percent) / 100.0);
        self.refresh();
    }

    //--- State ------------------------------------------------------------

    /// Applies every pending session notification.
    ///
    /// The subscription queue is bounded, so a control that went a long
    /// time without refreshing may have missed events; once anything was
    /// received the icons are resynced from the session itself.
    pub fn refresh(&mut self) {
        let mut received = false;
        for event in self.subscription.try_iter() {
            received = true;
            match event {
                PlaybackEvent::Played => self.playing = true,
                PlaybackEvent::Paused => self.playing = false,
                PlaybackEvent::MutedChanged(muted) => self.muted = muted,
                PlaybackEvent::VolumeChanged(_) => {}
            }
        }
        if received {
            self.playing = self.session.is_playing();
            self.muted = self.session.is_muted();
        }
    }

    /// Current view. Volume is read from the session directly so the
    /// slider never lags behind another control.
    pub fn view(&self) -> ControlView {
        ControlView {
            visible: self.visible,
            play_icon: if self.playing { PlayIcon::Pause } else { PlayIcon::Play },
            mute_icon: if self.muted { MuteIcon::Muted } else { MuteIcon::Sound },
            volume_percent: (self.session.volume() * 100.0).round() as u8,
        }
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::media::backend::{AutoplayPolicy, DetachedBackend};
    use crate::core::media::manager::MediaSessionManager;
    use crate::core::media::session::{MediaSettings, SUBSCRIPTION_CAPACITY};

    fn manager(policy: AutoplayPolicy) -> MediaSessionManager {
        MediaSessionManager::new(MediaSettings::new("/assets/t.mp3"), move |settings| {
            Box::new(DetachedBackend::new(settings.source.clone()).with_policy(policy))
        })
    }

    #[test]
    fn initial_view_reflects_session() {
        let mut manager = manager(AutoplayPolicy::Allowed);
        let control = MediaControl::new(manager.get_instance(), true);

        assert_eq!(
            control.view(),
            ControlView {
                visible: true,
                play_icon: PlayIcon::Play,
                mute_icon: MuteIcon::Sound,
                volume_percent: 30,
            }
        );
    }

    #[test]
    fn two_controls_share_playback() {
        let mut manager = manager(AutoplayPolicy::Allowed);
        let mut nav = MediaControl::new(manager.get_instance(), true);
        let mut card = MediaControl::new(manager.get_instance(), false);

        nav.toggle_play();
        card.refresh();
        assert_eq!(nav.view().play_icon, PlayIcon::Pause);
        assert_eq!(card.view().play_icon, PlayIcon::Pause);

        card.toggle_play();
        nav.refresh();
        assert_eq!(nav.view().play_icon, PlayIcon::Play);
        assert!(!manager.get_instance().is_playing());
    }

    #[test]
    fn volume_set_on_one_control_reads_back_on_other() {
        let mut manager = manager(AutoplayPolicy::Allowed);
        let mut nav = MediaControl::new(manager.get_instance(), true);
        let card = MediaControl::new(manager.get_instance(), true);

        nav.set_volume_percent(57);

        assert_eq!(card.view().volume_percent, 57);
        assert!((manager.get_instance().volume() - 0.57).abs() < 1e-6);
    }

    #[test]
    fn volume_percent_is_capped() {
        let mut manager = manager(AutoplayPolicy::Allowed);
        let mut control = MediaControl::new(manager.get_instance(), true);
        control.set_volume_percent(250);
        assert_eq!(control.view().volume_percent, 100);
    }

    #[test]
    fn mute_propagates() {
        let mut manager = manager(AutoplayPolicy::Allowed);
        let mut nav = MediaControl::new(manager.get_instance(), true);
        let mut card = MediaControl::new(manager.get_instance(), true);

        nav.toggle_mute();
        card.refresh();

        assert_eq!(card.view().mute_icon, MuteIcon::Muted);
    }

    #[test]
    fn rejected_play_keeps_play_icon() {
        let mut manager = manager(AutoplayPolicy::Blocked);
        let mut control = MediaControl::new(manager.get_instance(), true);

        control.toggle_play();

        assert_eq!(control.view().play_icon, PlayIcon::Play);
        assert!(!control.session().is_playing());
    }

    #[test]
    fn hidden_control_catches_up_after_many_changes() {
        let mut manager = manager(AutoplayPolicy::Allowed);
        let mut nav = MediaControl::new(manager.get_instance(), true);
        let mut card = MediaControl::new(manager.get_instance(), false);

        for percent in 0..=100 {
            nav.set_volume_percent(percent);
        }
        nav.toggle_play();
        nav.toggle_mute();

        assert!(card.subscription.pending() <= SUBSCRIPTION_CAPACITY);

        card.refresh();
        let view = card.view();
        assert_eq!(view.play_icon, PlayIcon::Pause);
        assert_eq!(view.mute_icon, MuteIcon::Muted);
        assert_eq!(view.volume_percent, 100);
    }

    #[test]
    fn visibility_is_local() {
        let mut manager = manager(AutoplayPolicy::Allowed);
        let mut a = MediaControl::new(manager.get_instance(), true);
        let b = MediaControl::new(manager.get_instance(), true);

        a.set_visible(false);

        assert!(!a.view().visible);
        assert!(b.view().visible);
    }
}
