//=========================================================================
// Shared Media
//=========================================================================
//
// One background-music session shared by every music control on the
// page, plus the independent UI click sound.
//
// Architecture:
// ```text
//   global::get_instance() ──► MediaSessionManager ──► SessionHandle
//                                                         │
//   MediaControl (nav) ──── subscribe ────────────────────┤
//   MediaControl (card) ─── subscribe ────────────────────┘
//
//   ClickSound ──► own PlaybackBackend
// ```
//
//=========================================================================

//=== Module Declarations =================================================

pub mod backend;
pub mod click;
pub mod control;
pub mod manager;
pub mod session;

//=== Public API ==========================================================

pub use backend::{AutoplayPolicy, DetachedBackend, PlaybackBackend, PlaybackError};
pub use click::{ClickSound, ClickSoundSettings};
pub use control::{ControlView, MediaControl, MuteIcon, PlayIcon};
pub use manager::{global, MediaLifecycle, MediaSessionManager};
pub use session::{
    MediaSession, MediaSettings, PlaybackEvent, PlaybackSubscription, SessionHandle, SessionState,
    SUBSCRIPTION_CAPACITY,
};
