//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use afterglow::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// App facade
pub use crate::app::{App, AppBuilder};

// Frame loop and time
pub use crate::core::frame::{FrameHandle, FrameLoop, FrameTime, TickControl};
pub use crate::core::time::{HostClock, Timestamp};

// Pointer events
pub use crate::core::pointer::{ElementRole, HitTester, PointerEvent, PointerListeners};

// Cursor overlay
pub use crate::core::cursor::{CursorOverlay, DrawSurface, TrailConfig};

// Shared media
pub use crate::core::media::{global, MediaControl, PlaybackBackend, SessionHandle};
