//=========================================================================
// Cursor Overlay
//=========================================================================
//
// Render-target component for the pointer glow trail.
//
// Architecture:
// ```text
//   mount()
//     ├─ PointerListeners::add()  ──► tracker.handle(event)
//     └─ FrameLoop::schedule()    ──► tracker.render(now, surface)
//
//   CursorOverlay { listener: ListenerHandle, frame: FrameHandle }
//     └─ drop / unmount() → both registrations cancelled
// ```
//
// The overlay takes no inputs and emits nothing; it is a passive visual
// effect mounted once near the root of the page.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod style;
pub mod surface;
pub mod trail;
mod tracker;

//=== Public API ==========================================================

pub use style::{CursorPalette, DotStyle, Rgba, StrokeLayer, TrailStyle};
pub use surface::{DrawSurface, PixelSurface};
pub use trail::{fade, TrailHistory, TrailPoint, TrailSegment, DEFAULT_MAX_AGE_MS};
pub use tracker::{CursorVisualState, PointerTracker, TrailConfig};

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::Rc;

use log::{info, warn};

//=== Internal Dependencies ===============================================

use crate::core::frame::{FrameHandle, FrameLoop, TickControl};
use crate::core::pointer::{ListenerHandle, PointerListeners};

//=== CursorOverlay =======================================================

struct OverlayState {
    tracker: PointerTracker,
    surface: Option<Box<dyn DrawSurface>>,
}

/// Mounted pointer-trail overlay.
///
/// # Examples
///
/// ```
/// use afterglow::core::cursor::{CursorOverlay, PixelSurface, TrailConfig};
/// use afterglow::core::frame::FrameLoop;
/// use afterglow::core::pointer::{PointerEvent, PointerListeners};
/// use afterglow::core::time::Timestamp;
///
/// let mut frames = FrameLoop::new();
/// let mut pointer = PointerListeners::new();
/// let surface = PixelSurface::new(320, 240);
///
/// let overlay = CursorOverlay::mount(
///     &mut frames,
///     &mut pointer,
///     Some(Box::new(surface)),
///     TrailConfig::default(),
/// );
///
/// pointer.dispatch(&PointerEvent::Moved {
///     x: 10.0,
///     y: 10.0,
///     target: vec![],
///     at: Timestamp::from_millis(0.0),
/// });
/// frames.tick(Timestamp::from_millis(16.0));
/// assert_eq!(overlay.live_points(), 1);
///
/// overlay.unmount();
/// assert_eq!(frames.active_tasks(), 0);
/// assert!(pointer.is_empty());
/// ```
pub struct CursorOverlay {
    state: Rc<RefCell<OverlayState>>,
    listener: ListenerHandle,
    frame: FrameHandle,
}

impl CursorOverlay {
    /// Mounts the overlay: subscribes to pointer events and starts the
    /// redraw task.
    ///
    /// A `None` surface (no drawing context available) mounts a tracker
    /// that still samples and purges but never draws.
    pub fn mount(
        frames: &mut FrameLoop,
        pointer: &mut PointerListeners,
        surface: Option<Box<dyn DrawSurface>>,
        config: TrailConfig,
    ) -> Self {
        if surface.is_none() {
            warn!(target: "cursor", "No drawing surface available, trail rendering disabled");
        }

        let state = Rc::new(RefCell::new(OverlayState {
            tracker: PointerTracker::new(config),
            surface,
        }));

        let for_events = Rc::clone(&state);
        let listener = pointer.add(move |event| {
            for_events.borrow_mut().tracker.handle(event);
        });

        let for_frames = Rc::clone(&state);
        let frame = frames.schedule(move |frame| {
            let mut state = for_frames.borrow_mut();
            let OverlayState { tracker, surface } = &mut *state;
            match surface {
                Some(surface) => tracker.render(frame.now, Some(&mut **surface)),
                None => tracker.render(frame.now, None),
            }
            TickControl::Continue
        });

        info!(target: "cursor", "Cursor overlay mounted (max age {} ms)", config.max_age_ms);

        Self { state, listener, frame }
    }

    /// Tears the overlay down, cancelling its listener and redraw task.
    pub fn unmount(self) {
        drop(self);
    }

    /// Current cursor dot state.
    pub fn cursor(&self) -> CursorVisualState {
        self.state.borrow().tracker.cursor()
    }

    /// Whether the pointer is inside the viewport.
    pub fn is_visible(&self) -> bool {
        self.state.borrow().tracker.is_visible()
    }

    /// Number of trail points currently retained.
    pub fn live_points(&self) -> usize {
        self.state.borrow().tracker.trail().len()
    }

    /// Runs `f` with the drawing surface, if any (e.g. to present the frame).
    pub fn with_surface<R>(&self, f: impl FnOnce(&dyn DrawSurface) -> R) -> Option<R> {
        let state = self.state.borrow();
        state.surface.as_deref().map(f)
    }
}

impl Drop for CursorOverlay {
    fn drop(&mut self) {
        self.listener.remove();
        self.frame.cancel();
        info!(target: "cursor", "Cursor overlay unmounted");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pointer::{ElementRole, PointerEvent};
    use crate::core::time::Timestamp;

    fn at(ms: f64) -> Timestamp {
        Timestamp::from_millis(ms)
    }

    fn moved(x: f32, y: f32, ms: f64, target: Vec<ElementRole>) -> PointerEvent {
        PointerEvent::Moved { x, y, target, at: at(ms) }
    }

    fn mount(surface: Option<Box<dyn DrawSurface>>) -> (FrameLoop, PointerListeners, CursorOverlay) {
        let mut frames = FrameLoop::new();
        let mut pointer = PointerListeners::new();
        let overlay = CursorOverlay::mount(&mut frames, &mut pointer, surface, TrailConfig::default());
        (frames, pointer, overlay)
    }

    #[test]
    fn mount_registers_listener_and_frame_task() {
        let (frames, pointer, _overlay) = mount(None);
        assert_eq!(frames.active_tasks(), 1);
        assert_eq!(pointer.len(), 1);
    }

    #[test]
    fn unmount_deregisters_everything() {
        let (mut frames, mut pointer, overlay) = mount(None);

        overlay.unmount();
        frames.tick(at(0.0));
        pointer.dispatch(&PointerEvent::Entered);

        assert_eq!(frames.active_tasks(), 0);
        assert!(pointer.is_empty());
    }

    #[test]
    fn scenario_five_moves_then_idle() {
        let (mut frames, mut pointer, overlay) = mount(None);

        for t in [0.0, 100.0, 200.0, 300.0, 400.0] {
            pointer.dispatch(&moved(t as f32, t as f32, t, vec![]));
        }
        frames.tick(at(400.0));
        assert_eq!(overlay.live_points(), 5);

        frames.tick(at(900.0));
        assert_eq!(overlay.live_points(), 3);

        frames.tick(at(1200.0));
        assert_eq!(overlay.live_points(), 0);
    }

    #[test]
    fn renders_into_pixel_surface() {
        let (mut frames, mut pointer, overlay) = mount(Some(Box::new(PixelSurface::new(64, 64))));

        pointer.dispatch(&PointerEvent::Resized { width: 64, height: 64, scale_factor: 1.0 });
        pointer.dispatch(&moved(10.0, 32.0, 0.0, vec![]));
        pointer.dispatch(&moved(50.0, 32.0, 8.0, vec![]));
        frames.tick(at(16.0));

        let painted = overlay
            .with_surface(|s| s.size())
            .expect("surface attached");
        assert_eq!(painted, (64, 64));
        assert!(overlay.is_visible());
    }

    #[test]
    fn hover_state_is_exposed() {
        let (_frames, mut pointer, overlay) = mount(None);

        pointer.dispatch(&moved(1.0, 1.0, 0.0, vec![ElementRole::Link]));
        assert!(overlay.cursor().hovering_interactive);

        pointer.dispatch(&PointerEvent::Left);
        assert!(!overlay.is_visible());
    }

    #[test]
    fn missing_surface_is_a_noop() {
        let (mut frames, mut pointer, overlay) = mount(None);
        pointer.dispatch(&moved(1.0, 1.0, 0.0, vec![]));
        frames.tick(at(16.0));
        assert!(overlay.with_surface(|s| s.size()).is_none());
        assert_eq!(overlay.live_points(), 1);
    }
}
