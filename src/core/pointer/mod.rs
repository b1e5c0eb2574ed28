//=========================================================================
// Pointer Events
//=========================================================================
//
// Host-independent pointer events and the listener hub components
// subscribe to.
//
// Architecture:
// ```text
//   Host (winit, DOM, ...) ──► PointerEvent ──► PointerListeners::dispatch()
//                                                   ├─► listener A
//                                                   └─► listener B
// ```
//
// Components register a listener on mount and keep the returned
// `ListenerHandle`; dropping it deregisters the listener.
//
//=========================================================================

//=== Module Declarations =================================================

mod hit_test;

//=== Public API ==========================================================

pub use hit_test::{HitTester, NoHitTargets, Rect, RegionHitTester, RegionId};

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::registry::{Registration, Registry};
use super::time::Timestamp;

//=== ElementRole =========================================================

/// Role of one element in the ancestry of a pointer target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRole {
    /// Push button or anything styled and behaving as one.
    Button,

    /// Hyperlink.
    Link,

    /// Form control: slider, toggle, input.
    Control,

    /// Non-interactive container or content.
    Generic,
}

impl ElementRole {
    /// Returns `true` for roles that react to clicks.
    pub fn is_button_like(self) -> bool {
        !matches!(self, ElementRole::Generic)
    }
}

/// Returns `true` if the target or any of its ancestors is button-like.
///
/// `ancestry` lists the target first, followed by its ancestors.
pub fn is_interactive(ancestry: &[ElementRole]) -> bool {
    ancestry.iter().any(|role| role.is_button_like())
}

//=== PointerEvent ========================================================

/// A pointer or viewport event, as normalized by the host layer.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved inside the viewport (logical pixels, top-left origin).
    Moved {
        x: f32,
        y: f32,
        /// Target element first, then its ancestors.
        target: Vec<ElementRole>,
        at: Timestamp,
    },

    /// Pointer entered the viewport.
    Entered,

    /// Pointer left the viewport.
    Left,

    /// Viewport changed size. `width`/`height` are physical pixels.
    Resized {
        width: u32,
        height: u32,
        scale_factor: f64,
    },
}

//=== PointerListeners ====================================================

/// Handle for a registered pointer listener. Dropping it deregisters.
#[derive(Debug)]
#[must_use = "dropping a ListenerHandle removes the listener"]
pub struct ListenerHandle {
    registration: Registration,
}

impl ListenerHandle {
    /// Deregisters the listener.
    pub fn remove(&self) {
        self.registration.cancel();
    }

    pub fn is_active(&self) -> bool {
        self.registration.is_active()
    }
}

type Listener = Box<dyn FnMut(&PointerEvent)>;

/// Fan-out hub for pointer events.
pub struct PointerListeners {
    listeners: Registry<Listener>,
}

impl PointerListeners {
    pub fn new() -> Self {
        Self {
            listeners: Registry::new(),
        }
    }

    /// Registers a listener for every subsequent event.
    pub fn add<F>(&mut self, listener: F) -> ListenerHandle
    where
        F: FnMut(&PointerEvent) + 'static,
    {
        ListenerHandle {
            registration: self.listeners.register(Box::new(listener)),
        }
    }

    /// Delivers an event synchronously to every registered listener.
    pub fn dispatch(&mut self, event: &PointerEvent) {
        if !matches!(event, PointerEvent::Moved { .. }) {
            trace!(target: "platform::input", "Dispatching {:?}", event);
        }
        self.listeners.run_active(|listener| {
            listener(event);
            true
        });
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.active_len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PointerListeners {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
