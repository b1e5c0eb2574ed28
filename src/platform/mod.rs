//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the overlay and media components.
//
// Architecture:
// ```text
//  Main Thread:
//  ┌───────────────────────────────────────────────────────────┐
//  │  Winit Event Loop                                         │
//  │   ↓                                                       │
//  │  PointerProcessor                                         │
//  │   ├─ physical → logical pixels                            │
//  │   └─ hit test → role ancestry                             │
//  │   ↓                                                       │
//  │  PointerListeners ──► CursorOverlay (trail + cursor dot)  │
//  │                                                           │
//  │  RedrawRequested                                          │
//  │   ↓                                                       │
//  │  FrameLoop::tick(now) ──► overlay render task             │
//  │   ↓                                                       │
//  │  FramePresenter ──► softbuffer window surface             │
//  │                                                           │
//  │  MouseInput (primary press) ──► ClickSound                │
//  └───────────────────────────────────────────────────────────┘
//
//  Frame Boundary: RedrawRequested
//    → Frame tasks run once with the current host time
//    → Overlay pixels composited onto the window
//    → Next redraw requested immediately (continuous animation)
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: pointer events are dispatched
//   as they arrive, while purging and drawing happen once per frame
// - **Lazy window and overlay**: both are created in `resumed()`, the
//   overlay sized to the window's physical pixels
// - **Main thread requirement**: Winit mandates main thread on macOS/iOS,
//   so this runs on the thread that called `App::run()`
//
//=========================================================================

//=== Submodules ==========================================================

mod pointer_processor;
mod presenter;

//=== External Crates =====================================================

use std::rc::Rc;

use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::cursor::{CursorOverlay, DrawSurface, TrailConfig};
use crate::core::frame::FrameLoop;
use crate::core::media::{global, ClickSound};
use crate::core::pointer::{HitTester, PointerEvent, PointerListeners};
use crate::core::time::{HostClock, Timestamp};
use pointer_processor::PointerProcessor;
use presenter::{FramePresenter, WindowPresenter};

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// These are typically fatal - if the event loop can't be created,
/// the application cannot run.
#[derive(Debug)]
pub enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop execution error (rare, indicates corruption).
    EventLoopExecution(winit::error::EventLoopError),

    /// The window surface could not be created or presented to.
    Presentation(Box<dyn std::error::Error>),
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
            Self::Presentation(e) => write!(f, "Frame presentation failed: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {}

//=== PlatformConfig ======================================================

/// Builds the drawing surface for a window of the given physical size.
pub(crate) type SurfaceFactory = Box<dyn Fn(u32, u32) -> Option<Box<dyn DrawSurface>>>;

/// Everything the platform needs, assembled by `AppBuilder`.
pub(crate) struct PlatformConfig {
    pub title: String,
    pub trail: TrailConfig,
    pub surface_factory: SurfaceFactory,
    pub hit_tester: Box<dyn HitTester>,
    pub click: Option<ClickSound>,
}

//=== Platform ============================================================

/// Window owner and pointer event source.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(config)` - no window yet
/// 2. **Execution**: `platform.run()` - starts event loop
/// 3. **Resume**: window created, overlay mounted
/// 4. **Shutdown**: close requested → overlay unmounted, media released
///
/// # Thread Safety
///
/// This type is NOT Send/Sync - it must remain on the main thread.
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Rc<Window>>,

    /// Copies overlay frames to the window. Dropped after a failure.
    presenter: Option<Box<dyn FramePresenter>>,

    title: String,
    clock: HostClock,
    frames: FrameLoop,
    pointer: PointerListeners,
    processor: PointerProcessor,
    trail: TrailConfig,
    surface_factory: SurfaceFactory,

    /// Mounted once the window exists.
    overlay: Option<CursorOverlay>,

    click: Option<ClickSound>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Creates a new platform instance.
    ///
    /// Does not create window yet - that happens lazily in `resumed()`.
    pub fn new(config: PlatformConfig) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            presenter: None,
            title: config.title,
            clock: HostClock::start(),
            frames: FrameLoop::new(),
            pointer: PointerListeners::new(),
            processor: PointerProcessor::new(config.hit_tester),
            trail: config.trail,
            surface_factory: config.surface_factory,
            overlay: None,
            click: config.click,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit requirement).
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        let result = event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution);

        self.shutdown();
        result
    }

    //--- Internal Helpers -------------------------------------------------

    /// Mounts the cursor overlay with a surface of `width`×`height`
    /// physical pixels. No-op if already mounted.
    fn mount_overlay(&mut self, width: u32, height: u32) {
        if self.overlay.is_some() {
            return;
        }
        let surface = (self.surface_factory)(width, height);
        self.overlay = Some(CursorOverlay::mount(
            &mut self.frames,
            &mut self.pointer,
            surface,
            self.trail,
        ));
    }

    fn dispatch(&mut self, event: PointerEvent) {
        self.pointer.dispatch(&event);
    }

    /// Frame boundary: runs every frame task once.
    fn tick_frame(&mut self, now: Timestamp) {
        self.frames.tick(now);
        trace!(
            target: "platform",
            "Frame {} ({} tasks)",
            self.frames.ticks(),
            self.frames.active_tasks()
        );
    }

    /// Puts the overlay's current frame on screen.
    ///
    /// A presenter that fails once is dropped; the overlay keeps
    /// animating without output rather than erroring every frame.
    fn present_frame(&mut self) {
        let (Some(presenter), Some(overlay)) = (self.presenter.as_mut(), self.overlay.as_ref()) else {
            return;
        };
        if let Some(Err(e)) = overlay.with_surface(|surface| presenter.present(surface)) {
            warn!(target: "platform", "{}; window output disabled", e);
            self.presenter = None;
        }
    }

    fn handle_primary_press(&mut self) {
        match &mut self.click {
            Some(click) => click.play(),
            None => trace!(target: "platform::input", "Click sound disabled"),
        }
    }

    /// Unmounts the overlay and releases the shared media session.
    fn shutdown(&mut self) {
        if let Some(overlay) = self.overlay.take() {
            overlay.unmount();
        }
        if global::is_initialized() {
            global::cleanup();
        }
        self.presenter = None;
        self.window = None;
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_deref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Called when app becomes active (startup or mobile resume).
    ///
    /// Creates the window if it doesn't exist yet. On mobile, this may be
    /// called multiple times (suspend/resume cycle).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(1280, 800));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size();
                let scale_factor = window.scale_factor();
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    size.width,
                    size.height,
                    scale_factor
                );

                self.processor.process_scale_factor(scale_factor);
                let viewport = self.processor.process_resized(size);
                self.mount_overlay(size.width, size.height);
                self.dispatch(viewport);

                let window = Rc::new(window);
                match WindowPresenter::new(window.clone()) {
                    Ok(presenter) => self.presenter = Some(Box::new(presenter)),
                    Err(e) => warn!(target: "platform", "{}; window output disabled", e),
                }

                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                event_loop.exit();
            }
        }
    }

    /// Handles per-window events.
    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.shutdown();
                event_loop.exit();
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self.processor.process_cursor_moved(position, self.clock.now());
                self.dispatch(event);
            }

            WindowEvent::CursorEntered { .. } => self.dispatch(PointerEvent::Entered),

            WindowEvent::CursorLeft { .. } => self.dispatch(PointerEvent::Left),

            WindowEvent::Resized(size) => {
                let event = self.processor.process_resized(size);
                self.dispatch(event);
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                debug!(target: "platform", "Scale factor changed to {}", scale_factor);
                let event = self.processor.process_scale_factor(scale_factor);
                self.dispatch(event);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if PointerProcessor::is_primary_press(button, state) {
                    self.handle_primary_press();
                }
            }

            WindowEvent::RedrawRequested => {
                self.tick_frame(self.clock.now());
                self.present_frame();

                // Request next frame
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {
                // Ignore: keyboard, focus, etc. (not needed for the overlay)
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
