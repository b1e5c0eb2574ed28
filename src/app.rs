//=========================================================================
// Afterglow App
//
// Main entry point for hosting the overlay and shared media in a window.
//
// Architecture:
// ```text
//     AppBuilder  ──build()──>  App  ──run()──>  [Event Loop]
//         │                      │
//         ├─ with_trail_max_age()└─ installs global media manager
//         ├─ with_base_path()       runs platform
//         ├─ with_click_sound()     releases media on exit
//         └─ with_surface_factory()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::rc::Rc;

use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::assets::BasePath;
use crate::core::cursor::{CursorPalette, DrawSurface, PixelSurface, TrailConfig, TrailStyle};
use crate::core::media::{
    global, ClickSound, ClickSoundSettings, DetachedBackend, MediaSessionManager, MediaSettings,
    PlaybackBackend,
};
use crate::core::pointer::{HitTester, NoHitTargets};
use crate::platform::{Platform, PlatformConfig, PlatformError, SurfaceFactory};

//=== AppBuilder ==========================================================

type BackendFactory = Rc<dyn Fn(&str) -> Box<dyn PlaybackBackend>>;

/// Builder for configuring and constructing an [`App`].
///
/// # Default Values
///
/// - **Trail max age**: 800 ms
/// - **Base path**: `/`
/// - **Click sound**: enabled
/// - **Surface**: a [`PixelSurface`] at the window's physical size
/// - **Media backend**: [`DetachedBackend`] (state only, no sound)
///
/// # Examples
///
/// ```no_run
/// use afterglow::AppBuilder;
///
/// AppBuilder::new()
///     .with_base_path("/portfolio/")
///     .with_trail_max_age(600.0)
///     .build()
///     .run()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct AppBuilder {
    title: String,
    trail: TrailConfig,
    base_path: BasePath,
    click_sound: bool,
    hit_tester: Box<dyn HitTester>,
    surface_factory: SurfaceFactory,
    backend_factory: BackendFactory,
}

impl AppBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            title: "Portfolio".to_string(),
            trail: TrailConfig::default(),
            base_path: BasePath::root(),
            click_sound: true,
            hit_tester: Box::new(NoHitTargets),
            surface_factory: Box::new(|width: u32, height: u32| {
                Some(Box::new(PixelSurface::new(width, height)) as Box<dyn DrawSurface>)
            }),
            backend_factory: Rc::new(|source: &str| -> Box<dyn PlaybackBackend> {
                Box::new(DetachedBackend::new(source))
            }),
        }
    }

    /// Sets how long a trail point stays visible, in milliseconds.
    ///
    /// Default: 800.0
    ///
    /// # Panics
    ///
    /// Panics if `max_age_ms <= 0.0`.
    pub fn with_trail_max_age(mut self, max_age_ms: f64) -> Self {
        assert!(max_age_ms > 0.0, "Trail max age must be positive, got {}", max_age_ms);
        self.trail.max_age_ms = max_age_ms;
        self
    }

    pub fn with_trail_style(mut self, style: TrailStyle) -> Self {
        self.trail.style = style;
        self
    }

    pub fn with_cursor_palette(mut self, palette: CursorPalette) -> Self {
        self.trail.palette = palette;
        self
    }

    /// Sets the deployment base that asset paths are resolved against.
    ///
    /// Default: `/`
    pub fn with_base_path(mut self, base: impl Into<String>) -> Self {
        self.base_path = BasePath::new(base);
        self
    }

    /// Enables or disables the click sound on primary-button presses.
    ///
    /// Default: enabled
    pub fn with_click_sound(mut self, enabled: bool) -> Self {
        self.click_sound = enabled;
        self
    }

    /// Sets how pointer positions are mapped to interactive elements.
    pub fn with_hit_tester(mut self, hit_tester: impl HitTester + 'static) -> Self {
        self.hit_tester = Box::new(hit_tester);
        self
    }

    /// Sets how the overlay's drawing surface is created from the
    /// window's physical size. Returning `None` disables drawing.
    pub fn with_surface_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(u32, u32) -> Option<Box<dyn DrawSurface>> + 'static,
    {
        self.surface_factory = Box::new(factory);
        self
    }

    /// Sets the backend used for both the soundtrack and the click sound.
    /// The factory receives the resolved source path.
    pub fn with_media_backend<F>(mut self, factory: F) -> Self
    where
        F: Fn(&str) -> Box<dyn PlaybackBackend> + 'static,
    {
        self.backend_factory = Rc::new(factory);
        self
    }

    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Builds the app.
    pub fn build(self) -> App {
        info!(
            target: "app",
            "Building app (trail: {} ms, base: {}, click: {})",
            self.trail.max_age_ms,
            self.base_path.as_str(),
            self.click_sound
        );

        let media = MediaSettings::soundtrack(&self.base_path);
        let click = self
            .click_sound
            .then(|| ClickSoundSettings::new(&self.base_path));

        App {
            title: self.title,
            trail: self.trail,
            media,
            click,
            hit_tester: self.hit_tester,
            surface_factory: self.surface_factory,
            backend_factory: self.backend_factory,
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== App =================================================================

/// Windowed host for the pointer trail and shared media session.
pub struct App {
    title: String,
    trail: TrailConfig,
    media: MediaSettings,
    click: Option<ClickSoundSettings>,
    hit_tester: Box<dyn HitTester>,
    surface_factory: SurfaceFactory,
    backend_factory: BackendFactory,
}

impl App {
    /// Settings the shared media session will be created with.
    pub fn media_settings(&self) -> &MediaSettings {
        &self.media
    }

    /// Installs the global media manager for this thread.
    ///
    /// Controls created after this call share its session.
    pub fn install_media(&self) {
        let factory = Rc::clone(&self.backend_factory);
        global::install(MediaSessionManager::new(self.media.clone(), move |settings| {
            factory(&settings.source)
        }));
    }

    fn click_sound(&self) -> Option<ClickSound> {
        let settings = self.click.clone()?;
        let factory = Rc::clone(&self.backend_factory);
        Some(ClickSound::new(settings, move |settings| factory(&settings.source)))
    }

    //--- Execution --------------------------------------------------------

    /// Opens the window and blocks until it closes.
    ///
    /// # Lifecycle
    ///
    /// 1. Installs the global media manager
    /// 2. Runs the platform event loop (blocks here)
    /// 3. On close: overlay unmounted, shared session released
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot start or fails.
    pub fn run(self) -> Result<(), PlatformError> {
        info!(target: "app", "Starting app runtime");

        self.install_media();
        let click = self.click_sound();

        let platform = Platform::new(PlatformConfig {
            title: self.title,
            trail: self.trail,
            surface_factory: self.surface_factory,
            hit_tester: self.hit_tester,
            click,
        });

        let result = platform.run();
        if let Err(e) = &result {
            error!(target: "app", "Platform error: {}", e);
        }

        info!(target: "app", "App shutdown complete");
        result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
