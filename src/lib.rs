//=========================================================================
// Afterglow Library Root
//
// Pointer glow trail and shared background-music session for a
// single-page portfolio shell.
//
// Responsibilities:
// - Expose the host-independent components (`core`)
// - Keep the Winit integration (`platform`) hidden from end users
// - Provide a windowed facade (`App`) wiring both together
//
// Typical usage:
// ```no_run
// use afterglow::AppBuilder;
//
// fn main() -> Result<(), afterglow::PlatformError> {
//     AppBuilder::new().with_base_path("/portfolio/").build().run()
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the overlay, frame loop, pointer hub and media session.
// Hosts other than the bundled window (web shells, custom renderers)
// use these directly.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the Winit window and event loop integration.
//
// `app` defines the builder and runtime entry point.
//
mod app;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use app::{App, AppBuilder};
pub use platform::PlatformError;
