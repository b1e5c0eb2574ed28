//=========================================================================
// Core Components
//
// Host-independent building blocks of the portfolio shell effects.
//
// Responsibilities:
// - Drive per-frame work through a cancellable task loop (`frame`)
// - Fan pointer and viewport events out to subscribers (`pointer`)
// - Sample, age and draw the pointer glow trail (`cursor`)
// - Share one background-music session between controls (`media`)
//
// Notes:
// Everything here runs on the UI thread. Shared state uses `Rc` with
// `Cell`/`RefCell`; registrations are handles that cancel on drop.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod assets;
pub mod cursor;
pub mod frame;
pub mod media;
pub mod pointer;
pub mod time;

pub(crate) mod registry;
