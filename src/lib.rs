//! station-carousel: headless air-quality station carousel.
//!
//! The crate keeps the carousel state machine, the focus/recede interpolation
//! and the trend sketch geometry free of any toolkit so hosts can drive them
//! deterministically. Drawing goes through backend-agnostic render frames; the
//! Cairo renderer and the GTK4 adapter are opt-in features.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{CarouselConfig, CarouselController, CarouselEvent};
pub use error::{CarouselError, CarouselResult};
