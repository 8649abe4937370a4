pub mod catalog;
pub mod interpolate;
pub mod layout;
pub mod station;
pub mod trend;
pub mod types;

pub use catalog::StationCatalog;
pub use interpolate::{
    CardVisualProfile, CardVisuals, DotVisualProfile, DotVisuals, FocusTriple, focus_input_range,
    interpolate_clamped,
};
pub use layout::CarouselGeometry;
pub use station::{StationRecord, StationStatus};
pub use trend::{PathCommand, TrendPath};
pub use types::Viewport;
