mod card_frame_builder;
mod carousel_config;
mod carousel_controller;
mod carousel_frame_builder;
mod carousel_snapshot;

pub use card_frame_builder::{CardLayout, CardPalette, build_station_card_frame};
pub use carousel_config::CarouselConfig;
pub use carousel_controller::{CarouselController, CarouselEvent};
pub use carousel_snapshot::{
    CAROUSEL_SNAPSHOT_JSON_SCHEMA_V1, CarouselSnapshot, CarouselSnapshotJsonContractV1,
};
