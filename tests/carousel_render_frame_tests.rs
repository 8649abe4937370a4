use approx::assert_relative_eq;
use chrono::NaiveTime;
use rust_decimal::Decimal;
use station_carousel::CarouselError;
use station_carousel::api::{
    CardLayout, CardPalette, CarouselConfig, CarouselController, build_station_card_frame,
};
use station_carousel::core::{
    CardVisualProfile, FocusTriple, StationCatalog, StationRecord, StationStatus, Viewport,
};
use station_carousel::interaction::{LoopStrategy, ManualScheduler};
use station_carousel::render::{NullRenderer, Renderer};

// Per card: two blobs, two glass layers, corner light and category dot.
const CARD_RECTS: usize = 6;
const CARD_TEXTS: usize = 11;

fn mounted(config: CarouselConfig) -> CarouselController<ManualScheduler> {
    let mut controller =
        CarouselController::new(StationCatalog::builtin(), config, ManualScheduler::new())
            .expect("controller init");
    controller.mount().expect("mount");
    controller
}

#[test]
fn resting_frame_shows_focused_card_and_both_neighbours() {
    let controller = mounted(CarouselConfig::new(Viewport::new(400, 340)));
    let mut renderer = NullRenderer::default();
    controller.render_into(&mut renderer).expect("render");

    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_rect_count, 3 * CARD_RECTS + 6);
    assert_eq!(renderer.last_line_count, 3 * 2);
    assert_eq!(renderer.last_path_count, 3);
    assert_eq!(renderer.last_text_count, 3 * CARD_TEXTS);
}

#[test]
fn focused_card_is_full_size_and_neighbours_recede() {
    let controller = mounted(CarouselConfig::new(Viewport::new(400, 340)));
    let frame = controller.build_render_frame().expect("frame");

    // Glass panel is the third rect of each card; slots 0, 1, 2 are visible.
    let leading = &frame.rects[2];
    let focused = &frame.rects[CARD_RECTS + 2];
    let trailing = &frame.rects[2 * CARD_RECTS + 2];

    assert_relative_eq!(focused.width, 300.0, epsilon = 1e-9);
    assert_relative_eq!(focused.x, 50.0, epsilon = 1e-9);
    assert_relative_eq!(focused.y, 24.0, epsilon = 1e-9);
    assert_relative_eq!(leading.width, 270.0, epsilon = 1e-9);
    assert_relative_eq!(trailing.width, 270.0, epsilon = 1e-9);
    // Receding cards drop by the translate offset on top of the scale.
    assert!(trailing.y > focused.y);

    let names: Vec<&str> = frame
        .texts
        .iter()
        .filter(|text| text.bold && text.font_size_px > 20.0)
        .map(|text| text.text.as_str())
        .collect();
    assert_eq!(names, ["平鎮", "中壢", "龍潭"]);
}

#[test]
fn shadow_rects_are_added_only_when_configured() {
    let shadowed = CardVisualProfile {
        shadow_opacity: FocusTriple::new(0.0, 0.25),
        shadow_radius: FocusTriple::new(0.0, 12.0),
        shadow_offset: FocusTriple::constant(6.0),
        ..CardVisualProfile::default()
    };
    let config = CarouselConfig::new(Viewport::new(400, 340))
        .with_loop_strategy(LoopStrategy::Modulo)
        .with_card_visuals(shadowed);
    let controller = mounted(config);
    let frame = controller.build_render_frame().expect("frame");

    // Modulo at rest on slot 0: only slots 0 and 1 intersect the viewport and
    // only the focused card casts a shadow.
    assert_eq!(frame.rects.len(), 2 * CARD_RECTS + 1 + 6);
    assert_relative_eq!(frame.rects[0].fill_color.alpha, 0.25, epsilon = 1e-9);
}

#[test]
fn dots_are_drawn_after_cards_with_active_dot_widest() {
    let controller = mounted(CarouselConfig::new(Viewport::new(400, 340)));
    let frame = controller.build_render_frame().expect("frame");
    let dots = &frame.rects[frame.rects.len() - 6..];

    assert_relative_eq!(dots[0].width, 18.0);
    assert!(dots[1..].iter().all(|dot| (dot.width - 6.0).abs() < 1e-9));
    assert_relative_eq!(dots[0].fill_color.alpha, 1.0, epsilon = 1e-9);
    assert_relative_eq!(dots[1].fill_color.alpha, 0.25, epsilon = 1e-9);
}

#[test]
fn card_frame_is_deterministic_and_in_card_space() {
    let controller = mounted(CarouselConfig::new(Viewport::new(400, 340)));
    let first = controller.build_card_frame(2).expect("card");
    let second = controller.build_card_frame(2).expect("card");

    assert_eq!(first, second);
    assert_relative_eq!(first.rects[2].x, 0.0);
    assert_relative_eq!(first.rects[2].width, 300.0);
    assert!(first.texts.iter().any(|text| text.text == "觀音"));
    assert!(matches!(
        controller.build_card_frame(6),
        Err(CarouselError::InvalidData(_))
    ));
}

#[test]
fn card_with_single_trend_sample_reports_trend_too_short() {
    let record = StationRecord::new(
        "Bade",
        "Urban",
        Decimal::new(12, 0),
        Decimal::new(30, 0),
        40,
        StationStatus::Good,
        NaiveTime::from_hms_opt(9, 5, 0).expect("time"),
        vec![0.5],
    );
    let layout = CardLayout {
        width: 300.0,
        height: 260.0,
        trend_width: 220.0,
        trend_height: 40.0,
    };

    assert!(matches!(
        build_station_card_frame(&record, layout, &CardPalette::default()),
        Err(CarouselError::TrendTooShort { len: 1 })
    ));
}

#[test]
fn null_renderer_rejects_invalid_frames() {
    let controller = mounted(CarouselConfig::new(Viewport::new(400, 340)));
    let mut frame = controller.build_render_frame().expect("frame");
    frame.rects[0].width = f64::NAN;

    let mut renderer = NullRenderer::default();
    assert!(renderer.render(&frame).is_err());
    assert_eq!(renderer.frames_rendered, 0);
}
