use station_carousel::api::{
    CAROUSEL_SNAPSHOT_JSON_SCHEMA_V1, CarouselConfig, CarouselController, CarouselSnapshot,
};
use station_carousel::core::{StationCatalog, StationStatus, Viewport};
use station_carousel::interaction::{CarouselMode, LoopStrategy, ManualScheduler};
use station_carousel::CarouselError;
use std::time::Duration;

#[test]
fn config_json_fills_defaults_for_missing_fields() {
    let config = CarouselConfig::from_json_str(
        r#"{ "viewport": { "width": 400, "height": 340 }, "loop_strategy": "modulo" }"#,
    )
    .expect("config");

    assert_eq!(
        config,
        CarouselConfig::new(Viewport::new(400, 340)).with_loop_strategy(LoopStrategy::Modulo)
    );
    assert_eq!(config.auto_advance_period(), Duration::from_millis(4_000));
    assert_eq!(config.scroll_animation(), Duration::from_millis(300));
}

#[test]
fn config_json_round_trips() {
    let config = CarouselConfig::new(Viewport::new(420, 340))
        .with_auto_advance_period(Duration::from_millis(2_500));
    let json = config.to_json_pretty().expect("serialize");
    assert!(json.contains("\"padded_sentinels\""));
    assert_eq!(CarouselConfig::from_json_str(&json).expect("parse"), config);
}

#[test]
fn config_json_rejects_invalid_values() {
    assert!(matches!(
        CarouselConfig::from_json_str(
            r#"{ "viewport": { "width": 400, "height": 340 }, "auto_advance_period_ms": 0 }"#
        ),
        Err(CarouselError::InvalidConfig(_))
    ));
    assert!(matches!(
        CarouselConfig::from_json_str(r#"{ "viewport": { "width": 0, "height": 340 } }"#),
        Err(CarouselError::InvalidViewport { width: 0, .. })
    ));
    assert!(matches!(
        CarouselConfig::from_json_str("not json"),
        Err(CarouselError::InvalidConfig(_))
    ));
}

#[test]
fn catalog_json_accepts_bare_station_array() {
    let catalog = StationCatalog::from_json_str(
        r#"[
            {
                "name": "Bade",
                "category": "Urban",
                "pm25": 12,
                "ozone": "35.5",
                "aqi": 58,
                "status": "GOOD",
                "updated_at": "08:15:00",
                "trend": [0.1, 0.3, 0.2]
            }
        ]"#,
    )
    .expect("catalog");

    assert_eq!(catalog.len(), 1);
    let (index, station) = catalog.by_name("Bade").expect("station");
    assert_eq!(index, 0);
    assert_eq!(station.status, StationStatus::Good);
    assert_eq!(station.pm25_label(), "12");
    assert_eq!(station.ozone_label(), "35.5");
    assert_eq!(station.updated_label(), "Updated 08:15");
}

#[test]
fn catalog_json_document_round_trips_builtin_stations() {
    let builtin = StationCatalog::builtin();
    let json = builtin.to_json_pretty().expect("serialize");
    assert!(json.contains("\"schema_version\": 1"));

    let parsed = StationCatalog::from_json_str(&json).expect("parse");
    let names: Vec<&str> = parsed.iter().map(|station| station.name.as_str()).collect();
    assert_eq!(names, ["中壢", "龍潭", "觀音", "大園", "桃園", "平鎮"]);
    for (bundled, reparsed) in builtin.iter().zip(parsed.iter()) {
        assert_eq!(bundled.aqi, reparsed.aqi);
        assert_eq!(bundled.pm25, reparsed.pm25);
        assert_eq!(bundled.trend.len(), reparsed.trend.len());
    }
}

#[test]
fn catalog_json_rejects_bad_catalogs() {
    assert!(matches!(
        StationCatalog::from_json_str("[]"),
        Err(CarouselError::InvalidData(_))
    ));
    assert!(matches!(
        StationCatalog::from_json_str(r#"{ "schema_version": 2, "stations": [] }"#),
        Err(CarouselError::InvalidData(_))
    ));

    let duplicate = r#"[
        { "name": "A", "category": "Urban", "pm25": 1, "ozone": 1, "aqi": 1,
          "status": "GOOD", "updated_at": "10:00:00", "trend": [0.1, 0.2] },
        { "name": "A", "category": "Urban", "pm25": 1, "ozone": 1, "aqi": 1,
          "status": "GOOD", "updated_at": "10:00:00", "trend": [0.1, 0.2] }
    ]"#;
    assert!(matches!(
        StationCatalog::from_json_str(duplicate),
        Err(CarouselError::InvalidData(_))
    ));

    let short_trend = r#"[
        { "name": "A", "category": "Urban", "pm25": 1, "ozone": 1, "aqi": 1,
          "status": "GOOD", "updated_at": "10:00:00", "trend": [0.1] }
    ]"#;
    assert!(matches!(
        StationCatalog::from_json_str(short_trend),
        Err(CarouselError::TrendTooShort { len: 1 })
    ));
}

#[test]
fn snapshot_contract_reports_controller_state() {
    let config = CarouselConfig::new(Viewport::new(400, 340));
    let mut controller =
        CarouselController::new(StationCatalog::builtin(), config, ManualScheduler::new())
            .expect("controller init");
    controller.mount().expect("mount");
    controller.on_dot_pressed(2).expect("dot");

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.mode, CarouselMode::AutoAdvancing);
    assert_eq!(snapshot.loop_strategy, LoopStrategy::PaddedSentinels);
    assert!(snapshot.mounted);
    assert!(snapshot.timer_armed);
    assert_eq!(snapshot.current_index, 2);
    assert_eq!(snapshot.current_slot, 3);
    assert_eq!(snapshot.slot_count, 8);
    assert_eq!(snapshot.cards.len(), 8);
    assert_eq!(snapshot.dots.len(), 6);

    let json = snapshot.to_json_contract_v1_pretty().expect("serialize");
    assert!(json.contains(&format!(
        "\"schema_version\": {CAROUSEL_SNAPSHOT_JSON_SCHEMA_V1}"
    )));
    assert!(json.contains("\"auto_advancing\""));

    let parsed = CarouselSnapshot::from_json_compat_str(&json).expect("parse");
    assert_eq!(parsed.current_index, snapshot.current_index);
    assert_eq!(parsed.mode, snapshot.mode);
    assert_eq!(parsed.last_scroll_command.map(|c| c.animated), Some(true));
}

#[test]
fn snapshot_contract_rejects_unknown_schema() {
    let config = CarouselConfig::new(Viewport::new(400, 340));
    let controller =
        CarouselController::new(StationCatalog::builtin(), config, ManualScheduler::new())
            .expect("controller init");
    let json = controller
        .snapshot()
        .to_json_contract_v1_pretty()
        .expect("serialize")
        .replace("\"schema_version\": 1", "\"schema_version\": 9");

    assert!(matches!(
        CarouselSnapshot::from_json_compat_str(&json),
        Err(CarouselError::InvalidData(_))
    ));
}
