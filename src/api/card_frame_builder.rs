use crate::core::{StationRecord, StationStatus, TrendPath, Viewport};
use crate::error::CarouselResult;
use crate::render::{
    Color, LinePrimitive, PathPrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

const CARD_CORNER_RADIUS: f64 = 28.0;
const CARD_BORDER_WIDTH: f64 = 2.0;
const PADDING_X: f64 = 30.0;
const PADDING_Y: f64 = 20.0;
const METRIC_COLUMN_SPACING: f64 = 74.0;
const METRIC_ROW_HEIGHT: f64 = 48.0;
const TREND_STROKE_WIDTH: f64 = 2.5;
/// The sketch bleeds slightly into the left padding.
const TREND_BLEED_LEFT: f64 = 10.0;

/// Colors used by the station card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPalette {
    pub brand: Color,
    pub title: Color,
    pub metric_value: Color,
    pub muted_text: Color,
    pub divider: Color,
    pub glass_tint: Color,
    pub glass_tint_brand: Color,
    pub glass_border: Color,
    pub corner_light: Color,
    pub blob_primary: Color,
    pub blob_secondary: Color,
    pub good: Color,
    pub moderate: Color,
    pub unhealthy: Color,
}

impl Default for CardPalette {
    fn default() -> Self {
        Self {
            brand: Color::rgba8(127, 174, 138, 1.0),
            title: Color::rgba8(26, 35, 50, 1.0),
            metric_value: Color::rgba8(80, 78, 79, 1.0),
            muted_text: Color::rgba8(93, 115, 137, 0.7),
            divider: Color::rgba8(93, 115, 137, 0.15),
            glass_tint: Color::rgba8(255, 255, 255, 0.32),
            glass_tint_brand: Color::rgba8(219, 239, 246, 0.12),
            glass_border: Color::rgba8(255, 255, 255, 0.7),
            corner_light: Color::rgba8(255, 255, 255, 0.18),
            blob_primary: Color::rgba8(127, 174, 138, 0.38),
            blob_secondary: Color::rgba8(168, 216, 227, 0.35),
            good: Color::rgba8(127, 174, 138, 1.0),
            moderate: Color::rgba8(214, 164, 72, 1.0),
            unhealthy: Color::rgba8(206, 98, 88, 1.0),
        }
    }
}

impl CardPalette {
    #[must_use]
    pub fn status_color(&self, status: StationStatus) -> Color {
        match status {
            StationStatus::Good => self.good,
            StationStatus::Moderate => self.moderate,
            StationStatus::Unhealthy => self.unhealthy,
        }
    }
}

/// Card box and trend sketch size in card-local pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardLayout {
    pub width: f64,
    pub height: f64,
    pub trend_width: f64,
    pub trend_height: f64,
}

/// Builds one station card in card-local coordinates (origin at the card's
/// top-left corner).
///
/// Pure: the same record and layout always produce the same frame. A record
/// with fewer than two trend samples fails with `TrendTooShort`.
pub fn build_station_card_frame(
    station: &StationRecord,
    layout: CardLayout,
    palette: &CardPalette,
) -> CarouselResult<RenderFrame> {
    let trend = TrendPath::build(&station.trend, layout.trend_width, layout.trend_height)?;

    let width = layout.width;
    let height = layout.height;
    let viewport = Viewport::new(width.ceil().max(1.0) as u32, height.ceil().max(1.0) as u32);
    let mut frame = RenderFrame::new(viewport);

    // Decoration: blobs behind the glass, then the glass panel itself.
    frame.rects.push(circle(20.0, 30.0, 160.0, palette.blob_primary));
    frame.rects.push(circle(
        width - 30.0 - 140.0,
        height - 40.0 - 140.0,
        140.0,
        palette.blob_secondary,
    ));
    frame.rects.push(
        RectPrimitive::new(0.0, 0.0, width, height, palette.glass_tint)
            .with_border(CARD_BORDER_WIDTH, palette.glass_border)
            .with_corner_radius(CARD_CORNER_RADIUS),
    );
    frame.rects.push(
        RectPrimitive::new(0.0, 0.0, width, height, palette.glass_tint_brand)
            .with_corner_radius(CARD_CORNER_RADIUS),
    );
    frame.rects.push(circle(-5.0, -5.0, 60.0, palette.corner_light));

    let right = width - PADDING_X;

    let header_y = PADDING_Y;
    frame.texts.push(
        TextPrimitive::new(
            station.name.clone(),
            PADDING_X,
            header_y,
            28.0,
            palette.title,
            TextHAlign::Left,
        )
        .bold(),
    );
    frame.texts.push(TextPrimitive::new(
        station.updated_label(),
        right,
        header_y + 6.0,
        12.0,
        palette.muted_text,
        TextHAlign::Right,
    ));

    let category_y = header_y + 40.0;
    frame.rects.push(circle(PADDING_X, category_y + 2.0, 10.0, palette.brand));
    frame.texts.push(
        TextPrimitive::new(
            station.category.clone(),
            PADDING_X + 16.0,
            category_y,
            12.0,
            palette.brand,
            TextHAlign::Left,
        )
        .bold(),
    );

    let metrics_y = category_y + 38.0;
    let center_x = width / 2.0;
    let columns = [
        ("PM2.5", station.pm25_label(), palette.metric_value),
        ("O3", station.ozone_label(), palette.metric_value),
        ("AQI", station.aqi_label(), palette.brand),
    ];
    for (column, (label, value, value_color)) in columns.into_iter().enumerate() {
        let x = center_x + (column as f64 - 1.0) * METRIC_COLUMN_SPACING;
        frame.texts.push(TextPrimitive::new(
            label,
            x,
            metrics_y,
            11.0,
            palette.muted_text,
            TextHAlign::Center,
        ));
        frame.texts.push(
            TextPrimitive::new(value, x, metrics_y + 17.0, 20.0, value_color, TextHAlign::Center)
                .bold(),
        );
    }
    for divider in [-0.5, 0.5] {
        let x = center_x + divider * METRIC_COLUMN_SPACING;
        frame.lines.push(LinePrimitive::new(
            x,
            metrics_y,
            x,
            metrics_y + METRIC_ROW_HEIGHT,
            1.0,
            palette.divider,
        ));
    }

    let status_y = metrics_y + METRIC_ROW_HEIGHT + 20.0;
    frame.texts.push(
        TextPrimitive::new(
            station.status.label(),
            PADDING_X,
            status_y,
            13.0,
            palette.status_color(station.status),
            TextHAlign::Left,
        )
        .bold(),
    );
    frame.texts.push(TextPrimitive::new(
        "24h Trend",
        right,
        status_y,
        12.0,
        palette.muted_text,
        TextHAlign::Right,
    ));

    let trend_x = PADDING_X - TREND_BLEED_LEFT;
    let trend_y = status_y + 26.0;
    frame.paths.push(
        PathPrimitive::new(trend.commands().to_vec(), TREND_STROKE_WIDTH, palette.brand)
            .mapped(|x, y| (x + trend_x, y + trend_y)),
    );

    Ok(frame)
}

fn circle(x: f64, y: f64, diameter: f64, color: Color) -> RectPrimitive {
    RectPrimitive::new(x, y, diameter, diameter, color).with_corner_radius(diameter / 2.0)
}
