use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{CarouselError, CarouselResult};

/// One drawing command of a trend sketch in local pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo { x: f64, y: f64 },
    QuadTo { cx: f64, cy: f64, x: f64, y: f64 },
}

/// Smoothed path through evenly spaced trend samples.
///
/// Six samples produce eleven commands, which fits the inline buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPath {
    width: f64,
    height: f64,
    points: SmallVec<[(f64, f64); 8]>,
    commands: SmallVec<[PathCommand; 16]>,
}

impl TrendPath {
    /// Builds the sketch for `values` inside a `width` x `height` box.
    ///
    /// Sample `i` sits at `x = i / (n - 1) * width`, `y = height - value * height`,
    /// so larger values draw higher. Each adjacent pair is joined by two
    /// quadratic segments that share the horizontal midpoint, which keeps the
    /// curve free of sharp joints.
    pub fn build(values: &[f64], width: f64, height: f64) -> CarouselResult<Self> {
        if values.len() < 2 {
            return Err(CarouselError::TrendTooShort { len: values.len() });
        }
        if !width.is_finite() || width <= 0.0 || !height.is_finite() || height <= 0.0 {
            return Err(CarouselError::InvalidData(
                "trend sketch size must be finite and > 0".to_owned(),
            ));
        }
        if values.iter().any(|value| !value.is_finite()) {
            return Err(CarouselError::InvalidData(
                "trend samples must be finite".to_owned(),
            ));
        }

        let last = (values.len() - 1) as f64;
        let points: SmallVec<[(f64, f64); 8]> = values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                let x = index as f64 / last * width;
                let y = height - value * height;
                (x, y)
            })
            .collect();

        let mut commands = SmallVec::with_capacity(1 + 2 * (points.len() - 1));
        let (x0, y0) = points[0];
        commands.push(PathCommand::MoveTo { x: x0, y: y0 });
        for pair in points.windows(2) {
            let (prev_x, prev_y) = pair[0];
            let (x, y) = pair[1];
            let cx = (prev_x + x) / 2.0;
            commands.push(PathCommand::QuadTo {
                cx,
                cy: prev_y,
                x: cx,
                y: (prev_y + y) / 2.0,
            });
            commands.push(PathCommand::QuadTo { cx, cy: y, x, y });
        }

        Ok(Self {
            width,
            height,
            points,
            commands,
        })
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Sample positions the curve passes through.
    #[must_use]
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    #[must_use]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// SVG `d` attribute for the sketch.
    #[must_use]
    pub fn to_svg_path_data(&self) -> String {
        let mut data = String::with_capacity(self.commands.len() * 24);
        for command in &self.commands {
            if !data.is_empty() {
                data.push(' ');
            }
            let segment = match *command {
                PathCommand::MoveTo { x, y } => format!("M {x} {y}"),
                PathCommand::QuadTo { cx, cy, x, y } => format!("Q {cx} {cy}, {x} {y}"),
            };
            data.push_str(&segment);
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::{PathCommand, TrendPath};
    use crate::error::CarouselError;

    #[test]
    fn two_samples_emit_move_and_two_quads() {
        let path = TrendPath::build(&[0.0, 1.0], 100.0, 40.0).expect("valid trend");
        assert_eq!(
            path.commands(),
            &[
                PathCommand::MoveTo { x: 0.0, y: 40.0 },
                PathCommand::QuadTo {
                    cx: 50.0,
                    cy: 40.0,
                    x: 50.0,
                    y: 20.0
                },
                PathCommand::QuadTo {
                    cx: 50.0,
                    cy: 0.0,
                    x: 100.0,
                    y: 0.0
                },
            ]
        );
        assert_eq!(
            path.to_svg_path_data(),
            "M 0 40 Q 50 40, 50 20 Q 50 0, 100 0"
        );
    }

    #[test]
    fn empty_and_single_sample_trends_fail_loudly() {
        for values in [&[][..], &[0.3][..]] {
            let err = TrendPath::build(values, 220.0, 40.0).expect_err("too short");
            assert!(matches!(err, CarouselError::TrendTooShort { .. }));
        }
    }

    #[test]
    fn zero_width_is_rejected() {
        let err = TrendPath::build(&[0.1, 0.2], 0.0, 40.0).expect_err("zero width");
        assert!(matches!(err, CarouselError::InvalidData(_)));
    }
}
