use serde::{Deserialize, Serialize};

use crate::error::{CarouselError, CarouselResult};

/// Output pair for the focus-and-recede effect: `near` at the slot's own
/// offset, `far` one stride away on either side and beyond.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocusTriple {
    pub far: f64,
    pub near: f64,
}

impl FocusTriple {
    #[must_use]
    pub const fn new(far: f64, near: f64) -> Self {
        Self { far, near }
    }

    #[must_use]
    pub const fn constant(value: f64) -> Self {
        Self::new(value, value)
    }

    #[must_use]
    pub const fn output_range(self) -> [f64; 3] {
        [self.far, self.near, self.far]
    }

    /// Interpolated value for a slot at `slot`, given the scroll offset.
    #[must_use]
    pub fn at(self, scroll_offset: f64, slot: usize, stride: f64) -> f64 {
        interpolate_clamped(
            focus_input_range(slot, stride),
            self.output_range(),
            scroll_offset,
        )
    }

    fn validate(self, name: &str) -> CarouselResult<()> {
        if !self.far.is_finite() || !self.near.is_finite() {
            return Err(CarouselError::InvalidConfig(format!(
                "`{name}` focus values must be finite"
            )));
        }
        Ok(())
    }
}

/// Control offsets `[(i - 1) * stride, i * stride, (i + 1) * stride]`.
#[must_use]
pub fn focus_input_range(slot: usize, stride: f64) -> [f64; 3] {
    let center = slot as f64 * stride;
    [center - stride, center, center + stride]
}

/// Piecewise-linear interpolation over three ascending control points,
/// clamped to the first/last output outside the input range.
///
/// A non-finite `value` resolves to the first output.
#[must_use]
pub fn interpolate_clamped(input: [f64; 3], output: [f64; 3], value: f64) -> f64 {
    if !value.is_finite() || value <= input[0] {
        return output[0];
    }
    if value >= input[2] {
        return output[2];
    }

    let (start, end, from, to) = if value <= input[1] {
        (input[0], input[1], output[0], output[1])
    } else {
        (input[1], input[2], output[1], output[2])
    };
    let span = end - start;
    if span <= 0.0 {
        return to;
    }
    from + (value - start) / span * (to - from)
}

/// Per-card visual parameters resolved for one scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardVisuals {
    pub scale: f64,
    pub opacity: f64,
    pub translate_y: f64,
    pub shadow_opacity: f64,
    pub shadow_radius: f64,
    pub shadow_offset: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardVisualProfile {
    pub scale: FocusTriple,
    pub opacity: FocusTriple,
    pub translate_y: FocusTriple,
    pub shadow_opacity: FocusTriple,
    pub shadow_radius: FocusTriple,
    pub shadow_offset: FocusTriple,
}

impl Default for CardVisualProfile {
    fn default() -> Self {
        Self {
            scale: FocusTriple::new(0.9, 1.0),
            opacity: FocusTriple::constant(1.0),
            translate_y: FocusTriple::new(10.0, 0.0),
            shadow_opacity: FocusTriple::constant(0.0),
            shadow_radius: FocusTriple::constant(0.0),
            shadow_offset: FocusTriple::constant(0.0),
        }
    }
}

impl CardVisualProfile {
    #[must_use]
    pub fn resolve(self, scroll_offset: f64, slot: usize, stride: f64) -> CardVisuals {
        CardVisuals {
            scale: self.scale.at(scroll_offset, slot, stride),
            opacity: self.opacity.at(scroll_offset, slot, stride),
            translate_y: self.translate_y.at(scroll_offset, slot, stride),
            shadow_opacity: self.shadow_opacity.at(scroll_offset, slot, stride),
            shadow_radius: self.shadow_radius.at(scroll_offset, slot, stride),
            shadow_offset: self.shadow_offset.at(scroll_offset, slot, stride),
        }
    }

    pub fn validate(self) -> CarouselResult<()> {
        self.scale.validate("scale")?;
        self.opacity.validate("opacity")?;
        self.translate_y.validate("translate_y")?;
        self.shadow_opacity.validate("shadow_opacity")?;
        self.shadow_radius.validate("shadow_radius")?;
        self.shadow_offset.validate("shadow_offset")?;

        if self.scale.far <= 0.0 || self.scale.near <= 0.0 {
            return Err(CarouselError::InvalidConfig(
                "card scale must be > 0".to_owned(),
            ));
        }
        for (name, triple) in [
            ("opacity", self.opacity),
            ("shadow_opacity", self.shadow_opacity),
        ] {
            if !(0.0..=1.0).contains(&triple.far) || !(0.0..=1.0).contains(&triple.near) {
                return Err(CarouselError::InvalidConfig(format!(
                    "`{name}` must be in [0, 1]"
                )));
            }
        }
        if self.shadow_radius.far < 0.0 || self.shadow_radius.near < 0.0 {
            return Err(CarouselError::InvalidConfig(
                "shadow radius must be >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Pagination dot parameters resolved for one scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DotVisuals {
    pub width: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DotVisualProfile {
    pub width: FocusTriple,
    pub opacity: FocusTriple,
    pub height: f64,
    pub gap: f64,
}

impl Default for DotVisualProfile {
    fn default() -> Self {
        Self {
            width: FocusTriple::new(6.0, 18.0),
            opacity: FocusTriple::new(0.25, 1.0),
            height: 6.0,
            gap: 8.0,
        }
    }
}

impl DotVisualProfile {
    #[must_use]
    pub fn resolve(self, scroll_offset: f64, slot: usize, stride: f64) -> DotVisuals {
        DotVisuals {
            width: self.width.at(scroll_offset, slot, stride),
            opacity: self.opacity.at(scroll_offset, slot, stride),
        }
    }

    pub fn validate(self) -> CarouselResult<()> {
        self.width.validate("dot width")?;
        self.opacity.validate("dot opacity")?;
        if self.width.far <= 0.0 || self.width.near <= 0.0 {
            return Err(CarouselError::InvalidConfig(
                "dot width must be > 0".to_owned(),
            ));
        }
        if !(0.0..=1.0).contains(&self.opacity.far) || !(0.0..=1.0).contains(&self.opacity.near)
        {
            return Err(CarouselError::InvalidConfig(
                "dot opacity must be in [0, 1]".to_owned(),
            ));
        }
        if !self.height.is_finite() || self.height <= 0.0 || !self.gap.is_finite() || self.gap < 0.0
        {
            return Err(CarouselError::InvalidConfig(
                "dot height must be > 0 and gap >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{FocusTriple, interpolate_clamped};

    #[test]
    fn midpoint_between_far_and_near_is_linear() {
        let value = interpolate_clamped([0.0, 100.0, 200.0], [0.9, 1.0, 0.9], 50.0);
        assert!((value - 0.95).abs() <= 1e-12);
    }

    #[test]
    fn slot_zero_extends_to_negative_offsets() {
        let triple = FocusTriple::new(6.0, 18.0);
        assert_eq!(triple.at(-500.0, 0, 300.0), 6.0);
        assert_eq!(triple.at(0.0, 0, 300.0), 18.0);
        assert_eq!(triple.at(f64::NAN, 0, 300.0), 6.0);
    }
}
