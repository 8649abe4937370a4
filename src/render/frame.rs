use crate::core::Viewport;
use crate::error::{CarouselError, CarouselResult};
use crate::render::{LinePrimitive, PathPrimitive, RectPrimitive, TextPrimitive};

/// Uniform scale about a pivot, then translation, then opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTransform {
    pub scale: f64,
    pub pivot_x: f64,
    pub pivot_y: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub opacity: f64,
}

impl FrameTransform {
    #[must_use]
    pub const fn translation(translate_x: f64, translate_y: f64) -> Self {
        Self {
            scale: 1.0,
            pivot_x: 0.0,
            pivot_y: 0.0,
            translate_x,
            translate_y,
            opacity: 1.0,
        }
    }

    #[must_use]
    pub fn apply(self, x: f64, y: f64) -> (f64, f64) {
        (
            self.pivot_x + (x - self.pivot_x) * self.scale + self.translate_x,
            self.pivot_y + (y - self.pivot_y) * self.scale + self.translate_y,
        )
    }
}

/// Backend-agnostic scene for one draw pass.
///
/// Primitives are drawn rects first, then lines, paths and texts.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub rects: Vec<RectPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub paths: Vec<PathPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            rects: Vec::new(),
            lines: Vec::new(),
            paths: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: PathPrimitive) -> Self {
        self.paths.push(path);
        self
    }

    /// Appends every primitive of `other`, keeping this frame's viewport.
    pub fn append(&mut self, other: RenderFrame) {
        self.rects.extend(other.rects);
        self.lines.extend(other.lines);
        self.paths.extend(other.paths);
        self.texts.extend(other.texts);
    }

    /// Copy of the frame with geometry, stroke widths, font sizes and alpha
    /// adjusted by `transform`.
    #[must_use]
    pub fn transformed(&self, transform: FrameTransform) -> Self {
        let scale = transform.scale;
        let opacity = transform.opacity;

        let rects = self
            .rects
            .iter()
            .map(|rect| {
                let (x, y) = transform.apply(rect.x, rect.y);
                RectPrimitive {
                    x,
                    y,
                    width: rect.width * scale,
                    height: rect.height * scale,
                    fill_color: rect.fill_color.faded(opacity),
                    border_width: rect.border_width * scale,
                    border_color: rect.border_color.faded(opacity),
                    corner_radius: rect.corner_radius * scale,
                }
            })
            .collect();
        let lines = self
            .lines
            .iter()
            .map(|line| {
                let (x1, y1) = transform.apply(line.x1, line.y1);
                let (x2, y2) = transform.apply(line.x2, line.y2);
                LinePrimitive::new(
                    x1,
                    y1,
                    x2,
                    y2,
                    line.stroke_width * scale,
                    line.color.faded(opacity),
                )
            })
            .collect();
        let paths = self
            .paths
            .iter()
            .map(|path| {
                let mut mapped = path.mapped(|x, y| transform.apply(x, y));
                mapped.stroke_width *= scale;
                mapped.color = mapped.color.faded(opacity);
                mapped
            })
            .collect();
        let texts = self
            .texts
            .iter()
            .map(|text| {
                let (x, y) = transform.apply(text.x, text.y);
                TextPrimitive {
                    text: text.text.clone(),
                    x,
                    y,
                    font_size_px: text.font_size_px * scale,
                    color: text.color.faded(opacity),
                    h_align: text.h_align,
                    bold: text.bold,
                }
            })
            .collect();

        Self {
            viewport: self.viewport,
            rects,
            lines,
            paths,
            texts,
        }
    }

    pub fn validate(&self) -> CarouselResult<()> {
        if !self.viewport.is_valid() {
            return Err(CarouselError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for rect in &self.rects {
            rect.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }
        for path in &self.paths {
            path.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
            && self.rects.is_empty()
            && self.paths.is_empty()
            && self.texts.is_empty()
    }
}
