use std::f64::consts::{FRAC_PI_2, PI};
use std::path::Path;

use cairo::{Context, Format, ImageSurface, LineCap, LineJoin};
use pango::FontDescription;
use tracing::trace;

use crate::core::PathCommand;
use crate::error::{CarouselError, CarouselResult};
use crate::render::{
    Color, LinePrimitive, PathPrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign,
    TextPrimitive,
};

const FONT_FAMILY: &str = "Sans";

/// Primitive counts of the last painted frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub rects_drawn: usize,
    pub lines_drawn: usize,
    pub paths_drawn: usize,
    pub texts_drawn: usize,
}

/// Renderers that can paint onto a context owned by someone else, such as a
/// GTK `DrawingArea` draw function.
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> CarouselResult<()>;
}

/// Cairo/Pango painter for carousel frames.
///
/// `Renderer::render` paints into an owned ARGB image surface (used for PNG
/// export); `CairoContextRenderer` paints into a host context.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> CarouselResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(CarouselError::InvalidData(format!(
                "cairo surface must be at least 1x1, got {width}x{height}"
            )));
        }
        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| cairo_error("create image surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::rgba(1.0, 1.0, 1.0, 0.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Background painted before each frame. Transparent by default so cards
    /// composite over whatever the host draws behind the widget.
    pub fn set_clear_color(&mut self, color: Color) -> CarouselResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    pub fn write_png(&self, path: &Path) -> CarouselResult<()> {
        let mut file = std::fs::File::create(path).map_err(|err| {
            CarouselError::InvalidData(format!("failed to create `{}`: {err}", path.display()))
        })?;
        self.surface.write_to_png(&mut file).map_err(|err| {
            CarouselError::InvalidData(format!("failed to encode `{}`: {err}", path.display()))
        })
    }

    fn paint(&mut self, context: &Context, frame: &RenderFrame) -> CarouselResult<()> {
        frame.validate()?;

        context.save().map_err(|err| cairo_error("save state", err))?;
        context.set_operator(cairo::Operator::Source);
        set_source(context, self.clear_color);
        context.paint().map_err(|err| cairo_error("clear", err))?;
        context
            .restore()
            .map_err(|err| cairo_error("restore state", err))?;

        // Painter's order: decoration and glass, dividers, trend, labels.
        let mut stats = CairoRenderStats::default();
        for rect in &frame.rects {
            fill_rect(context, rect)?;
            stats.rects_drawn += 1;
        }
        for line in &frame.lines {
            stroke_line(context, line)?;
            stats.lines_drawn += 1;
        }
        for path in &frame.paths {
            stroke_trend(context, path)?;
            stats.paths_drawn += 1;
        }
        for text in &frame.texts {
            show_text(context, text);
            stats.texts_drawn += 1;
        }

        trace!(?stats, "painted carousel frame");
        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> CarouselResult<()> {
        let context =
            Context::new(&self.surface).map_err(|err| cairo_error("create context", err))?;
        self.paint(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> CarouselResult<()> {
        self.paint(context, frame)
    }
}

fn set_source(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn fill_rect(context: &Context, rect: &RectPrimitive) -> CarouselResult<()> {
    rounded_rect(context, rect);
    set_source(context, rect.fill_color);
    if rect.border_width <= 0.0 {
        return context.fill().map_err(|err| cairo_error("fill rect", err));
    }
    context
        .fill_preserve()
        .map_err(|err| cairo_error("fill rect", err))?;
    set_source(context, rect.border_color);
    context.set_line_width(rect.border_width);
    context
        .stroke()
        .map_err(|err| cairo_error("stroke rect border", err))
}

/// Rectangle path with corners clamped to half the shorter side, so a square
/// with radius `side / 2` becomes a circle.
fn rounded_rect(context: &Context, rect: &RectPrimitive) {
    let radius = rect
        .corner_radius
        .min(rect.width / 2.0)
        .min(rect.height / 2.0);
    if radius <= 0.0 {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        return;
    }

    let (left, top) = (rect.x + radius, rect.y + radius);
    let (right, bottom) = (rect.x + rect.width - radius, rect.y + rect.height - radius);
    context.new_sub_path();
    context.arc(right, top, radius, -FRAC_PI_2, 0.0);
    context.arc(right, bottom, radius, 0.0, FRAC_PI_2);
    context.arc(left, bottom, radius, FRAC_PI_2, PI);
    context.arc(left, top, radius, PI, 3.0 * FRAC_PI_2);
    context.close_path();
}

fn stroke_line(context: &Context, line: &LinePrimitive) -> CarouselResult<()> {
    set_source(context, line.color);
    context.set_line_width(line.stroke_width);
    context.set_line_cap(LineCap::Butt);
    context.move_to(line.x1, line.y1);
    context.line_to(line.x2, line.y2);
    context.stroke().map_err(|err| cairo_error("stroke line", err))
}

fn stroke_trend(context: &Context, path: &PathPrimitive) -> CarouselResult<()> {
    let mut pen = (0.0, 0.0);
    for command in &path.commands {
        pen = match *command {
            PathCommand::MoveTo { x, y } => {
                context.move_to(x, y);
                (x, y)
            }
            PathCommand::QuadTo { cx, cy, x, y } => {
                // Degree elevation: cairo has no quadratic curve primitive.
                let (x0, y0) = pen;
                context.curve_to(
                    x0 + (cx - x0) * 2.0 / 3.0,
                    y0 + (cy - y0) * 2.0 / 3.0,
                    x + (cx - x) * 2.0 / 3.0,
                    y + (cy - y) * 2.0 / 3.0,
                    x,
                    y,
                );
                (x, y)
            }
        };
    }

    set_source(context, path.color);
    context.set_line_width(path.stroke_width);
    context.set_line_cap(LineCap::Round);
    context.set_line_join(LineJoin::Round);
    context.stroke().map_err(|err| cairo_error("stroke trend", err))
}

fn show_text(context: &Context, text: &TextPrimitive) {
    let mut font = FontDescription::new();
    font.set_family(FONT_FAMILY);
    font.set_absolute_size(text.font_size_px * f64::from(pango::SCALE));
    if text.bold {
        font.set_weight(pango::Weight::Bold);
    }

    let layout = pangocairo::functions::create_layout(context);
    layout.set_font_description(Some(&font));
    layout.set_text(&text.text);

    let width = f64::from(layout.pixel_size().0);
    let x = match text.h_align {
        TextHAlign::Left => text.x,
        TextHAlign::Center => text.x - width / 2.0,
        TextHAlign::Right => text.x - width,
    };
    set_source(context, text.color);
    context.move_to(x, text.y);
    pangocairo::functions::show_layout(context, &layout);
}

fn cairo_error(action: &str, err: cairo::Error) -> CarouselError {
    CarouselError::InvalidData(format!("cairo failed to {action}: {err}"))
}
