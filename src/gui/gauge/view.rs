use super::model::{ArcSegment, Gauge, Point, Rect, Size};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;

/// An image with a known pixel size.
pub trait Bitmap {
    fn natural_size(&self) -> Size;
}

impl Bitmap for Pixbuf {
    fn natural_size(&self) -> Size {
        Size::new(self.width() as f64, self.height() as f64)
    }
}

/// Unfilled, round-capped arc stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Srgba<f64>,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: Srgba<f64>, width: f64) -> Self {
        Self { color, width }
    }
}

/// The two drawing primitives the dial needs. Angles are in degrees, clockwise from
/// 3 o'clock, and arcs follow the ellipse inscribed in `bounds`.
pub trait Canvas {
    type Image: Bitmap;
    type Error;

    fn set_origin(&mut self, origin: Point);
    fn draw_arc(
        &mut self,
        bounds: Rect,
        segment: ArcSegment,
        stroke: &Stroke,
    ) -> Result<(), Self::Error>;
    fn draw_image(&mut self, image: &Self::Image, dest: Rect) -> Result<(), Self::Error>;
}

/// Draws the track, the active segments over it, then the icon. Without an icon
/// the ring is still drawn.
pub fn render<C: Canvas>(
    canvas: &mut C,
    gauge: &Gauge,
    icon: Option<&C::Image>,
    colors: &ThemeColors,
) -> Result<(), C::Error> {
    let geometry = gauge.geometry();
    let bounds = gauge.arc_bounds();

    canvas.set_origin(gauge.viewport().center());

    let track = Stroke::new(colors.track, geometry.stroke_width);
    for segment in geometry.segments() {
        canvas.draw_arc(bounds, segment, &track)?;
    }

    let accent = Stroke::new(colors.accent, geometry.stroke_width);
    for segment in geometry.segments().take(gauge.active() as usize) {
        canvas.draw_arc(bounds, segment, &accent)?;
    }

    if let Some(icon) = icon {
        canvas.draw_image(icon, gauge.icon_rect(icon.natural_size()))?;
    }
    Ok(())
}

pub struct CairoCanvas<'a> {
    cr: &'a Context,
}

impl<'a> CairoCanvas<'a> {
    pub fn new(cr: &'a Context) -> Self {
        Self { cr }
    }
}

impl Canvas for CairoCanvas<'_> {
    type Image = Pixbuf;
    type Error = cairo::Error;

    fn set_origin(&mut self, origin: Point) {
        self.cr.translate(origin.x, origin.y);
    }

    fn draw_arc(
        &mut self,
        bounds: Rect,
        segment: ArcSegment,
        stroke: &Stroke,
    ) -> Result<(), cairo::Error> {
        // a degenerate ellipse would leave cairo with a singular matrix
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return Ok(());
        }

        let cr = self.cr;
        let center = bounds.center();
        let start = segment.start.to_radians();

        cr.new_path();
        cr.save()?;
        cr.translate(center.x, center.y);
        cr.scale(bounds.width() / 2.0, bounds.height() / 2.0);
        cr.arc(0.0, 0.0, 1.0, start, start + segment.sweep.to_radians());
        cr.restore()?;

        let (r, g, b, a) = stroke.color.into_components();
        cr.set_source_rgba(r, g, b, a);
        cr.set_line_width(stroke.width);
        cr.set_line_cap(cairo::LineCap::Round);
        cr.stroke()
    }

    fn draw_image(&mut self, image: &Pixbuf, dest: Rect) -> Result<(), cairo::Error> {
        let natural = image.natural_size();
        if natural.width <= 0.0 || natural.height <= 0.0 {
            return Ok(());
        }

        let cr = self.cr;
        cr.save()?;
        cr.translate(dest.left, dest.top);
        cr.scale(dest.width() / natural.width, dest.height() / natural.height);
        cr.set_source_pixbuf(image, 0.0, 0.0);
        cr.paint()?;
        cr.restore()
    }
}

pub fn draw(
    cr: &Context,
    gauge: &Gauge,
    icon: Option<&Pixbuf>,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    render(&mut CairoCanvas::new(cr), gauge, icon, colors)
}
