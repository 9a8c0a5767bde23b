pub mod model;
pub mod view;

pub use model::{
    ArcSegment, Gauge, GaugeGeometry, InvalidConfiguration, Limit, MeasureSpec, Point,
    PointerEvent, PointerPhase, Rect, Size, StepOutcome, Viewport,
};
pub use view::{Bitmap, CairoCanvas, Canvas, Stroke, draw, render};

/// Side length used when the host leaves the size open.
pub const DEFAULT_SIDE: u32 = 200;
pub const FULL_CIRCLE: f64 = 360.0;
/// Angle of the bottom of the ring. Angles grow clockwise from 3 o'clock.
pub const BOTTOM_ANGLE: f64 = 90.0;
