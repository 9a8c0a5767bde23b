use crate::config::GaugeConfig;
use crate::events::Step;
use crate::gui::gauge::{BOTTOM_ANGLE, DEFAULT_SIDE, FULL_CIRCLE};
use std::f64::consts::SQRT_2;
use strum::Display as StrumDisplay;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Edges of a rectangle, relative to the viewport center once drawing starts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn centered(half_width: f64, half_height: f64) -> Self {
        Self {
            left: -half_width,
            top: -half_height,
            right: half_width,
            bottom: half_height,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }
}

/// One slice of the ring, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    pub start: f64,
    pub sweep: f64,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidConfiguration {
    #[error("Segment count must be at least 1")]
    NoSegments,
    #[error("Segments do not fit in the ring: each would sweep {sweep} degrees")]
    NonPositiveSweep { sweep: f64 },
    #[error("Initial active count {initial} exceeds segment count {segments}")]
    InitialActiveOutOfRange { initial: u32, segments: u32 },
}

/// Angular layout of the ring, derived from configuration alone.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeGeometry {
    pub start_angle: f64,
    pub end_angle: f64,
    pub segment_sweep: f64,
    pub gap: f64,
    pub segment_count: u32,
    pub stroke_width: f64,
}

impl GaugeGeometry {
    pub fn from_config(config: &GaugeConfig) -> Result<Self, InvalidConfiguration> {
        if config.segment_count < 1 {
            return Err(InvalidConfiguration::NoSegments);
        }

        let count = config.segment_count as f64;
        let reserved_half = config.reserved_arc_degrees / 2.0;
        let usable = FULL_CIRCLE - config.reserved_arc_degrees - config.gap_degree * (count - 1.0);
        let segment_sweep = usable / count;

        if segment_sweep.is_nan() || segment_sweep <= 0.0 {
            return Err(InvalidConfiguration::NonPositiveSweep {
                sweep: segment_sweep,
            });
        }

        Ok(Self {
            start_angle: BOTTOM_ANGLE + reserved_half,
            end_angle: FULL_CIRCLE + (BOTTOM_ANGLE - reserved_half),
            segment_sweep,
            gap: config.gap_degree,
            segment_count: config.segment_count,
            stroke_width: config.stroke_width as f64,
        })
    }

    /// Every segment of the ring in drawing order, clockwise from the left edge of the
    /// reserved arc. Foreground arcs are a prefix of this sequence.
    pub fn segments(&self) -> impl Iterator<Item = ArcSegment> + '_ {
        let advance = self.gap + self.segment_sweep;
        (0..self.segment_count).map(move |i| ArcSegment {
            start: self.start_angle + i as f64 * advance,
            sweep: self.segment_sweep,
        })
    }

    pub fn arc_bounds(&self, viewport: Viewport) -> Rect {
        let (half_w, half_h) = viewport.half_extents();
        Rect {
            left: -half_w + self.stroke_width,
            top: -half_h + self.stroke_width,
            right: half_w - self.stroke_width,
            bottom: half_h - self.stroke_width,
        }
    }

    /// Square inscribed in the inner circle, grown to at least the icon's natural size.
    pub fn icon_rect(&self, viewport: Viewport, natural: Size) -> Rect {
        let (half_w, _) = viewport.half_extents();
        let inner_radius = (half_w - self.stroke_width) / 2.0;
        let half = inner_radius * SQRT_2 / 2.0;

        Rect::centered(
            half.max(natural.width / 2.0),
            half.max(natural.height / 2.0),
        )
    }
}

/// The pixel area the host assigned to the dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        let (half_w, half_h) = self.half_extents();
        Point::new(half_w, half_h)
    }

    fn half_extents(&self) -> (f64, f64) {
        (self.width as f64 / 2.0, self.height as f64 / 2.0)
    }
}

/// Size constraint for one axis, as handed down by the host layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureSpec {
    Exactly(u32),
    AtMost(u32),
    Unspecified,
}

impl MeasureSpec {
    pub fn from_hint(hint: Option<u32>) -> Self {
        hint.map_or(Self::Unspecified, Self::Exactly)
    }

    pub fn resolve(self) -> u32 {
        match self {
            Self::Exactly(size) => size,
            Self::AtMost(_) | Self::Unspecified => DEFAULT_SIDE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    /// Relative to the viewport's top-left corner.
    pub position: Point,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, x: f64, y: f64) -> Self {
        Self {
            phase,
            position: Point::new(x, y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum Limit {
    #[strum(to_string = "Volume at maximum")]
    Maximum,
    #[strum(to_string = "Volume at minimum")]
    Minimum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Changed(u32),
    AtLimit(Limit),
}

impl StepOutcome {
    pub fn should_redraw(&self) -> bool {
        matches!(self, Self::Changed(_))
    }

    pub fn limit(&self) -> Option<Limit> {
        match self {
            Self::AtLimit(limit) => Some(*limit),
            Self::Changed(_) => None,
        }
    }
}

/// Ring geometry plus the one piece of mutable state, the active segment count.
#[derive(Debug, Clone)]
pub struct Gauge {
    geometry: GaugeGeometry,
    active: u32,
    viewport: Viewport,
}

impl Gauge {
    pub fn new(config: &GaugeConfig) -> Result<Self, InvalidConfiguration> {
        let geometry = GaugeGeometry::from_config(config)?;
        if config.initial_active_count > geometry.segment_count {
            return Err(InvalidConfiguration::InitialActiveOutOfRange {
                initial: config.initial_active_count,
                segments: geometry.segment_count,
            });
        }

        Ok(Self {
            geometry,
            active: config.initial_active_count,
            viewport: Viewport::default(),
        })
    }

    pub fn geometry(&self) -> &GaugeGeometry {
        &self.geometry
    }

    pub fn active(&self) -> u32 {
        self.active
    }

    pub fn segment_count(&self) -> u32 {
        self.geometry.segment_count
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> Viewport {
        self.viewport = Viewport::new(width.resolve(), height.resolve());
        self.viewport
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width, height);
    }

    pub fn arc_bounds(&self) -> Rect {
        self.geometry.arc_bounds(self.viewport)
    }

    pub fn icon_rect(&self, natural: Size) -> Rect {
        self.geometry.icon_rect(self.viewport, natural)
    }

    pub fn increment(&mut self) -> StepOutcome {
        if self.active == self.geometry.segment_count {
            return StepOutcome::AtLimit(Limit::Maximum);
        }
        self.active += 1;
        StepOutcome::Changed(self.active)
    }

    pub fn decrement(&mut self) -> StepOutcome {
        if self.active == 0 {
            return StepOutcome::AtLimit(Limit::Minimum);
        }
        self.active -= 1;
        StepOutcome::Changed(self.active)
    }

    pub fn step(&mut self, step: Step) -> StepOutcome {
        match step {
            Step::Increment => self.increment(),
            Step::Decrement => self.decrement(),
        }
    }

    /// Rejects counts above the segment count the same way `increment` does at the top.
    pub fn set_active(&mut self, count: u32) -> StepOutcome {
        if count > self.geometry.segment_count {
            return StepOutcome::AtLimit(Limit::Maximum);
        }
        self.active = count;
        StepOutcome::Changed(self.active)
    }

    /// Left half decrements, right half (center included) increments.
    pub fn step_at(&self, x: f64) -> Step {
        if x < self.viewport.width as f64 / 2.0 {
            Step::Decrement
        } else {
            Step::Increment
        }
    }

    /// Every phase is claimed, only the release acts.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<StepOutcome> {
        match event.phase {
            PointerPhase::Up => Some(self.step(self.step_at(event.position.x))),
            PointerPhase::Down | PointerPhase::Move | PointerPhase::Cancel => None,
        }
    }

    /// Swaps in new geometry, keeping the viewport and clamping the active count.
    pub fn reconfigure(&mut self, config: &GaugeConfig) -> Result<(), InvalidConfiguration> {
        let geometry = GaugeGeometry::from_config(config)?;
        self.active = self.active.min(geometry.segment_count);
        self.geometry = geometry;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn config(segments: u32, initial: u32) -> GaugeConfig {
        GaugeConfig {
            segment_count: segments,
            initial_active_count: initial,
            ..GaugeConfig::default()
        }
    }

    fn gauge(segments: u32, initial: u32) -> Gauge {
        let mut gauge = Gauge::new(&config(segments, initial)).unwrap();
        gauge.resize(200, 200);
        gauge
    }

    fn tap(gauge: &mut Gauge, x: f64) -> Option<StepOutcome> {
        gauge.handle_pointer(PointerEvent::new(PointerPhase::Down, x, 100.0));
        gauge.handle_pointer(PointerEvent::new(PointerPhase::Up, x, 100.0))
    }

    #[test]
    fn test_default_geometry() {
        let geometry = GaugeGeometry::from_config(&GaugeConfig::default()).unwrap();

        assert!((geometry.segment_sweep - 21.0).abs() < EPSILON);
        assert_eq!(geometry.start_angle, 120.0);
        assert_eq!(geometry.end_angle, 420.0);
    }

    #[test]
    fn test_segments_fill_the_open_ring() {
        for segments in 1..=24 {
            for (gap, reserved) in [(0.0, 0.0), (2.5, 45.0), (10.0, 60.0), (4.0, 120.0)] {
                let config = GaugeConfig {
                    gap_degree: gap,
                    reserved_arc_degrees: reserved,
                    ..config(segments, 0)
                };
                let Ok(geometry) = GaugeGeometry::from_config(&config) else {
                    continue;
                };
                let total = geometry.segment_sweep * segments as f64 + gap * (segments - 1) as f64;
                assert!((total - (360.0 - reserved)).abs() < EPSILON);

                let last = geometry.segments().last().unwrap();
                assert!((last.start + last.sweep - geometry.end_angle).abs() < EPSILON);
            }
        }
    }

    #[test]
    fn test_segment_schedule() {
        let geometry = GaugeGeometry::from_config(&GaugeConfig::default()).unwrap();
        let starts: Vec<f64> = geometry.segments().map(|s| s.start).collect();

        assert_eq!(starts.len(), 10);
        assert!((starts[0] - 120.0).abs() < EPSILON);
        assert!((starts[1] - 151.0).abs() < EPSILON);
        assert!((starts[9] - 399.0).abs() < EPSILON);
    }

    #[test]
    fn test_invalid_configurations() {
        assert_eq!(
            Gauge::new(&config(0, 0)).unwrap_err(),
            InvalidConfiguration::NoSegments
        );

        // 36 segments with 10 degree gaps need more than 300 degrees of gap alone
        assert!(matches!(
            Gauge::new(&config(36, 1)).unwrap_err(),
            InvalidConfiguration::NonPositiveSweep { sweep } if sweep <= 0.0
        ));

        let full_reserve = GaugeConfig {
            reserved_arc_degrees: 360.0,
            gap_degree: 0.0,
            ..config(1, 0)
        };
        assert!(matches!(
            Gauge::new(&full_reserve).unwrap_err(),
            InvalidConfiguration::NonPositiveSweep { .. }
        ));

        assert_eq!(
            Gauge::new(&config(5, 6)).unwrap_err(),
            InvalidConfiguration::InitialActiveOutOfRange {
                initial: 6,
                segments: 5
            }
        );
    }

    #[test]
    fn test_taps_to_maximum() {
        let mut gauge = gauge(10, 1);

        for expected in 2..=10 {
            assert_eq!(tap(&mut gauge, 150.0), Some(StepOutcome::Changed(expected)));
        }
        assert_eq!(
            tap(&mut gauge, 150.0),
            Some(StepOutcome::AtLimit(Limit::Maximum))
        );
        assert_eq!(gauge.active(), 10);
    }

    #[test]
    fn test_taps_to_minimum() {
        let mut gauge = gauge(10, 1);

        assert_eq!(tap(&mut gauge, 20.0), Some(StepOutcome::Changed(0)));
        assert_eq!(
            tap(&mut gauge, 20.0),
            Some(StepOutcome::AtLimit(Limit::Minimum))
        );
        assert_eq!(gauge.active(), 0);
    }

    #[test]
    fn test_center_tap_increments() {
        let mut gauge = gauge(10, 1);
        assert_eq!(gauge.step_at(100.0), Step::Increment);
        assert_eq!(gauge.step_at(99.999), Step::Decrement);
        assert_eq!(tap(&mut gauge, 100.0), Some(StepOutcome::Changed(2)));
    }

    #[test]
    fn test_only_release_changes_state() {
        let mut gauge = gauge(10, 4);

        for phase in [PointerPhase::Down, PointerPhase::Move, PointerPhase::Cancel] {
            assert_eq!(
                gauge.handle_pointer(PointerEvent::new(phase, 180.0, 10.0)),
                None
            );
        }
        assert_eq!(gauge.active(), 4);
    }

    #[test]
    fn test_active_count_stays_in_range() {
        let mut gauge = gauge(3, 0);
        let steps = [
            Step::Decrement,
            Step::Increment,
            Step::Increment,
            Step::Increment,
            Step::Increment,
            Step::Increment,
            Step::Decrement,
        ];

        let mut limits = 0;
        for step in steps {
            if gauge.step(step).limit().is_some() {
                limits += 1;
            }
            assert!(gauge.active() <= gauge.segment_count());
        }
        assert_eq!(limits, 3);
        assert_eq!(gauge.active(), 2);
    }

    #[test]
    fn test_steps_invert_away_from_limits() {
        for start in 1..10 {
            let mut gauge = gauge(10, start);
            gauge.increment();
            gauge.decrement();
            assert_eq!(gauge.active(), start);
            gauge.decrement();
            gauge.increment();
            assert_eq!(gauge.active(), start);
        }
    }

    #[test]
    fn test_set_active_is_bounded() {
        let mut gauge = gauge(10, 1);

        assert_eq!(gauge.set_active(7), StepOutcome::Changed(7));
        assert_eq!(
            gauge.set_active(11),
            StepOutcome::AtLimit(Limit::Maximum)
        );
        assert_eq!(gauge.active(), 7);
        assert_eq!(gauge.set_active(0), StepOutcome::Changed(0));
    }

    #[test]
    fn test_measure() {
        let mut gauge = gauge(10, 1);

        assert_eq!(
            gauge.measure(MeasureSpec::AtMost(800), MeasureSpec::Unspecified),
            Viewport::new(200, 200)
        );
        assert_eq!(
            gauge.measure(MeasureSpec::Exactly(320), MeasureSpec::AtMost(50)),
            Viewport::new(320, 200)
        );
        assert_eq!(
            gauge.measure(MeasureSpec::from_hint(Some(64)), MeasureSpec::from_hint(None)),
            Viewport::new(64, 200)
        );
    }

    #[test]
    fn test_resize_recomputes_bounds_but_keeps_state() {
        let mut gauge = gauge(10, 6);
        assert_eq!(gauge.arc_bounds(), Rect::centered(80.0, 80.0));

        gauge.resize(400, 300);
        assert_eq!(gauge.active(), 6);
        assert_eq!(
            gauge.arc_bounds(),
            Rect {
                left: -180.0,
                top: -130.0,
                right: 180.0,
                bottom: 130.0
            }
        );
        assert_eq!(gauge.arc_bounds().center(), Point::default());

        // inner radius (200 - 20) / 2 = 90
        let half = 90.0 * SQRT_2 / 2.0;
        assert_eq!(gauge.icon_rect(Size::default()), Rect::centered(half, half));
    }

    #[test]
    fn test_icon_rect_never_smaller_than_icon() {
        let gauge = gauge(10, 1);
        // inner radius (100 - 20) / 2 = 40, half side ~28.3
        let rect = gauge.icon_rect(Size::new(72.0, 96.0));

        assert_eq!(rect.width(), 72.0);
        assert_eq!(rect.height(), 96.0);
        assert_eq!(rect.center(), Point::default());

        let small = gauge.icon_rect(Size::new(16.0, 16.0));
        assert!((small.width() - 40.0 * SQRT_2).abs() < EPSILON);
        assert!((small.height() - 40.0 * SQRT_2).abs() < EPSILON);
    }

    #[test]
    fn test_reconfigure_clamps_active() {
        let mut gauge = gauge(10, 8);

        gauge.reconfigure(&config(5, 0)).unwrap();
        assert_eq!(gauge.active(), 5);
        assert_eq!(gauge.segment_count(), 5);
        assert_eq!(gauge.viewport(), Viewport::new(200, 200));

        assert_eq!(
            gauge.reconfigure(&config(0, 0)),
            Err(InvalidConfiguration::NoSegments)
        );
        assert_eq!(gauge.segment_count(), 5);
    }

    #[test]
    fn test_limit_messages() {
        assert_eq!(Limit::Maximum.to_string(), "Volume at maximum");
        assert_eq!(Limit::Minimum.to_string(), "Volume at minimum");
    }
}
