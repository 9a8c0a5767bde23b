use crate::gui::gauge::{PointerEvent, PointerPhase, Viewport};
use gtk::prelude::*;
use gtk4 as gtk;

/// Applies the measured viewport as the preferred size. The window stays resizable and
/// later allocations arrive through the drawing area's `resize` signal.
pub fn apply_measured_size(
    window: &gtk::ApplicationWindow,
    drawing_area: &gtk::DrawingArea,
    viewport: Viewport,
) {
    let (width, height) = (to_gtk_size(viewport.width), to_gtk_size(viewport.height));
    drawing_area.set_content_width(width);
    drawing_area.set_content_height(height);
    window.set_default_size(width, height);
}

fn to_gtk_size(size: u32) -> i32 {
    i32::try_from(size).unwrap_or(i32::MAX)
}

pub fn from_gtk_size(size: i32) -> u32 {
    u32::try_from(size).unwrap_or(0)
}

/// GTK cancels a gesture without a position.
pub fn cancel_event() -> PointerEvent {
    PointerEvent::new(PointerPhase::Cancel, 0.0, 0.0)
}
