use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

const TRACK_FALLBACK: (f64, f64, f64, f64) = (0.53, 0.53, 0.53, 1.0);
const ACCENT_FALLBACK: (f64, f64, f64, f64) = (0.0, 0.0, 1.0, 1.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeColors {
    /// Inactive segments.
    pub track: Srgba<f64>,
    /// Active segments, drawn over the track.
    pub accent: Srgba<f64>,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            track: Srgba::from_components(TRACK_FALLBACK),
            accent: Srgba::from_components(ACCENT_FALLBACK),
        }
    }
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        let fallback = Self::default();
        Self {
            track: Self::lookup_color(context, "borders", fallback.track),
            accent: Self::lookup_color(context, "theme_selected_bg_color", fallback.accent),
        }
    }

    fn lookup_color(context: &gtk::StyleContext, name: &str, fallback: Srgba<f64>) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                Srgba::new(
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                )
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.voicedial-drawing-area {
    background: none;
}

.voicedial-toast {
    padding: 6px 14px;
    margin-bottom: 12px;
    border-radius: 14px;
    color: white;
    background-color: rgba(0, 0, 0, 0.75);
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
