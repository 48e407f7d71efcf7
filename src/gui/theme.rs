use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

const STAGE_CSS: &str = "
.roleta-stage {
    background-color: @theme_bg_color;
}
";

/// A named GTK theme color with the value used when the theme lacks it.
struct NamedColor {
    name: &'static str,
    fallback: Srgba<f64>,
    /// Replaces the theme's alpha when set.
    alpha: Option<f64>,
}

impl NamedColor {
    const fn new(name: &'static str, fallback: Srgba<f64>, alpha: Option<f64>) -> Self {
        Self {
            name,
            fallback,
            alpha,
        }
    }

    fn resolve(&self, context: &gtk::StyleContext) -> Srgba<f64> {
        let Some(rgba) = context.lookup_color(self.name) else {
            log::debug!("Theme has no @{}, using fallback", self.name);
            return self.fallback;
        };
        let mut color = Srgba::new(
            rgba.red() as f64,
            rgba.green() as f64,
            rgba.blue() as f64,
            rgba.alpha() as f64,
        );
        if let Some(alpha) = self.alpha {
            color.alpha = alpha;
        }
        color
    }
}

const CARD: NamedColor =
    NamedColor::new("theme_base_color", Srgba::new(0.18, 0.18, 0.2, 1.0), Some(1.0));
const CENTER_OUTLINE: NamedColor = NamedColor::new(
    "theme_selected_bg_color",
    Srgba::new(0.4, 0.4, 0.8, 0.9),
    Some(0.9),
);
const LABEL: NamedColor =
    NamedColor::new("theme_fg_color", Srgba::new(0.95, 0.95, 0.95, 1.0), None);

pub struct ThemeColors {
    pub card: Srgba<f64>,
    pub center_outline: Srgba<f64>,
    pub label: Srgba<f64>,
    pub label_shade: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            card: CARD.resolve(context),
            center_outline: CENTER_OUTLINE.resolve(context),
            label: LABEL.resolve(context),
            label_shade: Srgba::new(0.0, 0.0, 0.0, 0.35),
        }
    }
}

pub fn load_css() {
    let Some(display) = gdk::Display::default() else {
        log::warn!("No display, skipping stage CSS");
        return;
    };
    let provider = gtk::CssProvider::new();
    provider.load_from_data(STAGE_CSS);
    gtk::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}
