use crate::carousel::slot::{Slot, SlotTable};
use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumString};

pub const COMPACT_BREAKPOINT: f64 = 380.0;
pub const MIN_EFFECTIVE_WIDTH: f64 = 280.0;

const COMPACT_SPACING_FACTOR: f64 = 0.20;
const COMPACT_MIN_SPACING: f64 = 18.0;
const WIDE_SPACING_FACTOR: f64 = 0.22;
const WIDE_MIN_SPACING: f64 = 120.0;
const WIDE_MAX_SPACING: f64 = 320.0;

/// Widths the slot geometry may depend on.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub container_width: f64,
    pub window_width: f64,
}

impl Viewport {
    pub fn new(container_width: f64, window_width: f64) -> Self {
        Self {
            container_width,
            window_width,
        }
    }
}

/// Produces the slot table for a render pass.
pub trait SlotLayout {
    fn slots(&self, viewport: Viewport) -> SlotTable;

    /// Whether the table changes with the viewport, i.e. resizes need a re-render.
    fn is_responsive(&self) -> bool {
        false
    }
}

/// Fixed fan used by the hero section.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticLayout;

const STATIC_OUTER: Slot = Slot::new(-260.0, 20.0, 0.82, -18.0, 10, 0.6);
const STATIC_INNER: Slot = Slot::new(-120.0, 8.0, 0.92, -8.0, 20, 0.8);
const STATIC_CENTER: Slot = Slot::new(0.0, 0.0, 1.18, 0.0, 60, 1.0);

pub const STATIC_SLOTS: SlotTable = [
    STATIC_OUTER,
    STATIC_INNER,
    STATIC_CENTER,
    STATIC_INNER.mirrored(),
    STATIC_OUTER.mirrored(),
];

impl SlotLayout for StaticLayout {
    fn slots(&self, _viewport: Viewport) -> SlotTable {
        STATIC_SLOTS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Density {
    Compact,
    Wide,
}

/// Fan whose spacing follows the available width.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponsiveLayout;

impl ResponsiveLayout {
    /// Width the spacing is derived from. A container that has not been
    /// allocated yet (zero width) falls back to the window width.
    pub fn effective_width(viewport: Viewport) -> f64 {
        let container = if viewport.container_width > 0.0 {
            viewport.container_width
        } else {
            viewport.window_width
        };
        container.min(viewport.window_width).max(MIN_EFFECTIVE_WIDTH)
    }

    pub fn density(viewport: Viewport) -> Density {
        if viewport.window_width <= COMPACT_BREAKPOINT {
            Density::Compact
        } else {
            Density::Wide
        }
    }

    pub fn spacing(viewport: Viewport) -> f64 {
        let width = Self::effective_width(viewport);
        match Self::density(viewport) {
            Density::Compact => (width * COMPACT_SPACING_FACTOR).max(COMPACT_MIN_SPACING),
            Density::Wide => {
                (width * WIDE_SPACING_FACTOR).clamp(WIDE_MIN_SPACING, WIDE_MAX_SPACING)
            }
        }
    }
}

impl SlotLayout for ResponsiveLayout {
    fn slots(&self, viewport: Viewport) -> SlotTable {
        let s = Self::spacing(viewport);
        let (outer, inner, center) = match Self::density(viewport) {
            Density::Compact => (
                Slot::new(-2.0 * s, 10.0, 0.78, -10.0, 6, 0.6),
                Slot::new(-s, 5.0, 0.9, -5.0, 20, 0.85),
                Slot::new(0.0, 0.0, 1.05, 0.0, 70, 1.0),
            ),
            Density::Wide => (
                Slot::new(-2.0 * s, 18.0, 0.78, -14.0, 10, 0.5),
                Slot::new(-s, 8.0, 0.92, -6.0, 25, 0.8),
                Slot::new(0.0, 0.0, 1.12, 0.0, 70, 1.0),
            ),
        };
        [outer, inner, center, inner.mirrored(), outer.mirrored()]
    }

    fn is_responsive(&self) -> bool {
        true
    }
}

/// Layout variant selectable from the config file.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    #[strum(serialize = "static", serialize = "fixed")]
    Static,
    #[default]
    #[strum(serialize = "responsive", serialize = "fluid")]
    Responsive,
}

impl LayoutKind {
    /// Card that starts in the center slot.
    pub fn initial_center(&self, len: usize) -> usize {
        match self {
            Self::Static => 0,
            Self::Responsive => 2.min(len.saturating_sub(1)),
        }
    }

    /// Default (mouse, touch) swipe thresholds in pixels.
    pub fn default_thresholds(&self) -> (f64, f64) {
        match self {
            Self::Static => (50.0, 40.0),
            Self::Responsive => (30.0, 30.0),
        }
    }
}

impl SlotLayout for LayoutKind {
    fn slots(&self, viewport: Viewport) -> SlotTable {
        match self {
            Self::Static => StaticLayout.slots(viewport),
            Self::Responsive => ResponsiveLayout.slots(viewport),
        }
    }

    fn is_responsive(&self) -> bool {
        match self {
            Self::Static => StaticLayout.is_responsive(),
            Self::Responsive => ResponsiveLayout.is_responsive(),
        }
    }
}
