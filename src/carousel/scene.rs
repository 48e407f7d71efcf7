use crate::carousel::controller::{CardVisual, Carousel, VisualSink};
use crate::carousel::input::ClickZone;
use crate::carousel::layout::SlotLayout;
use crate::carousel::{CARD_HEIGHT, CARD_WIDTH};

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

/// Unscaled card dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardSize {
    pub width: f64,
    pub height: f64,
}

impl CardSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for CardSize {
    fn default() -> Self {
        Self::new(CARD_WIDTH, CARD_HEIGHT)
    }
}

/// Last rendered visual of every card.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    visuals: Vec<Option<CardVisual>>,
}

impl VisualSink for Scene {
    fn begin(&mut self, len: usize) {
        self.visuals.resize(len, None);
    }

    fn apply(&mut self, index: usize, visual: CardVisual) {
        if let Some(entry) = self.visuals.get_mut(index) {
            *entry = Some(visual);
        }
    }
}

impl Scene {
    pub fn len(&self) -> usize {
        self.visuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }

    pub fn visual(&self, index: usize) -> Option<&CardVisual> {
        self.visuals.get(index).and_then(Option::as_ref)
    }

    /// Cards back to front: ascending depth, later cards above earlier ones on ties.
    pub fn paint_order(&self) -> Vec<(usize, CardVisual)> {
        let mut order: Vec<(usize, CardVisual)> = self
            .visuals
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| (i, v)))
            .collect();
        order.sort_by_key(|(_, v)| v.slot.depth);
        order
    }

    /// Topmost card under `point`. `origin` is where the center slot sits.
    pub fn hit_test(&self, point: Point, origin: Point, size: CardSize) -> Option<usize> {
        self.paint_order()
            .into_iter()
            .rev()
            .find(|(_, v)| Self::contains(v, point, origin, size))
            .map(|(i, _)| i)
    }

    fn contains(visual: &CardVisual, point: Point, origin: Point, size: CardSize) -> bool {
        let slot = &visual.slot;
        if slot.scale <= 0.0 {
            return false;
        }
        // undo translate, then scale, then rotation
        let dx = (point.x - origin.x - slot.x) / slot.scale;
        let dy = (point.y - origin.y - slot.y) / slot.scale;
        let (sin, cos) = slot.rotate_deg.to_radians().sin_cos();
        let (lx, ly) = (dx * cos + dy * sin, -dx * sin + dy * cos);
        lx.abs() <= size.width / 2.0 && ly.abs() <= size.height / 2.0
    }
}

impl<L: SlotLayout> Carousel<L, Scene> {
    /// Handles a click inside a container `width` wide whose center slot sits
    /// at `origin`.
    ///
    /// A card under the pointer is selected and the side zones are skipped.
    /// Only empty space falls through to prev/next. Returns whether the
    /// center moved.
    pub fn click(&mut self, point: Point, origin: Point, width: f64) -> bool {
        if let Some(index) = self.sink().hit_test(point, origin, CardSize::default()) {
            return self.select_card(index);
        }
        match ClickZone::resolve(point.x, width).step() {
            Some(step) => {
                self.step(step);
                true
            }
            None => false,
        }
    }
}
