use crate::carousel::input::Step;
use crate::carousel::layout::{SlotLayout, Viewport};
use crate::carousel::slot::{Slot, shortest_distance, slot_index};
use crate::carousel::CENTER_SLOT;

/// Render output for a single card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardVisual {
    pub slot: Slot,
    pub slot_index: usize,
    pub is_center: bool,
}

/// Receives the visuals written by [`Carousel::render`].
pub trait VisualSink {
    /// Called once per render pass before any card is applied.
    fn begin(&mut self, _len: usize) {}

    fn apply(&mut self, index: usize, visual: CardVisual);
}

impl VisualSink for Vec<CardVisual> {
    fn begin(&mut self, _len: usize) {
        self.clear();
    }

    fn apply(&mut self, _index: usize, visual: CardVisual) {
        self.push(visual);
    }
}

/// Keeps track of which card sits in the center and pushes the resulting
/// slot assignment into a sink after every change.
#[derive(Debug)]
pub struct Carousel<L, S> {
    layout: L,
    sink: S,
    len: usize,
    center: usize,
    viewport: Viewport,
}

impl<L: SlotLayout, S: VisualSink> Carousel<L, S> {
    /// Returns `None` when there are no cards, leaving the widget inert.
    ///
    /// The initial center is clamped to the last card. The first render happens
    /// here so the sink is populated before any input arrives.
    pub fn new(
        layout: L,
        sink: S,
        len: usize,
        center: usize,
        viewport: Viewport,
    ) -> Option<Self> {
        if len == 0 {
            log::warn!("Carousel has no cards, nothing to render");
            return None;
        }
        let mut carousel = Self {
            layout,
            sink,
            len,
            center: center.min(len - 1),
            viewport,
        };
        carousel.render();
        Some(carousel)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn center_index(&self) -> usize {
        self.center
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn next(&mut self) {
        self.center = (self.center + 1) % self.len;
        log::debug!("Carousel next -> {}", self.center);
        self.render();
    }

    pub fn prev(&mut self) {
        self.center = (self.center + self.len - 1) % self.len;
        log::debug!("Carousel prev -> {}", self.center);
        self.render();
    }

    pub fn step(&mut self, step: Step) {
        match step {
            Step::Next => self.next(),
            Step::Prev => self.prev(),
        }
    }

    /// Brings `index` to the center in one jump. Returns whether the center moved.
    pub fn select_card(&mut self, index: usize) -> bool {
        if index == self.center || index >= self.len {
            return false;
        }
        let steps = shortest_distance(self.len, self.center, index);
        log::debug!(
            "Carousel select {} ({:+} from {})",
            index,
            steps,
            self.center
        );
        self.center = index;
        self.render();
        true
    }

    /// Records the new viewport. Returns whether the slot geometry changed with it.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        self.viewport = viewport;
        if self.layout.is_responsive() {
            self.render();
            true
        } else {
            false
        }
    }

    /// Swaps the layout, e.g. after a config reload, and re-renders.
    pub fn set_layout(&mut self, layout: L) {
        self.layout = layout;
        self.render();
    }

    /// Adopts a new card count, keeping the center when it still exists.
    /// Returns `false` (and changes nothing) when `len` is zero.
    pub fn set_len(&mut self, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        self.len = len;
        self.center = self.center.min(len - 1);
        self.render();
        true
    }

    pub fn render(&mut self) {
        let slots = self.layout.slots(self.viewport);
        self.sink.begin(self.len);
        for index in 0..self.len {
            let slot_index = slot_index(self.len, self.center, index);
            self.sink.apply(
                index,
                CardVisual {
                    slot: slots[slot_index],
                    slot_index,
                    is_center: slot_index == CENTER_SLOT,
                },
            );
        }
    }
}
