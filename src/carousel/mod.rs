pub mod controller;
pub mod input;
pub mod layout;
pub mod scene;
pub mod slot;

pub use controller::{CardVisual, Carousel, VisualSink};
pub use input::{ClickZone, DragTracker, PointerKind, Step, Thresholds};
pub use layout::{LayoutKind, ResponsiveLayout, SlotLayout, StaticLayout, Viewport};
pub use scene::{CardSize, Point, Scene};
pub use slot::{Slot, SlotTable, shortest_distance, slot_index};

pub const SLOT_COUNT: usize = 5;
pub const CENTER_SLOT: usize = 2;
pub const MAX_DISTANCE: isize = 2;

pub const CARD_WIDTH: f64 = 220.0;
pub const CARD_HEIGHT: f64 = 300.0;

// Container click zones, as fractions of the container width
pub const PREV_ZONE_END: f64 = 0.4;
pub const NEXT_ZONE_START: f64 = 0.6;
