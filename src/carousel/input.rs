use crate::carousel::{NEXT_ZONE_START, PREV_ZONE_END};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Next,
    Prev,
}

impl Step {
    /// Swiping left (negative travel) advances, swiping right goes back.
    pub fn from_swipe(diff: f64, threshold: f64) -> Option<Self> {
        if diff < -threshold {
            Some(Self::Next)
        } else if diff > threshold {
            Some(Self::Prev)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
}

/// Minimum horizontal travel, in pixels, for a release to count as a swipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub mouse: f64,
    pub touch: f64,
}

impl Thresholds {
    pub fn new(mouse: f64, touch: f64) -> Self {
        Self { mouse, touch }
    }

    pub fn for_kind(&self, kind: PointerKind) -> f64 {
        match kind {
            PointerKind::Mouse => self.mouse,
            PointerKind::Touch => self.touch,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Press {
    x: f64,
    kind: PointerKind,
}

/// Turns press/release pairs into navigation steps.
#[derive(Debug, Clone)]
pub struct DragTracker {
    thresholds: Thresholds,
    press: Option<Press>,
}

impl DragTracker {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            press: None,
        }
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub fn set_thresholds(&mut self, thresholds: Thresholds) {
        self.thresholds = thresholds;
    }

    pub fn is_dragging(&self) -> bool {
        self.press.is_some()
    }

    pub fn press(&mut self, x: f64, kind: PointerKind) {
        self.press = Some(Press { x, kind });
    }

    /// Movement while pressed. Cards do not follow the pointer yet.
    pub fn track(&mut self, x: f64) {
        if let Some(press) = self.press {
            log::trace!("Drag at {:.1} ({:+.1})", x, x - press.x);
        }
    }

    /// Ends the drag. A release without a matching press yields nothing.
    pub fn release(&mut self, x: f64) -> Option<Step> {
        let press = self.press.take()?;
        Step::from_swipe(x - press.x, self.thresholds.for_kind(press.kind))
    }

    pub fn cancel(&mut self) {
        self.press = None;
    }
}

/// Region of the container a click landed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickZone {
    Prev,
    Dead,
    Next,
}

impl ClickZone {
    pub fn resolve(x: f64, width: f64) -> Self {
        if x > width * NEXT_ZONE_START {
            Self::Next
        } else if x < width * PREV_ZONE_END {
            Self::Prev
        } else {
            Self::Dead
        }
    }

    pub fn step(&self) -> Option<Step> {
        match self {
            Self::Prev => Some(Step::Prev),
            Self::Next => Some(Step::Next),
            Self::Dead => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swipe_left_past_threshold_advances_once() {
        let mut drag = DragTracker::new(Thresholds::new(50.0, 40.0));
        drag.press(100.0, PointerKind::Mouse);
        assert!(drag.is_dragging());
        assert_eq!(drag.release(40.0), Some(Step::Next));
        assert!(!drag.is_dragging());
        assert_eq!(drag.release(40.0), None);
    }

    #[test]
    fn test_swipe_right_goes_back() {
        let mut drag = DragTracker::new(Thresholds::new(30.0, 30.0));
        drag.press(10.0, PointerKind::Touch);
        assert_eq!(drag.release(45.0), Some(Step::Prev));
    }

    #[test]
    fn test_short_drag_is_ignored() {
        let mut drag = DragTracker::new(Thresholds::new(50.0, 40.0));
        drag.press(100.0, PointerKind::Mouse);
        assert_eq!(drag.release(50.0), None);
        drag.press(100.0, PointerKind::Mouse);
        assert_eq!(drag.release(150.0), None);
    }

    #[test]
    fn test_touch_uses_touch_threshold() {
        let mut drag = DragTracker::new(Thresholds::new(50.0, 40.0));
        drag.press(100.0, PointerKind::Touch);
        assert_eq!(drag.release(55.0), Some(Step::Next));
        drag.press(100.0, PointerKind::Mouse);
        assert_eq!(drag.release(55.0), None);
    }

    #[test]
    fn test_release_outside_container_still_swipes() {
        let mut drag = DragTracker::new(Thresholds::new(50.0, 40.0));
        drag.press(30.0, PointerKind::Mouse);
        drag.track(-5.0);
        assert!(drag.is_dragging());
        assert_eq!(drag.release(-200.0), Some(Step::Next));
    }

    #[test]
    fn test_release_without_press() {
        let mut drag = DragTracker::new(Thresholds::new(50.0, 40.0));
        drag.track(10.0);
        assert_eq!(drag.release(-500.0), None);
        drag.press(0.0, PointerKind::Mouse);
        drag.cancel();
        assert_eq!(drag.release(-500.0), None);
    }

    #[test]
    fn test_click_zones() {
        assert_eq!(ClickZone::resolve(10.0, 100.0), ClickZone::Prev);
        assert_eq!(ClickZone::resolve(39.9, 100.0), ClickZone::Prev);
        assert_eq!(ClickZone::resolve(41.0, 100.0), ClickZone::Dead);
        assert_eq!(ClickZone::resolve(50.0, 100.0), ClickZone::Dead);
        assert_eq!(ClickZone::resolve(59.0, 100.0), ClickZone::Dead);
        assert_eq!(ClickZone::resolve(60.1, 100.0), ClickZone::Next);
        assert_eq!(ClickZone::Dead.step(), None);
        assert_eq!(ClickZone::Next.step(), Some(Step::Next));
    }
}
