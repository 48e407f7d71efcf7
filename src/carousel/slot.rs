use crate::carousel::{CENTER_SLOT, MAX_DISTANCE, SLOT_COUNT};

/// One discrete visual position of the roleta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub rotate_deg: f64,
    pub depth: i32,
    pub opacity: f64,
}

impl Slot {
    pub const fn new(
        x: f64,
        y: f64,
        scale: f64,
        rotate_deg: f64,
        depth: i32,
        opacity: f64,
    ) -> Self {
        Self {
            x,
            y,
            scale,
            rotate_deg,
            depth,
            opacity,
        }
    }

    /// Same slot reflected onto the other side of the center.
    pub const fn mirrored(self) -> Self {
        Self {
            x: -self.x,
            rotate_deg: -self.rotate_deg,
            ..self
        }
    }
}

/// Five slots, outermost left to outermost right, center at [`CENTER_SLOT`].
pub type SlotTable = [Slot; SLOT_COUNT];

/// Signed shortest circular distance from `from` to `to` in a ring of `n`.
///
/// A relative offset exactly at `n / 2` (even `n`) stays positive: the fold
/// only happens when the offset is strictly past the half.
pub fn shortest_distance(n: usize, from: usize, to: usize) -> isize {
    if n == 0 {
        return 0;
    }
    let rel = (to % n + n - from % n) % n;
    if rel > n / 2 {
        rel as isize - n as isize
    } else {
        rel as isize
    }
}

/// Slot a card renders into, given the current center.
pub fn slot_index(n: usize, center: usize, index: usize) -> usize {
    let distance = shortest_distance(n, center, index).clamp(-MAX_DISTANCE, MAX_DISTANCE);
    (CENTER_SLOT as isize + distance) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_card_always_in_center_slot() {
        for n in 1..=12 {
            for center in 0..n {
                assert_eq!(slot_index(n, center, center), CENTER_SLOT, "n={n} center={center}");
            }
        }
    }

    #[test]
    fn test_single_card() {
        assert_eq!(slot_index(1, 0, 0), 2);
    }

    #[test]
    fn test_identity_mapping_for_five_cards() {
        let slots: Vec<usize> = (0..5).map(|i| slot_index(5, 2, i)).collect();
        assert_eq!(slots, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_wraps_around_behind_center() {
        assert_eq!(shortest_distance(5, 0, 4), -1);
        assert_eq!(slot_index(5, 0, 4), 1);
        assert_eq!(shortest_distance(5, 0, 1), 1);
        assert_eq!(slot_index(5, 0, 1), 3);
    }

    #[test]
    fn test_three_cards() {
        assert_eq!(slot_index(3, 0, 1), 3);
        assert_eq!(shortest_distance(3, 0, 2), -1);
        assert_eq!(slot_index(3, 0, 2), 1);
    }

    #[test]
    fn test_antipodal_card_folds_positive_for_even_n() {
        assert_eq!(shortest_distance(4, 0, 2), 2);
        assert_eq!(slot_index(4, 0, 2), 4);
        assert_eq!(shortest_distance(6, 1, 4), 3);
        assert_eq!(slot_index(6, 1, 4), 4);
    }

    #[test]
    fn test_far_cards_clamp_to_outer_slots() {
        let n = 9;
        assert_eq!(slot_index(n, 0, 3), 4);
        assert_eq!(slot_index(n, 0, 4), 4);
        assert_eq!(slot_index(n, 0, 5), 0);
        assert_eq!(slot_index(n, 0, 7), 0);
        assert_eq!(slot_index(n, 0, 8), 1);
    }

    #[test]
    fn test_mirrored_slot() {
        let slot = Slot::new(-120.0, 8.0, 0.92, -8.0, 20, 0.8);
        assert_eq!(slot.mirrored(), Slot::new(120.0, 8.0, 0.92, 8.0, 20, 0.8));
    }
}
