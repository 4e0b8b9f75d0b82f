//! Collision detection
//!
//! Pairwise AABB overlap tests between entity rectangles. Tests against the
//! player shrink the player's rectangle to its central portion first, so hits
//! feel more forgiving than the visual bounding boxes.

use super::rect::Rect;

/// Standard strict AABB overlap test. Commutative; edge contact is a miss.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// Overlap test against the player, keeping only the central `keep_ratio`
/// of the player's rectangle.
#[inline]
pub fn player_hits(player: &Rect, other: &Rect, keep_ratio: f32) -> bool {
    overlaps(&player.shrink_to(keep_ratio), other)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_identical_rects_collide() {
        let r = Rect::new(10.0, 10.0, 40.0, 40.0);
        assert!(overlaps(&r, &r));
        assert!(player_hits(&r, &r, 0.6));
    }

    #[test]
    fn test_separated_rects_miss() {
        let a = Rect::new(0.0, 0.0, 40.0, 40.0);
        let b = Rect::new(100.0, 100.0, 40.0, 40.0);
        assert!(!overlaps(&a, &b));
        assert!(!overlaps(&b, &a));
    }

    #[test]
    fn test_edge_contact_is_miss() {
        let a = Rect::new(0.0, 0.0, 40.0, 40.0);
        let b = Rect::new(40.0, 0.0, 40.0, 40.0);
        assert!(!overlaps(&a, &b));
    }

    #[test]
    fn test_shrink_reduces_collision_region() {
        // Grazing overlap: 5px along x under the full box
        let player = Rect::new(0.0, 0.0, 40.0, 40.0);
        let other = Rect::new(35.0, 0.0, 40.0, 40.0);
        assert!(overlaps(&player, &other));
        // Shrinking to the central 60% pulls the player's right edge back to
        // x=32, so the same pair no longer hits
        assert!(!player_hits(&player, &other, 0.6));
    }

    #[test]
    fn test_shrunk_hit_still_hits_full_box() {
        let player = Rect::new(0.0, 0.0, 40.0, 40.0);
        let other = Rect::new(20.0, 20.0, 40.0, 40.0);
        assert!(player_hits(&player, &other, 0.6));
        assert!(overlaps(&player, &other));
    }

    fn arb_rect() -> impl Strategy<Value = Rect> {
        (
            -500.0f32..500.0,
            -500.0f32..500.0,
            1.0f32..200.0,
            1.0f32..200.0,
        )
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_overlaps_commutative(a in arb_rect(), b in arb_rect()) {
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn prop_shrunk_hit_implies_full_hit(a in arb_rect(), b in arb_rect()) {
            if player_hits(&a, &b, 0.6) {
                prop_assert!(overlaps(&a, &b));
            }
        }

        #[test]
        fn prop_far_apart_never_collide(a in arb_rect(), b in arb_rect()) {
            let dx = (a.center().x - b.center().x).abs();
            let dy = (a.center().y - b.center().y).abs();
            if dx > (a.size.x + b.size.x) / 2.0 || dy > (a.size.y + b.size.y) / 2.0 {
                prop_assert!(!overlaps(&a, &b));
            }
        }
    }
}
