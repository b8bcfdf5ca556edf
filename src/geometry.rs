use eframe::egui::Pos2;

/// Hit tolerance around a marker's head and tail.
pub const HIT_RADIUS: f32 = 10.0;

/// Maximum distance from the shaft that still counts as a body hit.
pub const BODY_TOLERANCE: f32 = 6.0;

pub fn distance(p: Pos2, q: Pos2) -> f32 {
    p.distance(q)
}

/// Strictly inside `radius`; a point exactly on the circle is not near.
pub fn is_near_point(candidate: Pos2, target: Pos2, radius: f32) -> bool {
    distance(candidate, target) < radius
}

/// True when `point` lies within `tolerance` of the line through `tail` and
/// `head` and its projection falls between the two endpoints.
pub fn is_on_segment(point: Pos2, tail: Pos2, head: Pos2, tolerance: f32) -> bool {
    let seg = head - tail;
    let len_sq = seg.length_sq();
    if len_sq <= f32::EPSILON {
        // degenerate shaft, nothing to project onto
        return distance(point, tail) < tolerance;
    }

    let rel = point - tail;
    let t = rel.dot(seg) / len_sq;
    if !(0.0..=1.0).contains(&t) {
        return false;
    }

    let cross = seg.x * rel.y - seg.y * rel.x;
    cross.abs() / len_sq.sqrt() < tolerance
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::pos2;

    #[test]
    fn test_distance() {
        assert!((distance(pos2(0.0, 0.0), pos2(3.0, 4.0)) - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_near_point_boundary() {
        let target = pos2(100.0, 100.0);
        assert!(is_near_point(pos2(109.9, 100.0), target, HIT_RADIUS));
        assert!(!is_near_point(pos2(110.0, 100.0), target, HIT_RADIUS)); // exactly on radius
        assert!(!is_near_point(pos2(110.1, 100.0), target, HIT_RADIUS));
        assert!(is_near_point(pos2(104.0, 104.0), target, HIT_RADIUS));
    }

    #[test]
    fn test_on_segment_between_endpoints() {
        let tail = pos2(0.0, 0.0);
        let head = pos2(100.0, 0.0);
        assert!(is_on_segment(pos2(50.0, 0.0), tail, head, BODY_TOLERANCE));
        assert!(is_on_segment(pos2(50.0, 5.9), tail, head, BODY_TOLERANCE));
        assert!(!is_on_segment(pos2(50.0, 6.1), tail, head, BODY_TOLERANCE));
        assert!(is_on_segment(tail, tail, head, BODY_TOLERANCE));
        assert!(is_on_segment(head, tail, head, BODY_TOLERANCE));
    }

    #[test]
    fn test_on_segment_rejects_extension() {
        let tail = pos2(0.0, 0.0);
        let head = pos2(100.0, 100.0);
        // on the line, lateral distance zero, but past either end
        assert!(!is_on_segment(pos2(103.0, 103.0), tail, head, BODY_TOLERANCE));
        assert!(!is_on_segment(pos2(-2.0, -2.0), tail, head, BODY_TOLERANCE));
    }

    #[test]
    fn test_on_segment_zero_length() {
        let p = pos2(20.0, 20.0);
        assert!(is_on_segment(pos2(22.0, 21.0), p, p, BODY_TOLERANCE));
        assert!(!is_on_segment(pos2(40.0, 20.0), p, p, BODY_TOLERANCE));
    }
}
