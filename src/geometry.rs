use eframe::egui::{Rect, Vec2};

const NORMALIZE_EPSILON: f32 = 1e-6;

pub fn normalize_or_zero(vector: Vec2) -> Vec2 {
    let length = vector.length();
    if length < NORMALIZE_EPSILON {
        Vec2::ZERO
    } else {
        vector / length
    }
}

pub fn closest_point_on_segment(point: Vec2, start: Vec2, end: Vec2) -> Vec2 {
    let span = end - start;
    let length_sq = span.length_sq();
    if length_sq < NORMALIZE_EPSILON {
        return start;
    }

    let t = ((point - start).dot(span) / length_sq).clamp(0.0, 1.0);
    start + (span * t)
}

pub fn segment_distance(point: Vec2, start: Vec2, end: Vec2) -> f32 {
    (point - closest_point_on_segment(point, start, end)).length()
}

pub fn segment_intersects_rect(start: Vec2, end: Vec2, rect: Rect) -> bool {
    let delta = end - start;
    let mut span = (0.0_f32, 1.0_f32);

    clip_axis(start.x, delta.x, rect.left(), rect.right(), &mut span)
        && clip_axis(start.y, delta.y, rect.top(), rect.bottom(), &mut span)
}

fn clip_axis(origin: f32, delta: f32, low: f32, high: f32, span: &mut (f32, f32)) -> bool {
    if delta.abs() < NORMALIZE_EPSILON {
        return origin >= low && origin <= high;
    }

    let t0 = (low - origin) / delta;
    let t1 = (high - origin) / delta;
    let (near, far) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };

    span.0 = span.0.max(near);
    span.1 = span.1.min(far);
    span.0 <= span.1
}

#[cfg(test)]
mod tests {
    use eframe::egui::{Pos2, vec2};

    use super::*;

    #[test]
    fn normalize_or_zero_handles_zero_vector() {
        assert_eq!(normalize_or_zero(Vec2::ZERO), Vec2::ZERO);

        let unit = normalize_or_zero(vec2(3.0, 4.0));
        assert!((unit - vec2(0.6, 0.8)).length() < 1e-6);
    }

    #[test]
    fn projection_clamps_to_segment_endpoints() {
        let start = vec2(0.0, 0.0);
        let end = vec2(10.0, 0.0);

        assert_eq!(closest_point_on_segment(vec2(-5.0, 3.0), start, end), start);
        assert_eq!(closest_point_on_segment(vec2(15.0, 3.0), start, end), end);
        assert_eq!(
            closest_point_on_segment(vec2(4.0, 3.0), start, end),
            vec2(4.0, 0.0)
        );
    }

    #[test]
    fn degenerate_segment_projects_to_its_point() {
        let point = vec2(7.0, -2.0);
        assert_eq!(closest_point_on_segment(vec2(1.0, 1.0), point, point), point);
        assert!((segment_distance(vec2(10.0, 2.0), point, point) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn distance_to_horizontal_segment() {
        let d = segment_distance(vec2(4.0, 3.0), vec2(0.0, 0.0), vec2(10.0, 0.0));
        assert!((d - 3.0).abs() < 1e-6);
    }

    #[test]
    fn crossing_segment_intersects_rect() {
        let rect = Rect::from_two_pos(Pos2::new(0.0, 0.0), Pos2::new(10.0, 10.0));
        assert!(segment_intersects_rect(vec2(-5.0, 5.0), vec2(15.0, 5.0), rect));
        assert!(segment_intersects_rect(vec2(-2.0, -2.0), vec2(12.0, 12.0), rect));
    }

    #[test]
    fn segment_fully_inside_rect_intersects() {
        let rect = Rect::from_two_pos(Pos2::new(0.0, 0.0), Pos2::new(10.0, 10.0));
        assert!(segment_intersects_rect(vec2(2.0, 2.0), vec2(3.0, 3.0), rect));
    }

    #[test]
    fn axis_parallel_segment_outside_span_rejects() {
        let rect = Rect::from_two_pos(Pos2::new(0.0, 0.0), Pos2::new(10.0, 10.0));
        assert!(!segment_intersects_rect(vec2(-5.0, -5.0), vec2(15.0, -5.0), rect));
        assert!(!segment_intersects_rect(vec2(20.0, -5.0), vec2(20.0, 15.0), rect));
    }

    #[test]
    fn disjoint_diagonal_segment_rejects() {
        let rect = Rect::from_two_pos(Pos2::new(0.0, 0.0), Pos2::new(10.0, 10.0));
        assert!(!segment_intersects_rect(vec2(12.0, 11.0), vec2(20.0, 15.0), rect));
    }
}
