use eframe::egui::Vec2;

use crate::geometry::normalize_or_zero;

use super::quadtree::QuadNode;
use super::{BARNES_HUT_THETA, DISTANCE_EPSILON};

pub(super) fn repulsion(nodes: &[QuadNode], index: usize, query: Vec2) -> Vec2 {
    let node = nodes[index];
    if node.count == 0 {
        return Vec2::ZERO;
    }

    let delta = node.centroid - query;
    let distance = delta.length().max(DISTANCE_EPSILON);

    if node.is_leaf() || node.bounds.max_dimension() / distance < BARNES_HUT_THETA {
        return normalize_or_zero(delta) * (node.count as f32 / distance);
    }

    let mut total = Vec2::ZERO;
    for child in node.children {
        if let Some(child) = child {
            total += repulsion(nodes, child, query);
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;

    fn field_over(points: &[Vec2], query: Vec2) -> Vec2 {
        let mut points = points.to_vec();
        let mut nodes = Vec::new();
        let root = QuadNode::build(&mut points, &mut nodes);
        repulsion(&nodes, root, query)
    }

    #[test]
    fn two_point_field_is_antisymmetric() {
        let a = vec2(0.0, 0.0);
        let b = vec2(10.0, 0.0);
        let points = [a, b];

        let field_at_a = field_over(&points, a);
        let field_at_b = field_over(&points, b);

        assert!(field_at_a.x > 0.0);
        assert!((field_at_a + field_at_b).length() < 1e-5);
        assert!((field_at_a.length() - 0.1).abs() < 1e-5);
    }

    #[test]
    fn empty_tree_contributes_nothing() {
        assert_eq!(field_over(&[], vec2(4.0, 4.0)), Vec2::ZERO);
    }

    #[test]
    fn query_coincident_with_a_lone_point_is_zero() {
        let point = vec2(12.0, -7.0);
        assert_eq!(field_over(&[point], point), Vec2::ZERO);
    }

    #[test]
    fn distant_cluster_aggregates_by_count() {
        let points = [vec2(1000.0, -1.0), vec2(1000.0, 1.0), vec2(1002.0, 0.0)];
        let centroid = points.iter().fold(Vec2::ZERO, |sum, &p| sum + p) / 3.0;

        let field = field_over(&points, Vec2::ZERO);
        let expected = 3.0 / centroid.length();

        assert!((field.length() - expected).abs() < 1e-6);
        assert!(field.x > 0.0);
        assert!(field.y.abs() < 1e-6);
    }
}
