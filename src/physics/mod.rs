mod forces;
mod quadtree;

use eframe::egui::Vec2;

use crate::geometry::normalize_or_zero;
use crate::graph::GraphStore;

use forces::repulsion;
pub use quadtree::QuadNode;

const BARNES_HUT_THETA: f32 = 0.5;
const DISTANCE_EPSILON: f32 = 1e-6;
const VELOCITY_DAMPING: f32 = 0.05;
const REPULSION_STRENGTH: f32 = 0.1;
const SPRING_STRENGTH: f32 = 0.001;
const SPRING_REST_LENGTH: f32 = 50.0;
const MAX_FRAME_SECONDS: f32 = 1.0 / 30.0;
const TIME_SCALE: f32 = 20.0;
const SUB_STEPS: usize = 10;

#[derive(Default)]
pub struct PhysicsScratch {
    pub points: Vec<Vec2>,
    pub nodes: Vec<QuadNode>,
}

pub fn step_simulation(
    graph: &mut GraphStore,
    pinned: &[usize],
    scratch: &mut PhysicsScratch,
    frame_seconds: f32,
) {
    if graph.vertices.is_empty() {
        return;
    }

    let dt = frame_seconds.min(MAX_FRAME_SECONDS) * TIME_SCALE;

    for _ in 0..SUB_STEPS {
        refill_points(graph, scratch);
        scratch.nodes.clear();
        let root = QuadNode::build(&mut scratch.points, &mut scratch.nodes);

        for vertex in &mut graph.vertices {
            vertex.acceleration = vertex.velocity * -VELOCITY_DAMPING;
            vertex.acceleration -=
                repulsion(&scratch.nodes, root, vertex.position) * REPULSION_STRENGTH;
        }

        for &(from, to) in &graph.edges {
            let displacement = graph.vertices[to].position - graph.vertices[from].position;
            let force = spring_force(displacement);
            graph.vertices[to].acceleration += force;
            graph.vertices[from].acceleration -= force;
        }

        for (index, vertex) in graph.vertices.iter_mut().enumerate() {
            if pinned.binary_search(&index).is_ok() {
                continue;
            }
            vertex.velocity += vertex.acceleration * dt;
            vertex.position += vertex.velocity * dt;
        }
    }
}

pub fn quadtree_nodes<'a>(graph: &GraphStore, scratch: &'a mut PhysicsScratch) -> &'a [QuadNode] {
    scratch.nodes.clear();
    if !graph.vertices.is_empty() {
        refill_points(graph, scratch);
        QuadNode::build(&mut scratch.points, &mut scratch.nodes);
    }
    &scratch.nodes
}

fn refill_points(graph: &GraphStore, scratch: &mut PhysicsScratch) {
    scratch.points.clear();
    scratch
        .points
        .reserve(graph.vertices.len().saturating_sub(scratch.points.capacity()));
    for vertex in &graph.vertices {
        scratch.points.push(vertex.position);
    }
}

fn spring_force(displacement: Vec2) -> Vec2 {
    normalize_or_zero(displacement)
        * (SPRING_STRENGTH * (SPRING_REST_LENGTH - displacement.length()))
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;

    fn two_vertex_graph(separation: f32) -> GraphStore {
        let mut graph = GraphStore::default();
        graph.add_vertex(vec2(0.0, 0.0));
        graph.add_vertex(vec2(separation, 0.0));
        graph
    }

    #[test]
    fn spring_is_slack_at_rest_length() {
        assert_eq!(spring_force(vec2(SPRING_REST_LENGTH, 0.0)), Vec2::ZERO);
    }

    #[test]
    fn spring_pulls_beyond_rest_length_and_pushes_inside_it() {
        assert!(spring_force(vec2(100.0, 0.0)).x < 0.0);
        assert!(spring_force(vec2(10.0, 0.0)).x > 0.0);
        assert_eq!(spring_force(Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn free_vertices_drift_apart() {
        let mut graph = two_vertex_graph(100.0);
        let mut scratch = PhysicsScratch::default();

        step_simulation(&mut graph, &[], &mut scratch, 1.0 / 60.0);

        let separation = (graph.vertices[1].position - graph.vertices[0].position).length();
        assert!(separation > 100.0);
    }

    #[test]
    fn connected_vertices_pull_back_together() {
        let mut graph = two_vertex_graph(200.0);
        graph.edges.push((0, 1));
        let mut scratch = PhysicsScratch::default();

        step_simulation(&mut graph, &[], &mut scratch, 1.0 / 60.0);

        let separation = (graph.vertices[1].position - graph.vertices[0].position).length();
        assert!(separation < 200.0);
        assert!(separation > 0.0);
    }

    #[test]
    fn pinned_vertices_do_not_move() {
        let mut graph = two_vertex_graph(30.0);
        graph.vertices[0].velocity = vec2(2.0, -1.0);
        graph.edges.push((0, 1));
        let mut scratch = PhysicsScratch::default();

        step_simulation(&mut graph, &[0], &mut scratch, 1.0 / 60.0);

        assert_eq!(graph.vertices[0].position, vec2(0.0, 0.0));
        assert_eq!(graph.vertices[0].velocity, vec2(2.0, -1.0));
        assert_ne!(graph.vertices[1].position, vec2(30.0, 0.0));
    }

    #[test]
    fn long_frames_clamp_to_the_frame_cap() {
        let mut slow = two_vertex_graph(80.0);
        let mut capped = two_vertex_graph(80.0);
        let mut scratch = PhysicsScratch::default();

        step_simulation(&mut slow, &[], &mut scratch, 10.0);
        step_simulation(&mut capped, &[], &mut scratch, MAX_FRAME_SECONDS);

        assert_eq!(slow.vertices[0].position, capped.vertices[0].position);
        assert_eq!(slow.vertices[1].position, capped.vertices[1].position);
    }

    #[test]
    fn lone_vertex_decays_along_a_damped_drift() {
        let mut graph = GraphStore::default();
        graph.add_vertex(Vec2::ZERO);
        graph.vertices[0].velocity = vec2(3.0, 0.0);
        let mut scratch = PhysicsScratch::default();

        step_simulation(&mut graph, &[], &mut scratch, 1.0 / 30.0);

        let dt = (1.0_f32 / 30.0) * TIME_SCALE;
        let decay = 1.0 - VELOCITY_DAMPING * dt;
        let mut expected_velocity = 3.0_f32;
        let mut expected_x = 0.0_f32;
        for _ in 0..SUB_STEPS {
            expected_velocity *= decay;
            expected_x += expected_velocity * dt;
        }

        assert!((graph.vertices[0].velocity.x - expected_velocity).abs() < 1e-4);
        assert!((graph.vertices[0].position.x - expected_x).abs() < 1e-3);
        assert_eq!(graph.vertices[0].position.y, 0.0);
    }

    #[test]
    fn empty_graph_steps_without_building_a_tree() {
        let mut graph = GraphStore::default();
        let mut scratch = PhysicsScratch::default();
        step_simulation(&mut graph, &[], &mut scratch, 1.0 / 60.0);
        assert!(scratch.nodes.is_empty());
    }
}
