use eframe::egui::{Vec2, vec2};

const QUADTREE_MIN_EXTENT: f32 = 1e-6;

#[derive(Clone, Copy, Debug)]
pub struct QuadBounds {
    pub position: Vec2,
    pub size: Vec2,
}

impl QuadBounds {
    pub fn from_points(points: &[Vec2]) -> Self {
        let mut min = vec2(f32::INFINITY, f32::INFINITY);
        let mut max = vec2(f32::NEG_INFINITY, f32::NEG_INFINITY);

        for point in points {
            min.x = min.x.min(point.x);
            min.y = min.y.min(point.y);
            max.x = max.x.max(point.x);
            max.y = max.y.max(point.y);
        }

        if !min.x.is_finite() || !min.y.is_finite() || !max.x.is_finite() || !max.y.is_finite() {
            return Self {
                position: Vec2::ZERO,
                size: Vec2::ZERO,
            };
        }

        Self {
            position: min,
            size: max - min,
        }
    }

    pub fn center(self) -> Vec2 {
        self.position + (self.size * 0.5)
    }

    pub fn max_dimension(self) -> f32 {
        self.size.x.max(self.size.y)
    }

    fn quarter(self, quadrant: usize) -> Self {
        let half = self.size * 0.5;
        let offset = match quadrant {
            0 => Vec2::ZERO,
            1 => vec2(half.x, 0.0),
            2 => vec2(0.0, half.y),
            _ => half,
        };

        Self {
            position: self.position + offset,
            size: half,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct QuadNode {
    pub bounds: QuadBounds,
    pub count: usize,
    pub centroid: Vec2,
    pub children: [Option<usize>; 4],
}

impl QuadNode {
    pub fn build(points: &mut [Vec2], nodes: &mut Vec<QuadNode>) -> usize {
        let bounds = QuadBounds::from_points(points);
        Self::build_node(bounds, points, nodes)
    }

    fn build_node(bounds: QuadBounds, points: &mut [Vec2], nodes: &mut Vec<QuadNode>) -> usize {
        let count = points.len();
        let mut centroid = Vec2::ZERO;
        for point in points.iter() {
            centroid += *point;
        }
        if count > 0 {
            centroid /= count as f32;
        }

        if count <= 1 || bounds.max_dimension() < QUADTREE_MIN_EXTENT {
            nodes.push(Self {
                bounds,
                count,
                centroid,
                children: [None; 4],
            });
            return nodes.len() - 1;
        }

        let mid = bounds.center();
        let top_left_end = partition(points, 0, |point| point.x <= mid.x && point.y <= mid.y);
        let top_right_end = partition(points, top_left_end, |point| point.y <= mid.y);
        let bottom_left_end = partition(points, top_right_end, |point| point.x <= mid.x);

        let top_left = Self::build_node(bounds.quarter(0), &mut points[..top_left_end], nodes);
        let top_right = Self::build_node(
            bounds.quarter(1),
            &mut points[top_left_end..top_right_end],
            nodes,
        );
        let bottom_left = Self::build_node(
            bounds.quarter(2),
            &mut points[top_right_end..bottom_left_end],
            nodes,
        );
        let bottom_right = Self::build_node(bounds.quarter(3), &mut points[bottom_left_end..], nodes);

        nodes.push(Self {
            bounds,
            count,
            centroid,
            children: [
                Some(top_left),
                Some(top_right),
                Some(bottom_left),
                Some(bottom_right),
            ],
        });
        nodes.len() - 1
    }

    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }
}

fn partition(points: &mut [Vec2], start: usize, keep: impl Fn(Vec2) -> bool) -> usize {
    let mut boundary = start;
    for index in start..points.len() {
        if keep(points[index]) {
            points.swap(boundary, index);
            boundary += 1;
        }
    }
    boundary
}
