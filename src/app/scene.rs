use cograph::camera::OrbitCamera;
use cograph::graph::{Edge, Graph};
use cograph::palette::group_color;
use cograph::pick::{BodyVisual, PickableBody};
use eframe::egui::{Pos2, Rect};

use super::render_utils::ndc_to_screen;

pub(super) const NODE_RADIUS: f32 = 1.6;

#[derive(Clone, Copy)]
pub(super) struct ScreenNode {
    pub(super) position: Pos2,
    pub(super) radius: f32,
    pub(super) depth: f32,
}

pub(super) struct Scene {
    pub(super) bodies: Vec<PickableBody>,
    pub(super) edges: Vec<Edge>,
    pub(super) min_depth: f32,
    pub(super) max_depth: f32,
    projected: Vec<Option<ScreenNode>>,
    draw_order: Vec<usize>,
}

impl Scene {
    pub(super) fn build(graph: &Graph) -> Self {
        let bodies = graph
            .nodes()
            .iter()
            .map(|node| {
                PickableBody::from_node(
                    node,
                    NODE_RADIUS,
                    BodyVisual {
                        color: group_color(node.group),
                        scale: 1.0,
                    },
                )
            })
            .collect::<Vec<_>>();

        Self {
            projected: vec![None; bodies.len()],
            draw_order: (0..bodies.len()).collect(),
            bodies,
            edges: graph.edges().to_vec(),
            min_depth: 0.0,
            max_depth: 0.0,
        }
    }

    pub(super) fn project(&mut self, camera: &OrbitCamera, rect: Rect) {
        let aspect = rect.width() / rect.height().max(1.0);
        self.min_depth = f32::INFINITY;
        self.max_depth = 0.0;

        for (slot, body) in self.projected.iter_mut().zip(&self.bodies) {
            *slot = camera.project(body.position, aspect).map(|projected| {
                let scale = camera.pixels_per_unit(projected.depth, rect.height());
                ScreenNode {
                    position: ndc_to_screen(rect, projected.ndc),
                    radius: (body.pick_radius() * scale).max(1.5),
                    depth: projected.depth,
                }
            });

            if let Some(node) = slot {
                self.min_depth = self.min_depth.min(node.depth);
                self.max_depth = self.max_depth.max(node.depth);
            }
        }

        let projected = &self.projected;
        let depth = |index: usize| projected[index].map_or(f32::INFINITY, |node| node.depth);
        self.draw_order.sort_by(|a, b| depth(*b).total_cmp(&depth(*a)));
    }

    pub(super) fn screen_node(&self, index: usize) -> Option<ScreenNode> {
        self.projected.get(index).copied().flatten()
    }

    /// Far to near.
    pub(super) fn draw_order(&self) -> &[usize] {
        &self.draw_order
    }

    /// 0 for the nearest projected body, 1 for the farthest.
    pub(super) fn depth_fraction(&self, depth: f32) -> f32 {
        let span = self.max_depth - self.min_depth;
        if !span.is_finite() || span <= f32::EPSILON {
            return 0.0;
        }
        ((depth - self.min_depth) / span).clamp(0.0, 1.0)
    }
}
