use glam::Vec3;

use crate::graph::{Node, NodeId};
use crate::palette::Rgba;

/// Half-line from `origin` along a unit `direction`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// A zero direction falls back to looking down -Z.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.try_normalize().unwrap_or(Vec3::NEG_Z),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Smallest non-negative ray parameter at which the ray meets the sphere.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let to_center = center - self.origin;
        let along = to_center.dot(self.direction);
        let miss_sq = to_center.length_squared() - along * along;
        let radius_sq = radius * radius;
        if miss_sq > radius_sq {
            return None;
        }

        let half_chord = (radius_sq - miss_sq).sqrt();
        let enter = along - half_chord;
        let exit = along + half_chord;
        if exit < 0.0 {
            None
        } else if enter >= 0.0 {
            Some(enter)
        } else {
            Some(exit)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyVisual {
    pub color: Rgba,
    pub scale: f32,
}

/// Presentation-side sphere for one node.
///
/// The visual it was created with is kept as the reset value for hover highlighting.
#[derive(Clone, Debug)]
pub struct PickableBody {
    id: NodeId,
    pub name: String,
    pub group: u32,
    pub position: Vec3,
    pub radius: f32,
    pub visual: BodyVisual,
    original: BodyVisual,
}

impl PickableBody {
    pub fn new(
        id: NodeId,
        name: impl Into<String>,
        group: u32,
        position: Vec3,
        radius: f32,
        visual: BodyVisual,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            group,
            position,
            radius,
            visual,
            original: visual,
        }
    }

    pub fn from_node(node: &Node, radius: f32, visual: BodyVisual) -> Self {
        Self::new(
            node.id(),
            node.name.clone(),
            node.group,
            node.position,
            radius,
            visual,
        )
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn original(&self) -> BodyVisual {
        self.original
    }

    /// Radius of the sphere as currently drawn.
    pub fn pick_radius(&self) -> f32 {
        self.radius * self.visual.scale
    }

    pub(crate) fn restore(&mut self) {
        self.visual = self.original;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub id: NodeId,
    /// Ray parameter of the first intersection.
    pub distance: f32,
}

pub fn nearest_hit(ray: &Ray, bodies: &[PickableBody]) -> Option<Hit> {
    bodies
        .iter()
        .filter_map(|body| {
            ray.intersect_sphere(body.position, body.pick_radius())
                .map(|distance| Hit {
                    id: body.id(),
                    distance,
                })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

pub fn resolve(ray: &Ray, bodies: &[PickableBody]) -> Option<NodeId> {
    nearest_hit(ray, bodies).map(|hit| hit.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(index: usize, position: Vec3, radius: f32) -> PickableBody {
        PickableBody::new(
            NodeId::new(index),
            format!("body{index}"),
            0,
            position,
            radius,
            BodyVisual {
                color: Rgba::WHITE,
                scale: 1.0,
            },
        )
    }

    #[test]
    fn nearest_along_the_ray_wins() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let bodies = [
            body(0, Vec3::new(10.0, 0.0, 0.0), 1.0),
            body(1, Vec3::new(5.0, 0.0, 0.0), 1.0),
        ];

        assert_eq!(resolve(&ray, &bodies), Some(NodeId::new(1)));
        let hit = nearest_hit(&ray, &bodies).unwrap();
        assert!((hit.distance - 4.0).abs() < 1e-5);
    }

    #[test]
    fn misses_return_none() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        let bodies = [body(0, Vec3::new(5.0, 0.0, 0.0), 1.0)];
        assert_eq!(resolve(&ray, &bodies), None);
        assert_eq!(resolve(&ray, &[]), None);
    }

    #[test]
    fn bodies_behind_the_origin_are_ignored() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let bodies = [body(0, Vec3::new(0.0, 0.0, -5.0), 1.0)];
        assert_eq!(resolve(&ray, &bodies), None);
    }

    #[test]
    fn origin_inside_a_sphere_hits_at_exit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let t = ray.intersect_sphere(Vec3::new(0.0, 0.0, 0.5), 2.0).unwrap();
        assert!((t - 2.5).abs() < 1e-5);
    }

    #[test]
    fn grazing_ray_hits_and_arbitrary_direction_is_normalized() {
        let ray = Ray::new(Vec3::new(-10.0, 1.0, 0.0), Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(ray.direction, Vec3::X);
        assert!(ray.intersect_sphere(Vec3::ZERO, 1.0).is_some());
        assert!(ray.intersect_sphere(Vec3::ZERO, 0.99).is_none());

        let diagonal = Ray::new(Vec3::splat(20.0), Vec3::splat(-1.0));
        let bodies = [
            body(0, Vec3::ZERO, 1.0),
            body(1, Vec3::splat(10.0), 1.0),
            body(2, Vec3::new(10.0, -10.0, 10.0), 1.0),
        ];
        assert_eq!(resolve(&diagonal, &bodies), Some(NodeId::new(1)));
    }

    #[test]
    fn pick_radius_follows_current_scale() {
        let ray = Ray::new(Vec3::new(0.0, 1.2, -10.0), Vec3::Z);
        let mut enlarged = body(0, Vec3::ZERO, 1.0);
        assert_eq!(resolve(&ray, std::slice::from_ref(&enlarged)), None);

        enlarged.visual.scale = 1.5;
        assert_eq!(
            resolve(&ray, std::slice::from_ref(&enlarged)),
            Some(enlarged.id())
        );

        enlarged.restore();
        assert_eq!(enlarged.visual, enlarged.original());
    }

    #[test]
    fn zero_direction_falls_back_to_negative_z() {
        let ray = Ray::new(Vec3::ONE, Vec3::ZERO);
        assert_eq!(ray.direction, Vec3::NEG_Z);
        assert_eq!(ray.at(2.0), Vec3::new(1.0, 1.0, -1.0));
    }
}
