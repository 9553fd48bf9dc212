//! Orbit camera used to turn pointer positions into pick rays.

use glam::{Mat4, Vec2, Vec3};

use crate::pick::Ray;

const DEFAULT_PITCH: f32 = 0.35;
const DEFAULT_DISTANCE: f32 = 140.0;
const MIN_DISTANCE: f32 = 8.0;
const MAX_DISTANCE: f32 = 2_000.0;
const PITCH_LIMIT: f32 = 1.5;
const ROTATE_PER_PIXEL: f32 = 0.008;
const ZOOM_PER_SCROLL: f32 = 0.0015;
/// Fraction of the remaining rotation covered per 60 Hz frame.
const EASING: f32 = 0.15;
const SETTLED: f32 = 1e-4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    pub ndc: Vec2,
    /// Distance in front of the camera along its viewing axis.
    pub depth: f32,
}

#[derive(Clone, Debug)]
pub struct OrbitCamera {
    target: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    goal_target: Vec3,
    goal_yaw: f32,
    goal_pitch: f32,
    goal_distance: f32,
    home_target: Vec3,
    home_distance: f32,
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            yaw: 0.0,
            pitch: DEFAULT_PITCH,
            distance: DEFAULT_DISTANCE,
            goal_target: Vec3::ZERO,
            goal_yaw: 0.0,
            goal_pitch: DEFAULT_PITCH,
            goal_distance: DEFAULT_DISTANCE,
            home_target: Vec3::ZERO,
            home_distance: DEFAULT_DISTANCE,
            fov_y: 60f32.to_radians(),
            near: 0.1,
            far: 10_000.0,
        }
    }
}

impl OrbitCamera {
    /// Centers on the points and backs off far enough to keep all of them in view.
    /// Non-finite points are ignored.
    pub fn framing(points: impl IntoIterator<Item = Vec3>) -> Self {
        let points = points
            .into_iter()
            .filter(|point| point.is_finite())
            .collect::<Vec<_>>();
        let mut camera = Self::default();
        if points.is_empty() {
            return camera;
        }

        let center = points.iter().copied().sum::<Vec3>() / points.len() as f32;
        let radius = points
            .iter()
            .map(|point| point.distance(center))
            .fold(0.0_f32, f32::max);
        let distance = (radius / (camera.fov_y * 0.5).sin() * 1.1)
            .clamp(MIN_DISTANCE, MAX_DISTANCE);

        camera.home_target = center;
        camera.home_distance = distance;
        camera.target = center;
        camera.goal_target = center;
        camera.distance = distance;
        camera.goal_distance = distance;
        camera
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn eye(&self) -> Vec3 {
        let offset = Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        );
        self.target + offset * self.distance
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, aspect.max(f32::EPSILON), self.near, self.far)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view()
    }

    /// Ray from the eye through a point given in normalized device coordinates
    /// (x right, y up, both in -1..=1).
    pub fn ray_from_ndc(&self, ndc: Vec2, aspect: f32) -> Ray {
        let eye = self.eye();
        let forward = (self.target - eye).try_normalize().unwrap_or(Vec3::NEG_Z);
        let right = forward.cross(Vec3::Y).try_normalize().unwrap_or(Vec3::X);
        let up = right.cross(forward);

        let half_height = (self.fov_y * 0.5).tan();
        let half_width = half_height * aspect.max(f32::EPSILON);
        let direction = forward + right * (ndc.x * half_width) + up * (ndc.y * half_height);
        Ray::new(eye, direction)
    }

    /// `None` when the point is behind or on the camera plane.
    pub fn project(&self, world: Vec3, aspect: f32) -> Option<Projected> {
        let clip = self.view_projection(aspect) * world.extend(1.0);
        if clip.w <= self.near {
            return None;
        }

        Some(Projected {
            ndc: Vec2::new(clip.x / clip.w, clip.y / clip.w),
            depth: clip.w,
        })
    }

    /// Screen pixels covered by one world unit at the given depth.
    pub fn pixels_per_unit(&self, depth: f32, viewport_height: f32) -> f32 {
        viewport_height * 0.5 / ((self.fov_y * 0.5).tan() * depth.max(self.near))
    }

    pub fn rotate(&mut self, pointer_delta: Vec2) {
        self.goal_yaw -= pointer_delta.x * ROTATE_PER_PIXEL;
        self.goal_pitch =
            (self.goal_pitch + pointer_delta.y * ROTATE_PER_PIXEL).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn zoom(&mut self, scroll: f32) {
        let factor = (1.0 - scroll * ZOOM_PER_SCROLL).clamp(0.5, 1.5);
        self.goal_distance = (self.goal_distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn focus(&mut self, point: Vec3) {
        self.goal_target = point;
    }

    pub fn reset(&mut self) {
        self.goal_target = self.home_target;
        self.goal_yaw = 0.0;
        self.goal_pitch = DEFAULT_PITCH;
        self.goal_distance = self.home_distance;
    }

    /// Moves the current view toward the goals. Returns `true` while still moving.
    pub fn ease(&mut self, delta_seconds: f32) -> bool {
        let frames = (delta_seconds * 60.0).clamp(0.0, 4.0);
        let amount = 1.0 - (1.0 - EASING).powf(frames);

        self.yaw += (self.goal_yaw - self.yaw) * amount;
        self.pitch += (self.goal_pitch - self.pitch) * amount;
        self.distance += (self.goal_distance - self.distance) * amount;
        self.target += (self.goal_target - self.target) * amount;

        let remaining = (self.goal_yaw - self.yaw).abs()
            + (self.goal_pitch - self.pitch).abs()
            + (self.goal_distance - self.distance).abs() / self.goal_distance.max(1.0)
            + self.goal_target.distance(self.target) / self.goal_distance.max(1.0);

        if remaining < SETTLED {
            self.yaw = self.goal_yaw;
            self.pitch = self.goal_pitch;
            self.distance = self.goal_distance;
            self.target = self.goal_target;
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeId;
    use crate::palette::Rgba;
    use crate::pick::{BodyVisual, PickableBody, resolve};

    const ASPECT: f32 = 16.0 / 9.0;

    fn settle(camera: &mut OrbitCamera) {
        for _ in 0..1_000 {
            if !camera.ease(1.0 / 60.0) {
                return;
            }
        }
        panic!("camera never settled");
    }

    #[test]
    fn eye_sits_on_the_orbit_sphere() {
        let camera = OrbitCamera::default();
        let eye = camera.eye();
        assert!((eye.distance(camera.target()) - DEFAULT_DISTANCE).abs() < 1e-3);
        assert!(eye.y > 0.0);
        assert!(eye.z > 0.0);
    }

    #[test]
    fn center_ray_points_at_target() {
        let camera = OrbitCamera::default();
        let ray = camera.ray_from_ndc(Vec2::ZERO, ASPECT);
        let expected = (camera.target() - camera.eye()).normalize();
        assert!(ray.direction.abs_diff_eq(expected, 1e-4), "{:?}", ray.direction);
    }

    #[test]
    fn projected_point_is_hit_by_its_own_ray() {
        let mut camera = OrbitCamera::default();
        camera.rotate(Vec2::new(120.0, -40.0));
        settle(&mut camera);

        let world = Vec3::new(12.0, -7.0, 20.0);
        let projected = camera.project(world, ASPECT).unwrap();
        assert!(projected.ndc.x.abs() <= 1.0 && projected.ndc.y.abs() <= 1.0);

        let ray = camera.ray_from_ndc(projected.ndc, ASPECT);
        let body = PickableBody::new(
            NodeId::new(0),
            "marker",
            0,
            world,
            0.5,
            BodyVisual {
                color: Rgba::WHITE,
                scale: 1.0,
            },
        );
        assert_eq!(resolve(&ray, &[body]), Some(NodeId::new(0)));
    }

    #[test]
    fn points_behind_the_camera_do_not_project() {
        let camera = OrbitCamera::default();
        let behind = camera.eye() + (camera.eye() - camera.target());
        assert!(camera.project(behind, ASPECT).is_none());
        assert!(camera.project(camera.target(), ASPECT).is_some());
    }

    #[test]
    fn rotation_eases_toward_goal_and_pitch_is_clamped() {
        let mut camera = OrbitCamera::default();
        camera.rotate(Vec2::new(0.0, 10_000.0));
        assert!(camera.ease(1.0 / 60.0));
        settle(&mut camera);

        let offset = camera.eye() - camera.target();
        let pitch = (offset.y / offset.length()).asin();
        assert!((pitch - PITCH_LIMIT).abs() < 1e-3);
    }

    #[test]
    fn zoom_and_reset() {
        let mut camera =
            OrbitCamera::framing([Vec3::new(-50.0, 0.0, 0.0), Vec3::new(50.0, 0.0, 0.0)]);
        let home = camera.distance();
        assert!(home > 50.0);

        camera.zoom(400.0);
        settle(&mut camera);
        assert!(camera.distance() < home);

        camera.focus(Vec3::new(50.0, 0.0, 0.0));
        camera.reset();
        settle(&mut camera);
        assert!((camera.distance() - home).abs() < 1e-2);
        assert!(camera.target().length() < 1e-2);
    }

    #[test]
    fn framing_skips_non_finite_points() {
        let camera = OrbitCamera::framing([
            Vec3::new(-10.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::NAN,
            Vec3::new(f32::INFINITY, 0.0, 0.0),
        ]);
        assert!(camera.target().is_finite());
        assert!(camera.target().length() < 1e-4);
        assert!(camera.eye().is_finite());
    }

    #[test]
    fn farther_points_cover_fewer_pixels() {
        let camera = OrbitCamera::default();
        assert!(camera.pixels_per_unit(10.0, 800.0) > camera.pixels_per_unit(100.0, 800.0));
    }
}
