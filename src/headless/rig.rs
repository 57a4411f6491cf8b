use glam::{Vec2, Vec3};

use crate::math::Ray;
use crate::traits::CameraRig;
use crate::types::FollowTarget;

/// Orbit camera around an anchor point, looking at it from `distance` away
#[derive(Debug, Clone)]
pub struct OrbitRig {
    pub anchor: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    /// Vertical field of view in radians
    pub fov: f32,
    pub viewport: Vec2,
    pub sharpness: f32,
    /// Last native follow request
    pub following: Option<FollowTarget>,
    /// Number of direct anchor writes
    pub anchor_writes: u64,
}

impl OrbitRig {
    pub fn new(anchor: Vec3, distance: f32) -> Self {
        Self {
            anchor,
            yaw: std::f32::consts::PI,
            pitch: -0.3,
            distance,
            fov: 60f32.to_radians(),
            viewport: Vec2::new(800.0, 600.0),
            sharpness: 0.5,
            following: None,
            anchor_writes: 0,
        }
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.cos() * self.pitch.cos(),
        )
        .normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    /// Render camera position in world space
    pub fn eye(&self) -> Vec3 {
        self.anchor - self.forward() * self.distance
    }

    /// Pixel position of a world point, or `None` when it is behind the camera
    pub fn world_to_screen(&self, point: Vec3) -> Option<Vec2> {
        let relative = point - self.eye();
        let depth = relative.dot(self.forward());
        if depth <= 0.0 {
            return None;
        }

        let half_height = (self.fov * 0.5).tan();
        let aspect = self.viewport.x / self.viewport.y;
        let ndc_x = relative.dot(self.right()) / (depth * half_height * aspect);
        let ndc_y = relative.dot(self.up()) / (depth * half_height);
        Some(Vec2::new(
            (ndc_x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc_y) * 0.5 * self.viewport.y,
        ))
    }

    /// Screen position (pixels, origin top-left) of the viewport center
    pub fn screen_center(&self) -> Vec2 {
        self.viewport * 0.5
    }
}

impl CameraRig for OrbitRig {
    fn anchor_position(&self) -> Vec3 {
        self.anchor
    }

    fn set_anchor_position(&mut self, position: Vec3) {
        self.anchor = position;
        self.anchor_writes += 1;
    }

    fn sharpness(&self) -> f32 {
        self.sharpness
    }

    fn set_sharpness(&mut self, sharpness: f32) {
        self.sharpness = sharpness;
    }

    fn set_native_follow(&mut self, target: FollowTarget) {
        self.following = Some(target);
    }

    fn screen_point_to_ray(&self, pointer: Vec2) -> Ray {
        let ndc_x = 2.0 * pointer.x / self.viewport.x - 1.0;
        let ndc_y = 1.0 - 2.0 * pointer.y / self.viewport.y;
        let half_height = (self.fov * 0.5).tan();
        let aspect = self.viewport.x / self.viewport.y;

        let direction = self.forward()
            + self.right() * ndc_x * half_height * aspect
            + self.up() * ndc_y * half_height;
        Ray::new(self.eye(), direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basis_is_orthonormal() {
        let rig = OrbitRig::new(Vec3::ZERO, 10.0);
        assert!(rig.forward().dot(rig.right()).abs() < 1e-5);
        assert!(rig.forward().dot(rig.up()).abs() < 1e-5);
        assert!((rig.up().length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_center_ray_passes_through_anchor() {
        let rig = OrbitRig::new(Vec3::new(1.0, 2.0, 3.0), 10.0);
        let ray = rig.screen_point_to_ray(rig.screen_center());

        assert!((ray.at(10.0) - rig.anchor).length() < 1e-3);
    }

    #[test]
    fn test_right_half_of_screen_looks_right() {
        let rig = OrbitRig::new(Vec3::ZERO, 10.0);
        let ray = rig.screen_point_to_ray(Vec2::new(700.0, 300.0));

        assert!(ray.direction.dot(rig.right()) > 0.0);
    }

    #[test]
    fn test_world_to_screen_inverts_ray() {
        let rig = OrbitRig::new(Vec3::ZERO, 10.0);
        let point = Vec3::new(2.0, 1.0, 3.0);

        let pixel = rig.world_to_screen(point).unwrap();
        let ray = rig.screen_point_to_ray(pixel);
        let along = (point - ray.origin).dot(ray.direction);

        assert!((ray.at(along) - point).length() < 1e-3);
    }

    #[test]
    fn test_world_to_screen_behind_camera() {
        let rig = OrbitRig::new(Vec3::ZERO, 10.0);
        assert_eq!(rig.world_to_screen(rig.eye() - rig.forward()), None);
    }

    #[test]
    fn test_anchor_writes_counted() {
        let mut rig = OrbitRig::new(Vec3::ZERO, 10.0);
        rig.set_anchor_position(Vec3::ONE);
        assert_eq!(rig.anchor_writes, 1);
        assert_eq!(rig.anchor_position(), Vec3::ONE);
    }
}
