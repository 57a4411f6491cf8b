use glam::{Vec2, Vec3};

use crate::math::Ray;
use crate::types::FollowTarget;

/// Host camera rig. The anchor is the point the render camera orbits.
pub trait CameraRig {
    fn anchor_position(&self) -> Vec3;

    fn set_anchor_position(&mut self, position: Vec3);

    /// Coefficient of the rig's own built-in anchor smoothing (0 disables it)
    fn sharpness(&self) -> f32;

    fn set_sharpness(&mut self, sharpness: f32);

    /// Hand positioning back to the rig's native instant follow
    fn set_native_follow(&mut self, target: FollowTarget);

    /// Ray from the render camera through a pointer position in screen pixels
    fn screen_point_to_ray(&self, pointer: Vec2) -> Ray;
}
