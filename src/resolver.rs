use glam::Vec2;
use log::debug;

use crate::traits::{CameraRig, SceneQuery};
use crate::types::{LayerMask, ObjectHandle};

/// Maximum pick distance from the render camera
pub const MAX_PICK_RANGE: f32 = 10_000.0;

/// Picks the focal target under the pointer
#[derive(Debug, Clone, Copy)]
pub struct TargetResolver {
    pub max_range: f32,
    pub layer_mask: LayerMask,
}

impl TargetResolver {
    pub fn new(max_range: f32, layer_mask: LayerMask) -> Self {
        Self {
            max_range,
            layer_mask,
        }
    }

    /// Nearest interactable object along the camera ray through `pointer`
    pub fn resolve(
        &self,
        rig: &dyn CameraRig,
        scene: &dyn SceneQuery,
        pointer: Vec2,
    ) -> Option<ObjectHandle> {
        let ray = rig.screen_point_to_ray(pointer);
        let hit = scene.raycast(&ray, self.max_range, self.layer_mask);

        match hit {
            Some(hit) => {
                debug!("pointer {pointer} hit {:?} at {:.2}", hit.object, hit.distance);
                Some(hit.object)
            }
            None => {
                debug!("pointer {pointer} hit nothing");
                None
            }
        }
    }
}

impl Default for TargetResolver {
    fn default() -> Self {
        Self::new(MAX_PICK_RANGE, LayerMask::INTERACTABLE)
    }
}
