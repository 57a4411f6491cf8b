use glam::Vec3;

use crate::math::Ray;
use crate::types::{LayerMask, ObjectHandle, RaycastHit, VesselHandle};

/// Physics scene query
pub trait SceneQuery {
    /// Nearest hit along `ray` within `max_range` on the layers in `mask`
    fn raycast(&self, ray: &Ray, max_range: f32, mask: LayerMask) -> Option<RaycastHit>;
}

/// Read-only view of the host's object graph
pub trait ObjectModel {
    /// Whether the handle still resolves to a live object
    fn is_live(&self, object: ObjectHandle) -> bool;

    /// Vessel the object belongs to, if it belongs to one
    fn owner_of(&self, object: ObjectHandle) -> Option<VesselHandle>;

    /// World position of a live object
    fn object_position(&self, object: ObjectHandle) -> Option<Vec3>;

    /// World position of a vessel's origin
    fn vessel_position(&self, vessel: VesselHandle) -> Option<Vec3>;

    /// Vessel currently under player control
    fn active_vessel(&self) -> Option<VesselHandle>;

    /// Human readable object name for notifications
    fn display_name(&self, object: ObjectHandle) -> String {
        format!("object #{}", object.0)
    }
}
