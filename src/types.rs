use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Opaque, non-owning handle to a scene object (a part of some vessel).
///
/// The scene graph owns the object; a handle may outlive it and must be
/// checked with `ObjectModel::is_live` before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHandle(pub u32);

/// Opaque handle to a vessel, the composite object a part belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VesselHandle(pub u32);

/// Bit mask selecting which scene layers a raycast may hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Part and vessel-collider layers
    pub const INTERACTABLE: LayerMask = LayerMask(0x8_0001);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    pub const fn from_layer(layer: u8) -> Self {
        LayerMask(1 << layer)
    }

    pub const fn contains_layer(&self, layer: u8) -> bool {
        self.0 & (1 << layer) != 0
    }
}

/// Object the camera rig should follow with its own built-in logic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowTarget {
    Object(ObjectHandle),
    Vessel(VesselHandle),
}

/// Camera rig view modes reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    Flight,
    Map,
    /// Interior view from inside the vessel
    FirstPerson,
}

/// Screen placement of on-screen messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    UpperCenter,
}

/// Nearest intersection returned by a scene query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    pub object: ObjectHandle,
    pub distance: f32,
    pub point: Vec3,
}
