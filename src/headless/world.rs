use std::collections::BTreeMap;

use glam::Vec3;
use log::debug;

use crate::events::{EventBus, LifecycleEvent};
use crate::math::{intersect_aabb, intersect_sphere, Ray, AABB};
use crate::traits::{ObjectModel, SceneQuery};
use crate::types::{LayerMask, ObjectHandle, RaycastHit, VesselHandle};

/// Collision layer parts are placed on
pub const PART_LAYER: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PartShape {
    Box { half_extents: Vec3 },
    Sphere { radius: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimPart {
    pub name: String,
    pub vessel: VesselHandle,
    /// Position relative to the vessel origin
    pub offset: Vec3,
    pub shape: PartShape,
    pub layer: u8,
}

#[derive(Debug, Clone, PartialEq)]
struct SimVessel {
    position: Vec3,
    packed: bool,
}

/// Vessels made of box and sphere parts
#[derive(Debug, Clone, Default)]
pub struct SimWorld {
    vessels: BTreeMap<VesselHandle, SimVessel>,
    parts: BTreeMap<ObjectHandle, SimPart>,
    active: Option<VesselHandle>,
    next_id: u32,
}

impl SimWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vessel(&mut self, position: Vec3) -> VesselHandle {
        let handle = VesselHandle(self.allocate_id());
        self.vessels.insert(
            handle,
            SimVessel {
                position,
                packed: false,
            },
        );
        if self.active.is_none() {
            self.active = Some(handle);
        }
        handle
    }

    pub fn add_part(
        &mut self,
        vessel: VesselHandle,
        name: &str,
        offset: Vec3,
        shape: PartShape,
    ) -> ObjectHandle {
        let handle = ObjectHandle(self.allocate_id());
        self.parts.insert(
            handle,
            SimPart {
                name: name.to_string(),
                vessel,
                offset,
                shape,
                layer: PART_LAYER,
            },
        );
        handle
    }

    pub fn part(&self, object: ObjectHandle) -> Option<&SimPart> {
        self.parts.get(&object)
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub fn move_vessel(&mut self, vessel: VesselHandle, position: Vec3) {
        if let Some(v) = self.vessels.get_mut(&vessel) {
            v.position = position;
        }
    }

    pub fn translate_vessel(&mut self, vessel: VesselHandle, offset: Vec3) {
        if let Some(v) = self.vessels.get_mut(&vessel) {
            v.position += offset;
        }
    }

    /// Switch player control, notifying subscribers
    pub fn set_active(&mut self, vessel: VesselHandle, bus: &mut EventBus) {
        self.active = Some(vessel);
        bus.publish(LifecycleEvent::ActiveVesselChanged(vessel));
    }

    /// Notify subscribers, then remove the vessel and all of its parts
    pub fn destroy_vessel(&mut self, vessel: VesselHandle, bus: &mut EventBus) {
        bus.publish(LifecycleEvent::VesselWillDestroy(vessel));
        self.vessels.remove(&vessel);
        self.parts.retain(|_, part| part.vessel != vessel);
        if self.active == Some(vessel) {
            self.active = self.vessels.keys().next().copied();
        }
        debug!("destroyed {vessel:?}");
    }

    /// Notify subscribers, then suspend the vessel's physics
    pub fn pack_vessel(&mut self, vessel: VesselHandle, bus: &mut EventBus) {
        bus.publish(LifecycleEvent::VesselGoOnRails(vessel));
        if let Some(v) = self.vessels.get_mut(&vessel) {
            v.packed = true;
        }
    }

    /// Split `parts` off into a new vessel at the same place
    pub fn separate(
        &mut self,
        parts: &[ObjectHandle],
        undock: bool,
        bus: &mut EventBus,
    ) -> Option<VesselHandle> {
        let first = self.parts.get(parts.first()?)?;
        let origin = self.vessels.get(&first.vessel)?.position;
        let new_vessel = self.add_vessel(origin);
        for handle in parts {
            if let Some(part) = self.parts.get_mut(handle) {
                part.vessel = new_vessel;
            }
        }
        bus.publish(if undock {
            LifecycleEvent::Undock
        } else {
            LifecycleEvent::StageSeparation
        });
        Some(new_vessel)
    }

    fn allocate_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn live_part(&self, object: ObjectHandle) -> Option<(&SimPart, &SimVessel)> {
        let part = self.parts.get(&object)?;
        let vessel = self.vessels.get(&part.vessel)?;
        (!vessel.packed).then_some((part, vessel))
    }
}

impl SceneQuery for SimWorld {
    fn raycast(&self, ray: &Ray, max_range: f32, mask: LayerMask) -> Option<RaycastHit> {
        self.parts
            .keys()
            .filter_map(|&object| {
                let (part, vessel) = self.live_part(object)?;
                if !mask.contains_layer(part.layer) {
                    return None;
                }
                let center = vessel.position + part.offset;
                let distance = match part.shape {
                    PartShape::Box { half_extents } => {
                        let bounds = AABB::from_center(center, half_extents);
                        intersect_aabb(ray.origin, ray.direction, bounds.min, bounds.max)
                    }
                    PartShape::Sphere { radius } => {
                        intersect_sphere(ray.origin, ray.direction, center, radius)
                    }
                }?;
                Some(RaycastHit {
                    object,
                    distance,
                    point: ray.at(distance),
                })
            })
            .filter(|hit| hit.distance <= max_range)
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

impl ObjectModel for SimWorld {
    fn is_live(&self, object: ObjectHandle) -> bool {
        self.live_part(object).is_some()
    }

    fn owner_of(&self, object: ObjectHandle) -> Option<VesselHandle> {
        self.parts.get(&object).map(|part| part.vessel)
    }

    fn object_position(&self, object: ObjectHandle) -> Option<Vec3> {
        self.live_part(object)
            .map(|(part, vessel)| vessel.position + part.offset)
    }

    fn vessel_position(&self, vessel: VesselHandle) -> Option<Vec3> {
        self.vessels.get(&vessel).map(|v| v.position)
    }

    fn active_vessel(&self) -> Option<VesselHandle> {
        self.active
    }

    fn display_name(&self, object: ObjectHandle) -> String {
        self.parts
            .get(&object)
            .map_or_else(|| format!("object #{}", object.0), |part| part.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    fn two_part_ship() -> (SimWorld, VesselHandle, ObjectHandle, ObjectHandle) {
        let mut world = SimWorld::new();
        let ship = world.add_vessel(Vec3::ZERO);
        let pod = world.add_part(
            ship,
            "pod",
            Vec3::new(0.0, 2.0, 0.0),
            PartShape::Sphere { radius: 1.0 },
        );
        let tank = world.add_part(
            ship,
            "tank",
            Vec3::ZERO,
            PartShape::Box {
                half_extents: Vec3::splat(1.0),
            },
        );
        (world, ship, pod, tank)
    }

    #[test]
    fn test_first_vessel_becomes_active() {
        let (world, ship, _, _) = two_part_ship();
        assert_eq!(world.active_vessel(), Some(ship));
    }

    #[test]
    fn test_raycast_returns_nearest() {
        let (world, _, pod, _) = two_part_ship();
        let ray = Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y);

        let hit = world.raycast(&ray, 100.0, LayerMask::INTERACTABLE).unwrap();

        assert_eq!(hit.object, pod);
        assert!((hit.distance - 7.0).abs() < 1e-3);
    }

    #[test]
    fn test_raycast_respects_range_and_mask() {
        let (world, _, _, _) = two_part_ship();
        let ray = Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y);

        assert!(world.raycast(&ray, 5.0, LayerMask::ALL).is_none());
        assert!(world.raycast(&ray, 100.0, LayerMask::from_layer(4)).is_none());
    }

    #[test]
    fn test_positions_follow_vessel() {
        let (mut world, ship, pod, _) = two_part_ship();
        world.translate_vessel(ship, Vec3::new(1.0, 0.0, 0.0));

        assert_eq!(world.object_position(pod), Some(Vec3::new(1.0, 2.0, 0.0)));
        assert_eq!(world.display_name(pod), "pod");
    }

    #[test]
    fn test_destroy_publishes_and_removes() {
        let (mut world, ship, pod, _) = two_part_ship();
        let mut bus = EventBus::new();
        let id = bus.subscribe(&EventKind::ALL);

        world.destroy_vessel(ship, &mut bus);

        assert_eq!(bus.drain(id), vec![LifecycleEvent::VesselWillDestroy(ship)]);
        assert!(!world.is_live(pod));
        assert_eq!(world.part_count(), 0);
        assert_eq!(world.active_vessel(), None);
    }

    #[test]
    fn test_packed_parts_are_not_live() {
        let (mut world, ship, pod, _) = two_part_ship();
        let mut bus = EventBus::new();

        world.pack_vessel(ship, &mut bus);

        assert!(!world.is_live(pod));
        assert_eq!(world.object_position(pod), None);
        assert_eq!(world.owner_of(pod), Some(ship));
    }

    #[test]
    fn test_separate_moves_parts() {
        let (mut world, ship, pod, tank) = two_part_ship();
        let mut bus = EventBus::new();
        let id = bus.subscribe(&EventKind::ALL);

        let capsule = world.separate(&[pod], true, &mut bus).unwrap();

        assert_ne!(capsule, ship);
        assert_eq!(world.owner_of(pod), Some(capsule));
        assert_eq!(world.owner_of(tank), Some(ship));
        assert_eq!(bus.drain(id), vec![LifecycleEvent::Undock]);
    }
}
