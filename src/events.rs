//! Typed lifecycle notifications pushed by the host.
//!
//! Subscribers register for a set of event kinds and receive their own queue.
//! The host publishes during its event dispatch; each subscriber drains its
//! queue before its next tick, so notifications are always processed before
//! the frame's position update.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::types::{CameraMode, VesselHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    CameraModeChanged(CameraMode),
    ActiveVesselChanged(VesselHandle),
    /// Vessel is about to be destroyed
    VesselWillDestroy(VesselHandle),
    /// Vessel is about to be physics-packed ("on rails")
    VesselGoOnRails(VesselHandle),
    StageSeparation,
    Undock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    CameraModeChanged,
    ActiveVesselChanged,
    VesselWillDestroy,
    VesselGoOnRails,
    StageSeparation,
    Undock,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::CameraModeChanged,
        EventKind::ActiveVesselChanged,
        EventKind::VesselWillDestroy,
        EventKind::VesselGoOnRails,
        EventKind::StageSeparation,
        EventKind::Undock,
    ];
}

impl LifecycleEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            LifecycleEvent::CameraModeChanged(_) => EventKind::CameraModeChanged,
            LifecycleEvent::ActiveVesselChanged(_) => EventKind::ActiveVesselChanged,
            LifecycleEvent::VesselWillDestroy(_) => EventKind::VesselWillDestroy,
            LifecycleEvent::VesselGoOnRails(_) => EventKind::VesselGoOnRails,
            LifecycleEvent::StageSeparation => EventKind::StageSeparation,
            LifecycleEvent::Undock => EventKind::Undock,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Debug, Default)]
struct Subscriber {
    kinds: HashSet<EventKind>,
    queue: VecDeque<LifecycleEvent>,
}

/// Single-threaded publish/subscribe hub for lifecycle notifications
#[derive(Debug, Default)]
pub struct EventBus {
    next_id: u64,
    subscribers: HashMap<SubscriptionId, Subscriber>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register interest in `kinds`
    pub fn subscribe(&mut self, kinds: &[EventKind]) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.insert(
            id,
            Subscriber {
                kinds: kinds.iter().copied().collect(),
                queue: VecDeque::new(),
            },
        );
        id
    }

    /// Drop a subscription and anything still queued for it
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(&id).is_some()
    }

    /// Queue `event` for every interested subscriber, returning how many
    pub fn publish(&mut self, event: LifecycleEvent) -> usize {
        let kind = event.kind();
        let mut delivered = 0;
        for subscriber in self.subscribers.values_mut() {
            if subscriber.kinds.contains(&kind) {
                subscriber.queue.push_back(event);
                delivered += 1;
            }
        }
        delivered
    }

    /// Take all pending events for `id` in publish order
    pub fn drain(&mut self, id: SubscriptionId) -> Vec<LifecycleEvent> {
        self.subscribers
            .get_mut(&id)
            .map(|subscriber| subscriber.queue.drain(..).collect())
            .unwrap_or_default()
    }

    pub fn pending(&self, id: SubscriptionId) -> usize {
        self.subscribers
            .get(&id)
            .map_or(0, |subscriber| subscriber.queue.len())
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(LifecycleEvent::Undock.kind(), EventKind::Undock);
        assert_eq!(
            LifecycleEvent::VesselGoOnRails(VesselHandle(1)).kind(),
            EventKind::VesselGoOnRails
        );
    }

    #[test]
    fn test_publish_filters_by_kind() {
        let mut bus = EventBus::new();
        let staging = bus.subscribe(&[EventKind::StageSeparation]);
        let all = bus.subscribe(&EventKind::ALL);

        assert_eq!(bus.publish(LifecycleEvent::StageSeparation), 2);
        assert_eq!(bus.publish(LifecycleEvent::Undock), 1);

        assert_eq!(bus.drain(staging), vec![LifecycleEvent::StageSeparation]);
        assert_eq!(
            bus.drain(all),
            vec![LifecycleEvent::StageSeparation, LifecycleEvent::Undock]
        );
        assert_eq!(bus.pending(all), 0);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut bus = EventBus::new();
        let id = bus.subscribe(&EventKind::ALL);
        bus.publish(LifecycleEvent::Undock);

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        assert_eq!(bus.publish(LifecycleEvent::Undock), 0);
        assert!(bus.drain(id).is_empty());
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_subscription_ids_are_unique() {
        let mut bus = EventBus::new();
        let a = bus.subscribe(&[]);
        let b = bus.subscribe(&[]);
        assert_ne!(a, b);
    }
}
