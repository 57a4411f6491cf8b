//! In-memory host used by the demo binary, integration tests and benchmarks

mod notifier;
mod rig;
mod world;

pub use notifier::{LogNotifier, PostedMessage};
pub use rig::OrbitRig;
pub use world::{PartShape, SimPart, SimWorld, PART_LAYER};
