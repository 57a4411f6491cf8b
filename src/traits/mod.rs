pub mod camera;
pub mod controller;
pub mod notifier;
pub mod scene;

pub use camera::*;
pub use controller::*;
pub use notifier::*;
pub use scene::*;
