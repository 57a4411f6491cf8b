pub mod changer;
pub mod cli;
pub mod config;
pub mod core;
pub mod events;
pub mod focus;
pub mod headless;
pub mod input;
pub mod math;
pub mod resolver;
pub mod service;
pub mod traits;
pub mod types;

pub use changer::FocusChanger;
pub use focus::{FocusContext, FocusState, FocusStateMachine, Mode};
pub use resolver::TargetResolver;
pub use service::FocusService;
