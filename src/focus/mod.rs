//! Focus state machine: target selection, per-frame glide and validity checks

mod machine;
mod mode;
mod session;

pub use machine::{
    FocusContext, FocusStateMachine, DEBOUNCE_SECS, GLIDE_TIMEOUT_SECS, MESSAGE_SECS, WARNING_SECS,
};
pub use mode::Mode;
pub use session::{FocalTarget, FocusSession, FocusState, DEFAULT_BASE_SHARPNESS};
