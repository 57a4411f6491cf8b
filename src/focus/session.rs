use crate::types::{ObjectHandle, VesselHandle};

/// Rig smoothing coefficient assumed before any focus action captured one
pub const DEFAULT_BASE_SHARPNESS: f32 = 0.5;

/// Non-owning reference to the object the camera glides towards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocalTarget {
    pub object: ObjectHandle,
    /// Owning vessel as last observed; refreshed from the object model
    pub owner: Option<VesselHandle>,
}

/// State of one focus episode
#[derive(Debug, Clone, PartialEq)]
pub struct FocusSession {
    pub target: Option<FocalTarget>,
    /// Seconds since the last focus or reset action, advanced by every tick
    pub elapsed: f32,
    pub has_reached_target: bool,
    pub is_active: bool,
    /// Rig smoothing coefficient restored on reset
    pub saved_base_sharpness: f32,
}

impl FocusSession {
    pub fn new() -> Self {
        Self {
            target: None,
            // No focus action yet
            elapsed: f32::INFINITY,
            has_reached_target: false,
            is_active: false,
            saved_base_sharpness: DEFAULT_BASE_SHARPNESS,
        }
    }

    pub fn target_object(&self) -> Option<ObjectHandle> {
        self.target.map(|target| target.object)
    }

    /// Restart the session timer
    pub fn restart(&mut self) {
        self.elapsed = 0.0;
    }
}

impl Default for FocusSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Observable phase of the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusState {
    /// No session running, anchor left to the rig
    Idle,
    /// Anchor still gliding towards the target or back to the vessel
    Acquiring,
    /// Anchor locked onto the target, following it every tick
    Tracking,
}

impl FocusState {
    pub fn of(session: &FocusSession) -> Self {
        match (session.is_active, session.has_reached_target) {
            (false, _) => FocusState::Idle,
            (true, false) => FocusState::Acquiring,
            (true, true) => FocusState::Tracking,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle() {
        let session = FocusSession::new();
        assert_eq!(FocusState::of(&session), FocusState::Idle);
        assert_eq!(session.target_object(), None);
        assert_eq!(session.saved_base_sharpness, DEFAULT_BASE_SHARPNESS);
        assert_eq!(session.elapsed, f32::INFINITY);
    }

    #[test]
    fn test_state_derivation() {
        let mut session = FocusSession::new();
        session.is_active = true;
        assert_eq!(FocusState::of(&session), FocusState::Acquiring);

        session.has_reached_target = true;
        assert_eq!(FocusState::of(&session), FocusState::Tracking);
    }
}
