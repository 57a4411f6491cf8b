//! Control surface for other subsystems that want to drive the camera focus.
//!
//! Handles are cheap to clone and may be created before the focus changer
//! starts; requests made while it is not running are refused.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use log::debug;

use crate::types::ObjectHandle;

/// Request queued through the service, applied on the next update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusCommand {
    FocusOn(ObjectHandle),
    Reset,
}

#[derive(Debug, Default)]
struct ServiceState {
    available: bool,
    commands: VecDeque<FocusCommand>,
}

#[derive(Debug, Clone, Default)]
pub struct FocusService {
    state: Rc<RefCell<ServiceState>>,
}

impl FocusService {
    /// A handle that is not yet connected to a running focus changer
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_available(&self) -> bool {
        self.state.borrow().available
    }

    /// Focus on `object`; false when the focus changer is not running
    pub fn focus_on(&self, object: ObjectHandle) -> bool {
        self.push(FocusCommand::FocusOn(object))
    }

    /// Focus on `object`, or reset the focus when there is none
    pub fn focus_on_part(&self, object: Option<ObjectHandle>) -> bool {
        match object {
            Some(object) => self.focus_on(object),
            None => self.reset_focus(),
        }
    }

    /// Return the focus to the active vessel; false when not running
    pub fn reset_focus(&self) -> bool {
        self.push(FocusCommand::Reset)
    }

    pub(crate) fn set_available(&self, available: bool) {
        let mut state = self.state.borrow_mut();
        state.available = available;
        if !available {
            state.commands.clear();
        }
    }

    pub(crate) fn take_commands(&self) -> Vec<FocusCommand> {
        self.state.borrow_mut().commands.drain(..).collect()
    }

    fn push(&self, command: FocusCommand) -> bool {
        let mut state = self.state.borrow_mut();
        if !state.available {
            debug!("focus service unavailable, dropping {command:?}");
            return false;
        }
        state.commands.push_back(command);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_refuses() {
        let service = FocusService::new();
        assert!(!service.is_available());
        assert!(!service.focus_on(ObjectHandle(1)));
        assert!(!service.reset_focus());
        assert!(service.take_commands().is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let service = FocusService::new();
        let other = service.clone();
        service.set_available(true);

        assert!(other.is_available());
        assert!(other.focus_on_part(Some(ObjectHandle(3))));
        assert!(other.focus_on_part(None));
        assert_eq!(
            service.take_commands(),
            vec![FocusCommand::FocusOn(ObjectHandle(3)), FocusCommand::Reset]
        );
    }

    #[test]
    fn test_shutdown_discards_pending() {
        let service = FocusService::new();
        service.set_available(true);
        service.reset_focus();
        service.set_available(false);

        assert!(service.take_commands().is_empty());
    }
}
