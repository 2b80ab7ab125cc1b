//! Viewport-wide pointer listeners for the drag handle.
//!
//! While the handle is dragged the host listens for pointer moves on the
//! whole viewport, not just the handle. [`DragListenerRegistration`] makes
//! sure those listeners are attached once per drag and detached exactly
//! once when it ends, however many times a drag is started or released.

use log::debug;

/// Host hook that installs and removes the viewport pointer listeners
pub trait ViewportListeners {
    fn attach(&mut self);
    fn detach(&mut self);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragListenerRegistration {
    attached: bool,
}

impl DragListenerRegistration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Attach unless already attached; returns whether the host was called
    pub fn attach(&mut self, host: &mut dyn ViewportListeners) -> bool {
        if self.attached {
            return false;
        }
        host.attach();
        self.attached = true;
        debug!("Viewport drag listeners attached");
        true
    }

    /// Detach if attached; returns whether the host was called
    pub fn detach(&mut self, host: &mut dyn ViewportListeners) -> bool {
        if !self.attached {
            return false;
        }
        host.detach();
        self.attached = false;
        debug!("Viewport drag listeners detached");
        true
    }
}
