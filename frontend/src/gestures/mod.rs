pub mod drag_listeners;
pub mod swipe;

pub use drag_listeners::{DragListenerRegistration, ViewportListeners};
pub use swipe::{classify, PointerPosition, SwipeConfig, SwipeDirection, SwipeTracker};
