//! # Swipe Gesture Primitive
//!
//! Tracks one pointer gesture (down → move* → up) and classifies it at
//! release. The dominant axis is the one with the larger absolute
//! displacement; a swipe fires only when that displacement exceeds the
//! threshold. While the pointer is down the tracker streams a normalized
//! drag progress in `[-1, 1]` for live feedback. Every gesture ends in
//! exactly one terminal state: a single swipe, or nothing.

use log::debug;

use crate::config::{CalendarConfig, DEFAULT_SWIPE_PROGRESS_DISTANCE_PX, DEFAULT_SWIPE_THRESHOLD_PX};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SwipeDirection {
    pub fn is_horizontal(&self) -> bool {
        matches!(self, SwipeDirection::Left | SwipeDirection::Right)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPosition {
    pub x: f32,
    pub y: f32,
}

impl PointerPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeConfig {
    /// Dominant-axis travel that must be exceeded for a swipe
    pub threshold_px: f32,
    /// Horizontal travel that maps to a progress of `±1`
    pub progress_distance_px: f32,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            threshold_px: DEFAULT_SWIPE_THRESHOLD_PX,
            progress_distance_px: DEFAULT_SWIPE_PROGRESS_DISTANCE_PX,
        }
    }
}

impl From<&CalendarConfig> for SwipeConfig {
    fn from(config: &CalendarConfig) -> Self {
        Self {
            threshold_px: config.swipe_threshold_px,
            progress_distance_px: config.swipe_progress_distance_px,
        }
    }
}

/// Classify a displacement. `dy` grows downwards (screen coordinates).
pub fn classify(dx: f32, dy: f32, threshold_px: f32) -> Option<SwipeDirection> {
    if !dx.is_finite() || !dy.is_finite() {
        return None;
    }

    if dx.abs() > dy.abs() {
        if dx.abs() <= threshold_px {
            return None;
        }
        Some(if dx > 0.0 { SwipeDirection::Right } else { SwipeDirection::Left })
    } else {
        if dy.abs() <= threshold_px {
            return None;
        }
        Some(if dy > 0.0 { SwipeDirection::Down } else { SwipeDirection::Up })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveGesture {
    start: PointerPosition,
    current: PointerPosition,
}

#[derive(Debug, Clone)]
pub struct SwipeTracker {
    config: SwipeConfig,
    gesture: Option<ActiveGesture>,
    progress: f32,
}

impl SwipeTracker {
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            gesture: None,
            progress: 0.0,
        }
    }

    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    /// Latest drag progress; 0 when no gesture is active
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn pointer_down(&mut self, position: PointerPosition) {
        if !position.is_finite() {
            return;
        }
        if self.gesture.is_some() {
            debug!("Pointer down during an active gesture, restarting it");
        }
        self.gesture = Some(ActiveGesture {
            start: position,
            current: position,
        });
        self.progress = 0.0;
    }

    /// Track the pointer; returns the updated progress while a gesture is active
    pub fn pointer_move(&mut self, position: PointerPosition) -> Option<f32> {
        let gesture = self.gesture.as_mut()?;
        if position.is_finite() {
            gesture.current = position;
        }

        let travel = gesture.current.x - gesture.start.x;
        let distance = self.config.progress_distance_px.max(f32::EPSILON);
        self.progress = (travel / distance).clamp(-1.0, 1.0);
        Some(self.progress)
    }

    /// End the gesture. `position` is the release point when the platform
    /// reports one; otherwise the last move is used.
    pub fn pointer_up(&mut self, position: Option<PointerPosition>) -> Option<SwipeDirection> {
        let gesture = self.gesture.take()?;
        self.progress = 0.0;

        let end = position.filter(PointerPosition::is_finite).unwrap_or(gesture.current);
        let dx = end.x - gesture.start.x;
        let dy = end.y - gesture.start.y;

        let swipe = classify(dx, dy, self.config.threshold_px);
        debug!("Gesture released with dx={:.1} dy={:.1}: {:?}", dx, dy, swipe);
        swipe
    }

    /// Abort the gesture without classifying it
    pub fn pointer_cancel(&mut self) {
        self.gesture = None;
        self.progress = 0.0;
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(SwipeConfig::default())
    }
}
