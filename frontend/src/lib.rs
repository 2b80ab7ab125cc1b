//! # Memory Calendar
//!
//! View engine for a shared calendar of journal posts ("boards") and
//! scheduled matches. The engine owns calendar state and behavior only;
//! rendering, networking and storage are supplied by the host through the
//! traits in [`services`] and [`gestures`].

pub mod calendar;
pub mod config;
pub mod error;
pub mod gestures;
pub mod services;

pub use calendar::CalendarController;
pub use config::CalendarConfig;
pub use error::{CalendarError, CalendarResult};
