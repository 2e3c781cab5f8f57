//! Pull-to-refresh gesture recognition.
//!
//! A vertical drag that starts with the list scrolled to its top is damped,
//! clamped and, if released past the trigger threshold, turned into a single
//! reload request followed by a fixed cooldown.
//!
//! - [`GestureState`]: pure transition function over [`GestureEvent`]s
//! - [`RefreshGestureController`]: owns the state and performs reload/haptic effects
//! - [`GestureConfig`]: tuning, loaded from the `[gesture]` config section

pub mod config;
pub mod controller;
pub mod state;

pub use config::GestureConfig;
pub use controller::{Haptics, NoHaptics, RefreshGestureController, ReloadTrigger};
pub use state::{damped_delta, GestureEffect, GestureEvent, GesturePhase, GestureState, Transition};
