use std::time::Duration;

use tracing::{debug, info};

use super::state::{GestureEffect, GestureEvent, GesturePhase, GestureState};
use super::GestureConfig;

/// Asks the surrounding application to re-fetch the current view.
///
/// Fire-and-forget: the controller never learns whether the reload worked.
pub trait ReloadTrigger {
    fn request_reload(&self);
}

impl<F: Fn()> ReloadTrigger for F {
    fn request_reload(&self) {
        self()
    }
}

/// Best-effort physical feedback.
pub trait Haptics {
    fn is_supported(&self) -> bool;
    fn pulse(&self, duration: Duration);
}

/// Platform without any feedback device.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn is_supported(&self) -> bool {
        false
    }

    fn pulse(&self, _duration: Duration) {}
}

/// Drives [`GestureState`] from raw input and performs its effects.
pub struct RefreshGestureController<R: ReloadTrigger, H: Haptics = NoHaptics> {
    state: GestureState,
    config: GestureConfig,
    reload: R,
    haptics: H,
}

impl<R: ReloadTrigger> RefreshGestureController<R, NoHaptics> {
    pub fn new(config: GestureConfig, reload: R) -> Self {
        Self::with_haptics(config, reload, NoHaptics)
    }
}

impl<R: ReloadTrigger, H: Haptics> RefreshGestureController<R, H> {
    pub fn with_haptics(config: GestureConfig, reload: R, haptics: H) -> Self {
        Self {
            state: GestureState::new(),
            config,
            reload,
            haptics,
        }
    }

    /// Feed one event. Returns `true` if it fired a reload.
    pub fn handle(&mut self, event: GestureEvent, now_ms: u64) -> bool {
        let before = self.state.phase;
        let transition = self.state.transition(event, now_ms, &self.config);
        self.state = transition.state;

        if before == GesturePhase::Cooling && self.state.phase != GesturePhase::Cooling {
            debug!("Refresh cooldown finished");
        }

        let mut reloaded = false;
        for effect in transition.effects {
            match effect {
                GestureEffect::Reload => {
                    info!("Pull-to-refresh triggered");
                    self.reload.request_reload();
                    reloaded = true;
                }
                GestureEffect::HapticPulse(duration) => {
                    if self.haptics.is_supported() {
                        self.haptics.pulse(duration);
                    }
                }
            }
        }
        reloaded
    }

    pub fn touch_start(&mut self, y: f32, at_top: bool, now_ms: u64) {
        self.handle(GestureEvent::TouchStart { y, at_top }, now_ms);
    }

    pub fn touch_move(&mut self, y: f32, now_ms: u64) {
        self.handle(GestureEvent::TouchMove { y }, now_ms);
    }

    pub fn touch_end(&mut self, now_ms: u64) -> bool {
        self.handle(GestureEvent::TouchEnd, now_ms)
    }

    pub fn tick(&mut self, now_ms: u64) {
        self.handle(GestureEvent::Tick, now_ms);
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn phase(&self) -> GesturePhase {
        self.state.phase
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn haptics(&self) -> &H {
        &self.haptics
    }

    pub fn indicator_offset(&self) -> f32 {
        self.state.indicator_offset(&self.config)
    }

    pub fn is_refreshing(&self) -> bool {
        self.state.is_refreshing()
    }

    pub fn is_armed(&self) -> bool {
        self.state.is_armed(&self.config)
    }

    pub fn rotation_degrees(&self) -> f32 {
        self.state.rotation_degrees()
    }
}
