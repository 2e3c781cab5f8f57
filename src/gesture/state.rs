//! Pure pull-to-refresh state machine.
//!
//! `GestureState::transition` maps (state, event, now) to the next state plus the
//! side effects the caller must perform. Nothing here touches a clock or an
//! input device; time arrives as a monotonic millisecond value.

use std::time::Duration;

use super::GestureConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    Dragging,
    Triggered,
    Cooling,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Pointer went down. `at_top` is whether the list is scrolled to its first row.
    TouchStart { y: f32, at_top: bool },
    TouchMove { y: f32 },
    TouchEnd,
    /// Time passed with no input.
    Tick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEffect {
    Reload,
    HapticPulse(Duration),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureState {
    pub phase: GesturePhase,
    pub origin_y: Option<f32>,
    pub current_delta: f32,
    /// Monotonic deadline at which cooling ends.
    pub cooldown_until_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: GestureState,
    pub effects: Vec<GestureEffect>,
}

impl Transition {
    fn to(state: GestureState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }
}

/// Damped, clamped distance for a raw drag. Zero for upward or no movement.
pub fn damped_delta(raw: f32, config: &GestureConfig) -> f32 {
    if raw.is_nan() || raw <= 0.0 {
        return 0.0;
    }
    (raw * config.damping).clamp(0.0, config.max_distance.max(0.0))
}

impl GestureState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transition(
        self,
        event: GestureEvent,
        now_ms: u64,
        config: &GestureConfig,
    ) -> Transition {
        let state = self.expire_cooldown(now_ms);

        match (state.phase, event) {
            (GesturePhase::Idle, GestureEvent::TouchStart { y, at_top: true }) => {
                Transition::to(Self::dragging_from(y))
            }
            (GesturePhase::Idle, _) => Transition::to(state),

            (GesturePhase::Dragging, GestureEvent::TouchStart { y, at_top }) => {
                if at_top {
                    Transition::to(Self::dragging_from(y))
                } else {
                    Transition::to(Self::default())
                }
            }
            (GesturePhase::Dragging, GestureEvent::TouchMove { y }) => {
                let origin = state.origin_y.unwrap_or(y);
                Transition::to(Self {
                    current_delta: damped_delta(y - origin, config),
                    ..state
                })
            }
            (GesturePhase::Dragging, GestureEvent::TouchEnd) => {
                if state.current_delta > config.trigger_threshold {
                    Self {
                        phase: GesturePhase::Triggered,
                        ..state
                    }
                    .fire(now_ms, config)
                } else {
                    Transition::to(Self::default())
                }
            }
            (GesturePhase::Dragging, GestureEvent::Tick) => Transition::to(state),

            // A refresh is in flight; input is dropped, not queued.
            (GesturePhase::Triggered | GesturePhase::Cooling, _) => Transition::to(state),
        }
    }

    /// Distance the indicator should be drawn at.
    pub fn indicator_offset(&self, config: &GestureConfig) -> f32 {
        match self.phase {
            GesturePhase::Idle => 0.0,
            GesturePhase::Dragging => self.current_delta,
            GesturePhase::Triggered | GesturePhase::Cooling => config.refreshing_offset,
        }
    }

    pub fn is_refreshing(&self) -> bool {
        matches!(self.phase, GesturePhase::Triggered | GesturePhase::Cooling)
    }

    /// Releasing now would trigger a refresh.
    pub fn is_armed(&self, config: &GestureConfig) -> bool {
        self.phase == GesturePhase::Dragging && self.current_delta > config.trigger_threshold
    }

    pub fn rotation_degrees(&self) -> f32 {
        self.current_delta * 2.0
    }

    fn dragging_from(y: f32) -> Self {
        Self {
            phase: GesturePhase::Dragging,
            origin_y: Some(y),
            current_delta: 0.0,
            cooldown_until_ms: None,
        }
    }

    fn fire(self, now_ms: u64, config: &GestureConfig) -> Transition {
        debug_assert_eq!(self.phase, GesturePhase::Triggered);
        Transition {
            state: Self {
                phase: GesturePhase::Cooling,
                origin_y: None,
                current_delta: self.current_delta,
                cooldown_until_ms: Some(now_ms.saturating_add(config.cooldown_ms)),
            },
            effects: vec![
                GestureEffect::Reload,
                GestureEffect::HapticPulse(config.haptic_pulse()),
            ],
        }
    }

    fn expire_cooldown(self, now_ms: u64) -> Self {
        match (self.phase, self.cooldown_until_ms) {
            (GesturePhase::Cooling, Some(deadline)) if now_ms >= deadline => Self::default(),
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GestureConfig {
        GestureConfig::default()
    }

    fn run(
        state: GestureState,
        events: &[GestureEvent],
        now_ms: u64,
    ) -> (GestureState, Vec<GestureEffect>) {
        let config = config();
        let mut state = state;
        let mut effects = Vec::new();
        for event in events {
            let t = state.transition(*event, now_ms, &config);
            state = t.state;
            effects.extend(t.effects);
        }
        (state, effects)
    }

    fn start(y: f32) -> GestureEvent {
        GestureEvent::TouchStart { y, at_top: true }
    }

    fn reloads(effects: &[GestureEffect]) -> usize {
        effects.iter().filter(|e| **e == GestureEffect::Reload).count()
    }

    #[test]
    fn test_damped_delta() {
        let config = config();
        assert_eq!(damped_delta(-50.0, &config), 0.0);
        assert_eq!(damped_delta(0.0, &config), 0.0);
        assert_eq!(damped_delta(10.0, &config), 5.0);
        assert_eq!(damped_delta(400.0, &config), 200.0);
        assert_eq!(damped_delta(1_000.0, &config), 200.0);
        assert_eq!(damped_delta(f32::NAN, &config), 0.0);
    }

    #[test]
    fn test_damped_delta_never_negative() {
        let config = GestureConfig {
            damping: -1.0,
            ..config()
        };
        assert_eq!(damped_delta(100.0, &config), 0.0);
    }

    #[test]
    fn test_touch_start_requires_top() {
        let (state, _) = run(
            GestureState::new(),
            &[GestureEvent::TouchStart { y: 100.0, at_top: false }],
            0,
        );
        assert_eq!(state.phase, GesturePhase::Idle);
        assert_eq!(state.origin_y, None);

        let (state, _) = run(GestureState::new(), &[start(100.0)], 0);
        assert_eq!(state.phase, GesturePhase::Dragging);
        assert_eq!(state.origin_y, Some(100.0));
        assert_eq!(state.current_delta, 0.0);
    }

    #[test]
    fn test_exactly_at_threshold_does_not_trigger() {
        let (state, effects) = run(
            GestureState::new(),
            &[start(100.0), GestureEvent::TouchMove { y: 220.0 }],
            0,
        );
        assert_eq!(state.current_delta, 60.0);
        assert!(!state.is_armed(&config()));

        let (state, more) = run(state, &[GestureEvent::TouchEnd], 0);
        assert_eq!(state.phase, GesturePhase::Idle);
        assert_eq!(state.current_delta, 0.0);
        assert!(effects.is_empty() && more.is_empty());
    }

    #[test]
    fn test_past_threshold_triggers_once() {
        let (state, effects) = run(
            GestureState::new(),
            &[
                start(100.0),
                GestureEvent::TouchMove { y: 300.0 },
                GestureEvent::TouchEnd,
            ],
            1_000,
        );
        assert_eq!(state.phase, GesturePhase::Cooling);
        assert_eq!(state.indicator_offset(&config()), 60.0);
        assert_eq!(state.cooldown_until_ms, Some(2_500));
        assert_eq!(
            effects,
            vec![
                GestureEffect::Reload,
                GestureEffect::HapticPulse(Duration::from_millis(50))
            ]
        );
    }

    #[test]
    fn test_move_back_above_origin_clamps_to_zero() {
        let (state, _) = run(
            GestureState::new(),
            &[
                start(100.0),
                GestureEvent::TouchMove { y: 300.0 },
                GestureEvent::TouchMove { y: 40.0 },
            ],
            0,
        );
        assert_eq!(state.phase, GesturePhase::Dragging);
        assert_eq!(state.current_delta, 0.0);

        let (state, effects) = run(state, &[GestureEvent::TouchEnd], 0);
        assert_eq!(state.phase, GesturePhase::Idle);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_cooldown_ignores_new_gestures() {
        let trigger = [
            start(0.0),
            GestureEvent::TouchMove { y: 400.0 },
            GestureEvent::TouchEnd,
        ];
        let (state, effects) = run(GestureState::new(), &trigger, 0);
        assert_eq!(reloads(&effects), 1);

        let (state, effects) = run(state, &trigger, 1_499);
        assert_eq!(state.phase, GesturePhase::Cooling);
        assert_eq!(reloads(&effects), 0);

        let (state, effects) = run(state, &trigger, 1_500);
        assert_eq!(reloads(&effects), 1);
        assert_eq!(state.cooldown_until_ms, Some(3_000));
    }

    #[test]
    fn test_tick_after_deadline_resets() {
        let (state, _) = run(
            GestureState::new(),
            &[
                start(0.0),
                GestureEvent::TouchMove { y: 400.0 },
                GestureEvent::TouchEnd,
            ],
            0,
        );

        let (state, _) = run(state, &[GestureEvent::Tick], 1_499);
        assert!(state.is_refreshing());

        let (state, _) = run(state, &[GestureEvent::Tick], 1_500);
        assert_eq!(state, GestureState::default());
        assert_eq!(state.indicator_offset(&config()), 0.0);
    }

    #[test]
    fn test_stray_events_in_idle_are_ignored() {
        let (state, effects) = run(
            GestureState::new(),
            &[GestureEvent::TouchMove { y: 500.0 }, GestureEvent::TouchEnd],
            0,
        );
        assert_eq!(state, GestureState::default());
        assert!(effects.is_empty());
    }

    #[test]
    fn test_restart_while_dragging_reanchors() {
        let (state, _) = run(
            GestureState::new(),
            &[
                start(0.0),
                GestureEvent::TouchMove { y: 100.0 },
                start(80.0),
            ],
            0,
        );
        assert_eq!(state.origin_y, Some(80.0));
        assert_eq!(state.current_delta, 0.0);

        let (state, _) = run(
            state,
            &[GestureEvent::TouchStart { y: 0.0, at_top: false }],
            0,
        );
        assert_eq!(state.phase, GesturePhase::Idle);
    }

    #[test]
    fn test_visual_outputs_while_dragging() {
        let config = config();
        let (state, _) = run(
            GestureState::new(),
            &[start(0.0), GestureEvent::TouchMove { y: 150.0 }],
            0,
        );
        assert_eq!(state.indicator_offset(&config), 75.0);
        assert_eq!(state.rotation_degrees(), 150.0);
        assert!(state.is_armed(&config));
        assert!(!state.is_refreshing());
    }
}
