//! Movement pattern engine.
//!
//! A `MovementController` owns one actor's trajectory state and turns
//! `(time, position, target)` into a velocity command every frame. Each
//! pattern's continuous state lives in `PatternState` and is rebuilt from
//! scratch on every pattern switch, so nothing leaks from one pattern into
//! the next.

use glam::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use barrage_core::constants::*;
use barrage_core::difficulty::DifficultyScalar;
use barrage_core::enums::MovementPattern;
use barrage_core::types::{FrameTime, Playfield};

use crate::modifier::{current_factor, TemporaryModifier};

/// Upper bound on the difficulty-scaled tracking gain.
const TRACKING_FACTOR_MAX: f32 = 4.0;

/// Gain (1/s) steering toward a horizontal hold line.
const HOLD_GAIN: f32 = 3.0;

/// Per-frame input to a movement controller.
#[derive(Debug, Clone, Copy)]
pub struct MovementInput {
    pub time: FrameTime,
    pub position: Vec2,
    /// Target (player) position, if one is known.
    pub target: Option<Vec2>,
    pub playfield: Playfield,
}

/// Output of one movement tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementUpdate {
    pub velocity: Vec2,
    /// Set when a random pattern switch happened this tick.
    pub pattern_changed: Option<(MovementPattern, MovementPattern)>,
}

/// How the controller drives the horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Horizontal {
    /// Constant drift; `heading` is -1 for leftward, +1 for rightward.
    Drift { heading: f32 },
    /// Steer toward and keep a fixed x.
    Hold { x: f32 },
}

/// Construction parameters, usually taken from a behavior profile.
#[derive(Debug, Clone)]
pub struct MovementSettings {
    pub base_speed: f32,
    pub allowed: Vec<MovementPattern>,
    pub initial: MovementPattern,
    pub tracking_factor: f32,
    pub change_pattern_randomly: bool,
    pub change_interval_ms: f64,
}

/// Per-pattern continuous state. Timers are `None` until the first tick
/// after a switch, when they are anchored to that tick's clock.
#[derive(Debug, Clone, PartialEq)]
enum PatternState {
    Linear,
    Oscillating {
        vy: f32,
    },
    Circular {
        angle: f32,
        baseline_y: Option<f32>,
    },
    Tracking,
    Evasive {
        last_maneuver_ms: Option<f64>,
        interval_ms: f64,
        burst_vy: f32,
    },
    Random {
        waypoint_y: Option<f32>,
        last_pick_ms: Option<f64>,
        interval_ms: f64,
    },
}

impl PatternState {
    fn initial(pattern: MovementPattern) -> Self {
        match pattern {
            MovementPattern::Linear => PatternState::Linear,
            MovementPattern::Zigzag | MovementPattern::Sinusoidal => {
                PatternState::Oscillating { vy: 0.0 }
            }
            MovementPattern::Circular => PatternState::Circular {
                angle: 0.0,
                baseline_y: None,
            },
            MovementPattern::Tracking => PatternState::Tracking,
            MovementPattern::Evasive => PatternState::Evasive {
                last_maneuver_ms: None,
                interval_ms: 0.0,
                burst_vy: 0.0,
            },
            MovementPattern::Random => PatternState::Random {
                waypoint_y: None,
                last_pick_ms: None,
                interval_ms: 0.0,
            },
        }
    }
}

/// Per-actor movement component.
#[derive(Debug, Clone)]
pub struct MovementController {
    pattern: MovementPattern,
    state: PatternState,
    allowed: Vec<MovementPattern>,
    horizontal: Horizontal,

    base_speed: f32,
    base_tracking: f32,
    base_change_interval_ms: f64,

    // Derived from the base values and the last applied difficulty.
    speed: f32,
    tracking_factor: f32,
    change_interval_ms: f64,

    change_pattern_randomly: bool,
    last_pattern_change_ms: Option<f64>,
    modifier: Option<TemporaryModifier>,
}

impl MovementController {
    pub fn new(settings: MovementSettings) -> Self {
        let mut allowed = settings.allowed;
        if allowed.is_empty() {
            allowed.push(settings.initial);
        }
        Self {
            pattern: settings.initial,
            state: PatternState::initial(settings.initial),
            allowed,
            horizontal: Horizontal::Drift { heading: -1.0 },
            base_speed: settings.base_speed,
            base_tracking: settings.tracking_factor,
            base_change_interval_ms: settings.change_interval_ms,
            speed: settings.base_speed,
            tracking_factor: settings.tracking_factor,
            change_interval_ms: settings.change_interval_ms,
            change_pattern_randomly: settings.change_pattern_randomly,
            last_pattern_change_ms: None,
            modifier: None,
        }
    }

    pub fn pattern(&self) -> MovementPattern {
        self.pattern
    }

    /// Speed after difficulty, before any temporary modifier.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn tracking_factor(&self) -> f32 {
        self.tracking_factor
    }

    pub fn change_interval_ms(&self) -> f64 {
        self.change_interval_ms
    }

    pub fn set_horizontal(&mut self, horizontal: Horizontal) {
        self.horizontal = horizontal;
    }

    pub fn set_change_pattern_randomly(&mut self, enabled: bool) {
        self.change_pattern_randomly = enabled;
    }

    /// Y the pattern is currently steering around, for debug drawing.
    pub fn waypoint_y(&self) -> Option<f32> {
        match self.state {
            PatternState::Random { waypoint_y, .. } => waypoint_y,
            PatternState::Circular { baseline_y, .. } => baseline_y,
            _ => None,
        }
    }

    /// Switch pattern and rebuild its state. Returns the previous pattern.
    pub fn set_pattern(&mut self, pattern: MovementPattern, now_ms: f64) -> MovementPattern {
        let previous = self.pattern;
        self.pattern = pattern;
        self.state = PatternState::initial(pattern);
        self.last_pattern_change_ms = Some(now_ms);
        previous
    }

    /// Recompute derived parameters from the base values. Idempotent.
    pub fn adjust_for_difficulty(&mut self, difficulty: &DifficultyScalar) {
        self.speed = difficulty.scale_speed(self.base_speed);
        self.tracking_factor = difficulty.scale_weight(self.base_tracking, TRACKING_FACTOR_MAX);

        let erratic = if difficulty.level >= VERY_ERRATIC_LEVEL {
            VERY_ERRATIC_INTERVAL_SCALE
        } else if difficulty.level >= ERRATIC_LEVEL {
            ERRATIC_INTERVAL_SCALE
        } else {
            1.0
        };
        self.change_interval_ms = self.base_change_interval_ms * erratic;
    }

    /// Scale speed by `factor` until `now_ms + duration_ms`.
    pub fn apply_temporary_modifier(&mut self, factor: f32, duration_ms: f64, now_ms: f64) {
        self.modifier = Some(TemporaryModifier::new(factor, now_ms, duration_ms));
    }

    /// Speed including any active temporary modifier.
    pub fn effective_speed(&mut self, now_ms: f64) -> f32 {
        self.speed * current_factor(&mut self.modifier, now_ms)
    }

    /// Advance one frame and produce a velocity command.
    pub fn tick(&mut self, input: &MovementInput, rng: &mut ChaCha8Rng) -> MovementUpdate {
        let now = input.time.now_ms;
        let pattern_changed = self.maybe_switch_pattern(now, rng);
        let speed = self.effective_speed(now);

        let vx = match self.horizontal {
            Horizontal::Drift { heading } => heading * speed,
            Horizontal::Hold { x } => ((x - input.position.x) * HOLD_GAIN).clamp(-speed, speed),
        };
        let vy = self.vertical(input, speed, rng);

        MovementUpdate {
            velocity: Vec2::new(vx, vy),
            pattern_changed,
        }
    }

    fn maybe_switch_pattern(
        &mut self,
        now: f64,
        rng: &mut ChaCha8Rng,
    ) -> Option<(MovementPattern, MovementPattern)> {
        if !self.change_pattern_randomly || self.allowed.len() < 2 {
            return None;
        }
        let last = *self.last_pattern_change_ms.get_or_insert(now);
        if now <= last + self.change_interval_ms {
            return None;
        }

        let current = self.pattern;
        let candidates: Vec<MovementPattern> = self
            .allowed
            .iter()
            .copied()
            .filter(|p| *p != current)
            .collect();
        let next = *candidates.choose(rng)?;
        self.set_pattern(next, now);
        tracing::debug!(from = ?current, to = ?next, "movement pattern switch");
        Some((current, next))
    }

    fn vertical(&mut self, input: &MovementInput, speed: f32, rng: &mut ChaCha8Rng) -> f32 {
        let dt = input.time.dt_secs();
        let now = input.time.now_ms;
        let y = input.position.y;
        let field = input.playfield;

        match (&mut self.state, self.pattern) {
            (PatternState::Linear, _) => 0.0,

            (PatternState::Oscillating { vy }, pattern) => {
                let (freq, amp, response) = if pattern == MovementPattern::Zigzag {
                    (ZIGZAG_FREQUENCY, ZIGZAG_AMPLITUDE, ZIGZAG_RESPONSE)
                } else {
                    (SINUSOIDAL_FREQUENCY, SINUSOIDAL_AMPLITUDE, SINUSOIDAL_RESPONSE)
                };
                let target_vy = (input.time.now_secs() * freq).sin() * amp;
                *vy += (target_vy - *vy) * approach(response, dt);
                *vy
            }

            (PatternState::Circular { angle, baseline_y }, _) => {
                let baseline =
                    *baseline_y.get_or_insert_with(|| field.clamp_y(y, CIRCLE_RADIUS + EDGE_INSET));
                *angle += CIRCLE_SPEED * dt;
                let desired_y = baseline + angle.sin() * CIRCLE_RADIUS;
                angle.cos() * CIRCLE_RADIUS * CIRCLE_SPEED + (desired_y - y) * CIRCLE_CORRECTION
            }

            (PatternState::Tracking, _) => {
                let Some(target) = input.target else {
                    return 0.0;
                };
                let lo = field.min.y + EDGE_INSET;
                let hi = (field.max.y - EDGE_INSET).max(lo);
                let aim_y = target.y.clamp(lo, hi);
                let vy = ((aim_y - y) * self.tracking_factor).clamp(-speed, speed);
                if (y <= lo && vy < 0.0) || (y >= hi && vy > 0.0) {
                    0.0
                } else {
                    vy
                }
            }

            (
                PatternState::Evasive {
                    last_maneuver_ms,
                    interval_ms,
                    burst_vy,
                },
                _,
            ) => {
                let last = *last_maneuver_ms.get_or_insert_with(|| {
                    *interval_ms = rng.gen_range(EVASIVE_MIN_INTERVAL_MS..=EVASIVE_MAX_INTERVAL_MS);
                    now
                });
                if now > last + *interval_ms {
                    let toward = match input.target {
                        Some(t) if (t.y - y).abs() > f32::EPSILON => (t.y - y).signum(),
                        _ => if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
                    };
                    let dir = if rng.gen_bool(EVASIVE_AWAY_CHANCE) { -toward } else { toward };
                    *burst_vy = dir * speed * EVASIVE_BURST_FACTOR;
                    *last_maneuver_ms = Some(now);
                    *interval_ms = rng.gen_range(EVASIVE_MIN_INTERVAL_MS..=EVASIVE_MAX_INTERVAL_MS);
                } else {
                    *burst_vy *= (-EVASIVE_DECAY * dt).exp();
                }
                // Bounce off the edges rather than leave the field.
                if (y <= field.min.y + EDGE_INSET && *burst_vy < 0.0)
                    || (y >= field.max.y - EDGE_INSET && *burst_vy > 0.0)
                {
                    *burst_vy = -*burst_vy;
                }
                *burst_vy
            }

            (
                PatternState::Random {
                    waypoint_y,
                    last_pick_ms,
                    interval_ms,
                },
                _,
            ) => {
                let due = match *last_pick_ms {
                    None => true,
                    Some(last) => now > last + *interval_ms,
                };
                if due {
                    let lo = field.min.y + RANDOM_WAYPOINT_INSET;
                    let hi = (field.max.y - RANDOM_WAYPOINT_INSET).max(lo + 1.0);
                    *waypoint_y = Some(rng.gen_range(lo..hi));
                    *last_pick_ms = Some(now);
                    *interval_ms = rng.gen_range(RANDOM_MIN_INTERVAL_MS..=RANDOM_MAX_INTERVAL_MS);
                }
                match *waypoint_y {
                    Some(w) => ((w - y) * RANDOM_EASE).clamp(-speed, speed),
                    None => 0.0,
                }
            }
        }
    }
}

/// Fraction of the remaining gap closed in `dt` at `rate` (frame-rate independent).
fn approach(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate * dt).exp()
}
