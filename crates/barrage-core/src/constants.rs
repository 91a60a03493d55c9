//! Encounter constants and tuning parameters.
//!
//! Times are milliseconds, distances pixels, speeds pixels per second,
//! angles radians (0 = +x, i.e. toward the right edge).

use std::f32::consts::PI;

// --- Playfield ---

/// Default playfield width.
pub const PLAYFIELD_WIDTH: f32 = 800.0;

/// Default playfield height.
pub const PLAYFIELD_HEIGHT: f32 = 600.0;

/// How far outside the playfield an actor or projectile may travel before removal.
pub const OFFSCREEN_MARGIN: f32 = 100.0;

/// Distance tracking movers keep from the top and bottom edges.
pub const EDGE_INSET: f32 = 30.0;

/// Default firing direction when no target is known: toward the left edge.
pub const DEFAULT_FIRE_ANGLE: f32 = PI;

// --- Movement patterns ---

/// Vertical velocity amplitude of the zigzag pattern (px/s).
pub const ZIGZAG_AMPLITUDE: f32 = 180.0;

/// Angular frequency of the zigzag oscillator (rad/s).
pub const ZIGZAG_FREQUENCY: f32 = 4.0;

/// Rate (1/s) at which zigzag velocity approaches its oscillating target.
pub const ZIGZAG_RESPONSE: f32 = 12.0;

/// Vertical velocity amplitude of the sinusoidal pattern (px/s).
pub const SINUSOIDAL_AMPLITUDE: f32 = 100.0;

/// Angular frequency of the sinusoidal oscillator (rad/s).
pub const SINUSOIDAL_FREQUENCY: f32 = 1.5;

/// Rate (1/s) at which sinusoidal velocity approaches its oscillating target.
pub const SINUSOIDAL_RESPONSE: f32 = 6.0;

/// Orbit radius of the circular pattern.
pub const CIRCLE_RADIUS: f32 = 60.0;

/// Phase-angle rate of the circular pattern (rad/s).
pub const CIRCLE_SPEED: f32 = 2.0;

/// Gain pulling a circular mover back onto its orbit (1/s).
pub const CIRCLE_CORRECTION: f32 = 4.0;

/// Base proportional gain of the tracking pattern (1/s).
pub const TRACKING_FACTOR: f32 = 1.5;

/// Evasive maneuver timer bounds.
pub const EVASIVE_MIN_INTERVAL_MS: f64 = 1000.0;
pub const EVASIVE_MAX_INTERVAL_MS: f64 = 2000.0;

/// Evasive burst speed as a multiple of the mover's speed.
pub const EVASIVE_BURST_FACTOR: f32 = 1.2;

/// Decay rate (1/s) of an evasive burst between maneuvers.
pub const EVASIVE_DECAY: f32 = 2.5;

/// Chance an evasive maneuver moves away from the target rather than toward it.
pub const EVASIVE_AWAY_CHANCE: f64 = 0.7;

/// Random-waypoint timer bounds.
pub const RANDOM_MIN_INTERVAL_MS: f64 = 1000.0;
pub const RANDOM_MAX_INTERVAL_MS: f64 = 2500.0;

/// Proportional easing gain toward a random waypoint (1/s).
pub const RANDOM_EASE: f32 = 2.0;

/// Random waypoints stay this far from the top and bottom edges.
pub const RANDOM_WAYPOINT_INSET: f32 = 50.0;

/// Default interval between random pattern switches.
pub const PATTERN_CHANGE_INTERVAL_MS: f64 = 4000.0;

// --- Weapons ---

/// Damage of an ordinary enemy bullet at difficulty level 1.
pub const ENEMY_BULLET_DAMAGE: u32 = 10;

/// Speed of an ordinary enemy bullet at difficulty level 1.
pub const ENEMY_BULLET_SPEED: f32 = 300.0;

/// Delay before the second shot of a double-tap.
pub const DOUBLE_SHOT_DELAY_MS: f64 = 150.0;

/// Shots per burst (inclusive range).
pub const BURST_MIN_SHOTS: u32 = 3;
pub const BURST_MAX_SHOTS: u32 = 5;

/// Sub-interval between burst shots (inclusive range).
pub const BURST_MIN_INTERVAL_MS: f64 = 100.0;
pub const BURST_MAX_INTERVAL_MS: f64 = 150.0;

/// Shots per mini-burst under the random pattern (inclusive range).
pub const MINI_BURST_MIN_SHOTS: u32 = 2;
pub const MINI_BURST_MAX_SHOTS: u32 = 3;

/// Default spread fan.
pub const SPREAD_ANGLE: f32 = 0.6;
pub const SPREAD_COUNT: u32 = 5;

/// Fire interval never drops below this, whatever the difficulty.
pub const MIN_FIRE_INTERVAL_MS: f64 = 250.0;

/// Default weight applied to predictive lead.
pub const PREDICTIVE_WEIGHT: f32 = 0.8;

/// Upper bound on the difficulty-scaled predictive weight.
pub const PREDICTIVE_WEIGHT_MAX: f32 = 1.0;

// --- Difficulty thresholds ---

/// At or above this level a `Single` weapon is upgraded to an advanced pattern.
pub const WEAPON_UPGRADE_LEVEL: u32 = 3;

/// At or above this level every weapon aims predictively.
pub const PREDICTIVE_AIM_LEVEL: u32 = 4;

/// Pattern-change interval multipliers at high difficulty.
pub const ERRATIC_LEVEL: u32 = 5;
pub const ERRATIC_INTERVAL_SCALE: f64 = 0.7;
pub const VERY_ERRATIC_LEVEL: u32 = 8;
pub const VERY_ERRATIC_INTERVAL_SCALE: f64 = 0.5;

// --- Projectiles ---

/// Projectiles expire after this long regardless of position.
pub const PROJECTILE_MAX_AGE_MS: f64 = 8000.0;

// --- Turret ---

pub const TURRET_ROTATION_SPEED: f32 = 2.0;
pub const TURRET_FIRE_RATE_MS: f64 = 900.0;
pub const TURRET_BARREL_LENGTH: f32 = 24.0;
/// Lateral offset of each barrel from the turret axis.
pub const TURRET_BARREL_SPACING: f32 = 8.0;
/// Barrel must be within this angle of the target bearing to fire.
pub const TURRET_AIM_TOLERANCE: f32 = 0.15;

// --- Elite special attacks ---

pub const ELITE_SPECIAL_MIN_INTERVAL_MS: f64 = 5000.0;
pub const ELITE_SPECIAL_MAX_INTERVAL_MS: f64 = 8000.0;
pub const ELITE_RADIAL_COUNT: u32 = 12;
pub const OVERDRIVE_FACTOR: f32 = 1.5;
pub const OVERDRIVE_DURATION_MS: f64 = 3000.0;
pub const TELEPORT_VOLLEY_COUNT: u32 = 3;
pub const TELEPORT_VOLLEY_ANGLE: f32 = 0.3;

// --- Boss ---

/// Length of the invulnerable entry phase.
pub const BOSS_ENTRY_DURATION_MS: f64 = 3000.0;

/// The boss holds this far in from the right edge once on-field.
pub const BOSS_HOLD_INSET: f32 = 160.0;

/// Health-fraction thresholds at or below which each phase is entered.
pub const BOSS_PHASE1_THRESHOLD: f32 = 1.0;
pub const BOSS_PHASE2_THRESHOLD: f32 = 0.5;
pub const BOSS_PHASE3_THRESHOLD: f32 = 0.25;
pub const BOSS_RAGE_THRESHOLD: f32 = 0.1;

/// Escorts spawned when the phase-two shield goes up (inclusive range).
pub const BOSS_ESCORT_MIN: u32 = 3;
pub const BOSS_ESCORT_MAX: u32 = 5;

/// Delay between successive spiral waves.
pub const SPIRAL_WAVE_DELAY_MS: f64 = 120.0;
