//! Baseline values applied when a player has no stored profile

pub const DEFAULT_HEALTH: f64 = 20.0;
pub const DEFAULT_MAX_HEALTH: f64 = 20.0;
pub const DEFAULT_LEVEL: u32 = 0;
pub const DEFAULT_EXP: f32 = 0.0;
pub const DEFAULT_TOTAL_EXPERIENCE: u32 = 0;
pub const DEFAULT_FOOD_LEVEL: i32 = 20;
pub const DEFAULT_SATURATION: f32 = 0.0;
pub const DEFAULT_EXHAUSTION: f32 = 0.0;
pub const DEFAULT_FALL_DISTANCE: f32 = 0.0;
pub const DEFAULT_FIRE_TICKS: i32 = 0;
pub const DEFAULT_MAXIMUM_AIR: i32 = 300;
pub const DEFAULT_REMAINING_AIR: i32 = 300;
