//! Motion tuning constants.
//!
//! Empirically tuned visual constants: smoothing, damping, radii and
//! thresholds, kept out of the simulation code.

// Single-pole low-pass filter shared by the pointer and scroll engines
pub const SMOOTHING_RETAIN: f32 = 0.85;
pub const SMOOTHING_INPUT: f32 = 0.15;

// Pointer signal
pub const POINTER_SENTINEL: f32 = -100.0; // off-screen until the first move

// Scroll signal
pub const SCROLL_DIRECTION_DEADBAND: f32 = 0.5;
pub const SCROLL_ACTIVE_SPEED: f32 = 0.1;
pub const SCROLL_IDLE_MS: f64 = 150.0;

// Frame profiles (frames per second)
pub const FIELD_FPS: f64 = 30.0;
pub const FIELD_REDUCED_FPS: f64 = 5.0;
pub const PARTICLES_FPS: f64 = 60.0;
pub const CURSOR_FPS: f64 = 120.0; // every frame up to 120 Hz; every other frame at 144 Hz
pub const SCROLL_SAMPLER_FPS: f64 = 120.0;

// Procedural field
pub const FIELD_DOWNSCALE: u32 = 8;
pub const FIELD_REDUCED_DOWNSCALE: u32 = 16;
pub const FIELD_BLUR_PX: u32 = 24;
pub const FBM_OCTAVES: u32 = 4;
pub const FIELD_TIME_SCALE: f32 = 0.12; // accumulated time units per second
pub const BLOOM_FALLOFF: f32 = 3.0;
pub const BLOOM_GAIN: f32 = 0.35;
pub const RAY_SPEED: f32 = 0.05;
pub const RAY_WIDTH: f32 = 0.12;
pub const RAY_GAIN: f32 = 0.18;
pub const FOG_STRENGTH: f32 = 0.45;

// Particle pool
pub const PARTICLE_COUNT: usize = 80;
pub const POINTER_RADIUS: f32 = 150.0;
pub const POINTER_FORCE: f32 = 0.002;
pub const SCROLL_WIND_THRESHOLD: f32 = 0.5;
pub const SCROLL_WIND_FORCE: f32 = 0.015;
pub const SCROLL_JITTER_FORCE: f32 = 0.01;
pub const SCROLL_JITTER_MAX: f32 = 0.3;
pub const VELOCITY_DAMPING: f32 = 0.98;
pub const POINTER_VELOCITY_DAMPING: f32 = 0.92;
pub const TRAIL_MAX: usize = 16;
pub const TRAIL_GROWTH: f32 = 0.5; // trail points per unit of scroll speed
pub const TRAIL_VISIBLE_SPEED: f32 = 2.0;
pub const FADE_FRACTION: f32 = 0.1;
pub const WRAP_MARGIN: f32 = 20.0;
pub const GLINT_SIZE: f32 = 1.8;
pub const PARTICLE_SIZE_MIN: f32 = 0.6;
pub const PARTICLE_SIZE_MAX: f32 = 2.6;
pub const PARTICLE_LIFE_MIN: u32 = 400;
pub const PARTICLE_LIFE_MAX: u32 = 900;
pub const PARTICLE_DRIFT: f32 = 0.25;

// Cursor springs: (stiffness, damping, mass)
pub const DOT_SPRING: (f32, f32, f32) = (800.0, 40.0, 0.3);
pub const RING_SPRING: (f32, f32, f32) = (300.0, 28.0, 0.5);
pub const GLOW_SPRING: (f32, f32, f32) = (120.0, 20.0, 1.0);
pub const SPRING_SUBSTEP_SEC: f32 = 1.0 / 120.0;
pub const SPRING_MAX_DT_SEC: f32 = 1.0 / 20.0;

// Liquid ring stretch and glow modulation
pub const RING_STRETCH_PER_SPEED: f32 = 0.004;
pub const RING_STRETCH_MAX: f32 = 0.5;
pub const GLOW_RADIUS_PER_SPEED: f32 = 0.01;
pub const GLOW_RADIUS_MAX_BOOST: f32 = 0.6;
pub const GLOW_OPACITY_PER_SPEED: f32 = 0.004;
pub const GLOW_OPACITY_MAX_BOOST: f32 = 0.4;

// Overlay stacking
pub const Z_FIELD: i32 = -1;
pub const Z_PARTICLES: i32 = 5;
pub const Z_CURSOR: i32 = 9999;

// Cursor raw-velocity low-pass (weight of the newest frame delta)
pub const CURSOR_VELOCITY_BLEND: f32 = 0.3;
