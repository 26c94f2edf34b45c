//! Mount-time configuration.
//!
//! Defaults come from `constants.rs`; a page can override them with
//! `data-motion-*` attributes on the root `<html>` element, e.g.
//! `<html data-motion-particles="40" data-motion-cursor="off">`.

use crate::constants::{FIELD_DOWNSCALE, FIELD_FPS, PARTICLE_COUNT};
use thiserror::Error;

pub const ATTRIBUTE_PREFIX: &str = "data-motion-";

/// Option names understood after the `data-motion-` prefix.
pub const OPTION_KEYS: [&str; 5] = [
    "particles",
    "field-fps",
    "downscale",
    "cursor",
    "particles-enabled",
];

const MAX_PARTICLES: usize = 1000;
const MAX_FIELD_FPS: f64 = 60.0;
const MAX_DOWNSCALE: u32 = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown motion option `{0}`")]
    UnknownKey(String),
    #[error("invalid value `{value}` for motion option `{key}`")]
    InvalidValue { key: String, value: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct MotionConfig {
    pub particle_count: usize,
    pub field_fps: f64,
    /// Downscale when motion is allowed; reduced motion uses its own factor.
    pub field_downscale: u32,
    pub cursor_enabled: bool,
    pub particles_enabled: bool,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            field_fps: FIELD_FPS,
            field_downscale: FIELD_DOWNSCALE,
            cursor_enabled: true,
            particles_enabled: true,
        }
    }
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Some(true),
        "off" | "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

impl MotionConfig {
    /// Apply one override. `key` is the option name without the prefix.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        let v = value.trim();
        match key {
            "particles" => {
                let n: usize = v.parse().map_err(|_| invalid())?;
                if n > MAX_PARTICLES {
                    return Err(invalid());
                }
                self.particle_count = n;
            }
            "field-fps" => {
                let fps: f64 = v.parse().map_err(|_| invalid())?;
                if !(fps > 0.0 && fps <= MAX_FIELD_FPS) {
                    return Err(invalid());
                }
                self.field_fps = fps;
            }
            "downscale" => {
                let d: u32 = v.parse().map_err(|_| invalid())?;
                if d == 0 || d > MAX_DOWNSCALE {
                    return Err(invalid());
                }
                self.field_downscale = d;
            }
            "cursor" => self.cursor_enabled = parse_switch(v).ok_or_else(invalid)?,
            "particles-enabled" => self.particles_enabled = parse_switch(v).ok_or_else(invalid)?,
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    /// Build a config from `(key, value)` pairs. Bad entries are skipped and
    /// returned so the caller can log them.
    pub fn with_overrides<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> (Self, Vec<ConfigError>) {
        let mut config = Self::default();
        let mut errors = Vec::new();
        for (key, value) in pairs {
            if let Err(e) = config.apply(key, value) {
                errors.push(e);
            }
        }
        (config, errors)
    }
}
