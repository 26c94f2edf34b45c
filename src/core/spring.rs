use crate::constants::{SPRING_MAX_DT_SEC, SPRING_SUBSTEP_SEC};
use glam::Vec2;

/// Spring parameters: `stiffness` (k), `damping` (c) and `mass` (m).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    pub const fn from_tuple(t: (f32, f32, f32)) -> Self {
        Self {
            stiffness: t.0,
            damping: t.1,
            mass: t.2,
        }
    }

    /// 1.0 is critical damping; above is overdamped.
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

/// 2D spring follower chasing a moving target.
///
/// Integrated with semi-implicit Euler in fixed substeps so stiff springs
/// stay stable at low frame rates; large frame gaps are capped.
#[derive(Clone, Debug)]
pub struct Spring2 {
    config: SpringConfig,
    position: Vec2,
    velocity: Vec2,
    initialized: bool,
}

impl Spring2 {
    pub fn new(config: SpringConfig) -> Self {
        Self {
            config,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            initialized: false,
        }
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn snap_to(&mut self, target: Vec2) {
        self.position = target;
        self.velocity = Vec2::ZERO;
        self.initialized = true;
    }

    pub fn step(&mut self, target: Vec2, dt_sec: f32) -> Vec2 {
        if !self.initialized {
            self.snap_to(target);
            return self.position;
        }
        let dt = dt_sec.clamp(0.0, SPRING_MAX_DT_SEC);
        let steps = (dt / SPRING_SUBSTEP_SEC).ceil().max(1.0) as u32;
        let h = dt / steps as f32;
        let SpringConfig {
            stiffness,
            damping,
            mass,
        } = self.config;
        let inv_mass = 1.0 / mass.max(1e-4);
        for _ in 0..steps {
            let accel =
                (stiffness * (target - self.position) - damping * self.velocity) * inv_mass;
            self.velocity += accel * h;
            self.position += self.velocity * h;
        }
        self.position
    }
}
