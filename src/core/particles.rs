use crate::constants::*;
use glam::Vec2;
use rand::prelude::*;
use smallvec::SmallVec;

/// Prior positions, most recent first. Stored inline so trail updates never
/// allocate.
pub type Trail = SmallVec<[Vec2; TRAIL_MAX]>;

/// HSL color with alpha; hue in degrees, the rest in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsla {
    pub h: f32,
    pub s: f32,
    pub l: f32,
    pub a: f32,
}

impl Hsla {
    /// CSS color string for canvas fill/stroke styles.
    pub fn to_css(&self) -> String {
        format!(
            "hsla({:.0}, {:.0}%, {:.0}%, {:.3})",
            self.h,
            self.s * 100.0,
            self.l * 100.0,
            self.a.clamp(0.0, 1.0)
        )
    }
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Pointer-induced velocity, damped faster than `vx, vy`.
    pub pvx: f32,
    pub pvy: f32,
    pub size: f32,
    pub alpha: f32,
    /// `alpha` after the lifecycle fade; what gets drawn.
    pub opacity: f32,
    pub life: u32,
    pub max_life: u32,
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub trail: Trail,
}

impl Particle {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn life_ratio(&self) -> f32 {
        self.life as f32 / self.max_life.max(1) as f32
    }

    pub fn color(&self) -> Hsla {
        Hsla {
            h: self.hue,
            s: self.saturation,
            l: self.lightness,
            a: self.opacity,
        }
    }
}

/// Spawn color family. One uniform draw picks the bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HueBucket {
    Blue,
    Violet,
    Teal,
    Amber,
    White,
}

impl HueBucket {
    pub fn from_roll(roll: f32) -> Self {
        match roll {
            r if r < 0.35 => HueBucket::Blue,
            r if r < 0.60 => HueBucket::Violet,
            r if r < 0.80 => HueBucket::Teal,
            r if r < 0.95 => HueBucket::Amber,
            _ => HueBucket::White,
        }
    }

    /// (hue, saturation, lightness) drawn within the bucket's range.
    fn sample(self, rng: &mut impl Rng) -> (f32, f32, f32) {
        match self {
            HueBucket::Blue => (
                rng.gen_range(200.0..230.0),
                rng.gen_range(0.70..0.90),
                rng.gen_range(0.65..0.80),
            ),
            HueBucket::Violet => (
                rng.gen_range(260.0..290.0),
                rng.gen_range(0.60..0.85),
                rng.gen_range(0.65..0.80),
            ),
            HueBucket::Teal => (
                rng.gen_range(165.0..190.0),
                rng.gen_range(0.60..0.80),
                rng.gen_range(0.60..0.75),
            ),
            HueBucket::Amber => (
                rng.gen_range(30.0..48.0),
                rng.gen_range(0.80..0.95),
                rng.gen_range(0.62..0.75),
            ),
            HueBucket::White => (0.0, 0.0, 0.96),
        }
    }
}

/// Per-frame signal input for the simulation.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimInput {
    pub pointer: Option<Vec2>,
    pub pointer_speed: f32,
    pub scroll_velocity: f32,
    pub scroll_speed: f32,
}

/// Drawing primitives the particle pass needs.
pub trait Surface2d {
    fn clear(&mut self);
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Hsla);
    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Hsla);
}

/// Trail length for a scroll speed, capped at [`TRAIL_MAX`].
#[inline]
pub fn trail_target_len(scroll_speed: f32) -> usize {
    ((scroll_speed.max(0.0) * TRAIL_GROWTH) as usize).min(TRAIL_MAX)
}

#[inline]
pub fn trails_visible(scroll_speed: f32) -> bool {
    scroll_speed > TRAIL_VISIBLE_SPEED
}

/// Linear fade in over the first and out over the last [`FADE_FRACTION`].
#[inline]
pub fn lifecycle_fade(life_ratio: f32) -> f32 {
    let fade = if life_ratio < FADE_FRACTION {
        life_ratio / FADE_FRACTION
    } else if life_ratio > 1.0 - FADE_FRACTION {
        (1.0 - life_ratio) / FADE_FRACTION
    } else {
        1.0
    };
    fade.clamp(0.0, 1.0)
}

fn reset_particle(p: &mut Particle, rng: &mut impl Rng, width: f32, height: f32) {
    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
    let speed = PARTICLE_DRIFT * rng.gen_range(0.3..1.0);
    let launch = Vec2::new(angle.cos(), angle.sin()) * speed;
    let (hue, saturation, lightness) = HueBucket::from_roll(rng.gen()).sample(rng);

    p.x = rng.gen_range(0.0..width.max(1.0));
    p.y = rng.gen_range(0.0..height.max(1.0));
    p.vx = launch.x;
    p.vy = launch.y;
    p.pvx = 0.0;
    p.pvy = 0.0;
    p.size = rng.gen_range(PARTICLE_SIZE_MIN..PARTICLE_SIZE_MAX);
    p.alpha = rng.gen_range(0.3..0.8);
    p.opacity = 0.0;
    p.life = 0;
    p.max_life = rng.gen_range(PARTICLE_LIFE_MIN..=PARTICLE_LIFE_MAX);
    p.hue = hue;
    p.saturation = saturation;
    p.lightness = lightness;
    p.trail.clear();
}

/// Wrap one axis across `[-margin, extent + margin]`; returns the shift.
#[inline]
fn wrap_axis(value: &mut f32, extent: f32) -> f32 {
    let span = extent + 2.0 * WRAP_MARGIN;
    if *value < -WRAP_MARGIN {
        *value += span;
        span
    } else if *value > extent + WRAP_MARGIN {
        *value -= span;
        -span
    } else {
        0.0
    }
}

/// Constant-size pool of ambient particles.
///
/// Particles are never removed: reaching `max_life` resets the entity in
/// place, so the pool length is fixed for the lifetime of the simulator.
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f32,
    height: f32,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(count: usize, width: f32, height: f32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let particles = (0..count)
            .map(|_| {
                let mut p = Particle {
                    x: 0.0,
                    y: 0.0,
                    vx: 0.0,
                    vy: 0.0,
                    pvx: 0.0,
                    pvy: 0.0,
                    size: 1.0,
                    alpha: 0.0,
                    opacity: 0.0,
                    life: 0,
                    max_life: 1,
                    hue: 0.0,
                    saturation: 0.0,
                    lightness: 0.0,
                    trail: Trail::new(),
                };
                reset_particle(&mut p, &mut rng, width, height);
                // stagger initial ages so the pool does not respawn in lockstep
                p.life = rng.gen_range(0..p.max_life);
                p.opacity = p.alpha * lifecycle_fade(p.life_ratio());
                p
            })
            .collect();
        Self {
            particles,
            width,
            height,
            rng,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Rescale positions into a new viewport.
    pub fn resize(&mut self, width: f32, height: f32) {
        let sx = width / self.width.max(1.0);
        let sy = height / self.height.max(1.0);
        for p in &mut self.particles {
            p.x *= sx;
            p.y *= sy;
            for pt in p.trail.iter_mut() {
                pt.x *= sx;
                pt.y *= sy;
            }
        }
        self.width = width;
        self.height = height;
    }

    /// Advance every particle by one frame.
    pub fn step(&mut self, input: &SimInput) {
        let Self {
            particles,
            width,
            height,
            rng,
        } = self;
        let (width, height) = (*width, *height);
        let trail_len = trail_target_len(input.scroll_speed);
        let windy = input.scroll_speed > SCROLL_WIND_THRESHOLD;

        for p in particles.iter_mut() {
            if let Some(pointer) = input.pointer {
                let delta = pointer - p.position();
                let d = delta.length();
                if d < POINTER_RADIUS && d > f32::EPSILON && input.pointer_speed > 0.0 {
                    let strength =
                        (1.0 - d / POINTER_RADIUS) * input.pointer_speed * POINTER_FORCE;
                    let impulse = delta / d * strength;
                    p.pvx += impulse.x;
                    p.pvy += impulse.y;
                }
            }

            if windy {
                p.vy -= input.scroll_velocity * SCROLL_WIND_FORCE;
                let jitter = (rng.gen::<f32>() - 0.5) * input.scroll_speed * SCROLL_JITTER_FORCE;
                p.vx += jitter.clamp(-SCROLL_JITTER_MAX, SCROLL_JITTER_MAX);
            }

            p.vx *= VELOCITY_DAMPING;
            p.vy *= VELOCITY_DAMPING;
            p.pvx *= POINTER_VELOCITY_DAMPING;
            p.pvy *= POINTER_VELOCITY_DAMPING;
            p.x += p.vx + p.pvx;
            p.y += p.vy + p.pvy;

            p.trail.truncate(trail_len.saturating_sub(1));
            if trail_len > 0 {
                p.trail.insert(0, Vec2::new(p.x, p.y));
            }

            p.life += 1;
            p.opacity = p.alpha * lifecycle_fade(p.life_ratio());

            let shift = Vec2::new(wrap_axis(&mut p.x, width), wrap_axis(&mut p.y, height));
            if shift != Vec2::ZERO {
                // keep the trail contiguous with the wrapped head
                for pt in p.trail.iter_mut() {
                    *pt += shift;
                }
            }

            if p.life >= p.max_life {
                reset_particle(p, rng, width, height);
            }
        }
    }

    /// Paint the pool. Trails are only stroked above the visibility speed.
    pub fn draw(&self, surface: &mut impl Surface2d, scroll_speed: f32) {
        surface.clear();
        let show_trails = trails_visible(scroll_speed);
        for p in &self.particles {
            if p.opacity <= 0.0 {
                continue;
            }
            let color = p.color();
            if show_trails && p.trail.len() > 1 {
                let trail_color = Hsla {
                    a: p.opacity * 0.35,
                    ..color
                };
                surface.stroke_polyline(&p.trail, p.size * 0.6, trail_color);
            }
            surface.fill_circle(p.x, p.y, p.size, color);
            if p.size > GLINT_SIZE {
                let glint = Hsla {
                    h: 0.0,
                    s: 0.0,
                    l: 1.0,
                    a: p.opacity * 0.8,
                };
                surface.fill_circle(p.x - p.size * 0.3, p.y - p.size * 0.3, p.size * 0.4, glint);
            }
        }
    }
}
