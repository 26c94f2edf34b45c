use crate::constants::FBM_OCTAVES;

/// Hash an integer lattice point to [0, 1).
#[inline]
pub fn lattice_hash(ix: i32, iy: i32) -> f32 {
    let mut h = (ix as u32).wrapping_mul(0x27d4_eb2d) ^ (iy as u32).wrapping_mul(0x1656_67b1);
    h ^= h >> 15;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    (h >> 8) as f32 / (1u32 << 24) as f32
}

#[inline]
fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Smooth 2D value noise in [0, 1): bilinear interpolation of hashed lattice
/// values with smoothstep easing. Pure and deterministic.
#[inline]
pub fn value_noise(x: f32, y: f32) -> f32 {
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = smoothstep(x - x0);
    let fy = smoothstep(y - y0);
    let ix = x0 as i32;
    let iy = y0 as i32;

    let a = lattice_hash(ix, iy);
    let b = lattice_hash(ix + 1, iy);
    let c = lattice_hash(ix, iy + 1);
    let d = lattice_hash(ix + 1, iy + 1);
    lerp(lerp(a, b, fx), lerp(c, d, fx), fy)
}

/// Fractal Brownian motion: `octaves` layers of value noise, amplitude
/// halving and frequency doubling each layer. Output stays in [0, 1).
pub fn fbm_octaves(x: f32, y: f32, octaves: u32) -> f32 {
    let mut sum = 0.0;
    let mut norm = 0.0;
    let mut amp = 0.5;
    let mut freq = 1.0;
    for _ in 0..octaves {
        sum += amp * value_noise(x * freq, y * freq);
        norm += amp;
        amp *= 0.5;
        freq *= 2.0;
    }
    if norm > 0.0 {
        sum / norm
    } else {
        0.0
    }
}

#[inline]
pub fn fbm(x: f32, y: f32) -> f32 {
    fbm_octaves(x, y, FBM_OCTAVES)
}
