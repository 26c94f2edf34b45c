use crate::constants::{
    BLOOM_FALLOFF, BLOOM_GAIN, FIELD_TIME_SCALE, FOG_STRENGTH, RAY_GAIN, RAY_SPEED, RAY_WIDTH,
};
use crate::core::noise::fbm;
use crate::core::palette::Palette;
use glam::Vec2;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Everything the field reads from the outside world for one frame.
#[derive(Clone, Copy, Debug)]
pub struct FieldInput {
    /// Normalized pointer position; negative components mean "no pointer".
    pub pointer_uv: Vec2,
    pub palette: Palette,
}

/// Size of the low-resolution buffer for a viewport and downscale factor.
pub fn low_res_size(viewport_width: f32, viewport_height: f32, downscale: u32) -> (u32, u32) {
    let d = downscale.max(1) as f32;
    let w = (viewport_width / d).ceil().max(1.0) as u32;
    let h = (viewport_height / d).ceil().max(1.0) as u32;
    (w, h)
}

#[inline]
fn mix3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

#[inline]
fn smooth_edge(e0: f32, e1: f32, x: f32) -> f32 {
    let t = ((x - e0) / (e1 - e0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Color of one field sample, unclamped.
///
/// `(u, v)` are normalized pixel coordinates and `t` the accumulated field
/// time. Three fbm layers blend the palette, the pointer adds a radial bloom,
/// a diagonal light ray sweeps along `u - v = offset(t)` and a fog term
/// darkens the lower center.
pub fn shade(u: f32, v: f32, t: f32, pointer_uv: Vec2, palette: &Palette) -> [f32; 3] {
    let [c0, c1, c2] = palette.0;
    let n1 = fbm(u * 3.0 + t * 0.6, v * 3.0 + t * 0.3);
    let n2 = fbm(u * 5.0 - t * 0.4 + 17.3, v * 5.0 + t * 0.5 + 4.1);
    let n3 = fbm(u * 1.5 + t * 0.2 + 41.7, v * 1.5 - t * 0.25 + 9.2);

    let mut col = mix3(c0, c1, smooth_edge(0.25, 0.75, n1));
    col = mix3(col, c2, n2 * 0.6);
    let brightness = 0.75 + 0.5 * (n3 - 0.5);
    for ch in col.iter_mut() {
        *ch *= brightness;
    }

    if pointer_uv.x >= 0.0 && pointer_uv.y >= 0.0 {
        let dist = Vec2::new(u, v).distance(pointer_uv);
        let bloom = (1.0 - BLOOM_FALLOFF * dist).max(0.0);
        let b = bloom * bloom * BLOOM_GAIN;
        for (ch, hi) in col.iter_mut().zip(c2) {
            *ch += hi * b;
        }
    }

    let r = ray_light(u, v, t);
    for ch in col.iter_mut() {
        *ch += r;
    }

    let f = fog_factor(u, v);
    for ch in col.iter_mut() {
        *ch *= f;
    }
    col
}

/// Offset of the diagonal light ray along `u - v` at time `t`; sweeps from
/// -1.5 to 1.5 and starts over.
#[inline]
pub fn ray_offset(t: f32) -> f32 {
    (t * RAY_SPEED).fract() * 3.0 - 1.5
}

/// Additive light of the diagonal ray at `(u, v)`.
pub fn ray_light(u: f32, v: f32, t: f32) -> f32 {
    let ray_dist = (u - v - ray_offset(t)).abs() / std::f32::consts::SQRT_2;
    let ray = (1.0 - ray_dist / RAY_WIDTH).max(0.0);
    ray * ray * RAY_GAIN
}

/// Multiplicative fog: 1.0 in the upper half, darkest at the lower center.
pub fn fog_factor(u: f32, v: f32) -> f32 {
    let vertical = smooth_edge(0.55, 1.0, v);
    let horizontal = 1.0 - (2.0 * (u - 0.5).abs()).min(1.0);
    1.0 - FOG_STRENGTH * vertical * (0.5 + 0.5 * horizontal)
}

#[inline]
fn to_byte(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Low-resolution ambient background buffer.
///
/// The per-pixel loop runs on `viewport / downscale` pixels; the display
/// layer stretches and blurs the result.
pub struct ProceduralField {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
    time: f32,
}

impl ProceduralField {
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![Rgba::default(); (width * height) as usize],
            time: 0.0,
        }
    }

    pub fn for_viewport(viewport_width: f32, viewport_height: f32, downscale: u32) -> Self {
        let (w, h) = low_res_size(viewport_width, viewport_height, downscale);
        Self::new(w, h)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let width = width.max(1);
        let height = height.max(1);
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels
            .resize((width * height) as usize, Rgba::default());
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn advance(&mut self, dt_sec: f32) {
        self.time += dt_sec.max(0.0) * FIELD_TIME_SCALE;
    }

    pub fn render(&mut self, input: &FieldInput) {
        let w = self.width as f32;
        let h = self.height as f32;
        let t = self.time;
        for y in 0..self.height {
            let v = (y as f32 + 0.5) / h;
            let row = (y * self.width) as usize;
            for x in 0..self.width {
                let u = (x as f32 + 0.5) / w;
                let [r, g, b] = shade(u, v, t, input.pointer_uv, &input.palette);
                self.pixels[row + x as usize] = Rgba {
                    r: to_byte(r),
                    g: to_byte(g),
                    b: to_byte(b),
                    a: 255,
                };
            }
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    /// RGBA bytes ready for `ImageData`.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}
