/// Time-of-day bucket used to pick the ambient palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DayPhase {
    Morning,
    Afternoon,
    Evening,
    Midnight,
}

impl DayPhase {
    /// Half-open ranges: [5,11) morning, [11,17) afternoon, [17,21) evening,
    /// everything else midnight. Hours outside 0..24 are wrapped first.
    pub fn from_hour(hour: u32) -> Self {
        match hour % 24 {
            5..=10 => DayPhase::Morning,
            11..=16 => DayPhase::Afternoon,
            17..=20 => DayPhase::Evening,
            _ => DayPhase::Midnight,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            DayPhase::Morning => MORNING,
            DayPhase::Afternoon => AFTERNOON,
            DayPhase::Evening => EVENING,
            DayPhase::Midnight => MIDNIGHT,
        }
    }
}

/// Three RGB colors in [0, 1]: base, accent, highlight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette(pub [[f32; 3]; 3]);

pub const MORNING: Palette = Palette([
    [0.98, 0.82, 0.68], // peach
    [0.62, 0.80, 0.95], // pale sky
    [1.00, 0.95, 0.80], // cream
]);

pub const AFTERNOON: Palette = Palette([
    [0.55, 0.78, 0.98], // clear blue
    [0.70, 0.93, 0.88], // mint
    [0.98, 0.97, 0.90], // warm white
]);

pub const EVENING: Palette = Palette([
    [0.95, 0.52, 0.38], // coral
    [0.58, 0.36, 0.70], // dusk violet
    [1.00, 0.78, 0.45], // amber
]);

pub const MIDNIGHT: Palette = Palette([
    [0.05, 0.07, 0.18], // ink
    [0.16, 0.12, 0.36], // indigo
    [0.24, 0.42, 0.62], // moonlit blue
]);

#[inline]
pub fn palette_for_hour(hour: u32) -> Palette {
    DayPhase::from_hour(hour).palette()
}
