//! Particle colours and the weighted palette they are drawn from.

use rand::Rng;

/// Linear RGB colour. Components may exceed 1.0 for emissive highlights.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// Champagne gold, boosted 1.2x so it blooms.
pub const GOLD: Color = Color::new(0.956_862_75 * 1.2, 0.894_117_65 * 1.2, 0.737_254_9 * 1.2);
/// `#043927`
pub const EMERALD: Color = Color::new(0.015_686_275, 0.223_529_41, 0.152_941_18);
/// `#8A6E36`
pub const DARK_GOLD: Color = Color::new(0.541_176_5, 0.431_372_56, 0.211_764_71);
/// `#FFF5E1`
pub const WHITE_GOLD: Color = Color::new(1.0, 0.960_784_3, 0.882_352_95);

/// One palette slot: a colour and its relative draw weight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaletteEntry {
    pub color: Color,
    pub weight: f32,
}

/// Four weighted colours. Weights are relative and need not sum to one.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    pub entries: [PaletteEntry; 4],
}

impl Default for Palette {
    /// Gold 30%, emerald 30%, dark gold 25%, white gold 15%.
    fn default() -> Self {
        Self {
            entries: [
                PaletteEntry { color: GOLD, weight: 0.30 },
                PaletteEntry { color: EMERALD, weight: 0.30 },
                PaletteEntry { color: DARK_GOLD, weight: 0.25 },
                PaletteEntry { color: WHITE_GOLD, weight: 0.15 },
            ],
        }
    }
}

impl Palette {
    pub fn total_weight(&self) -> f32 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    /// Weights must be finite and non-negative, with a positive sum.
    pub fn is_valid(&self) -> bool {
        let total = self.total_weight();
        self.entries
            .iter()
            .all(|e| e.weight.is_finite() && e.weight >= 0.0)
            && total.is_finite()
            && total > 0.0
    }

    /// Colour for a draw `u` in `[0, total_weight)`, walking cumulative weights.
    pub fn pick(&self, u: f32) -> Color {
        let mut acc = 0.0;
        for entry in &self.entries {
            acc += entry.weight;
            if u < acc {
                return entry.color;
            }
        }
        self.entries[self.entries.len() - 1].color
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
        let u: f32 = rng.gen::<f32>() * self.total_weight();
        self.pick(u)
    }
}
