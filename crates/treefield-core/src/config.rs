use thiserror::Error;

use crate::color::Palette;

/// Construction-time parameters for a [`crate::field::ParticleField`].
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub particle_count: usize,
    /// Cone height `H`; the cone spans `[-H/2, H/2]` on the y axis.
    pub height: f32,
    /// Cone base radius `R`.
    pub base_radius: f32,
    /// Exponent of the radius-vs-height curve (1.0 = straight cone).
    pub radius_power: f32,
    /// Inner radius of the dispersed shell.
    pub min_radius: f32,
    /// Thickness of the dispersed shell.
    pub spread_range: f32,
    pub scale_min: f32,
    pub scale_max: f32,
    /// Probability that a particle lands in the cube batch.
    pub cube_ratio: f32,
    /// Rate of the exponential expansion smoothing, per second.
    pub smoothing_rate: f32,
    /// Expansion above which dispersed particles start tumbling.
    pub spin_threshold: f32,
    pub spin_factor: f32,
    /// Fraction of scale lost at full expansion.
    pub shrink_factor: f32,
    pub palette: Palette,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 2000,
            height: 11.0,
            base_radius: 4.0,
            radius_power: 0.9,
            min_radius: 15.0,
            spread_range: 30.0,
            scale_min: 0.08,
            scale_max: 0.33,
            cube_ratio: 0.6,
            smoothing_rate: 1.5,
            spin_threshold: 0.1,
            spin_factor: 0.1,
            shrink_factor: 0.3,
            palette: Palette::default(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },
    #[error("tree height must be positive, got {0}")]
    Height(f32),
    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("scale range [{min}, {max}] is invalid")]
    ScaleRange { min: f32, max: f32 },
    #[error("{name} must lie in [0, 1], got {value}")]
    OutOfUnitRange { name: &'static str, value: f32 },
    #[error("palette weights must be non-negative with a positive sum")]
    Palette,
}

/// Inputs of the particle generator, derived from a [`FieldConfig`].
#[derive(Clone, Debug, PartialEq)]
pub struct DistributionParams {
    pub height: f32,
    pub base_radius: f32,
    pub radius_power: f32,
    pub min_radius: f32,
    pub spread_range: f32,
    pub scale_min: f32,
    pub scale_max: f32,
    pub cube_ratio: f32,
    pub palette: Palette,
}

impl DistributionParams {
    pub fn max_radius(&self) -> f32 {
        self.min_radius + self.spread_range
    }

    /// Cone radius at height `y`, following the configured power curve.
    pub fn radius_at(&self, y: f32) -> f32 {
        let normalized_y = (1.0 - (y + self.height * 0.5) / self.height).clamp(0.0, 1.0);
        normalized_y.powf(self.radius_power) * self.base_radius
    }
}

impl Default for DistributionParams {
    fn default() -> Self {
        FieldConfig::default().distribution()
    }
}

impl FieldConfig {
    pub fn distribution(&self) -> DistributionParams {
        DistributionParams {
            height: self.height,
            base_radius: self.base_radius,
            radius_power: self.radius_power,
            min_radius: self.min_radius,
            spread_range: self.spread_range,
            scale_min: self.scale_min,
            scale_max: self.scale_max,
            cube_ratio: self.cube_ratio,
            palette: self.palette.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let floats = [
            ("height", self.height),
            ("base_radius", self.base_radius),
            ("radius_power", self.radius_power),
            ("min_radius", self.min_radius),
            ("spread_range", self.spread_range),
            ("scale_min", self.scale_min),
            ("scale_max", self.scale_max),
            ("cube_ratio", self.cube_ratio),
            ("smoothing_rate", self.smoothing_rate),
            ("spin_threshold", self.spin_threshold),
            ("spin_factor", self.spin_factor),
            ("shrink_factor", self.shrink_factor),
        ];
        for (name, value) in floats {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }

        if self.height <= 0.0 {
            return Err(ConfigError::Height(self.height));
        }
        for (name, value) in [
            ("base_radius", self.base_radius),
            ("radius_power", self.radius_power),
            ("min_radius", self.min_radius),
            ("spread_range", self.spread_range),
            ("smoothing_rate", self.smoothing_rate),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Negative { name, value });
            }
        }
        if self.scale_min <= 0.0 || self.scale_max < self.scale_min {
            return Err(ConfigError::ScaleRange {
                min: self.scale_min,
                max: self.scale_max,
            });
        }
        for (name, value) in [
            ("cube_ratio", self.cube_ratio),
            ("spin_threshold", self.spin_threshold),
            ("shrink_factor", self.shrink_factor),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfUnitRange { name, value });
            }
        }
        if !self.palette.is_valid() {
            return Err(ConfigError::Palette);
        }
        Ok(())
    }
}
