//! The particle field: two instanced batches plus the smoothed expansion
//! state that blends every particle between its tree and universe rest
//! positions.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::{ConfigError, FieldConfig};
use crate::generate::generate;
use crate::math::{approach, sanitize_dt, smoothing_factor};
use crate::particle::{Particle, ShapeKind};
use crate::trigger::StarTrigger;

/// Per-instance pose written every tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstanceTransform {
    pub position: Vec3,
    /// XYZ Euler angles, radians.
    pub rotation: Vec3,
    /// Uniform scale.
    pub scale: f32,
}

impl Default for InstanceTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

impl InstanceTransform {
    pub fn to_matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), rotation, self.position)
    }
}

/// Tuning that shapes a pose from the expansion scalar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseParams {
    pub spin_threshold: f32,
    pub spin_factor: f32,
    pub shrink_factor: f32,
}

impl From<&FieldConfig> for PoseParams {
    fn from(config: &FieldConfig) -> Self {
        Self {
            spin_threshold: config.spin_threshold,
            spin_factor: config.spin_factor,
            shrink_factor: config.shrink_factor,
        }
    }
}

/// Pose of one particle at expansion `e` and clock `elapsed`.
pub fn pose(particle: &Particle, e: f32, elapsed: f32, params: &PoseParams) -> InstanceTransform {
    let position = particle.clustered.lerp(particle.dispersed, e);

    let mut rotation = particle.rest_rotation;
    if e > params.spin_threshold {
        // tumble once airborne; skipped near the tree to avoid jitter
        let spin = elapsed * params.spin_factor * particle.rotation_speed;
        rotation.x += spin;
        rotation.y += spin;
    }

    InstanceTransform {
        position,
        rotation,
        scale: particle.base_scale * (1.0 - e * params.shrink_factor),
    }
}

/// Particles sharing one shape, in generation order, with their output
/// transforms at matching indices.
#[derive(Clone, Debug)]
pub struct Batch {
    pub shape: ShapeKind,
    particles: Vec<Particle>,
    transforms: Vec<InstanceTransform>,
}

impl Batch {
    fn new(shape: ShapeKind, particles: Vec<Particle>) -> Self {
        let transforms = vec![InstanceTransform::default(); particles.len()];
        Self {
            shape,
            particles,
            transforms,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn transforms(&self) -> &[InstanceTransform] {
        &self.transforms
    }

    fn update(&mut self, e: f32, elapsed: f32, params: &PoseParams) {
        #[cfg(feature = "parallel")]
        {
            self.transforms
                .par_iter_mut()
                .zip(self.particles.par_iter())
                .for_each(|(out, p)| *out = pose(p, e, elapsed, params));
        }

        #[cfg(not(feature = "parallel"))]
        {
            for (out, p) in self.transforms.iter_mut().zip(&self.particles) {
                *out = pose(p, e, elapsed, params);
            }
        }
    }
}

/// The mutable part of the field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldState {
    /// 0 = tree, 1 = universe.
    pub expansion_target: f32,
    /// Smoothed blend weight in `[0, 1]`.
    pub expansion_current: f32,
    pub elapsed_time: f32,
}

impl Default for FieldState {
    fn default() -> Self {
        Self {
            expansion_target: 0.0,
            expansion_current: 0.0,
            elapsed_time: 0.0,
        }
    }
}

impl FieldState {
    /// Advance the smoothed expansion and the clock by `dt` seconds.
    pub fn advance(&mut self, dt: f32, exploded: bool, smoothing_rate: f32) {
        let dt = sanitize_dt(dt);
        self.expansion_target = if exploded { 1.0 } else { 0.0 };
        self.expansion_current = approach(
            self.expansion_current,
            self.expansion_target,
            smoothing_factor(dt, smoothing_rate),
        )
        .clamp(0.0, 1.0);
        self.elapsed_time += dt;
    }
}

pub struct ParticleField {
    config: FieldConfig,
    pose_params: PoseParams,
    cubes: Batch,
    spheres: Batch,
    state: FieldState,
    trigger: StarTrigger,
}

impl ParticleField {
    /// Build a field with an entropy-seeded generator.
    pub fn new(config: FieldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = SmallRng::from_entropy();
        let particles = generate(config.particle_count, &config.distribution(), &mut rng);
        Self::from_particles(config, particles)
    }

    /// Build a reproducible field: the same seed always yields the same scene.
    pub fn with_seed(config: FieldConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let particles = generate(config.particle_count, &config.distribution(), &mut rng);
        Self::from_particles(config, particles)
    }

    /// Build a field from already generated particles. `config.particle_count`
    /// is replaced by the length of `particles`.
    pub fn from_particles(
        mut config: FieldConfig,
        particles: Vec<Particle>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        config.particle_count = particles.len();

        let (cubes, spheres): (Vec<_>, Vec<_>) = particles
            .into_iter()
            .partition(|p| p.shape == ShapeKind::Cube);

        log::debug!(
            "particle field: {} particles ({} cubes, {} spheres)",
            config.particle_count,
            cubes.len(),
            spheres.len()
        );

        let mut field = Self {
            pose_params: PoseParams::from(&config),
            trigger: StarTrigger::new(config.height),
            cubes: Batch::new(ShapeKind::Cube, cubes),
            spheres: Batch::new(ShapeKind::Sphere, spheres),
            state: FieldState::default(),
            config,
        };
        field.write_transforms();
        Ok(field)
    }

    /// Advance one animation frame.
    ///
    /// Negative or non-finite `delta_time` counts as zero. Runs in O(N) and
    /// reuses the preallocated transform buffers.
    pub fn tick(&mut self, delta_time: f32, exploded: bool) {
        let dt = sanitize_dt(delta_time);
        self.state.advance(dt, exploded, self.config.smoothing_rate);
        self.trigger.tick(dt, self.state.elapsed_time);
        self.write_transforms();
    }

    fn write_transforms(&mut self) {
        let e = self.state.expansion_current;
        let elapsed = self.state.elapsed_time;
        self.cubes.update(e, elapsed, &self.pose_params);
        self.spheres.update(e, elapsed, &self.pose_params);
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn state(&self) -> &FieldState {
        &self.state
    }

    pub fn expansion(&self) -> f32 {
        self.state.expansion_current
    }

    pub fn target(&self) -> f32 {
        self.state.expansion_target
    }

    pub fn elapsed(&self) -> f32 {
        self.state.elapsed_time
    }

    pub fn particle_count(&self) -> usize {
        self.cubes.len() + self.spheres.len()
    }

    pub fn batch(&self, shape: ShapeKind) -> &Batch {
        match shape {
            ShapeKind::Cube => &self.cubes,
            ShapeKind::Sphere => &self.spheres,
        }
    }

    pub fn trigger(&self) -> &StarTrigger {
        &self.trigger
    }
}
