//! Procedural placement of the tree and universe rest positions.
//!
//! All randomness comes from the caller's [`rand::Rng`], so a seeded
//! generator (`SmallRng::seed_from_u64`) reproduces a scene exactly.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::Rng;

use crate::config::DistributionParams;
use crate::math::{disc_radius, shell_radius};
use crate::particle::{Particle, ShapeKind};

/// Uniform point in the cone: height first, then a disc slice at that height.
pub fn cone_position<R: Rng + ?Sized>(params: &DistributionParams, rng: &mut R) -> Vec3 {
    let half = params.height * 0.5;
    let y = rng.gen::<f32>() * params.height - half;
    let radius_at_y = params.radius_at(y);
    let angle = rng.gen::<f32>() * TAU;
    let r = disc_radius(rng.gen::<f32>(), radius_at_y);
    Vec3::new(angle.cos() * r, y, angle.sin() * r)
}

/// Isotropic unit vector (inverse-cosine-of-z method).
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    Vec3::new(
        phi.sin() * theta.cos(),
        phi.sin() * theta.sin(),
        phi.cos(),
    )
}

/// Point in the shell `[min_radius, min_radius + spread_range]`.
pub fn shell_position<R: Rng + ?Sized>(params: &DistributionParams, rng: &mut R) -> Vec3 {
    let dir = random_direction(rng);
    dir * shell_radius(rng.gen::<f32>(), params.min_radius, params.max_radius())
}

/// Generate `count` particles.
///
/// Draw order per particle is fixed (cone, shell, scale, colour, spin,
/// rotation, batch) so a given seed always yields the same field.
pub fn generate<R: Rng + ?Sized>(
    count: usize,
    params: &DistributionParams,
    rng: &mut R,
) -> Vec<Particle> {
    let mut particles = Vec::with_capacity(count);
    for _ in 0..count {
        let clustered = cone_position(params, rng);
        let dispersed = shell_position(params, rng);
        let base_scale =
            params.scale_min + rng.gen::<f32>() * (params.scale_max - params.scale_min);
        let color = params.palette.sample(rng);
        let rotation_speed = (rng.gen::<f32>() - 0.5) * 2.0;
        let rest_rotation = Vec3::new(rng.gen::<f32>() * PI, rng.gen::<f32>() * PI, 0.0);
        let shape = if rng.gen::<f32>() < params.cube_ratio {
            ShapeKind::Cube
        } else {
            ShapeKind::Sphere
        };

        particles.push(Particle {
            clustered,
            dispersed,
            base_scale,
            color,
            rest_rotation,
            rotation_speed,
            shape,
        });
    }
    particles
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_zero_count_is_empty() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(generate(0, &DistributionParams::default(), &mut rng).is_empty());
    }

    #[test]
    fn test_random_direction_is_unit() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..500 {
            let d = random_direction(&mut rng);
            assert!((d.length() - 1.0).abs() < 1e-4, "direction not unit: {:?}", d);
        }
    }

    #[test]
    fn test_directions_are_roughly_isotropic() {
        let mut rng = SmallRng::seed_from_u64(11);
        let n = 20_000;
        let mean = (0..n)
            .map(|_| random_direction(&mut rng))
            .fold(Vec3::ZERO, |acc, d| acc + d)
            / n as f32;
        assert!(mean.length() < 0.03, "direction mean {:?} is biased", mean);
    }

    #[test]
    fn test_scale_within_range() {
        let mut rng = SmallRng::seed_from_u64(3);
        let params = DistributionParams::default();
        for p in generate(500, &params, &mut rng) {
            assert!(p.base_scale >= params.scale_min && p.base_scale <= params.scale_max);
            assert!(p.rotation_speed >= -1.0 && p.rotation_speed <= 1.0);
            assert_eq!(p.rest_rotation.z, 0.0);
        }
    }
}
