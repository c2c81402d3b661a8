use rand::rngs::SmallRng;
use rand::SeedableRng;
use treefield_core::config::{DistributionParams, FieldConfig};
use treefield_core::generate::generate;
use treefield_core::particle::ShapeKind;

fn params(height: f32, base_radius: f32) -> DistributionParams {
    FieldConfig {
        height,
        base_radius,
        ..FieldConfig::default()
    }
    .distribution()
}

#[test]
fn test_clustered_positions_inside_cone() {
    let params = params(11.0, 4.0);
    let mut rng = SmallRng::seed_from_u64(42);
    let half = params.height * 0.5;

    for (i, p) in generate(2000, &params, &mut rng).iter().enumerate() {
        let y = p.clustered.y;
        assert!(y >= -half && y <= half, "particle {i}: y={y} outside [-{half}, {half}]");
        let planar = (p.clustered.x * p.clustered.x + p.clustered.z * p.clustered.z).sqrt();
        let limit = params.radius_at(y);
        assert!(
            planar <= limit + 1e-4,
            "particle {i}: planar radius {planar} exceeds cone radius {limit} at y={y}"
        );
    }
}

#[test]
fn test_dispersed_positions_inside_shell() {
    let params = params(11.0, 4.0);
    let mut rng = SmallRng::seed_from_u64(43);

    for (i, p) in generate(2000, &params, &mut rng).iter().enumerate() {
        let r = p.dispersed.length();
        assert!(
            r >= params.min_radius - 1e-3 && r <= params.max_radius() + 1e-3,
            "particle {i}: |dispersed|={r} outside [{}, {}]",
            params.min_radius,
            params.max_radius()
        );
    }
}

#[test]
fn test_same_seed_reproduces_field() {
    let params = params(11.0, 4.0);
    let a = generate(10, &params, &mut SmallRng::seed_from_u64(2024));
    let b = generate(10, &params, &mut SmallRng::seed_from_u64(2024));
    assert_eq!(a.len(), 10);
    assert_eq!(a, b);
}

#[test]
fn test_different_seeds_differ() {
    let params = params(11.0, 4.0);
    let a = generate(10, &params, &mut SmallRng::seed_from_u64(1));
    let b = generate(10, &params, &mut SmallRng::seed_from_u64(2));
    assert_ne!(a, b);
}

#[test]
fn test_cube_ratio_roughly_sixty_percent() {
    let params = params(11.0, 4.0);
    let mut rng = SmallRng::seed_from_u64(5);
    let particles = generate(5000, &params, &mut rng);
    let cubes = particles.iter().filter(|p| p.shape == ShapeKind::Cube).count();
    let ratio = cubes as f32 / particles.len() as f32;
    assert!((ratio - 0.6).abs() < 0.04, "cube ratio {ratio}");
}

#[test]
fn test_zero_base_radius_collapses_to_axis() {
    let params = params(11.0, 0.0);
    let mut rng = SmallRng::seed_from_u64(6);
    for p in generate(200, &params, &mut rng) {
        assert_eq!(p.clustered.x, 0.0);
        assert_eq!(p.clustered.z, 0.0);
    }
}

#[test]
fn test_all_palette_colours_used() {
    let params = params(11.0, 4.0);
    let mut rng = SmallRng::seed_from_u64(8);
    let particles = generate(2000, &params, &mut rng);
    for entry in &params.palette.entries {
        assert!(
            particles.iter().any(|p| p.color == entry.color),
            "palette colour {:?} never drawn",
            entry.color
        );
    }
}
