//! The five-pointed star perched on the tree tip. Clicking it toggles the
//! field just like clicking a particle; it also spins and pulses on its own.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use crate::field::InstanceTransform;

pub const STAR_POINTS: usize = 5;
pub const STAR_OUTER_RADIUS: f32 = 1.2;
pub const STAR_INNER_RADIUS: f32 = 0.5;
/// Gap between the cone apex and the star centre.
pub const STAR_HEIGHT_OFFSET: f32 = 0.8;
/// Yaw rate, radians per second.
pub const STAR_SPIN_RATE: f32 = 0.5;
pub const STAR_PULSE_RATE: f32 = 2.0;
pub const STAR_PULSE_AMPLITUDE: f32 = 0.05;

#[derive(Clone, Debug, PartialEq)]
pub struct StarTrigger {
    pub anchor: Vec3,
    /// Accumulated yaw, kept in `[0, 2π)`.
    pub yaw: f32,
    pub pulse: f32,
}

impl StarTrigger {
    pub fn new(tree_height: f32) -> Self {
        Self {
            anchor: Vec3::new(0.0, tree_height * 0.5 + STAR_HEIGHT_OFFSET, 0.0),
            yaw: 0.0,
            pulse: 1.0,
        }
    }

    /// Star polygon in the XY plane: outer and inner vertices alternate,
    /// starting at the top point `(0, outer)` and running clockwise.
    pub fn outline() -> [Vec2; STAR_POINTS * 2] {
        let mut points = [Vec2::ZERO; STAR_POINTS * 2];
        for (i, point) in points.iter_mut().enumerate() {
            let angle = i as f32 / (STAR_POINTS * 2) as f32 * TAU;
            let radius = if i % 2 == 0 {
                STAR_OUTER_RADIUS
            } else {
                STAR_INNER_RADIUS
            };
            *point = Vec2::new(angle.sin() * radius, angle.cos() * radius);
        }
        points
    }

    /// `dt` must already be sanitized; `elapsed` is the field clock.
    pub fn tick(&mut self, dt: f32, elapsed: f32) {
        self.yaw = (self.yaw + dt * STAR_SPIN_RATE).rem_euclid(TAU);
        self.pulse = 1.0 + (elapsed * STAR_PULSE_RATE).sin() * STAR_PULSE_AMPLITUDE;
    }

    pub fn transform(&self) -> InstanceTransform {
        InstanceTransform {
            position: self.anchor,
            rotation: Vec3::new(0.0, self.yaw, 0.0),
            scale: self.pulse,
        }
    }

    /// The star's point light brightens once the universe is open.
    pub fn light_intensity(exploded: bool) -> f32 {
        if exploded {
            8.0
        } else {
            4.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_alternates_radii() {
        let outline = StarTrigger::outline();
        assert!((outline[0] - Vec2::new(0.0, STAR_OUTER_RADIUS)).length() < 1e-6);
        for (i, p) in outline.iter().enumerate() {
            let expected = if i % 2 == 0 { STAR_OUTER_RADIUS } else { STAR_INNER_RADIUS };
            assert!((p.length() - expected).abs() < 1e-5, "vertex {i} radius {}", p.length());
        }
    }

    #[test]
    fn test_anchor_sits_above_apex() {
        let star = StarTrigger::new(11.0);
        assert!((star.anchor.y - 6.3).abs() < 1e-5);
    }

    #[test]
    fn test_pulse_stays_near_one() {
        let mut star = StarTrigger::new(11.0);
        for i in 0..200 {
            star.tick(0.05, i as f32 * 0.05);
            assert!((star.pulse - 1.0).abs() <= STAR_PULSE_AMPLITUDE + 1e-6);
            assert!(star.yaw >= 0.0 && star.yaw < TAU);
        }
    }
}
