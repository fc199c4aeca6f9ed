//! Spiral galaxy generation.
//!
//! Every particle gets a uniform random radius, sits on one of `branches`
//! arms chosen by its index, is twisted by `radius * spin`, and is pushed off
//! the arm by an independent jitter on each axis. Its color is the gradient
//! between the inside and outside colors at `radius / params.radius`.
//!
//! ```
//! use galaxy::{generate_with, GalaxyParams};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let field = generate_with(&GalaxyParams::default(), &mut rng);
//! assert_eq!(field.len(), 1000);
//! ```

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use crate::color::Color;
use crate::field::ParticleField;
use crate::params::GalaxyParams;

/// Generate a galaxy using the thread-local RNG.
pub fn generate(params: &GalaxyParams) -> ParticleField {
    generate_with(params, &mut rand::thread_rng())
}

/// Generate a galaxy drawing all randomness from `rng`.
///
/// Parameters are used as-is. `radius == 0` yields NaN colors and
/// `branches == 0` panics on the arm index; range checks belong to the caller.
pub fn generate_with<R: Rng + ?Sized>(params: &GalaxyParams, rng: &mut R) -> ParticleField {
    let count = params.count as usize;
    let mut positions = Vec::with_capacity(count);
    let mut colors = Vec::with_capacity(count);

    for i in 0..params.count {
        let r = rng.gen::<f32>() * params.radius;
        let spin_angle = r * params.spin;
        let angle = branch_angle(i, params.branches) + spin_angle;

        let offset = Vec3::new(
            jitter(rng, params.randomness, params.randomness_power, r),
            jitter(rng, params.randomness, params.randomness_power, r),
            jitter(rng, params.randomness, params.randomness_power, r),
        );

        positions.push(Vec3::new(angle.cos() * r, 0.0, angle.sin() * r) + offset);
        colors.push(Vec3::from(mix_color(
            params.inside_color,
            params.outside_color,
            r / params.radius,
        )));
    }

    ParticleField::new(positions, colors)
}

/// Angle of the arm particle `index` belongs to.
#[inline]
pub fn branch_angle(index: u32, branches: u32) -> f32 {
    (index % branches) as f32 / branches as f32 * TAU
}

/// One axis of positional jitter for a particle at distance `r`.
///
/// `uniform^power` keeps most offsets small for `power > 1`, which is what
/// tightens the arms toward the core.
#[inline]
pub fn jitter<R: Rng + ?Sized>(rng: &mut R, randomness: f32, power: f32, r: f32) -> f32 {
    let magnitude = rng.gen::<f32>().powf(power);
    let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
    sign * magnitude * randomness * r
}

/// Radial gradient: `t = 0` is `inside`, `t = 1` is `outside`.
#[inline]
pub fn mix_color(inside: Color, outside: Color, t: f32) -> Color {
    inside.lerp(outside, t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_branch_angle_cycles() {
        assert_eq!(branch_angle(0, 4), 0.0);
        assert_eq!(branch_angle(1, 4), FRAC_PI_2);
        assert_eq!(branch_angle(2, 4), PI);
        assert_eq!(branch_angle(5, 4), branch_angle(1, 4));
        assert_eq!(branch_angle(7, 1), 0.0);
    }

    #[test]
    fn test_jitter_zero_randomness() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(jitter(&mut rng, 0.0, 3.0, 4.0), 0.0);
        }
    }

    #[test]
    fn test_jitter_bounded_by_randomness_times_radius() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut saw_negative = false;
        let mut saw_positive = false;
        for _ in 0..1000 {
            let j = jitter(&mut rng, 0.5, 2.0, 3.0);
            assert!(j.abs() <= 1.5);
            saw_negative |= j < 0.0;
            saw_positive |= j > 0.0;
        }
        assert!(saw_negative && saw_positive);
    }

    #[test]
    fn test_higher_power_concentrates_jitter() {
        let mean_abs = |power: f32| {
            let mut rng = StdRng::seed_from_u64(3);
            (0..5000)
                .map(|_| jitter(&mut rng, 1.0, power, 1.0).abs())
                .sum::<f32>()
                / 5000.0
        };
        // E[u^p] = 1 / (p + 1)
        assert!((mean_abs(1.0) - 0.5).abs() < 0.03);
        assert!((mean_abs(4.0) - 0.2).abs() < 0.03);
    }

    #[test]
    fn test_mix_color_endpoints() {
        let inside = Color::from_hex("#ff6030").unwrap();
        let outside = Color::from_hex("#1b3984").unwrap();
        assert_eq!(mix_color(inside, outside, 0.0), inside);
        assert_eq!(mix_color(inside, outside, 1.0), outside);
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let params = GalaxyParams::default();
        let a = generate_with(&params, &mut StdRng::seed_from_u64(99));
        let b = generate_with(&params, &mut StdRng::seed_from_u64(99));
        assert_eq!(a.positions(), b.positions());
        assert_eq!(a.colors(), b.colors());
    }

    #[test]
    fn test_flat_disk_without_randomness() {
        let params = GalaxyParams {
            randomness: 0.0,
            ..Default::default()
        };
        let field = generate(&params);
        assert!(field.positions().iter().all(|p| p.y == 0.0));
    }
}
