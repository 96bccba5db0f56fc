//! Coordinate augmentation applied before batch assembly.
//!
//! Augmentation is a caller-side step: structures are perturbed first, then
//! handed to [`assemble`](crate::assemble), which treats the coordinates it
//! receives as given. Whenever a structure is perturbed, its
//! pre-perturbation coordinates are preserved in `positions_orig` so the
//! assembled batch carries both `R` and `R_orig` for loss computation
//! against ground truth.
//!
//! Two transformations are available, mirroring common training-time
//! augmentation for molecular property prediction:
//!
//! - a uniform random rigid rotation about the structure's centroid
//!   (which also recenters the structure at the origin), and
//! - isotropic Gaussian noise with per-axis variance `perturb_cov`.
//!
//! Rotation is applied before the original coordinates are captured: a
//! rigid rotation changes nothing a rotation-invariant model can learn
//! from, so `R_orig` is the rotated but noise-free geometry.
//!
//! All randomness flows through an explicit [`Rng`], never ambient process
//! state, keeping augmented inputs reproducible from a recorded seed.

use crate::batch::Error;
use crate::model::structure::Structure;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

/// Augmentation settings. The default applies no transformation.
#[derive(Debug, Clone, Copy, Default)]
pub struct AugmentOptions {
    /// Per-axis variance of the Gaussian coordinate noise; zero disables it.
    pub perturb_cov: f64,
    /// Whether to apply a uniform random rotation about the centroid.
    pub rotate: bool,
}

/// Augments every structure in place, capturing `positions_orig`.
///
/// Validates position shapes first and fails without touching any structure
/// if one is malformed or empty; the same input would fail assembly anyway.
///
/// # Panics
///
/// Panics if `perturb_cov` is negative or not finite.
pub fn augment(
    structures: &mut [Structure],
    options: &AugmentOptions,
    rng: &mut impl Rng,
) -> Result<(), Error> {
    assert!(
        options.perturb_cov.is_finite() && options.perturb_cov >= 0.0,
        "perturbation variance must be finite and non-negative"
    );

    for (index, s) in structures.iter().enumerate() {
        if s.atom_count() == 0 {
            return Err(Error::EmptyStructure { index });
        }
        if s.positions.len() != 3 * s.atom_count() {
            return Err(Error::shape(index, s.positions.len(), s.atom_count()));
        }
    }

    for s in structures.iter_mut() {
        if options.rotate {
            rotate_about_centroid(&mut s.positions, rng);
        }
        s.positions_orig = Some(s.positions.clone());
        if options.perturb_cov > 0.0 {
            let noise = Normal::new(0.0, options.perturb_cov.sqrt())
                .expect("standard deviation is finite and positive");
            for v in s.positions.iter_mut() {
                *v += noise.sample(rng);
            }
        }
    }

    Ok(())
}

/// Applies a uniform random rotation to a flat coordinate array, recentering
/// the structure at the origin.
fn rotate_about_centroid(positions: &mut [f64], rng: &mut impl Rng) {
    let n = (positions.len() / 3) as f64;
    let mut center = [0.0f64; 3];
    for p in positions.chunks_exact(3) {
        for axis in 0..3 {
            center[axis] += p[axis];
        }
    }
    for c in &mut center {
        *c /= n;
    }

    let m = rand_rotation_matrix(rng);
    for p in positions.chunks_exact_mut(3) {
        let local = [p[0] - center[0], p[1] - center[1], p[2] - center[2]];
        for (col, out) in p.iter_mut().enumerate() {
            *out = local[0] * m[0][col] + local[1] * m[1][col] + local[2] * m[2][col];
        }
    }
}

/// Samples a rotation matrix uniformly over SO(3).
///
/// Arvo's method: a random rotation about the z axis composed with a
/// Householder reflection through a random unit vector; the reflection
/// flips the sign back to a proper rotation.
fn rand_rotation_matrix(rng: &mut impl Rng) -> [[f64; 3]; 3] {
    let theta = 2.0 * PI * rng.gen::<f64>();
    let phi = 2.0 * PI * rng.gen::<f64>();
    let z = 2.0 * rng.gen::<f64>();

    let r = z.sqrt();
    let v = [phi.sin() * r, phi.cos() * r, (2.0 - z).sqrt()];

    let (st, ct) = theta.sin_cos();
    let rz = [[ct, st, 0.0], [-st, ct, 0.0], [0.0, 0.0, 1.0]];

    // (v vᵀ − I) · Rz
    let mut m = [[0.0f64; 3]; 3];
    for row in 0..3 {
        for col in 0..3 {
            for mid in 0..3 {
                let house = v[row] * v[mid] - if row == mid { 1.0 } else { 0.0 };
                m[row][col] += house * rz[mid][col];
            }
        }
    }
    m
}
