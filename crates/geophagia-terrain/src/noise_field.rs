//! Seeded 2D gradient noise (classic Perlin).
//!
//! A table of 256 unit gradients is indexed through a shuffled permutation of
//! `0..=255`. The permutation is stored twice back to back so the two-level
//! lookup `perm[perm[x] + y]` never needs to wrap.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Number of lattice gradients and distinct permutation entries.
pub const TABLE_SIZE: usize = 256;

const LATTICE_MASK: i32 = 0xFF;

/// Deterministic, seed-reproducible 2D gradient noise sampler.
///
/// The only state is the pair of tables built by the last
/// [`reseed`](Self::reseed); sampling never mutates it.
#[derive(Clone, Debug)]
pub struct NoiseField {
    seed: u64,
    gradients: [Vec2; TABLE_SIZE],
    permutation: [u8; TABLE_SIZE * 2],
}

impl NoiseField {
    /// Build a sampler whose tables are derived from `seed`.
    pub fn new(seed: u64) -> Self {
        let mut field = Self {
            seed,
            gradients: [Vec2::ZERO; TABLE_SIZE],
            permutation: [0; TABLE_SIZE * 2],
        };
        field.reseed(seed);
        field
    }

    /// Rebuild both tables from `seed`.
    ///
    /// Gradients are unit vectors at angles drawn uniformly from `[0, 2π)`;
    /// the permutation is a Fisher-Yates shuffle of `0..=255`, drawn from the
    /// same stream after the gradients.
    pub fn reseed(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        for gradient in self.gradients.iter_mut() {
            let angle = rng.random::<f32>() * TAU;
            *gradient = Vec2::new(libm::cosf(angle), libm::sinf(angle));
        }

        let mut base: [u8; TABLE_SIZE] = std::array::from_fn(|i| i as u8);
        base.shuffle(&mut rng);
        self.permutation[..TABLE_SIZE].copy_from_slice(&base);
        self.permutation[TABLE_SIZE..].copy_from_slice(&base);

        self.seed = seed;
    }

    /// The seed the current tables were built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Gradient table, one unit vector per lattice hash.
    pub fn gradients(&self) -> &[Vec2; TABLE_SIZE] {
        &self.gradients
    }

    /// Permutation table, the shuffle followed by an identical copy.
    pub fn permutation(&self) -> &[u8; TABLE_SIZE * 2] {
        &self.permutation
    }

    /// Evaluate the noise at `point`.
    ///
    /// Output is roughly in `[-1, 1]` but not strictly bounded. The value at
    /// every integer lattice point is exactly zero.
    pub fn sample(&self, point: Vec2) -> f32 {
        let cell = point.floor();
        let xi = cell.x as i32;
        let yi = cell.y as i32;

        let x0 = xi & LATTICE_MASK;
        let y0 = yi & LATTICE_MASK;
        let x1 = xi.wrapping_add(1) & LATTICE_MASK;
        let y1 = yi.wrapping_add(1) & LATTICE_MASK;

        let offset = point - cell;

        let g00 = self.gradients[self.hash(x0, y0)];
        let g10 = self.gradients[self.hash(x1, y0)];
        let g01 = self.gradients[self.hash(x0, y1)];
        let g11 = self.gradients[self.hash(x1, y1)];

        let d00 = g00.dot(offset);
        let d10 = g10.dot(offset - Vec2::X);
        let d01 = g01.dot(offset - Vec2::Y);
        let d11 = g11.dot(offset - Vec2::ONE);

        let u = fade(offset.x);
        let v = fade(offset.y);

        lerp(lerp(d00, d10, u), lerp(d01, d11, u), v)
    }

    /// Lattice hash; both inputs must already be masked to `0..=255`.
    #[inline]
    fn hash(&self, x: i32, y: i32) -> usize {
        let row = self.permutation[x as usize] as usize;
        self.permutation[row + y as usize] as usize
    }
}

/// Quintic smoothing curve `6t^5 - 15t^4 + 10t^3`.
#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
