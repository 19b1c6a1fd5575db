//! Random draws needed by the emission sampler.
//!
//! Every `rand::Rng` is a [`RandomSource`], so callers pass a seeded
//! `StdRng`/`ChaChaRng` per worker and keep streams reproducible.

use crate::Vec3;
use rand::Rng;
use rand_distr::{Distribution, UnitSphere};
use std::f64::consts::PI;

pub trait RandomSource {
    /// Uniform draw in [lo, hi). Returns `lo` for an empty interval.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64;

    /// Uniform draw in [0, 1).
    fn unit(&mut self) -> f64;

    /// Unit vector uniformly distributed over the sphere.
    fn isotropic_direction(&mut self) -> Vec3;

    /// Unit vector uniformly distributed inside the cone around +z whose
    /// half-angle has cosine `cos_theta_max`.
    fn direction_in_cone(&mut self, cos_theta_max: f64) -> Vec3;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.gen::<f64>()
    }

    fn unit(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn isotropic_direction(&mut self) -> Vec3 {
        let [x, y, z]: [f64; 3] = UnitSphere.sample(self);
        Vec3::new(x, y, z)
    }

    fn direction_in_cone(&mut self, cos_theta_max: f64) -> Vec3 {
        let cos_max = cos_theta_max.clamp(-1.0, 1.0);
        let z = cos_max + (1.0 - cos_max) * self.gen::<f64>();
        let rho = ((1.0 + z) * (1.0 - z)).max(0.0).sqrt();
        let phi = 2.0 * PI * self.gen::<f64>();
        Vec3::new(rho * phi.cos(), rho * phi.sin(), z)
    }
}
