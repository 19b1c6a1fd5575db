// ─────────────────────────────────────────────────────────────────────
// SCPN Gamma Source — Geometric Bias Sampler
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Emission point and target-biased direction sampling.
//!
//! Points are drawn uniformly inside a solid by rejection against its
//! bounding box. Directions are drawn inside the narrowest cone, apex at the
//! emission point, that holds the target's (margin-expanded) bounding box.
//! Restricting directions to a cone covering a fraction `(1 - cos θ)/2` of the
//! sphere multiplies each history's weight by that fraction, which keeps the
//! estimator unbiased for anything reached only through the target.

use crate::placement::{Placement, VolumeStore};
use crate::random::RandomSource;
use crate::solid::{Containment, Solid};
use crate::Vec3;
use gamma_types::error::{SourceError, SourceResult};
use nalgebra::{Rotation3, Unit};
use std::f64::consts::PI;

/// Relative tolerance for treating the cone axis as parallel to z.
const PARALLEL_TOLERANCE: f64 = 1e-14;

/// Cone from the emission point towards a target volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionCone {
    /// Emission point to target box centre, world frame, not normalized.
    pub axis: Vec3,
    /// Half-angle [rad] covering every corner of the target box.
    pub half_angle: f64,
}

/// Sampled direction and the weight factor it carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiasedDirection {
    pub direction: Vec3,
    pub weight: f64,
}

/// Draw a point uniformly inside `solid`, in its local frame.
///
/// Candidates come uniformly from the bounding box and are kept only when
/// strictly inside. With `max_attempts = None` the loop runs until a point is
/// accepted, which happens with probability 1 for any solid occupying a
/// positive fraction of its box; slender solids make it slow. With
/// `Some(n)`, [`SourceError::SamplingExhausted`] is returned after `n`
/// rejected candidates.
pub fn sample_point_in_solid<R: RandomSource + ?Sized>(
    solid: &dyn Solid,
    rng: &mut R,
    max_attempts: Option<u64>,
) -> SourceResult<Vec3> {
    let (min, max) = solid.bounding_limits();
    let mut attempts: u64 = 0;
    loop {
        if let Some(limit) = max_attempts {
            if attempts >= limit {
                return Err(SourceError::SamplingExhausted { attempts });
            }
        }
        attempts += 1;

        let candidate = Vec3::new(
            rng.uniform(min.x, max.x),
            rng.uniform(min.y, max.y),
            rng.uniform(min.z, max.z),
        );
        if solid.inside(&candidate) == Containment::Inside {
            return Ok(candidate);
        }
    }
}

/// Fraction of the full sphere covered by a cone with half-angle cosine
/// `cos_half_angle`; 1 when the cone is a hemisphere or wider.
pub fn cone_weight(cos_half_angle: f64) -> f64 {
    if cos_half_angle <= 0.0 {
        1.0
    } else {
        (1.0 - cos_half_angle) / 2.0
    }
}

/// Rotate `v` by the rotation that takes +z onto `axis`. For an axis along
/// ±z no rotation is built; `v` is kept or negated.
pub fn rotate_from_z(v: &Vec3, axis: &Vec3) -> Vec3 {
    let z = Vec3::z();
    let normal = z.cross(axis);
    if normal.norm_squared() <= PARALLEL_TOLERANCE * PARALLEL_TOLERANCE * axis.norm_squared() {
        return if axis.z < 0.0 { -v } else { *v };
    }
    let rotation = Rotation3::from_axis_angle(&Unit::new_normalize(normal), z.angle(axis));
    rotation * v
}

/// Direction inside `cone` and its weight factor. A cone of half-angle
/// π/2 or more falls back to an isotropic direction with weight 1.
pub fn sample_biased_direction<R: RandomSource + ?Sized>(
    cone: &EmissionCone,
    rng: &mut R,
) -> BiasedDirection {
    let cos_half_angle = cone.half_angle.cos();
    if cos_half_angle <= 0.0 {
        return BiasedDirection {
            direction: rng.isotropic_direction(),
            weight: 1.0,
        };
    }
    let local = rng.direction_in_cone(cos_half_angle);
    BiasedDirection {
        direction: rotate_from_z(&local, &cone.axis),
        weight: cone_weight(cos_half_angle),
    }
}

/// Point sampling, cone construction and frame transforms over one
/// [`VolumeStore`]. Holds only shared references, so one sampler can serve
/// many workers, each with its own random stream.
#[derive(Debug, Clone, Copy)]
pub struct GeometricBiasSampler<'a> {
    store: &'a VolumeStore,
    max_attempts: Option<u64>,
}

impl<'a> GeometricBiasSampler<'a> {
    pub fn new(store: &'a VolumeStore) -> Self {
        GeometricBiasSampler {
            store,
            max_attempts: None,
        }
    }

    /// Cap rejection sampling at `max_attempts` candidates per point.
    pub fn with_max_attempts(mut self, max_attempts: Option<u64>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn store(&self) -> &'a VolumeStore {
        self.store
    }

    pub fn max_attempts(&self) -> Option<u64> {
        self.max_attempts
    }

    /// Uniform point inside `volume`'s solid, local frame.
    pub fn sample_point_from_volume<R: RandomSource + ?Sized>(
        &self,
        volume: &Placement,
        rng: &mut R,
    ) -> SourceResult<Vec3> {
        sample_point_in_solid(volume.solid(), rng, self.max_attempts)
    }

    /// Uniform point inside `volume`'s solid, world frame.
    pub fn sample_world_point<R: RandomSource + ?Sized>(
        &self,
        volume: &Placement,
        rng: &mut R,
    ) -> SourceResult<Vec3> {
        let local = self.sample_point_from_volume(volume, rng)?;
        Ok(self.to_world(volume, &local))
    }

    pub fn to_world(&self, volume: &Placement, local: &Vec3) -> Vec3 {
        self.store.to_world(volume, local)
    }

    /// Cone with apex at `point` (world frame) enclosing the 8 corners of
    /// `target`'s bounding box grown by `margin` on every side. The axis runs
    /// to the box centre. When `point` is at the centre, the half-angle is π.
    pub fn cone_to_volume(&self, point: &Vec3, target: &Placement, margin: f64) -> EmissionCone {
        let (mut min, mut max) = target.solid().bounding_limits();
        min -= Vec3::repeat(margin);
        max += Vec3::repeat(margin);

        let center = self.to_world(target, &((min + max) * 0.5));
        let axis = center - point;
        if axis.norm_squared() == 0.0 {
            log::debug!("Emission point sits at the centre of {}", target.name());
            return EmissionCone {
                axis,
                half_angle: PI,
            };
        }

        let half_angle = (0..8)
            .map(|corner| {
                let local = Vec3::new(
                    if corner & 1 == 0 { min.x } else { max.x },
                    if corner & 2 == 0 { min.y } else { max.y },
                    if corner & 4 == 0 { min.z } else { max.z },
                );
                axis.angle(&(self.to_world(target, &local) - point))
            })
            .fold(0.0_f64, f64::max);

        EmissionCone { axis, half_angle }
    }

    /// Half-angle [rad] of [`cone_to_volume`](Self::cone_to_volume).
    pub fn apex_half_angle_to_volume(&self, point: &Vec3, target: &Placement, margin: f64) -> f64 {
        self.cone_to_volume(point, target, margin).half_angle
    }

    /// Direction from `point` biased towards `target`, or isotropic with
    /// weight 1 when there is no target.
    pub fn sample_direction<R: RandomSource + ?Sized>(
        &self,
        point: &Vec3,
        target: Option<(&Placement, f64)>,
        rng: &mut R,
    ) -> BiasedDirection {
        match target {
            Some((volume, margin)) => {
                let cone = self.cone_to_volume(point, volume, margin);
                sample_biased_direction(&cone, rng)
            }
            None => BiasedDirection {
                direction: rng.isotropic_direction(),
                weight: 1.0,
            },
        }
    }
}
