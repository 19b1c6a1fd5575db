// ─────────────────────────────────────────────────────────────────────
// SCPN Gamma Source — Solids
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Solids are opaque to the sampler: it only asks for an axis-aligned
//! bounding box and a containment classification, both in the solid's own
//! frame. The shapes here cover source and detector volumes in tests and
//! simple set-ups; hosts plug in their own geometry through [`Solid`].

use crate::Vec3;
use std::fmt::Debug;

/// Surface thickness [mm]. Points within half of it from the boundary
/// classify as [`Containment::Surface`].
pub const SURFACE_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    Inside,
    Surface,
    Outside,
}

impl Containment {
    /// Classify a signed distance (negative inside) against the tolerance.
    pub fn from_signed_distance(distance: f64) -> Self {
        let half = 0.5 * SURFACE_TOLERANCE;
        if distance < -half {
            Containment::Inside
        } else if distance <= half {
            Containment::Surface
        } else {
            Containment::Outside
        }
    }
}

pub trait Solid: Debug + Send + Sync {
    /// Lower and upper corners of the local-frame bounding box.
    fn bounding_limits(&self) -> (Vec3, Vec3);

    fn inside(&self, point: &Vec3) -> Containment;
}

/// Full or hollow sphere centred on the local origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub inner_radius: f64,
    pub outer_radius: f64,
}

impl Sphere {
    pub fn new(radius: f64) -> Self {
        Sphere {
            inner_radius: 0.0,
            outer_radius: radius,
        }
    }

    pub fn hollow(inner_radius: f64, outer_radius: f64) -> Self {
        Sphere {
            inner_radius,
            outer_radius,
        }
    }
}

impl Solid for Sphere {
    fn bounding_limits(&self) -> (Vec3, Vec3) {
        let r = self.outer_radius;
        (Vec3::repeat(-r), Vec3::repeat(r))
    }

    fn inside(&self, point: &Vec3) -> Containment {
        let r = point.norm();
        let mut distance = r - self.outer_radius;
        if self.inner_radius > 0.0 {
            distance = distance.max(self.inner_radius - r);
        }
        Containment::from_signed_distance(distance)
    }
}

/// Box given by its half-lengths along the local axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboid {
    pub half_lengths: Vec3,
}

impl Cuboid {
    pub fn new(half_x: f64, half_y: f64, half_z: f64) -> Self {
        Cuboid {
            half_lengths: Vec3::new(half_x, half_y, half_z),
        }
    }
}

impl Solid for Cuboid {
    fn bounding_limits(&self) -> (Vec3, Vec3) {
        (-self.half_lengths, self.half_lengths)
    }

    fn inside(&self, point: &Vec3) -> Containment {
        let distance = (point.abs() - self.half_lengths).max();
        Containment::from_signed_distance(distance)
    }
}

/// Solid cylinder along the local z axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    pub radius: f64,
    pub half_z: f64,
}

impl Cylinder {
    pub fn new(radius: f64, half_z: f64) -> Self {
        Cylinder { radius, half_z }
    }
}

impl Solid for Cylinder {
    fn bounding_limits(&self) -> (Vec3, Vec3) {
        let extent = Vec3::new(self.radius, self.radius, self.half_z);
        (-extent, extent)
    }

    fn inside(&self, point: &Vec3) -> Containment {
        let radial = point.x.hypot(point.y) - self.radius;
        let axial = point.z.abs() - self.half_z;
        Containment::from_signed_distance(radial.max(axial))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_classification() {
        let sphere = Sphere::new(10.0);
        assert_eq!(sphere.inside(&Vec3::zeros()), Containment::Inside);
        assert_eq!(sphere.inside(&Vec3::new(0.0, 10.0, 0.0)), Containment::Surface);
        assert_eq!(sphere.inside(&Vec3::new(8.0, 8.0, 0.0)), Containment::Outside);
    }

    #[test]
    fn test_hollow_sphere_excludes_cavity() {
        let shell = Sphere::hollow(5.0, 10.0);
        assert_eq!(shell.inside(&Vec3::zeros()), Containment::Outside);
        assert_eq!(shell.inside(&Vec3::new(5.0, 0.0, 0.0)), Containment::Surface);
        assert_eq!(shell.inside(&Vec3::new(0.0, 0.0, 7.5)), Containment::Inside);
    }

    #[test]
    fn test_cuboid_classification() {
        let cuboid = Cuboid::new(1.0, 2.0, 3.0);
        assert_eq!(cuboid.inside(&Vec3::new(0.5, -1.5, 2.5)), Containment::Inside);
        assert_eq!(cuboid.inside(&Vec3::new(1.0, 0.0, 0.0)), Containment::Surface);
        assert_eq!(cuboid.inside(&Vec3::new(0.0, 0.0, -3.5)), Containment::Outside);
        let (min, max) = cuboid.bounding_limits();
        assert_eq!(min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(max, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_cylinder_classification() {
        let cylinder = Cylinder::new(2.0, 5.0);
        assert_eq!(cylinder.inside(&Vec3::new(1.0, 1.0, 4.0)), Containment::Inside);
        assert_eq!(cylinder.inside(&Vec3::new(1.9, 1.9, 0.0)), Containment::Outside);
        assert_eq!(cylinder.inside(&Vec3::new(0.0, 0.0, 5.0)), Containment::Surface);
    }
}
