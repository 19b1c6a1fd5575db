// ─────────────────────────────────────────────────────────────────────
// SCPN Gamma Source — Gamma Geometry
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Solids, placement tree and target-biased emission sampling.

pub mod placement;
pub mod random;
pub mod sampler;
pub mod solid;

/// World- or local-frame vector [mm].
pub type Vec3 = nalgebra::Vector3<f64>;

pub use placement::{Placement, VolumeStore};
pub use random::RandomSource;
pub use sampler::{BiasedDirection, EmissionCone, GeometricBiasSampler};
pub use solid::{Containment, Cuboid, Cylinder, Solid, Sphere};
