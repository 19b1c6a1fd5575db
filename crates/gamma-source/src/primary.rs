// ─────────────────────────────────────────────────────────────────────
// SCPN Gamma Source — Primary Vertices
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! The primary record handed to the event loop, and the seams for producing
//! and consuming it.

use gamma_geometry::{RandomSource, Vec3};
use gamma_types::constants::MEV;
use gamma_types::error::SourceResult;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    /// Non-interacting placeholder, emitted until a nuclide drives the energy.
    Geantino,
    Gamma,
}

impl fmt::Display for ParticleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParticleKind::Geantino => write!(f, "geantino"),
            ParticleKind::Gamma => write!(f, "gamma"),
        }
    }
}

/// One primary particle with its importance weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimaryVertex {
    /// World frame [mm].
    pub position: Vec3,
    /// Unit vector.
    pub direction: Vec3,
    pub particle: ParticleKind,
    /// Kinetic energy [MeV].
    pub energy: f64,
    pub weight: f64,
}

impl Default for PrimaryVertex {
    /// 1 GeV geantino at the origin, weight 1. The +x direction is a
    /// placeholder: the assembler samples a direction for every vertex.
    fn default() -> Self {
        PrimaryVertex {
            position: Vec3::zeros(),
            direction: Vec3::x(),
            particle: ParticleKind::Geantino,
            energy: 1000.0 * MEV,
            weight: 1.0,
        }
    }
}

/// Produces one primary per call.
pub trait PrimarySampler {
    fn sample_primary<R: RandomSource + ?Sized>(&self, rng: &mut R) -> SourceResult<PrimaryVertex>;
}

/// Receives finished primaries, e.g. an event under construction.
pub trait PrimarySink {
    fn push_primary(&mut self, vertex: PrimaryVertex);
}

impl PrimarySink for Vec<PrimaryVertex> {
    fn push_primary(&mut self, vertex: PrimaryVertex) {
        self.push(vertex);
    }
}

/// Weighted sum of a scored quantity across events, the way a tally folds
/// biased histories back into an unbiased estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightTally {
    pub events: u64,
    pub weight_sum: f64,
    pub weight_sq_sum: f64,
}

impl WeightTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mean weight per event.
    pub fn mean(&self) -> f64 {
        if self.events == 0 {
            0.0
        } else {
            self.weight_sum / self.events as f64
        }
    }

    /// Standard error of [`mean`](Self::mean).
    pub fn std_error(&self) -> f64 {
        if self.events < 2 {
            return 0.0;
        }
        let n = self.events as f64;
        let mean = self.weight_sum / n;
        let variance = (self.weight_sq_sum / n - mean * mean).max(0.0) * n / (n - 1.0);
        (variance / n).sqrt()
    }

    pub fn merge(&mut self, other: &WeightTally) {
        self.events += other.events;
        self.weight_sum += other.weight_sum;
        self.weight_sq_sum += other.weight_sq_sum;
    }
}

impl PrimarySink for WeightTally {
    fn push_primary(&mut self, vertex: PrimaryVertex) {
        self.events += 1;
        self.weight_sum += vertex.weight;
        self.weight_sq_sum += vertex.weight * vertex.weight;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn weighted(weight: f64) -> PrimaryVertex {
        PrimaryVertex {
            weight,
            ..PrimaryVertex::default()
        }
    }

    #[test]
    fn test_default_is_placeholder() {
        let v = PrimaryVertex::default();
        assert_eq!(v.particle, ParticleKind::Geantino);
        assert_eq!(v.weight, 1.0);
        assert_eq!(v.direction, Vec3::x());
        assert_eq!(v.particle.to_string(), "geantino");
    }

    #[test]
    fn test_vec_sink_collects_in_order() {
        let mut sink: Vec<PrimaryVertex> = Vec::new();
        sink.push_primary(weighted(0.5));
        sink.push_primary(weighted(0.25));
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[1].weight, 0.25);
    }

    #[test]
    fn test_tally_mean_and_error() {
        let mut tally = WeightTally::new();
        assert_eq!(tally.mean(), 0.0);
        for w in [1.0, 2.0, 3.0, 4.0] {
            tally.push_primary(weighted(w));
        }
        assert_relative_eq!(tally.mean(), 2.5);
        // sample variance 5/3, error sqrt(5/12)
        assert_relative_eq!(tally.std_error(), (5.0_f64 / 12.0).sqrt(), epsilon = 1e-12);

        let mut other = WeightTally::new();
        other.push_primary(weighted(5.0));
        tally.merge(&other);
        assert_eq!(tally.events, 5);
        assert_relative_eq!(tally.mean(), 3.0);
    }
}
