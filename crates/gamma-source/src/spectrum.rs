// ─────────────────────────────────────────────────────────────────────
// SCPN Gamma Source — Discrete Photon Spectrum
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Inverse-CDF sampling over the lines of a photon spectrum.

use gamma_types::records::RadiationRecord;

/// Cumulative yields of a spectrum, ready for repeated line draws.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumSampler {
    energies: Vec<f64>,
    cumulative: Vec<f64>,
    total_yield: f64,
}

impl SpectrumSampler {
    pub fn new(record: &RadiationRecord) -> Self {
        let mut running = 0.0;
        let cumulative = record
            .yields()
            .iter()
            .map(|&y| {
                running += y;
                running
            })
            .collect();
        SpectrumSampler {
            energies: record.photon_energies().to_vec(),
            cumulative,
            total_yield: running,
        }
    }

    /// Photons per decay summed over every line.
    pub fn total_yield(&self) -> f64 {
        self.total_yield
    }

    pub fn len(&self) -> usize {
        self.energies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }

    /// False when no line can be drawn: empty spectrum or non-positive total.
    pub fn can_sample(&self) -> bool {
        !self.energies.is_empty() && self.total_yield > 0.0
    }

    /// Smallest line index whose cumulative yield reaches `u · total`, for
    /// `u` in [0, 1). `None` when [`can_sample`](Self::can_sample) is false.
    pub fn index_for(&self, u: f64) -> Option<usize> {
        if !self.can_sample() {
            return None;
        }
        let threshold = u.clamp(0.0, 1.0) * self.total_yield;
        let index = self.cumulative.partition_point(|&c| c < threshold);
        Some(index.min(self.energies.len() - 1))
    }

    /// Energy [MeV] of the line selected by `u`.
    pub fn energy_for(&self, u: f64) -> Option<f64> {
        self.index_for(u).map(|i| self.energies[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn spectrum(lines: &[(f64, f64)]) -> SpectrumSampler {
        SpectrumSampler::new(&RadiationRecord::from_lines(lines.iter().copied()))
    }

    #[test]
    fn test_index_walks_cumulative_yield() {
        let s = spectrum(&[(0.1, 1.0), (0.2, 2.0), (0.3, 1.0)]);
        assert_relative_eq!(s.total_yield(), 4.0);
        assert_eq!(s.index_for(0.0), Some(0));
        assert_eq!(s.index_for(0.24), Some(0));
        assert_eq!(s.index_for(0.25), Some(0));
        assert_eq!(s.index_for(0.26), Some(1));
        assert_eq!(s.index_for(0.75), Some(1));
        assert_eq!(s.index_for(0.76), Some(2));
        assert_eq!(s.index_for(0.999_999), Some(2));
    }

    #[test]
    fn test_upper_boundary_stays_in_range() {
        let s = spectrum(&[(0.1, 0.5), (0.2, 0.5)]);
        assert_eq!(s.index_for(1.0), Some(1));
        assert_eq!(s.energy_for(1.0), Some(0.2));
    }

    #[test]
    fn test_zero_yield_lines_are_skipped() {
        let s = spectrum(&[(0.1, 1.0), (0.2, 0.0), (0.3, 1.0)]);
        assert_eq!(s.index_for(0.5), Some(0));
        assert_eq!(s.index_for(0.500_001), Some(2));
    }

    #[test]
    fn test_empty_and_zero_total_cannot_sample() {
        let empty = spectrum(&[]);
        assert!(empty.is_empty());
        assert_eq!(empty.index_for(0.3), None);

        let silent = spectrum(&[(0.1, 0.0), (0.2, 0.0)]);
        assert_eq!(silent.len(), 2);
        assert!(!silent.can_sample());
        assert_eq!(silent.energy_for(0.3), None);
    }

    #[test]
    fn test_frequencies_follow_yields() {
        let s = spectrum(&[(0.1, 3.0), (0.2, 1.0)]);
        let n = 10_000;
        let low = (0..n)
            .map(|i| (i as f64 + 0.5) / n as f64)
            .filter(|&u| s.index_for(u) == Some(0))
            .count();
        assert_eq!(low, 7_500);
    }
}
