// ─────────────────────────────────────────────────────────────────────
// SCPN Gamma Source — Records
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use crate::error::{SourceError, SourceResult};

/// Nuclide identifier as written in the ICRP-07 tables, e.g. `Cs-137`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NuclideId(String);

impl NuclideId {
    pub fn new(name: impl Into<String>) -> Self {
        NuclideId(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NuclideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NuclideId {
    fn from(name: &str) -> Self {
        NuclideId(name.to_string())
    }
}

impl From<String> for NuclideId {
    fn from(name: String) -> Self {
        NuclideId(name)
    }
}

impl Borrow<str> for NuclideId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// One decay branch: daughter nuclide and its branch ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Daughter {
    pub id: NuclideId,
    /// Probability of this branch per decay, nominally in [0, 1].
    pub branch_ratio: f64,
}

/// Decay-index entry. Branch ratios are taken as-is; their sum is not checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecayRecord {
    /// Half-life text with its unit suffix, e.g. `30.1671y`.
    pub half_life: String,
    pub decay_mode: String,
    pub daughters: Vec<Daughter>,
}

impl DecayRecord {
    pub fn is_terminal(&self) -> bool {
        self.daughters.is_empty()
    }
}

impl fmt::Display for DecayRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.half_life, self.decay_mode)?;
        for daughter in &self.daughters {
            write!(f, " {} {}", daughter.id, daughter.branch_ratio)?;
        }
        Ok(())
    }
}

/// Photon lines of a nuclide: energies [MeV] paired index-for-index with
/// yields [photons per decay]. Energies are not sorted and duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRadiationRecord")]
pub struct RadiationRecord {
    photon_energies: Vec<f64>,
    yields: Vec<f64>,
}

/// Unchecked wire form; converted through [`RadiationRecord::from_parts`].
#[derive(Deserialize)]
struct RawRadiationRecord {
    photon_energies: Vec<f64>,
    yields: Vec<f64>,
}

impl TryFrom<RawRadiationRecord> for RadiationRecord {
    type Error = SourceError;

    fn try_from(raw: RawRadiationRecord) -> SourceResult<Self> {
        RadiationRecord::from_parts(raw.photon_energies, raw.yields)
    }
}

impl RadiationRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from parallel arrays, rejecting a length mismatch.
    pub fn from_parts(photon_energies: Vec<f64>, yields: Vec<f64>) -> SourceResult<Self> {
        if photon_energies.len() != yields.len() {
            return Err(SourceError::RecordMismatch {
                energies: photon_energies.len(),
                yields: yields.len(),
            });
        }
        Ok(RadiationRecord {
            photon_energies,
            yields,
        })
    }

    pub fn from_lines<I>(lines: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut record = Self::new();
        for (energy, photon_yield) in lines {
            record.push(energy, photon_yield);
        }
        record
    }

    pub fn push(&mut self, energy: f64, photon_yield: f64) {
        self.photon_energies.push(energy);
        self.yields.push(photon_yield);
    }

    pub fn photon_energies(&self) -> &[f64] {
        &self.photon_energies
    }

    pub fn yields(&self) -> &[f64] {
        &self.yields
    }

    pub fn len(&self) -> usize {
        self.yields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.yields.is_empty()
    }

    /// (energy, yield) pairs in stored order.
    pub fn lines(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.photon_energies
            .iter()
            .copied()
            .zip(self.yields.iter().copied())
    }

    /// Photons emitted per decay, summed over all lines.
    pub fn total_yield(&self) -> f64 {
        self.yields.iter().sum()
    }

    /// Concatenate `other` onto `self` with every appended yield multiplied
    /// by `yield_multiplier`. Equal energies are not merged.
    pub fn append_scaled(&mut self, other: &RadiationRecord, yield_multiplier: f64) {
        self.photon_energies.extend_from_slice(&other.photon_energies);
        self.yields
            .extend(other.yields.iter().map(|y| y * yield_multiplier));
    }

    /// Drop every line below `minimum_energy`, keeping the order of the rest.
    /// No renormalization: the total yield shrinks with the cut.
    pub fn retain_min_energy(&mut self, minimum_energy: f64) {
        let mut keep = self.photon_energies.iter().map(|&e| e >= minimum_energy);
        self.yields.retain(|_| keep.next().unwrap_or(false));
        self.photon_energies.retain(|&e| e >= minimum_energy);
    }

    /// Short listing: the first three lines, an ellipsis and the last line.
    pub fn brief(&self) -> BriefRadiation<'_> {
        BriefRadiation(self)
    }
}

fn write_line(f: &mut fmt::Formatter<'_>, photon_yield: f64, energy: f64) -> fmt::Result {
    writeln!(f, " -- {photon_yield} {energy} ")
}

impl fmt::Display for RadiationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (energy, photon_yield) in self.lines() {
            write_line(f, photon_yield, energy)?;
        }
        Ok(())
    }
}

/// Display adapter returned by [`RadiationRecord::brief`].
pub struct BriefRadiation<'a>(&'a RadiationRecord);

impl fmt::Display for BriefRadiation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.0;
        if record.len() <= 3 {
            return write!(f, "{record}");
        }
        for i in 0..3 {
            write_line(f, record.yields[i], record.photon_energies[i])?;
        }
        writeln!(f, " -- ...")?;
        let last = record.len() - 1;
        write_line(f, record.yields[last], record.photon_energies[last])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RadiationRecord {
        RadiationRecord::from_lines([(0.662, 0.85), (0.032, 0.04), (0.036, 0.01), (0.005, 0.07)])
    }

    #[test]
    fn test_from_parts_rejects_mismatch() {
        let err = RadiationRecord::from_parts(vec![1.0, 2.0], vec![0.5]).unwrap_err();
        assert!(matches!(
            err,
            SourceError::RecordMismatch {
                energies: 2,
                yields: 1
            }
        ));
    }

    #[test]
    fn test_deserialize_rejects_mismatched_arrays() {
        let json = r#"{"photon_energies":[1.0,2.0,3.0],"yields":[0.1,0.2,0.3,0.4]}"#;
        let err = serde_json::from_str::<RadiationRecord>(json).unwrap_err();
        assert!(err.to_string().contains("energies=3, yields=4"));

        let json = r#"{"photon_energies":[0.662,0.032],"yields":[0.85,0.04]}"#;
        let record: RadiationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(serde_json::to_string(&record).unwrap(), json);
    }

    #[test]
    fn test_append_scaled_keeps_duplicates() {
        let mut own = RadiationRecord::from_lines([(0.1, 1.0)]);
        let daughter = RadiationRecord::from_lines([(0.1, 0.5), (0.2, 0.25)]);
        own.append_scaled(&daughter, 0.5);

        assert_eq!(own.photon_energies(), &[0.1, 0.1, 0.2]);
        assert_eq!(own.yields(), &[1.0, 0.25, 0.125]);
    }

    #[test]
    fn test_retain_min_energy_preserves_order() {
        let mut record = sample();
        record.retain_min_energy(0.030);
        assert_eq!(record.photon_energies(), &[0.662, 0.032, 0.036]);
        assert_eq!(record.yields(), &[0.85, 0.04, 0.01]);
    }

    #[test]
    fn test_retain_min_energy_keeps_threshold_line() {
        let mut record = sample();
        record.retain_min_energy(0.662);
        assert_eq!(record.len(), 1);
        assert!((record.total_yield() - 0.85).abs() < 1e-12);
    }

    #[test]
    fn test_brief_elides_middle_lines() {
        let text = sample().brief().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[3], " -- ...");
        assert!(lines[4].contains("0.005"));
    }

    #[test]
    fn test_brief_short_record_lists_everything() {
        let record = RadiationRecord::from_lines([(0.1, 1.0), (0.2, 0.5)]);
        assert_eq!(record.brief().to_string(), record.to_string());
    }

    #[test]
    fn test_decay_record_display() {
        let record = DecayRecord {
            half_life: "30.1671y".to_string(),
            decay_mode: "B-".to_string(),
            daughters: vec![Daughter {
                id: NuclideId::from("Ba-137m"),
                branch_ratio: 0.944,
            }],
        };
        assert_eq!(record.to_string(), "30.1671y B- Ba-137m 0.944");
        assert!(!record.is_terminal());
    }
}
