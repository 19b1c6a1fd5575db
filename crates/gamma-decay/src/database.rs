// ─────────────────────────────────────────────────────────────────────
// SCPN Gamma Source — Decay Radiation Database
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Read-only decay and photon-emission tables with daughter-chain aggregation.
//!
//! The database is built once and never mutated, so a shared reference can be
//! handed to any number of event workers without further locking.

use crate::import::{self, DecayTable, RadiationTable};
use gamma_types::config::DataPaths;
use gamma_types::error::{SourceError, SourceResult};
use gamma_types::records::{DecayRecord, NuclideId, RadiationRecord};
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::OnceLock;

static SHARED: OnceLock<DecayDatabase> = OnceLock::new();

#[derive(Debug, Clone, Default)]
pub struct DecayDatabase {
    decay: DecayTable,
    radiation: RadiationTable,
}

impl DecayDatabase {
    pub fn new(decay: DecayTable, radiation: RadiationTable) -> Self {
        DecayDatabase { decay, radiation }
    }

    /// Import both tables. Missing files leave the matching table empty.
    /// A cyclic decay graph is reported here; aggregation through the cycle
    /// fails later with [`SourceError::CyclicDecayChain`].
    pub fn load(paths: &DataPaths) -> Self {
        let db = DecayDatabase::new(
            import::load_decay_index(&paths.decay_index),
            import::load_radiation(&paths.radiation),
        );
        if let Err(e) = db.check_acyclic() {
            log::warn!("{e}");
        }
        db
    }

    /// Process-wide instance, imported on first call. Concurrent first callers
    /// block until the import finishes; later `paths` arguments are ignored.
    pub fn shared(paths: &DataPaths) -> &'static DecayDatabase {
        SHARED.get_or_init(|| DecayDatabase::load(paths))
    }

    pub fn decay_record(&self, id: &str) -> Option<&DecayRecord> {
        self.decay.get(id)
    }

    pub fn radiation_record(&self, id: &str) -> Option<&RadiationRecord> {
        self.radiation.get(id)
    }

    /// True when `id` has both a decay and a radiation entry.
    pub fn contains(&self, id: &str) -> bool {
        self.decay.contains_key(id) && self.radiation.contains_key(id)
    }

    pub fn decay_len(&self) -> usize {
        self.decay.len()
    }

    pub fn radiation_len(&self) -> usize {
        self.radiation.len()
    }

    /// Photon lines of `id` alone. Empty when `id` is missing from either table.
    pub fn photon_source(&self, id: &str) -> RadiationRecord {
        if !self.contains(id) {
            return RadiationRecord::new();
        }
        self.radiation[id].clone()
    }

    /// Photon lines of `id` and of every nuclide reachable through its
    /// daughters, each daughter's lines scaled by the product of branch ratios
    /// along the path. Lines are concatenated, never merged.
    ///
    /// A nuclide missing from either table contributes nothing, and neither do
    /// its descendants.
    pub fn photon_source_all_daughters(&self, id: &str) -> SourceResult<RadiationRecord> {
        let mut chain = Vec::new();
        self.aggregate(id, &mut chain)
    }

    fn aggregate(&self, id: &str, chain: &mut Vec<NuclideId>) -> SourceResult<RadiationRecord> {
        let (Some(decay), Some(own)) = (self.decay.get(id), self.radiation.get(id)) else {
            return Ok(RadiationRecord::new());
        };

        if let Some(start) = chain.iter().position(|c| c.as_str() == id) {
            let mut cycle: Vec<String> = chain[start..].iter().map(|c| c.to_string()).collect();
            cycle.push(id.to_string());
            return Err(SourceError::CyclicDecayChain {
                nuclide: id.to_string(),
                chain: cycle,
            });
        }

        if decay.is_terminal() {
            return Ok(own.clone());
        }

        chain.push(NuclideId::from(id));
        let mut source = own.clone();
        for daughter in &decay.daughters {
            let daughter_source = self.aggregate(daughter.id.as_str(), chain)?;
            source.append_scaled(&daughter_source, daughter.branch_ratio);
        }
        chain.pop();

        Ok(source)
    }

    /// Cut lines below `minimum_energy` from `record` in place.
    pub fn remove_radiation_below(&self, record: &mut RadiationRecord, minimum_energy: f64) {
        record.retain_min_energy(minimum_energy);
    }

    /// Verify that following daughters from any decay entry never returns to
    /// a nuclide already on the path.
    pub fn check_acyclic(&self) -> SourceResult<()> {
        let mut finished: HashSet<&str> = HashSet::new();
        let mut ids: Vec<&NuclideId> = self.decay.keys().collect();
        ids.sort();
        for id in ids {
            let mut path = Vec::new();
            self.visit(id.as_str(), &mut path, &mut finished)?;
        }
        Ok(())
    }

    fn visit<'a>(
        &'a self,
        id: &'a str,
        path: &mut Vec<&'a str>,
        finished: &mut HashSet<&'a str>,
    ) -> SourceResult<()> {
        if finished.contains(id) {
            return Ok(());
        }
        if let Some(start) = path.iter().position(|p| *p == id) {
            let mut cycle: Vec<String> = path[start..].iter().map(|p| p.to_string()).collect();
            cycle.push(id.to_string());
            return Err(SourceError::CyclicDecayChain {
                nuclide: id.to_string(),
                chain: cycle,
            });
        }
        let Some(record) = self.decay.get(id) else {
            return Ok(());
        };
        path.push(id);
        for daughter in &record.daughters {
            self.visit(daughter.id.as_str(), path, finished)?;
        }
        path.pop();
        finished.insert(id);
        Ok(())
    }

    /// One line per nuclide, sorted by name: half-life, mode, daughters.
    pub fn write_decay_table<W: Write>(&self, mut out: W) -> io::Result<()> {
        let mut entries: Vec<_> = self.decay.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        for (id, record) in entries {
            writeln!(out, "{id} {record}")?;
        }
        Ok(())
    }

    /// Every radiation record, sorted by name, in brief form.
    pub fn write_radiation_table<W: Write>(&self, mut out: W) -> io::Result<()> {
        let mut entries: Vec<_> = self.radiation.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        for (id, record) in entries {
            writeln!(out, "{id}")?;
            write!(out, "{}", record.brief())?;
        }
        Ok(())
    }

    /// Full radiation record of one nuclide. Writes nothing for an unknown id.
    pub fn write_nuclide_radiation<W: Write>(&self, id: &str, mut out: W) -> io::Result<()> {
        let Some(record) = self.radiation.get(id) else {
            return Ok(());
        };
        writeln!(out, "{id}")?;
        write!(out, "{record}")
    }
}
