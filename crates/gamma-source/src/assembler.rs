// ─────────────────────────────────────────────────────────────────────
// SCPN Gamma Source — Primary Vertex Assembler
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! One weighted gamma primary per event.
//!
//! Each call runs up to three independent stages and multiplies their weight
//! factors:
//!
//! 1. position: uniform point inside the source volume, world frame;
//! 2. direction: inside the cone towards the target volume, weight
//!    `(1 - cos θ)/2`, or isotropic with weight 1 when no target is set;
//! 3. energy: one line of the nuclide's daughter-inclusive spectrum above the
//!    cut, weight `Σ yields`, particle fixed to gamma.
//!
//! Without a source volume or a nuclide, the vertex keeps the default position,
//! or the default energy and particle. The direction is always sampled.
//!
//! The assembler only reads shared state while sampling, so one instance
//! serves any number of threads, each passing its own random stream.

use crate::primary::{ParticleKind, PrimarySampler, PrimarySink, PrimaryVertex};
use crate::spectrum::SpectrumSampler;
use gamma_decay::DecayDatabase;
use gamma_geometry::{GeometricBiasSampler, Placement, RandomSource, VolumeStore};
use gamma_types::config::SourceConfig;
use gamma_types::error::SourceResult;
use gamma_types::records::{NuclideId, RadiationRecord};

#[derive(Debug, Clone)]
pub struct PrimaryVertexAssembler<'a> {
    geometry: GeometricBiasSampler<'a>,
    database: &'a DecayDatabase,
    source_volume: Option<&'a Placement>,
    target_volume: Option<&'a Placement>,
    target_margin: f64,
    nuclide: Option<NuclideId>,
    min_photon_energy: f64,
    /// Daughter-inclusive spectrum of `nuclide` before the energy cut.
    aggregated: Option<RadiationRecord>,
    /// `aggregated` after the cut.
    spectrum: Option<SpectrumSampler>,
    defaults: PrimaryVertex,
}

impl<'a> PrimaryVertexAssembler<'a> {
    /// Unconfigured assembler: emits the default vertex with an isotropic
    /// direction.
    pub fn new(store: &'a VolumeStore, database: &'a DecayDatabase) -> Self {
        PrimaryVertexAssembler {
            geometry: GeometricBiasSampler::new(store),
            database,
            source_volume: None,
            target_volume: None,
            target_margin: 0.0,
            nuclide: None,
            min_photon_energy: 0.0,
            aggregated: None,
            spectrum: None,
            defaults: PrimaryVertex::default(),
        }
    }

    /// Assembler set up from `config`. Unknown volume names warn and leave
    /// the slot empty; only a cyclic decay chain is an error.
    pub fn from_config(
        store: &'a VolumeStore,
        database: &'a DecayDatabase,
        config: &SourceConfig,
    ) -> SourceResult<Self> {
        config.validate()?;
        let mut assembler = PrimaryVertexAssembler::new(store, database);
        assembler.set_max_position_attempts(config.max_position_attempts);
        if let Some(name) = &config.source_volume {
            assembler.set_source_volume(name);
        }
        match &config.target_volume {
            Some(name) => assembler.set_target_volume(name, config.target_margin),
            None => assembler.set_target_margin(config.target_margin),
        }
        assembler.set_min_photon_energy(config.min_photon_energy);
        if let Some(nuclide) = &config.nuclide {
            assembler.set_nuclide(nuclide)?;
        }
        Ok(assembler)
    }

    // ── Volumes ──────────────────────────────────────────────────────

    /// Look up the source volume by placement name.
    pub fn set_source_volume(&mut self, name: &str) {
        let volume = self.geometry.store().volume(name);
        if volume.is_none() {
            log::warn!("Invalid source volume {name}; emitting from the default position");
        }
        self.source_volume = volume;
    }

    pub fn set_source_placement(&mut self, volume: Option<&'a Placement>) {
        if volume.is_none() {
            log::warn!("Source volume cleared; emitting from the default position");
        }
        self.source_volume = volume;
    }

    pub fn source_volume(&self) -> Option<&'a Placement> {
        self.source_volume
    }

    /// Look up the target volume by placement name and set its margin [mm].
    pub fn set_target_volume(&mut self, name: &str, margin: f64) {
        let volume = self.geometry.store().volume(name);
        if volume.is_none() {
            log::warn!("Invalid target volume {name}; directions will be isotropic");
        }
        self.target_volume = volume;
        self.target_margin = margin;
    }

    pub fn set_target_placement(&mut self, volume: Option<&'a Placement>, margin: f64) {
        if volume.is_none() {
            log::warn!("Target volume cleared; directions will be isotropic");
        }
        self.target_volume = volume;
        self.target_margin = margin;
    }

    pub fn target_volume(&self) -> Option<&'a Placement> {
        self.target_volume
    }

    pub fn set_target_margin(&mut self, margin: f64) {
        self.target_margin = margin;
    }

    pub fn target_margin(&self) -> f64 {
        self.target_margin
    }

    /// Cap rejection sampling of the source position; `None` is unbounded.
    pub fn set_max_position_attempts(&mut self, max_attempts: Option<u64>) {
        self.geometry = self.geometry.with_max_attempts(max_attempts);
    }

    pub fn max_position_attempts(&self) -> Option<u64> {
        self.geometry.max_attempts()
    }

    // ── Spectrum ─────────────────────────────────────────────────────

    /// Drive energies from `name`'s spectrum including all daughters. An
    /// empty name clears the nuclide. A cyclic decay chain is returned as an
    /// error and leaves no nuclide set.
    pub fn set_nuclide(&mut self, name: &str) -> SourceResult<()> {
        if name.is_empty() {
            self.clear_nuclide();
            return Ok(());
        }
        if !self.database.contains(name) {
            log::warn!("No decay data for {name}; its events will carry weight 0");
        }
        match self.database.photon_source_all_daughters(name) {
            Ok(record) => {
                self.nuclide = Some(NuclideId::from(name));
                self.aggregated = Some(record);
                self.apply_energy_cut();
                Ok(())
            }
            Err(e) => {
                self.clear_nuclide();
                Err(e)
            }
        }
    }

    pub fn clear_nuclide(&mut self) {
        self.nuclide = None;
        self.aggregated = None;
        self.spectrum = None;
    }

    pub fn nuclide(&self) -> Option<&str> {
        self.nuclide.as_ref().map(NuclideId::as_str)
    }

    /// Discard lines below `energy` [MeV].
    pub fn set_min_photon_energy(&mut self, energy: f64) {
        self.min_photon_energy = energy;
        self.apply_energy_cut();
    }

    pub fn min_photon_energy(&self) -> f64 {
        self.min_photon_energy
    }

    /// Spectrum events draw from, after the energy cut.
    pub fn spectrum(&self) -> Option<&SpectrumSampler> {
        self.spectrum.as_ref()
    }

    fn apply_energy_cut(&mut self) {
        self.spectrum = self.aggregated.as_ref().map(|aggregated| {
            let mut record = aggregated.clone();
            self.database
                .remove_radiation_below(&mut record, self.min_photon_energy);
            SpectrumSampler::new(&record)
        });
    }

    // ── Defaults ─────────────────────────────────────────────────────

    /// Position, energy and particle used when their stage is not configured.
    /// The default direction is never emitted.
    pub fn defaults(&self) -> &PrimaryVertex {
        &self.defaults
    }

    pub fn set_default_position(&mut self, position: gamma_geometry::Vec3) {
        self.defaults.position = position;
    }

    pub fn set_default_energy(&mut self, energy: f64) {
        self.defaults.energy = energy;
    }

    pub fn set_default_particle(&mut self, particle: ParticleKind) {
        self.defaults.particle = particle;
    }

    // ── Sampling ─────────────────────────────────────────────────────

    pub fn generate_primary<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
    ) -> SourceResult<PrimaryVertex> {
        let mut vertex = self.defaults;
        vertex.weight = 1.0;

        if let Some(source) = self.source_volume {
            vertex.position = self.geometry.sample_world_point(source, rng)?;
        }

        let target = self.target_volume.map(|volume| (volume, self.target_margin));
        let biased = self.geometry.sample_direction(&vertex.position, target, rng);
        vertex.direction = biased.direction;
        vertex.weight *= biased.weight;

        if let Some(spectrum) = &self.spectrum {
            vertex.particle = ParticleKind::Gamma;
            vertex.weight *= spectrum.total_yield();
            if spectrum.can_sample() {
                let u = rng.unit();
                vertex.energy = spectrum.energy_for(u).unwrap_or(vertex.energy);
            } else {
                log::debug!(
                    "No photon lines above {} MeV for {}",
                    self.min_photon_energy,
                    self.nuclide().unwrap_or_default()
                );
            }
        }

        Ok(vertex)
    }

    /// Generate one primary and hand it to `sink`.
    pub fn generate_into<R, S>(&self, rng: &mut R, sink: &mut S) -> SourceResult<()>
    where
        R: RandomSource + ?Sized,
        S: PrimarySink + ?Sized,
    {
        let vertex = self.generate_primary(rng)?;
        sink.push_primary(vertex);
        Ok(())
    }
}

impl PrimarySampler for PrimaryVertexAssembler<'_> {
    fn sample_primary<R: RandomSource + ?Sized>(&self, rng: &mut R) -> SourceResult<PrimaryVertex> {
        self.generate_primary(rng)
    }
}
