// ─────────────────────────────────────────────────────────────────────
// SCPN Gamma Source — Gamma Source
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Weighted gamma primaries from a decaying nuclide, aimed at a target volume.

pub mod assembler;
pub mod primary;
pub mod spectrum;

pub use assembler::PrimaryVertexAssembler;
pub use primary::{ParticleKind, PrimarySampler, PrimarySink, PrimaryVertex, WeightTally};
pub use spectrum::SpectrumSampler;
