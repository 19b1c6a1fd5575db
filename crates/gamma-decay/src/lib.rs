// ─────────────────────────────────────────────────────────────────────
// SCPN Gamma Source — Gamma Decay
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! ICRP-07 decay data: table import and daughter-chain photon aggregation.

pub mod database;
pub mod import;

pub use database::DecayDatabase;
