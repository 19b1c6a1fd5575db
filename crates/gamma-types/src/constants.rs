// ─────────────────────────────────────────────────────────────────────
// SCPN Gamma Source — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Internal unit system: lengths in millimetres, energies in MeV.
//! Multiply a value by its unit to store it, divide to print it.

/// Millimetre (base length unit).
pub const MM: f64 = 1.0;

/// Centimetre.
pub const CM: f64 = 10.0 * MM;

/// Metre.
pub const M: f64 = 1000.0 * MM;

/// MeV (base energy unit). The radiation table stores energies in MeV.
pub const MEV: f64 = 1.0;

/// keV.
pub const KEV: f64 = 1.0e-3 * MEV;

/// eV.
pub const EV: f64 = 1.0e-6 * MEV;

/// Radiation-table type codes kept on import: gamma, X-ray, annihilation.
pub const PHOTON_TYPE_CODES: [u32; 3] = [1, 2, 3];

/// Decay-index token that terminates the daughter list.
pub const DAUGHTER_LIST_TERMINATOR: &str = "0";

/// Daughter slots per decay-index line.
pub const MAX_DAUGHTERS: usize = 4;

/// Fields between the decay mode and the first daughter.
pub const DECAY_INDEX_SKIPPED_FIELDS: usize = 4;

/// Default location of the ICRP-07 decay index table.
pub const DEFAULT_DECAY_INDEX_PATH: &str = "../ICRP07DATA/ICRP-07.NDX";

/// Default location of the ICRP-07 radiation table.
pub const DEFAULT_RADIATION_PATH: &str = "../ICRP07DATA/ICRP-07.RAD";
