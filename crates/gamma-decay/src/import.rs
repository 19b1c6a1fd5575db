// ─────────────────────────────────────────────────────────────────────
// SCPN Gamma Source — ICRP-07 Table Import
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Readers for the two ICRP-07 text tables.
//!
//! * `.NDX` decay index: one header line, then one nuclide per line:
//!   `name half-life mode f f f f (daughter f ratio){0,4}`, where a literal
//!   `0` in a daughter slot ends the list early.
//! * `.RAD` radiation table: a line starting with an uppercase letter names
//!   the block of numeric lines that follows it. Each numeric line is
//!   `type-code yield energy[MeV] ...`; only photon codes are kept.
//!
//! Malformed lines degrade to defaults rather than failing the import. A file
//! that cannot be opened yields an empty table and a warning.

use gamma_types::constants::{
    DAUGHTER_LIST_TERMINATOR, DECAY_INDEX_SKIPPED_FIELDS, MAX_DAUGHTERS, MEV, PHOTON_TYPE_CODES,
};
use gamma_types::records::{Daughter, DecayRecord, NuclideId, RadiationRecord};
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub type DecayTable = HashMap<NuclideId, DecayRecord>;
pub type RadiationTable = HashMap<NuclideId, RadiationRecord>;

/// Parse one decay-index data line. Returns `None` for lines with no name.
pub fn parse_decay_line(line: &str) -> Option<(NuclideId, DecayRecord)> {
    let mut tokens = line.split_whitespace();
    let name = NuclideId::from(tokens.next()?);

    let mut record = DecayRecord {
        half_life: tokens.next().unwrap_or_default().to_string(),
        decay_mode: tokens.next().unwrap_or_default().to_string(),
        daughters: Vec::new(),
    };

    for _ in 0..DECAY_INDEX_SKIPPED_FIELDS {
        tokens.next();
    }

    for _ in 0..MAX_DAUGHTERS {
        let daughter = match tokens.next() {
            Some(token) if token != DAUGHTER_LIST_TERMINATOR => token,
            _ => break,
        };
        tokens.next();
        let branch_ratio = tokens
            .next()
            .and_then(|t| t.parse::<f64>().ok())
            .unwrap_or(0.0);
        record.daughters.push(Daughter {
            id: NuclideId::from(daughter),
            branch_ratio,
        });
    }

    Some((name, record))
}

/// Parse a whole decay index. The first line is a header and is skipped.
/// A repeated nuclide overwrites the earlier entry.
pub fn parse_decay_index<R: BufRead>(reader: R) -> io::Result<DecayTable> {
    let mut table = DecayTable::new();
    for line in reader.lines().skip(1) {
        if let Some((name, record)) = parse_decay_line(&line?) {
            table.insert(name, record);
        }
    }
    Ok(table)
}

/// One classified radiation-table line.
#[derive(Debug, Clone, PartialEq)]
pub enum RadiationLine {
    /// Starts a new block for this nuclide.
    Name(NuclideId),
    /// A kept photon line: energy [MeV] and yield per decay.
    Photon { energy: f64, photon_yield: f64 },
    /// Non-photon emission, blank or unreadable line.
    Ignored,
}

impl RadiationLine {
    pub fn classify(line: &str) -> Self {
        if line.as_bytes().first().is_some_and(u8::is_ascii_uppercase) {
            return match line.split_whitespace().next() {
                Some(name) => RadiationLine::Name(NuclideId::from(name)),
                None => RadiationLine::Ignored,
            };
        }

        let mut tokens = line.split_whitespace();
        match tokens.next().and_then(|t| t.parse::<u32>().ok()) {
            Some(code) if PHOTON_TYPE_CODES.contains(&code) => {}
            _ => return RadiationLine::Ignored,
        }

        let mut number = || {
            tokens
                .next()
                .and_then(|t| t.parse::<f64>().ok())
                .unwrap_or(0.0)
        };
        let photon_yield = number();
        let energy = number() * MEV;
        RadiationLine::Photon {
            energy,
            photon_yield,
        }
    }
}

/// Streams `(name, record)` blocks out of radiation-table lines with one name
/// of lookahead: a block's body is read until the next name line, that name
/// is buffered, and the block is emitted under the previously buffered name.
///
/// Lines before the first name line belong to no nuclide and are dropped. The
/// final block is emitted at end of input, even when its body is empty.
pub struct RadiationBlocks<I> {
    lines: I,
    pending: Option<NuclideId>,
    exhausted: bool,
}

impl<I> RadiationBlocks<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    pub fn new(lines: I) -> Self {
        RadiationBlocks {
            lines,
            pending: None,
            exhausted: false,
        }
    }

    /// Read body lines up to and including the next name line.
    fn read_body(&mut self) -> io::Result<(RadiationRecord, Option<NuclideId>)> {
        let mut body = RadiationRecord::new();
        for line in self.lines.by_ref() {
            match RadiationLine::classify(&line?) {
                RadiationLine::Name(next) => return Ok((body, Some(next))),
                RadiationLine::Photon {
                    energy,
                    photon_yield,
                } => body.push(energy, photon_yield),
                RadiationLine::Ignored => {}
            }
        }
        self.exhausted = true;
        Ok((body, None))
    }
}

impl<I> Iterator for RadiationBlocks<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = io::Result<(NuclideId, RadiationRecord)>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.exhausted {
            let (body, next_name) = match self.read_body() {
                Ok(read) => read,
                Err(e) => {
                    self.exhausted = true;
                    return Some(Err(e));
                }
            };
            let current = std::mem::replace(&mut self.pending, next_name);
            if let Some(name) = current {
                return Some(Ok((name, body)));
            }
        }
        None
    }
}

/// Parse a whole radiation table. A repeated nuclide overwrites the earlier
/// block.
pub fn parse_radiation<R: BufRead>(reader: R) -> io::Result<RadiationTable> {
    let mut table = RadiationTable::new();
    for block in RadiationBlocks::new(reader.lines()) {
        let (name, record) = block?;
        table.insert(name, record);
    }
    Ok(table)
}

fn load_table<T: Default>(
    path: &Path,
    label: &str,
    parse: impl FnOnce(BufReader<File>) -> io::Result<T>,
) -> T {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            log::warn!("There is no {} at {} ({e})", label, path.display());
            return T::default();
        }
    };
    match parse(BufReader::new(file)) {
        Ok(table) => table,
        Err(e) => {
            log::warn!("Failed to read {} {}: {e}", label, path.display());
            T::default()
        }
    }
}

/// Load the decay index; a missing or unreadable file gives an empty table.
pub fn load_decay_index(path: impl AsRef<Path>) -> DecayTable {
    let table = load_table(path.as_ref(), "decay index", parse_decay_index);
    log::info!(
        "Imported {} decay records from {}",
        table.len(),
        path.as_ref().display()
    );
    table
}

/// Load the radiation table; a missing or unreadable file gives an empty table.
pub fn load_radiation(path: impl AsRef<Path>) -> RadiationTable {
    let table = load_table(path.as_ref(), "radiation table", parse_radiation);
    log::info!(
        "Imported {} radiation records from {}",
        table.len(),
        path.as_ref().display()
    );
    table
}
