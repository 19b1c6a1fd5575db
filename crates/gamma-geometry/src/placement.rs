// ─────────────────────────────────────────────────────────────────────
// SCPN Gamma Source — Placements
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Named placements of solids in a mother/daughter tree rooted at the world.
//!
//! A placement maps its solid's local frame into its mother's frame with
//! `p_mother = R · p_local + t`. The world placement has no mother and its
//! own transform is never applied.

use crate::solid::Solid;
use crate::Vec3;
use gamma_types::error::{SourceError, SourceResult};
use nalgebra::Rotation3;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Placement {
    name: String,
    solid: Arc<dyn Solid>,
    rotation: Rotation3<f64>,
    translation: Vec3,
    mother: Option<String>,
}

impl Placement {
    /// Top-level placement with no mother.
    pub fn world(name: impl Into<String>, solid: Arc<dyn Solid>) -> Self {
        Placement {
            name: name.into(),
            solid,
            rotation: Rotation3::identity(),
            translation: Vec3::zeros(),
            mother: None,
        }
    }

    /// Placement inside `mother`, rotated then translated.
    pub fn new(
        name: impl Into<String>,
        solid: Arc<dyn Solid>,
        mother: impl Into<String>,
        rotation: Rotation3<f64>,
        translation: Vec3,
    ) -> Self {
        Placement {
            name: name.into(),
            solid,
            rotation,
            translation,
            mother: Some(mother.into()),
        }
    }

    /// Unrotated placement inside `mother` at `translation`.
    pub fn translated(
        name: impl Into<String>,
        solid: Arc<dyn Solid>,
        mother: impl Into<String>,
        translation: Vec3,
    ) -> Self {
        Placement::new(name, solid, mother, Rotation3::identity(), translation)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn solid(&self) -> &dyn Solid {
        self.solid.as_ref()
    }

    pub fn rotation(&self) -> &Rotation3<f64> {
        &self.rotation
    }

    pub fn translation(&self) -> &Vec3 {
        &self.translation
    }

    pub fn mother(&self) -> Option<&str> {
        self.mother.as_deref()
    }

    /// Map a point from this placement's frame into its mother's frame.
    pub fn to_mother(&self, local: &Vec3) -> Vec3 {
        self.rotation * local + self.translation
    }
}

/// Registry of placements addressed by name.
///
/// Mothers must be registered before their daughters and names are unique,
/// so every mother chain ends at a world placement.
#[derive(Debug, Clone, Default)]
pub struct VolumeStore {
    volumes: HashMap<String, Placement>,
}

impl VolumeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, placement: Placement) -> SourceResult<()> {
        if self.volumes.contains_key(placement.name()) {
            return Err(SourceError::ConfigError(format!(
                "volume {} is already placed",
                placement.name()
            )));
        }
        if let Some(mother) = placement.mother() {
            if !self.volumes.contains_key(mother) {
                return Err(SourceError::UnknownVolume(mother.to_string()));
            }
        }
        self.volumes.insert(placement.name().to_string(), placement);
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, placement: Placement) -> SourceResult<Self> {
        self.insert(placement)?;
        Ok(self)
    }

    pub fn volume(&self, name: &str) -> Option<&Placement> {
        self.volumes.get(name)
    }

    pub fn parent(&self, placement: &Placement) -> Option<&Placement> {
        placement.mother().and_then(|mother| self.volume(mother))
    }

    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    /// Map a point in `placement`'s local frame to the world frame by applying
    /// each placement's rotation and translation on the way up to the world.
    pub fn to_world(&self, placement: &Placement, local: &Vec3) -> Vec3 {
        let mut point = *local;
        let mut current = placement;
        while let Some(mother) = current.mother() {
            point = current.to_mother(&point);
            match self.volume(mother) {
                Some(next) => current = next,
                None => {
                    log::warn!(
                        "Placement {} refers to missing mother {mother}",
                        current.name()
                    );
                    break;
                }
            }
        }
        point
    }
}
