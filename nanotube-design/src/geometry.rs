/*
nanotube, a design tool for DNA nanotube lattices.
    Copyright (C) 2023  The nanotube developers

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU General Public License as published by
    the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU General Public License for more details.

    You should have received a copy of the GNU General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/
//! Geometry of the side view of a lattice.

use super::utils::round_to;
use super::{DesignError, Direction, Domain, NucleicAcidProfile, DIRECTIONS};
use ahash::RandomState;
use ordered_float::OrderedFloat;
use std::collections::HashMap;
use std::sync::Arc;

/// Map an angle around a domain onto the side view abscissa `[domain.index, domain.index + 1]`.
pub fn x_coord_from_angle(angle: f64, domain: &Domain) -> f64 {
    let angle = angle.rem_euclid(360.);
    let x = if angle < domain.theta_e() {
        angle / domain.theta_e()
    } else {
        (360. - angle) / domain.theta_i()
    };
    x + domain.index as f64
}

/// Reduce the height at which a domain must start modulo a full period, keeping it non
/// positive.
pub fn lower_alignment(z_coord: f64, profile: &NucleicAcidProfile) -> f64 {
    let period = profile.z_b() * profile.bases as f64;
    let reduced = z_coord.rem_euclid(period);
    if reduced > 0. {
        reduced - period
    } else {
        reduced
    }
}

/// The starting height and angle of the zeroed helix of a domain aligned on `aligned_z`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Alignment {
    pub aligned_z: f64,
    pub initial_z: f64,
    /// Number of base steps between `aligned_z` and `initial_z`.
    pub shifts: f64,
    pub initial_angle: f64,
}

impl Alignment {
    pub fn new(aligned_z: f64, profile: &NucleicAcidProfile) -> Self {
        let z_b = profile.z_b();
        let initial_z = aligned_z.rem_euclid(z_b);
        let shifts = ((initial_z - aligned_z) / z_b).round();
        Self {
            aligned_z,
            initial_z,
            shifts,
            initial_angle: shifts * profile.theta_b(),
        }
    }

    /// Starting angle and height of the zeroed helix, before windowing.
    pub fn zeroed_origin(&self) -> (f64, f64) {
        (self.initial_angle, self.initial_z)
    }

    /// Starting angle and height of the helix of direction `direction` paired to the zeroed
    /// helix, before windowing.
    pub fn other_origin(&self, direction: Direction, profile: &NucleicAcidProfile) -> (f64, f64) {
        let modifier = if direction == Direction::Down { -1. } else { 1. };
        (
            self.shifts * profile.theta_b() - modifier * profile.mate_angle,
            self.aligned_z + self.shifts * profile.z_b() - modifier * profile.mate_height,
        )
    }
}

/// Height of the first maximum of the abscissa among NEMids, given the coordinates of a helix
/// whose odd slots are NEMids. Only the first `window` NEMids are looked at.
pub(crate) fn z_of_rightmost_nemid(
    x_coords: &[f64],
    z_coords: &[f64],
    window: usize,
) -> Option<f64> {
    let candidates: Vec<(usize, f64)> = x_coords
        .iter()
        .skip(1)
        .step_by(2)
        .take(window)
        .copied()
        .enumerate()
        .collect();
    // Reversed so that ties resolve to the first maximum.
    let (k, _) = candidates
        .into_iter()
        .rev()
        .max_by_key(|(_, x)| OrderedFloat(*x))?;
    z_coords.get(2 * k + 1).copied()
}

/// Key of the side view sample table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SampleKey {
    /// Number of samples per helix.
    pub count: usize,
    /// Number of decimals kept on the coordinates.
    pub round_to: u32,
    /// Sample NEMids if true, nucleosides otherwise.
    pub nemid: bool,
}

/// Samples of both helices of a domain.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HelixSamples {
    pub angles: Vec<f64>,
    pub x_coords: Vec<f64>,
    pub z_coords: Vec<f64>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DomainSamples {
    /// Indexed by `Direction::index`.
    pub helices: [HelixSamples; 2],
}

impl DomainSamples {
    pub fn helix(&self, direction: Direction) -> &HelixSamples {
        &self.helices[direction.index()]
    }
}

/// Memoized side view samples of a lattice.
///
/// The table must be invalidated whenever the domains or the profile it was computed from
/// change.
#[derive(Clone, Debug, Default)]
pub struct SampleCache {
    table: HashMap<SampleKey, Arc<Vec<DomainSamples>>, RandomState>,
}

impl SampleCache {
    pub fn get_or_compute(
        &mut self,
        profile: &NucleicAcidProfile,
        domains: &[Domain],
        key: SampleKey,
    ) -> Result<Arc<Vec<DomainSamples>>, DesignError> {
        if let Some(samples) = self.table.get(&key) {
            return Ok(samples.clone());
        }
        let samples = Arc::new(sample_domains(profile, domains, key)?);
        self.table.insert(key, samples.clone());
        Ok(samples)
    }

    pub fn invalidate(&mut self) {
        if !self.table.is_empty() {
            log::debug!("Invalidating {} side view samples", self.table.len());
        }
        self.table.clear();
    }

    pub fn contains(&self, key: &SampleKey) -> bool {
        self.table.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

fn sample_domains(
    profile: &NucleicAcidProfile,
    domains: &[Domain],
    key: SampleKey,
) -> Result<Vec<DomainSamples>, DesignError> {
    let needed = profile.bases as usize;
    if domains.len() > 1 && key.count < needed {
        return Err(DesignError::InsufficientSample {
            count: key.count,
            needed,
        });
    }
    let (theta_b, z_b) = (profile.theta_b(), profile.z_b());
    // Nucleosides sit half a step below NEMids.
    let (angle_offset, z_offset) = if key.nemid {
        (0., 0.)
    } else {
        (theta_b / 2., z_b / 2.)
    };
    let mut ret: Vec<DomainSamples> = Vec::with_capacity(domains.len());
    for (i, domain) in domains.iter().enumerate() {
        let aligned_z = match i.checked_sub(1).and_then(|p| ret.get(p).zip(domains.get(p))) {
            None => 0.,
            Some((previous, previous_domain)) => {
                let right = previous.helix(previous_domain.right_helix_joint);
                let k = right
                    .x_coords
                    .iter()
                    .copied()
                    .enumerate()
                    .rev()
                    .max_by_key(|(_, x)| OrderedFloat(*x))
                    .map(|(k, _)| k);
                let z = k.and_then(|k| right.z_coords.get(k).copied()).ok_or(
                    DesignError::InsufficientSample {
                        count: key.count,
                        needed,
                    },
                )?;
                lower_alignment(z, profile)
            }
        };
        let alignment = Alignment::new(aligned_z, profile);
        let mut samples = DomainSamples::default();
        for direction in DIRECTIONS.iter().copied() {
            let (angle, z) = if direction == domain.left_helix_joint {
                alignment.zeroed_origin()
            } else {
                alignment.other_origin(direction, profile)
            };
            let helix = &mut samples.helices[direction.index()];
            for k in 0..key.count {
                let angle = angle - angle_offset + k as f64 * theta_b;
                let z = z - z_offset + k as f64 * z_b;
                helix.angles.push(angle.rem_euclid(360.));
                helix
                    .x_coords
                    .push(round_to(x_coord_from_angle(angle, domain), key.round_to));
                helix.z_coords.push(round_to(z, key.round_to));
            }
        }
        ret.push(samples);
    }
    Ok(ret)
}
