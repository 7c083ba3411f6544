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
//! The double helix engine: computes the side view of every helix of a lattice and turns the
//! helices into strands.

use super::geometry::{
    lower_alignment, x_coord_from_angle, z_of_rightmost_nemid, Alignment, DomainSamples,
    SampleCache, SampleKey,
};
use super::{DesignError, Direction, Domain, Domains, NucleicAcidProfile, Strands};
use std::sync::Arc;

mod double_helix;
pub use double_helix::*;

/// The double helices of a lattice, one per domain.
#[derive(Clone, Debug)]
pub struct DoubleHelices {
    profile: NucleicAcidProfile,
    domains: Domains,
    double_helices: Vec<DoubleHelix>,
    samples: SampleCache,
}

struct ComputedHelix {
    x_coords: Vec<f64>,
    z_coords: Vec<f64>,
    angles: Vec<f64>,
}

impl ComputedHelix {
    fn generate(start_angle: f64, start_z: f64, size: usize, domain: &Domain) -> Self {
        let profile = &domain.profile;
        let (angle_step, z_step) = (profile.theta_b() / 2., profile.z_b() / 2.);
        let angles: Vec<f64> = (0..size)
            .map(|k| start_angle + k as f64 * angle_step)
            .collect();
        let z_coords = (0..size).map(|k| start_z + k as f64 * z_step).collect();
        let x_coords = angles
            .iter()
            .map(|a| x_coord_from_angle(*a, domain))
            .collect();
        Self {
            x_coords,
            z_coords,
            angles,
        }
    }
}

impl DoubleHelices {
    pub fn new(domains: Domains) -> Self {
        let profile = *domains.profile();
        let double_helices = domains
            .domains()
            .into_iter()
            .map(DoubleHelix::new)
            .collect();
        Self {
            profile,
            domains,
            double_helices,
            samples: SampleCache::default(),
        }
    }

    /// Build the double helices of `domains`, generated with `profile`.
    pub fn from_domains(mut domains: Domains, profile: NucleicAcidProfile) -> Self {
        domains.set_profile(profile);
        Self::new(domains)
    }

    pub fn profile(&self) -> &NucleicAcidProfile {
        &self.profile
    }

    pub fn domains(&self) -> &Domains {
        &self.domains
    }

    /// Edit the domains. The helices are rebuilt from scratch and must be computed again.
    pub fn mutate_domains<F>(&mut self, mutation: F)
    where
        F: FnOnce(&mut Domains),
    {
        mutation(&mut self.domains);
        self.rebuild();
    }

    /// Change the profile of the lattice. The helices are rebuilt from scratch and must be
    /// computed again.
    pub fn set_profile(&mut self, profile: NucleicAcidProfile) {
        self.domains.set_profile(profile);
        self.profile = profile;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.double_helices = self
            .domains
            .domains()
            .into_iter()
            .map(DoubleHelix::new)
            .collect();
        self.samples.invalidate();
    }

    /// Memoized side view samples of the lattice.
    pub fn side_view_samples(
        &mut self,
        count: usize,
        round_to: u32,
        nemid: bool,
    ) -> Result<Arc<Vec<DomainSamples>>, DesignError> {
        let domains: Vec<Domain> = self.double_helices.iter().map(|d| d.domain).collect();
        self.samples.get_or_compute(
            &self.profile,
            &domains,
            SampleKey {
                count,
                round_to,
                nemid,
            },
        )
    }

    pub fn len(&self) -> usize {
        self.double_helices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.double_helices.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DoubleHelix> {
        self.double_helices.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DoubleHelix> {
        self.double_helices.iter()
    }

    pub fn helix(&self, id: HelixId) -> Option<&Helix> {
        self.get(id.double_helix).map(|d| d.helix(id.direction))
    }

    pub(crate) fn helix_mut(&mut self, id: HelixId) -> Option<&mut Helix> {
        self.double_helices
            .get_mut(id.double_helix)
            .map(|d| d.helix_mut(id.direction))
    }

    /// Every helix, in the order (domain 0 up, domain 0 down, domain 1 up, ...).
    pub fn helices(&self) -> impl Iterator<Item = &Helix> {
        self.double_helices.iter().flat_map(|d| d.helices())
    }

    /// Compute the coordinates of every slot of every helix.
    ///
    /// Each domain is aligned on the rightmost NEMid of the right joint helix of the previous
    /// domain. On failure the helices are left untouched.
    pub fn compute(&mut self) -> Result<(), DesignError> {
        let profile = self.profile;
        let (theta_b, z_b) = (profile.theta_b(), profile.z_b());
        let window = 2 * profile.bases as usize + 1;
        let mut computed: Vec<[ComputedHelix; 2]> = Vec::with_capacity(self.double_helices.len());

        for (i, double_helix) in self.double_helices.iter().enumerate() {
            let domain = &double_helix.domain;
            let aligned_z = if i == 0 {
                0.
            } else {
                let previous_domain = &self.double_helices[i - 1].domain;
                let right = &computed[i - 1][previous_domain.right_helix_joint.index()];
                let z = z_of_rightmost_nemid(&right.x_coords, &right.z_coords, window)
                    .ok_or(DesignError::InsufficientSample {
                        count: right.x_coords.len(),
                        needed: 2,
                    })?;
                lower_alignment(z, &profile)
            };
            let alignment = Alignment::new(aligned_z, &profile);
            log::debug!(
                "domain {}: aligned z {:.5}, initial z {:.5}, {} shifts, initial angle {:.5}",
                i,
                alignment.aligned_z,
                alignment.initial_z,
                alignment.shifts,
                alignment.initial_angle
            );

            let zeroed = domain.left_helix_joint;
            let generate = |direction: Direction| {
                let counts = domain.counts(direction);
                let bottom = counts.bottom as f64;
                let (angle, z) = if direction == zeroed {
                    let (angle, z) = alignment.zeroed_origin();
                    (
                        (angle - bottom * theta_b - theta_b / 2.).rem_euclid(360.),
                        z - bottom * z_b - z_b / 2.,
                    )
                } else {
                    let (angle, z) = alignment.other_origin(direction, &profile);
                    (
                        angle - bottom * theta_b - theta_b / 2.,
                        z - bottom * z_b - z_b / 2.,
                    )
                };
                let mut helix = ComputedHelix::generate(angle, z, counts.helix_size(), domain);
                if direction == Direction::Down {
                    helix.x_coords.reverse();
                    helix.z_coords.reverse();
                    helix.angles.reverse();
                }
                helix
            };
            computed.push([generate(Direction::Up), generate(Direction::Down)]);
        }

        for (double_helix, helices) in self.double_helices.iter_mut().zip(computed.into_iter()) {
            let [up, down] = helices;
            double_helix
                .helix_mut(Direction::Up)
                .set_coords(up.x_coords, up.z_coords, up.angles);
            double_helix
                .helix_mut(Direction::Down)
                .set_coords(down.x_coords, down.z_coords, down.angles);
            for helix in double_helix.helices_mut() {
                helix.clear_joints();
            }
        }
        log::info!(
            "Computed {} double helices, lattice closed: {}",
            self.double_helices.len(),
            self.domains.closed()
        );
        Ok(())
    }

    /// Turn every helix into a strand and detect the NEMids at which strands of neighbouring
    /// domains can be joined.
    ///
    /// The joint point lists of the helices are filled with the junctable NEMids.
    pub fn strands(&mut self) -> Strands {
        let mut strands = Strands::new(self.double_helices.len());
        for double_helix in self.double_helices.iter_mut() {
            let domain = double_helix.domain.index;
            for helix in double_helix.helices_mut() {
                helix.clear_joints();
                strands.add_helix(helix, domain);
            }
        }
        let pairs = strands.detect_junctables();
        for (left, right) in pairs.iter() {
            let left_helix = strands.point(*left).and_then(|p| p.helix);
            let right_helix = strands.point(*right).and_then(|p| p.helix);
            if let Some(helix) = left_helix.and_then(|id| self.helix_mut(id)) {
                helix.right_joint_points.push(*left);
            }
            if let Some(helix) = right_helix.and_then(|id| self.helix_mut(id)) {
                helix.left_joint_points.push(*right);
            }
        }
        log::info!(
            "Built {} strands with {} junctable NEMid pairs",
            strands.len(),
            pairs.len()
        );
        strands
    }
}
