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
//! The domains of a lattice, their replication around the lattice and its top view.

use super::utils::{default_symmetry, distance, is_false};
use super::{DesignError, Direction, NucleicAcidProfile, CLOSED_THRESHOLD};

mod domain;
pub use domain::*;
mod subunit;
pub use subunit::*;

/// The domains of a lattice, described as a template subunit replicated `symmetry` times.
#[derive(Clone, Debug, PartialEq)]
pub struct Domains {
    profile: NucleicAcidProfile,
    pub subunit: Subunit,
    pub symmetry: usize,
    /// If true, and if the joints at both ends of the template match, every other replica has
    /// its joints inverted.
    pub antiparallel: bool,
}

/// Serializable description of a lattice.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DomainsParameters {
    #[serde(default)]
    pub profile: NucleicAcidProfile,
    pub domains: Vec<DomainDescriptor>,
    #[serde(default = "default_symmetry")]
    pub symmetry: usize,
    #[serde(default, skip_serializing_if = "is_false")]
    pub antiparallel: bool,
}

/// Serializable description of a template domain.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct DomainDescriptor {
    #[serde(rename = "m")]
    pub theta_m_multiple: i32,
    pub left_helix_joint: Direction,
    pub right_helix_joint: Direction,
    #[serde(default)]
    pub up_helix_count: GenerationCount,
    #[serde(default)]
    pub down_helix_count: GenerationCount,
}

impl DomainDescriptor {
    pub fn from_domain(domain: &Domain) -> Self {
        Self {
            theta_m_multiple: domain.theta_m_multiple,
            left_helix_joint: domain.left_helix_joint,
            right_helix_joint: domain.right_helix_joint,
            up_helix_count: domain.up_helix_count,
            down_helix_count: domain.down_helix_count,
        }
    }

    pub fn to_domain(&self, profile: NucleicAcidProfile) -> Domain {
        Domain::new(
            profile,
            self.theta_m_multiple,
            self.left_helix_joint,
            self.right_helix_joint,
            self.up_helix_count,
            self.down_helix_count,
        )
    }
}

impl Domains {
    /// Build a container whose template subunit holds `template`.
    pub fn new(
        profile: NucleicAcidProfile,
        template: Vec<Domain>,
        symmetry: usize,
        antiparallel: bool,
    ) -> Self {
        let domains = template
            .into_iter()
            .enumerate()
            .map(|(index, d)| Domain { index, profile, ..d })
            .collect();
        Self {
            profile,
            subunit: Subunit::new(domains, true),
            symmetry,
            antiparallel,
        }
    }

    pub fn from_parameters(parameters: &DomainsParameters) -> Result<Self, DesignError> {
        if parameters.symmetry == 0 {
            return Err(DesignError::MalformedState(
                "the symmetry of a lattice must be at least 1".to_owned(),
            ));
        }
        let template = parameters
            .domains
            .iter()
            .map(|d| d.to_domain(parameters.profile))
            .collect();
        Ok(Self::new(
            parameters.profile,
            template,
            parameters.symmetry,
            parameters.antiparallel,
        ))
    }

    pub fn to_parameters(&self) -> DomainsParameters {
        DomainsParameters {
            profile: self.profile,
            domains: self
                .subunit
                .domains
                .iter()
                .map(DomainDescriptor::from_domain)
                .collect(),
            symmetry: self.symmetry,
            antiparallel: self.antiparallel,
        }
    }

    /// A small open lattice of two domains.
    pub fn dummy(profile: NucleicAcidProfile) -> Self {
        let count = GenerationCount::new(1, 1, 1);
        let domain = Domain::new(profile, 4, Direction::Up, Direction::Up, count, count);
        Self::new(profile, vec![domain, domain], 1, false)
    }

    pub fn profile(&self) -> &NucleicAcidProfile {
        &self.profile
    }

    pub fn set_profile(&mut self, profile: NucleicAcidProfile) {
        self.profile = profile;
        for d in self.subunit.domains.iter_mut() {
            d.profile = profile;
        }
    }

    /// The replicas of the template subunit, the template first.
    pub fn subunits(&self) -> Vec<Subunit> {
        let invert_odd = self.antiparallel && self.subunit.joints_match();
        let mut ret = Vec::with_capacity(self.symmetry);
        for i in 0..self.symmetry {
            if i == 0 {
                ret.push(self.subunit.clone());
            } else if invert_odd && i % 2 == 1 {
                ret.push(self.subunit.inverted());
            } else {
                ret.push(self.subunit.replica());
            }
        }
        ret
    }

    /// Every domain of the lattice, indexed in order.
    pub fn domains(&self) -> Vec<Domain> {
        self.subunits()
            .into_iter()
            .flat_map(|s| s.domains.into_iter())
            .enumerate()
            .map(|(index, d)| Domain {
                index,
                profile: self.profile,
                ..d
            })
            .collect()
    }

    pub fn count(&self) -> usize {
        self.symmetry * self.subunit.count()
    }

    /// Make the full list of domains the template, with a symmetry of 1.
    pub fn destroy_symmetry(&mut self) {
        let domains = self.domains();
        self.subunit = Subunit::new(domains, true);
        self.symmetry = 1;
        self.antiparallel = false;
    }

    /// Turn the corner made by domains `first` and `second` inside out, adjusting their
    /// neighbours so that the rest of the lattice is unchanged.
    ///
    /// The symmetry of the lattice is destroyed.
    pub fn invert(&mut self, first: usize, second: usize) {
        self.destroy_symmetry();
        let n = self.subunit.count();
        if n == 0 {
            return;
        }
        let b = self.profile.bases as i32;
        let (first, second) = (first % n, second % n);
        let before = (first + n - 1) % n;
        let after = (second + 1) % n;
        let m = |i: usize| self.subunit.domains[i].theta_m_multiple;
        let (m_before, m_first, m_second, m_after) = (m(before), m(first), m(second), m(after));

        let domains = &mut self.subunit.domains;
        domains[before].theta_m_multiple = m_before + m_first + m_second - b;
        domains[first].theta_m_multiple = b - m_second;
        domains[second].theta_m_multiple = b - m_first;
        domains[after].theta_m_multiple = m_after + m_first + m_second - b;
    }

    /// Positions of the domains seen from the top.
    ///
    /// The first point is the sentinel entry point, the last one is the point reached after
    /// walking around the whole lattice.
    pub fn top_view(&self) -> Vec<(f64, f64)> {
        let domains = self.domains();
        let count = domains.len();
        if count == 0 {
            return Vec::new();
        }
        let d = self.profile.diameter;
        let theta_i = |i: usize| domains[i % count].theta_i();
        let entry = (180. + theta_i(0)).to_radians();

        let mut ret = Vec::with_capacity(count + 2);
        ret.push((-d * entry.cos(), -d * entry.sin()));
        ret.push((0., 0.));
        ret.push((d, 0.));
        let mut heading = 180. - theta_i(1);
        for idx in 3..(count + 2) {
            let (x, y) = ret[idx - 1];
            let angle = f64::to_radians(heading);
            ret.push((x + d * angle.cos(), y + d * angle.sin()));
            if idx - 1 < count {
                heading += 180. - theta_i(idx - 1);
            }
        }
        ret
    }

    /// Whether walking around the lattice brings back to the starting point.
    pub fn closed(&self) -> bool {
        let view = self.top_view();
        match (view.first(), view.get(self.count())) {
            (Some(start), Some(end)) => distance(*start, *end) < CLOSED_THRESHOLD,
            _ => false,
        }
    }
}
