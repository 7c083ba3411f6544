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
use super::Domain;

/// A run of consecutive domains, replicated around a lattice.
#[derive(Clone, Debug, PartialEq)]
pub struct Subunit {
    pub domains: Vec<Domain>,
    /// The template subunit is the one that gets edited, the other ones are copies of it.
    pub template: bool,
}

impl Subunit {
    pub fn new(domains: Vec<Domain>, template: bool) -> Self {
        Self { domains, template }
    }

    pub fn count(&self) -> usize {
        self.domains.len()
    }

    /// Grow or shrink the subunit to `count` domains.
    ///
    /// New domains copy the angle and generation counts of the last domain, and both of their
    /// joints are the inverse of its right joint.
    pub fn set_count(&mut self, count: usize) {
        if count <= self.domains.len() {
            self.domains.truncate(count);
            return;
        }
        let mut last = if let Some(d) = self.domains.last() {
            *d
        } else {
            log::warn!("Cannot grow an empty subunit");
            return;
        };
        while self.domains.len() < count {
            let joint = last.right_helix_joint.inverse();
            last = Domain {
                index: last.index + 1,
                left_helix_joint: joint,
                right_helix_joint: joint,
                ..last
            };
            self.domains.push(last);
        }
    }

    /// A non template copy of the subunit with every joint flipped.
    pub fn inverted(&self) -> Self {
        Self {
            domains: self.domains.iter().map(Domain::inverted).collect(),
            template: false,
        }
    }

    /// A non template copy of the subunit.
    pub fn replica(&self) -> Self {
        Self {
            domains: self.domains.clone(),
            template: false,
        }
    }

    /// Whether the first left joint and the last right joint are equal.
    pub fn joints_match(&self) -> bool {
        match (self.domains.first(), self.domains.last()) {
            (Some(first), Some(last)) => first.left_helix_joint == last.right_helix_joint,
            _ => false,
        }
    }
}
