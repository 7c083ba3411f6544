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
use super::super::{Direction, Domain, GenerationCount, PointId, Strands, DIRECTIONS};

/// Identifier of a helix: the index of its double helix and its direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HelixId {
    pub double_helix: usize,
    pub direction: Direction,
}

impl HelixId {
    pub fn new(double_helix: usize, direction: Direction) -> Self {
        Self {
            double_helix,
            direction,
        }
    }

    /// The other helix of the same double helix.
    pub fn sibling(&self) -> Self {
        Self {
            direction: self.direction.inverse(),
            ..*self
        }
    }
}

/// The side view coordinates of the slots of a helix.
#[derive(Clone, Debug, PartialEq)]
pub struct Helix {
    pub direction: Direction,
    pub double_helix: usize,
    pub x_coords: Vec<f64>,
    pub z_coords: Vec<f64>,
    pub angles: Vec<f64>,
    /// NEMids of this helix that overlap a NEMid of the previous domain.
    pub left_joint_points: Vec<PointId>,
    /// NEMids of this helix that overlap a NEMid of the next domain.
    pub right_joint_points: Vec<PointId>,
}

impl Helix {
    pub fn new(direction: Direction, double_helix: usize, size: usize) -> Self {
        Self {
            direction,
            double_helix,
            x_coords: vec![0.; size],
            z_coords: vec![0.; size],
            angles: vec![0.; size],
            left_joint_points: Vec::new(),
            right_joint_points: Vec::new(),
        }
    }

    pub fn id(&self) -> HelixId {
        HelixId::new(self.double_helix, self.direction)
    }

    pub fn len(&self) -> usize {
        self.x_coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x_coords.is_empty()
    }

    pub(crate) fn set_coords(&mut self, x_coords: Vec<f64>, z_coords: Vec<f64>, angles: Vec<f64>) {
        self.x_coords = x_coords;
        self.z_coords = z_coords;
        self.angles = angles;
    }

    pub(crate) fn clear_joints(&mut self) {
        self.left_joint_points.clear();
        self.right_joint_points.clear();
    }
}

/// The two helices of a domain.
#[derive(Clone, Debug, PartialEq)]
pub struct DoubleHelix {
    pub domain: Domain,
    /// Indexed by `Direction::index`.
    helices: [Helix; 2],
}

impl DoubleHelix {
    pub fn new(domain: Domain) -> Self {
        let helix = |direction| {
            Helix::new(
                direction,
                domain.index,
                domain.counts(direction).helix_size(),
            )
        };
        Self {
            domain,
            helices: [helix(Direction::Up), helix(Direction::Down)],
        }
    }

    pub fn helix(&self, direction: Direction) -> &Helix {
        &self.helices[direction.index()]
    }

    pub fn helix_mut(&mut self, direction: Direction) -> &mut Helix {
        &mut self.helices[direction.index()]
    }

    pub fn helices(&self) -> impl Iterator<Item = &Helix> {
        self.helices.iter()
    }

    pub(crate) fn helices_mut(&mut self) -> impl Iterator<Item = &mut Helix> {
        self.helices.iter_mut()
    }

    pub fn up_helix(&self) -> &Helix {
        self.helix(Direction::Up)
    }

    pub fn down_helix(&self) -> &Helix {
        self.helix(Direction::Down)
    }

    /// The helix whose direction is the left joint of the domain.
    pub fn zeroed_helix(&self) -> &Helix {
        self.helix(self.domain.left_helix_joint)
    }

    pub fn other_helix(&self) -> &Helix {
        self.helix(self.domain.left_helix_joint.inverse())
    }

    pub fn left_helix(&self) -> &Helix {
        self.helix(self.domain.left_helix_joint)
    }

    pub fn right_helix(&self) -> &Helix {
        self.helix(self.domain.right_helix_joint)
    }

    pub fn counts(&self, direction: Direction) -> GenerationCount {
        self.domain.counts(direction)
    }

    pub fn left_helix_joint_points(&self) -> Vec<PointId> {
        self.joint_points(|h| &h.left_joint_points)
    }

    pub fn right_helix_joint_points(&self) -> Vec<PointId> {
        self.joint_points(|h| &h.right_joint_points)
    }

    fn joint_points<F>(&self, list: F) -> Vec<PointId>
    where
        F: Fn(&Helix) -> &Vec<PointId>,
    {
        let mut ret: Vec<PointId> = Vec::new();
        for direction in DIRECTIONS.iter() {
            for p in list(self.helix(*direction)).iter() {
                if !ret.contains(p) {
                    ret.push(*p);
                }
            }
        }
        ret
    }

    /// Whether at least `threshold` NEMids of the left joint are active junctions.
    pub fn left_joint_is_stable(&self, strands: &Strands, threshold: usize) -> bool {
        count_junctions(strands, &self.left_helix_joint_points()) >= threshold
    }

    /// Whether at least `threshold` NEMids of the right joint are active junctions.
    pub fn right_joint_is_stable(&self, strands: &Strands, threshold: usize) -> bool {
        count_junctions(strands, &self.right_helix_joint_points()) >= threshold
    }
}

fn count_junctions(strands: &Strands, points: &[PointId]) -> usize {
    points
        .iter()
        .filter_map(|p| strands.point(*p))
        .filter(|p| p.as_nemid().map(|n| n.junction).unwrap_or(false))
        .count()
}
