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
use super::super::{DesignError, Direction, NucleicAcidProfile};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

/// Number of points generated below, inside and above the body of a helix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GenerationCount {
    pub bottom: usize,
    pub body: usize,
    pub top: usize,
}

impl GenerationCount {
    pub const fn new(bottom: usize, body: usize, top: usize) -> Self {
        Self { bottom, body, top }
    }

    pub fn sum(&self) -> usize {
        self.bottom + self.body + self.top
    }

    /// Number of slots of a helix generated with these counts: points alternate between
    /// nucleosides and NEMids and both ends are nucleosides.
    pub fn helix_size(&self) -> usize {
        (2 * self.sum()).saturating_sub(1)
    }

    /// The count at `position` (0 = bottom, 1 = body, 2 = top).
    pub fn get(&self, position: usize) -> Option<usize> {
        match position {
            0 => Some(self.bottom),
            1 => Some(self.body),
            2 => Some(self.top),
            _ => None,
        }
    }
}

impl Default for GenerationCount {
    fn default() -> Self {
        Self::new(0, 21, 0)
    }
}

impl fmt::Display for GenerationCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.bottom, self.body, self.top)
    }
}

impl FromStr for GenerationCount {
    type Err = DesignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values: Vec<usize> = s
            .split('-')
            .map(|v| v.trim().parse::<usize>())
            .collect::<Result<_, _>>()
            .map_err(|_| DesignError::MalformedState(format!("bad generation count {:?}", s)))?;
        match values.as_slice() {
            [bottom, body, top] => Ok(Self::new(*bottom, *body, *top)),
            _ => Err(DesignError::MalformedState(format!(
                "bad generation count {:?}",
                s
            ))),
        }
    }
}

impl TryFrom<String> for GenerationCount {
    type Error = DesignError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<GenerationCount> for String {
    fn from(count: GenerationCount) -> String {
        count.to_string()
    }
}

/// One domain of a lattice: a pair of parallel helices and the angle they make with the next
/// domain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    /// Position of the domain in the cyclic sequence of the lattice.
    pub index: usize,
    pub profile: NucleicAcidProfile,
    /// Interior turning angle, as a multiple of the characteristic angle.
    pub theta_m_multiple: i32,
    pub left_helix_joint: Direction,
    pub right_helix_joint: Direction,
    pub up_helix_count: GenerationCount,
    pub down_helix_count: GenerationCount,
}

impl Domain {
    pub fn new(
        profile: NucleicAcidProfile,
        theta_m_multiple: i32,
        left_helix_joint: Direction,
        right_helix_joint: Direction,
        up_helix_count: GenerationCount,
        down_helix_count: GenerationCount,
    ) -> Self {
        Self {
            index: 0,
            profile,
            theta_m_multiple,
            left_helix_joint,
            right_helix_joint,
            up_helix_count,
            down_helix_count,
        }
    }

    pub fn theta_s_multiple(&self) -> i32 {
        match (self.left_helix_joint, self.right_helix_joint) {
            (Direction::Up, Direction::Down) => -1,
            (Direction::Down, Direction::Up) => 1,
            _ => 0,
        }
    }

    pub fn theta_s(&self) -> f64 {
        self.theta_s_multiple() as f64 * self.profile.theta_s()
    }

    pub fn theta_m(&self) -> f64 {
        self.theta_m_multiple as f64 * self.profile.theta_c()
    }

    /// Interior angle.
    pub fn theta_i(&self) -> f64 {
        self.theta_m() + self.theta_s()
    }

    /// Exterior angle.
    pub fn theta_e(&self) -> f64 {
        360. - self.theta_i()
    }

    pub fn counts(&self, direction: Direction) -> GenerationCount {
        match direction {
            Direction::Up => self.up_helix_count,
            Direction::Down => self.down_helix_count,
        }
    }

    /// The same domain with both joints flipped.
    pub fn inverted(&self) -> Self {
        Self {
            left_helix_joint: self.left_helix_joint.inverse(),
            right_helix_joint: self.right_helix_joint.inverse(),
            ..*self
        }
    }
}
