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
//! Core of the nanotube designer.
//!
//! A lattice is a cyclic sequence of [`Domain`]s, each made of two parallel helices. The
//! [`DoubleHelices`] engine lays the helices out on the side view of the lattice and turns them
//! into [`Strands`], whose topology can then be edited with nicks, junctions and linkages.

#[macro_use]
extern crate serde_derive;
extern crate serde;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

mod domains;
pub use domains::*;
mod error;
pub use error::*;
pub mod geometry;
mod helices;
pub use helices::*;
mod parameters;
pub use parameters::*;
pub mod persistence;
mod points;
pub use points::*;
mod strands;
pub use strands::*;
pub mod utils;

#[cfg(test)]
mod tests;

/// The direction of a helix, or of the joint through which a domain connects to its
/// neighbours.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    IntoPrimitive,
    TryFromPrimitive,
)]
#[repr(u8)]
pub enum Direction {
    #[serde(rename = "UP")]
    Up = 0,
    #[serde(rename = "DOWN")]
    Down = 1,
}

/// Both directions, in the order in which helices of a double helix are stored.
pub const DIRECTIONS: [Direction; 2] = [Direction::Up, Direction::Down];

impl Direction {
    pub fn inverse(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// Position of the helix with this direction inside its double helix.
    pub fn index(self) -> usize {
        u8::from(self) as usize
    }
}

impl TryFrom<i64> for Direction {
    type Error = DesignError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(|v| Self::try_from_primitive(v).ok())
            .ok_or(DesignError::InvalidJoint(value))
    }
}

impl FromStr for Direction {
    type Err = DesignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "UP" => Ok(Self::Up),
            "DOWN" => Ok(Self::Down),
            other => other
                .parse::<i64>()
                .map_err(|_| DesignError::MalformedState(format!("unknown joint {:?}", other)))
                .and_then(|v| Self::try_from(v)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "UP"),
            Self::Down => write!(f, "DOWN"),
        }
    }
}
