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
use super::{LinkageId, NickId, PointId, StrandId};
use std::fmt;

/// An error that can occur while building or editing a lattice.
///
/// Operations that fail leave the design untouched.
#[derive(Debug)]
pub enum DesignError {
    /// A helix joint was given a value other than UP (0) or DOWN (1).
    InvalidJoint(i64),
    /// Too few samples were requested, or computed, to align consecutive domains.
    InsufficientSample { count: usize, needed: usize },
    /// The two points are not NEMids that are each other's juncmate.
    NotJunctable(PointId, PointId),
    /// The point is not a NEMid at an end of an open strand.
    NotEndpoint(PointId),
    /// The point does not exist or does not belong to a strand of this container.
    ForeignPoint(PointId),
    /// The linkage does not belong to a strand of this container.
    ForeignLinkage(LinkageId),
    /// There is no strand with this identifier.
    ForeignStrand(StrandId),
    /// The nick is not in the nick registry.
    UnregisteredNick(NickId),
    /// A sequence does not have the length of its target.
    SequenceLengthMismatch { expected: usize, actual: usize },
    /// The character is not a nucleobase symbol.
    InvalidBase(char),
    /// Persisted tables refer to missing rows or have inconsistent sizes.
    MalformedState(String),
    Serialization(serde_json::Error),
}

impl fmt::Display for DesignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidJoint(value) => write!(f, "Invalid helix joint {}", value),
            Self::InsufficientSample { count, needed } => write!(
                f,
                "Insufficient sample: got {} points, at least {} are needed",
                count, needed
            ),
            Self::NotJunctable(a, b) => write!(f, "{} and {} are not junctable", a, b),
            Self::NotEndpoint(p) => write!(f, "{} is not the end of an open strand", p),
            Self::ForeignPoint(p) => write!(f, "{} does not belong to these strands", p),
            Self::ForeignLinkage(l) => write!(f, "{} does not belong to these strands", l),
            Self::ForeignStrand(s) => write!(f, "There is no strand {}", s),
            Self::UnregisteredNick(n) => write!(f, "{} is not registered", n),
            Self::SequenceLengthMismatch { expected, actual } => write!(
                f,
                "Sequence of length {} given for {} nucleosides",
                actual, expected
            ),
            Self::InvalidBase(c) => write!(f, "{:?} is not a nucleobase", c),
            Self::MalformedState(msg) => write!(f, "Malformed state: {}", msg),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for DesignError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DesignError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}
