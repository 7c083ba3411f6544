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
//! Points of a lattice: nucleosides and NEMids, and the identifiers used to refer to them.

use super::{DesignError, Direction, HelixId, StrandItem};
use std::convert::TryFrom;
use std::fmt;

macro_rules! identifier {
    ($name:ident, $label:expr) => {
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(pub usize);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} #{}", $label, self.0)
            }
        }
    };
}

identifier!(PointId, "point");
identifier!(StrandId, "strand");
identifier!(LinkageId, "linkage");
identifier!(NickId, "nick");

/// A nucleobase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Base {
    A,
    T,
    G,
    C,
    U,
}

impl Base {
    /// The bases drawn from when randomizing a DNA sequence.
    pub const DNA: [Base; 4] = [Base::A, Base::T, Base::G, Base::C];

    pub fn complement(self) -> Self {
        match self {
            Self::A => Self::T,
            Self::T => Self::A,
            Self::G => Self::C,
            Self::C => Self::G,
            Self::U => Self::A,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::T => 'T',
            Self::G => 'G',
            Self::C => 'C',
            Self::U => 'U',
        }
    }
}

impl TryFrom<char> for Base {
    type Error = DesignError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'A' => Ok(Self::A),
            'T' => Ok(Self::T),
            'G' => Ok(Self::G),
            'C' => Ok(Self::C),
            'U' => Ok(Self::U),
            _ => Err(DesignError::InvalidBase(c)),
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Parse a string of base symbols.
pub fn parse_sequence(sequence: &str) -> Result<Vec<Base>, DesignError> {
    sequence
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(Base::try_from)
        .collect()
}

/// Render a sequence, unset bases are written `X`.
pub fn format_sequence(sequence: &[Option<Base>]) -> String {
    sequence
        .iter()
        .map(|b| b.map(Base::to_char).unwrap_or('X'))
        .collect()
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Nucleoside {
    pub base: Option<Base>,
}

impl Nucleoside {
    /// The base that pairs with this nucleoside's base.
    pub fn complement(&self) -> Option<Base> {
        self.base.map(Base::complement)
    }
}

/// A nucleoside-to-nucleoside midpoint.
///
/// NEMids are the only points at which two strands of neighbouring domains can be joined.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NEMid {
    /// Whether an overlapping NEMid exists on the neighbouring domain.
    pub junctable: bool,
    pub juncmate: Option<PointId>,
    /// Whether the strand actually switches domain at this NEMid.
    pub junction: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PointKind {
    Nucleoside(Nucleoside),
    NEMid(NEMid),
}

/// A point of the side view of a lattice.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub x_coord: f64,
    pub z_coord: f64,
    /// Angle around the helix axis, in `[0, 360)`.
    pub angle: f64,
    pub direction: Direction,
    /// Index of the domain in which the point lies.
    pub domain: usize,
    pub helix: Option<HelixId>,
    /// Index of the point's slot on its helix.
    pub helical_index: Option<usize>,
    /// The strand currently holding the point. `None` while the point is nicked.
    pub strand: Option<StrandId>,
    pub kind: PointKind,
}

impl Point {
    pub fn new(
        x_coord: f64,
        z_coord: f64,
        angle: f64,
        direction: Direction,
        domain: usize,
        kind: PointKind,
    ) -> Self {
        Self {
            x_coord,
            z_coord,
            angle: angle.rem_euclid(360.),
            direction,
            domain,
            helix: None,
            helical_index: None,
            strand: None,
            kind,
        }
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x_coord, self.z_coord)
    }

    pub fn midpoint(&self, other: &Self) -> (f64, f64) {
        (
            (self.x_coord + other.x_coord) / 2.,
            (self.z_coord + other.z_coord) / 2.,
        )
    }

    pub fn is_nemid(&self) -> bool {
        matches!(self.kind, PointKind::NEMid(_))
    }

    pub fn is_nucleoside(&self) -> bool {
        matches!(self.kind, PointKind::Nucleoside(_))
    }

    pub fn as_nemid(&self) -> Option<&NEMid> {
        if let PointKind::NEMid(nemid) = &self.kind {
            Some(nemid)
        } else {
            None
        }
    }

    pub fn as_nemid_mut(&mut self) -> Option<&mut NEMid> {
        if let PointKind::NEMid(nemid) = &mut self.kind {
            Some(nemid)
        } else {
            None
        }
    }

    pub fn as_nucleoside(&self) -> Option<&Nucleoside> {
        if let PointKind::Nucleoside(nucleoside) = &self.kind {
            Some(nucleoside)
        } else {
            None
        }
    }

    pub fn as_nucleoside_mut(&mut self) -> Option<&mut Nucleoside> {
        if let PointKind::Nucleoside(nucleoside) = &mut self.kind {
            Some(nucleoside)
        } else {
            None
        }
    }

    pub fn base(&self) -> Option<Base> {
        self.as_nucleoside().and_then(|n| n.base)
    }

    pub fn is_junctable(&self) -> bool {
        self.as_nemid().map(|n| n.junctable).unwrap_or(false)
    }

    pub fn juncmate(&self) -> Option<PointId> {
        self.as_nemid().and_then(|n| n.juncmate)
    }

    /// Whether `self` and `other` are at the same position, or on the two sides of the seam of a
    /// lattice of `width` domains.
    pub fn overlaps(&self, other: &Self, width: usize) -> bool {
        use super::utils::quantize;
        let (x1, x2) = (quantize(self.x_coord), quantize(other.x_coord));
        let same_height = quantize(self.z_coord) == quantize(other.z_coord);
        if x1 == x2 && same_height {
            true
        } else if x1 == 0 || x2 == 0 {
            let right_side = if x1 == 0 { x2 } else { x1 };
            right_side == quantize(width as f64) && same_height
        } else {
            false
        }
    }
}

/// A break in a strand. The nicked point is kept aside so that the break can be undone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Nick {
    pub original_item: PointId,
    pub previously_closed_strand: bool,
    /// The items that came before and after the nicked point in its strand.
    pub previous_item: Option<StrandItem>,
    pub next_item: Option<StrandItem>,
}

/// The content of a slot of a helix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HelixSlot {
    Point(PointId),
    Nick(NickId),
}

impl HelixSlot {
    pub fn point(&self) -> Option<PointId> {
        if let Self::Point(p) = self {
            Some(*p)
        } else {
            None
        }
    }
}
