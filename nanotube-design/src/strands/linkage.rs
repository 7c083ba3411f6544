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
use super::super::{Base, DesignError, Direction, Nucleoside, StrandId};

/// Number of nucleosides of a freshly created linkage.
pub const DEFAULT_LINKAGE_LENGTH: usize = 6;

/// Unpaired nucleosides that bridge the tail of a strand to the head of a strand.
#[derive(Clone, Debug, PartialEq)]
pub struct Linkage {
    pub items: Vec<Nucleoside>,
    pub coord_one: (f64, f64),
    pub coord_two: (f64, f64),
    /// Side toward which the linkage bows when it is drawn.
    pub inflection: Direction,
    pub strand: Option<StrandId>,
}

impl Linkage {
    pub fn new(coord_one: (f64, f64), coord_two: (f64, f64), inflection: Direction) -> Self {
        Self {
            items: vec![Nucleoside::default(); DEFAULT_LINKAGE_LENGTH],
            coord_one,
            coord_two,
            inflection,
            strand: None,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add `|count|` nucleosides, at the front if `count` is negative and at the back otherwise.
    pub fn generate(&mut self, count: i64) {
        let new = std::iter::repeat(Nucleoside::default()).take(count.unsigned_abs() as usize);
        if count < 0 {
            self.items.splice(0..0, new);
        } else {
            self.items.extend(new);
        }
    }

    /// Remove `|count|` nucleosides, from the back if `count` is negative and from the front
    /// otherwise.
    pub fn trim(&mut self, count: i64) {
        let n = (count.unsigned_abs() as usize).min(self.items.len());
        if count < 0 {
            self.items.truncate(self.items.len() - n);
        } else {
            self.items.drain(..n);
        }
    }

    pub fn sequence(&self) -> Vec<Option<Base>> {
        self.items.iter().map(|n| n.base).collect()
    }

    pub fn set_sequence(&mut self, sequence: &[Base]) -> Result<(), DesignError> {
        if sequence.len() != self.items.len() {
            return Err(DesignError::SequenceLengthMismatch {
                expected: self.items.len(),
                actual: sequence.len(),
            });
        }
        for (n, b) in self.items.iter_mut().zip(sequence.iter()) {
            n.base = Some(*b);
        }
        Ok(())
    }

    /// Position at which the linkage is drawn.
    pub fn position(&self) -> (f64, f64) {
        let bow = match self.inflection {
            Direction::Up => 0.2,
            Direction::Down => -0.2,
        };
        (
            (self.coord_one.0 + self.coord_two.0) / 2.,
            (self.coord_one.1 + self.coord_two.1) / 2. + bow,
        )
    }
}
