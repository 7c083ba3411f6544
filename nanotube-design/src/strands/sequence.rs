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
//! Sequences of strands.

use super::*;
use crate::{Base, DesignError};
use rand::Rng;

/// A nucleoside of a strand, either a point or a nucleoside of a linkage.
#[derive(Clone, Copy, Debug, PartialEq)]
enum NucleosideRef {
    Point(PointId),
    Linkage(LinkageId, usize),
}

impl Strands {
    fn strand_nucleosides(&self, strand: StrandId) -> Result<Vec<NucleosideRef>, DesignError> {
        let strand = self.get(&strand).ok_or(DesignError::ForeignStrand(strand))?;
        Ok(self.nucleoside_refs(strand))
    }

    fn nucleoside_refs(&self, strand: &Strand) -> Vec<NucleosideRef> {
        let mut ret = Vec::new();
        for item in strand.items.iter() {
            match item {
                StrandItem::Point(p) => {
                    if self.point(*p).map(Point::is_nucleoside).unwrap_or(false) {
                        ret.push(NucleosideRef::Point(*p));
                    }
                }
                StrandItem::Linkage(l) => {
                    let len = self.linkage(*l).map(Linkage::len).unwrap_or(0);
                    ret.extend((0..len).map(|k| NucleosideRef::Linkage(*l, k)));
                }
            }
        }
        ret
    }

    /// Every nucleoside of every strand.
    fn all_nucleoside_refs(&self) -> Vec<NucleosideRef> {
        self.iter()
            .flat_map(|(_, s)| self.nucleoside_refs(s))
            .collect()
    }

    fn randomize_nucleosides(&mut self, nucleosides: Vec<NucleosideRef>, overwrite: bool) {
        let mut rng = rand::thread_rng();
        for n in nucleosides {
            if overwrite || self.base_of(n).is_none() {
                let base = Base::DNA[rng.gen_range(0..Base::DNA.len())];
                self.assign(n, Some(base), true);
            }
        }
    }

    fn clear_nucleosides(&mut self, nucleosides: Vec<NucleosideRef>) {
        for n in nucleosides {
            self.assign(n, None, false);
        }
    }

    fn base_of(&self, nucleoside: NucleosideRef) -> Option<Base> {
        match nucleoside {
            NucleosideRef::Point(p) => self.point(p).and_then(Point::base),
            NucleosideRef::Linkage(l, k) => self.linkage(l)?.items.get(k)?.base,
        }
    }

    /// Set a base, and the complementary base on the matching nucleoside.
    fn assign(&mut self, nucleoside: NucleosideRef, base: Option<Base>, propagate: bool) {
        match nucleoside {
            NucleosideRef::Point(p) => {
                let mate = if propagate { self.matching(p) } else { None };
                if let Some(n) = self.point_mut(p).and_then(Point::as_nucleoside_mut) {
                    n.base = base;
                }
                if let Some(n) = mate
                    .and_then(|m| self.point_mut(m))
                    .and_then(Point::as_nucleoside_mut)
                {
                    n.base = base.map(Base::complement);
                }
            }
            NucleosideRef::Linkage(l, k) => {
                if let Some(n) = self.linkages.get_mut(&l).and_then(|l| l.items.get_mut(k)) {
                    n.base = base;
                }
            }
        }
    }

    /// The bases of every nucleoside of a strand, linkages included.
    pub fn sequence(&self, strand: StrandId) -> Result<Vec<Option<Base>>, DesignError> {
        Ok(self
            .strand_nucleosides(strand)?
            .into_iter()
            .map(|n| self.base_of(n))
            .collect())
    }

    /// Set the bases of every nucleoside of a strand. Matching nucleosides receive the
    /// complementary bases.
    pub fn set_sequence(&mut self, strand: StrandId, sequence: &[Base]) -> Result<(), DesignError> {
        let nucleosides = self.strand_nucleosides(strand)?;
        if nucleosides.len() != sequence.len() {
            return Err(DesignError::SequenceLengthMismatch {
                expected: nucleosides.len(),
                actual: sequence.len(),
            });
        }
        for (n, b) in nucleosides.into_iter().zip(sequence.iter()) {
            self.assign(n, Some(*b), true);
        }
        Ok(())
    }

    /// The bases held by the nucleosides matching those of a strand. Linkage nucleosides
    /// and nucleosides without a mate give `None`.
    pub fn complements(&self, strand: StrandId) -> Result<Vec<Option<Base>>, DesignError> {
        Ok(self
            .strand_nucleosides(strand)?
            .into_iter()
            .map(|n| match n {
                NucleosideRef::Point(p) => self
                    .matching(p)
                    .and_then(|m| self.point(m))
                    .and_then(Point::base),
                NucleosideRef::Linkage(..) => None,
            })
            .collect())
    }

    /// Give random DNA bases to the nucleosides of a strand. Nucleosides that already have a
    /// base keep it unless `overwrite` is true.
    pub fn randomize_sequence(
        &mut self,
        strand: StrandId,
        overwrite: bool,
    ) -> Result<(), DesignError> {
        let nucleosides = self.strand_nucleosides(strand)?;
        self.randomize_nucleosides(nucleosides, overwrite);
        Ok(())
    }

    /// Unset the bases of a strand.
    pub fn clear_sequence(&mut self, strand: StrandId) -> Result<(), DesignError> {
        let nucleosides = self.strand_nucleosides(strand)?;
        self.clear_nucleosides(nucleosides);
        Ok(())
    }

    pub fn randomize_sequences(&mut self, overwrite: bool) {
        let nucleosides = self.all_nucleoside_refs();
        self.randomize_nucleosides(nucleosides, overwrite);
    }

    pub fn clear_sequences(&mut self) {
        let nucleosides = self.all_nucleoside_refs();
        self.clear_nucleosides(nucleosides);
    }
}
