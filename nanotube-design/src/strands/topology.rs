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
//! Operations that edit the topology of the strands.

use super::splice::{self, Cut, Draft};
use super::*;
use crate::DesignError;

impl Strands {
    /// The strand holding `point`, failing if the point is unknown or nicked.
    fn owning_strand(&self, point: PointId) -> Result<StrandId, DesignError> {
        self.strand_of(point)
            .ok_or(DesignError::ForeignPoint(point))
    }

    fn index_in(&self, strand: StrandId, item: StrandItem) -> Option<usize> {
        self.get(&strand).and_then(|s| s.index_of(item))
    }

    /// Remove the `old` strands and insert the strands described by `drafts`, with the
    /// presentation attributes of `style`.
    ///
    /// If `keep` is given and there is exactly one draft, it is inserted under that identifier.
    fn commit(
        &mut self,
        old: &[StrandId],
        drafts: Vec<Draft<StrandItem>>,
        style: &Strand,
        keep: Option<StrandId>,
    ) -> Vec<StrandId> {
        for id in old {
            self.strands.remove(id);
        }
        let single = drafts.len() == 1;
        let mut ret = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let strand = style.restyled(draft.items, draft.closed);
            let id = match keep {
                Some(id) if single => {
                    self.insert(id, strand);
                    id
                }
                _ => self.push(strand),
            };
            ret.push(id);
        }
        ret
    }

    /// Recompute the `junction` flag of every NEMid of `strand`.
    fn refresh_junctions(&mut self, strand: StrandId) {
        let (items, closed) = match self.get(&strand) {
            Some(s) => (s.items.clone(), s.closed),
            None => return,
        };
        let len = items.len();
        for (i, item) in items.iter().enumerate() {
            let point = match item.point() {
                Some(p) => p,
                None => continue,
            };
            let (previous, next) = if closed {
                (Some(items[(i + len - 1) % len]), Some(items[(i + 1) % len]))
            } else {
                (i.checked_sub(1).map(|j| items[j]), items.get(i + 1).copied())
            };
            let junctable = self.point(point).map(Point::is_junctable).unwrap_or(false);
            let junction = junctable
                && match (previous, next) {
                    (Some(a), Some(b)) => self.item_domain(a) != self.item_domain(b),
                    _ => false,
                };
            if let Some(nemid) = self.point_mut(point).and_then(Point::as_nemid_mut) {
                nemid.junction = junction;
            }
        }
    }

    /// Break the strand holding `point` at that point.
    ///
    /// A closed strand is opened, an open strand is split in two. The point leaves its strand
    /// and its helix slot is taken by the new nick.
    pub fn nick(&mut self, point: PointId) -> Result<NickId, DesignError> {
        let strand_id = self.owning_strand(point)?;
        let (helix, helical_index) = self
            .point(point)
            .and_then(|p| p.helix.zip(p.helical_index))
            .ok_or(DesignError::ForeignPoint(point))?;
        let index = self
            .index_in(strand_id, StrandItem::Point(point))
            .ok_or(DesignError::ForeignPoint(point))?;
        let style = self.strands[&strand_id].clone();
        let len = style.items.len();
        let (previous_item, next_item) = if style.closed && len > 1 {
            (
                Some(style.items[(index + len - 1) % len]),
                Some(style.items[(index + 1) % len]),
            )
        } else {
            (
                index.checked_sub(1).map(|i| style.items[i]),
                style.items.get(index + 1).copied(),
            )
        };

        let drafts = splice::remove_item(Cut {
            items: &style.items,
            closed: style.closed,
            index,
        });
        let keep = if style.closed { Some(strand_id) } else { None };
        let new_strands = self.commit(&[strand_id], drafts, &style, keep);
        for s in new_strands.iter() {
            self.refresh_junctions(*s);
        }

        let id = self.new_nick_id();
        self.nicks.insert(
            id,
            Nick {
                original_item: point,
                previously_closed_strand: style.closed,
                previous_item,
                next_item,
            },
        );
        if let Some(slot) = self
            .helices
            .get_mut(&helix)
            .and_then(|slots| slots.get_mut(helical_index))
        {
            *slot = HelixSlot::Nick(id);
        }
        if let Some(p) = self.point_mut(point) {
            p.strand = None;
            if let Some(nemid) = p.as_nemid_mut() {
                nemid.junction = false;
            }
        }
        log::debug!("Nicked {} at {}, new strands {:?}", strand_id, point, new_strands);
        Ok(id)
    }

    /// The strand holding `item`, if `item` is the tail (or the head) of an open strand.
    fn strand_end(&self, item: StrandItem, tail: bool) -> Option<StrandId> {
        let id = match item {
            StrandItem::Point(p) => self.strand_of(p)?,
            StrandItem::Linkage(l) => self.linkage(l)?.strand.filter(|s| self.contains(s))?,
        };
        let strand = self.get(&id)?;
        let end = if tail {
            strand.items.last()
        } else {
            strand.items.first()
        };
        if !strand.closed && end == Some(&item) {
            Some(id)
        } else {
            None
        }
    }

    /// Put back the point wrapped by a nick, between the items that surrounded it.
    ///
    /// The strand ending with the former predecessor and the strand starting with the former
    /// successor are joined through the point. If they are the same strand, it is closed.
    pub fn unnick(&mut self, nick: NickId) -> Result<StrandId, DesignError> {
        let registered = self
            .nicks
            .get(&nick)
            .copied()
            .ok_or(DesignError::UnregisteredNick(nick))?;
        let original = registered.original_item;
        let (helix, index) = self
            .point(original)
            .and_then(|p| p.helix.zip(p.helical_index))
            .ok_or(DesignError::UnregisteredNick(nick))?;
        let previous = registered
            .previous_item
            .and_then(|i| self.strand_end(i, true));
        let next = registered
            .next_item
            .and_then(|i| self.strand_end(i, false));
        let item = StrandItem::Point(original);

        let target = match (previous, next) {
            (Some(a), Some(b)) if a == b => {
                if let Some(strand) = self.get_mut(&a) {
                    strand.items.push(item);
                    strand.closed = true;
                }
                a
            }
            (Some(a), Some(b)) => {
                let tail = self
                    .strands
                    .remove(&b)
                    .map(|s| s.items)
                    .unwrap_or_default();
                let mut merged = self.strands.remove(&a).unwrap_or_default();
                merged.items.push(item);
                merged.items.extend(tail);
                self.insert(a, merged);
                a
            }
            (Some(a), None) => {
                if let Some(strand) = self.get_mut(&a) {
                    strand.items.push(item);
                }
                a
            }
            (None, Some(b)) => {
                if let Some(strand) = self.get_mut(&b) {
                    strand.items.insert(0, item);
                }
                b
            }
            (None, None) => self.push(Strand::new(
                vec![item],
                registered.previously_closed_strand,
            )),
        };
        if let Some(mut strand) = self.strands.remove(&target) {
            strand.helix = None;
            self.insert(target, strand);
        }
        self.refresh_junctions(target);
        if let Some(slot) = self
            .helices
            .get_mut(&helix)
            .and_then(|slots| slots.get_mut(index))
        {
            *slot = HelixSlot::Point(original);
        }
        self.nicks.remove(&nick);
        log::debug!("Removed {}, {} restored in {}", nick, original, target);
        Ok(target)
    }

    /// Join the strands at two NEMids that are each other's juncmate.
    ///
    /// Each strand continues on the other strand after the junction. Applying it twice to the
    /// same pair restores the original strands. Returns the strands that were created.
    pub fn conjunct(
        &mut self,
        first: PointId,
        second: PointId,
    ) -> Result<Vec<StrandId>, DesignError> {
        self.owning_strand(first)?;
        self.owning_strand(second)?;
        let mutual = match (self.point(first), self.point(second)) {
            (Some(a), Some(b)) => {
                a.is_junctable()
                    && b.is_junctable()
                    && a.juncmate() == Some(second)
                    && b.juncmate() == Some(first)
            }
            _ => false,
        };
        if !mutual {
            return Err(DesignError::NotJunctable(first, second));
        }
        let (first, second) = match (self.point(first), self.point(second)) {
            (Some(a), Some(b)) if b.domain < a.domain => (second, first),
            _ => (first, second),
        };
        let s1 = self.owning_strand(first)?;
        let s2 = self.owning_strand(second)?;
        let i1 = self
            .index_in(s1, StrandItem::Point(first))
            .ok_or(DesignError::ForeignPoint(first))?;
        let i2 = self
            .index_in(s2, StrandItem::Point(second))
            .ok_or(DesignError::ForeignPoint(second))?;

        let style = self.strands[&s1].clone();
        let new_strands = if s1 == s2 {
            let drafts = splice::join_with_itself(
                Cut {
                    items: &style.items,
                    closed: style.closed,
                    index: i1,
                },
                i2,
            );
            self.commit(&[s1], drafts, &style, None)
        } else {
            let other = self.strands[&s2].clone();
            let drafts = splice::join(
                Cut {
                    items: &style.items,
                    closed: style.closed,
                    index: i1,
                },
                Cut {
                    items: &other.items,
                    closed: other.closed,
                    index: i2,
                },
            );
            self.commit(&[s1, s2], drafts, &style, None)
        };

        for point in [first, second].iter() {
            if let Some(strand) = self.strand_of(*point) {
                self.refresh_junctions(strand);
            }
        }
        log::debug!(
            "Conjuncted {} and {}, new strands {:?} of lengths {:?}",
            first,
            second,
            new_strands,
            new_strands
                .iter()
                .map(|s| self.unpacked_len(*s))
                .collect::<Vec<_>>()
        );
        Ok(new_strands)
    }

    fn is_head(&self, strand: StrandId, point: PointId) -> bool {
        self.nemids(strand).first() == Some(&point)
    }

    fn is_tail(&self, strand: StrandId, point: PointId) -> bool {
        self.nemids(strand).last() == Some(&point)
    }

    fn check_endpoint(&self, point: PointId) -> Result<StrandId, DesignError> {
        let strand_id = self.owning_strand(point)?;
        let strand = &self.strands[&strand_id];
        let is_nemid = self.point(point).map(Point::is_nemid).unwrap_or(false);
        if !is_nemid || strand.closed || strand.items.len() < 2 {
            return Err(DesignError::NotEndpoint(point));
        }
        if self.is_head(strand_id, point) || self.is_tail(strand_id, point) {
            Ok(strand_id)
        } else {
            Err(DesignError::NotEndpoint(point))
        }
    }

    /// Bridge the tail NEMid of a strand to the head NEMid of a strand with a new linkage.
    ///
    /// If both NEMids belong to the same strand, the strand is closed.
    pub fn link(&mut self, first: PointId, second: PointId) -> Result<LinkageId, DesignError> {
        let s1 = self.check_endpoint(first)?;
        let s2 = self.check_endpoint(second)?;
        if first == second {
            return Err(DesignError::NotEndpoint(second));
        }
        let ((n1, s1), (n2, s2)) = if self.direction(s1) == Some(Direction::Down) {
            ((second, s2), (first, s1))
        } else {
            ((first, s1), (second, s2))
        };
        let (begin, end) = if self.is_tail(s1, n1) && self.is_head(s2, n2) {
            (s1, s2)
        } else if self.is_head(s1, n1) && self.is_tail(s2, n2) {
            (s2, s1)
        } else {
            return Err(DesignError::NotEndpoint(n2));
        };
        let closed = begin == end;

        let begin_strand = self.strands[&begin].clone();
        let end_strand = self.strands[&end].clone();
        let coord_one = begin_strand
            .items
            .last()
            .and_then(|i| self.item_position(*i))
            .unwrap_or_default();
        let coord_two = end_strand
            .items
            .first()
            .and_then(|i| self.item_position(*i))
            .unwrap_or_default();
        let style = if self.unpacked_len(s1) > self.unpacked_len(s2) {
            self.strands[&s1].clone()
        } else {
            self.strands[&s2].clone()
        };

        let linkage_id = self.new_linkage_id();
        self.linkages
            .insert(linkage_id, Linkage::new(coord_one, coord_two, Direction::Up));
        let mut items = begin_strand.items;
        items.push(StrandItem::Linkage(linkage_id));
        if !closed {
            items.extend(end_strand.items);
        }
        let old: Vec<StrandId> = if closed { vec![begin] } else { vec![begin, end] };
        let drafts = vec![Draft { items, closed }];
        let new_strands = self.commit(&old, drafts, &style, Some(begin));
        log::debug!("Linked {} to {} in {:?}", begin, end, new_strands);
        Ok(linkage_id)
    }

    /// Remove a linkage from its strand.
    ///
    /// A closed strand is opened, an open strand is split in two. Returns the resulting strands.
    pub fn unlink(&mut self, linkage: LinkageId) -> Result<Vec<StrandId>, DesignError> {
        let strand_id = self
            .linkages
            .get(&linkage)
            .and_then(|l| l.strand)
            .filter(|s| self.contains(s))
            .ok_or(DesignError::ForeignLinkage(linkage))?;
        let index = self
            .index_in(strand_id, StrandItem::Linkage(linkage))
            .ok_or(DesignError::ForeignLinkage(linkage))?;
        let style = self.strands[&strand_id].clone();
        let drafts = splice::remove_item(Cut {
            items: &style.items,
            closed: style.closed,
            index,
        });
        let keep = if style.closed { Some(strand_id) } else { None };
        let new_strands = self.commit(&[strand_id], drafts, &style, keep);
        self.linkages.remove(&linkage);
        log::debug!("Removed {} from {}", linkage, strand_id);
        Ok(new_strands)
    }
}
