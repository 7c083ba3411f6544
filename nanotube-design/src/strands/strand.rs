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
use super::super::{HelixId, LinkageId, PointId};
use std::borrow::Cow;

/// An element of a strand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StrandItem {
    Point(PointId),
    Linkage(LinkageId),
}

impl StrandItem {
    pub fn point(&self) -> Option<PointId> {
        if let Self::Point(p) = self {
            Some(*p)
        } else {
            None
        }
    }

    pub fn linkage(&self) -> Option<LinkageId> {
        if let Self::Linkage(l) = self {
            Some(*l)
        } else {
            None
        }
    }
}

/// An ordered sequence of points and linkages.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Strand {
    pub items: Vec<StrandItem>,
    /// A closed strand has no head nor tail, its last item is followed by its first one.
    pub closed: bool,
    /// The helix on which every point of the strand lies, if there is one.
    pub helix: Option<HelixId>,
    pub name: Option<Cow<'static, str>>,
    /// `None` means that the color is chosen automatically.
    pub color: Option<u32>,
}

impl Strand {
    pub fn new(items: Vec<StrandItem>, closed: bool) -> Self {
        Self {
            items,
            closed,
            ..Default::default()
        }
    }

    /// A strand with the given items and the presentation attributes of `self`.
    pub(crate) fn restyled(&self, items: Vec<StrandItem>, closed: bool) -> Self {
        Self {
            items,
            closed,
            helix: None,
            name: self.name.clone(),
            color: self.color,
        }
    }

    pub fn index_of(&self, item: StrandItem) -> Option<usize> {
        self.items.iter().position(|i| *i == item)
    }

    pub fn contains(&self, item: StrandItem) -> bool {
        self.items.contains(&item)
    }

    pub fn has_linkage(&self) -> bool {
        self.items.iter().any(|i| i.linkage().is_some())
    }

    pub fn point_ids(&self) -> impl Iterator<Item = PointId> + '_ {
        self.items.iter().filter_map(StrandItem::point)
    }

    pub fn linkage_ids(&self) -> impl Iterator<Item = LinkageId> + '_ {
        self.items.iter().filter_map(StrandItem::linkage)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WrapDirection {
    LeftToRight,
    RightToLeft,
}

/// A place where a strand crosses the seam of the lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wrap {
    pub direction: WrapDirection,
    pub point: PointId,
}
