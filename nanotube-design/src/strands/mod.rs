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
//! The strands of a lattice and the points they are made of.

use super::utils::{quantized_fraction, round_to, COORD_DECIMALS};
use super::{
    Direction, Helix, HelixId, HelixSlot, LinkageId, NEMid, Nick, NickId, Nucleoside, Point,
    PointId, PointKind, StrandId, DIRECTIONS,
};
use ahash::RandomState;
use std::collections::{BTreeMap, HashMap};

mod formating;
mod linkage;
pub use linkage::*;
mod repeater;
pub use repeater::*;
mod sequence;
mod splice;
mod strand;
pub use strand::*;
mod topology;

/// The strands of a lattice.
///
/// The container owns every point of the lattice. A point belongs either to exactly one
/// strand or, while it is nicked, to exactly one registered nick.
#[derive(Clone, Debug, Default)]
pub struct Strands {
    pub(crate) domain_count: usize,
    pub(crate) points: Vec<Point>,
    pub(crate) strands: BTreeMap<StrandId, Strand>,
    pub(crate) linkages: BTreeMap<LinkageId, Linkage>,
    pub(crate) nicks: BTreeMap<NickId, Nick>,
    /// The slots of every helix, in helical index order.
    pub(crate) helices: BTreeMap<HelixId, Vec<HelixSlot>>,
    /// Identifiers are never reissued, even after the strand, linkage or nick they named
    /// was removed.
    pub(crate) next_strand: usize,
    pub(crate) next_linkage: usize,
    pub(crate) next_nick: usize,
}

/// Bounding box of a set of points. The vertical axis is the z axis of the side view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    fn from_positions<I: Iterator<Item = (f64, f64)>>(positions: I) -> Option<Self> {
        positions.fold(None, |bounds: Option<Bounds>, (x, y)| {
            Some(match bounds {
                None => Bounds {
                    x_min: x,
                    x_max: x,
                    y_min: y,
                    y_max: y,
                },
                Some(b) => Bounds {
                    x_min: b.x_min.min(x),
                    x_max: b.x_max.max(x),
                    y_min: b.y_min.min(y),
                    y_max: b.y_max.max(y),
                },
            })
        })
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width(), self.height())
    }
}

impl Strands {
    /// An empty container for a lattice of `domain_count` domains.
    pub fn new(domain_count: usize) -> Self {
        Self {
            domain_count,
            ..Default::default()
        }
    }

    pub fn domain_count(&self) -> usize {
        self.domain_count
    }

    /// Create the points of `helix` and a strand holding them.
    pub(crate) fn add_helix(&mut self, helix: &Helix, domain: usize) -> StrandId {
        let helix_id = helix.id();
        let strand_id = self.next_id();
        self.next_strand += 1;
        let mut items = Vec::with_capacity(helix.len());
        let mut slots = Vec::with_capacity(helix.len());
        let coords = helix
            .x_coords
            .iter()
            .zip(helix.z_coords.iter())
            .zip(helix.angles.iter());
        for (k, ((x, z), angle)) in coords.enumerate() {
            let kind = if k % 2 == 0 {
                PointKind::Nucleoside(Nucleoside::default())
            } else {
                PointKind::NEMid(NEMid::default())
            };
            let mut point = Point::new(
                round_to(*x, COORD_DECIMALS),
                round_to(*z, COORD_DECIMALS),
                *angle,
                helix.direction,
                domain,
                kind,
            );
            point.helix = Some(helix_id);
            point.helical_index = Some(k);
            point.strand = Some(strand_id);
            let id = PointId(self.points.len());
            self.points.push(point);
            items.push(StrandItem::Point(id));
            slots.push(HelixSlot::Point(id));
        }
        self.helices.insert(helix_id, slots);
        let mut strand = Strand::new(items, false);
        strand.helix = Some(helix_id);
        self.strands.insert(strand_id, strand);
        strand_id
    }

    /// Pair the overlapping NEMids of neighbouring domains.
    ///
    /// Each NEMid gets at most one juncmate, the first overlapping NEMid found. Returns the
    /// pairs that were created, the NEMid of the lower domain first.
    pub(crate) fn detect_junctables(&mut self) -> Vec<(PointId, PointId)> {
        let n = self.domain_count;
        let mut pairs = Vec::new();
        for i in 0..n {
            let next = (i + 1) % n;
            for d1 in DIRECTIONS.iter() {
                for d2 in DIRECTIONS.iter() {
                    let left = self.helix_nemids(HelixId::new(i, *d1));
                    let right = self.helix_nemids(HelixId::new(next, *d2));
                    let mut buckets: HashMap<i64, Vec<PointId>, RandomState> = HashMap::default();
                    for p in right {
                        let key = quantized_fraction(self.points[p.0].x_coord);
                        buckets.entry(key).or_insert_with(Vec::new).push(p);
                    }
                    for p1 in left {
                        let key = quantized_fraction(self.points[p1.0].x_coord);
                        let candidates = match buckets.get(&key) {
                            Some(c) => c,
                            None => continue,
                        };
                        for p2 in candidates.iter() {
                            if self.try_pair(p1, *p2) {
                                pairs.push((p1, *p2));
                                break;
                            }
                        }
                    }
                }
            }
        }
        log::debug!("{} junctable NEMid pairs detected", pairs.len());
        pairs
    }

    fn try_pair(&mut self, p1: PointId, p2: PointId) -> bool {
        if p1 == p2 {
            return false;
        }
        let (a, b) = (&self.points[p1.0], &self.points[p2.0]);
        if a.juncmate().is_some() || b.juncmate().is_some() {
            return false;
        }
        if !a.overlaps(b, self.domain_count) {
            return false;
        }
        for (point, mate) in [(p1, p2), (p2, p1)].iter() {
            if let Some(nemid) = self.points[point.0].as_nemid_mut() {
                nemid.junctable = true;
                nemid.juncmate = Some(*mate);
            }
        }
        true
    }

    fn helix_nemids(&self, helix: HelixId) -> Vec<PointId> {
        self.helices
            .get(&helix)
            .map(|slots| {
                slots
                    .iter()
                    .filter_map(HelixSlot::point)
                    .filter(|p| self.points[p.0].is_nemid())
                    .collect()
            })
            .unwrap_or_default()
    }

    // Points
    //============================================================================================
    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.points.get(id.0)
    }

    pub(crate) fn point_mut(&mut self, id: PointId) -> Option<&mut Point> {
        self.points.get_mut(id.0)
    }

    pub fn points(&self) -> impl Iterator<Item = (PointId, &Point)> {
        self.points.iter().enumerate().map(|(i, p)| (PointId(i), p))
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// The slots of a helix.
    pub fn helix_slots(&self, helix: HelixId) -> Option<&[HelixSlot]> {
        self.helices.get(&helix).map(Vec::as_slice)
    }

    /// The point in the slot `index` of `helix`. Nicked points are returned too.
    pub fn slot_point(&self, helix: HelixId, index: usize) -> Option<PointId> {
        match self.helices.get(&helix)?.get(index)? {
            HelixSlot::Point(p) => Some(*p),
            HelixSlot::Nick(n) => self.nicks.get(n).map(|n| n.original_item),
        }
    }

    /// The nucleoside paired with `point`, at the mirrored slot of the sibling helix.
    pub fn matching(&self, point: PointId) -> Option<PointId> {
        let p = self.point(point)?;
        if !p.is_nucleoside() {
            return None;
        }
        let (helix, index) = (p.helix?, p.helical_index?);
        let slots = self.helices.get(&helix.sibling())?;
        let mirrored = slots.len().checked_sub(index + 1)?;
        let candidate = slots.get(mirrored)?.point()?;
        if self.points[candidate.0].is_nucleoside() {
            Some(candidate)
        } else {
            None
        }
    }

    pub fn strand_of(&self, point: PointId) -> Option<StrandId> {
        self.point(point)
            .and_then(|p| p.strand)
            .filter(|s| self.strands.contains_key(s))
    }

    pub fn get_nick(&self, id: NickId) -> Option<&Nick> {
        self.nicks.get(&id)
    }

    pub fn nicks(&self) -> impl Iterator<Item = (&NickId, &Nick)> {
        self.nicks.iter()
    }

    /// The position of the point wrapped by a nick.
    pub fn nick_position(&self, id: NickId) -> Option<(f64, f64)> {
        let nick = self.nicks.get(&id)?;
        self.point(nick.original_item).map(Point::position)
    }

    pub fn linkage(&self, id: LinkageId) -> Option<&Linkage> {
        self.linkages.get(&id)
    }

    pub fn linkages(&self) -> impl Iterator<Item = (&LinkageId, &Linkage)> {
        self.linkages.iter()
    }
    //============================================================================================

    // Strand queries
    //============================================================================================
    pub(crate) fn item_domain(&self, item: StrandItem) -> Option<usize> {
        match item {
            StrandItem::Point(p) => self.point(p).map(|p| p.domain),
            StrandItem::Linkage(_) => None,
        }
    }

    pub fn item_position(&self, item: StrandItem) -> Option<(f64, f64)> {
        match item {
            StrandItem::Point(p) => self.point(p).map(Point::position),
            StrandItem::Linkage(l) => self.linkage(l).map(Linkage::position),
        }
    }

    /// Number of nucleosides and NEMids of a strand, nucleosides of linkages included.
    pub fn unpacked_len(&self, strand: StrandId) -> usize {
        self.get(&strand)
            .map(|s| {
                s.items
                    .iter()
                    .map(|i| match i {
                        StrandItem::Point(_) => 1,
                        StrandItem::Linkage(l) => self.linkage(*l).map(Linkage::len).unwrap_or(0),
                    })
                    .sum()
            })
            .unwrap_or(0)
    }

    fn strand_points<'a>(
        &'a self,
        strand: StrandId,
    ) -> impl Iterator<Item = (PointId, &'a Point)> + 'a {
        self.get(&strand)
            .into_iter()
            .flat_map(|s| s.point_ids())
            .filter_map(move |id| self.point(id).map(|p| (id, p)))
    }

    pub fn nemids(&self, strand: StrandId) -> Vec<PointId> {
        self.strand_points(strand)
            .filter(|(_, p)| p.is_nemid())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn nucleosides(&self, strand: StrandId) -> Vec<PointId> {
        self.strand_points(strand)
            .filter(|(_, p)| p.is_nucleoside())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn junctables(&self, strand: StrandId) -> Vec<PointId> {
        self.strand_points(strand)
            .filter(|(_, p)| p.is_junctable())
            .map(|(id, _)| id)
            .collect()
    }

    /// Whether the points of the strand span more than one domain.
    pub fn interdomain(&self, strand: StrandId) -> bool {
        let mut domains = self.strand_points(strand).map(|(_, p)| p.domain);
        match domains.next() {
            Some(first) => domains.any(|d| d != first),
            None => false,
        }
    }

    /// The direction shared by every NEMid of the strand.
    pub fn direction(&self, strand: StrandId) -> Option<Direction> {
        let mut directions = self
            .strand_points(strand)
            .filter(|(_, p)| p.is_nemid())
            .map(|(_, p)| p.direction);
        let first = directions.next()?;
        if directions.all(|d| d == first) {
            Some(first)
        } else {
            None
        }
    }

    /// Whether a NEMid of `strand` has its juncmate in `other`.
    pub fn touching(&self, strand: StrandId, other: StrandId) -> bool {
        self.strand_points(strand)
            .filter_map(|(_, p)| p.juncmate())
            .any(|mate| self.point(mate).and_then(|m| m.strand) == Some(other))
    }

    /// The places where the strand goes across the seam of the lattice.
    pub fn wraps(&self, strand: StrandId) -> Vec<Wrap> {
        let strand = match self.get(&strand) {
            Some(s) => s,
            None => return Vec::new(),
        };
        let right_edge = self.domain_count as f64 - 1.;
        let mut ret = Vec::new();
        let mut check = |a: StrandItem, b: StrandItem| {
            let (pa, pb) = match (a.point(), b.point()) {
                (Some(pa), Some(pb)) => (pa, pb),
                _ => return,
            };
            let (xa, xb) = match (self.point(pa), self.point(pb)) {
                (Some(a), Some(b)) => (a.x_coord, b.x_coord),
                _ => return,
            };
            if xa > right_edge && xb < 1. {
                ret.push(Wrap {
                    direction: WrapDirection::RightToLeft,
                    point: pa,
                });
                ret.push(Wrap {
                    direction: WrapDirection::LeftToRight,
                    point: pb,
                });
            } else if xa < 1. && xb > right_edge {
                ret.push(Wrap {
                    direction: WrapDirection::LeftToRight,
                    point: pa,
                });
                ret.push(Wrap {
                    direction: WrapDirection::RightToLeft,
                    point: pb,
                });
            }
        };
        for pair in strand.items.windows(2) {
            check(pair[0], pair[1]);
        }
        if strand.closed && strand.items.len() > 1 {
            if let (Some(last), Some(first)) = (strand.items.last(), strand.items.first()) {
                check(*last, *first);
            }
        }
        ret
    }

    pub fn strand_bounds(&self, strand: StrandId) -> Option<Bounds> {
        Bounds::from_positions(self.strand_points(strand).map(|(_, p)| p.position()))
    }

    /// Bounding box of every strand.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_positions(
            self.strands
                .values()
                .flat_map(|s| s.point_ids())
                .filter_map(|p| self.point(p).map(Point::position)),
        )
    }

    pub fn up_strands(&self) -> Vec<StrandId> {
        self.strands_with_direction(Direction::Up)
    }

    pub fn down_strands(&self) -> Vec<StrandId> {
        self.strands_with_direction(Direction::Down)
    }

    fn strands_with_direction(&self, direction: Direction) -> Vec<StrandId> {
        self.keys()
            .copied()
            .filter(|s| self.direction(*s) == Some(direction))
            .collect()
    }
    //============================================================================================

    // Collection methods
    //============================================================================================
    pub fn len(&self) -> usize {
        self.strands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strands.is_empty()
    }

    pub fn get(&self, id: &StrandId) -> Option<&Strand> {
        self.strands.get(id)
    }

    pub fn get_mut(&mut self, id: &StrandId) -> Option<&mut Strand> {
        self.strands.get_mut(id)
    }

    pub fn contains(&self, id: &StrandId) -> bool {
        self.strands.contains_key(id)
    }

    pub fn keys(&self) -> impl Iterator<Item = &StrandId> {
        self.strands.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StrandId, &Strand)> {
        self.strands.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = &Strand> {
        self.strands.values()
    }

    fn next_id(&self) -> StrandId {
        StrandId(self.next_strand)
    }

    pub(crate) fn new_linkage_id(&mut self) -> LinkageId {
        let id = LinkageId(self.next_linkage);
        self.next_linkage += 1;
        id
    }

    pub(crate) fn new_nick_id(&mut self) -> NickId {
        let id = NickId(self.next_nick);
        self.next_nick += 1;
        id
    }

    /// Insert a strand and make it the owner of its items.
    pub(crate) fn push(&mut self, strand: Strand) -> StrandId {
        let id = self.next_id();
        self.insert(id, strand);
        id
    }

    /// Insert a strand under `id` and make it the owner of its items.
    pub(crate) fn insert(&mut self, id: StrandId, mut strand: Strand) {
        self.next_strand = self.next_strand.max(id.0 + 1);
        for item in strand.items.iter() {
            match item {
                StrandItem::Point(p) => {
                    if let Some(p) = self.points.get_mut(p.0) {
                        p.strand = Some(id);
                    }
                }
                StrandItem::Linkage(l) => {
                    if let Some(l) = self.linkages.get_mut(l) {
                        l.strand = Some(id);
                    }
                }
            }
        }
        if strand.helix.is_none() {
            strand.helix = self.common_helix(&strand.items);
        }
        self.strands.insert(id, strand);
    }

    fn common_helix(&self, items: &[StrandItem]) -> Option<HelixId> {
        let mut helices = items
            .iter()
            .map(|i| i.point().and_then(|p| self.point(p)).and_then(|p| p.helix));
        let first = helices.next()??;
        if helices.all(|h| h == Some(first)) {
            Some(first)
        } else {
            None
        }
    }
    //============================================================================================
}
