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
//! Tables describing the complete state of a lattice, used to save and reload a design.

use super::utils::is_false;
use super::{
    Base, DesignError, Direction, DomainDescriptor, Domains, DoubleHelices, HelixId, HelixSlot,
    Linkage, LinkageId, NEMid, Nick, NickId, NucleicAcidProfile, Nucleoside, Point, PointId,
    PointKind, Strand, StrandId, StrandItem, Strands,
};
use serde_with::skip_serializing_none;
use std::borrow::Cow;
use std::convert::TryFrom;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PersistedState {
    pub profile: NucleicAcidProfile,
    pub domains: DomainsTable,
    pub double_helices: Vec<DoubleHelixRow>,
    /// Helix `2 * d + k` is the helix of direction `k` of double helix `d`.
    pub helices: Vec<HelixRow>,
    /// The identifier of a point is its row index.
    pub points: Vec<PointRow>,
    pub strands: Vec<StrandRow>,
    #[serde(default)]
    pub nicks: Vec<NickRow>,
    #[serde(default)]
    pub linkages: Vec<LinkageRow>,
}

/// The template subunit of the lattice.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DomainsTable {
    pub rows: Vec<DomainDescriptor>,
    pub symmetry: usize,
    #[serde(default, skip_serializing_if = "is_false")]
    pub antiparallel: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DoubleHelixRow {
    pub domain: usize,
    pub up_helix: usize,
    pub down_helix: usize,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SlotRow {
    Point(usize),
    Nick(usize),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HelixRow {
    pub double_helix: usize,
    pub direction: Direction,
    pub x_coords: Vec<f64>,
    pub z_coords: Vec<f64>,
    pub angles: Vec<f64>,
    pub slots: Vec<SlotRow>,
    #[serde(default)]
    pub left_joint_points: Vec<usize>,
    #[serde(default)]
    pub right_joint_points: Vec<usize>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PointRowKind {
    Nucleoside,
    Nemid,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PointRow {
    pub x_coord: f64,
    pub z_coord: f64,
    pub angle: f64,
    pub direction: Direction,
    pub domain: usize,
    pub kind: PointRowKind,
    pub base: Option<Base>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub junctable: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub junction: bool,
    pub juncmate: Option<usize>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ItemRow {
    Point(usize),
    Linkage(usize),
}

#[skip_serializing_none]
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StrandRow {
    pub id: usize,
    pub items: Vec<ItemRow>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub closed: bool,
    pub name: Option<String>,
    pub color: Option<u32>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NickRow {
    pub id: usize,
    pub original_item: usize,
    #[serde(default, skip_serializing_if = "is_false")]
    pub previously_closed_strand: bool,
    /// The items that surrounded the point before it was nicked.
    #[serde(default)]
    pub previous_item: Option<ItemRow>,
    #[serde(default)]
    pub next_item: Option<ItemRow>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LinkageRow {
    pub id: usize,
    /// One character per nucleoside, `X` for unset bases.
    pub sequence: String,
    pub coord_one: (f64, f64),
    pub coord_two: (f64, f64),
    pub inflection: Direction,
    pub strand: Option<usize>,
}

fn malformed<S: Into<String>>(msg: S) -> DesignError {
    DesignError::MalformedState(msg.into())
}

fn item_row(item: &StrandItem) -> ItemRow {
    match item {
        StrandItem::Point(p) => ItemRow::Point(p.0),
        StrandItem::Linkage(l) => ItemRow::Linkage(l.0),
    }
}

fn helix_row_index(id: HelixId) -> usize {
    2 * id.double_helix + id.direction.index()
}

impl PersistedState {
    pub fn capture(double_helices: &DoubleHelices, strands: &Strands) -> Self {
        let domains = double_helices.domains();
        let profile = *double_helices.profile();
        let double_helix_rows = double_helices
            .iter()
            .enumerate()
            .map(|(i, d)| DoubleHelixRow {
                domain: d.domain.index,
                up_helix: helix_row_index(HelixId::new(i, Direction::Up)),
                down_helix: helix_row_index(HelixId::new(i, Direction::Down)),
            })
            .collect();
        let helices = double_helices
            .helices()
            .map(|h| HelixRow {
                double_helix: h.double_helix,
                direction: h.direction,
                x_coords: h.x_coords.clone(),
                z_coords: h.z_coords.clone(),
                angles: h.angles.clone(),
                slots: strands
                    .helix_slots(h.id())
                    .unwrap_or_default()
                    .iter()
                    .map(|s| match s {
                        HelixSlot::Point(p) => SlotRow::Point(p.0),
                        HelixSlot::Nick(n) => SlotRow::Nick(n.0),
                    })
                    .collect(),
                left_joint_points: h.left_joint_points.iter().map(|p| p.0).collect(),
                right_joint_points: h.right_joint_points.iter().map(|p| p.0).collect(),
            })
            .collect();
        let points = strands
            .points()
            .map(|(_, p)| {
                let nemid = p.as_nemid();
                PointRow {
                    x_coord: p.x_coord,
                    z_coord: p.z_coord,
                    angle: p.angle,
                    direction: p.direction,
                    domain: p.domain,
                    kind: if p.is_nemid() {
                        PointRowKind::Nemid
                    } else {
                        PointRowKind::Nucleoside
                    },
                    base: p.base(),
                    junctable: nemid.map(|n| n.junctable).unwrap_or(false),
                    junction: nemid.map(|n| n.junction).unwrap_or(false),
                    juncmate: nemid.and_then(|n| n.juncmate).map(|m| m.0),
                }
            })
            .collect();
        let strand_rows = strands
            .iter()
            .map(|(id, s)| StrandRow {
                id: id.0,
                items: s.items.iter().map(item_row).collect(),
                closed: s.closed,
                name: s.name.as_ref().map(|n| n.to_string()),
                color: s.color,
            })
            .collect();
        let nicks = strands
            .nicks()
            .map(|(id, n)| NickRow {
                id: id.0,
                original_item: n.original_item.0,
                previously_closed_strand: n.previously_closed_strand,
                previous_item: n.previous_item.as_ref().map(item_row),
                next_item: n.next_item.as_ref().map(item_row),
            })
            .collect();
        let linkages = strands
            .linkages()
            .map(|(id, l)| LinkageRow {
                id: id.0,
                sequence: super::format_sequence(&l.sequence()),
                coord_one: l.coord_one,
                coord_two: l.coord_two,
                inflection: l.inflection,
                strand: l.strand.map(|s| s.0),
            })
            .collect();
        Self {
            profile,
            domains: DomainsTable {
                rows: domains
                    .subunit
                    .domains
                    .iter()
                    .map(DomainDescriptor::from_domain)
                    .collect(),
                symmetry: domains.symmetry,
                antiparallel: domains.antiparallel,
            },
            double_helices: double_helix_rows,
            helices,
            points,
            strands: strand_rows,
            nicks,
            linkages,
        }
    }

    /// Rebuild the double helices and the strands described by the tables.
    pub fn restore(&self) -> Result<(DoubleHelices, Strands), DesignError> {
        if self.domains.symmetry == 0 {
            return Err(malformed("symmetry must be at least 1"));
        }
        let template = self
            .domains
            .rows
            .iter()
            .map(|d| d.to_domain(self.profile))
            .collect();
        let domains = Domains::new(
            self.profile,
            template,
            self.domains.symmetry,
            self.domains.antiparallel,
        );
        let mut double_helices = DoubleHelices::new(domains);
        if double_helices.len() != self.double_helices.len() {
            return Err(malformed(format!(
                "{} double helices for {} domains",
                self.double_helices.len(),
                double_helices.len()
            )));
        }
        let point_count = self.points.len();
        let point_id = |p: usize| {
            if p < point_count {
                Ok(PointId(p))
            } else {
                Err(malformed(format!("unknown point {}", p)))
            }
        };

        for (i, row) in self.double_helices.iter().enumerate() {
            if row.domain != i {
                return Err(malformed(format!(
                    "double helix {} has domain {}",
                    i, row.domain
                )));
            }
            let helix_rows = [(Direction::Up, row.up_helix), (Direction::Down, row.down_helix)];
            for (direction, helix_row) in helix_rows.iter() {
                let h = self
                    .helices
                    .get(*helix_row)
                    .filter(|h| h.double_helix == i && h.direction == *direction)
                    .ok_or_else(|| {
                        malformed(format!("bad helix {} for double helix {}", helix_row, i))
                    })?;
                let size = double_helices
                    .get(i)
                    .map(|d| d.counts(*direction).helix_size())
                    .unwrap_or(0);
                let sizes = [
                    h.x_coords.len(),
                    h.z_coords.len(),
                    h.angles.len(),
                    h.slots.len(),
                ];
                if sizes.iter().any(|len| *len != size) {
                    return Err(malformed(format!(
                        "helix {} has arrays of sizes {:?} instead of {}",
                        helix_row, sizes, size
                    )));
                }
                let left = h
                    .left_joint_points
                    .iter()
                    .map(|p| point_id(*p))
                    .collect::<Result<Vec<_>, _>>()?;
                let right = h
                    .right_joint_points
                    .iter()
                    .map(|p| point_id(*p))
                    .collect::<Result<Vec<_>, _>>()?;
                if let Some(helix) = double_helices.helix_mut(HelixId::new(i, *direction)) {
                    helix.set_coords(h.x_coords.clone(), h.z_coords.clone(), h.angles.clone());
                    helix.left_joint_points = left;
                    helix.right_joint_points = right;
                }
            }
        }

        let mut owners = vec![0usize; point_count];
        let owned = self
            .strands
            .iter()
            .flat_map(|s| s.items.iter())
            .filter_map(|i| match i {
                ItemRow::Point(p) => Some(*p),
                ItemRow::Linkage(_) => None,
            })
            .chain(self.nicks.iter().map(|n| n.original_item));
        for p in owned {
            point_id(p)?;
            owners[p] += 1;
        }
        if let Some((p, n)) = owners.iter().enumerate().find(|(_, n)| **n != 1) {
            return Err(malformed(format!(
                "point {} belongs to {} strands or nicks",
                p, n
            )));
        }

        let mut strands = Strands::new(double_helices.len());
        for row in self.points.iter() {
            let kind = match row.kind {
                PointRowKind::Nucleoside => PointKind::Nucleoside(Nucleoside { base: row.base }),
                PointRowKind::Nemid => PointKind::NEMid(NEMid {
                    junctable: row.junctable,
                    juncmate: row.juncmate.map(point_id).transpose()?,
                    junction: row.junction,
                }),
            };
            strands.points.push(Point::new(
                row.x_coord,
                row.z_coord,
                row.angle,
                row.direction,
                row.domain,
                kind,
            ));
        }

        for row in self.linkages.iter() {
            let sequence = row
                .sequence
                .chars()
                .map(|c| {
                    if c == 'X' {
                        Ok(None)
                    } else {
                        Base::try_from(c).map(Some)
                    }
                })
                .collect::<Result<Vec<_>, _>>()?;
            let mut linkage = Linkage::new(row.coord_one, row.coord_two, row.inflection);
            linkage.items = sequence.into_iter().map(|base| Nucleoside { base }).collect();
            strands.linkages.insert(LinkageId(row.id), linkage);
        }

        let item = |row: &ItemRow, linkages: &Strands| match row {
            ItemRow::Point(p) => point_id(*p).map(StrandItem::Point),
            ItemRow::Linkage(l) if linkages.linkages.contains_key(&LinkageId(*l)) => {
                Ok(StrandItem::Linkage(LinkageId(*l)))
            }
            ItemRow::Linkage(l) => Err(malformed(format!("unknown linkage {}", l))),
        };

        for row in self.nicks.iter() {
            let original = point_id(row.original_item)?;
            let previous_item = row
                .previous_item
                .as_ref()
                .map(|i| item(i, &strands))
                .transpose()?;
            let next_item = row
                .next_item
                .as_ref()
                .map(|i| item(i, &strands))
                .transpose()?;
            strands.nicks.insert(
                NickId(row.id),
                Nick {
                    original_item: original,
                    previously_closed_strand: row.previously_closed_strand,
                    previous_item,
                    next_item,
                },
            );
        }

        for row in self.helices.iter() {
            let id = HelixId::new(row.double_helix, row.direction);
            let mut slots = Vec::with_capacity(row.slots.len());
            for (k, slot) in row.slots.iter().enumerate() {
                let (slot, point) = match slot {
                    SlotRow::Point(p) => {
                        let p = point_id(*p)?;
                        (HelixSlot::Point(p), p)
                    }
                    SlotRow::Nick(n) => {
                        let nick = strands
                            .nicks
                            .get(&NickId(*n))
                            .ok_or_else(|| malformed(format!("unknown nick {}", n)))?;
                        (HelixSlot::Nick(NickId(*n)), nick.original_item)
                    }
                };
                let point = &mut strands.points[point.0];
                point.helix = Some(id);
                point.helical_index = Some(k);
                slots.push(slot);
            }
            strands.helices.insert(id, slots);
        }

        for row in self.strands.iter() {
            let items = row
                .items
                .iter()
                .map(|i| item(i, &strands))
                .collect::<Result<Vec<_>, _>>()?;
            let strand = Strand {
                items,
                closed: row.closed,
                helix: None,
                name: row.name.clone().map(Cow::Owned),
                color: row.color,
            };
            strands.insert(StrandId(row.id), strand);
        }
        strands.next_nick = self.nicks.iter().map(|n| n.id + 1).max().unwrap_or(0);
        strands.next_linkage = self.linkages.iter().map(|l| l.id + 1).max().unwrap_or(0);
        Ok((double_helices, strands))
    }

    pub fn to_json(&self) -> Result<String, DesignError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, DesignError> {
        Ok(serde_json::from_str(json)?)
    }
}
