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
use super::*;
use std::convert::TryFrom;
use std::sync::Arc;

const UP: Direction = Direction::Up;
const DOWN: Direction = Direction::Down;

/// The junctable NEMid pairs of the hexagonal lattice, as (domain, direction, slot).
const HEXAGON_PAIRS: [((usize, Direction, usize), (usize, Direction, usize)); 6] = [
    ((0, UP, 15), (1, DOWN, 25)),
    ((1, DOWN, 11), (2, UP, 29)),
    ((2, UP, 1), (3, DOWN, 39)),
    ((3, DOWN, 25), (4, UP, 15)),
    ((4, UP, 29), (5, DOWN, 11)),
    ((5, DOWN, 39), (0, UP, 1)),
];

fn hexagon_parameters() -> DomainsParameters {
    serde_json::from_str(include_str!("hexagon.json")).expect("Could not read hexagon.json")
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn hexagon() -> (DoubleHelices, Strands) {
    init_logger();
    let domains = Domains::from_parameters(&hexagon_parameters()).unwrap();
    let mut helices = DoubleHelices::new(domains);
    helices.compute().unwrap();
    let strands = helices.strands();
    (helices, strands)
}

fn dummy() -> (DoubleHelices, Strands) {
    let mut helices = DoubleHelices::new(Domains::dummy(NucleicAcidProfile::DEFAULT));
    helices.compute().unwrap();
    let strands = helices.strands();
    (helices, strands)
}

fn slot(strands: &Strands, domain: usize, direction: Direction, index: usize) -> PointId {
    strands
        .slot_point(HelixId::new(domain, direction), index)
        .expect("no such slot")
}

fn strand_at(strands: &Strands, domain: usize, direction: Direction, index: usize) -> StrandId {
    strands
        .strand_of(slot(strands, domain, direction, index))
        .expect("point is not in a strand")
}

fn assert_good_strand<S: std::ops::Deref<Target = str>>(
    strands: &Strands,
    strand: StrandId,
    objective: S,
) {
    use regex::Regex;
    let re = Regex::new(r#"\[[^\]]*\]"#).unwrap();
    let formated_strand = strands.formated_items(strand);
    let left: Vec<&str> = re.find_iter(&formated_strand).map(|m| m.as_str()).collect();
    let right: Vec<&str> = re.find_iter(&objective).map(|m| m.as_str()).collect();
    assert_eq!(left, right, "strand {} is {}", strand, formated_strand);
}

fn formated_strands(strands: &Strands) -> Vec<String> {
    let mut ret: Vec<String> = strands.keys().map(|s| strands.formated_items(*s)).collect();
    ret.sort();
    ret
}

/// Every point is held by exactly one strand or wrapped by exactly one nick.
fn assert_points_accounted_for(strands: &Strands) {
    let mut owners = vec![0; strands.point_count()];
    for (id, strand) in strands.iter() {
        for p in strand.point_ids() {
            owners[p.0] += 1;
            assert_eq!(strands.point(p).unwrap().strand, Some(*id));
        }
        for l in strand.linkage_ids() {
            assert_eq!(strands.linkage(l).unwrap().strand, Some(*id));
        }
    }
    for (_, nick) in strands.nicks() {
        owners[nick.original_item.0] += 1;
        assert_eq!(strands.point(nick.original_item).unwrap().strand, None);
    }
    assert!(owners.iter().all(|n| *n == 1), "{:?}", owners);
}

#[test]
fn hexagon_is_closed_and_regular() {
    let domains = Domains::from_parameters(&hexagon_parameters()).unwrap();
    assert_eq!(domains.count(), 6);
    assert!(domains.closed());
    let view = domains.top_view();
    assert_eq!(view.len(), 8);
    let d = domains.profile().diameter;
    for i in 1..7 {
        assert!((utils::distance(view[i], view[i + 1]) - d).abs() < 1e-9);
    }
    assert!(utils::distance(view[0], view[6]) < CLOSED_THRESHOLD);
    assert!(utils::distance(view[1], view[7]) < CLOSED_THRESHOLD);
}

#[test]
fn dummy_lattice_is_open() {
    let domains = Domains::dummy(NucleicAcidProfile::DEFAULT);
    assert_eq!(domains.count(), 2);
    assert!(!domains.closed());
    let (helices, strands) = dummy();
    for helix in helices.helices() {
        assert_eq!(helix.len(), 5);
    }
    assert_eq!(strands.len(), 4);
    for (id, strand) in strands.iter() {
        assert!(!strand.closed);
        assert!(!strands.interdomain(*id));
        assert!(strands.junctables(*id).is_empty());
    }
}

#[test]
fn replicas_share_the_template_angles() {
    let domains = Domains::from_parameters(&hexagon_parameters()).unwrap();
    let all = domains.domains();
    assert_eq!(all.len(), domains.symmetry * domains.subunit.count());
    for (i, d) in all.iter().enumerate() {
        assert_eq!(d.index, i);
        assert_eq!(d.theta_m_multiple, 7);
        let joint = if i % 2 == 0 { UP } else { DOWN };
        assert_eq!(d.left_helix_joint, joint);
        assert_eq!(d.right_helix_joint, joint);
        assert_eq!(d.theta_s_multiple(), 0);
        assert!((d.theta_i() - 120.).abs() < 1e-9);
    }
    let subunits = domains.subunits();
    assert!(subunits[0].template);
    assert!(subunits[1..].iter().all(|s| !s.template));
}

#[test]
fn parallel_replicas_copy_the_template() {
    let profile = NucleicAcidProfile::DEFAULT;
    let count = GenerationCount::default();
    let template = vec![
        Domain::new(profile, 5, UP, DOWN, count, count),
        Domain::new(profile, 9, DOWN, UP, count, count),
    ];
    let domains = Domains::new(profile, template, 3, false);
    assert_eq!(domains.count(), 6);
    let all = domains.domains();
    for (i, d) in all.iter().enumerate() {
        assert_eq!(d.theta_m_multiple, all[i % 2].theta_m_multiple);
        assert_eq!(d.left_helix_joint, all[i % 2].left_helix_joint);
    }
    assert_eq!(all[2].theta_m_multiple, all[0].theta_m_multiple);
}

#[test]
fn switch_angle_follows_the_joints() {
    let profile = NucleicAcidProfile::DEFAULT;
    let count = GenerationCount::default();
    let domain = |left, right| Domain::new(profile, 7, left, right, count, count);
    assert_eq!(domain(UP, DOWN).theta_s_multiple(), -1);
    assert_eq!(domain(DOWN, UP).theta_s_multiple(), 1);
    assert_eq!(domain(DOWN, DOWN).theta_s_multiple(), 0);
    let d = domain(DOWN, UP);
    assert!((d.theta_i() - (d.theta_m() + profile.theta_s())).abs() < 1e-12);
    assert!((d.theta_e() + d.theta_i() - 360.).abs() < 1e-12);
    assert_eq!(domain(UP, DOWN).inverted().left_helix_joint, DOWN);
}

#[test]
fn helices_alternate_nucleosides_and_nemids() {
    let (helices, strands) = hexagon();
    for helix in helices.helices() {
        assert_eq!(helix.len(), 41);
        assert_eq!(helix.len() % 2, 1);
        let slots = strands.helix_slots(helix.id()).unwrap();
        assert_eq!(slots.len(), helix.len());
        for (k, s) in slots.iter().enumerate() {
            let point = strands.point(s.point().unwrap()).unwrap();
            assert_eq!(point.is_nucleoside(), k % 2 == 0);
            assert_eq!(point.helical_index, Some(k));
            assert_eq!(point.direction, helix.direction);
            assert!(point.angle >= 0. && point.angle < 360.);
            let domain = point.domain as f64;
            assert!(point.x_coord >= domain - 1e-9 && point.x_coord <= domain + 1. + 1e-9);
        }
    }
}

#[test]
fn down_helices_run_backward() {
    let (helices, _) = hexagon();
    for double_helix in helices.iter() {
        let up = double_helix.up_helix();
        let down = double_helix.down_helix();
        assert!(up.z_coords.windows(2).all(|w| w[0] < w[1]));
        assert!(down.z_coords.windows(2).all(|w| w[0] > w[1]));
    }
}

#[test]
fn zeroed_helix_follows_the_left_joint() {
    let (helices, _) = hexagon();
    let first = helices.get(0).unwrap();
    assert_eq!(first.zeroed_helix().direction, UP);
    assert_eq!(first.other_helix().direction, DOWN);
    let second = helices.get(1).unwrap();
    assert_eq!(second.zeroed_helix().direction, DOWN);
    assert_eq!(second.right_helix().direction, DOWN);
    assert_eq!(second.left_helix().direction, DOWN);
}

#[test]
fn juncmates_are_symmetric() {
    let (_, strands) = hexagon();
    let mut junctables = 0;
    for (id, point) in strands.points() {
        if let Some(mate) = point.juncmate() {
            assert!(point.is_junctable());
            assert_eq!(strands.point(mate).unwrap().juncmate(), Some(id));
            junctables += 1;
        }
    }
    assert_eq!(junctables, 2 * HEXAGON_PAIRS.len());
}

#[test]
fn hexagon_junctable_pairs() {
    let (helices, strands) = hexagon();
    for ((d1, dir1, i1), (d2, dir2, i2)) in HEXAGON_PAIRS.iter() {
        let p1 = slot(&strands, *d1, *dir1, *i1);
        let p2 = slot(&strands, *d2, *dir2, *i2);
        let (a, b) = (strands.point(p1).unwrap(), strands.point(p2).unwrap());
        assert_eq!(a.juncmate(), Some(p2));
        assert!(a.overlaps(b, 6));
        assert!(helices.get(*d1).unwrap().right_helix_joint_points().contains(&p1));
        assert!(helices.get(*d2).unwrap().left_helix_joint_points().contains(&p2));
    }
    // The last pair sits on the seam of the lattice.
    let left = strands.point(slot(&strands, 0, UP, 1)).unwrap();
    let right = strands.point(slot(&strands, 5, DOWN, 39)).unwrap();
    assert!(left.x_coord.abs() < 1e-9);
    assert!((right.x_coord - 6.).abs() < 1e-9);
}

#[test]
fn conjunct_swaps_the_tails_of_two_strands() {
    let (helices, mut strands) = hexagon();
    let p1 = slot(&strands, 0, UP, 15);
    let p2 = slot(&strands, 1, DOWN, 25);
    assert!(!helices.get(0).unwrap().right_joint_is_stable(&strands, 1));

    let new_strands = strands.conjunct(p2, p1).unwrap();
    assert_eq!(new_strands.len(), 2);
    assert_eq!(strands.len(), 12);
    assert_points_accounted_for(&strands);

    let a = strands.strand_of(p2).unwrap();
    let b = strands.strand_of(p1).unwrap();
    assert_good_strand(&strands, a, "[H0 UP: 0 -> 14] [H1 DOWN: 25 -> 40]");
    assert_good_strand(&strands, b, "[H1 DOWN: 0 -> 24] [H0 UP: 15 -> 40]");
    assert_eq!(strands.unpacked_len(a), 31);
    assert_eq!(strands.unpacked_len(b), 51);
    assert!(strands.interdomain(a));
    assert!(strands.touching(b, a));
    assert_eq!(strands.direction(a), None);
    for p in [p1, p2].iter() {
        assert!(strands.point(*p).unwrap().as_nemid().unwrap().junction);
    }

    let first = helices.get(0).unwrap();
    let second = helices.get(1).unwrap();
    assert!(first.right_joint_is_stable(&strands, 1));
    assert!(second.left_joint_is_stable(&strands, 1));
    assert!(!first.right_joint_is_stable(&strands, DEFAULT_JOINT_THRESHOLD));
}

#[test]
fn conjunct_twice_restores_the_strands() {
    let (_, mut strands) = hexagon();
    let before = formated_strands(&strands);
    let p1 = slot(&strands, 0, UP, 15);
    let p2 = slot(&strands, 1, DOWN, 25);
    strands.conjunct(p1, p2).unwrap();
    assert_ne!(formated_strands(&strands), before);
    strands.conjunct(p1, p2).unwrap();
    assert_eq!(formated_strands(&strands), before);
    assert!(!strands.point(p1).unwrap().as_nemid().unwrap().junction);
    assert_points_accounted_for(&strands);
}

#[test]
fn conjunct_on_the_same_strand_closes_a_loop() {
    let (_, mut strands) = hexagon();
    let linkage = strands
        .link(slot(&strands, 0, UP, 39), slot(&strands, 5, DOWN, 1))
        .unwrap();
    assert_eq!(strands.len(), 11);
    let p1 = slot(&strands, 0, UP, 1);
    let p2 = slot(&strands, 5, DOWN, 39);
    assert_eq!(strands.strand_of(p1), strands.strand_of(p2));

    let new_strands = strands.conjunct(p2, p1).unwrap();
    assert_eq!(new_strands.len(), 2);
    assert_eq!(strands.len(), 12);
    let looped = strands.strand_of(p1).unwrap();
    let rest = strands.strand_of(p2).unwrap();
    assert!(strands.get(&looped).unwrap().closed);
    assert!(!strands.get(&rest).unwrap().closed);
    assert_good_strand(
        &strands,
        looped,
        "[H0 UP: 1 -> 40] [@6] [H5 DOWN: 0 -> 38] [closed]",
    );
    assert_good_strand(&strands, rest, "[H0 UP: 0 -> 0] [H5 DOWN: 39 -> 40]");
    assert_eq!(strands.linkage(linkage).unwrap().strand, Some(looped));
    for p in [p1, p2].iter() {
        assert!(strands.point(*p).unwrap().as_nemid().unwrap().junction);
    }
    assert_points_accounted_for(&strands);
}

#[test]
fn conjunct_rejects_points_that_are_not_juncmates() {
    let (_, mut strands) = hexagon();
    let before = formated_strands(&strands);
    let a = slot(&strands, 0, UP, 3);
    let b = slot(&strands, 1, DOWN, 3);
    assert!(matches!(
        strands.conjunct(a, b),
        Err(DesignError::NotJunctable(_, _))
    ));
    let p1 = slot(&strands, 0, UP, 15);
    let q2 = slot(&strands, 2, UP, 29);
    assert!(matches!(
        strands.conjunct(p1, q2),
        Err(DesignError::NotJunctable(_, _))
    ));
    assert!(matches!(
        strands.conjunct(p1, PointId(100_000)),
        Err(DesignError::ForeignPoint(PointId(100_000)))
    ));
    assert_eq!(formated_strands(&strands), before);
}

#[test]
fn nick_and_unnick_an_open_strand() {
    let (_, mut strands) = hexagon();
    let before = formated_strands(&strands);
    let p = slot(&strands, 0, UP, 15);
    let nick = strands.nick(p).unwrap();
    assert_eq!(strands.len(), 13);
    assert_eq!(strands.point(p).unwrap().strand, None);
    assert_eq!(
        strands.helix_slots(HelixId::new(0, UP)).unwrap()[15],
        HelixSlot::Nick(nick)
    );
    assert!(!strands.get_nick(nick).unwrap().previously_closed_strand);
    assert_eq!(strands.nick_position(nick), Some(strands.point(p).unwrap().position()));
    assert_good_strand(&strands, strand_at(&strands, 0, UP, 14), "[H0 UP: 0 -> 14]");
    assert_good_strand(&strands, strand_at(&strands, 0, UP, 16), "[H0 UP: 16 -> 40]");
    assert_points_accounted_for(&strands);

    strands.unnick(nick).unwrap();
    assert_eq!(formated_strands(&strands), before);
    assert_eq!(strands.nicks().count(), 0);
    assert_points_accounted_for(&strands);
}

#[test]
fn nick_at_the_head_of_a_strand() {
    let (_, mut strands) = hexagon();
    let before = formated_strands(&strands);
    let head = slot(&strands, 2, UP, 0);
    let nick = strands.nick(head).unwrap();
    assert_eq!(strands.len(), 12);
    assert_good_strand(&strands, strand_at(&strands, 2, UP, 1), "[H2 UP: 1 -> 40]");
    strands.unnick(nick).unwrap();
    assert_eq!(formated_strands(&strands), before);
}

#[test]
fn unnick_after_a_conjunct_restores_the_crossover() {
    let (_, mut strands) = hexagon();
    let p1 = slot(&strands, 0, UP, 15);
    let p2 = slot(&strands, 1, DOWN, 25);
    strands.conjunct(p1, p2).unwrap();
    let crossed = formated_strands(&strands);

    let nick = strands.nick(p1).unwrap();
    assert_good_strand(&strands, strand_at(&strands, 1, DOWN, 24), "[H1 DOWN: 0 -> 24]");
    assert_good_strand(&strands, strand_at(&strands, 0, UP, 16), "[H0 UP: 16 -> 40]");
    assert!(!strands.point(p1).unwrap().as_nemid().unwrap().junction);
    assert_points_accounted_for(&strands);

    let s = strands.unnick(nick).unwrap();
    assert_good_strand(&strands, s, "[H1 DOWN: 0 -> 24] [H0 UP: 15 -> 40]");
    assert_good_strand(
        &strands,
        strand_at(&strands, 0, UP, 0),
        "[H0 UP: 0 -> 14] [H1 DOWN: 25 -> 40]",
    );
    assert_eq!(formated_strands(&strands), crossed);
    assert!(strands.point(p1).unwrap().as_nemid().unwrap().junction);
    assert_points_accounted_for(&strands);
}

#[test]
fn identifiers_are_not_reissued() {
    let (_, mut strands) = hexagon();
    let mut seen: Vec<StrandId> = strands.keys().copied().collect();
    let p = slot(&strands, 0, UP, 15);

    let first = strands.nick(p).unwrap();
    let created: Vec<StrandId> = strands
        .keys()
        .copied()
        .filter(|id| !seen.contains(id))
        .collect();
    assert_eq!(created.len(), 2);
    seen.extend(created);
    strands.unnick(first).unwrap();

    let second = strands.nick(p).unwrap();
    assert_ne!(first, second);
    let created: Vec<StrandId> = strands
        .keys()
        .copied()
        .filter(|id| !seen.contains(id))
        .collect();
    assert_eq!(created.len(), 2);
    strands.unnick(second).unwrap();

    let tail = slot(&strands, 0, UP, 39);
    let head = slot(&strands, 0, UP, 1);
    let linkage = strands.link(tail, head).unwrap();
    strands.unlink(linkage).unwrap();
    assert_ne!(strands.link(tail, head).unwrap(), linkage);
    assert_points_accounted_for(&strands);
}

#[test]
fn nicks_and_linkages_must_be_registered() {
    let (_, mut strands) = hexagon();
    let p = slot(&strands, 0, UP, 15);
    let nick = strands.nick(p).unwrap();
    assert!(matches!(strands.nick(p), Err(DesignError::ForeignPoint(_))));
    assert!(matches!(
        strands.unnick(NickId(nick.0 + 1)),
        Err(DesignError::UnregisteredNick(_))
    ));
    assert!(matches!(
        strands.unlink(LinkageId(3)),
        Err(DesignError::ForeignLinkage(LinkageId(3)))
    ));
}

#[test]
fn link_closes_a_strand_and_unlink_opens_it() {
    let (_, mut strands) = hexagon();
    let tail = slot(&strands, 0, UP, 39);
    let head = slot(&strands, 0, UP, 1);
    let linkage = strands.link(tail, head).unwrap();
    let s = strand_at(&strands, 0, UP, 0);
    assert_eq!(strands.len(), 12);
    assert!(strands.get(&s).unwrap().closed);
    assert!(strands.get(&s).unwrap().has_linkage());
    assert_eq!(strands.unpacked_len(s), 47);
    assert_good_strand(&strands, s, "[H0 UP: 0 -> 40] [@6] [closed]");
    assert_eq!(strands.linkage(linkage).unwrap().strand, Some(s));
    assert_eq!(strands.linkage(linkage).unwrap().inflection, UP);
    assert_points_accounted_for(&strands);

    // A closed strand has no endpoint.
    assert!(matches!(
        strands.link(tail, head),
        Err(DesignError::NotEndpoint(_))
    ));

    let nick = strands.nick(slot(&strands, 0, UP, 20)).unwrap();
    assert!(strands.get_nick(nick).unwrap().previously_closed_strand);
    assert!(!strands.get(&s).unwrap().closed);
    assert_good_strand(&strands, s, "[H0 UP: 21 -> 40] [@6] [H0 UP: 0 -> 19]");
    strands.unnick(nick).unwrap();
    assert!(strands.get(&s).unwrap().closed);
    assert_good_strand(&strands, s, "[H0 UP: 21 -> 40] [@6] [H0 UP: 0 -> 20] [closed]");

    let result = strands.unlink(linkage).unwrap();
    assert_eq!(result, vec![s]);
    assert_good_strand(&strands, s, "[H0 UP: 0 -> 40]");
    assert!(!strands.get(&s).unwrap().closed);
    assert_eq!(strands.linkages().count(), 0);
    assert_points_accounted_for(&strands);
}

#[test]
fn link_two_strands_and_unlink_them() {
    let (_, mut strands) = hexagon();
    let before = formated_strands(&strands);
    let tail = slot(&strands, 0, UP, 39);
    let head = slot(&strands, 1, UP, 1);
    let linkage = strands.link(head, tail).unwrap();
    assert_eq!(strands.len(), 11);
    let s = strand_at(&strands, 0, UP, 0);
    assert_eq!(strands.strand_of(head), Some(s));
    assert_good_strand(&strands, s, "[H0 UP: 0 -> 40] [@6] [H1 UP: 0 -> 40]");
    assert_eq!(strands.unpacked_len(s), 88);
    assert_eq!(strands.direction(s), Some(UP));
    let l = strands.linkage(linkage).unwrap();
    assert_eq!(l.coord_one, strands.point(slot(&strands, 0, UP, 40)).unwrap().position());
    assert_eq!(l.coord_two, strands.point(slot(&strands, 1, UP, 0)).unwrap().position());

    let result = strands.unlink(linkage).unwrap();
    assert_eq!(result.len(), 2);
    assert_eq!(formated_strands(&strands), before);
    assert_points_accounted_for(&strands);
}

#[test]
fn link_down_strands() {
    let (_, mut strands) = hexagon();
    let head = slot(&strands, 0, DOWN, 1);
    let tail = slot(&strands, 1, DOWN, 39);
    strands.link(head, tail).unwrap();
    let s = strand_at(&strands, 0, DOWN, 0);
    assert_good_strand(&strands, s, "[H1 DOWN: 0 -> 40] [@6] [H0 DOWN: 0 -> 40]");
    assert_eq!(strands.direction(s), Some(DOWN));
    assert!(strands.down_strands().contains(&s));
    assert!(!strands.up_strands().contains(&s));
}

#[test]
fn link_requires_strand_ends() {
    let (_, mut strands) = hexagon();
    let before = formated_strands(&strands);
    let middle = slot(&strands, 0, UP, 15);
    let head = slot(&strands, 1, UP, 1);
    let nucleoside = slot(&strands, 0, UP, 40);
    assert!(matches!(
        strands.link(middle, head),
        Err(DesignError::NotEndpoint(p)) if p == middle
    ));
    assert!(matches!(
        strands.link(nucleoside, head),
        Err(DesignError::NotEndpoint(p)) if p == nucleoside
    ));
    // Two heads cannot be linked.
    assert!(matches!(
        strands.link(slot(&strands, 0, UP, 1), head),
        Err(DesignError::NotEndpoint(_))
    ));
    assert_eq!(formated_strands(&strands), before);
    assert_eq!(strands.linkages().count(), 0);
}

#[test]
fn sequences_propagate_to_matching_nucleosides() {
    let (_, mut strands) = hexagon();
    let s = strand_at(&strands, 0, UP, 0);
    let sequence = parse_sequence("ATGCATGCATGCATGCATGCU").unwrap();
    strands.set_sequence(s, &sequence).unwrap();
    let expected: Vec<Option<Base>> = sequence.iter().copied().map(Some).collect();
    assert_eq!(strands.sequence(s).unwrap(), expected);
    for p in strands.nucleosides(s) {
        let base = strands.point(p).unwrap().base().unwrap();
        let mate = strands.matching(p).unwrap();
        let mate_point = strands.point(mate).unwrap();
        assert_eq!(mate_point.helix, Some(HelixId::new(0, DOWN)));
        assert_eq!(
            mate_point.helical_index.unwrap(),
            40 - strands.point(p).unwrap().helical_index.unwrap()
        );
        assert_eq!(mate_point.base(), Some(base.complement()));
        assert_eq!(strands.matching(mate), Some(p));
    }
    let complements: Vec<Option<Base>> = sequence.iter().map(|b| Some(b.complement())).collect();
    assert_eq!(strands.complements(s).unwrap(), complements);
    assert_eq!(Base::U.complement(), Base::A);
    assert_eq!(strands.matching(slot(&strands, 0, UP, 1)), None);

    // Complements are read from the matching nucleosides.
    strands
        .clear_sequence(strand_at(&strands, 0, DOWN, 0))
        .unwrap();
    assert_eq!(strands.sequence(s).unwrap(), expected);
    assert!(strands.complements(s).unwrap().iter().all(Option::is_none));
}

#[test]
fn sequence_length_is_checked() {
    let (_, mut strands) = hexagon();
    let s = strand_at(&strands, 0, UP, 0);
    assert!(matches!(
        strands.set_sequence(s, &[Base::A; 20]),
        Err(DesignError::SequenceLengthMismatch {
            expected: 21,
            actual: 20
        })
    ));
    assert!(strands.sequence(s).unwrap().iter().all(Option::is_none));
    assert!(matches!(
        parse_sequence("ATGX"),
        Err(DesignError::InvalidBase('X'))
    ));
    assert!(matches!(
        strands.sequence(StrandId(1000)),
        Err(DesignError::ForeignStrand(_))
    ));
}

#[test]
fn sequences_cover_linkages() {
    let (_, mut strands) = hexagon();
    let linkage = strands
        .link(slot(&strands, 0, UP, 39), slot(&strands, 0, UP, 1))
        .unwrap();
    let s = strand_at(&strands, 0, UP, 0);
    assert_eq!(strands.sequence(s).unwrap().len(), 27);
    strands.set_sequence(s, &[Base::G; 27]).unwrap();
    assert_eq!(
        strands.linkage(linkage).unwrap().sequence(),
        vec![Some(Base::G); 6]
    );

    strands.clear_sequence(s).unwrap();
    assert!(strands.sequence(s).unwrap().iter().all(Option::is_none));

    strands.set_sequence(s, &[Base::C; 27]).unwrap();
    strands.randomize_sequence(s, false).unwrap();
    assert_eq!(strands.sequence(s).unwrap(), vec![Some(Base::C); 27]);
    strands.randomize_sequence(s, true).unwrap();
    let randomized = strands.sequence(s).unwrap();
    assert!(randomized
        .iter()
        .all(|b| matches!(b, Some(b) if Base::DNA.contains(b))));
    for p in strands.nucleosides(s) {
        let mate = strands.matching(p).unwrap();
        assert_eq!(
            strands.point(mate).unwrap().base(),
            strands.point(p).unwrap().base().map(Base::complement)
        );
    }
}

#[test]
fn randomize_every_sequence() {
    let (_, mut strands) = hexagon();
    strands.randomize_sequences(false);
    for (_, point) in strands.points() {
        if point.is_nucleoside() {
            assert!(point.base().is_some());
        }
    }
    strands.clear_sequences();
    assert!(strands.points().all(|(_, p)| p.base().is_none()));
}

#[test]
fn repeated_nicks_and_unnicks() {
    let (_, mut strands) = hexagon();
    let before = formated_strands(&strands);
    let first = slot(&strands, 0, UP, 1);
    let nicked = strands
        .do_many(RepeatedAction::Nick, first, 4, None, false)
        .unwrap();
    assert_eq!(nicked, 10);
    assert_eq!(strands.len(), 22);
    assert_points_accounted_for(&strands);
    let unnicked = strands
        .do_many(RepeatedAction::Unnick, first, 4, None, false)
        .unwrap();
    assert_eq!(unnicked, 10);
    assert_eq!(formated_strands(&strands), before);
}

#[test]
fn repeater_profile_bounds_the_repetitions() {
    let (_, mut strands) = hexagon();
    let profile = ActionRepeaterProfile {
        repeat_every: 2,
        repeat_every_multiplier: 2,
        repeat_for: Some(3),
        bidirectional: false,
    };
    let first = slot(&strands, 0, UP, 1);
    assert_eq!(profile.run(&mut strands, RepeatedAction::Nick, first).unwrap(), 3);
    assert_eq!(strands.len(), 15);

    let (_, mut strands) = hexagon();
    let middle = slot(&strands, 0, UP, 21);
    let applied = strands
        .do_many(RepeatedAction::Nick, middle, 4, Some(2), true)
        .unwrap();
    assert_eq!(applied, 4);
    let nicked: Vec<usize> = strands
        .nicks()
        .map(|(_, n)| strands.point(n.original_item).unwrap().helical_index.unwrap())
        .collect();
    assert_eq!(nicked, vec![13, 17, 21, 25]);
}

#[test]
fn repeated_conjuncts() {
    let (_, mut strands) = hexagon();
    let first = slot(&strands, 0, UP, 1);
    let applied = strands
        .do_many(RepeatedAction::Conjunct, first, 2, None, false)
        .unwrap();
    assert_eq!(applied, 2);
    for k in [1, 15].iter() {
        let p = slot(&strands, 0, UP, *k);
        assert!(strands.point(p).unwrap().as_nemid().unwrap().junction);
    }
    assert_points_accounted_for(&strands);
}

#[test]
fn strands_wrap_around_the_seam() {
    let (_, mut strands) = hexagon();
    let p1 = slot(&strands, 0, UP, 1);
    let p2 = slot(&strands, 5, DOWN, 39);
    let before_seam = slot(&strands, 5, DOWN, 38);
    assert!(strands.wraps(strand_at(&strands, 0, UP, 0)).is_empty());
    strands.conjunct(p1, p2).unwrap();
    let s = strands.strand_of(p1).unwrap();
    let wraps = strands.wraps(s);
    assert!(wraps.contains(&Wrap {
        direction: WrapDirection::RightToLeft,
        point: before_seam
    }));
    assert!(wraps.contains(&Wrap {
        direction: WrapDirection::LeftToRight,
        point: p1
    }));
}

#[test]
fn bounding_boxes() {
    let (_, strands) = hexagon();
    let bounds = strands.bounds().unwrap();
    assert!(bounds.x_min >= 0. && bounds.x_max <= 6.);
    assert!(bounds.width() > 5.);
    let s = strand_at(&strands, 2, UP, 0);
    let b = strands.strand_bounds(s).unwrap();
    assert!(b.x_min >= 2. && b.x_max <= 3.);
    assert!(b.height() > 0.);
    assert_eq!(b.size(), (b.width(), b.height()));
    assert!(strands.strand_bounds(StrandId(1000)).is_none());
}

#[test]
fn compute_needs_a_nemid_to_align_on() {
    let profile = NucleicAcidProfile::DEFAULT;
    let count = GenerationCount::new(0, 1, 0);
    let domain = Domain::new(profile, 7, UP, UP, count, count);
    let mut helices = DoubleHelices::new(Domains::new(profile, vec![domain, domain], 1, false));
    match helices.compute() {
        Err(DesignError::InsufficientSample { count, needed }) => {
            assert_eq!(count, 1);
            assert_eq!(needed, 2);
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn side_view_samples_are_memoized() {
    let (mut helices, _) = hexagon();
    let first = helices.side_view_samples(42, 4, true).unwrap();
    let second = helices.side_view_samples(42, 4, true).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.len(), 6);
    let nucleosides = helices.side_view_samples(42, 4, false).unwrap();
    assert!(!Arc::ptr_eq(&first, &nucleosides));
    assert!(matches!(
        helices.side_view_samples(20, 4, true),
        Err(DesignError::InsufficientSample {
            count: 20,
            needed: 21
        })
    ));

    helices.mutate_domains(|domains| domains.symmetry = 3);
    let third = helices.side_view_samples(42, 4, true).unwrap();
    assert_eq!(third.len(), 3);
    assert_eq!(helices.len(), 3);

    helices.set_profile(NucleicAcidProfile {
        mate_angle: 130.,
        ..NucleicAcidProfile::DEFAULT
    });
    let fourth = helices.side_view_samples(42, 4, true).unwrap();
    assert!(!Arc::ptr_eq(&third, &fourth));
    assert_eq!(helices.get(0).unwrap().domain.profile.mate_angle, 130.);
}

#[test]
fn subunit_growth_alternates_joints() {
    let profile = NucleicAcidProfile::DEFAULT;
    let count = GenerationCount::new(1, 2, 3);
    let mut subunit = Subunit::new(vec![Domain::new(profile, 5, UP, DOWN, count, count)], true);
    subunit.set_count(3);
    let joints: Vec<(Direction, Direction)> = subunit
        .domains
        .iter()
        .map(|d| (d.left_helix_joint, d.right_helix_joint))
        .collect();
    assert_eq!(joints, vec![(UP, DOWN), (UP, UP), (DOWN, DOWN)]);
    assert!(subunit.domains.iter().all(|d| d.theta_m_multiple == 5));
    assert!(subunit.domains.iter().all(|d| d.up_helix_count == count));
    subunit.set_count(1);
    assert_eq!(subunit.count(), 1);
    let inverted = subunit.inverted();
    assert!(!inverted.template);
    assert_eq!(inverted.domains[0].left_helix_joint, DOWN);
}

#[test]
fn invert_adjusts_the_neighbouring_angles() {
    let mut domains = Domains::from_parameters(&hexagon_parameters()).unwrap();
    domains.invert(1, 2);
    assert_eq!(domains.symmetry, 1);
    assert_eq!(domains.subunit.count(), 6);
    let m: Vec<i32> = domains.domains().iter().map(|d| d.theta_m_multiple).collect();
    assert_eq!(m, vec![0, 14, 14, 0, 7, 7]);
}

#[test]
fn destroy_symmetry_keeps_the_domains() {
    let mut domains = Domains::from_parameters(&hexagon_parameters()).unwrap();
    let before = domains.domains();
    domains.destroy_symmetry();
    assert_eq!(domains.symmetry, 1);
    assert!(domains.subunit.template);
    assert_eq!(domains.domains(), before);
    assert!(domains.closed());
}

#[test]
fn lattice_parameters_are_validated() {
    let mut parameters = hexagon_parameters();
    parameters.symmetry = 0;
    assert!(matches!(
        Domains::from_parameters(&parameters),
        Err(DesignError::MalformedState(_))
    ));
    let domains = Domains::from_parameters(&hexagon_parameters()).unwrap();
    assert_eq!(domains.to_parameters(), hexagon_parameters());
}

#[test]
fn double_helices_from_domains_take_the_profile() {
    let domains = Domains::from_parameters(&hexagon_parameters()).unwrap();
    let mut profile = NucleicAcidProfile::DEFAULT;
    profile.diameter *= 2.;
    let helices = DoubleHelices::from_domains(domains, profile);
    assert_eq!(*helices.profile(), profile);
    assert_eq!(*helices.domains().profile(), profile);
    assert_eq!(helices.len(), 6);
    assert_eq!(helices.get(0).unwrap().domain.profile, profile);
}

#[test]
fn joints_and_counts_parse() {
    assert_eq!(Direction::try_from(1i64).unwrap(), DOWN);
    assert!(matches!(
        Direction::try_from(2i64),
        Err(DesignError::InvalidJoint(2))
    ));
    assert_eq!("UP".parse::<Direction>().unwrap(), UP);
    assert!(matches!(
        "7".parse::<Direction>(),
        Err(DesignError::InvalidJoint(7))
    ));
    assert_eq!(DOWN.inverse(), UP);
    let count: GenerationCount = "2-30-2".parse().unwrap();
    assert_eq!(count, GenerationCount::new(2, 30, 2));
    assert_eq!(count.to_string(), "2-30-2");
    assert_eq!(count.get(1), Some(30));
    assert_eq!(count.sum(), 34);
    assert!("2-30".parse::<GenerationCount>().is_err());
}

#[test]
fn bigger_counts_give_more_junctions() {
    let mut parameters = hexagon_parameters();
    parameters.domains[0].up_helix_count = GenerationCount::new(2, 30, 2);
    parameters.domains[0].down_helix_count = GenerationCount::new(2, 30, 2);
    let mut helices = DoubleHelices::new(Domains::from_parameters(&parameters).unwrap());
    helices.compute().unwrap();
    let strands = helices.strands();
    let junctables = strands.points().filter(|(_, p)| p.is_junctable()).count();
    assert_eq!(junctables, 20);
}

#[test]
fn persisted_state_round_trip() {
    let (helices, mut strands) = hexagon();
    strands
        .conjunct(slot(&strands, 0, UP, 15), slot(&strands, 1, DOWN, 25))
        .unwrap();
    strands.nick(slot(&strands, 3, UP, 7)).unwrap();
    strands
        .link(slot(&strands, 2, UP, 39), slot(&strands, 2, UP, 1))
        .unwrap();
    let s = strand_at(&strands, 4, DOWN, 0);
    strands.randomize_sequence(s, true).unwrap();
    if let Some(strand) = strands.get_mut(&s) {
        strand.name = Some("staple".into());
        strand.color = Some(0xFF_00_00);
    }

    let state = persistence::PersistedState::capture(&helices, &strands);
    let json = state.to_json().unwrap();
    let read = persistence::PersistedState::from_json(&json).unwrap();
    assert_eq!(read, state);
    let (restored_helices, restored_strands) = read.restore().unwrap();
    assert_eq!(
        persistence::PersistedState::capture(&restored_helices, &restored_strands),
        state
    );
    assert_eq!(formated_strands(&restored_strands), formated_strands(&strands));
    assert_points_accounted_for(&restored_strands);
    let p = slot(&restored_strands, 4, DOWN, 0);
    assert_eq!(restored_strands.matching(p), strands.matching(p));
    assert_eq!(
        restored_strands.get(&s).unwrap().name.as_deref(),
        Some("staple")
    );

    let mut restored_strands = restored_strands;
    let nick = restored_strands.nicks().map(|(id, _)| *id).next().unwrap();
    strands.unnick(nick).unwrap();
    restored_strands.unnick(nick).unwrap();
    assert_eq!(formated_strands(&restored_strands), formated_strands(&strands));
    let p = slot(&strands, 3, UP, 9);
    assert_ne!(restored_strands.nick(p).unwrap(), nick);
}

#[test]
fn malformed_states_are_rejected() {
    let (helices, strands) = hexagon();
    let mut state = persistence::PersistedState::capture(&helices, &strands);
    state.strands[0].items.push(persistence::ItemRow::Linkage(4));
    assert!(matches!(
        state.restore(),
        Err(DesignError::MalformedState(_))
    ));
    let mut state = persistence::PersistedState::capture(&helices, &strands);
    let shared = state.strands[0].items[3];
    state.strands[1].items.push(shared);
    assert!(matches!(
        state.restore(),
        Err(DesignError::MalformedState(_))
    ));
    let mut state = persistence::PersistedState::capture(&helices, &strands);
    state.helices[0].slots.truncate(5);
    assert!(matches!(
        state.restore(),
        Err(DesignError::MalformedState(_))
    ));
    let mut state = persistence::PersistedState::capture(&helices, &strands);
    state.strands[0].items.pop();
    assert!(matches!(
        state.restore(),
        Err(DesignError::MalformedState(_))
    ));
    let mut state = persistence::PersistedState::capture(&helices, &strands);
    state.double_helices.pop();
    assert!(matches!(
        state.restore(),
        Err(DesignError::MalformedState(_))
    ));
    assert!(matches!(
        persistence::PersistedState::from_json("{"),
        Err(DesignError::Serialization(_))
    ));
}
