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
//! Planning of the strand splices performed by topology operations.
//!
//! The functions of this module only compute the item lists of the resulting strands, they are
//! committed by the caller once every check has passed. Empty results are dropped.

/// A strand and the index at which it is cut.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cut<'a, T> {
    pub items: &'a [T],
    pub closed: bool,
    pub index: usize,
}

/// The items of a strand produced by a splice.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Draft<T> {
    pub items: Vec<T>,
    pub closed: bool,
}

impl<T> Draft<T> {
    fn open(items: Vec<T>) -> Self {
        Self {
            items,
            closed: false,
        }
    }

    fn closed(items: Vec<T>) -> Self {
        Self {
            items,
            closed: true,
        }
    }
}

fn non_empty<T>(drafts: Vec<Draft<T>>) -> Vec<Draft<T>> {
    drafts.into_iter().filter(|d| !d.items.is_empty()).collect()
}

fn concat<T: Clone>(parts: &[&[T]]) -> Vec<T> {
    parts.iter().flat_map(|p| p.iter().cloned()).collect()
}

/// Remove the item at `cut.index`.
///
/// A closed strand is opened at the removed item, an open strand is split in two.
pub(crate) fn remove_item<T: Clone>(cut: Cut<'_, T>) -> Vec<Draft<T>> {
    let (before, after) = (&cut.items[..cut.index], &cut.items[cut.index + 1..]);
    if cut.closed {
        non_empty(vec![Draft::open(concat(&[after, before]))])
    } else {
        non_empty(vec![Draft::open(before.to_vec()), Draft::open(after.to_vec())])
    }
}

/// Join a strand with itself at two of its items.
///
/// The items from the lower index (included) to the higher one (excluded) form a closed loop.
/// The rest keeps the closedness of the original strand.
pub(crate) fn join_with_itself<T: Clone>(cut: Cut<'_, T>, other_index: usize) -> Vec<Draft<T>> {
    let (low, high) = if cut.index <= other_index {
        (cut.index, other_index)
    } else {
        (other_index, cut.index)
    };
    let items = cut.items;
    let loop_draft = Draft::closed(items[low..high].to_vec());
    let rest_draft = if cut.closed {
        log::debug!("splice: closed strand joined with itself");
        Draft::closed(concat(&[&items[high..], &items[..low]]))
    } else {
        log::debug!("splice: open strand joined with itself");
        Draft::open(concat(&[&items[..low], &items[high..]]))
    };
    non_empty(vec![loop_draft, rest_draft])
}

/// Join two different strands, `first` at `first.index` and `second` at `second.index`.
pub(crate) fn join<T: Clone>(first: Cut<'_, T>, second: Cut<'_, T>) -> Vec<Draft<T>> {
    let (i1, i2) = (first.index, second.index);
    match (first.closed, second.closed) {
        (false, false) => {
            log::debug!("splice: two open strands");
            non_empty(vec![
                Draft::open(concat(&[&first.items[..i1], &second.items[i2..]])),
                Draft::open(concat(&[&second.items[..i2], &first.items[i1..]])),
            ])
        }
        (true, true) => {
            log::debug!("splice: two closed strands");
            let mut items = concat(&[
                &first.items[i1..],
                &first.items[..i1],
                &second.items[i2..],
                &second.items[..i2],
            ]);
            items.rotate_right(1);
            non_empty(vec![Draft::closed(items)])
        }
        (first_closed, _) => {
            log::debug!("splice: open strand and closed strand");
            let (open, closed) = if first_closed {
                (second, first)
            } else {
                (first, second)
            };
            // The closed strand is inserted in the open one, starting at its cut point.
            let (o, c) = (open.index, closed.index);
            non_empty(vec![Draft::open(concat(&[
                &open.items[..o],
                &closed.items[c..],
                &closed.items[..c],
                &open.items[o..],
            ]))])
        }
    }
}
