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

use std::fmt::Write;

impl Strands {
    /// A textual description of a strand, one bracketed group per run of consecutive slots of a
    /// helix and per linkage.
    pub fn formated_items(&self, strand: StrandId) -> String {
        let mut ret = String::new();
        let strand = match self.get(&strand) {
            Some(s) => s,
            None => return ret,
        };
        let mut run: Option<(HelixId, usize, usize)> = None;
        for item in strand.items.iter() {
            let slot = item
                .point()
                .and_then(|p| self.point(p))
                .and_then(|p| p.helix.zip(p.helical_index));
            match (run, slot) {
                (Some((h, start, end)), Some((helix, index))) if h == helix && index == end + 1 => {
                    run = Some((h, start, index));
                }
                (_, slot) => {
                    if let Some(r) = run.take() {
                        write_run(&mut ret, r);
                    }
                    match slot {
                        Some((helix, index)) => run = Some((helix, index, index)),
                        None => {
                            if let StrandItem::Linkage(l) = item {
                                let len = self.linkage(*l).map(Linkage::len).unwrap_or(0);
                                write!(&mut ret, "[@{}] ", len).unwrap_or_default();
                            } else {
                                write!(&mut ret, "[?] ").unwrap_or_default();
                            }
                        }
                    }
                }
            }
        }
        if let Some(r) = run {
            write_run(&mut ret, r);
        }
        if strand.closed {
            write!(&mut ret, "[closed]").unwrap_or_default();
        }
        ret
    }
}

fn write_run(out: &mut String, (helix, start, end): (HelixId, usize, usize)) {
    write!(
        out,
        "[H{} {}: {} -> {}] ",
        helix.double_helix, helix.direction, start, end
    )
    .unwrap_or_default();
}
