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
//! Repetition of a topology operation along a helix.

use super::*;
use crate::DesignError;

/// The operations that can be repeated along a helix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatedAction {
    Nick,
    Unnick,
    Conjunct,
}

/// How an operation is repeated along a helix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRepeaterProfile {
    pub repeat_every: usize,
    pub repeat_every_multiplier: usize,
    /// Number of repetitions, `None` to go to the end of the helix.
    #[serde(default)]
    pub repeat_for: Option<usize>,
    #[serde(default)]
    pub bidirectional: bool,
}

impl Default for ActionRepeaterProfile {
    fn default() -> Self {
        Self {
            repeat_every: 1,
            repeat_every_multiplier: 2,
            repeat_for: None,
            bidirectional: false,
        }
    }
}

impl ActionRepeaterProfile {
    pub fn stride(&self) -> usize {
        self.repeat_every * self.repeat_every_multiplier
    }

    pub fn run(
        &self,
        strands: &mut Strands,
        action: RepeatedAction,
        first_point: PointId,
    ) -> Result<usize, DesignError> {
        strands.do_many(
            action,
            first_point,
            self.stride(),
            self.repeat_for,
            self.bidirectional,
        )
    }
}

impl Strands {
    /// Apply `action` on the slots of `first_point`'s helix, every `repeat_every` slots.
    ///
    /// Slots on which the action does not apply are skipped. Returns the number of times the
    /// action was applied.
    pub fn do_many(
        &mut self,
        action: RepeatedAction,
        first_point: PointId,
        repeat_every: usize,
        repeat_for: Option<usize>,
        bidirectional: bool,
    ) -> Result<usize, DesignError> {
        let (helix, first) = self
            .point(first_point)
            .and_then(|p| p.helix.zip(p.helical_index))
            .ok_or(DesignError::ForeignPoint(first_point))?;
        let slots = self
            .helix_slots(helix)
            .map(|s| s.to_vec())
            .unwrap_or_default();
        let every = repeat_every.max(1);
        let start = if bidirectional {
            let steps_back = repeat_for.map_or(first / every, |n| n.min(first / every));
            first - steps_back * every
        } else {
            first
        };
        let end = match repeat_for {
            Some(n) => (first + n * every).min(slots.len()),
            None => slots.len(),
        };

        let mut applied = 0;
        for slot in slots.iter().take(end).skip(start).step_by(every) {
            let done = match (action, slot) {
                (RepeatedAction::Nick, HelixSlot::Point(p)) => {
                    let eligible = self.point(*p).map(Point::is_nemid).unwrap_or(false)
                        && self.strand_of(*p).is_some();
                    if eligible {
                        self.nick(*p)?;
                    }
                    eligible
                }
                (RepeatedAction::Unnick, HelixSlot::Nick(n)) => {
                    let eligible = self.nicks.contains_key(n);
                    if eligible {
                        self.unnick(*n)?;
                    }
                    eligible
                }
                (RepeatedAction::Conjunct, HelixSlot::Point(p)) => {
                    let mate = self.point(*p).and_then(Point::juncmate);
                    let eligible = match mate {
                        Some(m) => self.strand_of(*p).is_some() && self.strand_of(m).is_some(),
                        None => false,
                    };
                    if let (true, Some(m)) = (eligible, mate) {
                        self.conjunct(*p, m)?;
                    }
                    eligible
                }
                _ => false,
            };
            if done {
                applied += 1;
            }
        }
        log::debug!(
            "{:?} applied {} times on {:?} from slot {} every {} slots",
            action,
            applied,
            helix,
            start,
            every
        );
        Ok(applied)
    }
}
