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
//! Nucleic acid geometric parameters.

/// Geometric parameters of the nucleic acid used to build a lattice.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NucleicAcidProfile {
    /// Diameter of a domain, in nanometers.
    #[serde(rename = "D")]
    pub diameter: f64,
    /// Height of one helical turn, in nanometers.
    #[serde(rename = "H")]
    pub turn_height: f64,
    /// Angle between a base and its mate around the helix axis, in degrees.
    #[serde(rename = "g")]
    pub mate_angle: f64,
    /// Number of turns per repeating unit.
    #[serde(rename = "T")]
    pub turns: u32,
    /// Number of bases per repeating unit.
    #[serde(rename = "B")]
    pub bases: u32,
    /// Characteristic height, in nanometers.
    #[serde(rename = "Z_c")]
    pub characteristic_height: f64,
    /// Vertical offset between a base and its mate, in nanometers.
    #[serde(rename = "Z_mate")]
    pub mate_height: f64,
}

/// Distance under which the two ends of a top view are considered to coincide.
pub const CLOSED_THRESHOLD: f64 = 0.01;

/// Number of junctions a domain joint needs to be considered stable.
pub const DEFAULT_JOINT_THRESHOLD: usize = 2;

impl NucleicAcidProfile {
    /// B-DNA.
    pub const DEFAULT: NucleicAcidProfile = NucleicAcidProfile {
        diameter: 2.2,
        turn_height: 3.549,
        mate_angle: 134.8,
        turns: 2,
        bases: 21,
        characteristic_height: 0.17,
        mate_height: 0.094,
    };

    /// Rise per base, in nanometers.
    pub fn z_b(&self) -> f64 {
        self.turns as f64 * self.turn_height / self.bases as f64
    }

    /// Twist per base, in degrees.
    pub fn theta_b(&self) -> f64 {
        360. * self.turns as f64 / self.bases as f64
    }

    /// Characteristic angle, in degrees.
    pub fn theta_c(&self) -> f64 {
        360. / self.bases as f64
    }

    /// Switch angle, in degrees. It is negative when the mate angle lies closer to the next
    /// multiple of the characteristic angle.
    pub fn theta_s(&self) -> f64 {
        let theta_c = self.theta_c();
        let remainder = self.mate_angle.rem_euclid(theta_c);
        if remainder <= theta_c / 2. {
            remainder
        } else {
            remainder - theta_c
        }
    }

    pub fn formated_string(&self) -> String {
        use std::fmt::Write;
        let mut ret = String::new();
        writeln!(&mut ret, "  Domain diameter: {:.3} nm", self.diameter).unwrap_or_default();
        writeln!(&mut ret, "  Turn height: {:.3} nm", self.turn_height).unwrap_or_default();
        writeln!(&mut ret, "  Mate angle: {:.1}°", self.mate_angle).unwrap_or_default();
        writeln!(
            &mut ret,
            "  {} turns per {} bases",
            self.turns, self.bases
        )
        .unwrap_or_default();
        writeln!(&mut ret, "  Rise per base: {:.4} nm", self.z_b()).unwrap_or_default();
        writeln!(&mut ret, "  Twist per base: {:.4}°", self.theta_b()).unwrap_or_default();
        writeln!(&mut ret, "  Switch angle: {:.4}°", self.theta_s()).unwrap_or_default();
        ret
    }
}

impl std::default::Default for NucleicAcidProfile {
    fn default() -> Self {
        Self::DEFAULT
    }
}
