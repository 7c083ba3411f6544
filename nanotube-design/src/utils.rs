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
//! Small numeric and serialization helpers.

/// Number of decimals kept on the coordinates of points.
pub const COORD_DECIMALS: u32 = 5;

const COORD_SCALE: f64 = 100_000.;

/// Round `value` to `decimals` decimals.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Integer image of a coordinate at `COORD_DECIMALS` precision, used to compare positions
/// exactly.
pub fn quantize(value: f64) -> i64 {
    (value * COORD_SCALE).round() as i64
}

/// Quantized fractional part of a coordinate.
pub fn quantized_fraction(value: f64) -> i64 {
    quantize(value).rem_euclid(COORD_SCALE as i64)
}

/// Euclidean distance between two points of the plane.
pub fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

// Serialization utils
//===========================================================================
pub(super) fn is_false(x: &bool) -> bool {
    !*x
}

pub(super) fn default_symmetry() -> usize {
    1
}
//===========================================================================
