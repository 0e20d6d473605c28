//! Single-zero wheel layout.

/// Highest number on the wheel.
pub const MAX_NUMBER: u8 = 36;

/// Number of pockets.
pub const POCKETS: usize = 37;

/// Red numbers on a European wheel.
pub const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

/// Pocket order clockwise from zero.
pub const WHEEL_ORDER: [u8; POCKETS] = [
    0, 32, 15, 19, 4, 21, 2, 25, 17, 34, 6, 27, 13, 36, 11, 30, 8, 23, 10, 5, 24, 16, 33, 1, 20,
    14, 31, 9, 22, 18, 29, 7, 28, 12, 35, 3, 26,
];

/// Pocket color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    /// Zero.
    Green,
    /// Red pocket.
    Red,
    /// Black pocket.
    Black,
}

/// Returns whether `number` is red.
#[must_use]
pub const fn is_red(number: u8) -> bool {
    let mut i = 0;
    while i < RED_NUMBERS.len() {
        if RED_NUMBERS[i] == number {
            return true;
        }
        i += 1;
    }
    false
}

/// Color of the pocket holding `number`.
#[must_use]
pub const fn color_of(number: u8) -> Color {
    if number == 0 || number > MAX_NUMBER {
        Color::Green
    } else if is_red(number) {
        Color::Red
    } else {
        Color::Black
    }
}

/// Position of `number` in [`WHEEL_ORDER`].
#[must_use]
pub fn pocket_index(number: u8) -> Option<usize> {
    WHEEL_ORDER.iter().position(|&pocket| pocket == number)
}

/// Absolute wheel rotation, in degrees, that leaves `number` under the
/// pointer after `full_rotations` extra turns from `current`.
///
/// Purely cosmetic; the outcome is decided before this is computed.
#[must_use]
pub fn target_rotation(number: u8, current: f64, full_rotations: u32) -> f64 {
    let slice = 360.0 / POCKETS as f64;
    let index = pocket_index(number).unwrap_or(0) as f64;
    let landing = (360.0 - index * slice) % 360.0;
    let offset = ((landing - current % 360.0) % 360.0 + 360.0) % 360.0;
    current + f64::from(full_rotations) * 360.0 + offset
}
