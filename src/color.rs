// src/color.rs

//! The fixed drawing palette.

use serde::{Deserialize, Serialize};

/// The five named colours the renderer can use.
///
/// Resolution to RGB is a compile-time `match`; there is no runtime lookup
/// table keyed by strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedColor {
    Black,
    White,
    Blue,
    Green,
    Red,
}

impl NamedColor {
    pub const COUNT: usize = 5;

    pub const ALL: [NamedColor; NamedColor::COUNT] = [
        NamedColor::Black,
        NamedColor::White,
        NamedColor::Blue,
        NamedColor::Green,
        NamedColor::Red,
    ];

    /// Returns the `(r, g, b)` triple of this colour.
    pub const fn to_rgb(self) -> (u8, u8, u8) {
        match self {
            NamedColor::Black => (0, 0, 0),
            NamedColor::White => (255, 255, 255),
            NamedColor::Blue => (0, 0, 255),
            NamedColor::Green => (0, 255, 0),
            NamedColor::Red => (255, 0, 0),
        }
    }

    /// Position of this colour in `ALL`, for palette tables indexed by colour.
    pub const fn index(self) -> usize {
        self as usize
    }
}
