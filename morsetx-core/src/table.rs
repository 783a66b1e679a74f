//! Character to Morse code table
//!
//! Each entry packs one character into a byte. Elements are read from the
//! least significant bit upward (0 = dit, 1 = dah) and the highest set bit
//! marks the end of the sequence, so a value of `1` is the empty sequence.

use heapless::Vec;

use crate::types::Element;

/// Code of the first table entry (`!`)
pub const FIRST_CODE: u8 = 33;

/// Slot of the placeholder `#`, used for anything without a Morse equivalent
pub const PLACEHOLDER_INDEX: u8 = 2;

/// Character reported when nothing could be transmitted
pub const PLACEHOLDER: char = '#';

/// Number of base ASCII entries (`!` through `` ` ``)
pub const ASCII_ENTRIES: usize = 64;

pub const MORSE_TABLE: [u8; 70] = [
    0b0111_0101, // !
    0b0101_0010, // "
    0b0000_0001, // # (no Morse character)
    0b1100_1000, // $
    0b0000_0001, // % (no Morse character)
    0b0010_0010, // &
    0b0101_1110, // '
    0b0010_1101, // (
    0b0110_1101, // )
    0b0000_0001, // * (no Morse character)
    0b0010_1010, // +
    0b0111_0011, // ,
    0b0110_0001, // -
    0b0110_1010, // .
    0b0010_1001, // /
    0b0011_1111, // 0
    0b0011_1110, // 1
    0b0011_1100, // 2
    0b0011_1000, // 3
    0b0011_0000, // 4
    0b0010_0000, // 5
    0b0010_0001, // 6
    0b0010_0011, // 7
    0b0010_0111, // 8
    0b0010_1111, // 9
    0b0100_0111, // :
    0b0101_0101, // ;
    0b0000_0001, // < (prosign delimiter)
    0b0011_0001, // =
    0b0000_0001, // > (prosign delimiter)
    0b0100_1100, // ?
    0b0101_0110, // @
    0b0000_0110, // A
    0b0001_0001, // B
    0b0001_0101, // C
    0b0000_1001, // D
    0b0000_0010, // E
    0b0001_0100, // F
    0b0000_1011, // G
    0b0001_0000, // H
    0b0000_0100, // I
    0b0001_1110, // J
    0b0000_1101, // K
    0b0001_0010, // L
    0b0000_0111, // M
    0b0000_0101, // N
    0b0000_1111, // O
    0b0001_0110, // P
    0b0001_1011, // Q
    0b0000_1010, // R
    0b0000_1000, // S
    0b0000_0011, // T
    0b0000_1100, // U
    0b0001_1000, // V
    0b0000_1110, // W
    0b0001_1001, // X
    0b0001_1101, // Y
    0b0001_0011, // Z
    0b0000_0001, // [ (no Morse character)
    0b0100_0000, // backslash
    0b0000_0001, // ] (no Morse character)
    0b0000_0001, // ^ (no Morse character)
    0b0110_1100, // _
    0b0101_1110, // `
    0b0011_1011, // Ñ
    0b0011_0110, // Á
    0b0010_0100, // É
    0b0000_0100, // Í
    0b0001_0111, // Ó
    0b0001_1100, // Ú Ü
];

/// Latin-1 code of each accented capital and the offset that moves
/// `code - 33` onto its slot behind the ASCII range.
const ACCENT_OFFSETS: [(u8, u8); 7] = [
    (209, 112), // Ñ -> 64
    (193, 95),  // Á -> 65
    (201, 102), // É -> 66
    (205, 105), // Í -> 67
    (211, 110), // Ó -> 68
    (218, 116), // Ú -> 69
    (220, 118), // Ü -> 69
];

/// Offset to subtract from the base index of an accented capital, 0 for
/// every other code.
pub fn accent_offset(code: u8) -> u8 {
    ACCENT_OFFSETS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, offset)| *offset)
        .unwrap_or(0)
}

/// Bounds-checked table access. Anything past the end reads as the
/// empty sequence.
pub fn symbol_at(index: usize) -> MorseSymbol {
    MORSE_TABLE
        .get(index)
        .copied()
        .map(MorseSymbol)
        .unwrap_or(MorseSymbol::EMPTY)
}

/// A bit-packed Morse sequence
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MorseSymbol(u8);

impl MorseSymbol {
    /// Terminator only, nothing to send
    pub const EMPTY: MorseSymbol = MorseSymbol(1);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(&self) -> u8 {
        self.0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 <= 1
    }

    /// Number of elements in the sequence
    pub const fn len(&self) -> usize {
        if self.0 == 0 {
            0
        } else {
            7 - self.0.leading_zeros() as usize
        }
    }

    /// Elements in transmission order
    pub fn elements(&self) -> Elements {
        Elements { remaining: self.0 }
    }

    pub fn to_elements(&self) -> Vec<Element, 8> {
        self.elements().collect()
    }
}

/// Iterator over the elements of a [`MorseSymbol`]
#[derive(Clone, Debug)]
pub struct Elements {
    remaining: u8,
}

impl Iterator for Elements {
    type Item = Element;

    fn next(&mut self) -> Option<Element> {
        // A zero byte has no terminator; treat it like the empty sequence.
        if self.remaining <= 1 {
            return None;
        }
        let element = if self.remaining & 1 == 1 {
            Element::Dah
        } else {
            Element::Dit
        };
        self.remaining >>= 1;
        Some(element)
    }
}
