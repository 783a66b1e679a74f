//! Character normalization ahead of table lookup
//!
//! Every input resolves to something: a word space, a prosign toggle or a
//! table slot. Characters without a Morse equivalent end up on the `#`
//! placeholder slot, which transmits nothing.

use crate::table::{self, MorseSymbol, FIRST_CODE, MORSE_TABLE, PLACEHOLDER, PLACEHOLDER_INDEX};

/// What `send` does with a character
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Blank: pause for a word gap
    WordSpace,
    /// `<` or `>`: flip prosign mode
    ProsignToggle(char),
    /// Anything else, by Latin-1 code
    Lookup(u8),
}

pub fn classify(c: char) -> Action {
    match c {
        ' ' => Action::WordSpace,
        '<' | '>' => Action::ProsignToggle(c),
        _ => match u8::try_from(c) {
            Ok(code) => Action::Lookup(code),
            // Outside Latin-1
            Err(_) => Action::Lookup(PLACEHOLDER as u8),
        },
    }
}

/// Fold ASCII lowercase and the Latin-1 lowercase block (224 and up) onto
/// their capitals.
pub fn fold_case(code: u8) -> u8 {
    if code.is_ascii_lowercase() || code >= 224 {
        code - 32
    } else {
        code
    }
}

/// Control characters become the placeholder
pub fn substitute_control(code: u8) -> u8 {
    if code < FIRST_CODE {
        PLACEHOLDER as u8
    } else {
        code
    }
}

/// Position of a normalized code in the table
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Slot {
    pub index: u8,
    /// Accent offset that was subtracted to reach `index`
    pub offset: u8,
}

impl Slot {
    /// Character the slot stands for, rebuilt as `index + 33 + offset`
    pub fn reported_char(&self) -> char {
        char::from(self.index.wrapping_add(FIRST_CODE).wrapping_add(self.offset))
    }

    pub fn is_placeholder(&self) -> bool {
        self.index == PLACEHOLDER_INDEX
    }
}

/// Compute the table slot, clamping anything past the table onto the
/// placeholder.
pub fn table_slot(code: u8) -> Slot {
    let offset = table::accent_offset(code);
    let index = code.wrapping_sub(FIRST_CODE).wrapping_sub(offset);
    if usize::from(index) >= MORSE_TABLE.len() {
        Slot {
            index: PLACEHOLDER_INDEX,
            offset,
        }
    } else {
        Slot { index, offset }
    }
}

/// Result of resolving a character code
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Resolved {
    pub symbol: MorseSymbol,
    pub slot: Slot,
}

impl Resolved {
    /// The character actually looked up
    pub fn sent(&self) -> char {
        self.slot.reported_char()
    }
}

/// Full lookup path for a Latin-1 code: case fold, control substitution,
/// slot computation and table read.
pub fn resolve(code: u8) -> Resolved {
    let code = substitute_control(fold_case(code));
    let slot = table_slot(code);
    Resolved {
        symbol: table::symbol_at(usize::from(slot.index)),
        slot,
    }
}

/// Morse symbol a character transmits as. Blanks and prosign delimiters
/// carry no elements.
pub fn encode(c: char) -> MorseSymbol {
    match classify(c) {
        Action::Lookup(code) => resolve(code).symbol,
        Action::WordSpace | Action::ProsignToggle(_) => MorseSymbol::EMPTY,
    }
}
