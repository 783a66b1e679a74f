//! Code table fidelity against the Morse reference list

use morsetx_core::normalize::{resolve, table_slot};
use morsetx_core::table::{symbol_at, ASCII_ENTRIES};
use morsetx_core::{encode, MorseSymbol, MORSE_TABLE};
use rstest::rstest;

use crate::pattern;

#[rstest]
#[case('!', "-.-.--")]
#[case('"', ".-..-.")]
#[case('$', "...-..-")]
#[case('&', ".-...")]
#[case('\'', ".----.")]
#[case('(', "-.--.")]
#[case(')', "-.--.-")]
#[case('+', ".-.-.")]
#[case(',', "--..--")]
#[case('-', "-....-")]
#[case('.', ".-.-.-")]
#[case('/', "-..-.")]
#[case(':', "---...")]
#[case(';', "-.-.-.")]
#[case('=', "-...-")]
#[case('?', "..--..")]
#[case('@', ".--.-.")]
#[case('\\', "......")]
#[case('_', "..--.-")]
#[case('`', ".----.")]
fn test_punctuation(#[case] c: char, #[case] expected: &str) {
    assert_eq!(pattern(encode(c)).as_str(), expected);
}

#[rstest]
#[case('0', "-----")]
#[case('1', ".----")]
#[case('2', "..---")]
#[case('3', "...--")]
#[case('4', "....-")]
#[case('5', ".....")]
#[case('6', "-....")]
#[case('7', "--...")]
#[case('8', "---..")]
#[case('9', "----.")]
fn test_digits(#[case] c: char, #[case] expected: &str) {
    assert_eq!(pattern(encode(c)).as_str(), expected);
}

#[test]
fn test_alphabet() {
    let expected = [
        ".-", "-...", "-.-.", "-..", ".", "..-.", "--.", "....", "..", ".---", "-.-", ".-..", "--",
        "-.", "---", ".--.", "--.-", ".-.", "...", "-", "..-", "...-", ".--", "-..-", "-.--", "--..",
    ];
    for (c, expected) in ('A'..='Z').zip(expected) {
        assert_eq!(pattern(encode(c)).as_str(), expected, "letter {c}");
    }
}

#[rstest]
#[case('Ñ', "--.--")]
#[case('Á', ".--.-")]
#[case('É', "..-..")]
#[case('Í', "..")]
#[case('Ó', "---.")]
#[case('Ú', "..--")]
#[case('Ü', "..--")]
fn test_accented_letters(#[case] c: char, #[case] expected: &str) {
    assert_eq!(pattern(encode(c)).as_str(), expected);
    assert_eq!(resolve(c as u8).sent(), c);
}

#[rstest]
#[case('#')]
#[case('%')]
#[case('*')]
#[case('[')]
#[case(']')]
#[case('^')]
fn test_characters_without_code(#[case] c: char) {
    assert!(encode(c).is_empty());
}

#[test]
fn test_table_shape() {
    assert_eq!(MORSE_TABLE.len(), ASCII_ENTRIES + 6);
    // Every entry carries a terminator
    assert!(MORSE_TABLE.iter().all(|&bits| bits != 0));
}

#[test]
fn test_index_past_end_resolves_as_placeholder() {
    for code in 123u8..=255 {
        let slot = table_slot(code);
        if slot.offset == 0 {
            assert!(slot.is_placeholder(), "code {code}");
            assert_eq!(symbol_at(slot.index as usize), encode('#'));
        }
    }
    assert_eq!(symbol_at(70), MorseSymbol::EMPTY);
}
