//! Case folding, totality and round-trip properties

use morsetx_core::hal::mock::{MockDelay, MockKeyOutput};
use morsetx_core::normalize::{fold_case, resolve};
use morsetx_core::{encode, Transmitter, PLACEHOLDER};
use proptest::prelude::*;

fn transmitter() -> Transmitter<MockKeyOutput, MockDelay> {
    Transmitter::new(MockKeyOutput::new(), MockDelay::new(), 40.0, false)
}

/// Every character that has its own table entry, by normalized form
fn representable() -> impl Iterator<Item = char> {
    (33u8..=96)
        .map(char::from)
        .chain(['Ñ', 'Á', 'É', 'Í', 'Ó', 'Ú', 'Ü'])
        .filter(|&c| c != '<' && c != '>')
}

proptest! {
    #[test]
    fn prop_ascii_letters_fold(c in proptest::char::range('a', 'z')) {
        let upper = c.to_ascii_uppercase();
        prop_assert_eq!(encode(c), encode(upper));
        prop_assert_eq!(transmitter().send(c), upper);
    }

    #[test]
    fn prop_latin1_lowercase_folds(code in 224u8..=255) {
        let lower = char::from(code);
        let upper = char::from(fold_case(code));
        prop_assert_eq!(encode(lower), encode(upper));
        prop_assert_eq!(resolve(code), resolve(code - 32));
    }

    #[test]
    fn prop_send_is_total(c in any::<char>()) {
        let mut tx = transmitter();
        let sent = tx.send(c);
        match c {
            ' ' | '<' | '>' => prop_assert_eq!(sent, c),
            _ => prop_assert!(sent == PLACEHOLDER || representable().any(|r| r == sent)),
        }
    }

    #[test]
    fn prop_send_str_never_panics(text in ".{0,16}") {
        let mut tx = transmitter();
        tx.send_str(&text);
    }

    #[test]
    fn prop_send_latin1_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..16)) {
        let mut tx = transmitter();
        tx.send_latin1(&bytes);
    }
}

#[test]
fn test_representable_characters_round_trip() {
    let mut tx = transmitter();
    for c in representable() {
        assert_eq!(tx.send(c), c, "{c:?}");
    }
}

#[test]
fn test_accented_lowercase_round_trip() {
    let mut tx = transmitter();
    for (lower, upper) in [('ñ', 'Ñ'), ('á', 'Á'), ('é', 'É'), ('í', 'Í'), ('ó', 'Ó'), ('ú', 'Ú'), ('ü', 'Ü')] {
        assert_eq!(tx.send(lower), upper);
        assert_eq!(encode(lower), encode(upper));
    }
}
