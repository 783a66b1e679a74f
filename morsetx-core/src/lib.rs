#![cfg_attr(not(any(test, feature = "std")), no_std)]

//! # MorseTx Core
//!
//! Blocking Morse code transmitter for embedded systems.
//! Turns ASCII and Latin-1 text into keyed pulses on an output pin, with
//! optional sidetone, standard 1:3 dot/dash timing and `<...>` prosigns.

pub mod types;
pub mod table;
pub mod normalize;
pub mod transmitter;
pub mod hal;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use types::*;
pub use table::{MorseSymbol, MORSE_TABLE, PLACEHOLDER};
pub use normalize::encode;
pub use transmitter::*;
pub use hal::*;

/// Transmitter library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration: 20 WPM, key active-high, no sidetone
pub fn default_config() -> TransmitterConfig {
    TransmitterConfig {
        speed_wpm: DEFAULT_WPM,
        invert: false,
        tone_hz: None,
    }
}
