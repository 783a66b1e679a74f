//! Host-side integration tests for the Morse transmitter

use heapless::String;
use morsetx_core::test_utils::signal_capture::{CaptureDelay, CaptureKey, SignalCapture};
use morsetx_core::{MorseSymbol, Transmitter};

#[cfg(test)]
mod table_tests;
#[cfg(test)]
mod property_tests;
#[cfg(test)]
mod adapter_tests;

/// 20 WPM dot length in microseconds
pub const UNIT_US: u64 = 60_000;

/// Dots and dashes of a symbol, e.g. ".-" for A
pub fn pattern(symbol: MorseSymbol) -> String<8> {
    symbol.elements().map(|e| e.as_char()).collect()
}

/// Transmitter wired to a fresh capture at 20 WPM
pub fn capture_transmitter(invert: bool) -> (SignalCapture, Transmitter<CaptureKey, CaptureDelay>) {
    let capture = SignalCapture::new();
    let tx = Transmitter::new(capture.key(), capture.delay(), 20.0, invert);
    (capture, tx)
}
