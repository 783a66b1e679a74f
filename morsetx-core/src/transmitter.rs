//! Blocking Morse transmitter
//!
//! Every element and every gap is a blocking delay on the caller's thread;
//! a call to [`Transmitter::send_str`] returns once the whole text is on air.

use embedded_hal::delay::DelayNs;

use crate::hal::{block_for_ms, KeyOutput, NoTone, ToneOutput};
use crate::normalize::{self, Action};
use crate::types::{Element, Polarity, Timing, TransmitterConfig, DEFAULT_TONE_HZ};

/// Sidetone output together with its frequency
struct Sidetone<T> {
    output: T,
    frequency_hz: u32,
}

/// Keys a single output (and optional sidetone) in Morse code
pub struct Transmitter<K, D, T = NoTone> {
    key: K,
    delay: D,
    sidetone: Option<Sidetone<T>>,
    timing: Timing,
    polarity: Polarity,
    /// Inside `<...>`: letters run together without letter spacing
    prosign: bool,
}

impl<K, D> Transmitter<K, D, NoTone>
where
    K: KeyOutput,
    D: DelayNs,
{
    /// Transmitter keying `key` only
    pub fn new(key: K, delay: D, speed_wpm: f32, invert: bool) -> Self {
        Self::build(key, delay, None, Timing::from_wpm(speed_wpm), invert)
    }
}

impl<K, D, T> Transmitter<K, D, T>
where
    K: KeyOutput,
    D: DelayNs,
    T: ToneOutput,
{
    /// Transmitter keying `key` and sounding `tone` at `frequency_hz` for
    /// every element.
    ///
    /// The frequency is passed to [`ToneOutput::start_tone`] as is. Outputs
    /// that cannot retune, such as [`PwmTone`](crate::hal::PwmTone), sound
    /// at the carrier of their timer and treat it as advisory.
    pub fn with_tone(
        key: K,
        delay: D,
        speed_wpm: f32,
        tone: T,
        frequency_hz: u32,
        invert: bool,
    ) -> Self {
        let sidetone = Sidetone {
            output: tone,
            frequency_hz,
        };
        Self::build(key, delay, Some(sidetone), Timing::from_wpm(speed_wpm), invert)
    }

    /// Build from a [`TransmitterConfig`]. A tone output without a configured
    /// frequency sounds at [`DEFAULT_TONE_HZ`].
    pub fn from_config(key: K, delay: D, tone: Option<T>, config: &TransmitterConfig) -> Self {
        let sidetone = tone.map(|output| Sidetone {
            output,
            frequency_hz: config.tone_hz.unwrap_or(DEFAULT_TONE_HZ),
        });
        Self::build(key, delay, sidetone, config.timing(), config.invert)
    }

    fn build(
        mut key: K,
        delay: D,
        sidetone: Option<Sidetone<T>>,
        timing: Timing,
        invert: bool,
    ) -> Self {
        let polarity = Polarity::from_inverted(invert);
        key.configure().ok();
        key.set_level(polarity.idle_level()).ok();

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Transmitter ready: dot {} ms, {:?}, sidetone {}",
            timing.dot_ms(),
            polarity,
            sidetone.is_some()
        );

        Self {
            key,
            delay,
            sidetone,
            timing,
            polarity,
            prosign: false,
        }
    }

    /// Send one dot followed by the inter-element gap
    pub fn dot(&mut self) {
        self.key_element(Element::Dit);
    }

    /// Send one dash followed by the inter-element gap
    pub fn dash(&mut self) {
        self.key_element(Element::Dah);
    }

    fn key_element(&mut self, element: Element) {
        if let Some(sidetone) = self.sidetone.as_mut() {
            sidetone.output.start_tone(sidetone.frequency_hz).ok();
        }

        self.key.set_level(self.polarity.active_level()).ok();
        block_for_ms(&mut self.delay, self.timing.element_ms(element));
        self.key.set_level(self.polarity.idle_level()).ok();

        if let Some(sidetone) = self.sidetone.as_mut() {
            sidetone.output.stop_tone().ok();
        }

        block_for_ms(&mut self.delay, self.timing.inter_element_ms());
    }

    /// Send a single character and return what was actually sent.
    ///
    /// Blanks pause for a word gap, `<` and `>` toggle prosign mode, every
    /// other character is case folded and looked up. Control characters and
    /// anything past the table send nothing and return `#`; table slots with
    /// an empty code (`%`, `[`, ...) send nothing and return themselves.
    pub fn send(&mut self, c: char) -> char {
        match normalize::classify(c) {
            Action::WordSpace => {
                block_for_ms(&mut self.delay, self.timing.word_gap_ms());
                ' '
            }
            Action::ProsignToggle(delimiter) => {
                self.prosign = !self.prosign;
                #[cfg(feature = "defmt")]
                defmt::debug!("Prosign mode {}", if self.prosign { "on" } else { "off" });
                delimiter
            }
            Action::Lookup(code) => {
                let resolved = normalize::resolve(code);

                #[cfg(feature = "defmt")]
                if resolved.slot.is_placeholder() && code != b'#' {
                    defmt::debug!("No Morse code for {=u8}, sending placeholder", code);
                }

                for element in resolved.symbol.elements() {
                    self.key_element(element);
                }

                if !self.prosign {
                    block_for_ms(&mut self.delay, self.timing.letter_tail_ms());
                }

                let sent = resolved.sent();
                #[cfg(feature = "defmt")]
                defmt::trace!("Sent {}", sent);
                sent
            }
        }
    }

    /// Send every character of `text` in order, stopping at a NUL
    pub fn send_str(&mut self, text: &str) {
        for c in text.chars().take_while(|&c| c != '\0') {
            self.send(c);
        }
    }

    /// Send Latin-1 encoded bytes in order, stopping at a zero byte
    pub fn send_latin1(&mut self, bytes: &[u8]) {
        for &b in bytes.iter().take_while(|&&b| b != 0) {
            self.send(char::from(b));
        }
    }

    /// True between a `<` and the matching `>`
    pub fn is_prosign(&self) -> bool {
        self.prosign
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Sidetone frequency, if a tone output is attached
    pub fn tone_frequency(&self) -> Option<u32> {
        self.sidetone.as_ref().map(|s| s.frequency_hz)
    }

    /// Give back the key output, delay and tone output
    pub fn release(self) -> (K, D, Option<T>) {
        (self.key, self.delay, self.sidetone.map(|s| s.output))
    }
}
