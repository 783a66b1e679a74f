//! Core data types for the Morse transmitter

/// Morse code elements
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "std", derive(Hash))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Element {
    /// Dit (short element)
    Dit,
    /// Dah (long element)
    Dah,
}

impl Element {
    /// Returns the keyed duration of this element in units
    pub const fn duration_units(&self) -> u32 {
        match self {
            Element::Dit => 1,
            Element::Dah => 3,
        }
    }

    /// Conventional text rendering ('.' or '-')
    pub const fn as_char(&self) -> char {
        match self {
            Element::Dit => '.',
            Element::Dah => '-',
        }
    }
}

/// Electrical level of an output pin
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl Level {
    pub const fn inverted(&self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

/// Key output polarity
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Idle low, keyed high
    Normal,
    /// Idle high, keyed low (open collector drivers, active-low relays)
    Inverted,
}

impl Polarity {
    pub const fn from_inverted(invert: bool) -> Self {
        if invert {
            Polarity::Inverted
        } else {
            Polarity::Normal
        }
    }

    /// Level while nothing is being transmitted
    pub const fn idle_level(&self) -> Level {
        match self {
            Polarity::Normal => Level::Low,
            Polarity::Inverted => Level::High,
        }
    }

    /// Level while an element is keyed
    pub const fn active_level(&self) -> Level {
        self.idle_level().inverted()
    }
}

/// PARIS standard: one dot lasts 1200 ms divided by the speed in WPM
pub const PARIS_DOT_MS: f32 = 1200.0;

/// Element and gap durations derived from a keying speed.
///
/// All values are fractional milliseconds so that speeds below 1 WPM and
/// speeds that do not divide 1200 evenly keep their exact ratios.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    dot_ms: f32,
}

impl Timing {
    /// Derive timing from a speed in words per minute.
    ///
    /// Zero, negative and non-finite speeds fall back to 1 WPM instead of
    /// failing.
    pub fn from_wpm(speed_wpm: f32) -> Self {
        let wpm = effective_wpm(speed_wpm);
        Self {
            dot_ms: PARIS_DOT_MS / wpm,
        }
    }

    /// Dot length (one unit)
    pub fn dot_ms(&self) -> f32 {
        self.dot_ms
    }

    /// Dash length, exactly three units
    pub fn dash_ms(&self) -> f32 {
        self.element_ms(Element::Dah)
    }

    /// Keyed duration of a single element
    pub fn element_ms(&self, element: Element) -> f32 {
        self.dot_ms * element.duration_units() as f32
    }

    /// Gap following every element
    pub fn inter_element_ms(&self) -> f32 {
        self.dot_ms
    }

    /// Extra gap after a letter; together with the inter-element gap it
    /// makes the three unit letter space
    pub fn letter_tail_ms(&self) -> f32 {
        2.0 * self.dot_ms
    }

    /// Pause sent for a blank
    pub fn word_gap_ms(&self) -> f32 {
        7.0 * self.dot_ms
    }

    /// Speed in words per minute corresponding to the dot length
    pub fn wpm(&self) -> f32 {
        PARIS_DOT_MS / self.dot_ms
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::from_wpm(DEFAULT_WPM)
    }
}

/// Default keying speed
pub const DEFAULT_WPM: f32 = 20.0;

/// Sidetone frequency used when none is configured
pub const DEFAULT_TONE_HZ: u32 = 700;

fn effective_wpm(speed_wpm: f32) -> f32 {
    if speed_wpm.is_finite() && speed_wpm > 0.0 {
        speed_wpm
    } else {
        1.0
    }
}

/// Transmitter configuration parameters
///
/// Nothing here is validated: out of range values are tolerated and folded
/// to safe defaults when the transmitter is built.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransmitterConfig {
    /// Keying speed in words per minute
    pub speed_wpm: f32,
    /// Drive the key output active-low
    pub invert: bool,
    /// Sidetone frequency, used when a tone output is attached
    pub tone_hz: Option<u32>,
}

impl Default for TransmitterConfig {
    fn default() -> Self {
        Self {
            speed_wpm: DEFAULT_WPM,
            invert: false,
            tone_hz: None,
        }
    }
}

impl TransmitterConfig {
    pub fn new(speed_wpm: f32, invert: bool) -> Self {
        Self {
            speed_wpm,
            invert,
            tone_hz: None,
        }
    }

    /// Same configuration with a sidetone frequency
    pub fn with_tone(mut self, tone_hz: u32) -> Self {
        self.tone_hz = Some(tone_hz);
        self
    }

    pub fn timing(&self) -> Timing {
        Timing::from_wpm(self.speed_wpm)
    }

    pub fn polarity(&self) -> Polarity {
        Polarity::from_inverted(self.invert)
    }
}
