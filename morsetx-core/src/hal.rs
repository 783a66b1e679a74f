//! Hardware Abstraction Layer for the transmitter
//!
//! The transmitter only needs three capabilities from the platform: a key
//! output it can drive high or low, a blocking delay and, optionally, a tone
//! generator for sidetone.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::types::Level;

#[cfg(feature = "embassy-time")]
pub use embassy_time::Delay as EmbassyDelay;

/// Error types for HAL operations
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError {
    /// GPIO operation failed
    GpioError,
    /// Tone generator operation failed
    ToneError,
    /// Hardware not initialized
    NotInitialized,
}

#[cfg(feature = "std")]
impl core::fmt::Display for HalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HalError::GpioError => write!(f, "GPIO operation failed"),
            HalError::ToneError => write!(f, "Tone generator operation failed"),
            HalError::NotInitialized => write!(f, "Hardware not initialized"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

/// Trait for key output control
pub trait KeyOutput {
    type Error: From<HalError>;

    /// Put the channel into output mode
    fn configure(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Drive the output to an electrical level
    fn set_level(&mut self, level: Level) -> Result<(), Self::Error>;
}

/// Trait for sidetone generation
pub trait ToneOutput {
    type Error: From<HalError>;

    /// Start a square wave at `frequency_hz`
    fn start_tone(&mut self, frequency_hz: u32) -> Result<(), Self::Error>;

    /// Silence the channel
    fn stop_tone(&mut self) -> Result<(), Self::Error>;
}

/// Block for a fractional number of milliseconds.
///
/// The duration is rounded to whole microseconds and split into chunks that
/// fit the `u32` argument of [`DelayNs::delay_us`], so gaps at very low
/// speeds are not truncated. Negative and NaN durations do not block.
pub fn block_for_ms<D: DelayNs + ?Sized>(delay: &mut D, ms: f32) {
    // Float to int casts saturate, so negative and NaN come out as zero
    let mut remaining_us = (ms * 1000.0 + 0.5) as u64;
    while remaining_us > 0 {
        let step = remaining_us.min(u64::from(u32::MAX)) as u32;
        delay.delay_us(step);
        remaining_us -= u64::from(step);
    }
}

/// Key output over any embedded-hal output pin
pub struct EmbeddedHalKey<P> {
    pin: P,
}

impl<P> EmbeddedHalKey<P>
where
    P: OutputPin,
{
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P> KeyOutput for EmbeddedHalKey<P>
where
    P: OutputPin,
{
    type Error = HalError;

    fn set_level(&mut self, level: Level) -> Result<(), Self::Error> {
        match level {
            Level::High => self.pin.set_high(),
            Level::Low => self.pin.set_low(),
        }
        .map_err(|_| HalError::GpioError)
    }
}

/// Sidetone over a PWM channel.
///
/// The carrier frequency is set by the timer that drives the channel, so the
/// frequency handed to `start_tone` is advisory. Starting the tone opens the
/// channel at 50% duty and stopping it closes the channel.
pub struct PwmTone<P> {
    channel: P,
}

impl<P> PwmTone<P>
where
    P: SetDutyCycle,
{
    pub fn new(channel: P) -> Self {
        Self { channel }
    }

    pub fn release(self) -> P {
        self.channel
    }
}

impl<P> ToneOutput for PwmTone<P>
where
    P: SetDutyCycle,
{
    type Error = HalError;

    fn start_tone(&mut self, frequency_hz: u32) -> Result<(), Self::Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!("PWM tone at timer carrier, {} Hz requested", frequency_hz);
        #[cfg(not(feature = "defmt"))]
        let _ = frequency_hz;

        self.channel
            .set_duty_cycle_percent(50)
            .map_err(|_| HalError::ToneError)
    }

    fn stop_tone(&mut self) -> Result<(), Self::Error> {
        self.channel
            .set_duty_cycle_fully_off()
            .map_err(|_| HalError::ToneError)
    }
}

/// Tone output for transmitters without sidetone
#[derive(Copy, Clone, Debug, Default)]
pub struct NoTone;

impl ToneOutput for NoTone {
    type Error = HalError;

    fn start_tone(&mut self, _frequency_hz: u32) -> Result<(), Self::Error> {
        Ok(())
    }

    fn stop_tone(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Guard for a platform with a single tone channel.
///
/// A start while the channel is already sounding is ignored, leaving the
/// running tone untouched. A stop always silences the channel and frees it.
pub struct ExclusiveTone<T> {
    inner: T,
    busy: bool,
}

impl<T> ExclusiveTone<T>
where
    T: ToneOutput,
{
    pub fn new(inner: T) -> Self {
        Self { inner, busy: false }
    }

    /// True while a tone is running
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn release(self) -> T {
        self.inner
    }
}

impl<T> ToneOutput for ExclusiveTone<T>
where
    T: ToneOutput,
{
    type Error = T::Error;

    fn start_tone(&mut self, frequency_hz: u32) -> Result<(), Self::Error> {
        if self.busy {
            #[cfg(feature = "defmt")]
            defmt::warn!("Tone channel already in use");
            return Ok(());
        }
        self.inner.start_tone(frequency_hz)?;
        self.busy = true;
        Ok(())
    }

    fn stop_tone(&mut self) -> Result<(), Self::Error> {
        self.busy = false;
        self.inner.stop_tone()
    }
}

impl<K: KeyOutput + ?Sized> KeyOutput for &mut K {
    type Error = K::Error;

    fn configure(&mut self) -> Result<(), Self::Error> {
        K::configure(self)
    }

    fn set_level(&mut self, level: Level) -> Result<(), Self::Error> {
        K::set_level(self, level)
    }
}

impl<T: ToneOutput + ?Sized> ToneOutput for &mut T {
    type Error = T::Error;

    fn start_tone(&mut self, frequency_hz: u32) -> Result<(), Self::Error> {
        T::start_tone(self, frequency_hz)
    }

    fn stop_tone(&mut self) -> Result<(), Self::Error> {
        T::stop_tone(self)
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    //! Mock implementations for testing

    use super::*;
    use core::cell::RefCell;

    #[derive(Default)]
    pub struct MockKeyOutput {
        level: RefCell<Option<Level>>,
        configured: RefCell<bool>,
    }

    impl MockKeyOutput {
        pub fn new() -> Self {
            Self::default()
        }

        /// Last level written, `None` before the first write
        pub fn level(&self) -> Option<Level> {
            *self.level.borrow()
        }

        pub fn is_configured(&self) -> bool {
            *self.configured.borrow()
        }
    }

    impl KeyOutput for MockKeyOutput {
        type Error = HalError;

        fn configure(&mut self) -> Result<(), Self::Error> {
            *self.configured.borrow_mut() = true;
            Ok(())
        }

        fn set_level(&mut self, level: Level) -> Result<(), Self::Error> {
            *self.level.borrow_mut() = Some(level);
            Ok(())
        }
    }

    /// Tone output counting starts and stops
    #[derive(Default)]
    pub struct MockTone {
        pub starts: u32,
        pub stops: u32,
        pub frequency_hz: Option<u32>,
    }

    impl MockTone {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl ToneOutput for MockTone {
        type Error = HalError;

        fn start_tone(&mut self, frequency_hz: u32) -> Result<(), Self::Error> {
            self.starts += 1;
            self.frequency_hz = Some(frequency_hz);
            Ok(())
        }

        fn stop_tone(&mut self) -> Result<(), Self::Error> {
            self.stops += 1;
            self.frequency_hz = None;
            Ok(())
        }
    }

    /// Key output whose every operation fails
    #[derive(Default)]
    pub struct FailingKeyOutput;

    impl KeyOutput for FailingKeyOutput {
        type Error = HalError;

        fn configure(&mut self) -> Result<(), Self::Error> {
            Err(HalError::NotInitialized)
        }

        fn set_level(&mut self, _level: Level) -> Result<(), Self::Error> {
            Err(HalError::GpioError)
        }
    }

    /// Delay that accumulates the requested time without blocking
    #[derive(Default)]
    pub struct MockDelay {
        pub elapsed_ns: u64,
    }

    impl MockDelay {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn elapsed_us(&self) -> u64 {
            self.elapsed_ns / 1000
        }
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.elapsed_ns += u64::from(ns);
        }

        fn delay_us(&mut self, us: u32) {
            self.elapsed_ns += u64::from(us) * 1000;
        }

        fn delay_ms(&mut self, ms: u32) {
            self.elapsed_ns += u64::from(ms) * 1_000_000;
        }
    }
}
