//! embedded-hal adapters driven through the transmitter

use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use embedded_hal_mock::eh1::digital::{Mock as PinMock, State as PinState, Transaction as PinTransaction};
use morsetx_core::hal::mock::{MockDelay, MockTone};
use morsetx_core::{EmbeddedHalKey, ExclusiveTone, PwmTone, ToneOutput, Transmitter};

#[test]
fn test_embedded_hal_key_sends_letter() {
    let expectations = [
        // idle at construction
        PinTransaction::set(PinState::Low),
        // A: dit, dah
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
    ];
    let mut pin = PinMock::new(&expectations);

    let mut tx = Transmitter::new(EmbeddedHalKey::new(pin.clone()), MockDelay::new(), 20.0, false);
    assert_eq!(tx.send('a'), 'A');

    pin.done();
}

#[test]
fn test_embedded_hal_key_inverted() {
    let expectations = [
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ];
    let mut pin = PinMock::new(&expectations);

    let mut tx = Transmitter::new(EmbeddedHalKey::new(pin.clone()), MockDelay::new(), 20.0, true);
    tx.send_str("E ");

    pin.done();
}

/// PWM channel recording its duty cycle
struct FakePwm {
    duty: u16,
}

impl ErrorType for FakePwm {
    type Error = core::convert::Infallible;
}

impl SetDutyCycle for FakePwm {
    fn max_duty_cycle(&self) -> u16 {
        1000
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.duty = duty;
        Ok(())
    }
}

#[test]
fn test_pwm_tone_gates_channel() {
    let mut tone = PwmTone::new(FakePwm { duty: 0 });

    tone.start_tone(700).unwrap();
    assert_eq!(tone.release().duty, 500);

    let mut tone = PwmTone::new(FakePwm { duty: 500 });
    tone.stop_tone().unwrap();
    assert_eq!(tone.release().duty, 0);
}

#[test]
fn test_pwm_tone_ignores_requested_frequency() {
    for frequency_hz in [300, 700, 2_000] {
        let mut tone = PwmTone::new(FakePwm { duty: 0 });
        tone.start_tone(frequency_hz).unwrap();
        assert_eq!(tone.release().duty, 500, "{frequency_hz} Hz");
    }

    let mut tx = Transmitter::with_tone(
        morsetx_core::hal::mock::MockKeyOutput::new(),
        MockDelay::new(),
        20.0,
        PwmTone::new(FakePwm { duty: 0 }),
        1_234,
        false,
    );
    assert_eq!(tx.tone_frequency(), Some(1_234));
    tx.send('E');
    let (_, _, tone) = tx.release();
    assert_eq!(tone.map(|t| t.release().duty), Some(0));
}

#[test]
fn test_pwm_tone_closed_after_transmission() {
    let pin = PinMock::new(&[
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
    ]);
    let mut tx = Transmitter::with_tone(
        EmbeddedHalKey::new(pin),
        MockDelay::new(),
        20.0,
        PwmTone::new(FakePwm { duty: 0 }),
        700,
        false,
    );

    tx.send('T');

    let (key, _, tone) = tx.release();
    key.release().done();
    assert_eq!(tone.map(|t| t.release().duty), Some(0));
}

#[test]
fn test_two_transmitters_share_one_tone_channel() {
    let mut channel = ExclusiveTone::new(MockTone::new());

    // First user holds the channel; a second start is ignored until it stops
    channel.start_tone(700).unwrap();
    {
        let mut second = Transmitter::with_tone(
            morsetx_core::hal::mock::MockKeyOutput::new(),
            MockDelay::new(),
            20.0,
            &mut channel,
            900,
            false,
        );
        second.send('E');
    }
    assert!(!channel.is_busy());

    let inner = channel.release();
    assert_eq!(inner.starts, 1);
    assert_eq!(inner.stops, 1);
}
