//! Test utilities for transmitter core functionality

pub mod signal_capture {
    //! Recording test double for the transmitter's outputs
    //!
    //! The key, tone and delay handles share one virtual clock. Delays advance
    //! the clock instead of blocking, and every level change or tone event is
    //! stamped with the current virtual time.

    use std::cell::RefCell;
    use std::rc::Rc;
    use std::string::String;
    use std::vec::Vec;

    use embedded_hal::delay::DelayNs;

    use crate::hal::{HalError, KeyOutput, ToneOutput};
    use crate::types::{Level, Polarity};

    /// What happened on an output
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum TraceKind {
        Configure,
        Level(Level),
        ToneOn(u32),
        ToneOff,
    }

    /// Captured output event
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TraceEvent {
        pub at_ns: u64,
        pub kind: TraceKind,
    }

    /// One keyed period
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Pulse {
        pub start_us: u64,
        pub duration_us: u64,
    }

    impl Pulse {
        pub fn end_us(&self) -> u64 {
            self.start_us + self.duration_us
        }
    }

    #[derive(Default)]
    struct Trace {
        now_ns: u64,
        events: Vec<TraceEvent>,
    }

    impl Trace {
        fn record(&mut self, kind: TraceKind) {
            let at_ns = self.now_ns;
            self.events.push(TraceEvent { at_ns, kind });
        }
    }

    /// Shared recorder; hand out [`CaptureKey`], [`CaptureTone`] and
    /// [`CaptureDelay`] to a transmitter and inspect the result here.
    #[derive(Clone, Default)]
    pub struct SignalCapture {
        trace: Rc<RefCell<Trace>>,
    }

    impl SignalCapture {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn key(&self) -> CaptureKey {
            CaptureKey {
                trace: Rc::clone(&self.trace),
            }
        }

        pub fn tone(&self) -> CaptureTone {
            CaptureTone {
                trace: Rc::clone(&self.trace),
            }
        }

        pub fn delay(&self) -> CaptureDelay {
            CaptureDelay {
                trace: Rc::clone(&self.trace),
            }
        }

        /// Virtual time elapsed since creation
        pub fn elapsed_us(&self) -> u64 {
            self.trace.borrow().now_ns / 1000
        }

        pub fn events(&self) -> Vec<TraceEvent> {
            self.trace.borrow().events.clone()
        }

        /// Every level written to the key, in order
        pub fn levels(&self) -> Vec<Level> {
            self.trace
                .borrow()
                .events
                .iter()
                .filter_map(|e| match e.kind {
                    TraceKind::Level(level) => Some(level),
                    _ => None,
                })
                .collect()
        }

        /// Periods where the key sat at the active level for `polarity`
        pub fn pulses(&self, polarity: Polarity) -> Vec<Pulse> {
            let active = polarity.active_level();
            let trace = self.trace.borrow();
            let mut pulses = Vec::new();
            let mut started: Option<u64> = None;

            for event in &trace.events {
                if let TraceKind::Level(level) = event.kind {
                    match (level == active, started) {
                        (true, None) => started = Some(event.at_ns),
                        (false, Some(start)) => {
                            pulses.push(Pulse {
                                start_us: start / 1000,
                                duration_us: (event.at_ns - start) / 1000,
                            });
                            started = None;
                        }
                        _ => {}
                    }
                }
            }
            pulses
        }

        /// Idle time between consecutive pulses
        pub fn gaps_us(&self, polarity: Polarity) -> Vec<u64> {
            self.pulses(polarity)
                .windows(2)
                .map(|pair| pair[1].start_us - pair[0].end_us())
                .collect()
        }

        /// Idle time from the end of the last pulse to now
        pub fn trailing_gap_us(&self, polarity: Polarity) -> u64 {
            let end = self.pulses(polarity).last().map(Pulse::end_us).unwrap_or(0);
            self.elapsed_us() - end
        }

        /// Frequencies of every tone start
        pub fn tone_starts(&self) -> Vec<u32> {
            self.trace
                .borrow()
                .events
                .iter()
                .filter_map(|e| match e.kind {
                    TraceKind::ToneOn(hz) => Some(hz),
                    _ => None,
                })
                .collect()
        }

        pub fn tone_stops(&self) -> usize {
            self.trace
                .borrow()
                .events
                .iter()
                .filter(|e| e.kind == TraceKind::ToneOff)
                .count()
        }

        /// True when every pulse starts right after a tone start and ends
        /// right before a tone stop, with no time passing in between.
        pub fn tone_brackets_pulses(&self, polarity: Polarity) -> bool {
            let active = polarity.active_level();
            let idle = polarity.idle_level();
            let events = self.events();
            let pulses = events
                .iter()
                .enumerate()
                .filter(|(_, e)| e.kind == TraceKind::Level(active));

            let mut checked = 0;
            for (i, on) in pulses {
                let tone_before = i
                    .checked_sub(1)
                    .map(|j| events[j])
                    .filter(|e| matches!(e.kind, TraceKind::ToneOn(_)) && e.at_ns == on.at_ns);
                let off = events[i + 1..]
                    .iter()
                    .position(|e| e.kind == TraceKind::Level(idle))
                    .map(|k| i + 1 + k);
                let tone_after = off
                    .and_then(|k| events.get(k + 1).map(|e| (events[k], *e)))
                    .filter(|(key_up, tone)| tone.kind == TraceKind::ToneOff && tone.at_ns == key_up.at_ns);

                if tone_before.is_none() || tone_after.is_none() {
                    return false;
                }
                checked += 1;
            }
            checked > 0
        }

        /// Polarity implied by the first level written, which is the idle
        /// level set at construction
        pub fn idle_polarity(&self) -> Polarity {
            match self.levels().first() {
                Some(Level::High) => Polarity::Inverted,
                _ => Polarity::Normal,
            }
        }

        /// Render the keyed pulses as dots and dashes. Letters are separated
        /// by a blank, words by " / ".
        pub fn to_morse_string(&self, unit_us: u64) -> String {
            let pulses = self.pulses(self.idle_polarity());

            let mut result = String::new();
            for (i, pulse) in pulses.iter().enumerate() {
                if i > 0 {
                    let gap = pulse.start_us - pulses[i - 1].end_us();
                    if gap >= 5 * unit_us {
                        result.push_str(" / ");
                    } else if gap >= 2 * unit_us {
                        result.push(' ');
                    }
                }
                result.push(if pulse.duration_us >= 2 * unit_us { '-' } else { '.' });
            }
            result
        }
    }

    /// Key output handle recording level changes
    pub struct CaptureKey {
        trace: Rc<RefCell<Trace>>,
    }

    impl KeyOutput for CaptureKey {
        type Error = HalError;

        fn configure(&mut self) -> Result<(), Self::Error> {
            self.trace.borrow_mut().record(TraceKind::Configure);
            Ok(())
        }

        fn set_level(&mut self, level: Level) -> Result<(), Self::Error> {
            self.trace.borrow_mut().record(TraceKind::Level(level));
            Ok(())
        }
    }

    /// Tone output handle recording starts and stops
    pub struct CaptureTone {
        trace: Rc<RefCell<Trace>>,
    }

    impl ToneOutput for CaptureTone {
        type Error = HalError;

        fn start_tone(&mut self, frequency_hz: u32) -> Result<(), Self::Error> {
            self.trace.borrow_mut().record(TraceKind::ToneOn(frequency_hz));
            Ok(())
        }

        fn stop_tone(&mut self) -> Result<(), Self::Error> {
            self.trace.borrow_mut().record(TraceKind::ToneOff);
            Ok(())
        }
    }

    /// Delay handle advancing the virtual clock
    pub struct CaptureDelay {
        trace: Rc<RefCell<Trace>>,
    }

    impl DelayNs for CaptureDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.trace.borrow_mut().now_ns += u64::from(ns);
        }

        fn delay_us(&mut self, us: u32) {
            self.trace.borrow_mut().now_ns += u64::from(us) * 1000;
        }
    }

}
