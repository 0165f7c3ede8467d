//! Board composition
//!
//! The board ties the heartbeat dispatcher, the button task, a sample
//! source and the LED bank together behind a small init/run lifecycle:
//!
//! ```text
//!   tick source ─► heartbeat() ─► alarms ─► event queue ─► poll()
//!                                                            │
//!                        ButtonTask events ◄─────────────────┤
//!                        run button task, queue notifications│
//!                                                            ▼
//!                                            other events ─► application
//! ```

use crate::button::{ButtonState, ButtonTask, TaskStatus, TimedSamples};
use crate::config::BoardConfig;
use crate::dispatch::{AlarmId, Dispatcher};
use crate::event::{Event, EventId, EventSink, PostError};
use crate::time::Millis;
use crate::traits::{LedOutput, SampleSource};

/// Number of LEDs on the board
pub const NUM_LEDS: usize = 4;

/// Software alarm slots
pub const ALARM_SLOTS: usize = 4;

/// Event queue depth
pub const QUEUE_DEPTH: usize = 32;

/// Board error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardError {
    /// `init()` has not completed
    NotInitialized,
    /// Argument out of range
    BadParam,
    /// Initialization failed
    InitFailed,
}

/// The board's LEDs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Led {
    Led1,
    Led2,
    Led3,
    Led4,
}

impl Led {
    pub const ALL: [Led; NUM_LEDS] = [Led::Led1, Led::Led2, Led::Led3, Led::Led4];

    /// Position in the LED bank
    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<usize> for Led {
    type Error = BoardError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Led::ALL.get(index).copied().ok_or(BoardError::BadParam)
    }
}

/// A board with `N` buttons
pub struct Board<L: LedOutput, S: SampleSource, const N: usize> {
    config: BoardConfig,
    dispatcher: Dispatcher<ALARM_SLOTS, QUEUE_DEPTH>,
    buttons: ButtonTask<N>,
    button_alarm: Option<AlarmId>,
    samples: S,
    leds: [L; NUM_LEDS],
    initialized: bool,
}

impl<L: LedOutput, S: SampleSource, const N: usize> Board<L, S, N> {
    /// Assemble a board; nothing runs until [`Board::init`]
    pub fn new(config: BoardConfig, samples: S, leds: [L; NUM_LEDS]) -> Self {
        Self {
            dispatcher: Dispatcher::new(config.timing.heartbeat_ms),
            buttons: ButtonTask::new(config.button_timing()),
            button_alarm: None,
            samples,
            leds,
            config,
            initialized: false,
        }
    }

    /// Bring the board up
    ///
    /// Validates the configuration, registers the button alarm and turns
    /// every LED off. Calling it again is a no-op.
    pub fn init(&mut self) -> Result<(), BoardError> {
        if self.initialized {
            return Ok(());
        }

        if let Err(err) = self.config.validate() {
            log_warn!("board: invalid config: {:?}", err);
            return Err(BoardError::InitFailed);
        }

        if self.samples.channels() < N {
            log_warn!("board: {} buttons but {} sample channels", N, self.samples.channels());
            return Err(BoardError::InitFailed);
        }

        let alarm = self
            .dispatcher
            .register(self.config.timing.button_period_ms, EventId::ButtonTask)
            .map_err(|_| BoardError::InitFailed)?;
        self.button_alarm = Some(alarm);

        for led in self.leds.iter_mut() {
            led.set_on(false);
        }

        self.initialized = true;
        log_info!(
            "board: up, {} buttons sampled every {} ms",
            N,
            self.config.timing.button_period_ms
        );
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn ensure_initialized(&self) -> Result<(), BoardError> {
        if self.initialized {
            Ok(())
        } else {
            Err(BoardError::NotInitialized)
        }
    }

    /// Run one heartbeat
    ///
    /// Returns the number of alarms that expired.
    pub fn heartbeat(&mut self) -> Result<usize, BoardError> {
        self.ensure_initialized()?;
        Ok(self.dispatcher.heartbeat())
    }

    /// Take the next application event
    ///
    /// `ButtonTask` events are consumed here by running the button task;
    /// the notifications it posts come out of later calls. `ButtonTask`
    /// events still queued when the task halts are discarded. Returns
    /// `Ok(None)` once the queue is empty.
    pub fn poll(&mut self) -> Result<Option<Event>, BoardError> {
        self.ensure_initialized()?;

        while let Some(event) = self.dispatcher.next_event() {
            if event.id != EventId::ButtonTask {
                return Ok(Some(event));
            }
            if self.button_task_halted() {
                log_debug!("board: dropping {:?} while halted", event);
                continue;
            }

            let mut io = TimedSamples::new(&mut self.samples, self.dispatcher.now());
            if self.buttons.run(event, &mut io, &mut self.dispatcher) == TaskStatus::Halted {
                if let Some(alarm) = self.button_alarm {
                    self.dispatcher.disable(alarm);
                }
            }
        }

        Ok(None)
    }

    /// Post an application event
    pub fn post(&mut self, event: Event) -> Result<(), PostError> {
        self.dispatcher.post(event)
    }

    /// Check if the button alarm was stopped by a missing transition
    pub fn button_task_halted(&self) -> bool {
        self.button_alarm
            .map(|alarm| !self.dispatcher.is_enabled(alarm))
            .unwrap_or(false)
    }

    /// Restart a halted button alarm
    ///
    /// Channels resume in whatever state they were left in; use
    /// [`Board::reset_button`] to start a channel over.
    pub fn rearm_buttons(&mut self) -> Result<(), BoardError> {
        self.ensure_initialized()?;
        if let Some(alarm) = self.button_alarm {
            self.dispatcher.enable(alarm);
        }
        Ok(())
    }

    /// Force a button channel back to `Start`
    pub fn reset_button(&mut self, channel: usize) -> Result<(), BoardError> {
        self.ensure_initialized()?;
        if self.buttons.reset(channel) {
            Ok(())
        } else {
            Err(BoardError::BadParam)
        }
    }

    /// Debounced state of a button
    pub fn button_state(&self, channel: usize) -> Result<ButtonState, BoardError> {
        self.ensure_initialized()?;
        self.buttons.state(channel).ok_or(BoardError::BadParam)
    }

    pub fn set_led(&mut self, led: Led, on: bool) -> Result<(), BoardError> {
        self.ensure_initialized()?;
        self.leds[led.index()].set_on(on);
        Ok(())
    }

    pub fn toggle_led(&mut self, led: Led) -> Result<(), BoardError> {
        self.ensure_initialized()?;
        self.leds[led.index()].toggle();
        Ok(())
    }

    pub fn led(&self, led: Led) -> Result<bool, BoardError> {
        self.ensure_initialized()?;
        Ok(self.leds[led.index()].is_on())
    }

    /// Board clock
    pub fn now(&self) -> Millis {
        self.dispatcher.now()
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn buttons(&self) -> &ButtonTask<N> {
        &self.buttons
    }

    /// The sample source, for simulated inputs
    pub fn samples_mut(&mut self) -> &mut S {
        &mut self.samples
    }
}
