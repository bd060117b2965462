//! The cooperative control loop — the hexagonal core.
//!
//! [`ControlLoop`] owns the [`ControlState`] and two independent
//! [`PeriodicTimer`]s.  Every call to [`tick`](ControlLoop::tick) is one
//! run-to-completion iteration:
//!
//! ```text
//!  InputPort ──▶ 1. read request flag
//!  SensorPort ─▶ 2. sensor timer due?   read → decode → clamp → publish
//! ActuatorPort◀─ 3. actuator timer due? pulse if requested
//!                                              │
//!                       DisplayPort ◀──────────┘  EventSink ◀── events
//! ```
//!
//! Step 2 is always finished before step 3 looks at its timer.  Timers
//! compare elapsed time against the monotonic clock, so a slow iteration
//! delays an expiry but never skips or doubles one.
//!
//! An open thermocouple is an ordinary outcome: the display switches to
//! "not connected", the last good temperature is kept, and the next
//! scheduled poll tries again.

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::config::ControllerConfig;
use crate::control::range::clamp_celsius;
use crate::control::timer::PeriodicTimer;
use crate::sensors::thermocouple::{self, Reading};

use super::events::AppEvent;
use super::ports::{ActuatorPort, DisplayPort, EventSink, InputPort, MonotonicClock, SensorPort};
use super::state::{ControlState, SharedControlState};

/// What one iteration did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// The sensor timer expired and the converter was read.
    pub polled: bool,
    /// `current_temperature` was written this iteration.
    pub temperature_updated: bool,
    /// The actuator was pulsed.
    pub pulsed: bool,
}

pub struct ControlLoop {
    state: ControlState,
    sensor_timer: PeriodicTimer,
    actuator_timer: PeriodicTimer,
    display_max_c: u16,
    idle_delay_ms: u32,
    polls: u32,
    pulses: u32,
}

impl ControlLoop {
    /// Build the loop from configuration.
    ///
    /// Does **not** touch any port — call [`start`](Self::start) next.
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            state: ControlState::INITIAL,
            sensor_timer: PeriodicTimer::new(config.sensor_poll_interval_ms),
            actuator_timer: PeriodicTimer::new(config.actuator_interval_ms),
            display_max_c: config.display_max_c,
            idle_delay_ms: config.idle_delay_ms,
            polls: 0,
            pulses: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Anchor both timers at `now_ms`, force the output off and push the
    /// initial state to the display.
    pub fn start(
        &mut self,
        now_ms: u32,
        hw: &mut impl ActuatorPort,
        ui: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) {
        self.sensor_timer = PeriodicTimer::starting_at(self.sensor_timer.period_ms(), now_ms);
        self.actuator_timer = PeriodicTimer::starting_at(self.actuator_timer.period_ms(), now_ms);

        hw.all_off();
        ui.show_temperature(self.state.current_temperature);
        ui.show_actuator(self.state.actuator_requested);

        sink.emit(&AppEvent::Started(self.state));
        info!(
            "ControlLoop started: poll={}ms pulse={}ms",
            self.sensor_timer.period_ms(),
            self.actuator_timer.period_ms()
        );
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// Run one iteration at time `now_ms`.
    ///
    /// `hw` satisfies both [`SensorPort`] and [`ActuatorPort`], and `ui`
    /// both [`DisplayPort`] and [`InputPort`], mirroring how the real
    /// collaborators are packaged.
    pub fn tick(
        &mut self,
        now_ms: u32,
        hw: &mut (impl SensorPort + ActuatorPort),
        ui: &mut (impl DisplayPort + InputPort),
        sink: &mut impl EventSink,
    ) -> TickReport {
        let mut report = TickReport::default();

        // 1. Operator input
        let requested = ui.actuator_requested();
        if requested != self.state.actuator_requested {
            self.state.actuator_requested = requested;
            ui.show_actuator(requested);
            sink.emit(&AppEvent::ActuatorRequestChanged(requested));
        }

        // 2. Sensor poll
        if self.sensor_timer.expired(now_ms) {
            report.polled = true;
            report.temperature_updated = self.poll_sensor(hw, ui, sink);
        }

        // 3. Actuator pulse
        if self.actuator_timer.expired(now_ms) && self.state.actuator_requested {
            hw.pulse();
            self.pulses = self.pulses.wrapping_add(1);
            report.pulsed = true;
        }

        report
    }

    /// Read → decode → clamp → publish.  Returns whether the temperature
    /// was written.
    fn poll_sensor(
        &mut self,
        hw: &mut impl SensorPort,
        ui: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) -> bool {
        let raw = hw.read_raw();
        let reading = thermocouple::decode(raw);
        self.polls = self.polls.wrapping_add(1);
        sink.emit(&AppEvent::Sample { raw, reading });

        match reading {
            Reading::Fault(fault) => {
                if self.state.sensor_connected {
                    warn!("Sensor fault: {fault}");
                    sink.emit(&AppEvent::SensorFault(fault));
                }
                self.state.sensor_connected = false;
                ui.show_not_connected();
                false
            }
            Reading::Celsius(celsius) => {
                if !self.state.sensor_connected {
                    info!("Sensor reconnected");
                    sink.emit(&AppEvent::SensorRecovered);
                }
                self.state.sensor_connected = true;
                let bounded = clamp_celsius(celsius, self.display_max_c);
                self.state.current_temperature = bounded;
                ui.show_temperature(bounded);
                sink.emit(&AppEvent::TemperatureUpdated(bounded));
                true
            }
        }
    }

    /// Run forever: tick, refresh the display, publish, idle.
    ///
    /// `shared` receives a whole copy of the state after every iteration.
    pub fn run(
        mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        ui: &mut (impl DisplayPort + InputPort),
        sink: &mut impl EventSink,
        clock: &impl MonotonicClock,
        idle: &mut impl DelayNs,
        shared: &SharedControlState,
    ) -> ! {
        self.start(clock.now_ms(), hw, ui, sink);
        ui.refresh();
        shared.publish(self.state);
        loop {
            self.tick(clock.now_ms(), hw, ui, sink);
            ui.refresh();
            shared.publish(self.state);
            idle.delay_ms(self.idle_delay_ms);
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> ControlState {
        self.state
    }

    /// Converter transactions since boot.
    pub fn polls(&self) -> u32 {
        self.polls
    }

    /// Actuator pulses since boot.
    pub fn pulses(&self) -> u32 {
        self.pulses
    }
}
