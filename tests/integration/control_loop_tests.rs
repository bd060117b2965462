//! Integration tests for the ControlLoop → ports pipeline.
//!
//! Drive the loop with a synthetic millisecond clock against the recording
//! mocks and assert on what reached the display, the motor and the sink.

use std::cell::RefCell;
use std::rc::Rc;

use thermogauge::app::control_loop::ControlLoop;
use thermogauge::app::events::AppEvent;
use thermogauge::app::ports::{ActuatorPort, SensorPort};
use thermogauge::config::ControllerConfig;
use thermogauge::error::SensorFault;
use thermogauge::sensors::thermocouple::RawSample;

use crate::mock_hw::{ActuatorCall, DisplayCall, LogSink, MockHardware, MockUi};

const OPEN: u16 = 0x0004;
/// 12.5 °C
const T_12_5: u16 = 0x0190;
/// 600.0 °C (2400 quarter-degrees)
const T_600: u16 = 2400 << 3;
/// 100.0 °C
const T_100: u16 = 400 << 3;

fn make_loop(frame: u16) -> (ControlLoop, MockHardware, MockUi, LogSink) {
    let mut cl = ControlLoop::new(&ControllerConfig::default());
    let mut hw = MockHardware::new(frame);
    let mut ui = MockUi::new();
    let mut sink = LogSink::new();
    cl.start(0, &mut hw, &mut ui, &mut sink);
    (cl, hw, ui, sink)
}

/// Tick every `step` ms over `(from, to]`, like the 5 ms idle cadence.
fn run_span(
    cl: &mut ControlLoop,
    hw: &mut MockHardware,
    ui: &mut MockUi,
    sink: &mut LogSink,
    from: u32,
    to: u32,
    step: u32,
) {
    let mut t = from + step;
    while t <= to {
        cl.tick(t, hw, ui, sink);
        t += step;
    }
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_publishes_initial_state() {
    let (cl, hw, ui, sink) = make_loop(T_12_5);

    assert_eq!(hw.calls, vec![ActuatorCall::AllOff]);
    assert_eq!(ui.calls, vec![DisplayCall::Temperature(0), DisplayCall::Actuator(false)]);
    assert!(matches!(sink.events[0], AppEvent::Started(s) if s == cl.state()));

    let s = cl.state();
    assert_eq!(s.current_temperature, 0);
    assert!(!s.actuator_requested);
    assert!(s.sensor_connected);
}

// ── Scenario 1: open circuit ──────────────────────────────────

#[test]
fn open_circuit_shows_not_connected_and_keeps_temperature() {
    let (mut cl, mut hw, mut ui, mut sink) = make_loop(T_100);
    cl.tick(1000, &mut hw, &mut ui, &mut sink);
    assert_eq!(cl.state().current_temperature, 100);

    hw.set_frame(OPEN);
    let report = cl.tick(2000, &mut hw, &mut ui, &mut sink);

    assert!(report.polled);
    assert!(!report.temperature_updated);
    assert!(ui.shows_not_connected());
    assert_eq!(cl.state().current_temperature, 100, "last good value kept");
    assert!(!cl.state().sensor_connected);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::SensorFault(SensorFault::OpenCircuit))),
        1
    );
}

#[test]
fn fault_is_sticky_until_next_good_poll() {
    let (mut cl, mut hw, mut ui, mut sink) = make_loop(OPEN);

    run_span(&mut cl, &mut hw, &mut ui, &mut sink, 0, 3000, 5);
    assert_eq!(hw.reads, 3);
    assert_eq!(cl.polls(), 3);
    assert!(!cl.state().sensor_connected);
    // Transition reported once, not on every faulted poll.
    assert_eq!(sink.count(|e| matches!(e, AppEvent::SensorFault(_))), 1);

    hw.set_frame(T_12_5);
    run_span(&mut cl, &mut hw, &mut ui, &mut sink, 3000, 3995, 5);
    assert!(!cl.state().sensor_connected, "no poll yet, still faulted");

    cl.tick(4000, &mut hw, &mut ui, &mut sink);
    assert!(cl.state().sensor_connected);
    assert!(!ui.shows_not_connected());
    assert_eq!(sink.count(|e| matches!(e, AppEvent::SensorRecovered)), 1);
}

// ── Scenarios 2–3: rounding and clamping ──────────────────────

#[test]
fn half_degree_rounds_up() {
    let (mut cl, mut hw, mut ui, mut sink) = make_loop(T_12_5);
    cl.tick(1000, &mut hw, &mut ui, &mut sink);

    assert_eq!(cl.state().current_temperature, 13);
    assert_eq!(ui.last_temperature(), Some(13));
    assert!(sink.events.contains(&AppEvent::TemperatureUpdated(13)));
}

#[test]
fn over_range_clamps_to_upper_bound() {
    let (mut cl, mut hw, mut ui, mut sink) = make_loop(T_600);
    cl.tick(1000, &mut hw, &mut ui, &mut sink);

    assert_eq!(cl.state().current_temperature, 500);
    assert_eq!(ui.last_temperature(), Some(500));
}

#[test]
fn narrower_display_range_clamps_lower() {
    let config = ControllerConfig::from_json(r#"{"display_max_c":250}"#).unwrap();
    let mut cl = ControlLoop::new(&config);
    let mut hw = MockHardware::new(T_600);
    let mut ui = MockUi::new();
    let mut sink = LogSink::new();
    cl.start(0, &mut hw, &mut ui, &mut sink);
    cl.tick(1000, &mut hw, &mut ui, &mut sink);

    assert_eq!(cl.state().current_temperature, 250);
    assert_eq!(ui.last_temperature(), Some(250));
}

#[test]
fn display_range_cannot_widen_past_dial() {
    assert!(ControllerConfig::from_json(r#"{"display_max_c":1000}"#).is_err());
}

// ── Scenario 5: actuator gating ───────────────────────────────

#[test]
fn request_on_pulses_once_at_next_expiry() {
    let (mut cl, mut hw, mut ui, mut sink) = make_loop(T_100);

    ui.requested = true;
    let r = cl.tick(10, &mut hw, &mut ui, &mut sink);
    assert!(!r.pulsed, "no expiry yet");
    assert!(ui.calls.contains(&DisplayCall::Actuator(true)));
    assert!(sink.events.contains(&AppEvent::ActuatorRequestChanged(true)));

    run_span(&mut cl, &mut hw, &mut ui, &mut sink, 10, 45, 5);
    assert_eq!(hw.pulses(), 0);

    let r = cl.tick(50, &mut hw, &mut ui, &mut sink);
    assert!(r.pulsed);
    assert_eq!(hw.pulses(), 1);
}

#[test]
fn request_off_stops_pulses() {
    let (mut cl, mut hw, mut ui, mut sink) = make_loop(T_100);
    ui.requested = true;
    run_span(&mut cl, &mut hw, &mut ui, &mut sink, 0, 200, 5);
    assert_eq!(hw.pulses(), 4);

    ui.requested = false;
    run_span(&mut cl, &mut hw, &mut ui, &mut sink, 200, 1000, 5);
    assert_eq!(hw.pulses(), 4);
    assert_eq!(cl.pulses(), 4);
}

#[test]
fn never_requested_never_pulses() {
    let (mut cl, mut hw, mut ui, mut sink) = make_loop(T_100);
    run_span(&mut cl, &mut hw, &mut ui, &mut sink, 0, 5000, 5);
    assert_eq!(hw.pulses(), 0);
    assert_eq!(hw.reads, 5);
}

// ── Timer independence ────────────────────────────────────────

#[test]
fn two_actuator_periods_inside_one_sensor_period() {
    let (mut cl, mut hw, mut ui, mut sink) = make_loop(T_100);
    ui.requested = true;
    run_span(&mut cl, &mut hw, &mut ui, &mut sink, 0, 960, 5);
    let pulses_before = hw.pulses();
    let updates_before = ui.temperature_updates();

    // (960, 1060] holds actuator expiries at 1000 and 1050 and the
    // sensor expiry at 1000.
    run_span(&mut cl, &mut hw, &mut ui, &mut sink, 960, 1060, 5);

    assert_eq!(hw.pulses() - pulses_before, 2);
    assert!(ui.temperature_updates() - updates_before <= 1);
}

#[test]
fn slow_iterations_do_not_burst() {
    let (mut cl, mut hw, mut ui, mut sink) = make_loop(T_100);
    ui.requested = true;
    // One iteration stalls for a full second.
    cl.tick(5, &mut hw, &mut ui, &mut sink);
    let r = cl.tick(1005, &mut hw, &mut ui, &mut sink);
    assert!(r.polled && r.pulsed);
    // Next tick is only 5 ms later: nothing is owed.
    let r = cl.tick(1010, &mut hw, &mut ui, &mut sink);
    assert!(!r.polled && !r.pulsed);
}

#[test]
fn timers_survive_clock_wrap() {
    let start = u32::MAX - 20;
    let mut cl = ControlLoop::new(&ControllerConfig::default());
    let mut hw = MockHardware::new(T_100);
    let mut ui = MockUi::new();
    let mut sink = LogSink::new();
    ui.requested = true;
    cl.start(start, &mut hw, &mut ui, &mut sink);

    cl.tick(start.wrapping_add(25), &mut hw, &mut ui, &mut sink);
    let r = cl.tick(start.wrapping_add(50), &mut hw, &mut ui, &mut sink);
    assert!(r.pulsed);
    let r = cl.tick(start.wrapping_add(1000), &mut hw, &mut ui, &mut sink);
    assert!(r.polled);
    assert_eq!(cl.state().current_temperature, 100);
}

// ── Ordering within one iteration ─────────────────────────────

/// Sensor and actuator sharing one call log.
struct OrderedHw(Rc<RefCell<Vec<&'static str>>>);

impl SensorPort for OrderedHw {
    fn read_raw(&mut self) -> RawSample {
        self.0.borrow_mut().push("read");
        RawSample(T_100)
    }
}

impl ActuatorPort for OrderedHw {
    fn pulse(&mut self) {
        self.0.borrow_mut().push("pulse");
    }

    fn all_off(&mut self) {}
}

#[test]
fn sensor_is_processed_before_actuator() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut hw = OrderedHw(Rc::clone(&log));
    let mut ui = MockUi::new();
    let mut sink = LogSink::new();
    let mut cl = ControlLoop::new(&ControllerConfig::default());
    cl.start(0, &mut hw, &mut ui, &mut sink);

    ui.requested = true;
    // 1000 is a common multiple: both timers expire in this iteration.
    let r = cl.tick(1000, &mut hw, &mut ui, &mut sink);

    assert!(r.polled && r.temperature_updated && r.pulsed);
    assert_eq!(*log.borrow(), vec!["read", "pulse"]);
}
