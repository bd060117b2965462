//! Fuzz target: `ControlLoop::tick`
//!
//! Interprets the input as a script of (time step, frame, request) records
//! and runs the loop against the real MAX6675 link over a simulated
//! converter.  Checks that the published temperature stays in range, that
//! a pulse only happens while requested, that every poll is exactly one
//! converter transaction, and that a faulted poll never rewrites the
//! temperature.
//!
//! cargo fuzz run fuzz_control_loop

#![no_main]

use libfuzzer_sys::fuzz_target;
use thermogauge::adapters::hardware::HardwareAdapter;
use thermogauge::app::control_loop::ControlLoop;
use thermogauge::app::events::AppEvent;
use thermogauge::app::ports::{ActuatorPort, DisplayPort, EventSink, InputPort};
use thermogauge::config::ControllerConfig;
use thermogauge::sensors::max6675::{LinkTiming, Max6675};
use thermogauge::sensors::sim::{SimConverter, SimDelay};

#[derive(Default)]
struct Motor {
    pulses: u32,
}

impl ActuatorPort for Motor {
    fn pulse(&mut self) {
        self.pulses += 1;
    }

    fn all_off(&mut self) {}
}

#[derive(Default)]
struct Panel {
    requested: bool,
}

impl DisplayPort for Panel {
    fn show_temperature(&mut self, celsius: u16) {
        assert!(celsius <= 500);
    }

    fn show_not_connected(&mut self) {}

    fn show_actuator(&mut self, _on: bool) {}
}

impl InputPort for Panel {
    fn actuator_requested(&mut self) -> bool {
        self.requested
    }
}

struct Sink;

impl EventSink for Sink {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let config = ControllerConfig::default();
    let sim = SimConverter::new(0);
    let mut link = Max6675::new(
        sim.chip_select(),
        sim.clock(),
        sim.data(),
        SimDelay::default(),
        LinkTiming::from_config(&config),
    );
    link.begin();
    let mut hw = HardwareAdapter::new(link, Motor::default());
    let mut ui = Panel::default();

    let mut cl = ControlLoop::new(&config);
    let mut now: u32 = u32::from(data.first().copied().unwrap_or(0)) << 24;
    cl.start(now, &mut hw, &mut ui, &mut Sink);

    for rec in data.chunks_exact(4) {
        now = now.wrapping_add(u32::from(rec[0]) * 8);
        sim.set_frame(u16::from_be_bytes([rec[1], rec[2]]));
        ui.requested = rec[3] & 1 == 1;

        let before = cl.state();
        let report = cl.tick(now, &mut hw, &mut ui, &mut Sink);
        let after = cl.state();

        assert!(after.current_temperature <= 500);
        assert_eq!(after.actuator_requested, ui.requested);
        if report.pulsed {
            assert!(ui.requested);
        }
        if report.polled && !after.sensor_connected {
            assert_eq!(after.current_temperature, before.current_temperature);
            assert!(!report.temperature_updated);
        }
        assert!(!sim.chip_selected());
    }
    assert_eq!(sim.transactions(), cl.polls());
    assert_eq!(hw.actuator().pulses, cl.pulses());
});
