//! Whole-stack test on the host: simulated converter pins → Max6675 link
//! → HardwareAdapter → ControlLoop → PanelUi/GaugeView, with the real
//! pulse driver on a counting pin.

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, OutputPin};

use thermogauge::adapters::hardware::HardwareAdapter;
use thermogauge::adapters::input::ActuatorRequest;
use thermogauge::adapters::panel::PanelUi;
use thermogauge::app::control_loop::ControlLoop;
use thermogauge::app::state::SharedControlState;
use thermogauge::config::ControllerConfig;
use thermogauge::display::gauge::{ButtonColour, GaugeView, Zone};
use thermogauge::drivers::actuator::PulseActuator;
use thermogauge::sensors::max6675::{LinkTiming, Max6675};
use thermogauge::sensors::sim::{SimConverter, SimDelay};

use crate::mock_hw::LogSink;

/// Counts rising edges; remembers the level.
#[derive(Clone, Default)]
struct MotorPin {
    high: Rc<Cell<bool>>,
    rises: Rc<Cell<u32>>,
}

impl ErrorType for MotorPin {
    type Error = Infallible;
}

impl OutputPin for MotorPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if !self.high.get() {
            self.rises.set(self.rises.get() + 1);
        }
        self.high.set(true);
        Ok(())
    }
}

#[test]
fn simulated_board_end_to_end() {
    let config = ControllerConfig::default();
    let sim = SimConverter::new(0x0190);
    let motor = MotorPin::default();
    let request = ActuatorRequest::new();
    let shared = SharedControlState::new();

    let mut link = Max6675::new(
        sim.chip_select(),
        sim.clock(),
        sim.data(),
        SimDelay::default(),
        LinkTiming::from_config(&config),
    );
    link.begin();
    let actuator = PulseActuator::from_config(motor.clone(), SimDelay::default(), &config);
    let mut hw = HardwareAdapter::new(link, actuator);
    let mut ui = PanelUi::new(GaugeView::new(config.display_max_c), &request);
    let mut sink = LogSink::new();

    let mut cl = ControlLoop::new(&config);
    cl.start(0, &mut hw, &mut ui, &mut sink);
    assert!(ui.render());
    assert_eq!(ui.gauge().label(), "0\u{00b0}C");
    assert_eq!(ui.gauge().needle_decideg(), -1350);

    // First second: idle motor, one conversion at t=1000.
    let mut t = 0;
    while t < 1000 {
        t += 5;
        cl.tick(t, &mut hw, &mut ui, &mut sink);
        shared.publish(cl.state());
    }
    assert_eq!(sim.transactions(), 1);
    assert_eq!(shared.snapshot().current_temperature, 13);
    assert!(ui.render());
    assert_eq!(ui.gauge().label(), "13\u{00b0}C");
    assert_eq!(ui.gauge().zone(), Zone::Cold);
    assert_eq!(motor.rises.get(), 0);

    // Operator taps the button; the converter lead comes loose.
    request.toggle();
    sim.set_frame(0x0004);
    while t < 2000 {
        t += 5;
        cl.tick(t, &mut hw, &mut ui, &mut sink);
    }
    assert_eq!(sim.transactions(), 2);
    assert!(!cl.state().sensor_connected);
    assert_eq!(cl.state().current_temperature, 13);
    assert!(ui.render());
    assert_eq!(ui.gauge().label(), "not connected");
    assert_eq!(ui.gauge().button_colour(), ButtonColour::Green);
    // (1000, 2000] holds 20 actuator expiries.
    assert_eq!(motor.rises.get(), 20);
    assert!(!motor.high.get(), "pulse always ends LOW");
    assert_eq!(hw.actuator().pulses(), 20);

    // Lead reattached at 450 °C.
    sim.set_frame(1800 << 3);
    request.toggle();
    while t < 3000 {
        t += 5;
        cl.tick(t, &mut hw, &mut ui, &mut sink);
    }
    assert!(cl.state().sensor_connected);
    assert_eq!(cl.state().current_temperature, 450);
    assert!(ui.render());
    assert_eq!(ui.gauge().zone(), Zone::Hot);
    assert_eq!(ui.gauge().button_colour(), ButtonColour::Red);
    assert_eq!(motor.rises.get(), 20);
}
