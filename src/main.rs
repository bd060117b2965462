//! Thermogauge Firmware — Main Entry Point
//!
//! Hexagonal architecture around a single cooperative control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter        PanelUi             LogEventSink       │
//! │  (Max6675 + motor)      (gauge + button)    (EventSink)        │
//! │  EspClock (MonotonicClock)                                     │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │             ControlLoop (pure logic)                   │    │
//! │  │  sensor timer · actuator timer · clamp                 │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pins are claimed by number from [`ControllerConfig`] rather than
//! through `Peripherals::take`, so a JSON override can move them without
//! touching this file.
#![deny(unused_must_use)]

use core::fmt::Display;

use embedded_hal::digital::InputPin;
use esp_idf_hal::delay::{Ets, FreeRtos};
use esp_idf_hal::gpio::{AnyIOPin, AnyInputPin, AnyOutputPin, PinDriver, Pull};
use log::{error, info, warn};

use thermogauge::adapters::hardware::HardwareAdapter;
use thermogauge::adapters::input::{ActuatorRequest, TapButton};
use thermogauge::adapters::log_sink::LogEventSink;
use thermogauge::adapters::panel::PanelUi;
use thermogauge::adapters::time::EspClock;
use thermogauge::app::control_loop::ControlLoop;
use thermogauge::app::ports::{ActuatorPort, SensorPort};
use thermogauge::app::state::SharedControlState;
use thermogauge::config::ControllerConfig;
use thermogauge::display::gauge::GaugeView;
use thermogauge::drivers::actuator::PulseActuator;
use thermogauge::drivers::touch_reset;
use thermogauge::error::{Error, Result};
use thermogauge::sensors::max6675::{LinkTiming, Max6675};

/// Written by the button (or a touch tap callback), read by the loop.
static ACTUATOR_REQUEST: ActuatorRequest = ActuatorRequest::new();

/// Last completed iteration, for readers outside the loop.
static SHARED_STATE: SharedControlState = SharedControlState::new();

const HALT_SLEEP_MS: u32 = 100;

// ── Main ──────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Thermogauge v{}                     ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = load_config();
    info!(
        "Pins: CS={} SCK={} SO={} MOTOR={} BTN={} T_INT={} T_RST={}",
        config.pins.chip_select,
        config.pins.clock,
        config.pins.data,
        config.pins.actuator,
        config.pins.button,
        config.pins.touch_int,
        config.pins.touch_reset,
    );

    // ── 3. Touch controller strap (before the shared pad is reused) ──
    if let Err(e) = reset_touch_controller(&config) {
        halt_inert("touch controller", &e);
    }

    // ── 4. Converter link + motor output ──────────────────────
    let mut hw = match build_hardware(&config) {
        Ok(hw) => hw,
        Err(e) => halt_inert("converter/motor", &e),
    };

    // ── 5. UI collaborator ────────────────────────────────────
    let mut ui = match build_panel(&config) {
        Ok(ui) => ui,
        Err(e) => halt_inert("panel input", &e),
    };

    let mut sink = LogEventSink::new();
    let clock = EspClock::new();

    info!("System ready. Entering control loop.");

    // ── 6. Control loop ───────────────────────────────────────
    ControlLoop::new(&config).run(
        &mut hw,
        &mut ui,
        &mut sink,
        &clock,
        &mut FreeRtos,
        &SHARED_STATE,
    )
}

// ── Bring-up helpers ──────────────────────────────────────────

/// Defaults, or the build-time JSON override when one was baked in.
fn load_config() -> ControllerConfig {
    let json = option_env!("THERMOGAUGE_CONFIG_JSON");
    match ControllerConfig::with_override(json) {
        Ok(cfg) => {
            if json.is_some() {
                info!("Config: build-time override applied");
            } else {
                info!("Config: defaults");
            }
            cfg
        }
        Err(e) => {
            warn!("Config override rejected ({}), using defaults", e);
            ControllerConfig::default()
        }
    }
}

/// Log the driver error and collapse it to [`Error::Init`].
fn init_failed<E: Display>(what: &'static str) -> impl FnOnce(E) -> Error {
    move |e| {
        error!("{}: {}", what, e);
        Error::Init(what)
    }
}

/// Strap the GT911 to address 0x5D, then hand INT back as an input.
fn reset_touch_controller(config: &ControllerConfig) -> Result<()> {
    // SAFETY: pin numbers come from a validated config; no other driver
    // holds these pads yet.  Both drivers are dropped before return.
    let int_pin = unsafe { AnyIOPin::new(config.pins.touch_int) };
    let rst_pin = unsafe { AnyOutputPin::new(config.pins.touch_reset) };

    let mut int = PinDriver::output(int_pin).map_err(init_failed("touch INT as output"))?;
    let mut rst = PinDriver::output(rst_pin).map_err(init_failed("touch RST as output"))?;

    touch_reset::reset_with_address_0x5d(&mut int, &mut rst, &mut FreeRtos);

    let _int = int.into_input().map_err(init_failed("touch INT back to input"))?;
    Ok(())
}

fn build_hardware(
    config: &ControllerConfig,
) -> Result<HardwareAdapter<impl SensorPort, impl ActuatorPort>> {
    let p = &config.pins;

    // SAFETY: see reset_touch_controller; the touch INT driver that may
    // have shared the clock pad has been dropped by now.
    let cs = PinDriver::output(unsafe { AnyOutputPin::new(p.chip_select) })
        .map_err(init_failed("MAX6675 CS"))?;
    let sck = PinDriver::output(unsafe { AnyOutputPin::new(p.clock) })
        .map_err(init_failed("MAX6675 SCK"))?;
    let so = PinDriver::input(unsafe { AnyInputPin::new(p.data) })
        .map_err(init_failed("MAX6675 SO"))?;
    let motor = PinDriver::output(unsafe { AnyOutputPin::new(p.actuator) })
        .map_err(init_failed("motor output"))?;

    // Bit timing is busy-waited (Ets); the millisecond pulse yields (FreeRtos).
    let mut link = Max6675::new(cs, sck, so, Ets, LinkTiming::from_config(config));
    link.begin();
    let actuator = PulseActuator::from_config(motor, FreeRtos, config);

    info!(
        "MAX6675 link up (settle={}us), motor pulse {}ms",
        link.timing().settle_us,
        actuator.pulse_duration_ms()
    );
    Ok(HardwareAdapter::new(link, actuator))
}

fn build_panel(config: &ControllerConfig) -> Result<PanelUi<TapButton<'static, impl InputPin>>> {
    // SAFETY: see reset_touch_controller.
    let mut button = PinDriver::input(unsafe { AnyIOPin::new(config.pins.button) })
        .map_err(init_failed("button"))?;
    button.set_pull(Pull::Up).map_err(init_failed("button pull-up"))?;

    let gauge = GaugeView::new(config.display_max_c);
    Ok(PanelUi::new(gauge, TapButton::new(button, &ACTUATOR_REQUEST)))
}

/// Unrecoverable bring-up failure: log it and idle instead of running a
/// loop on a broken subsystem.
fn halt_inert(subsystem: &str, err: &Error) -> ! {
    error!("{} bring-up failed ({}); halting", subsystem, err);
    loop {
        FreeRtos::delay_ms(HALT_SLEEP_MS);
    }
}
