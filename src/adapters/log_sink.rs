//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART on the device).  The `SAMPLE` line keeps the
//! bring-up format used on the bench: raw word, open bit, temperature,
//! with `-999.00` standing in for an open circuit.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Stand-in temperature logged for an open thermocouple.
pub const OPEN_CIRCUIT_LOG_VALUE: f32 = -999.0;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Sample { raw, reading } => {
                info!(
                    "SAMPLE | MAX6675 raw=0x{:04X} open={} temp={:.2}",
                    raw.bits(),
                    u8::from(raw.is_open_circuit()),
                    reading.celsius().unwrap_or(OPEN_CIRCUIT_LOG_VALUE),
                );
            }
            AppEvent::TemperatureUpdated(c) => {
                debug!("TEMP | {}\u{00b0}C", c);
            }
            AppEvent::SensorFault(fault) => {
                warn!("FAULT | {}", fault);
            }
            AppEvent::SensorRecovered => {
                info!("FAULT | cleared");
            }
            AppEvent::ActuatorRequestChanged(on) => {
                info!("MOTOR | {}", if *on { "ON" } else { "OFF" });
            }
            AppEvent::Started(state) => {
                info!(
                    "START | temp={}\u{00b0}C motor={}",
                    state.current_temperature,
                    if state.actuator_requested { "ON" } else { "OFF" }
                );
            }
        }
    }
}
