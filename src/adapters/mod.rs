//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements               | Connects to                  |
//! |------------|--------------------------|------------------------------|
//! | `hardware` | SensorPort, ActuatorPort | MAX6675 link, motor output   |
//! | `input`    | InputPort                | tap handler flag, button     |
//! | `log_sink` | EventSink                | Serial log output            |
//! | `panel`    | DisplayPort, InputPort   | gauge view + input source    |
//! | `time`     | MonotonicClock           | ESP32 system timer           |

pub mod hardware;
pub mod input;
pub mod log_sink;
pub mod panel;
pub mod time;
