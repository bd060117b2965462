//! Monotonic clock adapter.
//!
//! - **`target_os = "espidf"`** — wraps `esp_timer_get_time()` from the
//!   ESP-IDF high-resolution timer (microsecond precision, monotonic).
//! - **`not(target_os = "espidf")`** — uses `std::time::Instant` for
//!   host-side testing and simulation.
//!
//! Milliseconds are truncated to `u32` and wrap after ~49.7 days; the
//! control-loop timers use wrapping arithmetic and do not care.

use crate::app::ports::MonotonicClock;

/// Time adapter for the ESP32 platform.
pub struct EspClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for EspClock {
    fn default() -> Self {
        Self::new()
    }
}

impl EspClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Microseconds since boot (monotonic).
    #[cfg(target_os = "espidf")]
    pub fn uptime_us(&self) -> u64 {
        // SAFETY: esp_timer_get_time has no preconditions once the
        // esp_timer service is up, which ESP-IDF does before app_main.
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64
    }

    /// Microseconds since process start (monotonic).
    #[cfg(not(target_os = "espidf"))]
    pub fn uptime_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}

impl MonotonicClock for EspClock {
    fn now_ms(&self) -> u32 {
        (self.uptime_us() / 1_000) as u32
    }
}
