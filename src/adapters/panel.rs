//! Panel adapter — the UI collaborator as the control loop sees it.
//!
//! Pairs the [`GaugeView`] (display side) with an [`InputPort`] (the
//! motor button) so one value satisfies `DisplayPort + InputPort`.
//! [`render`](PanelUi::render) hands a changed view to the renderer; in
//! this firmware the renderer is the serial log, an external UI library
//! plugs in at the same point.

use log::info;

use crate::app::ports::{DisplayPort, InputPort};
use crate::display::gauge::GaugeView;

pub struct PanelUi<I> {
    gauge: GaugeView,
    input: I,
    frames: u32,
}

impl<I: InputPort> PanelUi<I> {
    pub fn new(gauge: GaugeView, input: I) -> Self {
        Self {
            gauge,
            input,
            frames: 0,
        }
    }

    pub fn gauge(&self) -> &GaugeView {
        &self.gauge
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Draw the view if anything changed since the last frame.
    /// Returns whether a frame was produced.
    pub fn render(&mut self) -> bool {
        if !self.gauge.take_dirty() {
            return false;
        }
        self.frames = self.frames.wrapping_add(1);
        info!(
            "UI | label='{}' needle={}.{}deg zone={:?} button={:?}",
            self.gauge.label(),
            self.gauge.needle_decideg() / 10,
            (self.gauge.needle_decideg() % 10).abs(),
            self.gauge.zone(),
            self.gauge.button_colour(),
        );
        true
    }
}

impl<I: InputPort> DisplayPort for PanelUi<I> {
    fn show_temperature(&mut self, celsius: u16) {
        self.gauge.show_temperature(celsius);
    }

    fn show_not_connected(&mut self) {
        self.gauge.show_not_connected();
    }

    fn show_actuator(&mut self, on: bool) {
        self.gauge.show_actuator(on);
    }

    fn refresh(&mut self) {
        self.render();
    }
}

impl<I: InputPort> InputPort for PanelUi<I> {
    fn actuator_requested(&mut self) -> bool {
        self.input.actuator_requested()
    }
}
