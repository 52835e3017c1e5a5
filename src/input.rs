//! Turns pointer and wheel input into camera moves.

use glam::DVec2;
use log::trace;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

use crate::{screen, view::ViewState};

/// Touchpads report wheel movement in pixels; this many count as one wheel notch.
const PIXELS_PER_LINE: f64 = 20.0;

/// Pointer state sampled once per frame.
#[derive(Debug, Default)]
pub struct Input {
    pointer: DVec2,
    previous_pointer: DVec2,
    dragging: bool,
}

impl Input {
    pub fn cursor_moved(&mut self, x: f64, y: f64) {
        self.pointer = DVec2::new(x, y);
    }

    pub fn mouse_input(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.dragging = state == ElementState::Pressed;
        }
    }

    /// Apply the pointer movement since the previous frame to `view`.
    ///
    /// Returns whether the view changed.
    pub fn end_frame(&mut self, view: &mut ViewState, viewport: screen::Size) -> bool {
        let delta = self.pointer - self.previous_pointer;
        self.previous_pointer = self.pointer;

        if !self.dragging || delta == DVec2::ZERO {
            return false;
        }
        match view.screen_to_world(delta, viewport) {
            Some(delta_world) => {
                trace!("drag {:?} -> pan {:?}", delta, delta_world);
                view.pan(delta_world);
                true
            }
            None => false,
        }
    }

    /// Zoom `view` by a wheel movement. Returns whether the view changed.
    pub fn mouse_wheel(&mut self, delta: MouseScrollDelta, view: &mut ViewState) -> bool {
        let scroll_y = match delta {
            MouseScrollDelta::LineDelta(_, y) => y as f64,
            MouseScrollDelta::PixelDelta(position) => position.y / PIXELS_PER_LINE,
        };
        if scroll_y == 0.0 {
            return false;
        }
        view.zoom(scroll_y);
        true
    }
}
