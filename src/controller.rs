//! Per-frame view logic, independent of the window and the GPU.

use glam::Mat4;
use log::debug;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

use crate::{input::Input, redraw, screen, view::ViewState};

/// Every handler that changes the view returns the projection to upload.
/// `None` means nothing to upload: either nothing changed or the viewport is
/// empty.
#[derive(Debug)]
pub struct Controller {
    viewport: screen::Size,
    view: ViewState,
    input: Input,
    redraw: redraw::Countdown,
}

impl Controller {
    pub fn new(view: ViewState, viewport: screen::Size) -> Self {
        Self {
            viewport,
            view,
            input: Input::default(),
            redraw: redraw::Countdown::default(),
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn viewport(&self) -> screen::Size {
        self.viewport
    }

    /// Projection for the current view, if there is anything to project onto.
    pub fn projection(&self) -> Option<Mat4> {
        if self.viewport.is_empty() {
            return None;
        }
        Some(self.view.projection(self.viewport))
    }

    fn changed(&mut self) -> Option<Mat4> {
        debug!(
            "view {:?} at {}x{}",
            self.view, self.viewport.width, self.viewport.height
        );
        self.redraw.invalidate();
        self.projection()
    }

    pub fn resize(&mut self, viewport: screen::Size) -> Option<Mat4> {
        self.viewport = viewport;
        self.changed()
    }

    pub fn cursor_moved(&mut self, x: f64, y: f64) {
        self.input.cursor_moved(x, y);
    }

    pub fn mouse_input(&mut self, button: MouseButton, state: ElementState) {
        self.input.mouse_input(button, state);
    }

    pub fn mouse_wheel(&mut self, delta: MouseScrollDelta) -> Option<Mat4> {
        if self.input.mouse_wheel(delta, &mut self.view) {
            self.changed()
        } else {
            None
        }
    }

    /// Applies this frame's drag.
    pub fn end_frame(&mut self) -> Option<Mat4> {
        if self.input.end_frame(&mut self.view, self.viewport) {
            self.changed()
        } else {
            None
        }
    }

    /// A frame failed to reach the screen; schedule it again.
    pub fn frame_dropped(&mut self) {
        self.redraw.invalidate();
    }

    pub fn wants_redraw(&self) -> bool {
        self.redraw.is_pending() && !self.viewport.is_empty()
    }

    /// Whether to draw this frame. Consumes one frame of the redraw budget.
    pub fn take_frame(&mut self) -> bool {
        !self.viewport.is_empty() && self.redraw.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: screen::Size = screen::Size {
        width: 800,
        height: 450,
    };

    /// Runs `frames` frames and counts the drawn ones.
    fn run_frames(controller: &mut Controller, frames: usize) -> usize {
        (0..frames)
            .filter(|_| {
                controller.end_frame();
                controller.wants_redraw() && controller.take_frame()
            })
            .count()
    }

    fn settled() -> Controller {
        let mut controller = Controller::new(ViewState::default(), VIEWPORT);
        run_frames(&mut controller, 5);
        controller
    }

    #[test]
    fn test_startup_draws_two_frames() {
        let mut controller = Controller::new(ViewState::default(), VIEWPORT);
        assert_eq!(run_frames(&mut controller, 10), 2);
        assert!(!controller.wants_redraw());
    }

    #[test]
    fn test_scroll_draws_two_frames_then_idles() {
        let mut controller = settled();

        let projection = controller.mouse_wheel(MouseScrollDelta::LineDelta(0.0, 1.0));
        assert_eq!(projection, Some(controller.view().projection(VIEWPORT)));
        assert_eq!(run_frames(&mut controller, 10), 2);
        assert_eq!(run_frames(&mut controller, 10), 0);
    }

    #[test]
    fn test_empty_scroll_does_not_redraw() {
        let mut controller = settled();

        assert_eq!(
            controller.mouse_wheel(MouseScrollDelta::LineDelta(0.0, 0.0)),
            None
        );
        assert_eq!(run_frames(&mut controller, 10), 0);
    }

    #[test]
    fn test_drag_draws_two_frames_then_idles() {
        let mut controller = settled();

        controller.mouse_input(MouseButton::Left, ElementState::Pressed);
        controller.cursor_moved(10.0, 0.0);
        assert!(controller.end_frame().is_some());
        assert!(controller.view().origin.x < -0.5);

        assert_eq!(run_frames(&mut controller, 10), 2);
        assert_eq!(run_frames(&mut controller, 10), 0);
    }

    #[test]
    fn test_resize_rebuilds_projection_and_redraws() {
        let mut controller = settled();
        let wide = screen::Size {
            width: 1600,
            height: 450,
        };

        let projection = controller.resize(wide);
        assert_eq!(projection, Some(ViewState::default().projection(wide)));
        assert_ne!(projection, Some(ViewState::default().projection(VIEWPORT)));
        assert_eq!(controller.viewport(), wide);
        assert_eq!(run_frames(&mut controller, 10), 2);
    }

    #[test]
    fn test_minimised_window_draws_nothing() {
        let mut controller = settled();
        let minimised = screen::Size {
            width: 0,
            height: 0,
        };

        assert_eq!(controller.resize(minimised), None);
        assert_eq!(controller.projection(), None);
        assert_eq!(run_frames(&mut controller, 10), 0);

        // Restoring the window draws the pending frames.
        assert!(controller.resize(VIEWPORT).is_some());
        assert_eq!(run_frames(&mut controller, 10), 2);
    }

    #[test]
    fn test_dropped_frame_is_redrawn() {
        let mut controller = settled();

        controller.frame_dropped();
        assert_eq!(run_frames(&mut controller, 10), 2);
    }
}
