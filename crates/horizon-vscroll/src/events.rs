//! Pointer input delivered by the host.
//!
//! The host translates its own input events into these types and passes them
//! to [`VirtualScrollList::handle_event`](crate::VirtualScrollList::handle_event).
//! All positions are in list-local coordinates.

use horizon_vscroll_render::Point;

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (usually left).
    Left = 0,
    /// Secondary button (usually right).
    Right = 1,
    /// Middle button (scroll wheel click).
    Middle = 2,
    /// Additional button 1 (e.g., browser back).
    Button4 = 3,
    /// Additional button 2 (e.g., browser forward).
    Button5 = 4,
}

impl MouseButton {
    /// The bit this button occupies in [`MouseMoveEvent::buttons`].
    pub fn mask(self) -> u8 {
        1 << (self as u8)
    }
}

/// A mouse button was pressed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MousePressEvent {
    /// The button that was pressed.
    pub button: MouseButton,
    /// Position in list-local coordinates.
    pub local_pos: Point,
}

/// A mouse button was released.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseReleaseEvent {
    /// The button that was released.
    pub button: MouseButton,
    /// Position in list-local coordinates.
    pub local_pos: Point,
}

/// The pointer moved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseMoveEvent {
    /// Position in list-local coordinates.
    pub local_pos: Point,
    /// Mouse buttons currently held, one bit per [`MouseButton::mask`].
    pub buttons: u8,
}

impl MouseMoveEvent {
    /// Whether `button` is held during this motion.
    pub fn is_held(&self, button: MouseButton) -> bool {
        self.buttons & button.mask() != 0
    }
}

/// The wheel turned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    /// Position in list-local coordinates.
    pub local_pos: Point,
    /// Horizontal scroll delta (positive = right).
    pub delta_x: f32,
    /// Vertical scroll delta (positive = up/away from user).
    pub delta_y: f32,
}

/// Any pointer event the list reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press(MousePressEvent),
    Release(MouseReleaseEvent),
    Move(MouseMoveEvent),
    Wheel(WheelEvent),
}

impl PointerEvent {
    /// A button press at `local_pos`.
    pub fn press(button: MouseButton, local_pos: Point) -> Self {
        PointerEvent::Press(MousePressEvent {
            button,
            local_pos,
        })
    }

    /// A button release at `local_pos`.
    pub fn release(button: MouseButton, local_pos: Point) -> Self {
        PointerEvent::Release(MouseReleaseEvent {
            button,
            local_pos,
        })
    }

    /// Pointer motion to `local_pos` with the given held buttons.
    pub fn motion(local_pos: Point, buttons: u8) -> Self {
        PointerEvent::Move(MouseMoveEvent {
            local_pos,
            buttons,
        })
    }

    /// A vertical wheel step. Positive `delta_y` scrolls toward the top.
    pub fn wheel(local_pos: Point, delta_y: f32) -> Self {
        PointerEvent::Wheel(WheelEvent {
            local_pos,
            delta_x: 0.0,
            delta_y,
        })
    }

    /// Position of the pointer when the event happened.
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Press(e) => e.local_pos,
            PointerEvent::Release(e) => e.local_pos,
            PointerEvent::Move(e) => e.local_pos,
            PointerEvent::Wheel(e) => e.local_pos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_mask() {
        let event = MouseMoveEvent {
            local_pos: Point::ZERO,
            buttons: MouseButton::Left.mask() | MouseButton::Middle.mask(),
        };
        assert!(event.is_held(MouseButton::Left));
        assert!(event.is_held(MouseButton::Middle));
        assert!(!event.is_held(MouseButton::Right));
    }

    #[test]
    fn test_constructors() {
        let event = PointerEvent::wheel(Point::new(5.0, 6.0), 1.0);
        assert_eq!(event.position(), Point::new(5.0, 6.0));
        assert!(matches!(event, PointerEvent::Wheel(WheelEvent { delta_y, .. }) if delta_y == 1.0));
    }
}
