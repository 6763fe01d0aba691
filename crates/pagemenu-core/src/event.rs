#![forbid(unsafe_code)]

//! Pointer events as seen by the menu logic.
//!
//! The host converts DOM `click`/`mousedown` events into [`PointerEvent`]
//! values; the controllers answer with a [`ClickOutcome`] telling the host
//! whether the browser's default action must be suppressed.

use core::ops::Add;

/// Mouse button that triggered an event.
///
/// Decoded from the W3C `MouseEvent.button` numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Usually the left button.
    Primary,
    /// Usually the wheel button.
    Auxiliary,
    /// Usually the right button.
    Secondary,
    Other(u8),
}

impl MouseButton {
    #[must_use]
    pub const fn from_dom(button: i16) -> Self {
        match button {
            0 => Self::Primary,
            1 => Self::Auxiliary,
            2 => Self::Secondary,
            n if n > 0 && n <= u8::MAX as i16 => Self::Other(n as u8),
            _ => Self::Other(u8::MAX),
        }
    }

    #[must_use]
    pub const fn is_primary(self) -> bool {
        matches!(self, Self::Primary)
    }
}

/// Page or viewport coordinates in CSS pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset downwards by `dy` pixels.
    #[must_use]
    pub const fn below(self, dy: i32) -> Self {
        Self {
            x: self.x,
            y: self.y.saturating_add(dy),
        }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x.saturating_add(rhs.x),
            y: self.y.saturating_add(rhs.y),
        }
    }
}

/// A click or mousedown delivered to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerEvent<N> {
    /// Innermost element under the pointer.
    pub target: N,
    pub button: MouseButton,
    /// Viewport coordinates (`clientX`/`clientY`).
    pub client: Point,
}

impl<N> PointerEvent<N> {
    #[must_use]
    pub fn new(target: N, button: MouseButton, client: Point) -> Self {
        Self {
            target,
            button,
            client,
        }
    }

    /// Primary-button event at the given viewport position.
    #[must_use]
    pub fn primary(target: N, x: i32, y: i32) -> Self {
        Self::new(target, MouseButton::Primary, Point::new(x, y))
    }
}

/// Why a click was left to the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassReason {
    /// Right or middle clicks keep native menus and other handlers working.
    NonPrimaryButton,
    /// Clicks on `input`/`textarea` keep caret placement and selection.
    TextEntry,
    /// Nothing on the ancestor chain names a registered entity.
    Unclassified,
    /// The entity's menu is not rendered on this page.
    MenuMissing,
}

/// Result of routing one document click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickOutcome {
    /// A context menu was opened; the host must suppress the default action.
    Handled,
    PassThrough(PassReason),
}

impl ClickOutcome {
    #[must_use]
    pub const fn is_handled(self) -> bool {
        matches!(self, Self::Handled)
    }
}
