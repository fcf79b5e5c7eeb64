//! Front-button map.
//!
//! The badge renders once per boot; the buttons only exist to wake it
//! from deep sleep, so this is a wiring table rather than an input
//! event pipeline.

/// The five front buttons.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FrontButton {
    A,
    B,
    C,
    Up,
    Down,
}

impl FrontButton {
    pub const ALL: [Self; 5] = [Self::A, Self::B, Self::C, Self::Up, Self::Down];

    /// RTC-capable GPIO wired to this button.
    pub const fn gpio(self) -> u8 {
        match self {
            Self::A => 4,
            Self::B => 5,
            Self::C => 6,
            Self::Up => 7,
            Self::Down => 8,
        }
    }

    /// Buttons pull the line high when pressed.
    pub const fn pressed_level_high(self) -> bool {
        true
    }
}
