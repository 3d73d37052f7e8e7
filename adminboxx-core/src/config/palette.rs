//! LED colours and indicator positions used for panel feedback
//!
//! Feedback colours are kept dim (16/127) so they read as status, not as
//! host-driven button colours.

use adminboxx_protocol::{Color, GridPosition};

const fn color(r: u8, g: u8, b: u8) -> Color {
    Color::saturating(r, g, b)
}

const fn position(column: u8, row: u8) -> GridPosition {
    match GridPosition::new(column, row) {
        Some(position) => position,
        None => panic!("indicator position outside the grid"),
    }
}

pub const DISABLED: Color = Color::OFF;
pub const DARK_WHITE: Color = color(16, 16, 16);
pub const DARK_RED: Color = color(16, 0, 0);
pub const DARK_YELLOW: Color = color(16, 16, 0);

/// Whole-grid colour of the startup sequence
pub const STARTUP_COLOR: Color = DARK_WHITE;

/// Shown on every link-state signal
pub const ALERT_COLOR: Color = DARK_RED;
pub const ALERT_INDICATOR: GridPosition = position(1, 0);

/// Shown only while the transport is present
pub const NOTICE_COLOR: Color = DARK_YELLOW;
pub const NOTICE_INDICATOR: GridPosition = position(2, 0);
