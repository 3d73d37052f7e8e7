//! AdminBoxx Serial Protocol
//!
//! This crate defines the byte-stream protocol between the host application
//! and the AdminBoxx panel (an 8 × 4 grid of illuminated buttons). The
//! protocol is deliberately minimal: fixed-length frames, one terminator byte,
//! no versioning.
//!
//! # Host → Panel
//!
//! Every frame ends with the terminator `0xFF`. All other bytes are kept
//! below `0x80` except the tag, so a payload byte can never end a frame early:
//! ```text
//! ┌──────┬──────┐
//! │ 0x80 │ 0xFF │                          PING (heartbeat)
//! └──────┴──────┘
//! ┌──────┬─────┬─────┬─────┬─────┬──────┐
//! │ 0x81 │ LED │  R  │  G  │  B  │ 0xFF │  SET COLOR
//! └──────┴─────┴─────┴─────┴─────┴──────┘
//!          0-31  0-127 0-127 0-127
//! ```
//!
//! # Panel → Host
//!
//! One text line per button press: `:<row>,<column>\n`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod events;
pub mod frame;
pub mod grid;
pub mod messages;

pub use events::PressReport;
pub use frame::{FrameDecoder, FrameError, MAX_FRAME_SIZE, TERMINATOR};
pub use grid::{GridPosition, LED_COUNT, NUM_COLUMNS, NUM_ROWS};
pub use messages::{Color, Command, HostMessage, PING_TAG, SET_COLOR_TAG};
