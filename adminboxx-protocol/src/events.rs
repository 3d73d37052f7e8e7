//! Press reports sent from the panel to the host

use core::fmt::Write;

use heapless::String;

use crate::grid::GridPosition;

/// Longest encoded report: `":3,7\n"`
pub const MAX_REPORT_LEN: usize = 8;

/// A single button press, reported as a text line `:<row>,<column>\n`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressReport {
    pub position: GridPosition,
}

impl PressReport {
    pub const fn new(position: GridPosition) -> Self {
        Self { position }
    }

    /// Encode to the wire line, trailing newline included
    pub fn encode(&self) -> String<MAX_REPORT_LEN> {
        let mut line = String::new();
        // Single-digit row and column always fit
        let _ = writeln!(line, ":{},{}", self.position.row(), self.position.column());
        line
    }

    /// Parse a report line as read by the host (with or without newline)
    ///
    /// Accepts exactly `:<row>,<column>` where both are decimal and the
    /// position lies on the grid.
    pub fn parse(line: &str) -> Option<Self> {
        let body = line.trim_end_matches(['\r', '\n']).strip_prefix(':')?;
        let (row, column) = body.split_once(',')?;

        let parse_digits = |s: &str| -> Option<u8> {
            if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            s.parse().ok()
        };

        let position = GridPosition::new(parse_digits(column)?, parse_digits(row)?)?;
        Some(Self { position })
    }
}
