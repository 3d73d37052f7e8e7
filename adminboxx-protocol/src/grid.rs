//! Panel geometry
//!
//! LEDs and buttons share one coordinate space. The wire protocol addresses
//! LEDs by a flat index laid out row by row.

/// Buttons per row
pub const NUM_COLUMNS: u8 = 8;

/// Rows of buttons
pub const NUM_ROWS: u8 = 4;

/// Total number of LEDs (and buttons) on the panel
pub const LED_COUNT: usize = NUM_COLUMNS as usize * NUM_ROWS as usize;

/// A button/LED coordinate on the panel
///
/// Always inside the grid: `column < NUM_COLUMNS`, `row < NUM_ROWS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GridPosition {
    column: u8,
    row: u8,
}

impl GridPosition {
    /// Create a position, or `None` if it lies outside the grid
    pub const fn new(column: u8, row: u8) -> Option<Self> {
        if column < NUM_COLUMNS && row < NUM_ROWS {
            Some(Self { column, row })
        } else {
            None
        }
    }

    /// Map a flat LED index to its position
    ///
    /// `column = index % NUM_COLUMNS`, `row = index / NUM_COLUMNS`.
    pub const fn from_index(index: u8) -> Option<Self> {
        if (index as usize) < LED_COUNT {
            Some(Self {
                column: index % NUM_COLUMNS,
                row: index / NUM_COLUMNS,
            })
        } else {
            None
        }
    }

    /// Flat LED index used on the wire
    pub const fn index(self) -> u8 {
        self.row * NUM_COLUMNS + self.column
    }

    pub const fn column(self) -> u8 {
        self.column
    }

    pub const fn row(self) -> u8 {
        self.row
    }

    /// Iterate over every position, row by row
    pub fn all() -> impl Iterator<Item = GridPosition> {
        (0..LED_COUNT as u8).filter_map(GridPosition::from_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_mapping() {
        let pos = GridPosition::from_index(5).unwrap();
        assert_eq!(pos.column(), 5);
        assert_eq!(pos.row(), 0);

        let pos = GridPosition::from_index(13).unwrap();
        assert_eq!(pos.column(), 5);
        assert_eq!(pos.row(), 1);

        let pos = GridPosition::from_index(31).unwrap();
        assert_eq!(pos.column(), 7);
        assert_eq!(pos.row(), 3);
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(GridPosition::from_index(32), None);
        assert_eq!(GridPosition::from_index(255), None);
        assert_eq!(GridPosition::new(8, 0), None);
        assert_eq!(GridPosition::new(0, 4), None);
    }

    #[test]
    fn test_index_roundtrip() {
        for row in 0..NUM_ROWS {
            for column in 0..NUM_COLUMNS {
                let pos = GridPosition::new(column, row).unwrap();
                assert_eq!(pos.index(), row * NUM_COLUMNS + column);
                assert_eq!(GridPosition::from_index(pos.index()), Some(pos));
            }
        }
    }

    #[test]
    fn test_all_covers_grid() {
        assert_eq!(GridPosition::all().count(), LED_COUNT);
        assert_eq!(GridPosition::all().next(), GridPosition::new(0, 0));
        assert_eq!(GridPosition::all().last(), GridPosition::new(7, 3));
    }
}
