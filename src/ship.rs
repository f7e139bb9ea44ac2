//! Ship geometry and hit tracking.

use core::fmt;

use crate::common::{BoardError, Coord, Orientation};
use crate::config::{ship_class, Grid, GRID_SIZE};

/// A straight run of cells on the grid with the subset that has been hit.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ship {
    origin: Coord,
    orientation: Orientation,
    size: usize,
    mask: Grid,
    hits: Grid,
}

impl Ship {
    /// Lay out a ship of `size` cells starting at `origin`.
    ///
    /// Fails if the run is empty or leaves the grid. Nothing is checked
    /// against other ships here; that is the board's job.
    pub fn new(size: usize, origin: Coord, orientation: Orientation) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::ZeroLength);
        }
        // A single cell has no direction; store one canonical form.
        let orientation = if size == 1 {
            Orientation::Horizontal
        } else {
            orientation
        };
        if size > GRID_SIZE {
            return Err(BoardError::OutOfBounds);
        }
        let (row, col) = origin.cell();
        let (end_row, end_col) = match orientation {
            Orientation::Horizontal => (row, col + size - 1),
            Orientation::Vertical => (row + size - 1, col),
        };
        if end_row >= GRID_SIZE || end_col >= GRID_SIZE {
            return Err(BoardError::OutOfBounds);
        }

        let mask = Grid::from_cells((0..size).map(|i| match orientation {
            Orientation::Horizontal => (row, col + i),
            Orientation::Vertical => (row + i, col),
        }))?;
        Ok(Ship {
            origin,
            orientation,
            size,
            mask,
            hits: Grid::new(),
        })
    }

    /// Rebuild a ship from an ordered cell list, as stored in a record.
    ///
    /// The cells must form one straight, gap-free run going right or down.
    pub fn from_cells(cells: &[Coord]) -> Option<Self> {
        let (&origin, rest) = cells.split_first()?;
        let orientation = match rest.first() {
            Some(next) if next.row != origin.row => Orientation::Vertical,
            _ => Orientation::Horizontal,
        };
        let ship = Ship::new(cells.len(), origin, orientation).ok()?;
        ship.cells().eq(cells.iter().copied()).then_some(ship)
    }

    /// Record a shot at `coord`. Returns `true` if the ship occupies it.
    pub fn strike(&mut self, coord: Coord) -> bool {
        let (row, col) = coord.cell();
        if self.mask.contains(row, col) {
            let _ = self.hits.insert(row, col);
            true
        } else {
            false
        }
    }

    pub fn is_sunk(&self) -> bool {
        self.hits.len() == self.size
    }

    pub fn occupies(&self, coord: Coord) -> bool {
        let (row, col) = coord.cell();
        self.mask.contains(row, col)
    }

    /// Cells in placement order, starting at the origin.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        let Coord { row, col } = self.origin;
        (0..self.size as u8).map(move |i| match self.orientation {
            Orientation::Horizontal => Coord::new(row, col + i),
            Orientation::Vertical => Coord::new(row + i, col),
        })
    }

    /// Cells that have been hit, in row-major order.
    pub fn hit_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.hits.iter().map(Coord::from_cell)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn class(&self) -> &'static str {
        ship_class(self.size)
    }

    pub fn origin(&self) -> Coord {
        self.origin
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Occupancy mask of the ship on the board.
    pub fn mask(&self) -> Grid {
        self.mask
    }

    pub fn hits(&self) -> Grid {
        self.hits
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ class: \"{}\", origin: {}, orientation: {:?}, hits: {}/{} }}",
            self.class(),
            self.origin,
            self.orientation,
            self.hits.len(),
            self.size,
        )
    }
}
