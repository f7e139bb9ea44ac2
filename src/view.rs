//! Read-only views of a board or match as seen from one seat.

#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

use core::fmt;

use crate::common::{Coord, Seat};
use crate::config::GRID_SIZE;
use crate::game::{Mode, Phase, PlacementMode};

/// Whose eyes a board is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Perspective {
    /// The board's owner sees their own ships.
    Owner,
    /// The opponent only sees what shots have uncovered.
    Opponent,
}

/// Display state of one cell, derived from occupancy, attacks and sinking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellView {
    /// Un-attacked open water, owner view only.
    Water,
    /// Un-attacked ship cell, owner view only.
    Ship,
    /// Attacked cell of a ship that is still afloat.
    Hit,
    /// Cell of a sunk ship.
    Sunk,
    /// Attacked open water.
    Miss,
    /// Un-attacked cell in the opponent's view.
    Unknown,
}

impl CellView {
    pub fn symbol(self) -> char {
        match self {
            CellView::Water => '~',
            CellView::Ship => 'S',
            CellView::Hit => 'x',
            CellView::Sunk => 'X',
            CellView::Miss => 'O',
            CellView::Unknown => '?',
        }
    }
}

/// A rendered board with its sink tally.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardView {
    pub grid: [[CellView; GRID_SIZE]; GRID_SIZE],
    /// Ships on this board that have been sunk.
    pub sunk: usize,
    /// Ships in a complete fleet.
    pub total: usize,
}

impl BoardView {
    pub fn at(&self, coord: Coord) -> CellView {
        self.grid[coord.row as usize][coord.col as usize]
    }
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for c in 0..GRID_SIZE {
            write!(f, " {}", (b'A' + c as u8) as char)?;
        }
        for (r, row) in self.grid.iter().enumerate() {
            writeln!(f)?;
            write!(f, "{:>2}", r)?;
            for cell in row {
                write!(f, " {}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

/// Everything one seat is allowed to know about the match.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchView {
    pub seat: Seat,
    pub own_board: BoardView,
    /// Opponent's board under fog of war.
    pub opponent_board: BoardView,
    /// Opponent ships this seat has sunk.
    pub your_sinks: usize,
    /// Own ships the opponent has sunk.
    pub opponent_sinks: usize,
    pub total_ships: usize,
    pub fleet_complete: bool,
    /// Sizes this seat still has to place, largest first.
    pub owed_sizes: Vec<usize>,
    pub current_turn: Seat,
    pub phase: Phase,
    pub status: String,
    pub last_event: String,
    pub round_over: bool,
    pub winner: Option<Seat>,
    pub mode: Mode,
    pub placement: PlacementMode,
}
