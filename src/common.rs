//! Common types for the match engine: coordinates, seats, outcomes and errors.

use core::fmt;

use crate::bitboard::BitBoardError;
use crate::config::GRID_SIZE;

/// A cell on the grid, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Whether the coordinate lies on the standard grid.
    pub fn in_bounds(&self) -> bool {
        (self.row as usize) < GRID_SIZE && (self.col as usize) < GRID_SIZE
    }

    pub(crate) fn cell(&self) -> (usize, usize) {
        (self.row as usize, self.col as usize)
    }

    pub(crate) fn from_cell((row, col): (usize, usize)) -> Self {
        Self::new(row as u8, col as u8)
    }

    /// In-bounds orthogonal neighbors, in up/down/left/right order.
    pub fn neighbors(&self) -> impl Iterator<Item = Coord> {
        let (row, col) = (self.row as i16, self.col as i16);
        [(-1, 0), (1, 0), (0, -1), (0, 1)]
            .into_iter()
            .map(move |(dr, dc)| (row + dr, col + dc))
            .filter(|&(r, c)| r >= 0 && c >= 0 && (r as usize) < GRID_SIZE && (c as usize) < GRID_SIZE)
            .map(|(r, c)| Coord::new(r as u8, c as u8))
    }
}

impl From<(u8, u8)> for Coord {
    fn from((row, col): (u8, u8)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Column letter then row number, the way players call shots.
        if self.in_bounds() {
            write!(f, "{}{}", (b'A' + self.col) as char, self.row)
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Cells extend to the right of the origin.
    Horizontal,
    /// Cells extend downward from the origin.
    Vertical,
}

/// One of the two sides of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    pub const BOTH: [Seat; 2] = [Seat::First, Seat::Second];

    pub fn index(self) -> usize {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }

    pub fn opponent(self) -> Seat {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }

    pub fn from_index(index: usize) -> Option<Seat> {
        match index {
            0 => Some(Seat::First),
            1 => Some(Seat::Second),
            _ => None,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.index() + 1)
    }
}

/// Resolution of a single shot against a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    /// The cell was already in the attack history; nothing changed.
    AlreadyAttacked,
    Miss,
    Hit,
    /// The shot completed a ship.
    Sunk,
}

impl AttackOutcome {
    /// Whether the shot struck a ship.
    pub fn is_strike(self) -> bool {
        matches!(self, AttackOutcome::Hit | AttackOutcome::Sunk)
    }
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Underlying bitboard error.
    BitBoardError(BitBoardError),
    /// A ship needs at least one cell.
    ZeroLength,
    /// Ship or shot falls partly or wholly outside the grid.
    OutOfBounds,
    /// Ship would overlap or touch an already placed ship.
    Touches,
    /// Random placement ran out of attempts.
    UnableToPlaceShip,
}

impl From<BitBoardError> for BoardError {
    fn from(err: BitBoardError) -> Self {
        BoardError::BitBoardError(err)
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::BitBoardError(e) => write!(f, "BitBoard error: {}", e),
            BoardError::ZeroLength => write!(f, "Ship must occupy at least one cell"),
            BoardError::OutOfBounds => write!(f, "Position is out of bounds"),
            BoardError::Touches => write!(f, "Ships may not overlap or touch"),
            BoardError::UnableToPlaceShip => write!(f, "Unable to place ship"),
        }
    }
}

/// Why a manual placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// The board rejected the position.
    Board(BoardError),
    /// Every ship of this size has already been placed, or the fleet has none.
    SizeNotOwed(usize),
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::Board(e) => write!(f, "{}", e),
            PlacementError::SizeNotOwed(size) => {
                write!(f, "All ships of size {} have been placed", size)
            }
        }
    }
}

/// Errors returned by Match operations. None of them change the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchError {
    InvalidPlacement(PlacementError),
    FleetAlreadyComplete,
    NotYourTurn,
    MatchAlreadyOver,
    /// Attack attempted before both fleets are placed.
    PlacementIncomplete,
    OutOfBounds,
    AlreadyAttacked,
}

impl From<PlacementError> for MatchError {
    fn from(err: PlacementError) -> Self {
        MatchError::InvalidPlacement(err)
    }
}

impl From<BoardError> for MatchError {
    fn from(err: BoardError) -> Self {
        MatchError::InvalidPlacement(PlacementError::Board(err))
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::InvalidPlacement(e) => write!(f, "Invalid placement: {}", e),
            MatchError::FleetAlreadyComplete => {
                write!(f, "All your ships have already been placed")
            }
            MatchError::NotYourTurn => write!(f, "It is not your turn"),
            MatchError::MatchAlreadyOver => write!(f, "Game is over"),
            MatchError::PlacementIncomplete => write!(f, "Not all ships have been placed yet"),
            MatchError::OutOfBounds => write!(f, "Coordinate is outside the grid"),
            MatchError::AlreadyAttacked => write!(f, "This cell has already been attacked"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BitBoardError {}
#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
#[cfg(feature = "std")]
impl std::error::Error for PlacementError {}
#[cfg(feature = "std")]
impl std::error::Error for MatchError {}
