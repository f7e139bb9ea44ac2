//! Portable snapshot of a match for persistence.
//!
//! A [`MatchRecord`] holds plain lists and flags only, so any storage that
//! can hold serde data can hold a match. [`Match::from_portable`] validates
//! the record before rebuilding, and a rebuilt match behaves exactly like the
//! one that was saved.

#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

use core::fmt;

use crate::ai::BotStrategy;
use crate::board::Board;
use crate::common::{Coord, Seat};
use crate::config::{Grid, FLEET, GRID_SIZE, RECORD_VERSION};
use crate::game::{Match, MatchConfig, SeatState};
use crate::ship::Ship;

/// One ship as stored: ordered cells plus the cells hit so far.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipRecord {
    pub cells: Vec<Coord>,
    pub hits: Vec<Coord>,
}

/// One seat as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SeatRecord {
    pub ships: Vec<ShipRecord>,
    /// Attack history in row-major order.
    pub attacks: Vec<Coord>,
    pub fleet_complete: bool,
    pub last_event: String,
}

/// Serializable state of a whole match.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchRecord {
    pub version: u32,
    pub grid_size: usize,
    pub config: MatchConfig,
    pub seats: [SeatRecord; 2],
    /// Seat index of the turn owner.
    pub current_turn: u8,
    pub round_over: bool,
    /// Seat index of the round winner.
    pub winner: Option<u8>,
    /// Bot leads, oldest first.
    pub bot_targets: Vec<Coord>,
    pub status: String,
}

/// Reasons a record cannot become a match.
#[derive(Debug)]
pub enum RecordError {
    UnsupportedVersion(u32),
    GridSizeMismatch(usize),
    /// A stored cell lies outside the grid.
    OutOfBounds(Coord),
    /// A ship's cells are not one straight, gap-free run.
    MalformedShip,
    /// A hit is recorded on a cell the ship does not cover.
    HitOutsideShip(Coord),
    /// Two ships overlap or touch.
    ShipsTouch,
    /// A hit cell is missing from the attack history.
    UnattackedHit(Coord),
    /// An attacked ship cell is missing from the ship's hits.
    UnrecordedHit(Coord),
    /// A sunk ship's surrounding water is not marked attacked.
    UnrevealedHalo,
    /// The seat has more ships than the fleet.
    TooManyShips,
    InvalidSeat(u8),
    /// The round is over but no winner is recorded, or the reverse.
    InconsistentOutcome,
    #[cfg(feature = "std")]
    Codec(bincode::Error),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::UnsupportedVersion(v) => write!(f, "unsupported record version {}", v),
            RecordError::GridSizeMismatch(n) => {
                write!(f, "record grid is {}x{}, expected {}x{}", n, n, GRID_SIZE, GRID_SIZE)
            }
            RecordError::OutOfBounds(c) => write!(f, "cell {} is outside the grid", c),
            RecordError::MalformedShip => write!(f, "ship cells are not a straight run"),
            RecordError::HitOutsideShip(c) => write!(f, "hit at {} is not on the ship", c),
            RecordError::ShipsTouch => write!(f, "ships overlap or touch"),
            RecordError::UnattackedHit(c) => write!(f, "hit at {} was never attacked", c),
            RecordError::UnrecordedHit(c) => write!(f, "attack at {} is not a recorded hit", c),
            RecordError::UnrevealedHalo => write!(f, "water around a sunk ship is not revealed"),
            RecordError::TooManyShips => write!(f, "seat has more ships than the fleet"),
            RecordError::InvalidSeat(s) => write!(f, "invalid seat index {}", s),
            RecordError::InconsistentOutcome => write!(f, "round outcome is inconsistent"),
            #[cfg(feature = "std")]
            RecordError::Codec(e) => write!(f, "codec error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RecordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecordError::Codec(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(feature = "std")]
impl From<bincode::Error> for RecordError {
    fn from(err: bincode::Error) -> Self {
        RecordError::Codec(err)
    }
}

fn seat_from_index(index: u8) -> Result<Seat, RecordError> {
    Seat::from_index(index as usize).ok_or(RecordError::InvalidSeat(index))
}

fn grid_from(cells: &[Coord]) -> Result<Grid, RecordError> {
    let mut grid = Grid::new();
    for &c in cells {
        let (row, col) = c.cell();
        grid.insert(row, col).map_err(|_| RecordError::OutOfBounds(c))?;
    }
    Ok(grid)
}

impl From<&SeatState> for SeatRecord {
    fn from(state: &SeatState) -> Self {
        SeatRecord {
            ships: state
                .board
                .ships()
                .iter()
                .map(|s| ShipRecord {
                    cells: s.cells().collect(),
                    hits: s.hit_cells().collect(),
                })
                .collect(),
            attacks: state.board.attacks().iter().map(Coord::from_cell).collect(),
            fleet_complete: state.fleet_complete,
            last_event: state.last_event.clone(),
        }
    }
}

impl TryFrom<&SeatRecord> for SeatState {
    type Error = RecordError;

    fn try_from(record: &SeatRecord) -> Result<Self, Self::Error> {
        if record.ships.len() > FLEET.len() {
            return Err(RecordError::TooManyShips);
        }
        let attacks = grid_from(&record.attacks)?;
        let mut ships: Vec<Ship> = Vec::with_capacity(record.ships.len());
        let mut occupied = Grid::new();
        for stored in &record.ships {
            if let Some(&c) = stored.cells.iter().find(|c| !c.in_bounds()) {
                return Err(RecordError::OutOfBounds(c));
            }
            let mut ship = Ship::from_cells(&stored.cells).ok_or(RecordError::MalformedShip)?;
            if ship.mask().halo().intersects(&occupied) {
                return Err(RecordError::ShipsTouch);
            }
            for &hit in &stored.hits {
                if !ship.strike(hit) {
                    return Err(RecordError::HitOutsideShip(hit));
                }
                if !attacks.contains(hit.row as usize, hit.col as usize) {
                    return Err(RecordError::UnattackedHit(hit));
                }
            }
            if let Some(cell) = (ship.mask() & attacks & !ship.hits()).iter().next() {
                return Err(RecordError::UnrecordedHit(Coord::from_cell(cell)));
            }
            if ship.is_sunk() && !ship.mask().halo().is_subset(&attacks) {
                return Err(RecordError::UnrevealedHalo);
            }
            occupied |= ship.mask();
            ships.push(ship);
        }
        Ok(SeatState {
            board: Board::from_parts(ships, attacks),
            fleet_complete: record.fleet_complete,
            last_event: record.last_event.clone(),
        })
    }
}

impl Match {
    /// Snapshot this match into a portable record.
    pub fn to_portable(&self) -> MatchRecord {
        MatchRecord {
            version: RECORD_VERSION,
            grid_size: GRID_SIZE,
            config: self.config,
            seats: [
                SeatRecord::from(&self.seats[0]),
                SeatRecord::from(&self.seats[1]),
            ],
            current_turn: self.current_turn.index() as u8,
            round_over: self.round_over,
            winner: self.winner.map(|s| s.index() as u8),
            bot_targets: self.bot.targets().to_vec(),
            status: self.status.clone(),
        }
    }

    /// Rebuild a match from a record produced by [`Match::to_portable`].
    pub fn from_portable(record: &MatchRecord) -> Result<Self, RecordError> {
        if record.version != RECORD_VERSION {
            return Err(RecordError::UnsupportedVersion(record.version));
        }
        if record.grid_size != GRID_SIZE {
            return Err(RecordError::GridSizeMismatch(record.grid_size));
        }
        let current_turn = seat_from_index(record.current_turn)?;
        let winner = record.winner.map(seat_from_index).transpose()?;
        if record.round_over != winner.is_some() {
            return Err(RecordError::InconsistentOutcome);
        }
        if let Some(&c) = record.bot_targets.iter().find(|c| !c.in_bounds()) {
            return Err(RecordError::OutOfBounds(c));
        }
        Ok(Match {
            config: record.config,
            seats: [
                SeatState::try_from(&record.seats[0])?,
                SeatState::try_from(&record.seats[1])?,
            ],
            current_turn,
            round_over: record.round_over,
            winner,
            bot: BotStrategy::with_targets(record.bot_targets.clone()),
            status: record.status.clone(),
        })
    }
}

/// Encode a match as bytes.
#[cfg(feature = "std")]
pub fn serialize(game: &Match) -> Result<Vec<u8>, RecordError> {
    Ok(bincode::serialize(&game.to_portable())?)
}

/// Decode a match written by [`serialize`].
#[cfg(feature = "std")]
pub fn deserialize(bytes: &[u8]) -> Result<Match, RecordError> {
    let record: MatchRecord = bincode::deserialize(bytes)?;
    Match::from_portable(&record)
}
