//! One seat's board: ship placement, shot resolution and rendering.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::fmt;
use log::{debug, trace};
use rand::Rng;

use crate::common::{AttackOutcome, BoardError, Coord, Orientation};
use crate::config::{Grid, FLEET, GRID_SIZE, MAX_LAYOUT_ATTEMPTS, MAX_PLACEMENT_SAMPLES};
use crate::ship::Ship;
use crate::view::{BoardView, CellView, Perspective};

/// Details of a ship that has just been sunk.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SunkShip {
    pub size: usize,
    pub cells: Vec<Coord>,
}

/// Result of a shot resolved by [`Board::receive_attack`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attack {
    pub outcome: AttackOutcome,
    /// Present only when `outcome` is `Sunk`.
    pub sunk: Option<SunkShip>,
}

/// Ships, their occupancy and the shots received.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Board {
    ships: Vec<Ship>,
    occupied: Grid,
    attacks: Grid,
}

impl Board {
    /// Create an empty board (no ships placed, no shots taken).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Cells covered by any ship.
    pub fn occupied(&self) -> Grid {
        self.occupied
    }

    /// Every cell that has been shot at or revealed around a sunk ship.
    pub fn attacks(&self) -> Grid {
        self.attacks
    }

    pub fn is_attacked(&self, coord: Coord) -> bool {
        let (row, col) = coord.cell();
        self.attacks.contains(row, col)
    }

    /// Cells still open to a shot.
    pub fn unattacked(&self) -> Grid {
        !self.attacks
    }

    /// How many ships of `size` are on the board.
    pub fn placed_count(&self, size: usize) -> usize {
        self.ships.iter().filter(|s| s.size() == size).count()
    }

    pub fn sunk_count(&self) -> usize {
        self.ships.iter().filter(|s| s.is_sunk()).count()
    }

    /// `true` when every ship is sunk. An empty board is never sunk.
    pub fn all_sunk(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(Ship::is_sunk)
    }

    /// Check that `ship` keeps clear of every placed ship, buffer included.
    fn check_clearance(&self, ship: &Ship) -> Result<(), BoardError> {
        if ship.mask().halo().intersects(&self.occupied) {
            return Err(BoardError::Touches);
        }
        Ok(())
    }

    /// Place a ship of `size` at `origin` extending along `orientation`.
    ///
    /// The run must lie on the grid and no cell of it may be in the 3×3
    /// neighborhood of an existing ship. The board is unchanged on error.
    pub fn place_ship(
        &mut self,
        size: usize,
        origin: Coord,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        let ship = Ship::new(size, origin, orientation)?;
        self.check_clearance(&ship)?;
        self.insert(ship);
        debug!("placed {:?}", ship);
        Ok(())
    }

    fn insert(&mut self, ship: Ship) {
        self.occupied |= ship.mask();
        self.ships.push(ship);
    }

    /// All positions where a ship of `size` could legally go right now.
    fn legal_placements(&self, size: usize) -> Vec<(Coord, Orientation)> {
        let mut out = Vec::new();
        for orientation in [Orientation::Horizontal, Orientation::Vertical] {
            for row in 0..GRID_SIZE as u8 {
                for col in 0..GRID_SIZE as u8 {
                    let origin = Coord::new(row, col);
                    if let Ok(ship) = Ship::new(size, origin, orientation) {
                        if self.check_clearance(&ship).is_ok() {
                            out.push((origin, orientation));
                        }
                    }
                }
            }
        }
        out
    }

    /// Pick a legal spot for one ship of `size`.
    ///
    /// Samples at random first; once the sample budget is spent it chooses
    /// uniformly among all legal spots, or returns `None` if there are none.
    fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        size: usize,
    ) -> Option<(Coord, Orientation)> {
        for _ in 0..MAX_PLACEMENT_SAMPLES {
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let origin = Coord::new(
                rng.random_range(0..GRID_SIZE as u8),
                rng.random_range(0..GRID_SIZE as u8),
            );
            let Ok(ship) = Ship::new(size, origin, orientation) else {
                continue;
            };
            if self.check_clearance(&ship).is_ok() {
                return Some((origin, orientation));
            }
        }
        let candidates = self.legal_placements(size);
        if candidates.is_empty() {
            None
        } else {
            Some(candidates[rng.random_range(0..candidates.len())])
        }
    }

    /// Place the given ship sizes at random on top of what is already here.
    ///
    /// A dead end restarts from the ships present on entry, so a failed call
    /// leaves the board as it found it.
    pub fn place_ships_randomly<R: Rng + ?Sized>(
        &mut self,
        sizes: &[usize],
        rng: &mut R,
    ) -> Result<(), BoardError> {
        let start = self.clone();
        for attempt in 0..MAX_LAYOUT_ATTEMPTS {
            let mut ok = true;
            for &size in sizes {
                match self.random_placement(rng, size) {
                    Some((origin, orientation)) => self.place_ship(size, origin, orientation)?,
                    None => {
                        ok = false;
                        break;
                    }
                }
            }
            if ok {
                return Ok(());
            }
            debug!("random layout attempt {} hit a dead end, restarting", attempt + 1);
            *self = start.clone();
        }
        Err(BoardError::UnableToPlaceShip)
    }

    /// Place the standard fleet at random.
    pub fn place_fleet_randomly<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), BoardError> {
        self.place_ships_randomly(&FLEET, rng)
    }

    /// Resolve a shot at `coord`.
    ///
    /// A repeated shot reports `AlreadyAttacked` and changes nothing. Sinking
    /// a ship also marks its whole halo as attacked.
    pub fn receive_attack(&mut self, coord: Coord) -> Result<Attack, BoardError> {
        if !coord.in_bounds() {
            return Err(BoardError::OutOfBounds);
        }
        if self.is_attacked(coord) {
            return Ok(Attack {
                outcome: AttackOutcome::AlreadyAttacked,
                sunk: None,
            });
        }
        let (row, col) = coord.cell();
        self.attacks.insert(row, col)?;

        let Some(ship) = self.ships.iter_mut().find(|s| s.occupies(coord)) else {
            trace!("shot at {} missed", coord);
            return Ok(Attack {
                outcome: AttackOutcome::Miss,
                sunk: None,
            });
        };
        ship.strike(coord);
        if !ship.is_sunk() {
            trace!("shot at {} hit {:?}", coord, ship);
            return Ok(Attack {
                outcome: AttackOutcome::Hit,
                sunk: None,
            });
        }

        let sunk = SunkShip {
            size: ship.size(),
            cells: ship.cells().collect(),
        };
        self.attacks |= ship.mask().halo();
        debug!("shot at {} sank {:?}", coord, ship);
        Ok(Attack {
            outcome: AttackOutcome::Sunk,
            sunk: Some(sunk),
        })
    }

    /// Render the board for `perspective`.
    ///
    /// Precedence per cell: sunk, then hit, then miss, then the owner's
    /// water/ship or the opponent's unknown.
    pub fn render(&self, perspective: Perspective) -> BoardView {
        let mut grid = [[CellView::Unknown; GRID_SIZE]; GRID_SIZE];
        for (r, row) in grid.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = self.cell_view(Coord::from_cell((r, c)), perspective);
            }
        }
        BoardView {
            grid,
            sunk: self.sunk_count(),
            total: FLEET.len(),
        }
    }

    fn cell_view(&self, coord: Coord, perspective: Perspective) -> CellView {
        let attacked = self.is_attacked(coord);
        let ship = self.ships.iter().find(|s| s.occupies(coord));
        match (ship, attacked, perspective) {
            (Some(s), true, _) if s.is_sunk() => CellView::Sunk,
            (Some(_), true, _) => CellView::Hit,
            (None, true, _) => CellView::Miss,
            (_, false, Perspective::Opponent) => CellView::Unknown,
            (Some(_), false, Perspective::Owner) => CellView::Ship,
            (None, false, Perspective::Owner) => CellView::Water,
        }
    }

    /// Rebuild a board from raw parts. The caller guarantees consistency.
    pub(crate) fn from_parts(ships: Vec<Ship>, attacks: Grid) -> Self {
        let occupied = ships.iter().fold(Grid::new(), |acc, s| acc | s.mask());
        Board {
            ships,
            occupied,
            attacks,
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  occupied: {:?},\n  attacks: {:?},\n  ships: {:?}\n}}",
            self.occupied, self.attacks, self.ships
        )
    }
}
