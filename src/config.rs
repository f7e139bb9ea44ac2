use crate::bitboard::BitBoard;

/// Side length of the square grid.
pub const GRID_SIZE: usize = 10;

/// Ship sizes every seat must place before the first shot.
pub const FLEET: [usize; 10] = [4, 3, 3, 2, 2, 2, 1, 1, 1, 1];

/// Class names by ship size, used in sunk messages.
pub const SHIP_CLASSES: [(usize, &str); 4] = [
    (4, "Battleship"),
    (3, "Cruiser"),
    (2, "Destroyer"),
    (1, "Submarine"),
];

/// Random draws per ship before falling back to an exhaustive scan.
pub const MAX_PLACEMENT_SAMPLES: usize = 100;

/// Full layouts attempted before random placement gives up.
pub const MAX_LAYOUT_ATTEMPTS: usize = 16;

/// Format version written into every `MatchRecord`.
pub const RECORD_VERSION: u32 = 1;

/// Cell set covering the standard grid.
pub type Grid = BitBoard<u128, GRID_SIZE>;

/// Class name for a ship of `size`, or `"ship"` for sizes outside the fleet.
pub fn ship_class(size: usize) -> &'static str {
    SHIP_CLASSES
        .iter()
        .find(|(s, _)| *s == size)
        .map(|(_, name)| *name)
        .unwrap_or("ship")
}

/// How many ships of `size` the fleet requires.
pub fn fleet_count(size: usize) -> usize {
    FLEET.iter().filter(|&&s| s == size).count()
}
