// Hunt/target shot selection for the computer-controlled seat.
// Hunt mode fires at a uniformly random open cell; a hit queues its open
// neighbors, and the newest lead is always tried first.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use log::trace;
use rand::Rng;

use crate::board::Board;
use crate::common::{AttackOutcome, Coord};

/// Stateful targeting policy with a last-in-first-out lead queue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BotStrategy {
    targets: Vec<Coord>,
}

impl BotStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume with a previously saved queue, oldest lead first.
    pub fn with_targets(targets: Vec<Coord>) -> Self {
        Self { targets }
    }

    /// Pending leads, oldest first.
    pub fn targets(&self) -> &[Coord] {
        &self.targets
    }

    /// Whether a lead is being followed.
    pub fn is_targeting(&self) -> bool {
        !self.targets.is_empty()
    }

    /// Choose the next shot against `defender`.
    ///
    /// Returns `None` only when every cell has been attacked.
    pub fn select_target<R: Rng + ?Sized>(&mut self, defender: &Board, rng: &mut R) -> Option<Coord> {
        while let Some(lead) = self.targets.pop() {
            if !defender.is_attacked(lead) {
                trace!("bot follows lead {}", lead);
                return Some(lead);
            }
        }
        let open = defender.unattacked();
        let count = open.len();
        if count == 0 {
            return None;
        }
        let pick = open.iter().nth(rng.random_range(0..count)).map(Coord::from_cell);
        trace!("bot hunts at {:?}", pick);
        pick
    }

    /// Update the queue after a shot at `coord` resolved as `outcome`.
    ///
    /// `defender` must already reflect the shot.
    pub fn record_outcome(&mut self, coord: Coord, outcome: AttackOutcome, defender: &Board) {
        match outcome {
            AttackOutcome::Hit => {
                for next in coord.neighbors() {
                    if !defender.is_attacked(next) && !self.targets.contains(&next) {
                        self.targets.push(next);
                    }
                }
            }
            AttackOutcome::Sunk => self.targets.clear(),
            // A miss keeps the remaining leads.
            AttackOutcome::Miss | AttackOutcome::AlreadyAttacked => {}
        }
    }
}
