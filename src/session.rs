//! Multi-round score keeping around a [`Match`].
//!
//! The engine only reports who won a round. A `Session` is the caller-side
//! ledger: it counts round wins per seat and decides when the match is won.

use core::fmt;

use log::info;
use rand::Rng;

use crate::common::{MatchError, Seat};
use crate::game::{Match, MatchConfig};
use crate::record::{MatchRecord, RecordError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A seat has already reached the winning round count.
    MatchDecided(Seat),
    /// The current round has not finished yet.
    RoundInProgress,
    Match(MatchError),
}

impl From<MatchError> for SessionError {
    fn from(err: MatchError) -> Self {
        SessionError::Match(err)
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::MatchDecided(seat) => write!(f, "{} has already won the match", seat),
            SessionError::RoundInProgress => write!(f, "The current round is still in progress"),
            SessionError::Match(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SessionError {}

/// Serializable form of a [`Session`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionRecord {
    pub game: MatchRecord,
    pub rounds_to_win: u32,
    pub wins: [u32; 2],
    pub counted: bool,
}

/// A match played over several rounds with a win ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    game: Match,
    rounds_to_win: u32,
    wins: [u32; 2],
    // Whether the finished round is already in `wins`.
    counted: bool,
}

impl Session {
    pub fn new<R: Rng + ?Sized>(
        config: MatchConfig,
        rounds_to_win: u32,
        rng: &mut R,
    ) -> Result<Self, MatchError> {
        Ok(Session {
            game: Match::new(config, rng)?,
            rounds_to_win: rounds_to_win.max(1),
            wins: [0; 2],
            counted: false,
        })
    }

    pub fn game(&self) -> &Match {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Match {
        &mut self.game
    }

    pub fn wins(&self, seat: Seat) -> u32 {
        self.wins[seat.index()]
    }

    pub fn rounds_to_win(&self) -> u32 {
        self.rounds_to_win
    }

    /// Credit the finished round to its winner, once.
    ///
    /// Returns the winner the first time it is called after a round ends.
    pub fn record_round(&mut self) -> Option<Seat> {
        if self.counted {
            return None;
        }
        let winner = self.game.winner()?;
        self.wins[winner.index()] += 1;
        self.counted = true;
        info!(
            "{} takes the round ({} - {})",
            winner, self.wins[0], self.wins[1]
        );
        Some(winner)
    }

    /// The seat that has reached the winning round count, if any.
    pub fn match_winner(&self) -> Option<Seat> {
        Seat::BOTH
            .into_iter()
            .find(|s| self.wins[s.index()] >= self.rounds_to_win)
    }

    /// Count the finished round and start the next one.
    pub fn next_round<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), SessionError> {
        if !self.game.is_round_over() {
            return Err(SessionError::RoundInProgress);
        }
        self.record_round();
        if let Some(seat) = self.match_winner() {
            return Err(SessionError::MatchDecided(seat));
        }
        self.game.reset_round(rng)?;
        self.counted = false;
        Ok(())
    }

    pub fn to_portable(&self) -> SessionRecord {
        SessionRecord {
            game: self.game.to_portable(),
            rounds_to_win: self.rounds_to_win,
            wins: self.wins,
            counted: self.counted,
        }
    }

    pub fn from_portable(record: &SessionRecord) -> Result<Self, RecordError> {
        Ok(Session {
            game: Match::from_portable(&record.game)?,
            rounds_to_win: record.rounds_to_win.max(1),
            wins: record.wins,
            counted: record.counted,
        })
    }
}
