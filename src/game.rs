//! Round state machine: two boards, turn ownership and the bot's turn.

#[cfg(not(feature = "std"))]
use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use log::{debug, info};
use rand::Rng;

use crate::ai::BotStrategy;
use crate::board::{Attack, Board, SunkShip};
use crate::common::{AttackOutcome, Coord, MatchError, Orientation, PlacementError, Seat};
use crate::config::{fleet_count, ship_class, FLEET};
use crate::view::{MatchView, Perspective};

/// Who sits in the second seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// The second seat is played by [`BotStrategy`].
    #[default]
    VsBot,
    VsPlayer,
}

/// How fleets get onto the boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum PlacementMode {
    /// Both fleets are laid out at random when the round starts.
    #[default]
    Random,
    /// Human seats place ships one at a time; a bot seat is still random.
    Manual,
}

/// Whether a human seat's strike earns another shot.
///
/// The bot seat always keeps firing after a hit or sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnPolicy {
    /// The turn passes after every resolved shot.
    #[default]
    Alternate,
    /// Hits and sinks keep the turn; a miss passes it.
    HitGoesAgain,
}

impl TurnPolicy {
    /// Whether the attacker keeps the turn after `outcome`.
    pub fn keeps_turn(self, outcome: AttackOutcome) -> bool {
        match self {
            TurnPolicy::Alternate => false,
            TurnPolicy::HitGoesAgain => outcome.is_strike(),
        }
    }
}

/// Settings fixed for the lifetime of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchConfig {
    pub mode: Mode,
    pub placement: PlacementMode,
    pub turn_policy: TurnPolicy,
}

/// Stage of the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// At least one fleet is still being placed.
    Placement,
    InProgress,
    RoundOver,
}

/// One shot fired by the bot during its turn.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BotMove {
    pub coord: Coord,
    pub outcome: AttackOutcome,
    pub sunk: Option<SunkShip>,
}

/// Everything that happened during one call to [`Match::attack`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackReport {
    pub coord: Coord,
    pub outcome: AttackOutcome,
    pub sunk: Option<SunkShip>,
    /// Shots the bot fired in reply, in order.
    pub bot_moves: Vec<BotMove>,
    pub round_over: bool,
    pub winner: Option<Seat>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct SeatState {
    pub(crate) board: Board,
    pub(crate) fleet_complete: bool,
    pub(crate) last_event: String,
}

/// A single round between two seats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub(crate) config: MatchConfig,
    pub(crate) seats: [SeatState; 2],
    pub(crate) current_turn: Seat,
    pub(crate) round_over: bool,
    pub(crate) winner: Option<Seat>,
    pub(crate) bot: BotStrategy,
    pub(crate) status: String,
}

impl Match {
    /// Start a round. Seats that place automatically get their fleet now.
    pub fn new<R: Rng + ?Sized>(config: MatchConfig, rng: &mut R) -> Result<Self, MatchError> {
        let mut game = Match {
            config,
            seats: Default::default(),
            current_turn: Seat::First,
            round_over: false,
            winner: None,
            bot: BotStrategy::new(),
            status: String::new(),
        };
        for seat in Seat::BOTH {
            if game.places_automatically(seat) {
                let state = &mut game.seats[seat.index()];
                state.board.place_fleet_randomly(rng)?;
                state.fleet_complete = true;
            }
        }
        game.status = match (config.placement, config.mode) {
            (PlacementMode::Random, _) => {
                format!("All ships randomly placed. {}'s turn.", game.current_turn)
            }
            (PlacementMode::Manual, Mode::VsBot) => {
                format!("{}, place your ships to begin.", Seat::First)
            }
            (PlacementMode::Manual, Mode::VsPlayer) => {
                "Game starting. Place your ships.".to_string()
            }
        };
        debug!("new match {:?}", config);
        Ok(game)
    }

    /// Start a round with the default turn policy.
    pub fn create<R: Rng + ?Sized>(
        mode: Mode,
        placement: PlacementMode,
        rng: &mut R,
    ) -> Result<Self, MatchError> {
        Self::new(
            MatchConfig {
                mode,
                placement,
                ..MatchConfig::default()
            },
            rng,
        )
    }

    /// Replace both boards and all round state with a fresh round.
    ///
    /// On error the current round is left untouched.
    pub fn reset_round<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), MatchError> {
        *self = Match::new(self.config, rng)?;
        info!("round reset");
        Ok(())
    }

    pub fn config(&self) -> MatchConfig {
        self.config
    }

    /// The computer-controlled seat, if any.
    pub fn bot_seat(&self) -> Option<Seat> {
        match self.config.mode {
            Mode::VsBot => Some(Seat::Second),
            Mode::VsPlayer => None,
        }
    }

    fn places_automatically(&self, seat: Seat) -> bool {
        self.config.placement == PlacementMode::Random || self.bot_seat() == Some(seat)
    }

    pub fn board(&self, seat: Seat) -> &Board {
        &self.seats[seat.index()].board
    }

    pub fn fleet_complete(&self, seat: Seat) -> bool {
        self.seats[seat.index()].fleet_complete
    }

    pub fn fleets_complete(&self) -> bool {
        self.seats.iter().all(|s| s.fleet_complete)
    }

    pub fn current_turn(&self) -> Seat {
        self.current_turn
    }

    pub fn is_round_over(&self) -> bool {
        self.round_over
    }

    pub fn winner(&self) -> Option<Seat> {
        self.winner
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn last_event(&self, seat: Seat) -> &str {
        &self.seats[seat.index()].last_event
    }

    pub fn bot(&self) -> &BotStrategy {
        &self.bot
    }

    pub fn phase(&self) -> Phase {
        if self.round_over {
            Phase::RoundOver
        } else if self.fleets_complete() {
            Phase::InProgress
        } else {
            Phase::Placement
        }
    }

    /// Ship sizes `seat` still has to place, in fleet order.
    pub fn owed_sizes(&self, seat: Seat) -> Vec<usize> {
        let mut placed: Vec<usize> = self.board(seat).ships().iter().map(|s| s.size()).collect();
        FLEET
            .iter()
            .copied()
            .filter(|size| match placed.iter().position(|p| p == size) {
                Some(i) => {
                    placed.swap_remove(i);
                    false
                }
                None => true,
            })
            .collect()
    }

    /// Place one ship for `seat` during manual placement.
    pub fn place_ship(
        &mut self,
        seat: Seat,
        size: usize,
        origin: Coord,
        orientation: Orientation,
    ) -> Result<(), MatchError> {
        if self.round_over {
            return Err(MatchError::MatchAlreadyOver);
        }
        let state = &mut self.seats[seat.index()];
        if state.fleet_complete {
            return Err(MatchError::FleetAlreadyComplete);
        }
        if state.board.placed_count(size) >= fleet_count(size) {
            return Err(PlacementError::SizeNotOwed(size).into());
        }
        state
            .board
            .place_ship(size, origin, orientation)
            .map_err(PlacementError::Board)?;

        if state.board.ships().len() == FLEET.len() {
            state.fleet_complete = true;
            self.status = if self.fleets_complete() {
                format!("All ships placed. {}'s turn.", self.current_turn)
            } else {
                format!("{} ships placed.", seat)
            };
            info!("{} finished placing ships", seat);
        }
        Ok(())
    }

    /// Fire at `coord` on the opponent's board as `seat`.
    ///
    /// If the turn then falls to the bot, the bot plays its whole turn before
    /// this returns and its shots are listed in the report.
    pub fn attack<R: Rng + ?Sized>(
        &mut self,
        seat: Seat,
        coord: Coord,
        rng: &mut R,
    ) -> Result<AttackReport, MatchError> {
        if self.round_over {
            return Err(MatchError::MatchAlreadyOver);
        }
        if !self.fleets_complete() {
            return Err(MatchError::PlacementIncomplete);
        }
        if seat != self.current_turn {
            return Err(MatchError::NotYourTurn);
        }
        if !coord.in_bounds() {
            return Err(MatchError::OutOfBounds);
        }

        let Attack { outcome, sunk } = self.fire(seat, coord)?;
        let mut bot_moves = Vec::new();
        if let Some(bot) = self.bot_seat() {
            if !self.round_over && self.current_turn == bot && seat != bot {
                bot_moves = self.play_bot_turn(bot, rng);
            }
        }
        Ok(AttackReport {
            coord,
            outcome,
            sunk,
            bot_moves,
            round_over: self.round_over,
            winner: self.winner,
        })
    }

    /// Resolve one shot and advance turn, messages and round state.
    fn fire(&mut self, attacker: Seat, coord: Coord) -> Result<Attack, MatchError> {
        let defender = attacker.opponent();
        // Bounds were checked by the caller; this is the only way a shot fails.
        let attack = self.seats[defender.index()]
            .board
            .receive_attack(coord)
            .map_err(|_| MatchError::OutOfBounds)?;
        if attack.outcome == AttackOutcome::AlreadyAttacked {
            return Err(MatchError::AlreadyAttacked);
        }
        debug!("{} fired at {}: {:?}", attacker, coord, attack.outcome);
        self.announce(attacker, &attack);

        if self.seats[defender.index()].board.all_sunk() {
            self.round_over = true;
            self.winner = Some(attacker);
            for state in self.seats.iter_mut() {
                state.last_event.clear();
            }
            self.status = if self.bot_seat() == Some(attacker) {
                "Round Over! The Bot wins this round!".to_string()
            } else {
                format!("Round Over! {} wins this round!", attacker)
            };
            info!("{} wins the round", attacker);
        } else {
            if !self.keeps_turn(attacker, attack.outcome) {
                self.current_turn = defender;
            }
            self.status = format!("{}'s turn.", self.current_turn);
        }
        Ok(attack)
    }

    /// Whether `attacker` shoots again after `outcome`.
    fn keeps_turn(&self, attacker: Seat, outcome: AttackOutcome) -> bool {
        if self.bot_seat() == Some(attacker) {
            outcome.is_strike()
        } else {
            self.config.turn_policy.keeps_turn(outcome)
        }
    }

    fn announce(&mut self, attacker: Seat, attack: &Attack) {
        let (mine, theirs) = match (&attack.outcome, &attack.sunk) {
            (AttackOutcome::Miss, _) => (
                "You missed.".to_string(),
                "The opponent fired and missed.".to_string(),
            ),
            (AttackOutcome::Hit, _) => (
                "You hit an enemy ship!".to_string(),
                "Your ship has been hit!".to_string(),
            ),
            (AttackOutcome::Sunk, sunk) => {
                let class = ship_class(sunk.as_ref().map_or(0, |s| s.size));
                (
                    format!("You sunk their {}!", class),
                    format!("Your {} has been sunk!", class),
                )
            }
            (AttackOutcome::AlreadyAttacked, _) => return,
        };
        self.seats[attacker.index()].last_event = mine;
        self.seats[attacker.opponent().index()].last_event = theirs;
    }

    /// Let the bot shoot until it misses or wins.
    ///
    /// Runs at most once per open cell on the defending board.
    fn play_bot_turn<R: Rng + ?Sized>(&mut self, bot: Seat, rng: &mut R) -> Vec<BotMove> {
        let target = bot.opponent().index();
        let budget = self.seats[target].board.unattacked().len();
        let mut moves = Vec::new();
        for _ in 0..budget {
            if self.round_over || self.current_turn != bot {
                break;
            }
            let Some(coord) = self.bot.select_target(&self.seats[target].board, rng) else {
                break;
            };
            let Attack { outcome, sunk } = match self.fire(bot, coord) {
                Ok(attack) => attack,
                Err(err) => {
                    debug!("bot shot at {} rejected: {}", coord, err);
                    break;
                }
            };
            self.bot.record_outcome(coord, outcome, &self.seats[target].board);
            moves.push(BotMove {
                coord,
                outcome,
                sunk,
            });
        }
        moves
    }

    /// What `seat` may see of the match.
    pub fn view(&self, seat: Seat) -> MatchView {
        let own = self.board(seat);
        let opponent = self.board(seat.opponent());
        MatchView {
            seat,
            own_board: own.render(Perspective::Owner),
            opponent_board: opponent.render(Perspective::Opponent),
            your_sinks: opponent.sunk_count(),
            opponent_sinks: own.sunk_count(),
            total_ships: FLEET.len(),
            fleet_complete: self.fleet_complete(seat),
            owed_sizes: self.owed_sizes(seat),
            current_turn: self.current_turn,
            phase: self.phase(),
            status: self.status.clone(),
            last_event: self.last_event(seat).to_string(),
            round_over: self.round_over,
            winner: self.winner,
            mode: self.config.mode,
            placement: self.config.placement,
        }
    }
}
