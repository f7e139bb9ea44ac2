#![cfg_attr(not(feature = "std"), no_std)]

//! Battleship match engine: boards, ship placement, shot resolution, a
//! hunt/target bot and the round state machine, plus portable records for
//! persistence.

extern crate alloc;

mod ai;
mod bitboard;
mod board;
mod common;
mod config;
mod game;
#[cfg(feature = "std")]
mod logging;
pub mod record;
mod session;
mod ship;
#[cfg(feature = "std")]
pub mod store;
mod view;

pub use ai::BotStrategy;
pub use bitboard::{BitBoard, BitBoardError, Cells};
pub use board::{Attack, Board, SunkShip};
pub use common::*;
pub use config::*;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use record::{MatchRecord, RecordError, SeatRecord, ShipRecord};
#[cfg(feature = "std")]
pub use record::{deserialize, serialize};
pub use session::{Session, SessionError, SessionRecord};
pub use ship::Ship;
#[cfg(feature = "std")]
pub use store::MemoryStore;
pub use view::{BoardView, CellView, MatchView, Perspective};
