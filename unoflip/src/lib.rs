//! Rules engine for classic, flip and all-wild UNO.
//!
//! A [`game::Game`] owns the piles, hands and turn order of one match and is
//! driven entirely through its public entry points. Card effects that need a
//! decision from a player park the game in a waiting state until the matching
//! resolution call arrives.

pub mod bot;
pub mod card;
pub mod constants;
pub mod deck;
pub mod error;
pub mod game;
pub mod logger;
pub mod pile;
pub mod player;
pub mod rules;
pub mod turn;
