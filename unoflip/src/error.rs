use std::fmt::Debug;

use thiserror::Error;

use crate::card::Color;
use crate::game::GameState;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnoError {
    #[error("Not enough players")]
    NotEnoughPlayers,
    #[error("Too many players")]
    TooManyPlayers,
    #[error("The deck has no cards")]
    EmptyDeck,
    #[error("The deck has {available} cards but dealing needs {needed}")]
    DeckTooSmall { needed: usize, available: usize },
    #[error("A card cannot be built with a back side as a playable face")]
    InvalidCard,
    #[error("The card is not in the current player's hand")]
    CardNotInHand,
    #[error("{card} cannot be played on {target}")]
    IllegalMove { card: String, target: String },
    #[error("Expected the game to be {expected} but it is {actual}")]
    WrongState {
        expected: GameState,
        actual: GameState,
    },
    #[error("The current player has already drawn this turn")]
    AlreadyDrawn,
    #[error("The current player must draw before passing")]
    MustDrawBeforePassing,
    #[error("There is no player in seat {0}")]
    UnknownPlayer(usize),
    #[error("The player in seat {0} cannot be targeted")]
    InvalidTarget(usize),
    #[error("{0} cannot be declared right now")]
    InvalidColor(Color),
    #[error("The back of a card has no effect")]
    InactiveSide,
}

pub type Result<T, E = UnoError> = std::result::Result<T, E>;
