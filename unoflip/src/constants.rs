use strum::EnumCount;

use crate::card::Color;

pub const STARTING_HAND_SIZE: usize = 7;
pub const UNO_PENALTY_CARDS: usize = 2;
pub const DEFAULT_SCORE_THRESHOLD: u32 = 500;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;

// Four suit colors per side, the wild marker is not a suit.
pub(crate) const SUITS_PER_SIDE: usize = (Color::COUNT - 1) / 2;

pub(crate) const CLASSIC_NUMBER_CARDS_PER_COLOR: &[u8] =
    &[0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9];
pub(crate) const CLASSIC_ACTION_CARDS_PER_COLOR: usize = 2;
pub(crate) const CLASSIC_WILD_CARDS_IN_DECK: usize = 4;
pub(crate) const CLASSIC_WILD_DRAW_CARDS_IN_DECK: usize = 4;

pub(crate) const CLASSIC_TOTAL_CARDS_IN_DECK: usize = SUITS_PER_SIDE
    * (CLASSIC_NUMBER_CARDS_PER_COLOR.len() + 3 * CLASSIC_ACTION_CARDS_PER_COLOR)
    + CLASSIC_WILD_CARDS_IN_DECK
    + CLASSIC_WILD_DRAW_CARDS_IN_DECK;

pub(crate) const FLIP_NUMBER_CARDS_PER_COLOR: &[u8] =
    &[1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9];
pub(crate) const FLIP_ACTION_CARDS_PER_COLOR: usize = 2;
pub(crate) const FLIP_WILD_CARDS_IN_DECK: usize = 4;
pub(crate) const FLIP_WILD_DRAW_CARDS_IN_DECK: usize = 4;

pub(crate) const FLIP_TOTAL_CARDS_IN_DECK: usize = SUITS_PER_SIDE
    * (FLIP_NUMBER_CARDS_PER_COLOR.len() + 4 * FLIP_ACTION_CARDS_PER_COLOR)
    + FLIP_WILD_CARDS_IN_DECK
    + FLIP_WILD_DRAW_CARDS_IN_DECK;

pub(crate) const ALL_WILD_PLAIN_CARDS_IN_DECK: usize = 28;
pub(crate) const ALL_WILD_ACTION_CARDS_PER_KIND: usize = 12;
pub(crate) const ALL_WILD_ACTION_KINDS: usize = 7;

pub(crate) const ALL_WILD_TOTAL_CARDS_IN_DECK: usize =
    ALL_WILD_PLAIN_CARDS_IN_DECK + ALL_WILD_ACTION_KINDS * ALL_WILD_ACTION_CARDS_PER_KIND;
