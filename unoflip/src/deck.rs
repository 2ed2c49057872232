use rand::{seq::SliceRandom, Rng};
use strum_macros::{Display, EnumIter, EnumString};

use crate::{
    card::{Card, Color, SideBehavior, Value},
    constants::*,
};

/// The card sets the engine ships with. Each one is just a deck; the engine
/// plays all of them through the same rules.
#[derive(Clone, Copy, Debug, Display, EnumString, EnumIter, PartialEq, Eq)]
pub enum GameVariant {
    Classic,
    Flip,
    AllWild,
}

impl GameVariant {
    pub fn build_deck<R: Rng + ?Sized>(self, rng: &mut R) -> Vec<Card> {
        match self {
            GameVariant::Classic => classic_deck(),
            GameVariant::Flip => flip_deck(rng),
            GameVariant::AllWild => all_wild_deck(),
        }
    }
}

fn single(color: Color, value: Value) -> Card {
    Card::single(SideBehavior::new(color, value)).expect("deck faces are always playable")
}

pub fn classic_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(CLASSIC_TOTAL_CARDS_IN_DECK);

    for color in Color::LIGHT {
        for value in [Value::Skip, Value::Reverse, Value::DrawTwo] {
            for _ in 0..CLASSIC_ACTION_CARDS_PER_COLOR {
                cards.push(single(color, value));
            }
        }

        for number in CLASSIC_NUMBER_CARDS_PER_COLOR {
            cards.push(single(color, Value::Number(*number)));
        }
    }

    for _ in 0..CLASSIC_WILD_CARDS_IN_DECK {
        cards.push(single(Color::Wild, Value::Wild));
    }

    for _ in 0..CLASSIC_WILD_DRAW_CARDS_IN_DECK {
        cards.push(single(Color::Wild, Value::WildDrawFour));
    }

    cards
}

fn flip_side(colors: [Color; 4], actions: [Value; 4], wild_draw: Value) -> Vec<SideBehavior> {
    let mut sides = Vec::with_capacity(FLIP_TOTAL_CARDS_IN_DECK);

    for color in colors {
        for value in actions {
            for _ in 0..FLIP_ACTION_CARDS_PER_COLOR {
                sides.push(SideBehavior::new(color, value));
            }
        }

        for number in FLIP_NUMBER_CARDS_PER_COLOR {
            sides.push(SideBehavior::new(color, Value::Number(*number)));
        }
    }

    for _ in 0..FLIP_WILD_CARDS_IN_DECK {
        sides.push(SideBehavior::new(Color::Wild, Value::Wild));
    }

    for _ in 0..FLIP_WILD_DRAW_CARDS_IN_DECK {
        sides.push(SideBehavior::new(Color::Wild, wild_draw));
    }

    sides
}

/// Double-sided deck. Dark faces are paired with light faces at random.
pub fn flip_deck<R: Rng + ?Sized>(rng: &mut R) -> Vec<Card> {
    let light = flip_side(
        Color::LIGHT,
        [Value::DrawOne, Value::Reverse, Value::Skip, Value::Flip],
        Value::WildDrawTwo,
    );
    let mut dark = flip_side(
        Color::DARK,
        [Value::DrawFive, Value::Reverse, Value::SkipEveryone, Value::Flip],
        Value::WildDrawColor,
    );
    dark.shuffle(rng);

    light
        .into_iter()
        .zip(dark)
        .map(|(light, dark)| Card::double(light, dark).expect("deck faces are always playable"))
        .collect()
}

pub fn all_wild_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(ALL_WILD_TOTAL_CARDS_IN_DECK);

    for _ in 0..ALL_WILD_PLAIN_CARDS_IN_DECK {
        cards.push(single(Color::Wild, Value::AllWild));
    }

    let actions: [Value; ALL_WILD_ACTION_KINDS] = [
        Value::AllWildDrawTwo,
        Value::AllWildDrawFour,
        Value::AllWildReverse,
        Value::AllWildSkip,
        Value::AllWildSkipTwo,
        Value::AllWildTargetedDrawTwo,
        Value::AllWildForcedSwap,
    ];
    for value in actions {
        for _ in 0..ALL_WILD_ACTION_CARDS_PER_KIND {
            cards.push(single(Color::Wild, value));
        }
    }

    cards
}
