use std::sync::Arc;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use unoflip::{
    bot::{AutoPlayer, SimpleBot},
    card::{Color, PlayContext, Side},
    deck::{flip_deck, GameVariant},
    game::{Game, GameState},
    rules::GameRules,
};

fn total_cards(game: &Game) -> usize {
    game.draw_pile_size()
        + game.discard_pile_size()
        + game
            .players()
            .iter()
            .map(|player| player.cards_count())
            .sum::<usize>()
}

fn variants() -> impl Strategy<Value = GameVariant> {
    prop_oneof![
        Just(GameVariant::Classic),
        Just(GameVariant::Flip),
        Just(GameVariant::AllWild),
    ]
}

fn rule_sets() -> impl Strategy<Value = GameRules> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(penalty, skip_after_draw, tie, cumulative)| {
            let rules = GameRules::default()
                .with_uno_penalty(penalty)
                .with_skip_after_draw(skip_after_draw)
                .with_tie_on_exhaustion(tie);
            if cumulative {
                rules.with_cumulative_scoring(200)
            } else {
                rules
            }
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn cards_are_never_created_or_lost(
        seed in any::<u64>(),
        variant in variants(),
        players in 2usize..=6,
        rules in rule_sets(),
    ) {
        let deck = variant.build_deck(&mut ChaCha8Rng::seed_from_u64(seed));
        let names = (1..=players).map(|i| format!("Bot {i}")).collect();
        let mut game = Game::new_with_seed(names, deck, Arc::new(rules), seed).unwrap();
        let mut bot = SimpleBot;

        for _ in 0..400 {
            match game.state() {
                GameState::GameOver => break,
                GameState::RoundOver => game.start_new_round().unwrap(),
                _ => bot.take_turn(&mut game).unwrap(),
            }
            prop_assert_eq!(total_cards(&game), game.deck_size());
            prop_assert!(game.current_seat() < game.player_count());
        }
    }

    #[test]
    fn legality_is_the_three_way_rule(
        seed in any::<u64>(),
        first in 0usize..112,
        second in 0usize..112,
        dark in any::<bool>(),
        declared in proptest::option::of(0usize..4),
    ) {
        let deck = flip_deck(&mut ChaCha8Rng::seed_from_u64(seed));
        let (card, top) = (deck[first], deck[second]);
        let side = if dark { Side::Dark } else { Side::Light };
        let color_override = declared.map(|i| Color::declarable(side)[i]);
        let ctx = PlayContext::new(side, color_override);

        let target = color_override.unwrap_or_else(|| top.color(side));
        let expected = card.color(side) == Color::Wild
            || card.color(side) == target
            || card.value(side) == top.value(side);

        prop_assert_eq!(card.can_be_played_on(&top, ctx), expected);
    }
}

#[test]
fn a_whole_match_reaches_a_result() {
    for variant in [GameVariant::Classic, GameVariant::Flip, GameVariant::AllWild] {
        let deck = variant.build_deck(&mut ChaCha8Rng::seed_from_u64(11));
        let names = (1..=4).map(|i| format!("Bot {i}")).collect();
        let rules = GameRules::default().with_cumulative_scoring(100);
        let mut game = Game::new_with_seed(names, deck, Arc::new(rules), 11).unwrap();
        let mut bot = SimpleBot;

        for _ in 0..20_000 {
            match game.state() {
                GameState::GameOver => break,
                GameState::RoundOver => game.start_new_round().unwrap(),
                _ => bot.take_turn(&mut game).unwrap(),
            }
        }

        assert_eq!(game.state(), GameState::GameOver, "{variant} never finished");
        if let Some(winner) = game.winner() {
            assert!(winner.score >= 100);
        }
    }
}
