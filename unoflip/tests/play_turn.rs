use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use unoflip::{
    card::{Card, Color, Side, Value},
    deck::{classic_deck, flip_deck},
    error::UnoError,
    game::{Game, GameState},
    rules::GameRules,
};

fn create_player_names(count: usize) -> Vec<String> {
    let mut player_names = Vec::new();
    for i in 0..count {
        player_names.push(format!("Player {}", i + 1));
    }
    player_names
}

fn create_game(count: usize, rules: GameRules) -> Game {
    // Surfaces the audit trail with `cargo test -- --nocapture`.
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    Game::new_with_seed(create_player_names(count), classic_deck(), Arc::new(rules), 2023)
        .expect("A classic deck seats up to ten players.")
}

fn top_color(game: &Game) -> Color {
    game.current_color().expect("A running round always has a discard.")
}

fn give_current_player(game: &mut Game, card: Card) {
    let seat = game.current_seat();
    let player = game
        .player_mut(seat)
        .expect("Current player must exist.");
    player.hand[0] = card;
}

#[test]
fn play_turn_works_if_card_in_hand() {
    let mut game = create_game(4, GameRules::default());
    let color = top_color(&game);
    let card = Card::new(color, Value::Number(1)).unwrap();

    // We put a matching number card in the player's hand so that we can test for it below
    give_current_player(&mut game, card);

    game.play_card(&card).unwrap();

    assert_eq!(game.top_discard_card(), Some(&card));
    assert_eq!(game.player(0).unwrap().cards_count(), 6);
    assert_eq!(game.current_seat(), 1);
}

#[test]
fn play_turn_fails_if_card_not_in_hand() {
    let mut game = create_game(4, GameRules::default());
    let color = top_color(&game);
    let missing = Card::new(color, Value::Number(1)).unwrap();

    // Change every copy of the card to another color so that we know it is missing.
    let other = if color == Color::Green {
        Color::Blue
    } else {
        Color::Green
    };
    let player = game.player_mut(0).expect("Current player must exist.");
    for card in &mut player.hand {
        if *card == missing {
            *card = Card::new(other, Value::Number(1)).unwrap();
        }
    }

    let last_played_card_before = *game.top_discard_card().unwrap();

    let error = game.play_card(&missing).unwrap_err();

    assert_eq!(error, UnoError::CardNotInHand);
    assert_eq!(game.top_discard_card(), Some(&last_played_card_before));
    assert_eq!(game.player(0).unwrap().cards_count(), 7);
}

#[test]
fn play_turn_skips_player_properly() {
    let mut game = create_game(4, GameRules::default());
    let skip = Card::new(top_color(&game), Value::Skip).unwrap();
    give_current_player(&mut game, skip);

    game.play_card(&skip).unwrap();

    assert_eq!(game.current_seat(), 2);
}

#[test]
fn play_turn_performs_reverse_properly() {
    let mut game = create_game(4, GameRules::default());
    let reverse = Card::new(top_color(&game), Value::Reverse).unwrap();
    give_current_player(&mut game, reverse);

    game.play_card(&reverse).unwrap();

    assert!(!game.is_clockwise());
    assert_eq!(game.current_seat(), 3);
    assert_eq!(game.next_seat(), 2);
}

#[test]
fn play_turn_performs_draw_properly() {
    let mut game = create_game(4, GameRules::default());
    let draw_two = Card::new(top_color(&game), Value::DrawTwo).unwrap();
    give_current_player(&mut game, draw_two);

    game.play_card(&draw_two).unwrap();

    assert_eq!(game.player(1).unwrap().cards_count(), 9);
    assert_eq!(game.current_seat(), 2);
}

#[test]
fn play_turn_performs_wild_properly() {
    let mut game = create_game(4, GameRules::default());
    let wild = Card::new(Color::Wild, Value::Wild).unwrap();
    give_current_player(&mut game, wild);

    game.play_card(&wild).unwrap();
    assert_eq!(game.state(), GameState::WaitingForColor);
    assert_eq!(game.current_seat(), 0);

    // Nothing else may happen until a color is named.
    assert!(game.player_initiates_draw().is_err());
    assert!(game.player_pass_turn().is_err());

    game.set_color(Color::Red).unwrap();

    assert_eq!(game.state(), GameState::Running);
    assert_eq!(game.current_color(), Some(Color::Red));
    assert_eq!(game.current_seat(), 1);
}

#[test]
fn play_turn_performs_wild_draw_properly() {
    let mut game = create_game(4, GameRules::default());
    let wild_draw = Card::new(Color::Wild, Value::WildDrawFour).unwrap();
    give_current_player(&mut game, wild_draw);

    game.play_card(&wild_draw).unwrap();
    assert_eq!(game.player(1).unwrap().cards_count(), 11);

    game.set_color(Color::Yellow).unwrap();

    assert_eq!(game.current_color(), Some(Color::Yellow));
    assert_eq!(game.current_seat(), 2);
}

#[test]
fn turn_uno_works_if_only_one_card() {
    let mut game = create_game(4, GameRules::default());
    game.player_mut(2).unwrap().hand.truncate(1);

    assert!(game.call_uno(2).unwrap());
    assert!(game.player(2).unwrap().has_called_uno());
}

#[test]
fn turn_uno_does_not_work_if_more_than_one_card() {
    let mut game = create_game(4, GameRules::default());
    game.player_mut(0).unwrap().hand.truncate(4);

    assert!(!game.call_uno(0).unwrap());
    assert_eq!(game.player(0).unwrap().cards_count(), 4);
}

#[test]
fn turn_winning_works_properly() {
    let mut game = create_game(4, GameRules::default());
    let skip = Card::new(top_color(&game), Value::Skip).unwrap();

    let player = game.player_mut(0).expect("Current player must exist.");
    player.hand.clear();
    player.add_card(skip);

    let others: u32 = game.players()[1..]
        .iter()
        .map(|player| player.hand_points(Side::Light))
        .sum();

    game.play_card(&skip).unwrap();

    assert_eq!(game.player(0).unwrap().cards_count(), 0);
    assert_eq!(game.state(), GameState::GameOver);
    assert_eq!(game.winner().unwrap().name(), "Player 1");
    assert_eq!(game.player(0).unwrap().score, others);
}

#[test]
fn drawing_then_passing_moves_on() {
    let mut game = create_game(3, GameRules::default());

    let drawn = game.player_initiates_draw().unwrap();
    assert!(drawn.is_some());
    assert_eq!(game.player(0).unwrap().cards_count(), 8);

    game.player_pass_turn().unwrap();
    assert_eq!(game.current_seat(), 1);
}

#[test]
fn rounds_carry_scores_until_the_threshold() {
    let mut game = create_game(2, GameRules::default().with_cumulative_scoring(500));
    let card = Card::new(top_color(&game), Value::Number(0)).unwrap();

    let player = game.player_mut(0).unwrap();
    player.hand.clear();
    player.add_card(card);
    game.player_mut(1).unwrap().hand = vec![Card::new(Color::Red, Value::Number(5)).unwrap()];

    game.play_card(&card).unwrap();
    assert_eq!(game.state(), GameState::RoundOver);
    assert_eq!(game.player(0).unwrap().score, 5);

    game.start_new_round().unwrap();
    assert_eq!(game.state(), GameState::Running);
    assert_eq!(game.player(0).unwrap().score, 5);
    assert_eq!(game.current_seat(), 1);
    assert_eq!(game.draw_pile_size(), 108 - 2 * 7 - 1);
}

#[test]
fn each_round_starts_one_seat_further() {
    let mut game = create_game(3, GameRules::default().with_cumulative_scoring(500));

    for (round, starting_seat) in [(1, 0), (2, 1), (3, 2), (4, 0)] {
        assert_eq!(game.round_number(), round);
        assert_eq!(game.current_seat(), starting_seat);
        assert!(game.is_clockwise());
        assert!(!game.is_dark_side());

        // The starting player goes out straight away.
        let card = Card::new(top_color(&game), Value::Number(0)).unwrap();
        game.player_mut(starting_seat).unwrap().hand = vec![card];
        game.play_card(&card).unwrap();
        assert_eq!(game.state(), GameState::RoundOver);

        game.start_new_round().unwrap();
    }
}

#[test]
fn flip_game_starts_on_the_light_side() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let game = Game::new_with_seed(
        create_player_names(3),
        flip_deck(&mut rng),
        Arc::new(GameRules::default()),
        5,
    )
    .unwrap();

    assert!(!game.is_dark_side());
    assert!(Color::LIGHT.contains(&top_color(&game)));
}
