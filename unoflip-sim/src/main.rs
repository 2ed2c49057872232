mod config;

use std::{cell::Cell, rc::Rc, sync::Arc};

use color_eyre::eyre::{bail, Result};
use rand::{rngs::OsRng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;
use unoflip::{
    bot::{AutoPlayer, SimpleBot},
    game::{Game, GameState},
    logger::GameObserver,
};

use crate::config::SimConfig;

/// Counts the updates the engine announces.
struct UpdateCounter(Rc<Cell<u64>>);

impl GameObserver for UpdateCounter {
    fn on_game_update(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt::init();

    let config = SimConfig::from_env()?;
    let seed = config.seed.unwrap_or_else(|| OsRng.next_u64());
    info!(variant = %config.variant, players = config.players, seed, "starting match");

    let deck = config
        .variant
        .build_deck(&mut ChaCha8Rng::seed_from_u64(seed));
    let player_names = (1..=config.players).map(|i| format!("Bot {i}")).collect();
    let mut game = Game::new_with_seed(player_names, deck, Arc::new(config.rules), seed)?;

    let updates = Rc::new(Cell::new(0));
    game.add_observer(Box::new(UpdateCounter(Rc::clone(&updates))));

    let mut bots = vec![SimpleBot; config.players];
    let mut turns = 0;
    while game.state() != GameState::GameOver {
        if turns == config.max_turns {
            bail!("the match did not finish within {turns} turns");
        }

        if game.state() == GameState::RoundOver {
            if let Some(winner) = game.round_winner() {
                info!(round = game.round_number(), winner = winner.name(), "round over");
            }
            game.start_new_round()?;
            continue;
        }

        let seat = game.current_seat();
        bots[seat].take_turn(&mut game)?;
        turns += 1;
    }

    for player in game.players() {
        info!(player = player.name(), score = player.score, "final score");
    }
    match game.winner() {
        Some(winner) => info!(
            winner = winner.name(),
            turns,
            updates = updates.get(),
            "match over"
        ),
        None => info!(turns, updates = updates.get(), "match ended in a tie"),
    }

    Ok(())
}
