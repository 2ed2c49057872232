use std::collections::HashMap;

use crate::card::Color;
use crate::error::Result;
use crate::game::{Game, GameState};

/// Drives one seat. Called whenever it is that seat's turn, including while
/// the game waits on a choice raised by that seat's own card.
pub trait AutoPlayer {
    /// Answers `WaitingForColor`.
    fn choose_color(&self, game: &Game) -> Color;

    /// Answers `WaitingForPlayer`.
    fn choose_player(&self, game: &Game) -> usize;

    fn take_turn(&mut self, game: &mut Game) -> Result<()>;

    /// Answers choices until the game stops asking.
    fn resolve_pending(&self, game: &mut Game) -> Result<()> {
        loop {
            match game.state() {
                GameState::WaitingForColor => game.set_color(self.choose_color(game))?,
                GameState::WaitingForPlayer => game.chosen_player(self.choose_player(game))?,
                _ => return Ok(()),
            }
        }
    }
}

/// Plays the first legal card, otherwise draws once and plays the drawn card
/// if it fits.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimpleBot;

impl AutoPlayer for SimpleBot {
    /// The declarable color the current player holds most of.
    fn choose_color(&self, game: &Game) -> Color {
        let side = game.active_side();
        let declarable = Color::declarable(side);

        let mut counts: HashMap<Color, usize> = HashMap::new();
        for card in &game.current_player().hand {
            let color = card.color(side);
            if declarable.contains(&color) {
                *counts.entry(color).or_default() += 1;
            }
        }

        declarable
            .iter()
            .copied()
            .max_by_key(|color| counts.get(color).copied().unwrap_or(0))
            .unwrap_or(declarable[0])
    }

    /// The opponent closest to going out.
    fn choose_player(&self, game: &Game) -> usize {
        let current = game.current_seat();
        (0..game.player_count())
            .filter(|&seat| seat != current)
            .min_by_key(|&seat| game.players()[seat].cards_count())
            .unwrap_or_else(|| game.next_seat())
    }

    fn take_turn(&mut self, game: &mut Game) -> Result<()> {
        let seat = game.current_seat();

        if game.state() == GameState::Running {
            match game.playable_cards().first().copied() {
                Some(card) => game.play_card(&card)?,
                None => {
                    let drawn = game.player_initiates_draw()?;
                    let still_ours = game.state() == GameState::Running
                        && game.current_seat() == seat
                        && game.has_drawn_this_turn();
                    if still_ours {
                        match drawn.filter(|card| game.can_play(card)) {
                            Some(card) => game.play_card(&card)?,
                            None => game.player_pass_turn()?,
                        }
                    }
                }
            }
        }

        self.resolve_pending(game)?;

        let one_card_left = game
            .player(seat)
            .map_or(false, |player| player.cards_count() == 1);
        if game.is_in_progress() && one_card_left {
            game.call_uno(seat)?;
        }

        Ok(())
    }
}
