use std::{fmt, sync::Arc};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use strum_macros::Display;

use crate::card::{Card, Color, PlayContext, Side, SideBehavior};
use crate::constants::{MAX_PLAYERS, MIN_PLAYERS, STARTING_HAND_SIZE, UNO_PENALTY_CARDS};
use crate::error::{Result, UnoError};
use crate::logger::{ActionType, GameLogger, GameObserver, TracingLogger};
use crate::pile::Pile;
use crate::player::Player;
use crate::rules::GameRules;
use crate::turn::{Direction, TurnManager};

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum GameState {
    Running,
    WaitingForColor,
    WaitingForPlayer,
    RoundOver,
    GameOver,
}

/// What happens once the player who played a wild names a color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorChoice {
    Declare,
    /// The next player draws until they draw the named color.
    DrawUntilMatch,
}

/// What happens to the player picked after a targeting wild.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerChoice {
    TargetedDraw(u32),
    ForcedSwap,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingAction {
    Color(ColorChoice),
    Player(PlayerChoice),
}

/// One match: piles, hands, turn order and the state machine tying them
/// together. Every mutating entry point validates before it touches anything.
pub struct Game {
    rules: Arc<GameRules>,
    deck: Vec<Card>,
    players: Vec<Player>,
    turns: TurnManager,
    draw_pile: Pile,
    discard_pile: Pile,
    color_override: Option<Color>,
    side: Side,
    state: GameState,
    pending: Option<PendingAction>,
    drawn_this_turn: bool,
    piles_exhausted: bool,
    uno_exposed: Option<usize>,
    round: u32,
    round_winner: Option<usize>,
    winner: Option<usize>,
    rng: ChaCha8Rng,
    logger: Box<dyn GameLogger>,
    observers: Vec<Box<dyn GameObserver>>,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("rules", &self.rules)
            .field("players", &self.players)
            .field("turns", &self.turns)
            .field("draw_pile", &self.draw_pile.size())
            .field("discard_pile", &self.discard_pile.size())
            .field("color_override", &self.color_override)
            .field("side", &self.side)
            .field("state", &self.state)
            .field("pending", &self.pending)
            .field("round", &self.round)
            .finish_non_exhaustive()
    }
}

impl Game {
    pub fn new(player_names: Vec<String>, deck: Vec<Card>, rules: Arc<GameRules>) -> Result<Self> {
        Self::with_rng(player_names, deck, rules, ChaCha8Rng::from_entropy())
    }

    pub fn new_with_seed(
        player_names: Vec<String>,
        deck: Vec<Card>,
        rules: Arc<GameRules>,
        seed: u64,
    ) -> Result<Self> {
        Self::with_rng(player_names, deck, rules, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(
        player_names: Vec<String>,
        deck: Vec<Card>,
        rules: Arc<GameRules>,
        rng: ChaCha8Rng,
    ) -> Result<Self> {
        if player_names.len() < MIN_PLAYERS {
            return Err(UnoError::NotEnoughPlayers);
        }
        if player_names.len() > MAX_PLAYERS {
            return Err(UnoError::TooManyPlayers);
        }
        if deck.is_empty() {
            return Err(UnoError::EmptyDeck);
        }

        let needed = player_names.len() * STARTING_HAND_SIZE + 1;
        if deck.len() < needed {
            return Err(UnoError::DeckTooSmall {
                needed,
                available: deck.len(),
            });
        }

        let players = player_names
            .into_iter()
            .map(|name| Player::new(name, Vec::new()))
            .collect::<Vec<_>>();

        let mut game = Game {
            turns: TurnManager::new(players.len(), Arc::clone(&rules)),
            rules,
            deck,
            players,
            draw_pile: Pile::new(),
            discard_pile: Pile::new(),
            color_override: None,
            side: Side::Light,
            state: GameState::RoundOver,
            pending: None,
            drawn_this_turn: false,
            piles_exhausted: false,
            uno_exposed: None,
            round: 0,
            round_winner: None,
            winner: None,
            rng,
            logger: Box::new(TracingLogger),
            observers: Vec::new(),
        };
        game.deal_round();

        Ok(game)
    }

    pub fn set_logger(&mut self, logger: Box<dyn GameLogger>) {
        self.logger = logger;
    }

    pub fn add_observer(&mut self, observer: Box<dyn GameObserver>) {
        self.observers.push(observer);
    }

    /// Plays `card` from the current player's hand onto the discard pile.
    pub fn play_card(&mut self, card: &Card) -> Result<()> {
        self.expect_state(GameState::Running, "play_card")?;

        let seat = self.turns.current();
        let Some(index) = self.players[seat].card_index(card) else {
            return self.reject("play_card", UnoError::CardNotInHand);
        };

        let ctx = self.play_context();
        if let Some(top) = self.discard_pile.peek() {
            if !card.can_be_played_on(top, ctx) {
                let target = match ctx.color_override {
                    Some(color) => format!("{} ({color} declared)", top.describe(self.side)),
                    None => top.describe(self.side),
                };
                return self.reject(
                    "play_card",
                    UnoError::IllegalMove {
                        card: card.describe(self.side),
                        target,
                    },
                );
            }
        }

        self.enforce_uno_call();

        let card = self.players[seat].remove_card(index);
        self.discard_pile.add_card(card);
        self.color_override = None;
        if self.players[seat].cards_count() == 1 {
            self.uno_exposed = Some(seat);
        }
        self.logger.log_action(
            self.players[seat].name(),
            ActionType::PlayCard,
            &card.describe(self.side),
            "",
        );

        let behavior = *card.active(self.side);
        behavior.perform_effect(self)?;

        if self.players[seat].hand.is_empty() {
            self.finish_round(Some(seat));
        } else if self.piles_exhausted {
            self.finish_round(None);
        } else {
            match self.pending {
                Some(PendingAction::Color(_)) => self.state = GameState::WaitingForColor,
                Some(PendingAction::Player(_)) => self.state = GameState::WaitingForPlayer,
                None => self.end_turn(),
            }
        }

        self.notify();
        Ok(())
    }

    /// Resolves a pending color choice and hands the turn on.
    pub fn set_color(&mut self, color: Color) -> Result<()> {
        self.expect_state(GameState::WaitingForColor, "set_color")?;
        if !color.is_declarable_on(self.side) {
            return self.reject("set_color", UnoError::InvalidColor(color));
        }
        let Some(PendingAction::Color(choice)) = self.pending else {
            return self.reject(
                "set_color",
                UnoError::WrongState {
                    expected: GameState::WaitingForColor,
                    actual: self.state,
                },
            );
        };

        self.pending = None;
        self.color_override = Some(color);
        self.logger.log_action(
            self.current_player().name(),
            ActionType::ChooseColor,
            "",
            &color.to_string(),
        );

        if choice == ColorChoice::DrawUntilMatch {
            let target = self.turns.peek_next();
            self.draw_until_color(target, color);
        }

        self.resume();
        self.notify();
        Ok(())
    }

    /// Resolves a pending player choice and hands the turn on.
    pub fn chosen_player(&mut self, seat: usize) -> Result<()> {
        self.expect_state(GameState::WaitingForPlayer, "chosen_player")?;
        if seat >= self.players.len() {
            return self.reject("chosen_player", UnoError::UnknownPlayer(seat));
        }
        let current = self.turns.current();
        if seat == current {
            return self.reject("chosen_player", UnoError::InvalidTarget(seat));
        }
        let Some(PendingAction::Player(choice)) = self.pending else {
            return self.reject(
                "chosen_player",
                UnoError::WrongState {
                    expected: GameState::WaitingForPlayer,
                    actual: self.state,
                },
            );
        };

        self.pending = None;
        match choice {
            PlayerChoice::TargetedDraw(amount) => {
                self.draw_cards_to_player(seat, amount as usize);
            }
            PlayerChoice::ForcedSwap => {
                let mine = self.players[current].replace_hand(Vec::new());
                let theirs = self.players[seat].replace_hand(mine);
                self.players[current].replace_hand(theirs);
                self.uno_exposed = [seat, current]
                    .into_iter()
                    .find(|&s| self.players[s].cards_count() == 1);
            }
        }
        self.logger.log_action(
            self.players[current].name(),
            ActionType::ChoosePlayer,
            "",
            self.players[seat].name(),
        );

        self.resume();
        self.notify();
        Ok(())
    }

    /// Draws one card for the current player. Returns `None` when neither
    /// pile has a card to give.
    pub fn player_initiates_draw(&mut self) -> Result<Option<Card>> {
        self.expect_state(GameState::Running, "player_initiates_draw")?;
        if self.drawn_this_turn {
            return self.reject("player_initiates_draw", UnoError::AlreadyDrawn);
        }

        self.enforce_uno_call();

        let seat = self.turns.current();
        let drawn = self.draw_one();
        self.drawn_this_turn = true;
        match drawn {
            Some(card) => {
                self.players[seat].add_card(card);
                self.logger.log_action(
                    self.players[seat].name(),
                    ActionType::DrawCard,
                    &card.describe(self.side),
                    "",
                );
            }
            None => self.logger.log_action(
                self.players[seat].name(),
                ActionType::DrawCard,
                "",
                "no cards left",
            ),
        }

        if self.piles_exhausted {
            self.finish_round(None);
        } else if drawn.is_some() && self.turns.advances_after_draw() {
            self.end_turn();
        }

        self.notify();
        Ok(drawn)
    }

    pub fn player_pass_turn(&mut self) -> Result<()> {
        self.expect_state(GameState::Running, "player_pass_turn")?;
        if !self.drawn_this_turn {
            return self.reject("player_pass_turn", UnoError::MustDrawBeforePassing);
        }

        self.logger.log_action(
            self.current_player().name(),
            ActionType::PassTurn,
            "",
            "",
        );
        self.end_turn();
        self.notify();
        Ok(())
    }

    /// Marks `seat` as having called uno. Returns whether the call counted,
    /// which it only does with exactly one card in hand.
    pub fn call_uno(&mut self, seat: usize) -> Result<bool> {
        if !self.is_in_progress() {
            return self.reject(
                "call_uno",
                UnoError::WrongState {
                    expected: GameState::Running,
                    actual: self.state,
                },
            );
        }
        if seat >= self.players.len() {
            return self.reject("call_uno", UnoError::UnknownPlayer(seat));
        }

        let called = self.players[seat].uno();
        if called {
            if self.uno_exposed == Some(seat) {
                self.uno_exposed = None;
            }
            self.logger
                .log_action(self.players[seat].name(), ActionType::CallUno, "", "");
            self.notify();
        }
        Ok(called)
    }

    pub fn start_new_round(&mut self) -> Result<()> {
        self.expect_state(GameState::RoundOver, "start_new_round")?;
        self.deal_round();
        self.notify();
        Ok(())
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(
            self.state,
            GameState::Running | GameState::WaitingForColor | GameState::WaitingForPlayer
        )
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }

    pub fn player_mut(&mut self, seat: usize) -> Option<&mut Player> {
        self.players.get_mut(seat)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn current_seat(&self) -> usize {
        self.turns.current()
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.turns.current()]
    }

    pub fn next_seat(&self) -> usize {
        self.turns.peek_next()
    }

    pub fn top_discard_card(&self) -> Option<&Card> {
        self.discard_pile.peek()
    }

    /// The color the next card has to match.
    pub fn current_color(&self) -> Option<Color> {
        self.color_override
            .or_else(|| self.top_discard_card().map(|card| card.color(self.side)))
    }

    pub fn color_override(&self) -> Option<Color> {
        self.color_override
    }

    pub fn active_side(&self) -> Side {
        self.side
    }

    pub fn is_dark_side(&self) -> bool {
        self.side == Side::Dark
    }

    pub fn direction(&self) -> Direction {
        self.turns.direction()
    }

    pub fn is_clockwise(&self) -> bool {
        self.turns.is_clockwise()
    }

    pub fn pending_action(&self) -> Option<PendingAction> {
        self.pending
    }

    pub fn has_drawn_this_turn(&self) -> bool {
        self.drawn_this_turn
    }

    /// The match winner, once the game is over.
    pub fn winner(&self) -> Option<&Player> {
        self.winner.map(|seat| &self.players[seat])
    }

    pub fn round_winner(&self) -> Option<&Player> {
        self.round_winner.map(|seat| &self.players[seat])
    }

    pub fn round_number(&self) -> u32 {
        self.round
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn shared_rules(&self) -> &Arc<GameRules> {
        &self.rules
    }

    pub fn draw_pile_size(&self) -> usize {
        self.draw_pile.size()
    }

    pub fn discard_pile_size(&self) -> usize {
        self.discard_pile.size()
    }

    pub fn deck_size(&self) -> usize {
        self.deck.len()
    }

    pub fn play_context(&self) -> PlayContext {
        PlayContext::new(self.side, self.color_override)
    }

    pub fn can_play(&self, card: &Card) -> bool {
        self.discard_pile
            .peek()
            .map_or(true, |top| card.can_be_played_on(top, self.play_context()))
    }

    /// Cards the current player may legally play right now.
    pub fn playable_cards(&self) -> Vec<Card> {
        if self.state != GameState::Running {
            return Vec::new();
        }
        self.current_player()
            .hand
            .iter()
            .filter(|card| self.can_play(card))
            .copied()
            .collect()
    }

    pub(crate) fn make_next_player_draw(&mut self, amount: u32) {
        let target = self.turns.peek_next();
        let drawn = self.draw_cards_to_player(target, amount as usize);
        tracing::debug!(seat = target, amount, drawn, "forced draw");
    }

    pub(crate) fn skip_players(&mut self, count: usize) {
        self.turns.skip(count);
    }

    pub(crate) fn reverse_play_order(&mut self) {
        self.turns.reverse_direction();
        tracing::debug!(direction = %self.turns.direction(), "reversed play order");
    }

    /// Turns every card over at once.
    pub(crate) fn flip_the_world(&mut self) {
        self.side = self.side.flipped();
        self.color_override = None;
        tracing::debug!(side = %self.side, "flipped");
    }

    pub(crate) fn request_color(&mut self, choice: ColorChoice) {
        self.pending = Some(PendingAction::Color(choice));
    }

    pub(crate) fn request_player(&mut self, choice: PlayerChoice) {
        self.pending = Some(PendingAction::Player(choice));
    }

    fn deal_round(&mut self) {
        let mut round_deck = Pile::from_cards(self.deck.clone());
        round_deck.shuffle(&mut self.rng);

        for player in &mut self.players {
            player.replace_hand(round_deck.draw_cards(STARTING_HAND_SIZE));
        }

        let starter = round_deck
            .draw_matching(|card| matches!(card.active(Side::Light), SideBehavior::Numeric(_)))
            .or_else(|| round_deck.draw());

        self.discard_pile = Pile::new();
        if let Some(card) = starter {
            self.discard_pile.add_card(card);
        }
        self.draw_pile = round_deck;

        self.turns.reset(self.round as usize);
        self.round += 1;
        self.side = Side::Light;
        self.color_override = None;
        self.pending = None;
        self.drawn_this_turn = false;
        self.piles_exhausted = false;
        self.uno_exposed = None;
        self.round_winner = None;
        self.state = GameState::Running;

        self.logger.log_action(
            self.current_player().name(),
            ActionType::NewRound,
            &self
                .top_discard_card()
                .map(|card| card.describe(self.side))
                .unwrap_or_default(),
            &format!("round {}", self.round),
        );
    }

    fn end_turn(&mut self) {
        self.turns.advance_turn();
        self.drawn_this_turn = false;
    }

    fn resume(&mut self) {
        self.state = GameState::Running;
        if self.piles_exhausted {
            self.finish_round(None);
        } else {
            self.end_turn();
        }
    }

    fn finish_round(&mut self, winner: Option<usize>) {
        self.pending = None;
        self.uno_exposed = None;

        let Some(seat) = winner else {
            self.round_winner = None;
            self.state = if self.rules.cumulative_scoring() {
                GameState::RoundOver
            } else {
                GameState::GameOver
            };
            self.logger
                .log_action("", ActionType::RoundTied, "", "no cards left to draw");
            tracing::info!(round = self.round, "round tied");
            return;
        };

        let points: u32 = self
            .players
            .iter()
            .enumerate()
            .filter(|(other, _)| *other != seat)
            .map(|(_, player)| player.hand_points(self.side))
            .sum();

        let player = &mut self.players[seat];
        player.score += points;
        let score = player.score;
        self.round_winner = Some(seat);

        if self.rules.has_match_winner(score) {
            self.winner = Some(seat);
            self.state = GameState::GameOver;
        } else {
            self.state = GameState::RoundOver;
        }

        self.logger.log_action(
            self.players[seat].name(),
            ActionType::RoundWon,
            "",
            &format!("{points} points, score {score}"),
        );
        tracing::info!(
            round = self.round,
            winner = self.players[seat].name(),
            points,
            score,
            state = %self.state,
            "round won"
        );
    }

    /// Penalises the last player left on one card without calling uno.
    fn enforce_uno_call(&mut self) {
        let Some(seat) = self.uno_exposed.take() else {
            return;
        };
        if !self.rules.uno_penalty() {
            return;
        }

        let player = &self.players[seat];
        if player.cards_count() == 1 && !player.has_called_uno() {
            let drawn = self.draw_cards_to_player(seat, UNO_PENALTY_CARDS);
            self.logger.log_action(
                self.players[seat].name(),
                ActionType::UnoPenalty,
                "",
                &format!("drew {drawn}"),
            );
        }
    }

    /// Draws from the draw pile, recycling the discard pile under its top
    /// card when the draw pile is empty.
    fn draw_one(&mut self) -> Option<Card> {
        if self.draw_pile.is_empty() {
            self.recycle_discard_pile();
        }

        let card = self.draw_pile.draw();
        if card.is_none() && self.rules.tie_on_exhaustion() {
            self.piles_exhausted = true;
        }
        card
    }

    fn recycle_discard_pile(&mut self) {
        let recycled = self.discard_pile.take_all_but_top();
        if recycled.is_empty() {
            return;
        }

        tracing::debug!(cards = recycled.len(), "recycling discard pile");
        self.draw_pile.refill(recycled);
        self.draw_pile.shuffle(&mut self.rng);
    }

    fn draw_cards_to_player(&mut self, seat: usize, count: usize) -> usize {
        let mut drawn = 0;
        while drawn < count {
            let Some(card) = self.draw_one() else {
                break;
            };
            self.players[seat].add_card(card);
            drawn += 1;
        }
        drawn
    }

    fn draw_until_color(&mut self, seat: usize, color: Color) {
        while let Some(card) = self.draw_one() {
            let matched = card.color(self.side) == color;
            self.players[seat].add_card(card);
            if matched {
                break;
            }
        }
    }

    fn expect_state(&self, expected: GameState, context: &str) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            self.reject(
                context,
                UnoError::WrongState {
                    expected,
                    actual: self.state,
                },
            )
        }
    }

    fn reject<T>(&self, context: &str, error: UnoError) -> Result<T> {
        self.logger.log_error(context, &error);
        Err(error)
    }

    fn notify(&mut self) {
        for observer in &mut self.observers {
            observer.on_game_update();
        }
    }
}
