use std::sync::Arc;

use strum_macros::Display;

use crate::rules::GameRules;

#[derive(Clone, Copy, Debug, Default, Display, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Seat order, whose turn it is and which way play goes. Skips requested by
/// card effects pile up and are spent on the next advance.
#[derive(Clone, Debug)]
pub struct TurnManager {
    rules: Arc<GameRules>,
    player_count: usize,
    current: usize,
    direction: Direction,
    pending_skips: usize,
}

impl TurnManager {
    pub fn new(player_count: usize, rules: Arc<GameRules>) -> Self {
        Self {
            rules,
            player_count,
            current: 0,
            direction: Direction::Clockwise,
            pending_skips: 0,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn player_count(&self) -> usize {
        self.player_count
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_clockwise(&self) -> bool {
        self.direction == Direction::Clockwise
    }

    pub fn pending_skips(&self) -> usize {
        self.pending_skips
    }

    pub fn rules(&self) -> &Arc<GameRules> {
        &self.rules
    }

    /// The seat `n` steps away from the current one in the direction of play.
    pub fn nth_from_current(&self, n: usize) -> usize {
        let steps = n % self.player_count;
        match self.direction {
            Direction::Clockwise => (self.current + steps) % self.player_count,
            Direction::CounterClockwise => {
                (self.current + self.player_count - steps) % self.player_count
            }
        }
    }

    pub fn peek_next(&self) -> usize {
        self.nth_from_current(1)
    }

    /// Moves to the next seat, jumping over any pending skips, and returns it.
    pub fn advance_turn(&mut self) -> usize {
        let steps = 1 + self.pending_skips;
        self.current = self.nth_from_current(steps);
        self.pending_skips = 0;
        tracing::debug!(seat = self.current, steps, "advanced turn");
        self.current
    }

    pub fn skip(&mut self, count: usize) {
        self.pending_skips += count;
    }

    pub fn reverse_direction(&mut self) {
        self.direction = self.direction.reversed();
    }

    /// Whether drawing a card hands the turn to the next player.
    pub fn advances_after_draw(&self) -> bool {
        self.rules.skip_turn_after_draw()
    }

    pub fn reset(&mut self, starting_seat: usize) {
        self.current = starting_seat % self.player_count;
        self.direction = Direction::Clockwise;
        self.pending_skips = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turns(count: usize) -> TurnManager {
        TurnManager::new(count, Arc::new(GameRules::default()))
    }

    #[test]
    fn next_player_turn_works_when_first_player() {
        let mut turns = turns(4);
        assert_eq!(turns.advance_turn(), 1);
    }

    #[test]
    fn next_player_turn_works_when_last_player() {
        let mut turns = turns(4);
        turns.reset(3);
        assert_eq!(turns.advance_turn(), 0);
    }

    #[test]
    fn skip_player_turn_works() {
        let mut turns = turns(4);
        turns.skip(1);
        assert_eq!(turns.advance_turn(), 2);
        assert_eq!(turns.pending_skips(), 0);
        assert_eq!(turns.advance_turn(), 3);
    }

    #[test]
    fn multi_skip_wraps_around() {
        let mut turns = turns(3);
        turns.reset(1);
        turns.skip(2);
        assert_eq!(turns.advance_turn(), 1);
    }

    #[test]
    fn reverse_works() {
        let mut turns = turns(4);
        turns.reverse_direction();
        assert!(!turns.is_clockwise());
        assert_eq!(turns.peek_next(), 3);
        assert_eq!(turns.advance_turn(), 3);
        assert_eq!(turns.advance_turn(), 2);
    }

    #[test]
    fn skip_uses_the_direction_at_advance_time() {
        let mut turns = turns(5);
        turns.skip(1);
        turns.reverse_direction();
        assert_eq!(turns.advance_turn(), 3);
    }

    #[test]
    fn reverse_with_two_players_just_passes_the_turn() {
        let mut turns = turns(2);
        turns.reverse_direction();
        assert_eq!(turns.advance_turn(), 1);
    }

    #[test]
    fn advancing_after_draw_follows_the_shared_rules() {
        let rules = Arc::new(GameRules::default().with_skip_after_draw(true));
        let turns = TurnManager::new(3, Arc::clone(&rules));
        assert!(turns.advances_after_draw());
        assert!(Arc::ptr_eq(turns.rules(), &rules));
    }
}
