use crate::constants::DEFAULT_SCORE_THRESHOLD;

/// The toggles that tell one house rule set apart from another. Built once
/// per match, then shared behind an `Arc` and never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameRules {
    uno_penalty: bool,
    skip_turn_after_draw: bool,
    tie_on_exhaustion: bool,
    cumulative_scoring: bool,
    score_threshold: u32,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            uno_penalty: false,
            skip_turn_after_draw: false,
            tie_on_exhaustion: false,
            cumulative_scoring: false,
            score_threshold: DEFAULT_SCORE_THRESHOLD,
        }
    }
}

impl GameRules {
    /// Players who do not call uno at one card draw a penalty.
    pub fn with_uno_penalty(mut self, enabled: bool) -> Self {
        self.uno_penalty = enabled;
        self
    }

    /// Drawing a card ends the turn.
    pub fn with_skip_after_draw(mut self, enabled: bool) -> Self {
        self.skip_turn_after_draw = enabled;
        self
    }

    /// A draw that finds both piles spent ends the round in a tie.
    pub fn with_tie_on_exhaustion(mut self, enabled: bool) -> Self {
        self.tie_on_exhaustion = enabled;
        self
    }

    /// Rounds accumulate points until somebody reaches `threshold`.
    pub fn with_cumulative_scoring(mut self, threshold: u32) -> Self {
        self.cumulative_scoring = true;
        self.score_threshold = threshold;
        self
    }

    pub fn with_single_round(mut self) -> Self {
        self.cumulative_scoring = false;
        self
    }

    pub fn uno_penalty(&self) -> bool {
        self.uno_penalty
    }

    pub fn skip_turn_after_draw(&self) -> bool {
        self.skip_turn_after_draw
    }

    pub fn tie_on_exhaustion(&self) -> bool {
        self.tie_on_exhaustion
    }

    pub fn cumulative_scoring(&self) -> bool {
        self.cumulative_scoring
    }

    pub fn score_threshold(&self) -> u32 {
        self.score_threshold
    }

    pub fn has_match_winner(&self, score: u32) -> bool {
        !self.cumulative_scoring || score >= self.score_threshold
    }
}
