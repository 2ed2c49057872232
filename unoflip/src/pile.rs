use rand::{seq::SliceRandom, Rng};

use crate::card::Card;

/// An ordered stack of cards. The top is the end of the vector.
#[derive(Clone, Debug, Default)]
pub struct Pile(pub(crate) Vec<Card>);

impl Pile {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self(cards)
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.0.shuffle(rng);
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.0.pop()
    }

    /// Draws up to `count` cards, fewer if the pile runs out.
    pub fn draw_cards(&mut self, count: usize) -> Vec<Card> {
        let start = self.0.len().saturating_sub(count);
        let mut drawn = self.0.split_off(start);
        drawn.reverse();
        drawn
    }

    /// Removes the topmost card matching `predicate`.
    pub fn draw_matching(&mut self, predicate: impl Fn(&Card) -> bool) -> Option<Card> {
        self.0
            .iter()
            .rposition(predicate)
            .map(|pos| self.0.remove(pos))
    }

    pub fn peek(&self) -> Option<&Card> {
        self.0.last()
    }

    pub fn add_card(&mut self, card: Card) {
        self.0.push(card);
    }

    /// Puts `cards` underneath whatever the pile still holds.
    pub fn refill(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.0.splice(0..0, cards);
    }

    /// Takes every card except the top one, leaving the top in place.
    pub fn take_all_but_top(&mut self) -> Vec<Card> {
        let keep_from = self.0.len().saturating_sub(1);
        self.0.drain(..keep_from).collect()
    }

    pub fn take_all(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn size(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.0.iter()
    }
}
