use crate::card::{Card, Side};

#[derive(Clone, Debug)]
pub struct Player {
    name: String,
    pub hand: Vec<Card>,
    pub score: u32,
    pub(crate) has_called_uno: bool,
}

impl Player {
    pub fn new(name: String, cards: Vec<Card>) -> Self {
        Self {
            name,
            hand: cards,
            score: 0,
            has_called_uno: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cards_count(&self) -> usize {
        self.hand.len()
    }

    pub fn card_index(&self, card: &Card) -> Option<usize> {
        self.hand.iter().position(|x| x == card)
    }

    pub fn has_called_uno(&self) -> bool {
        self.has_called_uno
    }

    /// Adds a drawn card. A hand grown past one card forfeits an earlier uno call.
    pub fn add_card(&mut self, card: Card) {
        self.hand.push(card);
        if self.hand.len() > 1 {
            self.has_called_uno = false;
        }
    }

    pub fn remove_card(&mut self, index: usize) -> Card {
        self.hand.remove(index)
    }

    pub fn uno(&mut self) -> bool {
        if self.hand.len() == 1 {
            self.has_called_uno = true;
        }
        self.has_called_uno
    }

    pub fn hand_points(&self, side: Side) -> u32 {
        self.hand.iter().map(|card| card.points(side)).sum()
    }

    pub(crate) fn replace_hand(&mut self, cards: Vec<Card>) -> Vec<Card> {
        self.has_called_uno = false;
        std::mem::replace(&mut self.hand, cards)
    }
}
