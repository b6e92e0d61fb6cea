use std::cmp::Ordering;

use enum_iterator::{all, Sequence};
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

pub const JACK: i32 = 11;
pub const QUEEN: i32 = 12;
pub const KING: i32 = 13;
pub const ACE: i32 = 14;

#[derive(
    Debug,
    Clone,
    Default,
    Serialize,
    Sequence,
    Deserialize,
    PartialEq,
    Eq,
    Copy,
    Hash,
    PartialOrd,
    Ord,
)]
#[serde(rename_all = "camelCase")]
pub enum Suit {
    #[default]
    Spades = 0,
    Hearts = 1,
    Diamonds = 2,
    Clubs = 3,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: i32,
    pub suit: Suit,
    pub value: i32,
}

impl Card {
    // A card's identity is exactly (suit, value); the id is its index in
    // the unshuffled deck so ids can double as play actions
    pub fn new(suit: Suit, value: i32) -> Self {
        Card {
            id: suit as i32 * 13 + (value - 2),
            suit,
            value,
        }
    }

    pub fn is_spade(&self) -> bool {
        self.suit == Suit::Spades
    }
}

/// All 52 cards in a fixed suit-major, value-minor order.
pub fn create_deck() -> Vec<Card> {
    let mut deck: Vec<Card> = vec![];
    for suit in all::<Suit>() {
        for value in 2..=ACE {
            deck.push(Card::new(suit, value));
        }
    }
    deck
}

pub fn shuffle_deck(deck: &mut [Card], rng: &mut impl Rng) {
    deck.shuffle(rng);
}

// Suits grouped in display order, high cards first within each suit
fn display_sorter(a: &Card, b: &Card) -> Ordering {
    match a.suit.cmp(&b.suit) {
        Ordering::Equal => b.value.cmp(&a.value),
        ordering => ordering,
    }
}

pub fn sort_hand(hand: &mut [Card]) {
    hand.sort_by(display_sorter);
}
