pub mod ai;
pub mod cards;
pub mod game;
pub mod rules;

// Re-export the main types
pub use ai::{ai_action, choose_bid, choose_play};
pub use cards::{create_deck, Card, Suit, ACE, JACK, KING, QUEEN};
pub use game::{
    action_for_bid, BidValue, Change, ChangeType, Difficulty, GameMode, SpadesGame, State, Team,
    TrickRecord, BID_NIL, BID_OFFSET, PLAYER_NAMES,
};
