/*
Game: Spades
Four players in fixed seats bid tricks, then play out 13-card hands with
spades as permanent trump. Partnership mode seats two teams across the
table; individual mode is every seat for itself.
BoardGameGeek: https://boardgamegeek.com/boardgame/1599/spades
*/

use rand::thread_rng;
use serde::{Deserialize, Serialize};

use super::cards::{create_deck, shuffle_deck, sort_hand, Card};
use super::rules::{calculate_team_bids, score_round, trick_winner, valid_cards};

// Card ids occupy actions 0-51; bid actions sit above them
pub const BID_OFFSET: i32 = 52; // 53..=65 bid that many tricks
pub const BID_NIL: i32 = 66;
// Reserved for a future blind-nil round; never offered by get_moves
pub const BID_BLIND_NIL: i32 = 67;

pub const WINNING_SCORE: i32 = 500;
pub const LOSING_SCORE: i32 = -200;

// Seats in clockwise turn order (South, West, North, East); seat 0 is the
// human
pub const PLAYER_NAMES: [&str; 4] = ["You", "West", "North", "East"];

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum State {
    #[default]
    // One bid per seat, in turn order
    Bidding,
    // Trick play
    Play,
    // Round scored; waiting for the caller to start the next round
    Scoring,
    GameOver,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum GameMode {
    #[default]
    Partnership,
    Individual,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum BidValue {
    Tricks(i32),
    Nil,
    BlindNil,
}

impl BidValue {
    // Contribution to the team bid; nil bids count for nothing
    pub fn tricks(&self) -> i32 {
        match self {
            BidValue::Tricks(n) => *n,
            BidValue::Nil | BidValue::BlindNil => 0,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, BidValue::Nil | BidValue::BlindNil)
    }
}

pub fn action_for_bid(bid: BidValue) -> i32 {
    match bid {
        BidValue::Tricks(n) => BID_OFFSET + n,
        BidValue::Nil => BID_NIL,
        BidValue::BlindNil => BID_BLIND_NIL,
    }
}

fn bid_for_action(action: i32) -> BidValue {
    match action {
        BID_NIL => BidValue::Nil,
        BID_BLIND_NIL => BidValue::BlindNil,
        _ => BidValue::Tricks(action - BID_OFFSET),
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub name: String,
    pub seats: Vec<usize>,
    pub score: i32,
    pub bags: i32,
    pub bid: i32,
    pub tricks_won: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TrickRecord {
    pub cards: [Option<Card>; 4],
    pub lead_player: usize,
    pub winner: usize,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Hash, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ChangeType {
    #[default]
    Deal,
    Shuffle,
    Play,
    Bid,
    SpadesBroken,
    TricksToWinner,
    ShowWinningCard,
    OptionalPause,
    Score,
    GameOver,
    Reorder,
    ShowPlayable,
    HidePlayable,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Hash, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
enum Location {
    #[default]
    Deck,
    Hand,
    Play,
    Bid,
    TricksTaken,
    Score,
    ReorderHand,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    #[serde(rename(serialize = "type", deserialize = "type"))]
    pub change_type: ChangeType,
    object_id: i32,
    dest: Location,
    player: usize,
    offset: usize,
    length: usize,
    tricks_taken: i32,
    start_score: i32,
    end_score: i32,
    bags: i32,
    message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SpadesGame {
    // Current game state
    pub state: State,
    pub mode: GameMode,
    pub difficulty: Difficulty,
    // Which player is making a move now
    pub current_player: usize, // 0 - 3
    // Player who led the current trick
    pub lead_player: usize,
    // Deals this round; rotates clockwise each round
    pub dealer: usize,
    // Cards in each player's hand
    pub hands: [Vec<Card>; 4],
    pub human_player: [bool; 4],
    // Two teams in partnership mode, one per seat in individual mode
    pub teams: Vec<Team>,
    // One bid per seat per round
    pub bids: [Option<BidValue>; 4],
    // Cards each player has played in the current trick
    pub current_trick: [Option<Card>; 4],
    // Completed tricks this round
    pub tricks: Vec<TrickRecord>,
    // Set once any spade has been played this round
    pub spades_broken: bool,
    pub round: i32,
    // Winning team once the game is over
    pub winner: Option<usize>,
    // List of list of animations to run after a move is made to get from the current state to the next state
    pub changes: Vec<Vec<Change>>,
    // When running simulations we save time by not creating vecs and structs to be added to the change animation list
    #[serde(default)]
    pub no_changes: bool,
}

impl SpadesGame {
    pub fn new(mode: GameMode, difficulty: Difficulty) -> Self {
        let teams = match mode {
            GameMode::Partnership => vec![
                Team {
                    name: "Team 1".to_string(),
                    seats: vec![0, 2],
                    ..Default::default()
                },
                Team {
                    name: "Team 2".to_string(),
                    seats: vec![1, 3],
                    ..Default::default()
                },
            ],
            GameMode::Individual => (0..4)
                .map(|seat| Team {
                    name: PLAYER_NAMES[seat].to_string(),
                    seats: vec![seat],
                    ..Default::default()
                })
                .collect(),
        };
        let mut game = Self {
            mode,
            difficulty,
            teams,
            human_player: [true, false, false, false],
            // East holds the deal before round 1 so South deals first
            dealer: 3,
            ..Default::default()
        };
        game.deal();
        game
    }

    // Called at the start of the game and by next_round
    fn deal(&mut self) {
        self.round += 1;
        self.dealer = (self.dealer + 1) % 4;
        self.state = State::Bidding;
        self.bids = [None; 4];
        self.tricks = vec![];
        self.current_trick = [None; 4];
        self.spades_broken = false;
        for team in self.teams.iter_mut() {
            team.bid = 0;
            team.tricks_won = 0;
        }
        // the seat after the dealer bids first and leads the first trick
        self.current_player = (self.dealer + 1) % 4;
        self.lead_player = self.current_player;

        let mut cards = create_deck();
        shuffle_deck(&mut cards, &mut thread_rng());
        let shuffle_index = self.new_change();
        let deal_index = self.new_change();
        self.add_change(
            shuffle_index,
            Change {
                change_type: ChangeType::Shuffle,
                object_id: 0,
                dest: Location::Deck,
                ..Default::default()
            },
        );
        self.hands = [vec![], vec![], vec![], vec![]];
        for offset in 0..13 {
            for player in 0..4 {
                let card = cards.pop().expect("the deck has 52 cards to deal");
                self.add_change(
                    deal_index,
                    Change {
                        change_type: ChangeType::Deal,
                        object_id: card.id,
                        dest: Location::Hand,
                        player,
                        offset,
                        length: 13,
                        ..Default::default()
                    },
                );
                self.hands[player].push(card);
            }
        }
        for player in 0..4 {
            sort_hand(&mut self.hands[player]);
            self.reorder_hand(player, player == 0);
        }
        self.show_playable();
    }

    /// Start the next round once the caller has finished presenting the
    /// scores. Rejected outside the scoring pause.
    pub fn next_round(&mut self) {
        if self.state != State::Scoring || self.winner.is_some() {
            return;
        }
        self.changes = vec![vec![]];
        self.deal();
    }

    pub fn get_moves(&self) -> Vec<i32> {
        match self.state {
            State::Bidding => {
                let mut moves: Vec<i32> = (1..=13).map(|n| BID_OFFSET + n).collect();
                moves.push(BID_NIL);
                moves
            }
            State::Play => self.playable_card_ids(),
            State::Scoring | State::GameOver => vec![],
        }
    }

    pub fn playable_card_ids(&self) -> Vec<i32> {
        self.playable_cards().iter().map(|c| c.id).collect()
    }

    pub fn playable_cards(&self) -> Vec<Card> {
        valid_cards(
            &self.hands[self.current_player],
            self.lead_card(),
            self.spades_broken,
        )
    }

    pub fn lead_card(&self) -> Option<Card> {
        self.current_trick[self.lead_player]
    }

    // Seat currently winning the trick; None until someone has played
    pub fn trick_winner_so_far(&self) -> Option<usize> {
        self.lead_card()
            .map(|lead| trick_winner(lead.suit, &self.current_trick))
    }

    pub fn team_for_seat(&self, seat: usize) -> usize {
        self.teams
            .iter()
            .position(|team| team.seats.contains(&seat))
            .expect("every seat belongs to a team")
    }

    pub fn partner_of(&self, seat: usize) -> Option<usize> {
        self.teams[self.team_for_seat(seat)]
            .seats
            .iter()
            .copied()
            .find(|&s| s != seat)
    }

    pub fn apply_move(&mut self, action: i32) {
        self.changes = vec![vec![]]; // card from player to table
        if !self.get_moves().contains(&action) {
            // leave the game untouched when an invalid move arrives
            return;
        }
        self.apply_move_internal(action);
        self.show_playable();
    }

    /// Bid on behalf of a seat. Ignored unless it is that seat's turn.
    pub fn submit_bid(&mut self, seat: usize, bid: BidValue) {
        if self.state != State::Bidding || seat != self.current_player {
            return;
        }
        self.apply_move(action_for_bid(bid));
    }

    /// Play a card on behalf of a seat. Ignored unless it is that seat's
    /// turn and the card is a legal play from their hand.
    pub fn submit_card_play(&mut self, seat: usize, card: Card) {
        if self.state != State::Play || seat != self.current_player {
            return;
        }
        self.apply_move(card.id);
    }

    fn apply_move_internal(&mut self, action: i32) {
        match self.state {
            State::Bidding => self.record_bid(bid_for_action(action)),
            State::Play => self.play_card(action),
            State::Scoring | State::GameOver => {
                unreachable!("no moves are offered after play ends")
            }
        }
    }

    fn record_bid(&mut self, bid: BidValue) {
        self.bids[self.current_player] = Some(bid);
        let index = self.new_change();
        let message = match bid {
            BidValue::Tricks(n) => n.to_string(),
            BidValue::Nil => "Nil".to_string(),
            BidValue::BlindNil => "Blind Nil".to_string(),
        };
        self.add_change(
            index,
            Change {
                change_type: ChangeType::Bid,
                object_id: self.current_player as i32,
                dest: Location::Bid,
                player: self.current_player,
                message: Some(message),
                ..Default::default()
            },
        );
        self.current_player = (self.current_player + 1) % 4;
        if self.bids.iter().all(|bid| bid.is_some()) {
            // everyone bid - the first bidder is back on lead
            calculate_team_bids(&mut self.teams, &self.bids);
            self.state = State::Play;
        }
    }

    fn play_card(&mut self, action: i32) {
        let pos = self.hands[self.current_player]
            .iter()
            .position(|c| c.id == action)
            .expect("a playable card is in the current player's hand");
        let card = self.hands[self.current_player].remove(pos);

        self.add_change(
            0,
            Change {
                change_type: ChangeType::Play,
                object_id: card.id,
                dest: Location::Play,
                player: self.current_player,
                ..Default::default()
            },
        );
        self.reorder_hand(self.current_player, false);

        if card.is_spade() && !self.spades_broken {
            self.spades_broken = true;
            let index = self.new_change();
            self.add_change(
                index,
                Change {
                    change_type: ChangeType::SpadesBroken,
                    object_id: card.id,
                    dest: Location::Play,
                    player: self.current_player,
                    ..Default::default()
                },
            );
        }

        self.current_trick[self.current_player] = Some(card);
        self.current_player = (self.current_player + 1) % 4;
        self.hide_playable();

        if self.current_trick.iter().flatten().count() == 4 {
            self.finish_trick();
        }
    }

    fn finish_trick(&mut self) {
        let lead_suit = self
            .lead_card()
            .expect("the lead player has played into a full trick")
            .suit;
        let winner = trick_winner(lead_suit, &self.current_trick);
        let team = self.team_for_seat(winner);
        self.teams[team].tricks_won += 1;

        let index = self.new_change();
        self.add_change(
            index,
            Change {
                change_type: ChangeType::ShowWinningCard,
                object_id: self.current_trick[winner]
                    .expect("there has to be a trick winner card")
                    .id,
                dest: Location::Play,
                ..Default::default()
            },
        );
        self.add_change(
            index,
            Change {
                change_type: ChangeType::OptionalPause,
                object_id: 0,
                dest: Location::Play,
                ..Default::default()
            },
        );
        let collect_index = self.new_change();
        let tricks_taken = self.teams[team].tricks_won;
        for player in 0..4 {
            if let Some(card) = self.current_trick[player] {
                self.add_change(
                    collect_index,
                    Change {
                        change_type: ChangeType::TricksToWinner,
                        object_id: card.id,
                        dest: Location::TricksTaken,
                        player: winner,
                        tricks_taken,
                        ..Default::default()
                    },
                );
            }
        }

        self.tricks.push(TrickRecord {
            cards: self.current_trick,
            lead_player: self.lead_player,
            winner,
        });
        self.current_trick = [None; 4];
        // winner of the trick leads the next one
        self.current_player = winner;
        self.lead_player = winner;

        if self.tricks.len() == 13 {
            self.score_and_check_game_over();
        }
    }

    // Entering the scoring phase settles the round immediately; the pause
    // before the next deal belongs to the presentation layer
    fn score_and_check_game_over(&mut self) {
        self.state = State::Scoring;
        let mut tricks_per_seat = [0; 4];
        for trick in &self.tricks {
            tricks_per_seat[trick.winner] += 1;
        }
        let start_scores: Vec<i32> = self.teams.iter().map(|t| t.score).collect();
        score_round(self.mode, &mut self.teams, &self.bids, &tricks_per_seat);

        let score_index = self.new_change();
        for team_index in 0..self.teams.len() {
            let (end_score, bags) = (self.teams[team_index].score, self.teams[team_index].bags);
            self.add_change(
                score_index,
                Change {
                    change_type: ChangeType::Score,
                    object_id: team_index as i32,
                    dest: Location::Score,
                    start_score: start_scores[team_index],
                    end_score,
                    bags,
                    ..Default::default()
                },
            );
        }

        if self
            .teams
            .iter()
            .any(|team| team.score >= WINNING_SCORE || team.score <= LOSING_SCORE)
        {
            // highest score wins; the earlier team takes ties
            let mut winner = 0;
            for (team_index, team) in self.teams.iter().enumerate() {
                if team.score > self.teams[winner].score {
                    winner = team_index;
                }
            }
            self.winner = Some(winner);
            self.state = State::GameOver;
            let game_over_index = self.new_change();
            self.add_change(
                game_over_index,
                Change {
                    change_type: ChangeType::GameOver,
                    object_id: winner as i32,
                    dest: Location::Deck,
                    ..Default::default()
                },
            );
        }
    }

    #[inline]
    fn new_change(&mut self) -> usize {
        self.changes.push(vec![]);
        self.changes.len() - 1
    }

    #[inline]
    fn add_change(&mut self, index: usize, change: Change) {
        if self.no_changes {
            return;
        }
        self.changes[index].push(change);
    }

    #[inline]
    fn reorder_hand(&mut self, player: usize, force_new_animation: bool) {
        if self.no_changes {
            return;
        }
        if self.changes.is_empty() || force_new_animation {
            self.new_change();
        }
        let length = self.hands[player].len();
        let index = self.changes.len() - 1;
        self.changes[index].extend(self.hands[player].iter().enumerate().map(|(offset, card)| {
            Change {
                change_type: ChangeType::Reorder,
                dest: Location::ReorderHand,
                object_id: card.id,
                player,
                offset,
                length,
                ..Default::default()
            }
        }));
    }

    fn show_playable(&mut self) {
        if self.changes.is_empty() {
            self.changes = vec![vec![]];
        }
        let change_index = self.new_change();
        if self.current_player == 0 && self.winner.is_none() {
            for action in self.get_moves() {
                self.add_change(
                    change_index,
                    Change {
                        object_id: action,
                        change_type: ChangeType::ShowPlayable,
                        dest: Location::Hand,
                        player: self.current_player,
                        ..Default::default()
                    },
                );
            }
        } else {
            self.hide_playable();
        }
    }

    fn hide_playable(&mut self) {
        if self.changes.is_empty() {
            self.changes = vec![vec![]];
        }
        let change_index = self.changes.len() - 1;
        let cards = self.hands[0].clone();
        for card in cards {
            self.add_change(
                change_index,
                Change {
                    object_id: card.id,
                    change_type: ChangeType::HidePlayable,
                    dest: Location::Hand,
                    player: self.current_player,
                    ..Default::default()
                },
            );
        }
    }
}
