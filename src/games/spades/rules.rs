use std::collections::HashMap;

use super::cards::{Card, Suit};
use super::game::{BidValue, GameMode, Team};

/// Legal cards for the seat about to play. `lead_card` is `None` when that
/// seat is leading the trick.
pub fn valid_cards(hand: &[Card], lead_card: Option<Card>, spades_broken: bool) -> Vec<Card> {
    match lead_card {
        None => {
            if spades_broken {
                return hand.to_vec();
            }
            let non_spades: Vec<Card> = hand.iter().filter(|c| !c.is_spade()).copied().collect();
            if non_spades.is_empty() {
                // a hand holding nothing but spades may lead them unbroken
                hand.to_vec()
            } else {
                non_spades
            }
        }
        Some(lead) => {
            let in_suit: Vec<Card> = hand
                .iter()
                .filter(|c| c.suit == lead.suit)
                .copied()
                .collect();
            if in_suit.is_empty() {
                hand.to_vec()
            } else {
                in_suit
            }
        }
    }
}

pub fn value_for_card(lead_suit: Suit, card: &Card) -> i32 {
    let mut bonus: i32 = 0;
    // spades are always trump
    if card.is_spade() {
        bonus += 200;
    }
    if card.suit == lead_suit {
        bonus += 100;
    }
    card.value + bonus
}

/// Seat holding the best card played so far. Defined for any trick with at
/// least one card in it.
pub fn trick_winner(lead_suit: Suit, trick: &[Option<Card>; 4]) -> usize {
    let mut card_id_to_player: HashMap<i32, usize> = HashMap::new();
    for (player, card) in trick.iter().enumerate() {
        if let Some(card) = card {
            card_id_to_player.insert(card.id, player);
        }
    }
    let mut cards: Vec<Card> = trick.iter().filter_map(|&c| c).collect();
    cards.sort_by_key(|c| std::cmp::Reverse(value_for_card(lead_suit, c)));
    *card_id_to_player
        .get(&cards.first().expect("there should be a winning card").id)
        .expect("card_id_to_player missing card")
}

/// Sum each team's members' numeric bids; nil bids count for nothing. The
/// total is assigned outright so repeated aggregation cannot drift.
pub fn calculate_team_bids(teams: &mut [Team], bids: &[Option<BidValue>; 4]) {
    for team in teams.iter_mut() {
        team.bid = team
            .seats
            .iter()
            .map(|&seat| bids[seat].map_or(0, |bid| bid.tricks()))
            .sum();
    }
}

// Fold this round's overtricks into the running bag count, charging 100
// points per complete group of 10 and carrying the remainder
fn apply_bags(team: &mut Team, round_bags: i32) {
    let total = team.bags + round_bags;
    if total >= 10 {
        team.score -= (total / 10) * 100;
        team.bags = total % 10;
    } else {
        team.bags = total;
    }
}

/// Score a finished round into the teams' cumulative scores and bags.
/// `tricks_per_seat` is how many tricks each individual seat won, used to
/// judge nil bids.
pub fn score_round(
    mode: GameMode,
    teams: &mut [Team],
    bids: &[Option<BidValue>; 4],
    tricks_per_seat: &[i32; 4],
) {
    match mode {
        GameMode::Partnership => {
            for team in teams.iter_mut() {
                let team_bid: i32 = team
                    .seats
                    .iter()
                    .map(|&seat| bids[seat].map_or(0, |bid| bid.tricks()))
                    .sum();
                team.bid = team_bid;

                let mut delta = 0;
                let mut round_bags = 0;
                if team.tricks_won >= team_bid {
                    let overtricks = team.tricks_won - team_bid;
                    delta += team_bid * 10 + overtricks;
                    round_bags += overtricks;
                } else {
                    delta -= team_bid * 10;
                }

                // nil bids settle per member, independent of the team bid
                for &seat in &team.seats {
                    if let Some(bid) = bids[seat] {
                        if bid.is_nil() {
                            if tricks_per_seat[seat] == 0 {
                                delta += 100;
                            } else {
                                delta -= 100;
                                round_bags += tricks_per_seat[seat];
                            }
                        }
                    }
                }

                team.score += delta;
                apply_bags(team, round_bags);
            }
        }
        GameMode::Individual => {
            for team in teams.iter_mut() {
                let seat = team.seats[0];
                let bid = bids[seat].expect("every seat has bid before scoring");
                let mut delta = 0;
                let mut round_bags = 0;
                if bid.is_nil() {
                    if team.tricks_won == 0 {
                        delta = 100;
                    } else {
                        delta = -100;
                        round_bags = team.tricks_won;
                    }
                } else {
                    let value = bid.tricks();
                    team.bid = value;
                    if team.tricks_won >= value {
                        delta = value * 10 + (team.tricks_won - value);
                        round_bags = team.tricks_won - value;
                    } else {
                        delta = -(value * 10);
                    }
                }
                team.score += delta;
                apply_bags(team, round_bags);
            }
        }
    }
}
