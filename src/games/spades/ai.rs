/*
Heuristic opponents for Spades. Bidding and card play both dispatch on the
game's difficulty; every decision reads only the acting seat's hand, the
public trick, and the recorded bids.
*/

use enum_iterator::all;
use rand::{seq::SliceRandom, thread_rng};

use super::cards::{Card, Suit, ACE, JACK, KING, QUEEN};
use super::game::{action_for_bid, BidValue, Difficulty, GameMode, SpadesGame, State};
use super::rules::{valid_cards, value_for_card};

/// Bid for a seat, dispatched on the game difficulty. Pure: reads the
/// seat's own hand and, on Hard in partnership mode, the partner's
/// already-recorded bid.
pub fn choose_bid(game: &SpadesGame, seat: usize) -> BidValue {
    match game.difficulty {
        Difficulty::Easy => bid_easy(&game.hands[seat]),
        Difficulty::Medium => bid_medium(&game.hands[seat]),
        Difficulty::Hard => bid_hard(game, seat),
    }
}

// Count aces and kings and nothing else; easy opponents never bid nil
fn bid_easy(hand: &[Card]) -> BidValue {
    let high_cards = hand.iter().filter(|c| c.value >= KING).count() as i32;
    BidValue::Tricks(high_cards.max(1))
}

fn bid_medium(hand: &[Card]) -> BidValue {
    let has_ace = hand.iter().any(|c| c.value == ACE);
    let kings = hand.iter().filter(|c| c.value == KING).count();
    let high_spades = hand
        .iter()
        .filter(|c| c.is_spade() && c.value >= QUEEN)
        .count();
    if !has_ace && kings <= 1 && high_spades == 0 {
        return BidValue::Nil;
    }

    let mut points = hand.iter().filter(|c| c.value >= KING).count() as f64;
    points += hand
        .iter()
        .filter(|c| c.is_spade() && matches!(c.value, 10 | JACK | QUEEN))
        .count() as f64
        * 0.5;
    // spade length beyond the third card usually cashes
    let spade_count = hand.iter().filter(|c| c.is_spade()).count() as i32;
    if spade_count >= 4 {
        points += (spade_count - 3) as f64;
    }
    for suit in all::<Suit>() {
        if !hand.iter().any(|c| c.suit == suit) {
            points += 1.0;
        }
    }
    BidValue::Tricks((points.round() as i32).clamp(1, 8))
}

fn bid_hard(game: &SpadesGame, seat: usize) -> BidValue {
    let hand = &game.hands[seat];
    let high_cards = hand.iter().filter(|c| c.value >= KING).count();
    let spade_count = hand.iter().filter(|c| c.is_spade()).count();
    if high_cards == 0 && spade_count <= 3 {
        return BidValue::Nil;
    }

    let suit_length = |suit: Suit| hand.iter().filter(|c| c.suit == suit).count();
    let mut points: f64 = 0.0;
    for card in hand {
        // honors need cards under them to survive
        match card.value {
            ACE => points += 1.0,
            KING => points += if suit_length(card.suit) > 1 { 1.0 } else { 0.5 },
            QUEEN if suit_length(card.suit) > 2 => points += 0.75,
            _ => {}
        }
    }
    points += hand
        .iter()
        .filter(|c| c.is_spade() && c.value >= QUEEN)
        .count() as f64
        * 0.5;
    for suit in all::<Suit>() {
        if suit != Suit::Spades {
            match suit_length(suit) {
                0 => points += 2.0,
                1 => points += 1.0,
                _ => {}
            }
        }
    }
    if game.mode == GameMode::Partnership {
        if let Some(partner) = game.partner_of(seat) {
            // a strong partner bid leaves fewer tricks for this hand
            if let Some(BidValue::Tricks(n)) = game.bids[partner] {
                if n >= 5 {
                    points -= 1.0;
                }
            }
        }
    }
    BidValue::Tricks((points.round() as i32).clamp(1, 13))
}

/// Card for a seat, always drawn from the legal set. `None` only on an
/// empty hand, which the state machine never allows mid-round.
pub fn choose_play(game: &SpadesGame, seat: usize) -> Option<Card> {
    let valid = valid_cards(&game.hands[seat], game.lead_card(), game.spades_broken);
    if valid.len() <= 1 {
        return valid.first().copied();
    }
    match game.difficulty {
        Difficulty::Easy => valid.choose(&mut thread_rng()).copied(),
        Difficulty::Medium => Some(strategic_play(game, seat, &valid, false)),
        Difficulty::Hard => Some(strategic_play(game, seat, &valid, true)),
    }
}

/// Encode the current seat's AI decision as a move action for
/// `apply_move`. `None` once the round is over.
pub fn ai_action(game: &SpadesGame) -> Option<i32> {
    match game.state {
        State::Bidding => Some(action_for_bid(choose_bid(game, game.current_player))),
        State::Play => choose_play(game, game.current_player).map(|card| card.id),
        State::Scoring | State::GameOver => None,
    }
}

// Medium and Hard share the lead/follow/void ladders; Hard additionally
// plays around a partner's nil bid
fn strategic_play(game: &SpadesGame, seat: usize, valid: &[Card], nil_aware: bool) -> Card {
    let partner = game.partner_of(seat);
    let partner_nil = nil_aware
        && partner.map_or(false, |p| game.bids[p].map_or(false, |bid| bid.is_nil()));

    let lead = match game.lead_card() {
        None => return choose_lead(game, seat, valid, partner_nil),
        Some(lead) => lead,
    };
    let winning_seat = game
        .trick_winner_so_far()
        .expect("a led trick has a winner so far");
    let winning_card = game.current_trick[winning_seat]
        .expect("the winning seat has played into the trick");
    let partner_winning = partner == Some(winning_seat);

    if partner_nil && !partner_winning {
        // keep the nil bidder from being forced to take this trick
        if let Some(card) = cheapest_winner(valid, lead.suit, winning_card) {
            return card;
        }
    }

    let in_suit: Vec<Card> = valid
        .iter()
        .filter(|c| c.suit == lead.suit)
        .copied()
        .collect();
    if !in_suit.is_empty() {
        if partner_winning {
            return lowest(&in_suit).expect("in_suit is non-empty");
        }
        let winners: Vec<Card> = in_suit
            .iter()
            .filter(|c| beats(lead.suit, c, &winning_card))
            .copied()
            .collect();
        if let Some(card) = lowest(&winners) {
            return card;
        }
        return lowest(&in_suit).expect("in_suit is non-empty");
    }

    // void in the lead suit: trump or throw off
    let non_spades: Vec<Card> = valid.iter().filter(|c| !c.is_spade()).copied().collect();
    if partner_winning {
        return lowest(&non_spades)
            .or_else(|| lowest(valid))
            .expect("valid is non-empty");
    }
    let team = &game.teams[game.team_for_seat(seat)];
    if team.tricks_won < team.bid {
        let spades: Vec<Card> = valid.iter().filter(|c| c.is_spade()).copied().collect();
        if !spades.is_empty() {
            if !winning_card.is_spade() {
                return lowest(&spades).expect("spades is non-empty");
            }
            let over_trumps: Vec<Card> = spades
                .iter()
                .filter(|c| c.value > winning_card.value)
                .copied()
                .collect();
            if let Some(card) = lowest(&over_trumps) {
                return card;
            }
        }
    }
    lowest(&non_spades)
        .or_else(|| lowest(valid))
        .expect("valid is non-empty")
}

fn choose_lead(game: &SpadesGame, seat: usize, valid: &[Card], partner_nil: bool) -> Card {
    let non_spades: Vec<Card> = valid.iter().filter(|c| !c.is_spade()).copied().collect();
    if partner_nil {
        // never lead spades into a partner trying to lose every trick
        return lowest(&non_spades)
            .or_else(|| lowest(valid))
            .expect("valid is non-empty");
    }
    let team = &game.teams[game.team_for_seat(seat)];
    if team.tricks_won >= team.bid {
        // bid already made; stop collecting bags
        return lowest(valid).expect("valid is non-empty");
    }
    let sure_winners: Vec<Card> = non_spades
        .iter()
        .filter(|c| c.value >= KING)
        .copied()
        .collect();
    if let Some(card) = highest(&sure_winners) {
        return card;
    }
    let spades: Vec<Card> = valid.iter().filter(|c| c.is_spade()).copied().collect();
    if game.spades_broken {
        if let Some(top_spade) = highest(&spades) {
            // pull trumps late in the round or from the top of the suit
            let cards_played = game.tricks.len() * 4;
            if cards_played > 26 || top_spade.value >= KING {
                return top_spade;
            }
        }
    }
    if let Some(suit) = longest_non_spade_suit(valid) {
        let in_suit: Vec<Card> = valid.iter().filter(|c| c.suit == suit).copied().collect();
        return highest(&in_suit).expect("the longest suit has cards");
    }
    lowest(&non_spades)
        .or_else(|| lowest(&spades))
        .expect("valid is non-empty")
}

// Longest suit worth developing; ties keep the earliest suit
fn longest_non_spade_suit(cards: &[Card]) -> Option<Suit> {
    let mut longest: Option<(Suit, usize)> = None;
    for suit in all::<Suit>() {
        if suit == Suit::Spades {
            continue;
        }
        let count = cards.iter().filter(|c| c.suit == suit).count();
        if count > 0 && longest.map_or(true, |(_, best)| count > best) {
            longest = Some((suit, count));
        }
    }
    longest.map(|(suit, _)| suit)
}

// Whether playing `card` would take the trick from the current winner
fn beats(lead_suit: Suit, card: &Card, winning_card: &Card) -> bool {
    value_for_card(lead_suit, card) > value_for_card(lead_suit, winning_card)
}

// Lowest card that actually wins the trick: in the led suit first, then
// the cheapest sufficient trump
fn cheapest_winner(valid: &[Card], lead_suit: Suit, winning_card: Card) -> Option<Card> {
    let in_suit_winners: Vec<Card> = valid
        .iter()
        .filter(|c| c.suit == lead_suit && beats(lead_suit, c, &winning_card))
        .copied()
        .collect();
    if let Some(card) = lowest(&in_suit_winners) {
        return Some(card);
    }
    let trump_winners: Vec<Card> = valid
        .iter()
        .filter(|c| c.is_spade() && beats(lead_suit, c, &winning_card))
        .copied()
        .collect();
    lowest(&trump_winners)
}

fn lowest(cards: &[Card]) -> Option<Card> {
    cards.iter().min_by_key(|c| c.value).copied()
}

fn highest(cards: &[Card]) -> Option<Card> {
    cards.iter().max_by_key(|c| c.value).copied()
}

#[cfg(test)]
mod tests {
    use super::super::game::{TrickRecord, BID_OFFSET};
    use super::*;

    fn hand(cards: &[(Suit, i32)]) -> Vec<Card> {
        cards
            .iter()
            .map(|&(suit, value)| Card::new(suit, value))
            .collect()
    }

    fn bidding_game(mode: GameMode, difficulty: Difficulty, cards: &[(Suit, i32)]) -> SpadesGame {
        let mut game = SpadesGame::new(mode, difficulty);
        game.no_changes = true;
        game.hands[0] = hand(cards);
        game
    }

    #[derive(Debug)]
    struct BidTestCase {
        description: &'static str,
        difficulty: Difficulty,
        hand: &'static [(Suit, i32)],
        expected: BidValue,
    }

    #[test]
    fn test_choose_bid() {
        let test_cases = [
            BidTestCase {
                description: "easy bids one per ace or king",
                difficulty: Difficulty::Easy,
                hand: &[
                    (Suit::Spades, ACE),
                    (Suit::Spades, 7),
                    (Suit::Spades, 4),
                    (Suit::Hearts, KING),
                    (Suit::Hearts, 9),
                    (Suit::Hearts, 2),
                    (Suit::Diamonds, QUEEN),
                    (Suit::Diamonds, 8),
                    (Suit::Diamonds, 3),
                    (Suit::Clubs, JACK),
                    (Suit::Clubs, 6),
                    (Suit::Clubs, 5),
                    (Suit::Clubs, 2),
                ],
                expected: BidValue::Tricks(2),
            },
            BidTestCase {
                description: "easy never bids below one and never nil",
                difficulty: Difficulty::Easy,
                hand: &[
                    (Suit::Spades, 9),
                    (Suit::Spades, 7),
                    (Suit::Spades, 4),
                    (Suit::Hearts, 8),
                    (Suit::Hearts, 5),
                    (Suit::Hearts, 2),
                    (Suit::Diamonds, QUEEN),
                    (Suit::Diamonds, 6),
                    (Suit::Diamonds, 3),
                    (Suit::Clubs, JACK),
                    (Suit::Clubs, 9),
                    (Suit::Clubs, 3),
                    (Suit::Clubs, 2),
                ],
                expected: BidValue::Tricks(1),
            },
            BidTestCase {
                description: "medium bids nil without an ace, at most one king, no high spade",
                difficulty: Difficulty::Medium,
                hand: &[
                    (Suit::Spades, 9),
                    (Suit::Spades, 5),
                    (Suit::Spades, 3),
                    (Suit::Hearts, KING),
                    (Suit::Hearts, 8),
                    (Suit::Hearts, 4),
                    (Suit::Diamonds, 7),
                    (Suit::Diamonds, 6),
                    (Suit::Diamonds, 2),
                    (Suit::Clubs, JACK),
                    (Suit::Clubs, 9),
                    (Suit::Clubs, 3),
                    (Suit::Clubs, 2),
                ],
                expected: BidValue::Nil,
            },
            BidTestCase {
                // 2 honors + half a point each for the spade queen and
                // jack + 1 for the fourth spade
                description: "medium counts honors, high spades and spade length",
                difficulty: Difficulty::Medium,
                hand: &[
                    (Suit::Spades, QUEEN),
                    (Suit::Spades, JACK),
                    (Suit::Spades, 5),
                    (Suit::Spades, 2),
                    (Suit::Hearts, ACE),
                    (Suit::Hearts, KING),
                    (Suit::Hearts, 3),
                    (Suit::Diamonds, 9),
                    (Suit::Diamonds, 7),
                    (Suit::Diamonds, 4),
                    (Suit::Clubs, 8),
                    (Suit::Clubs, 6),
                    (Suit::Clubs, 2),
                ],
                expected: BidValue::Tricks(4),
            },
            BidTestCase {
                description: "medium caps a monster hand at eight",
                difficulty: Difficulty::Medium,
                hand: &[
                    (Suit::Spades, ACE),
                    (Suit::Spades, KING),
                    (Suit::Spades, QUEEN),
                    (Suit::Spades, JACK),
                    (Suit::Spades, 10),
                    (Suit::Spades, 9),
                    (Suit::Spades, 8),
                    (Suit::Spades, 7),
                    (Suit::Hearts, ACE),
                    (Suit::Hearts, KING),
                    (Suit::Diamonds, ACE),
                    (Suit::Clubs, ACE),
                    (Suit::Clubs, KING),
                ],
                expected: BidValue::Tricks(8),
            },
            BidTestCase {
                // 1 ace + 1 for the fourth spade + 1 for the heart void
                description: "medium credits a void suit",
                difficulty: Difficulty::Medium,
                hand: &[
                    (Suit::Spades, 9),
                    (Suit::Spades, 5),
                    (Suit::Spades, 3),
                    (Suit::Spades, 2),
                    (Suit::Diamonds, ACE),
                    (Suit::Diamonds, 7),
                    (Suit::Diamonds, 6),
                    (Suit::Diamonds, 2),
                    (Suit::Clubs, JACK),
                    (Suit::Clubs, 9),
                    (Suit::Clubs, 4),
                    (Suit::Clubs, 3),
                    (Suit::Clubs, 2),
                ],
                expected: BidValue::Tricks(3),
            },
            BidTestCase {
                description: "hard bids nil with no honors and few spades",
                difficulty: Difficulty::Hard,
                hand: &[
                    (Suit::Spades, 8),
                    (Suit::Spades, 5),
                    (Suit::Spades, 2),
                    (Suit::Hearts, QUEEN),
                    (Suit::Hearts, 9),
                    (Suit::Hearts, 4),
                    (Suit::Diamonds, JACK),
                    (Suit::Diamonds, 7),
                    (Suit::Diamonds, 3),
                    (Suit::Clubs, 10),
                    (Suit::Clubs, 6),
                    (Suit::Clubs, 4),
                    (Suit::Clubs, 2),
                ],
                expected: BidValue::Nil,
            },
            BidTestCase {
                // ace 1, supported spade king 1, bare heart king 0.5,
                // supported diamond queen 0.75, high spades 1, heart
                // singleton 1: 5.25 rounds to 5
                description: "hard weighs honor support, high spades and short suits",
                difficulty: Difficulty::Hard,
                hand: &[
                    (Suit::Spades, ACE),
                    (Suit::Spades, KING),
                    (Suit::Spades, 4),
                    (Suit::Hearts, KING),
                    (Suit::Diamonds, QUEEN),
                    (Suit::Diamonds, 8),
                    (Suit::Diamonds, 6),
                    (Suit::Diamonds, 2),
                    (Suit::Clubs, 9),
                    (Suit::Clubs, 7),
                    (Suit::Clubs, 5),
                    (Suit::Clubs, 3),
                    (Suit::Clubs, 2),
                ],
                expected: BidValue::Tricks(5),
            },
            BidTestCase {
                // ace 1, long spade queen 0.75, supported diamond king 1,
                // high spades 1, heart void 2: 5.75 rounds to 6
                description: "hard counts a void as two points",
                difficulty: Difficulty::Hard,
                hand: &[
                    (Suit::Spades, ACE),
                    (Suit::Spades, QUEEN),
                    (Suit::Spades, JACK),
                    (Suit::Spades, 8),
                    (Suit::Spades, 3),
                    (Suit::Diamonds, KING),
                    (Suit::Diamonds, 9),
                    (Suit::Diamonds, 5),
                    (Suit::Diamonds, 2),
                    (Suit::Clubs, 10),
                    (Suit::Clubs, 8),
                    (Suit::Clubs, 6),
                    (Suit::Clubs, 4),
                ],
                expected: BidValue::Tricks(6),
            },
        ];
        for test_case in test_cases {
            let game = bidding_game(GameMode::Partnership, test_case.difficulty, test_case.hand);
            assert_eq!(
                choose_bid(&game, 0),
                test_case.expected,
                "{}",
                test_case.description
            );
        }
    }

    #[test]
    fn test_hard_bid_backs_off_a_strong_partner() {
        let cards = [
            (Suit::Spades, ACE),
            (Suit::Spades, KING),
            (Suit::Spades, 4),
            (Suit::Hearts, KING),
            (Suit::Diamonds, QUEEN),
            (Suit::Diamonds, 8),
            (Suit::Diamonds, 6),
            (Suit::Diamonds, 2),
            (Suit::Clubs, 9),
            (Suit::Clubs, 7),
            (Suit::Clubs, 5),
            (Suit::Clubs, 3),
            (Suit::Clubs, 2),
        ];
        let mut game = bidding_game(GameMode::Partnership, Difficulty::Hard, &cards);
        game.bids[2] = Some(BidValue::Tricks(5));
        assert_eq!(choose_bid(&game, 0), BidValue::Tricks(4));

        // a modest partner bid changes nothing
        game.bids[2] = Some(BidValue::Tricks(4));
        assert_eq!(choose_bid(&game, 0), BidValue::Tricks(5));

        // in individual mode there is no partner to respect
        let mut game = bidding_game(GameMode::Individual, Difficulty::Hard, &cards);
        game.bids[2] = Some(BidValue::Tricks(7));
        assert_eq!(choose_bid(&game, 0), BidValue::Tricks(5));
    }

    fn playing_game(mode: GameMode, difficulty: Difficulty) -> SpadesGame {
        let mut game = SpadesGame::new(mode, difficulty);
        game.no_changes = true;
        for _ in 0..4 {
            game.apply_move(BID_OFFSET + 3);
        }
        game
    }

    #[test]
    fn test_single_legal_card_is_played_immediately() {
        let mut game = playing_game(GameMode::Partnership, Difficulty::Easy);
        game.lead_player = 3;
        game.current_trick = [None, None, None, Some(Card::new(Suit::Hearts, 10))];
        game.current_player = 0;
        game.hands[0] = hand(&[(Suit::Hearts, 2), (Suit::Clubs, 9), (Suit::Clubs, 4)]);
        assert_eq!(choose_play(&game, 0), Some(Card::new(Suit::Hearts, 2)));
    }

    #[test]
    fn test_easy_play_is_always_legal() {
        let mut game = playing_game(GameMode::Partnership, Difficulty::Easy);
        game.lead_player = 3;
        game.current_trick = [None, None, None, Some(Card::new(Suit::Hearts, 10))];
        game.current_player = 0;
        game.hands[0] = hand(&[
            (Suit::Hearts, 9),
            (Suit::Hearts, 4),
            (Suit::Spades, ACE),
            (Suit::Clubs, 7),
        ]);
        for _ in 0..20 {
            let card = choose_play(&game, 0).expect("the hand is not empty");
            assert_eq!(card.suit, Suit::Hearts, "easy must still follow suit");
        }
    }

    #[test]
    fn test_follow_with_the_lowest_sufficient_winner() {
        let mut game = playing_game(GameMode::Partnership, Difficulty::Medium);
        game.lead_player = 3;
        game.current_trick = [None, None, None, Some(Card::new(Suit::Hearts, 10))];
        game.current_player = 0;
        game.hands[0] = hand(&[
            (Suit::Hearts, ACE),
            (Suit::Hearts, JACK),
            (Suit::Hearts, 4),
            (Suit::Clubs, 2),
        ]);
        assert_eq!(choose_play(&game, 0), Some(Card::new(Suit::Hearts, JACK)));
    }

    #[test]
    fn test_follow_low_when_partner_is_winning() {
        let mut game = playing_game(GameMode::Partnership, Difficulty::Medium);
        game.lead_player = 1;
        game.current_trick = [
            None,
            Some(Card::new(Suit::Hearts, 9)),
            Some(Card::new(Suit::Hearts, KING)),
            Some(Card::new(Suit::Hearts, 3)),
        ];
        game.current_player = 0;
        game.hands[0] = hand(&[(Suit::Hearts, QUEEN), (Suit::Hearts, 6), (Suit::Clubs, 8)]);
        assert_eq!(choose_play(&game, 0), Some(Card::new(Suit::Hearts, 6)));
    }

    #[test]
    fn test_follow_low_when_the_trick_cannot_be_won() {
        let mut game = playing_game(GameMode::Partnership, Difficulty::Medium);
        game.lead_player = 3;
        game.current_trick = [None, None, None, Some(Card::new(Suit::Hearts, ACE))];
        game.current_player = 0;
        game.hands[0] = hand(&[
            (Suit::Hearts, QUEEN),
            (Suit::Hearts, 7),
            (Suit::Spades, 2),
        ]);
        assert_eq!(choose_play(&game, 0), Some(Card::new(Suit::Hearts, 7)));
    }

    #[test]
    fn test_trump_low_when_void_and_short_of_the_bid() {
        let mut game = playing_game(GameMode::Partnership, Difficulty::Medium);
        game.lead_player = 3;
        game.current_trick = [None, None, None, Some(Card::new(Suit::Diamonds, KING))];
        game.current_player = 0;
        game.hands[0] = hand(&[(Suit::Spades, 8), (Suit::Spades, 3), (Suit::Hearts, 9)]);
        assert_eq!(choose_play(&game, 0), Some(Card::new(Suit::Spades, 3)));
    }

    #[test]
    fn test_over_trump_with_the_cheapest_spade() {
        let mut game = playing_game(GameMode::Partnership, Difficulty::Medium);
        game.lead_player = 2;
        game.current_trick = [
            None,
            None,
            Some(Card::new(Suit::Diamonds, 5)),
            Some(Card::new(Suit::Spades, 6)),
        ];
        game.current_player = 0;
        game.spades_broken = true;
        game.hands[0] = hand(&[(Suit::Spades, 9), (Suit::Spades, 4), (Suit::Clubs, 7)]);
        assert_eq!(choose_play(&game, 0), Some(Card::new(Suit::Spades, 9)));
    }

    #[test]
    fn test_discard_low_once_the_bid_is_made() {
        let mut game = playing_game(GameMode::Partnership, Difficulty::Medium);
        game.teams[0].tricks_won = 6;
        game.lead_player = 3;
        game.current_trick = [None, None, None, Some(Card::new(Suit::Diamonds, KING))];
        game.current_player = 0;
        game.hands[0] = hand(&[(Suit::Spades, ACE), (Suit::Hearts, 8), (Suit::Clubs, 2)]);
        assert_eq!(choose_play(&game, 0), Some(Card::new(Suit::Clubs, 2)));
    }

    #[test]
    fn test_discard_low_non_spade_when_partner_has_the_trick() {
        let mut game = playing_game(GameMode::Partnership, Difficulty::Medium);
        game.lead_player = 1;
        game.current_trick = [
            None,
            Some(Card::new(Suit::Diamonds, 9)),
            Some(Card::new(Suit::Diamonds, ACE)),
            Some(Card::new(Suit::Diamonds, 2)),
        ];
        game.current_player = 0;
        game.hands[0] = hand(&[(Suit::Spades, 5), (Suit::Hearts, 7), (Suit::Hearts, 2)]);
        assert_eq!(choose_play(&game, 0), Some(Card::new(Suit::Hearts, 2)));
    }

    #[test]
    fn test_lead_low_once_the_bid_is_made() {
        let mut game = playing_game(GameMode::Partnership, Difficulty::Medium);
        game.teams[0].tricks_won = 6;
        game.lead_player = 0;
        game.current_player = 0;
        game.hands[0] = hand(&[(Suit::Hearts, KING), (Suit::Hearts, 4), (Suit::Diamonds, 9)]);
        assert_eq!(choose_play(&game, 0), Some(Card::new(Suit::Hearts, 4)));
    }

    #[test]
    fn test_lead_a_non_spade_ace_first() {
        let mut game = playing_game(GameMode::Partnership, Difficulty::Medium);
        game.lead_player = 0;
        game.current_player = 0;
        game.hands[0] = hand(&[
            (Suit::Hearts, ACE),
            (Suit::Hearts, 7),
            (Suit::Diamonds, KING),
            (Suit::Diamonds, 3),
            (Suit::Clubs, 9),
        ]);
        assert_eq!(choose_play(&game, 0), Some(Card::new(Suit::Hearts, ACE)));
    }

    #[test]
    fn test_lead_a_high_spade_late_in_the_round() {
        let mut game = playing_game(GameMode::Partnership, Difficulty::Medium);
        game.spades_broken = true;
        game.tricks = vec![TrickRecord::default(); 7];
        game.lead_player = 0;
        game.current_player = 0;
        game.hands[0] = hand(&[
            (Suit::Spades, QUEEN),
            (Suit::Spades, 8),
            (Suit::Hearts, 9),
            (Suit::Hearts, 3),
        ]);
        assert_eq!(choose_play(&game, 0), Some(Card::new(Suit::Spades, QUEEN)));
    }

    #[test]
    fn test_lead_the_top_spade_once_broken() {
        let mut game = playing_game(GameMode::Partnership, Difficulty::Medium);
        game.spades_broken = true;
        game.lead_player = 0;
        game.current_player = 0;
        game.hands[0] = hand(&[
            (Suit::Spades, KING),
            (Suit::Spades, 5),
            (Suit::Diamonds, 9),
            (Suit::Diamonds, 2),
        ]);
        assert_eq!(choose_play(&game, 0), Some(Card::new(Suit::Spades, KING)));
    }

    #[test]
    fn test_lead_from_the_longest_side_suit() {
        let mut game = playing_game(GameMode::Partnership, Difficulty::Medium);
        game.lead_player = 0;
        game.current_player = 0;
        game.hands[0] = hand(&[
            (Suit::Hearts, 9),
            (Suit::Hearts, 7),
            (Suit::Hearts, 4),
            (Suit::Diamonds, QUEEN),
            (Suit::Diamonds, 8),
            (Suit::Clubs, 6),
            (Suit::Spades, 2),
        ]);
        assert_eq!(choose_play(&game, 0), Some(Card::new(Suit::Hearts, 9)));
    }

    #[test]
    fn test_hard_leads_low_to_protect_a_partner_nil() {
        let mut game = playing_game(GameMode::Partnership, Difficulty::Hard);
        game.bids[2] = Some(BidValue::Nil);
        game.lead_player = 0;
        game.current_player = 0;
        game.hands[0] = hand(&[
            (Suit::Spades, ACE),
            (Suit::Spades, 7),
            (Suit::Hearts, 9),
            (Suit::Hearts, 4),
        ]);
        assert_eq!(choose_play(&game, 0), Some(Card::new(Suit::Hearts, 4)));

        // medium ignores the nil and develops its longest suit
        let mut game = playing_game(GameMode::Partnership, Difficulty::Medium);
        game.bids[2] = Some(BidValue::Nil);
        game.lead_player = 0;
        game.current_player = 0;
        game.hands[0] = hand(&[
            (Suit::Spades, ACE),
            (Suit::Spades, 7),
            (Suit::Hearts, 9),
            (Suit::Hearts, 4),
        ]);
        assert_eq!(choose_play(&game, 0), Some(Card::new(Suit::Hearts, 9)));
    }

    #[test]
    fn test_hard_trumps_in_to_cover_a_partner_nil() {
        let trick = [
            None,
            Some(Card::new(Suit::Hearts, JACK)),
            Some(Card::new(Suit::Hearts, 5)),
            Some(Card::new(Suit::Hearts, QUEEN)),
        ];
        let mut game = playing_game(GameMode::Partnership, Difficulty::Hard);
        game.bids[2] = Some(BidValue::Nil);
        game.teams[0].tricks_won = 6;
        game.lead_player = 1;
        game.current_trick = trick;
        game.current_player = 0;
        game.hands[0] = hand(&[(Suit::Spades, 7), (Suit::Spades, 3), (Suit::Clubs, 2)]);
        assert_eq!(choose_play(&game, 0), Some(Card::new(Suit::Spades, 3)));

        // medium has no nil awareness and throws off instead
        let mut game = playing_game(GameMode::Partnership, Difficulty::Medium);
        game.bids[2] = Some(BidValue::Nil);
        game.teams[0].tricks_won = 6;
        game.lead_player = 1;
        game.current_trick = trick;
        game.current_player = 0;
        game.hands[0] = hand(&[(Suit::Spades, 7), (Suit::Spades, 3), (Suit::Clubs, 2)]);
        assert_eq!(choose_play(&game, 0), Some(Card::new(Suit::Clubs, 2)));
    }

    #[test]
    fn test_ai_moves_are_always_legal() {
        for mode in [GameMode::Partnership, GameMode::Individual] {
            for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
                let mut game = SpadesGame::new(mode, difficulty);
                game.no_changes = true;
                game.human_player = [false; 4];
                for _ in 0..2 {
                    while game.state == State::Bidding {
                        let action = ai_action(&game).expect("bidding always has an action");
                        assert!(game.get_moves().contains(&action));
                        game.apply_move(action);
                    }
                    while game.state == State::Play {
                        let card =
                            choose_play(&game, game.current_player).expect("the hand is not empty");
                        assert!(
                            game.playable_cards().contains(&card),
                            "{:?} chose an illegal card {:?}",
                            difficulty,
                            card
                        );
                        game.apply_move(card.id);
                    }
                    match game.state {
                        State::Scoring => game.next_round(),
                        State::GameOver => break,
                        _ => unreachable!("a finished round is scored"),
                    }
                }
            }
        }
    }

    #[test]
    fn test_no_action_once_the_round_is_settled() {
        let mut game = playing_game(GameMode::Partnership, Difficulty::Medium);
        game.state = State::Scoring;
        assert_eq!(ai_action(&game), None);
        game.state = State::GameOver;
        assert_eq!(ai_action(&game), None);
    }
}
