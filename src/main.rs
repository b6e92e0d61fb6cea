use std::env;
use std::io;

use colored::Colorize;
use rand::{seq::SliceRandom, thread_rng};

use spades_rs::games::spades::{
    ai_action, BidValue, Card, Difficulty, GameMode, SpadesGame, State, Suit, ACE, BID_NIL,
    BID_OFFSET, JACK, KING, PLAYER_NAMES, QUEEN,
};

pub fn get_input(prompt: &str) -> String {
    println!("{}", prompt);
    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(_goes_into_input_above) => {}
        Err(_no_updates_is_fine) => {}
    }
    input.trim().to_string()
}

fn rank_label(value: i32) -> String {
    match value {
        JACK => "J".to_string(),
        QUEEN => "Q".to_string(),
        KING => "K".to_string(),
        ACE => "A".to_string(),
        value => value.to_string(),
    }
}

fn print_card(card: Card) -> String {
    let string = match card.suit {
        Suit::Spades => format!("{}♠", rank_label(card.value)).normal(),
        Suit::Hearts => format!("{}♥", rank_label(card.value)).red(),
        Suit::Diamonds => format!("{}♦", rank_label(card.value)).blue(),
        Suit::Clubs => format!("{}♣", rank_label(card.value)).green(),
    };
    format!("{}:{}", card.id, string)
}

fn bid_label(bid: BidValue) -> String {
    match bid {
        BidValue::Tricks(n) => n.to_string(),
        BidValue::Nil => "Nil".to_string(),
        BidValue::BlindNil => "Blind Nil".to_string(),
    }
}

fn display_scores(game: &SpadesGame) {
    for team in &game.teams {
        println!(
            "{}\nbid: {}\ntricks taken: {}\nscore: {}\nbags: {}\n",
            team.name, team.bid, team.tricks_won, team.score, team.bags
        );
    }
}

fn display_game(game: &SpadesGame) {
    println!("\n--- round {} ---", game.round);
    display_scores(game);
    for player in 0..4 {
        if let Some(bid) = game.bids[player] {
            println!("{} bid {}", PLAYER_NAMES[player], bid_label(bid));
        }
    }
    println!("spades broken: {}", game.spades_broken);
    println!(
        "current_trick: {}",
        (0..4)
            .filter_map(|player| {
                game.current_trick[player]
                    .map(|c| format!("{} {}", PLAYER_NAMES[player], print_card(c)))
            })
            .collect::<Vec<_>>()
            .join("  ")
    );
    println!(
        "current_hand:\n{}",
        game.hands[0]
            .iter()
            .map(|c| print_card(*c))
            .collect::<Vec<_>>()
            .join(" ")
    );
    println!("---");
}

fn show_moves(game: &SpadesGame) {
    match game.state {
        State::Bidding => println!("Bid 1-13 tricks, or 0 for nil"),
        State::Play => println!(
            "{}",
            game.playable_cards()
                .iter()
                .map(|c| print_card(*c))
                .collect::<Vec<_>>()
                .join(" ")
        ),
        State::Scoring | State::GameOver => {}
    }
}

fn interactive_play() {
    let mode = match get_input("Mode (1: partnership, 2: individual): ").as_str() {
        "2" => GameMode::Individual,
        _ => GameMode::Partnership,
    };
    let difficulty = match get_input("Difficulty (1: easy, 2: medium, 3: hard): ").as_str() {
        "1" => Difficulty::Easy,
        "3" => Difficulty::Hard,
        _ => Difficulty::Medium,
    };
    let mut game = SpadesGame::new(mode, difficulty);
    game.no_changes = true;
    display_game(&game);
    while game.winner.is_none() {
        if game.state == State::Scoring {
            get_input("Round over. Press enter to deal the next one");
            game.next_round();
            display_game(&game);
            continue;
        }
        let mut action: i32 = -1;
        if game.current_player == 0 {
            show_moves(&game);
            while game.get_moves().iter().all(|x| x != &action) {
                let action_string = get_input("Move: ");
                action = action_string.parse::<i32>().unwrap_or(-1);
                if game.state == State::Bidding && action >= 0 {
                    action = if action == 0 { BID_NIL } else { BID_OFFSET + action };
                }
            }
        } else {
            action = ai_action(&game).expect("the AI always has a move");
        }
        game.apply_move(action);
        display_game(&game);
    }
    let winner = game.winner.expect("the game is over");
    println!("{} wins!", game.teams[winner].name);
}

// Auto-play partnership games with one team on the tiered heuristics and
// the other picking random legal moves, tallying wins per difficulty
fn simulate(games_per_tier: usize) {
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let mut wins = 0;
        let mut rounds = 0;
        for _ in 0..games_per_tier {
            let mut game = SpadesGame::new(GameMode::Partnership, difficulty);
            game.no_changes = true;
            game.human_player = [false; 4];
            while game.winner.is_none() {
                if game.state == State::Scoring {
                    game.next_round();
                    continue;
                }
                let action = if game.current_player % 2 == 0 {
                    ai_action(&game).expect("the AI always has a move")
                } else {
                    let mut actions = game.get_moves();
                    actions.shuffle(&mut thread_rng());
                    *actions.first().expect("should have a move to make")
                };
                game.apply_move(action);
            }
            rounds += game.round;
            if game.winner == Some(0) {
                wins += 1;
            }
        }
        println!(
            "{:?}: heuristic team won {}/{} ({} rounds played)",
            difficulty, wins, games_per_tier, rounds
        );
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    match args.get(1).map(|arg| arg.as_str()) {
        Some("sim") => simulate(100),
        Some("json") => {
            // fresh snapshot of the state a frontend would consume
            let game = SpadesGame::new(GameMode::Partnership, Difficulty::Medium);
            println!("{}", serde_json::to_string(&game).expect("game state serializes"));
        }
        _ => interactive_play(),
    }
}
