//! Console presentation for a stage. Everything here goes to stdout; engine
//! logs go to stderr through `tracing`.

use colored::Colorize;

use poker_core::prelude::{MatchRecord, Player};

pub fn standby_stage() {
    println!("{}", "The dealer takes a seat. Players, please come forward.".bold());
}

pub fn enroll_player(player: &Player) {
    println!(" + {} joins the table with {} points", player.nickname().cyan(), player.points());
}

pub fn play_stage(rounds: usize) {
    println!();
    println!("{}", format!("Playing {rounds} rounds of five-card draw").bold());
}

pub fn match_result(record: &MatchRecord) {
    let name_width = record
        .entries
        .iter()
        .map(|entry| entry.nickname.chars().count())
        .max()
        .unwrap_or(0);

    println!();
    println!("{}", format!("Round {}", record.round).bold().underline());
    for entry in &record.entries {
        println!(" - {:name_width$}  {}", entry.nickname, entry.hand);
    }
    match &record.winner {
        Some(winner) => println!(" => {} wins the round", winner.green().bold()),
        None => println!(" => {}", "Draw, nobody wins the round".yellow()),
    }
}

pub fn stage_winner(winner: Option<&Player>) {
    println!();
    match winner {
        Some(player) => println!(
            "{} {} with {} wins",
            "Stage winner:".bold(),
            player.nickname().green().bold(),
            player.wins()
        ),
        None => println!("{}", "The stage ended without a winner".yellow()),
    }
}

pub fn show_stage_result(standings: &[&Player]) {
    let name_width = standings
        .iter()
        .map(|player| player.nickname().chars().count())
        .max()
        .unwrap_or(0);

    println!();
    println!("{}", "Final standings".bold().underline());
    for (place, player) in standings.iter().enumerate() {
        println!(
            "{:>2}. {:name_width$}  {:>3}W {:>3}L {:>3}D  {:>6} points",
            place + 1,
            player.nickname(),
            player.wins(),
            player.losses(),
            player.draws(),
            player.points(),
        );
    }
}
