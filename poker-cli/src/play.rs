use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use poker_core::prelude::{Dealer, Player, StageConfig};

use crate::announcer;

#[derive(Debug, Args)]
pub struct PlayArgs {
    /// Nicknames of the players to seat, two to four of them
    #[arg(default_values = ["Goni", "Pyeong", "Jjakgwi", "Agwi"])]
    pub players: Vec<String>,

    /// Number of rounds in the stage
    #[arg(short = 'r', long = "rounds", default_value = "100")]
    pub rounds: usize,

    /// Seed for the dealer's shuffles, for a reproducible stage
    #[arg(long = "seed")]
    pub seed: Option<u64>,

    /// Points awarded to the winner of each round
    #[arg(long = "prize", default_value = "100")]
    pub prize: u32,

    /// Points every player starts with
    #[arg(long = "starting-points", default_value = "10000")]
    pub starting_points: u32,
}

impl PlayArgs {
    fn stage_config(&self) -> StageConfig {
        StageConfig {
            prize_point: self.prize,
            starting_points: self.starting_points,
        }
    }
}

/// Seat the players and run every round, announcing as the stage goes.
fn run_stage(args: &PlayArgs, announce: bool) -> Result<Dealer> {
    let config = args.stage_config();
    let mut dealer = match args.seed {
        Some(seed) => Dealer::seeded(config, seed),
        None => Dealer::from_entropy(config),
    };

    if announce {
        announcer::standby_stage();
    }
    for nickname in &args.players {
        let player = Player::new(nickname.as_str(), config.starting_points)?;
        let player = dealer
            .enroll_player(player)
            .with_context(|| format!("could not seat `{nickname}`"))?;
        if announce {
            announcer::enroll_player(player);
        }
    }

    if announce {
        announcer::play_stage(args.rounds);
    }
    for _ in 0..args.rounds {
        dealer.new_game()?;
        dealer.shuffle()?;
        dealer.deal_cards()?;
        let record = dealer.open_hands()?;
        if announce {
            announcer::match_result(record);
        }
        dealer.retrieve_cards()?;
    }

    info!(rounds = dealer.rounds_played(), "stage finished");
    Ok(dealer)
}

pub fn run(args: &PlayArgs) -> Result<()> {
    let dealer = run_stage(args, true)?;

    announcer::stage_winner(dealer.total_stage_winner());
    announcer::show_stage_result(&dealer.standings());

    Ok(())
}
