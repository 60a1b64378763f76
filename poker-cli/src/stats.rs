use std::collections::HashMap;

use anyhow::Result;
use clap::Args;
use itertools::Itertools;
use rand::prelude::*;
use rayon::prelude::*;
use strum::IntoEnumIterator;
use tracing::debug;

use poker_core::prelude::{Deck, HandEvaluator, Tier};

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Run on a single thread (for profiling)
    #[arg(long = "single-threaded", default_value = "false")]
    pub single_threaded: bool,

    /// Perform this many iterations, in tens of thousands
    #[arg(short = 'i', long = "iterations", default_value = "100")]
    pub iterations: usize,

    /// Seed the shuffles for a repeatable run; implies a single thread
    #[arg(long = "seed")]
    pub seed: Option<u64>,
}

struct TierStats {
    count: usize,
    frequency: f64,
}

fn draw_tier(rng: &mut impl Rng) -> Result<Tier> {
    let mut deck = Deck::shuffled(rng);
    let hand = deck.draw_hand()?;

    Ok(HandEvaluator::evaluate_poker_hand(&hand)?.tier())
}

fn count_tiers(single_threaded: bool, iterations: usize, seed: Option<u64>) -> Result<HashMap<Tier, usize>> {
    let tiers: Vec<Tier> = match seed {
        Some(seed) => {
            let mut rng = SmallRng::seed_from_u64(seed);
            (0..iterations).map(|_| draw_tier(&mut rng)).collect::<Result<_>>()?
        }
        None if single_threaded => {
            let mut rng = SmallRng::from_entropy();
            (0..iterations).map(|_| draw_tier(&mut rng)).collect::<Result<_>>()?
        }
        None => (0..iterations)
            .into_par_iter()
            .map_init(SmallRng::from_entropy, |rng, _| draw_tier(rng))
            .collect::<Result<_>>()?,
    };

    Ok(tiers.into_iter().counts())
}

/// Every tier in ascending order, including the ones that never came up.
#[allow(clippy::cast_precision_loss)]
fn tier_stats(counts: &HashMap<Tier, usize>) -> Vec<(Tier, TierStats)> {
    let total = counts.values().sum::<usize>().max(1) as f64;

    Tier::iter()
        .map(|tier| {
            let count = counts.get(&tier).copied().unwrap_or(0);
            (
                tier,
                TierStats {
                    count,
                    frequency: count as f64 / total,
                },
            )
        })
        .collect()
}

fn print_tier_stats(stats: &[(Tier, TierStats)]) {
    let tier_name_columns = Tier::iter()
        .map(|tier| tier.to_string().len())
        .max()
        .unwrap_or(0);
    for (tier, TierStats { count, frequency }) in stats {
        println!(
            " - {:tier_width$} {:>8.4}% ({count} hands)",
            tier.to_string(),
            frequency * 100.0,
            tier_width = tier_name_columns
        );
    }
}

pub fn run(args: &StatsArgs) -> Result<()> {
    let iterations = args.iterations * 10_000;
    debug!(iterations, single_threaded = args.single_threaded, seed = ?args.seed, "dealing random hands");
    let counts = count_tiers(args.single_threaded, iterations, args.seed)?;

    println!("When drawing 5 cards from a shuffled 52-card standard deck, the frequencies of each tier are:");
    print_tier_stats(&tier_stats(&counts));

    Ok(())
}
