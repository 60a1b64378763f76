use std::cmp::Ordering;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use poker_core::prelude::{Card, Hand, Showdown};

#[derive(Debug, Args)]
pub struct EvalArgs {
    /// Hands of five whitespace separated cards, e.g. "AS KS QS JS TS"
    #[arg(required = true)]
    pub hands: Vec<String>,
}

/// Parse and open one hand written as card identifiers.
fn parse_hand(input: &str) -> Result<Hand> {
    let mut hand = Hand::empty();
    for ident in input.split_whitespace() {
        let card: Card = ident.parse()?;
        hand.add(card)?;
    }
    hand.open()?;

    Ok(hand)
}

/// Order hands from strongest to weakest. Each entry holds the 1-based place
/// and the index of the hand; tied hands share a place.
fn rank_hands(hands: &[Hand]) -> Result<Vec<(usize, usize)>> {
    let showdowns = hands
        .iter()
        .map(Hand::showdown)
        .collect::<poker_core::prelude::Result<Vec<&Showdown>>>()?;

    let mut order: Vec<usize> = (0..hands.len()).collect();
    order.sort_by(|a, b| showdowns[*b].cmp(showdowns[*a]));

    let mut places: Vec<(usize, usize)> = Vec::with_capacity(order.len());
    for (position, index) in order.iter().enumerate() {
        let place = match places.last() {
            Some(&(place, previous)) if showdowns[previous].cmp(showdowns[*index]) == Ordering::Equal => place,
            _ => position + 1,
        };
        places.push((place, *index));
    }

    Ok(places)
}

pub fn run(args: &EvalArgs) -> Result<()> {
    let hands = args
        .hands
        .iter()
        .map(|input| parse_hand(input).with_context(|| format!("could not evaluate `{input}`")))
        .collect::<Result<Vec<_>>>()?;

    for (place, index) in rank_hands(&hands)? {
        let label = format!("{:>3}", format!("{place}."));
        let label = if place == 1 {
            label.green().bold()
        } else {
            label.normal()
        };
        println!("{label} {}", hands[index]);
    }

    Ok(())
}
