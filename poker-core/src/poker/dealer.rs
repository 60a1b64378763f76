use std::cmp::Ordering;

use rand::{rngs::SmallRng, SeedableRng};
use tracing::{info, trace};

use crate::poker::cards::{Deck, Tier, HAND_SIZE};
use crate::poker::error::{Error, Result};
use crate::poker::hand_evaluator::Showdown;
use crate::poker::player::Player;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StageConfig {
    /// Points awarded to the winner of a round.
    pub prize_point: u32,
    /// Points every player starts the stage with.
    pub starting_points: u32,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            prize_point: 100,
            starting_points: 10_000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchEntry {
    pub nickname: String,
    pub tier: Tier,
    /// The opened hand as rendered for the result log.
    pub hand: String,
}

/// Outcome of one round. Entries run from the strongest hand to the weakest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchRecord {
    pub round: usize,
    pub entries: Vec<MatchEntry>,
    pub winner: Option<String>,
}

/// Where the current round stands. A round runs `Fresh` → `Shuffled` →
/// `Dealt` → `Opened` and returns to `Idle` once the cards are retrieved.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RoundPhase {
    Idle,
    /// A new, unshuffled deck is on the table.
    Fresh,
    Shuffled,
    Dealt,
    Opened,
}

/// Runs rounds for two to four players: new game, shuffle, deal, open the
/// hands, settle, retrieve the cards.
#[derive(Debug)]
pub struct Dealer {
    config: StageConfig,
    rng: SmallRng,
    deck: Option<Deck>,
    players: Vec<Player>,
    wins_history: Vec<Option<usize>>,
    match_history: Vec<MatchRecord>,
    phase: RoundPhase,
}

impl Dealer {
    pub fn new(config: StageConfig, rng: SmallRng) -> Self {
        Self {
            config,
            rng,
            deck: None,
            players: Vec::with_capacity(MAX_PLAYERS),
            wins_history: Vec::new(),
            match_history: Vec::new(),
            phase: RoundPhase::Idle,
        }
    }

    pub fn seeded(config: StageConfig, seed: u64) -> Self {
        Self::new(config, SmallRng::seed_from_u64(seed))
    }

    pub fn from_entropy(config: StageConfig) -> Self {
        Self::new(config, SmallRng::from_entropy())
    }

    pub fn config(&self) -> StageConfig {
        self.config
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Seat a player at the table.
    pub fn enroll_player(&mut self, player: Player) -> Result<&Player> {
        if self.phase != RoundPhase::Idle {
            return Err(Error::EnrollmentClosed);
        }
        if self.players.len() >= MAX_PLAYERS {
            return Err(Error::TooManyPlayers { max: MAX_PLAYERS });
        }
        if self
            .players
            .iter()
            .any(|seated| seated.nickname() == player.nickname())
        {
            return Err(Error::DuplicatePlayer(player.nickname().to_owned()));
        }

        info!(nickname = player.nickname(), "player enrolled");
        self.players.push(player);
        Ok(&self.players[self.players.len() - 1])
    }

    /// Swap in a fresh, unshuffled deck for the next round.
    pub fn new_game(&mut self) -> Result<()> {
        let dealt = matches!(self.phase, RoundPhase::Dealt | RoundPhase::Opened);
        if dealt || self.players.iter().any(|player| !player.hand().is_empty()) {
            return Err(Error::RoundInProgress);
        }

        self.deck = Some(Deck::base_deck());
        self.phase = RoundPhase::Fresh;
        Ok(())
    }

    /// Shuffle the deck of a round that has not been dealt yet.
    pub fn shuffle(&mut self) -> Result<()> {
        if !matches!(self.phase, RoundPhase::Fresh | RoundPhase::Shuffled) {
            return Err(Error::DeckNotReady);
        }

        let deck = self.deck.as_mut().ok_or(Error::DeckNotReady)?;
        deck.shuffle(&mut self.rng);
        self.phase = RoundPhase::Shuffled;
        Ok(())
    }

    /// Deal five cards to every player, one card per player per pass.
    pub fn deal_cards(&mut self) -> Result<()> {
        if self.players.len() < MIN_PLAYERS {
            return Err(Error::NotEnoughPlayers {
                min: MIN_PLAYERS,
                actual: self.players.len(),
            });
        }
        match self.phase {
            RoundPhase::Shuffled => {}
            RoundPhase::Fresh => return Err(Error::DeckNotShuffled),
            RoundPhase::Idle | RoundPhase::Dealt | RoundPhase::Opened => {
                return Err(Error::DeckNotReady)
            }
        }

        let deck = self.deck.as_mut().ok_or(Error::DeckNotReady)?;
        for _ in 0..HAND_SIZE {
            for player in &mut self.players {
                let card = deck.draw().ok_or(Error::DeckExhausted)?;
                trace!(nickname = player.nickname(), %card, "dealt");
                player.receive_card(card)?;
            }
        }

        self.phase = RoundPhase::Dealt;
        Ok(())
    }

    /// Open every hand, rank the players and settle the round. When the two
    /// strongest hands tie the round is a draw for everybody.
    pub fn open_hands(&mut self) -> Result<&MatchRecord> {
        if self.phase == RoundPhase::Opened {
            return Err(Error::HandsAlreadyOpened);
        }
        if self.players.len() < MIN_PLAYERS {
            return Err(Error::NotEnoughPlayers {
                min: MIN_PLAYERS,
                actual: self.players.len(),
            });
        }

        for player in &mut self.players {
            player.open_hand()?;
        }
        self.phase = RoundPhase::Opened;

        let (ranking, tiers, winner) = {
            let showdowns = self
                .players
                .iter()
                .map(|player| player.hand().showdown())
                .collect::<Result<Vec<&Showdown>>>()?;

            let mut ranking: Vec<usize> = (0..self.players.len()).collect();
            ranking.sort_by(|a, b| showdowns[*b].cmp(showdowns[*a]));

            let winner = match ranking.as_slice() {
                [first, second, ..] if showdowns[*first].cmp(showdowns[*second]) != Ordering::Equal => {
                    Some(*first)
                }
                _ => None,
            };
            let tiers: Vec<Tier> = showdowns.iter().map(|showdown| showdown.tier()).collect();
            (ranking, tiers, winner)
        };

        let prize = self.config.prize_point;
        for (index, player) in self.players.iter_mut().enumerate() {
            match winner {
                Some(winner) if winner == index => {
                    player.prize_point(prize);
                    player.win();
                }
                Some(_) => player.lose(),
                None => player.draw(),
            }
        }

        let entries = ranking
            .iter()
            .map(|index| {
                let player = &self.players[*index];
                MatchEntry {
                    nickname: player.nickname().to_owned(),
                    tier: tiers[*index],
                    hand: player.hand().to_string(),
                }
            })
            .collect();
        let winner_name = winner.map(|index| self.players[index].nickname().to_owned());

        let round = self.match_history.len() + 1;
        match &winner_name {
            Some(nickname) => info!(round, winner = nickname.as_str(), "round won"),
            None => info!(round, "round drawn"),
        }

        self.wins_history.push(winner);
        self.match_history.push(MatchRecord {
            round,
            entries,
            winner: winner_name,
        });
        Ok(&self.match_history[self.match_history.len() - 1])
    }

    /// Collect every hand once the round has been settled.
    pub fn retrieve_cards(&mut self) -> Result<()> {
        if self.phase != RoundPhase::Opened {
            return Err(Error::HandsNotRevealed);
        }

        for player in &mut self.players {
            player.drop_hand();
        }
        self.phase = RoundPhase::Idle;
        Ok(())
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn rounds_played(&self) -> usize {
        self.match_history.len()
    }

    pub fn latest_match(&self) -> Option<&MatchRecord> {
        self.match_history.last()
    }

    pub fn match_history(&self) -> &[MatchRecord] {
        &self.match_history
    }

    /// Winner of the most recent round; `None` before the first round or
    /// after a draw.
    pub fn last_match_winner(&self) -> Option<&Player> {
        let index = (*self.wins_history.last()?)?;
        self.players.get(index)
    }

    pub fn total_stage_winner(&self) -> Option<&Player> {
        self.players
            .iter()
            .min_by(|a, b| standing_order(a, b))
    }

    /// Players from best record to worst; ties keep enrollment order.
    pub fn standings(&self) -> Vec<&Player> {
        let mut standings: Vec<&Player> = self.players.iter().collect();
        standings.sort_by(|a, b| standing_order(a, b));
        standings
    }
}

fn standing_order(a: &Player, b: &Player) -> Ordering {
    b.wins()
        .cmp(&a.wins())
        .then_with(|| a.losses().cmp(&b.losses()))
        .then_with(|| b.points().cmp(&a.points()))
}
