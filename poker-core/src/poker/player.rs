use std::fmt;

use crate::poker::cards::Card;
use crate::poker::error::{Error, Result};
use crate::poker::hand::Hand;

pub const MAX_NICKNAME_LEN: usize = 20;

/// A seat at the table: a nickname, a point balance, a win/loss/draw record
/// and the hand currently held.
#[derive(Clone, Debug)]
pub struct Player {
    nickname: String,
    points: u32,
    wins: u32,
    losses: u32,
    draws: u32,
    hand: Hand,
}

impl Player {
    pub fn new(nickname: impl Into<String>, starting_points: u32) -> Result<Self> {
        let nickname = nickname.into();
        let length = nickname.chars().count();
        if nickname.trim().is_empty() || length > MAX_NICKNAME_LEN {
            return Err(Error::InvalidNickname(nickname));
        }

        Ok(Self {
            nickname,
            points: starting_points,
            wins: 0,
            losses: 0,
            draws: 0,
            hand: Hand::empty(),
        })
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn losses(&self) -> u32 {
        self.losses
    }

    pub fn draws(&self) -> u32 {
        self.draws
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn receive_card(&mut self, card: Card) -> Result<()> {
        self.hand.add(card)
    }

    pub fn open_hand(&mut self) -> Result<()> {
        self.hand.open().map(|_| ())
    }

    pub fn drop_hand(&mut self) {
        self.hand.clear();
    }

    pub fn prize_point(&mut self, amount: u32) {
        self.points = self.points.saturating_add(amount);
    }

    pub fn win(&mut self) {
        self.wins += 1;
    }

    pub fn lose(&mut self) {
        self.losses += 1;
    }

    pub fn draw(&mut self) {
        self.draws += 1;
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.nickname)
    }
}
