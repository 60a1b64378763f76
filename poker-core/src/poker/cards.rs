use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use rand::prelude::{Rng, SliceRandom};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::poker::error::{Error, Result};
use crate::poker::hand::Hand;

/// Number of cards in a complete hand.
pub const HAND_SIZE: usize = 5;

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, EnumIter)]
#[repr(u8)]
pub enum Suit {
    Clubs = 0,
    Diamonds = 1,
    Hearts = 2,
    Spades = 3,
}

impl Suit {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Clubs => "\u{2663}\u{fe0f}",
            Self::Diamonds => "\u{2666}\u{fe0f}",
            Self::Hearts => "\u{2665}\u{fe0f}",
            Self::Spades => "\u{2660}\u{fe0f}",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.symbol())
    }
}

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, EnumIter)]
#[repr(u8)]
pub enum Rank {
    Two = 0,
    Three = 1,
    Four = 2,
    Five = 3,
    Six = 4,
    Seven = 5,
    Eight = 6,
    Nine = 7,
    Ten = 8,
    Jack = 9,
    Queen = 10,
    King = 11,
    Ace = 12,
}

impl Rank {
    pub fn label(self) -> &'static str {
        match self {
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::Ten => "10",
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
            Self::Ace => "A",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// A single playing card. Cards order by rank first and suit second; that
/// order is only used for stable iteration and display, never for hand
/// strength.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self { rank, suit }
    }

    /// Convert a shorthand identifier into a card. Panics if the identifier
    /// is incorrect. This exists only for test-writing.
    ///
    /// ```
    /// # use poker_core::prelude::{Card, Suit, Rank};
    /// let a = Card::from_ident("KH");
    /// let b = Card::new(Suit::Hearts, Rank::King);
    /// assert_eq!(a, b);
    /// ```
    pub fn from_ident(ident: &str) -> Self {
        ident.parse().unwrap_or_else(|err| panic!("{err}"))
    }
}

/// Parses `<rank><suit>` identifiers such as `AS`, `td` or `10H`.
impl FromStr for Card {
    type Err = Error;

    fn from_str(ident: &str) -> Result<Self> {
        let invalid = || Error::InvalidCard {
            ident: ident.to_owned(),
        };

        let mut chars = ident.trim().chars();
        let suit = match chars.next_back().map(|c| c.to_ascii_uppercase()) {
            Some('C') => Suit::Clubs,
            Some('D') => Suit::Diamonds,
            Some('H') => Suit::Hearts,
            Some('S') => Suit::Spades,
            _ => return Err(invalid()),
        };
        let rank = match chars.as_str().to_ascii_uppercase().as_str() {
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "T" | "10" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => return Err(invalid()),
        };

        Ok(Self { rank, suit })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:>2}", self.suit, self.rank)
    }
}

#[macro_export]
macro_rules! card {
    ($ident:literal) => {
        $crate::poker::cards::Card::from_ident($ident)
    };
}

#[macro_export]
macro_rules! cards {
    ($idents:literal) => {
        $idents
            .split_ascii_whitespace()
            .map($crate::poker::cards::Card::from_ident)
            .collect::<::std::vec::Vec<_>>()
    };
}

pub trait CardView {
    fn view(&self) -> &[Card];
}

impl CardView for Vec<Card> {
    fn view(&self) -> &[Card] {
        self
    }
}

impl CardView for [Card] {
    fn view(&self) -> &[Card] {
        self
    }
}

impl<V: CardView + ?Sized> CardView for &V {
    fn view(&self) -> &[Card] {
        (**self).view()
    }
}

#[derive(Copy, Clone, Debug, Hash, PartialOrd, Ord, PartialEq, Eq, EnumIter, strum_macros::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum Tier {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
}

lazy_static! {
    static ref BASE_DECK_CARDS: Vec<Card> = {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::iter() {
            for rank in Rank::iter() {
                cards.push(Card { rank, suit });
            }
        }
        cards
    };
}

impl Deck {
    pub fn base_deck() -> Self {
        Self {
            cards: BASE_DECK_CARDS.clone(),
        }
    }

    /// A deck that deals `cards` from the back.
    #[cfg(test)]
    pub(crate) fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn shuffle(&mut self, rng: &mut impl Rng) {
        self.cards.shuffle(rng);
    }

    pub fn shuffled(rng: &mut impl Rng) -> Self {
        let mut deck = Self::base_deck();
        deck.shuffle(rng);
        deck
    }

    pub fn peek_top_card(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Draw five cards into a fresh, unopened hand.
    pub fn draw_hand(&mut self) -> Result<Hand> {
        if self.count() < HAND_SIZE {
            return Err(Error::DeckExhausted);
        }

        let mut hand = Hand::empty();
        for _ in 0..HAND_SIZE {
            hand.add(self.draw().ok_or(Error::DeckExhausted)?)?;
        }
        Ok(hand)
    }

    pub fn count(&self) -> usize {
        self.cards.len()
    }
}

impl CardView for Deck {
    fn view(&self) -> &[Card] {
        &self.cards
    }
}
